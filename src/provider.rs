// file: src/provider.rs
// description: service clients bound to the cloud emulation endpoint
// reference: https://docs.rs/aws-config

use crate::config::ProviderConfig;
use crate::error::{DeployError, Result};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use tracing::{debug, info};

/// All service clients share one endpoint URL and static credentials; the
/// emulation endpoint routes by request signature, not by hostname.
#[derive(Debug, Clone)]
pub struct CloudProvider {
    pub s3: aws_sdk_s3::Client,
    pub iam: aws_sdk_iam::Client,
    pub lambda: aws_sdk_lambda::Client,
}

impl CloudProvider {
    pub async fn connect(config: &ProviderConfig) -> Self {
        info!(
            "Connecting to emulation endpoint {} (region {})",
            config.endpoint_url, config.region
        );

        let shared = aws_config::defaults(BehaviorVersion::latest())
            .endpoint_url(&config.endpoint_url)
            .region(Region::new(config.region.clone()))
            .credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "static",
            ))
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.force_path_style)
            .build();

        Self {
            s3: aws_sdk_s3::Client::from_conf(s3_config),
            iam: aws_sdk_iam::Client::new(&shared),
            lambda: aws_sdk_lambda::Client::new(&shared),
        }
    }

    /// List buckets as a connectivity check against the endpoint.
    pub async fn ping(&self) -> Result<bool> {
        debug!("Checking emulation endpoint connectivity");

        match self.s3.list_buckets().send().await {
            Ok(_) => {
                info!("Emulation endpoint reachable");
                Ok(true)
            }
            Err(e) => Err(DeployError::Provider(format!(
                "endpoint unreachable: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_connect_builds_all_clients() {
        // connect only assembles client configuration, no network traffic
        let config = Config::default_config();
        let provider = tokio_test::block_on(CloudProvider::connect(&config.provider));

        assert_eq!(
            provider.s3.config().region().map(|r| r.as_ref()),
            Some("us-west-2")
        );
        assert_eq!(
            provider.lambda.config().region().map(|r| r.as_ref()),
            Some("us-west-2")
        );
    }
}
