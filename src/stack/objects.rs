// file: src/stack/objects.rs
// description: bucket declaration for replicated objects
// reference: https://docs.rs/aws-sdk-s3

use crate::error::{DeployError, Result};
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct BucketHandle {
    pub name: String,
}

/// Create the bucket if it does not already exist. Re-declaring a bucket we
/// already own is not an error; every other failure propagates.
pub async fn declare_bucket(client: &Client, name: &str, region: &str) -> Result<BucketHandle> {
    info!("Declaring bucket {}", name);

    let mut request = client.create_bucket().bucket(name);
    if region != "us-east-1" {
        request = request.create_bucket_configuration(
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build(),
        );
    }

    match request.send().await {
        Ok(_) => {}
        Err(e) => {
            let service_error = e.into_service_error();
            if service_error.is_bucket_already_owned_by_you()
                || service_error.is_bucket_already_exists()
            {
                debug!("Bucket {} already declared", name);
            } else {
                return Err(DeployError::ObjectStore(format!(
                    "failed to create bucket {name}: {}",
                    DisplayErrorContext(&service_error)
                )));
            }
        }
    }

    Ok(BucketHandle {
        name: name.to_string(),
    })
}
