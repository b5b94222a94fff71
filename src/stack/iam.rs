// file: src/stack/iam.rs
// description: IAM policy and role declarations for the function execution role
// reference: https://docs.rs/aws-sdk-iam

use crate::error::{DeployError, Result};
use aws_sdk_iam::Client;
use aws_sdk_iam::error::DisplayErrorContext;
use serde_json::{Value, json};
use tracing::info;

#[derive(Debug, Clone)]
pub struct PolicyHandle {
    pub name: String,
    pub arn: String,
}

#[derive(Debug, Clone)]
pub struct RoleHandle {
    pub name: String,
    pub arn: String,
}

/// Policy document allowing the function to write its logs.
pub fn logging_policy_document() -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Effect": "Allow",
                "Action": [
                    "logs:CreateLogGroup",
                    "logs:CreateLogStream",
                    "logs:PutLogEvents"
                ],
                "Resource": "arn:aws:logs:*:*:*"
            }
        ]
    })
}

/// Trust policy letting the compute service assume the execution role.
pub fn assume_role_policy_document() -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Action": "sts:AssumeRole",
                "Principal": {
                    "Service": "lambda.amazonaws.com"
                },
                "Effect": "Allow"
            }
        ]
    })
}

pub async fn declare_logging_policy(client: &Client, name: &str) -> Result<PolicyHandle> {
    info!("Declaring logging policy {}", name);

    let output = client
        .create_policy()
        .policy_name(name)
        .path("/")
        .description("Policy for logging from the packaged function")
        .policy_document(logging_policy_document().to_string())
        .send()
        .await
        .map_err(|e| {
            DeployError::Iam(format!(
                "failed to create policy {name}: {}",
                DisplayErrorContext(&e)
            ))
        })?;

    let arn = output
        .policy()
        .and_then(|p| p.arn())
        .ok_or_else(|| DeployError::Iam(format!("no ARN returned for policy {name}")))?
        .to_string();

    Ok(PolicyHandle {
        name: name.to_string(),
        arn,
    })
}

pub async fn declare_execution_role(client: &Client, name: &str) -> Result<RoleHandle> {
    info!("Declaring execution role {}", name);

    let output = client
        .create_role()
        .role_name(name)
        .assume_role_policy_document(assume_role_policy_document().to_string())
        .send()
        .await
        .map_err(|e| {
            DeployError::Iam(format!(
                "failed to create role {name}: {}",
                DisplayErrorContext(&e)
            ))
        })?;

    let arn = output
        .role()
        .map(|r| r.arn().to_string())
        .ok_or_else(|| DeployError::Iam(format!("no ARN returned for role {name}")))?;

    Ok(RoleHandle {
        name: name.to_string(),
        arn,
    })
}

pub async fn attach_role_policy(
    client: &Client,
    role: &RoleHandle,
    policy: &PolicyHandle,
) -> Result<()> {
    info!("Attaching policy {} to role {}", policy.name, role.name);

    client
        .attach_role_policy()
        .role_name(&role.name)
        .policy_arn(&policy.arn)
        .send()
        .await
        .map_err(|e| {
            DeployError::Iam(format!(
                "failed to attach {} to {}: {}",
                policy.name,
                role.name,
                DisplayErrorContext(&e)
            ))
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_logging_policy_document_shape() {
        let doc = logging_policy_document();
        assert_eq!(doc["Version"], "2012-10-17");
        assert_eq!(doc["Statement"][0]["Effect"], "Allow");
        assert_eq!(doc["Statement"][0]["Resource"], "arn:aws:logs:*:*:*");
        assert_eq!(
            doc["Statement"][0]["Action"]
                .as_array()
                .map(|a| a.len()),
            Some(3)
        );
    }

    #[test]
    fn test_assume_role_policy_trusts_lambda() {
        let doc = assume_role_policy_document();
        assert_eq!(doc["Statement"][0]["Action"], "sts:AssumeRole");
        assert_eq!(
            doc["Statement"][0]["Principal"]["Service"],
            "lambda.amazonaws.com"
        );
    }
}
