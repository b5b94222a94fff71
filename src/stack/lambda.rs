// file: src/stack/lambda.rs
// description: packaged function and dependency layer declarations
// reference: https://docs.rs/aws-sdk-lambda

use crate::config::FunctionConfig;
use crate::error::{DeployError, Result};
use crate::utils::Validator;
use aws_sdk_lambda::Client;
use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::{FunctionCode, LayerVersionContentInput, Runtime};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct LayerHandle {
    pub name: String,
    pub arn: String,
    pub version: i64,
}

#[derive(Debug, Clone)]
pub struct FunctionHandle {
    pub name: String,
    pub arn: String,
}

fn read_archive(path: &Path) -> Result<Blob> {
    Validator::validate_zip_file(path)?;
    let bytes = fs::read(path).map_err(|e| DeployError::FileOperation {
        path: PathBuf::from(path),
        source: e,
    })?;
    Ok(Blob::new(bytes))
}

/// Publish the dependency layer from a local archive.
pub async fn declare_layer(
    client: &Client,
    config: &FunctionConfig,
    name: &str,
) -> Result<LayerHandle> {
    info!(
        "Declaring layer {} from {}",
        name,
        config.layer_path.display()
    );

    let output = client
        .publish_layer_version()
        .layer_name(name)
        .compatible_runtimes(Runtime::from(config.runtime.as_str()))
        .content(
            LayerVersionContentInput::builder()
                .zip_file(read_archive(&config.layer_path)?)
                .build(),
        )
        .send()
        .await
        .map_err(|e| {
            DeployError::Lambda(format!(
                "failed to publish layer {name}: {}",
                DisplayErrorContext(&e)
            ))
        })?;

    let arn = output
        .layer_version_arn()
        .ok_or_else(|| DeployError::Lambda(format!("no ARN returned for layer {name}")))?
        .to_string();

    Ok(LayerHandle {
        name: name.to_string(),
        arn,
        version: output.version(),
    })
}

/// Create the packaged function with its execution role and layer.
pub async fn declare_function(
    client: &Client,
    config: &FunctionConfig,
    name: &str,
    role_arn: &str,
    layer_arn: &str,
) -> Result<FunctionHandle> {
    info!(
        "Declaring function {} from {}",
        name,
        config.code_path.display()
    );

    let output = client
        .create_function()
        .function_name(name)
        .role(role_arn)
        .handler(&config.handler)
        .runtime(Runtime::from(config.runtime.as_str()))
        .memory_size(config.memory_mb)
        .timeout(config.timeout_secs)
        .layers(layer_arn)
        .code(
            FunctionCode::builder()
                .zip_file(read_archive(&config.code_path)?)
                .build(),
        )
        .send()
        .await
        .map_err(|e| {
            DeployError::Lambda(format!(
                "failed to create function {name}: {}",
                DisplayErrorContext(&e)
            ))
        })?;

    let arn = output
        .function_arn()
        .ok_or_else(|| DeployError::Lambda(format!("no ARN returned for function {name}")))?
        .to_string();

    Ok(FunctionHandle {
        name: name.to_string(),
        arn,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_archive_requires_zip_extension() {
        let temp = TempDir::new().unwrap();
        let tarball = temp.path().join("deps.tar.gz");
        fs::write(&tarball, "not a zip").unwrap();

        assert!(read_archive(&tarball).is_err());
    }

    #[test]
    fn test_read_archive_missing_file() {
        assert!(read_archive(Path::new("/nonexistent/deploy.zip")).is_err());
    }

    #[test]
    fn test_read_archive_reads_bytes() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("deploy.zip");
        fs::write(&archive, b"PK\x03\x04").unwrap();

        let blob = read_archive(&archive).unwrap();
        assert_eq!(blob.as_ref(), &b"PK\x03\x04"[..]);
    }
}
