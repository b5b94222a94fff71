// file: src/replicate/publisher.rs
// description: mirrors a local directory tree into an object store bucket
// reference: https://docs.rs/aws-sdk-s3

use crate::error::{DeployError, Result};
use crate::replicate::progress::ReplicationProgress;
use crate::replicate::remap::{FileEntry, remap_folder_with};
use crate::replicate::walker::WalkOptions;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Handle for one declared remote object.
#[derive(Debug, Clone)]
pub struct ObjectHandle {
    pub bucket: String,
    pub key: String,
    pub etag: Option<String>,
}

pub struct FolderPublisher<'a> {
    client: &'a Client,
    bucket: String,
}

impl<'a> FolderPublisher<'a> {
    pub fn new(client: &'a Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Replicate `dir` under `key_prefix`, one object per file.
    pub async fn publish(&self, dir: &str, key_prefix: &str) -> Result<Vec<ObjectHandle>> {
        self.publish_with(dir, key_prefix, &WalkOptions::new()).await
    }

    /// Replicate `dir` under `key_prefix` with caller-supplied traversal
    /// filters. Uploads run sequentially and the first error aborts the
    /// whole replication; nothing is retried or rolled back.
    pub async fn publish_with(
        &self,
        dir: &str,
        key_prefix: &str,
        options: &WalkOptions,
    ) -> Result<Vec<ObjectHandle>> {
        let entries = remap_folder_with(dir, key_prefix, options)?;
        info!(
            "Replicating {} files from {} to bucket {}",
            entries.len(),
            dir,
            self.bucket
        );

        let progress = ReplicationProgress::new(entries.len());
        let mut handles = Vec::with_capacity(entries.len());

        for entry in &entries {
            let size = fs::metadata(&entry.path)
                .map_err(|e| DeployError::FileOperation {
                    path: PathBuf::from(&entry.path),
                    source: e,
                })?
                .len();

            handles.push(self.put_entry(entry).await?);
            progress.object_uploaded(&entry.key, size);
        }

        progress.finish();
        let stats = progress.get_stats();
        info!(
            "Uploaded {} objects ({} bytes)",
            stats.objects_uploaded, stats.bytes_uploaded
        );

        Ok(handles)
    }

    async fn put_entry(&self, entry: &FileEntry) -> Result<ObjectHandle> {
        let body = ByteStream::from_path(&entry.path)
            .await
            .map_err(|e| DeployError::FileOperation {
                path: PathBuf::from(&entry.path),
                source: std::io::Error::other(e),
            })?;

        let content_type = content_type_for(&entry.path);
        debug!(
            "put {} -> s3://{}/{} ({})",
            entry.path,
            self.bucket,
            entry.key,
            content_type.unwrap_or("unknown content type")
        );

        let output = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&entry.key)
            .body(body)
            .set_content_type(content_type.map(str::to_string))
            .send()
            .await
            .map_err(|e| {
                DeployError::ObjectStore(format!(
                    "failed to put {}: {}",
                    entry.key,
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(ObjectHandle {
            bucket: self.bucket.clone(),
            key: entry.key.clone(),
            etag: output.e_tag().map(str::to_string),
        })
    }
}

/// Guess a content type from the file extension. Unrecognized extensions
/// yield `None` and the object is stored without an explicit content type.
pub fn content_type_for(path: &str) -> Option<&'static str> {
    let extension = Path::new(path).extension()?.to_str()?.to_lowercase();

    let content_type = match extension.as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" | "mjs" => "text/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "wasm" => "application/wasm",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        _ => return None,
    };

    Some(content_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn offline_client() -> Client {
        // points at a closed port; only reachable-free code paths may run
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-west-2"))
            .credentials_provider(Credentials::new("test", "test", None, None, "static"))
            .endpoint_url("http://127.0.0.1:1")
            .force_path_style(true)
            .build();
        Client::from_conf(config)
    }

    #[tokio::test]
    async fn test_publish_empty_directory_declares_nothing() {
        let temp = TempDir::new().unwrap();
        let client = offline_client();
        let publisher = FolderPublisher::new(&client, "empty-bucket");

        let handles = publisher
            .publish(&temp.path().to_string_lossy(), "prefix/")
            .await
            .unwrap();

        assert!(handles.is_empty());
    }

    #[tokio::test]
    async fn test_publish_fails_fast_on_unreachable_store() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("index.html"), "<html/>").unwrap();
        let client = offline_client();
        let publisher = FolderPublisher::new(&client, "site");

        let err = publisher
            .publish(&temp.path().to_string_lossy(), "")
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::ObjectStore(_)));
    }

    #[test]
    fn test_content_type_known_extensions() {
        assert_eq!(content_type_for("site/index.html"), Some("text/html"));
        assert_eq!(content_type_for("a/b/logo.SVG"), Some("image/svg+xml"));
        assert_eq!(content_type_for("app.js"), Some("text/javascript"));
    }

    #[test]
    fn test_content_type_unknown_extension_is_unset() {
        assert_eq!(content_type_for("binary.qqq"), None);
        assert_eq!(content_type_for("no_extension"), None);
        assert_eq!(content_type_for(""), None);
    }
}
