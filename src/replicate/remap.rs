// file: src/replicate/remap.rs
// description: remapping of local file paths to remote object keys
// reference: internal data structures

use crate::error::Result;
use crate::path::{normalize_key_prefix, normalize_path, strip_leading_slash};
use crate::replicate::walker::{WalkOptions, folder_file_list};

/// One file scheduled for replication: where it lives locally and the key
/// it will be stored under remotely. Discarded after upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub key: String,
}

/// Walk `dir_base` with default filters and map every file to an object key
/// under `key_base`.
pub fn remap_folder(dir_base: &str, key_base: &str) -> Result<Vec<FileEntry>> {
    remap_folder_with(dir_base, key_base, &WalkOptions::new())
}

/// Like [`remap_folder`], with caller-supplied traversal filters.
///
/// The key is an anchored-prefix rewrite: the normalized base directory is
/// stripped from the front of each path and replaced with the normalized
/// key prefix. The remainder is preserved verbatim.
pub fn remap_folder_with(
    dir_base: &str,
    key_base: &str,
    options: &WalkOptions,
) -> Result<Vec<FileEntry>> {
    let base = normalize_path(dir_base);
    let prefix = normalize_key_prefix(key_base);

    Ok(folder_file_list(&base, options)?
        .into_iter()
        .map(|path| {
            let relative = match path.strip_prefix(&base) {
                Some(rest) => strip_leading_slash(rest),
                None => path.as_str(),
            };
            let key = format!("{prefix}{relative}");
            FileEntry { path, key }
        })
        .collect())
}
