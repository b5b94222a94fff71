// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod path;
pub mod provider;
pub mod replicate;
pub mod stack;
pub mod utils;

pub use config::{Config, FunctionConfig, ProviderConfig, ReplicationConfig, StackConfig};
pub use error::{DeployError, Result};
pub use provider::CloudProvider;
pub use replicate::{
    FileEntry, FolderPublisher, ObjectHandle, ReplicationProgress, ReplicationStats, WalkOptions,
    folder_file_list, remap_folder, remap_folder_with,
};
pub use stack::{
    BucketHandle, FunctionHandle, LayerHandle, PolicyHandle, ResourceKind, ResourceRecord,
    RoleHandle, Stack,
};
pub use utils::Validator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _options = WalkOptions::new();
    }
}
