// file: src/replicate/mod.rs
// description: directory replication module exports
// reference: internal module structure

pub mod progress;
pub mod publisher;
pub mod remap;
pub mod walker;

pub use progress::{ReplicationProgress, ReplicationStats};
pub use publisher::{FolderPublisher, ObjectHandle};
pub use remap::{FileEntry, remap_folder, remap_folder_with};
pub use walker::{MAX_DEPTH, WalkOptions, folder_file_list};
