// file: src/replicate/walker.rs
// description: depth-limited recursive directory walking with regex filtering
// reference: https://docs.rs/regex

use crate::error::{DeployError, Result};
use crate::path::normalize_path;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory nesting beyond this depth aborts the walk. Protects against
/// symlink cycles and pathological trees.
pub const MAX_DEPTH: usize = 50;

#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Descend into subdirectories. Defaults to true.
    pub recursive: bool,
    /// Sort the final flat list lexicographically. Useful for hashing and
    /// deterministic uploads. Defaults to true.
    pub sort: bool,
    /// When set, only paths matching the pattern are returned.
    pub include: Option<Regex>,
    /// When set, paths matching the pattern are omitted.
    pub exclude: Option<Regex>,
}

impl WalkOptions {
    pub fn new() -> Self {
        Self {
            recursive: true,
            sort: true,
            include: None,
            exclude: None,
        }
    }
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Return the normalized paths of all files under `dir`.
///
/// Filters are evaluated against the normalized path of every candidate,
/// directories included, so an excluded directory is pruned without being
/// descended. With `recursive` disabled, subdirectory entries are omitted
/// from the output entirely.
pub fn folder_file_list(dir: impl AsRef<Path>, options: &WalkOptions) -> Result<Vec<String>> {
    walk(dir.as_ref(), options, 0)
}

fn walk(dir: &Path, options: &WalkOptions, depth: usize) -> Result<Vec<String>> {
    if depth > MAX_DEPTH {
        return Err(DeployError::RecursionLimit {
            limit: MAX_DEPTH,
            root: dir.to_path_buf(),
        });
    }

    let entries = fs::read_dir(dir).map_err(|e| DeployError::FileOperation {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut output = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| DeployError::FileOperation {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = normalize_path(&entry.path().to_string_lossy());

        if let Some(exclude) = &options.exclude
            && exclude.is_match(&path)
        {
            debug!("Excluded by pattern: {}", path);
            continue;
        }
        if let Some(include) = &options.include
            && !include.is_match(&path)
        {
            debug!("Not matched by include pattern: {}", path);
            continue;
        }

        // file_type() does not follow symlinks, so a symlinked directory is
        // listed as a plain entry rather than descended into.
        let file_type = entry.file_type().map_err(|e| DeployError::FileOperation {
            path: PathBuf::from(&path),
            source: e,
        })?;

        if file_type.is_dir() {
            if options.recursive {
                output.extend(walk(Path::new(&path), options, depth + 1)?);
            }
            continue;
        }

        output.push(path);
    }

    // sorting happens once, over the fully flattened list at the root call
    if options.sort && depth == 0 {
        output.sort();
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn fixture_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "alpha").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub/b.txt"), "beta").unwrap();
        temp
    }

    fn relative(paths: Vec<String>, root: &Path) -> Vec<String> {
        let base = normalize_path(&root.to_string_lossy());
        paths
            .into_iter()
            .map(|p| p.strip_prefix(&format!("{base}/")).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_recursive_walk_is_sorted() {
        let temp = fixture_tree();
        let files = folder_file_list(temp.path(), &WalkOptions::new()).unwrap();

        assert_eq!(relative(files, temp.path()), vec!["a.txt", "sub/b.txt"]);
    }

    #[test]
    fn test_non_recursive_walk_omits_directories() {
        let temp = fixture_tree();
        let options = WalkOptions {
            recursive: false,
            ..WalkOptions::new()
        };
        let files = folder_file_list(temp.path(), &options).unwrap();

        assert_eq!(relative(files, temp.path()), vec!["a.txt"]);
    }

    #[test]
    fn test_exclude_pattern_removes_matches() {
        let temp = fixture_tree();
        fs::write(temp.path().join("scratch.tmp"), "junk").unwrap();

        let options = WalkOptions {
            exclude: Some(Regex::new(r"\.tmp$").unwrap()),
            ..WalkOptions::new()
        };
        let files = folder_file_list(temp.path(), &options).unwrap();

        assert_eq!(relative(files, temp.path()), vec!["a.txt", "sub/b.txt"]);
    }

    #[test]
    fn test_include_pattern_restricts_to_matches() {
        let temp = fixture_tree();
        fs::write(temp.path().join("notes.md"), "# notes").unwrap();

        // include patterns apply to directory paths too, so `sub` must also
        // be matched for its contents to be reachable
        let options = WalkOptions {
            include: Some(Regex::new(r"(\.txt$|/sub$)").unwrap()),
            ..WalkOptions::new()
        };
        let files = folder_file_list(temp.path(), &options).unwrap();

        assert_eq!(relative(files, temp.path()), vec!["a.txt", "sub/b.txt"]);
    }

    #[test]
    fn test_recursion_limit_exceeded() {
        let temp = TempDir::new().unwrap();
        let mut dir = temp.path().to_path_buf();
        for n in 0..51 {
            dir = dir.join(format!("d{n}"));
        }
        fs::create_dir_all(&dir).unwrap();

        let err = folder_file_list(temp.path(), &WalkOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            DeployError::RecursionLimit { limit: MAX_DEPTH, .. }
        ));
    }

    #[test]
    fn test_depth_just_under_limit_succeeds() {
        let temp = TempDir::new().unwrap();
        let mut dir = temp.path().to_path_buf();
        for n in 0..50 {
            dir = dir.join(format!("d{n}"));
        }
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("leaf.txt"), "deep").unwrap();

        let files = folder_file_list(temp.path(), &WalkOptions::new()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("d49/leaf.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_backslash_filenames_survive_the_walk() {
        // `\` is an ordinary filename character here, not a separator
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(r"a\b.txt"), "content").unwrap();

        let files = folder_file_list(temp.path(), &WalkOptions::new()).unwrap();
        assert_eq!(relative(files.clone(), temp.path()), vec![r"a\b.txt"]);
        assert!(Path::new(&files[0]).exists());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let err = folder_file_list("/nonexistent-stackform", &WalkOptions::new()).unwrap_err();
        assert!(matches!(err, DeployError::FileOperation { .. }));
    }

    #[test]
    fn test_empty_directory_yields_nothing() {
        let temp = TempDir::new().unwrap();
        let files = folder_file_list(temp.path(), &WalkOptions::new()).unwrap();
        assert!(files.is_empty());
    }
}
