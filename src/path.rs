// file: src/path.rs
// description: pure path normalization helpers shared by the walker and remapper
// reference: internal string utilities

/// Ensure the path starts with exactly one `/`.
pub fn ensure_leading_slash(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

/// Ensure the path ends with exactly one `/`.
pub fn ensure_trailing_slash(path: &str) -> String {
    format!("{}/", path.trim_end_matches('/'))
}

/// Strip every leading `/` from the path.
pub fn strip_leading_slash(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Strip every trailing `/` from the path.
pub fn strip_trailing_slash(path: &str) -> &str {
    path.trim_end_matches('/')
}

/// Normalize an object key prefix: no leading `/`, exactly one trailing `/`.
///
/// An empty prefix stays empty so that keys land at the bucket root.
pub fn normalize_key_prefix(prefix: &str) -> String {
    strip_leading_slash(&ensure_trailing_slash(prefix)).to_string()
}

/// Normalize a filesystem path: `/` separators, no trailing slashes.
///
/// `\` is only rewritten on platforms where it is the separator; elsewhere
/// it is a legal filename character and must survive untouched.
pub fn normalize_path(path: &str) -> String {
    let path = if std::path::MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace('\\', "/")
    };
    strip_trailing_slash(&path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ensure_leading_slash() {
        assert_eq!(ensure_leading_slash("a/b"), "/a/b");
        assert_eq!(ensure_leading_slash("/a/b"), "/a/b");
        assert_eq!(ensure_leading_slash("///a/b"), "/a/b");
        assert_eq!(ensure_leading_slash(""), "/");
    }

    #[test]
    fn test_ensure_trailing_slash() {
        assert_eq!(ensure_trailing_slash("a/b"), "a/b/");
        assert_eq!(ensure_trailing_slash("a/b/"), "a/b/");
        assert_eq!(ensure_trailing_slash("a/b///"), "a/b/");
        assert_eq!(ensure_trailing_slash(""), "/");
    }

    #[test]
    fn test_strip_leading_slash() {
        assert_eq!(strip_leading_slash("/a/b"), "a/b");
        assert_eq!(strip_leading_slash("///a/b"), "a/b");
        assert_eq!(strip_leading_slash("a/b"), "a/b");
        assert_eq!(strip_leading_slash(""), "");
    }

    #[test]
    fn test_strip_trailing_slash() {
        assert_eq!(strip_trailing_slash("a/b/"), "a/b");
        assert_eq!(strip_trailing_slash("a/b///"), "a/b");
        assert_eq!(strip_trailing_slash("a/b"), "a/b");
        assert_eq!(strip_trailing_slash("/"), "");
    }

    #[test]
    fn test_strip_of_ensure_is_strip() {
        // strip_leading_slash(ensure_leading_slash(s)) == strip_leading_slash(s)
        for s in ["", "/", "a", "/a", "//a/b/", "a/b"] {
            assert_eq!(
                strip_leading_slash(&ensure_leading_slash(s)),
                strip_leading_slash(s)
            );
        }
    }

    #[test]
    fn test_normalize_key_prefix() {
        assert_eq!(normalize_key_prefix("/a/b/"), "a/b/");
        assert_eq!(normalize_key_prefix("a/b"), "a/b/");
        assert_eq!(normalize_key_prefix("/"), "");
        assert_eq!(normalize_key_prefix(""), "");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("a/b/c/"), "a/b/c");
        assert_eq!(normalize_path("a/b/c"), "a/b/c");
        assert_eq!(normalize_path(""), "");
    }

    #[cfg(windows)]
    #[test]
    fn test_normalize_path_rewrites_separators() {
        assert_eq!(normalize_path("a\\b\\c"), "a/b/c");
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_path_keeps_backslash_filenames() {
        assert_eq!(normalize_path(r"a\b.txt"), r"a\b.txt");
    }
}
