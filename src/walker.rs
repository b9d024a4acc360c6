//! Filesystem walker for enumerating the files of a source tree

use std::path::PathBuf;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// A regular file discovered during traversal.
///
/// The path is kept exactly as the traversal yields it (source folder as
/// given, joined with separators), since it becomes the block header in the
/// output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// Filesystem walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false)
    pub follow_symlinks: bool,
    /// Path components to skip entirely (e.g. ".git", "target").
    /// Empty by default: every discovered file is included.
    pub ignore_patterns: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    pub max_depth: Option<usize>,
    /// Sort entries lexicographically by path (default: true).
    /// When false, entries keep the raw directory-listing order.
    pub sort_entries: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_patterns: Vec::new(),
            max_depth: None,
            sort_entries: true,
        }
    }
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the source tree and collect every regular file.
    ///
    /// Traversal errors (nonexistent root, unreadable directory, entry
    /// vanished mid-walk) are logged and skipped, so a broken subtree yields
    /// fewer entries rather than an error.
    pub fn walk(&self) -> Vec<FileEntry> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };

            if self.should_ignore(&entry) {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "Skipping entry without metadata");
                    continue;
                }
            };

            // Directories are descended into but produce no entries themselves.
            if metadata.is_file() {
                entries.push(FileEntry {
                    path: entry.path().to_path_buf(),
                    size: metadata.len(),
                });
            }
        }

        if self.config.sort_entries {
            entries.sort_by(|a, b| a.path.cmp(&b.path));
        }

        entries
    }

    /// Check if an entry should be ignored based on ignore patterns
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        if self.config.ignore_patterns.is_empty() {
            return false;
        }

        for component in entry.path().components() {
            if let std::path::Component::Normal(name) = component {
                let name = name.to_string_lossy();
                if self
                    .config
                    .ignore_patterns
                    .iter()
                    .any(|pattern| name == pattern.as_str())
                {
                    return true;
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_walker_collects_files_recursively() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();

        fs::write(root.join("file1.txt"), "content1").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub").join("file2.txt"), "content2").unwrap();

        let walker = Walker::new(root);
        let entries = walker.walk();

        assert_eq!(entries.len(), 2);
        assert!(entries[0].path.ends_with("file1.txt"));
        assert!(entries[1].path.ends_with("sub/file2.txt"));
    }

    #[test]
    fn test_walker_nonexistent_root_yields_no_entries() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("does_not_exist");

        let walker = Walker::new(root);
        assert!(walker.walk().is_empty());
    }

    #[test]
    fn test_walker_ignores_patterns() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();

        fs::write(root.join("file.txt"), "content").unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".git").join("config"), "git config").unwrap();

        let config = WalkerConfig {
            ignore_patterns: vec![".git".to_string()],
            ..WalkerConfig::default()
        };
        let walker = Walker::with_config(root, config);
        let entries = walker.walk();

        assert_eq!(entries.len(), 1);
        assert!(entries[0].path.ends_with("file.txt"));
    }

    #[test]
    fn test_walker_includes_everything_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();

        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".git").join("config"), "git config").unwrap();

        let walker = Walker::new(root);
        let entries = walker.walk();

        assert_eq!(entries.len(), 1, "no built-in filtering");
    }

    #[test]
    fn test_walker_sorted_ordering() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();

        fs::write(root.join("z_file.txt"), "content").unwrap();
        fs::write(root.join("a_file.txt"), "content").unwrap();
        fs::write(root.join("m_file.txt"), "content").unwrap();

        let walker = Walker::new(root);
        let entries = walker.walk();

        let paths: Vec<_> = entries.iter().map(|e| e.path.clone()).collect();
        let mut sorted_paths = paths.clone();
        sorted_paths.sort();
        assert_eq!(paths, sorted_paths);
    }

    #[test]
    fn test_walker_unsorted_still_collects_all() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();

        fs::write(root.join("b.txt"), "b").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();

        let config = WalkerConfig {
            sort_entries: false,
            ..WalkerConfig::default()
        };
        let walker = Walker::with_config(root, config);
        assert_eq!(walker.walk().len(), 2);
    }

    #[test]
    fn test_walker_max_depth() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();

        fs::write(root.join("top.txt"), "top").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub").join("deep.txt"), "deep").unwrap();

        let config = WalkerConfig {
            max_depth: Some(1),
            ..WalkerConfig::default()
        };
        let walker = Walker::with_config(root, config);
        let entries = walker.walk();

        assert_eq!(entries.len(), 1);
        assert!(entries[0].path.ends_with("top.txt"));
    }

    #[test]
    fn test_walker_records_file_size() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();

        fs::write(root.join("file.txt"), "hello").unwrap();

        let walker = Walker::new(root);
        let entries = walker.walk();

        assert_eq!(entries[0].size, 5);
    }
}
