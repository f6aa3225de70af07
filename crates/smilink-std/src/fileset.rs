//! Selecting the files that make up a corpus.
//!
//! A [`FileSet`] combines explicitly named files with directory scans.
//! Explicit files keep the order they were added in; each scan contributes
//! its matches sorted by path, so the processing order (and with it the
//! canonical choice between conflicting definitions) is the same on every
//! run and every platform.

use crate::error::LoadError;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A directory to search for MIB files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirScan {
    /// Directory to search.
    pub root: PathBuf,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// File name patterns to accept. Empty accepts every file.
    pub include: Vec<String>,
    /// File name patterns to reject, checked after `include`.
    pub exclude: Vec<String>,
}

impl DirScan {
    /// Scan `root` without descending, accepting every file.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: false,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    /// Descend into subdirectories.
    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Accept file names matching `pattern` (`*` and `?` wildcards).
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include.push(pattern.into());
        self
    }

    /// Reject file names matching `pattern`.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    fn validate(&self) -> Result<(), LoadError> {
        for pattern in self.include.iter().chain(&self.exclude) {
            let reason = if pattern.is_empty() {
                "pattern is empty"
            } else if pattern.contains(['/', '\\']) {
                "patterns match file names, not paths"
            } else {
                continue;
            };
            return Err(LoadError::InvalidPattern {
                pattern: pattern.clone(),
                reason,
            });
        }
        Ok(())
    }

    fn accepts(&self, name: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|p| wildcard_match(p, name));
        included && !self.exclude.iter().any(|p| wildcard_match(p, name))
    }

    /// All accepted files under the root, sorted by path.
    ///
    /// Symbolic links are followed to files but never into directories.
    /// A subdirectory that cannot be listed is skipped with a warning.
    ///
    /// # Errors
    ///
    /// Fails on an invalid pattern or an unreadable root directory.
    pub fn collect(&self) -> Result<Vec<PathBuf>, LoadError> {
        self.validate()?;
        let mut found = Vec::new();
        let entries = fs::read_dir(&self.root).map_err(|e| LoadError::io(&self.root, e))?;
        self.walk(entries, &mut found);
        found.sort();
        Ok(found)
    }

    fn walk(&self, entries: fs::ReadDir, found: &mut Vec<PathBuf>) {
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!(target: "smilink", "skipping directory entry: {err}");
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                if self.recursive {
                    match fs::read_dir(&path) {
                        Ok(entries) => self.walk(entries, found),
                        Err(err) => log::warn!(target: "smilink", "skipping {}: {err}", path.display()),
                    }
                }
                continue;
            }
            // follows symlinks, so a link to a directory is not a file
            if !fs::metadata(&path).is_ok_and(|m| m.is_file()) {
                continue;
            }
            if self.accepts(&entry.file_name().to_string_lossy()) {
                found.push(path);
            }
        }
    }
}

/// The files of a corpus, in processing order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileSet {
    files: Vec<PathBuf>,
    scans: Vec<DirScan>,
}

impl FileSet {
    /// Create an empty file set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Add a directory scan.
    #[must_use]
    pub fn with_scan(mut self, scan: DirScan) -> Self {
        self.scans.push(scan);
        self
    }

    /// Expand into a list of paths: explicit files first, then each scan.
    ///
    /// A path reached more than once is kept at its first position.
    ///
    /// # Errors
    ///
    /// Fails on an invalid pattern or an unreadable directory.
    pub fn resolve(&self) -> Result<Vec<PathBuf>, LoadError> {
        let mut seen = BTreeSet::new();
        let mut paths = Vec::new();
        for path in self.files.iter().cloned() {
            if seen.insert(path.clone()) {
                paths.push(path);
            }
        }
        for scan in &self.scans {
            for path in scan.collect()? {
                if seen.insert(path.clone()) {
                    paths.push(path);
                }
            }
        }
        Ok(paths)
    }
}

/// Match `name` against a pattern where `*` matches any run of characters
/// and `?` exactly one.
#[must_use]
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();
    let (mut p, mut n) = (0, 0);
    // position of the last `*` and the name position it was tried at
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, n));
                p += 1;
            }
            Some(&c) if c == '?' || c == name[n] => {
                p += 1;
                n += 1;
            }
            _ => match backtrack {
                Some((star, tried)) => {
                    p = star + 1;
                    n = tried + 1;
                    backtrack = Some((star, tried + 1));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|&c| c == '*')
}
