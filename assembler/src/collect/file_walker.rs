//! File Walker — .gitignore-respecting file discovery using the `ignore` crate

use crate::collect::extensions::ExtensionSet;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Walks a project tree for source files.
pub struct FileWalker {
    root: PathBuf,
    respect_gitignore: bool,
}

impl FileWalker {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            respect_gitignore: true,
        }
    }

    /// Toggle hidden-file and .gitignore filtering (on by default).
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.respect_gitignore = yes;
        self
    }

    /// Every regular file under root, sorted by path.
    pub fn all_files(&self) -> Vec<PathBuf> {
        self.walk(|_| true)
    }

    /// Files whose name ends in one of `exts`, sorted by path.
    ///
    /// Sorting fixes the discovery order, which in turn fixes the order
    /// lines are concatenated in.
    pub fn matching_files(&self, exts: &ExtensionSet) -> Vec<PathBuf> {
        self.walk(|p| exts.matches(p))
    }

    fn walk(&self, keep: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(self.respect_gitignore)
            .git_ignore(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .ignore(self.respect_gitignore)
            .parents(self.respect_gitignore)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!("Skipping unreadable directory entry: {err}");
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_some_and(|t| t.is_file()) && keep(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        files
    }
}
