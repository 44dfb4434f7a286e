//! Line index: every collected file concatenated into one line sequence,
//! with per-file boundaries kept so pagination can respect them.

use crate::collect::SourceEncoding;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// One decoded source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path relative to the project root, `/`-separated for display
    pub relative_path: String,
    pub lines: Vec<String>,
    pub encoding: SourceEncoding,
}

impl SourceFile {
    /// Split `text` into lines (`\n` or `\r\n` terminated).
    pub fn from_text(path: &Path, root: &Path, text: &str, encoding: SourceEncoding) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        Self {
            path: path.to_path_buf(),
            relative_path,
            lines: text.lines().map(str::to_string).collect(),
            encoding,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Half-open range `[start, end)` of global line numbers owned by one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBoundary {
    pub relative_path: String,
    pub start: usize,
    pub end: usize,
}

impl FileBoundary {
    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line < self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Global ordered concatenation of all source lines.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    lines: Vec<String>,
    boundaries: Vec<FileBoundary>,
}

impl LineIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_files(files: impl IntoIterator<Item = SourceFile>) -> Self {
        let mut index = Self::new();
        for file in files {
            index.push(file);
        }
        index
    }

    /// Append a file's lines and record its boundary. Empty files still get
    /// a (zero-length) boundary.
    pub fn push(&mut self, file: SourceFile) {
        let start = self.lines.len();
        self.lines.extend(file.lines);
        self.boundaries.push(FileBoundary {
            relative_path: file.relative_path,
            start,
            end: self.lines.len(),
        });
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn slice(&self, range: Range<usize>) -> &[String] {
        &self.lines[range]
    }

    pub fn boundaries(&self) -> &[FileBoundary] {
        &self.boundaries
    }

    /// The file that owns global line `line`, if any.
    pub fn boundary_at(&self, line: usize) -> Option<&FileBoundary> {
        let idx = self.boundaries.partition_point(|b| b.end <= line);
        self.boundaries[idx..]
            .iter()
            .find(|b| !b.is_empty())
            .filter(|b| b.contains(line))
    }

    /// Pick the excerpt windows: everything when it fits in `head + tail`,
    /// otherwise the first `head` and last `tail` lines.
    pub fn excerpt(&self, head: usize, tail: usize) -> Excerpt {
        let total = self.len();
        if total <= head + tail {
            return Excerpt {
                front: 0..total,
                back: None,
                total,
            };
        }

        Excerpt {
            front: 0..head,
            back: (tail > 0).then(|| total - tail..total),
            total,
        }
    }
}

/// Leading and trailing line ranges selected for inclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub front: Range<usize>,
    pub back: Option<Range<usize>>,
    /// Length of the index the excerpt was taken from
    pub total: usize,
}

impl Excerpt {
    /// Whether lines between the two windows were dropped.
    pub fn is_truncated(&self) -> bool {
        self.line_count() < self.total
    }

    pub fn line_count(&self) -> usize {
        self.front.len() + self.back.as_ref().map_or(0, |r| r.len())
    }

    /// Selected lines in output order.
    pub fn lines<'a>(&self, index: &'a LineIndex) -> Vec<&'a str> {
        let mut out: Vec<&str> = index
            .slice(self.front.clone())
            .iter()
            .map(String::as_str)
            .collect();
        if let Some(back) = &self.back {
            out.extend(index.slice(back.clone()).iter().map(String::as_str));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, lines: usize) -> SourceFile {
        SourceFile {
            path: PathBuf::from(name),
            relative_path: name.to_string(),
            lines: (0..lines).map(|i| format!("{name}:{i}")).collect(),
            encoding: SourceEncoding::Utf8,
        }
    }

    #[test]
    fn test_from_text_relative_path_and_line_split() {
        let root = Path::new("/proj");
        let f = SourceFile::from_text(
            Path::new("/proj/src/main.rs"),
            root,
            "fn main() {\r\n}\n",
            SourceEncoding::Utf8,
        );
        assert_eq!(f.relative_path, "src/main.rs");
        assert_eq!(f.lines, vec!["fn main() {", "}"]);
    }

    #[test]
    fn test_push_records_boundaries() {
        let index = LineIndex::from_files([file("a", 3), file("empty", 0), file("b", 2)]);
        assert_eq!(index.len(), 5);
        let b = index.boundaries();
        assert_eq!((b[0].start, b[0].end), (0, 3));
        assert_eq!((b[1].start, b[1].end), (3, 3));
        assert_eq!((b[2].start, b[2].end), (3, 5));
    }

    #[test]
    fn test_boundary_at_skips_empty_files() {
        let index = LineIndex::from_files([file("a", 3), file("empty", 0), file("b", 2)]);
        assert_eq!(index.boundary_at(0).unwrap().relative_path, "a");
        assert_eq!(index.boundary_at(2).unwrap().relative_path, "a");
        assert_eq!(index.boundary_at(3).unwrap().relative_path, "b");
        assert_eq!(index.boundary_at(4).unwrap().relative_path, "b");
        assert!(index.boundary_at(5).is_none());
    }

    #[test]
    fn test_excerpt_fits() {
        let index = LineIndex::from_files([file("a", 10)]);
        let ex = index.excerpt(6, 4);
        assert_eq!(ex.front, 0..10);
        assert!(ex.back.is_none());
        assert!(!ex.is_truncated());
    }

    #[test]
    fn test_excerpt_truncates_to_head_and_tail() {
        let index = LineIndex::from_files([file("a", 7), file("b", 8)]);
        let ex = index.excerpt(4, 3);
        assert_eq!(ex.front, 0..4);
        assert_eq!(ex.back, Some(12..15));
        assert_eq!(ex.line_count(), 7);
        assert!(ex.is_truncated());
        assert_eq!(
            ex.lines(&index),
            vec!["a:0", "a:1", "a:2", "a:3", "b:5", "b:6", "b:7"]
        );
    }

    #[test]
    fn test_excerpt_zero_tail() {
        let index = LineIndex::from_files([file("a", 10)]);
        let ex = index.excerpt(4, 0);
        assert_eq!(ex.front, 0..4);
        assert!(ex.back.is_none());
        assert!(ex.is_truncated());
    }
}
