//! Extension lists: parsing the comma-separated list from the user and
//! detecting what a project actually contains.

use crate::collect::file_walker::FileWalker;
use crate::error::{AssembleError, AssembleResult};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// Extensions listed first by detection, in no particular order.
const COMMON_EXTENSIONS: &[&str] = &[
    "java", "py", "js", "html", "css", "xml", "json", "c", "cpp", "h", "hpp", "cs", "php", "go",
    "rs", "ts", "vue", "jsx", "tsx",
];

/// Never reported by detection: VCS metadata and generated documents.
fn is_excluded(ext: &str) -> bool {
    ext.starts_with("git") || ext.eq_ignore_ascii_case("docx")
}

/// Ordered, de-duplicated set of file extensions without leading dots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    exts: Vec<String>,
}

impl ExtensionSet {
    pub fn as_slice(&self) -> &[String] {
        &self.exts
    }

    pub fn len(&self) -> usize {
        self.exts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exts.is_empty()
    }

    /// True when the file name ends in `.<ext>` for one of the extensions.
    ///
    /// Suffix matching (rather than `Path::extension`) lets compound
    /// extensions such as `d.ts` work.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.exts.iter().any(|ext| {
            name.len() > ext.len() + 1
                && name.ends_with(ext.as_str())
                && name.as_bytes()[name.len() - ext.len() - 1] == b'.'
        })
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.exts.join(","))
    }
}

/// Parse `"rs, .toml,,md"` into `[rs, toml, md]`.
pub fn parse_extensions(list: &str) -> AssembleResult<ExtensionSet> {
    let mut exts: Vec<String> = Vec::new();
    for raw in list.split(',') {
        let ext = raw.trim().trim_start_matches('.');
        if ext.is_empty() || exts.iter().any(|e| e == ext) {
            continue;
        }
        exts.push(ext.to_string());
    }

    if exts.is_empty() {
        return Err(AssembleError::NoExtensions);
    }
    Ok(ExtensionSet { exts })
}

/// Collect the extensions present under `root`, common languages first,
/// truncated to `limit` entries.
pub fn detect_extensions(root: &Path, limit: usize, respect_gitignore: bool) -> Vec<String> {
    let found: BTreeSet<String> = FileWalker::new(root)
        .respect_gitignore(respect_gitignore)
        .all_files()
        .iter()
        .filter_map(|p| p.extension().and_then(|e| e.to_str()))
        .filter(|ext| !is_excluded(ext))
        .map(str::to_string)
        .collect();

    let mut sorted: Vec<String> = found.into_iter().collect();
    sorted.sort_by_key(|ext| (!COMMON_EXTENSIONS.contains(&ext.as_str()), ext.clone()));
    sorted.truncate(limit);

    tracing::debug!(root = %root.display(), detected = sorted.len(), "Detected extensions");
    sorted
}
