//! Document Assembler — collect, index, excerpt, paginate, write.
//!
//! One call to [`DocumentAssembler::generate`] is one independent run.
//! Validation errors abort before any file is touched; unreadable sources
//! are skipped and listed in the [`GenerationReport`].

use crate::collect::{parse_extensions, read_source, ExtensionSet, FileWalker};
use crate::config::{AssemblerConfig, DocumentMeta};
use crate::docx::{DocxDocument, DocxWriter};
use crate::error::{AssembleError, AssembleResult};
use crate::layout::{estimate_pages, plan_fallback, plan_primary, LayoutKind, PagePlan};
use crate::line_index::{LineIndex, SourceFile};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A source file left out of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output: PathBuf,
    pub files_found: usize,
    pub files_read: usize,
    pub skipped: Vec<SkippedFile>,
    pub total_lines: usize,
    pub included_lines: usize,
    pub layout: LayoutKind,
    pub pages: usize,
    pub estimated_pages: usize,
    pub target_pages: usize,
    /// Fewer lines than `min_recommended_lines` were collected
    pub below_recommended: bool,
}

impl GenerationReport {
    pub fn summary(&self) -> String {
        format!(
            "{} lines from {}/{} files, {} layout, {} pages (estimated {}, target {}) -> {}",
            self.total_lines,
            self.files_read,
            self.files_found,
            self.layout,
            self.pages,
            self.estimated_pages,
            self.target_pages,
            self.output.display()
        )
    }
}

/// Everything collected from the project before layout.
#[derive(Debug)]
pub struct Collection {
    pub index: LineIndex,
    pub files_found: usize,
    pub skipped: Vec<SkippedFile>,
}

impl Collection {
    pub fn files_read(&self) -> usize {
        self.files_found - self.skipped.len()
    }
}

/// A validated generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub meta: DocumentMeta,
    pub root: PathBuf,
    pub extensions: ExtensionSet,
    /// Destination file; `None` uses the default name in the working directory
    pub output: Option<PathBuf>,
}

impl GenerateRequest {
    /// Validate raw form inputs in the order the form presents them.
    pub fn new(
        meta: DocumentMeta,
        root: impl Into<PathBuf>,
        extensions: &str,
    ) -> AssembleResult<Self> {
        let root = root.into();
        if root.as_os_str().is_empty() || !root.is_dir() {
            return Err(AssembleError::invalid_directory(root));
        }
        let extensions = parse_extensions(extensions)?;
        Ok(Self {
            meta,
            root,
            extensions,
            output: None,
        })
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }
}

pub struct DocumentAssembler {
    config: AssemblerConfig,
    writer: DocxWriter,
}

impl DocumentAssembler {
    pub fn new(config: AssemblerConfig) -> AssembleResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            writer: DocxWriter::new(),
        })
    }

    /// Walk `root` and decode every matching file in discovery order.
    pub fn collect(&self, root: &Path, exts: &ExtensionSet) -> AssembleResult<Collection> {
        let paths = FileWalker::new(root)
            .respect_gitignore(self.config.respect_gitignore)
            .matching_files(exts);
        if paths.is_empty() {
            return Err(AssembleError::NoMatchingFiles {
                root: root.to_path_buf(),
                extensions: exts.to_string(),
            });
        }
        info!(root = %root.display(), files = paths.len(), "Collecting source files");

        let mut index = LineIndex::new();
        let mut skipped = Vec::new();
        for (i, path) in paths.iter().enumerate() {
            match read_source(path) {
                Ok(decoded) => {
                    let file = SourceFile::from_text(path, root, &decoded.text, decoded.encoding);
                    debug!(
                        n = i + 1,
                        of = paths.len(),
                        file = %file.relative_path,
                        lines = file.line_count(),
                        encoding = %decoded.encoding,
                        "Collected file"
                    );
                    index.push(file);
                }
                Err(err) => {
                    warn!(path = %path.display(), "Skipping unreadable file: {err}");
                    skipped.push(SkippedFile {
                        path: path.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        Ok(Collection {
            index,
            files_found: paths.len(),
            skipped,
        })
    }

    /// Lay out the excerpt, falling back to fixed chunks when the primary
    /// layout is estimated to overflow the page target.
    pub fn plan(&self, index: &LineIndex) -> (PagePlan, usize) {
        let budget = &self.config.budget;
        let target = budget.target_pages();

        // Both layouts print onto the same physical page.
        let page_rows = budget.lines_per_page;

        let primary = plan_primary(index, budget);
        let estimated = estimate_pages(index, primary.windows(), page_rows, budget.chars_per_line);
        info!(
            windows = primary.window_count(),
            estimated, target, "Estimated primary layout"
        );
        if estimated <= target {
            return (primary, estimated);
        }

        warn!(estimated, target, "Primary layout overflows page target, using fixed chunks");
        let fallback = plan_fallback(index, budget);
        let estimated = estimate_pages(index, fallback.windows(), page_rows, budget.chars_per_line);
        if estimated > target {
            warn!(estimated, target, "Long lines may still push the document past the target");
        }
        (fallback, estimated)
    }

    /// Run one generation end to end.
    pub fn generate(&self, request: &GenerateRequest) -> AssembleResult<GenerationReport> {
        let collection = self.collect(&request.root, &request.extensions)?;
        let index = &collection.index;
        let total_lines = index.len();
        if total_lines == 0 {
            return Err(AssembleError::NoSourceLines {
                root: request.root.clone(),
            });
        }
        info!(total_lines, "Collected source lines");

        let below_recommended = total_lines < self.config.min_recommended_lines;
        if below_recommended {
            warn!(
                total_lines,
                recommended = self.config.min_recommended_lines,
                "Fewer source lines than recommended for a full document"
            );
        }

        let (plan, estimated_pages) = self.plan(index);
        let target_pages = self.config.budget.target_pages();

        let output = request.output.clone().unwrap_or_else(|| {
            PathBuf::from(request.meta.default_file_name(target_pages))
        });
        let doc = DocxDocument {
            meta: &request.meta,
            target_pages,
            pages: plan.windows().map(|w| w.lines(index)).collect(),
        };
        let output = self.writer.write(&output, &doc)?;

        let report = GenerationReport {
            output,
            files_found: collection.files_found,
            files_read: collection.files_read(),
            skipped: collection.skipped.clone(),
            total_lines,
            included_lines: plan.line_count(),
            layout: plan.kind,
            pages: plan.window_count(),
            estimated_pages,
            target_pages,
            below_recommended,
        };
        info!("{}", report.summary());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageBudget;
    use std::fs;

    fn tiny_config() -> AssemblerConfig {
        AssemblerConfig {
            budget: PageBudget {
                lines_per_page: 5,
                front_pages: 2,
                back_pages: 2,
                safe_lines_per_page: 4,
                chars_per_line: 80,
            },
            min_recommended_lines: 0,
            ..Default::default()
        }
    }

    fn write_lines(path: &Path, prefix: &str, n: usize) {
        let body: String = (0..n).map(|i| format!("{prefix} {i}\n")).collect();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn test_request_rejects_missing_directory() {
        let meta = DocumentMeta::new("Demo", "V1", "Acme").unwrap();
        let err = GenerateRequest::new(meta, "/no/such/dir", "rs").unwrap_err();
        assert!(matches!(err, AssembleError::InvalidDirectory { .. }));
    }

    #[test]
    fn test_request_rejects_file_as_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.rs");
        fs::write(&file, "x").unwrap();
        let meta = DocumentMeta::new("Demo", "V1", "Acme").unwrap();
        assert!(GenerateRequest::new(meta, &file, "rs").is_err());
    }

    #[test]
    fn test_collect_counts_lines_and_skips_undecodable() {
        let dir = tempfile::tempdir().unwrap();
        write_lines(&dir.path().join("a.rs"), "a", 3);
        write_lines(&dir.path().join("b.rs"), "b", 4);
        fs::write(dir.path().join("c.rs"), [0xFF, 0xFE, 0xFF]).unwrap();

        let assembler = DocumentAssembler::new(tiny_config()).unwrap();
        let exts = parse_extensions("rs").unwrap();
        let collection = assembler.collect(dir.path(), &exts).unwrap();

        assert_eq!(collection.files_found, 3);
        assert_eq!(collection.files_read(), 2);
        assert_eq!(collection.index.len(), 7);
        assert_eq!(collection.skipped.len(), 1);
        assert!(collection.skipped[0].path.ends_with("c.rs"));
    }

    #[test]
    fn test_collect_no_matching_files() {
        let dir = tempfile::tempdir().unwrap();
        write_lines(&dir.path().join("a.py"), "a", 3);
        let assembler = DocumentAssembler::new(tiny_config()).unwrap();
        let err = assembler
            .collect(dir.path(), &parse_extensions("rs").unwrap())
            .unwrap_err();
        assert!(matches!(err, AssembleError::NoMatchingFiles { .. }));
    }

    #[test]
    fn test_plan_keeps_primary_when_within_target() {
        let dir = tempfile::tempdir().unwrap();
        write_lines(&dir.path().join("a.rs"), "a", 40);
        let assembler = DocumentAssembler::new(tiny_config()).unwrap();
        let collection = assembler
            .collect(dir.path(), &parse_extensions("rs").unwrap())
            .unwrap();

        let (plan, estimated) = assembler.plan(&collection.index);
        assert_eq!(plan.kind, LayoutKind::Primary);
        assert_eq!(plan.line_count(), 20);
        assert_eq!(estimated, 4);
    }

    #[test]
    fn test_plan_falls_back_for_many_small_files() {
        let dir = tempfile::tempdir().unwrap();
        for n in 0..12 {
            write_lines(&dir.path().join(format!("f{n:02}.rs")), "x", 2);
        }
        let assembler = DocumentAssembler::new(tiny_config()).unwrap();
        let collection = assembler
            .collect(dir.path(), &parse_extensions("rs").unwrap())
            .unwrap();

        let (plan, estimated) = assembler.plan(&collection.index);
        assert_eq!(plan.kind, LayoutKind::Fallback);
        assert!(plan.window_count() <= 4);
        assert!(estimated <= 4);
    }

    #[test]
    fn test_fallback_estimate_uses_physical_page_height() {
        let dir = tempfile::tempdir().unwrap();
        // First file carries one line wide enough to wrap onto a second row.
        fs::write(
            dir.path().join("f00.rs"),
            format!("{}\nx 1\n", "w".repeat(100)),
        )
        .unwrap();
        for n in 1..12 {
            write_lines(&dir.path().join(format!("f{n:02}.rs")), "x", 2);
        }
        let assembler = DocumentAssembler::new(tiny_config()).unwrap();
        let collection = assembler
            .collect(dir.path(), &parse_extensions("rs").unwrap())
            .unwrap();

        let (plan, estimated) = assembler.plan(&collection.index);
        assert_eq!(plan.kind, LayoutKind::Fallback);
        assert_eq!(plan.window_count(), 4);
        // The first chunk is 4 lines but 5 rows, which still fits a 5-row page.
        assert_eq!(estimated, 4);
    }

    #[test]
    fn test_generate_rejects_all_empty_sources() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("empty.rs"), "").unwrap();
        let meta = DocumentMeta::new("Demo", "V1", "Acme").unwrap();
        let request = GenerateRequest::new(meta, dir.path(), "rs")
            .unwrap()
            .with_output(dir.path().join("out.docx"));

        let assembler = DocumentAssembler::new(tiny_config()).unwrap();
        let err = assembler.generate(&request).unwrap_err();
        assert!(matches!(err, AssembleError::NoSourceLines { .. }));
        assert!(!dir.path().join("out.docx").exists());
    }
}
