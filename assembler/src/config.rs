//! Assembler configuration
//!
//! Layered as defaults, then an optional TOML file, then `SRCDOC_*`
//! environment variables. The CLI applies its own flags last.

use crate::error::{AssembleError, AssembleResult};
use serde::Deserialize;
use std::path::Path;

/// Lines per page of the primary layout.
pub const DEFAULT_LINES_PER_PAGE: usize = 50;

/// Pages taken from the start of the concatenated sources.
pub const DEFAULT_FRONT_PAGES: usize = 30;

/// Pages taken from the end of the concatenated sources.
pub const DEFAULT_BACK_PAGES: usize = 30;

/// Lines per page of the fallback layout, used when the primary layout
/// is estimated to overflow the page target.
pub const DEFAULT_SAFE_LINES_PER_PAGE: usize = 45;

/// Below this total, the run still succeeds but a warning is logged.
pub const DEFAULT_MIN_RECOMMENDED_LINES: usize = 3000;

/// Monospace characters that fit on one line: 10pt Courier New is 6pt wide,
/// A4 minus two 3.17 cm margins leaves ~415pt.
pub const DEFAULT_CHARS_PER_LINE: usize = 69;

/// How many lines and pages the excerpt may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageBudget {
    pub lines_per_page: usize,
    pub front_pages: usize,
    pub back_pages: usize,
    pub safe_lines_per_page: usize,
    pub chars_per_line: usize,
}

impl Default for PageBudget {
    fn default() -> Self {
        Self {
            lines_per_page: DEFAULT_LINES_PER_PAGE,
            front_pages: DEFAULT_FRONT_PAGES,
            back_pages: DEFAULT_BACK_PAGES,
            safe_lines_per_page: DEFAULT_SAFE_LINES_PER_PAGE,
            chars_per_line: DEFAULT_CHARS_PER_LINE,
        }
    }
}

impl PageBudget {
    /// Total number of pages the document is allowed to span.
    pub fn target_pages(&self) -> usize {
        self.front_pages + self.back_pages
    }

    /// Head/tail line counts at the given page density.
    pub fn window_lines(&self, lines_per_page: usize) -> (usize, usize) {
        (
            self.front_pages * lines_per_page,
            self.back_pages * lines_per_page,
        )
    }

    fn validate(&self) -> AssembleResult<()> {
        let fields = [
            ("lines_per_page", self.lines_per_page),
            ("front_pages", self.front_pages),
            ("safe_lines_per_page", self.safe_lines_per_page),
            ("chars_per_line", self.chars_per_line),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(AssembleError::config(format!("{name} must be > 0")));
            }
        }
        if self.safe_lines_per_page > self.lines_per_page {
            return Err(AssembleError::config(
                "safe_lines_per_page must not exceed lines_per_page",
            ));
        }
        Ok(())
    }
}

/// Tunables for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Page and line budget
    pub budget: PageBudget,

    /// Warn when fewer lines than this were collected
    pub min_recommended_lines: usize,

    /// Skip hidden and .gitignore'd files during the walk
    pub respect_gitignore: bool,

    /// Maximum number of extensions reported by auto-detection
    pub detect_limit: usize,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            budget: PageBudget::default(),
            min_recommended_lines: DEFAULT_MIN_RECOMMENDED_LINES,
            respect_gitignore: true,
            detect_limit: 10,
        }
    }
}

impl AssemblerConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_vars(env_var);
        config
    }

    /// Load a TOML file, then let the environment override it.
    pub fn from_file(path: &Path) -> AssembleResult<Self> {
        Self::load(path, env_var)
    }

    fn load(path: &Path, var: impl Fn(&str) -> Option<String>) -> AssembleResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AssembleError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let mut config: AssemblerConfig = toml::from_str(&content).map_err(|e| {
            AssembleError::config(format!("Failed to parse {}: {e}", path.display()))
        })?;
        config.apply_vars(var);
        Ok(config)
    }

    /// Apply `SRCDOC_*` overrides looked up through `var`.
    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        let number = |key: &str| var(key).and_then(|v| v.trim().parse::<usize>().ok());

        if let Some(n) = number("SRCDOC_LINES_PER_PAGE") {
            self.budget.lines_per_page = n;
        }
        if let Some(n) = number("SRCDOC_FRONT_PAGES") {
            self.budget.front_pages = n;
        }
        if let Some(n) = number("SRCDOC_BACK_PAGES") {
            self.budget.back_pages = n;
        }
        if let Some(n) = number("SRCDOC_SAFE_LINES_PER_PAGE") {
            self.budget.safe_lines_per_page = n;
        }
        if let Some(n) = number("SRCDOC_MIN_LINES") {
            self.min_recommended_lines = n;
        }
        if let Some(val) = var("SRCDOC_RESPECT_GITIGNORE") {
            let val = val.trim();
            self.respect_gitignore = val.eq_ignore_ascii_case("true") || val == "1";
        }
    }

    /// Apply command-line flags, the last configuration layer.
    ///
    /// A page height below the configured fallback density pulls the
    /// fallback density down with it.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if overrides.include_ignored {
            self.respect_gitignore = false;
        }
        if let Some(n) = overrides.lines_per_page {
            self.budget.lines_per_page = n;
            self.budget.safe_lines_per_page = self.budget.safe_lines_per_page.min(n);
        }
        if let Some(n) = overrides.front_pages {
            self.budget.front_pages = n;
        }
        if let Some(n) = overrides.back_pages {
            self.budget.back_pages = n;
        }
    }

    /// Reject budgets that would produce an empty or inconsistent layout.
    pub fn validate(&self) -> AssembleResult<()> {
        self.budget.validate()?;
        if self.detect_limit == 0 {
            return Err(AssembleError::config("detect_limit must be > 0"));
        }
        Ok(())
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Command-line layout flags; `None` keeps the value from earlier layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub lines_per_page: Option<usize>,
    pub front_pages: Option<usize>,
    pub back_pages: Option<usize>,
    /// Walk hidden and .gitignore'd files too
    pub include_ignored: bool,
}

/// Metadata printed in the header and footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    pub software_name: String,
    pub version: String,
    pub author: String,
}

impl DocumentMeta {
    /// Trim every field and reject empty ones, in form order.
    pub fn new(
        software_name: impl AsRef<str>,
        version: impl AsRef<str>,
        author: impl AsRef<str>,
    ) -> AssembleResult<Self> {
        let software_name = required("software name", software_name.as_ref())?;
        let version = required("version", version.as_ref())?;
        let author = required("author", author.as_ref())?;
        Ok(Self {
            software_name,
            version,
            author,
        })
    }

    /// `"{name} {version}"`, shown in the page header.
    pub fn title(&self) -> String {
        format!("{} {}", self.software_name, self.version)
    }

    /// Default output file name for a document of `target_pages` pages.
    pub fn default_file_name(&self, target_pages: usize) -> String {
        format!("{}源代码(共{}页).docx", self.software_name, target_pages)
    }
}

fn required(field: &'static str, value: &str) -> AssembleResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AssembleError::missing_field(field));
    }
    Ok(trimmed.to_string())
}
