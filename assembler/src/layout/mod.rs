//! Layout — turns an excerpt into page windows and estimates how many
//! printed pages they occupy.
//!
//! Two layouts exist. The primary layout fills pages up to
//! `lines_per_page` but starts a new page at every file boundary. When its
//! estimate exceeds the page target, the fallback layout re-selects the
//! excerpt at `safe_lines_per_page` and cuts fixed-size chunks.

pub mod estimate;
pub mod pagination;

pub use estimate::estimate_pages;
pub use pagination::{paginate_by_file, paginate_fixed, plan_fallback, plan_primary};

use crate::line_index::{Excerpt, LineIndex};
use std::fmt;
use std::ops::Range;

/// A contiguous run of global lines printed on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn lines<'a>(&self, index: &'a LineIndex) -> &'a [String] {
        index.slice(self.range())
    }

    /// Monospace block text, lines joined by `\n`.
    pub fn text(&self, index: &LineIndex) -> String {
        self.lines(index).join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// File-aware pages at the full line density
    Primary,
    /// Fixed chunks at the reduced line density
    Fallback,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::Primary => write!(f, "primary"),
            LayoutKind::Fallback => write!(f, "fallback"),
        }
    }
}

/// Page windows for the front and back excerpt windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    pub kind: LayoutKind,
    pub excerpt: Excerpt,
    pub lines_per_page: usize,
    pub front: Vec<PageWindow>,
    pub back: Vec<PageWindow>,
}

impl PagePlan {
    /// All windows in print order.
    pub fn windows(&self) -> impl Iterator<Item = &PageWindow> {
        self.front.iter().chain(self.back.iter())
    }

    pub fn window_count(&self) -> usize {
        self.front.len() + self.back.len()
    }

    /// Lines actually placed on pages.
    pub fn line_count(&self) -> usize {
        self.windows().map(PageWindow::len).sum()
    }
}
