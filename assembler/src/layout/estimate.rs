//! Page-count estimation for a laid-out plan.
//!
//! Word does not report page counts without rendering, so this is a
//! heuristic: every window starts on a new page, long lines wrap at
//! `chars_per_line` display columns, and a window spills onto extra pages
//! once its wrapped height exceeds `lines_per_page`.

use crate::layout::PageWindow;
use crate::line_index::LineIndex;
use unicode_width::UnicodeWidthChar;

const TAB_WIDTH: usize = 4;

/// Printed rows a single source line occupies.
pub fn visual_rows(line: &str, chars_per_line: usize) -> usize {
    let chars_per_line = chars_per_line.max(1);
    let width: usize = line
        .chars()
        .map(|c| match c {
            '\t' => TAB_WIDTH,
            c => c.width().unwrap_or(0),
        })
        .sum();
    width.div_ceil(chars_per_line).max(1)
}

/// Estimated printed pages for `windows`.
pub fn estimate_pages<'a>(
    index: &LineIndex,
    windows: impl IntoIterator<Item = &'a PageWindow>,
    lines_per_page: usize,
    chars_per_line: usize,
) -> usize {
    let lines_per_page = lines_per_page.max(1);
    windows
        .into_iter()
        .map(|window| {
            let rows: usize = window
                .lines(index)
                .iter()
                .map(|line| visual_rows(line, chars_per_line))
                .sum();
            rows.div_ceil(lines_per_page).max(1)
        })
        .sum()
}
