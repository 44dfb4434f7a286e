//! Page window construction for both layouts.

use crate::config::PageBudget;
use crate::layout::{LayoutKind, PagePlan, PageWindow};
use crate::line_index::LineIndex;
use std::ops::Range;

/// Split `range` into windows of at most `lines_per_page` lines that never
/// straddle two files.
pub fn paginate_by_file(
    index: &LineIndex,
    range: Range<usize>,
    lines_per_page: usize,
) -> Vec<PageWindow> {
    let lines_per_page = lines_per_page.max(1);
    let mut windows = Vec::new();
    let mut cursor = range.start;

    while cursor < range.end {
        let file_end = index.boundary_at(cursor).map_or(range.end, |b| b.end);
        let end = (cursor + lines_per_page).min(file_end).min(range.end);
        windows.push(PageWindow { start: cursor, end });
        cursor = end;
    }

    windows
}

/// Split `range` into consecutive `lines_per_page` chunks, keeping at most
/// `max_pages` of them.
pub fn paginate_fixed(
    range: Range<usize>,
    lines_per_page: usize,
    max_pages: usize,
) -> Vec<PageWindow> {
    let lines_per_page = lines_per_page.max(1);
    let end = range.end;
    range
        .step_by(lines_per_page)
        .take(max_pages)
        .map(|start| PageWindow {
            start,
            end: (start + lines_per_page).min(end),
        })
        .collect()
}

/// Head/tail excerpt at full density, paginated along file boundaries.
pub fn plan_primary(index: &LineIndex, budget: &PageBudget) -> PagePlan {
    let lines_per_page = budget.lines_per_page;
    let (head, tail) = budget.window_lines(lines_per_page);
    let excerpt = index.excerpt(head, tail);

    let front = paginate_by_file(index, excerpt.front.clone(), lines_per_page);
    let back = excerpt
        .back
        .clone()
        .map(|r| paginate_by_file(index, r, lines_per_page))
        .unwrap_or_default();

    PagePlan {
        kind: LayoutKind::Primary,
        excerpt,
        lines_per_page,
        front,
        back,
    }
}

/// Head/tail excerpt at the safe density, cut into fixed chunks.
///
/// The excerpt is re-selected so that every chunk fits within the page
/// target: at most `front_pages` + `back_pages` windows are produced.
pub fn plan_fallback(index: &LineIndex, budget: &PageBudget) -> PagePlan {
    let lines_per_page = budget.safe_lines_per_page;
    let (head, tail) = budget.window_lines(lines_per_page);
    let excerpt = index.excerpt(head, tail);

    // Without a back window the front may use the whole page target.
    let front_cap = if excerpt.back.is_some() {
        budget.front_pages
    } else {
        budget.target_pages()
    };
    let front = paginate_fixed(excerpt.front.clone(), lines_per_page, front_cap);
    let back = excerpt
        .back
        .clone()
        .map(|r| paginate_fixed(r, lines_per_page, budget.back_pages))
        .unwrap_or_default();

    PagePlan {
        kind: LayoutKind::Fallback,
        excerpt,
        lines_per_page,
        front,
        back,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::SourceEncoding;
    use crate::line_index::SourceFile;
    use std::path::PathBuf;

    fn index_of(sizes: &[usize]) -> LineIndex {
        LineIndex::from_files(sizes.iter().enumerate().map(|(n, &size)| SourceFile {
            path: PathBuf::from(format!("f{n}.rs")),
            relative_path: format!("f{n}.rs"),
            lines: (0..size).map(|i| format!("f{n} line {i}")).collect(),
            encoding: SourceEncoding::Utf8,
        }))
    }

    fn small_budget() -> PageBudget {
        PageBudget {
            lines_per_page: 10,
            front_pages: 2,
            back_pages: 2,
            safe_lines_per_page: 8,
            chars_per_line: 80,
        }
    }

    #[test]
    fn test_by_file_breaks_at_boundaries() {
        let index = index_of(&[12, 3, 25]);
        let windows = paginate_by_file(&index, 0..index.len(), 10);
        let spans: Vec<(usize, usize)> = windows.iter().map(|w| (w.start, w.end)).collect();
        assert_eq!(
            spans,
            vec![(0, 10), (10, 12), (12, 15), (15, 25), (25, 35), (35, 40)]
        );
    }

    #[test]
    fn test_by_file_partial_range_starts_mid_file() {
        let index = index_of(&[12, 30]);
        let windows = paginate_by_file(&index, 5..20, 10);
        let spans: Vec<(usize, usize)> = windows.iter().map(|w| (w.start, w.end)).collect();
        assert_eq!(spans, vec![(5, 12), (12, 20)]);
    }

    #[test]
    fn test_fixed_chunks_respect_cap() {
        let windows = paginate_fixed(100..145, 10, 3);
        let spans: Vec<(usize, usize)> = windows.iter().map(|w| (w.start, w.end)).collect();
        assert_eq!(spans, vec![(100, 110), (110, 120), (120, 130)]);

        let windows = paginate_fixed(0..25, 10, 10);
        assert_eq!(windows.last().unwrap().end, 25);
        assert_eq!(windows.len(), 3);
    }

    #[test]
    fn test_fixed_empty_range() {
        assert!(paginate_fixed(7..7, 10, 10).is_empty());
    }

    #[test]
    fn test_plan_primary_truncates_to_head_and_tail() {
        let index = index_of(&[30, 30]);
        let plan = plan_primary(&index, &small_budget());
        assert_eq!(plan.kind, LayoutKind::Primary);
        assert_eq!(plan.excerpt.front, 0..20);
        assert_eq!(plan.excerpt.back, Some(40..60));
        assert_eq!(plan.line_count(), 40);
        assert_eq!(plan.window_count(), 4);
    }

    #[test]
    fn test_plan_fallback_fits_target() {
        // Many tiny files push the primary layout over four pages.
        let index = index_of(&[3; 20]);
        let budget = small_budget();
        let primary = plan_primary(&index, &budget);
        assert!(primary.window_count() > budget.target_pages());

        let fallback = plan_fallback(&index, &budget);
        assert_eq!(fallback.kind, LayoutKind::Fallback);
        assert_eq!(fallback.excerpt.front, 0..16);
        assert_eq!(fallback.excerpt.back, Some(44..60));
        assert_eq!(fallback.window_count(), 4);
        assert_eq!(fallback.line_count(), 32);
    }

    #[test]
    fn test_plan_fallback_without_back_window_uses_whole_target() {
        let index = index_of(&[30]);
        let fallback = plan_fallback(&index, &small_budget());
        assert!(fallback.back.is_empty());
        assert_eq!(fallback.front.len(), 4);
        assert_eq!(fallback.line_count(), 30);
    }
}
