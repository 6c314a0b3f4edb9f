//! Detailed table of generated scenarios, laid out for a fixed text width.

use crate::testcase::TestCase;

pub const TABLE_HEADERS: [&str; 6] = [
    "#",
    "Summary",
    "Given (Precondition)",
    "When (Action)",
    "Then (Verification)",
    "Actions",
];

const SEPARATOR: &str = " | ";
const ACTIONS_WIDTH: usize = 7;
const MIN_TEXT_WIDTH: usize = 8;

/// Column widths for a given total width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub ordinal: usize,
    /// Summary, given, when, then
    pub text: [usize; 4],
    pub actions: usize,
}

impl TableLayout {
    pub fn for_width(total: usize, rows: usize) -> Self {
        let ordinal = rows.max(1).to_string().len();
        let fixed = ordinal + ACTIONS_WIDTH + SEPARATOR.len() * 5;
        let available = total.saturating_sub(fixed);
        let base = (available / 4).max(MIN_TEXT_WIDTH);
        // Leftover columns go to the summary.
        let summary = if base * 4 < available {
            base + (available - base * 4)
        } else {
            base
        };
        Self {
            ordinal,
            text: [summary, base, base, base],
            actions: ACTIONS_WIDTH,
        }
    }

    pub fn total(&self) -> usize {
        self.ordinal + self.text.iter().sum::<usize>() + self.actions + SEPARATOR.len() * 5
    }
}

/// Shorten `text` to `width` characters, ending in an ellipsis when cut.
///
/// Control characters (line breaks, tabs) become spaces so a cell stays on
/// one screen line.
pub fn truncate(text: &str, width: usize) -> String {
    let flat = text.chars().map(|c| if c.is_control() { ' ' } else { c });
    if text.chars().count() <= width {
        return flat.collect();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = flat.take(width - 1).collect();
    out.push('…');
    out
}

fn row(layout: &TableLayout, cells: [&str; 6]) -> String {
    let widths = [
        layout.ordinal,
        layout.text[0],
        layout.text[1],
        layout.text[2],
        layout.text[3],
        layout.actions,
    ];
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<w$}", truncate(cell, w), w = w))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
        .trim_end()
        .to_string()
}

/// Render header, rule and one line per scenario.
///
/// `copied_id` marks the row whose copy confirmation is still showing.
pub fn render_table(cases: &[TestCase], width: usize, copied_id: Option<&str>) -> Vec<String> {
    let layout = TableLayout::for_width(width, cases.len());
    let mut lines = Vec::with_capacity(cases.len() + 2);
    lines.push(row(&layout, TABLE_HEADERS));
    lines.push("-".repeat(layout.total()));

    for (i, tc) in cases.iter().enumerate() {
        let ordinal = (i + 1).to_string();
        let action = if copied_id == Some(tc.id.as_str()) {
            "copied"
        } else {
            "copy"
        };
        lines.push(row(
            &layout,
            [&ordinal, &tc.summary, &tc.given, &tc.when, &tc.then, action],
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::sample_test_cases;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly", 7), "exactly");
        assert_eq!(truncate("truncated text", 6), "trunc…");
        assert_eq!(truncate("anything", 0), "");
    }

    #[test]
    fn test_truncate_flattens_line_breaks() {
        assert_eq!(truncate("line one\nline two", 40), "line one line two");
        assert_eq!(truncate("a\r\nb\tc", 40), "a  b c");
        assert_eq!(truncate("first\nsecond", 7), "first …");
    }

    #[test]
    fn test_multiline_cells_render_on_one_row() {
        let tc = TestCase::new("TC-200", "Two\nlines", "given\r\n", "when", "then");
        let lines = render_table(&[tc], 120, None);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| !l.contains('\n') && !l.contains('\r')));
        assert!(lines[2].contains("Two lines"));
    }

    #[test]
    fn test_layout_fills_width() {
        let layout = TableLayout::for_width(120, 5);
        assert_eq!(layout.ordinal, 1);
        assert_eq!(layout.total(), 120);
        assert!(layout.text[0] >= layout.text[1]);
    }

    #[test]
    fn test_layout_keeps_minimum_on_narrow_screens() {
        let layout = TableLayout::for_width(20, 12);
        assert_eq!(layout.ordinal, 2);
        assert_eq!(layout.text, [MIN_TEXT_WIDTH; 4]);
    }

    #[test]
    fn test_render_rows_in_order() {
        let lines = render_table(&sample_test_cases(), 160, None);
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("# | Summary"));
        assert!(lines[0].ends_with("Actions"));
        assert!(lines[2].starts_with("1 | Verify user can login"));
        assert!(lines[6].starts_with("5 | Verify concurrent login"));
        assert!(lines[2].ends_with("copy"));
    }

    #[test]
    fn test_copied_marker_only_on_matching_row() {
        let lines = render_table(&sample_test_cases(), 160, Some("TC-003"));
        assert!(lines[4].ends_with("copied"));
        assert!(lines[3].ends_with("copy"));
        assert!(lines[5].ends_with("copy"));
    }
}
