//! Condensed list of generated scenarios.

use crate::testcase::TestCase;

pub const SUMMARY_TITLE: &str = "Generated Test Cases";

/// Shown in place of the list (and the table) when nothing has been generated
pub const EMPTY_PLACEHOLDER: &str =
    "No test cases generated yet. Upload your documents and click \"Generate Test Cases\".";

/// Label of the action that opens the detailed table
pub const VIEW_DETAILS_LABEL: &str = "View Full Details";

/// One line per scenario: `#<ordinal> <summary>`
pub fn summary_lines(cases: &[TestCase]) -> Vec<String> {
    cases
        .iter()
        .enumerate()
        .map(|(i, tc)| format!("#{} {}", i + 1, tc.summary))
        .collect()
}

/// Full summary view: title, count and the list, or the placeholder
pub fn render_summary(cases: &[TestCase]) -> Vec<String> {
    if cases.is_empty() {
        return vec![EMPTY_PLACEHOLDER.to_string()];
    }
    let mut lines = Vec::with_capacity(cases.len() + 2);
    lines.push(SUMMARY_TITLE.to_string());
    lines.push(format!("{} test cases generated", cases.len()));
    lines.extend(summary_lines(cases));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::sample_test_cases;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_renders_placeholder() {
        assert_eq!(render_summary(&[]), vec![EMPTY_PLACEHOLDER.to_string()]);
    }

    #[test]
    fn test_ordinals_follow_generation_order() {
        let lines = render_summary(&sample_test_cases());
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Generated Test Cases");
        assert_eq!(lines[1], "5 test cases generated");
        assert_eq!(lines[2], "#1 Verify user can login with valid credentials");
        assert_eq!(lines[6], "#5 Verify concurrent login prevention");
    }
}
