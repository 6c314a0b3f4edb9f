//! Per-row copy action.
//!
//! Terminal output goes through OSC 52 so the copy reaches the user's
//! clipboard even over SSH. Tests use [`MemoryClipboard`].

use base64::Engine;
use std::io::Write;
use std::time::Instant;
use tracing::debug;

use super::types::{CopyFeedback, PresentationError, PresentationResult};
use crate::testcase::TestCase;

/// Plain-text block put on the clipboard for one scenario
pub fn clipboard_text(tc: &TestCase) -> String {
    format!(
        "Summary: {}\n\nGiven: {}\nWhen: {}\nThen: {}",
        tc.summary, tc.given, tc.when, tc.then
    )
}

/// Destination for copied text
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> PresentationResult<()>;
}

/// Clipboard that writes an OSC 52 escape sequence to a terminal
#[derive(Debug)]
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl Osc52Clipboard<std::io::Stderr> {
    /// Terminal clipboard that keeps stdout free for program output
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> PresentationResult<()> {
        let payload = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{}\x07", payload)
            .and_then(|_| self.out.flush())
            .map_err(|e| PresentationError::Clipboard(e.to_string()))
    }
}

/// Clipboard that keeps the last copied text in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> PresentationResult<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Copy `tc` and start its confirmation marker.
///
/// The marker is only set when the write succeeded.
pub fn copy_test_case(
    clipboard: &mut dyn Clipboard,
    feedback: &mut CopyFeedback,
    tc: &TestCase,
    now: Instant,
) -> PresentationResult<()> {
    clipboard.write_text(&clipboard_text(tc))?;
    feedback.mark(tc.id.clone(), now);
    debug!(id = %tc.id, "test case copied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::sample_test_cases;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn write_text(&mut self, _text: &str) -> PresentationResult<()> {
            Err(PresentationError::Clipboard("no clipboard".to_string()))
        }
    }

    #[test]
    fn test_clipboard_text_template() {
        let tc = &sample_test_cases()[0];
        assert_eq!(
            clipboard_text(tc),
            "Summary: Verify user can login with valid credentials\n\
             \n\
             Given: User has valid credentials and is not logged in\n\
             When: User submits login form with valid email and password\n\
             Then: User should be redirected to dashboard and session should be created"
        );
    }

    #[test]
    fn test_osc52_sequence() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.write_text("hi").unwrap();
        assert_eq!(clipboard.into_inner(), b"\x1b]52;c;aGk=\x07".to_vec());
    }

    #[test]
    fn test_copy_sets_feedback_that_expires() {
        let cases = sample_test_cases();
        let mut clipboard = MemoryClipboard::default();
        let mut feedback = CopyFeedback::new(Duration::from_secs(2));
        let start = Instant::now();

        copy_test_case(&mut clipboard, &mut feedback, &cases[1], start).unwrap();
        assert_eq!(clipboard.contents, Some(clipboard_text(&cases[1])));
        assert!(feedback.is_copied("TC-002", start + Duration::from_millis(1999)));
        assert!(!feedback.is_copied("TC-001", start));
        assert_eq!(feedback.active_id(start + Duration::from_secs(2)), None);
    }

    #[test]
    fn test_newer_copy_replaces_marker() {
        let cases = sample_test_cases();
        let mut clipboard = MemoryClipboard::default();
        let mut feedback = CopyFeedback::new(Duration::from_secs(2));
        let start = Instant::now();

        copy_test_case(&mut clipboard, &mut feedback, &cases[0], start).unwrap();
        copy_test_case(&mut clipboard, &mut feedback, &cases[2], start + Duration::from_secs(1)).unwrap();
        assert_eq!(feedback.active_id(start + Duration::from_millis(2500)), Some("TC-003"));
    }

    #[test]
    fn test_failed_copy_leaves_no_marker() {
        let cases = sample_test_cases();
        let mut feedback = CopyFeedback::new(Duration::from_secs(2));
        let now = Instant::now();
        let err = copy_test_case(&mut BrokenClipboard, &mut feedback, &cases[0], now).unwrap_err();
        assert!(matches!(err, PresentationError::Clipboard(_)));
        assert_eq!(feedback.active_id(now), None);
    }
}
