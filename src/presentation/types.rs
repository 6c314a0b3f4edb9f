use std::time::{Duration, Instant};
use thiserror::Error;

/// Result type for presentation actions
pub type PresentationResult<T> = Result<T, PresentationError>;

/// Errors from copy and export actions
#[derive(Debug, Error)]
pub enum PresentationError {
    /// The clipboard rejected the write
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// Export was requested for an empty collection
    #[error("there are no test cases to export")]
    NothingToExport,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Transient "copied" marker for one row.
///
/// Keyed by test case id; expires `ttl` after the copy. A newer copy
/// replaces the marker.
#[derive(Debug, Clone)]
pub struct CopyFeedback {
    ttl: Duration,
    current: Option<(String, Instant)>,
}

impl CopyFeedback {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn mark(&mut self, id: impl Into<String>, now: Instant) {
        self.current = Some((id.into(), now));
    }

    /// Id of the row currently showing the marker
    pub fn active_id(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|(_, at)| now.saturating_duration_since(*at) < self.ttl)
            .map(|(id, _)| id.as_str())
    }

    pub fn is_copied(&self, id: &str, now: Instant) -> bool {
        self.active_id(now) == Some(id)
    }
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new(crate::config::get().presentation.copy_feedback)
    }
}
