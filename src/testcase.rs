//! The test case record shared by every part of the crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Review status of a test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Draft,
    Approved,
    Deprecated,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Approved => "approved",
            Status::Deprecated => "deprecated",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One given/when/then scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Identifier, unique within a generated collection (e.g. "TC-001")
    pub id: String,

    /// Short human-readable title
    pub summary: String,

    /// Precondition
    pub given: String,

    /// Action
    pub when: String,

    /// Expected outcome
    pub then: String,

    /// Free-form category label (e.g. "Functional")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case_type: Option<String>,

    #[serde(default)]
    pub status: Status,

    /// Timestamp of the last mutation
    pub last_updated: DateTime<Utc>,
}

impl Default for TestCase {
    fn default() -> Self {
        Self {
            id: String::new(),
            summary: String::new(),
            given: String::new(),
            when: String::new(),
            then: String::new(),
            test_case_type: Some("Functional".to_string()),
            status: Status::Draft,
            last_updated: Utc::now(),
        }
    }
}

impl TestCase {
    /// Create a draft test case stamped with the current time
    pub fn new(
        id: impl Into<String>,
        summary: impl Into<String>,
        given: impl Into<String>,
        when: impl Into<String>,
        then: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
            given: given.into(),
            when: when.into(),
            then: then.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, test_case_type: impl Into<String>) -> Self {
        self.test_case_type = Some(test_case_type.into());
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}

/// Returns the first id that appears more than once, if any.
pub fn find_duplicate_id(cases: &[TestCase]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(cases.len());
    cases
        .iter()
        .map(|tc| tc.id.as_str())
        .find(|id| !seen.insert(*id))
}
