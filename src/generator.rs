//! Test case generation service abstraction.
//!
//! A generation run hands a [`GenerationRequest`] to a [`TestCaseGenerator`]
//! and gets back either the full collection or a typed [`GenerationError`].
//! The crate ships [`MockGenerator`], which waits for a configurable latency
//! and returns a fixed set of login/session scenarios.
//!
//! # Configuration
//!
//! - `TELETEST_GENERATION_LATENCY_MS`: simulated latency of the mock generator
//! - `TELETEST_GENERATION_TIMEOUT_SECS`: upper bound on one generation run

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config;
use crate::intake::IntakeFile;
use crate::options::{OutputFormat, TestCaseType};
use crate::testcase::TestCase;

/// Result type for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Errors a generation service can report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The service could not be reached
    #[error("generation service unavailable: {0}")]
    Unavailable(String),

    /// No result within the allotted time
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered with something unusable
    #[error("invalid generation response: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    /// Whether retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, GenerationError::Unavailable(_) | GenerationError::Timeout(_))
    }
}

/// Everything a generator needs for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Request key; monotonically increasing per page
    pub run_id: u64,
    pub diagram_file: IntakeFile,
    pub spec_file: IntakeFile,
    pub categories: Vec<TestCaseType>,
    pub output_format: OutputFormat,
}

/// A service that turns design documents into test cases
#[async_trait]
pub trait TestCaseGenerator: Send + Sync {
    /// Short identifier used in logs and reports
    fn name(&self) -> &str;

    /// Produce the full collection for `request`
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<Vec<TestCase>>;
}

/// Generator that returns [`sample_test_cases`] after a fixed delay
#[derive(Debug, Clone)]
pub struct MockGenerator {
    latency: Duration,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self {
            latency: config::get().generation.latency,
        }
    }
}

impl MockGenerator {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl TestCaseGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<Vec<TestCase>> {
        debug!(
            run_id = request.run_id,
            diagram = %request.diagram_file.name,
            spec = %request.spec_file.name,
            latency_ms = self.latency.as_millis() as u64,
            "mock generation started"
        );
        tokio::time::sleep(self.latency).await;
        Ok(sample_test_cases())
    }
}

/// The fixed login/session scenarios returned by [`MockGenerator`]
pub fn sample_test_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(
            "TC-001",
            "Verify user can login with valid credentials",
            "User has valid credentials and is not logged in",
            "User submits login form with valid email and password",
            "User should be redirected to dashboard and session should be created",
        ),
        TestCase::new(
            "TC-002",
            "Verify error message with invalid credentials",
            "User is on login page",
            "User submits login form with invalid email or password",
            "Appropriate error message should be displayed",
        ),
        TestCase::new(
            "TC-003",
            "Verify password reset functionality",
            "User has requested password reset",
            "User clicks on reset link and submits new password",
            "Password should be updated and user should be able to login with new password",
        ),
        TestCase::new(
            "TC-004",
            "Verify session timeout after 30 minutes of inactivity",
            "User is logged in and inactive for 30 minutes",
            "User performs any action after session timeout",
            "User should be redirected to login page",
        )
        .with_type("Security"),
        TestCase::new(
            "TC-005",
            "Verify concurrent login prevention",
            "User is already logged in from one device",
            "Same user logs in from another device",
            "First session should be terminated and user should be notified",
        )
        .with_type("Security"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request() -> GenerationRequest {
        GenerationRequest {
            run_id: 1,
            diagram_file: IntakeFile::named("login.puml"),
            spec_file: IntakeFile::named("auth-api.pdf"),
            categories: vec![TestCaseType::Functional, TestCaseType::Security],
            output_format: OutputFormat::Excel,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_waits_for_latency() {
        let generator = MockGenerator::new(Duration::from_secs(2));
        let early = tokio::time::timeout(Duration::from_millis(1999), generator.generate(&request())).await;
        assert!(early.is_err(), "mock returned before its latency elapsed");

        let cases = generator.generate(&request()).await.unwrap();
        let ids: Vec<_> = cases.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["TC-001", "TC-002", "TC-003", "TC-004", "TC-005"]);
    }

    #[test]
    fn test_sample_cases_types() {
        let cases = sample_test_cases();
        assert_eq!(cases[0].test_case_type.as_deref(), Some("Functional"));
        assert_eq!(cases[3].test_case_type.as_deref(), Some("Security"));
        assert!(crate::testcase::find_duplicate_id(&cases).is_none());
    }

    #[test]
    fn test_retryable_classification() {
        assert!(GenerationError::Unavailable("down".into()).is_retryable());
        assert!(GenerationError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(!GenerationError::InvalidResponse("bad".into()).is_retryable());
    }
}
