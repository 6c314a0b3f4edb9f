use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generator::{GenerationError, GenerationRequest};
use crate::intake::{ArtifactSlot, IntakeFile};
use crate::options::{OutputFormat, TestCaseType};
use crate::testcase::TestCase;

/// Where the page is in the generate cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Some input is missing; the trigger is disabled
    Idle,
    /// All inputs present, nothing generated yet
    Ready,
    /// A run is in flight; the trigger is disabled
    Generating,
    /// Results are shown and the trigger is enabled again
    Complete,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "incomplete",
            Phase::Ready => "ready",
            Phase::Generating => "generating",
            Phase::Complete => "complete",
        }
    }
}

/// Which results view is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Summary,
    Detailed,
}

/// A failed run as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationFailure {
    pub run_id: u64,
    pub message: String,
    /// The user may simply press generate again
    pub retryable: bool,
}

impl GenerationFailure {
    pub fn new(run_id: u64, err: &GenerationError) -> Self {
        Self {
            run_id,
            message: err.to_string(),
            retryable: err.is_retryable(),
        }
    }
}

/// User interaction or completion event
#[derive(Debug, Clone)]
pub enum Event {
    SelectFile {
        slot: ArtifactSlot,
        /// `None` when the picker was cancelled
        file: Option<IntakeFile>,
    },
    ToggleCategory(TestCaseType),
    SetOutputFormat(OutputFormat),
    Generate,
    GenerationFinished {
        run_id: u64,
        outcome: Result<Vec<TestCase>, GenerationError>,
    },
    ViewDetails,
    BackToSummary,
}

/// Side effect the caller must perform after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Hand the request to a generator and report back with
    /// [`Event::GenerationFinished`]
    StartGeneration(GenerationRequest),
    /// Bring the detailed table into view
    ScrollToDetails,
}

/// Result type for workflow transitions
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Rejected transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("cannot generate: {0}")]
    NotReady(String),

    #[error("a generation run is already in progress (run {0})")]
    AlreadyGenerating(u64),

    #[error("result for run {got} does not match the run in progress ({expected:?})")]
    StaleRun { got: u64, expected: Option<u64> },
}
