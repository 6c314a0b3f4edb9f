use serde::Serialize;
use tracing::{info, warn};

use crate::generator::{GenerationError, GenerationRequest};
use crate::intake::{ArtifactSlot, Intake, IntakeFile};
use crate::options::{GenerationConfig, OutputFormat, TestCaseType};
use crate::testcase::{TestCase, find_duplicate_id};

use super::types::{
    Effect, Event, GenerationFailure, Phase, ViewMode, WorkflowError, WorkflowResult,
};

/// All state of the generator page.
///
/// Created empty when the page opens and dropped when it closes. Every user
/// interaction is a method call (or an [`Event`] passed to [`handle`]);
/// nothing else mutates it.
///
/// [`handle`]: PageState::handle
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    config: GenerationConfig,
    intake: Intake,
    test_cases: Vec<TestCase>,
    in_flight: Option<u64>,
    view: ViewMode,
    last_error: Option<GenerationFailure>,
    next_run_id: u64,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn intake(&self) -> &Intake {
        &self.intake
    }

    /// The current collection, in generation order
    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn last_error(&self) -> Option<&GenerationFailure> {
        self.last_error.as_ref()
    }

    /// Run id of the generation in progress
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    // ------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------

    pub fn select_file(&mut self, slot: ArtifactSlot, file: Option<IntakeFile>) {
        self.intake.select(slot, file);
    }

    pub fn toggle_category(&mut self, category: TestCaseType) {
        self.config.toggle_category(category);
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.config.set_output_format(format);
    }

    /// Human-readable list of what still blocks generation
    pub fn missing_inputs(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.config.test_case_types.is_empty() {
            missing.push("select at least one test case type");
        }
        if self.config.output_format.is_none() {
            missing.push("choose an output format");
        }
        if self.intake.diagram.is_none() {
            missing.push("upload the PUML diagram");
        }
        if self.intake.spec.is_none() {
            missing.push("upload the PDF specification");
        }
        missing
    }

    /// Categories, format and both files are all present
    pub fn is_ready(&self) -> bool {
        self.config.is_complete() && self.intake.is_complete()
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight.is_some() {
            Phase::Generating
        } else if !self.is_ready() {
            Phase::Idle
        } else if self.test_cases.is_empty() {
            Phase::Ready
        } else {
            Phase::Complete
        }
    }

    /// Whether the generate trigger is enabled
    pub fn can_generate(&self) -> bool {
        matches!(self.phase(), Phase::Ready | Phase::Complete)
    }

    // ------------------------------------------------------------------
    // Generation
    // ------------------------------------------------------------------

    /// Enter `Generating` and return the request to hand to a generator.
    pub fn begin_generation(&mut self) -> WorkflowResult<GenerationRequest> {
        if let Some(run_id) = self.in_flight {
            return Err(WorkflowError::AlreadyGenerating(run_id));
        }

        let (Some(diagram), Some(spec), Some(format)) = (
            self.intake.diagram.clone(),
            self.intake.spec.clone(),
            self.config.output_format,
        ) else {
            return Err(WorkflowError::NotReady(self.missing_inputs().join(", ")));
        };
        if self.config.test_case_types.is_empty() {
            return Err(WorkflowError::NotReady(self.missing_inputs().join(", ")));
        }

        self.next_run_id += 1;
        let run_id = self.next_run_id;
        self.in_flight = Some(run_id);

        info!(
            run_id,
            categories = self.config.test_case_types.len(),
            format = %format,
            "generation started"
        );

        Ok(GenerationRequest {
            run_id,
            diagram_file: diagram,
            spec_file: spec,
            categories: self.config.test_case_types.clone(),
            output_format: format,
        })
    }

    /// Apply the outcome of run `run_id`.
    ///
    /// On success the collection is replaced wholesale. On failure the
    /// previous collection is kept and the error is recorded. Either way the
    /// page leaves `Generating`. Results for any other run are rejected
    /// without changing state.
    pub fn finish_generation(
        &mut self,
        run_id: u64,
        outcome: Result<Vec<TestCase>, GenerationError>,
    ) -> WorkflowResult<()> {
        if self.in_flight != Some(run_id) {
            return Err(WorkflowError::StaleRun {
                got: run_id,
                expected: self.in_flight,
            });
        }
        self.in_flight = None;

        let outcome = outcome.and_then(|cases| match find_duplicate_id(&cases) {
            Some(id) => Err(GenerationError::InvalidResponse(format!(
                "duplicate test case id {id}"
            ))),
            None => Ok(cases),
        });

        match outcome {
            Ok(cases) => {
                info!(run_id, count = cases.len(), "generation finished");
                self.test_cases = cases;
                self.last_error = None;
            }
            Err(err) => {
                warn!(run_id, error = %err, retryable = err.is_retryable(), "generation failed");
                self.last_error = Some(GenerationFailure::new(run_id, &err));
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// Switch to the detailed table and ask the caller to scroll to it
    pub fn view_details(&mut self) -> Effect {
        self.view = ViewMode::Detailed;
        Effect::ScrollToDetails
    }

    pub fn back_to_summary(&mut self) {
        self.view = ViewMode::Summary;
    }

    /// The detailed table is only shown when there is something in it
    pub fn details_visible(&self) -> bool {
        self.view == ViewMode::Detailed && !self.test_cases.is_empty()
    }

    /// Dispatch an [`Event`] to the matching transition
    pub fn handle(&mut self, event: Event) -> WorkflowResult<Option<Effect>> {
        match event {
            Event::SelectFile { slot, file } => self.select_file(slot, file),
            Event::ToggleCategory(category) => self.toggle_category(category),
            Event::SetOutputFormat(format) => self.set_output_format(format),
            Event::Generate => {
                return self.begin_generation().map(|req| Some(Effect::StartGeneration(req)));
            }
            Event::GenerationFinished { run_id, outcome } => {
                self.finish_generation(run_id, outcome)?;
            }
            Event::ViewDetails => return Ok(Some(self.view_details())),
            Event::BackToSummary => self.back_to_summary(),
        }
        Ok(None)
    }
}
