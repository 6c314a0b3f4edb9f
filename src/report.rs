//! Types for generation run results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::testcase::TestCase;
use crate::workflow::{PageState, Phase};

/// Result of a headless generation run, printed with `--json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    /// Whether the run produced a collection
    pub success: bool,

    /// Error message if failed
    pub error: Option<String>,

    /// Whether the failure may go away on retry
    #[serde(default)]
    pub retryable: bool,

    /// Generator that served the run
    pub generator: String,

    pub phase: Phase,

    /// Category labels in selection order
    pub categories: Vec<String>,

    pub output_format: Option<String>,

    pub diagram_file: Option<String>,

    pub spec_file: Option<String>,

    /// Generated scenarios in generation order
    pub test_cases: Vec<TestCase>,

    /// Where the CSV export was written, if requested
    pub export_path: Option<PathBuf>,
}

impl GenerationReport {
    pub fn from_state(state: &PageState, generator: &str) -> Self {
        let failure = state.last_error();
        Self {
            success: failure.is_none() && !state.test_cases().is_empty(),
            error: failure.map(|f| f.message.clone()),
            retryable: failure.map(|f| f.retryable).unwrap_or(false),
            generator: generator.to_string(),
            phase: state.phase(),
            categories: state
                .config()
                .test_case_types
                .iter()
                .map(|t| t.label().to_string())
                .collect(),
            output_format: state.config().output_format.map(|f| f.label().to_string()),
            diagram_file: state.intake().diagram.as_ref().map(|f| f.name.clone()),
            spec_file: state.intake().spec.as_ref().map(|f| f.name.clone()),
            test_cases: state.test_cases().to_vec(),
            export_path: None,
        }
    }

    pub fn with_export_path(mut self, path: PathBuf) -> Self {
        self.export_path = Some(path);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::sample_test_cases;
    use crate::intake::{ArtifactSlot, IntakeFile};
    use crate::options::TestCaseType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_from_completed_state() {
        let mut state = PageState::new();
        state.toggle_category(TestCaseType::Functional);
        state.toggle_category(TestCaseType::Api);
        state.select_file(ArtifactSlot::Diagram, Some(IntakeFile::named("lld.puml")));
        state.select_file(ArtifactSlot::Spec, Some(IntakeFile::named("api.pdf")));
        let request = state.begin_generation().unwrap();
        state.finish_generation(request.run_id, Ok(sample_test_cases())).unwrap();

        let report = GenerationReport::from_state(&state, "mock");
        assert!(report.success);
        assert_eq!(report.phase, Phase::Complete);
        assert_eq!(report.categories, vec!["Functional Testing", "API Testing"]);
        assert_eq!(report.output_format.as_deref(), Some("Excel File (.xlsx)"));
        assert_eq!(report.test_cases.len(), 5);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["testCases"][0]["id"], "TC-001");
        assert_eq!(json["diagramFile"], "lld.puml");
    }

    #[test]
    fn test_report_from_empty_state() {
        let report = GenerationReport::from_state(&PageState::new(), "mock");
        assert!(!report.success);
        assert_eq!(report.error, None);
        assert_eq!(report.phase, Phase::Idle);
    }
}
