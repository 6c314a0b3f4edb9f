//! Generation options chosen by the user: which categories of test cases to
//! produce and which output format to target.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Category of test cases that can be requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum TestCaseType {
    Functional,
    Integration,
    Regression,
    Performance,
    Security,
    Api,
}

impl TestCaseType {
    /// All categories in display order
    pub const ALL: [TestCaseType; 6] = [
        TestCaseType::Functional,
        TestCaseType::Integration,
        TestCaseType::Regression,
        TestCaseType::Performance,
        TestCaseType::Security,
        TestCaseType::Api,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TestCaseType::Functional => "Functional Testing",
            TestCaseType::Integration => "Integration Testing",
            TestCaseType::Regression => "Regression Testing",
            TestCaseType::Performance => "Performance Testing",
            TestCaseType::Security => "Security Testing",
            TestCaseType::Api => "API Testing",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl std::fmt::Display for TestCaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Target format for the generated test cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Excel,
    Postman,
    Testrail,
}

impl OutputFormat {
    /// All formats in display order
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Excel,
        OutputFormat::Postman,
        OutputFormat::Testrail,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Excel => "Excel File (.xlsx)",
            OutputFormat::Postman => "Postman Collection (.json)",
            OutputFormat::Testrail => "TestRail Import (.json)",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Options for one generation run, owned by the page for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Selected categories, in the order they were selected
    pub test_case_types: Vec<TestCaseType>,

    /// Chosen output format
    pub output_format: Option<OutputFormat>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            test_case_types: Vec::new(),
            output_format: Some(OutputFormat::default()),
        }
    }
}

impl GenerationConfig {
    /// Add the category if absent, remove it if present.
    pub fn toggle_category(&mut self, category: TestCaseType) {
        if let Some(pos) = self.test_case_types.iter().position(|t| *t == category) {
            self.test_case_types.remove(pos);
        } else {
            self.test_case_types.push(category);
        }
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = Some(format);
    }

    pub fn is_selected(&self, category: TestCaseType) -> bool {
        self.test_case_types.contains(&category)
    }

    /// At least one category and an output format are chosen
    pub fn is_complete(&self) -> bool {
        !self.test_case_types.is_empty() && self.output_format.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = GenerationConfig::default();
        assert!(config.test_case_types.is_empty());
        assert_eq!(config.output_format, Some(OutputFormat::Excel));
        assert!(!config.is_complete());
    }

    #[test]
    fn test_toggle_appends_in_selection_order() {
        let mut config = GenerationConfig::default();
        config.toggle_category(TestCaseType::Security);
        config.toggle_category(TestCaseType::Functional);
        assert_eq!(
            config.test_case_types,
            vec![TestCaseType::Security, TestCaseType::Functional]
        );

        config.toggle_category(TestCaseType::Security);
        assert_eq!(config.test_case_types, vec![TestCaseType::Functional]);
    }

    #[test]
    fn test_toggle_even_sequences_restore_membership() {
        for category in TestCaseType::ALL {
            for pairs in 0..4 {
                let mut config = GenerationConfig::default();
                config.toggle_category(TestCaseType::Api);
                let before = config.is_selected(category);
                for _ in 0..(pairs * 2) {
                    config.toggle_category(category);
                }
                assert_eq!(config.is_selected(category), before, "{category} after {} toggles", pairs * 2);
            }
        }
    }

    #[test]
    fn test_set_output_format_replaces() {
        let mut config = GenerationConfig::default();
        config.set_output_format(OutputFormat::Postman);
        config.set_output_format(OutputFormat::Testrail);
        assert_eq!(config.output_format, Some(OutputFormat::Testrail));
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = TestCaseType::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Functional Testing",
                "Integration Testing",
                "Regression Testing",
                "Performance Testing",
                "Security Testing",
                "API Testing",
            ]
        );
        assert_eq!(OutputFormat::from_label("Excel File (.xlsx)"), Some(OutputFormat::Excel));
        assert_eq!(OutputFormat::from_label("TestRail Import (.json)"), Some(OutputFormat::Testrail));
        assert_eq!(OutputFormat::from_label("Word"), None);
        assert_eq!(TestCaseType::from_label("API Testing"), Some(TestCaseType::Api));
    }
}
