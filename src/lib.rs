//! Teletest - generate given/when/then test cases from design documents.
//!
//! This crate provides:
//! - The test case record and the generation options (categories, format)
//! - Intake of the two design documents (PUML diagram, PDF API spec)
//! - A page state machine that gates, runs and applies one generation at a time
//! - A generator abstraction with a mock implementation
//! - Summary and detailed views, per-row copy and CSV export
//! - An interactive terminal page
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use teletest::{ArtifactSlot, IntakeFile, MockGenerator, PageState, TestCaseType, run_generation};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let mut page = PageState::new();
//! page.toggle_category(TestCaseType::Functional);
//! page.select_file(ArtifactSlot::Diagram, Some(IntakeFile::from_path("login.puml")?));
//! page.select_file(ArtifactSlot::Spec, Some(IntakeFile::from_path("auth-api.pdf")?));
//!
//! run_generation(&mut page, &MockGenerator::default(), Duration::from_secs(30)).await?;
//! print!("{}", teletest::export_csv(page.test_cases())?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod generator;
pub mod intake;
pub mod logging;
pub mod options;
pub mod presentation;
pub mod report;
pub mod testcase;
pub mod tui;
pub mod workflow;

// Re-export the data model
pub use options::{GenerationConfig, OutputFormat, TestCaseType};
pub use testcase::{Status, TestCase};

// Re-export intake types
pub use intake::{ArtifactSlot, Intake, IntakeError, IntakeFile};

// Re-export workflow types
pub use workflow::{
    Effect, Event, GenerationFailure, PageState, Phase, ViewMode, WorkflowError, WorkflowResult,
    run_generation,
};

// Re-export generator types
pub use generator::{
    GenerationError, GenerationRequest, GenerationResult, MockGenerator, TestCaseGenerator,
    sample_test_cases,
};

// Re-export presentation helpers
pub use presentation::{
    Clipboard, CopyFeedback, MemoryClipboard, Osc52Clipboard, PresentationError, clipboard_text,
    export_csv, export_filename, render_summary, render_table, write_export,
};

pub use report::GenerationReport;
