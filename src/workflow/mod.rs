pub mod run;
pub mod state;
pub mod types;

pub use run::{execute, run_generation};
pub use state::PageState;
pub use types::{Effect, Event, GenerationFailure, Phase, ViewMode, WorkflowError, WorkflowResult};
