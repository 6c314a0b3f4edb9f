use std::time::Duration;
use tracing::debug;

use crate::generator::{GenerationError, GenerationRequest, GenerationResult, TestCaseGenerator};
use crate::testcase::TestCase;

use super::state::PageState;
use super::types::WorkflowResult;

/// Call `generator` for `request`, giving up after `timeout`.
pub async fn execute(
    generator: &dyn TestCaseGenerator,
    request: &GenerationRequest,
    timeout: Duration,
) -> GenerationResult<Vec<TestCase>> {
    debug!(run_id = request.run_id, generator = generator.name(), "calling generator");
    match tokio::time::timeout(timeout, generator.generate(request)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(GenerationError::Timeout(timeout)),
    }
}

/// Run one generation to completion against `state`.
///
/// Returns the number of test cases now on the page. A failed generation is
/// not an `Err` here; it is recorded in [`PageState::last_error`] and the
/// previous collection stays in place.
pub async fn run_generation(
    state: &mut PageState,
    generator: &dyn TestCaseGenerator,
    timeout: Duration,
) -> WorkflowResult<usize> {
    let request = state.begin_generation()?;
    let outcome = execute(generator, &request, timeout).await;
    state.finish_generation(request.run_id, outcome)?;
    Ok(state.test_cases().len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::MockGenerator;
    use crate::intake::{ArtifactSlot, IntakeFile};
    use crate::options::TestCaseType;
    use crate::workflow::WorkflowError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    struct Unreachable;

    #[async_trait]
    impl TestCaseGenerator for Unreachable {
        fn name(&self) -> &str {
            "unreachable"
        }

        async fn generate(&self, _request: &GenerationRequest) -> GenerationResult<Vec<TestCase>> {
            Err(GenerationError::Unavailable("connection refused".to_string()))
        }
    }

    fn ready_state() -> PageState {
        let mut state = PageState::new();
        state.toggle_category(TestCaseType::Functional);
        state.toggle_category(TestCaseType::Security);
        state.select_file(ArtifactSlot::Diagram, Some(IntakeFile::named("lld.puml")));
        state.select_file(ArtifactSlot::Spec, Some(IntakeFile::named("api.pdf")));
        state
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_generation_populates_page() {
        let mut state = ready_state();
        let generator = MockGenerator::new(Duration::from_secs(2));
        let count = run_generation(&mut state, &generator, Duration::from_secs(30))
            .await
            .unwrap();
        assert_eq!(count, 5);
        assert_eq!(state.in_flight(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_retryable_failure() {
        let mut state = ready_state();
        let generator = MockGenerator::new(Duration::from_secs(60));
        let count = run_generation(&mut state, &generator, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(count, 0);
        let failure = state.last_error().unwrap();
        assert!(failure.retryable);
        assert!(state.can_generate());
    }

    #[tokio::test]
    async fn test_unavailable_keeps_previous_results() {
        let mut state = ready_state();
        run_generation(&mut state, &MockGenerator::new(Duration::ZERO), Duration::from_secs(1))
            .await
            .unwrap();

        let count = run_generation(&mut state, &Unreachable, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(count, 5);
        assert!(state.last_error().unwrap().message.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_not_ready_is_an_error() {
        let mut state = PageState::new();
        let err = run_generation(&mut state, &Unreachable, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NotReady(_)));
    }
}
