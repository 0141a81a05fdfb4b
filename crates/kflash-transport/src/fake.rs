//! Fake tool runner for testing.
//!
//! Records every invocation without executing anything, with optional
//! scripted outcomes, so flashing workflows can be tested CI-safe with no
//! real transport tools installed.

use crate::{ToolRunner, TransportError, TransportResult};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One recorded tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
}

/// Scripted result for one invocation.
#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Success,
    /// Tool ran and exited with this code (0 counts as success).
    ExitCode(i32),
    /// Tool could not be spawned at all.
    NotFound,
}

/// Shared state for FakeRunner invocations.
#[derive(Debug, Default)]
struct FakeRunnerState {
    invocations: Vec<ToolInvocation>,
    outcomes: VecDeque<FakeOutcome>,
}

/// Fake runner that records invocations without executing them.
///
/// Outcomes are popped from a queue in invocation order; once the queue is
/// empty every further invocation succeeds.
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    state: Arc<Mutex<FakeRunnerState>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeRunnerState::default())),
        }
    }

    /// Queue the outcome for the next unscripted invocation.
    pub fn push_outcome(&self, outcome: FakeOutcome) {
        self.state.lock().unwrap().outcomes.push_back(outcome);
    }

    /// Get all recorded invocations.
    pub fn invocations(&self) -> Vec<ToolInvocation> {
        self.state.lock().unwrap().invocations.clone()
    }

    /// Get the number of invocations recorded.
    pub fn invocation_count(&self) -> usize {
        self.state.lock().unwrap().invocations.len()
    }

    /// Check if a specific invocation was recorded.
    pub fn has_invocation(&self, check: impl Fn(&ToolInvocation) -> bool) -> bool {
        self.state.lock().unwrap().invocations.iter().any(check)
    }

    /// Clear all recorded invocations and queued outcomes.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.invocations.clear();
        state.outcomes.clear();
    }
}

impl ToolRunner for FakeRunner {
    fn run_tool(&self, program: &str, args: &[String]) -> TransportResult<()> {
        let outcome = {
            let mut state = self.state.lock().unwrap();
            state.invocations.push(ToolInvocation {
                program: program.to_string(),
                args: args.to_vec(),
            });
            state.outcomes.pop_front().unwrap_or(FakeOutcome::Success)
        };
        match outcome {
            FakeOutcome::Success => Ok(()),
            FakeOutcome::ExitCode(0) => Ok(()),
            FakeOutcome::ExitCode(code) => Err(TransportError::ToolFailed {
                program: program.to_string(),
                code: Some(code),
            }),
            FakeOutcome::NotFound => Err(TransportError::ToolNotFound(program.to_string())),
        }
    }
}
