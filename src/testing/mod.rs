//! Test doubles shared across unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::ports::{ToolError, ToolOutput, ToolRunner};

/// Scripted outcome for a fake tool invocation.
pub(crate) enum FakeOutcome {
    /// Exit 0 with the given stdout text.
    Success(&'static str),
    /// Exit 0 with raw stdout bytes.
    RawOutput(Vec<u8>),
    /// Exit with the given non-zero code.
    ExitCode(i32),
    NotFound,
    TimedOut,
}

/// Fake tool runner scripted per program name. Programs without a scripted
/// outcome behave as missing from the PATH. Records every invocation.
pub(crate) struct FakeToolRunner {
    outcomes: HashMap<String, FakeOutcome>,
    pub invocations: RefCell<Vec<(String, Vec<String>)>>,
}

impl FakeToolRunner {
    pub fn new() -> Self {
        Self { outcomes: HashMap::new(), invocations: RefCell::new(Vec::new()) }
    }

    pub fn with_outcome(mut self, program: &str, outcome: FakeOutcome) -> Self {
        self.outcomes.insert(program.to_string(), outcome);
        self
    }
}

impl ToolRunner for FakeToolRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        _cwd: Option<&Path>,
        timeout: Duration,
    ) -> Result<ToolOutput, ToolError> {
        self.invocations
            .borrow_mut()
            .push((program.to_string(), args.iter().map(|arg| arg.to_string()).collect()));

        match self.outcomes.get(program) {
            Some(FakeOutcome::Success(stdout)) => Ok(ToolOutput {
                status: Some(0),
                stdout: stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
            }),
            Some(FakeOutcome::RawOutput(bytes)) => {
                Ok(ToolOutput { status: Some(0), stdout: bytes.clone(), stderr: Vec::new() })
            }
            Some(FakeOutcome::ExitCode(code)) => {
                Ok(ToolOutput { status: Some(*code), stdout: Vec::new(), stderr: Vec::new() })
            }
            Some(FakeOutcome::TimedOut) => Err(ToolError::TimedOut {
                program: program.to_string(),
                timeout_secs: timeout.as_secs(),
            }),
            Some(FakeOutcome::NotFound) | None => Err(ToolError::NotFound(program.to_string())),
        }
    }
}
