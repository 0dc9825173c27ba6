use std::io;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

/// Captured output of a completed external tool invocation.
///
/// A non-zero exit status is still a completed invocation; callers decide how
/// to treat it.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code, if the process exited normally.
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Failure to obtain any output from an external tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The executable could not be found on the PATH.
    #[error("executable '{0}' could not be found")]
    NotFound(String),

    /// The process exceeded its time budget and was killed.
    #[error("'{program}' timed out after {timeout_secs} seconds")]
    TimedOut { program: String, timeout_secs: u64 },

    /// Spawning or waiting on the process failed.
    #[error("failed to run '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Port for invoking external executables.
///
/// The generation workflow depends only on this capability, so tests can
/// substitute a fake and run without winget or the packaging tool present.
pub trait ToolRunner {
    /// Run `program` with `args`, optionally in `cwd`, bounded by `timeout`.
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
        timeout: Duration,
    ) -> Result<ToolOutput, ToolError>;
}
