//! Tool execution trait.
//!
//! Transport tools are considered "world-touching" and must go through this
//! trait so we can test flashing workflows without spawning real processes.

use crate::TransportResult;

/// Blocking external tool runner.
pub trait ToolRunner: Send + Sync {
    /// Run `program` with `args` to completion and classify the result.
    ///
    /// A zero exit status maps to `Ok(())`; any other status is an error
    /// carrying the tool's exit code.
    fn run_tool(&self, program: &str, args: &[String]) -> TransportResult<()>;
}
