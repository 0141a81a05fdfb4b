//! Real tool runner backed by `std::process`.

use crate::{ToolRunner, TransportError, TransportResult};
use log::debug;
use std::process::{Command, Stdio};

/// Real tool runner for host systems.
///
/// Tool output is inherited so flashing progress streams straight to the
/// user; stdin is closed so tools cannot hang waiting for input.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

fn map_spawn_err(program: &str, err: std::io::Error) -> TransportError {
    match err.kind() {
        std::io::ErrorKind::NotFound => TransportError::ToolNotFound(program.to_string()),
        std::io::ErrorKind::PermissionDenied => TransportError::NotExecutable(program.to_string()),
        _ => TransportError::Io(err),
    }
}

impl ToolRunner for SystemRunner {
    fn run_tool(&self, program: &str, args: &[String]) -> TransportResult<()> {
        debug!("exec: {} {}", program, args.join(" "));
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| map_spawn_err(program, e))?;
        if !status.success() {
            return Err(TransportError::ToolFailed {
                program: program.to_string(),
                code: status.code(),
            });
        }
        Ok(())
    }
}
