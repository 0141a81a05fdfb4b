//! Error taxonomy and process exit-code mapping.

use crate::artifacts::ArtifactKind;
use kflash_transport::TransportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlashError {
    #[error("{artifact} not found: {search}")]
    MissingArtifact {
        artifact: ArtifactKind,
        search: String,
    },

    #[error("Invalid flash mode: {given:?} (expected ADB or FASTBOOT)")]
    InvalidMode { given: String },

    #[error("Step failed: {step}: {program} (exit={code:?})")]
    StepFailed {
        step: String,
        program: String,
        code: Option<i32>,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl FlashError {
    /// Map an error to the orchestrator's process exit code.
    ///
    /// Missing artifacts and bad modes use small fixed codes. A failing
    /// external tool exits with the negation of the tool's own code; the
    /// OS reports that modulo 256, the same as shell `exit -N`.
    pub fn exit_code(&self) -> i32 {
        match self {
            FlashError::MissingArtifact { artifact, .. } => match artifact {
                ArtifactKind::DtboImage => 2,
                ArtifactKind::KernelImage => 3,
                ArtifactKind::KernelModules => 4,
            },
            FlashError::InvalidMode { .. } => 22,
            FlashError::StepFailed {
                code: Some(code), ..
            } => -code,
            // Tool died without an exit code (e.g. killed by signal).
            FlashError::StepFailed { code: None, .. } => 1,
            FlashError::Transport(TransportError::ToolNotFound(_)) => 127,
            FlashError::Transport(TransportError::NotExecutable(_)) => 126,
            FlashError::Transport(_) => 1,
        }
    }
}
