//! ⚡ kflash core library.
//!
//! `kflash-core` holds the flashing pipeline: configuration resolution,
//! artifact validation, strategy selection, sequential step execution, and
//! the persistent run report.

pub mod artifacts;
pub mod config;
pub mod errors;
pub mod logging;
pub mod plan;
pub mod report;
pub mod runner;

#[cfg(test)]
pub mod test_env;

pub use artifacts::{ArtifactKind, ArtifactLocator, ArtifactSet};
pub use config::{FlashConfig, FlashMode, FlashOverrides};
pub use errors::FlashError;
pub use plan::{build_plan, FlashPlan, FlashStep};
