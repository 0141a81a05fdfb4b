//! Transport tool invocation layer for kflash.
//!
//! This crate defines the capability trait for running external transport
//! tools (fastboot, the ADB module-push helper) and provides both a real
//! implementation (`SystemRunner`) and a recording fake (`FakeRunner`) for
//! tests.

pub mod error;
pub mod fake;
pub mod runner;
pub mod system;

pub use error::{TransportError, TransportResult};
pub use fake::{FakeOutcome, FakeRunner, ToolInvocation};
pub use runner::ToolRunner;
pub use system::SystemRunner;
