//! Test infrastructure for the port lifecycle controller
//!
//! Provides:
//! - An in-memory recording fake of the provisioning API
//! - Test fixtures for desired configurations and locations
//! - Call-log verification helpers

pub mod fake_api;
pub mod fixtures;
mod verification;

pub use fake_api::{ApiCall, FakeOp, FakeXconnect};
pub use fixtures::*;
pub use verification::*;
