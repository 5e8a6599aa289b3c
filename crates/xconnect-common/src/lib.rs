//! Common infrastructure for physical port provisioning.
//!
//! This crate provides the pieces shared by the lifecycle controller, the
//! HTTP client and the test fixtures:
//!
//! - [`model`]: desired configuration, resolved locations, remote port records
//!   and the locally tracked state
//! - [`api`]: the collaborator traits the controller drives ([`PortApi`],
//!   [`LocationApi`])
//! - [`error`]: error types for collaborator and lifecycle failures
//! - [`fields`]: attribute names of the tracked port resource
//!
//! # Example
//!
//! ```ignore
//! use xconnect_common::{LocationApi, PortApi, PortOrder};
//!
//! async fn buy<C: PortApi + LocationApi>(client: &C) -> ApiResult<PortId> {
//!     let location = client.resolve_location(7).await?;
//!     let order = PortOrder::new("edge-01", 12, 1000, 7, &location.market);
//!     client.buy_single_port(&order).await
//! }
//! ```

pub mod api;
pub mod error;
pub mod fields;
pub mod model;

// Re-export commonly used items at crate root
pub use api::{LocationApi, PortApi, PortOrder};
pub use error::{
    ApiError, ApiResult, ConfigError, DeleteAction, PortResourceError, PortResourceResult,
};
pub use model::{
    DesiredConfig, LocalState, Location, PortId, ProvisioningStatus, RemotePortRecord,
};
