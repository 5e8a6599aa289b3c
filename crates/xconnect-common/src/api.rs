//! Collaborator traits for the remote provisioning API.
//!
//! The lifecycle controller only talks to the remote system through these
//! traits. Implementations must be safe for concurrent read-only use: one
//! client handle is shared by every resource instance the host reconciles.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::model::{Location, PortId, RemotePortRecord};

/// Parameters shared by every provisioning variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortOrder {
    /// Port name.
    pub name: String,
    /// Contract term in months.
    pub term: u32,
    /// Speed in Mbps.
    pub port_speed: u32,
    /// Numeric location identifier.
    pub location_id: u32,
    /// Market code of the location.
    pub market_code: String,
    /// Keep the port off the marketplace.
    pub hide_from_marketplace: bool,
}

impl PortOrder {
    /// Creates an order that is visible on the marketplace.
    pub fn new(
        name: impl Into<String>,
        term: u32,
        port_speed: u32,
        location_id: u32,
        market_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            term,
            port_speed,
            location_id,
            market_code: market_code.into(),
            hide_from_marketplace: false,
        }
    }

    /// Sets whether the port is hidden from the marketplace.
    pub fn with_hide_from_marketplace(mut self, hide: bool) -> Self {
        self.hide_from_marketplace = hide;
        self
    }
}

/// Location lookup.
#[async_trait]
pub trait LocationApi: Send + Sync {
    /// Resolves a location by its numeric identifier.
    ///
    /// Fails with [`ApiError::NotFound`](crate::ApiError::NotFound) when the
    /// location is unknown.
    async fn resolve_location(&self, location_id: u32) -> ApiResult<Location>;
}

/// Port provisioning and management.
#[async_trait]
pub trait PortApi: Send + Sync {
    /// Orders a single port.
    async fn buy_single_port(&self, order: &PortOrder) -> ApiResult<PortId>;

    /// Orders a single port pinned to a diversity zone.
    async fn buy_zoned_single_port(&self, order: &PortOrder, zone: &str) -> ApiResult<PortId>;

    /// Orders a LAG port with `lag_port_count` members.
    async fn buy_lag_port(&self, order: &PortOrder, lag_port_count: u32) -> ApiResult<PortId>;

    /// Orders a LAG port pinned to a diversity zone.
    async fn buy_zoned_lag_port(
        &self,
        order: &PortOrder,
        lag_port_count: u32,
        zone: &str,
    ) -> ApiResult<PortId>;

    /// Waits until the port reports a provisioned status.
    ///
    /// Must return [`ApiError::Timeout`](crate::ApiError::Timeout) once
    /// `timeout` has elapsed. Dropping the future abandons the wait.
    async fn wait_for_port_provisioning(&self, port_id: &PortId, timeout: Duration)
        -> ApiResult<()>;

    /// Fetches the authoritative record of a port.
    async fn get_port_details(&self, port_id: &PortId) -> ApiResult<RemotePortRecord>;

    /// Updates name, description and marketplace visibility.
    ///
    /// Returns the remote acknowledgement flag.
    async fn modify_port(
        &self,
        port_id: &PortId,
        name: &str,
        description: &str,
        marketplace_visibility: bool,
    ) -> ApiResult<bool>;

    /// Locks the port. Returns whether the port ended up locked.
    async fn lock_port(&self, port_id: &PortId) -> ApiResult<bool>;

    /// Unlocks the port. Returns whether the port ended up unlocked.
    async fn unlock_port(&self, port_id: &PortId) -> ApiResult<bool>;

    /// Deletes (`immediate`) or cancels the port. Returns whether the remote
    /// system accepted the request; a refusal that comes with a reason is
    /// reported as an error carrying it.
    async fn delete_port(&self, port_id: &PortId, immediate: bool) -> ApiResult<bool>;
}
