//! Attribute names of the port resource.
//!
//! These match the keys a host uses for the tracked resource and appear in
//! logs when reporting which attributes changed.

/// Port name (mutable).
pub const PORT_NAME: &str = "port_name";

/// Marketplace visibility (mutable).
pub const MARKETPLACE_VISIBILITY: &str = "marketplace_visibility";

/// Lock flag (mutable).
pub const LOCKED: &str = "locked";

/// Contract term in months.
pub const TERM: &str = "term";

/// Port speed in Mbps.
pub const PORT_SPEED: &str = "port_speed";

/// Location identifier.
pub const LOCATION_ID: &str = "location_id";

/// Diversity zone.
pub const DIVERSITY_ZONE: &str = "diversity_zone";
