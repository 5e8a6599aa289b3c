//! Data model for the port resource.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PortResourceError, PortResourceResult};

/// Identifier assigned to a port by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortId(String);

impl PortId {
    /// Creates a port identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PortId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PortId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for PortId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// User-declared target state of a port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredConfig {
    /// Port name.
    pub port_name: String,

    /// Contract term in months.
    pub term: u32,

    /// Requested speed in Mbps.
    pub port_speed: u32,

    /// Numeric location identifier.
    pub location_id: u32,

    /// Whether the port is advertised on the marketplace.
    #[serde(default)]
    pub marketplace_visibility: bool,

    /// Provision as a link aggregation group.
    #[serde(default)]
    pub lag: bool,

    /// Number of member ports when `lag` is set.
    #[serde(default)]
    pub lag_port_count: u32,

    /// Diversity zone; empty is treated as unzoned.
    #[serde(default)]
    pub diversity_zone: Option<String>,

    /// Desired lock state.
    #[serde(default)]
    pub locked: bool,
}

impl DesiredConfig {
    /// Returns the diversity zone if one is set and non-empty.
    pub fn diversity_zone(&self) -> Option<&str> {
        self.diversity_zone.as_deref().filter(|zone| !zone.is_empty())
    }

    /// The remote API models the inverse of marketplace visibility.
    pub fn hide_from_marketplace(&self) -> bool {
        !self.marketplace_visibility
    }
}

/// A resolved location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Numeric location identifier.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Market code (e.g., "AU", "US").
    pub market: String,
}

/// Provisioning status reported by the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisioningStatus {
    New,
    Design,
    Deployable,
    Configured,
    Live,
    Cancelled,
    Decommissioning,
    Decommissioned,
    /// A status this crate does not know about.
    Unknown(String),
}

impl ProvisioningStatus {
    /// Returns the status as reported by the API.
    pub fn as_str(&self) -> &str {
        match self {
            ProvisioningStatus::New => "NEW",
            ProvisioningStatus::Design => "DESIGN",
            ProvisioningStatus::Deployable => "DEPLOYABLE",
            ProvisioningStatus::Configured => "CONFIGURED",
            ProvisioningStatus::Live => "LIVE",
            ProvisioningStatus::Cancelled => "CANCELLED",
            ProvisioningStatus::Decommissioning => "DECOMMISSIONING",
            ProvisioningStatus::Decommissioned => "DECOMMISSIONED",
            ProvisioningStatus::Unknown(status) => status,
        }
    }

    /// Returns true once the port has left the provisioning pipeline.
    pub fn is_provisioned(&self) -> bool {
        matches!(
            self,
            ProvisioningStatus::Configured | ProvisioningStatus::Live
        )
    }

    /// Returns true if the port is on its way out or gone.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProvisioningStatus::Cancelled
                | ProvisioningStatus::Decommissioning
                | ProvisioningStatus::Decommissioned
        )
    }
}

impl FromStr for ProvisioningStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "NEW" => ProvisioningStatus::New,
            "DESIGN" => ProvisioningStatus::Design,
            "DEPLOYABLE" => ProvisioningStatus::Deployable,
            "CONFIGURED" => ProvisioningStatus::Configured,
            "LIVE" => ProvisioningStatus::Live,
            "CANCELLED" => ProvisioningStatus::Cancelled,
            "DECOMMISSIONING" => ProvisioningStatus::Decommissioning,
            "DECOMMISSIONED" => ProvisioningStatus::Decommissioned,
            _ => ProvisioningStatus::Unknown(s.to_string()),
        })
    }
}

impl fmt::Display for ProvisioningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authoritative server-side state of a port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePortRecord {
    pub uid: String,
    pub port_name: String,
    pub port_type: String,
    pub provisioning_status: String,
    pub create_date: Option<DateTime<Utc>>,
    pub created_by: String,
    pub port_speed: u32,
    pub live_date: Option<DateTime<Utc>>,
    pub market_code: String,
    pub location_id: u32,
    pub marketplace_visibility: bool,
    pub company_name: String,
    pub term: u32,
    pub lag_primary: bool,
    pub lag_id: Option<u64>,
    pub locked: bool,
    pub admin_locked: bool,
    pub diversity_zone: String,
}

impl RemotePortRecord {
    /// Parses the provisioning status.
    pub fn status(&self) -> ProvisioningStatus {
        match self.provisioning_status.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

/// Locally tracked mirror of a port.
///
/// The identifier is bound once by Create (or Import) and never changes; the
/// record is replaced wholesale by every Read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalState {
    id: Option<PortId>,
    #[serde(default)]
    record: Option<RemotePortRecord>,
}

impl LocalState {
    /// Creates empty state for a resource that does not exist yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates state from a bare identifier, as used by import.
    pub fn from_id(id: PortId) -> Self {
        Self {
            id: Some(id),
            record: None,
        }
    }

    /// Returns the bound identifier.
    pub fn id(&self) -> Option<&PortId> {
        self.id.as_ref()
    }

    /// Binds the identifier. Fails if the state is already bound.
    pub fn bind(&mut self, id: PortId) -> PortResourceResult<()> {
        if let Some(existing) = &self.id {
            return Err(PortResourceError::AlreadyCreated {
                port_id: existing.clone(),
            });
        }
        self.id = Some(id);
        Ok(())
    }

    /// Returns the record from the last successful Read.
    pub fn record(&self) -> Option<&RemotePortRecord> {
        self.record.as_ref()
    }

    /// Overwrites every tracked attribute with `record`.
    pub fn replace_record(&mut self, record: RemotePortRecord) {
        self.record = Some(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_zone_is_unzoned() {
        let mut desired = DesiredConfig {
            port_name: "edge".to_string(),
            term: 12,
            port_speed: 1000,
            location_id: 7,
            marketplace_visibility: true,
            lag: false,
            lag_port_count: 0,
            diversity_zone: Some(String::new()),
            locked: false,
        };
        assert_eq!(desired.diversity_zone(), None);
        assert!(!desired.hide_from_marketplace());

        desired.diversity_zone = Some("blue".to_string());
        assert_eq!(desired.diversity_zone(), Some("blue"));
    }

    #[test]
    fn test_bind_is_once_only() {
        let mut state = LocalState::new();
        state.bind(PortId::from("a")).unwrap();

        let err = state.bind(PortId::from("b")).unwrap_err();
        assert!(matches!(err, PortResourceError::AlreadyCreated { .. }));
        assert_eq!(state.id(), Some(&PortId::from("a")));
    }

    #[test]
    fn test_provisioning_status() {
        assert!("LIVE".parse::<ProvisioningStatus>().unwrap().is_provisioned());
        assert!("configured".parse::<ProvisioningStatus>().unwrap().is_provisioned());
        assert!(!"DEPLOYABLE".parse::<ProvisioningStatus>().unwrap().is_provisioned());
        assert!("CANCELLED".parse::<ProvisioningStatus>().unwrap().is_terminal());

        let odd: ProvisioningStatus = "PENDING_INTERNAL".parse().unwrap();
        assert_eq!(odd, ProvisioningStatus::Unknown("PENDING_INTERNAL".to_string()));
        assert_eq!(odd.to_string(), "PENDING_INTERNAL");
    }

    #[test]
    fn test_desired_config_defaults() {
        let desired: DesiredConfig = serde_json::from_str(
            r#"{"port_name":"edge","term":12,"port_speed":10000,"location_id":3}"#,
        )
        .unwrap();
        assert!(!desired.lag);
        assert!(!desired.locked);
        assert_eq!(desired.diversity_zone(), None);
        assert!(desired.hide_from_marketplace());
    }
}
