//! Test fixtures for common port configurations
//!
//! Provides reusable desired configurations, locations and remote records

use xconnect_common::{DesiredConfig, Location, RemotePortRecord};

/// Common location fixtures
pub mod location_fixtures {
    use super::*;

    /// Location 7 in the AU market
    pub fn sydney() -> Location {
        Location {
            id: 7,
            name: "Equinix SY1".to_string(),
            market: "AU".to_string(),
        }
    }

    /// Location 3 in the US market
    pub fn ashburn() -> Location {
        Location {
            id: 3,
            name: "Equinix DC2".to_string(),
            market: "US".to_string(),
        }
    }
}

/// Common desired configuration fixtures
pub mod port_fixtures {
    use super::*;

    /// 1 Gbps single port at location 7, visible on the marketplace
    pub fn single_port(name: &str) -> DesiredConfig {
        DesiredConfig {
            port_name: name.to_string(),
            term: 12,
            port_speed: 1000,
            location_id: 7,
            marketplace_visibility: true,
            lag: false,
            lag_port_count: 0,
            diversity_zone: None,
            locked: false,
        }
    }

    /// Single port pinned to a diversity zone
    pub fn zoned_single_port(name: &str, zone: &str) -> DesiredConfig {
        DesiredConfig {
            diversity_zone: Some(zone.to_string()),
            ..single_port(name)
        }
    }

    /// 10 Gbps LAG port with `count` members
    pub fn lag_port(name: &str, count: u32) -> DesiredConfig {
        DesiredConfig {
            port_speed: 10000,
            lag: true,
            lag_port_count: count,
            ..single_port(name)
        }
    }

    /// LAG port pinned to a diversity zone
    pub fn zoned_lag_port(name: &str, count: u32, zone: &str) -> DesiredConfig {
        DesiredConfig {
            diversity_zone: Some(zone.to_string()),
            ..lag_port(name, count)
        }
    }
}

/// Common remote record fixtures
pub mod record_fixtures {
    use super::*;

    /// A live, unlocked single port at location 7
    pub fn live_port(uid: &str, name: &str) -> RemotePortRecord {
        RemotePortRecord {
            uid: uid.to_string(),
            port_name: name.to_string(),
            port_type: "MEGAPORT".to_string(),
            provisioning_status: "LIVE".to_string(),
            created_by: "ops@example.com".to_string(),
            port_speed: 1000,
            market_code: "AU".to_string(),
            location_id: 7,
            marketplace_visibility: true,
            company_name: "Example Networks".to_string(),
            term: 12,
            ..Default::default()
        }
    }
}
