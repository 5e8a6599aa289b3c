//! Provisioning variant selection.
//!
//! A new port is ordered through exactly one of four remote calls, chosen by
//! two independent axes of the desired configuration:
//!
//! | lag | zoned | Variant |
//! |-----|-------|---------|
//! | false | false | [`ProvisioningVariant::Single`] |
//! | false | true | [`ProvisioningVariant::ZonedSingle`] |
//! | true | false | [`ProvisioningVariant::Lag`] |
//! | true | true | [`ProvisioningVariant::ZonedLag`] |

use xconnect_common::{ApiResult, DesiredConfig, PortApi, PortId, PortOrder};

/// How a port is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningVariant<'a> {
    /// A single physical port.
    Single,
    /// A single port pinned to a diversity zone.
    ZonedSingle { zone: &'a str },
    /// A link aggregation group of `port_count` members.
    Lag { port_count: u32 },
    /// A LAG pinned to a diversity zone.
    ZonedLag { port_count: u32, zone: &'a str },
}

impl<'a> ProvisioningVariant<'a> {
    /// Selects the variant for a desired configuration.
    pub fn select(desired: &'a DesiredConfig) -> Self {
        match (desired.lag, desired.diversity_zone()) {
            (false, None) => ProvisioningVariant::Single,
            (false, Some(zone)) => ProvisioningVariant::ZonedSingle { zone },
            (true, None) => ProvisioningVariant::Lag {
                port_count: desired.lag_port_count,
            },
            (true, Some(zone)) => ProvisioningVariant::ZonedLag {
                port_count: desired.lag_port_count,
                zone,
            },
        }
    }

    /// Returns the variant name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            ProvisioningVariant::Single => "single",
            ProvisioningVariant::ZonedSingle { .. } => "zoned single",
            ProvisioningVariant::Lag { .. } => "LAG",
            ProvisioningVariant::ZonedLag { .. } => "zoned LAG",
        }
    }

    /// Submits the order through the matching remote call.
    pub async fn submit<C>(&self, api: &C, order: &PortOrder) -> ApiResult<PortId>
    where
        C: PortApi + ?Sized,
    {
        match *self {
            ProvisioningVariant::Single => api.buy_single_port(order).await,
            ProvisioningVariant::ZonedSingle { zone } => {
                api.buy_zoned_single_port(order, zone).await
            }
            ProvisioningVariant::Lag { port_count } => api.buy_lag_port(order, port_count).await,
            ProvisioningVariant::ZonedLag { port_count, zone } => {
                api.buy_zoned_lag_port(order, port_count, zone).await
            }
        }
    }
}
