//! JSON bodies exchanged with the provisioning API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use xconnect_common::{Location, PortOrder, RemotePortRecord};

/// Product type of a physical port order.
pub const PRODUCT_TYPE_PORT: &str = "MEGAPORT";

/// The `data` envelope every response is wrapped in.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationBody {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub market: String,
}

impl From<LocationBody> for Location {
    fn from(body: LocationBody) -> Self {
        Location {
            id: body.id,
            name: body.name,
            market: body.market,
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diversity_zone: Option<String>,
}

/// One line of a buy request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortOrderBody {
    pub location_id: u32,
    pub term: u32,
    pub product_name: String,
    pub product_type: &'static str,
    pub port_speed: u32,
    pub market_code: String,
    pub marketplace_visibility: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lag_port_count: Option<u32>,
    pub config: OrderConfig,
}

impl PortOrderBody {
    pub fn new(order: &PortOrder, lag_port_count: Option<u32>, zone: Option<&str>) -> Self {
        Self {
            location_id: order.location_id,
            term: order.term,
            product_name: order.name.clone(),
            product_type: PRODUCT_TYPE_PORT,
            port_speed: order.port_speed,
            market_code: order.market_code.clone(),
            marketplace_visibility: !order.hide_from_marketplace,
            lag_port_count,
            config: OrderConfig {
                diversity_zone: zone.map(str::to_string),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedService {
    pub technical_service_uid: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyPortBody<'a> {
    pub name: &'a str,
    pub cost_centre: &'a str,
    pub marketplace_visibility: bool,
}

/// Product record as returned by `GET /v2/product/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortBody {
    #[serde(deserialize_with = "null_as_default")]
    pub product_uid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub provisioning_status: String,
    pub create_date: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_by: String,
    #[serde(deserialize_with = "null_as_default")]
    pub port_speed: u32,
    pub live_date: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub market: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location_id: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub marketplace_visibility: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub contract_term_months: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub lag_primary: bool,
    pub lag_id: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub locked: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub admin_locked: bool,
    pub diversity_zone: Option<String>,
}

/// Reads an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn from_millis(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis.and_then(DateTime::from_timestamp_millis)
}

impl From<PortBody> for RemotePortRecord {
    fn from(body: PortBody) -> Self {
        RemotePortRecord {
            uid: body.product_uid,
            port_name: body.product_name,
            port_type: body.product_type,
            provisioning_status: body.provisioning_status,
            create_date: from_millis(body.create_date),
            created_by: body.created_by,
            port_speed: body.port_speed,
            live_date: from_millis(body.live_date),
            market_code: body.market,
            location_id: body.location_id,
            marketplace_visibility: body.marketplace_visibility,
            company_name: body.company_name,
            term: body.contract_term_months,
            lag_primary: body.lag_primary,
            lag_id: body.lag_id,
            locked: body.locked,
            admin_locked: body.admin_locked,
            diversity_zone: body.diversity_zone.unwrap_or_default(),
        }
    }
}
