//! In-memory fake of the provisioning API
//!
//! Records every call it receives and keeps a small port inventory so that
//! lifecycle operations can be exercised end to end without a server.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use xconnect_common::{
    ApiError, ApiResult, Location, LocationApi, PortApi, PortId, PortOrder, ProvisioningStatus,
    RemotePortRecord,
};

/// Operation kinds, used for failure injection and call counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FakeOp {
    ResolveLocation,
    Buy,
    WaitForPortProvisioning,
    GetPortDetails,
    ModifyPort,
    LockPort,
    UnlockPort,
    DeletePort,
}

/// A recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ResolveLocation {
        location_id: u32,
    },
    BuySinglePort {
        order: PortOrder,
    },
    BuyZonedSinglePort {
        order: PortOrder,
        zone: String,
    },
    BuyLagPort {
        order: PortOrder,
        lag_port_count: u32,
    },
    BuyZonedLagPort {
        order: PortOrder,
        lag_port_count: u32,
        zone: String,
    },
    WaitForPortProvisioning {
        port_id: PortId,
        timeout: Duration,
    },
    GetPortDetails {
        port_id: PortId,
    },
    ModifyPort {
        port_id: PortId,
        name: String,
        description: String,
        marketplace_visibility: bool,
    },
    LockPort {
        port_id: PortId,
    },
    UnlockPort {
        port_id: PortId,
    },
    DeletePort {
        port_id: PortId,
        immediate: bool,
    },
}

impl ApiCall {
    /// Returns the operation kind of this call
    pub fn op(&self) -> FakeOp {
        match self {
            ApiCall::ResolveLocation { .. } => FakeOp::ResolveLocation,
            ApiCall::BuySinglePort { .. }
            | ApiCall::BuyZonedSinglePort { .. }
            | ApiCall::BuyLagPort { .. }
            | ApiCall::BuyZonedLagPort { .. } => FakeOp::Buy,
            ApiCall::WaitForPortProvisioning { .. } => FakeOp::WaitForPortProvisioning,
            ApiCall::GetPortDetails { .. } => FakeOp::GetPortDetails,
            ApiCall::ModifyPort { .. } => FakeOp::ModifyPort,
            ApiCall::LockPort { .. } => FakeOp::LockPort,
            ApiCall::UnlockPort { .. } => FakeOp::UnlockPort,
            ApiCall::DeletePort { .. } => FakeOp::DeletePort,
        }
    }

    /// Returns true if the call changes remote state
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self.op(),
            FakeOp::ResolveLocation | FakeOp::WaitForPortProvisioning | FakeOp::GetPortDetails
        )
    }
}

#[derive(Debug, Default)]
struct FakeState {
    locations: HashMap<u32, Location>,
    ports: HashMap<PortId, RemotePortRecord>,
    calls: Vec<ApiCall>,
    failing: HashSet<FakeOp>,
    refusing: HashSet<FakeOp>,
    next_port: u32,
}

/// Recording fake implementing [`PortApi`] and [`LocationApi`]
#[derive(Debug, Default)]
pub struct FakeXconnect {
    state: Mutex<FakeState>,
}

impl FakeXconnect {
    /// Create an empty fake with no locations or ports
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a location
    pub fn with_location(self, location: Location) -> Self {
        self.state.lock().locations.insert(location.id, location);
        self
    }

    /// Seed an existing port
    pub fn with_port(self, record: RemotePortRecord) -> Self {
        self.insert_port(record);
        self
    }

    /// Insert or replace a port record
    pub fn insert_port(&self, record: RemotePortRecord) {
        let id = PortId::new(record.uid.clone());
        self.state.lock().ports.insert(id, record);
    }

    /// Make every call of `op` fail with an error
    pub fn fail(&self, op: FakeOp) {
        self.state.lock().failing.insert(op);
    }

    /// Make every call of `op` succeed but report `false`
    ///
    /// Only meaningful for lock, unlock, delete and modify.
    pub fn refuse(&self, op: FakeOp) {
        self.state.lock().refusing.insert(op);
    }

    /// Clear injected failures and refusals
    pub fn heal(&self) {
        let mut state = self.state.lock();
        state.failing.clear();
        state.refusing.clear();
    }

    /// Apply an out-of-band change to a stored port
    pub fn mutate_port<F>(&self, port_id: &PortId, f: F)
    where
        F: FnOnce(&mut RemotePortRecord),
    {
        if let Some(record) = self.state.lock().ports.get_mut(port_id) {
            f(record);
        }
    }

    /// Return a copy of a stored port
    pub fn port(&self, port_id: &PortId) -> Option<RemotePortRecord> {
        self.state.lock().ports.get(port_id).cloned()
    }

    /// Return all recorded calls
    pub fn calls(&self) -> Vec<ApiCall> {
        self.state.lock().calls.clone()
    }

    /// Return the recorded calls that change remote state
    pub fn mutations(&self) -> Vec<ApiCall> {
        self.calls().into_iter().filter(ApiCall::is_mutation).collect()
    }

    /// Count recorded calls of `op`
    pub fn count(&self, op: FakeOp) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| call.op() == op)
            .count()
    }

    /// Forget recorded calls
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn record(&self, call: ApiCall) -> ApiResult<()> {
        let op = call.op();
        let mut state = self.state.lock();
        state.calls.push(call);
        if state.failing.contains(&op) {
            return Err(ApiError::rejected(
                format!("{:?}", op),
                "injected failure",
            ));
        }
        Ok(())
    }

    fn is_refusing(&self, op: FakeOp) -> bool {
        self.state.lock().refusing.contains(&op)
    }

    fn create_port(
        &self,
        order: &PortOrder,
        lag_port_count: Option<u32>,
        zone: Option<&str>,
    ) -> PortId {
        let mut state = self.state.lock();
        state.next_port += 1;
        let id = PortId::new(format!("port-{}", state.next_port));

        let record = RemotePortRecord {
            uid: id.to_string(),
            port_name: order.name.clone(),
            port_type: "MEGAPORT".to_string(),
            provisioning_status: ProvisioningStatus::Deployable.to_string(),
            created_by: "fake".to_string(),
            port_speed: order.port_speed,
            market_code: order.market_code.clone(),
            location_id: order.location_id,
            marketplace_visibility: !order.hide_from_marketplace,
            company_name: "Fake Networks".to_string(),
            term: order.term,
            lag_primary: lag_port_count.is_some(),
            lag_id: lag_port_count.map(|_| u64::from(state.next_port)),
            diversity_zone: zone.unwrap_or_default().to_string(),
            ..Default::default()
        };
        state.ports.insert(id.clone(), record);
        id
    }

    fn lookup(&self, port_id: &PortId) -> ApiResult<RemotePortRecord> {
        self.port(port_id)
            .ok_or_else(|| ApiError::not_found("port", port_id))
    }

    fn set_locked(&self, port_id: &PortId, locked: bool) -> ApiResult<()> {
        let mut state = self.state.lock();
        let record = state
            .ports
            .get_mut(port_id)
            .ok_or_else(|| ApiError::not_found("port", port_id))?;
        record.locked = locked;
        Ok(())
    }
}

#[async_trait]
impl LocationApi for FakeXconnect {
    async fn resolve_location(&self, location_id: u32) -> ApiResult<Location> {
        self.record(ApiCall::ResolveLocation { location_id })?;
        self.state
            .lock()
            .locations
            .get(&location_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("location", location_id))
    }
}

#[async_trait]
impl PortApi for FakeXconnect {
    async fn buy_single_port(&self, order: &PortOrder) -> ApiResult<PortId> {
        self.record(ApiCall::BuySinglePort {
            order: order.clone(),
        })?;
        Ok(self.create_port(order, None, None))
    }

    async fn buy_zoned_single_port(&self, order: &PortOrder, zone: &str) -> ApiResult<PortId> {
        self.record(ApiCall::BuyZonedSinglePort {
            order: order.clone(),
            zone: zone.to_string(),
        })?;
        Ok(self.create_port(order, None, Some(zone)))
    }

    async fn buy_lag_port(&self, order: &PortOrder, lag_port_count: u32) -> ApiResult<PortId> {
        self.record(ApiCall::BuyLagPort {
            order: order.clone(),
            lag_port_count,
        })?;
        Ok(self.create_port(order, Some(lag_port_count), None))
    }

    async fn buy_zoned_lag_port(
        &self,
        order: &PortOrder,
        lag_port_count: u32,
        zone: &str,
    ) -> ApiResult<PortId> {
        self.record(ApiCall::BuyZonedLagPort {
            order: order.clone(),
            lag_port_count,
            zone: zone.to_string(),
        })?;
        Ok(self.create_port(order, Some(lag_port_count), Some(zone)))
    }

    async fn wait_for_port_provisioning(
        &self,
        port_id: &PortId,
        timeout: Duration,
    ) -> ApiResult<()> {
        self.record(ApiCall::WaitForPortProvisioning {
            port_id: port_id.clone(),
            timeout,
        })?;
        let mut state = self.state.lock();
        let record = state
            .ports
            .get_mut(port_id)
            .ok_or_else(|| ApiError::not_found("port", port_id))?;
        record.provisioning_status = ProvisioningStatus::Live.to_string();
        Ok(())
    }

    async fn get_port_details(&self, port_id: &PortId) -> ApiResult<RemotePortRecord> {
        self.record(ApiCall::GetPortDetails {
            port_id: port_id.clone(),
        })?;
        self.lookup(port_id)
    }

    async fn modify_port(
        &self,
        port_id: &PortId,
        name: &str,
        description: &str,
        marketplace_visibility: bool,
    ) -> ApiResult<bool> {
        self.record(ApiCall::ModifyPort {
            port_id: port_id.clone(),
            name: name.to_string(),
            description: description.to_string(),
            marketplace_visibility,
        })?;
        if self.is_refusing(FakeOp::ModifyPort) {
            return Ok(false);
        }
        let mut state = self.state.lock();
        let record = state
            .ports
            .get_mut(port_id)
            .ok_or_else(|| ApiError::not_found("port", port_id))?;
        record.port_name = name.to_string();
        record.marketplace_visibility = marketplace_visibility;
        Ok(true)
    }

    async fn lock_port(&self, port_id: &PortId) -> ApiResult<bool> {
        self.record(ApiCall::LockPort {
            port_id: port_id.clone(),
        })?;
        if self.is_refusing(FakeOp::LockPort) {
            return Ok(false);
        }
        self.set_locked(port_id, true)?;
        Ok(true)
    }

    async fn unlock_port(&self, port_id: &PortId) -> ApiResult<bool> {
        self.record(ApiCall::UnlockPort {
            port_id: port_id.clone(),
        })?;
        if self.is_refusing(FakeOp::UnlockPort) {
            return Ok(false);
        }
        self.set_locked(port_id, false)?;
        Ok(true)
    }

    async fn delete_port(&self, port_id: &PortId, immediate: bool) -> ApiResult<bool> {
        self.record(ApiCall::DeletePort {
            port_id: port_id.clone(),
            immediate,
        })?;
        if self.is_refusing(FakeOp::DeletePort) {
            return Ok(false);
        }
        let mut state = self.state.lock();
        if immediate {
            state.ports.remove(port_id);
        } else if let Some(record) = state.ports.get_mut(port_id) {
            record.provisioning_status = ProvisioningStatus::Cancelled.to_string();
        } else {
            return Err(ApiError::not_found("port", port_id));
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::location_fixtures;

    #[tokio::test]
    async fn test_buy_then_wait_goes_live() {
        let fake = FakeXconnect::new().with_location(location_fixtures::sydney());
        let order = PortOrder::new("edge", 12, 1000, 7, "AU");

        let id = fake.buy_lag_port(&order, 2).await.unwrap();
        assert_eq!(fake.port(&id).unwrap().provisioning_status, "DEPLOYABLE");

        fake.wait_for_port_provisioning(&id, Duration::from_secs(1))
            .await
            .unwrap();
        let record = fake.port(&id).unwrap();
        assert_eq!(record.provisioning_status, "LIVE");
        assert!(record.lag_primary);
        assert_eq!(fake.count(FakeOp::Buy), 1);
    }

    #[tokio::test]
    async fn test_injected_failure_is_recorded() {
        let fake = FakeXconnect::new();
        fake.fail(FakeOp::ResolveLocation);

        assert!(fake.resolve_location(7).await.is_err());
        assert_eq!(fake.calls(), vec![ApiCall::ResolveLocation { location_id: 7 }]);
        assert!(fake.mutations().is_empty());
    }

    #[tokio::test]
    async fn test_refused_lock_leaves_port_unlocked() {
        let fake = FakeXconnect::new();
        let order = PortOrder::new("edge", 12, 1000, 7, "AU");
        let id = fake.buy_single_port(&order).await.unwrap();

        fake.refuse(FakeOp::LockPort);
        assert!(!fake.lock_port(&id).await.unwrap());
        assert!(!fake.port(&id).unwrap().locked);

        fake.heal();
        assert!(fake.lock_port(&id).await.unwrap());
        assert!(fake.port(&id).unwrap().locked);
    }
}
