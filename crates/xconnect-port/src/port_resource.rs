//! PortResource implementation - the port lifecycle controller.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use xconnect_client::ProviderConfig;
use xconnect_common::{
    DeleteAction, DesiredConfig, LocalState, LocationApi, PortApi, PortId, PortOrder,
    PortResourceError, PortResourceResult,
};

use crate::changes::PortChanges;
use crate::provisioning::ProvisioningVariant;

/// Description submitted with every modify call; the resource does not model it.
const UNMODELLED_DESCRIPTION: &str = "";

/// Policy the controller applies to every resource it manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleSettings {
    /// Hard-delete ports instead of cancelling them at contract end.
    pub delete_ports: bool,

    /// Upper bound on the wait for a new port to be provisioned.
    pub provisioning_timeout: Duration,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            delete_ports: false,
            provisioning_timeout: Duration::from_secs(900),
        }
    }
}

impl From<&ProviderConfig> for LifecycleSettings {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            delete_ports: config.lifecycle.delete_ports,
            provisioning_timeout: config.provisioning_timeout(),
        }
    }
}

/// Port lifecycle controller.
///
/// Long-lived and shared across resource instances: it holds the remote
/// client and the read-only [`LifecycleSettings`]. Each operation reasons
/// about exactly one resource through the [`LocalState`] it is handed.
///
/// - [`create`](Self::create) orders the port, waits for it to come up and
///   reads it back
/// - [`read`](Self::read) replaces local state with the remote record
/// - [`update`](Self::update) applies rename/visibility and lock changes, then
///   reads back
/// - [`delete`](Self::delete) deletes or cancels according to policy
/// - [`import`](Self::import) hydrates state from a bare identifier
pub struct PortResource<C> {
    client: Arc<C>,
    settings: LifecycleSettings,
}

impl<C> PortResource<C>
where
    C: PortApi + LocationApi,
{
    /// Creates a controller over a shared client.
    pub fn new(client: Arc<C>, settings: LifecycleSettings) -> Self {
        Self { client, settings }
    }

    /// Returns the lifecycle settings.
    pub fn settings(&self) -> &LifecycleSettings {
        &self.settings
    }

    /// Provisions a new port and populates `state` from it.
    ///
    /// The identifier is bound to `state` as soon as the order is accepted,
    /// so a failure while waiting or reading still leaves a resolvable port.
    #[instrument(skip(self, desired, state), fields(name = %desired.port_name, location = desired.location_id))]
    pub async fn create(
        &self,
        desired: &DesiredConfig,
        state: &mut LocalState,
    ) -> PortResourceResult<()> {
        if let Some(port_id) = state.id() {
            return Err(PortResourceError::AlreadyCreated {
                port_id: port_id.clone(),
            });
        }

        let location = self
            .client
            .resolve_location(desired.location_id)
            .await
            .map_err(|source| PortResourceError::LocationResolution {
                location_id: desired.location_id,
                source,
            })?;

        let order = PortOrder::new(
            desired.port_name.clone(),
            desired.term,
            desired.port_speed,
            desired.location_id,
            location.market,
        )
        .with_hide_from_marketplace(desired.hide_from_marketplace());

        let variant = ProvisioningVariant::select(desired);
        debug!(
            "Ordering {} port '{}' in market {}",
            variant.name(),
            order.name,
            order.market_code
        );

        let port_id = variant
            .submit(self.client.as_ref(), &order)
            .await
            .map_err(|source| PortResourceError::Provisioning {
                variant: variant.name(),
                name: desired.port_name.clone(),
                source,
            })?;

        state.bind(port_id.clone())?;
        info!("Ordered {} port {}", variant.name(), port_id);

        self.client
            .wait_for_port_provisioning(&port_id, self.settings.provisioning_timeout)
            .await
            .map_err(|source| PortResourceError::ProvisioningWait {
                port_id: port_id.clone(),
                source,
            })?;
        info!("Port {} finished provisioning", port_id);

        self.read(state).await
    }

    /// Replaces every tracked attribute with the remote record.
    ///
    /// A failed fetch is surfaced as [`PortResourceError::Fetch`] whether the
    /// port is gone or the API was briefly unreachable; inspect
    /// [`ApiError::is_not_found`](xconnect_common::ApiError::is_not_found) on
    /// the source to tell them apart.
    #[instrument(skip(self, state), fields(port = ?state.id()))]
    pub async fn read(&self, state: &mut LocalState) -> PortResourceResult<()> {
        let port_id = require_id(state, "read")?;

        let record = self
            .client
            .get_port_details(&port_id)
            .await
            .map_err(|source| PortResourceError::Fetch {
                port_id: port_id.clone(),
                source,
            })?;

        debug!(
            "Port {} is {} (locked: {})",
            port_id, record.provisioning_status, record.locked
        );
        state.replace_record(record);
        Ok(())
    }

    /// Applies the mutable attribute changes, then reads back.
    ///
    /// Name and visibility travel in one modify call; the lock flag uses a
    /// dedicated lock or unlock call. Nothing is rolled back if a later call
    /// fails.
    #[instrument(skip(self, desired, state), fields(port = ?state.id()))]
    pub async fn update(
        &self,
        desired: &DesiredConfig,
        state: &mut LocalState,
    ) -> PortResourceResult<()> {
        let port_id = require_id(state, "update")?;
        let changes = PortChanges::between(state.record(), desired);

        for field in &changes.fixed {
            warn!(
                "Attribute {} of port {} cannot be changed in place; it needs a new port",
                field, port_id
            );
        }

        if changes.is_empty() {
            debug!("No mutable changes for port {}", port_id);
        }

        if changes.needs_modify() {
            let acknowledged = self
                .client
                .modify_port(
                    &port_id,
                    &desired.port_name,
                    UNMODELLED_DESCRIPTION,
                    desired.marketplace_visibility,
                )
                .await
                .map_err(|source| PortResourceError::Modification {
                    port_id: port_id.clone(),
                    source,
                })?;

            if !acknowledged {
                warn!("Modify of port {} was not acknowledged", port_id);
            }
            info!(
                "Modified port {} (name '{}', marketplace visibility {})",
                port_id, desired.port_name, desired.marketplace_visibility
            );
        }

        if let Some(lock) = changes.lock_target() {
            self.apply_lock(&port_id, lock).await?;
        }

        self.read(state).await
    }

    async fn apply_lock(&self, port_id: &PortId, lock: bool) -> PortResourceResult<()> {
        let result = if lock {
            self.client.lock_port(port_id).await
        } else {
            self.client.unlock_port(port_id).await
        };

        let reached = result.map_err(|source| PortResourceError::LockRequest {
            port_id: port_id.clone(),
            source,
        })?;

        match (lock, reached) {
            (true, true) => info!("Locked port {}", port_id),
            (false, true) => info!("Unlocked port {}", port_id),
            (true, false) => {
                return Err(PortResourceError::PortNotLocked {
                    port_id: port_id.clone(),
                })
            }
            (false, false) => {
                return Err(PortResourceError::PortNotUnlocked {
                    port_id: port_id.clone(),
                })
            }
        }
        Ok(())
    }

    /// Deletes or cancels the port according to the delete policy.
    ///
    /// On success the caller drops `state`; the port is not read back.
    #[instrument(skip(self, state), fields(port = ?state.id()))]
    pub async fn delete(&self, state: &LocalState) -> PortResourceResult<()> {
        let port_id = require_id(state, "delete")?;
        let action = DeleteAction::from_policy(self.settings.delete_ports);

        match self
            .client
            .delete_port(&port_id, action.is_immediate())
            .await
        {
            Ok(true) => {
                info!("Finished {} port {}", action, port_id);
                Ok(())
            }
            Ok(false) => Err(PortResourceError::deletion_refused(action, port_id)),
            Err(source) => Err(PortResourceError::deletion_failed(action, port_id, source)),
        }
    }

    /// Builds state for an existing port from its identifier alone.
    #[instrument(skip(self))]
    pub async fn import(&self, port_id: PortId) -> PortResourceResult<LocalState> {
        let mut state = LocalState::from_id(port_id);
        self.read(&mut state).await?;
        info!("Imported port {:?}", state.id());
        Ok(state)
    }
}

fn require_id(state: &LocalState, operation: &'static str) -> PortResourceResult<PortId> {
    state
        .id()
        .cloned()
        .ok_or(PortResourceError::MissingIdentifier { operation })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::{mock, predicate::eq, Sequence};
    use pretty_assertions::assert_eq;
    use xconnect_common::{ApiError, ApiResult, Location, RemotePortRecord};
    use xconnect_test::{location_fixtures, port_fixtures, record_fixtures};

    mock! {
        pub Api {}

        #[async_trait]
        impl LocationApi for Api {
            async fn resolve_location(&self, location_id: u32) -> ApiResult<Location>;
        }

        #[async_trait]
        impl PortApi for Api {
            async fn buy_single_port(&self, order: &PortOrder) -> ApiResult<PortId>;
            async fn buy_zoned_single_port(&self, order: &PortOrder, zone: &str) -> ApiResult<PortId>;
            async fn buy_lag_port(&self, order: &PortOrder, lag_port_count: u32) -> ApiResult<PortId>;
            async fn buy_zoned_lag_port(
                &self,
                order: &PortOrder,
                lag_port_count: u32,
                zone: &str,
            ) -> ApiResult<PortId>;
            async fn wait_for_port_provisioning(&self, port_id: &PortId, timeout: Duration) -> ApiResult<()>;
            async fn get_port_details(&self, port_id: &PortId) -> ApiResult<RemotePortRecord>;
            async fn modify_port(
                &self,
                port_id: &PortId,
                name: &str,
                description: &str,
                marketplace_visibility: bool,
            ) -> ApiResult<bool>;
            async fn lock_port(&self, port_id: &PortId) -> ApiResult<bool>;
            async fn unlock_port(&self, port_id: &PortId) -> ApiResult<bool>;
            async fn delete_port(&self, port_id: &PortId, immediate: bool) -> ApiResult<bool>;
        }
    }

    fn resource(api: MockApi) -> PortResource<MockApi> {
        PortResource::new(Arc::new(api), LifecycleSettings::default())
    }

    fn resource_with_policy(api: MockApi, delete_ports: bool) -> PortResource<MockApi> {
        PortResource::new(
            Arc::new(api),
            LifecycleSettings {
                delete_ports,
                ..LifecycleSettings::default()
            },
        )
    }

    /// Expect location lookup, the wait and the trailing read for port `p1`.
    fn expect_create_tail(api: &mut MockApi) {
        api.expect_resolve_location()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(location_fixtures::sydney()));
        api.expect_wait_for_port_provisioning()
            .withf(|id, _| id.as_str() == "p1")
            .times(1)
            .returning(|_, _| Ok(()));
        api.expect_get_port_details()
            .withf(|id| id.as_str() == "p1")
            .times(1)
            .returning(|_| Ok(record_fixtures::live_port("p1", "edge")));
    }

    fn tracked(uid: &str, name: &str) -> LocalState {
        let mut state = LocalState::from_id(PortId::from(uid));
        state.replace_record(record_fixtures::live_port(uid, name));
        state
    }

    #[tokio::test]
    async fn test_create_single_port() {
        let mut api = MockApi::new();
        expect_create_tail(&mut api);
        api.expect_buy_single_port()
            .withf(|order| {
                order.name == "edge"
                    && order.term == 12
                    && order.port_speed == 1000
                    && order.location_id == 7
                    && order.market_code == "AU"
                    && !order.hide_from_marketplace
            })
            .times(1)
            .returning(|_| Ok(PortId::from("p1")));
        api.expect_buy_zoned_single_port().never();
        api.expect_buy_lag_port().never();
        api.expect_buy_zoned_lag_port().never();

        let mut state = LocalState::new();
        resource(api)
            .create(&port_fixtures::single_port("edge"), &mut state)
            .await
            .unwrap();

        assert_eq!(state.id(), Some(&PortId::from("p1")));
        assert_eq!(state.record().unwrap().provisioning_status, "LIVE");
    }

    #[tokio::test]
    async fn test_create_zoned_single_port() {
        let mut api = MockApi::new();
        expect_create_tail(&mut api);
        api.expect_buy_zoned_single_port()
            .withf(|order, zone| zone == "red" && !order.hide_from_marketplace)
            .times(1)
            .returning(|_, _| Ok(PortId::from("p1")));
        api.expect_buy_single_port().never();

        let mut state = LocalState::new();
        resource(api)
            .create(&port_fixtures::zoned_single_port("edge", "red"), &mut state)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_lag_port_hidden() {
        let mut api = MockApi::new();
        expect_create_tail(&mut api);
        api.expect_buy_lag_port()
            .withf(|order, count| *count == 4 && order.hide_from_marketplace)
            .times(1)
            .returning(|_, _| Ok(PortId::from("p1")));
        api.expect_buy_zoned_lag_port().never();

        let mut desired = port_fixtures::lag_port("edge", 4);
        desired.marketplace_visibility = false;

        let mut state = LocalState::new();
        resource(api).create(&desired, &mut state).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_zoned_lag_port() {
        let mut api = MockApi::new();
        expect_create_tail(&mut api);
        api.expect_buy_zoned_lag_port()
            .withf(|_, count, zone| *count == 2 && zone == "blue")
            .times(1)
            .returning(|_, _, _| Ok(PortId::from("p1")));
        api.expect_buy_lag_port().never();
        api.expect_buy_zoned_single_port().never();

        let mut state = LocalState::new();
        resource(api)
            .create(&port_fixtures::zoned_lag_port("edge", 2, "blue"), &mut state)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_unknown_location_orders_nothing() {
        let mut api = MockApi::new();
        api.expect_resolve_location()
            .returning(|id| Err(ApiError::not_found("location", id)));
        api.expect_buy_single_port().never();

        let mut state = LocalState::new();
        let err = resource(api)
            .create(&port_fixtures::single_port("edge"), &mut state)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PortResourceError::LocationResolution { location_id: 7, .. }
        ));
        assert_eq!(state.id(), None);
    }

    #[tokio::test]
    async fn test_create_provisioning_error_propagates() {
        let mut api = MockApi::new();
        api.expect_resolve_location()
            .returning(|_| Ok(location_fixtures::sydney()));
        api.expect_buy_single_port()
            .times(1)
            .returning(|_| Err(ApiError::status("buy_port", 400, "speed not available")));
        api.expect_wait_for_port_provisioning().never();

        let mut state = LocalState::new();
        let err = resource(api)
            .create(&port_fixtures::single_port("edge"), &mut state)
            .await
            .unwrap_err();

        match err {
            PortResourceError::Provisioning { variant, source, .. } => {
                assert_eq!(variant, "single");
                assert!(matches!(source, ApiError::Status { status: 400, .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(state.id(), None);
    }

    #[tokio::test]
    async fn test_create_binds_id_before_wait() {
        let mut api = MockApi::new();
        let mut seq = Sequence::new();
        api.expect_resolve_location()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(location_fixtures::sydney()));
        api.expect_buy_single_port()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(PortId::from("p1")));
        api.expect_wait_for_port_provisioning()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, timeout| Err(ApiError::timeout("provisioning of port p1", timeout)));
        api.expect_get_port_details().never();

        let mut state = LocalState::new();
        let err = resource(api)
            .create(&port_fixtures::single_port("edge"), &mut state)
            .await
            .unwrap_err();

        assert!(matches!(err, PortResourceError::ProvisioningWait { .. }));
        assert_eq!(state.id(), Some(&PortId::from("p1")));
        assert!(state.record().is_none());
    }

    #[tokio::test]
    async fn test_create_passes_configured_timeout() {
        let mut api = MockApi::new();
        api.expect_resolve_location()
            .returning(|_| Ok(location_fixtures::sydney()));
        api.expect_buy_single_port()
            .returning(|_| Ok(PortId::from("p1")));
        api.expect_wait_for_port_provisioning()
            .withf(|_, timeout| *timeout == Duration::from_secs(60))
            .times(1)
            .returning(|_, _| Ok(()));
        api.expect_get_port_details()
            .returning(|_| Ok(record_fixtures::live_port("p1", "edge")));

        let resource = PortResource::new(
            Arc::new(api),
            LifecycleSettings {
                delete_ports: false,
                provisioning_timeout: Duration::from_secs(60),
            },
        );
        let mut state = LocalState::new();
        resource
            .create(&port_fixtures::single_port("edge"), &mut state)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_rejects_bound_state() {
        let api = MockApi::new();
        let mut state = tracked("p1", "edge");

        let err = resource(api)
            .create(&port_fixtures::single_port("edge"), &mut state)
            .await
            .unwrap_err();
        assert!(matches!(err, PortResourceError::AlreadyCreated { .. }));
    }

    #[tokio::test]
    async fn test_read_replaces_every_field() {
        let mut remote = record_fixtures::live_port("p1", "renamed-remotely");
        remote.locked = true;
        remote.admin_locked = true;
        remote.diversity_zone = "red".to_string();
        remote.lag_id = Some(42);
        let expected = remote.clone();

        let mut api = MockApi::new();
        api.expect_get_port_details()
            .times(2)
            .returning(move |_| Ok(remote.clone()));

        let resource = resource(api);
        let mut state = tracked("p1", "edge");

        resource.read(&mut state).await.unwrap();
        assert_eq!(state.record(), Some(&expected));

        let first = state.clone();
        resource.read(&mut state).await.unwrap();
        assert_eq!(state, first);
        assert_eq!(state.id(), Some(&PortId::from("p1")));
    }

    #[tokio::test]
    async fn test_read_failure_keeps_state() {
        let mut api = MockApi::new();
        api.expect_get_port_details()
            .returning(|id| Err(ApiError::not_found("port", id)));

        let mut state = tracked("p1", "edge");
        let before = state.clone();
        let err = resource(api).read(&mut state).await.unwrap_err();

        assert!(matches!(err, PortResourceError::Fetch { .. }));
        assert!(err.api_error().unwrap().is_not_found());
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn test_read_without_id() {
        let api = MockApi::new();
        let err = resource(api).read(&mut LocalState::new()).await.unwrap_err();
        assert!(matches!(
            err,
            PortResourceError::MissingIdentifier { operation: "read" }
        ));
    }

    #[tokio::test]
    async fn test_update_noop_issues_no_mutations() {
        let mut api = MockApi::new();
        api.expect_modify_port().never();
        api.expect_lock_port().never();
        api.expect_unlock_port().never();
        api.expect_get_port_details()
            .times(1)
            .returning(|_| Ok(record_fixtures::live_port("p1", "edge")));

        let mut state = tracked("p1", "edge");
        resource(api)
            .update(&port_fixtures::single_port("edge"), &mut state)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_rename_only() {
        let mut api = MockApi::new();
        api.expect_modify_port()
            .withf(|id, name, description, visible| {
                id.as_str() == "p1" && name == "renamed" && description.is_empty() && *visible
            })
            .times(1)
            .returning(|_, _, _, _| Ok(true));
        api.expect_lock_port().never();
        api.expect_unlock_port().never();
        api.expect_get_port_details()
            .times(1)
            .returning(|_| Ok(record_fixtures::live_port("p1", "renamed")));

        let mut state = tracked("p1", "edge");
        resource(api)
            .update(&port_fixtures::single_port("renamed"), &mut state)
            .await
            .unwrap();
        assert_eq!(state.record().unwrap().port_name, "renamed");
    }

    #[tokio::test]
    async fn test_update_lock_only() {
        let mut api = MockApi::new();
        api.expect_modify_port().never();
        api.expect_lock_port()
            .times(1)
            .returning(|_| Ok(true));
        api.expect_get_port_details().times(1).returning(|_| {
            let mut record = record_fixtures::live_port("p1", "edge");
            record.locked = true;
            Ok(record)
        });

        let mut desired = port_fixtures::single_port("edge");
        desired.locked = true;

        let mut state = tracked("p1", "edge");
        resource(api).update(&desired, &mut state).await.unwrap();
        assert!(state.record().unwrap().locked);
    }

    #[tokio::test]
    async fn test_update_lock_not_reached() {
        let mut api = MockApi::new();
        api.expect_lock_port().times(1).returning(|_| Ok(false));
        api.expect_get_port_details().never();

        let mut desired = port_fixtures::single_port("edge");
        desired.locked = true;

        let mut state = tracked("p1", "edge");
        let err = resource(api).update(&desired, &mut state).await.unwrap_err();
        assert!(matches!(err, PortResourceError::PortNotLocked { .. }));
    }

    #[tokio::test]
    async fn test_update_unlock_not_reached() {
        let mut api = MockApi::new();
        api.expect_unlock_port().times(1).returning(|_| Ok(false));
        api.expect_lock_port().never();

        let mut state = LocalState::from_id(PortId::from("p1"));
        let mut record = record_fixtures::live_port("p1", "edge");
        record.locked = true;
        state.replace_record(record);

        let err = resource(api)
            .update(&port_fixtures::single_port("edge"), &mut state)
            .await
            .unwrap_err();
        assert!(matches!(err, PortResourceError::PortNotUnlocked { .. }));
    }

    #[tokio::test]
    async fn test_update_lock_call_error() {
        let mut api = MockApi::new();
        api.expect_lock_port()
            .returning(|_| Err(ApiError::network("lock_port", "connection reset")));

        let mut desired = port_fixtures::single_port("edge");
        desired.locked = true;

        let mut state = tracked("p1", "edge");
        let err = resource(api).update(&desired, &mut state).await.unwrap_err();
        assert!(matches!(err, PortResourceError::LockRequest { .. }));
    }

    #[tokio::test]
    async fn test_update_modify_error_aborts_before_lock() {
        let mut api = MockApi::new();
        api.expect_modify_port()
            .times(1)
            .returning(|_, _, _, _| Err(ApiError::status("modify_port", 400, "bad name")));
        api.expect_lock_port().never();
        api.expect_get_port_details().never();

        let mut desired = port_fixtures::single_port("renamed");
        desired.locked = true;

        let mut state = tracked("p1", "edge");
        let before = state.clone();
        let err = resource(api).update(&desired, &mut state).await.unwrap_err();

        assert!(matches!(err, PortResourceError::Modification { .. }));
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn test_delete_with_policy_hard_deletes() {
        let mut api = MockApi::new();
        api.expect_delete_port()
            .with(eq(PortId::from("p1")), eq(true))
            .times(1)
            .returning(|_, _| Ok(true));

        let state = tracked("p1", "edge");
        resource_with_policy(api, true).delete(&state).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_without_policy_cancels() {
        let mut api = MockApi::new();
        api.expect_delete_port()
            .with(eq(PortId::from("p1")), eq(false))
            .times(1)
            .returning(|_, _| Ok(true));

        let state = tracked("p1", "edge");
        resource_with_policy(api, false).delete(&state).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_false_without_error_fails() {
        let mut api = MockApi::new();
        api.expect_delete_port().returning(|_, _| Ok(false));

        let state = tracked("p1", "edge");
        let err = resource_with_policy(api, true)
            .delete(&state)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error deleting resource p1: remote API reported failure"
        );
    }

    #[tokio::test]
    async fn test_cancel_error_names_resource_and_cause() {
        let mut api = MockApi::new();
        api.expect_delete_port()
            .returning(|_, _| Err(ApiError::rejected("delete_port", "port has active services")));

        let state = tracked("p1", "edge");
        let err = resource_with_policy(api, false)
            .delete(&state)
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Error cancelling resource p1: "));
        assert!(message.contains("active services"));
    }

    #[tokio::test]
    async fn test_import_hydrates_from_id() {
        let mut api = MockApi::new();
        api.expect_get_port_details()
            .with(eq(PortId::from("p9")))
            .times(1)
            .returning(|_| Ok(record_fixtures::live_port("p9", "imported")));

        let state = resource(api).import(PortId::from("p9")).await.unwrap();
        assert_eq!(state.id(), Some(&PortId::from("p9")));
        assert_eq!(state.record().unwrap().port_name, "imported");
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = ProviderConfig::default();
        config.lifecycle.delete_ports = true;
        config.lifecycle.provisioning_timeout_secs = 120;

        let settings = LifecycleSettings::from(&config);
        assert!(settings.delete_ports);
        assert_eq!(settings.provisioning_timeout, Duration::from_secs(120));
    }
}
