//! HTTP implementation of the provisioning collaborator traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use xconnect_common::{
    ApiError, ApiResult, Location, LocationApi, PortApi, PortId, PortOrder, RemotePortRecord,
};

use crate::config_file::ProviderConfig;
use crate::wire::{
    Envelope, LocationBody, ModifyPortBody, OrderedService, PortBody, PortOrderBody,
};

/// Result of a product action the API understood.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ActionOutcome {
    Accepted,
    /// The API declined; holds its stated reason.
    Refused(String),
}

impl ActionOutcome {
    fn is_accepted(&self) -> bool {
        matches!(self, ActionOutcome::Accepted)
    }
}

/// Client for the port provisioning REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct XconnectClient {
    http: reqwest::Client,
    base_url: String,
    poll_interval: Duration,
}

impl XconnectClient {
    /// Creates a client from the provider configuration.
    pub fn new(config: &ProviderConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::network("build_client", e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            poll_interval: config.poll_interval(),
        })
    }

    /// Sets a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the provisioning status poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and decodes the `data` envelope of a success response.
    async fn call<B, T>(
        &self,
        operation: &str,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(operation, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(operation, status = status.as_u16(), "API call failed: {}", message);
            return Err(ApiError::status(operation, status.as_u16(), message));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::decode(operation, e.to_string()))?;
        Ok(envelope.data)
    }

    /// Posts a product action.
    ///
    /// `409 Conflict` and `422 Unprocessable Entity` mean the request was
    /// understood but the port did not reach the requested state; they come
    /// back as [`ActionOutcome::Refused`] carrying the response body. Any
    /// other failure is an error.
    async fn post_action(&self, operation: &str, path: &str) -> ApiResult<ActionOutcome> {
        let response = self
            .http
            .post(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::network(operation, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(ActionOutcome::Accepted);
        }

        let message = response.text().await.unwrap_or_default();
        match status {
            StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                warn!(operation, status = status.as_u16(), "Action not applied: {}", message);
                Ok(ActionOutcome::Refused(message))
            }
            _ => Err(ApiError::status(operation, status.as_u16(), message)),
        }
    }

    async fn buy(
        &self,
        order: &PortOrder,
        lag_port_count: Option<u32>,
        zone: Option<&str>,
    ) -> ApiResult<PortId> {
        let body = [PortOrderBody::new(order, lag_port_count, zone)];
        let services: Vec<OrderedService> = self
            .call("buy_port", Method::POST, "/v3/networkdesign/buy", Some(&body))
            .await?;

        let service = services
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::decode("buy_port", "order response contained no services"))?;

        info!(
            "Ordered port '{}' at location {} as {}",
            order.name, order.location_id, service.technical_service_uid
        );
        Ok(PortId::new(service.technical_service_uid))
    }
}

#[async_trait]
impl LocationApi for XconnectClient {
    #[instrument(skip(self))]
    async fn resolve_location(&self, location_id: u32) -> ApiResult<Location> {
        let locations: Vec<LocationBody> = self
            .call::<(), _>("get_locations", Method::GET, "/v2/locations", None)
            .await?;

        locations
            .into_iter()
            .find(|location| location.id == location_id)
            .map(Location::from)
            .ok_or_else(|| ApiError::not_found("location", location_id))
    }
}

#[async_trait]
impl PortApi for XconnectClient {
    #[instrument(skip(self, order), fields(name = %order.name))]
    async fn buy_single_port(&self, order: &PortOrder) -> ApiResult<PortId> {
        self.buy(order, None, None).await
    }

    #[instrument(skip(self, order), fields(name = %order.name))]
    async fn buy_zoned_single_port(&self, order: &PortOrder, zone: &str) -> ApiResult<PortId> {
        self.buy(order, None, Some(zone)).await
    }

    #[instrument(skip(self, order), fields(name = %order.name))]
    async fn buy_lag_port(&self, order: &PortOrder, lag_port_count: u32) -> ApiResult<PortId> {
        self.buy(order, Some(lag_port_count), None).await
    }

    #[instrument(skip(self, order), fields(name = %order.name))]
    async fn buy_zoned_lag_port(
        &self,
        order: &PortOrder,
        lag_port_count: u32,
        zone: &str,
    ) -> ApiResult<PortId> {
        self.buy(order, Some(lag_port_count), Some(zone)).await
    }

    #[instrument(skip(self), fields(port = %port_id))]
    async fn wait_for_port_provisioning(
        &self,
        port_id: &PortId,
        timeout: Duration,
    ) -> ApiResult<()> {
        let poll = async {
            loop {
                match self.get_port_details(port_id).await {
                    Ok(record) => {
                        let status = record.status();
                        if status.is_provisioned() {
                            info!("Port {} is {}", port_id, status);
                            return Ok(());
                        }
                        if status.is_terminal() {
                            return Err(ApiError::rejected(
                                "wait_for_port_provisioning",
                                format!("port {} entered {} while provisioning", port_id, status),
                            ));
                        }
                        debug!("Port {} is {}, waiting", port_id, status);
                    }
                    Err(e) if e.is_retryable() => {
                        warn!("Polling port {} failed, will retry: {}", port_id, e);
                    }
                    Err(e) => return Err(e),
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        };

        tokio::time::timeout(timeout, poll)
            .await
            .map_err(|_| ApiError::timeout(format!("provisioning of port {}", port_id), timeout))?
    }

    #[instrument(skip(self), fields(port = %port_id))]
    async fn get_port_details(&self, port_id: &PortId) -> ApiResult<RemotePortRecord> {
        let path = format!("/v2/product/{}", port_id);
        let body: PortBody = self
            .call::<(), _>("get_port_details", Method::GET, &path, None)
            .await
            .map_err(|e| match e {
                ApiError::Status { status: 404, .. } => ApiError::not_found("port", port_id),
                other => other,
            })?;
        Ok(body.into())
    }

    #[instrument(skip(self), fields(port = %port_id))]
    async fn modify_port(
        &self,
        port_id: &PortId,
        name: &str,
        description: &str,
        marketplace_visibility: bool,
    ) -> ApiResult<bool> {
        let path = format!("/v2/product/port/{}", port_id);
        let body = ModifyPortBody {
            name,
            cost_centre: description,
            marketplace_visibility,
        };
        let _: serde_json::Value = self
            .call("modify_port", Method::PUT, &path, Some(&body))
            .await?;
        Ok(true)
    }

    #[instrument(skip(self), fields(port = %port_id))]
    async fn lock_port(&self, port_id: &PortId) -> ApiResult<bool> {
        self.post_action("lock_port", &format!("/v2/product/{}/action/LOCK", port_id))
            .await
            .map(|outcome| outcome.is_accepted())
    }

    #[instrument(skip(self), fields(port = %port_id))]
    async fn unlock_port(&self, port_id: &PortId) -> ApiResult<bool> {
        self.post_action("unlock_port", &format!("/v2/product/{}/action/UNLOCK", port_id))
            .await
            .map(|outcome| outcome.is_accepted())
    }

    #[instrument(skip(self), fields(port = %port_id))]
    async fn delete_port(&self, port_id: &PortId, immediate: bool) -> ApiResult<bool> {
        let action = if immediate { "CANCEL_NOW" } else { "CANCEL" };
        let outcome = self
            .post_action(
                "delete_port",
                &format!("/v3/product/{}/action/{}", port_id, action),
            )
            .await?;

        // A refusal has to reach the caller with the API's reason attached.
        match outcome {
            ActionOutcome::Accepted => Ok(true),
            ActionOutcome::Refused(reason) if reason.trim().is_empty() => Ok(false),
            ActionOutcome::Refused(reason) => Err(ApiError::rejected("delete_port", reason)),
        }
    }
}
