//! HTTP client for the port provisioning API.
//!
//! [`XconnectClient`] implements the [`PortApi`](xconnect_common::PortApi)
//! and [`LocationApi`](xconnect_common::LocationApi) collaborator traits over
//! `reqwest`, and [`ProviderConfig`] loads the provider settings (API endpoint,
//! delete policy, provisioning wait bounds) from TOML.
//!
//! # Endpoints
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | resolve_location | GET | `/v2/locations` |
//! | buy_* | POST | `/v3/networkdesign/buy` |
//! | get_port_details | GET | `/v2/product/{id}` |
//! | modify_port | PUT | `/v2/product/port/{id}` |
//! | lock_port / unlock_port | POST | `/v2/product/{id}/action/LOCK\|UNLOCK` |
//! | delete_port | POST | `/v3/product/{id}/action/CANCEL_NOW\|CANCEL` |
//!
//! # Example
//!
//! ```ignore
//! use xconnect_client::config_file::DEFAULT_CONFIG_PATH;
//! use xconnect_client::{ProviderConfig, XconnectClient};
//!
//! let config = ProviderConfig::load_from(DEFAULT_CONFIG_PATH)?;
//! let client = XconnectClient::new(&config)?;
//! let record = client.get_port_details(&port_id).await?;
//! ```

mod client;
pub mod config_file;
mod wire;

pub use client::XconnectClient;
pub use config_file::{ApiConfig, LifecycleConfig, ProviderConfig};
