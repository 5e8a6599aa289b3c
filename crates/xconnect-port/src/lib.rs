//! Lifecycle controller for a physical network port resource.
//!
//! Translates a declarative [`DesiredConfig`](xconnect_common::DesiredConfig)
//! into remote provisioning calls and mirrors the authoritative remote record
//! back into [`LocalState`](xconnect_common::LocalState).
//!
//! # Operations
//!
//! | Operation | Remote calls |
//! |-----------|--------------|
//! | Create | resolve location, buy (one of four variants), wait, read |
//! | Read | get port details |
//! | Update | modify (name/visibility), lock or unlock, read |
//! | Delete | delete (immediate) or cancel, per policy |
//! | Import | get port details |
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use xconnect_client::config_file::DEFAULT_CONFIG_PATH;
//! use xconnect_client::{ProviderConfig, XconnectClient};
//! use xconnect_port::{LifecycleSettings, PortResource};
//!
//! let config = ProviderConfig::load_from(DEFAULT_CONFIG_PATH)?;
//! let client = Arc::new(XconnectClient::new(&config)?);
//! let resource = PortResource::new(client, LifecycleSettings::from(&config));
//! resource.create(&desired, &mut state).await?;
//! ```

mod changes;
mod port_resource;
mod provisioning;
pub mod state_file;

pub use changes::PortChanges;
pub use port_resource::{LifecycleSettings, PortResource};
pub use provisioning::ProvisioningVariant;
pub use state_file::{read_desired, StateFile, StateFileError};
