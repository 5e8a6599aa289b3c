//! Change detection between tracked state and desired configuration.

use xconnect_common::{fields, DesiredConfig, RemotePortRecord};

/// The attribute changes an update has to apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortChanges {
    /// Mutable attributes that differ.
    pub changed: Vec<&'static str>,
    /// Order-time attributes that differ from the remote record.
    pub fixed: Vec<&'static str>,
    lock_target: Option<bool>,
}

impl PortChanges {
    /// Compares the record from the last Read against the desired state.
    ///
    /// Without a prior record every mutable attribute is compared against
    /// its zero value.
    pub fn between(prior: Option<&RemotePortRecord>, desired: &DesiredConfig) -> Self {
        let zero = RemotePortRecord::default();
        let record = prior.unwrap_or(&zero);
        let mut changes = PortChanges::default();

        if record.port_name != desired.port_name {
            changes.changed.push(fields::PORT_NAME);
        }
        if record.marketplace_visibility != desired.marketplace_visibility {
            changes.changed.push(fields::MARKETPLACE_VISIBILITY);
        }
        if record.locked != desired.locked {
            changes.changed.push(fields::LOCKED);
            changes.lock_target = Some(desired.locked);
        }

        if prior.is_some() {
            if record.term != desired.term {
                changes.fixed.push(fields::TERM);
            }
            if record.port_speed != desired.port_speed {
                changes.fixed.push(fields::PORT_SPEED);
            }
            if record.location_id != desired.location_id {
                changes.fixed.push(fields::LOCATION_ID);
            }
            if record.diversity_zone != desired.diversity_zone().unwrap_or_default() {
                changes.fixed.push(fields::DIVERSITY_ZONE);
            }
        }

        changes
    }

    /// Returns true if name or visibility changed.
    pub fn needs_modify(&self) -> bool {
        self.changed
            .iter()
            .any(|field| *field == fields::PORT_NAME || *field == fields::MARKETPLACE_VISIBILITY)
    }

    /// Returns the requested lock state if the lock flag changed.
    pub fn lock_target(&self) -> Option<bool> {
        self.lock_target
    }

    /// Returns true if nothing mutable changed.
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}
