use bevy::prelude::*;

use super::HostApiUnavailable;
use crate::host::{ActivationPolicy, HostCapabilities, HostMods};

/// Read-only questions the gate asks about the host environment.
pub trait AvailabilityProbe {
    /// Number of installed copies carrying `id`.
    fn installed_copies(&self, id: &str) -> usize;

    /// Whether the mod's code is resident, regardless of its enabled flag.
    fn is_loaded(&self, id: &str) -> bool;

    fn admin_api_available(&self) -> bool;

    /// True if any installed copy of `id` is enabled. A copy whose query fails
    /// counts as disabled.
    fn is_enabled(&self, id: &str) -> Result<bool, HostApiUnavailable>;
}

/// Probe backed by the host resources.
pub struct HostProbe<'a> {
    mods: &'a HostMods,
    policy: Option<&'a dyn ActivationPolicy>,
}

impl<'a> HostProbe<'a> {
    pub fn new(mods: &'a HostMods, capabilities: &'a HostCapabilities) -> Self {
        Self {
            mods,
            policy: capabilities.activation_policy(),
        }
    }
}

impl AvailabilityProbe for HostProbe<'_> {
    fn installed_copies(&self, id: &str) -> usize {
        self.mods.copies_of(id).count()
    }

    fn is_loaded(&self, id: &str) -> bool {
        self.mods.is_resident(id)
    }

    fn admin_api_available(&self) -> bool {
        self.policy.is_some()
    }

    fn is_enabled(&self, id: &str) -> Result<bool, HostApiUnavailable> {
        let Some(policy) = self.policy else {
            return Err(HostApiUnavailable);
        };

        Ok(self
            .mods
            .copies_of(id)
            .any(|copy| match policy.should_activate(copy) {
                Ok(enabled) => enabled,
                Err(error) => {
                    debug!("{error}");
                    false
                }
            }))
    }
}
