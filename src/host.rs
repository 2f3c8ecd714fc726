//! The host side of the contract: which mods are installed, which of them are
//! resident in the process, and the activation broadcast.

use std::collections::HashSet;

use bevy::prelude::*;

use crate::gate::ProbeQueryFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum CopySource {
    Local,
    Workshop(u64),
}

/// One installed copy of a mod. Several copies may share an id, e.g. a local
/// build next to the workshop release.
#[derive(Debug, Clone, PartialEq, Eq, Reflect)]
pub struct InstalledCopy {
    pub id: String,
    pub source: CopySource,
    /// The checkbox in the host's mod list.
    pub enabled: bool,
}

impl InstalledCopy {
    pub fn local(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: CopySource::Local,
            enabled: true,
        }
    }

    pub fn workshop(id: impl Into<String>, workshop_id: u64) -> Self {
        Self {
            id: id.into(),
            source: CopySource::Workshop(workshop_id),
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[derive(Resource, Debug, Default)]
pub struct HostMods {
    installed: Vec<InstalledCopy>,
    resident: HashSet<String>,
}

impl HostMods {
    pub fn install(&mut self, copy: InstalledCopy) -> &mut Self {
        self.installed.push(copy);
        self
    }

    pub fn installed(&self) -> &[InstalledCopy] {
        &self.installed
    }

    pub fn copies_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a InstalledCopy> {
        self.installed.iter().filter(move |copy| copy.id == id)
    }

    pub fn is_resident(&self, id: &str) -> bool {
        self.resident.contains(id)
    }

    /// Records that a mod's code is now loaded. Returns false if it already was.
    pub fn mark_resident(&mut self, id: impl Into<String>) -> bool {
        self.resident.insert(id.into())
    }
}

/// Broadcast by the host whenever a mod finishes activating.
#[derive(Message, Debug, Clone)]
pub struct ModActivated {
    pub id: String,
    pub handle: Entity,
}

/// The host's own answer to "should this copy be activated".
pub trait ActivationPolicy: Send + Sync + 'static {
    fn should_activate(&self, copy: &InstalledCopy) -> Result<bool, ProbeQueryFailure>;
}

/// Trusts the enabled flag recorded on each installed copy.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestPolicy;

impl ActivationPolicy for ManifestPolicy {
    fn should_activate(&self, copy: &InstalledCopy) -> Result<bool, ProbeQueryFailure> {
        Ok(copy.enabled)
    }
}

/// Optional host APIs. A missing activation policy means the host cannot answer
/// whether a mod is enabled at all.
#[derive(Resource)]
pub struct HostCapabilities {
    activation_policy: Option<Box<dyn ActivationPolicy>>,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self::with_policy(ManifestPolicy)
    }
}

impl HostCapabilities {
    pub fn with_policy(policy: impl ActivationPolicy) -> Self {
        Self {
            activation_policy: Some(Box::new(policy)),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            activation_policy: None,
        }
    }

    pub fn activation_policy(&self) -> Option<&dyn ActivationPolicy> {
        self.activation_policy.as_deref()
    }
}

pub trait HostCommandsExt {
    /// Marks `id` resident and broadcasts [`ModActivated`].
    fn activate_host_mod(&mut self, id: impl Into<String>, handle: Entity);
}

impl HostCommandsExt for Commands<'_, '_> {
    fn activate_host_mod(&mut self, id: impl Into<String>, handle: Entity) {
        let id = id.into();
        self.queue(move |world: &mut World| {
            if let Some(mut mods) = world.get_resource_mut::<HostMods>() {
                mods.mark_resident(id.clone());
            }
            world.write_message(ModActivated { id, handle });
        });
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::message::Messages;

    use super::*;

    #[test]
    fn copies_are_matched_by_exact_id() {
        let mut mods = HostMods::default();
        mods.install(InstalledCopy::local("Lib1"))
            .install(InstalledCopy::workshop("Lib1", 3613297900).enabled(false))
            .install(InstalledCopy::local("lib1"));

        assert_eq!(mods.copies_of("Lib1").count(), 2);
        assert_eq!(mods.copies_of("Lib").count(), 0);
    }

    #[test]
    fn marking_resident_twice_is_reported() {
        let mut mods = HostMods::default();
        assert!(mods.mark_resident("Lib1"));
        assert!(!mods.mark_resident("Lib1"));
        assert!(mods.is_resident("Lib1"));
    }

    #[test]
    fn activate_host_mod_marks_resident_and_broadcasts() {
        let mut app = App::new();
        app.init_resource::<HostMods>().add_message::<ModActivated>();

        app.world_mut()
            .commands()
            .activate_host_mod("Lib1", Entity::PLACEHOLDER);
        app.world_mut().flush();

        assert!(app.world().resource::<HostMods>().is_resident("Lib1"));
        let messages = app.world().resource::<Messages<ModActivated>>();
        assert_eq!(messages.len(), 1);
    }
}
