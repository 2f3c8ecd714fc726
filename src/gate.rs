//! Dependency gating: hold a mod's payload back until every declared
//! dependency is loaded, and tell the player why it is waiting.
//!
//! quick start:
//! ```no_run
//! # use bevy::prelude::*;
//! # use dependency_gate::gate::{GatedMod, ModInfo};
//! # let mut commands: Commands = todo!();
//! commands.spawn(GatedMod::with_payload_fn(
//!     ModInfo::new("ModTemplate"),
//!     ["JmcModLib"],
//!     |commands, master, info| {
//!         commands
//!             .spawn((Name::new(format!("{} payload", info.name)), ChildOf(master)))
//!             .id()
//!     },
//! ));
//! ```

mod controller;
mod dependency_set;
mod error;
mod notice;
pub(crate) mod probe;
mod stack;
mod systems;

use bevy::prelude::*;

pub use controller::{ActivationSink, GateController, GateIo, GateState, ModInfo};
pub use dependency_set::DependencySet;
pub use error::{GateIssue, HostApiUnavailable, ProbeQueryFailure};
pub use notice::{Notice, NoticeSlot, NotificationPresenter, Severity};
pub use probe::{AvailabilityProbe, HostProbe};
pub use stack::StackRegistry;

use crate::{
    config::GateConfig,
    host::{HostCapabilities, HostMods, ModActivated},
};

pub struct DependencyGatePlugin;

impl Plugin for DependencyGatePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<GateConfig>() {
            app.insert_resource(GateConfig::load_or_default());
        }

        app.init_resource::<HostMods>()
            .init_resource::<HostCapabilities>()
            .init_resource::<StackRegistry>()
            .add_message::<ModActivated>()
            .add_observer(systems::on_deactivate_mod)
            .add_observer(systems::release_stack_entry)
            .add_systems(
                Update,
                (
                    systems::setup_added_gates,
                    systems::forward_mod_activations,
                    systems::tick_gates,
                    systems::sync_stack_registry,
                )
                    .chain()
                    .in_set(GateSystems),
            );
    }
}

/// Everything the gate runs in `Update`. Order payload systems after it to see
/// activations from the same frame.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct GateSystems;

/// Builds the payload once gating succeeds.
pub trait PayloadFactory: Send + Sync + 'static {
    /// `master` is the gated mod's entity.
    fn create(&self, commands: &mut Commands, master: Entity, info: &ModInfo) -> Entity;

    fn deactivate(&self, commands: &mut Commands, payload: Entity) {
        commands.trigger(ManualDeactivate { entity: payload });
    }
}

struct PayloadFn<F>(F);

impl<F> PayloadFactory for PayloadFn<F>
where
    F: Fn(&mut Commands, Entity, &ModInfo) -> Entity + Send + Sync + 'static,
{
    fn create(&self, commands: &mut Commands, master: Entity, info: &ModInfo) -> Entity {
        (self.0)(commands, master, info)
    }
}

/// A mod whose payload waits on its dependencies. The gate itself is attached
/// as a [`GateController`] on the same entity during the next update.
#[derive(Component)]
#[require(NoticeSlot)]
pub struct GatedMod {
    pub info: ModInfo,
    pub dependencies: Vec<String>,
    payload: Box<dyn PayloadFactory>,
}

impl GatedMod {
    pub fn new<I, S>(info: ModInfo, dependencies: I, payload: impl PayloadFactory) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            info,
            dependencies: dependencies.into_iter().map(Into::into).collect(),
            payload: Box::new(payload),
        }
    }

    pub fn with_payload_fn<I, S, F>(info: ModInfo, dependencies: I, create: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&mut Commands, Entity, &ModInfo) -> Entity + Send + Sync + 'static,
    {
        Self::new(info, dependencies, PayloadFn(create))
    }
}

/// Host-triggered teardown of a gated mod.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct DeactivateMod {
    pub entity: Entity,
}

/// Sent to an activated payload when its gated mod is torn down.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct ManualDeactivate {
    pub entity: Entity,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::host::{HostCommandsExt, InstalledCopy};

    #[derive(Component)]
    struct TestPayload;

    #[derive(Resource, Default)]
    struct Deactivated(usize);

    fn app(patience_secs: f32) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(GateConfig {
                patience_secs,
                ..default()
            })
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
                100,
            )))
            .add_plugins(DependencyGatePlugin);
        app
    }

    fn gated(name: &str, dependencies: &[&str]) -> GatedMod {
        GatedMod::with_payload_fn(
            ModInfo::new(name),
            dependencies.iter().copied(),
            |commands, master, _info| commands.spawn((TestPayload, ChildOf(master))).id(),
        )
    }

    fn state(app: &App, entity: Entity) -> GateState {
        app.world().get::<GateController>(entity).unwrap().state()
    }

    fn payloads(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<(), With<TestPayload>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn plugin_adds() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(DependencyGatePlugin);
        app.update();
    }

    #[test]
    fn late_broadcast_activates_and_clears_wait_notice() {
        let mut app = app(0.5);
        app.world_mut()
            .resource_mut::<HostMods>()
            .install(InstalledCopy::workshop("Lib1", 3613297900));
        let entity = app.world_mut().spawn(gated("ModA", &["Lib1"])).id();

        app.update();
        assert_eq!(state(&app, entity), GateState::WaitingQuiet);

        for _ in 0..10 {
            app.update();
        }
        assert_eq!(state(&app, entity), GateState::WaitingVisible);
        assert_eq!(app.world().resource::<StackRegistry>().rank("ModA", entity), Some(0));

        app.world_mut()
            .commands()
            .activate_host_mod("Lib1", Entity::PLACEHOLDER);
        app.world_mut().flush();
        app.update();

        assert_eq!(state(&app, entity), GateState::Activated);
        assert_eq!(payloads(&mut app), 1);
        assert!(app.world().get::<NoticeSlot>(entity).unwrap().notice().is_none());
        assert_eq!(app.world().resource::<StackRegistry>().rank("ModA", entity), None);

        for _ in 0..5 {
            app.update();
        }
        assert_eq!(payloads(&mut app), 1);
    }

    #[test]
    fn simultaneous_notices_stack_by_name() {
        let mut app = app(5.0);
        let mod_b = app.world_mut().spawn(gated("ModB", &["Missing"])).id();
        let mod_a = app.world_mut().spawn(gated("ModA", &["Missing"])).id();

        app.update();

        assert_eq!(state(&app, mod_a), GateState::FatalMissing);
        let registry = app.world().resource::<StackRegistry>();
        assert_eq!(registry.rank("ModA", mod_a), Some(0));
        assert_eq!(registry.rank("ModB", mod_b), Some(1));

        app.world_mut().entity_mut(mod_a).despawn();
        app.update();
        assert_eq!(app.world().resource::<StackRegistry>().rank("ModB", mod_b), Some(0));

        app.world_mut()
            .get_mut::<NoticeSlot>(mod_b)
            .unwrap()
            .dismiss();
        app.update();
        assert_eq!(app.world().resource::<StackRegistry>().rank("ModB", mod_b), None);
        assert_eq!(state(&app, mod_b), GateState::FatalMissing);
    }

    #[test]
    fn teardown_deactivates_the_payload_once() {
        let mut app = app(5.0);
        app.init_resource::<Deactivated>().add_observer(
            |_trigger: On<ManualDeactivate>, mut count: ResMut<Deactivated>| count.0 += 1,
        );
        let entity = app.world_mut().spawn(gated("ModA", &[])).id();
        app.update();
        assert_eq!(state(&app, entity), GateState::Activated);

        app.world_mut().trigger(DeactivateMod { entity });
        app.world_mut().trigger(DeactivateMod { entity });
        app.world_mut().flush();
        app.update();

        assert_eq!(app.world().resource::<Deactivated>().0, 1);
        assert!(app.world().get::<GateController>(entity).unwrap().is_torn_down());
    }

    #[test]
    fn teardown_before_setup_keeps_the_payload_down() {
        let mut app = app(5.0);
        {
            let mut mods = app.world_mut().resource_mut::<HostMods>();
            mods.install(InstalledCopy::local("Lib1"));
            mods.mark_resident("Lib1");
        }
        let entity = app.world_mut().spawn(gated("ModA", &["Lib1"])).id();

        app.world_mut().trigger(DeactivateMod { entity });
        app.world_mut().flush();
        for _ in 0..3 {
            app.update();
        }

        let gate = app.world().get::<GateController>(entity).unwrap();
        assert!(gate.is_torn_down());
        assert_eq!(gate.state(), GateState::Uninitialized);
        assert_eq!(payloads(&mut app), 0);
        assert!(app.world().get::<NoticeSlot>(entity).unwrap().notice().is_none());
    }

    #[test]
    fn mods_sharing_a_name_stack_separately() {
        let mut app = app(5.0);
        let first = app.world_mut().spawn(gated("ModA", &["Missing"])).id();
        let second = app.world_mut().spawn(gated("ModA", &["Missing"])).id();

        app.update();
        app.update();

        let registry = app.world().resource::<StackRegistry>();
        assert_eq!(registry.presenting().count(), 2);
        let ranks = [registry.rank("ModA", first), registry.rank("ModA", second)];
        assert!(ranks.contains(&Some(0)));
        assert!(ranks.contains(&Some(1)));
    }

    #[test]
    fn teardown_while_waiting_ignores_later_broadcasts() {
        let mut app = app(0.2);
        app.world_mut()
            .resource_mut::<HostMods>()
            .install(InstalledCopy::local("Lib1"));
        let entity = app.world_mut().spawn(gated("ModA", &["Lib1"])).id();
        app.update();

        app.world_mut().trigger(DeactivateMod { entity });
        app.world_mut()
            .commands()
            .activate_host_mod("Lib1", Entity::PLACEHOLDER);
        app.world_mut().flush();
        for _ in 0..5 {
            app.update();
        }

        assert_eq!(state(&app, entity), GateState::WaitingQuiet);
        assert_eq!(payloads(&mut app), 0);
        assert!(app.world().get::<NoticeSlot>(entity).unwrap().notice().is_none());
    }
}
