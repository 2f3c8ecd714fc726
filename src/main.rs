// Support configuring Bevy lints within code.
#![cfg_attr(bevy_lint, feature(register_tool), register_tool(bevy))]
// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

//! Simulated host with a handful of gated mods: one waits on a late
//! dependency, one depends on a disabled library, one on a missing one.
//! Press F10 to tear every mod down.

use bevy::prelude::*;
use dependency_gate::{
    DeactivateMod, DependencyGatePlugin, GateSystems, GatedMod, HostCommandsExt, HostMods,
    InstalledCopy, ManualDeactivate, ModInfo, NoticeUiPlugin,
};

fn main() -> AppExit {
    App::new().add_plugins(AppPlugin).run()
}

pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Window {
                title: "Dependency Gate".to_string(),
                ..default()
            }
            .into(),
            ..default()
        }));

        app.add_plugins((DependencyGatePlugin, NoticeUiPlugin));

        app.insert_resource(simulated_host())
            .insert_resource(LateLoads(vec![LateLoad::new("LateLib", 6.0)]))
            .add_observer(deactivate_example_payload)
            .add_systems(Startup, (spawn_camera, spawn_demo_mods))
            .add_systems(
                Update,
                (
                    load_late_dependencies.before(GateSystems),
                    teardown_on_key,
                ),
            );
    }
}

/// Stands in for whatever the mod actually does once its dependencies are up.
#[derive(Component, Debug)]
struct ExamplePayload;

struct LateLoad {
    id: String,
    timer: Timer,
}

impl LateLoad {
    fn new(id: impl Into<String>, after_secs: f32) -> Self {
        Self {
            id: id.into(),
            timer: Timer::from_seconds(after_secs, TimerMode::Once),
        }
    }
}

/// Host mods that finish loading some time after startup.
#[derive(Resource)]
struct LateLoads(Vec<LateLoad>);

fn simulated_host() -> HostMods {
    let mut mods = HostMods::default();
    mods.install(InstalledCopy::local("CoreLib"))
        .install(InstalledCopy::workshop("LateLib", 3613297900))
        .install(InstalledCopy::local("OldLib").enabled(false))
        .install(InstalledCopy::workshop("OldLib", 3589079671).enabled(false));
    mods.mark_resident("CoreLib");
    mods
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("Camera"), Camera2d));
}

fn spawn_demo_mods(mut commands: Commands) {
    commands.spawn((
        Name::new("ModTemplate"),
        GatedMod::with_payload_fn(
            ModInfo::new("ModTemplate").display_name("Mod Template"),
            ["CoreLib", "LateLib"],
            spawn_example_payload,
        ),
    ));
    commands.spawn((
        Name::new("ModNeedsOldLib"),
        GatedMod::with_payload_fn(
            ModInfo::new("ModNeedsOldLib"),
            ["CoreLib", "OldLib"],
            spawn_example_payload,
        ),
    ));
    commands.spawn((
        Name::new("ModMissingLibs"),
        GatedMod::with_payload_fn(
            ModInfo::new("ModMissingLibs"),
            ["MissingLib1", "MissingLib2"],
            spawn_example_payload,
        ),
    ));
}

fn spawn_example_payload(commands: &mut Commands, master: Entity, info: &ModInfo) -> Entity {
    info!("[{}] payload up", info.name);
    commands
        .spawn((
            Name::new(format!("{} payload", info.name)),
            ExamplePayload,
            ChildOf(master),
        ))
        .id()
}

fn deactivate_example_payload(
    trigger: On<ManualDeactivate>,
    payloads: Query<&Name, With<ExamplePayload>>,
    mut commands: Commands,
) {
    let Ok(name) = payloads.get(trigger.entity) else {
        return;
    };
    info!("{name} deactivated");
    commands.entity(trigger.entity).despawn();
}

fn load_late_dependencies(
    time: Res<Time>,
    mut loads: ResMut<LateLoads>,
    mut commands: Commands,
) {
    for load in &mut loads.0 {
        if !load.timer.tick(time.delta()).just_finished() {
            continue;
        }
        let handle = commands
            .spawn(Name::new(format!("{} (host mod)", load.id)))
            .id();
        info!("host finished loading {}", load.id);
        commands.activate_host_mod(load.id.clone(), handle);
    }
}

fn teardown_on_key(
    keys: Res<ButtonInput<KeyCode>>,
    gated: Query<Entity, With<GatedMod>>,
    mut commands: Commands,
) {
    if !keys.just_pressed(KeyCode::F10) {
        return;
    }
    for entity in &gated {
        commands.trigger(DeactivateMod { entity });
    }
}
