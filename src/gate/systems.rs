use bevy::prelude::*;

use super::{
    ActivationSink, DeactivateMod, GateController, GateIo, GatedMod, HostProbe, ModInfo,
    NoticeSlot, PayloadFactory, StackRegistry,
};
use crate::{
    config::GateConfig,
    host::{HostCapabilities, HostMods, ModActivated},
};

/// Bridges [`ActivationSink`] onto deferred commands for one gated mod.
struct CommandSink<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    master: Entity,
    factory: &'a dyn PayloadFactory,
}

impl ActivationSink for CommandSink<'_, '_, '_> {
    fn create(&mut self, info: &ModInfo) -> Entity {
        self.factory.create(self.commands, self.master, info)
    }

    fn deactivate(&mut self, payload: Entity) {
        self.factory.deactivate(self.commands, payload);
    }
}

pub(super) fn setup_added_gates(
    mut commands: Commands,
    config: Res<GateConfig>,
    mods: Res<HostMods>,
    capabilities: Res<HostCapabilities>,
    mut added: Query<
        (Entity, &GatedMod, &mut NoticeSlot),
        (Added<GatedMod>, Without<GateController>),
    >,
    all: Query<(Entity, &GatedMod)>,
) {
    let probe = HostProbe::new(&mods, &capabilities);
    for (entity, gated, mut slot) in &mut added {
        if all
            .iter()
            .any(|(other, it)| other != entity && it.info.name == gated.info.name)
        {
            warn!(
                "[{}] another gated mod already uses this name, notices will stack by entity",
                gated.info.name
            );
        }
        let mut gate =
            GateController::new(gated.info.clone(), gated.dependencies.iter().cloned(), &config);
        let mut sink = CommandSink {
            commands: &mut commands,
            master: entity,
            factory: &*gated.payload,
        };
        gate.setup(&mut GateIo {
            probe: &probe,
            notices: &mut *slot,
            sink: &mut sink,
        });
        commands.entity(entity).insert(gate);
    }
}

pub(super) fn forward_mod_activations(
    mut commands: Commands,
    mut messages: MessageReader<ModActivated>,
    mods: Res<HostMods>,
    capabilities: Res<HostCapabilities>,
    mut gates: Query<(Entity, &GatedMod, &mut GateController, &mut NoticeSlot)>,
) {
    let probe = HostProbe::new(&mods, &capabilities);
    for message in messages.read() {
        for (entity, gated, mut gate, mut slot) in &mut gates {
            if !gate.is_listening() {
                continue;
            }
            let mut sink = CommandSink {
                commands: &mut commands,
                master: entity,
                factory: &*gated.payload,
            };
            gate.on_mod_activated(
                &message.id,
                &mut GateIo {
                    probe: &probe,
                    notices: &mut *slot,
                    sink: &mut sink,
                },
            );
        }
    }
}

pub(super) fn tick_gates(
    time: Res<Time>,
    mut commands: Commands,
    mods: Res<HostMods>,
    capabilities: Res<HostCapabilities>,
    mut gates: Query<(Entity, &GatedMod, &mut GateController, &mut NoticeSlot)>,
) {
    let probe = HostProbe::new(&mods, &capabilities);
    for (entity, gated, mut gate, mut slot) in &mut gates {
        if gate.is_torn_down() || !gate.state().is_waiting() {
            continue;
        }
        let mut sink = CommandSink {
            commands: &mut commands,
            master: entity,
            factory: &*gated.payload,
        };
        gate.tick(
            time.delta(),
            &mut GateIo {
                probe: &probe,
                notices: &mut *slot,
                sink: &mut sink,
            },
        );
    }
}

pub(super) fn sync_stack_registry(
    mut registry: ResMut<StackRegistry>,
    slots: Query<(Entity, &GatedMod, &NoticeSlot)>,
) {
    for (entity, gated, slot) in &slots {
        let presenting = slot.is_presenting();
        if registry.is_presenting(&gated.info.name, entity) != presenting {
            registry.set_presenting(&gated.info.name, entity, presenting);
        }
    }
}

pub(super) fn release_stack_entry(
    trigger: On<Remove, GatedMod>,
    gated: Query<&GatedMod>,
    mut registry: ResMut<StackRegistry>,
) {
    if let Ok(gated) = gated.get(trigger.entity) {
        registry.release(&gated.info.name, trigger.entity);
    }
}

pub(super) fn on_deactivate_mod(
    trigger: On<DeactivateMod>,
    mut commands: Commands,
    config: Res<GateConfig>,
    mods: Res<HostMods>,
    capabilities: Res<HostCapabilities>,
    mut gates: Query<(&GatedMod, &mut GateController, &mut NoticeSlot)>,
    mut pending: Query<(&GatedMod, &mut NoticeSlot), Without<GateController>>,
) {
    let entity = trigger.entity;
    let probe = HostProbe::new(&mods, &capabilities);

    // not set up yet: attach a gate that is already torn down so setup never runs
    if let Ok((gated, mut slot)) = pending.get_mut(entity) {
        debug!("[{}] Deactivated before setup", gated.info.name);
        let mut gate =
            GateController::new(gated.info.clone(), gated.dependencies.iter().cloned(), &config);
        let mut sink = CommandSink {
            commands: &mut commands,
            master: entity,
            factory: &*gated.payload,
        };
        gate.teardown(&mut GateIo {
            probe: &probe,
            notices: &mut *slot,
            sink: &mut sink,
        });
        commands.entity(entity).insert(gate);
        return;
    }

    let Ok((gated, mut gate, mut slot)) = gates.get_mut(entity) else {
        debug!("deactivation requested for {entity}, which is not a gated mod");
        return;
    };

    let mut sink = CommandSink {
        commands: &mut commands,
        master: entity,
        factory: &*gated.payload,
    };
    gate.teardown(&mut GateIo {
        probe: &probe,
        notices: &mut *slot,
        sink: &mut sink,
    });
}
