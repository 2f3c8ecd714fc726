use std::time::Duration;

use bevy::prelude::*;

use super::{
    AvailabilityProbe, DependencySet, GateIssue, Notice, NotificationPresenter, Severity,
};
use crate::{
    LOADER_VERSION,
    config::{ApiUnavailablePolicy, GateConfig},
    l10n::Language,
};

/// Identity and display name of a gated mod.
#[derive(Debug, Clone, PartialEq, Eq, Reflect)]
pub struct ModInfo {
    /// Stable per-instance name. Also the stacking key.
    pub name: String,
    pub display_name: String,
}

impl ModInfo {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }
}

/// The payload a gate unlocks.
pub trait ActivationSink {
    fn create(&mut self, info: &ModInfo) -> Entity;

    fn deactivate(&mut self, payload: Entity);
}

/// Collaborators a gate talks to on every step.
pub struct GateIo<'a> {
    pub probe: &'a dyn AvailabilityProbe,
    pub notices: &'a mut dyn NotificationPresenter,
    pub sink: &'a mut dyn ActivationSink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum GateState {
    #[default]
    Uninitialized,
    /// Permanently halted, see [`GateController::halt_reason`].
    FatalMissing,
    WaitingQuiet,
    WaitingVisible,
    Activated,
}

impl GateState {
    pub fn is_waiting(self) -> bool {
        matches!(self, Self::WaitingQuiet | Self::WaitingVisible)
    }
}

/// Dependency gating state machine for one mod instance.
#[derive(Component, Debug)]
pub struct GateController {
    info: ModInfo,
    dependencies: DependencySet,
    state: GateState,
    halt: Option<GateIssue>,
    patience: Timer,
    poll: Option<Timer>,
    listening: bool,
    payload: Option<Entity>,
    torn_down: bool,
    api_unavailable: ApiUnavailablePolicy,
    language: Language,
}

impl GateController {
    pub fn new<I, S>(info: ModInfo, declared: I, config: &GateConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            info,
            dependencies: DependencySet::from_declared(declared),
            state: GateState::Uninitialized,
            halt: None,
            patience: Timer::new(config.patience(), TimerMode::Once),
            poll: config
                .poll_interval()
                .map(|interval| Timer::new(interval, TimerMode::Repeating)),
            listening: false,
            payload: None,
            torn_down: false,
            api_unavailable: config.api_unavailable,
            language: config.language,
        }
    }

    pub fn info(&self) -> &ModInfo {
        &self.info
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn halt_reason(&self) -> Option<&GateIssue> {
        self.halt.as_ref()
    }

    pub fn outstanding(&self) -> &DependencySet {
        &self.dependencies
    }

    /// Subscribed to load-completion broadcasts.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn payload(&self) -> Option<Entity> {
        self.payload
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Initial check. Runs once; later calls are ignored.
    pub fn setup(&mut self, io: &mut GateIo) {
        if self.state != GateState::Uninitialized || self.torn_down {
            return;
        }

        let name = &self.info.name;
        info!("[{name}] Initializing dependency gate v{LOADER_VERSION} ...");

        if self.dependencies.is_empty() {
            self.activate(io);
            return;
        }

        let check_enabled = if io.probe.admin_api_available() {
            true
        } else {
            match self.api_unavailable {
                ApiUnavailablePolicy::Halt => {
                    self.halt(GateIssue::HostApiUnavailable, io);
                    return;
                }
                ApiUnavailablePolicy::Tolerate => {
                    warn!(
                        "[{name}] {}; waiting without checking enabled state",
                        GateIssue::HostApiUnavailable
                    );
                    false
                }
            }
        };

        let mut not_installed = Vec::new();
        let mut disabled = Vec::new();
        for id in self.dependencies.iter() {
            if io.probe.installed_copies(id) == 0 {
                not_installed.push(id.to_string());
                continue;
            }
            if !check_enabled {
                continue;
            }
            if io.probe.is_enabled(id) == Ok(false) {
                disabled.push(id.to_string());
            }
        }

        if !not_installed.is_empty() {
            self.halt(GateIssue::DependencyNotInstalled(not_installed), io);
            return;
        }

        self.state = GateState::WaitingQuiet;
        let had_disabled = !disabled.is_empty();
        if had_disabled {
            self.present(GateIssue::DependencyDisabled(disabled), io);
            self.state = GateState::WaitingVisible;
        }

        self.dependencies.remove_if_available(io.probe);
        if self.dependencies.is_empty() {
            self.activate(io);
            return;
        }

        if !had_disabled {
            info!(
                "[{}] Waiting for load order: {}",
                self.info.name,
                self.dependencies.joined()
            );
        }
        self.listening = true;
    }

    /// Advances the patience timer and re-polls the loaded check.
    pub fn tick(&mut self, delta: Duration, io: &mut GateIo) {
        if self.torn_down || !self.state.is_waiting() {
            return;
        }

        self.patience.tick(delta);
        let poll_due = match &mut self.poll {
            Some(timer) => timer.tick(delta).just_finished(),
            None => true,
        };

        if poll_due {
            let removed = self.dependencies.remove_if_available(io.probe);
            if !removed.is_empty() {
                debug!("[{}] Loaded: {}", self.info.name, removed.join(", "));
            }
            if self.dependencies.is_empty() {
                self.activate(io);
                return;
            }
        }

        if self.state == GateState::WaitingQuiet && self.patience.is_finished() {
            let outstanding = self.dependencies.iter().map(str::to_string).collect();
            self.present(GateIssue::StillLoading(outstanding), io);
            self.state = GateState::WaitingVisible;
        }
    }

    /// Handles a load-completion broadcast. Late or duplicate deliveries no-op.
    pub fn on_mod_activated(&mut self, id: &str, io: &mut GateIo) {
        if !self.listening || self.torn_down || !self.state.is_waiting() {
            return;
        }

        if self.dependencies.remove(id) {
            debug!("[{}] Dependency activated: {id}", self.info.name);
            if self.dependencies.is_empty() {
                self.activate(io);
            }
        }
    }

    /// Host is shutting this mod down. Safe to call repeatedly.
    pub fn teardown(&mut self, io: &mut GateIo) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.listening = false;
        io.notices.clear();

        if let Some(payload) = self.payload.take() {
            info!("[{}] Deactivating payload", self.info.name);
            io.sink.deactivate(payload);
        }
    }

    fn activate(&mut self, io: &mut GateIo) {
        if self.state == GateState::Activated {
            return;
        }
        self.state = GateState::Activated;
        self.listening = false;
        io.notices.clear();

        info!("[{}] Dependencies ready, activating", self.info.name);
        self.payload = Some(io.sink.create(&self.info));
    }

    fn halt(&mut self, issue: GateIssue, io: &mut GateIo) {
        self.present(issue.clone(), io);
        self.state = GateState::FatalMissing;
        self.listening = false;
        self.halt = Some(issue);
    }

    fn present(&self, issue: GateIssue, io: &mut GateIo) {
        let notice = self.notice_for(&issue);
        match notice.severity {
            Severity::Fatal => error!("[{}] {}: {}", self.info.name, notice.title, issue),
            Severity::Warning => warn!("[{}] {}: {}", self.info.name, notice.title, issue),
        }
        io.notices.show(notice);
    }

    fn notice_for(&self, issue: &GateIssue) -> Notice {
        let (title, message) = issue.text_keys();
        let mut text = message.text(self.language).to_string();
        if !issue.identifiers().is_empty() {
            text.push('\n');
            text.push_str(&issue.identifiers().join(", "));
        }

        Notice {
            title: format!("[{}] {}", self.info.display_name, title.text(self.language)),
            message: text,
            severity: issue.severity(),
            owner: self.info.name.clone(),
        }
    }
}
