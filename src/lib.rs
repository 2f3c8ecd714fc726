// Support configuring Bevy lints within code.
#![cfg_attr(bevy_lint, feature(register_tool), register_tool(bevy))]

pub mod config;
pub mod gate;
pub mod host;
pub mod l10n;
pub mod ui;

pub use config::{ApiUnavailablePolicy, GateConfig};
pub use gate::{DeactivateMod, DependencyGatePlugin, GateSystems, GatedMod, ManualDeactivate, ModInfo};
pub use host::{HostCapabilities, HostCommandsExt, HostMods, InstalledCopy, ModActivated};
pub use ui::NoticeUiPlugin;

/// Version of the gating code, logged when a gate starts up.
pub const LOADER_VERSION: &str = "1.0.0";
