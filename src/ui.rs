// notice ui plugin definition and reexports

pub(super) mod notice_panel;
pub(super) mod theme;

use bevy::prelude::*;
pub use notice_panel::{NoticeLayout, NoticePanel, notice_layout};

use crate::gate::GateSystems;

/// Draws each gated mod's live notice as a clickable panel in the bottom-right
/// corner, stacked by [`crate::gate::StackRegistry`] rank.
pub struct NoticeUiPlugin;

impl Plugin for NoticeUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<notice_panel::NoticePanels>().add_systems(
            Update,
            (
                notice_panel::handle_notice_clicks,
                notice_panel::sync_notice_panels,
                notice_panel::layout_notice_panels,
            )
                .chain()
                .after(GateSystems),
        );
    }
}
