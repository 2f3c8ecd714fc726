use bevy::prelude::*;

use crate::gate::Severity;

pub(super) const REFERENCE_HEIGHT: f32 = 1080.0;
pub(super) const MIN_SCALE: f32 = 0.8;

pub(super) const PANEL_WIDTH: f32 = 420.0;
pub(super) const PANEL_HEIGHT: f32 = 140.0;
pub(super) const PANEL_MARGIN: f32 = 20.0;
pub(super) const PANEL_SPACING: f32 = 10.0;

pub(super) const TITLE_FONT_SIZE: f32 = 18.0;
pub(super) const MESSAGE_FONT_SIZE: f32 = 15.0;
pub(super) const TIP_FONT_SIZE: f32 = 14.0;

pub(super) const FATAL_BG: Color = Color::srgb(0.9, 0.2, 0.2);
// dark orange so white text stays readable
pub(super) const WARNING_BG: Color = Color::srgb(0.9, 0.5, 0.0);
pub(super) const TEXT_LIGHT: Color = Color::WHITE;
pub(super) const TEXT_TIP: Color = Color::srgba(1.0, 1.0, 1.0, 0.8);
pub(super) const BORDER_LIGHT: Color = Color::srgba(1.0, 1.0, 1.0, 0.35);
pub(super) const BORDER_DARK: Color = Color::srgba(0.0, 0.0, 0.0, 0.45);

pub(super) fn background(severity: Severity) -> Color {
    match severity {
        Severity::Fatal => FATAL_BG,
        Severity::Warning => WARNING_BG,
    }
}

pub(super) fn border(raised: bool) -> BorderColor {
    let (top_left, bottom_right) = if raised {
        (BORDER_LIGHT, BORDER_DARK)
    } else {
        (BORDER_DARK, BORDER_LIGHT)
    };
    BorderColor {
        top: top_left,
        left: top_left,
        right: bottom_right,
        bottom: bottom_right,
    }
}
