use std::collections::HashMap;

use bevy::{
    prelude::*,
    text::{Justify, LineBreak, TextLayout},
    window::PrimaryWindow,
};

use super::theme;
use crate::{
    config::GateConfig,
    gate::{GatedMod, Notice, NoticeSlot, NotificationPresenter, StackRegistry},
    l10n::TextKey,
};

/// Root of one notice panel. Clicking it dismisses the owner's notice.
#[derive(Component, Debug, Clone, Copy)]
pub struct NoticePanel {
    pub owner: Entity,
}

#[derive(Component, Debug, Clone, Copy)]
pub(super) struct NoticeText {
    base_font_size: f32,
}

#[derive(Debug, Clone)]
struct PanelEntry {
    root: Entity,
    notice: Notice,
}

#[derive(Resource, Default, Debug)]
pub(super) struct NoticePanels {
    entries: HashMap<Entity, PanelEntry>,
}

/// Screen-space placement of a panel, in logical pixels from the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoticeLayout {
    pub scale: f32,
    pub width: f32,
    pub height: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Panels grow with the window (1080p reference) and stack upward by rank.
pub fn notice_layout(rank: usize, window_height: f32) -> NoticeLayout {
    let scale = (window_height / theme::REFERENCE_HEIGHT).max(theme::MIN_SCALE);
    let width = theme::PANEL_WIDTH * scale;
    let height = theme::PANEL_HEIGHT * scale;
    let margin = theme::PANEL_MARGIN * scale;
    let spacing = theme::PANEL_SPACING * scale;

    NoticeLayout {
        scale,
        width,
        height,
        right: margin,
        bottom: margin + rank as f32 * (height + spacing),
    }
}

pub(super) fn handle_notice_clicks(
    interactions: Query<(&Interaction, &NoticePanel), Changed<Interaction>>,
    mut slots: Query<&mut NoticeSlot>,
) {
    for (interaction, panel) in &interactions {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if let Ok(mut slot) = slots.get_mut(panel.owner) {
            slot.dismiss();
        }
    }
}

pub(super) fn sync_notice_panels(
    mut commands: Commands,
    mut panels: ResMut<NoticePanels>,
    config: Res<GateConfig>,
    slots: Query<(Entity, &NoticeSlot)>,
    roots: Query<(), With<NoticePanel>>,
) {
    for (owner, slot) in &slots {
        let live = slot.notice().filter(|_| slot.is_presenting());
        let current = panels.entries.get(&owner).map(|entry| &entry.notice);
        if live == current {
            continue;
        }

        if let Some(entry) = panels.entries.remove(&owner) {
            close_panel(&mut commands, entry.root, &roots);
        }
        if let Some(notice) = live {
            let root = open_panel(&mut commands, owner, notice, &config);
            panels.entries.insert(
                owner,
                PanelEntry {
                    root,
                    notice: notice.clone(),
                },
            );
        }
    }

    // owners that were despawned outright
    let stale: Vec<Entity> = panels
        .entries
        .keys()
        .copied()
        .filter(|owner| !slots.contains(*owner))
        .collect();
    for owner in stale {
        if let Some(entry) = panels.entries.remove(&owner) {
            close_panel(&mut commands, entry.root, &roots);
        }
    }
}

pub(super) fn layout_notice_panels(
    registry: Res<StackRegistry>,
    windows: Query<&Window, With<PrimaryWindow>>,
    gates: Query<&GatedMod>,
    mut panels: Query<(&NoticePanel, &mut Node, &Children)>,
    mut texts: Query<(&NoticeText, &mut TextFont)>,
) {
    let window_height = windows
        .single()
        .map(|window| window.resolution.height())
        .unwrap_or(theme::REFERENCE_HEIGHT);

    for (panel, mut node, children) in &mut panels {
        let rank = gates
            .get(panel.owner)
            .ok()
            .and_then(|gated| registry.rank(&gated.info.name, panel.owner))
            .unwrap_or(0);
        let layout = notice_layout(rank, window_height);

        let right = Val::Px(layout.right);
        let bottom = Val::Px(layout.bottom);
        if node.right != right || node.bottom != bottom || node.width != Val::Px(layout.width) {
            node.right = right;
            node.bottom = bottom;
            node.width = Val::Px(layout.width);
            node.height = Val::Px(layout.height);
            node.padding = UiRect::new(
                Val::Px(15.0 * layout.scale),
                Val::Px(15.0 * layout.scale),
                Val::Px(8.0 * layout.scale),
                Val::Px(8.0 * layout.scale),
            );
        }

        for child in children.iter() {
            let Ok((text, mut font)) = texts.get_mut(child) else {
                continue;
            };
            let font_size = (text.base_font_size * layout.scale).round();
            if font.font_size != font_size {
                font.font_size = font_size;
            }
        }
    }
}

fn open_panel(
    commands: &mut Commands,
    owner: Entity,
    notice: &Notice,
    config: &GateConfig,
) -> Entity {
    let layout = notice_layout(0, theme::REFERENCE_HEIGHT);

    commands
        .spawn((
            Name::new(format!("Notice Panel ({})", notice.owner)),
            NoticePanel { owner },
            Button,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(layout.right),
                bottom: Val::Px(layout.bottom),
                width: Val::Px(layout.width),
                height: Val::Px(layout.height),
                border: UiRect::all(Val::Px(2.0)),
                padding: UiRect::new(Val::Px(15.0), Val::Px(15.0), Val::Px(8.0), Val::Px(8.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(theme::background(notice.severity)),
            theme::border(true),
            GlobalZIndex(9999),
        ))
        .with_children(|panel| {
            panel.spawn(notice_text(
                notice.title.clone(),
                theme::TITLE_FONT_SIZE,
                theme::TEXT_LIGHT,
                Justify::Left,
            ));
            panel
                .spawn(notice_text(
                    notice.message.clone(),
                    theme::MESSAGE_FONT_SIZE,
                    theme::TEXT_LIGHT,
                    Justify::Left,
                ))
                .insert(Node {
                    flex_grow: 1.0,
                    ..default()
                });
            panel
                .spawn(notice_text(
                    TextKey::CloseButton.text(config.language),
                    theme::TIP_FONT_SIZE,
                    theme::TEXT_TIP,
                    Justify::Right,
                ))
                .insert(Node {
                    align_self: AlignSelf::End,
                    ..default()
                });
        })
        .id()
}

fn notice_text(
    text: impl Into<String>,
    font_size: f32,
    color: Color,
    justify: Justify,
) -> impl Bundle {
    (
        NoticeText {
            base_font_size: font_size,
        },
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
        TextLayout::new(justify, LineBreak::WordBoundary),
    )
}

fn close_panel(commands: &mut Commands, root: Entity, roots: &Query<(), With<NoticePanel>>) {
    if roots.contains(root) {
        commands.entity(root).despawn();
    }
}
