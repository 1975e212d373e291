//! Render-only presentation (requires DefaultPlugins).

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::prefs::Preferences;

use super::{DirectionArrow, HudReadout, PresentationSet, TetherLine};

const HUD_FONT_SIZE: f32 = 22.0;
const ARROW_LENGTH: f32 = 0.8;

#[derive(Component)]
struct HudText;

#[derive(Component)]
struct ArrowToggleText;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnEnter(GameState::Dead), spawn_death_menu)
        .add_systems(
            PostUpdate,
            (draw_tether, draw_direction_arrow, refresh_hud_text)
                .after(PresentationSet)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(Update, refresh_arrow_toggle_text.run_if(in_state(GameState::Dead)));
}

fn draw_tether(tether: Res<TetherLine>, mut gizmos: Gizmos) {
    if tether.visible {
        gizmos.line_2d(tether.from, tether.to, Color::srgb(0.85, 0.85, 0.8));
    }
}

fn draw_direction_arrow(arrow: Res<DirectionArrow>, mut gizmos: Gizmos) {
    if arrow.visible {
        gizmos.arrow_2d(
            arrow.origin,
            arrow.origin + arrow.direction * ARROW_LENGTH,
            Color::srgb(1.0, 0.8, 0.2),
        );
    }
}

fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            DespawnOnExit(GameState::InGame),
        ))
        .with_children(|parent| {
            parent.spawn((
                HudText,
                Text::new("0\n0.0"),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.88, 0.45)),
            ));
        });
}

fn refresh_hud_text(hud: Res<HudReadout>, mut q_text: Query<&mut Text, With<HudText>>) {
    if !hud.is_changed() {
        return;
    }
    for mut text in &mut q_text {
        *text = Text::new(format!("{}\n{:.1}", hud.height, hud.speed));
    }
}

fn arrow_toggle_label(prefs: &Preferences) -> String {
    let verb = if prefs.show_direction_arrow { "HIDE" } else { "SHOW" };
    format!("[A] {verb} ARROW")
}

fn spawn_death_menu(mut commands: Commands, hud: Res<HudReadout>, prefs: Res<Preferences>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(12.0),
                ..default()
            },
            DespawnOnExit(GameState::Dead),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(format!("YOU FELL FROM {}", hud.height)),
                TextFont {
                    font_size: HUD_FONT_SIZE * 2.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.3, 0.3)),
            ));
            parent.spawn((
                Text::new("[R] / CLICK  PLAY AGAIN"),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                ArrowToggleText,
                Text::new(arrow_toggle_label(&prefs)),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

fn refresh_arrow_toggle_text(
    prefs: Res<Preferences>,
    mut q_text: Query<&mut Text, With<ArrowToggleText>>,
) {
    if !prefs.is_changed() {
        return;
    }
    for mut text in &mut q_text {
        *text = Text::new(arrow_toggle_label(&prefs));
    }
}
