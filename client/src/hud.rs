//! On-screen HUD: ammo, stamina and stance, plus a centre crosshair.

use bevy::prelude::*;
use gameplay::{GunController, PlayerController, Stance};

use crate::states::GameState;

/// HUD root node
#[derive(Component)]
pub struct Hud;

#[derive(Component)]
pub struct AmmoText;

#[derive(Component)]
pub struct StaminaText;

#[derive(Component)]
pub struct StanceText;

#[derive(Component)]
pub struct PausedText;

fn stance_label(stance: Stance) -> &'static str {
    match stance {
        Stance::Standing => "Standing",
        Stance::Crouching => "Crouching",
        Stance::TransitioningToCrouch(_) => "Crouching...",
        Stance::TransitioningToStand(_) => "Standing up...",
    }
}

fn text_bundle(text: &str, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

/// Spawn the HUD
pub fn spawn_hud(mut commands: Commands) {
    // Ammo at bottom-right
    commands
        .spawn((
            Hud,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(20.0),
                bottom: Val::Px(20.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::End,
                row_gap: Val::Px(5.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                AmmoText,
                text_bundle("30 / 90", 32.0, Color::srgba(1.0, 0.9, 0.6, 1.0)),
            ));
            parent.spawn(text_bundle(
                "[LMB] Fire  [RMB] Aim  [R] Reload",
                12.0,
                Color::srgba(0.7, 0.7, 0.7, 0.6),
            ));
        });

    // Stamina and stance at bottom-left
    commands
        .spawn((
            Hud,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                bottom: Val::Px(20.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                StaminaText,
                text_bundle("Stamina 100%", 24.0, Color::srgba(0.6, 1.0, 0.6, 0.9)),
            ));
            parent.spawn((
                StanceText,
                text_bundle("Standing", 18.0, Color::srgba(1.0, 1.0, 1.0, 0.8)),
            ));
        });

    // Crosshair
    commands
        .spawn((
            Hud,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Px(4.0),
                    height: Val::Px(4.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.8)),
            ));
        });

    commands.spawn((
        PausedText,
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(20.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        Visibility::Hidden,
        text_bundle("PAUSED  [Esc] Resume", 28.0, Color::WHITE),
    ));
}

/// Update HUD text from the controllers
pub fn update_hud(
    players: Query<&PlayerController>,
    guns: Query<&GunController>,
    mut ammo_text: Query<&mut Text, (With<AmmoText>, Without<StaminaText>, Without<StanceText>)>,
    mut stamina_text: Query<&mut Text, (With<StaminaText>, Without<AmmoText>, Without<StanceText>)>,
    mut stance_text: Query<&mut Text, (With<StanceText>, Without<AmmoText>, Without<StaminaText>)>,
) {
    if let Some(gun) = guns.iter().next() {
        for mut text in ammo_text.iter_mut() {
            **text = format!("{} / {}", gun.magazine(), gun.reserve());
        }
    }

    let Some(player) = players.iter().next() else {
        return;
    };
    for mut text in stamina_text.iter_mut() {
        **text = format!("Stamina {:.0}%", player.stamina().percentage() * 100.0);
    }
    for mut text in stance_text.iter_mut() {
        **text = stance_label(player.stance()).to_string();
    }
}

/// Show the pause banner only while paused
pub fn update_pause_banner(
    state: Res<State<GameState>>,
    mut banners: Query<&mut Visibility, With<PausedText>>,
) {
    let visible = *state.get() == GameState::Paused;
    for mut visibility in banners.iter_mut() {
        *visibility = if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}
