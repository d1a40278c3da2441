//! User interface: HUD, debug overlay and debug gizmos.
//!
//! The HUD holds the charge bar, the score text, the pickup hint and a
//! crosshair. The debug overlay (F1 by default) periodically shows FPS,
//! player and ball state; the gizmo toggle (F2) draws the pickup range.

use bevy::diagnostic::{Diagnostic, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::ball::{Ball, BallHandler, HandState};
use crate::camera::PlayerCamera;
use crate::input::{just_pressed, Bindings};
use crate::player::Player;
use crate::score::{score_line, ScoreBoard, ScoreText};
use crate::settings::Settings;

/// Height above a ball the pickup hint is anchored to.
const HINT_LIFT: f32 = 0.35;
/// Hint label size in pixels; the label is centered on its anchor.
const HINT_SIZE: Vec2 = Vec2::new(150.0, 40.0);
const CHARGE_BAR_WIDTH: f32 = 240.0;
const CHARGE_BAR_HEIGHT: f32 = 14.0;

/// State for the debug overlay visibility.
#[derive(Resource, Default)]
pub struct DebugOverlayState {
    /// Whether the overlay is currently visible.
    pub visible: bool,
}

#[derive(Resource, Default)]
pub struct DebugOverlayTimer(pub Timer);

#[derive(Resource, Default)]
pub struct DebugGizmosVisible(pub bool);

#[derive(Component)]
pub struct DebugOverlayText;

/// Root node of the charge bar; its alpha follows the charge meter.
#[derive(Component)]
pub struct ChargeBar;

#[derive(Component)]
pub struct ChargeBarFill;

#[derive(Component)]
pub struct PickupHint;

/// Insert debug overlay resources into the `Commands` world.
///
/// # Arguments
/// * `commands` - `Commands` to insert resources (timer, state, gizmo visibility)
pub fn setup_debug_overlay(mut commands: Commands) {
    commands.insert_resource(DebugOverlayTimer(Timer::from_seconds(
        0.25,
        TimerMode::Repeating,
    )));
    commands.insert_resource(DebugOverlayState::default());
    commands.insert_resource(DebugGizmosVisible::default());
}

/// Toggle the debug overlay visibility when the bound key (F1) is pressed.
#[allow(clippy::needless_pass_by_value)]
pub fn toggle_debug_overlay(
    mut state: ResMut<DebugOverlayState>,
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    bindings: Res<Bindings>,
) {
    if just_pressed(bindings.toggle_debug, &keys, &mouse) {
        state.visible = !state.visible;
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn toggle_debug_gizmos(
    mut gizmos: ResMut<DebugGizmosVisible>,
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    bindings: Res<Bindings>,
) {
    if just_pressed(bindings.toggle_gizmos, &keys, &mouse) {
        gizmos.0 = !gizmos.0;
    }
}

/// System parameters read by the debug overlay.
#[derive(bevy::ecs::system::SystemParam)]
pub struct DebugOverlayCtx<'w, 's> {
    pub diagnostics: Res<'w, DiagnosticsStore>,
    pub state: Res<'w, DebugOverlayState>,
    pub time: Res<'w, Time>,
    pub timer: ResMut<'w, DebugOverlayTimer>,
    pub score: Res<'w, ScoreBoard>,
    pub query: Query<'w, 's, &'static mut Text, With<DebugOverlayText>>,
    pub player_query: Query<'w, 's, (&'static GlobalTransform, &'static Player, Option<&'static BallHandler>)>,
}

/// Describe what the hand is doing, for the overlay.
#[must_use]
pub fn hand_summary(handler: Option<&BallHandler>) -> String {
    match handler.map(|h| h.state) {
        None | Some(HandState::Empty) => "Hand: empty".to_string(),
        Some(HandState::Holding(held)) => format!("Hand: holding {:?}", held.entity),
        Some(HandState::Charging { held, force }) => {
            format!("Hand: charging {:?} ({force:.1})", held.entity)
        }
    }
}

/// Update the debug overlay text once every interval.
/// The overlay updates at a fixed interval to avoid the overhead
/// of formatting diagnostics every frame.
///
/// # Arguments
/// * `ctx` - system parameters grouped into a context struct for cleaner function signature
pub fn update_debug_overlay(mut ctx: DebugOverlayCtx<'_, '_>) {
    if !ctx.timer.0.tick(ctx.time.delta()).just_finished() {
        return;
    }

    let Ok(mut text) = ctx.query.get_single_mut() else { return };

    if !ctx.state.visible {
        text.sections[0].value = String::new();
        return;
    }

    let fps = ctx
        .diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let frame_time = ctx
        .diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let (pos_str, motion_str, hand_str) = if let Ok((global, player, handler)) = ctx.player_query.get_single() {
        let pos = global.translation();
        (
            format!("Pos: ({:.1}, {:.1}, {:.1})", pos.x, pos.y, pos.z),
            format!(
                "Ground: {} | Vy: {:.2} | Slide: {:.2}",
                player.on_ground,
                player.vertical_velocity,
                player.slide_velocity.length()
            ),
            hand_summary(handler),
        )
    } else {
        ("Pos: N/A".to_string(), String::new(), hand_summary(None))
    };

    text.sections[0].value = format!(
        "FPS: {:.1}\nFrame Time: {:.2} ms\n{}\n{}\n{}\n{}",
        fps,
        frame_time,
        pos_str,
        motion_str,
        hand_str,
        score_line(ctx.score.total()),
    );
}

/// Spawn the debug overlay text in the top-left corner.
pub fn spawn_debug_overlay(mut commands: Commands) {
    commands.spawn((
        TextBundle {
            text: Text::from_section(
                "",
                TextStyle {
                    font_size: 18.0,
                    color: Color::srgb(1.0, 1.0, 0.0),
                    ..default()
                },
            ),
            style: Style {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            ..default()
        },
        DebugOverlayText,
    ));
}

/// Spawn the gameplay HUD: charge bar, score text, pickup hint and crosshair.
#[allow(clippy::needless_pass_by_value)]
pub fn spawn_hud(mut commands: Commands, settings: Res<Settings>) {
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(48.0),
                    left: Val::Percent(50.0),
                    margin: UiRect::left(Val::Px(-CHARGE_BAR_WIDTH / 2.0)),
                    width: Val::Px(CHARGE_BAR_WIDTH),
                    height: Val::Px(CHARGE_BAR_HEIGHT),
                    ..default()
                },
                background_color: Color::srgba(0.0, 0.0, 0.0, 0.0).into(),
                ..default()
            },
            ChargeBar,
        ))
        .with_children(|bar| {
            bar.spawn((
                NodeBundle {
                    style: Style {
                        width: Val::Percent(0.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    background_color: Color::srgba(1.0, 0.75, 0.2, 0.0).into(),
                    ..default()
                },
                ChargeBarFill,
            ));
        });

    if settings.ui.show_score_text {
        commands.spawn((
            TextBundle {
                text: Text::from_section(
                    score_line(0),
                    TextStyle { font_size: 28.0, color: Color::WHITE, ..default() },
                ),
                style: Style {
                    position_type: PositionType::Absolute,
                    right: Val::Px(16.0),
                    top: Val::Px(12.0),
                    ..default()
                },
                ..default()
            },
            ScoreText,
        ));
    }

    commands.spawn((
        TextBundle {
            text: Text::from_section(
                "Press E to pick up",
                TextStyle { font_size: 18.0, color: Color::WHITE, ..default() },
            )
            .with_justify(JustifyText::Center),
            style: Style {
                position_type: PositionType::Absolute,
                width: Val::Px(HINT_SIZE.x),
                height: Val::Px(HINT_SIZE.y),
                ..default()
            },
            visibility: Visibility::Hidden,
            ..default()
        },
        PickupHint,
    ));

    spawn_crosshair(&mut commands);
}

/// Mirror the player's charge meter onto the charge bar.
#[allow(clippy::needless_pass_by_value)]
pub fn update_charge_bar(
    handlers: Query<&BallHandler>,
    mut bars: Query<&mut BackgroundColor, (With<ChargeBar>, Without<ChargeBarFill>)>,
    mut fills: Query<(&mut Style, &mut BackgroundColor), With<ChargeBarFill>>,
) {
    let Ok(handler) = handlers.get_single() else { return };
    let meter = handler.meter;

    for mut bg in &mut bars {
        *bg = Color::srgba(0.0, 0.0, 0.0, 0.5 * meter.alpha).into();
    }
    for (mut style, mut bg) in &mut fills {
        style.width = Val::Percent(meter.fill * 100.0);
        *bg = Color::srgba(1.0, 0.75, 0.2, meter.alpha).into();
    }
}

/// Label the nearest ball in reach while the player's hands are empty.
///
/// Placed `HINT_LIFT` above the ball and hidden when the ball is behind the camera.
#[allow(clippy::needless_pass_by_value)]
pub fn update_pickup_hint(
    settings: Res<Settings>,
    handlers: Query<&BallHandler>,
    balls: Query<&GlobalTransform, With<Ball>>,
    cameras: Query<(&Camera, &GlobalTransform), With<PlayerCamera>>,
    mut hints: Query<(&mut Style, &mut Visibility), With<PickupHint>>,
) {
    let Ok((mut style, mut visibility)) = hints.get_single_mut() else { return };

    let screen = settings
        .ui
        .show_pickup_hint
        .then(|| handlers.get_single().ok().and_then(|h| h.nearest))
        .flatten()
        .and_then(|ball| balls.get(ball).ok())
        .zip(cameras.get_single().ok())
        .and_then(|(ball, (camera, camera_tf))| {
            camera.world_to_viewport(camera_tf, ball.translation() + Vec3::Y * HINT_LIFT)
        });

    match screen {
        Some(pos) => {
            style.left = Val::Px(pos.x - HINT_SIZE.x / 2.0);
            style.top = Val::Px(pos.y - HINT_SIZE.y / 2.0);
            *visibility = Visibility::Inherited;
        }
        None => *visibility = Visibility::Hidden,
    }
}

/// Draw the pickup reach around the player's chest point.
#[allow(clippy::needless_pass_by_value)]
pub fn render_pickup_gizmos(
    visible: Res<DebugGizmosVisible>,
    settings: Res<Settings>,
    mut gizmos: Gizmos,
    players: Query<&GlobalTransform, With<BallHandler>>,
) {
    if !visible.0 {
        return;
    }
    let cyan = Color::srgb(0.0, 1.0, 1.0);
    for player in &players {
        let origin = BallHandler::reach_origin(player.translation(), &settings.ball);
        gizmos.sphere(origin, Quat::IDENTITY, settings.ball.pickup_range, cyan);
    }
}

/// Spawn a crosshair UI element centered on the screen.
///
/// # Arguments
/// * `commands` - mutable `Commands` used to spawn UI nodes
pub fn spawn_crosshair(commands: &mut Commands) {
    commands
        .spawn(NodeBundle {
            style: Style {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            ..default()
        })
        .with_children(|p| {
            p.spawn(NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    width: Val::Px(14.0),
                    height: Val::Px(2.0),
                    ..default()
                },
                background_color: Color::WHITE.into(),
                ..default()
            });
            p.spawn(NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    width: Val::Px(2.0),
                    height: Val::Px(14.0),
                    ..default()
                },
                background_color: Color::WHITE.into(),
                ..default()
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::HeldBall;

    #[test]
    fn hand_summary_names_state() {
        assert_eq!(hand_summary(None), "Hand: empty");

        let held = HeldBall { entity: Entity::from_raw(3), original_scale: Vec3::ONE };
        let handler = BallHandler { state: HandState::Charging { held, force: 12.5 }, ..Default::default() };
        let text = hand_summary(Some(&handler));
        assert!(text.starts_with("Hand: charging"));
        assert!(text.ends_with("(12.5)"));
    }
}
