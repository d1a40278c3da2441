//! Player locomotion: camera-relative walking, gravity, jumping and slope sliding.
//!
//! `locomotion_step` and `slide_step` hold the per-frame rules and return
//! displacements; `player_movement` runs them and pushes the results through
//! the motor.

use avian3d::prelude::*;
use bevy::prelude::*;

use super::motor::{move_and_slide, probe_slope, ProbeHit};
use super::Player;
use crate::ball::BallHandler;
use crate::camera::PlayerCamera;
use crate::input::FrameInput;
use crate::math::{angle_from_up_deg, project_on_plane};
use crate::settings::{MovementSettings, Settings, SlideSettings};

/// Displacements produced by one locomotion step, applied in this order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepMotion {
    pub planar: Vec3,
    pub vertical: Vec3,
}

/// Launch speed that peaks at `jump_height` under `gravity`.
///
/// Zero when gravity does not pull down.
#[must_use]
pub fn jump_velocity(jump_height: f32, gravity: f32) -> f32 {
    if gravity >= 0.0 {
        return 0.0;
    }
    (jump_height.max(0.0) * -2.0 * gravity).sqrt()
}

/// Horizontal move direction from a view basis and `(right, forward)` axes.
///
/// The basis is flattened onto the ground plane. The result is only
/// normalized when longer than 1, so diagonals are capped but partial
/// stick input keeps its magnitude.
#[must_use]
pub fn planar_move(forward: Vec3, right: Vec3, axes: Vec2) -> Vec3 {
    let forward = project_on_plane(forward, Vec3::Y).normalize_or_zero();
    let right = project_on_plane(right, Vec3::Y).normalize_or_zero();
    let wish = right * axes.x + forward * axes.y;
    if wish.length_squared() > 1.0 {
        wish.normalize()
    } else {
        wish
    }
}

/// One frame of walking, jumping and gravity.
///
/// `player.on_ground` is the contact state from the previous frame's move.
pub fn locomotion_step(
    player: &mut Player,
    input: &FrameInput,
    forward: Vec3,
    right: Vec3,
    settings: &MovementSettings,
    dt: f32,
) -> StepMotion {
    let grounded = player.on_ground;
    if grounded && player.vertical_velocity < 0.0 {
        player.vertical_velocity = settings.ground_bias;
    }

    let planar = planar_move(forward, right, input.move_axes) * settings.move_speed * dt;

    if input.jump_pressed && grounded {
        player.vertical_velocity = jump_velocity(settings.jump_height, settings.gravity);
    }
    player.vertical_velocity += settings.gravity * dt;

    StepMotion { planar, vertical: Vec3::Y * player.vertical_velocity * dt }
}

/// One frame of slope sliding; returns the slide displacement.
///
/// Slide velocity builds along the downhill direction while `slide_held` and
/// the probe finds a surface steeper than `slope_limit`. In every other case
/// it drops straight to zero.
pub fn slide_step(
    player: &mut Player,
    slide_held: bool,
    probe: Option<ProbeHit>,
    settings: &SlideSettings,
    dt: f32,
) -> Vec3 {
    let steep = probe.filter(|hit| slide_held && angle_from_up_deg(hit.normal) > settings.slope_limit);

    let Some(hit) = steep else {
        player.slide_velocity = Vec3::ZERO;
        return Vec3::ZERO;
    };

    let downhill = project_on_plane(Vec3::NEG_Y, hit.normal).normalize_or_zero();
    player.slide_velocity = (player.slide_velocity + downhill * settings.acceleration * dt)
        .clamp_length_max(settings.max_speed);
    player.slide_velocity * dt
}

/// Filter for the player's sweeps and probe: skips the player, its held ball and sensors.
#[must_use]
pub fn sweep_filter(
    player: Entity,
    handler: Option<&BallHandler>,
    sensors: impl IntoIterator<Item = Entity>,
) -> SpatialQueryFilter {
    let mut excluded = vec![player];
    excluded.extend(handler.and_then(BallHandler::held_ball));
    excluded.extend(sensors);
    SpatialQueryFilter::default().with_excluded_entities(excluded)
}

/// Move players: walk, jump and fall, then slide.
///
/// # Arguments
/// * `spatial` - avian spatial queries for the motor and the slope probe
/// * `players` - player bodies; the optional `BallHandler` lets sweeps ignore a held ball
/// * `cameras` - the player camera, whose facing drives movement
/// * `sensors` - trigger volumes, which never block the player
#[allow(clippy::needless_pass_by_value)]
pub fn player_movement(
    time: Res<Time>,
    input: Res<FrameInput>,
    settings: Res<Settings>,
    spatial: SpatialQuery,
    mut players: Query<(Entity, &mut Transform, &mut Player, &Collider, Option<&BallHandler>)>,
    cameras: Query<&GlobalTransform, With<PlayerCamera>>,
    sensors: Query<Entity, With<Sensor>>,
) {
    let dt = time.delta_seconds();
    let movement = &settings.movement;

    for (entity, mut transform, mut player, collider, handler) in &mut players {
        let (forward, right) = match cameras.get_single() {
            Ok(camera) => (*camera.forward(), *camera.right()),
            Err(_) => (*transform.forward(), *transform.right()),
        };

        let filter = sweep_filter(entity, handler, &sensors);

        let step = locomotion_step(&mut player, &input, forward, right, movement, dt);
        let planar = move_and_slide(&spatial, collider, transform.translation, step.planar, &filter);
        let vertical = move_and_slide(&spatial, collider, planar.translation, step.vertical, &filter);
        player.on_ground = vertical.grounded;
        let mut position = vertical.translation;

        let probe = if input.slide_held {
            let slide = &movement.slide;
            probe_slope(&spatial, position + Vec3::Y * slide.probe_height, slide.probe_radius, slide.probe_distance, &filter)
        } else {
            None
        };
        let slide = slide_step(&mut player, input.slide_held, probe, &movement.slide, dt);
        if slide != Vec3::ZERO {
            position = move_and_slide(&spatial, collider, position, slide, &filter).translation;
        }

        transform.translation = position;
    }
}
