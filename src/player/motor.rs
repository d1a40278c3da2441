//! Kinematic character motor.
//!
//! Moves the player's collider through the physics world with avian shape
//! casts: sweep along the displacement, stop a skin width before contact and
//! slide the remainder along the surface that was hit. Also hosts the
//! downward slope probe used by sliding.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::math::project_on_plane;

/// Radius of the player's sphere collider.
pub const PLAYER_RADIUS: f32 = 0.5;
/// Gap kept between the collider and whatever it touches.
pub const SKIN_WIDTH: f32 = 0.02;
/// Collide-and-slide passes per move.
pub const MAX_SLIDES: usize = 3;

const MIN_MOVE: f32 = 1e-5;
/// Contacts whose normal points up at least this much count as "below".
const GROUND_NORMAL_MIN_Y: f32 = 0.05;

/// Outcome of one `move_and_slide`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    pub translation: Vec3,
    /// Something was touched below the collider.
    pub grounded: bool,
}

/// Surface found by the slope probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub normal: Vec3,
    pub distance: f32,
}

/// Sweep `collider` from `origin` along `displacement`, sliding on contact.
///
/// # Arguments
/// * `spatial` - avian spatial query system parameter
/// * `collider` - the shape being moved
/// * `origin` - start position
/// * `displacement` - desired motion this call
/// * `filter` - entities the sweep ignores (the player itself, a held ball)
#[must_use]
pub fn move_and_slide(
    spatial: &SpatialQuery,
    collider: &Collider,
    origin: Vec3,
    displacement: Vec3,
    filter: &SpatialQueryFilter,
) -> MoveResult {
    let mut position = origin;
    let mut remaining = displacement;
    let mut grounded = false;

    for _ in 0..MAX_SLIDES {
        let distance = remaining.length();
        if distance < MIN_MOVE {
            break;
        }
        let Ok(direction) = Dir3::new(remaining) else { break };

        let Some(hit) = spatial.cast_shape(
            collider,
            position,
            Quat::IDENTITY,
            direction,
            distance + SKIN_WIDTH,
            true,
            filter.clone(),
        ) else {
            position += remaining;
            break;
        };

        let travel = (hit.time_of_impact - SKIN_WIDTH).clamp(0.0, distance);
        position += *direction * travel;

        let normal = hit.normal1.normalize_or_zero();
        if normal.y > GROUND_NORMAL_MIN_Y {
            grounded = true;
        }

        remaining = project_on_plane(remaining - *direction * travel, normal);
    }

    MoveResult { translation: position, grounded }
}

/// Cast a small sphere straight down looking for the surface under the player.
#[must_use]
pub fn probe_slope(
    spatial: &SpatialQuery,
    origin: Vec3,
    radius: f32,
    max_distance: f32,
    filter: &SpatialQueryFilter,
) -> Option<ProbeHit> {
    spatial
        .cast_shape(
            &Collider::sphere(radius),
            origin,
            Quat::IDENTITY,
            Dir3::NEG_Y,
            max_distance,
            true,
            filter.clone(),
        )
        .map(|hit| ProbeHit { normal: hit.normal1.normalize_or_zero(), distance: hit.time_of_impact })
}
