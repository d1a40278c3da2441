//! Player components and systems (locomotion, slope sliding, motor).
//!
//! The module provides the `Player` component and re-exports the movement
//! system together with the pure step functions it is built from.
//!
//! # Example:
//!
//! ```ignore
//! commands.spawn((
//!     TransformBundle::from_transform(Transform::from_xyz(0.0, 1.0, 0.0)),
//!     RigidBody::Kinematic,
//!     Collider::sphere(PLAYER_RADIUS),
//!     Player::default(),
//!     BallHandler::default(),
//! ));
//! app.add_systems(Update, player_movement);
//! ```
pub mod motor;
pub mod movement;

use bevy::prelude::*;

pub use motor::*;
pub use movement::*;

/// Component tracking player state used by the movement system.
#[derive(Component, Debug, Clone, Default)]
pub struct Player {
    /// Vertical velocity in world units per second; gravity and jumps act on it.
    pub vertical_velocity: f32,
    /// Whether the last vertical move touched something below.
    pub on_ground: bool,
    /// Slide velocity; only non-zero while sliding down a steep slope.
    pub slide_velocity: Vec3,
}
