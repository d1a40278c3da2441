//! Balls and the player's pickup / charge / throw interaction.
//!
//! The interaction is written against the `BallHost` trait rather than the
//! ECS directly: `BallHandler` decides *what* happens to a ball, the host
//! carries it out. In the game the host is `BallBodies`, a system parameter
//! over ball transforms and avian rigid-body components; tests use a map.

pub mod charge;
pub mod handler;
pub mod systems;

use bevy::prelude::*;

pub use charge::*;
pub use handler::*;
pub use systems::*;

/// A throwable ball. Remembers the pose it was spawned with.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub spawn_translation: Vec3,
    pub spawn_rotation: Quat,
    pub spawn_scale: Vec3,
}

impl Ball {
    /// Record `transform` as the spawn pose.
    #[must_use]
    pub fn at(transform: &Transform) -> Self {
        Self {
            spawn_translation: transform.translation,
            spawn_rotation: transform.rotation,
            spawn_scale: transform.scale,
        }
    }
}

/// Whether a ball is currently held, i.e. pinned to a hold anchor.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BallAttachment {
    pub attached: bool,
}

/// What the ball interaction needs from the world.
pub trait BallHost {
    /// Balls that can be picked up right now, with their world positions.
    fn free_balls(&self) -> Vec<(Entity, Vec3)>;
    fn spawn_state(&self, ball: Entity) -> Option<Ball>;
    fn is_attached(&self, ball: Entity) -> bool;
    fn set_attached(&mut self, ball: Entity, attached: bool);
    fn scale(&self, ball: Entity) -> Option<Vec3>;
    fn set_scale(&mut self, ball: Entity, scale: Vec3);
    fn set_kinematic(&mut self, ball: Entity, kinematic: bool);
    fn set_velocity(&mut self, ball: Entity, linear: Vec3, angular: Vec3);
    fn set_pose(&mut self, ball: Entity, translation: Vec3, rotation: Quat);
}

/// Put a ball back where it spawned: detached, simulated, at rest, spawn scale.
///
/// Safe to call on any ball in any state; calling it twice is the same as once.
pub fn reset_ball(host: &mut impl BallHost, ball: Entity) {
    let Some(spawn) = host.spawn_state(ball) else { return };
    host.set_attached(ball, false);
    host.set_kinematic(ball, false);
    host.set_velocity(ball, Vec3::ZERO, Vec3::ZERO);
    host.set_pose(ball, spawn.spawn_translation, spawn.spawn_rotation);
    host.set_scale(ball, spawn.spawn_scale);
}

/// Nearest free ball to `from` within `range`, if any.
#[must_use]
pub fn nearest_ball(host: &impl BallHost, from: Vec3, range: f32) -> Option<Entity> {
    host.free_balls()
        .into_iter()
        .map(|(entity, pos)| (entity, pos.distance(from)))
        .filter(|&(_, d)| d <= range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq)]
    pub struct MockBody {
        pub spawn: Ball,
        pub translation: Vec3,
        pub rotation: Quat,
        pub scale: Vec3,
        pub kinematic: bool,
        pub attached: bool,
        pub linear: Vec3,
        pub angular: Vec3,
    }

    /// In-memory stand-in for the physics world.
    #[derive(Debug, Default)]
    pub struct MockHost {
        pub bodies: HashMap<Entity, MockBody>,
    }

    impl MockHost {
        pub fn add(&mut self, index: u32, translation: Vec3) -> Entity {
            let entity = Entity::from_raw(index);
            let transform = Transform::from_translation(translation);
            self.bodies.insert(
                entity,
                MockBody {
                    spawn: Ball::at(&transform),
                    translation,
                    rotation: Quat::IDENTITY,
                    scale: Vec3::ONE,
                    kinematic: false,
                    attached: false,
                    linear: Vec3::ZERO,
                    angular: Vec3::ZERO,
                },
            );
            entity
        }

        pub fn body(&self, entity: Entity) -> &MockBody {
            &self.bodies[&entity]
        }

        pub fn body_mut(&mut self, entity: Entity) -> &mut MockBody {
            self.bodies.get_mut(&entity).expect("known body")
        }
    }

    impl BallHost for MockHost {
        fn free_balls(&self) -> Vec<(Entity, Vec3)> {
            self.bodies.iter().filter(|(_, b)| !b.attached).map(|(e, b)| (*e, b.translation)).collect()
        }
        fn spawn_state(&self, ball: Entity) -> Option<Ball> {
            self.bodies.get(&ball).map(|b| b.spawn)
        }
        fn is_attached(&self, ball: Entity) -> bool {
            self.bodies.get(&ball).is_some_and(|b| b.attached)
        }
        fn set_attached(&mut self, ball: Entity, attached: bool) {
            self.body_mut(ball).attached = attached;
        }
        fn scale(&self, ball: Entity) -> Option<Vec3> {
            self.bodies.get(&ball).map(|b| b.scale)
        }
        fn set_scale(&mut self, ball: Entity, scale: Vec3) {
            self.body_mut(ball).scale = scale;
        }
        fn set_kinematic(&mut self, ball: Entity, kinematic: bool) {
            self.body_mut(ball).kinematic = kinematic;
        }
        fn set_velocity(&mut self, ball: Entity, linear: Vec3, angular: Vec3) {
            let body = self.body_mut(ball);
            body.linear = linear;
            body.angular = angular;
        }
        fn set_pose(&mut self, ball: Entity, translation: Vec3, rotation: Quat) {
            let body = self.body_mut(ball);
            body.translation = translation;
            body.rotation = rotation;
        }
    }
}
