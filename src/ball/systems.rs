//! Bevy side of the ball interaction.
//!
//! `BallBodies` adapts ball transforms and avian rigid-body components to
//! `BallHost`; `ball_interaction` feeds the frame's input and the player
//! camera pose into each `BallHandler`.

use avian3d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::{Ball, BallAttachment, BallHandler, BallHost, HandContext, HandEvent};
use crate::camera::PlayerCamera;
use crate::input::FrameInput;
use crate::settings::Settings;

/// Ball entities with their pose and physics state.
#[derive(SystemParam)]
pub struct BallBodies<'w, 's> {
    poses: Query<'w, 's, (Entity, &'static Ball, &'static mut Transform)>,
    bodies: Query<
        'w,
        's,
        (
            &'static mut RigidBody,
            &'static mut LinearVelocity,
            &'static mut AngularVelocity,
            &'static mut BallAttachment,
        ),
        With<Ball>,
    >,
}

impl BallHost for BallBodies<'_, '_> {
    fn free_balls(&self) -> Vec<(Entity, Vec3)> {
        self.poses
            .iter()
            .filter(|(entity, ..)| !self.is_attached(*entity))
            .map(|(entity, _, transform)| (entity, transform.translation))
            .collect()
    }

    fn spawn_state(&self, ball: Entity) -> Option<Ball> {
        self.poses.get(ball).ok().map(|(_, spawn, _)| *spawn)
    }

    fn is_attached(&self, ball: Entity) -> bool {
        self.bodies.get(ball).is_ok_and(|(.., attachment)| attachment.attached)
    }

    fn set_attached(&mut self, ball: Entity, attached: bool) {
        if let Ok((.., mut attachment)) = self.bodies.get_mut(ball) {
            attachment.attached = attached;
        }
    }

    fn scale(&self, ball: Entity) -> Option<Vec3> {
        self.poses.get(ball).ok().map(|(.., transform)| transform.scale)
    }

    fn set_scale(&mut self, ball: Entity, scale: Vec3) {
        if let Ok((.., mut transform)) = self.poses.get_mut(ball) {
            transform.scale = scale;
        }
    }

    fn set_kinematic(&mut self, ball: Entity, kinematic: bool) {
        if let Ok((mut body, ..)) = self.bodies.get_mut(ball) {
            *body = if kinematic { RigidBody::Kinematic } else { RigidBody::Dynamic };
        }
    }

    fn set_velocity(&mut self, ball: Entity, linear: Vec3, angular: Vec3) {
        if let Ok((_, mut lin, mut ang, _)) = self.bodies.get_mut(ball) {
            lin.0 = linear;
            ang.0 = angular;
        }
    }

    fn set_pose(&mut self, ball: Entity, translation: Vec3, rotation: Quat) {
        if let Ok((.., mut transform)) = self.poses.get_mut(ball) {
            transform.translation = translation;
            transform.rotation = rotation;
        }
    }
}

/// Run every `BallHandler` for this frame.
///
/// # Arguments
/// * `actors` - entities carrying a handler; their transform is the reach origin
/// * `cameras` - the player camera, which provides the hold anchor and aim
/// * `bodies` - ball bodies the handler acts on
#[allow(clippy::needless_pass_by_value)]
pub fn ball_interaction(
    time: Res<Time>,
    input: Res<FrameInput>,
    settings: Res<Settings>,
    mut actors: Query<(&Transform, &mut BallHandler), Without<Ball>>,
    cameras: Query<&GlobalTransform, With<PlayerCamera>>,
    mut bodies: BallBodies,
) {
    let Ok(camera) = cameras.get_single() else { return };
    let camera = camera.compute_transform();
    let ball_settings = &settings.ball;

    let ctx_for = |actor: &Transform| HandContext {
        actor: actor.translation,
        anchor: camera * Transform::from_translation(ball_settings.hold_offset()),
        aim: *camera.forward(),
    };

    for (actor, mut handler) in &mut actors {
        let ctx = ctx_for(actor);
        match handler.update(&mut bodies, &input, &ctx, ball_settings, time.delta_seconds()) {
            Some(HandEvent::PickedUp(ball)) => debug!("picked up {ball:?}"),
            Some(HandEvent::Dropped(ball)) => debug!("dropped {ball:?}"),
            Some(HandEvent::Thrown { ball, velocity }) => {
                info!("threw {ball:?} at {:.1} m/s", velocity.length());
            }
            Some(HandEvent::Lost(ball)) => debug!("{ball:?} left the hand"),
            None => {}
        }
    }
}
