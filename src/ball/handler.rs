//! Pickup, charge and throw state machine.

use bevy::prelude::*;

use super::charge::{advance_charge, ChargeMeter};
use super::{nearest_ball, BallHost};
use crate::input::FrameInput;
use crate::settings::BallSettings;

/// A ball in hand, with the scale it had before pickup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeldBall {
    pub entity: Entity,
    pub original_scale: Vec3,
}

/// Empty hands, holding, or holding while charging a throw.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HandState {
    #[default]
    Empty,
    Holding(HeldBall),
    Charging { held: HeldBall, force: f32 },
}

impl HandState {
    #[must_use]
    pub fn held(&self) -> Option<HeldBall> {
        match *self {
            HandState::Empty => None,
            HandState::Holding(held) | HandState::Charging { held, .. } => Some(held),
        }
    }
}

/// World-space context for one handler update.
#[derive(Debug, Clone, Copy)]
pub struct HandContext {
    /// Actor origin; distances are measured from `pickup_height` above it.
    pub actor: Vec3,
    /// World pose held balls are pinned to.
    pub anchor: Transform,
    /// Direction the player is looking.
    pub aim: Vec3,
}

/// Something noteworthy the handler did this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandEvent {
    PickedUp(Entity),
    Dropped(Entity),
    Thrown { ball: Entity, velocity: Vec3 },
    /// The held ball was taken away (reset by a goal, for example).
    Lost(Entity),
}

/// Per-actor ball interaction state.
#[derive(Component, Debug, Clone, Default)]
pub struct BallHandler {
    pub state: HandState,
    pub meter: ChargeMeter,
    /// Nearest free ball in range while empty-handed, for the pickup hint.
    pub nearest: Option<Entity>,
}

impl BallHandler {
    #[must_use]
    pub fn held_ball(&self) -> Option<Entity> {
        self.state.held().map(|h| h.entity)
    }

    #[must_use]
    pub fn charging_force(&self) -> Option<f32> {
        match self.state {
            HandState::Charging { force, .. } => Some(force),
            _ => None,
        }
    }

    /// Point distances are measured from.
    #[must_use]
    pub fn reach_origin(actor: Vec3, settings: &BallSettings) -> Vec3 {
        actor + Vec3::Y * settings.pickup_height
    }

    /// Run one frame: pickup/drop, charge/throw, pin the held ball, refresh
    /// the nearest candidate and the charge meter, in that order.
    pub fn update(
        &mut self,
        host: &mut impl BallHost,
        input: &FrameInput,
        ctx: &HandContext,
        settings: &BallSettings,
        dt: f32,
    ) -> Option<HandEvent> {
        let mut event = None;
        let origin = Self::reach_origin(ctx.actor, settings);

        if let Some(held) = self.state.held() {
            if !host.is_attached(held.entity) {
                self.state = HandState::Empty;
                event = Some(HandEvent::Lost(held.entity));
            }
        }

        if input.interact_pressed {
            if self.held_ball().is_some() {
                event = self.drop_ball(host).map(HandEvent::Dropped);
            } else if let Some(ball) = nearest_ball(host, origin, settings.pickup_range) {
                self.pick_up(host, ball, &ctx.anchor, settings);
                event = Some(HandEvent::PickedUp(ball));
            }
        }

        if let Some(thrown) = self.charge_and_throw(host, input, ctx.aim, settings, dt) {
            event = Some(thrown);
        }

        if let Some(held) = self.state.held() {
            host.set_pose(held.entity, ctx.anchor.translation, ctx.anchor.rotation);
        }

        self.nearest = match self.state {
            HandState::Empty => nearest_ball(host, origin, settings.pickup_range),
            _ => None,
        };
        self.meter.update(self.charging_force(), settings, dt);

        event
    }

    /// Take `ball` out of the simulation and pin it to `anchor`.
    pub fn pick_up(&mut self, host: &mut impl BallHost, ball: Entity, anchor: &Transform, settings: &BallSettings) {
        let original_scale = host.scale(ball).unwrap_or(Vec3::ONE);

        host.set_kinematic(ball, true);
        host.set_velocity(ball, Vec3::ZERO, Vec3::ZERO);
        if settings.shrink_while_held {
            let (lo, hi) = BallSettings::HELD_SCALE_RANGE;
            host.set_scale(ball, original_scale * settings.held_scale_factor.clamp(lo, hi));
        }
        host.set_attached(ball, true);
        host.set_pose(ball, anchor.translation, anchor.rotation);

        self.state = HandState::Holding(HeldBall { entity: ball, original_scale });
    }

    /// Let go of the held ball without throwing. No-op with empty hands.
    pub fn drop_ball(&mut self, host: &mut impl BallHost) -> Option<Entity> {
        let held = self.state.held()?;
        Self::release(host, held);
        self.state = HandState::Empty;
        Some(held.entity)
    }

    fn release(host: &mut impl BallHost, held: HeldBall) {
        host.set_scale(held.entity, held.original_scale);
        host.set_attached(held.entity, false);
        host.set_kinematic(held.entity, false);
    }

    fn charge_and_throw(
        &mut self,
        host: &mut impl BallHost,
        input: &FrameInput,
        aim: Vec3,
        settings: &BallSettings,
        dt: f32,
    ) -> Option<HandEvent> {
        if let (HandState::Holding(held), true) = (self.state, input.charge.pressed) {
            self.state = HandState::Charging { held, force: settings.min_throw_force };
        }

        let HandState::Charging { held, force } = self.state else { return None };

        let force = if input.charge.held { advance_charge(force, settings, dt) } else { force };
        self.state = HandState::Charging { held, force };

        if !input.charge.released {
            return None;
        }

        let velocity = throw_velocity(aim, force, settings);
        Self::release(host, held);
        host.set_velocity(held.entity, velocity, Vec3::ZERO);
        self.state = HandState::Empty;
        Some(HandEvent::Thrown { ball: held.entity, velocity })
    }
}

/// Velocity change applied on release: aim plus a small upward arc, at `force`.
#[must_use]
pub fn throw_velocity(aim: Vec3, force: f32, settings: &BallSettings) -> Vec3 {
    let dir = aim.normalize_or_zero() + Vec3::Y * settings.upward_boost * 0.1;
    dir.normalize_or_zero() * force
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::mock::MockHost;
    use crate::input::ButtonEdge;

    const DT: f32 = 1.0 / 60.0;

    fn ctx() -> HandContext {
        HandContext {
            actor: Vec3::ZERO,
            anchor: Transform::from_xyz(0.35, 1.25, -1.9),
            aim: Vec3::NEG_Z,
        }
    }

    fn interact() -> FrameInput {
        FrameInput { interact_pressed: true, ..Default::default() }
    }

    #[test]
    fn pickup_then_drop_restores_scale_and_simulation() {
        let settings = BallSettings::default();
        let mut host = MockHost::default();
        let ball = host.add(1, Vec3::new(0.0, 0.5, -2.0));
        host.body_mut(ball).scale = Vec3::splat(1.3);
        let mut hand = BallHandler::default();

        let event = hand.update(&mut host, &interact(), &ctx(), &settings, DT);
        assert_eq!(event, Some(HandEvent::PickedUp(ball)));
        let body = host.body(ball);
        assert!(body.kinematic && body.attached);
        assert!((body.scale - Vec3::splat(1.3 * 0.6)).length() < 1e-6);
        assert_eq!(body.translation, ctx().anchor.translation);

        let event = hand.update(&mut host, &interact(), &ctx(), &settings, DT);
        assert_eq!(event, Some(HandEvent::Dropped(ball)));
        let body = host.body(ball);
        assert_eq!(body.scale, Vec3::splat(1.3));
        assert!(!body.kinematic && !body.attached);
        assert_eq!(hand.state, HandState::Empty);
    }

    #[test]
    fn pickup_out_of_range_is_a_no_op() {
        let settings = BallSettings::default();
        let mut host = MockHost::default();
        let ball = host.add(1, Vec3::new(0.0, 1.0, -10.0));
        let mut hand = BallHandler::default();

        assert_eq!(hand.update(&mut host, &interact(), &ctx(), &settings, DT), None);
        assert_eq!(hand.state, HandState::Empty);
        assert!(!host.body(ball).kinematic);
    }

    #[test]
    fn drop_with_empty_hands_is_a_no_op() {
        let mut host = MockHost::default();
        let mut hand = BallHandler::default();
        assert_eq!(hand.drop_ball(&mut host), None);
    }

    #[test]
    fn charge_and_throw_cycle() {
        let settings = BallSettings::default();
        let mut host = MockHost::default();
        let ball = host.add(1, Vec3::new(0.0, 1.0, -1.0));
        let mut hand = BallHandler::default();
        hand.update(&mut host, &interact(), &ctx(), &settings, DT);

        let press = FrameInput { charge: ButtonEdge::down(), ..Default::default() };
        hand.update(&mut host, &press, &ctx(), &settings, DT);
        let hold = FrameInput { charge: ButtonEdge::hold(), ..Default::default() };
        for _ in 0..44 {
            hand.update(&mut host, &hold, &ctx(), &settings, DT);
        }

        // 45 frames of charge is 0.75 s out of 1.5 s
        let force = hand.charging_force().expect("charging");
        assert!((force - 15.0).abs() < 1e-3);
        assert!((hand.meter.fill - 0.5).abs() < 1e-3);

        let release = FrameInput { charge: ButtonEdge::up(), ..Default::default() };
        let event = hand.update(&mut host, &release, &ctx(), &settings, DT);
        let Some(HandEvent::Thrown { ball: thrown, velocity }) = event else {
            panic!("expected a throw, got {event:?}");
        };
        assert_eq!(thrown, ball);
        assert!((velocity.length() - force).abs() < 1e-3);
        assert!(velocity.y > 0.0 && velocity.z < 0.0);

        let body = host.body(ball);
        assert!(!body.kinematic && !body.attached);
        assert_eq!(body.scale, Vec3::ONE);
        assert_eq!(body.linear, velocity);
        assert_eq!(hand.state, HandState::Empty);
    }

    #[test]
    fn charge_needs_a_ball() {
        let settings = BallSettings::default();
        let mut host = MockHost::default();
        let mut hand = BallHandler::default();
        let press = FrameInput { charge: ButtonEdge::down(), ..Default::default() };
        hand.update(&mut host, &press, &ctx(), &settings, DT);
        assert_eq!(hand.state, HandState::Empty);
        assert_eq!(hand.meter.fill, 0.0);
    }

    #[test]
    fn reset_ball_in_hand_releases_ownership() {
        let settings = BallSettings::default();
        let mut host = MockHost::default();
        let ball = host.add(1, Vec3::new(0.0, 1.0, -1.0));
        let mut hand = BallHandler::default();
        hand.update(&mut host, &interact(), &ctx(), &settings, DT);

        crate::ball::reset_ball(&mut host, ball);
        let event = hand.update(&mut host, &FrameInput::default(), &ctx(), &settings, DT);
        assert_eq!(event, Some(HandEvent::Lost(ball)));
        assert_eq!(hand.held_ball(), None);
        // the ball stays where the reset put it
        assert_eq!(host.body(ball).translation, Vec3::new(0.0, 1.0, -1.0));
    }

    #[test]
    fn held_scale_factor_is_clamped() {
        let settings = BallSettings { held_scale_factor: 0.05, ..Default::default() };
        let mut host = MockHost::default();
        let ball = host.add(1, Vec3::new(0.0, 1.0, -1.0));
        let mut hand = BallHandler::default();
        hand.pick_up(&mut host, ball, &Transform::IDENTITY, &settings);
        assert_eq!(host.body(ball).scale, Vec3::splat(0.25));
    }
}
