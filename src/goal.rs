//! Goal volumes.
//!
//! A goal is an avian sensor. Every `CollisionStarted` between a goal and a
//! ball (the collider itself or any ancestor carrying `Ball`) adds the goal's
//! value to the `ScoreBoard` and, if configured, sends the ball home. Overlaps
//! are not debounced: each new contact scores.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::ball::{reset_ball, Ball, BallBodies, BallHost};
use crate::score::{ScoreBoard, ScoreChanged};
use crate::settings::GoalSettings;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    pub score_value: u32,
    pub reset_ball_on_score: bool,
}

impl Goal {
    #[must_use]
    pub fn from_settings(settings: &GoalSettings) -> Self {
        Self {
            score_value: settings.score_value,
            reset_ball_on_score: settings.reset_ball_on_score,
        }
    }
}

/// Walk from `start` up the parent chain until an entity with ball identity is found.
pub fn find_ball_in_chain(
    start: Entity,
    is_ball: impl Fn(Entity) -> bool,
    parent_of: impl Fn(Entity) -> Option<Entity>,
) -> Option<Entity> {
    let mut current = Some(start);
    while let Some(entity) = current {
        if is_ball(entity) {
            return Some(entity);
        }
        current = parent_of(entity);
    }
    None
}

/// Apply one goal overlap: score first, then reset the ball if the goal asks for it.
pub fn score_overlap(board: &mut ScoreBoard, goal: &Goal, ball: Entity, host: &mut impl BallHost) -> ScoreChanged {
    let total = board.add(goal.score_value);
    if goal.reset_ball_on_score {
        reset_ball(host, ball);
    }
    ScoreChanged { added: goal.score_value, total }
}

/// Score balls entering goal sensors.
///
/// # Arguments
/// * `collisions` - avian contact-start events for this frame
/// * `goals` - goal volumes
/// * `ball_ids` / `parents` - used to resolve ball identity on the other collider
/// * `board` - the session score
/// * `bodies` - ball bodies, for resetting scored balls
#[allow(clippy::needless_pass_by_value)]
pub fn goal_overlaps(
    mut collisions: EventReader<CollisionStarted>,
    goals: Query<&Goal>,
    ball_ids: Query<(), With<Ball>>,
    parents: Query<&Parent>,
    mut board: ResMut<ScoreBoard>,
    mut bodies: BallBodies,
    mut changed: EventWriter<ScoreChanged>,
) {
    for CollisionStarted(a, b) in collisions.read() {
        let (goal, other) = match (goals.get(*a), goals.get(*b)) {
            (Ok(goal), _) => (goal, *b),
            (_, Ok(goal)) => (goal, *a),
            _ => continue,
        };

        let Some(ball) = find_ball_in_chain(other, |e| ball_ids.contains(e), |e| parents.get(e).ok().map(Parent::get))
        else {
            continue;
        };

        let change = score_overlap(&mut board, goal, ball, &mut bodies);
        debug!("goal: {ball:?} scored {}", change.added);
        changed.send(change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::mock::MockHost;
    use crate::ball::BallAttachment;
    use std::collections::HashMap;

    #[test]
    fn ball_identity_found_on_ancestor() {
        let ball = Entity::from_raw(1);
        let mesh_child = Entity::from_raw(2);
        let collider_grandchild = Entity::from_raw(3);
        let parents: HashMap<Entity, Entity> = [(collider_grandchild, mesh_child), (mesh_child, ball)].into();

        let found = find_ball_in_chain(collider_grandchild, |e| e == ball, |e| parents.get(&e).copied());
        assert_eq!(found, Some(ball));

        let stranger = Entity::from_raw(9);
        assert_eq!(find_ball_in_chain(stranger, |e| e == ball, |e| parents.get(&e).copied()), None);
    }

    #[test]
    fn repeated_overlaps_score_every_time() {
        let mut host = MockHost::default();
        let ball = host.add(1, Vec3::ZERO);
        let mut board = ScoreBoard::default();
        let goal = Goal { score_value: 1, reset_ball_on_score: false };

        for _ in 0..3 {
            score_overlap(&mut board, &goal, ball, &mut host);
        }
        assert_eq!(board.total(), 3);
    }

    #[test]
    fn scoring_resets_ball_when_configured() {
        let mut host = MockHost::default();
        let ball = host.add(1, Vec3::new(0.0, 1.0, 0.0));
        host.body_mut(ball).translation = Vec3::new(0.0, 0.5, 30.0);
        host.body_mut(ball).linear = Vec3::Z * 8.0;
        let mut board = ScoreBoard::default();
        let goal = Goal { score_value: 2, reset_ball_on_score: true };

        let change = score_overlap(&mut board, &goal, ball, &mut host);
        assert_eq!(change, ScoreChanged { added: 2, total: 2 });
        assert_eq!(host.body(ball).translation, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(host.body(ball).linear, Vec3::ZERO);
    }

    #[test]
    fn collision_events_score_from_either_side_and_through_parents() {
        let mut app = App::new();
        app.add_event::<CollisionStarted>()
            .add_event::<ScoreChanged>()
            .init_resource::<ScoreBoard>()
            .add_systems(Update, goal_overlaps);

        let world = app.world_mut();
        let goal = world.spawn(Goal { score_value: 1, reset_ball_on_score: true }).id();
        let home = Transform::from_xyz(0.0, 0.5, 2.0);
        let ball = world
            .spawn((
                Ball::at(&home),
                Transform::from_xyz(0.0, 1.0, -14.0).with_scale(Vec3::splat(0.6)),
                RigidBody::Kinematic,
                LinearVelocity(Vec3::NEG_Z * 9.0),
                AngularVelocity(Vec3::X),
                BallAttachment { attached: true },
            ))
            .id();
        let ball_collider = world.spawn_empty().set_parent(ball).id();
        let wall = world.spawn_empty().id();

        world.send_event(CollisionStarted(goal, ball_collider));
        world.send_event(CollisionStarted(ball, goal));
        world.send_event(CollisionStarted(goal, wall));
        world.send_event(CollisionStarted(wall, ball));
        app.update();

        let world = app.world();
        assert_eq!(world.resource::<ScoreBoard>().total(), 2);
        assert_eq!(world.resource::<Events<ScoreChanged>>().len(), 2);

        let entity = world.entity(ball);
        assert_eq!(entity.get::<Transform>().map(|t| (t.translation, t.scale)), Some((home.translation, Vec3::ONE)));
        assert_eq!(entity.get::<RigidBody>(), Some(&RigidBody::Dynamic));
        assert_eq!(entity.get::<LinearVelocity>().map(|v| v.0), Some(Vec3::ZERO));
        assert_eq!(entity.get::<BallAttachment>(), Some(&BallAttachment { attached: false }));
    }
}
