//! First-person mouse look.
//!
//! No smoothing: while the look button is held, yaw is applied directly to
//! the body entity and pitch to the camera's local rotation.

use bevy::prelude::*;

use super::CursorLock;
use crate::input::FrameInput;
use crate::math::{rig_rotation, yaw_pitch_from_rotation};
use crate::settings::{MouseLookSettings, Settings};

/// Look state for a camera parented to `body`. Pitch in degrees, positive looks down.
#[derive(Component, Debug, Clone)]
pub struct MouseLook {
    pub body: Entity,
    pub pitch: f32,
    pub looking: bool,
    seeded: bool,
}

/// Result of one look step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookStep {
    /// Degrees to turn the body this frame, positive turns right.
    pub yaw_delta: f32,
    /// Camera pitch after clamping.
    pub pitch: f32,
    pub cursor: Option<CursorLock>,
}

impl MouseLook {
    #[must_use]
    pub fn new(body: Entity) -> Self {
        Self { body, pitch: 0.0, looking: false, seeded: false }
    }

    /// Take the starting pitch from the camera's local rotation, once.
    pub fn seed(&mut self, local_rotation: Quat) {
        if !self.seeded {
            self.pitch = yaw_pitch_from_rotation(local_rotation).1;
            self.seeded = true;
        }
    }

    pub fn step(&mut self, input: &FrameInput, settings: &MouseLookSettings, dt: f32) -> LookStep {
        let mut cursor = None;
        if input.look.pressed {
            self.looking = true;
            cursor = Some(CursorLock::Locked);
        }
        if self.looking && (input.look.released || !input.look.held) {
            self.looking = false;
            cursor = Some(CursorLock::Released);
        }

        let mut yaw_delta = 0.0;
        if self.looking {
            yaw_delta = input.look_delta.x * settings.sensitivity * dt;
            self.pitch -= input.look_delta.y * settings.sensitivity * dt;
        }
        self.pitch = self.pitch.clamp(settings.min_pitch, settings.max_pitch);

        LookStep { yaw_delta, pitch: self.pitch, cursor }
    }
}

/// Apply first-person look to cameras carrying `MouseLook`.
///
/// # Arguments
/// * `cameras` - look cameras; their local rotation seeds the pitch and is
///   rewritten only while looking or when the pitch moves
/// * `bodies` - body transforms; rotated about world up by the yaw delta
/// * `windows` - primary window, for cursor lock requests
#[allow(clippy::needless_pass_by_value)]
pub fn mouse_look(
    time: Res<Time>,
    input: Res<FrameInput>,
    settings: Res<Settings>,
    mut cameras: Query<(&mut Transform, &mut MouseLook)>,
    mut bodies: Query<&mut Transform, Without<MouseLook>>,
    mut windows: Query<&mut Window, With<bevy::window::PrimaryWindow>>,
) {
    let dt = time.delta_seconds();

    for (mut transform, mut look) in &mut cameras {
        look.seed(transform.rotation);
        let before = look.pitch;
        let step = look.step(&input, &settings.camera.mouse_look, dt);
        if look.looking || step.pitch != before {
            transform.rotation = rig_rotation(0.0, step.pitch);
        }

        if step.yaw_delta != 0.0 {
            if let Ok(mut body) = bodies.get_mut(look.body) {
                body.rotate_y(-step.yaw_delta.to_radians());
            }
        }

        if let (Some(lock), Ok(mut window)) = (step.cursor, windows.get_single_mut()) {
            lock.apply(&mut window);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ButtonEdge;

    #[test]
    fn pitch_is_clamped() {
        let settings = MouseLookSettings::default();
        let mut look = MouseLook::new(Entity::from_raw(1));
        look.looking = true;

        let input = FrameInput { look: ButtonEdge::hold(), look_delta: Vec2::new(0.0, -1000.0), ..Default::default() };
        let step = look.step(&input, &settings, 1.0);
        assert_eq!(step.pitch, settings.max_pitch);

        let input = FrameInput { look: ButtonEdge::hold(), look_delta: Vec2::new(0.0, 1000.0), ..Default::default() };
        let step = look.step(&input, &settings, 1.0);
        assert_eq!(step.pitch, settings.min_pitch);
    }

    #[test]
    fn first_frame_delta_is_applied() {
        let settings = MouseLookSettings::default();
        let mut look = MouseLook::new(Entity::from_raw(1));
        let input = FrameInput { look: ButtonEdge::down(), look_delta: Vec2::new(0.5, 0.0), ..Default::default() };
        let step = look.step(&input, &settings, 0.1);
        assert_eq!(step.cursor, Some(CursorLock::Locked));
        assert!((step.yaw_delta - 0.5 * settings.sensitivity * 0.1).abs() < 1e-4);
    }

    #[test]
    fn released_button_stops_turning() {
        let settings = MouseLookSettings::default();
        let mut look = MouseLook::new(Entity::from_raw(1));
        look.looking = true;
        let input = FrameInput { look: ButtonEdge::up(), look_delta: Vec2::new(5.0, 5.0), ..Default::default() };
        let step = look.step(&input, &settings, 0.1);
        assert_eq!(step.cursor, Some(CursorLock::Released));
        assert_eq!(step.yaw_delta, 0.0);
        assert_eq!(step.pitch, 0.0);
    }

    #[test]
    fn seed_reads_the_camera_pitch_once() {
        let settings = MouseLookSettings::default();
        let mut look = MouseLook::new(Entity::from_raw(1));
        look.seed(rig_rotation(0.0, 20.0));
        assert!((look.pitch - 20.0).abs() < 1e-3);

        look.seed(Quat::IDENTITY);
        assert!((look.pitch - 20.0).abs() < 1e-3);

        let step = look.step(&FrameInput::default(), &settings, 0.1);
        assert!((step.pitch - 20.0).abs() < 1e-3);
    }

    #[test]
    fn idle_camera_keeps_its_authored_rotation() {
        let authored = rig_rotation(0.0, 20.0) * Quat::from_rotation_z(0.1);

        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<FrameInput>()
            .insert_resource(Settings::default())
            .add_systems(Update, mouse_look);
        let body = app.world_mut().spawn(TransformBundle::default()).id();
        let camera = app
            .world_mut()
            .spawn((TransformBundle::from_transform(Transform::from_rotation(authored)), MouseLook::new(body)))
            .id();

        app.update();
        app.update();

        let world = app.world();
        assert_eq!(world.get::<Transform>(camera).unwrap().rotation, authored);
        assert!((world.get::<MouseLook>(camera).unwrap().pitch - 20.0).abs() < 1e-3);
        assert_eq!(world.get::<Transform>(body).unwrap().rotation, Quat::IDENTITY);

        // looking rewrites the rotation from the seeded pitch
        app.world_mut().insert_resource(FrameInput { look: ButtonEdge::down(), ..Default::default() });
        app.update();
        let rotation = app.world().get::<Transform>(camera).unwrap().rotation;
        assert!(rotation.angle_between(rig_rotation(0.0, 20.0)) < 1e-3);
    }
}
