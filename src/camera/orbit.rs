//! Third-person orbit rig.
//!
//! The rig keeps target yaw/pitch accumulated from mouse input while the look
//! button is held, and smooths its current yaw/pitch, distance and position
//! towards them every frame. The camera always sits behind the smoothed
//! rotation at `current_distance` from the anchor (target + offset).

use bevy::prelude::*;

use super::{CameraError, CursorLock};
use crate::input::FrameInput;
use crate::math::{
    exp_lerp_factor, rig_rotation, smooth_damp_angle, smooth_damp_vec3, yaw_pitch_from_rotation,
};
use crate::settings::{OrbitSettings, Settings};

/// Scroll values smaller than this are treated as no scroll.
const SCROLL_DEADZONE: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RigMode {
    #[default]
    Idle,
    Rotating,
}

/// Smoothed orbit state. Angles in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitRig {
    pub mode: RigMode,
    /// Drop the next mouse delta; set when the cursor gets locked so the
    /// pointer warp does not spin the camera.
    pub skip_next_delta: bool,
    pub yaw: f32,
    pub pitch: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,
    pub current_distance: f32,
    pub desired_distance: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    position_velocity: Vec3,
}

/// What one rig update produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigOutput {
    pub translation: Vec3,
    pub rotation: Quat,
    pub cursor: Option<CursorLock>,
}

impl OrbitRig {
    /// Seed a rig from the camera's current orientation.
    ///
    /// Pitch is clamped into `[min_pitch, max_pitch]` and distance into
    /// `[min_distance, max_distance]` so the invariants hold from the first frame.
    #[must_use]
    pub fn from_rotation(rotation: Quat, settings: &OrbitSettings) -> Self {
        let (yaw, pitch) = yaw_pitch_from_rotation(rotation);
        let pitch = pitch.clamp(settings.min_pitch, settings.max_pitch);
        let distance = settings.distance.clamp(settings.min_distance, settings.max_distance);

        Self {
            mode: RigMode::Idle,
            skip_next_delta: false,
            yaw,
            pitch,
            target_yaw: yaw,
            target_pitch: pitch,
            current_distance: distance,
            desired_distance: distance,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            position_velocity: Vec3::ZERO,
        }
    }

    /// Track the look button and accumulate target angles while rotating.
    pub fn handle_input(&mut self, input: &FrameInput, settings: &OrbitSettings, dt: f32) -> Option<CursorLock> {
        let mut cursor = None;

        if input.look.pressed {
            self.mode = RigMode::Rotating;
            self.skip_next_delta = true;
            cursor = Some(CursorLock::Locked);
        }
        if self.mode == RigMode::Rotating && (input.look.released || !input.look.held) {
            self.mode = RigMode::Idle;
            cursor = Some(CursorLock::Released);
        }

        if self.mode == RigMode::Rotating {
            if self.skip_next_delta {
                self.skip_next_delta = false;
            } else {
                self.target_yaw += input.look_delta.x * settings.rotation_speed * dt;
                self.target_pitch -= input.look_delta.y * settings.rotation_speed * dt;
            }
        }

        // clamped every frame so a hot-reloaded range applies immediately
        self.target_pitch = self.target_pitch.clamp(settings.min_pitch, settings.max_pitch);
        cursor
    }

    /// Apply scroll to the desired distance and ease the current distance towards it.
    pub fn update_zoom(&mut self, scroll: f32, settings: &OrbitSettings, dt: f32) {
        if scroll.abs() > SCROLL_DEADZONE {
            self.desired_distance -= scroll * settings.zoom_speed;
        }
        self.desired_distance = self.desired_distance.clamp(settings.min_distance, settings.max_distance);

        let t = exp_lerp_factor(settings.zoom_smooth_time, dt);
        let eased = self.current_distance + (self.desired_distance - self.current_distance) * t;
        self.current_distance = eased.clamp(settings.min_distance, settings.max_distance);
    }

    /// Smooth the angles and camera position towards their targets.
    ///
    /// # Arguments
    /// * `position` - camera position at the start of the frame
    /// * `anchor` - world point the rig orbits (target origin + offset)
    pub fn update_orbit(&mut self, position: Vec3, anchor: Vec3, settings: &OrbitSettings, dt: f32) -> (Vec3, Quat) {
        self.yaw = smooth_damp_angle(self.yaw, self.target_yaw, &mut self.yaw_velocity, settings.rotation_smooth_time, dt);
        self.pitch = smooth_damp_angle(self.pitch, self.target_pitch, &mut self.pitch_velocity, settings.rotation_smooth_time, dt);

        let rotation = rig_rotation(self.yaw, self.pitch);
        let desired = anchor - rotation * Vec3::NEG_Z * self.current_distance;
        let translation = smooth_damp_vec3(position, desired, &mut self.position_velocity, settings.position_smooth_time, dt);
        (translation, rotation)
    }

    /// Full per-frame update: input, zoom, then orbit.
    pub fn update(
        &mut self,
        input: &FrameInput,
        position: Vec3,
        target: Vec3,
        settings: &OrbitSettings,
        dt: f32,
    ) -> RigOutput {
        let cursor = self.handle_input(input, settings, dt);
        self.update_zoom(input.scroll, settings, dt);
        let (translation, rotation) = self.update_orbit(position, target + settings.target_offset(), settings, dt);
        RigOutput { translation, rotation, cursor }
    }
}

#[derive(Debug, Clone, Default)]
enum OrbitState {
    #[default]
    Pending,
    Active(OrbitRig),
    Disabled,
}

/// Third-person camera following `target`.
///
/// The rig activates on the first frame it is updated. Without a target it
/// disables itself for the rest of the session.
#[derive(Component, Debug, Clone, Default)]
pub struct OrbitCamera {
    pub target: Option<Entity>,
    state: OrbitState,
}

impl OrbitCamera {
    #[must_use]
    pub fn new(target: Option<Entity>) -> Self {
        Self { target, state: OrbitState::Pending }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, OrbitState::Pending)
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        matches!(self.state, OrbitState::Disabled)
    }

    /// Seed the rig from the camera's rotation.
    ///
    /// # Errors
    /// Returns [`CameraError::MissingTarget`] when no target is assigned; the
    /// camera is then disabled and later calls are no-ops.
    pub fn activate(&mut self, camera: Entity, rotation: Quat, settings: &OrbitSettings) -> Result<(), CameraError> {
        if self.target.is_none() {
            self.state = OrbitState::Disabled;
            return Err(CameraError::MissingTarget { camera });
        }
        self.state = OrbitState::Active(OrbitRig::from_rotation(rotation, settings));
        Ok(())
    }

    #[must_use]
    pub fn rig(&self) -> Option<&OrbitRig> {
        match &self.state {
            OrbitState::Active(rig) => Some(rig),
            _ => None,
        }
    }

    pub fn rig_mut(&mut self) -> Option<&mut OrbitRig> {
        match &mut self.state {
            OrbitState::Active(rig) => Some(rig),
            _ => None,
        }
    }
}

/// Late-update the orbit cameras after gameplay has moved their targets.
///
/// # Arguments
/// * `cameras` - orbit cameras and their transforms
/// * `targets` - target transforms (targets are root entities, so local == world)
/// * `windows` - primary window, for cursor lock requests
#[allow(clippy::needless_pass_by_value)]
pub fn orbit_camera(
    time: Res<Time>,
    input: Res<FrameInput>,
    settings: Res<Settings>,
    mut cameras: Query<(Entity, &mut Transform, &mut OrbitCamera)>,
    targets: Query<&Transform, Without<OrbitCamera>>,
    mut windows: Query<&mut Window, With<bevy::window::PrimaryWindow>>,
) {
    let dt = time.delta_seconds();
    let orbit_settings = &settings.camera.orbit;

    for (entity, mut transform, mut orbit) in &mut cameras {
        if orbit.is_pending() {
            if let Err(e) = orbit.activate(entity, transform.rotation, orbit_settings) {
                warn!("{e}");
            }
        }

        // a despawned target skips the frame rather than disabling the rig
        let Some(target) = orbit.target.and_then(|t| targets.get(t).ok()).map(|t| t.translation) else {
            continue;
        };
        let Some(rig) = orbit.rig_mut() else { continue };

        let out = rig.update(&input, transform.translation, target, orbit_settings, dt);
        transform.translation = out.translation;
        transform.rotation = out.rotation;

        if let (Some(lock), Ok(mut window)) = (out.cursor, windows.get_single_mut()) {
            lock.apply(&mut window);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ButtonEdge;

    const DT: f32 = 1.0 / 60.0;

    fn held(delta: Vec2) -> FrameInput {
        FrameInput { look: ButtonEdge::hold(), look_delta: delta, ..Default::default() }
    }

    #[test]
    fn first_delta_after_lock_is_dropped() {
        let settings = OrbitSettings::default();
        let mut rig = OrbitRig::from_rotation(Quat::IDENTITY, &settings);

        let press = FrameInput { look: ButtonEdge::down(), look_delta: Vec2::new(50.0, 0.0), ..Default::default() };
        assert_eq!(rig.handle_input(&press, &settings, DT), Some(CursorLock::Locked));
        assert_eq!(rig.target_yaw, 0.0);

        rig.handle_input(&held(Vec2::new(1.0, 0.0)), &settings, DT);
        assert!((rig.target_yaw - settings.rotation_speed * DT).abs() < 1e-4);

        let release = FrameInput { look: ButtonEdge::up(), ..Default::default() };
        assert_eq!(rig.handle_input(&release, &settings, DT), Some(CursorLock::Released));
        assert_eq!(rig.mode, RigMode::Idle);
    }

    #[test]
    fn idle_rig_ignores_motion() {
        let settings = OrbitSettings::default();
        let mut rig = OrbitRig::from_rotation(Quat::IDENTITY, &settings);
        let input = FrameInput { look_delta: Vec2::new(30.0, 30.0), ..Default::default() };
        assert_eq!(rig.handle_input(&input, &settings, DT), None);
        assert_eq!((rig.target_yaw, rig.target_pitch), (0.0, 0.0));
    }

    #[test]
    fn pitch_and_distance_stay_clamped() {
        let settings = OrbitSettings::default();
        let mut rig = OrbitRig::from_rotation(Quat::IDENTITY, &settings);
        rig.skip_next_delta = false;
        rig.mode = RigMode::Rotating;

        let mut position = Vec3::new(0.0, 2.0, 5.0);
        for i in 0..600 {
            let sign = if (i / 100) % 2 == 0 { 1.0 } else { -1.0 };
            let input = FrameInput {
                look: ButtonEdge::hold(),
                look_delta: Vec2::new(3.0, 40.0 * sign),
                scroll: 2.0 * sign,
                ..Default::default()
            };
            let out = rig.update(&input, position, Vec3::ZERO, &settings, DT);
            position = out.translation;

            assert!((settings.min_pitch..=settings.max_pitch).contains(&rig.target_pitch));
            assert!((settings.min_pitch - 1e-3..=settings.max_pitch + 1e-3).contains(&rig.pitch));
            assert!((settings.min_distance..=settings.max_distance).contains(&rig.desired_distance));
            assert!((settings.min_distance..=settings.max_distance).contains(&rig.current_distance));
        }
    }

    #[test]
    fn seeding_clamps_initial_pitch() {
        let settings = OrbitSettings::default();
        // looking straight down is past the 70 degree limit
        let rot = rig_rotation(15.0, 89.0);
        let rig = OrbitRig::from_rotation(rot, &settings);
        assert!((rig.yaw - 15.0).abs() < 1e-3);
        assert_eq!(rig.pitch, settings.max_pitch);
    }

    #[test]
    fn scroll_up_zooms_in() {
        let settings = OrbitSettings::default();
        let mut rig = OrbitRig::from_rotation(Quat::IDENTITY, &settings);
        rig.update_zoom(0.1, &settings, DT);
        assert!((rig.desired_distance - (settings.distance - 0.1 * settings.zoom_speed)).abs() < 1e-5);
        assert!(rig.current_distance < settings.distance);
        assert!(rig.current_distance > rig.desired_distance);
    }

    #[test]
    fn camera_settles_behind_anchor() {
        let settings = OrbitSettings::default();
        let mut rig = OrbitRig::from_rotation(Quat::IDENTITY, &settings);
        let input = FrameInput::default();
        let mut position = Vec3::ZERO;
        let mut rotation = Quat::IDENTITY;
        for _ in 0..300 {
            let out = rig.update(&input, position, Vec3::ZERO, &settings, DT);
            position = out.translation;
            rotation = out.rotation;
        }

        let anchor = settings.target_offset();
        assert!((position - (anchor + Vec3::Z * settings.distance)).length() < 1e-2);
        // camera faces the anchor
        let to_anchor = (anchor - position).normalize();
        assert!((rotation * Vec3::NEG_Z).dot(to_anchor) > 0.999);
    }

    #[test]
    fn missing_target_disables_camera() {
        let mut camera = OrbitCamera::new(None);
        let entity = Entity::from_raw(7);
        let err = camera.activate(entity, Quat::IDENTITY, &OrbitSettings::default()).unwrap_err();
        assert_eq!(err, CameraError::MissingTarget { camera: entity });
        assert!(camera.is_disabled());
        assert!(camera.rig().is_none());
    }

    #[test]
    fn despawned_target_skips_the_frame() {
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<FrameInput>()
            .insert_resource(Settings::default())
            .add_systems(Update, orbit_camera);
        app.world_mut().resource_mut::<Time>().advance_by(std::time::Duration::from_millis(16));

        let target = app.world_mut().spawn(TransformBundle::from_transform(Transform::from_xyz(0.0, 1.0, 6.0))).id();
        let camera = app
            .world_mut()
            .spawn((TransformBundle::from_transform(Transform::from_xyz(0.0, 3.0, 12.0)), OrbitCamera::new(Some(target))))
            .id();

        app.update();
        let followed = *app.world().get::<Transform>(camera).unwrap();
        assert_ne!(followed.translation, Vec3::new(0.0, 3.0, 12.0));

        app.world_mut().despawn(target);
        let parked = Transform::from_xyz(4.0, 4.0, 4.0).with_rotation(Quat::from_rotation_y(1.0));
        *app.world_mut().get_mut::<Transform>(camera).unwrap() = parked;
        app.update();

        let world = app.world();
        assert_eq!(*world.get::<Transform>(camera).unwrap(), parked);
        let orbit = world.get::<OrbitCamera>(camera).unwrap();
        assert!(!orbit.is_disabled());
        assert!(orbit.rig().is_some());
    }
}
