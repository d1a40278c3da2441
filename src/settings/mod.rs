//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are hot-reloadable
//! using the RON watcher utilities (see `ron::setup_ron_watcher`). Every gameplay
//! tuning value lives here so the controllers can be retuned while the game runs.
use bevy::prelude::{KeyCode, MouseButton, Resource, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod loader;

/// Errors raised while loading or sanitizing settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Load(#[from] crate::ron::RonError),
    #[error("{field}: {value} is not a finite number; reset to {default}")]
    NonFinite { field: &'static str, value: f32, default: f32 },
    #[error("{field}: min ({min}) is greater than max ({max}); bounds swapped")]
    ReversedBounds { field: &'static str, min: f32, max: f32 },
    #[error("{field}: {value} is outside [{lo}, {hi}]; clamped")]
    OutOfRange { field: &'static str, value: f32, lo: f32, hi: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsSettings {
    #[serde(default = "GraphicsSettings::default_vsync")]
    pub vsync: bool, // Enable vertical sync to cap FPS to the display refresh rate.
}

impl GraphicsSettings {
    fn default_vsync() -> bool { true }
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self { vsync: Self::default_vsync() }
    }
}

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default)]
    pub invert_y: bool, // Invert mouse Y axis
    #[serde(default)]
    pub invert_x: bool, // Invert mouse X axis
    #[serde(default = "ControlsSettings::default_sensitivity")]
    pub mouse_sensitivity: f32, // Multiplier applied on top of the pixel-to-axis scale
    #[serde(default = "ControlsSettings::default_keybinds")]
    pub keybinds: HashMap<String, String>, // Map of action names to key or mouse button identifiers
}

impl ControlsSettings {
    fn default_sensitivity() -> f32 { 1.0 }

    fn default_keybinds() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("forward".to_string(), "W".to_string());
        m.insert("back".to_string(), "S".to_string());
        m.insert("left".to_string(), "A".to_string());
        m.insert("right".to_string(), "D".to_string());
        m.insert("jump".to_string(), "Space".to_string());
        m.insert("slide".to_string(), "LShift".to_string());
        m.insert("interact".to_string(), "E".to_string());
        m.insert("look".to_string(), "MouseRight".to_string());
        m.insert("charge".to_string(), "MouseLeft".to_string());
        m.insert("toggle_debug".to_string(), "F1".to_string());
        m.insert("toggle_gizmos".to_string(), "F2".to_string());
        m.insert("dump_debug".to_string(), "F3".to_string());
        m
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            invert_y: false,
            invert_x: false,
            mouse_sensitivity: Self::default_sensitivity(),
            keybinds: Self::default_keybinds(),
        }
    }
}

/// Which camera rig the scene is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CameraMode {
    /// Third-person rig orbiting the player.
    Orbit,
    /// Camera attached to the player's head.
    #[default]
    FirstPerson,
}

/// Orbit rig tuning. Angles in degrees, distances in world units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitSettings {
    #[serde(default = "OrbitSettings::default_target_offset")]
    pub target_offset: [f32; 3], // Point on the target the rig looks at, relative to its origin
    #[serde(default = "OrbitSettings::default_distance")]
    pub distance: f32, // Starting distance from the target
    #[serde(default = "OrbitSettings::default_min_distance")]
    pub min_distance: f32,
    #[serde(default = "OrbitSettings::default_max_distance")]
    pub max_distance: f32,
    #[serde(default = "OrbitSettings::default_zoom_speed")]
    pub zoom_speed: f32, // Distance change per scroll axis unit
    #[serde(default = "OrbitSettings::default_zoom_smooth_time")]
    pub zoom_smooth_time: f32, // Rate used for the exponential distance smoothing
    #[serde(default = "OrbitSettings::default_rotation_speed")]
    pub rotation_speed: f32, // Degrees per second per axis unit
    #[serde(default = "OrbitSettings::default_min_pitch")]
    pub min_pitch: f32,
    #[serde(default = "OrbitSettings::default_max_pitch")]
    pub max_pitch: f32,
    #[serde(default = "OrbitSettings::default_position_smooth_time")]
    pub position_smooth_time: f32,
    #[serde(default = "OrbitSettings::default_rotation_smooth_time")]
    pub rotation_smooth_time: f32,
}

impl OrbitSettings {
    fn default_target_offset() -> [f32; 3] { [0.0, 1.6, 0.0] }
    fn default_distance() -> f32 { 5.0 }
    fn default_min_distance() -> f32 { 2.0 }
    fn default_max_distance() -> f32 { 10.0 }
    fn default_zoom_speed() -> f32 { 5.0 }
    fn default_zoom_smooth_time() -> f32 { 0.1 }
    fn default_rotation_speed() -> f32 { 200.0 }
    fn default_min_pitch() -> f32 { -30.0 }
    fn default_max_pitch() -> f32 { 70.0 }
    fn default_position_smooth_time() -> f32 { 0.05 }
    fn default_rotation_smooth_time() -> f32 { 0.05 }

    #[must_use]
    pub fn target_offset(&self) -> Vec3 { Vec3::from_array(self.target_offset) }
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            target_offset: Self::default_target_offset(),
            distance: Self::default_distance(),
            min_distance: Self::default_min_distance(),
            max_distance: Self::default_max_distance(),
            zoom_speed: Self::default_zoom_speed(),
            zoom_smooth_time: Self::default_zoom_smooth_time(),
            rotation_speed: Self::default_rotation_speed(),
            min_pitch: Self::default_min_pitch(),
            max_pitch: Self::default_max_pitch(),
            position_smooth_time: Self::default_position_smooth_time(),
            rotation_smooth_time: Self::default_rotation_smooth_time(),
        }
    }
}

/// First-person look tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MouseLookSettings {
    #[serde(default = "MouseLookSettings::default_sensitivity")]
    pub sensitivity: f32, // Degrees per second per axis unit
    #[serde(default = "MouseLookSettings::default_min_pitch")]
    pub min_pitch: f32,
    #[serde(default = "MouseLookSettings::default_max_pitch")]
    pub max_pitch: f32,
    #[serde(default = "MouseLookSettings::default_eye_height")]
    pub eye_height: f32, // Camera height above the body origin
}

impl MouseLookSettings {
    fn default_sensitivity() -> f32 { 200.0 }
    fn default_min_pitch() -> f32 { -80.0 }
    fn default_max_pitch() -> f32 { 80.0 }
    fn default_eye_height() -> f32 { 0.6 }
}

impl Default for MouseLookSettings {
    fn default() -> Self {
        Self {
            sensitivity: Self::default_sensitivity(),
            min_pitch: Self::default_min_pitch(),
            max_pitch: Self::default_max_pitch(),
            eye_height: Self::default_eye_height(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CameraSettings {
    #[serde(default)]
    pub mode: CameraMode,
    #[serde(default)]
    pub orbit: OrbitSettings,
    #[serde(default)]
    pub mouse_look: MouseLookSettings,
}

/// Slope slide tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideSettings {
    #[serde(default = "SlideSettings::default_acceleration")]
    pub acceleration: f32, // How fast slide speed builds on a steep slope
    #[serde(default = "SlideSettings::default_max_speed")]
    pub max_speed: f32, // Cap on slide speed
    #[serde(default = "SlideSettings::default_slope_limit")]
    pub slope_limit: f32, // Degrees from up a surface must exceed to slide
    #[serde(default = "SlideSettings::default_probe_height")]
    pub probe_height: f32, // Probe origin above the body origin
    #[serde(default = "SlideSettings::default_probe_radius")]
    pub probe_radius: f32,
    #[serde(default = "SlideSettings::default_probe_distance")]
    pub probe_distance: f32,
}

impl SlideSettings {
    fn default_acceleration() -> f32 { 15.0 }
    fn default_max_speed() -> f32 { 12.0 }
    fn default_slope_limit() -> f32 { 45.0 }
    fn default_probe_height() -> f32 { 0.2 }
    fn default_probe_radius() -> f32 { 0.3 }
    fn default_probe_distance() -> f32 { 1.0 }
}

impl Default for SlideSettings {
    fn default() -> Self {
        Self {
            acceleration: Self::default_acceleration(),
            max_speed: Self::default_max_speed(),
            slope_limit: Self::default_slope_limit(),
            probe_height: Self::default_probe_height(),
            probe_radius: Self::default_probe_radius(),
            probe_distance: Self::default_probe_distance(),
        }
    }
}

/// Walking, jumping and gravity tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementSettings {
    #[serde(default = "MovementSettings::default_move_speed")]
    pub move_speed: f32,
    #[serde(default = "MovementSettings::default_gravity")]
    pub gravity: f32, // Vertical acceleration, negative is down
    #[serde(default = "MovementSettings::default_jump_height")]
    pub jump_height: f32, // Apex height of a jump
    #[serde(default = "MovementSettings::default_ground_bias")]
    pub ground_bias: f32, // Vertical velocity held while standing, keeps ground contact stable
    #[serde(default)]
    pub slide: SlideSettings,
}

impl MovementSettings {
    fn default_move_speed() -> f32 { 5.0 }
    fn default_gravity() -> f32 { -9.81 }
    fn default_jump_height() -> f32 { 2.0 }
    fn default_ground_bias() -> f32 { -2.0 }
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            move_speed: Self::default_move_speed(),
            gravity: Self::default_gravity(),
            jump_height: Self::default_jump_height(),
            ground_bias: Self::default_ground_bias(),
            slide: SlideSettings::default(),
        }
    }
}

/// Pickup, charge and throw tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallSettings {
    #[serde(default = "BallSettings::default_pickup_range")]
    pub pickup_range: f32,
    #[serde(default = "BallSettings::default_pickup_height")]
    pub pickup_height: f32, // Height above the actor origin distances are measured from
    #[serde(default = "BallSettings::default_min_throw_force")]
    pub min_throw_force: f32, // Velocity change on a quick tap
    #[serde(default = "BallSettings::default_max_throw_force")]
    pub max_throw_force: f32, // Velocity change when fully charged
    #[serde(default = "BallSettings::default_max_charge_time")]
    pub max_charge_time: f32, // Seconds to reach max force
    #[serde(default = "BallSettings::default_upward_boost")]
    pub upward_boost: f32, // Adds arc to throws
    #[serde(default = "BallSettings::default_shrink_while_held")]
    pub shrink_while_held: bool,
    #[serde(default = "BallSettings::default_held_scale_factor")]
    pub held_scale_factor: f32, // Scale multiplier while held, within [0.25, 1]
    #[serde(default = "BallSettings::default_hold_offset")]
    pub hold_offset: [f32; 3], // Hold point in camera space (right, up, -forward)
    #[serde(default = "BallSettings::default_ui_fade_speed")]
    pub ui_fade_speed: f32, // Charge bar alpha change per second
}

impl BallSettings {
    pub const HELD_SCALE_RANGE: (f32, f32) = (0.25, 1.0);

    fn default_pickup_range() -> f32 { 6.0 }
    fn default_pickup_height() -> f32 { 1.0 }
    fn default_min_throw_force() -> f32 { 8.0 }
    fn default_max_throw_force() -> f32 { 22.0 }
    fn default_max_charge_time() -> f32 { 1.5 }
    fn default_upward_boost() -> f32 { 1.5 }
    fn default_shrink_while_held() -> bool { true }
    fn default_held_scale_factor() -> f32 { 0.6 }
    fn default_hold_offset() -> [f32; 3] { [0.35, -0.35, -1.9] }
    fn default_ui_fade_speed() -> f32 { 10.0 }

    #[must_use]
    pub fn hold_offset(&self) -> Vec3 { Vec3::from_array(self.hold_offset) }
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            pickup_range: Self::default_pickup_range(),
            pickup_height: Self::default_pickup_height(),
            min_throw_force: Self::default_min_throw_force(),
            max_throw_force: Self::default_max_throw_force(),
            max_charge_time: Self::default_max_charge_time(),
            upward_boost: Self::default_upward_boost(),
            shrink_while_held: Self::default_shrink_while_held(),
            held_scale_factor: Self::default_held_scale_factor(),
            hold_offset: Self::default_hold_offset(),
            ui_fade_speed: Self::default_ui_fade_speed(),
        }
    }
}

/// Goal volume behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSettings {
    #[serde(default = "GoalSettings::default_score_value")]
    pub score_value: u32,
    #[serde(default = "GoalSettings::default_reset_ball_on_score")]
    pub reset_ball_on_score: bool,
}

impl GoalSettings {
    fn default_score_value() -> u32 { 1 }
    fn default_reset_ball_on_score() -> bool { true }
}

impl Default for GoalSettings {
    fn default() -> Self {
        Self {
            score_value: Self::default_score_value(),
            reset_ball_on_score: Self::default_reset_ball_on_score(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default = "UiSettings::default_true")]
    pub show_score_text: bool, // Without a score label the score is written to the log
    #[serde(default = "UiSettings::default_true")]
    pub show_pickup_hint: bool,
}

impl UiSettings {
    fn default_true() -> bool { true }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { show_score_text: true, show_pickup_hint: true }
    }
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub graphics: GraphicsSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub movement: MovementSettings,
    #[serde(default)]
    pub ball: BallSettings,
    #[serde(default)]
    pub goal: GoalSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

/// Replace a NaN or infinite value with its default and report it.
fn finite_or_default(field: &'static str, value: &mut f32, default: f32, issues: &mut Vec<SettingsError>) {
    if !value.is_finite() {
        issues.push(SettingsError::NonFinite { field, value: *value, default });
        *value = default;
    }
}

fn finite_vec_or_default(field: &'static str, value: &mut [f32; 3], default: [f32; 3], issues: &mut Vec<SettingsError>) {
    for (v, d) in value.iter_mut().zip(default) {
        finite_or_default(field, v, d, issues);
    }
}

/// Swap a reversed `(min, max)` pair in place and report it.
fn order_bounds(field: &'static str, min: &mut f32, max: &mut f32, issues: &mut Vec<SettingsError>) {
    if *min > *max {
        issues.push(SettingsError::ReversedBounds { field, min: *min, max: *max });
        std::mem::swap(min, max);
    }
}

impl Settings {
    #[must_use]
    pub fn defaults() -> Self { Settings::default() }

    /// Repair non-finite values, out-of-order bounds and out-of-range factors.
    ///
    /// NaN or infinite numbers are reset to their defaults, reversed
    /// `(min, max)` pairs are swapped and `held_scale_factor` is clamped into
    /// [`BallSettings::HELD_SCALE_RANGE`]. Each repair is returned so the
    /// caller can log it.
    pub fn sanitize(&mut self) -> Vec<SettingsError> {
        let mut issues = self.reset_non_finite();

        let orbit = &mut self.camera.orbit;
        order_bounds("camera.orbit.pitch", &mut orbit.min_pitch, &mut orbit.max_pitch, &mut issues);
        order_bounds("camera.orbit.distance", &mut orbit.min_distance, &mut orbit.max_distance, &mut issues);

        let look = &mut self.camera.mouse_look;
        order_bounds("camera.mouse_look.pitch", &mut look.min_pitch, &mut look.max_pitch, &mut issues);

        let ball = &mut self.ball;
        order_bounds("ball.throw_force", &mut ball.min_throw_force, &mut ball.max_throw_force, &mut issues);

        let (lo, hi) = BallSettings::HELD_SCALE_RANGE;
        if !(lo..=hi).contains(&ball.held_scale_factor) {
            issues.push(SettingsError::OutOfRange {
                field: "ball.held_scale_factor",
                value: ball.held_scale_factor,
                lo,
                hi,
            });
            ball.held_scale_factor = ball.held_scale_factor.clamp(lo, hi);
        }

        issues
    }

    /// Reset every NaN or infinite float to its default.
    fn reset_non_finite(&mut self) -> Vec<SettingsError> {
        let d = Settings::default();
        let mut issues = Vec::new();
        let mut check = |field: &'static str, value: &mut f32, default: f32| {
            finite_or_default(field, value, default, &mut issues);
        };

        check("controls.mouse_sensitivity", &mut self.controls.mouse_sensitivity, d.controls.mouse_sensitivity);

        let (o, od) = (&mut self.camera.orbit, &d.camera.orbit);
        check("camera.orbit.distance", &mut o.distance, od.distance);
        check("camera.orbit.min_distance", &mut o.min_distance, od.min_distance);
        check("camera.orbit.max_distance", &mut o.max_distance, od.max_distance);
        check("camera.orbit.zoom_speed", &mut o.zoom_speed, od.zoom_speed);
        check("camera.orbit.zoom_smooth_time", &mut o.zoom_smooth_time, od.zoom_smooth_time);
        check("camera.orbit.rotation_speed", &mut o.rotation_speed, od.rotation_speed);
        check("camera.orbit.min_pitch", &mut o.min_pitch, od.min_pitch);
        check("camera.orbit.max_pitch", &mut o.max_pitch, od.max_pitch);
        check("camera.orbit.position_smooth_time", &mut o.position_smooth_time, od.position_smooth_time);
        check("camera.orbit.rotation_smooth_time", &mut o.rotation_smooth_time, od.rotation_smooth_time);

        let (l, ld) = (&mut self.camera.mouse_look, &d.camera.mouse_look);
        check("camera.mouse_look.sensitivity", &mut l.sensitivity, ld.sensitivity);
        check("camera.mouse_look.min_pitch", &mut l.min_pitch, ld.min_pitch);
        check("camera.mouse_look.max_pitch", &mut l.max_pitch, ld.max_pitch);
        check("camera.mouse_look.eye_height", &mut l.eye_height, ld.eye_height);

        let (m, md) = (&mut self.movement, &d.movement);
        check("movement.move_speed", &mut m.move_speed, md.move_speed);
        check("movement.gravity", &mut m.gravity, md.gravity);
        check("movement.jump_height", &mut m.jump_height, md.jump_height);
        check("movement.ground_bias", &mut m.ground_bias, md.ground_bias);
        check("movement.slide.acceleration", &mut m.slide.acceleration, md.slide.acceleration);
        check("movement.slide.max_speed", &mut m.slide.max_speed, md.slide.max_speed);
        check("movement.slide.slope_limit", &mut m.slide.slope_limit, md.slide.slope_limit);
        check("movement.slide.probe_height", &mut m.slide.probe_height, md.slide.probe_height);
        check("movement.slide.probe_radius", &mut m.slide.probe_radius, md.slide.probe_radius);
        check("movement.slide.probe_distance", &mut m.slide.probe_distance, md.slide.probe_distance);

        let (b, bd) = (&mut self.ball, &d.ball);
        check("ball.pickup_range", &mut b.pickup_range, bd.pickup_range);
        check("ball.pickup_height", &mut b.pickup_height, bd.pickup_height);
        check("ball.min_throw_force", &mut b.min_throw_force, bd.min_throw_force);
        check("ball.max_throw_force", &mut b.max_throw_force, bd.max_throw_force);
        check("ball.max_charge_time", &mut b.max_charge_time, bd.max_charge_time);
        check("ball.upward_boost", &mut b.upward_boost, bd.upward_boost);
        check("ball.held_scale_factor", &mut b.held_scale_factor, bd.held_scale_factor);
        check("ball.ui_fade_speed", &mut b.ui_fade_speed, bd.ui_fade_speed);

        finite_vec_or_default("camera.orbit.target_offset", &mut o.target_offset, od.target_offset, &mut issues);
        finite_vec_or_default("ball.hold_offset", &mut b.hold_offset, bd.hold_offset, &mut issues);
        issues
    }

    /// Convert a string key identifier (e.g., from `controls.keybinds`) into a `KeyCode` that
    /// can be used with Bevy's input system.
    ///
    /// # Arguments
    /// * `name` - The string key identifier to convert (e.g., "W", "Space", "F1").
    ///
    /// # Returns
    /// An `Option<KeyCode>` corresponding to the provided string, or `None` if the string
    /// does not match any known key.
    #[must_use]
    pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
        let s = name.to_ascii_uppercase();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_uppercase() {
                return Some(match c {
                    'A' => KeyCode::KeyA,
                    'B' => KeyCode::KeyB,
                    'C' => KeyCode::KeyC,
                    'D' => KeyCode::KeyD,
                    'E' => KeyCode::KeyE,
                    'F' => KeyCode::KeyF,
                    'G' => KeyCode::KeyG,
                    'H' => KeyCode::KeyH,
                    'I' => KeyCode::KeyI,
                    'J' => KeyCode::KeyJ,
                    'K' => KeyCode::KeyK,
                    'L' => KeyCode::KeyL,
                    'M' => KeyCode::KeyM,
                    'N' => KeyCode::KeyN,
                    'O' => KeyCode::KeyO,
                    'P' => KeyCode::KeyP,
                    'Q' => KeyCode::KeyQ,
                    'R' => KeyCode::KeyR,
                    'S' => KeyCode::KeyS,
                    'T' => KeyCode::KeyT,
                    'U' => KeyCode::KeyU,
                    'V' => KeyCode::KeyV,
                    'W' => KeyCode::KeyW,
                    'X' => KeyCode::KeyX,
                    'Y' => KeyCode::KeyY,
                    'Z' => KeyCode::KeyZ,
                    _ => return None,
                });
            }
            if c.is_ascii_digit() {
                return Some(match c {
                    '0' => KeyCode::Digit0,
                    '1' => KeyCode::Digit1,
                    '2' => KeyCode::Digit2,
                    '3' => KeyCode::Digit3,
                    '4' => KeyCode::Digit4,
                    '5' => KeyCode::Digit5,
                    '6' => KeyCode::Digit6,
                    '7' => KeyCode::Digit7,
                    '8' => KeyCode::Digit8,
                    '9' => KeyCode::Digit9,
                    _ => return None,
                });
            }
        }

        Some(match s.as_str() {
            "F1" => KeyCode::F1,
            "F2" => KeyCode::F2,
            "F3" => KeyCode::F3,
            "F4" => KeyCode::F4,
            "F5" => KeyCode::F5,
            "F6" => KeyCode::F6,
            "F7" => KeyCode::F7,
            "F8" => KeyCode::F8,
            "F9" => KeyCode::F9,
            "F10" => KeyCode::F10,
            "F11" => KeyCode::F11,
            "F12" => KeyCode::F12,

            // Arrows
            "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
            "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
            "UP" | "ARROWUP" => KeyCode::ArrowUp,
            "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,

            // Whitespace / control
            "ESC" | "ESCAPE" => KeyCode::Escape,
            "SPACE" => KeyCode::Space,
            "TAB" => KeyCode::Tab,
            "ENTER" | "RETURN" => KeyCode::Enter,
            "BACKSPACE" | "BACK" => KeyCode::Backspace,

            // Modifiers
            "LSHIFT" | "SHIFT" => KeyCode::ShiftLeft,
            "RSHIFT" => KeyCode::ShiftRight,
            "LCTRL" | "CTRL" | "CONTROL" => KeyCode::ControlLeft,
            "RCTRL" => KeyCode::ControlRight,
            "LALT" | "ALT" => KeyCode::AltLeft,
            "RALT" => KeyCode::AltRight,

            _ => return None,
        })
    }

    /// Convert a mouse button identifier (e.g. "MouseLeft") into a `MouseButton`.
    #[must_use]
    pub fn mouse_button_from_str(name: &str) -> Option<MouseButton> {
        match name.to_ascii_uppercase().as_str() {
            "MOUSELEFT" | "MOUSE1" | "LMB" => Some(MouseButton::Left),
            "MOUSERIGHT" | "MOUSE2" | "RMB" => Some(MouseButton::Right),
            "MOUSEMIDDLE" | "MOUSE3" | "MMB" => Some(MouseButton::Middle),
            "MOUSEBACK" => Some(MouseButton::Back),
            "MOUSEFORWARD" => Some(MouseButton::Forward),
            _ => None,
        }
    }
}
