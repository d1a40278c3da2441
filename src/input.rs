//! Per-frame input snapshot.
//!
//! Every controller reads `FrameInput` instead of the raw Bevy input
//! resources, so the pure update functions can be driven by tests and benches
//! with hand-built snapshots. The snapshot is rebuilt once per frame in
//! `PreUpdate`, after Bevy has processed device events.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::settings::Settings;

/// Pixel delta to axis units, before `controls.mouse_sensitivity`.
pub const MOUSE_AXIS_SCALE: f32 = 0.1;
/// Axis units produced by one line-based wheel notch.
pub const SCROLL_PER_LINE: f32 = 0.1;
/// Pixel-based wheels (touchpads) report far larger values per gesture.
const SCROLL_PER_PIXEL: f32 = 0.001;

/// Edge and level state of one button for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonEdge {
    pub pressed: bool,
    pub held: bool,
    pub released: bool,
}

impl ButtonEdge {
    /// A button that went down this frame.
    #[must_use]
    pub fn down() -> Self {
        Self { pressed: true, held: true, released: false }
    }

    /// A button held since an earlier frame.
    #[must_use]
    pub fn hold() -> Self {
        Self { pressed: false, held: true, released: false }
    }

    /// A button that came up this frame.
    #[must_use]
    pub fn up() -> Self {
        Self { pressed: false, held: false, released: true }
    }
}

/// Everything the gameplay controllers read from devices in one frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct FrameInput {
    /// Hold-to-look button (orbit rotate / first-person look).
    pub look: ButtonEdge,
    /// Hold-to-charge, release-to-throw button.
    pub charge: ButtonEdge,
    /// Mouse motion in axis units; +y is pointer moving up.
    pub look_delta: Vec2,
    /// Wheel motion in axis units; positive zooms in.
    pub scroll: f32,
    /// x is strafe right, y is forward. Each component in [-1, 1].
    pub move_axes: Vec2,
    pub jump_pressed: bool,
    pub slide_held: bool,
    pub interact_pressed: bool,
}

/// A keyboard key or mouse button an action can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputBinding {
    Key(KeyCode),
    Mouse(MouseButton),
}

impl InputBinding {
    /// Parse a binding name such as `"W"`, `"LShift"` or `"MouseRight"`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Settings::mouse_button_from_str(name)
            .map(InputBinding::Mouse)
            .or_else(|| Settings::keycode_from_str(name).map(InputBinding::Key))
    }

    fn edge(self, keys: &ButtonInput<KeyCode>, mouse: &ButtonInput<MouseButton>) -> ButtonEdge {
        match self {
            InputBinding::Key(k) => ButtonEdge {
                pressed: keys.just_pressed(k),
                held: keys.pressed(k),
                released: keys.just_released(k),
            },
            InputBinding::Mouse(b) => ButtonEdge {
                pressed: mouse.just_pressed(b),
                held: mouse.pressed(b),
                released: mouse.just_released(b),
            },
        }
    }
}

/// Resolved bindings for every gameplay action.
///
/// Kept as a resource and rebuilt only when settings reload.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bindings {
    pub forward: InputBinding,
    pub back: InputBinding,
    pub left: InputBinding,
    pub right: InputBinding,
    pub jump: InputBinding,
    pub slide: InputBinding,
    pub interact: InputBinding,
    pub look: InputBinding,
    pub charge: InputBinding,
    pub toggle_debug: InputBinding,
    pub toggle_gizmos: InputBinding,
    pub dump_debug: InputBinding,
}

impl Bindings {
    /// Resolve the keybind table, falling back per action when a name is unknown.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let map = |action: &str, default: InputBinding| {
            settings
                .controls
                .keybinds
                .get(action)
                .and_then(|s| InputBinding::parse(s))
                .unwrap_or(default)
        };

        Self {
            forward: map("forward", InputBinding::Key(KeyCode::KeyW)),
            back: map("back", InputBinding::Key(KeyCode::KeyS)),
            left: map("left", InputBinding::Key(KeyCode::KeyA)),
            right: map("right", InputBinding::Key(KeyCode::KeyD)),
            jump: map("jump", InputBinding::Key(KeyCode::Space)),
            slide: map("slide", InputBinding::Key(KeyCode::ShiftLeft)),
            interact: map("interact", InputBinding::Key(KeyCode::KeyE)),
            look: map("look", InputBinding::Mouse(MouseButton::Right)),
            charge: map("charge", InputBinding::Mouse(MouseButton::Left)),
            toggle_debug: map("toggle_debug", InputBinding::Key(KeyCode::F1)),
            toggle_gizmos: map("toggle_gizmos", InputBinding::Key(KeyCode::F2)),
            dump_debug: map("dump_debug", InputBinding::Key(KeyCode::F3)),
        }
    }
}

impl Default for Bindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Was `binding` pressed this frame? Used by the debug toggles.
#[must_use]
pub fn just_pressed(
    binding: InputBinding,
    keys: &ButtonInput<KeyCode>,
    mouse: &ButtonInput<MouseButton>,
) -> bool {
    binding.edge(keys, mouse).pressed
}

/// `+1` when only `pos` is held, `-1` when only `neg` is held, else `0`.
#[must_use]
pub fn axis(pos: bool, neg: bool) -> f32 {
    f32::from(u8::from(pos)) - f32::from(u8::from(neg))
}

/// Convert accumulated raw mouse motion (pixels, +y down) into look axes.
#[must_use]
pub fn look_axes(raw: Vec2, settings: &Settings) -> Vec2 {
    let scale = settings.controls.mouse_sensitivity * MOUSE_AXIS_SCALE;
    let mut axes = Vec2::new(raw.x, -raw.y) * scale;
    if settings.controls.invert_x {
        axes.x = -axes.x;
    }
    if settings.controls.invert_y {
        axes.y = -axes.y;
    }
    axes
}

/// Rebuild `FrameInput` from this frame's device state.
///
/// # Arguments
/// * `keys` / `mouse` - button state for keyboard and mouse
/// * `motion` - raw mouse motion events for this frame
/// * `wheel` - mouse wheel events for this frame
/// * `bindings` - resolved keybinds
/// * `settings` - sensitivity and axis inversion
/// * `frame` - the snapshot resource to overwrite
#[allow(clippy::needless_pass_by_value)]
pub fn gather_frame_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    bindings: Res<Bindings>,
    settings: Res<Settings>,
    mut frame: ResMut<FrameInput>,
) {
    let held = |b: InputBinding| b.edge(&keys, &mouse).held;

    let raw: Vec2 = motion.read().map(|ev| ev.delta).sum();

    let scroll: f32 = wheel
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y * SCROLL_PER_LINE,
            MouseScrollUnit::Pixel => ev.y * SCROLL_PER_PIXEL,
        })
        .sum();

    *frame = FrameInput {
        look: bindings.look.edge(&keys, &mouse),
        charge: bindings.charge.edge(&keys, &mouse),
        look_delta: look_axes(raw, &settings),
        scroll,
        move_axes: Vec2::new(
            axis(held(bindings.right), held(bindings.left)),
            axis(held(bindings.forward), held(bindings.back)),
        ),
        jump_pressed: bindings.jump.edge(&keys, &mouse).pressed,
        slide_held: held(bindings.slide),
        interact_pressed: bindings.interact.edge(&keys, &mouse).pressed,
    };
}
