//! Camera rigs (orbit and first-person) and cursor helpers.
//!
//! Both rigs keep their per-frame math in a plain struct (`OrbitRig`,
//! `MouseLook`) and expose a thin Bevy system that feeds it the frame's
//! `FrameInput` and writes the resulting pose back to transforms. Each rig
//! returns a `CursorLock` request when its look button changes state; the
//! systems apply it to the primary window.

pub mod mouse_look;
pub mod orbit;

use bevy::prelude::*;
use bevy::window::CursorGrabMode;

pub use mouse_look::*;
pub use orbit::*;

/// Marker for the camera gameplay code treats as "the player's view".
///
/// Movement reads its facing from this camera and the ball handler anchors
/// the held ball to it.
#[derive(Component, Default)]
pub struct PlayerCamera;

/// Errors raised when a camera rig cannot start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CameraError {
    #[error("orbit camera {camera:?} has no target; rig disabled for this session")]
    MissingTarget { camera: Entity },
}

/// Requested cursor state after a look button edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorLock {
    Locked,
    Released,
}

impl CursorLock {
    /// Apply this request to a window: grab and hide, or free and show.
    pub fn apply(self, window: &mut Window) {
        match self {
            CursorLock::Locked => {
                window.cursor.grab_mode = CursorGrabMode::Locked;
                window.cursor.visible = false;
            }
            CursorLock::Released => {
                window.cursor.grab_mode = CursorGrabMode::None;
                window.cursor.visible = true;
            }
        }
    }
}

/// Release the cursor on startup; both rigs start unlocked.
#[allow(clippy::needless_pass_by_value)]
pub fn release_cursor_on_start(mut windows: Query<&mut Window, With<bevy::window::PrimaryWindow>>) {
    if let Ok(mut window) = windows.get_single_mut() {
        CursorLock::Released.apply(&mut window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_requests_toggle_window_state() {
        let mut window = Window::default();
        CursorLock::Locked.apply(&mut window);
        assert_eq!(window.cursor.grab_mode, CursorGrabMode::Locked);
        assert!(!window.cursor.visible);

        CursorLock::Released.apply(&mut window);
        assert_eq!(window.cursor.grab_mode, CursorGrabMode::None);
        assert!(window.cursor.visible);
    }
}
