//! Throw charge math and the charge bar state.

use crate::math::move_towards;
use crate::settings::BallSettings;

/// Floor for both the charge time and the force span used as divisors.
const MIN_DIVISOR: f32 = 0.01;

/// Force gained per second while the charge button is held.
#[must_use]
pub fn charge_rate(settings: &BallSettings) -> f32 {
    (settings.max_throw_force - settings.min_throw_force) / settings.max_charge_time.max(MIN_DIVISOR)
}

/// Force after holding charge for `elapsed` seconds, in closed form.
#[must_use]
pub fn charged_force(settings: &BallSettings, elapsed: f32) -> f32 {
    (settings.min_throw_force + elapsed * charge_rate(settings))
        .clamp(settings.min_throw_force, settings.max_throw_force)
}

/// Advance a charging force by one frame.
#[must_use]
pub fn advance_charge(force: f32, settings: &BallSettings, dt: f32) -> f32 {
    (force + charge_rate(settings) * dt).clamp(settings.min_throw_force, settings.max_throw_force)
}

/// Charge bar fill fraction for `force`, in [0, 1].
#[must_use]
pub fn charge_fill(force: f32, settings: &BallSettings) -> f32 {
    let span = (settings.max_throw_force - settings.min_throw_force).max(MIN_DIVISOR);
    ((force - settings.min_throw_force) / span).clamp(0.0, 1.0)
}

/// Fill and visibility of the charge bar.
///
/// Alpha eases towards 1 while charging and towards 0 otherwise, at
/// `ui_fade_speed` per second, regardless of when the charge started or ended.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChargeMeter {
    pub fill: f32,
    pub alpha: f32,
}

impl ChargeMeter {
    /// `charging` carries the current force while a charge is in progress.
    pub fn update(&mut self, charging: Option<f32>, settings: &BallSettings, dt: f32) {
        let (fill, target_alpha) = match charging {
            Some(force) => (charge_fill(force, settings), 1.0),
            None => (0.0, 0.0),
        };
        self.fill = fill;
        self.alpha = move_towards(self.alpha, target_alpha, settings.ui_fade_speed * dt);
    }
}
