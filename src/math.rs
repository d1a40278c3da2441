//! Smoothing and vector helpers shared by the camera, movement and ball code.
//!
//! All angles are in degrees unless a name says otherwise. The damping helpers
//! take the frame delta explicitly so the pure controllers stay deterministic
//! under test.

use bevy::math::{EulerRot, Quat, Vec3};

/// Lower bound applied to every smoothing time to avoid dividing by zero.
const MIN_SMOOTH_TIME: f32 = 0.0001;

/// Critically damped spring from `current` towards `target`.
///
/// `velocity` carries the spring state between frames. The result never
/// overshoots `target`; when it would, it snaps there and the velocity is
/// recomputed from the snapped step.
///
/// # Arguments
/// * `smooth_time` - approximate time to reach the target (floored at 1e-4)
/// * `max_speed` - speed cap, `f32::INFINITY` for none
/// * `dt` - frame delta in seconds; `dt <= 0` leaves everything unchanged
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);
    let clamped_target = current - change;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = clamped_target + (change + temp) * decay;

    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt;
    }

    output
}

/// [`smooth_damp`] along the shortest arc between two angles.
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, f32::INFINITY, dt)
}

/// Vector form of [`smooth_damp`] with the same overshoot guard.
pub fn smooth_damp_vec3(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    let to_target = target - current;
    let past_target = output - target;
    if to_target.dot(past_target) > 0.0 {
        output = target;
        *velocity = (output - target) / dt;
    }

    output
}

/// Shortest signed difference from `current` to `target`, in (-180, 180].
#[must_use]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Step `current` towards `target` by at most `max_delta`.
#[must_use]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

/// Frame-rate normalised interpolation weight: `1 - exp(-rate * dt * 60)`.
#[must_use]
pub fn exp_lerp_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt * 60.0).exp()
}

/// Remove the component of `v` along `normal`.
#[must_use]
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let n = normal.normalize_or_zero();
    v - n * v.dot(n)
}

/// Angle between a surface normal and world up, in degrees.
#[must_use]
pub fn angle_from_up_deg(normal: Vec3) -> f32 {
    normal.angle_between(Vec3::Y).to_degrees()
}

/// Build a camera rotation from yaw/pitch in degrees.
///
/// Positive yaw turns to the right, positive pitch looks down. The result
/// uses Bevy's convention where the local forward axis is -Z.
#[must_use]
pub fn rig_rotation(yaw_deg: f32, pitch_deg: f32) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        -yaw_deg.to_radians(),
        -pitch_deg.to_radians(),
        0.0,
    )
}

/// Inverse of [`rig_rotation`]: recover `(yaw_deg, pitch_deg)` from a rotation.
#[must_use]
pub fn yaw_pitch_from_rotation(rotation: Quat) -> (f32, f32) {
    let (yaw, pitch, _roll) = rotation.to_euler(EulerRot::YXZ);
    (-yaw.to_degrees(), -pitch.to_degrees())
}
