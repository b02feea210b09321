use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Below this a sine or cosine is treated as exactly zero, so rays that are
/// axis-aligned up to float noise never divide by it.
pub const AXIS_EPSILON: f32 = 1e-6;

/// Wrap an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f32) -> f32 {
    let angle = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if angle >= TAU {
        0.
    } else {
        angle
    }
}

/// Which half-planes a ray travels toward. Screen coordinates, so y grows
/// downward and angles turn clockwise.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Facing {
    pub down: bool,
    pub right: bool,
}

impl Facing {
    /// `angle` must already be normalized.
    pub fn from_angle(angle: f32) -> Self {
        Self {
            down: angle > 0. && angle < PI,
            right: angle < FRAC_PI_2 || angle > 3. * FRAC_PI_2,
        }
    }

    pub fn up(&self) -> bool {
        !self.down
    }

    pub fn left(&self) -> bool {
        !self.right
    }
}

/// Force `step` to point the way the facing flag says, whatever sign the
/// trigonometry produced.
pub fn signed_step(step: f32, positive: bool) -> f32 {
    if positive {
        step.abs()
    } else {
        -step.abs()
    }
}
