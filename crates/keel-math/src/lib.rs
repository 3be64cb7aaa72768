// SPDX-License-Identifier: Apache-2.0
//! Math primitives for the Keel spatial kernel: vectors, column-major
//! matrices, quaternions, and ordered Euler angles.
//!
//! All arithmetic uses `f32`. Degenerate inputs (zero-length vectors,
//! singular matrices, zero-norm quaternions) are recovered locally with
//! well-defined sentinel values rather than panics; callers that care must
//! check for the sentinel. See the individual type docs for the exact
//! contracts.

use std::f32::consts::TAU;

mod euler;
mod mat3;
mod mat4;
mod quat;
mod vec2;
mod vec3;
mod vec4;

pub use euler::{Euler, EulerOrder};
pub use mat3::Mat3;
pub use mat4::{DepthRange, Mat4};
pub use quat::Quat;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;

/// Global epsilon used by math routines when detecting degenerate values.
///
/// This is a degeneracy threshold, not numeric precision: lengths,
/// determinants, and sines at or below it are treated as zero so downstream
/// callers can detect the sentinel results deterministically.
pub const EPSILON: f32 = 1e-6;

/// Clamps `value` to the inclusive `[min, max]` range.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    debug_assert!(min <= max, "invalid clamp range: {min} > {max}");
    value.max(min).min(max)
}

/// Linear interpolation between `a` and `b` by factor `t`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Converts degrees to radians with float32 precision.
pub fn deg_to_rad(value: f32) -> f32 {
    value * (TAU / 360.0)
}

/// Converts radians to degrees with float32 precision.
pub fn rad_to_deg(value: f32) -> f32 {
    value * (360.0 / TAU)
}
