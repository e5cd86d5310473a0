// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Math types shared across the engine.
//!
//! Strata uses [`glam`] for its linear algebra. This module re-exports the
//! types the scene graph works with and adds the few helpers that the
//! component code needs on top of them.

pub use glam::{Mat3, Mat4, Quat, Vec3, Vec4};

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

/// Builds the rigid transform `T * R` from a translation and a rotation.
///
/// Scale is ignored; see [`trs`] for the full transform.
///
/// # Examples
///
/// ```
/// use strata_core::math::{rigid, Quat, Vec3};
///
/// let m = rigid(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
/// assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
/// ```
#[inline]
#[must_use]
pub fn rigid(translation: Vec3, rotation: Quat) -> Mat4 {
    Mat4::from_rotation_translation(rotation, translation)
}

/// Builds the transform `T * R * S`.
#[inline]
#[must_use]
pub fn trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(scale, rotation, translation)
}

/// Performs an approximate equality comparison using [`EPSILON`].
#[inline]
#[must_use]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rigid_ignores_scale_and_applies_rotation_first() {
        let rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let m = rigid(Vec3::new(0.0, 0.0, 5.0), rotation);
        let p = m.transform_point3(Vec3::X);

        assert_relative_eq!(p.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(p.y, 0.0, epsilon = EPSILON);
        assert_relative_eq!(p.z, 4.0, epsilon = EPSILON);
    }

    #[test]
    fn test_trs_scales_before_translating() {
        let m = trs(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY, Vec3::splat(2.0));
        let p = m.transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec3::new(3.0, 2.0, 2.0));
    }

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0 + EPSILON / 2.0));
        assert!(!approx_eq(1.0, 1.0 + EPSILON * 2.0));
    }
}
