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

//! Defines the light payloads carried by [`CmptLight`](crate::components::CmptLight).
//!
//! The set of light kinds is closed, so a light is a [`Light`] enum rather than
//! a trait object: consumers match on the variant instead of down-casting.
//! Position and orientation come from the owning scene object's transforms.

use strata_core::math::Vec3;

/// A light emitting equally in all directions from a point.
///
/// # Examples
///
/// ```
/// use strata_scene::light::PointLight;
/// use strata_core::math::Vec3;
///
/// // A warm bulb.
/// let bulb = PointLight {
///     color: Vec3::new(1.0, 0.9, 0.7),
///     intensity: 40.0,
///     radius: 0.05,
/// };
/// assert!(bulb.radius > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Linear RGB color.
    pub color: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
    /// Radius of the emitting sphere; `0.0` is an ideal point.
    pub radius: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
            radius: 0.0,
        }
    }
}

/// A light at infinite distance shining along the owner's `-Y` axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Linear RGB color.
    pub color: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

/// A point light restricted to a cone around the owner's `-Y` axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    /// Linear RGB color.
    pub color: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
    /// Radius of the emitting sphere.
    pub radius: f32,
    /// Full opening angle of the cone, in degrees.
    pub angle: f32,
    /// Fraction of the cone, from its axis, that receives full intensity.
    ///
    /// The remaining outer part falls off smoothly. Must lie in `[0, 1]`.
    pub full_ratio: f32,
}

impl SpotLight {
    /// Returns the cosine of the half opening angle.
    #[must_use]
    pub fn cos_half_angle(&self) -> f32 {
        (self.angle.to_radians() / 2.0).cos()
    }

    /// Returns the cosine of the half angle of the full-intensity inner cone.
    #[must_use]
    pub fn cos_falloff_angle(&self) -> f32 {
        (self.angle.to_radians() * self.full_ratio / 2.0).cos()
    }
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
            radius: 0.0,
            angle: 90.0,
            full_ratio: 0.8,
        }
    }
}

/// A rectangular emitter in the owner's `XZ` plane, facing `-Y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaLight {
    /// Linear RGB color.
    pub color: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
    /// Extent along the local `X` axis.
    pub width: f32,
    /// Extent along the local `Z` axis.
    pub height: f32,
}

impl AreaLight {
    /// Returns the emitting area.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

impl Default for AreaLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
            width: 1.0,
            height: 1.0,
        }
    }
}

/// An environment light surrounding the whole scene.
///
/// A scene uses at most one; see
/// [`Scene::get_infinite_area_light`](crate::scene::Scene::get_infinite_area_light).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfiniteAreaLight {
    /// Linear RGB color, modulating the environment.
    pub color: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
}

impl Default for InfiniteAreaLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

/// All supported light kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// See [`PointLight`].
    Point(PointLight),
    /// See [`DirectionalLight`].
    Directional(DirectionalLight),
    /// See [`SpotLight`].
    Spot(SpotLight),
    /// See [`AreaLight`].
    Area(AreaLight),
    /// See [`InfiniteAreaLight`].
    InfiniteArea(InfiniteAreaLight),
}

impl Light {
    /// Returns the light color.
    #[must_use]
    pub fn color(&self) -> Vec3 {
        match self {
            Light::Point(l) => l.color,
            Light::Directional(l) => l.color,
            Light::Spot(l) => l.color,
            Light::Area(l) => l.color,
            Light::InfiniteArea(l) => l.color,
        }
    }

    /// Returns the intensity multiplier.
    #[must_use]
    pub fn intensity(&self) -> f32 {
        match self {
            Light::Point(l) => l.intensity,
            Light::Directional(l) => l.intensity,
            Light::Spot(l) => l.intensity,
            Light::Area(l) => l.intensity,
            Light::InfiniteArea(l) => l.intensity,
        }
    }

    /// Returns the emitted radiance scale, `color * intensity`.
    #[must_use]
    pub fn radiance(&self) -> Vec3 {
        self.color() * self.intensity()
    }

    /// Returns `true` for lights that sit at infinite distance and have no
    /// meaningful position.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        matches!(self, Light::Directional(_) | Light::InfiniteArea(_))
    }

    /// Returns the payload if this is an [`InfiniteAreaLight`].
    #[must_use]
    pub fn as_infinite_area(&self) -> Option<&InfiniteAreaLight> {
        match self {
            Light::InfiniteArea(l) => Some(l),
            _ => None,
        }
    }
}

impl Default for Light {
    fn default() -> Self {
        Light::Point(PointLight::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_light_default_is_point() {
        assert!(matches!(Light::default(), Light::Point(_)));
    }

    #[test]
    fn test_radiance_scales_color() {
        let light = Light::Area(AreaLight {
            color: Vec3::new(1.0, 0.5, 0.25),
            intensity: 4.0,
            ..Default::default()
        });
        assert_eq!(light.radiance(), Vec3::new(4.0, 2.0, 1.0));
    }

    #[test]
    fn test_spot_cone_angles() {
        let spot = SpotLight {
            angle: 60.0,
            full_ratio: 0.5,
            ..Default::default()
        };
        assert_relative_eq!(spot.cos_half_angle(), 30.0_f32.to_radians().cos());
        assert!(spot.cos_falloff_angle() > spot.cos_half_angle());
    }

    #[test]
    fn test_infinite_kinds() {
        assert!(Light::InfiniteArea(InfiniteAreaLight::default()).is_infinite());
        assert!(Light::Directional(DirectionalLight::default()).is_infinite());
        assert!(!Light::Spot(SpotLight::default()).is_infinite());
    }

    #[test]
    fn test_as_infinite_area() {
        let env = InfiniteAreaLight {
            intensity: 0.3,
            ..Default::default()
        };
        assert_eq!(Light::InfiniteArea(env).as_infinite_area(), Some(&env));
        assert!(Light::default().as_infinite_area().is_none());
    }
}
