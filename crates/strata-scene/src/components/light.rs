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

use crate::component::ComponentBase;
use crate::components::transform;
use crate::error::Result;
use crate::light::Light;
use crate::sobj::SObj;
use crate::Component;
use parking_lot::RwLock;
use std::sync::Arc;
use strata_core::math::{Mat4, Vec3};

/// A component that turns its scene object into a light source.
///
/// The payload describes the emitter; the owner's transforms place it in the
/// world.
#[derive(Debug, Component)]
pub struct CmptLight {
    base: ComponentBase,
    light: RwLock<Light>,
}

impl CmptLight {
    /// Creates a light component and attaches it to `sobj`.
    pub fn new(sobj: &Arc<SObj>, light: Light) -> Result<Arc<Self>> {
        sobj.attach_component(Self::detached(light))
    }

    /// Creates a light component that is not attached to anything yet.
    #[must_use]
    pub fn detached(light: Light) -> Arc<Self> {
        Arc::new(Self {
            base: ComponentBase::new(),
            light: RwLock::new(light),
        })
    }

    /// Returns a copy of the light payload.
    #[must_use]
    pub fn light(&self) -> Light {
        *self.light.read()
    }

    /// Replaces the light payload.
    pub fn set_light(&self, light: Light) {
        *self.light.write() = light;
    }

    /// Returns the light-to-world matrix with every scale factor dropped.
    ///
    /// Walks from the owner up to the root, accumulating `T * R` of each
    /// [`CmptTransform`](crate::components::CmptTransform) met on the way. Lights are sized by their own
    /// payload, so hierarchy scale must not stretch them.
    ///
    /// Returns [`Mat4::IDENTITY`] when the component has no live owner.
    #[must_use]
    pub fn light_to_world_matrix_without_scale(&self) -> Mat4 {
        let Some(sobj) = self.sobj() else {
            return Mat4::IDENTITY;
        };

        transform::rigid_to_world(&sobj)
    }

    /// Returns the world-space position of the light, or the origin when the
    /// component has no live owner.
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.light_to_world_matrix_without_scale()
            .transform_point3(Vec3::ZERO)
    }

    /// Returns the world-space emission axis (the owner's `-Y`).
    #[must_use]
    pub fn world_direction(&self) -> Vec3 {
        self.light_to_world_matrix_without_scale()
            .transform_vector3(Vec3::NEG_Y)
            .normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::CmptTransform;
    use crate::light::{PointLight, SpotLight};
    use approx::assert_relative_eq;
    use strata_core::math::Quat;

    #[test]
    fn test_detached_light_defaults_to_identity() {
        let light = CmptLight::detached(Light::default());
        assert!(light.sobj().is_none());
        assert_eq!(light.light_to_world_matrix_without_scale(), Mat4::IDENTITY);
        assert_eq!(light.world_position(), Vec3::ZERO);
    }

    #[test]
    fn test_owner_dropped_defaults_to_identity() {
        let sobj = SObj::new(None, "lamp");
        CmptTransform::from_position(&sobj, Vec3::new(0.0, 3.0, 0.0)).unwrap();
        let light = CmptLight::new(&sobj, Light::default()).unwrap();
        assert_eq!(light.world_position(), Vec3::new(0.0, 3.0, 0.0));

        drop(sobj);
        assert_eq!(light.light_to_world_matrix_without_scale(), Mat4::IDENTITY);
    }

    #[test]
    fn test_matrix_ignores_scale_and_accumulates_parents() {
        let root = SObj::new(None, "root");
        let lamp = SObj::new(Some(&root), "lamp");
        CmptTransform::new(&root, Vec3::new(5.0, 0.0, 0.0), Quat::IDENTITY, Vec3::splat(10.0)).unwrap();
        CmptTransform::new(&lamp, Vec3::new(0.0, 2.0, 0.0), Quat::IDENTITY, Vec3::splat(3.0)).unwrap();
        let light = CmptLight::new(&lamp, Light::Point(PointLight::default())).unwrap();

        let p = light.world_position();
        assert_relative_eq!(p.x, 5.0);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.z, 0.0);
    }

    #[test]
    fn test_world_direction_follows_rotation() {
        let sobj = SObj::new(None, "spot");
        let rotation = Quat::from_rotation_x(std::f32::consts::FRAC_PI_2);
        CmptTransform::new(&sobj, Vec3::ZERO, rotation, Vec3::ONE).unwrap();
        let light = CmptLight::new(&sobj, Light::Spot(SpotLight::default())).unwrap();

        let d = light.world_direction();
        assert_relative_eq!(d.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(d.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(d.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_set_light() {
        let light = CmptLight::detached(Light::default());
        let spot = Light::Spot(SpotLight::default());
        light.set_light(spot);
        assert_eq!(light.light(), spot);
    }
}
