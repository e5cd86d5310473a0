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
use crate::error::Result;
use crate::sobj::SObj;
use crate::visitor::Visitor;
use crate::Component;
use parking_lot::RwLock;
use std::sync::Arc;
use strata_core::math::{self, Mat4, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pose {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
}

/// A component that places its scene object relative to its parent.
///
/// World placement is obtained by accumulating transforms up the hierarchy,
/// see [`SObj::local_to_world_matrix`].
#[derive(Debug, Component)]
pub struct CmptTransform {
    base: ComponentBase,
    pose: RwLock<Pose>,
}

impl CmptTransform {
    /// Creates a transform and attaches it to `sobj`.
    pub fn new(sobj: &Arc<SObj>, position: Vec3, rotation: Quat, scale: Vec3) -> Result<Arc<Self>> {
        sobj.attach_component(Self::detached(position, rotation, scale))
    }

    /// Creates a transform with only a translation and attaches it to `sobj`.
    pub fn from_position(sobj: &Arc<SObj>, position: Vec3) -> Result<Arc<Self>> {
        Self::new(sobj, position, Quat::IDENTITY, Vec3::ONE)
    }

    /// Creates a transform that is not attached to anything yet.
    #[must_use]
    pub fn detached(position: Vec3, rotation: Quat, scale: Vec3) -> Arc<Self> {
        Arc::new(Self {
            base: ComponentBase::new(),
            pose: RwLock::new(Pose {
                position,
                rotation,
                scale,
            }),
        })
    }

    /// Returns the translation relative to the parent.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.pose.read().position
    }

    /// Returns the rotation relative to the parent.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.pose.read().rotation
    }

    /// Returns the scale relative to the parent.
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.pose.read().scale
    }

    /// Sets the translation.
    pub fn set_position(&self, position: Vec3) {
        self.pose.write().position = position;
    }

    /// Sets the rotation. The quaternion is normalized on the way in.
    pub fn set_rotation(&self, rotation: Quat) {
        self.pose.write().rotation = rotation.normalize();
    }

    /// Sets the scale.
    pub fn set_scale(&self, scale: Vec3) {
        self.pose.write().scale = scale;
    }

    /// Moves the object by `delta` in parent space.
    pub fn translate(&self, delta: Vec3) {
        self.pose.write().position += delta;
    }

    /// Returns the local matrix, `T * R * S`.
    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        let pose = *self.pose.read();
        math::trs(pose.position, pose.rotation, pose.scale)
    }
}

/// Accumulates `T * R` of every transform from `sobj` up to the root,
/// ignoring scale.
pub(crate) fn rigid_to_world(sobj: &Arc<SObj>) -> Mat4 {
    let mut tsfm = Mat4::IDENTITY;
    let mut visitor = Visitor::new();
    visitor.on_component::<CmptTransform>(|t| {
        tsfm = math::rigid(t.position(), t.rotation()) * tsfm;
    });
    visitor.ascend(sobj);
    drop(visitor);
    tsfm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;

    #[test]
    fn test_new_attaches_to_owner() {
        let sobj = SObj::new(None, "obj");
        let transform = CmptTransform::from_position(&sobj, Vec3::X).unwrap();
        assert!(transform.sobj().is_some_and(|s| Arc::ptr_eq(&s, &sobj)));
        assert_eq!(transform.position(), Vec3::X);
        assert_eq!(transform.scale(), Vec3::ONE);
    }

    #[test]
    fn test_second_transform_rejected() {
        let sobj = SObj::new(None, "obj");
        CmptTransform::from_position(&sobj, Vec3::X).unwrap();
        let err = CmptTransform::from_position(&sobj, Vec3::Y).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateComponent { .. }));
        assert_eq!(sobj.component::<CmptTransform>().unwrap().position(), Vec3::X);
    }

    #[test]
    fn test_setters() {
        let transform = CmptTransform::detached(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);
        transform.set_position(Vec3::new(1.0, 2.0, 3.0));
        transform.translate(Vec3::ONE);
        transform.set_scale(Vec3::splat(3.0));
        transform.set_rotation(Quat::from_xyzw(0.0, 0.0, 0.0, 2.0));

        assert_eq!(transform.position(), Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(transform.scale(), Vec3::splat(3.0));
        assert!(transform.rotation().is_normalized());
        assert!(transform.sobj().is_none());
    }

    #[test]
    fn test_to_mat4_is_trs() {
        let transform = CmptTransform::detached(Vec3::new(0.0, 1.0, 0.0), Quat::IDENTITY, Vec3::splat(2.0));
        let p = transform.to_mat4().transform_point3(Vec3::ONE);
        assert_eq!(p, Vec3::new(2.0, 3.0, 2.0));
    }
}
