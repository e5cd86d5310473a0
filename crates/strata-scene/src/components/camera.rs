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
use crate::sobj::SObj;
use crate::Component;
use parking_lot::RwLock;
use std::sync::Arc;
use strata_core::math::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Projection {
    fov_y: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
}

/// A component that defines a perspective camera looking down its owner's
/// `-Z` axis.
#[derive(Debug, Component)]
pub struct CmptCamera {
    base: ComponentBase,
    projection: RwLock<Projection>,
}

impl CmptCamera {
    /// Default vertical field of view, in degrees.
    pub const DEFAULT_FOV_Y: f32 = 60.0;
    /// Default aspect ratio (width / height).
    pub const DEFAULT_ASPECT_RATIO: f32 = 16.0 / 9.0;
    /// Default near plane distance.
    pub const DEFAULT_NEAR: f32 = 0.001;
    /// Default far plane distance.
    pub const DEFAULT_FAR: f32 = 1000.0;

    /// Creates a camera and attaches it to `sobj`.
    ///
    /// `fov_y` is the vertical field of view in degrees.
    pub fn new(
        sobj: &Arc<SObj>,
        fov_y: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Result<Arc<Self>> {
        sobj.attach_component(Self::detached(fov_y, aspect_ratio, near, far))
    }

    /// Creates a camera with the default parameters and attaches it to `sobj`.
    pub fn with_defaults(sobj: &Arc<SObj>) -> Result<Arc<Self>> {
        Self::new(
            sobj,
            Self::DEFAULT_FOV_Y,
            Self::DEFAULT_ASPECT_RATIO,
            Self::DEFAULT_NEAR,
            Self::DEFAULT_FAR,
        )
    }

    /// Creates a camera that is not attached to anything yet.
    #[must_use]
    pub fn detached(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Arc<Self> {
        Arc::new(Self {
            base: ComponentBase::new(),
            projection: RwLock::new(Projection {
                fov_y,
                aspect_ratio,
                near,
                far,
            }),
        })
    }

    /// Returns the vertical field of view, in degrees.
    #[must_use]
    pub fn fov_y(&self) -> f32 {
        self.projection.read().fov_y
    }

    /// Returns the aspect ratio.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.projection.read().aspect_ratio
    }

    /// Returns the near and far plane distances.
    #[must_use]
    pub fn clip_planes(&self) -> (f32, f32) {
        let projection = self.projection.read();
        (projection.near, projection.far)
    }

    /// Sets the vertical field of view, in degrees.
    pub fn set_fov_y(&self, fov_y: f32) {
        self.projection.write().fov_y = fov_y;
    }

    /// Sets the aspect ratio, typically after a viewport resize.
    pub fn set_aspect_ratio(&self, aspect_ratio: f32) {
        self.projection.write().aspect_ratio = aspect_ratio;
    }

    /// Returns the right-handed perspective projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        let p = *self.projection.read();
        Mat4::perspective_rh(p.fov_y.to_radians(), p.aspect_ratio, p.near, p.far)
    }

    /// Returns the camera-to-world matrix, scale excluded.
    ///
    /// Returns [`Mat4::IDENTITY`] when the camera has no live owner.
    #[must_use]
    pub fn camera_to_world_matrix(&self) -> Mat4 {
        self.sobj()
            .map_or(Mat4::IDENTITY, |sobj| transform::rigid_to_world(&sobj))
    }

    /// Returns the world-to-camera matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.camera_to_world_matrix().inverse()
    }

    /// Returns the camera position in world space.
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.camera_to_world_matrix().transform_point3(Vec3::ZERO)
    }
}
