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

use anyhow::Result;
use std::sync::Arc;
use strata_core::math::{Mat4, Quat, Vec3};
use strata_scene::{
    CmptCamera, CmptLight, CmptTransform, Component, ComponentBase, Light, SObj, SceneError,
    Visitor,
};

// --- A component defined outside the crate, through the derive ---
#[derive(Debug, Component)]
struct CmptHealth {
    base: ComponentBase,
    points: u32,
}

impl CmptHealth {
    fn new(points: u32) -> Arc<Self> {
        Arc::new(Self {
            base: ComponentBase::new(),
            points,
        })
    }
}

#[test]
fn test_user_component_resolves_its_owner() -> Result<()> {
    let player = SObj::new(None, "player");
    let health = player.attach_component(CmptHealth::new(100))?;

    let owner = health.sobj().expect("attached component has an owner");
    assert!(Arc::ptr_eq(&owner, &player));
    assert_eq!(player.component::<CmptHealth>().map(|h| h.points), Some(100));
    Ok(())
}

#[test]
fn test_component_outliving_its_owner_falls_back_to_defaults() -> Result<()> {
    let light = {
        let root = SObj::new(None, "root");
        let lamp = SObj::new(Some(&root), "lamp");
        CmptTransform::from_position(&lamp, Vec3::new(0.0, 5.0, 0.0))?;
        let light = CmptLight::new(&lamp, Light::default())?;
        assert!(light
            .world_position()
            .abs_diff_eq(Vec3::new(0.0, 5.0, 0.0), 1e-5));
        light
    };

    assert!(light.sobj().is_none());
    assert!(!light.is_attached());
    assert_eq!(light.light_to_world_matrix_without_scale(), Mat4::IDENTITY);
    assert_eq!(light.world_position(), Vec3::ZERO);
    Ok(())
}

#[test]
fn test_never_attached_component_is_harmless() {
    let camera = CmptCamera::detached(45.0, 1.0, 0.1, 100.0);
    assert!(camera.sobj().is_none());
    assert_eq!(camera.camera_to_world_matrix(), Mat4::IDENTITY);
    assert_eq!(camera.view_matrix(), Mat4::IDENTITY);

    let health = CmptHealth::new(5);
    assert!(!health.is_attached());
}

#[test]
fn test_component_cannot_live_on_two_objects() -> Result<()> {
    let a = SObj::new(None, "a");
    let b = SObj::new(None, "b");
    let health = a.attach_component(CmptHealth::new(1))?;

    let err = b.attach_component(Arc::clone(&health)).unwrap_err();
    assert!(matches!(err, SceneError::ComponentAlreadyAttached { ref owner, .. } if owner == "a"));
    assert!(!b.has_component::<CmptHealth>());

    // Once detached it may move.
    a.detach_component::<CmptHealth>();
    b.attach_component(health)?;
    assert!(b.has_component::<CmptHealth>());
    Ok(())
}

#[test]
fn test_ascend_accumulates_transforms_up_to_root() -> Result<()> {
    let root = SObj::new(None, "root");
    let arm = SObj::new(Some(&root), "arm");
    let hand = SObj::new(Some(&arm), "hand");
    CmptTransform::new(
        &root,
        Vec3::new(1.0, 0.0, 0.0),
        Quat::IDENTITY,
        Vec3::splat(2.0),
    )?;
    CmptTransform::new(
        &arm,
        Vec3::ZERO,
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        Vec3::ONE,
    )?;
    CmptTransform::from_position(&hand, Vec3::new(1.0, 0.0, 0.0))?;

    let names: Vec<String> = hand.ascend().map(|s| s.name()).collect();
    assert_eq!(names, ["hand", "arm", "root"]);

    // hand at +X, rotated onto +Y by the arm, scaled by 2 and shifted by the root.
    let world = hand.local_to_world_matrix().transform_point3(Vec3::ZERO);
    assert!(world.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-5), "{world}");

    // The same walk through a visitor, collecting rotations only.
    let mut rotations = Vec::new();
    let mut visitor = Visitor::new();
    visitor.on_component::<CmptTransform>(|t| rotations.push(t.rotation()));
    hand.ascend_accept(&mut visitor);
    drop(visitor);
    assert_eq!(rotations.len(), 3);
    Ok(())
}

#[test]
fn test_reparenting_keeps_a_tree() -> Result<()> {
    let root = SObj::new(None, "root");
    let a = SObj::new(Some(&root), "a");
    let b = SObj::new(Some(&a), "b");

    let err = b.add_child(&root).unwrap_err();
    assert!(matches!(err, SceneError::HierarchyCycle { .. }));

    root.add_child(&b)?;
    assert_eq!(a.child_count(), 0);
    assert!(b.parent().is_some_and(|p| Arc::ptr_eq(&p, &root)));

    let order: Vec<String> = root.descend().map(|s| s.name()).collect();
    assert_eq!(order, ["root", "a", "b"]);
    Ok(())
}
