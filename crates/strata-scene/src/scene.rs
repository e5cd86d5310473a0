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

//! Defines [`Scene`], the top-level container of a scene-object tree.
//!
//! The scene owns the root object, gates structural mutation behind a write
//! lock, answers the per-frame queries of the render loop (active camera,
//! lights, environment light) and derives a name ↔ ID bijection over the whole
//! tree for serialization and tooling.

use crate::component::Component;
use crate::components::{CmptCamera, CmptLight};
use crate::config::{DuplicatePolicy, SceneConfig};
use crate::error::{Result, SceneError};
use crate::light::InfiniteAreaLight;
use crate::sobj::SObj;
use parking_lot::{Mutex, MutexGuard, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// The ID returned for objects and names that have no ID.
pub const INVALID_ID: u32 = 0;

/// The two directions of the ID bijection.
#[derive(Debug, Default)]
struct IdTable {
    name_to_id: HashMap<String, u32>,
    id_to_name: HashMap<u32, String>,
}

impl IdTable {
    /// Assigns `1..=N` to the subtree of `root` in pre-order.
    fn build(root: &Arc<SObj>, log_each: bool) -> Result<Self> {
        let mut table = Self::default();
        for (index, sobj) in root.descend().enumerate() {
            let name = sobj.name();
            if table.name_to_id.contains_key(&name) {
                return Err(SceneError::DuplicateName(name));
            }
            let id = u32::try_from(index + 1).map_err(|_| SceneError::IdSpaceExhausted(index + 1))?;
            if log_each {
                log::debug!("ID {id} -> '{name}'");
            }
            table.id_to_name.insert(id, name.clone());
            table.name_to_id.insert(name, id);
        }
        Ok(table)
    }

    fn len(&self) -> usize {
        self.name_to_id.len()
    }

    fn clear(&mut self) {
        self.name_to_id.clear();
        self.id_to_name.clear();
    }
}

/// Proof that the holder has exclusive structural access to a [`Scene`].
///
/// Released when dropped, on every exit path.
#[must_use = "the write lock is released as soon as the guard is dropped"]
pub struct SceneWriteGuard<'a> {
    _guard: MutexGuard<'a, ()>,
}

/// The top-level container of a scene-object tree.
pub struct Scene {
    config: SceneConfig,
    root: RwLock<Option<Arc<SObj>>>,
    ids: RwLock<IdTable>,
    write_lock: Mutex<()>,
}

impl Scene {
    /// Creates a scene with the default configuration.
    #[must_use]
    pub fn new(root: Option<Arc<SObj>>) -> Self {
        Self::with_config(SceneConfig::default(), root)
    }

    /// Creates a scene with the given configuration.
    #[must_use]
    pub fn with_config(config: SceneConfig, root: Option<Arc<SObj>>) -> Self {
        Self {
            config,
            root: RwLock::new(root),
            ids: RwLock::new(IdTable::default()),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the scene name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Returns the scene configuration.
    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Returns the root object, if any.
    #[must_use]
    pub fn root(&self) -> Option<Arc<SObj>> {
        self.root.read().clone()
    }

    /// Replaces the root object and returns the previous one. IDs are cleared.
    pub fn set_root(&self, root: Option<Arc<SObj>>) -> Option<Arc<SObj>> {
        let previous = std::mem::replace(&mut *self.root.write(), root);
        self.ids.write().clear();
        previous
    }

    // --- Locking ---

    /// Acquires the structural write lock, blocking until it is free.
    ///
    /// Hold the guard across any mutation of the tree, and across traversals
    /// that must observe a consistent snapshot while other threads mutate.
    pub fn lock_write(&self) -> SceneWriteGuard<'_> {
        SceneWriteGuard {
            _guard: self.write_lock.lock(),
        }
    }

    /// Acquires the structural write lock if it is free.
    pub fn try_lock_write(&self) -> Option<SceneWriteGuard<'_>> {
        self.write_lock
            .try_lock()
            .map(|guard| SceneWriteGuard { _guard: guard })
    }

    // --- Components ---

    /// Attaches `component` to `sobj`, resolving a same-type conflict with
    /// the configured [`DuplicatePolicy`]. Returns the replaced component.
    pub fn attach_component<T: Component>(
        &self,
        sobj: &Arc<SObj>,
        component: Arc<T>,
    ) -> Result<Option<Arc<T>>> {
        match self.config.duplicate_component {
            DuplicatePolicy::Reject => sobj.attach_component(component).map(|_| None),
            DuplicatePolicy::Replace => sobj.replace_component(component),
        }
    }

    // --- IDs ---

    /// Assigns the IDs `1..=N` to every object reachable from the root, in
    /// pre-order (the root gets `1`). Returns `N`.
    ///
    /// Names are the keys of the bijection, so they must be unique: on the
    /// first duplicate, both directions are cleared and
    /// [`SceneError::DuplicateName`] is returned. The IDs are not maintained
    /// incrementally; they hold until the next structural change or rename.
    /// A scene without a root succeeds with no IDs.
    pub fn gen_id(&self) -> Result<usize> {
        let built = match self.root() {
            Some(root) => IdTable::build(&root, self.config.log_id_generation),
            None => Ok(IdTable::default()),
        };

        let mut ids = self.ids.write();
        match built {
            Ok(table) => {
                let count = table.len();
                *ids = table;
                log::debug!("Generated {count} IDs for scene '{}'", self.name());
                Ok(count)
            }
            Err(err) => {
                ids.clear();
                log::error!("ID generation failed for scene '{}': {err}", self.name());
                Err(err)
            }
        }
    }

    /// Returns the ID of `sobj`, or [`INVALID_ID`] if it has none.
    #[must_use]
    pub fn get_id(&self, sobj: &SObj) -> u32 {
        self.ids
            .read()
            .name_to_id
            .get(sobj.name().as_str())
            .copied()
            .unwrap_or(INVALID_ID)
    }

    /// Returns the name bound to `id`, or an empty string if there is none.
    #[must_use]
    pub fn get_name(&self, id: u32) -> String {
        self.ids
            .read()
            .id_to_name
            .get(&id)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the number of assigned IDs.
    #[must_use]
    pub fn id_count(&self) -> usize {
        self.ids.read().len()
    }

    /// Returns `true` if IDs are currently assigned.
    #[must_use]
    pub fn has_ids(&self) -> bool {
        self.id_count() > 0
    }

    /// Finds the first object named `name`, in pre-order.
    #[must_use]
    pub fn find_sobj_by_name(&self, name: &str) -> Option<Arc<SObj>> {
        self.root()?.descend().find(|sobj| sobj.name() == name)
    }

    /// Finds the object bound to `id`.
    #[must_use]
    pub fn find_sobj_by_id(&self, id: u32) -> Option<Arc<SObj>> {
        let name = self.ids.read().id_to_name.get(&id).cloned()?;
        self.find_sobj_by_name(&name)
    }

    // --- Render-loop queries ---

    /// Returns the first camera in pre-order from the root.
    #[must_use]
    pub fn get_cmpt_camera(&self) -> Option<Arc<CmptCamera>> {
        self.root()?.component_in_children::<CmptCamera>()
    }

    /// Returns every light in pre-order from the root; empty without a root.
    #[must_use]
    pub fn get_cmpt_lights(&self) -> Vec<Arc<CmptLight>> {
        self.root()
            .map(|root| root.components_in_children::<CmptLight>())
            .unwrap_or_default()
    }

    /// Returns the payload of the first light that is an
    /// [`InfiniteAreaLight`].
    #[must_use]
    pub fn get_infinite_area_light(&self) -> Option<InfiniteAreaLight> {
        self.get_cmpt_lights()
            .iter()
            .find_map(|cmpt| cmpt.light().as_infinite_area().copied())
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.config.name)
            .field("root", &self.root.read().as_ref().map(|r| r.name()))
            .field("ids", &self.id_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::{InfiniteAreaLight, Light, PointLight};

    fn sample() -> (Scene, Arc<SObj>, Arc<SObj>, Arc<SObj>) {
        let root = SObj::new(None, "A");
        let b = SObj::new(Some(&root), "B");
        let c = SObj::new(Some(&root), "C");
        (Scene::new(Some(Arc::clone(&root))), root, b, c)
    }

    #[test]
    fn test_gen_id_follows_pre_order() {
        let (scene, root, b, c) = sample();
        assert_eq!(scene.gen_id(), Ok(3));

        assert_eq!(scene.get_id(&root), 1);
        assert_eq!(scene.get_id(&b), 2);
        assert_eq!(scene.get_id(&c), 3);
        assert_eq!(scene.get_name(1), "A");
        assert_eq!(scene.get_name(3), "C");
    }

    #[test]
    fn test_gen_id_duplicate_clears_everything() {
        let (scene, root, _b, c) = sample();
        scene.gen_id().unwrap();

        c.set_name("A");
        assert_eq!(scene.gen_id(), Err(SceneError::DuplicateName(String::from("A"))));
        assert_eq!(scene.get_id(&root), INVALID_ID);
        assert_eq!(scene.get_name(1), "");
        assert!(!scene.has_ids());

        // Failing again leaves the same state.
        assert!(scene.gen_id().is_err());
        assert_eq!(scene.id_count(), 0);
    }

    #[test]
    fn test_gen_id_without_root() {
        let scene = Scene::new(None);
        assert_eq!(scene.gen_id(), Ok(0));
        assert!(scene.get_cmpt_camera().is_none());
        assert!(scene.get_cmpt_lights().is_empty());
        assert!(scene.get_infinite_area_light().is_none());
    }

    #[test]
    fn test_unknown_lookups_return_sentinels() {
        let (scene, _root, _b, _c) = sample();
        let stranger = SObj::new(None, "stranger");
        assert_eq!(scene.get_id(&stranger), INVALID_ID);
        assert_eq!(scene.get_name(INVALID_ID), "");

        scene.gen_id().unwrap();
        assert_eq!(scene.get_id(&stranger), INVALID_ID);
        assert_eq!(scene.get_name(42), "");
    }

    #[test]
    fn test_set_root_clears_ids() {
        let (scene, _root, _b, _c) = sample();
        scene.gen_id().unwrap();
        let previous = scene.set_root(Some(SObj::new(None, "other")));
        assert!(previous.is_some_and(|p| p.name() == "A"));
        assert!(!scene.has_ids());
    }

    #[test]
    fn test_find_by_id() {
        let (scene, _root, b, _c) = sample();
        scene.gen_id().unwrap();
        let found = scene.find_sobj_by_id(2).unwrap();
        assert!(Arc::ptr_eq(&found, &b));
        assert!(scene.find_sobj_by_id(9).is_none());
    }

    #[test]
    fn test_camera_and_lights() {
        let (scene, root, b, c) = sample();
        let camera = CmptCamera::with_defaults(&c).unwrap();
        CmptLight::new(&root, Light::Point(PointLight::default())).unwrap();
        let env = InfiniteAreaLight {
            intensity: 0.5,
            ..Default::default()
        };
        CmptLight::new(&b, Light::InfiniteArea(env)).unwrap();

        assert!(scene.get_cmpt_camera().is_some_and(|cam| Arc::ptr_eq(&cam, &camera)));
        assert_eq!(scene.get_cmpt_lights().len(), 2);
        assert_eq!(scene.get_infinite_area_light(), Some(env));
    }

    #[test]
    fn test_write_lock_is_exclusive() {
        let scene = Scene::new(None);
        let guard = scene.lock_write();
        assert!(scene.try_lock_write().is_none());
        drop(guard);
        assert!(scene.try_lock_write().is_some());
    }

    #[test]
    fn test_attach_component_honours_policy() {
        let sobj = SObj::new(None, "obj");
        let reject = Scene::new(Some(Arc::clone(&sobj)));
        reject
            .attach_component(&sobj, CmptLight::detached(Light::default()))
            .unwrap();
        assert!(reject
            .attach_component(&sobj, CmptLight::detached(Light::default()))
            .is_err());

        let replace = Scene::with_config(
            SceneConfig {
                duplicate_component: DuplicatePolicy::Replace,
                ..SceneConfig::default()
            },
            Some(Arc::clone(&sobj)),
        );
        let replaced = replace
            .attach_component(&sobj, CmptLight::detached(Light::default()))
            .unwrap();
        assert!(replaced.is_some_and(|old| old.sobj().is_none()));
    }
}
