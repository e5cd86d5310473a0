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

//! Defines [`SObj`], the node of the scene hierarchy.
//!
//! An `SObj` exclusively owns its children and its components and holds a
//! weak back-reference to its parent. Handles are always `Arc<SObj>`: the
//! parent (or the [`Scene`](crate::scene::Scene), for the root) holds the
//! owning one, and every handle returned by a query is a shared reference.

use crate::component::{self, Component};
use crate::components::CmptTransform;
use crate::error::{Result, SceneError};
use crate::traversal::{Ascend, Descend};
use crate::visitor::Visitor;
use parking_lot::RwLock;
use std::any::{type_name, TypeId};
use std::fmt;
use std::sync::Arc;
use strata_core::math::Mat4;
use strata_core::BackRef;

/// Components of one scene object, at most one per concrete type, kept in
/// attach order.
#[derive(Default)]
struct ComponentMap {
    slots: Vec<(TypeId, Arc<dyn Component>)>,
}

impl ComponentMap {
    fn get(&self, ty: TypeId) -> Option<&Arc<dyn Component>> {
        self.slots.iter().find(|(t, _)| *t == ty).map(|(_, c)| c)
    }

    fn contains(&self, ty: TypeId) -> bool {
        self.get(ty).is_some()
    }

    fn insert(&mut self, ty: TypeId, component: Arc<dyn Component>) {
        self.slots.push((ty, component));
    }

    fn remove(&mut self, ty: TypeId) -> Option<Arc<dyn Component>> {
        let index = self.slots.iter().position(|(t, _)| *t == ty)?;
        Some(self.slots.remove(index).1)
    }
}

/// A scene object: a named node owning ordered children and typed components.
pub struct SObj {
    name: RwLock<String>,
    parent: BackRef<SObj>,
    children: RwLock<Vec<Arc<SObj>>>,
    components: RwLock<ComponentMap>,
}

impl SObj {
    /// Creates a scene object and, if `parent` is given, appends it to the
    /// parent's children before returning.
    ///
    /// The parent owns the new node; the returned handle is a shared reference.
    pub fn new(parent: Option<&Arc<SObj>>, name: impl Into<String>) -> Arc<Self> {
        let sobj = Arc::new(Self {
            name: RwLock::new(name.into()),
            parent: BackRef::empty(),
            children: RwLock::new(Vec::new()),
            components: RwLock::new(ComponentMap::default()),
        });
        if let Some(parent) = parent {
            sobj.parent.set(parent);
            parent.children.write().push(Arc::clone(&sobj));
        }
        sobj
    }

    // --- Naming ---

    /// Returns a copy of the object's name.
    #[must_use]
    pub fn name(&self) -> String {
        self.name.read().clone()
    }

    /// Renames the object. Scene IDs are keyed by name, so a rename
    /// invalidates them until [`Scene::gen_id`](crate::scene::Scene::gen_id)
    /// runs again.
    pub fn set_name(&self, name: impl Into<String>) {
        *self.name.write() = name.into();
    }

    // --- Hierarchy ---

    /// Returns the parent, or `None` for a root or when the parent is gone.
    #[must_use]
    pub fn parent(&self) -> Option<Arc<SObj>> {
        self.parent.get()
    }

    /// Returns a snapshot of the children, in order.
    #[must_use]
    pub fn children(&self) -> Vec<Arc<SObj>> {
        self.children.read().clone()
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.read().len()
    }

    /// Returns the top of the hierarchy this object belongs to.
    #[must_use]
    pub fn root(self: &Arc<Self>) -> Arc<SObj> {
        self.ascend().last().unwrap_or_else(|| Arc::clone(self))
    }

    /// Returns `true` if `self` is a strict ancestor of `other`.
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Arc<SObj>) -> bool {
        other.ascend().skip(1).any(|a| std::ptr::eq(Arc::as_ptr(&a), self))
    }

    /// Makes `child` the last child of `self`, removing it from its previous
    /// parent first.
    ///
    /// Adding an object to itself or to one of its own descendants is rejected
    /// with [`SceneError::HierarchyCycle`]. Adding an existing child again is a
    /// no-op.
    pub fn add_child(self: &Arc<Self>, child: &Arc<SObj>) -> Result<()> {
        if Arc::ptr_eq(self, child) || child.is_ancestor_of(self) {
            let err = SceneError::HierarchyCycle {
                parent: self.name(),
                child: child.name(),
            };
            log::warn!("{err}");
            return Err(err);
        }
        if child.parent.points_to(self) {
            return Ok(());
        }

        child.detach_from_parent();
        child.parent.set(self);
        self.children.write().push(Arc::clone(child));
        Ok(())
    }

    /// Removes `child` from the children of `self` and clears its parent
    /// reference. Returns `false` if it was not a child.
    ///
    /// If the returned-to caller holds no other handle, the child subtree and
    /// its components are dropped.
    pub fn remove_child(&self, child: &SObj) -> bool {
        let removed = {
            let mut children = self.children.write();
            children
                .iter()
                .position(|c| std::ptr::eq(Arc::as_ptr(c), child))
                .map(|index| children.remove(index))
        };
        match removed {
            Some(removed) => {
                removed.parent.clear();
                true
            }
            None => false,
        }
    }

    /// Removes this object from its parent, making it a root. Returns `false`
    /// if it had no live parent.
    pub fn detach_from_parent(&self) -> bool {
        self.parent()
            .is_some_and(|parent| parent.remove_child(self))
    }

    // --- Components ---

    /// Attaches `component`, making this object its owner.
    ///
    /// At most one component of a given concrete type may be attached: a
    /// second one is rejected with [`SceneError::DuplicateComponent`]. A
    /// component that is live on another object is rejected with
    /// [`SceneError::ComponentAlreadyAttached`]. A rejected call changes
    /// nothing.
    pub fn attach_component<T: Component>(self: &Arc<Self>, component: Arc<T>) -> Result<Arc<T>> {
        let mut components = self.components.write();
        if components.contains(TypeId::of::<T>()) {
            let err = SceneError::DuplicateComponent {
                sobj: self.name(),
                component: type_name::<T>(),
            };
            log::warn!("{err}");
            return Err(err);
        }
        if let Err(owner) = component.base().owner().claim(self) {
            let err = SceneError::ComponentAlreadyAttached {
                component: type_name::<T>(),
                owner: owner.name(),
            };
            log::warn!("{err}");
            return Err(err);
        }

        components.insert(TypeId::of::<T>(), Arc::clone(&component) as Arc<dyn Component>);
        log::debug!("Attached {} to '{}'", type_name::<T>(), self.name());
        Ok(component)
    }

    /// Attaches `component`, detaching any existing component of the same
    /// type first. Returns the detached component.
    ///
    /// A component that is already live on some object (including this one)
    /// is rejected with [`SceneError::ComponentAlreadyAttached`].
    pub fn replace_component<T: Component>(
        self: &Arc<Self>,
        component: Arc<T>,
    ) -> Result<Option<Arc<T>>> {
        let mut components = self.components.write();
        if let Err(owner) = component.base().owner().claim(self) {
            let err = SceneError::ComponentAlreadyAttached {
                component: type_name::<T>(),
                owner: owner.name(),
            };
            log::warn!("{err}");
            return Err(err);
        }

        let previous = components.remove(TypeId::of::<T>()).and_then(|old| {
            old.base().owner().clear();
            component::downcast::<T>(old)
        });
        components.insert(TypeId::of::<T>(), Arc::clone(&component) as Arc<dyn Component>);
        Ok(previous)
    }

    /// Detaches the component of type `T`, clearing its owner reference.
    pub fn detach_component<T: Component>(&self) -> Option<Arc<T>> {
        let removed = self.components.write().remove(TypeId::of::<T>())?;
        removed.base().owner().clear();
        component::downcast::<T>(removed)
    }

    /// Returns the component of type `T`, if attached.
    #[must_use]
    pub fn component<T: Component>(&self) -> Option<Arc<T>> {
        let erased = self.component_by_type_id(TypeId::of::<T>())?;
        component::downcast::<T>(erased)
    }

    /// Returns `true` if a component of type `T` is attached.
    #[must_use]
    pub fn has_component<T: Component>(&self) -> bool {
        self.components.read().contains(TypeId::of::<T>())
    }

    /// Returns every attached component, in attach order.
    #[must_use]
    pub fn components(&self) -> Vec<Arc<dyn Component>> {
        self.components
            .read()
            .slots
            .iter()
            .map(|(_, c)| Arc::clone(c))
            .collect()
    }

    pub(crate) fn component_by_type_id(&self, ty: TypeId) -> Option<Arc<dyn Component>> {
        self.components.read().get(ty).cloned()
    }

    /// Returns the first component of type `T` in this subtree, in pre-order
    /// (this object first).
    #[must_use]
    pub fn component_in_children<T: Component>(self: &Arc<Self>) -> Option<Arc<T>> {
        self.descend().find_map(|sobj| sobj.component::<T>())
    }

    /// Returns every component of type `T` in this subtree, in pre-order.
    #[must_use]
    pub fn components_in_children<T: Component>(self: &Arc<Self>) -> Vec<Arc<T>> {
        let mut found = Vec::new();
        let mut visitor = Visitor::new();
        visitor.on_component::<T>(|c| found.push(Arc::clone(c)));
        visitor.descend(self);
        drop(visitor);
        found
    }

    // --- Traversal ---

    /// Iterates over this subtree in pre-order.
    #[must_use]
    pub fn descend(self: &Arc<Self>) -> Descend {
        Descend::new(self)
    }

    /// Iterates from this object up to the root.
    #[must_use]
    pub fn ascend(self: &Arc<Self>) -> Ascend {
        Ascend::new(self)
    }

    /// Runs `visitor` over this subtree in pre-order.
    pub fn accept(self: &Arc<Self>, visitor: &mut Visitor<'_>) {
        visitor.descend(self);
    }

    /// Runs `visitor` over this object and its ancestors, up to the root.
    pub fn ascend_accept(self: &Arc<Self>, visitor: &mut Visitor<'_>) {
        visitor.ascend(self);
    }

    // --- Spatial ---

    /// Accumulates the [`CmptTransform`]s from this object up to the root.
    ///
    /// Objects without a transform contribute identity, so a hierarchy with no
    /// transforms at all yields [`Mat4::IDENTITY`].
    #[must_use]
    pub fn local_to_world_matrix(self: &Arc<Self>) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut visitor = Visitor::new();
        visitor.on_component::<CmptTransform>(|t| matrix = t.to_mat4() * matrix);
        visitor.ascend(self);
        drop(visitor);
        matrix
    }
}

impl fmt::Debug for SObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SObj")
            .field("name", &*self.name.read())
            .field("children", &self.child_count())
            .field("components", &self.components.read().slots.len())
            .finish()
    }
}
