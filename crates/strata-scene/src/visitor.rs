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

//! A callback registry that drives traversals over scene objects.
//!
//! A [`Visitor`] holds at most one callback for scene objects and at most one
//! callback per concrete component type. Visiting a node runs the scene-object
//! callback, then the callback of each registered component type the node
//! carries. Which nodes are visited, and in what order, is decided by the
//! traversal entry point ([`Visitor::descend`] or [`Visitor::ascend`]), never
//! by registration order.
//!
//! Callbacks are closures and may capture local state by reference, which is
//! how a traversal accumulates results:
//!
//! ```
//! use strata_scene::{SObj, Visitor};
//!
//! let root = SObj::new(None, "root");
//! SObj::new(Some(&root), "child");
//!
//! let mut names = Vec::new();
//! let mut visitor = Visitor::new();
//! visitor.on_sobj(|sobj| names.push(sobj.name()));
//! visitor.descend(&root);
//! drop(visitor);
//!
//! assert_eq!(names, ["root", "child"]);
//! ```

use crate::component::{self, Component};
use crate::sobj::SObj;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

type SObjCallback<'a> = Box<dyn FnMut(&Arc<SObj>) + 'a>;
type ComponentCallback<'a> = Box<dyn FnMut(Arc<dyn Component>) + 'a>;

/// A set of per-type callbacks run over scene objects.
///
/// No scene-graph lock is held while a callback runs, so callbacks may freely
/// query or modify the objects they are given.
#[derive(Default)]
pub struct Visitor<'a> {
    sobj: Option<SObjCallback<'a>>,
    components: Vec<(TypeId, ComponentCallback<'a>)>,
}

impl<'a> Visitor<'a> {
    /// Creates a visitor with no callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the callback run for every visited scene object, replacing
    /// any previous one.
    pub fn on_sobj(&mut self, callback: impl FnMut(&Arc<SObj>) + 'a) -> &mut Self {
        self.sobj = Some(Box::new(callback));
        self
    }

    /// Registers the callback run for every visited component of type `T`,
    /// replacing any previous callback for `T`.
    pub fn on_component<T: Component>(
        &mut self,
        mut callback: impl FnMut(&Arc<T>) + 'a,
    ) -> &mut Self {
        let erased: ComponentCallback<'a> = Box::new(move |c: Arc<dyn Component>| {
            if let Some(c) = component::downcast::<T>(c) {
                callback(&c);
            }
        });

        let ty = TypeId::of::<T>();
        match self.components.iter_mut().find(|(t, _)| *t == ty) {
            Some(slot) => slot.1 = erased,
            None => self.components.push((ty, erased)),
        }
        self
    }

    /// Returns `true` if no callback is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sobj.is_none() && self.components.is_empty()
    }

    /// Visits a single node: runs the matching callbacks, if any.
    pub fn visit(&mut self, sobj: &Arc<SObj>) {
        if let Some(callback) = self.sobj.as_mut() {
            callback(sobj);
        }
        for (ty, callback) in &mut self.components {
            if let Some(c) = sobj.component_by_type_id(*ty) {
                callback(c);
            }
        }
    }

    /// Visits `start` and then each child subtree in child order (pre-order).
    pub fn descend(&mut self, start: &Arc<SObj>) {
        for node in start.descend() {
            self.visit(&node);
        }
    }

    /// Visits `start`, then its parent, and so on up to the root.
    pub fn ascend(&mut self, start: &Arc<SObj>) {
        for node in start.ascend() {
            self.visit(&node);
        }
    }
}

impl fmt::Debug for Visitor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visitor")
            .field("sobj", &self.sobj.is_some())
            .field("components", &self.components.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentBase;
    use std::cell::RefCell;
    use crate::Component;

    #[derive(Debug, Component)]
    struct CmptWeight {
        base: ComponentBase,
        weight: u32,
    }

    fn weigh(sobj: &Arc<SObj>, weight: u32) {
        sobj.attach_component(Arc::new(CmptWeight {
            base: ComponentBase::new(),
            weight,
        }))
        .unwrap();
    }

    #[test]
    fn test_empty_visitor_is_noop() {
        let root = SObj::new(None, "root");
        let mut visitor = Visitor::new();
        assert!(visitor.is_empty());
        visitor.descend(&root);
        visitor.ascend(&root);
    }

    #[test]
    fn test_component_callback_only_sees_matching_nodes() {
        let root = SObj::new(None, "root");
        let a = SObj::new(Some(&root), "a");
        let b = SObj::new(Some(&root), "b");
        weigh(&a, 3);
        weigh(&b, 4);

        let mut total = 0;
        let mut visited = 0;
        let mut visitor = Visitor::new();
        visitor
            .on_sobj(|_| visited += 1)
            .on_component::<CmptWeight>(|w| total += w.weight);
        root.accept(&mut visitor);
        drop(visitor);

        assert_eq!(visited, 3);
        assert_eq!(total, 7);
    }

    #[test]
    fn test_registering_again_replaces() {
        let root = SObj::new(None, "root");
        weigh(&root, 5);

        let seen = RefCell::new(Vec::new());
        let mut visitor = Visitor::new();
        visitor.on_component::<CmptWeight>(|_| seen.borrow_mut().push("first"));
        visitor.on_component::<CmptWeight>(|_| seen.borrow_mut().push("second"));
        visitor.visit(&root);
        drop(visitor);

        assert_eq!(seen.into_inner(), ["second"]);
    }

    #[test]
    fn test_ascend_accept_order() {
        let root = SObj::new(None, "root");
        let mid = SObj::new(Some(&root), "mid");
        let leaf = SObj::new(Some(&mid), "leaf");

        let mut order = Vec::new();
        let mut visitor = Visitor::new();
        visitor.on_sobj(|s| order.push(s.name()));
        leaf.ascend_accept(&mut visitor);
        drop(visitor);

        assert_eq!(order, ["leaf", "mid", "root"]);
    }

    #[test]
    fn test_independent_visitors_do_not_interfere() {
        let root = SObj::new(None, "root");
        SObj::new(Some(&root), "a");

        let mut first = Vec::new();
        let mut second = 0;
        let mut v1 = Visitor::new();
        v1.on_sobj(|s| first.push(s.name()));
        let mut v2 = Visitor::new();
        v2.on_sobj(|_| second += 1);

        v1.descend(&root);
        v2.descend(&root);
        v1.descend(&root);
        drop(v1);
        drop(v2);

        assert_eq!(first, ["root", "a", "root", "a"]);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_callback_may_mutate_the_tree() {
        let root = SObj::new(None, "root");
        let mut visitor = Visitor::new();
        visitor.on_sobj(|s| s.set_name(format!("{}!", s.name())));
        visitor.descend(&root);
        assert_eq!(root.name(), "root!");
    }
}
