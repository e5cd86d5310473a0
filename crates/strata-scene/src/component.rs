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

//! The base capability attached to a scene object.
//!
//! A component is plain data plus a [`ComponentBase`], which carries the weak
//! back-reference to the [`SObj`] that owns it. Components are created detached
//! and become live through an explicit attach on their owner
//! ([`SObj::attach_component`]). The built-in factories (for instance
//! [`CmptTransform::new`](crate::components::CmptTransform::new)) perform both
//! steps in one call, so callers never observe a component that is half wired.

use crate::sobj::SObj;
use std::any::Any;
use std::sync::Arc;
use strata_core::BackRef;

/// Holds the state every component shares: the back-reference to its owner.
#[derive(Debug, Default)]
pub struct ComponentBase {
    owner: BackRef<SObj>,
}

impl ComponentBase {
    /// Creates a base that is not attached to any scene object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn owner(&self) -> &BackRef<SObj> {
        &self.owner
    }
}

/// Type-erasure helpers, implemented for every eligible type.
///
/// This is what lets an `Arc<dyn Component>` be turned back into an `Arc<T>`.
/// Call the `&self` methods on the dereferenced trait object
/// (`(*handle).type_name()`): the blanket impl also covers the `Arc` itself.
pub trait ComponentAny: Any + Send + Sync {
    /// Returns `self` as a `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Converts a shared component handle into a shared `Any` handle.
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    /// Returns the concrete type name, for diagnostics.
    fn type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync> ComponentAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A capability that can be attached to exactly one [`SObj`] at a time.
///
/// Implement it with `#[derive(Component)]` on a struct that has a
/// `base: ComponentBase` field.
pub trait Component: ComponentAny {
    /// Returns the shared component state.
    fn base(&self) -> &ComponentBase;

    /// Returns the scene object that owns this component.
    ///
    /// Returns `None` if the component was never attached, was detached, or
    /// its owner has been dropped.
    fn sobj(&self) -> Option<Arc<SObj>> {
        self.base().owner().get()
    }

    /// Returns `true` while the component is live on a scene object.
    fn is_attached(&self) -> bool {
        self.base().owner().is_live()
    }
}

/// Recovers the concrete type of a type-erased component.
pub(crate) fn downcast<T: Component>(component: Arc<dyn Component>) -> Option<Arc<T>> {
    component.into_any_arc().downcast::<T>().ok()
}
