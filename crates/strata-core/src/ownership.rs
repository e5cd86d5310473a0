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

//! Ownership relations between graph nodes.
//!
//! Every node in a Strata graph is reached through one of three relations:
//!
//! - **Exclusive owner**: a single container holds the strong [`Shared`] handle
//!   that keeps the node alive (scene → root, object → children, object →
//!   components, model → layers, layer → units).
//! - **Shared reference**: additional [`Shared`] handles given out by queries.
//!   The node lives as long as the longest holder.
//! - **Weak back-reference**: a [`BackRef`] pointing up the hierarchy. It never
//!   extends the lifetime of its target and resolves to `None` once the target
//!   is gone.

use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};

/// A strong, thread-safe handle to a graph node.
pub type Shared<T> = Arc<T>;

/// A settable, non-owning reference from a node to the node that owns it.
///
/// The cell can be re-targeted through `&self`, which lets nodes shared behind
/// an [`Arc`] rewire their back-references without exclusive access.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use strata_core::BackRef;
///
/// let owner = Arc::new(String::from("owner"));
/// let back = BackRef::to(&owner);
/// assert_eq!(back.get().as_deref().map(String::as_str), Some("owner"));
///
/// drop(owner);
/// assert!(back.get().is_none());
/// ```
pub struct BackRef<T> {
    target: RwLock<Weak<T>>,
}

impl<T> BackRef<T> {
    /// Creates a back-reference that points at nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            target: RwLock::new(Weak::new()),
        }
    }

    /// Creates a back-reference pointing at `target`.
    #[must_use]
    pub fn to(target: &Arc<T>) -> Self {
        Self {
            target: RwLock::new(Arc::downgrade(target)),
        }
    }

    /// Resolves the reference, returning `None` if the target has been dropped
    /// or was never set.
    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        self.target.read().upgrade()
    }

    /// Points the reference at `target`, returning the previous live target.
    pub fn set(&self, target: &Arc<T>) -> Option<Arc<T>> {
        let previous = std::mem::replace(&mut *self.target.write(), Arc::downgrade(target));
        previous.upgrade()
    }

    /// Points the reference at `target` only if it does not currently resolve.
    ///
    /// The check and the write happen under one lock, so two concurrent claims
    /// can never both succeed. On failure the current live target is returned.
    pub fn claim(&self, target: &Arc<T>) -> Result<(), Arc<T>> {
        let mut slot = self.target.write();
        if let Some(current) = slot.upgrade() {
            return Err(current);
        }
        *slot = Arc::downgrade(target);
        Ok(())
    }

    /// Clears the reference, returning the previous live target.
    pub fn clear(&self) -> Option<Arc<T>> {
        std::mem::take(&mut *self.target.write()).upgrade()
    }

    /// Returns `true` if the target is still alive.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.target.read().strong_count() > 0
    }

    /// Returns `true` if the reference currently resolves to exactly `other`.
    #[must_use]
    pub fn points_to(&self, other: &T) -> bool {
        let slot = self.target.read();
        slot.strong_count() > 0 && std::ptr::eq(slot.as_ptr(), other)
    }
}

impl<T> Default for BackRef<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> fmt::Debug for BackRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackRef")
            .field("live", &self.is_live())
            .finish()
    }
}
