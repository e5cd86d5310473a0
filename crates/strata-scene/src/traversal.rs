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

//! Structural traversals over a scene-object hierarchy.
//!
//! Both traversals are plain iterators, so a caller that has what it needs
//! simply stops consuming: there is no abort flag to thread through
//! callbacks. The [`Visitor`](crate::visitor::Visitor) entry points are built
//! on top of them.

use crate::sobj::SObj;
use std::iter::FusedIterator;
use std::sync::Arc;

/// Pre-order traversal of a subtree: a node, then each child subtree in child
/// order.
///
/// The children of a node are snapshotted when that node is yielded. Nodes
/// attached afterwards under an already-visited node are not seen.
#[derive(Debug)]
pub struct Descend {
    stack: Vec<Arc<SObj>>,
}

impl Descend {
    pub(crate) fn new(start: &Arc<SObj>) -> Self {
        Self {
            stack: vec![Arc::clone(start)],
        }
    }
}

impl Iterator for Descend {
    type Item = Arc<SObj>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so the first child is popped next.
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}

impl FusedIterator for Descend {}

/// Walk from a node up through its ancestors: the node, its parent, its
/// grandparent, and so on until a node without a parent.
#[derive(Debug)]
pub struct Ascend {
    next: Option<Arc<SObj>>,
}

impl Ascend {
    pub(crate) fn new(start: &Arc<SObj>) -> Self {
        Self {
            next: Some(Arc::clone(start)),
        }
    }
}

impl Iterator for Ascend {
    type Item = Arc<SObj>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next.take()?;
        self.next = node.parent();
        Some(node)
    }
}

impl FusedIterator for Ascend {}
