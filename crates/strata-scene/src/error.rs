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

//! Defines the error type of the scene graph.

use thiserror::Error;

/// An error raised by a structural operation on the scene graph.
///
/// Absent back-references are not errors: queries that depend on a dropped
/// owner return documented defaults instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// Two scene objects reachable from the root share a name, so no ID
    /// bijection can be built.
    #[error("Two scene objects share the name '{0}'")]
    DuplicateName(String),

    /// The scene object already holds a component of this concrete type.
    #[error("Scene object '{sobj}' already has a component of type {component}")]
    DuplicateComponent {
        /// The name of the scene object.
        sobj: String,
        /// The type name of the rejected component.
        component: &'static str,
    },

    /// The component is already live on another scene object.
    #[error("Component {component} is already attached to '{owner}'")]
    ComponentAlreadyAttached {
        /// The type name of the rejected component.
        component: &'static str,
        /// The name of the scene object that currently owns it.
        owner: String,
    },

    /// Re-parenting would turn the hierarchy into a graph with a cycle.
    #[error("Cannot make '{child}' a child of '{parent}': the hierarchy would contain a cycle")]
    HierarchyCycle {
        /// The name of the intended parent.
        parent: String,
        /// The name of the intended child.
        child: String,
    },

    /// The tree holds more objects than fit in the ID space.
    #[error("Scene holds {0} objects, more than the ID space allows")]
    IdSpaceExhausted(usize),

    /// The scene configuration could not be parsed or serialized.
    #[error("Invalid scene configuration: {0}")]
    InvalidConfig(String),
}

/// Alias for `Result<T, SceneError>`.
pub type Result<T> = std::result::Result<T, SceneError>;
