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

//! The scene graph: scene objects, their components and the scene container.
//!
//! A [`Scene`] owns a tree of [`SObj`]s. Each object owns its children and its
//! [`Component`]s; every upward link (child to parent, component to owner) is
//! a non-owning back-reference, so dropping a subtree never leaks and a
//! dangling link degrades to a default instead of a crash.
//!
//! Trees are walked either with the early-exit iterators returned by
//! [`SObj::descend`] and [`SObj::ascend`], or with a [`Visitor`] that
//! dispatches per-type component callbacks.

#![warn(missing_docs)]

// Lets `#[derive(Component)]` expand to the same paths inside this crate.
extern crate self as strata_scene;

pub mod component;
pub mod components;
pub mod config;
pub mod error;
pub mod light;
pub mod scene;
pub mod sobj;
pub mod traversal;
pub mod visitor;

pub use component::{Component, ComponentBase};
pub use components::{CmptCamera, CmptLight, CmptTransform};
pub use config::{DuplicatePolicy, SceneConfig};
pub use error::{Result, SceneError};
pub use light::{AreaLight, DirectionalLight, InfiniteAreaLight, Light, PointLight, SpotLight};
pub use scene::{Scene, SceneWriteGuard, INVALID_ID};
pub use sobj::SObj;
pub use strata_macros::Component;
pub use visitor::Visitor;
