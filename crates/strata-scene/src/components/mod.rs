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

//! Built-in components shipped with the scene graph.
//!
//! Each component has a `new(&sobj, ..)` factory that builds the payload and
//! attaches it to its owner in one step, and a `detached(..)` constructor for
//! callers that attach explicitly through
//! [`SObj::attach_component`](crate::sobj::SObj::attach_component).

mod camera;
mod light;
pub(crate) mod transform;

pub use camera::CmptCamera;
pub use light::CmptLight;
pub use transform::CmptTransform;
