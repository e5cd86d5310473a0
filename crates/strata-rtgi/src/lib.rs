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

//! A small feed-forward network graph that generates its own shader code.
//!
//! A [`Model`] owns an ordered stack of [`Layer`]s, and each layer owns an
//! ordered list of [`Unit`]s. Upward links (unit to layer, layer to model)
//! are non-owning, so a unit or layer kept alive past its container reports
//! no owner instead of dangling. IDs are positional and assigned by the
//! model.
//!
//! ```
//! use strata_rtgi::{Activation, Connection, Layer, Model, Unit};
//!
//! let model = Model::new("tiny");
//! let layer = Layer::new(Some(&model), 2, Connection::Dense, Activation::ReLU);
//! layer.add_unit(&Unit::new(vec![0.5, -0.5], 0.0)).unwrap();
//!
//! assert!(model.is_valid());
//! assert!(model.gen_func().unwrap().contains("void tiny(float x[2], out float y[1])"));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod kinds;
pub mod layer;
pub mod model;
pub mod unit;

pub use error::{Result, RtgiError};
pub use kinds::{Activation, Connection};
pub use layer::Layer;
pub use model::Model;
pub use unit::Unit;
