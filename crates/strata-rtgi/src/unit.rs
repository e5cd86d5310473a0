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

//! A single unit: one weight per input plus a bias.

use crate::error::{Result, RtgiError};
use crate::kinds::Activation;
use crate::layer::Layer;
use std::fmt;
use std::sync::Arc;
use strata_core::BackRef;

/// A unit of a [`Layer`], computing `activation(w · x + b)`.
///
/// The weights are fixed at construction. A unit belongs to at most one
/// layer; the link back to it is non-owning.
pub struct Unit {
    layer: BackRef<Layer>,
    weights: Vec<f32>,
    bias: f32,
}

impl Unit {
    /// Creates a unit that is not part of any layer yet.
    #[must_use]
    pub fn new(weights: Vec<f32>, bias: f32) -> Arc<Self> {
        Arc::new(Self {
            layer: BackRef::empty(),
            weights,
            bias,
        })
    }

    /// Returns the layer this unit belongs to, if it is still alive.
    #[must_use]
    pub fn layer(&self) -> Option<Arc<Layer>> {
        self.layer.get()
    }

    pub(crate) fn layer_ref(&self) -> &BackRef<Layer> {
        &self.layer
    }

    /// Returns the weights, one per input.
    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Returns the number of inputs this unit expects.
    #[must_use]
    pub fn input_dim(&self) -> usize {
        self.weights.len()
    }

    /// Returns the bias.
    #[must_use]
    pub fn bias(&self) -> f32 {
        self.bias
    }

    /// Returns the index of this unit in its layer.
    #[must_use]
    pub fn id(&self) -> Option<usize> {
        self.layer()?.id_of(self)
    }

    /// Returns the name of the generated function, `Layer{l}_Unit{u}`.
    ///
    /// `None` while the unit has no live layer or the layer has no live model.
    #[must_use]
    pub fn func_name(&self) -> Option<String> {
        let layer = self.layer()?;
        Some(func_name(layer.id()?, layer.id_of(self)?))
    }

    /// Evaluates the unit on `inputs`. Missing inputs count as zero.
    #[must_use]
    pub fn eval(&self, activation: Activation, inputs: &[f32]) -> f32 {
        let sum: f32 = self
            .weights
            .iter()
            .zip(inputs)
            .map(|(w, x)| w * x)
            .sum();
        activation.eval(sum + self.bias)
    }

    /// Generates the function computing this unit with `activation`.
    ///
    /// Fails with [`RtgiError::InvalidLayer`] when the unit cannot be named.
    pub fn gen_func(&self, activation: Activation) -> Result<String> {
        let name = self.func_name().ok_or_else(|| {
            RtgiError::InvalidLayer(String::from("unit is not part of a layer with a live model"))
        })?;
        Ok(self.write_func(&name, activation))
    }

    pub(crate) fn write_func(&self, name: &str, activation: Activation) -> String {
        let sum = self
            .weights
            .iter()
            .enumerate()
            .map(|(i, w)| format!("{w:?} * x[{i}]"))
            .chain(std::iter::once(format!("{:?}", self.bias)))
            .collect::<Vec<_>>()
            .join(" + ");

        format!(
            "float {name}(float x[{}]) {{\n    return {};\n}}\n",
            self.weights.len(),
            activation.apply(&sum)
        )
    }
}

pub(crate) fn func_name(layer_id: usize, unit_id: usize) -> String {
    format!("Layer{layer_id}_Unit{unit_id}")
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("weights", &self.weights)
            .field("bias", &self.bias)
            .field("attached", &self.layer.is_live())
            .finish()
    }
}
