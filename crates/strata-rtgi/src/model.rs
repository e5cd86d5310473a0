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

//! A named, ordered stack of layers.

use crate::error::{Result, RtgiError};
use crate::layer::{self, Layer};
use crate::unit::Unit;
use parking_lot::RwLock;
use std::fmt::{self, Write as _};
use std::sync::Arc;

/// An ordered stack of [`Layer`]s, each feeding the next.
///
/// The model owns its layers and assigns their IDs: a layer's ID is its
/// index in the stack and a unit's ID is its index in its layer.
pub struct Model {
    name: String,
    layers: RwLock<Vec<Arc<Layer>>>,
}

impl Model {
    /// Creates an empty model.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            layers: RwLock::new(Vec::new()),
        })
    }

    /// Returns the model name, also used as the name of the generated entry
    /// function.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the layers in order.
    #[must_use]
    pub fn layers(&self) -> Vec<Arc<Layer>> {
        self.layers.read().clone()
    }

    /// Appends `layer` to the stack.
    ///
    /// Appending a layer that is already in this model is a no-op. A layer
    /// owned by another live model is rejected with
    /// [`RtgiError::LayerOwnedElsewhere`]; move it with
    /// [`Layer::set_model`] instead.
    pub fn add_layer(self: &Arc<Self>, layer: &Arc<Layer>) -> Result<()> {
        match layer.model() {
            Some(owner) if Arc::ptr_eq(&owner, self) => Ok(()),
            Some(owner) => {
                let err = RtgiError::LayerOwnedElsewhere(owner.name.clone());
                log::warn!("{err}");
                Err(err)
            }
            None => {
                self.push_layer(layer);
                Ok(())
            }
        }
    }

    pub(crate) fn push_layer(self: &Arc<Self>, layer: &Arc<Layer>) {
        let mut layers = self.layers.write();
        layer.model_ref().set(self);
        layers.push(Arc::clone(layer));
        log::debug!("Model '{}': added Layer{}", self.name, layers.len() - 1);
    }

    pub(crate) fn remove_layer(&self, layer: &Layer) -> bool {
        let removed = {
            let mut layers = self.layers.write();
            layers
                .iter()
                .position(|l| std::ptr::eq(Arc::as_ptr(l), layer))
                .map(|index| layers.remove(index))
        };
        match removed {
            Some(removed) => {
                removed.model_ref().clear();
                true
            }
            None => false,
        }
    }

    /// Returns the ID of `layer`, or `None` if it is not in this model.
    #[must_use]
    pub fn id_of_layer(&self, layer: &Layer) -> Option<usize> {
        self.layers
            .read()
            .iter()
            .position(|l| std::ptr::eq(Arc::as_ptr(l), layer))
    }

    /// Returns the ID of `unit` within `layer`, or `None` if either is not
    /// part of this model.
    #[must_use]
    pub fn unit_id(&self, layer: &Layer, unit: &Unit) -> Option<usize> {
        self.id_of_layer(layer)?;
        layer
            .units()
            .iter()
            .position(|u| std::ptr::eq(Arc::as_ptr(u), unit))
    }

    /// Returns the input dimension of the first layer.
    #[must_use]
    pub fn input_dim(&self) -> Option<i32> {
        self.layers.read().first().map(|l| l.input_dim())
    }

    /// Returns the output dimension of the last layer.
    #[must_use]
    pub fn output_dim(&self) -> Option<usize> {
        self.layers.read().last().map(|l| l.output_dim())
    }

    /// Returns `true` if the model can be turned into code: it has at least
    /// one layer, every layer is valid and each layer takes as many inputs
    /// as the previous one produces.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    fn check(&self) -> Result<()> {
        let layers = self.layers();
        if layers.is_empty() {
            return Err(RtgiError::InvalidModel(format!("'{}' has no layers", self.name)));
        }
        for layer in &layers {
            layer
                .check()
                .map_err(|e| RtgiError::InvalidModel(format!("'{}': {e}", self.name)))?;
        }
        for (i, pair) in layers.windows(2).enumerate() {
            let produced = pair[0].output_dim();
            let expected = pair[1].input_dim();
            if usize::try_from(expected).ok() != Some(produced) {
                return Err(RtgiError::InvalidModel(format!(
                    "'{}': Layer{i} produces {produced} outputs but Layer{} takes {expected}",
                    self.name,
                    i + 1
                )));
            }
        }
        Ok(())
    }

    /// Evaluates the model on `inputs`.
    #[must_use]
    pub fn eval(&self, inputs: &[f32]) -> Vec<f32> {
        self.layers()
            .iter()
            .fold(inputs.to_vec(), |x, layer| layer.eval(&x))
    }

    /// Generates every layer (with its units) followed by the model entry
    /// function, which chains the layers through temporaries.
    pub fn gen_func(&self) -> Result<String> {
        self.check()?;
        let layers = self.layers();

        let mut out = String::new();
        for layer in &layers {
            out.push_str(&layer.gen_func(true)?);
            out.push('\n');
        }

        let input_dim = layers.first().map_or(0, |l| l.input_dim());
        let output_dim = layers.last().map_or(0, |l| l.output_dim());
        writeln!(
            out,
            "void {}(float x[{input_dim}], out float y[{output_dim}]) {{",
            self.name
        )?;
        let last = layers.len() - 1;
        let mut input = String::from("x");
        for (i, layer) in layers.iter().enumerate() {
            let name = layer::func_name(i);
            if i == last {
                writeln!(out, "    {name}({input}, y);")?;
            } else {
                writeln!(out, "    float h{i}[{}];", layer.output_dim())?;
                writeln!(out, "    {name}({input}, h{i});")?;
                input = format!("h{i}");
            }
        }
        out.push_str("}\n");
        Ok(out)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name)
            .field("layers", &self.layers.read().len())
            .finish()
    }
}
