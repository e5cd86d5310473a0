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

//! A layer of units sharing one input vector.

use crate::error::{Result, RtgiError};
use crate::kinds::{Activation, Connection};
use crate::model::Model;
use crate::unit::{self, Unit};
use parking_lot::RwLock;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use strata_core::BackRef;

/// An ordered sequence of [`Unit`]s fed by the same `input_dim` inputs.
///
/// The output dimension is the number of units. A layer holds no ID of its
/// own: its index, and the index of each of its units, come from the
/// [`Model`] it belongs to.
pub struct Layer {
    model: BackRef<Model>,
    units: RwLock<Vec<Arc<Unit>>>,
    input_dim: i32,
    connection: Connection,
    activation: Activation,
}

impl Layer {
    /// Input dimension of a layer that has not been sized.
    pub const UNSET_DIM: i32 = -1;

    /// Creates a layer and, when `model` is given, appends it to the model.
    #[must_use]
    pub fn new(
        model: Option<&Arc<Model>>,
        input_dim: i32,
        connection: Connection,
        activation: Activation,
    ) -> Arc<Self> {
        let layer = Arc::new(Self {
            model: BackRef::empty(),
            units: RwLock::new(Vec::new()),
            input_dim,
            connection,
            activation,
        });
        if let Some(model) = model {
            model.push_layer(&layer);
        }
        layer
    }

    /// Creates an unsized, detached `Dense` / `Identity` layer.
    #[must_use]
    pub fn unset() -> Arc<Self> {
        Self::new(None, Self::UNSET_DIM, Connection::default(), Activation::default())
    }

    pub(crate) fn model_ref(&self) -> &BackRef<Model> {
        &self.model
    }

    /// Returns the number of inputs, fixed at construction.
    #[must_use]
    pub fn input_dim(&self) -> i32 {
        self.input_dim
    }

    /// Returns the number of outputs, which is the number of units.
    #[must_use]
    pub fn output_dim(&self) -> usize {
        self.units.read().len()
    }

    /// Returns the units in order.
    #[must_use]
    pub fn units(&self) -> Vec<Arc<Unit>> {
        self.units.read().clone()
    }

    /// Returns the connection kind.
    #[must_use]
    pub fn connection(&self) -> Connection {
        self.connection
    }

    /// Returns the activation function.
    #[must_use]
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Returns the model this layer belongs to, if it is still alive.
    #[must_use]
    pub fn model(&self) -> Option<Arc<Model>> {
        self.model.get()
    }

    /// Moves this layer to `model`, or out of any model with `None`.
    ///
    /// The layer is removed from its previous model's layer list and appended
    /// to the new one.
    pub fn set_model(self: &Arc<Self>, model: Option<&Arc<Model>>) {
        if let Some(previous) = self.model() {
            if model.is_some_and(|m| Arc::ptr_eq(m, &previous)) {
                return;
            }
            previous.remove_layer(self);
        }
        if let Some(model) = model {
            model.push_layer(self);
        }
    }

    /// Appends `unit`, making this layer its owner.
    ///
    /// Rejects a unit that is already in this layer with
    /// [`RtgiError::DuplicateUnit`] and a unit owned by another live layer
    /// with [`RtgiError::UnitOwnedElsewhere`].
    pub fn add_unit(self: &Arc<Self>, unit: &Arc<Unit>) -> Result<()> {
        let mut units = self.units.write();
        if units.iter().any(|u| Arc::ptr_eq(u, unit)) {
            let err = RtgiError::DuplicateUnit { layer: self.id() };
            log::warn!("{err}");
            return Err(err);
        }
        if unit.layer_ref().claim(self).is_err() {
            log::warn!("{}", RtgiError::UnitOwnedElsewhere);
            return Err(RtgiError::UnitOwnedElsewhere);
        }
        units.push(Arc::clone(unit));
        Ok(())
    }

    /// Returns the index of this layer in its model.
    #[must_use]
    pub fn id(&self) -> Option<usize> {
        self.model()?.id_of_layer(self)
    }

    /// Returns the index of `unit` in this layer, as assigned by the model.
    #[must_use]
    pub fn id_of(&self, unit: &Unit) -> Option<usize> {
        self.model()?.unit_id(self, unit)
    }

    /// Returns the name of the generated function, `Layer{id}`.
    #[must_use]
    pub fn func_name(&self) -> Option<String> {
        self.id().map(func_name)
    }

    /// Returns `true` if the layer can be turned into code.
    ///
    /// Requires a live model, `input_dim >= 0` and, for a dense connection,
    /// exactly `input_dim` weights on every unit.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    pub(crate) fn check(&self) -> Result<usize> {
        let id = self
            .id()
            .ok_or_else(|| RtgiError::InvalidLayer(String::from("layer has no live model")))?;
        let Ok(input_dim) = usize::try_from(self.input_dim) else {
            return Err(RtgiError::InvalidLayer(format!(
                "Layer{id} has no input dimension ({})",
                self.input_dim
            )));
        };
        match self.connection {
            Connection::Dense => {
                if let Some((u, unit)) = self
                    .units
                    .read()
                    .iter()
                    .enumerate()
                    .find(|(_, unit)| unit.input_dim() != input_dim)
                {
                    return Err(RtgiError::InvalidLayer(format!(
                        "{} has {} weights, expected {input_dim}",
                        unit::func_name(id, u),
                        unit.input_dim()
                    )));
                }
            }
        }
        Ok(id)
    }

    /// Evaluates the layer on `inputs`, one output per unit.
    #[must_use]
    pub fn eval(&self, inputs: &[f32]) -> Vec<f32> {
        self.units
            .read()
            .iter()
            .map(|unit| unit.eval(self.activation, inputs))
            .collect()
    }

    /// Generates the layer function, preceded by one function per unit when
    /// `gen_units` is set.
    ///
    /// The text depends only on the layer index, the input dimension, the
    /// connection, the activation and the ordered units.
    pub fn gen_func(&self, gen_units: bool) -> Result<String> {
        let id = self.check()?;
        let units = self.units();
        let name = func_name(id);

        let mut out = String::new();
        if gen_units {
            for (u, unit) in units.iter().enumerate() {
                out.push_str(&unit.write_func(&unit::func_name(id, u), self.activation));
                out.push('\n');
            }
        }

        writeln!(
            out,
            "void {name}(float x[{}], out float y[{}]) {{",
            self.input_dim,
            units.len()
        )?;
        for u in 0..units.len() {
            writeln!(out, "    y[{u}] = {}(x);", unit::func_name(id, u))?;
        }
        out.push_str("}\n");
        Ok(out)
    }
}

pub(crate) fn func_name(layer_id: usize) -> String {
    format!("Layer{layer_id}")
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("input_dim", &self.input_dim)
            .field("output_dim", &self.output_dim())
            .field("connection", &self.connection)
            .field("activation", &self.activation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dense(model: &Arc<Model>, input_dim: i32, activation: Activation) -> Arc<Layer> {
        Layer::new(Some(model), input_dim, Connection::Dense, activation)
    }

    #[test]
    fn test_unset_layer_is_invalid() {
        let layer = Layer::unset();
        assert_eq!(layer.input_dim(), Layer::UNSET_DIM);
        assert_eq!(layer.output_dim(), 0);
        assert!(!layer.is_valid());
        assert!(layer.func_name().is_none());
    }

    #[test]
    fn test_negative_input_dim_is_invalid() {
        let model = Model::new("m");
        let layer = dense(&model, -1, Activation::Identity);
        assert!(matches!(layer.check(), Err(RtgiError::InvalidLayer(_))));
    }

    #[test]
    fn test_add_unit_rejects_duplicates() {
        let model = Model::new("m");
        let layer = dense(&model, 1, Activation::Identity);
        let unit = Unit::new(vec![1.0], 0.0);

        layer.add_unit(&unit).unwrap();
        assert_eq!(
            layer.add_unit(&unit),
            Err(RtgiError::DuplicateUnit { layer: Some(0) })
        );
        assert_eq!(layer.output_dim(), 1);
    }

    #[test]
    fn test_add_unit_rejects_foreign_units() {
        let model = Model::new("m");
        let first = dense(&model, 1, Activation::Identity);
        let second = dense(&model, 1, Activation::Identity);
        let unit = Unit::new(vec![1.0], 0.0);

        first.add_unit(&unit).unwrap();
        assert_eq!(second.add_unit(&unit), Err(RtgiError::UnitOwnedElsewhere));
        assert!(unit.layer().is_some_and(|l| Arc::ptr_eq(&l, &first)));
    }

    #[test]
    fn test_weight_count_must_match() {
        let model = Model::new("m");
        let layer = dense(&model, 2, Activation::Identity);
        layer.add_unit(&Unit::new(vec![1.0, 1.0], 0.0)).unwrap();
        assert!(layer.is_valid());

        layer.add_unit(&Unit::new(vec![1.0], 0.0)).unwrap();
        assert_eq!(
            layer.check(),
            Err(RtgiError::InvalidLayer(String::from(
                "Layer0_Unit1 has 1 weights, expected 2"
            )))
        );
    }

    #[test]
    fn test_ids_come_from_the_model() {
        let model = Model::new("m");
        let a = dense(&model, 1, Activation::Identity);
        let b = dense(&model, 1, Activation::Identity);
        let u0 = Unit::new(vec![1.0], 0.0);
        let u1 = Unit::new(vec![2.0], 0.0);
        b.add_unit(&u0).unwrap();
        b.add_unit(&u1).unwrap();

        assert_eq!(a.id(), Some(0));
        assert_eq!(b.id(), Some(1));
        assert_eq!(b.id_of(&u1), Some(1));
        assert_eq!(a.id_of(&u1), None);
        assert_eq!(u1.func_name().as_deref(), Some("Layer1_Unit1"));
    }

    #[test]
    fn test_set_model_moves_the_layer() {
        let first = Model::new("first");
        let second = Model::new("second");
        let layer = dense(&first, 1, Activation::Identity);

        layer.set_model(Some(&second));
        assert!(first.layers().is_empty());
        assert_eq!(second.layers().len(), 1);
        assert!(layer.model().is_some_and(|m| Arc::ptr_eq(&m, &second)));

        layer.set_model(None);
        assert!(second.layers().is_empty());
        assert!(layer.model().is_none());
    }

    #[test]
    fn test_gen_func_layer_only() {
        let model = Model::new("m");
        let layer = dense(&model, 2, Activation::Tanh);
        layer.add_unit(&Unit::new(vec![1.0, 0.0], 0.0)).unwrap();
        layer.add_unit(&Unit::new(vec![0.0, 1.0], 0.0)).unwrap();

        assert_eq!(
            layer.gen_func(false).unwrap(),
            "void Layer0(float x[2], out float y[2]) {\n    y[0] = Layer0_Unit0(x);\n    y[1] = Layer0_Unit1(x);\n}\n"
        );
        assert_eq!(layer.gen_func(false), layer.gen_func(false));
    }

    #[test]
    fn test_eval() {
        let model = Model::new("m");
        let layer = dense(&model, 2, Activation::ReLU);
        layer.add_unit(&Unit::new(vec![1.0, 1.0], 0.0)).unwrap();
        layer.add_unit(&Unit::new(vec![-1.0, 0.0], 0.0)).unwrap();
        assert_eq!(layer.eval(&[1.0, 2.0]), [3.0, 0.0]);
    }
}
