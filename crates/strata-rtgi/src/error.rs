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

//! Defines the error type of the layer graph.

use thiserror::Error;

/// An error raised while building the layer graph or generating code from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RtgiError {
    /// The unit is already part of this layer.
    #[error("Unit is already part of {}", layer_label(.layer))]
    DuplicateUnit {
        /// The index of the layer, or `None` if it has no live model.
        layer: Option<usize>,
    },

    /// The unit belongs to another live layer.
    #[error("Unit already belongs to another layer")]
    UnitOwnedElsewhere,

    /// The layer belongs to another live model.
    #[error("Layer already belongs to model '{0}'")]
    LayerOwnedElsewhere(String),

    /// The name does not match any connection kind.
    #[error("Unknown connection '{0}'")]
    UnknownConnection(String),

    /// The name does not match any activation function.
    #[error("Unknown activation '{0}'")]
    UnknownActivation(String),

    /// The layer cannot be turned into code.
    #[error("Invalid layer: {0}")]
    InvalidLayer(String),

    /// The model cannot be turned into code.
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Writing the generated code failed.
    #[error("Code generation failed")]
    Format(#[from] std::fmt::Error),
}

/// Alias for `Result<T, RtgiError>`.
pub type Result<T> = std::result::Result<T, RtgiError>;

fn layer_label(layer: &Option<usize>) -> String {
    match layer {
        Some(id) => format!("Layer{id}"),
        None => String::from("a layer without a model"),
    }
}
