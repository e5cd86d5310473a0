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

//! The closed sets of connection kinds and activation functions.
//!
//! Both enums parse from and print to the names used in model descriptions,
//! and serialize as those names.

use crate::error::RtgiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the inputs of a layer reach its units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Connection {
    /// Every unit sees every input.
    #[default]
    Dense,
}

impl Connection {
    /// Every connection kind, in declaration order.
    pub const ALL: [Connection; 1] = [Connection::Dense];

    /// Returns the name used in model descriptions.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Connection::Dense => "Dense",
        }
    }
}

/// The function applied to the weighted sum of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Activation {
    /// `f(x) = x`
    #[default]
    Identity,
    /// `f(x) = max(x, 0)`
    ReLU,
    /// `f(x) = tanh(x)`
    Tanh,
}

impl Activation {
    /// Every activation function, in declaration order.
    pub const ALL: [Activation; 3] = [Activation::Identity, Activation::ReLU, Activation::Tanh];

    /// Returns the name used in model descriptions.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Activation::Identity => "Identity",
            Activation::ReLU => "ReLU",
            Activation::Tanh => "tanh",
        }
    }

    /// Wraps the expression `x` in this activation.
    #[must_use]
    pub fn apply(self, x: &str) -> String {
        match self {
            Activation::Identity => x.to_owned(),
            Activation::ReLU => format!("max({x}, 0.0)"),
            Activation::Tanh => format!("tanh({x})"),
        }
    }

    /// Evaluates this activation on `x`.
    #[must_use]
    pub fn eval(self, x: f32) -> f32 {
        match self {
            Activation::Identity => x,
            Activation::ReLU => x.max(0.0),
            Activation::Tanh => x.tanh(),
        }
    }
}

macro_rules! impl_named_enum {
    ($ty:ident, $err:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = RtgiError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .into_iter()
                    .find(|v| v.name() == s)
                    .ok_or_else(|| RtgiError::$err(s.to_owned()))
            }
        }

        impl TryFrom<String> for $ty {
            type Error = RtgiError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$ty> for String {
            fn from(v: $ty) -> String {
                v.name().to_owned()
            }
        }
    };
}

impl_named_enum!(Connection, UnknownConnection);
impl_named_enum!(Activation, UnknownActivation);
