// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter entity: a named slot on an [`crate::Object`].

use crate::error::BridgeError;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Internal identifier for a parameter watch binding; parameters
    /// themselves are addressed by `(objectId, name)`, not by this id.
    pub struct ParameterId("prm-");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    Int,
    Float,
    Bool,
    String,
    Enum,
}

crate::simple_display! {
    ParameterType {
        Int => "int",
        Float => "float",
        Bool => "bool",
        String => "string",
        Enum => "enum",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl ParameterValue {
    pub fn type_of(&self) -> ParameterType {
        match self {
            Self::Int(_) => ParameterType::Int,
            Self::Float(_) => ParameterType::Float,
            Self::Bool(_) => ParameterType::Bool,
            Self::String(_) => ParameterType::String,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: ParameterValue,
    pub param_type: ParameterType,
    pub read_only: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub enum_values: Option<Vec<String>>,
    pub last_updated_at: u64,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: ParameterValue, now_ms: u64) -> Self {
        let param_type = value.type_of();
        Self {
            name: name.into(),
            value,
            param_type,
            read_only: false,
            min: None,
            max: None,
            enum_values: None,
            last_updated_at: now_ms,
        }
    }

    /// Validates and applies a new value, honouring `readOnly` and
    /// `min..max` range invariants. Does not touch `last_updated_at`;
    /// callers stamp the mirror's commit time on success.
    pub fn try_set(&mut self, value: ParameterValue) -> Result<(), BridgeError> {
        if self.read_only {
            return Err(BridgeError::ReadOnlyParameter {
                name: self.name.clone(),
            });
        }
        if let Some(n) = value.as_f64() {
            if let Some(min) = self.min {
                if n < min {
                    return Err(BridgeError::ParameterOutOfRange {
                        name: self.name.clone(),
                        min: self.min,
                        max: self.max,
                    });
                }
            }
            if let Some(max) = self.max {
                if n > max {
                    return Err(BridgeError::ParameterOutOfRange {
                        name: self.name.clone(),
                        min: self.min,
                        max: self.max,
                    });
                }
            }
        }
        self.param_type = value.type_of();
        self.value = value;
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
crate::builder! {
    pub struct ParameterBuilder => Parameter {
        into { name: String = "freq" }
        set { value: ParameterValue = ParameterValue::Float(440.0) }
        set { param_type: ParameterType = ParameterType::Float }
        set { read_only: bool = false }
        option { min: f64 = None }
        option { max: f64 = None }
        option { enum_values: Vec<String> = None }
        set { last_updated_at: u64 = 0 }
    }
}

#[cfg(test)]
#[path = "parameter_tests.rs"]
mod tests;
