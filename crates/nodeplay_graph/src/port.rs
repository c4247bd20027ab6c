// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a port, unique within its node's input or output set.
///
/// Authored graphs address ports by name (`"exec"`, `"true"`, `"value"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortId(pub String);

impl PortId {
    /// Create a port ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PortId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PortId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::borrow::Borrow<str> for PortId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Kind of value that flows through a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    /// Execution flow. Carries only a "fired" signal.
    #[serde(alias = "exec")]
    Control,
    /// Text value
    String,
    /// Numeric value
    Number,
    /// Boolean value
    Boolean,
    /// Entity reference
    Entity,
    /// Any data type (for generic nodes)
    Any,
}

impl PortType {
    /// Whether this is the execution-flow type
    pub fn is_control(&self) -> bool {
        matches!(self, Self::Control)
    }

    /// Check if a port of this type can feed a port of the other type
    pub fn can_connect_to(&self, other: &PortType) -> bool {
        // Execution flow never mixes with data
        if self.is_control() || other.is_control() {
            return self == other;
        }

        // Any data type can connect to anything
        if matches!(self, Self::Any) || matches!(other, Self::Any) {
            return true;
        }

        // Same types can always connect
        if self == other {
            return true;
        }

        // Entity ids travel as text
        matches!((self, other), (Self::String, Self::Entity) | (Self::Entity, Self::String))
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Control => "control",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Entity => "entity",
            Self::Any => "any",
        };
        f.write_str(name)
    }
}

/// A port declared by a node definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Port ID
    pub id: PortId,
    /// Display name
    pub name: String,
    /// Data type
    pub port_type: PortType,
    /// Default value (for inputs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl Port {
    /// Create a new port whose display name equals its ID
    pub fn new(id: impl Into<String>, port_type: PortType) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id: PortId(id),
            port_type,
            default_value: None,
        }
    }

    /// Create the conventional `exec` control port
    pub fn control(id: impl Into<String>) -> Self {
        Self::new(id, PortType::Control)
    }

    /// Create an input port
    pub fn input(id: impl Into<String>, port_type: PortType) -> Self {
        Self::new(id, port_type)
    }

    /// Create an output port
    pub fn output(id: impl Into<String>, port_type: PortType) -> Self {
        Self::new(id, port_type)
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Whether this port carries execution flow
    pub fn is_control(&self) -> bool {
        self.port_type.is_control()
    }
}
