// SPDX-License-Identifier: MIT OR Apache-2.0
//! Values carried by ports, node properties and runtime variables.

use crate::context::EntityId;
use crate::port::PortType;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A value flowing along a connection or stored in a property bag.
///
/// The set of variants is closed on purpose: every payload a port can carry is
/// one of these, so mismatches are visible when a graph is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean
    Bool(bool),
    /// Number (all numbers are `f64`, matching authored JSON)
    Number(f64),
    /// Text
    Text(String),
    /// Reference to an entity in the runtime entity table
    Entity(EntityId),
}

impl Value {
    /// Get the port type for this value
    pub fn port_type(&self) -> PortType {
        match self {
            Self::Bool(_) => PortType::Boolean,
            Self::Number(_) => PortType::Number,
            Self::Text(_) => PortType::String,
            Self::Entity(_) => PortType::Entity,
        }
    }

    /// Whether this value opens a control gate.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Entity(id) => !id.as_str().is_empty(),
        }
    }

    /// Numeric view. Booleans count as 0/1 and numeric text is parsed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Entity(_) => None,
        }
    }

    /// Boolean view (same rules as [`Value::is_truthy`]).
    pub fn as_bool(&self) -> bool {
        self.is_truthy()
    }

    /// Borrow the text if this is a text value or an entity reference.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Entity(id) => Some(id.as_str()),
            _ => None,
        }
    }

    /// Entity view. Authored property bags store entity ids as plain text.
    pub fn as_entity(&self) -> Option<EntityId> {
        match self {
            Self::Entity(id) => Some(id.clone()),
            Self::Text(s) if !s.is_empty() => Some(EntityId::new(s.as_str())),
            _ => None,
        }
    }

    /// Loose equality used by comparison nodes.
    ///
    /// Numbers, booleans and numeric text compare numerically; text and
    /// entity references compare by content; anything else is unequal.
    pub fn loose_eq(&self, other: &Value) -> bool {
        if let (Some(a), Some(b)) = (self.as_text(), other.as_text()) {
            return a == b;
        }
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Loose ordering used by comparison nodes. `None` when the kinds cannot be ordered.
    pub fn loose_cmp(&self, other: &Value) -> Option<Ordering> {
        if let (Self::Text(a), Self::Text(b)) = (self, other) {
            return Some(a.cmp(b));
        }
        let a = self.as_number()?;
        let b = other.as_number()?;
        a.partial_cmp(&b)
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Entity(id) => write!(f, "#{id}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<EntityId> for Value {
    fn from(value: EntityId) -> Self {
        Self::Entity(value)
    }
}
