// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node instances placed in a graph.

use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a node, stable across sessions
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a node ID from an authored string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create a new random node ID
    pub fn generate() -> Self {
        Self(format!("node_{}", Uuid::new_v4().simple()))
    }

    /// Borrow the raw ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Editor position. Ignored by the executor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

/// Authored data of a node instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Display label
    #[serde(default)]
    pub label: String,
    /// Static properties configured in the editor
    #[serde(default)]
    pub properties: IndexMap<String, Value>,
}

/// A node instance in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Kind ID, resolved through the registry
    #[serde(rename = "type")]
    pub kind: String,
    /// Position in the editor
    #[serde(default)]
    pub position: Position,
    /// Label and properties
    #[serde(default)]
    pub data: NodeData,
}

impl Node {
    /// Create a node of the given kind
    pub fn new(id: impl Into<NodeId>, kind: impl Into<String>) -> Self {
        let kind = kind.into();
        Self {
            id: id.into(),
            data: NodeData {
                label: kind.clone(),
                properties: IndexMap::new(),
            },
            kind,
            position: Position::default(),
        }
    }

    /// Set the display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.data.label = label.into();
        self
    }

    /// Set a static property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.properties.insert(key.into(), value.into());
        self
    }

    /// Get a static property
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.data.properties.get(key)
    }

    /// Get a static property as a number
    pub fn number(&self, key: &str) -> Option<f64> {
        self.property(key).and_then(Value::as_number)
    }

    /// Get a static property as non-empty text
    pub fn text(&self, key: &str) -> Option<&str> {
        self.property(key)
            .and_then(Value::as_text)
            .filter(|s| !s.is_empty())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
