// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions for the graph.

use crate::node::NodeId;
use crate::port::PortId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a connection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub String);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn generate() -> Self {
        Self(format!("edge_{}", Uuid::new_v4().simple()))
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A directed wire from an output port to an input port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Unique connection ID
    #[serde(default)]
    pub id: ConnectionId,
    /// Source node ID
    #[serde(rename = "source")]
    pub from_node: NodeId,
    /// Source port ID
    #[serde(rename = "sourceHandle")]
    pub from_port: PortId,
    /// Target node ID
    #[serde(rename = "target")]
    pub to_node: NodeId,
    /// Target port ID
    #[serde(rename = "targetHandle")]
    pub to_port: PortId,
}

impl Connection {
    /// Create a new connection
    pub fn new(
        from_node: impl Into<NodeId>,
        from_port: impl Into<PortId>,
        to_node: impl Into<NodeId>,
        to_port: impl Into<PortId>,
    ) -> Self {
        Self {
            id: ConnectionId::generate(),
            from_node: from_node.into(),
            from_port: from_port.into(),
            to_node: to_node.into(),
            to_port: to_port.into(),
        }
    }
}
