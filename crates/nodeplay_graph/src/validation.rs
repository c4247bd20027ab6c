// SPDX-License-Identifier: MIT OR Apache-2.0
//! Load-time checks of an authored graph against a registry.
//!
//! Validation reports, it never rejects: every issue found here is also
//! tolerated by the executor at run time, where the affected node or
//! connection simply does nothing.

use crate::connection::ConnectionId;
use crate::graph::Graph;
use crate::node::NodeId;
use crate::port::{PortId, PortType};
use crate::registry::NodeRegistry;
use std::collections::HashSet;

/// A problem found in an authored graph
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphIssue {
    /// Node kind is not registered; the node is inert
    #[error("Node {node} has unknown kind {kind}")]
    UnknownKind {
        /// Node instance
        node: NodeId,
        /// Unresolved kind
        kind: String,
    },

    /// Two nodes share an ID; only the first is used
    #[error("Duplicate node ID: {0}")]
    DuplicateNode(NodeId),

    /// Connection endpoint does not exist
    #[error("Connection {connection} references missing node {node}")]
    DanglingConnection {
        /// Connection
        connection: ConnectionId,
        /// Missing endpoint
        node: NodeId,
    },

    /// Connection uses a port the node kind does not declare
    #[error("Connection {connection} uses undeclared port {node}.{port}")]
    UnknownPort {
        /// Connection
        connection: ConnectionId,
        /// Node owning the port
        node: NodeId,
        /// Undeclared port
        port: PortId,
    },

    /// Port types cannot be connected
    #[error("Connection {connection} links incompatible ports ({from} -> {to})")]
    IncompatiblePorts {
        /// Connection
        connection: ConnectionId,
        /// Source port type
        from: PortType,
        /// Target port type
        to: PortType,
    },
}

impl Graph {
    /// Check the graph against a registry
    pub fn validate(&self, registry: &NodeRegistry) -> Vec<GraphIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for node in self.nodes() {
            if !seen.insert(&node.id) {
                issues.push(GraphIssue::DuplicateNode(node.id.clone()));
                continue;
            }
            if !registry.contains(&node.kind) {
                issues.push(GraphIssue::UnknownKind {
                    node: node.id.clone(),
                    kind: node.kind.clone(),
                });
            }
        }

        for connection in self.connections() {
            let endpoints = [&connection.from_node, &connection.to_node];
            let mut dangling = false;
            for node_id in endpoints {
                if self.node(node_id).is_none() {
                    issues.push(GraphIssue::DanglingConnection {
                        connection: connection.id.clone(),
                        node: node_id.clone(),
                    });
                    dangling = true;
                }
            }
            if dangling {
                continue;
            }

            let source = self
                .node(&connection.from_node)
                .and_then(|n| registry.get(&n.kind));
            let target = self
                .node(&connection.to_node)
                .and_then(|n| registry.get(&n.kind));
            // Unknown kinds were already reported above
            let (Some(source), Some(target)) = (source, target) else {
                continue;
            };

            let from = source.output(connection.from_port.as_str());
            let to = target.input(connection.to_port.as_str());
            if from.is_none() {
                issues.push(GraphIssue::UnknownPort {
                    connection: connection.id.clone(),
                    node: connection.from_node.clone(),
                    port: connection.from_port.clone(),
                });
            }
            if to.is_none() {
                issues.push(GraphIssue::UnknownPort {
                    connection: connection.id.clone(),
                    node: connection.to_node.clone(),
                    port: connection.to_port.clone(),
                });
            }
            if let (Some(from), Some(to)) = (from, to) {
                if !from.port_type.can_connect_to(&to.port_type) {
                    issues.push(GraphIssue::IncompatiblePorts {
                        connection: connection.id.clone(),
                        from: from.port_type,
                        to: to.port_type,
                    });
                }
            }
        }

        issues
    }
}
