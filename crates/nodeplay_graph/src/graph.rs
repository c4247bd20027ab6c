// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and connections.

use crate::connection::{Connection, ConnectionId};
use crate::node::{Node, NodeId};
use crate::port::PortId;
use serde::{Deserialize, Serialize};

/// An authored node graph.
///
/// Declaration order of nodes and connections is preserved; it is the only
/// ordering the executor guarantees between unrelated subgraphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Nodes in declaration order
    #[serde(default)]
    nodes: Vec<Node>,
    /// Connections in declaration order
    #[serde(default, rename = "edges")]
    connections: Vec<Connection>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id.clone();
        self.nodes.push(node);
        id
    }

    /// Add a node, builder style
    pub fn with_node(mut self, node: Node) -> Self {
        self.add_node(node);
        self
    }

    /// Get a node by ID (first declared wins)
    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == *node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add a connection between ports.
    ///
    /// Nothing is checked here; see [`Graph::validate`](crate::validation).
    pub fn connect(
        &mut self,
        from_node: impl Into<NodeId>,
        from_port: impl Into<PortId>,
        to_node: impl Into<NodeId>,
        to_port: impl Into<PortId>,
    ) -> ConnectionId {
        let connection = Connection::new(from_node, from_port, to_node, to_port);
        let id = connection.id.clone();
        self.connections.push(connection);
        id
    }

    /// Add a connection, builder style
    pub fn with_connection(
        mut self,
        from_node: &str,
        from_port: &str,
        to_node: &str,
        to_port: &str,
    ) -> Self {
        self.connect(from_node, from_port, to_node, to_port);
        self
    }

    /// Get all connections
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter()
    }

    /// Get connections leaving a node
    pub fn connections_from<'a>(
        &'a self,
        node_id: &'a NodeId,
    ) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.from_node == *node_id)
    }

    /// Get connections entering a node
    pub fn connections_to<'a>(
        &'a self,
        node_id: &'a NodeId,
    ) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.to_node == *node_id)
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_order() {
        let graph = Graph::new()
            .with_node(Node::new("b", "OnStart"))
            .with_node(Node::new("a", "Spawn"))
            .with_connection("b", "exec", "a", "exec");

        let ids: Vec<_> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(graph.connections_from(&NodeId::new("b")).count(), 1);
        assert_eq!(graph.connections_to(&NodeId::new("b")).count(), 0);
        assert_eq!(graph.connection_count(), 1);
    }

    #[test]
    fn test_authored_format() {
        let graph: Graph = serde_json::from_value(serde_json::json!({
            "nodes": [
                {
                    "id": "start",
                    "type": "OnStart",
                    "position": { "x": 50, "y": 100 },
                    "data": { "label": "On Start", "properties": {} }
                },
                {
                    "id": "spawn_player",
                    "type": "Spawn",
                    "position": { "x": 250, "y": 100 },
                    "data": {
                        "label": "Spawn Player",
                        "properties": { "sprite": "player", "x": 400, "entityId": "player" }
                    }
                }
            ],
            "edges": [
                {
                    "id": "e1",
                    "source": "start",
                    "sourceHandle": "exec",
                    "target": "spawn_player",
                    "targetHandle": "exec"
                }
            ]
        }))
        .unwrap();

        assert_eq!(graph.node_count(), 2);
        let spawn = graph.node(&NodeId::new("spawn_player")).unwrap();
        assert_eq!(spawn.text("entityId"), Some("player"));
        assert_eq!(spawn.number("x"), Some(400.0));
        let edge = graph.connections().next().unwrap();
        assert_eq!(edge.from_port.as_str(), "exec");
        assert_eq!(edge.to_node.as_str(), "spawn_player");
    }
}
