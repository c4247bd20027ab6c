// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node graph scripting core for `NodePlay`.
//!
//! Designers wire typed nodes (events, logic, world actions) into a directed
//! graph. At runtime an [`Executor`] evaluates that graph once per simulation
//! frame against a host-owned [`RuntimeContext`].
//!
//! ## Architecture
//!
//! The core is split into:
//! - The node contract ([`NodeDefinition`], [`NodeExecutor`]) that plugins implement
//! - An explicit [`NodeRegistry`] built by the host at startup
//! - The authored [`Graph`] model (nodes and connections)
//! - The per-frame [`Executor`] with per-node persistent [`NodeState`]
//!
//! Control connections push execution depth-first; data connections are
//! resolved by pulling the source node at the moment the consumer runs.

pub mod connection;
pub mod context;
pub mod definition;
pub mod evaluation;
pub mod graph;
pub mod io;
pub mod node;
pub mod port;
pub mod registry;
pub mod state;
pub mod validation;
pub mod value;

pub use connection::{Connection, ConnectionId};
pub use context::{
    EntityHandle, EntityId, HeadlessScene, Key, RuntimeContext, SceneHost, SpawnRequest,
};
pub use definition::{
    NodeCategory, NodeDefinition, NodeExecutor, NodeHandle, NodeInputs, NodeOutput,
};
pub use evaluation::{Executor, ExecutorConfig, PullPolicy};
pub use graph::Graph;
pub use io::{GameProject, GraphLoadError};
pub use node::{Node, NodeData, NodeId, Position};
pub use port::{Port, PortId, PortType};
pub use registry::NodeRegistry;
pub use state::NodeState;
pub use validation::GraphIssue;
pub use value::Value;
