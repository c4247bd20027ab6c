// SPDX-License-Identifier: MIT OR Apache-2.0
//! The node contract: what a plugin declares and how it executes.

use crate::context::{EntityId, RuntimeContext};
use crate::node::{Node, NodeId};
use crate::port::{Port, PortId};
use crate::state::NodeState;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Node category, used for grouping in the editor palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Events (start, input, timers)
    Event,
    /// Logic/flow control and variables
    Logic,
    /// World interaction (spawn, destroy)
    World,
    /// Movement and physics
    Movement,
    /// Collision queries
    Collision,
    /// Scene control
    Scene,
    /// Audio
    Audio,
    /// UI overlay
    Ui,
    /// Utility nodes
    Utility,
}

/// Values presented to a node, keyed by its input port IDs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeInputs {
    values: HashMap<PortId, Value>,
}

impl NodeInputs {
    /// Create an empty input map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an input value
    pub fn insert(&mut self, port: impl Into<PortId>, value: Value) {
        self.values.insert(port.into(), value);
    }

    /// Set an input value, builder style
    pub fn with(mut self, port: &str, value: impl Into<Value>) -> Self {
        self.insert(port, value.into());
        self
    }

    /// Get an input value
    pub fn get(&self, port: &str) -> Option<&Value> {
        self.values.get(port)
    }

    /// Whether no input was assembled
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of assembled inputs
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Input value, else the node property of the same name
    pub fn value<'a>(&'a self, port: &str, node: &'a Node) -> Option<&'a Value> {
        self.get(port).or_else(|| node.property(port))
    }

    /// Numeric input, else property, else `default`
    pub fn number_or(&self, port: &str, node: &Node, default: f64) -> f64 {
        self.value(port, node)
            .and_then(Value::as_number)
            .unwrap_or(default)
    }

    /// Boolean input, else property, else `default`
    pub fn bool_or(&self, port: &str, node: &Node, default: bool) -> bool {
        self.value(port, node).map_or(default, Value::as_bool)
    }

    /// Non-empty text input, else property, else `default`
    pub fn text_or(&self, port: &str, node: &Node, default: &str) -> String {
        self.get(port)
            .and_then(Value::as_text)
            .filter(|s| !s.is_empty())
            .or_else(|| node.text(port))
            .unwrap_or(default)
            .to_string()
    }

    /// Entity input, else an entity ID stored in the property `property`
    pub fn entity_or(&self, port: &str, node: &Node, property: &str) -> Option<EntityId> {
        self.get(port)
            .and_then(Value::as_entity)
            .or_else(|| node.property(property).and_then(Value::as_entity))
    }
}

/// Values produced by one node execution, keyed by output port IDs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeOutput {
    /// Output values by port ID
    pub values: HashMap<PortId, Value>,
}

impl NodeOutput {
    /// Create a new empty output
    pub fn new() -> Self {
        Self::default()
    }

    /// Output with a single fired control port
    pub fn fire(port: &str) -> Self {
        Self::new().with(port, true)
    }

    /// Set an output value
    pub fn set(&mut self, port: impl Into<PortId>, value: impl Into<Value>) {
        self.values.insert(port.into(), value.into());
    }

    /// Set an output value, builder style
    pub fn with(mut self, port: &str, value: impl Into<Value>) -> Self {
        self.set(port, value);
        self
    }

    /// Get an output value
    pub fn get(&self, port: &str) -> Option<&Value> {
        self.values.get(port)
    }

    /// Whether nothing was produced
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A node instance with its persistent state attached, as seen by its executor
pub struct NodeHandle<'a> {
    /// The authored node
    pub node: &'a Node,
    state: &'a mut NodeState,
}

impl<'a> NodeHandle<'a> {
    /// Attach a state slot to a node
    pub fn new(node: &'a Node, state: &'a mut NodeState) -> Self {
        Self { node, state }
    }

    /// Node instance ID
    pub fn id(&self) -> &NodeId {
        &self.node.id
    }

    /// Static property
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.node.property(key)
    }

    /// Typed persistent state; first access yields `T::default()`
    pub fn state<T: Default + 'static>(&mut self) -> &mut T {
        self.state.get_or_default()
    }
}

/// Execution function of a node kind.
///
/// Returning `None` means "did not fire": no outgoing connection is followed.
/// Returning an output with only some control ports set selects those
/// branches. Implementations must be synchronous and may run several times
/// per frame when their data outputs are pulled.
pub trait NodeExecutor: Send + Sync {
    /// Run the node
    fn execute(
        &self,
        ctx: &mut RuntimeContext,
        inputs: &NodeInputs,
        node: NodeHandle<'_>,
    ) -> Option<NodeOutput>;
}

impl<F> NodeExecutor for F
where
    F: Fn(&mut RuntimeContext, &NodeInputs, NodeHandle<'_>) -> Option<NodeOutput> + Send + Sync,
{
    fn execute(
        &self,
        ctx: &mut RuntimeContext,
        inputs: &NodeInputs,
        node: NodeHandle<'_>,
    ) -> Option<NodeOutput> {
        self(ctx, inputs, node)
    }
}

/// Registry entry describing a node kind
#[derive(Clone)]
pub struct NodeDefinition {
    /// Unique kind identifier
    pub kind: String,
    /// Display name
    pub label: String,
    /// Palette category
    pub category: NodeCategory,
    /// Description
    pub description: String,
    /// Declared input ports
    pub inputs: Vec<Port>,
    /// Declared output ports
    pub outputs: Vec<Port>,
    /// Re-armed at the start of every pass and exempt from per-frame dedup
    pub frame_trigger: bool,
    /// Running the node has effects beyond producing outputs
    pub side_effects: bool,
    executor: Arc<dyn NodeExecutor>,
}

impl NodeDefinition {
    /// Create a definition from an execution closure
    pub fn new<F>(kind: impl Into<String>, category: NodeCategory, execute: F) -> Self
    where
        F: Fn(&mut RuntimeContext, &NodeInputs, NodeHandle<'_>) -> Option<NodeOutput>
            + Send
            + Sync
            + 'static,
    {
        Self::from_executor(kind, category, execute)
    }

    /// Create a definition from any [`NodeExecutor`]
    pub fn from_executor(
        kind: impl Into<String>,
        category: NodeCategory,
        executor: impl NodeExecutor + 'static,
    ) -> Self {
        let kind = kind.into();
        Self {
            label: kind.clone(),
            kind,
            category,
            description: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            frame_trigger: false,
            side_effects: false,
            executor: Arc::new(executor),
        }
    }

    /// Set the display name
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare an input port
    pub fn with_input(mut self, port: Port) -> Self {
        self.inputs.push(port);
        self
    }

    /// Declare an output port
    pub fn with_output(mut self, port: Port) -> Self {
        self.outputs.push(port);
        self
    }

    /// Mark as a frame-start trigger
    pub fn frame_trigger(mut self) -> Self {
        self.frame_trigger = true;
        self
    }

    /// Mark as producing side effects when run
    pub fn with_side_effects(mut self) -> Self {
        self.side_effects = true;
        self
    }

    /// Get a declared input port
    pub fn input(&self, port: &str) -> Option<&Port> {
        self.inputs.iter().find(|p| p.id.as_str() == port)
    }

    /// Get a declared output port
    pub fn output(&self, port: &str) -> Option<&Port> {
        self.outputs.iter().find(|p| p.id.as_str() == port)
    }

    /// Whether any input port carries execution flow
    pub fn has_control_input(&self) -> bool {
        self.inputs.iter().any(Port::is_control)
    }

    /// Whether an output port is declared with the control type
    pub fn is_control_output(&self, port: &str) -> bool {
        self.output(port).is_some_and(Port::is_control)
    }

    /// Whether instances are selected as start nodes
    pub fn is_start_node(&self) -> bool {
        self.frame_trigger && !self.has_control_input()
    }

    /// Run the execution function
    pub fn execute(
        &self,
        ctx: &mut RuntimeContext,
        inputs: &NodeInputs,
        node: NodeHandle<'_>,
    ) -> Option<NodeOutput> {
        self.executor.execute(ctx, inputs, node)
    }
}

impl fmt::Debug for NodeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeDefinition")
            .field("kind", &self.kind)
            .field("category", &self.category)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("frame_trigger", &self.frame_trigger)
            .field("side_effects", &self.side_effects)
            .finish_non_exhaustive()
    }
}
