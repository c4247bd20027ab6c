// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph evaluation and execution.
//!
//! One call to [`Executor::execute`] is one evaluation pass (one simulation
//! frame):
//!
//! 1. Every start node (a frame trigger without control inputs) is run in
//!    declaration order with no inputs.
//! 2. When a node produces outputs, each outgoing connection is followed in
//!    declaration order. Control ports gate on truthiness.
//! 3. Before a target runs, every data connection feeding it is resolved by
//!    running its source node right then (a pull).
//! 4. Non-trigger nodes run at most once per pass through pushes.
//!
//! Unknown kinds, dangling connections and missing output values are skipped
//! with a diagnostic; nothing inside a pass is fatal.

use crate::connection::Connection;
use crate::context::RuntimeContext;
use crate::definition::{NodeDefinition, NodeHandle, NodeInputs, NodeOutput};
use crate::graph::Graph;
use crate::node::{Node, NodeId};
use crate::registry::NodeRegistry;
use crate::state::NodeState;
use crate::validation::GraphIssue;
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// How data connections obtain their source values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PullPolicy {
    /// Run the source node again for every pull.
    ///
    /// Values are always fresh, but a source with side effects repeats them
    /// once per consuming connection.
    #[default]
    Reinvoke,
    /// Run each source at most once per pass and reuse its outputs, except
    /// for definitions marked with side effects, which are still re-run.
    MemoizePerPass,
}

/// Executor settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Data pull strategy
    pub pull_policy: PullPolicy,
    /// Maximum push depth within one pass
    pub max_depth: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            pull_policy: PullPolicy::Reinvoke,
            max_depth: 256,
        }
    }
}

/// Lookup indices built once from the authored graph
#[derive(Debug)]
struct CompiledGraph {
    nodes: IndexMap<NodeId, Node>,
    outgoing: HashMap<NodeId, Vec<Connection>>,
    incoming: HashMap<NodeId, Vec<Connection>>,
}

impl CompiledGraph {
    fn compile(graph: Graph) -> Self {
        let mut nodes = IndexMap::with_capacity(graph.node_count());
        for node in graph.nodes() {
            // First declaration wins; duplicates are reported by validation
            nodes.entry(node.id.clone()).or_insert_with(|| node.clone());
        }

        let mut outgoing: HashMap<NodeId, Vec<Connection>> = HashMap::new();
        let mut incoming: HashMap<NodeId, Vec<Connection>> = HashMap::new();
        for connection in graph.connections() {
            outgoing
                .entry(connection.from_node.clone())
                .or_default()
                .push(connection.clone());
            incoming
                .entry(connection.to_node.clone())
                .or_default()
                .push(connection.clone());
        }

        Self {
            nodes,
            outgoing,
            incoming,
        }
    }

    fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn outgoing(&self, id: &NodeId) -> &[Connection] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    fn incoming(&self, id: &NodeId) -> &[Connection] {
        self.incoming.get(id).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Runs one authored graph frame by frame
#[derive(Debug)]
pub struct Executor {
    graph: CompiledGraph,
    registry: Arc<NodeRegistry>,
    config: ExecutorConfig,
    start_nodes: Vec<NodeId>,
    states: HashMap<NodeId, NodeState>,
    issues: Vec<GraphIssue>,
    frame: u64,
}

impl Executor {
    /// Compile a graph with the default configuration
    pub fn new(graph: Graph, registry: Arc<NodeRegistry>) -> Self {
        Self::with_config(graph, registry, ExecutorConfig::default())
    }

    /// Compile a graph
    pub fn with_config(graph: Graph, registry: Arc<NodeRegistry>, config: ExecutorConfig) -> Self {
        let issues = graph.validate(&registry);
        for issue in &issues {
            tracing::warn!("Graph issue: {issue}");
        }

        let graph = CompiledGraph::compile(graph);
        let start_nodes = graph
            .nodes
            .values()
            .filter(|node| registry.get(&node.kind).is_some_and(NodeDefinition::is_start_node))
            .map(|node| node.id.clone())
            .collect::<Vec<_>>();

        tracing::debug!(
            "Compiled graph: {} nodes, {} start nodes",
            graph.nodes.len(),
            start_nodes.len()
        );

        Self {
            graph,
            registry,
            config,
            start_nodes,
            states: HashMap::new(),
            issues,
            frame: 0,
        }
    }

    /// Run one evaluation pass
    pub fn execute(&mut self, ctx: &mut RuntimeContext) {
        self.frame += 1;
        let _span = tracing::trace_span!("graph_pass", frame = self.frame).entered();

        let mut pass = Pass {
            graph: &self.graph,
            registry: &self.registry,
            config: &self.config,
            states: &mut self.states,
            executed: HashSet::new(),
            pulled: HashMap::new(),
        };

        for id in &self.start_nodes {
            if let Some(node) = pass.graph.node(id) {
                pass.execute_node(node, ctx, NodeInputs::new(), 0);
            }
        }
    }

    /// Discard all per-node persistent state. The runtime context is left untouched.
    pub fn reset(&mut self) {
        self.states.clear();
        self.frame = 0;
        tracing::debug!("Executor reset");
    }

    /// Start nodes in declaration order
    pub fn start_nodes(&self) -> &[NodeId] {
        &self.start_nodes
    }

    /// Issues found when the graph was compiled
    pub fn issues(&self) -> &[GraphIssue] {
        &self.issues
    }

    /// Persistent state of a node, if it holds a `T`
    pub fn state<T: 'static>(&self, node: &NodeId) -> Option<&T> {
        self.states.get(node).and_then(|state| state.get::<T>())
    }

    /// Whether a node has a state slot
    pub fn has_state(&self, node: &NodeId) -> bool {
        self.states.contains_key(node)
    }

    /// Passes run since construction or the last reset
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

/// Scratch data of one evaluation pass
struct Pass<'a> {
    graph: &'a CompiledGraph,
    registry: &'a NodeRegistry,
    config: &'a ExecutorConfig,
    states: &'a mut HashMap<NodeId, NodeState>,
    /// Nodes already run by a push this pass
    executed: HashSet<&'a NodeId>,
    /// Memoized pull results (only with [`PullPolicy::MemoizePerPass`])
    pulled: HashMap<&'a NodeId, Option<NodeOutput>>,
}

impl<'a> Pass<'a> {
    fn execute_node(
        &mut self,
        node: &'a Node,
        ctx: &mut RuntimeContext,
        inputs: NodeInputs,
        depth: usize,
    ) {
        let graph = self.graph;
        let registry = self.registry;
        let Some(definition) = registry.get(&node.kind) else {
            tracing::debug!("Node kind {} not found in registry; skipping {}", node.kind, node.id);
            return;
        };

        if !definition.frame_trigger && self.executed.contains(&node.id) {
            return;
        }
        self.executed.insert(&node.id);

        let state = self.states.entry(node.id.clone()).or_default();
        let Some(outputs) = definition.execute(ctx, &inputs, NodeHandle::new(node, state)) else {
            return;
        };
        tracing::trace!("{} ({}) produced {} outputs", node.id, node.kind, outputs.values.len());

        for connection in graph.outgoing(&node.id) {
            let port = connection.from_port.as_str();
            let value = outputs.get(port);

            if definition.is_control_output(port) {
                if !value.is_some_and(Value::is_truthy) {
                    continue;
                }
            } else if value.is_none() {
                tracing::debug!(
                    "{} produced no value for port {}; skipping connection {}",
                    node.id,
                    port,
                    connection.id
                );
                continue;
            }

            let Some(target) = graph.node(&connection.to_node) else {
                tracing::debug!(
                    "Connection {} targets missing node {}",
                    connection.id,
                    connection.to_node
                );
                continue;
            };

            if depth + 1 > self.config.max_depth {
                tracing::warn!(
                    "Push depth limit {} reached at {}; not entering {}",
                    self.config.max_depth,
                    node.id,
                    target.id
                );
                continue;
            }

            let target_inputs = self.assemble_inputs(target, ctx);
            self.execute_node(target, ctx, target_inputs, depth + 1);
        }
    }

    /// Pull every data connection feeding `target`
    fn assemble_inputs(&mut self, target: &'a Node, ctx: &mut RuntimeContext) -> NodeInputs {
        let graph = self.graph;
        let registry = self.registry;
        let mut inputs = NodeInputs::new();

        for connection in graph.incoming(&target.id) {
            let Some(source) = graph.node(&connection.from_node) else {
                continue;
            };
            let Some(definition) = registry.get(&source.kind) else {
                continue;
            };
            if definition.is_control_output(connection.from_port.as_str()) {
                continue;
            }

            let outputs = self.pull(source, definition, ctx);
            match outputs.as_ref().and_then(|o| o.get(connection.from_port.as_str())) {
                Some(value) => inputs.insert(connection.to_port.clone(), value.clone()),
                None => tracing::debug!(
                    "{} produced no value for port {}",
                    source.id,
                    connection.from_port
                ),
            }
        }

        inputs
    }

    fn pull(
        &mut self,
        source: &'a Node,
        definition: &NodeDefinition,
        ctx: &mut RuntimeContext,
    ) -> Option<NodeOutput> {
        let memoize =
            self.config.pull_policy == PullPolicy::MemoizePerPass && !definition.side_effects;
        if memoize {
            if let Some(cached) = self.pulled.get(&source.id) {
                return cached.clone();
            }
        }

        let state = self.states.entry(source.id.clone()).or_default();
        let outputs = definition.execute(ctx, &NodeInputs::new(), NodeHandle::new(source, state));

        if memoize {
            self.pulled.insert(&source.id, outputs.clone());
        }
        outputs
    }
}
