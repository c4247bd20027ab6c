// SPDX-License-Identifier: MIT OR Apache-2.0
//! Event nodes. All of them are frame triggers: the executor runs them at
//! the start of every pass and they decide for themselves whether to fire.

use nodeplay_graph::{
    Key, NodeCategory, NodeDefinition, NodeOutput, NodeRegistry, Port, PortType, Value,
};

/// Default interval of the `Every` node, in milliseconds
pub const DEFAULT_INTERVAL_MS: f64 = 1000.0;

/// Persistent state of an `OnStart` node
#[derive(Debug, Default)]
pub struct OnStartState {
    /// Whether the node already fired this session
    pub has_run: bool,
}

/// Persistent state of an `Every` node
#[derive(Debug, Default)]
pub struct EveryState {
    /// Context time of the last firing
    pub last_tick: f64,
}

/// Register the event nodes
pub fn register(registry: &mut NodeRegistry) {
    registry.register(
        NodeDefinition::new("OnStart", NodeCategory::Event, |_ctx, _inputs, mut node| {
            let state = node.state::<OnStartState>();
            if state.has_run {
                return Some(NodeOutput::new());
            }
            state.has_run = true;
            tracing::debug!("OnStart {} fired", node.id());
            Some(NodeOutput::fire("exec"))
        })
        .with_label("On Start")
        .with_description("Fires once when the game starts")
        .with_output(Port::control("exec"))
        .frame_trigger(),
    );

    registry.register(
        NodeDefinition::new("OnKey", NodeCategory::Event, |ctx, _inputs, node| {
            let name = node.node.text("key").unwrap_or("SPACE");
            let key = match name.parse::<Key>() {
                Ok(key) => key,
                Err(e) => {
                    tracing::debug!("OnKey {}: {e}", node.id());
                    return None;
                }
            };

            if !ctx.scene().is_key_down(key) {
                return None;
            }
            Some(NodeOutput::fire("exec").with("key", key.name()))
        })
        .with_label("On Key")
        .with_description("Fires every frame while a key is held")
        .with_output(Port::control("exec"))
        .with_output(Port::output("key", PortType::String))
        .frame_trigger(),
    );

    registry.register(
        NodeDefinition::new("Every", NodeCategory::Event, |ctx, _inputs, mut node| {
            let interval = node
                .node
                .number("interval")
                .filter(|i| *i > 0.0)
                .unwrap_or(DEFAULT_INTERVAL_MS);
            let state = node.state::<EveryState>();

            if ctx.time - state.last_tick < interval {
                return None;
            }
            state.last_tick = ctx.time;
            tracing::debug!("Every {} fired: interval={interval}ms, time={}", node.id(), ctx.time);
            Some(NodeOutput::fire("exec").with("time", Value::Number(ctx.time)))
        })
        .with_label("Every (ms)")
        .with_description("Fires each time the interval has elapsed")
        .with_output(Port::control("exec"))
        .with_output(Port::output("time", PortType::Number))
        .frame_trigger(),
    );
}
