// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene control nodes.

use nodeplay_graph::{NodeCategory, NodeDefinition, NodeOutput, NodeRegistry, Port};

/// Register the scene nodes
pub fn register(registry: &mut NodeRegistry) {
    // Clears the world; per-node state is reset by the host when it restarts
    registry.register(
        NodeDefinition::new("ResetGame", NodeCategory::Scene, |ctx, _inputs, node| {
            tracing::info!("ResetGame {} clearing {} entities", node.id(), ctx.entities.len());
            ctx.clear_world();
            ctx.scene_mut().request_restart();
            Some(NodeOutput::fire("exec"))
        })
        .with_label("Reset Game")
        .with_input(Port::control("exec"))
        .with_output(Port::control("exec"))
        .with_side_effects(),
    );
}
