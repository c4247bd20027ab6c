// SPDX-License-Identifier: MIT OR Apache-2.0
//! World nodes: entity lookup, creation and removal.

use nodeplay_graph::{
    EntityId, NodeCategory, NodeDefinition, NodeOutput, NodeRegistry, Port, PortType, SpawnRequest,
    Value,
};
use uuid::Uuid;

/// Sprite used by `Spawn` when none is wired or configured
pub const DEFAULT_SPRITE: &str = "player";

/// Coordinate used by `Spawn` when none is wired or configured
pub const DEFAULT_POSITION: f64 = 100.0;

/// Register the world nodes
pub fn register(registry: &mut NodeRegistry) {
    registry.register(
        NodeDefinition::new("GetEntity", NodeCategory::World, |ctx, _inputs, node| {
            let id = EntityId::new(node.node.text("entity").unwrap_or_default());
            let exists = ctx.has_entity(&id);
            Some(
                NodeOutput::fire("exec")
                    .with("entity", id)
                    .with("exists", exists),
            )
        })
        .with_label("Get Entity")
        .with_input(Port::control("exec"))
        .with_output(Port::control("exec"))
        .with_output(Port::output("entity", PortType::Entity))
        .with_output(Port::output("exists", PortType::Boolean)),
    );

    registry.register(
        NodeDefinition::new("Spawn", NodeCategory::World, |ctx, inputs, node| {
            let props = node.node;
            let id = props
                .text("entityId")
                .map(EntityId::new)
                .unwrap_or_else(|| EntityId::new(format!("entity_{}", Uuid::new_v4().simple())));

            if !ctx.has_entity(&id) {
                let mut request = SpawnRequest::new(
                    id.clone(),
                    inputs.text_or("sprite", props, DEFAULT_SPRITE),
                    inputs.number_or("x", props, DEFAULT_POSITION),
                    inputs.number_or("y", props, DEFAULT_POSITION),
                );
                request.is_static = props.property("isStatic").is_some_and(Value::as_bool);
                request.has_gravity = props.property("hasGravity").map_or(true, Value::as_bool);
                request.tag = props.text("tag").map(str::to_string);

                tracing::debug!(
                    "Spawn {}: entity={}, sprite={}, x={}, y={}",
                    node.id(),
                    id,
                    request.sprite,
                    request.x,
                    request.y
                );
                let handle = ctx.scene_mut().spawn_entity(&request);
                ctx.insert_entity(id.clone(), handle);
            }

            Some(NodeOutput::fire("exec").with("entity", id))
        })
        .with_input(Port::control("exec"))
        .with_input(Port::input("sprite", PortType::String).with_default(DEFAULT_SPRITE))
        .with_input(Port::input("x", PortType::Number).with_default(DEFAULT_POSITION))
        .with_input(Port::input("y", PortType::Number).with_default(DEFAULT_POSITION))
        .with_output(Port::control("exec"))
        .with_output(Port::output("entity", PortType::Entity))
        .with_side_effects(),
    );

    registry.register(
        NodeDefinition::new("Destroy", NodeCategory::World, |ctx, inputs, node| {
            if let Some(id) = inputs.entity_or("entity", node.node, "entity") {
                if let Some(handle) = ctx.remove_entity(&id) {
                    ctx.scene_mut().destroy_entity(handle);
                    tracing::debug!("Destroy {}: removed {}", node.id(), id);
                }
            }
            Some(NodeOutput::fire("exec"))
        })
        .with_input(Port::control("exec"))
        .with_input(Port::input("entity", PortType::Entity))
        .with_output(Port::control("exec"))
        .with_side_effects(),
    );
}
