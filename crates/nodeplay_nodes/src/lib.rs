// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in node catalogue for `NodePlay`.
//!
//! Every module registers its node kinds into a host-owned
//! [`NodeRegistry`]. None of these nodes contain engine logic; they only
//! implement the node contract against the runtime context.
//!
//! - [`events`]: `OnStart`, `OnKey`, `Every`
//! - [`logic`]: `If`, `SetVar`, `AddVar`, `GetVariable`, `Compare`
//! - [`world`]: `GetEntity`, `Spawn`, `Destroy`
//! - [`scene`]: `ResetGame`

pub mod events;
pub mod logic;
pub mod scene;
pub mod world;

use nodeplay_graph::NodeRegistry;

/// Register every built-in node kind
pub fn register_builtin_nodes(registry: &mut NodeRegistry) {
    events::register(registry);
    logic::register(registry);
    world::register(registry);
    scene::register(registry);
}

/// Create a registry holding the built-in node kinds
pub fn builtin_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();
    register_builtin_nodes(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeplay_graph::{
        EntityId, Executor, Graph, HeadlessScene, Key, Node, NodeCategory, RuntimeContext, Value,
    };
    use std::sync::Arc;

    fn executor(graph: Graph) -> Executor {
        let executor = Executor::new(graph, Arc::new(builtin_registry()));
        assert!(executor.issues().is_empty(), "{:?}", executor.issues());
        executor
    }

    fn scene(ctx: &RuntimeContext) -> &HeadlessScene {
        ctx.scene_as::<HeadlessScene>().unwrap()
    }

    #[test]
    fn test_catalogue() {
        let registry = builtin_registry();
        for kind in [
            "OnStart", "OnKey", "Every", "If", "SetVar", "AddVar", "GetVariable", "Compare",
            "GetEntity", "Spawn", "Destroy", "ResetGame",
        ] {
            assert!(registry.contains(kind), "missing {kind}");
        }
        assert_eq!(registry.by_category(NodeCategory::Event).count(), 3);
        assert!(registry.by_category(NodeCategory::Event).all(|d| d.is_start_node()));
    }

    #[test]
    fn test_on_start_spawns_once() {
        let graph = Graph::new()
            .with_node(Node::new("start", "OnStart"))
            .with_node(
                Node::new("spawn_player", "Spawn")
                    .with_property("sprite", "player")
                    .with_property("x", 400.0)
                    .with_property("y", 300.0)
                    .with_property("entityId", "player"),
            )
            .with_connection("start", "exec", "spawn_player", "exec");
        let mut executor = executor(graph);
        let mut ctx = RuntimeContext::headless();

        executor.execute(&mut ctx);
        assert_eq!(ctx.entities.len(), 1);
        assert!(ctx.has_entity(&EntityId::new("player")));

        executor.execute(&mut ctx);
        assert_eq!(ctx.entities.len(), 1);
        assert_eq!(scene(&ctx).live_count(), 1);

        let (_, spawned) = scene(&ctx).live_entities().next().unwrap();
        assert_eq!(spawned.sprite, "player");
        assert_eq!((spawned.x, spawned.y), (400.0, 300.0));
    }

    #[test]
    fn test_every_interval_drives_add_var() {
        let graph = Graph::new()
            .with_node(Node::new("every", "Every").with_property("interval", 1000.0))
            .with_node(
                Node::new("add", "AddVar")
                    .with_property("varName", "ticks")
                    .with_property("value", 1.0),
            )
            .with_connection("every", "exec", "add", "exec");
        let mut executor = executor(graph);
        let mut ctx = RuntimeContext::headless();

        let mut observed = Vec::new();
        for time in [0.0, 500.0, 1000.0, 1500.0] {
            ctx.advance(time, 500.0);
            executor.execute(&mut ctx);
            observed.push(ctx.variable("ticks").cloned());
        }

        assert_eq!(
            observed,
            vec![None, None, Some(Value::Number(1.0)), Some(Value::Number(1.0))]
        );

        ctx.advance(2000.0, 500.0);
        executor.execute(&mut ctx);
        assert_eq!(ctx.variable("ticks"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_on_key_follows_input() {
        let graph = Graph::new()
            .with_node(Node::new("right", "OnKey").with_property("key", "RIGHT"))
            .with_node(Node::new("count", "AddVar").with_property("varName", "presses"))
            .with_connection("right", "exec", "count", "exec");
        let mut executor = executor(graph);
        let mut ctx = RuntimeContext::headless();

        executor.execute(&mut ctx);
        assert_eq!(ctx.variable("presses"), None);

        ctx.scene_as_mut::<HeadlessScene>().unwrap().press(Key::Right);
        executor.execute(&mut ctx);
        executor.execute(&mut ctx);
        assert_eq!(ctx.variable("presses"), Some(&Value::Number(2.0)));

        ctx.scene_as_mut::<HeadlessScene>().unwrap().release(Key::Right);
        executor.execute(&mut ctx);
        assert_eq!(ctx.variable("presses"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_compare_feeds_branch() {
        let graph = Graph::new()
            .with_node(Node::new("start", "OnStart"))
            .with_node(
                Node::new("cmp", "Compare")
                    .with_property("a", 3.0)
                    .with_property("b", 2.0)
                    .with_property("operator", ">"),
            )
            .with_node(Node::new("if", "If"))
            .with_node(
                Node::new("yes", "SetVar")
                    .with_property("varName", "branch")
                    .with_property("value", "yes"),
            )
            .with_node(
                Node::new("no", "SetVar")
                    .with_property("varName", "branch")
                    .with_property("value", "no"),
            )
            .with_connection("start", "exec", "if", "exec")
            .with_connection("cmp", "result", "if", "condition")
            .with_connection("if", "true", "yes", "exec")
            .with_connection("if", "false", "no", "exec");
        let mut executor = executor(graph);
        let mut ctx = RuntimeContext::headless();

        executor.execute(&mut ctx);

        assert_eq!(ctx.variable("branch"), Some(&Value::from("yes")));
    }

    #[test]
    fn test_spawn_then_destroy() {
        let graph = Graph::new()
            .with_node(Node::new("start", "OnStart"))
            .with_node(Node::new("spawn", "Spawn").with_property("entityId", "pipe"))
            .with_node(Node::new("destroy", "Destroy").with_property("entity", "pipe"))
            .with_connection("start", "exec", "spawn", "exec")
            .with_connection("spawn", "exec", "destroy", "exec");
        let mut executor = executor(graph);
        let mut ctx = RuntimeContext::headless();

        executor.execute(&mut ctx);

        assert!(ctx.entities.is_empty());
        assert_eq!(scene(&ctx).live_count(), 0);
        assert_eq!(scene(&ctx).destroyed_count(), 1);
    }

    #[test]
    fn test_reset_game_clears_world() {
        let graph = Graph::new()
            .with_node(Node::new("start", "OnStart"))
            .with_node(Node::new("spawn", "Spawn").with_property("entityId", "player"))
            .with_node(Node::new("score", "SetVar").with_property("varName", "score"))
            .with_node(Node::new("space", "OnKey"))
            .with_node(Node::new("reset", "ResetGame"))
            .with_connection("start", "exec", "spawn", "exec")
            .with_connection("spawn", "exec", "score", "exec")
            .with_connection("space", "exec", "reset", "exec");
        let mut executor = executor(graph);
        let mut ctx = RuntimeContext::headless();

        executor.execute(&mut ctx);
        assert_eq!(ctx.entities.len(), 1);
        assert_eq!(ctx.variable("score"), Some(&Value::Number(0.0)));

        ctx.scene_as_mut::<HeadlessScene>().unwrap().press(Key::Space);
        executor.execute(&mut ctx);

        assert!(ctx.entities.is_empty());
        assert!(ctx.variables.is_empty());
        assert_eq!(scene(&ctx).restart_requests(), 1);
    }

    #[test]
    fn test_editor_template_runs() {
        let json = serde_json::json!({
            "name": "Simple Movement Example",
            "slug": "simple-movement",
            "description": "",
            "graph": {
                "nodes": [
                    { "id": "start", "type": "OnStart", "position": { "x": 50, "y": 100 },
                      "data": { "label": "On Start", "properties": {} } },
                    { "id": "spawn_player", "type": "Spawn", "position": { "x": 250, "y": 100 },
                      "data": { "label": "Spawn Player",
                                "properties": { "sprite": "player", "x": 400, "y": 300,
                                                "entityId": "player" } } },
                    { "id": "get", "type": "GetEntity", "position": { "x": 450, "y": 100 },
                      "data": { "label": "Get", "properties": { "entity": "player" } } },
                    { "id": "flag", "type": "SetVar", "position": { "x": 650, "y": 100 },
                      "data": { "label": "Flag", "properties": { "varName": "alive" } } }
                ],
                "edges": [
                    { "id": "e1", "source": "start", "sourceHandle": "exec",
                      "target": "spawn_player", "targetHandle": "exec" },
                    { "id": "e2", "source": "spawn_player", "sourceHandle": "exec",
                      "target": "get", "targetHandle": "exec" },
                    { "id": "e3", "source": "get", "sourceHandle": "exec",
                      "target": "flag", "targetHandle": "exec" },
                    { "id": "e4", "source": "get", "sourceHandle": "exists",
                      "target": "flag", "targetHandle": "value" }
                ]
            }
        });
        let graph = Graph::from_json(&json.to_string()).unwrap();
        let mut executor = executor(graph);
        let mut ctx = RuntimeContext::headless();

        executor.execute(&mut ctx);

        assert!(ctx.has_entity(&EntityId::new("player")));
        assert_eq!(ctx.variable("alive"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_editor_get_variable() {
        let json = r#"{
            "nodes": [
                { "id": "start", "type": "OnStart" },
                { "id": "add", "type": "AddVar",
                  "data": { "label": "Score", "properties": { "varName": "score", "value": 5 } } },
                { "id": "get", "type": "GetVariable",
                  "data": { "label": "Get Variable", "properties": { "variable": "score" } } },
                { "id": "copy", "type": "SetVar",
                  "data": { "label": "Copy", "properties": { "varName": "copy" } } }
            ],
            "edges": [
                { "source": "start", "sourceHandle": "exec",
                  "target": "add", "targetHandle": "exec" },
                { "source": "add", "sourceHandle": "exec",
                  "target": "get", "targetHandle": "exec" },
                { "source": "get", "sourceHandle": "exec",
                  "target": "copy", "targetHandle": "exec" },
                { "source": "get", "sourceHandle": "value",
                  "target": "copy", "targetHandle": "value" }
            ]
        }"#;
        let mut executor = executor(Graph::from_json(json).unwrap());
        let mut ctx = RuntimeContext::headless();

        executor.execute(&mut ctx);

        assert_eq!(ctx.variable("score"), Some(&Value::Number(5.0)));
        assert_eq!(ctx.variable("copy"), Some(&Value::Number(5.0)));
    }
}
