// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless `NodePlay` host.
//!
//! Loads a graph, builds the built-in node registry and runs the graph for a
//! fixed number of simulated frames with scripted input.

pub mod config;
pub mod session;

pub use config::{KeyEvent, PlayConfig, PlayConfigError, DEFAULT_LOG_FILTER};
pub use session::{PlaySession, PlayState};

use nodeplay_graph::{Executor, Graph, RuntimeContext};
use std::sync::Arc;

/// Load the configured graph and run it to completion
pub fn run(config: &PlayConfig) -> Result<PlaySession, PlayConfigError> {
    let graph = Graph::load(&config.graph)?;
    let registry = Arc::new(nodeplay_nodes::builtin_registry());
    let executor = Executor::with_config(graph, registry, config.executor);
    let mut session = PlaySession::new(executor, RuntimeContext::headless());

    session.play();
    for frame in 1..=config.frames {
        if let Some(scene) = session.headless_scene_mut() {
            for event in config.keys_at(frame) {
                scene.set_key(event.key, event.down);
            }
        }
        session.update(config.frame_ms);
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeplay_graph::{EntityId, Key, Node, Value};

    #[test]
    fn test_run_with_scripted_keys() {
        let graph = Graph::new()
            .with_node(Node::new("start", "OnStart"))
            .with_node(Node::new("spawn", "Spawn").with_property("entityId", "bird"))
            .with_node(Node::new("flap", "OnKey"))
            .with_node(Node::new("count", "AddVar").with_property("varName", "flaps"))
            .with_connection("start", "exec", "spawn", "exec")
            .with_connection("flap", "exec", "count", "exec");

        let path = std::env::temp_dir().join(format!("nodeplay_run_{}.json", std::process::id()));
        std::fs::write(&path, graph.to_json().unwrap()).unwrap();

        let config = PlayConfig {
            graph: path.clone(),
            frames: 10,
            keys: vec![
                KeyEvent { frame: 3, key: Key::Space, down: true },
                KeyEvent { frame: 6, key: Key::Space, down: false },
            ],
            ..PlayConfig::default()
        };
        let session = run(&config).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(session.frame_count, 10);
        assert!(session.context().has_entity(&EntityId::new("bird")));
        // Held during frames 3, 4 and 5
        assert_eq!(session.context().variable("flaps"), Some(&Value::Number(3.0)));
    }

    #[test]
    fn test_flappy_demo() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/flappy.ron");
        let config = PlayConfig::load(path).unwrap();
        let session = run(&config).unwrap();

        let ctx = session.context();
        assert_eq!(session.restarts(), 0);
        assert!(ctx.has_entity(&EntityId::new("bird")));
        assert_eq!(ctx.variable("flaps"), Some(&Value::Number(10.0)));
        // Ten seconds at 16 ms per frame ticks nine times
        assert_eq!(ctx.variable("score"), Some(&Value::Number(9.0)));
    }

    #[test]
    fn test_missing_graph_fails() {
        let config = PlayConfig {
            graph: "does/not/exist.json".into(),
            ..PlayConfig::default()
        };
        assert!(matches!(run(&config), Err(PlayConfigError::Graph(_))));
    }
}
