// SPDX-License-Identifier: MIT OR Apache-2.0
//! Play session.
//!
//! Owns an [`Executor`] and its [`RuntimeContext`] and drives one graph pass
//! per simulated frame while playing.

use nodeplay_graph::{Executor, HeadlessScene, RuntimeContext};

/// Play session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    /// Not running; the next `play` starts from a clean world
    #[default]
    Stopped,
    /// Running passes on every update
    Playing,
    /// Suspended; updates are ignored
    Paused,
}

impl PlayState {
    /// Playing or paused
    pub fn is_active(&self) -> bool {
        matches!(self, PlayState::Playing | PlayState::Paused)
    }

    /// Currently playing (not paused)
    pub fn is_playing(&self) -> bool {
        matches!(self, PlayState::Playing)
    }
}

/// Drives a graph frame by frame
#[derive(Debug)]
pub struct PlaySession {
    /// Current play state
    pub state: PlayState,
    executor: Executor,
    context: RuntimeContext,
    /// Time scale for simulation (1.0 = normal speed)
    pub time_scale: f64,
    /// Frames run since play started
    pub frame_count: u64,
    /// Simulated milliseconds since play started
    pub elapsed_time: f64,
    restarts: u32,
}

impl PlaySession {
    /// Create a stopped session
    pub fn new(executor: Executor, context: RuntimeContext) -> Self {
        Self {
            state: PlayState::Stopped,
            executor,
            context,
            time_scale: 1.0,
            frame_count: 0,
            elapsed_time: 0.0,
            restarts: 0,
        }
    }

    /// Start or resume. Returns false when already playing.
    pub fn play(&mut self) -> bool {
        match self.state {
            PlayState::Stopped => {
                self.state = PlayState::Playing;
                self.frame_count = 0;
                self.elapsed_time = 0.0;
                tracing::info!(
                    "Entered play mode: {} start nodes",
                    self.executor.start_nodes().len()
                );
                true
            }
            PlayState::Paused => {
                self.state = PlayState::Playing;
                tracing::info!("Resumed play mode");
                true
            }
            PlayState::Playing => false,
        }
    }

    /// Pause a running session
    pub fn pause(&mut self) -> bool {
        if self.state == PlayState::Playing {
            self.state = PlayState::Paused;
            tracing::info!("Paused play mode");
            true
        } else {
            false
        }
    }

    /// Toggle pause/resume
    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            PlayState::Playing => self.pause(),
            PlayState::Paused => self.play(),
            PlayState::Stopped => false,
        }
    }

    /// Stop and return to a clean world
    pub fn stop(&mut self) -> bool {
        if !self.state.is_active() {
            return false;
        }
        self.reset();
        self.state = PlayState::Stopped;
        tracing::info!("Stopped play mode");
        true
    }

    /// Clear the world and all per-node state without changing the play state
    pub fn reset(&mut self) {
        self.context.clear_world();
        self.context.advance(0.0, 0.0);
        self.executor.reset();
        self.frame_count = 0;
        self.elapsed_time = 0.0;
    }

    /// Advance by `delta_ms` and run one pass. Returns whether a pass ran.
    pub fn update(&mut self, delta_ms: f64) -> bool {
        if self.state != PlayState::Playing {
            return false;
        }

        let scaled_delta = delta_ms * self.time_scale;
        self.elapsed_time += scaled_delta;
        self.frame_count += 1;
        self.context.advance(self.elapsed_time, scaled_delta);
        self.executor.execute(&mut self.context);

        // Restart requests from the graph take effect after the frame
        if self.context.scene_mut().take_restart_request() {
            self.restarts += 1;
            tracing::info!("Restarting scene at frame {}", self.frame_count);
            self.reset();
        }
        true
    }

    /// The world driven by this session
    pub fn context(&self) -> &RuntimeContext {
        &self.context
    }

    /// The headless scene, when the session runs on one
    pub fn headless_scene_mut(&mut self) -> Option<&mut HeadlessScene> {
        self.context.scene_as_mut::<HeadlessScene>()
    }

    /// Number of scene restarts performed
    pub fn restarts(&self) -> u32 {
        self.restarts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeplay_graph::{EntityHandle, EntityId, Graph, Key, Node, SceneHost, SpawnRequest, Value};
    use std::any::Any;
    use std::collections::HashSet;
    use std::sync::Arc;

    /// Host that holds SPACE down until the graph first asks for a restart
    #[derive(Default)]
    struct RecordingHost {
        next_handle: u64,
        live: HashSet<EntityHandle>,
        restart_requests: u32,
        restart_pending: bool,
    }

    impl SceneHost for RecordingHost {
        fn spawn_entity(&mut self, _request: &SpawnRequest) -> EntityHandle {
            self.next_handle += 1;
            let handle = EntityHandle(self.next_handle);
            self.live.insert(handle);
            handle
        }

        fn destroy_entity(&mut self, handle: EntityHandle) {
            self.live.remove(&handle);
        }

        fn is_key_down(&self, key: Key) -> bool {
            key == Key::Space && self.restart_requests == 0
        }

        fn request_restart(&mut self) {
            self.restart_requests += 1;
            self.restart_pending = true;
        }

        fn take_restart_request(&mut self) -> bool {
            std::mem::take(&mut self.restart_pending)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn session(graph: Graph) -> PlaySession {
        let registry = Arc::new(nodeplay_nodes::builtin_registry());
        PlaySession::new(Executor::new(graph, registry), RuntimeContext::headless())
    }

    fn spawner() -> Graph {
        Graph::new()
            .with_node(Node::new("start", "OnStart"))
            .with_node(Node::new("spawn", "Spawn").with_property("entityId", "bird"))
            .with_connection("start", "exec", "spawn", "exec")
    }

    #[test]
    fn test_state_transitions() {
        let mut session = session(Graph::new());
        assert!(!session.pause());
        assert!(!session.toggle_pause());

        assert!(session.play());
        assert!(!session.play());
        assert!(session.toggle_pause());
        assert_eq!(session.state, PlayState::Paused);
        assert!(session.toggle_pause());
        assert!(session.state.is_playing());

        assert!(session.stop());
        assert!(!session.stop());
        assert_eq!(session.state, PlayState::Stopped);
    }

    #[test]
    fn test_update_only_while_playing() {
        let mut session = session(spawner());
        assert!(!session.update(16.0));
        assert!(session.context().entities.is_empty());

        session.play();
        assert!(session.update(16.0));
        assert!(session.context().has_entity(&EntityId::new("bird")));

        session.pause();
        assert!(!session.update(16.0));
        assert_eq!(session.frame_count, 1);
        assert_eq!(session.context().time, 16.0);
    }

    #[test]
    fn test_time_scale() {
        let mut session = session(Graph::new());
        session.time_scale = 0.5;
        session.play();
        session.update(20.0);
        session.update(20.0);
        assert_eq!(session.elapsed_time, 20.0);
        assert_eq!(session.context().delta_time, 10.0);
    }

    #[test]
    fn test_stop_then_play_starts_fresh() {
        let mut session = session(spawner());
        session.play();
        session.update(16.0);
        session.stop();
        assert!(session.context().entities.is_empty());

        // OnStart fires again after a stop
        session.play();
        session.update(16.0);
        assert_eq!(session.context().entities.len(), 1);
        let scene = session.context().scene_as::<HeadlessScene>().unwrap();
        assert_eq!(scene.live_count(), 1);
        assert_eq!(scene.destroyed_count(), 1);
    }

    #[test]
    fn test_reset_game_restarts_scene() {
        let graph = spawner()
            .with_node(Node::new("key", "OnKey").with_property("key", "UP"))
            .with_node(Node::new("reset", "ResetGame"))
            .with_node(Node::new("score", "AddVar").with_property("varName", "score"))
            .with_connection("key", "exec", "reset", "exec")
            .with_connection("start", "exec", "score", "exec");
        let mut session = session(graph);
        session.play();
        session.update(16.0);
        assert_eq!(session.context().variable("score"), Some(&Value::Number(1.0)));

        session.headless_scene_mut().unwrap().press(Key::Up);
        session.update(16.0);
        assert_eq!(session.restarts(), 1);
        assert!(session.context().entities.is_empty());
        assert_eq!(session.frame_count, 0);

        // Per-node state was cleared, so OnStart runs again
        session.headless_scene_mut().unwrap().release(Key::Up);
        session.update(16.0);
        assert!(session.context().has_entity(&EntityId::new("bird")));
        assert_eq!(session.context().variable("score"), Some(&Value::Number(1.0)));
        assert!(session.state.is_playing());
    }

    #[test]
    fn test_custom_host_restart() {
        let graph = spawner()
            .with_node(Node::new("key", "OnKey"))
            .with_node(Node::new("reset", "ResetGame"))
            .with_connection("key", "exec", "reset", "exec");
        let registry = Arc::new(nodeplay_nodes::builtin_registry());
        let context = RuntimeContext::new(Box::new(RecordingHost::default()));
        let mut session = PlaySession::new(Executor::new(graph, registry), context);
        session.play();

        session.update(16.0);
        assert_eq!(session.restarts(), 1);
        assert!(session.context().entities.is_empty());

        // OnStart re-armed by the restart
        session.update(16.0);
        assert!(session.context().has_entity(&EntityId::new("bird")));
        let host = session.context().scene_as::<RecordingHost>().unwrap();
        assert_eq!(host.restart_requests, 1);
        assert_eq!(host.live.len(), 1);
    }
}
