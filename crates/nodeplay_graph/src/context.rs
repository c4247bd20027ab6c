// SPDX-License-Identifier: MIT OR Apache-2.0
//! Runtime context: the host-owned world that node executions read and mutate.
//!
//! The executor only hands the context through to node execution functions.
//! It never touches the entity or variable tables itself, and never calls the
//! [`SceneHost`] directly.

use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Identifier of an entity in the runtime entity table
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Create an entity ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Opaque handle to a host object (sprite, body, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle(pub u64);

/// Keys the host can report on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Key {
    /// Space bar
    Space,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

impl Key {
    /// Authored name of the key
    pub fn name(&self) -> &'static str {
        match self {
            Key::Space => "SPACE",
            Key::Up => "UP",
            Key::Down => "DOWN",
            Key::Left => "LEFT",
            Key::Right => "RIGHT",
        }
    }
}

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SPACE" => Ok(Key::Space),
            "UP" => Ok(Key::Up),
            "DOWN" => Ok(Key::Down),
            "LEFT" => Ok(Key::Left),
            "RIGHT" => Ok(Key::Right),
            _ => Err(UnknownKey(s.to_string())),
        }
    }
}

/// Error parsing a key name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown key: {0}")]
pub struct UnknownKey(pub String);

/// What a spawn node asks the host to create
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    /// Entity ID the object is registered under
    pub id: EntityId,
    /// Sprite/texture name
    pub sprite: String,
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Static body (cannot move)
    pub is_static: bool,
    /// Affected by gravity (dynamic bodies only)
    pub has_gravity: bool,
    /// Optional tag used for collision grouping
    pub tag: Option<String>,
}

impl SpawnRequest {
    /// Create a request with the host defaults
    pub fn new(id: EntityId, sprite: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id,
            sprite: sprite.into(),
            x,
            y,
            is_static: false,
            has_gravity: true,
            tag: None,
        }
    }
}

/// Host-level facilities reachable from node execution functions.
pub trait SceneHost {
    /// Create a host object and return its handle
    fn spawn_entity(&mut self, request: &SpawnRequest) -> EntityHandle;

    /// Destroy a host object
    fn destroy_entity(&mut self, handle: EntityHandle);

    /// Whether a key is currently held down
    fn is_key_down(&self, key: Key) -> bool;

    /// Ask the host to restart the scene after this frame
    fn request_restart(&mut self);

    /// Consume a pending restart request, returning whether one was made
    fn take_restart_request(&mut self) -> bool;

    /// Downcast support for hosts that need their concrete scene back
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// In-process scene used by tests and the headless player
#[derive(Debug, Default)]
pub struct HeadlessScene {
    next_handle: u64,
    live: HashMap<EntityHandle, SpawnRequest>,
    destroyed: usize,
    keys_down: HashSet<Key>,
    restart_requests: u32,
    restart_pending: bool,
}

impl HeadlessScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether a key is held down
    pub fn set_key(&mut self, key: Key, down: bool) {
        if down {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    /// Press a key
    pub fn press(&mut self, key: Key) {
        self.set_key(key, true);
    }

    /// Release a key
    pub fn release(&mut self, key: Key) {
        self.set_key(key, false);
    }

    /// Objects currently alive in the scene
    pub fn live_entities(&self) -> impl Iterator<Item = (&EntityHandle, &SpawnRequest)> {
        self.live.iter()
    }

    /// Number of objects currently alive
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of objects destroyed so far
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    /// Number of restarts requested by the graph
    pub fn restart_requests(&self) -> u32 {
        self.restart_requests
    }
}

impl SceneHost for HeadlessScene {
    fn spawn_entity(&mut self, request: &SpawnRequest) -> EntityHandle {
        self.next_handle += 1;
        let handle = EntityHandle(self.next_handle);
        self.live.insert(handle, request.clone());
        handle
    }

    fn destroy_entity(&mut self, handle: EntityHandle) {
        if self.live.remove(&handle).is_some() {
            self.destroyed += 1;
        }
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
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

/// Per-session world state owned by the host loop
pub struct RuntimeContext {
    /// Entity table
    pub entities: IndexMap<EntityId, EntityHandle>,
    /// Variable table
    pub variables: IndexMap<String, Value>,
    /// Current frame time in milliseconds
    pub time: f64,
    /// Time since the previous frame in milliseconds
    pub delta_time: f64,
    scene: Box<dyn SceneHost>,
}

impl RuntimeContext {
    /// Create a context bound to a host scene
    pub fn new(scene: Box<dyn SceneHost>) -> Self {
        Self {
            entities: IndexMap::new(),
            variables: IndexMap::new(),
            time: 0.0,
            delta_time: 0.0,
            scene,
        }
    }

    /// Create a context backed by a [`HeadlessScene`]
    pub fn headless() -> Self {
        Self::new(Box::new(HeadlessScene::new()))
    }

    /// Update time before a pass
    pub fn advance(&mut self, time: f64, delta_time: f64) {
        self.time = time;
        self.delta_time = delta_time;
    }

    /// Host scene
    pub fn scene(&self) -> &dyn SceneHost {
        self.scene.as_ref()
    }

    /// Mutable host scene
    pub fn scene_mut(&mut self) -> &mut dyn SceneHost {
        self.scene.as_mut()
    }

    /// Borrow the host scene as its concrete type
    pub fn scene_as<T: 'static>(&self) -> Option<&T> {
        self.scene.as_any().downcast_ref()
    }

    /// Mutably borrow the host scene as its concrete type
    pub fn scene_as_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.scene.as_any_mut().downcast_mut()
    }

    /// Look up an entity handle
    pub fn entity(&self, id: &EntityId) -> Option<EntityHandle> {
        self.entities.get(id).copied()
    }

    /// Whether an entity is registered
    pub fn has_entity(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Register an entity handle
    pub fn insert_entity(&mut self, id: EntityId, handle: EntityHandle) {
        self.entities.insert(id, handle);
    }

    /// Unregister an entity, returning its handle
    pub fn remove_entity(&mut self, id: &EntityId) -> Option<EntityHandle> {
        self.entities.shift_remove(id)
    }

    /// Read a variable
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Write a variable
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Destroy every entity through the host and clear both tables
    pub fn clear_world(&mut self) {
        for (_, handle) in self.entities.drain(..) {
            self.scene.destroy_entity(handle);
        }
        self.variables.clear();
    }
}

impl fmt::Debug for RuntimeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeContext")
            .field("entities", &self.entities)
            .field("variables", &self.variables)
            .field("time", &self.time)
            .field("delta_time", &self.delta_time)
            .finish_non_exhaustive()
    }
}
