// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-node persistent state.
//!
//! Each node instance owns one [`NodeState`] slot in a side table held by the
//! executor. A node kind decides the shape of what it stores there; the slot
//! only checks that later reads ask for the same type.

use std::any::Any;
use std::fmt;

/// Persistent memory of one node instance, surviving across frames until reset.
#[derive(Default)]
pub struct NodeState {
    slot: Option<Box<dyn Any>>,
}

impl NodeState {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Borrow the stored value if it has type `T`
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.slot.as_deref().and_then(|s| s.downcast_ref())
    }

    /// Mutably borrow the stored value if it has type `T`
    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.slot.as_deref_mut().and_then(|s| s.downcast_mut())
    }

    /// Borrow the stored `T`, inserting `T::default()` first if the slot is
    /// empty or holds a different type.
    pub fn get_or_default<T: Default + 'static>(&mut self) -> &mut T {
        if !self.slot.as_deref().is_some_and(|s| s.is::<T>()) {
            if self.slot.is_some() {
                tracing::debug!(
                    "Node state replaced with {}",
                    std::any::type_name::<T>()
                );
            }
            self.slot = Some(Box::new(T::default()));
        }
        match self.slot.as_deref_mut().and_then(|s| s.downcast_mut()) {
            Some(value) => value,
            None => unreachable!("slot was just filled with T"),
        }
    }

    /// Replace the stored value
    pub fn set<T: 'static>(&mut self, value: T) {
        self.slot = Some(Box::new(value));
    }

    /// Remove and return the stored value if it has type `T`
    pub fn take<T: 'static>(&mut self) -> Option<T> {
        match self.slot.take()?.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(other) => {
                self.slot = Some(other);
                None
            }
        }
    }

    /// Drop whatever is stored
    pub fn clear(&mut self) {
        self.slot = None;
    }
}

impl fmt::Debug for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeState")
            .field("occupied", &self.slot.is_some())
            .finish()
    }
}
