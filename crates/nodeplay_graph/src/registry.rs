// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registry of available node kinds.
//!
//! The host builds one registry at startup, lets every plugin module register
//! its kinds, then shares it with executors through an `Arc`.

use crate::definition::{NodeCategory, NodeDefinition};
use indexmap::IndexMap;

/// Catalogue mapping a kind ID to its definition
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    /// Registered definitions by kind, in registration order
    definitions: IndexMap<String, NodeDefinition>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node kind. A later registration of the same kind replaces the earlier one.
    pub fn register(&mut self, definition: NodeDefinition) {
        if let Some(previous) = self.definitions.insert(definition.kind.clone(), definition) {
            tracing::warn!("Node kind {} registered twice; replacing", previous.kind);
        }
    }

    /// Get a definition by kind
    pub fn get(&self, kind: &str) -> Option<&NodeDefinition> {
        self.definitions.get(kind)
    }

    /// Whether a kind is registered
    pub fn contains(&self, kind: &str) -> bool {
        self.definitions.contains_key(kind)
    }

    /// Get all registered definitions
    pub fn all(&self) -> impl Iterator<Item = &NodeDefinition> {
        self.definitions.values()
    }

    /// Get definitions in a category
    pub fn by_category(&self, category: NodeCategory) -> impl Iterator<Item = &NodeDefinition> {
        self.definitions.values().filter(move |d| d.category == category)
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::NodeOutput;

    fn definition(kind: &str, category: NodeCategory) -> NodeDefinition {
        NodeDefinition::new(kind, category, |_ctx, _inputs, _node| Some(NodeOutput::new()))
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = NodeRegistry::new();
        assert!(registry.is_empty());

        registry.register(definition("OnStart", NodeCategory::Event));
        registry.register(definition("If", NodeCategory::Logic));
        registry.register(definition("SetVar", NodeCategory::Logic));

        assert_eq!(registry.len(), 3);
        assert!(registry.get("If").is_some());
        assert!(registry.get("Missing").is_none());

        let logic: Vec<_> = registry
            .by_category(NodeCategory::Logic)
            .map(|d| d.kind.as_str())
            .collect();
        assert_eq!(logic, vec!["If", "SetVar"]);
    }

    #[test]
    fn test_overwrite() {
        let mut registry = NodeRegistry::new();
        registry.register(definition("Spawn", NodeCategory::World));
        registry.register(definition("Spawn", NodeCategory::Scene).with_label("Spawn v2"));

        assert_eq!(registry.len(), 1);
        let spawn = registry.get("Spawn").unwrap();
        assert_eq!(spawn.label, "Spawn v2");
        assert_eq!(spawn.category, NodeCategory::Scene);
    }
}
