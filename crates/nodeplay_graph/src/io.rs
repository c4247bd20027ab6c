// SPDX-License-Identifier: MIT OR Apache-2.0
//! Loading and saving authored graphs.
//!
//! The editor persists graphs as JSON (`{ nodes, edges }`, optionally wrapped
//! in a project record). RON is supported for hand-written graphs.

use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Error loading a graph
#[derive(Debug, thiserror::Error)]
pub enum GraphLoadError {
    /// File could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Invalid JSON
    #[error("Invalid JSON graph: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid RON
    #[error("Invalid RON graph: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// RON serialization failed
    #[error("Failed to write RON graph: {0}")]
    RonWrite(#[from] ron::Error),

    /// Unknown file extension
    #[error("Unsupported graph format: {0:?}")]
    UnsupportedFormat(PathBuf),
}

/// A project record as saved by the editor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameProject {
    /// Project name
    #[serde(default)]
    pub name: String,
    /// URL slug
    #[serde(default)]
    pub slug: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// The authored graph
    pub graph: Graph,
}

impl GameProject {
    /// Parse a project record from JSON
    pub fn from_json(json: &str) -> Result<Self, GraphLoadError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Graph {
    /// Parse a bare graph or a project record from JSON.
    ///
    /// A top-level `graph` field selects the project record.
    pub fn from_json(json: &str) -> Result<Self, GraphLoadError> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        if document.get("graph").is_some() {
            let project: GameProject = serde_json::from_value(document)?;
            return Ok(project.graph);
        }
        Ok(serde_json::from_value(document)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, GraphLoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from RON
    pub fn from_ron(text: &str) -> Result<Self, GraphLoadError> {
        Ok(ron::from_str(text)?)
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, GraphLoadError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Load a graph file, choosing the format by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GraphLoadError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Graph, GraphLoadError> = match extension.as_deref() {
            Some("json") => Graph::from_json,
            Some("ron") => Graph::from_ron,
            _ => return Err(GraphLoadError::UnsupportedFormat(path.to_path_buf())),
        };

        let text = std::fs::read_to_string(path).map_err(|source| GraphLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let graph = parse(&text)?;
        tracing::info!(
            "Loaded graph {:?}: {} nodes, {} connections",
            path,
            graph.node_count(),
            graph.connection_count()
        );
        Ok(graph)
    }
}
