// SPDX-License-Identifier: MIT OR Apache-2.0
//! Play configuration.
//!
//! A `.ron` file describing which graph to run and how to drive it. A bare
//! graph file (`.json`) can be passed instead; it runs with the defaults.

use nodeplay_graph::{ExecutorConfig, GraphLoadError, Key};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default log filter directive
pub const DEFAULT_LOG_FILTER: &str = "nodeplay=info";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum PlayConfigError {
    /// Config file could not be read
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Config file is not valid RON
    #[error("Invalid config: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// Graph could not be loaded
    #[error(transparent)]
    Graph(#[from] GraphLoadError),
}

/// A scripted key change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Frame (1-based) before which the change applies
    pub frame: u64,
    /// Key
    pub key: Key,
    /// Pressed or released
    pub down: bool,
}

/// Headless play settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Graph file (`.json` or `.ron`), relative to the config file
    pub graph: PathBuf,
    /// Simulated frame duration in milliseconds
    pub frame_ms: f64,
    /// Number of frames to run
    pub frames: u64,
    /// Executor settings
    pub executor: ExecutorConfig,
    /// Scripted input
    pub keys: Vec<KeyEvent>,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            graph: PathBuf::new(),
            frame_ms: 16.0,
            frames: 600,
            executor: ExecutorConfig::default(),
            keys: Vec::new(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl PlayConfig {
    /// Parse a config from RON
    pub fn from_ron(text: &str) -> Result<Self, PlayConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Load a `.ron` config, or wrap a graph file in the default config
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlayConfigError> {
        let path = path.as_ref();
        let is_config = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("ron"))
            && !path
                .file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|s| s.ends_with(".graph"));

        if !is_config {
            return Ok(Self {
                graph: path.to_path_buf(),
                ..Self::default()
            });
        }

        let text = std::fs::read_to_string(path).map_err(|source| PlayConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_ron(&text)?;
        if config.graph.is_relative() {
            if let Some(dir) = path.parent() {
                config.graph = dir.join(&config.graph);
            }
        }
        Ok(config)
    }

    /// Key changes scheduled for a frame
    pub fn keys_at(&self, frame: u64) -> impl Iterator<Item = &KeyEvent> {
        self.keys.iter().filter(move |e| e.frame == frame)
    }
}
