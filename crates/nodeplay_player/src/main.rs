// SPDX-License-Identifier: MIT OR Apache-2.0
//! `NodePlay` player - runs a node graph headless.
//!
//! Usage: `nodeplay_player <config.ron | graph.json>`

use nodeplay_graph::EntityId;
use nodeplay_player::{PlayConfig, DEFAULT_LOG_FILTER};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn init_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: nodeplay_player <config.ron | graph.json>");
        std::process::exit(2);
    };

    let config = match PlayConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(DEFAULT_LOG_FILTER);
            tracing::error!("Failed to load {path}: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(&config.log_filter);

    tracing::info!("Starting NodePlay player v{}", env!("CARGO_PKG_VERSION"));

    let session = match nodeplay_player::run(&config) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to run {}: {e}", config.graph.display());
            std::process::exit(1);
        }
    };

    let ctx = session.context();
    tracing::info!(
        "Finished after {} frames, {} restarts",
        config.frames,
        session.restarts()
    );
    tracing::info!(
        "Entities ({}): {:?}",
        ctx.entities.len(),
        ctx.entities.keys().map(EntityId::as_str).collect::<Vec<_>>()
    );
    for (name, value) in &ctx.variables {
        tracing::info!("  {name} = {value}");
    }
}
