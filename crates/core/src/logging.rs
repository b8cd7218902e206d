//! Système de logging pour Plaque Core

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise le système de logging
pub fn init_logging() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();
}
