//! Logging setup for hosts embedding the editor.
//!
//! Filter priority: `EDITOR_CANVAS_LOG`, then `RUST_LOG`, then the directive
//! passed by the caller (or [`DEFAULT_DIRECTIVE`]). Only the first call to
//! [`init_logging`] installs a subscriber; later calls return `Ok(false)`.

use anyhow::Context;
use std::env;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "EDITOR_CANVAS_LOG";

pub const DEFAULT_DIRECTIVE: &str = "warn,editor_canvas=info";

/// Pick the filter directive from the environment or fall back to `fallback`.
pub fn filter_directive(fallback: Option<&str>) -> String {
    env::var(LOG_ENV_VAR)
        .or_else(|_| env::var("RUST_LOG"))
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| fallback.unwrap_or(DEFAULT_DIRECTIVE).to_string())
}

/// Install a global `fmt` subscriber. Returns `false` when one was already
/// installed.
pub fn init_logging(fallback: Option<&str>) -> anyhow::Result<bool> {
    let directive = filter_directive(fallback);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter `{directive}`"))?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();
    if installed {
        debug!(%directive, "logging initialised");
    }
    Ok(installed)
}
