// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized engine configuration, read from `RILL__*` environment
//! variables.
//!
//! The same `RILL__SECTION__KEY` names are injected into flow containers, so
//! a value set here on the host reappears inside the container unchanged.

use crate::executor::Executor;

/// Cloud API endpoint (`RILL__CLOUD__API`).
pub fn cloud_api() -> String {
    std::env::var("RILL__CLOUD__API")
        .unwrap_or_else(|_| "https://api.rill.cloud/graphql".to_string())
}

/// Cloud auth token (`RILL__CLOUD__AUTH_TOKEN`).
pub fn cloud_auth_token() -> Option<String> {
    std::env::var("RILL__CLOUD__AUTH_TOKEN").ok().filter(|s| !s.is_empty())
}

/// Agent-scoped auth token (`RILL__CLOUD__AGENT__AUTH_TOKEN`). Agents run
/// with a narrower token than the user's own; it takes precedence when set.
pub fn agent_auth_token() -> Option<String> {
    std::env::var("RILL__CLOUD__AGENT__AUTH_TOKEN").ok().filter(|s| !s.is_empty())
}

/// Auth token injected into flow containers: agent token first, then the
/// cloud token, empty when neither is configured.
pub fn auth_token() -> String {
    agent_auth_token().or_else(cloud_auth_token).unwrap_or_default()
}

/// Extra logger names forwarded to in-container logging
/// (`RILL__LOGGING__EXTRA_LOGGERS`, a JSON list string, passed through
/// verbatim).
pub fn extra_loggers() -> String {
    std::env::var("RILL__LOGGING__EXTRA_LOGGERS").unwrap_or_else(|_| "[]".to_string())
}

/// Process-wide default executor (`RILL__ENGINE__DEFAULT_EXECUTOR`).
/// Unset or unrecognized values fall back to the local executor.
pub fn default_executor() -> Executor {
    std::env::var("RILL__ENGINE__DEFAULT_EXECUTOR")
        .ok()
        .and_then(|name| Executor::from_name(&name))
        .unwrap_or(Executor::Local)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
