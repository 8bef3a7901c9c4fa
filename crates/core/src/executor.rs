// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executor selection for flow runs.
//!
//! Environments carry the executor the in-container engine will run the flow
//! with. Environments are configured from untyped flow config, so the
//! executor arrives as a spec value (a name string or a `{"type": ...}`
//! object) and is validated at environment construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How tasks within a flow run are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Executor {
    /// Tasks run sequentially in the flow-runner process.
    Local,
    /// Tasks run on a thread pool in the flow-runner process.
    Threaded,
    /// Tasks are shipped to remote workers.
    Distributed,
}

/// Rejected executor spec values.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("`executor` must name a known executor (`local`, `threaded`, `distributed`), got `{0}`")]
    Invalid(String),
}

impl Executor {
    /// Canonical name, as accepted by [`Executor::from_spec`].
    pub fn name(&self) -> &'static str {
        match self {
            Executor::Local => "local",
            Executor::Threaded => "threaded",
            Executor::Distributed => "distributed",
        }
    }

    /// Look up an executor by name. Case-insensitive.
    pub fn from_name(name: &str) -> Option<Executor> {
        match name.to_ascii_lowercase().as_str() {
            "local" => Some(Executor::Local),
            "threaded" => Some(Executor::Threaded),
            "distributed" => Some(Executor::Distributed),
            _ => None,
        }
    }

    /// Parse an executor from a config spec value.
    ///
    /// Accepts a name string (`"local"`) or an object with a `type` field
    /// (`{"type": "threaded"}`). Any other shape or unknown name is an
    /// [`ExecutorError::Invalid`].
    pub fn from_spec(spec: &serde_json::Value) -> Result<Executor, ExecutorError> {
        let name = match spec {
            serde_json::Value::String(name) => Some(name.as_str()),
            serde_json::Value::Object(map) => map.get("type").and_then(|v| v.as_str()),
            _ => None,
        };
        name.and_then(Executor::from_name).ok_or_else(|| ExecutorError::Invalid(spec.to_string()))
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
