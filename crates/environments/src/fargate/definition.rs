// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container definition synthesis for Fargate task registration.
//!
//! Works directly on the JSON definition options so user-supplied
//! `containerDefinitions` entries keep every field they came with; this
//! module only forces the fields the engine owns.

use rill_core::config;
use serde_json::{json, Map, Value};

/// Name of the container the flow runner executes in. The first entry of
/// `containerDefinitions` is forced to this name, and run-time overrides
/// target it.
pub(crate) const FLOW_CONTAINER_NAME: &str = "flow-container";

/// Fixed command for the flow container: re-enter the engine.
pub(crate) const FLOW_CONTAINER_COMMAND: &[&str] = &["/bin/sh", "-c", "rill execute fargate-task"];

/// Environment variables stamped into every container at registration time.
///
/// Run-specific variables (auth token, run id, image) are supplied as
/// run-time overrides instead; see [`super::FargateTaskEnvironment::execute`].
pub(crate) fn registration_env() -> Vec<(String, String)> {
    vec![
        ("RILL__CLOUD__API".to_string(), config::cloud_api()),
        ("RILL__CLOUD__USE_LOCAL_SECRETS".to_string(), "false".to_string()),
        (
            "RILL__ENGINE__FLOW_RUNNER__DEFAULT_CLASS".to_string(),
            "rill::engine::cloud::CloudFlowRunner".to_string(),
        ),
        (
            "RILL__ENGINE__TASK_RUNNER__DEFAULT_CLASS".to_string(),
            "rill::engine::cloud::CloudTaskRunner".to_string(),
        ),
        ("RILL__LOGGING__LOG_TO_CLOUD".to_string(), "true".to_string()),
        ("RILL__LOGGING__EXTRA_LOGGERS".to_string(), config::extra_loggers()),
    ]
}

/// Prepare `containerDefinitions` for registration.
///
/// Ensures at least one entry exists, appends the registration-time
/// environment to every entry, and forces the first entry's name, image,
/// and command to the engine-owned values.
pub(crate) fn synthesize(definition_options: &mut Map<String, Value>, image: &str) {
    let needs_seed = !matches!(
        definition_options.get("containerDefinitions"),
        Some(Value::Array(entries)) if !entries.is_empty()
    );
    if needs_seed {
        definition_options.insert("containerDefinitions".to_string(), json!([{}]));
    }

    let Some(Value::Array(entries)) = definition_options.get_mut("containerDefinitions") else {
        return;
    };

    let env_values: Vec<Value> = registration_env()
        .into_iter()
        .map(|(name, value)| json!({"name": name, "value": value}))
        .collect();

    for entry in entries.iter_mut() {
        let Some(container) = entry.as_object_mut() else { continue };
        let env = container
            .entry("environment")
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(env) = env {
            env.extend(env_values.iter().cloned());
        }
    }

    if let Some(first) = entries.first_mut().and_then(Value::as_object_mut) {
        first.insert("name".to_string(), Value::String(FLOW_CONTAINER_NAME.to_string()));
        first.insert("image".to_string(), Value::String(image.to_string()));
        first.insert(
            "command".to_string(),
            Value::Array(FLOW_CONTAINER_COMMAND.iter().map(|s| Value::String(s.to_string())).collect()),
        );
    }
}

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;
