// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Option partitioning for the two ECS calls.
//!
//! Users configure the environment with one open map of ECS options; the API
//! splits them across two operations (`RegisterTaskDefinition` and
//! `RunTask`) that each reject unknown fields. Every key is routed by name
//! to zero, one, or both calls; unrecognized keys are dropped.

use serde_json::{Map, Value};

/// Keys accepted by `RegisterTaskDefinition`.
pub(crate) const DEFINITION_KEYS: &[&str] = &[
    "family",
    "taskRoleArn",
    "executionRoleArn",
    "networkMode",
    "containerDefinitions",
    "volumes",
    "placementConstraints",
    "requiresCompatibilities",
    "cpu",
    "memory",
    "tags",
    "pidMode",
    "ipcMode",
    "proxyConfiguration",
    "inferenceAccelerators",
];

/// Keys accepted by `RunTask`.
pub(crate) const RUN_KEYS: &[&str] = &[
    "cluster",
    "taskDefinition",
    "count",
    "startedBy",
    "group",
    "placementConstraints",
    "placementStrategy",
    "platformVersion",
    "networkConfiguration",
    "tags",
    "enableECSManagedTags",
    "propagateTags",
];

/// Split user options into task-definition options and task-run options.
///
/// Keys on both allow-lists (`tags`, `placementConstraints`) land in both
/// maps; keys on neither are silently dropped.
pub(crate) fn partition(options: Map<String, Value>) -> (Map<String, Value>, Map<String, Value>) {
    let mut definition = Map::new();
    let mut run = Map::new();
    for (key, value) in options {
        if DEFINITION_KEYS.contains(&key.as_str()) {
            definition.insert(key.clone(), value.clone());
        }
        if RUN_KEYS.contains(&key.as_str()) {
            run.insert(key, value);
        }
    }
    (definition, run)
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
