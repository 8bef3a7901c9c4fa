// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use yare::parameterized;

fn options(entries: &[(&str, Value)]) -> Map<String, Value> {
    entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

#[parameterized(
    family = { "family" },
    task_role_arn = { "taskRoleArn" },
    execution_role_arn = { "executionRoleArn" },
    network_mode = { "networkMode" },
    container_definitions = { "containerDefinitions" },
    volumes = { "volumes" },
    requires_compatibilities = { "requiresCompatibilities" },
    cpu = { "cpu" },
    memory = { "memory" },
    pid_mode = { "pidMode" },
    ipc_mode = { "ipcMode" },
    proxy_configuration = { "proxyConfiguration" },
    inference_accelerators = { "inferenceAccelerators" },
)]
fn definition_only_keys_route_to_definition(key: &str) {
    let (definition, run) = partition(options(&[(key, json!("v"))]));
    assert!(definition.contains_key(key));
    assert!(!run.contains_key(key));
}

#[parameterized(
    cluster = { "cluster" },
    task_definition = { "taskDefinition" },
    count = { "count" },
    started_by = { "startedBy" },
    group = { "group" },
    placement_strategy = { "placementStrategy" },
    platform_version = { "platformVersion" },
    network_configuration = { "networkConfiguration" },
    enable_ecs_managed_tags = { "enableECSManagedTags" },
    propagate_tags = { "propagateTags" },
)]
fn run_only_keys_route_to_run(key: &str) {
    let (definition, run) = partition(options(&[(key, json!("v"))]));
    assert!(!definition.contains_key(key));
    assert!(run.contains_key(key));
}

#[parameterized(
    tags = { "tags" },
    placement_constraints = { "placementConstraints" },
)]
fn shared_keys_route_to_both(key: &str) {
    let (definition, run) = partition(options(&[(key, json!([{"key": "team"}]))]));
    assert_eq!(definition.get(key), run.get(key));
    assert!(definition.contains_key(key));
}

#[test]
fn unrecognized_keys_are_dropped() {
    let (definition, run) = partition(options(&[
        ("family", json!("etl")),
        ("clientToken", json!("abc")),
        ("overrides", json!({})),
        ("launchType", json!("EC2")),
    ]));
    assert_eq!(definition.len(), 1);
    assert!(run.is_empty());
}

#[test]
fn values_pass_through_unchanged() {
    let constraints = json!([{"type": "memberOf", "expression": "attribute:zone == us-east-1a"}]);
    let (definition, run) = partition(options(&[
        ("placementConstraints", constraints.clone()),
        ("count", json!(2)),
    ]));
    assert_eq!(definition.get("placementConstraints"), Some(&constraints));
    assert_eq!(run.get("placementConstraints"), Some(&constraints));
    assert_eq!(run.get("count"), Some(&json!(2)));
}

#[test]
fn empty_options_yield_empty_maps() {
    let (definition, run) = partition(Map::new());
    assert!(definition.is_empty());
    assert!(run.is_empty());
}
