// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

fn map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn register_spec_parses_task_level_fields() {
    let spec: RegisterSpec = from_options(&map(json!({
        "family": "etl-flow",
        "taskRoleArn": "arn:aws:iam::123:role/task",
        "executionRoleArn": "arn:aws:iam::123:role/exec",
        "networkMode": "awsvpc",
        "requiresCompatibilities": ["FARGATE"],
        "cpu": "256",
        "memory": "512",
        "pidMode": "task",
    })))
    .unwrap();

    assert_eq!(spec.family.as_deref(), Some("etl-flow"));
    assert_eq!(spec.network_mode.as_deref(), Some("awsvpc"));
    assert_eq!(spec.requires_compatibilities, vec!["FARGATE".to_string()]);
    assert_eq!(spec.cpu.as_deref(), Some("256"));
    assert_eq!(spec.pid_mode.as_deref(), Some("task"));
}

#[test]
fn run_spec_parses_including_acronym_key() {
    let spec: RunSpec = from_options(&map(json!({
        "cluster": "flows",
        "taskDefinition": "etl-flow",
        "count": 2,
        "startedBy": "rill",
        "enableECSManagedTags": true,
        "propagateTags": "TASK_DEFINITION",
    })))
    .unwrap();

    assert_eq!(spec.cluster.as_deref(), Some("flows"));
    assert_eq!(spec.task_definition.as_deref(), Some("etl-flow"));
    assert_eq!(spec.count, Some(2));
    assert_eq!(spec.enable_ecs_managed_tags, Some(true));
    assert_eq!(spec.propagate_tags.as_deref(), Some("TASK_DEFINITION"));
}

#[test]
fn mistyped_option_value_is_invalid() {
    let err = from_options::<RegisterSpec>(&map(json!({"family": 42}))).unwrap_err();
    assert!(matches!(err, EcsError::InvalidOptions(_)));
}

#[test]
fn container_spec_builds_sdk_definition() {
    let spec: ContainerSpec = serde_json::from_value(json!({
        "name": "flow-container",
        "image": "registry.example.com/etl:v1",
        "command": ["/bin/sh", "-c", "rill execute fargate-task"],
        "environment": [{"name": "RILL__LOGGING__LOG_TO_CLOUD", "value": "true"}],
        "essential": true,
        "portMappings": [{"containerPort": 8080, "protocol": "tcp"}],
    }))
    .unwrap();

    let definition = spec.into_sdk().unwrap();
    assert_eq!(definition.name(), Some("flow-container"));
    assert_eq!(definition.image(), Some("registry.example.com/etl:v1"));
    assert_eq!(definition.command().len(), 3);
    assert_eq!(definition.environment().len(), 1);
    assert_eq!(
        definition.environment()[0].name(),
        Some("RILL__LOGGING__LOG_TO_CLOUD")
    );
    assert_eq!(definition.port_mappings().len(), 1);
}

#[test]
fn volume_with_host_path_builds() {
    let spec: VolumeSpec = serde_json::from_value(json!({
        "name": "scratch",
        "host": {"sourcePath": "/mnt/scratch"},
    }))
    .unwrap();

    let volume = spec.into_sdk().unwrap();
    assert_eq!(volume.name(), Some("scratch"));
    assert_eq!(volume.host().and_then(|h| h.source_path()), Some("/mnt/scratch"));
}

#[test]
fn efs_volume_without_file_system_id_is_invalid() {
    let spec: VolumeSpec = serde_json::from_value(json!({
        "name": "data",
        "efsVolumeConfiguration": {"rootDirectory": "/flows"},
    }))
    .unwrap();

    assert!(matches!(spec.into_sdk(), Err(EcsError::InvalidOptions(_))));
}

#[test]
fn network_configuration_maps_awsvpc_fields() {
    let spec: NetworkConfigurationSpec = serde_json::from_value(json!({
        "awsvpcConfiguration": {
            "subnets": ["subnet-1", "subnet-2"],
            "securityGroups": ["sg-1"],
            "assignPublicIp": "ENABLED",
        }
    }))
    .unwrap();

    let network = spec.into_sdk().unwrap();
    let awsvpc = network.awsvpc_configuration().unwrap();
    assert_eq!(awsvpc.subnets(), ["subnet-1".to_string(), "subnet-2".to_string()]);
    assert_eq!(awsvpc.security_groups(), ["sg-1".to_string()]);
}

#[test]
fn placement_constraints_convert_for_both_calls() {
    let spec = || PlacementConstraintSpec {
        kind: Some("memberOf".to_string()),
        expression: Some("attribute:zone == us-east-1a".to_string()),
    };

    let definition = spec().into_definition_sdk();
    assert_eq!(definition.expression(), Some("attribute:zone == us-east-1a"));

    let run = spec().into_run_sdk();
    assert_eq!(run.expression(), Some("attribute:zone == us-east-1a"));
}

#[test]
fn task_override_targets_one_container() {
    let run_override = ContainerRunOverride {
        name: "flow-container".to_string(),
        environment: vec![
            ("RILL__CONTEXT__FLOW_RUN_ID".to_string(), "run-1".to_string()),
            ("RILL__CONTEXT__IMAGE".to_string(), "etl:v1".to_string()),
        ],
    };

    let overrides = task_override(&run_override);
    let containers = overrides.container_overrides();
    assert_eq!(containers.len(), 1);
    assert_eq!(containers[0].name(), Some("flow-container"));

    let env = containers[0].environment();
    assert_eq!(env.len(), 2);
    assert_eq!(env[0].name(), Some("RILL__CONTEXT__FLOW_RUN_ID"));
    assert_eq!(env[0].value(), Some("run-1"));
}
