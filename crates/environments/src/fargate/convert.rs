// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bridge from the JSON option maps to typed `aws-sdk-ecs` requests.
//!
//! The partitioned maps deserialize into mirror specs (`camelCase`, matching
//! the ECS wire names) which then populate the SDK's fluent builders. A value
//! the bridge cannot express surfaces as [`EcsError::InvalidOptions`] before
//! any network call is made.

use std::collections::HashMap;

use aws_sdk_ecs::operation::register_task_definition::builders::RegisterTaskDefinitionFluentBuilder;
use aws_sdk_ecs::operation::run_task::builders::RunTaskFluentBuilder;
use aws_sdk_ecs::types as ecs;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::ecs::{ContainerRunOverride, EcsError};

fn invalid(err: impl std::fmt::Display) -> EcsError {
    EcsError::InvalidOptions(err.to_string())
}

/// Deserialize a partitioned option map into a mirror spec.
pub(crate) fn from_options<T: DeserializeOwned>(options: &Map<String, Value>) -> Result<T, EcsError> {
    serde_json::from_value(Value::Object(options.clone())).map_err(invalid)
}

/// Build the `RunTask` override payload for the flow container.
pub(crate) fn task_override(run_override: &ContainerRunOverride) -> ecs::TaskOverride {
    let environment: Vec<ecs::KeyValuePair> = run_override
        .environment
        .iter()
        .map(|(name, value)| {
            ecs::KeyValuePair::builder().name(name.clone()).value(value.clone()).build()
        })
        .collect();
    let container = ecs::ContainerOverride::builder()
        .name(run_override.name.clone())
        .set_environment(Some(environment))
        .build();
    ecs::TaskOverride::builder().container_overrides(container).build()
}

// --- RegisterTaskDefinition ---

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RegisterSpec {
    family: Option<String>,
    task_role_arn: Option<String>,
    execution_role_arn: Option<String>,
    network_mode: Option<String>,
    container_definitions: Vec<ContainerSpec>,
    volumes: Vec<VolumeSpec>,
    placement_constraints: Vec<PlacementConstraintSpec>,
    requires_compatibilities: Vec<String>,
    cpu: Option<String>,
    memory: Option<String>,
    tags: Vec<TagSpec>,
    pid_mode: Option<String>,
    ipc_mode: Option<String>,
    proxy_configuration: Option<ProxyConfigurationSpec>,
    inference_accelerators: Vec<InferenceAcceleratorSpec>,
}

impl RegisterSpec {
    pub(crate) fn apply(
        self,
        mut b: RegisterTaskDefinitionFluentBuilder,
    ) -> Result<RegisterTaskDefinitionFluentBuilder, EcsError> {
        if let Some(family) = self.family {
            b = b.family(family);
        }
        if let Some(arn) = self.task_role_arn {
            b = b.task_role_arn(arn);
        }
        if let Some(arn) = self.execution_role_arn {
            b = b.execution_role_arn(arn);
        }
        if let Some(mode) = self.network_mode {
            b = b.network_mode(ecs::NetworkMode::from(mode.as_str()));
        }
        if !self.container_definitions.is_empty() {
            let definitions = self
                .container_definitions
                .into_iter()
                .map(ContainerSpec::into_sdk)
                .collect::<Result<Vec<_>, _>>()?;
            b = b.set_container_definitions(Some(definitions));
        }
        if !self.volumes.is_empty() {
            let volumes = self
                .volumes
                .into_iter()
                .map(VolumeSpec::into_sdk)
                .collect::<Result<Vec<_>, _>>()?;
            b = b.set_volumes(Some(volumes));
        }
        if !self.placement_constraints.is_empty() {
            let constraints = self
                .placement_constraints
                .into_iter()
                .map(PlacementConstraintSpec::into_definition_sdk)
                .collect();
            b = b.set_placement_constraints(Some(constraints));
        }
        if !self.requires_compatibilities.is_empty() {
            let compatibilities = self
                .requires_compatibilities
                .iter()
                .map(|c| ecs::Compatibility::from(c.as_str()))
                .collect();
            b = b.set_requires_compatibilities(Some(compatibilities));
        }
        if let Some(cpu) = self.cpu {
            b = b.cpu(cpu);
        }
        if let Some(memory) = self.memory {
            b = b.memory(memory);
        }
        if !self.tags.is_empty() {
            b = b.set_tags(Some(self.tags.into_iter().map(TagSpec::into_sdk).collect()));
        }
        if let Some(mode) = self.pid_mode {
            b = b.pid_mode(ecs::PidMode::from(mode.as_str()));
        }
        if let Some(mode) = self.ipc_mode {
            b = b.ipc_mode(ecs::IpcMode::from(mode.as_str()));
        }
        if let Some(proxy) = self.proxy_configuration {
            b = b.proxy_configuration(proxy.into_sdk()?);
        }
        if !self.inference_accelerators.is_empty() {
            let accelerators = self
                .inference_accelerators
                .into_iter()
                .map(InferenceAcceleratorSpec::into_sdk)
                .collect::<Result<Vec<_>, _>>()?;
            b = b.set_inference_accelerators(Some(accelerators));
        }
        Ok(b)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ContainerSpec {
    name: Option<String>,
    image: Option<String>,
    command: Vec<String>,
    entry_point: Vec<String>,
    environment: Vec<KeyValueSpec>,
    cpu: Option<i32>,
    memory: Option<i32>,
    memory_reservation: Option<i32>,
    essential: Option<bool>,
    port_mappings: Vec<PortMappingSpec>,
    mount_points: Vec<MountPointSpec>,
    log_configuration: Option<LogConfigurationSpec>,
    secrets: Vec<SecretSpec>,
    working_directory: Option<String>,
    user: Option<String>,
    privileged: Option<bool>,
}

impl ContainerSpec {
    pub(crate) fn into_sdk(self) -> Result<ecs::ContainerDefinition, EcsError> {
        let mut b = ecs::ContainerDefinition::builder();
        if let Some(name) = self.name {
            b = b.name(name);
        }
        if let Some(image) = self.image {
            b = b.image(image);
        }
        if !self.command.is_empty() {
            b = b.set_command(Some(self.command));
        }
        if !self.entry_point.is_empty() {
            b = b.set_entry_point(Some(self.entry_point));
        }
        if !self.environment.is_empty() {
            b = b.set_environment(Some(
                self.environment.into_iter().map(KeyValueSpec::into_sdk).collect(),
            ));
        }
        if let Some(cpu) = self.cpu {
            b = b.cpu(cpu);
        }
        if let Some(memory) = self.memory {
            b = b.memory(memory);
        }
        if let Some(reservation) = self.memory_reservation {
            b = b.memory_reservation(reservation);
        }
        if let Some(essential) = self.essential {
            b = b.essential(essential);
        }
        if !self.port_mappings.is_empty() {
            b = b.set_port_mappings(Some(
                self.port_mappings.into_iter().map(PortMappingSpec::into_sdk).collect(),
            ));
        }
        if !self.mount_points.is_empty() {
            b = b.set_mount_points(Some(
                self.mount_points.into_iter().map(MountPointSpec::into_sdk).collect(),
            ));
        }
        if let Some(log) = self.log_configuration {
            b = b.log_configuration(log.into_sdk()?);
        }
        if !self.secrets.is_empty() {
            let secrets = self
                .secrets
                .into_iter()
                .map(SecretSpec::into_sdk)
                .collect::<Result<Vec<_>, _>>()?;
            b = b.set_secrets(Some(secrets));
        }
        if let Some(dir) = self.working_directory {
            b = b.working_directory(dir);
        }
        if let Some(user) = self.user {
            b = b.user(user);
        }
        if let Some(privileged) = self.privileged {
            b = b.privileged(privileged);
        }
        Ok(b.build())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct KeyValueSpec {
    name: Option<String>,
    value: Option<String>,
}

impl KeyValueSpec {
    fn into_sdk(self) -> ecs::KeyValuePair {
        ecs::KeyValuePair::builder()
            .set_name(self.name)
            .set_value(self.value)
            .build()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct TagSpec {
    key: Option<String>,
    value: Option<String>,
}

impl TagSpec {
    fn into_sdk(self) -> ecs::Tag {
        ecs::Tag::builder().set_key(self.key).set_value(self.value).build()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct PortMappingSpec {
    container_port: Option<i32>,
    host_port: Option<i32>,
    protocol: Option<String>,
}

impl PortMappingSpec {
    fn into_sdk(self) -> ecs::PortMapping {
        let mut b = ecs::PortMapping::builder()
            .set_container_port(self.container_port)
            .set_host_port(self.host_port);
        if let Some(protocol) = self.protocol {
            b = b.protocol(ecs::TransportProtocol::from(protocol.as_str()));
        }
        b.build()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct MountPointSpec {
    source_volume: Option<String>,
    container_path: Option<String>,
    read_only: Option<bool>,
}

impl MountPointSpec {
    fn into_sdk(self) -> ecs::MountPoint {
        ecs::MountPoint::builder()
            .set_source_volume(self.source_volume)
            .set_container_path(self.container_path)
            .set_read_only(self.read_only)
            .build()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct LogConfigurationSpec {
    log_driver: Option<String>,
    options: HashMap<String, String>,
    secret_options: Vec<SecretSpec>,
}

impl LogConfigurationSpec {
    fn into_sdk(self) -> Result<ecs::LogConfiguration, EcsError> {
        let mut b = ecs::LogConfiguration::builder();
        if let Some(driver) = self.log_driver {
            b = b.log_driver(ecs::LogDriver::from(driver.as_str()));
        }
        if !self.options.is_empty() {
            b = b.set_options(Some(self.options));
        }
        if !self.secret_options.is_empty() {
            let secrets = self
                .secret_options
                .into_iter()
                .map(SecretSpec::into_sdk)
                .collect::<Result<Vec<_>, _>>()?;
            b = b.set_secret_options(Some(secrets));
        }
        b.build().map_err(invalid)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct SecretSpec {
    name: Option<String>,
    value_from: Option<String>,
}

impl SecretSpec {
    fn into_sdk(self) -> Result<ecs::Secret, EcsError> {
        ecs::Secret::builder()
            .set_name(self.name)
            .set_value_from(self.value_from)
            .build()
            .map_err(invalid)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct VolumeSpec {
    name: Option<String>,
    host: Option<HostVolumeSpec>,
    efs_volume_configuration: Option<EfsVolumeSpec>,
}

impl VolumeSpec {
    fn into_sdk(self) -> Result<ecs::Volume, EcsError> {
        let mut b = ecs::Volume::builder().set_name(self.name);
        if let Some(host) = self.host {
            b = b.host(
                ecs::HostVolumeProperties::builder().set_source_path(host.source_path).build(),
            );
        }
        if let Some(efs) = self.efs_volume_configuration {
            let mut efs_builder = ecs::EfsVolumeConfiguration::builder();
            if let Some(id) = efs.file_system_id {
                efs_builder = efs_builder.file_system_id(id);
            }
            if let Some(root) = efs.root_directory {
                efs_builder = efs_builder.root_directory(root);
            }
            b = b.efs_volume_configuration(efs_builder.build().map_err(invalid)?);
        }
        Ok(b.build())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct HostVolumeSpec {
    source_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct EfsVolumeSpec {
    file_system_id: Option<String>,
    root_directory: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct PlacementConstraintSpec {
    #[serde(rename = "type")]
    kind: Option<String>,
    expression: Option<String>,
}

impl PlacementConstraintSpec {
    fn into_definition_sdk(self) -> ecs::TaskDefinitionPlacementConstraint {
        let mut b =
            ecs::TaskDefinitionPlacementConstraint::builder().set_expression(self.expression);
        if let Some(kind) = self.kind {
            b = b.r#type(ecs::TaskDefinitionPlacementConstraintType::from(kind.as_str()));
        }
        b.build()
    }

    fn into_run_sdk(self) -> ecs::PlacementConstraint {
        let mut b = ecs::PlacementConstraint::builder().set_expression(self.expression);
        if let Some(kind) = self.kind {
            b = b.r#type(ecs::PlacementConstraintType::from(kind.as_str()));
        }
        b.build()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct PlacementStrategySpec {
    #[serde(rename = "type")]
    kind: Option<String>,
    field: Option<String>,
}

impl PlacementStrategySpec {
    fn into_sdk(self) -> ecs::PlacementStrategy {
        let mut b = ecs::PlacementStrategy::builder().set_field(self.field);
        if let Some(kind) = self.kind {
            b = b.r#type(ecs::PlacementStrategyType::from(kind.as_str()));
        }
        b.build()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ProxyConfigurationSpec {
    #[serde(rename = "type")]
    kind: Option<String>,
    container_name: Option<String>,
    properties: Vec<KeyValueSpec>,
}

impl ProxyConfigurationSpec {
    fn into_sdk(self) -> Result<ecs::ProxyConfiguration, EcsError> {
        let mut b = ecs::ProxyConfiguration::builder().set_container_name(self.container_name);
        if let Some(kind) = self.kind {
            b = b.r#type(ecs::ProxyConfigurationType::from(kind.as_str()));
        }
        if !self.properties.is_empty() {
            b = b.set_properties(Some(
                self.properties.into_iter().map(KeyValueSpec::into_sdk).collect(),
            ));
        }
        b.build().map_err(invalid)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct InferenceAcceleratorSpec {
    device_name: Option<String>,
    device_type: Option<String>,
}

impl InferenceAcceleratorSpec {
    fn into_sdk(self) -> Result<ecs::InferenceAccelerator, EcsError> {
        ecs::InferenceAccelerator::builder()
            .set_device_name(self.device_name)
            .set_device_type(self.device_type)
            .build()
            .map_err(invalid)
    }
}

// --- RunTask ---

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RunSpec {
    cluster: Option<String>,
    task_definition: Option<String>,
    count: Option<i32>,
    started_by: Option<String>,
    group: Option<String>,
    placement_constraints: Vec<PlacementConstraintSpec>,
    placement_strategy: Vec<PlacementStrategySpec>,
    platform_version: Option<String>,
    network_configuration: Option<NetworkConfigurationSpec>,
    tags: Vec<TagSpec>,
    // ECS spells the acronym in caps here, unlike every other key
    #[serde(rename = "enableECSManagedTags")]
    enable_ecs_managed_tags: Option<bool>,
    propagate_tags: Option<String>,
}

impl RunSpec {
    pub(crate) fn apply(self, mut b: RunTaskFluentBuilder) -> Result<RunTaskFluentBuilder, EcsError> {
        if let Some(cluster) = self.cluster {
            b = b.cluster(cluster);
        }
        if let Some(definition) = self.task_definition {
            b = b.task_definition(definition);
        }
        if let Some(count) = self.count {
            b = b.count(count);
        }
        if let Some(started_by) = self.started_by {
            b = b.started_by(started_by);
        }
        if let Some(group) = self.group {
            b = b.group(group);
        }
        if !self.placement_constraints.is_empty() {
            let constraints = self
                .placement_constraints
                .into_iter()
                .map(PlacementConstraintSpec::into_run_sdk)
                .collect();
            b = b.set_placement_constraints(Some(constraints));
        }
        if !self.placement_strategy.is_empty() {
            let strategy =
                self.placement_strategy.into_iter().map(PlacementStrategySpec::into_sdk).collect();
            b = b.set_placement_strategy(Some(strategy));
        }
        if let Some(version) = self.platform_version {
            b = b.platform_version(version);
        }
        if let Some(network) = self.network_configuration {
            b = b.network_configuration(network.into_sdk()?);
        }
        if !self.tags.is_empty() {
            b = b.set_tags(Some(self.tags.into_iter().map(TagSpec::into_sdk).collect()));
        }
        if let Some(enable) = self.enable_ecs_managed_tags {
            b = b.enable_ecs_managed_tags(enable);
        }
        if let Some(propagate) = self.propagate_tags {
            b = b.propagate_tags(ecs::PropagateTags::from(propagate.as_str()));
        }
        Ok(b)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct NetworkConfigurationSpec {
    awsvpc_configuration: Option<AwsVpcSpec>,
}

impl NetworkConfigurationSpec {
    fn into_sdk(self) -> Result<ecs::NetworkConfiguration, EcsError> {
        let mut b = ecs::NetworkConfiguration::builder();
        if let Some(awsvpc) = self.awsvpc_configuration {
            let mut vpc = ecs::AwsVpcConfiguration::builder()
                .set_subnets(Some(awsvpc.subnets))
                .set_security_groups(
                    (!awsvpc.security_groups.is_empty()).then_some(awsvpc.security_groups),
                );
            if let Some(assign) = awsvpc.assign_public_ip {
                vpc = vpc.assign_public_ip(ecs::AssignPublicIp::from(assign.as_str()));
            }
            b = b.awsvpc_configuration(vpc.build().map_err(invalid)?);
        }
        Ok(b.build())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct AwsVpcSpec {
    subnets: Vec<String>,
    security_groups: Vec<String>,
    assign_public_ip: Option<String>,
}

#[cfg(test)]
#[path = "convert_tests.rs"]
mod tests;
