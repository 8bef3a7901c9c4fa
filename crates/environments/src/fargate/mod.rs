// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fargate task environment — runs flows as AWS ECS tasks.
//!
//! # Module layout
//!
//! - [`options`] — partitioning of user options across the two ECS calls
//! - [`definition`] — container definition synthesis for registration
//! - [`ecs`] — the `EcsApi` seam and the `aws-sdk-ecs` client
//! - [`convert`] — JSON option → SDK request bridge
//!
//! # Architecture
//!
//! The environment holds two option maps derived once at construction:
//! everything `RegisterTaskDefinition` accepts, and everything `RunTask`
//! accepts. `setup` is idempotent registration — describe by family, register
//! only when absent, never replace. `execute` launches one task with a
//! container override carrying the run-specific values (auth token, run id,
//! image). The registered definition is addressed by `family`; callers must
//! pass `family` and `taskDefinition` as the same string so the run finds
//! the registration.
//!
//! The following variables are stamped into the flow container and do not
//! need to be configured by hand:
//!
//! - `RILL__CLOUD__API`
//! - `RILL__CLOUD__AUTH_TOKEN`
//! - `RILL__CONTEXT__FLOW_RUN_ID`
//! - `RILL__CONTEXT__IMAGE`
//! - `RILL__CLOUD__USE_LOCAL_SECRETS`
//! - `RILL__ENGINE__FLOW_RUNNER__DEFAULT_CLASS`
//! - `RILL__ENGINE__TASK_RUNNER__DEFAULT_CLASS`
//! - `RILL__LOGGING__LOG_TO_CLOUD`
//! - `RILL__LOGGING__EXTRA_LOGGERS`

pub(crate) mod convert;
pub(crate) mod definition;
pub mod ecs;
pub(crate) mod options;

#[cfg(test)]
mod fake;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use rill_core::executor::Executor;
use rill_core::flow::{get_flow_image, Flow};
use rill_core::{config, context};
use serde_json::{Map, Value};

use crate::{Environment, EnvironmentError, LifecycleHook};
use ecs::{AwsEcsClient, ContainerRunOverride, EcsApi, EcsError};

/// AWS credentials for the ECS client.
///
/// Held in memory for the lifetime of the environment and deliberately not
/// serializable; `Debug` redacts the secret fields.
#[derive(Clone, Default)]
pub struct AwsCredentials {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    pub region: Option<String>,
}

impl AwsCredentials {
    /// Fill unset fields from the standard environment variables
    /// (`AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `AWS_SESSION_TOKEN`,
    /// `REGION_NAME`).
    pub fn resolve(mut self) -> Self {
        let env = |key: &str| std::env::var(key).ok().filter(|s| !s.is_empty());
        self.access_key_id = self.access_key_id.or_else(|| env("AWS_ACCESS_KEY_ID"));
        self.secret_access_key = self.secret_access_key.or_else(|| env("AWS_SECRET_ACCESS_KEY"));
        self.session_token = self.session_token.or_else(|| env("AWS_SESSION_TOKEN"));
        self.region = self.region.or_else(|| env("REGION_NAME"));
        self
    }
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "<redacted>"))
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .field("region", &self.region)
            .finish()
    }
}

/// Environment that deploys a flow as a Fargate task.
///
/// Accepts the full set of options ECS takes for `RegisterTaskDefinition`
/// and `RunTask` as one open map; each option reaches the call(s) that
/// recognize its name and is otherwise dropped.
pub struct FargateTaskEnvironment {
    launch_type: String,
    credentials: AwsCredentials,
    executor: Executor,
    labels: Vec<String>,
    on_start: Option<LifecycleHook>,
    on_exit: Option<LifecycleHook>,
    metadata: HashMap<String, String>,
    definition_options: Map<String, Value>,
    run_options: Map<String, Value>,
    client: Option<Arc<dyn EcsApi>>,
}

impl FargateTaskEnvironment {
    pub fn builder() -> FargateTaskEnvironmentBuilder {
        FargateTaskEnvironmentBuilder::default()
    }

    /// `FARGATE` or `EC2`.
    pub fn launch_type(&self) -> &str {
        &self.launch_type
    }

    pub fn executor(&self) -> Executor {
        self.executor
    }

    /// Options routed to `RegisterTaskDefinition`.
    pub fn definition_options(&self) -> &Map<String, Value> {
        &self.definition_options
    }

    /// Options routed to `RunTask`.
    pub fn run_options(&self) -> &Map<String, Value> {
        &self.run_options
    }

    pub fn on_start(&self) -> Option<&LifecycleHook> {
        self.on_start.as_ref()
    }

    pub fn on_exit(&self) -> Option<&LifecycleHook> {
        self.on_exit.as_ref()
    }

    /// Configured family name for the task definition.
    fn family(&self) -> String {
        self.definition_options
            .get("family")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    fn client(&self) -> Arc<dyn EcsApi> {
        match &self.client {
            Some(client) => Arc::clone(client),
            // Like the original per-call construction: no caching, no state
            None => Arc::new(AwsEcsClient::new(self.credentials.clone())),
        }
    }
}

impl fmt::Debug for FargateTaskEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FargateTaskEnvironment")
            .field("launch_type", &self.launch_type)
            .field("credentials", &self.credentials)
            .field("executor", &self.executor)
            .field("labels", &self.labels)
            .field("metadata", &self.metadata)
            .field("definition_options", &self.definition_options)
            .field("run_options", &self.run_options)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Environment for FargateTaskEnvironment {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    /// Register the task definition if it does not already exist.
    async fn setup(&mut self, flow: &Flow) -> Result<(), EnvironmentError> {
        let image = get_flow_image(flow)?;
        let family = self.family();
        let client = self.client();

        match client.describe_task_definition(&family).await {
            Ok(()) => {
                tracing::debug!(%family, "task definition already registered");
                return Ok(());
            }
            Err(EcsError::NotFound(reason)) => {
                tracing::debug!(%family, %reason, "task definition absent");
            }
            Err(err) => return Err(err.into()),
        }

        definition::synthesize(&mut self.definition_options, &image);
        tracing::info!(%family, %image, "registering Fargate task definition");
        client.register_task_definition(&self.definition_options).await?;
        Ok(())
    }

    /// Launch the Fargate task registered for this flow.
    async fn execute(&mut self, flow: &Flow) -> Result<(), EnvironmentError> {
        let image = get_flow_image(flow)?;
        let flow_run_id =
            context::get("flow_run_id").unwrap_or_else(|| "unknown".to_string());

        let run_override = ContainerRunOverride {
            name: definition::FLOW_CONTAINER_NAME.to_string(),
            environment: vec![
                ("RILL__CLOUD__AUTH_TOKEN".to_string(), config::auth_token()),
                ("RILL__CONTEXT__FLOW_RUN_ID".to_string(), flow_run_id.clone()),
                ("RILL__CONTEXT__IMAGE".to_string(), image),
            ],
        };

        tracing::info!(
            flow = %flow.name,
            %flow_run_id,
            launch_type = %self.launch_type,
            "launching Fargate task"
        );
        self.client().run_task(&self.launch_type, &self.run_options, &run_override).await?;
        Ok(())
    }
}

/// Builder for [`FargateTaskEnvironment`].
#[derive(Default)]
pub struct FargateTaskEnvironmentBuilder {
    launch_type: Option<String>,
    credentials: Option<AwsCredentials>,
    executor_spec: Option<Value>,
    executor_options: Option<Map<String, Value>>,
    labels: Vec<String>,
    on_start: Option<LifecycleHook>,
    on_exit: Option<LifecycleHook>,
    metadata: HashMap<String, String>,
    options: Map<String, Value>,
    client: Option<Arc<dyn EcsApi>>,
}

impl FargateTaskEnvironmentBuilder {
    /// `FARGATE` (default) or `EC2`.
    pub fn launch_type(mut self, launch_type: impl Into<String>) -> Self {
        self.launch_type = Some(launch_type.into());
        self
    }

    /// Explicit credentials. Unset fields fall back to environment variables
    /// at build time.
    pub fn credentials(mut self, credentials: AwsCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Executor spec: a name string or `{"type": name}` object. Absent means
    /// the process-wide default executor.
    pub fn executor(mut self, spec: impl Into<Value>) -> Self {
        self.executor_spec = Some(spec.into());
        self
    }

    /// Deprecated: configure `executor` instead. Accepted and ignored with a
    /// warning.
    pub fn executor_options(mut self, options: Map<String, Value>) -> Self {
        self.executor_options = Some(options);
        self
    }

    /// Labels agents match against when polling for work.
    pub fn labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn on_start(mut self, hook: LifecycleHook) -> Self {
        self.on_start = Some(hook);
        self
    }

    pub fn on_exit(mut self, hook: LifecycleHook) -> Self {
        self.on_exit = Some(hook);
        self
    }

    pub fn metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    /// ECS options for `RegisterTaskDefinition` and `RunTask`, routed by
    /// key name at build time.
    pub fn options(mut self, options: Map<String, Value>) -> Self {
        self.options.extend(options);
        self
    }

    /// Add a single ECS option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Replace the ECS client (test seam).
    pub fn client(mut self, client: Arc<dyn EcsApi>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> Result<FargateTaskEnvironment, EnvironmentError> {
        if self.executor_options.is_some() {
            tracing::warn!("`executor_options` is deprecated, configure `executor` instead");
        }

        let executor = match &self.executor_spec {
            Some(spec) => Executor::from_spec(spec)?,
            None => config::default_executor(),
        };

        let (definition_options, run_options) = options::partition(self.options);

        Ok(FargateTaskEnvironment {
            launch_type: self.launch_type.unwrap_or_else(|| "FARGATE".to_string()),
            credentials: self.credentials.unwrap_or_default().resolve(),
            executor,
            labels: self.labels,
            on_start: self.on_start,
            on_exit: self.on_exit,
            metadata: self.metadata,
            definition_options,
            run_options,
            client: self.client,
        })
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
