// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ECS client seam.
//!
//! The environment talks to ECS through [`EcsApi`] so tests run against a
//! recording fake. [`AwsEcsClient`] is the real implementation over
//! `aws-sdk-ecs`; like the rest of this adapter it does no retries and no
//! caching — a client is built per call from the stored credentials, and
//! reliability is the SDK's problem.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use super::convert;
use super::AwsCredentials;

/// Errors from ECS operations.
///
/// `NotFound` is the one classified failure: a describe that failed because
/// the task definition does not exist. Everything else propagates as `Api`
/// unchanged.
#[derive(Debug, Error)]
pub enum EcsError {
    #[error("task definition not found: {0}")]
    NotFound(String),
    #[error("invalid task options: {0}")]
    InvalidOptions(String),
    #[error("ECS API error: {0}")]
    Api(String),
}

/// Run-specific values for the flow container, applied as a `RunTask`
/// container override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRunOverride {
    /// Container name the override targets.
    pub name: String,
    /// Environment variables layered over the registered definition.
    pub environment: Vec<(String, String)>,
}

/// The three ECS operations this environment uses.
#[async_trait]
pub trait EcsApi: Send + Sync {
    /// Check whether a task definition exists for `family`.
    /// `EcsError::NotFound` means it does not.
    async fn describe_task_definition(&self, family: &str) -> Result<(), EcsError>;

    /// Register a task definition from the partitioned definition options.
    async fn register_task_definition(&self, options: &Map<String, Value>)
        -> Result<(), EcsError>;

    /// Run a task from the partitioned run options plus the run override.
    async fn run_task(
        &self,
        launch_type: &str,
        options: &Map<String, Value>,
        run_override: &ContainerRunOverride,
    ) -> Result<(), EcsError>;
}

/// `EcsApi` over the AWS SDK.
#[derive(Debug, Clone)]
pub struct AwsEcsClient {
    credentials: AwsCredentials,
}

impl AwsEcsClient {
    pub fn new(credentials: AwsCredentials) -> Self {
        Self { credentials }
    }

    async fn client(&self) -> aws_sdk_ecs::Client {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &self.credentials.region {
            loader = loader.region(aws_sdk_ecs::config::Region::new(region.clone()));
        }
        if let (Some(key), Some(secret)) =
            (&self.credentials.access_key_id, &self.credentials.secret_access_key)
        {
            loader = loader.credentials_provider(aws_sdk_ecs::config::Credentials::from_keys(
                key.clone(),
                secret.clone(),
                self.credentials.session_token.clone(),
            ));
        }
        aws_sdk_ecs::Client::new(&loader.load().await)
    }
}

#[async_trait]
impl EcsApi for AwsEcsClient {
    async fn describe_task_definition(&self, family: &str) -> Result<(), EcsError> {
        let client = self.client().await;
        match client.describe_task_definition().task_definition(family).send().await {
            Ok(_) => Ok(()),
            // ECS reports a missing definition as a client exception
            Err(err) if err.as_service_error().is_some_and(|e| e.is_client_exception()) => {
                Err(EcsError::NotFound(format!("task definition `{family}`: {err}")))
            }
            Err(err) => Err(EcsError::Api(format!("{err}"))),
        }
    }

    async fn register_task_definition(
        &self,
        options: &Map<String, Value>,
    ) -> Result<(), EcsError> {
        let spec: convert::RegisterSpec = convert::from_options(options)?;
        let client = self.client().await;
        let request = spec.apply(client.register_task_definition())?;
        request.send().await.map(|_| ()).map_err(|err| EcsError::Api(format!("{err}")))
    }

    async fn run_task(
        &self,
        launch_type: &str,
        options: &Map<String, Value>,
        run_override: &ContainerRunOverride,
    ) -> Result<(), EcsError> {
        let spec: convert::RunSpec = convert::from_options(options)?;
        let client = self.client().await;
        let request = spec
            .apply(client.run_task())?
            .launch_type(aws_sdk_ecs::types::LaunchType::from(launch_type))
            .overrides(convert::task_override(run_override));
        request.send().await.map(|_| ()).map_err(|err| EcsError::Api(format!("{err}")))
    }
}
