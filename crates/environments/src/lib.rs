// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rill-environments: execution environments for rill flows.
//!
//! An environment deploys a flow onto an execution substrate and re-enters
//! the engine inside it. The [`Environment`] trait encapsulates the two
//! lifecycle operations the engine drives:
//!
//! - `setup` — one-time, idempotent provisioning (register templates, create
//!   infrastructure) before the first run
//! - `execute` — launch one flow run with run-specific values
//!
//! Currently one environment is provided: [`FargateTaskEnvironment`], which
//! runs flows as AWS Fargate (ECS) tasks.

pub mod fargate;

pub use fargate::{AwsCredentials, FargateTaskEnvironment, FargateTaskEnvironmentBuilder};

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rill_core::executor::ExecutorError;
use rill_core::flow::{Flow, ImageError};
use thiserror::Error;

use fargate::ecs::EcsError;

/// Callback invoked by the engine around a flow run.
pub type LifecycleHook = Arc<dyn Fn() + Send + Sync>;

/// Errors from environment operations.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error(transparent)]
    Executor(#[from] ExecutorError),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Ecs(#[from] EcsError),
}

/// An execution substrate for flow runs.
#[async_trait]
pub trait Environment: Send + Sync {
    /// Labels agents match against when polling for work.
    fn labels(&self) -> &[String];

    /// Free-form metadata serialized alongside the environment.
    fn metadata(&self) -> &HashMap<String, String>;

    /// Idempotent provisioning before the first run. Default: nothing to do.
    async fn setup(&mut self, _flow: &Flow) -> Result<(), EnvironmentError> {
        Ok(())
    }

    /// Launch one run of the flow.
    async fn execute(&mut self, flow: &Flow) -> Result<(), EnvironmentError>;
}
