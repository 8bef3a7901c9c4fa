// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording ECS client for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};

use super::ecs::{ContainerRunOverride, EcsApi, EcsError};

/// How the fake answers `describe_task_definition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DescribeBehavior {
    /// Definition exists.
    Exists,
    /// Definition absent (`EcsError::NotFound`).
    Missing,
    /// Unrelated API failure (`EcsError::Api`).
    Fail,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EcsCall {
    Describe {
        family: String,
    },
    Register {
        options: Map<String, Value>,
    },
    Run {
        launch_type: String,
        options: Map<String, Value>,
        run_override: ContainerRunOverride,
    },
}

#[derive(Debug)]
pub(crate) struct FakeEcs {
    describe: DescribeBehavior,
    pub(crate) calls: Mutex<Vec<EcsCall>>,
}

impl FakeEcs {
    pub(crate) fn new(describe: DescribeBehavior) -> Self {
        Self { describe, calls: Mutex::new(Vec::new()) }
    }

    pub(crate) fn calls(&self) -> Vec<EcsCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl EcsApi for FakeEcs {
    async fn describe_task_definition(&self, family: &str) -> Result<(), EcsError> {
        self.calls.lock().push(EcsCall::Describe { family: family.to_string() });
        match self.describe {
            DescribeBehavior::Exists => Ok(()),
            DescribeBehavior::Missing => {
                Err(EcsError::NotFound(format!("task definition `{family}`")))
            }
            DescribeBehavior::Fail => Err(EcsError::Api("access denied".to_string())),
        }
    }

    async fn register_task_definition(
        &self,
        options: &Map<String, Value>,
    ) -> Result<(), EcsError> {
        self.calls.lock().push(EcsCall::Register { options: options.clone() });
        Ok(())
    }

    async fn run_task(
        &self,
        launch_type: &str,
        options: &Map<String, Value>,
        run_override: &ContainerRunOverride,
    ) -> Result<(), EcsError> {
        self.calls.lock().push(EcsCall::Run {
            launch_type: launch_type.to_string(),
            options: options.clone(),
            run_override: run_override.clone(),
        });
        Ok(())
    }
}
