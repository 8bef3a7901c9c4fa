// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rill-core: engine-side types shared by the rill execution environments.
//!
//! Environments deploy a flow onto some substrate (a container service, a
//! local process, ...) and re-enter the engine inside it. This crate carries
//! the pieces an environment needs from the engine: the flow descriptor and
//! its image resolution, the ambient run context, the executor model, and
//! engine configuration.

pub mod config;
pub mod context;
pub mod executor;
pub mod flow;

pub use context::ContextGuard;
pub use executor::{Executor, ExecutorError};
pub use flow::{get_flow_image, Flow, ImageError, Storage};
