// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flow descriptor and container image resolution.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The unit of work an environment deploys for execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flow {
    pub name: String,
    /// Where the flow's built artifact lives. `None` for flows registered
    /// without storage (image must come from metadata).
    pub storage: Option<Storage>,
    /// Free-form metadata set at registration. An `image` entry overrides
    /// storage-derived image resolution.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Flow artifact storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Storage {
    /// Flow baked into a container image.
    Docker {
        registry_url: Option<String>,
        image_name: Option<String>,
        image_tag: Option<String>,
    },
    /// Flow stored on local disk (no image to resolve).
    Local { path: String },
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("no container image for flow `{0}`: set Docker storage or an `image` metadata entry")]
    NoImage(String),
}

impl Flow {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), storage: None, metadata: HashMap::new() }
    }

    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Resolve the container image reference for a flow.
///
/// An `image` metadata entry wins; otherwise Docker storage composes
/// `registry/name:tag` (the registry segment is optional, the tag defaults
/// to `latest`). Flows with neither have no image to run.
pub fn get_flow_image(flow: &Flow) -> Result<String, ImageError> {
    if let Some(image) = flow.metadata.get("image") {
        return Ok(image.clone());
    }

    if let Some(Storage::Docker { registry_url, image_name, image_tag }) = &flow.storage {
        if let Some(name) = image_name {
            let tag = image_tag.as_deref().unwrap_or("latest");
            let reference = match registry_url {
                Some(registry) => format!("{}/{}:{}", registry.trim_end_matches('/'), name, tag),
                None => format!("{}:{}", name, tag),
            };
            return Ok(reference);
        }
    }

    Err(ImageError::NoImage(flow.name.clone()))
}

#[cfg(test)]
#[path = "flow_tests.rs"]
mod tests;
