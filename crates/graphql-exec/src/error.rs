// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::any::Any;
use std::error::Error;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::path::PathSegment;

/// Error returned by a resolver method.
///
/// Implementors may attach machine-readable data to the GraphQL error object
/// by overriding [`FieldError::extensions`].
pub trait FieldError: Error + Send + Sync + 'static {
    /// Entries copied into the `extensions` member of the reported error.
    fn extensions(&self) -> Option<Map<String, Value>> {
        None
    }
}

pub type BoxFieldError = Box<dyn FieldError>;

/// A field-level error reported alongside the `data` payload.
///
/// Serializes to the GraphQL wire shape: `message`, `path`, and optional
/// `extensions`. The originating resolver error stays available for
/// programmatic inspection but is not serialized.
#[derive(Debug, Clone, Serialize, Error)]
#[error("{message}")]
pub struct QueryError {
    pub message: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,

    #[serde(skip)]
    pub resolver_error: Option<Arc<dyn FieldError>>,
}

impl QueryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
            extensions: None,
            resolver_error: None,
        }
    }

    pub(crate) fn with_path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = path;
        self
    }

    /// Wrap an error returned by a resolver method, preserving the original
    /// error and its extensions.
    pub(crate) fn from_field_error(err: BoxFieldError, path: Vec<PathSegment>) -> Self {
        Self {
            message: err.to_string(),
            path,
            extensions: err.extensions(),
            resolver_error: Some(Arc::from(err)),
        }
    }

    pub(crate) fn from_panic(value: &(dyn Any + Send)) -> Self {
        Self::new(format!("graphql: panic occurred: {}", panic_message(value)))
    }
}

/// Best-effort extraction of the human-readable message of a panic payload.
pub(crate) fn panic_message(value: &(dyn Any + Send)) -> &str {
    if let Some(message) = value.downcast_ref::<&str>() {
        message
    } else if let Some(message) = value.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
