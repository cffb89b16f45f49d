// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::any::Any;

use crate::error::panic_message;

/// Receives every panic recovered during query execution, before it is
/// converted into a reported error.
pub trait PanicLogger: Send + Sync {
    fn log_panic(&self, value: &(dyn Any + Send));
}

/// Logs recovered panics through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPanicLogger;

impl PanicLogger for TracingPanicLogger {
    fn log_panic(&self, value: &(dyn Any + Send)) {
        tracing::error!(panic = panic_message(value), "panic during query execution");
    }
}
