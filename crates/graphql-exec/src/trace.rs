// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::error::QueryError;
use crate::value::Arguments;

/// Everything a tracer learns about a field before it is resolved.
#[derive(Debug, Clone, Copy)]
pub struct FieldTraceInfo<'a> {
    pub trace_label: &'a str,
    pub parent_type: &'a str,
    pub field_name: &'a str,
    /// A trivial field is resolved in step with its siblings rather than on
    /// its own worker.
    pub trivial: bool,
    pub arguments: &'a Arguments,
}

/// Callback closing a field trace; invoked exactly once with the field's
/// final resolution error, if any.
pub type TraceFinish = Box<dyn FnOnce(Option<&QueryError>) + Send>;

/// Hook observing every field resolution of a request.
pub trait FieldTracer: Send + Sync {
    fn trace_field(&self, info: FieldTraceInfo<'_>) -> TraceFinish;
}

/// Tracer that observes nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracer;

impl FieldTracer for NoopTracer {
    fn trace_field(&self, _info: FieldTraceInfo<'_>) -> TraceFinish {
        Box::new(|_| {})
    }
}

/// Tracer reporting each field resolution as a `tracing` span.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFieldTracer;

impl FieldTracer for TracingFieldTracer {
    fn trace_field(&self, info: FieldTraceInfo<'_>) -> TraceFinish {
        let span = tracing::info_span!(
            "resolve_field",
            label = info.trace_label,
            parent_type = info.parent_type,
            field = info.field_name,
            trivial = info.trivial,
        );

        Box::new(move |err| {
            if let Some(err) = err {
                span.in_scope(|| tracing::error!(error = %err, "field resolution failed"));
            }
        })
    }
}
