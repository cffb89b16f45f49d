// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::panic::AssertUnwindSafe;
use std::sync::LazyLock;

use futures::FutureExt;

use super::request::Request;
use super::walker::FieldToExec;
use crate::error::QueryError;
use crate::path::PathNode;
use crate::trace::{FieldTraceInfo, TraceFinish};
use crate::value::{Arguments, ResolvedValue};

static EMPTY_ARGUMENTS: LazyLock<Arguments> = LazyLock::new(Arguments::new);

/// Runs the tracer's finish callback exactly once, also when a panic unwinds
/// through the field.
struct TraceGuard(Option<TraceFinish>);

impl TraceGuard {
    fn finish(mut self, err: Option<&QueryError>) {
        if let Some(finish) = self.0.take() {
            finish(err);
        }
    }
}

impl Drop for TraceGuard {
    fn drop(&mut self) {
        if let Some(finish) = self.0.take() {
            finish(None);
        }
    }
}

impl Request {
    /// Fully resolve one field and write its JSON value (or `null`) into the
    /// field's private buffer.
    ///
    /// The limiter permit is held only across the resolver method call, never
    /// across the recursion into sub-selections.
    pub(crate) async fn exec_field(&self, field: &mut FieldToExec<'_>, path: &PathNode<'_>) {
        // Admission control across all in-flight resolver calls of this
        // request. The limiter is never closed, so acquisition only fails on
        // a programming error.
        let permit = self.limiter.acquire().await.expect("limiter closed");

        let trace = TraceGuard(Some(self.tracer.trace_field(FieldTraceInfo {
            trace_label: &field.meta.trace_label,
            parent_type: &field.meta.parent_type,
            field_name: field.meta.name.as_str(),
            trivial: !field.meta.is_async,
            arguments: field.arguments.unwrap_or(&EMPTY_ARGUMENTS),
        })));

        // A panic inside the resolver method is indistinguishable from a
        // returned error from here on: the trace still finishes, the permit
        // is still released, and the field still renders null.
        let resolve = AssertUnwindSafe(self.resolve_field_value(field, path));
        let result = match resolve.catch_unwind().await {
            Ok(result) => result,
            Err(value) => {
                self.logger.log_panic(value.as_ref());
                Err(QueryError::from_panic(value.as_ref()).with_path(path.to_segments()))
            }
        };

        drop(permit);

        match result {
            Err(err) => {
                // The null is written even for non-null fields: nullability
                // is decided by the enclosing selection set once all
                // siblings have finished, and it will discard this buffer if
                // the field turns out unable to carry a null.
                field.out.extend_from_slice(b"null");
                trace.finish(Some(&err));
                self.add_error(err);
            }
            Ok(value) => {
                self.exec_selection_set(&field.sels, &field.meta.ty, path, &value, &mut field.out)
                    .await;
                trace.finish(None);
            }
        }
    }

    async fn resolve_field_value(
        &self,
        field: &mut FieldToExec<'_>,
        path: &PathNode<'_>,
    ) -> Result<ResolvedValue, QueryError> {
        if let Some(fixed) = field.fixed.take() {
            return Ok(fixed);
        }
        if let Some(fixed) = &field.meta.fixed_result {
            return Ok(fixed.clone());
        }

        // Don't start new resolver calls once the request has been given up
        // on; anything already running is left to finish cooperatively.
        if self.cancellation.is_cancelled() {
            return Err(QueryError::new("query execution canceled").with_path(path.to_segments()));
        }

        field
            .resolver
            .resolve_method(
                &self.resolver_context(),
                field.meta.method_index,
                field.arguments.unwrap_or(&EMPTY_ARGUMENTS),
            )
            .await
            .map_err(|err| QueryError::from_field_error(err, path.to_segments()))
    }
}
