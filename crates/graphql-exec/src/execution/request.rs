// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::any::Any;
use std::sync::{Mutex, MutexGuard};

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::error::QueryError;
use crate::logging::{PanicLogger, TracingPanicLogger};
use crate::path::{PathNode, PathSegment};
use crate::trace::{FieldTracer, TracingFieldTracer};
use crate::value::ResolverContext;

/// Default cap on concurrently executing resolver methods per request.
pub const DEFAULT_MAX_PARALLELISM: usize = 10;

/// One in-flight query execution.
///
/// Owns the concurrency budget, the tracing and panic-logging hooks, the
/// cancellation token, and the error sink shared by all field workers. A
/// `Request` serves exactly one [`execute`](Request::execute) call; create a
/// fresh one per incoming operation.
pub struct Request {
    pub(crate) limiter: Semaphore,
    pub(crate) tracer: Box<dyn FieldTracer>,
    pub(crate) logger: Box<dyn PanicLogger>,
    pub(crate) cancellation: CancellationToken,
    errs: Mutex<ErrorSink>,
}

/// The only request state mutated from multiple workers. Recorded paths back
/// the prefix lookups that drive non-null propagation.
#[derive(Default)]
struct ErrorSink {
    errors: Vec<QueryError>,
    paths: Vec<Vec<PathSegment>>,
}

impl Request {
    pub fn new(max_parallelism: usize) -> Self {
        Self {
            limiter: Semaphore::new(max_parallelism.max(1)),
            tracer: Box::new(TracingFieldTracer),
            logger: Box::new(TracingPanicLogger),
            cancellation: CancellationToken::new(),
            errs: Mutex::new(ErrorSink::default()),
        }
    }

    pub fn with_tracer(mut self, tracer: impl FieldTracer + 'static) -> Self {
        self.tracer = Box::new(tracer);
        self
    }

    pub fn with_panic_logger(mut self, logger: impl PanicLogger + 'static) -> Self {
        self.logger = Box::new(logger);
        self
    }

    /// Attach an externally owned cancellation token; the caller cancels it
    /// to give up on the request.
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub(crate) fn resolver_context(&self) -> ResolverContext<'_> {
        ResolverContext::new(&self.cancellation)
    }

    pub(crate) fn add_error(&self, err: QueryError) {
        let mut sink = self.sink();
        sink.paths.push(err.path.clone());
        sink.errors.push(err);
    }

    /// Whether any recorded error sits at `prefix` or below it.
    pub(crate) fn sub_path_has_error(&self, prefix: &[PathSegment]) -> bool {
        self.sink().paths.iter().any(|path| path.starts_with(prefix))
    }

    pub(crate) fn take_errors(&self) -> Vec<QueryError> {
        std::mem::take(&mut self.sink().errors)
    }

    /// Log a recovered panic and record it as a query error at `path`.
    pub(crate) fn record_panic(&self, value: &(dyn Any + Send), path: Option<&PathNode<'_>>) {
        self.logger.log_panic(value);

        let mut err = QueryError::from_panic(value);
        if let Some(path) = path {
            err.path = path.to_segments();
        }
        self.add_error(err);
    }

    fn sink(&self) -> MutexGuard<'_, ErrorSink> {
        self.errs.lock().expect("error sink poisoned")
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PARALLELISM)
    }
}
