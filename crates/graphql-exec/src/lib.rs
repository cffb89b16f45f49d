// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Query execution core for a GraphQL server.
//!
//! Given a validated operation, a compiled schema whose fields are bound to
//! resolver methods, and a root resolver object, [`Request::execute`]
//! produces the serialized JSON `data` payload plus a list of field-level
//! errors. Parsing, validation, schema compilation, and selection
//! application (fragment flattening, `@skip`/`@include`) happen upstream;
//! transports and subscription delivery happen downstream.

pub mod error;
pub mod execution;
pub mod logging;
pub mod path;
pub mod schema;
pub mod selection;
pub mod trace;
pub mod value;

pub use error::{BoxFieldError, FieldError, QueryError};
pub use execution::{QueryResponse, Request, DEFAULT_MAX_PARALLELISM};
pub use path::PathSegment;
pub use schema::{MetaField, OutputType, ResolvableSchema};
pub use selection::{
    has_async_selections, FieldSelection, Operation, OperationKind, Selection, TypeAssertion,
    TypenameSelection,
};
pub use trace::{FieldTraceInfo, FieldTracer, NoopTracer, TraceFinish, TracingFieldTracer};
pub use logging::{PanicLogger, TracingPanicLogger};
pub use value::{
    Arguments, MethodIndex, ResolvedObject, ResolvedValue, ResolverContext, ResolverObject,
};
