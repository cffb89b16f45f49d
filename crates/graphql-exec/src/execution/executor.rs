// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::instrument;

use super::request::Request;
use crate::error::QueryError;
use crate::schema::ResolvableSchema;
use crate::selection::{Operation, OperationKind, Selection};

/// Serialized result of one execution: the JSON bytes of the `data` payload
/// plus all field-level errors collected along the way.
#[derive(Debug)]
pub struct QueryResponse {
    pub data: Vec<u8>,
    pub errors: Vec<QueryError>,
}

impl Request {
    /// Execute one validated operation against the schema's root resolver.
    ///
    /// Mutations resolve their top-level fields serially; queries resolve
    /// siblings concurrently whenever any selected field is marked async.
    /// Errors never abort the walk: the returned `data` is always a complete
    /// JSON value with `null` holes, unless the request was canceled, in
    /// which case `data` is empty and a single cancellation error is
    /// returned.
    #[instrument(name = "Request::execute", skip_all, fields(kind = ?operation.kind))]
    pub async fn execute(
        &self,
        schema: &ResolvableSchema,
        operation: &Operation,
    ) -> QueryResponse {
        if operation.kind == OperationKind::Subscription {
            return QueryResponse {
                data: Vec::new(),
                errors: vec![QueryError::new(
                    "subscriptions must be executed through a subscription transport",
                )],
            };
        }

        let serially = operation.kind == OperationKind::Mutation;
        let selections: Vec<&Selection> = operation.selections.iter().collect();

        let mut out = Vec::new();
        let walk = self.exec_selections(&selections, None, &schema.root, &mut out, serially, false);
        if let Err(value) = AssertUnwindSafe(walk).catch_unwind().await {
            self.record_panic(value.as_ref(), None);
        }

        if self.cancellation.is_cancelled() {
            return QueryResponse {
                data: Vec::new(),
                errors: vec![QueryError::new("query execution canceled")],
            };
        }

        QueryResponse {
            data: out,
            errors: self.take_errors(),
        }
    }
}
