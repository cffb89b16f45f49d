// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio_util::sync::CancellationToken;

use crate::error::BoxFieldError;

/// Index of a bound method in a resolver object's method table.
pub type MethodIndex = usize;

/// Field arguments packed by the upstream collaborator, keyed by argument
/// name in declaration order.
pub type Arguments = IndexMap<String, serde_json::Value>;

/// A runtime resolver object: the receiver of the methods the schema
/// compilation step bound to fields.
///
/// Implementations are normally generated when the schema is compiled against
/// the user's resolver types; each schema field stores the [`MethodIndex`] of
/// its bound method.
#[async_trait]
pub trait ResolverObject: Send + Sync + fmt::Debug {
    /// Invoke the bound resolver method at `index`.
    async fn resolve_method(
        &self,
        ctx: &ResolverContext<'_>,
        index: MethodIndex,
        arguments: &Arguments,
    ) -> Result<ResolvedValue, BoxFieldError>;

    /// Evaluate the type-assertion discriminator at `index`, returning the
    /// narrowed object when the runtime type matches.
    ///
    /// Only interface and union implementors need to override this.
    fn type_assertion(&self, _index: MethodIndex) -> Option<ResolvedObject> {
        None
    }
}

pub type ResolvedObject = Arc<dyn ResolverObject>;

/// The value a resolver method produced, tagged with how the serializer
/// should treat it.
///
/// `Null` is the explicit absent value; nullability of the surrounding field
/// is decided by its declared type, not by the value.
#[derive(Debug, Clone)]
pub enum ResolvedValue {
    Null,
    /// A leaf value marshalled with standard JSON encoding rules.
    Scalar(serde_json::Value),
    /// The textual representation of an enum member.
    Enum(String),
    List(Vec<ResolvedValue>),
    Object(ResolvedObject),
}

impl ResolvedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ResolvedValue::Null)
    }
}

/// Per-request context handed to resolver methods.
///
/// Resolvers that run for a long time should observe [`cancellation`] and
/// return early when the request has been given up on; in-flight methods are
/// never force-terminated.
///
/// [`cancellation`]: ResolverContext::cancellation
#[derive(Debug, Clone, Copy)]
pub struct ResolverContext<'r> {
    cancellation: &'r CancellationToken,
}

impl<'r> ResolverContext<'r> {
    pub(crate) fn new(cancellation: &'r CancellationToken) -> Self {
        Self { cancellation }
    }

    pub fn cancellation(&self) -> &CancellationToken {
        self.cancellation
    }

    pub fn is_canceled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}
