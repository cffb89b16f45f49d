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

use async_graphql_value::Name;

use crate::value::{MethodIndex, ResolvedObject, ResolvedValue};

/// The declared GraphQL type of a field position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputType {
    NonNull(Box<OutputType>),
    List(Box<OutputType>),
    Scalar(String),
    Enum(String),
    Object(String),
    Interface(String),
    Union(String),
}

impl OutputType {
    /// Strip one `NonNull` layer, remembering whether it was there.
    pub(crate) fn unwrap_non_null(&self) -> (&OutputType, bool) {
        match self {
            OutputType::NonNull(inner) => (inner, true),
            other => (other, false),
        }
    }

    pub(crate) fn is_non_null(&self) -> bool {
        matches!(self, OutputType::NonNull(_))
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputType::NonNull(inner) => write!(f, "{inner}!"),
            OutputType::List(inner) => write!(f, "[{inner}]"),
            OutputType::Scalar(name)
            | OutputType::Enum(name)
            | OutputType::Object(name)
            | OutputType::Interface(name)
            | OutputType::Union(name) => f.write_str(name),
        }
    }
}

/// A schema field bound to a resolver method at schema compilation time.
#[derive(Debug, Clone)]
pub struct MetaField {
    pub name: Name,
    /// Name of the type the field is declared on.
    pub parent_type: String,
    /// Label under which field resolution is reported to the tracer.
    pub trace_label: String,
    pub method_index: MethodIndex,
    /// Whether the bound method may be evaluated concurrently with its
    /// siblings.
    pub is_async: bool,
    pub ty: OutputType,
    /// A result fixed at schema compilation time; fields carrying one are
    /// never invoked.
    pub fixed_result: Option<ResolvedValue>,
}

impl MetaField {
    /// The `__typename` meta-field. Its result is fixed per selection by the
    /// walker, so the method index is never consulted.
    pub(crate) fn typename_meta() -> Arc<MetaField> {
        Arc::new(MetaField {
            name: Name::new("__typename"),
            parent_type: String::new(),
            trace_label: "GraphQL field: __typename".to_owned(),
            method_index: 0,
            is_async: false,
            ty: OutputType::NonNull(Box::new(OutputType::Scalar("String".to_owned()))),
            fixed_result: None,
        })
    }
}

/// A compiled schema whose fields are bound to resolver methods, together
/// with the root resolver object both operation kinds start from.
#[derive(Debug, Clone)]
pub struct ResolvableSchema {
    pub root: ResolvedObject,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn non_null(inner: OutputType) -> OutputType {
        OutputType::NonNull(Box::new(inner))
    }

    #[test]
    fn graphql_notation() {
        let ty = non_null(OutputType::List(Box::new(non_null(OutputType::Object(
            "User".to_owned(),
        )))));

        assert_eq!(ty.to_string(), "[User!]!");
    }

    #[test]
    fn unwraps_a_single_layer() {
        let ty = non_null(OutputType::List(Box::new(non_null(OutputType::Scalar(
            "Int".to_owned(),
        )))));

        let (unwrapped, was_non_null) = ty.unwrap_non_null();
        assert!(was_non_null);
        assert_eq!(unwrapped.to_string(), "[Int!]");

        let (again, was_non_null) = unwrapped.unwrap_non_null();
        assert!(!was_non_null);
        assert_eq!(again, unwrapped);
    }
}
