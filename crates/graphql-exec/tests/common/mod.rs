// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

#![allow(dead_code)]

use std::sync::Arc;

use async_graphql_value::Name;
use indexmap::IndexMap;

use graphql_exec::{
    Arguments, FieldSelection, MetaField, MethodIndex, Operation, OperationKind, OutputType,
    QueryResponse, ResolvableSchema, ResolverObject, Selection, TypenameSelection,
};

pub fn non_null(inner: OutputType) -> OutputType {
    OutputType::NonNull(Box::new(inner))
}

pub fn list_of(inner: OutputType) -> OutputType {
    OutputType::List(Box::new(inner))
}

pub fn scalar(name: &str) -> OutputType {
    OutputType::Scalar(name.to_owned())
}

pub fn enum_type(name: &str) -> OutputType {
    OutputType::Enum(name.to_owned())
}

pub fn object(name: &str) -> OutputType {
    OutputType::Object(name.to_owned())
}

pub fn union(name: &str) -> OutputType {
    OutputType::Union(name.to_owned())
}

pub fn meta_field(
    parent: &str,
    name: &str,
    method_index: MethodIndex,
    is_async: bool,
    ty: OutputType,
) -> Arc<MetaField> {
    Arc::new(MetaField {
        name: Name::new(name),
        parent_type: parent.to_owned(),
        trace_label: format!("GraphQL field: {parent}.{name}"),
        method_index,
        is_async,
        ty,
        fixed_result: None,
    })
}

pub fn select(field: &Arc<MetaField>, selections: Vec<Selection>) -> Selection {
    select_as(field, field.name.as_str(), selections)
}

pub fn select_as(field: &Arc<MetaField>, alias: &str, selections: Vec<Selection>) -> Selection {
    Selection::Field(FieldSelection {
        field: field.clone(),
        alias: Name::new(alias),
        arguments: Arguments::new(),
        selections,
    })
}

pub fn select_with_args(
    field: &Arc<MetaField>,
    arguments: Arguments,
    selections: Vec<Selection>,
) -> Selection {
    Selection::Field(FieldSelection {
        field: field.clone(),
        alias: Name::new(field.name.as_str()),
        arguments,
        selections,
    })
}

/// `__typename` against a concrete object position.
pub fn typename(concrete_type: &str) -> Selection {
    Selection::Typename(TypenameSelection {
        alias: Name::new("__typename"),
        concrete_type: concrete_type.to_owned(),
        type_assertions: IndexMap::new(),
    })
}

/// `__typename` against an interface or union position.
pub fn typename_with_assertions(
    concrete_type: &str,
    assertions: &[(&str, MethodIndex)],
) -> Selection {
    Selection::Typename(TypenameSelection {
        alias: Name::new("__typename"),
        concrete_type: concrete_type.to_owned(),
        type_assertions: assertions
            .iter()
            .map(|(name, index)| ((*name).to_owned(), *index))
            .collect(),
    })
}

pub fn query(selections: Vec<Selection>) -> Operation {
    Operation {
        kind: OperationKind::Query,
        selections,
    }
}

pub fn mutation(selections: Vec<Selection>) -> Operation {
    Operation {
        kind: OperationKind::Mutation,
        selections,
    }
}

pub fn schema_with_root(root: impl ResolverObject + 'static) -> ResolvableSchema {
    ResolvableSchema {
        root: Arc::new(root),
    }
}

pub fn data_string(response: &QueryResponse) -> &str {
    std::str::from_utf8(&response.data).expect("data is not valid UTF-8")
}
