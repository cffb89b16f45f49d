// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_graphql_value::Name;
use indexmap::IndexMap;

use crate::schema::MetaField;
use crate::value::{Arguments, MethodIndex};

/// The kind of a validated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

/// A validated operation whose selection set has already been applied by the
/// upstream collaborator: fragments are flattened into the three selection
/// variants below and `@skip`/`@include` directives are resolved.
#[derive(Debug, Clone)]
pub struct Operation {
    pub kind: OperationKind,
    pub selections: Vec<Selection>,
}

#[derive(Debug, Clone)]
pub enum Selection {
    Field(FieldSelection),
    Typename(TypenameSelection),
    TypeAssertion(TypeAssertion),
}

/// A field selection bound to a resolvable schema field.
#[derive(Debug, Clone)]
pub struct FieldSelection {
    pub field: Arc<MetaField>,
    /// The output key: the explicit alias, or the field name.
    pub alias: Name,
    pub arguments: Arguments,
    pub selections: Vec<Selection>,
}

/// The `__typename` meta-field.
#[derive(Debug, Clone)]
pub struct TypenameSelection {
    pub alias: Name,
    /// Declared name of the type the selection sits on; the result when no
    /// type assertions are needed to discriminate the runtime type.
    pub concrete_type: String,
    /// Runtime type discriminators for interface/union positions, keyed by
    /// the GraphQL type name they assert.
    pub type_assertions: IndexMap<String, MethodIndex>,
}

/// An inline fragment or fragment spread against an interface or union.
#[derive(Debug, Clone)]
pub struct TypeAssertion {
    /// Discriminator method on the current resolver object.
    pub method_index: MethodIndex,
    /// Selections applied when the assertion matches.
    pub selections: Vec<Selection>,
}

/// Whether any selection in the list is eligible for concurrent resolution
/// with its siblings.
pub fn has_async_selections(selections: &[Selection]) -> bool {
    selections.iter().any(is_async_selection)
}

pub(crate) fn is_async_selection(selection: &Selection) -> bool {
    match selection {
        Selection::Field(field) => field.field.is_async,
        Selection::Typename(_) => false,
        Selection::TypeAssertion(assertion) => has_async_selections(&assertion.selections),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::OutputType;

    fn scalar_field(name: &str, is_async: bool) -> Selection {
        Selection::Field(FieldSelection {
            field: Arc::new(MetaField {
                name: Name::new(name),
                parent_type: "Query".to_owned(),
                trace_label: format!("GraphQL field: Query.{name}"),
                method_index: 0,
                is_async,
                ty: OutputType::Scalar("Int".to_owned()),
                fixed_result: None,
            }),
            alias: Name::new(name),
            arguments: Arguments::new(),
            selections: vec![],
        })
    }

    #[test]
    fn sync_fields_are_not_async() {
        let selections = vec![scalar_field("a", false), scalar_field("b", false)];
        assert!(!has_async_selections(&selections));
    }

    #[test]
    fn one_async_field_suffices() {
        let selections = vec![scalar_field("a", false), scalar_field("b", true)];
        assert!(has_async_selections(&selections));
    }

    #[test]
    fn looks_through_type_assertions() {
        let selections = vec![Selection::TypeAssertion(TypeAssertion {
            method_index: 0,
            selections: vec![Selection::TypeAssertion(TypeAssertion {
                method_index: 1,
                selections: vec![scalar_field("nested", true)],
            })],
        })];
        assert!(has_async_selections(&selections));

        let typename_only = vec![Selection::Typename(TypenameSelection {
            alias: Name::new("__typename"),
            concrete_type: "Query".to_owned(),
            type_assertions: IndexMap::new(),
        })];
        assert!(!has_async_selections(&typename_only));
    }
}
