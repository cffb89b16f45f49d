// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;

use super::request::Request;
use crate::path::PathNode;
use crate::schema::MetaField;
use crate::selection::{is_async_selection, Selection, TypenameSelection};
use crate::value::{Arguments, ResolvedObject, ResolvedValue};

/// One field scheduled for resolution: the bound schema field, its merged
/// sub-selections, the resolver object owning the bound method, and the
/// private buffer its JSON value is written into.
pub(crate) struct FieldToExec<'a> {
    pub(crate) meta: Arc<MetaField>,
    pub(crate) alias: &'a str,
    pub(crate) arguments: Option<&'a Arguments>,
    pub(crate) sels: Vec<&'a Selection>,
    pub(crate) resolver: ResolvedObject,
    /// Result fixed while collecting the selection (`__typename`), taking
    /// precedence over the schema-level fixed result.
    pub(crate) fixed: Option<ResolvedValue>,
    pub(crate) out: Vec<u8>,
}

impl Request {
    /// Resolve a selection list against `resolver` and write the resulting
    /// JSON object literal into `out`.
    ///
    /// `is_non_null` states whether the enclosing field's declared type is
    /// non-null; it decides who renders the `null` when a non-null child
    /// fails (see the stitching step below).
    pub(crate) fn exec_selections<'a>(
        &'a self,
        sels: &'a [&'a Selection],
        path: Option<&'a PathNode<'a>>,
        resolver: &'a ResolvedObject,
        out: &'a mut Vec<u8>,
        serially: bool,
        is_non_null: bool,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            let concurrent = !serially && sels.iter().any(|sel| is_async_selection(sel));

            let mut fields = Vec::new();
            let mut by_alias = HashMap::new();
            collect_fields_to_resolve(
                sels.iter().copied(),
                resolver,
                &mut fields,
                &mut by_alias,
            );

            if concurrent {
                join_all(fields.iter_mut().map(|field| async move {
                    let field_path = PathNode::field(path, field.alias);
                    let exec = AssertUnwindSafe(self.exec_field(field, &field_path));
                    if let Err(value) = exec.catch_unwind().await {
                        self.record_panic(value.as_ref(), Some(&field_path));
                        field.out.clear();
                        field.out.extend_from_slice(b"null");
                    }
                }))
                .await;
            } else {
                for field in &mut fields {
                    let field_path = PathNode::field(path, field.alias);
                    self.exec_field(field, &field_path).await;
                }
            }

            // A failed non-null child cannot render null itself:
            //
            //                          | nullable field | non-null field
            // -------------------------------------------------------------
            // non-null child has error | write null     | write nothing,
            //                          |                | parent renders null
            // no non-null child error  | write output   | write output
            let child_has_error = fields.iter().any(|field| {
                field.meta.ty.is_non_null()
                    && self.sub_path_has_error(&PathNode::field(path, field.alias).to_segments())
            });

            if !child_has_error {
                out.push(b'{');
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push(b',');
                    }
                    out.push(b'"');
                    out.extend_from_slice(field.alias.as_bytes());
                    out.extend_from_slice(b"\":");
                    out.extend_from_slice(&field.out);
                }
                out.push(b'}');
                return;
            }

            if is_non_null {
                return;
            }

            out.extend_from_slice(b"null");
        })
    }
}

/// Walk the selection list in order, building one [`FieldToExec`] per unique
/// output alias. Later selections with an already-seen alias only contribute
/// their sub-selections; upstream validation is expected to have rejected
/// genuinely conflicting aliases.
fn collect_fields_to_resolve<'a>(
    sels: impl IntoIterator<Item = &'a Selection>,
    resolver: &ResolvedObject,
    fields: &mut Vec<FieldToExec<'a>>,
    by_alias: &mut HashMap<&'a str, usize>,
) {
    for sel in sels {
        match sel {
            Selection::Field(field) => match by_alias.get(field.alias.as_str()).copied() {
                Some(existing) => {
                    fields[existing].sels.extend(field.selections.iter());
                }
                None => {
                    by_alias.insert(field.alias.as_str(), fields.len());
                    fields.push(FieldToExec {
                        meta: field.field.clone(),
                        alias: field.alias.as_str(),
                        arguments: Some(&field.arguments),
                        sels: field.selections.iter().collect(),
                        resolver: resolver.clone(),
                        fixed: None,
                        out: Vec::new(),
                    });
                }
            },

            Selection::Typename(typename) => {
                fields.push(FieldToExec {
                    meta: MetaField::typename_meta(),
                    alias: typename.alias.as_str(),
                    arguments: None,
                    sels: Vec::new(),
                    resolver: resolver.clone(),
                    fixed: Some(ResolvedValue::Scalar(serde_json::Value::String(type_of(
                        typename, resolver,
                    )))),
                    out: Vec::new(),
                });
            }

            Selection::TypeAssertion(assertion) => {
                if let Some(narrowed) = resolver.type_assertion(assertion.method_index) {
                    collect_fields_to_resolve(
                        assertion.selections.iter(),
                        &narrowed,
                        fields,
                        by_alias,
                    );
                }
            }
        }
    }
}

/// Runtime type name for a `__typename` selection: the first matching type
/// assertion wins; a concrete object position needs no assertion at all.
fn type_of(typename: &TypenameSelection, resolver: &ResolvedObject) -> String {
    if typename.type_assertions.is_empty() {
        return typename.concrete_type.clone();
    }
    for (type_name, method_index) in &typename.type_assertions {
        if resolver.type_assertion(*method_index).is_some() {
            return type_name.clone();
        }
    }
    String::new()
}
