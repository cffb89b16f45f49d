// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::panic::AssertUnwindSafe;

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;

use super::request::Request;
use crate::error::QueryError;
use crate::path::PathNode;
use crate::schema::OutputType;
use crate::selection::{is_async_selection, Selection};
use crate::value::ResolvedValue;

impl Request {
    /// Write the JSON representation of a resolved value according to its
    /// declared type, recursing into the selection walker for composites.
    pub(crate) fn exec_selection_set<'a>(
        &'a self,
        sels: &'a [&'a Selection],
        ty: &'a OutputType,
        path: &'a PathNode<'a>,
        value: &'a ResolvedValue,
        out: &'a mut Vec<u8>,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            let (ty, non_null) = ty.unwrap_non_null();

            if let OutputType::Object(_) | OutputType::Interface(_) | OutputType::Union(_) = ty {
                match value {
                    ResolvedValue::Null => {
                        if non_null {
                            self.add_error(
                                QueryError::new(format!(r#"got nil for non-null "{ty}""#))
                                    .with_path(path.to_segments()),
                            );
                        }
                        out.extend_from_slice(b"null");
                    }
                    ResolvedValue::Object(resolver) => {
                        self.exec_selections(sels, Some(path), resolver, out, false, non_null)
                            .await;
                    }
                    other => panic!("resolver returned {other:?} for composite type {ty}"),
                }
                return;
            }

            if value.is_null() {
                if non_null {
                    self.add_error(
                        QueryError::new(format!(r#"got nil for non-null "{ty}""#))
                            .with_path(path.to_segments()),
                    );
                }
                out.extend_from_slice(b"null");
                return;
            }

            match ty {
                OutputType::List(element_ty) => {
                    let ResolvedValue::List(items) = value else {
                        panic!("resolver returned {value:?} for list type {ty}");
                    };
                    self.exec_list(sels, element_ty, path, items, out).await;
                }

                OutputType::Scalar(_) => {
                    let ResolvedValue::Scalar(scalar) = value else {
                        panic!("resolver returned {value:?} for scalar type {ty}");
                    };
                    serde_json::to_writer(&mut *out, scalar)
                        .unwrap_or_else(|err| panic!("could not marshal {scalar}: {err}"));
                }

                OutputType::Enum(_) => {
                    // An enum member's textual representation is preferred
                    // over whatever raw value the resolver produced.
                    let member = match value {
                        ResolvedValue::Enum(member) => member,
                        ResolvedValue::Scalar(serde_json::Value::String(member)) => member,
                        other => panic!("resolver returned {other:?} for enum type {ty}"),
                    };
                    out.push(b'"');
                    out.extend_from_slice(member.as_bytes());
                    out.push(b'"');
                }

                _ => unreachable!("non-null layers are unwrapped above"),
            }
        })
    }

    /// Resolve list elements into per-element buffers (concurrently when any
    /// selection is async) and stitch them in index order. A non-null
    /// element that resolved to null collapses the whole list to `null`, so
    /// the output stays well-formed JSON.
    async fn exec_list<'a>(
        &'a self,
        sels: &'a [&'a Selection],
        element_ty: &'a OutputType,
        path: &'a PathNode<'a>,
        items: &'a [ResolvedValue],
        out: &mut Vec<u8>,
    ) {
        let mut entry_outs: Vec<Vec<u8>> = vec![Vec::new(); items.len()];

        if sels.iter().any(|sel| is_async_selection(sel)) {
            join_all(items.iter().zip(entry_outs.iter_mut()).enumerate().map(
                |(index, (item, entry_out))| async move {
                    let element_path = PathNode::index(Some(path), index);
                    let exec = AssertUnwindSafe(self.exec_selection_set(
                        sels,
                        element_ty,
                        &element_path,
                        item,
                        entry_out,
                    ));
                    if let Err(value) = exec.catch_unwind().await {
                        self.record_panic(value.as_ref(), Some(&element_path));
                        entry_out.clear();
                        entry_out.extend_from_slice(b"null");
                    }
                },
            ))
            .await;
        } else {
            for (index, (item, entry_out)) in
                items.iter().zip(entry_outs.iter_mut()).enumerate()
            {
                let element_path = PathNode::index(Some(path), index);
                self.exec_selection_set(sels, element_ty, &element_path, item, entry_out)
                    .await;
            }
        }

        let element_resolved_to_null = element_ty.is_non_null()
            && entry_outs
                .iter()
                .any(|entry_out| entry_out.is_empty() || entry_out.as_slice() == b"null");
        if element_resolved_to_null {
            out.extend_from_slice(b"null");
            return;
        }

        out.push(b'[');
        for (index, entry_out) in entry_outs.iter().enumerate() {
            if index > 0 {
                out.push(b',');
            }
            out.extend_from_slice(entry_out);
        }
        out.push(b']');
    }
}
