// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

use serde::{Serialize, Serializer};

/// One step in a response path: an object key (field alias) or a list index.
///
/// Serializes the way GraphQL error paths are transported: aliases as JSON
/// strings, indices as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl Serialize for PathSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PathSegment::Field(alias) => serializer.serialize_str(alias),
            PathSegment::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(alias) => f.write_str(alias),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Parent-linked chain from the response root down to the current position.
///
/// Each node lives on the stack of the walker frame that descended into it, so
/// descending never copies the prefix. The chain is materialized into owned
/// segments only when an error has to be recorded.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PathNode<'a> {
    parent: Option<&'a PathNode<'a>>,
    segment: Segment<'a>,
}

#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Field(&'a str),
    Index(usize),
}

impl<'a> PathNode<'a> {
    pub(crate) fn field(parent: Option<&'a PathNode<'a>>, alias: &'a str) -> Self {
        Self {
            parent,
            segment: Segment::Field(alias),
        }
    }

    pub(crate) fn index(parent: Option<&'a PathNode<'a>>, index: usize) -> Self {
        Self {
            parent,
            segment: Segment::Index(index),
        }
    }

    /// Flatten the chain into root-first owned segments.
    pub(crate) fn to_segments(&self) -> Vec<PathSegment> {
        let mut segments = match self.parent {
            Some(parent) => parent.to_segments(),
            None => Vec::new(),
        };
        segments.push(match self.segment {
            Segment::Field(alias) => PathSegment::Field(alias.to_owned()),
            Segment::Index(index) => PathSegment::Index(index),
        });
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn materializes_root_first() {
        let root = PathNode::field(None, "users");
        let index = PathNode::index(Some(&root), 3);
        let leaf = PathNode::field(Some(&index), "name");

        assert_eq!(
            leaf.to_segments(),
            vec![
                PathSegment::Field("users".to_owned()),
                PathSegment::Index(3),
                PathSegment::Field("name".to_owned()),
            ]
        );
    }

    #[test]
    fn serializes_as_strings_and_numbers() {
        let path = vec![
            PathSegment::Field("items".to_owned()),
            PathSegment::Index(1),
            PathSegment::Field("id".to_owned()),
        ];

        assert_eq!(
            serde_json::to_value(&path).unwrap(),
            serde_json::json!(["items", 1, "id"])
        );
    }
}
