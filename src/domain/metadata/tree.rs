// SPDX-License-Identifier: MPL-2.0
//! Flattening of a [`TagMap`] into rows for a tree widget.

use super::types::{TagMap, TagValue};

/// One row of a tree view: its nesting depth and the text it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub label: String,
}

const MAPPING_LABEL: &str = "[dict]";
const SEQUENCE_LABEL: &str = "[list]";

/// Flattens `map` depth-first.
///
/// Every key becomes a row with its value nested one level below. Sequence
/// items that are themselves nested show a `[dict]` or `[list]` placeholder
/// row before their children.
#[must_use]
pub fn tree_rows(map: &TagMap) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    push_mapping(&mut rows, map, 0);
    rows
}

fn push_mapping(rows: &mut Vec<TreeRow>, map: &TagMap, depth: usize) {
    for (key, value) in map.iter() {
        rows.push(TreeRow {
            depth,
            label: key.to_string(),
        });
        push_value(rows, value, depth + 1);
    }
}

fn push_value(rows: &mut Vec<TreeRow>, value: &TagValue, depth: usize) {
    match value {
        TagValue::Mapping(map) => push_mapping(rows, map, depth),
        TagValue::Sequence(items) => {
            for item in items {
                match item {
                    TagValue::Mapping(_) => {
                        rows.push(TreeRow {
                            depth,
                            label: MAPPING_LABEL.to_string(),
                        });
                        push_value(rows, item, depth + 1);
                    }
                    TagValue::Sequence(_) => {
                        rows.push(TreeRow {
                            depth,
                            label: SEQUENCE_LABEL.to_string(),
                        });
                        push_value(rows, item, depth + 1);
                    }
                    TagValue::Scalar(scalar) => rows.push(TreeRow {
                        depth,
                        label: scalar.to_string(),
                    }),
                }
            }
        }
        TagValue::Scalar(scalar) => rows.push(TreeRow {
            depth,
            label: scalar.to_string(),
        }),
    }
}
