// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Path evaluation. Every step maps the current node list to the next one,
//! preserving document order.

use serde_json::Value;

use crate::{Segment, Selector};

pub(crate) fn evaluate<'v>(segments: &[Segment], root: &'v Value) -> Vec<&'v Value> {
    let mut current = vec![root];
    for segment in segments {
        let mut next = Vec::new();
        for node in current {
            match segment {
                Segment::Child(selector) => select(selector, node, &mut next),
                Segment::Descendant(selector) => {
                    let mut nodes = Vec::new();
                    descendants(node, &mut nodes);
                    for n in nodes {
                        select(selector, n, &mut next);
                    }
                }
            }
        }
        if next.is_empty() {
            return next;
        }
        current = next;
    }
    current
}

/// Collects `node` and everything below it, pre-order.
fn descendants<'v>(node: &'v Value, out: &mut Vec<&'v Value>) {
    out.push(node);
    match node {
        Value::Object(map) => map.values().for_each(|v| descendants(v, out)),
        Value::Array(items) => items.iter().for_each(|v| descendants(v, out)),
        _ => {}
    }
}

fn select<'v>(selector: &Selector, node: &'v Value, out: &mut Vec<&'v Value>) {
    match selector {
        Selector::Name(name) => {
            if let Some(v) = node.as_object().and_then(|m| m.get(name)) {
                out.push(v);
            }
        }
        Selector::Wildcard => match node {
            Value::Object(map) => out.extend(map.values()),
            Value::Array(items) => out.extend(items.iter()),
            _ => {}
        },
        Selector::Index(index) => {
            if let Some(items) = node.as_array() {
                if let Some(i) = normalize(*index, items.len()) {
                    out.push(&items[i]);
                }
            }
        }
        Selector::Slice { start, end, step } => {
            if let Some(items) = node.as_array() {
                for i in slice_indices(*start, *end, *step, items.len()) {
                    out.push(&items[i]);
                }
            }
        }
        Selector::Union(selectors) => {
            for s in selectors {
                select(s, node, out);
            }
        }
    }
}

fn normalize(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let i = if index < 0 { len + index } else { index };
    (0..len).contains(&i).then_some(i as usize)
}

/// Array slice semantics: negative bounds count from the end, bounds are
/// clamped, a zero step selects nothing. Stepping past `i64` range ends
/// the slice.
fn slice_indices(start: Option<i64>, end: Option<i64>, step: Option<i64>, len: usize) -> Vec<usize> {
    let len = len as i64;
    let step = step.unwrap_or(1);
    let norm = |i: i64| if i < 0 { len + i } else { i };
    let mut out = Vec::new();

    if step > 0 {
        let lower = start.map_or(0, |s| norm(s).clamp(0, len));
        let upper = end.map_or(len, |e| norm(e).clamp(0, len));
        let mut i = lower;
        while i < upper {
            out.push(i as usize);
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }
    } else if step < 0 {
        let upper = start.map_or(len - 1, |s| norm(s).clamp(-1, len - 1));
        let lower = end.map_or(-1, |e| norm(e).clamp(-1, len - 1));
        let mut i = upper;
        while lower < i {
            out.push(i as usize);
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }
    }

    out
}
