//! Localization tree helpers.
//!
//! A localization tree is a JSON object whose values are either nested objects
//! or string leaves. Key order is preserved through `serde_json`'s
//! `preserve_order` feature so rewritten files diff cleanly.

use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// A parsed `<lang>.json` document.
pub type LocaleTree = Map<String, Value>;

/// Count every string leaf in the tree, descending into all subtrees.
#[must_use]
pub fn count_leaves(tree: &LocaleTree) -> usize {
    tree.values()
        .map(|value| match value {
            Value::Object(subtree) => count_leaves(subtree),
            Value::String(_) => 1,
            _ => 0,
        })
        .sum()
}

/// Collect dotted paths for every leaf and subtree key.
///
/// Subtree paths carry a trailing `.` so a key that flips between leaf and
/// subtree shows up as a difference.
pub fn collect_shape(prefix: &str, tree: &LocaleTree, out: &mut BTreeSet<String>) {
    for (key, value) in tree {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        if let Value::Object(subtree) = value {
            out.insert(format!("{path}."));
            collect_shape(&path, subtree, out);
        } else {
            out.insert(path);
        }
    }
}

/// True when both trees have the same keys at every depth with the same
/// subtree/leaf typing.
#[must_use]
pub fn same_shape(left: &LocaleTree, right: &LocaleTree) -> bool {
    let mut left_shape = BTreeSet::new();
    let mut right_shape = BTreeSet::new();
    collect_shape("", left, &mut left_shape);
    collect_shape("", right, &mut right_shape);
    left_shape == right_shape
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: Value) -> LocaleTree {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn counts_leaves_across_all_sibling_subtrees() {
        let skeleton = tree(json!({
            "title": "Hi",
            "menu": { "start": "Start", "quit": "Quit" },
            "dialog": { "ok": "OK", "nested": { "deep": "Deep" } },
            "version": 3
        }));
        assert_eq!(count_leaves(&skeleton), 5);
    }

    #[test]
    fn shape_ignores_leaf_text_but_not_typing() {
        let a = tree(json!({ "a": "x", "b": { "c": "y" } }));
        let b = tree(json!({ "a": "other", "b": { "c": "text" } }));
        let c = tree(json!({ "a": { "x": "y" }, "b": { "c": "text" } }));
        assert!(same_shape(&a, &b));
        assert!(!same_shape(&a, &c));
    }
}
