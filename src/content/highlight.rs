use lazy_static::lazy_static;
use regex::Regex;

use crate::content::ast::{HtmlHint, Node};

pub const MARK_DELIMITER: &str = "==";
pub const MARK_TAG: &str = "mark";
pub const MARK_CLASS: &str = "m-mark";

lazy_static! {
    // Non-greedy: `==a== and ==b==` gives two spans, never one covering both
    static ref MARK_REGEX: Regex = Regex::new(r"==(.*?)==").unwrap();
}

impl HtmlHint {
    pub fn mark() -> HtmlHint {
        HtmlHint {
            tag_name: MARK_TAG.to_string(),
            class_name: MARK_CLASS.to_string(),
        }
    }
}

impl Node {
    pub fn mark(text: &str) -> Node {
        Node::Mark {
            hint: HtmlHint::mark(),
            children: vec![Node::Text(text.to_string())],
        }
    }
}

/// Rewrites `==text==` runs found in text leaves into [`Node::Mark`] nodes.
///
/// Returns a new tree. Only `Node::Text` values are scanned, so code spans,
/// raw HTML and already marked content are left alone and a second pass
/// changes nothing.
pub fn highlight(node: Node) -> Node {
    node.map_children(highlight_children)
}

fn highlight_children(children: Vec<Node>) -> Vec<Node> {
    let mut res = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Node::Text(value) if value.contains(MARK_DELIMITER) => res.extend(split_marks(&value)),
            other => res.push(highlight(other)),
        }
    }
    res
}

/// Splits one text value into text and mark nodes, scanning left to right.
/// A `==` without a closing pair stays in the text.
pub fn split_marks(text: &str) -> Vec<Node> {
    let mut nodes = vec![];
    let mut last_end = 0;

    for caps in MARK_REGEX.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        if whole.start() > last_end {
            nodes.push(Node::Text(text[last_end..whole.start()].to_string()));
        }
        nodes.push(Node::mark(inner.as_str()));
        last_end = whole.end();
    }

    if last_end < text.len() {
        nodes.push(Node::Text(text[last_end..].to_string()));
    }

    if nodes.is_empty() {
        nodes.push(Node::Text(text.to_string()));
    }

    nodes
}
