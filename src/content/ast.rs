//! Owned markdown syntax tree used by the render pipeline.
//!
//! The tree is built from the `markdown` crate mdast. Definitions are consumed
//! while converting, so link and image references come out already resolved.
//! Besides the usual block and inline nodes it carries [`Node::Mark`], an inline
//! node with an HTML hint, which the highlight transform produces.

use std::collections::HashMap;

use markdown::mdast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
    None,
}

impl Align {
    pub fn as_attr(&self) -> Option<&'static str> {
        match self {
            Align::Left => Some("left"),
            Align::Right => Some("right"),
            Align::Center => Some("center"),
            Align::None => None,
        }
    }
}

impl From<&mdast::AlignKind> for Align {
    fn from(value: &mdast::AlignKind) -> Self {
        match value {
            mdast::AlignKind::Left => Align::Left,
            mdast::AlignKind::Right => Align::Right,
            mdast::AlignKind::Center => Align::Center,
            mdast::AlignKind::None => Align::None,
        }
    }
}

/// Tells the HTML writer which element to emit for a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlHint {
    pub tag_name: String,
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Root(Vec<Node>),
    Paragraph(Vec<Node>),
    Heading { depth: u8, children: Vec<Node> },
    ThematicBreak,
    Blockquote(Vec<Node>),
    List { ordered: bool, start: Option<u32>, spread: bool, children: Vec<Node> },
    ListItem { spread: bool, checked: Option<bool>, children: Vec<Node> },
    Code { lang: Option<String>, value: String },
    Html(String),
    Table { align: Vec<Align>, children: Vec<Node> },
    TableRow(Vec<Node>),
    TableCell(Vec<Node>),
    Text(String),
    Emphasis(Vec<Node>),
    Strong(Vec<Node>),
    Delete(Vec<Node>),
    InlineCode(String),
    Break,
    Link { url: String, title: Option<String>, children: Vec<Node> },
    Image { url: String, title: Option<String>, alt: String },
    Mark { hint: HtmlHint, children: Vec<Node> },
}

impl Node {
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Root(children)
            | Node::Paragraph(children)
            | Node::Blockquote(children)
            | Node::TableRow(children)
            | Node::TableCell(children)
            | Node::Emphasis(children)
            | Node::Strong(children)
            | Node::Delete(children)
            | Node::Heading { children, .. }
            | Node::List { children, .. }
            | Node::ListItem { children, .. }
            | Node::Table { children, .. }
            | Node::Link { children, .. }
            | Node::Mark { children, .. } => Some(children),
            Node::ThematicBreak
            | Node::Code { .. }
            | Node::Html(_)
            | Node::Text(_)
            | Node::InlineCode(_)
            | Node::Break
            | Node::Image { .. } => None,
        }
    }

    /// Rebuilds this node with its child list replaced by `f(children)`.
    /// Leaves are returned untouched.
    pub fn map_children<F>(self, f: F) -> Node
    where
        F: FnOnce(Vec<Node>) -> Vec<Node>,
    {
        match self {
            Node::Root(children) => Node::Root(f(children)),
            Node::Paragraph(children) => Node::Paragraph(f(children)),
            Node::Blockquote(children) => Node::Blockquote(f(children)),
            Node::TableRow(children) => Node::TableRow(f(children)),
            Node::TableCell(children) => Node::TableCell(f(children)),
            Node::Emphasis(children) => Node::Emphasis(f(children)),
            Node::Strong(children) => Node::Strong(f(children)),
            Node::Delete(children) => Node::Delete(f(children)),
            Node::Heading { depth, children } => Node::Heading { depth, children: f(children) },
            Node::List { ordered, start, spread, children } => Node::List { ordered, start, spread, children: f(children) },
            Node::ListItem { spread, checked, children } => Node::ListItem { spread, checked, children: f(children) },
            Node::Table { align, children } => Node::Table { align, children: f(children) },
            Node::Link { url, title, children } => Node::Link { url, title, children: f(children) },
            Node::Mark { hint, children } => Node::Mark { hint, children: f(children) },
            leaf => leaf,
        }
    }
}

struct Definitions(HashMap<String, (String, Option<String>)>);

impl Definitions {
    fn collect(root: &mdast::Node) -> Definitions {
        let mut map = HashMap::new();
        Self::visit(root, &mut map);
        Definitions(map)
    }

    fn visit(node: &mdast::Node, map: &mut HashMap<String, (String, Option<String>)>) {
        if let mdast::Node::Definition(def) = node {
            // The first definition of a label wins
            map.entry(normalize_label(&def.identifier))
                .or_insert_with(|| (def.url.clone(), def.title.clone()));
        }

        if let Some(children) = node.children() {
            for child in children {
                Self::visit(child, map);
            }
        }
    }

    fn get(&self, identifier: &str) -> Option<&(String, Option<String>)> {
        self.0.get(&normalize_label(identifier))
    }
}

fn normalize_label(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

fn convert_all(children: Vec<mdast::Node>, defs: &Definitions) -> Vec<Node> {
    children.into_iter().filter_map(|child| convert(child, defs)).collect()
}

fn convert(node: mdast::Node, defs: &Definitions) -> Option<Node> {
    let node = match node {
        mdast::Node::Root(n) => Node::Root(convert_all(n.children, defs)),
        mdast::Node::Paragraph(n) => Node::Paragraph(convert_all(n.children, defs)),
        mdast::Node::Heading(n) => Node::Heading { depth: n.depth, children: convert_all(n.children, defs) },
        mdast::Node::ThematicBreak(_) => Node::ThematicBreak,
        mdast::Node::Blockquote(n) => Node::Blockquote(convert_all(n.children, defs)),
        mdast::Node::List(n) => Node::List {
            ordered: n.ordered,
            start: n.start,
            spread: n.spread,
            children: convert_all(n.children, defs),
        },
        mdast::Node::ListItem(n) => Node::ListItem {
            spread: n.spread,
            checked: n.checked,
            children: convert_all(n.children, defs),
        },
        mdast::Node::Code(n) => Node::Code { lang: n.lang, value: n.value },
        mdast::Node::Html(n) => Node::Html(n.value),
        mdast::Node::Table(n) => Node::Table {
            align: n.align.iter().map(Align::from).collect(),
            children: convert_all(n.children, defs),
        },
        mdast::Node::TableRow(n) => Node::TableRow(convert_all(n.children, defs)),
        mdast::Node::TableCell(n) => Node::TableCell(convert_all(n.children, defs)),
        mdast::Node::Text(n) => Node::Text(n.value),
        mdast::Node::Emphasis(n) => Node::Emphasis(convert_all(n.children, defs)),
        mdast::Node::Strong(n) => Node::Strong(convert_all(n.children, defs)),
        mdast::Node::Delete(n) => Node::Delete(convert_all(n.children, defs)),
        mdast::Node::InlineCode(n) => Node::InlineCode(n.value),
        mdast::Node::Break(_) => Node::Break,
        mdast::Node::Link(n) => Node::Link { url: n.url, title: n.title, children: convert_all(n.children, defs) },
        mdast::Node::Image(n) => Node::Image { url: n.url, title: n.title, alt: n.alt },
        mdast::Node::LinkReference(n) => {
            let children = convert_all(n.children, defs);
            match defs.get(&n.identifier) {
                Some((url, title)) => Node::Link { url: url.clone(), title: title.clone(), children },
                None => {
                    let label = n.label.unwrap_or(n.identifier);
                    Node::Text(format!("[{}]", label))
                }
            }
        }
        mdast::Node::ImageReference(n) => match defs.get(&n.identifier) {
            Some((url, title)) => Node::Image { url: url.clone(), title: title.clone(), alt: n.alt },
            None => Node::Text(format!("![{}]", n.alt)),
        },
        // Definitions are resolved above. Footnotes, math, MDX and embedded
        // front matter constructs are never enabled in the parser.
        _ => return None,
    };

    Some(node)
}

/// Builds the owned tree from a parsed mdast root.
pub fn from_mdast(root: mdast::Node) -> Node {
    let defs = Definitions::collect(&root);
    match convert(root, &defs) {
        Some(Node::Root(children)) => Node::Root(children),
        Some(other) => Node::Root(vec![other]),
        None => Node::Root(vec![]),
    }
}

#[cfg(test)]
mod tests {
    use markdown::ParseOptions;

    use super::*;

    fn parse(text: &str) -> Node {
        from_mdast(markdown::to_mdast(text, &ParseOptions::gfm()).unwrap())
    }

    #[test]
    fn test_paragraph_with_emphasis() {
        let tree = parse("Some *text* here");
        assert_eq!(tree, Node::Root(vec![Node::Paragraph(vec![
            Node::Text("Some ".to_string()),
            Node::Emphasis(vec![Node::Text("text".to_string())]),
            Node::Text(" here".to_string()),
        ])]));
    }

    #[test]
    fn test_link_reference_is_resolved() {
        let tree = parse("See [the docs][Docs].\n\n[docs]: https://example.com \"Docs\"");
        let expected = Node::Link {
            url: "https://example.com".to_string(),
            title: Some("Docs".to_string()),
            children: vec![Node::Text("the docs".to_string())],
        };
        assert_eq!(tree, Node::Root(vec![Node::Paragraph(vec![
            Node::Text("See ".to_string()),
            expected,
            Node::Text(".".to_string()),
        ])]));
    }

    #[test]
    fn test_map_children_keeps_variant() {
        let node = Node::Heading { depth: 2, children: vec![Node::Text("a".to_string())] };
        let node = node.map_children(|mut children| {
            children.push(Node::Text("b".to_string()));
            children
        });
        assert_eq!(node, Node::Heading {
            depth: 2,
            children: vec![Node::Text("a".to_string()), Node::Text("b".to_string())],
        });
    }
}
