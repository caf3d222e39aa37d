use std::fmt;

use serde::{Deserialize, Serialize};

/// Block kinds understood by the document model.
///
/// The set is closed: deserializing any other `type` string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Blockquote,
    Code,
    List,
    ListItem,
    Emphasis,
    Strong,
}

impl NodeKind {
    pub const ALL: [NodeKind; 10] = [
        NodeKind::Paragraph,
        NodeKind::Heading1,
        NodeKind::Heading2,
        NodeKind::Heading3,
        NodeKind::Blockquote,
        NodeKind::Code,
        NodeKind::List,
        NodeKind::ListItem,
        NodeKind::Emphasis,
        NodeKind::Strong,
    ];

    /// Line prefix written in front of the text of this kind.
    /// Kinds without a line syntax have an empty marker.
    pub fn marker(self) -> &'static str {
        match self {
            NodeKind::Heading1 => "# ",
            NodeKind::Heading2 => "## ",
            NodeKind::Heading3 => "### ",
            NodeKind::Blockquote => "> ",
            NodeKind::Code => "```",
            NodeKind::Paragraph
            | NodeKind::List
            | NodeKind::ListItem
            | NodeKind::Emphasis
            | NodeKind::Strong => "",
        }
    }

    /// Name used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading1 => "heading1",
            NodeKind::Heading2 => "heading2",
            NodeKind::Heading3 => "heading3",
            NodeKind::Blockquote => "blockquote",
            NodeKind::Code => "code",
            NodeKind::List => "list",
            NodeKind::ListItem => "listItem",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inline leaf: literal text with independent style flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextRun {
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(mut self, on: bool) -> Self {
        self.bold = on;
        self
    }

    pub fn italic(mut self, on: bool) -> Self {
        self.italic = on;
        self
    }

    pub fn code(mut self, on: bool) -> Self {
        self.code = on;
        self
    }
}

/// A child of a node: either a nested block or a text leaf.
///
/// On the wire the two are told apart by shape alone, a `type` and
/// `children` pair for blocks and a `text` field for leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Child {
    Block(Node),
    Text(TextRun),
}

impl Child {
    pub fn is_block(&self) -> bool {
        matches!(self, Child::Block(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Child::Text(_))
    }

    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Child::Text(run) => Some(run),
            Child::Block(_) => None,
        }
    }
}

impl From<TextRun> for Child {
    fn from(run: TextRun) -> Self {
        Child::Text(run)
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Block(node)
    }
}

/// Block-level unit of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub children: Vec<Child>,
    /// Only meaningful for headings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u8>,
    /// Only meaningful for lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered: Option<bool>,
}

impl Node {
    pub fn new(kind: NodeKind, children: Vec<Child>) -> Self {
        Self {
            kind,
            children,
            depth: None,
            ordered: None,
        }
    }

    /// Node holding a single text run, the shape the parser produces.
    pub fn with_text(kind: NodeKind, run: TextRun) -> Self {
        Self::new(kind, vec![Child::Text(run)])
    }

    /// First child, if it is a text run.
    pub fn first_text(&self) -> Option<&TextRun> {
        self.children.first().and_then(Child::as_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flags_are_independent() {
        let run = TextRun::plain("x").bold(true).italic(true);
        let copy = run.clone();
        assert!(copy.bold);
        assert!(copy.italic);
        assert!(!copy.code);

        let node = Node::with_text(NodeKind::Paragraph, run);
        let moved: Vec<Node> = vec![node].into_iter().collect();
        assert_eq!(moved[0].first_text(), Some(&copy));
    }

    #[test]
    fn false_flags_are_omitted_on_the_wire() {
        let run = TextRun::plain("hi").italic(true);
        assert_eq!(
            serde_json::to_value(&run).unwrap(),
            json!({"text": "hi", "italic": true})
        );
    }

    #[test]
    fn wire_shape_matches_editor_nodes() {
        let node = Node::with_text(NodeKind::ListItem, TextRun::plain("a"));
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"type": "listItem", "children": [{"text": "a"}]})
        );
    }

    #[test]
    fn children_are_told_apart_by_shape() {
        let node: Node = serde_json::from_value(json!({
            "type": "list",
            "ordered": true,
            "children": [
                {"type": "listItem", "children": [{"text": "one"}]},
                {"text": "tail", "bold": true}
            ]
        }))
        .unwrap();

        assert_eq!(node.ordered, Some(true));
        assert!(node.children[0].is_block());
        assert!(node.children[1].is_leaf());
        assert_eq!(node.first_text(), None);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result: Result<Node, _> = serde_json::from_value(json!({
            "type": "table",
            "children": [{"text": "x"}]
        }));
        assert!(result.is_err());

        let result: Result<Child, _> = serde_json::from_value(json!({
            "type": "table",
            "text": "x"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn markers_cover_line_kinds_only() {
        let marked: Vec<NodeKind> = NodeKind::ALL
            .into_iter()
            .filter(|kind| !kind.marker().is_empty())
            .collect();
        assert_eq!(
            marked,
            vec![
                NodeKind::Heading1,
                NodeKind::Heading2,
                NodeKind::Heading3,
                NodeKind::Blockquote,
                NodeKind::Code
            ]
        );
    }

    #[test]
    fn display_matches_wire_name() {
        for kind in NodeKind::ALL {
            let wire = serde_json::to_value(kind).unwrap();
            assert_eq!(wire, json!(kind.to_string()));
        }
    }
}
