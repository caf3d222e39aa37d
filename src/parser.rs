use tracing::debug;

use crate::model::{Node, NodeKind, TextRun};

/// Line prefixes in the order they are tried. The first match wins and
/// every prefix is checked against the untrimmed line.
const LINE_RULES: [(&str, NodeKind); 5] = [
    ("# ", NodeKind::Heading1),
    ("## ", NodeKind::Heading2),
    ("### ", NodeKind::Heading3),
    ("> ", NodeKind::Blockquote),
    ("```", NodeKind::Code),
];

/// Parse text into a list of nodes, one per non-blank line.
///
/// Never fails: lines that match no rule become paragraphs, blank lines
/// produce nothing.
pub fn parse(text: &str) -> Vec<Node> {
    let nodes: Vec<Node> = text.split('\n').filter_map(parse_line).collect();
    debug!(nodes = nodes.len(), "parsed document");
    nodes
}

fn parse_line(line: &str) -> Option<Node> {
    for (prefix, kind) in LINE_RULES {
        if let Some(rest) = line.strip_prefix(prefix) {
            let run = TextRun::plain(trim(rest)).code(kind == NodeKind::Code);
            return Some(Node::with_text(kind, run));
        }
    }

    // Paragraph fallback
    let trimmed = trim(line);
    if trimmed.is_empty() {
        return None;
    }
    Some(Node::with_text(NodeKind::Paragraph, TextRun::plain(trimmed)))
}

/// Trim whitespace and byte order marks, which editors leave at the start
/// of a file.
fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}
