use crate::error::{InvalidNodeReason, SerializeError};
use crate::model::{Child, Node};

/// Knobs for [`serialize_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Concatenate every leading text run of a node instead of writing only
    /// the first one. Off by default, which drops the extra runs.
    pub join_runs: bool,
}

/// Convert nodes back to text, one line per node.
pub fn serialize(nodes: &[Node]) -> Result<String, SerializeError> {
    serialize_with(nodes, &SerializeOptions::default())
}

/// Convert nodes back to text with explicit options.
///
/// Fails on the first node whose first child is missing or is not a text
/// run.
pub fn serialize_with(
    nodes: &[Node],
    options: &SerializeOptions,
) -> Result<String, SerializeError> {
    let lines = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| serialize_node(index, node, options))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

fn serialize_node(
    index: usize,
    node: &Node,
    options: &SerializeOptions,
) -> Result<String, SerializeError> {
    let first = match node.children.first() {
        Some(Child::Text(run)) => run,
        Some(Child::Block(_)) => {
            return Err(SerializeError::InvalidNode {
                index,
                kind: node.kind,
                reason: InvalidNodeReason::FirstChildNotText,
            });
        }
        None => {
            return Err(SerializeError::InvalidNode {
                index,
                kind: node.kind,
                reason: InvalidNodeReason::NoChildren,
            });
        }
    };

    let mut line = String::from(node.kind.marker());
    if options.join_runs {
        for run in node.children.iter().map_while(Child::as_text) {
            line.push_str(&run.text);
        }
    } else {
        line.push_str(&first.text);
    }
    Ok(line)
}
