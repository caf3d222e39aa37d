use plate::{Child, Node, NodeKind, TextRun, normalize, parse, serialize};

const DOCUMENT: &str = "\
# Release notes

Some intro text.
## Fixes
### Parser
> Headings keep their level.
```rust
let nodes = plate::parse(text);
```

  trailing paragraph with spaces   
";

#[test]
fn stable_after_normalizing() {
    let first = parse(DOCUMENT);
    let text = serialize(&first).unwrap();
    assert_eq!(parse(&text), first);
    assert_eq!(normalize(&text).unwrap(), text);
}

#[test]
fn normalized_text_drops_blank_lines_and_padding() {
    assert_eq!(
        normalize(DOCUMENT).unwrap(),
        "# Release notes\n\
         Some intro text.\n\
         ## Fixes\n\
         ### Parser\n\
         > Headings keep their level.\n\
         ```rust\n\
         let nodes = plate::parse(text);\n\
         ```\n\
         trailing paragraph with spaces"
    );
}

#[test]
fn kinds_in_source_order() {
    let kinds: Vec<NodeKind> = parse(DOCUMENT).iter().map(|node| node.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Heading1,
            NodeKind::Paragraph,
            NodeKind::Heading2,
            NodeKind::Heading3,
            NodeKind::Blockquote,
            NodeKind::Code,
            NodeKind::Paragraph,
            NodeKind::Code,
            NodeKind::Paragraph,
        ]
    );
}

#[test]
fn styled_runs_survive_an_edit_cycle() {
    let mut nodes = parse("plain");
    let styled = TextRun::plain("styled").bold(true).italic(true);
    nodes = nodes
        .into_iter()
        .map(|node| Node::new(node.kind, vec![Child::Text(styled.clone())]))
        .collect();

    let json = plate::nodes_to_json(&nodes).unwrap();
    let back = plate::nodes_from_json(&json).unwrap();
    let run = back[0].first_text().unwrap();
    assert!(run.bold && run.italic && !run.code);
    assert_eq!(serialize(&back).unwrap(), "styled");
}

#[test]
fn node_json_from_the_editor() {
    let json = r#"[
        {"type": "heading2", "children": [{"text": "Plan"}], "depth": 2},
        {"type": "blockquote", "children": [{"text": "note", "italic": true}]},
        {"type": "code", "children": [{"text": "sh", "code": true}]}
    ]"#;
    let nodes = plate::nodes_from_json(json).unwrap();
    assert_eq!(nodes[0].depth, Some(2));
    assert_eq!(serialize(&nodes).unwrap(), "## Plan\n> note\n```sh");
}

#[test]
fn node_json_with_unknown_kind_is_rejected() {
    let json = r#"[{"type": "table", "children": [{"text": "x"}]}]"#;
    let err = plate::nodes_from_json(json).unwrap_err();
    assert!(matches!(err, plate::Error::Nodes(_)));
}
