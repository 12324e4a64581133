use aires_core::markdown::{render_markdown, Block, HeadingLevel, Inline, Node};
use pretty_assertions::assert_eq;

#[test]
fn empty_content_renders_nothing() {
    assert_eq!(render_markdown(""), None);
    // A single blank line is content: one spacer node.
    assert_eq!(
        render_markdown(" "),
        Some(vec![Node {
            key: 0,
            block: Block::Spacer
        }])
    );
}

#[test]
fn one_node_per_line_in_order() {
    let content = "# Jane Doe\n## Experience\n### Acme Corp\n* Built things\n- Shipped things\n---\n\n**Skills:** Rust, SQL\nPlain closing line\n";
    let nodes = render_markdown(content).expect("content present");

    assert_eq!(nodes.len(), content.split('\n').count());
    let keys: Vec<usize> = nodes.iter().map(|n| n.key).collect();
    assert_eq!(keys, (0..nodes.len()).collect::<Vec<_>>());

    let blocks: Vec<Block> = nodes.into_iter().map(|n| n.block).collect();
    assert_eq!(
        blocks,
        vec![
            Block::Heading {
                level: HeadingLevel::H1,
                text: "Jane Doe".to_string()
            },
            Block::Heading {
                level: HeadingLevel::H2,
                text: "Experience".to_string()
            },
            Block::Heading {
                level: HeadingLevel::H3,
                text: "Acme Corp".to_string()
            },
            Block::ListItem("Built things".to_string()),
            Block::ListItem("Shipped things".to_string()),
            Block::Divider,
            Block::Spacer,
            Block::Paragraph(vec![
                Inline::Bold("Skills:".to_string()),
                Inline::Plain(" Rust, SQL".to_string()),
            ]),
            Block::Paragraph(vec![Inline::Plain("Plain closing line".to_string())]),
            Block::Spacer,
        ]
    );
}

#[test]
fn bold_then_plain_is_one_paragraph() {
    let nodes = render_markdown("**bold** and plain").unwrap();
    assert_eq!(
        nodes,
        vec![Node {
            key: 0,
            block: Block::Paragraph(vec![
                Inline::Bold("bold".to_string()),
                Inline::Plain(" and plain".to_string()),
            ]),
        }]
    );
}

#[test]
fn rendering_is_idempotent() {
    let content = "# A\n**b** c\n- d";
    assert_eq!(render_markdown(content), render_markdown(content));
}
