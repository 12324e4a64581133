//! Line-oriented renderer for the small markdown dialect the rewrite service
//! produces.
//!
//! Each input line maps to exactly one [`Node`]; there is no block nesting, so
//! consecutive list items stay separate nodes and emphasis is single-level.

const BOLD_MARKER: &str = "**";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Plain(String),
    Bold(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: HeadingLevel, text: String },
    ListItem(String),
    Divider,
    Spacer,
    Paragraph(Vec<Inline>),
}

/// One rendered line. `key` is the zero-based line index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub key: usize,
    pub block: Block,
}

/// Render `content` line by line. Empty content yields `None`.
pub fn render_markdown(content: &str) -> Option<Vec<Node>> {
    if content.is_empty() {
        return None;
    }
    Some(
        content
            .split('\n')
            .enumerate()
            .map(|(index, line)| classify_line(index, line))
            .collect(),
    )
}

/// Classify a single line. Prefix rules are checked in a fixed order and the
/// first match wins.
pub fn classify_line(index: usize, line: &str) -> Node {
    let block = if let Some(text) = line.strip_prefix("# ") {
        Block::Heading {
            level: HeadingLevel::H1,
            text: text.to_string(),
        }
    } else if let Some(text) = line.strip_prefix("## ") {
        Block::Heading {
            level: HeadingLevel::H2,
            text: text.to_string(),
        }
    } else if let Some(text) = line.strip_prefix("### ") {
        Block::Heading {
            level: HeadingLevel::H3,
            text: text.to_string(),
        }
    } else if let Some(text) = line
        .strip_prefix("* ")
        .or_else(|| line.strip_prefix("- "))
    {
        Block::ListItem(text.to_string())
    } else if line.starts_with("---") {
        Block::Divider
    } else if line.trim().is_empty() {
        Block::Spacer
    } else if line.contains(BOLD_MARKER) {
        Block::Paragraph(split_bold(line))
    } else {
        Block::Paragraph(vec![Inline::Plain(line.to_string())])
    };

    Node { key: index, block }
}

/// Split on paired `**` markers. An opening marker without a partner stays in
/// the surrounding plain text.
fn split_bold(line: &str) -> Vec<Inline> {
    let mut runs = Vec::new();
    let mut rest = line;
    while let Some(open) = rest.find(BOLD_MARKER) {
        let after_open = &rest[open + BOLD_MARKER.len()..];
        let Some(close) = after_open.find(BOLD_MARKER) else {
            break;
        };
        push_plain(&mut runs, &rest[..open]);
        runs.push(Inline::Bold(after_open[..close].to_string()));
        rest = &after_open[close + BOLD_MARKER.len()..];
    }
    push_plain(&mut runs, rest);
    runs
}

fn push_plain(runs: &mut Vec<Inline>, text: &str) {
    if !text.is_empty() {
        runs.push(Inline::Plain(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_line, split_bold, Block, HeadingLevel, Inline};

    fn plain(text: &str) -> Inline {
        Inline::Plain(text.to_string())
    }

    fn bold(text: &str) -> Inline {
        Inline::Bold(text.to_string())
    }

    #[test]
    fn heading_prefixes_are_exclusive() {
        assert_eq!(
            classify_line(0, "## Title").block,
            Block::Heading {
                level: HeadingLevel::H2,
                text: "Title".to_string()
            }
        );
        assert_eq!(
            classify_line(0, "### Deep").block,
            Block::Heading {
                level: HeadingLevel::H3,
                text: "Deep".to_string()
            }
        );
    }

    #[test]
    fn hash_without_space_is_a_paragraph() {
        assert_eq!(
            classify_line(3, "#hashtag").block,
            Block::Paragraph(vec![plain("#hashtag")])
        );
        assert_eq!(
            classify_line(3, "####  four").block,
            Block::Paragraph(vec![plain("####  four")])
        );
    }

    #[test]
    fn list_prefix_wins_over_bold() {
        assert_eq!(
            classify_line(0, "* **Lead** engineer").block,
            Block::ListItem("**Lead** engineer".to_string())
        );
        assert_eq!(
            classify_line(0, "- item").block,
            Block::ListItem("item".to_string())
        );
    }

    #[test]
    fn divider_ignores_remainder() {
        assert_eq!(classify_line(0, "---").block, Block::Divider);
        assert_eq!(classify_line(0, "------ trailing").block, Block::Divider);
    }

    #[test]
    fn whitespace_only_line_is_spacer() {
        assert_eq!(classify_line(0, "").block, Block::Spacer);
        assert_eq!(classify_line(0, " \t ").block, Block::Spacer);
    }

    #[test]
    fn bold_runs_keep_order() {
        assert_eq!(
            split_bold("**bold** and plain"),
            vec![bold("bold"), plain(" and plain")]
        );
        assert_eq!(
            split_bold("a **b** c **d**"),
            vec![plain("a "), bold("b"), plain(" c "), bold("d")]
        );
    }

    #[test]
    fn unterminated_marker_stays_plain() {
        assert_eq!(split_bold("**"), vec![plain("**")]);
        assert_eq!(
            split_bold("**done** and **open"),
            vec![bold("done"), plain(" and **open")]
        );
    }

    #[test]
    fn four_stars_is_an_empty_bold_run() {
        assert_eq!(split_bold("****"), vec![bold("")]);
    }

    #[test]
    fn unsupported_syntax_falls_through_verbatim() {
        let line = "[link](https://example.com) `code` 1. item";
        assert_eq!(
            classify_line(0, line).block,
            Block::Paragraph(vec![plain(line)])
        );
    }
}
