use aires_core::markdown::{Block, HeadingLevel, Inline, Node};
use aires_core::{AppViewModel, PreviewPanel, RewriteView, UploadView};
use aires_engine::{Toast, ToastStatus};

use crate::commands::HELP;

const RULE_WIDTH: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Title,
    Heading,
    Bold,
    Muted,
    Accent,
    Success,
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

impl Span {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledLine {
    pub spans: Vec<Span>,
}

impl StyledLine {
    fn single(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            spans: vec![Span::new(text, tone)],
        }
    }

    fn blank() -> Self {
        Self::default()
    }

    /// Concatenated text without styling.
    pub fn plain(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

/// Everything drawn in one frame besides the view model itself.
#[derive(Debug, Clone, Default)]
pub struct Overlay<'a> {
    pub toasts: &'a [Toast],
    pub show_toasts: bool,
    pub show_help: bool,
    pub status: Option<&'a str>,
}

pub fn render(view: &AppViewModel, overlay: &Overlay<'_>) -> Vec<StyledLine> {
    let mut lines = vec![
        StyledLine::single("AIRES: AI-Powered Resume Enhancement", Tone::Title),
        StyledLine::single("-".repeat(RULE_WIDTH), Tone::Muted),
    ];

    render_upload(&view.upload, &mut lines);
    if let Some(rewrite) = &view.rewrite {
        lines.push(StyledLine::blank());
        render_rewrite(rewrite, &mut lines);
    }

    if overlay.show_toasts && !overlay.toasts.is_empty() {
        lines.push(StyledLine::blank());
        for toast in overlay.toasts {
            lines.push(render_toast(toast));
        }
    }

    if overlay.show_help {
        lines.push(StyledLine::blank());
        lines.extend(HELP.iter().map(|entry| StyledLine::single(*entry, Tone::Muted)));
    }

    if let Some(status) = overlay.status {
        lines.push(StyledLine::blank());
        lines.push(StyledLine::single(status, Tone::Warning));
    }
    lines
}

fn render_upload(upload: &UploadView, lines: &mut Vec<StyledLine>) {
    lines.push(StyledLine::single(upload.prompt.as_str(), Tone::Normal));
    if let Some(name) = &upload.file_name {
        lines.push(StyledLine {
            spans: vec![
                Span::new("File: ", Tone::Muted),
                Span::new(name.as_str(), Tone::Accent),
            ],
        });
    }
    if upload.validating {
        lines.push(StyledLine::single("Validating...", Tone::Muted));
    }
    if let Some(banner) = &upload.banner {
        let tone = if banner.positive {
            Tone::Success
        } else {
            Tone::Error
        };
        let mut spans = vec![Span::new(banner.text.as_str(), tone)];
        if let Some(label) = &banner.top_label {
            spans.push(Span::new(format!(" [{label}]"), Tone::Muted));
        }
        lines.push(StyledLine { spans });
    }
    if let Some(error) = &upload.error {
        lines.push(StyledLine::single(error.as_str(), Tone::Error));
    }
}

fn render_rewrite(view: &RewriteView, lines: &mut Vec<StyledLine>) {
    lines.push(StyledLine::single(
        format!("Resume #{}", view.resume_id),
        Tone::Heading,
    ));
    if !view.has_rewrite {
        lines.push(button(&view.rewrite_label, "rewrite", view.rewrite_enabled));
    } else {
        lines.push(StyledLine {
            spans: view
                .tabs
                .iter()
                .flat_map(|tab| {
                    let (text, tone) = if tab.active {
                        (format!("[{}]", tab.label), Tone::Accent)
                    } else {
                        (format!(" {} ", tab.label), Tone::Muted)
                    };
                    [Span::new(text, tone), Span::new(" ", Tone::Normal)]
                })
                .collect(),
        });

        for panel in &view.visible_panels {
            lines.push(StyledLine::blank());
            match panel {
                PreviewPanel::Original => {
                    lines.push(StyledLine::single("Original", Tone::Heading));
                    lines.extend(
                        view.original
                            .lines()
                            .map(|line| StyledLine::single(line, Tone::Normal)),
                    );
                }
                PreviewPanel::Rewritten => {
                    lines.push(StyledLine::single("Rewritten", Tone::Heading));
                    if let Some(nodes) = &view.rendered {
                        lines.extend(nodes.iter().map(render_node));
                    }
                }
            }
        }

        lines.push(StyledLine::blank());
        let feedback = if view.feedback.is_empty() {
            Span::new("(none, use `feedback <text>`)", Tone::Muted)
        } else {
            Span::new(view.feedback.as_str(), Tone::Normal)
        };
        lines.push(StyledLine {
            spans: vec![Span::new("Feedback: ", Tone::Bold), feedback],
        });
        lines.push(button(&view.revision_label, "revise", view.revision_enabled));
        lines.push(button(&view.download_label, "download", view.download_enabled));
        if let Some(path) = &view.last_download {
            lines.push(StyledLine::single(
                format!("Saved to {}", path.display()),
                Tone::Success,
            ));
        }
    }

    if let Some(error) = &view.error {
        lines.push(StyledLine::single(error.as_str(), Tone::Error));
    }
}

fn button(label: &str, command: &str, enabled: bool) -> StyledLine {
    if enabled {
        StyledLine {
            spans: vec![
                Span::new(format!("[{label}]"), Tone::Accent),
                Span::new(format!(" `{command}`"), Tone::Muted),
            ],
        }
    } else {
        StyledLine::single(format!("[{label}]"), Tone::Muted)
    }
}

pub fn render_node(node: &Node) -> StyledLine {
    match &node.block {
        Block::Heading { level, text } => {
            let text = match level {
                HeadingLevel::H1 => text.to_uppercase(),
                HeadingLevel::H2 | HeadingLevel::H3 => text.clone(),
            };
            let tone = match level {
                HeadingLevel::H3 => Tone::Bold,
                _ => Tone::Heading,
            };
            StyledLine::single(text, tone)
        }
        Block::ListItem(text) => StyledLine {
            spans: vec![
                Span::new("  \u{2022} ", Tone::Accent),
                Span::new(text.as_str(), Tone::Normal),
            ],
        },
        Block::Divider => StyledLine::single("\u{2500}".repeat(RULE_WIDTH), Tone::Muted),
        Block::Spacer => StyledLine::blank(),
        Block::Paragraph(inlines) => StyledLine {
            spans: inlines
                .iter()
                .map(|inline| match inline {
                    Inline::Plain(text) => Span::new(text.as_str(), Tone::Normal),
                    Inline::Bold(text) => Span::new(text.as_str(), Tone::Bold),
                })
                .collect(),
        },
    }
}

fn render_toast(toast: &Toast) -> StyledLine {
    let tone = match toast.status {
        ToastStatus::Default => Tone::Accent,
        ToastStatus::Success => Tone::Success,
        ToastStatus::Error => Tone::Error,
        ToastStatus::Warning => Tone::Warning,
    };
    let mut spans = vec![Span::new(format!("\u{25cf} {}", toast.title), tone)];
    if !toast.description.is_empty() {
        spans.push(Span::new(format!(": {}", toast.description), Tone::Normal));
    }
    StyledLine { spans }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aires_core::markdown::render_markdown;
    use aires_core::{update, AppState, Msg, UploadedResume, TAB_ORIGINAL};
    use aires_engine::ToastId;
    use pretty_assertions::assert_eq;

    fn opened() -> AppState {
        AppState::with_resume(UploadedResume {
            id: 3,
            original_text: "Jane Doe\nEngineer".to_string(),
        })
    }

    fn with_rewrite(content: &str) -> AppState {
        let (state, effects) = update(opened(), Msg::RewriteRequested);
        let request_id = match effects.as_slice() {
            [aires_core::Effect::RewriteResume { request_id, .. }] => *request_id,
            other => panic!("unexpected effects {other:?}"),
        };
        let (state, _) = update(
            state,
            Msg::RewriteFinished {
                request_id,
                result: Ok(content.to_string()),
            },
        );
        state
    }

    fn text(lines: &[StyledLine]) -> Vec<String> {
        lines.iter().map(StyledLine::plain).collect()
    }

    #[test]
    fn markdown_nodes_become_styled_lines() {
        let nodes = render_markdown("# Jane\n* Rust\n---\n \n**Lead** engineer").unwrap();
        let lines: Vec<_> = nodes.iter().map(render_node).collect();

        assert_eq!(lines[0], StyledLine::single("JANE", Tone::Heading));
        assert_eq!(lines[1].plain(), "  \u{2022} Rust");
        assert_eq!(lines[2].spans[0].tone, Tone::Muted);
        assert_eq!(lines[3], StyledLine::blank());
        assert_eq!(
            lines[4].spans,
            vec![
                Span::new("Lead", Tone::Bold),
                Span::new(" engineer", Tone::Normal)
            ]
        );
    }

    #[test]
    fn fresh_session_only_offers_rewrite() {
        let lines = render(&opened().view(), &Overlay::default());
        let text = text(&lines);

        assert!(text.iter().any(|l| l.starts_with("[Rewrite Resume with AI]")));
        assert!(!text.iter().any(|l| l.contains("Download PDF")));
        assert!(!text.iter().any(|l| l == "Original"));
    }

    #[test]
    fn side_by_side_shows_both_panels() {
        let lines = render(&with_rewrite("## Summary").view(), &Overlay::default());
        let text = text(&lines);

        let original = text.iter().position(|l| l == "Original").unwrap();
        let rewritten = text.iter().position(|l| l == "Rewritten").unwrap();
        assert!(original < rewritten);
        assert_eq!(text[rewritten + 1], "Summary");
        assert!(text.iter().any(|l| l.contains("[Side by Side]")));
        assert!(text.iter().any(|l| l == "[Request Revision]"));
        assert!(text.iter().any(|l| l.starts_with("[Download PDF] `download`")));
        assert!(!text.iter().any(|l| l.contains("Rewrite Resume with AI")));
    }

    #[test]
    fn original_tab_hides_rewritten_panel() {
        let (state, _) = update(
            with_rewrite("# Draft"),
            Msg::PreviewTabSelected(TAB_ORIGINAL.to_string()),
        );
        let text = text(&render(&state.view(), &Overlay::default()));
        assert!(text.iter().any(|l| l == "Original"));
        assert!(!text.iter().any(|l| l == "Rewritten"));
    }

    #[test]
    fn toasts_render_only_when_shown() {
        let toast = Toast {
            id: ToastId::new(),
            title: "Download complete".to_string(),
            description: "Your improved resume has been downloaded".to_string(),
            status: ToastStatus::Success,
            duration: aires_engine::DEFAULT_DURATION,
        };
        let toasts = [toast];
        let view = AppState::new().view();

        let hidden = render(
            &view,
            &Overlay {
                toasts: &toasts,
                show_toasts: false,
                ..Overlay::default()
            },
        );
        assert!(!text(&hidden).iter().any(|l| l.contains("Download complete")));

        let shown = render(
            &view,
            &Overlay {
                toasts: &toasts,
                show_toasts: true,
                status: Some("unknown command 'x' (type 'help')"),
                ..Overlay::default()
            },
        );
        let last_toast = shown
            .iter()
            .find(|line| line.plain().contains("Download complete"))
            .unwrap();
        assert_eq!(last_toast.spans[0].tone, Tone::Success);
        assert_eq!(
            shown.last().unwrap().plain(),
            "unknown command 'x' (type 'help')"
        );
    }
}
