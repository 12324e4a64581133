use std::io::{self, IsTerminal, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, ContentStyle, Print, PrintStyledContent, StyledContent};
use crossterm::terminal::{Clear, ClearType};

use super::render::{StyledLine, Tone};

const PROMPT: &str = "> ";

/// Repaints the whole frame on every draw. When stdout is not a terminal the
/// frames are appended without clearing.
pub struct Terminal {
    out: Stdout,
    interactive: bool,
}

impl Terminal {
    pub fn new() -> Self {
        let out = io::stdout();
        let interactive = out.is_terminal();
        Self { out, interactive }
    }

    pub fn draw(&mut self, lines: &[StyledLine]) -> io::Result<()> {
        if self.interactive {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        for line in lines {
            for span in &line.spans {
                queue!(
                    self.out,
                    PrintStyledContent(StyledContent::new(tone_style(span.tone), span.text.as_str()))
                )?;
            }
            queue!(self.out, Print("\r\n"))?;
        }
        queue!(self.out, Print(PROMPT))?;
        self.out.flush()
    }
}

fn tone_style(tone: Tone) -> ContentStyle {
    let mut style = ContentStyle::new();
    match tone {
        Tone::Normal => {}
        Tone::Title => {
            style.foreground_color = Some(Color::Cyan);
            style.attributes.set(Attribute::Bold);
        }
        Tone::Heading => {
            style.attributes.set(Attribute::Bold);
            style.attributes.set(Attribute::Underlined);
        }
        Tone::Bold => style.attributes.set(Attribute::Bold),
        Tone::Muted => style.foreground_color = Some(Color::DarkGrey),
        Tone::Accent => style.foreground_color = Some(Color::Blue),
        Tone::Success => style.foreground_color = Some(Color::Green),
        Tone::Error => style.foreground_color = Some(Color::Red),
        Tone::Warning => style.foreground_color = Some(Color::Yellow),
    }
    style
}
