use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use aires_core::{update, AppState, Msg, SelectedFile};
use aires_logging::{aires_debug, aires_info};
use anyhow::Context;

use crate::commands::{parse_command, Command};
use crate::config::{Settings, Startup};
use crate::effects::EffectRunner;
use crate::ui::render::{render, Overlay};
use crate::ui::terminal::Terminal;

/// Everything the message loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    Line(String),
    ToastsChanged,
    InputClosed,
}

struct App {
    state: AppState,
    runner: EffectRunner,
    terminal: Terminal,
    show_toasts: bool,
    show_help: bool,
    status: Option<String>,
}

pub fn run(settings: Settings) -> anyhow::Result<()> {
    let state = settings
        .startup
        .initial_state()
        .context("failed to open resume")?;
    let (tx, rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(&settings, tx.clone()).context("failed to start engine")?;

    spawn_input_reader(tx);

    let mut app = App {
        state,
        runner,
        terminal: Terminal::new(),
        show_toasts: true,
        show_help: false,
        status: None,
    };
    if let Startup::Upload(path) = &settings.startup {
        app.dispatch(Msg::FileSelected(Some(SelectedFile::new(path.clone()))));
    }
    app.draw()?;

    let mut input_closed = false;
    while let Ok(event) = rx.recv() {
        let redraw = match event {
            AppEvent::Msg(msg) => app.dispatch(msg),
            AppEvent::Line(line) => match app.handle_line(&line) {
                Some(redraw) => redraw,
                None => break,
            },
            AppEvent::ToastsChanged => app.show_toasts,
            AppEvent::InputClosed => {
                input_closed = true;
                false
            }
        };
        if redraw {
            app.draw()?;
        }
        // Piped input: stay until in-flight calls have reported back.
        if input_closed && !app.state.is_busy() {
            break;
        }
    }

    aires_info!("shutting down");
    Ok(())
}

impl App {
    /// Returns whether the frame needs repainting.
    fn dispatch(&mut self, msg: Msg) -> bool {
        aires_debug!("dispatch {msg:?}");
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
        self.state.consume_dirty()
    }

    /// `None` means quit.
    fn handle_line(&mut self, line: &str) -> Option<bool> {
        self.status = None;
        self.show_help = false;
        match parse_command(line) {
            Ok(Command::Dispatch(msg)) => {
                self.dispatch(msg);
            }
            Ok(Command::ToggleToasts) => self.show_toasts = !self.show_toasts,
            Ok(Command::Help) => self.show_help = true,
            Ok(Command::Quit) => return None,
            Err(err) => self.status = Some(err.to_string()),
        }
        // Input always ends with a fresh prompt.
        Some(true)
    }

    fn draw(&mut self) -> anyhow::Result<()> {
        let toasts = self.runner.toasts().snapshot();
        let view = self.state.view();
        let lines = render(
            &view,
            &Overlay {
                toasts: &toasts,
                show_toasts: self.show_toasts,
                show_help: self.show_help,
                status: self.status.as_deref(),
            },
        );
        self.terminal.draw(&lines).context("failed to draw")
    }
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(AppEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    });
}
