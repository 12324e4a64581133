use aires_core::{Msg, SelectedFile, TAB_ORIGINAL, TAB_REWRITTEN, TAB_SIDE_BY_SIDE};
use thiserror::Error;

pub const HELP: &[&str] = &[
    "open <path>        validate and upload a resume",
    "rewrite            rewrite the resume with AI",
    "feedback <text>    set feedback for the next revision",
    "revise             request a revision using the feedback",
    "tab <name>         side-by-side | original | rewritten",
    "download           save improved_resume.pdf",
    "toasts             show or hide notifications",
    "help               show this list",
    "quit               exit",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Msg),
    ToggleToasts,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("unknown tab '{0}' (side-by-side, original, rewritten)")]
    UnknownTab(String),
    #[error("'{0}' takes no arguments")]
    UnexpectedArgument(&'static str),
}

/// Parses one input line. Blank lines map to [`Msg::NoOp`].
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => Command::Dispatch(Msg::NoOp),
        "open" | "o" => {
            let file = (!rest.is_empty()).then(|| SelectedFile::new(unquote(rest)));
            Command::Dispatch(Msg::FileSelected(file))
        }
        "rewrite" | "r" => no_args("rewrite", rest, Msg::RewriteRequested)?,
        // Feedback keeps its inner spacing; only the separator is dropped.
        "feedback" | "f" => Command::Dispatch(Msg::FeedbackChanged(rest.to_string())),
        "revise" => no_args("revise", rest, Msg::RevisionRequested)?,
        "download" | "d" => no_args("download", rest, Msg::DownloadRequested)?,
        "tab" | "t" => Command::Dispatch(Msg::PreviewTabSelected(tab_key(rest)?.to_string())),
        "toasts" => Command::ToggleToasts,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(command)
}

fn no_args(name: &'static str, rest: &str, msg: Msg) -> Result<Command, CommandError> {
    if rest.is_empty() {
        Ok(Command::Dispatch(msg))
    } else {
        Err(CommandError::UnexpectedArgument(name))
    }
}

fn tab_key(name: &str) -> Result<&'static str, CommandError> {
    match name.to_ascii_lowercase().as_str() {
        "side-by-side" | "side" | "both" => Ok(TAB_SIDE_BY_SIDE),
        "original" => Ok(TAB_ORIGINAL),
        "rewritten" | "rewrite" => Ok(TAB_REWRITTEN),
        _ => Err(CommandError::UnknownTab(name.to_string())),
    }
}

fn unquote(path: &str) -> &str {
    let quoted = path.len() >= 2
        && ((path.starts_with('"') && path.ends_with('"'))
            || (path.starts_with('\'') && path.ends_with('\'')));
    if quoted {
        &path[1..path.len() - 1]
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn open_accepts_paths_with_spaces_and_quotes() {
        assert_eq!(
            parse_command("open \"My Resume.pdf\"").unwrap(),
            Command::Dispatch(Msg::FileSelected(Some(SelectedFile::new("My Resume.pdf"))))
        );
        assert_eq!(
            parse_command("open /tmp/cv final.pdf").unwrap(),
            Command::Dispatch(Msg::FileSelected(Some(SelectedFile::new(
                "/tmp/cv final.pdf"
            ))))
        );
    }

    #[test]
    fn open_without_path_selects_nothing() {
        assert_eq!(
            parse_command("open").unwrap(),
            Command::Dispatch(Msg::FileSelected(None))
        );
    }

    #[test]
    fn feedback_keeps_text_verbatim() {
        assert_eq!(
            parse_command("feedback Emphasize  leadership").unwrap(),
            Command::Dispatch(Msg::FeedbackChanged("Emphasize  leadership".to_string()))
        );
        assert_eq!(
            parse_command("feedback").unwrap(),
            Command::Dispatch(Msg::FeedbackChanged(String::new()))
        );
    }

    #[test]
    fn tab_names_map_to_keys() {
        assert_eq!(
            parse_command("tab Original").unwrap(),
            Command::Dispatch(Msg::PreviewTabSelected(TAB_ORIGINAL.to_string()))
        );
        assert_eq!(
            parse_command("t side").unwrap(),
            Command::Dispatch(Msg::PreviewTabSelected(TAB_SIDE_BY_SIDE.to_string()))
        );
        assert_eq!(
            parse_command("tab sideways"),
            Err(CommandError::UnknownTab("sideways".to_string()))
        );
    }

    #[test]
    fn simple_commands() {
        assert_eq!(
            parse_command("  rewrite ").unwrap(),
            Command::Dispatch(Msg::RewriteRequested)
        );
        assert_eq!(
            parse_command("download").unwrap(),
            Command::Dispatch(Msg::DownloadRequested)
        );
        assert_eq!(parse_command("").unwrap(), Command::Dispatch(Msg::NoOp));
        assert_eq!(parse_command("toasts").unwrap(), Command::ToggleToasts);
        assert_eq!(parse_command("QUIT").unwrap(), Command::Quit);
        assert_eq!(
            parse_command("rewrite now"),
            Err(CommandError::UnexpectedArgument("rewrite"))
        );
        assert_eq!(
            parse_command("upload x"),
            Err(CommandError::Unknown("upload".to_string()))
        );
    }
}
