//! Chat input parsing.
//!
//! Every line typed into the session is either a slash command or a plain
//! message to submit.  [`Command::parse`] never fails: malformed commands
//! become [`Command::Invalid`] carrying a message for the user.

use crate::store::MessageId;

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text to append and annotate.
    Submit(String),
    /// `/translate <n> [lang]`; `target` is `None` when no language was given.
    Translate { id: MessageId, target: Option<String> },
    /// `/summarize <n>`
    Summarize(MessageId),
    /// `/reset-summary <n>`
    ResetSummary(MessageId),
    /// `/list`
    List,
    /// `/langs`
    Languages,
    /// `/help`
    Help,
    /// `/quit` or `/exit`
    Quit,
    /// Blank line.
    Empty,
    /// A slash command that could not be understood.
    Invalid(String),
}

pub const HELP: &str = "\
commands:
  <text>                 submit a message
  /translate <n> [lang]  translate message n (default target from settings)
  /summarize <n>         summarize message n
  /reset-summary <n>     allow message n to be summarized again
  /list                  show every message
  /langs                 show supported translation targets
  /help                  show this help
  /quit                  leave the session";

impl Command {
    /// Parse one input line.
    ///
    /// ```
    /// use text_annotator::command::Command;
    /// use text_annotator::store::MessageId;
    ///
    /// assert_eq!(Command::parse("/summarize 3"), Command::Summarize(MessageId(3)));
    /// assert_eq!(Command::parse("hola"), Command::Submit("hola".into()));
    /// ```
    pub fn parse(line: &str) -> Command {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Submit(line.trim_end_matches(['\r', '\n']).to_string());
        };

        let mut words = rest.split_whitespace();
        let name = words.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        match (name.as_str(), args.as_slice()) {
            ("translate" | "tr", [n]) => with_id(n, |id| Command::Translate { id, target: None }),
            ("translate" | "tr", [n, lang]) => with_id(n, |id| Command::Translate {
                id,
                target: Some(lang.to_ascii_lowercase()),
            }),
            ("translate" | "tr", _) => usage("/translate <n> [lang]"),

            ("summarize" | "sum", [n]) => with_id(n, Command::Summarize),
            ("summarize" | "sum", _) => usage("/summarize <n>"),

            ("reset-summary" | "reset", [n]) => with_id(n, Command::ResetSummary),
            ("reset-summary" | "reset", _) => usage("/reset-summary <n>"),

            ("list" | "ls", []) => Command::List,
            ("langs" | "languages", []) => Command::Languages,
            ("help" | "?", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,

            ("list" | "ls" | "langs" | "languages", _) => {
                Command::Invalid(format!("/{name} takes no arguments"))
            }
            _ => Command::Invalid(format!("unknown command '/{name}' (try /help)")),
        }
    }
}

/// Parse a message number, accepting an optional leading `#`.
pub fn parse_id(s: &str) -> Option<MessageId> {
    s.strip_prefix('#').unwrap_or(s).parse().ok().map(MessageId)
}

fn with_id(s: &str, make: impl FnOnce(MessageId) -> Command) -> Command {
    match parse_id(s) {
        Some(id) => make(id),
        None => Command::Invalid(format!("'{s}' is not a message number")),
    }
}

fn usage(form: &str) -> Command {
    Command::Invalid(format!("usage: {form}"))
}
