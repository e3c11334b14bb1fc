use status_core::{InputField, Msg};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Messages to feed through the state machine, in order.
    Dispatch(Vec<Msg>),
    Help,
    Quit,
    Nothing,
    Unknown(String),
}

/// Turns one line of terminal input into a command.
///
/// `check` and `bulk` go through the input field like a typed-then-submitted
/// form, so the field is reset after submission. Numbers are not validated.
pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Nothing;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "check" | "status" => submit(InputField::Single, rest),
        "bulk" => submit(InputField::Bulk, rest),
        "refresh" | "r" => Command::Dispatch(vec![Msg::RefreshClicked]),
        "dismiss" | "ok" => Command::Dispatch(vec![Msg::NoticeDismissed]),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Unknown(word.to_string()),
    }
}

fn submit(field: InputField, text: &str) -> Command {
    Command::Dispatch(vec![
        Msg::InputChanged {
            field,
            text: text.to_string(),
        },
        Msg::Submitted(field),
    ])
}
