//! Splitting an option file into records.

use tracing::trace;

/// The marker that starts a comment line.
const COMMENT_MARKER: char = ';';

/// A single option definition: its name and unparsed attribute line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionRecord {
    /// The option name (e.g. `Wunused-variable`).
    pub name: String,
    /// The attribute line that follows the name.
    pub attributes: String,
}

impl OptionRecord {
    /// Creates a new option record.
    pub fn new(name: impl Into<String>, attributes: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: attributes.into(),
        }
    }
}

/// The state of the block extractor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Inside the comment header of the file.
    Comment,
    /// Between blocks.
    Newline,
    /// An option name was read; the next line holds its attributes.
    OptionName,
    /// Inside the free-text description of an option.
    OptionDescription,
}

/// Splits the contents of an option file into [`OptionRecord`]s.
///
/// Records whose name is in `boring` (pure declarations such as `Variable` or
/// `Enum`) still consume their attribute line but are not returned. An option
/// name at the very end of the input without an attribute line is dropped.
pub fn option_records(source: &str, boring: &[String]) -> Vec<OptionRecord> {
    let mut records = Vec::new();
    let mut state = State::Comment;
    let mut pending: Option<&str> = None;

    for line in source.lines() {
        let blank = line.trim().is_empty();
        state = match state {
            State::Comment if line.starts_with(COMMENT_MARKER) => State::Comment,
            State::Comment | State::Newline if blank => State::Newline,
            State::Newline if line.starts_with(COMMENT_MARKER) => State::Comment,
            State::Comment | State::Newline => {
                pending = Some(line);
                State::OptionName
            }
            State::OptionName if blank => {
                if let Some(name) = pending.take() {
                    trace!("dropping option `{name}` without attributes");
                }
                State::Newline
            }
            State::OptionName => {
                if let Some(name) = pending.take() {
                    if boring.iter().any(|b| b == name) {
                        trace!("skipping declaration `{name}`");
                    } else {
                        records.push(OptionRecord::new(name, line));
                    }
                }
                State::OptionDescription
            }
            State::OptionDescription if blank => State::Newline,
            State::OptionDescription => State::OptionDescription,
        };
    }

    if let Some(name) = pending {
        trace!("dropping truncated option `{name}` at end of input");
    }

    records
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn boring() -> Vec<String> {
        ["Variable", "Enum", "EnumValue"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn it_extracts_records_after_the_header() {
        let source = "\
; Options for the C family.
; Copyright notice.

Language
C

Wall
C C++ Warning
Enable most warning messages.

Wunused-variable
Common Var(warn_unused_variable) Warning EnabledBy(Wunused)
Warn when a variable is unused.
It may span lines.
";
        let records = option_records(source, &boring());
        assert_eq!(
            records,
            vec![
                OptionRecord::new("Language", "C"),
                OptionRecord::new("Wall", "C C++ Warning"),
                OptionRecord::new(
                    "Wunused-variable",
                    "Common Var(warn_unused_variable) Warning EnabledBy(Wunused)"
                ),
            ]
        );
    }

    #[test]
    fn it_skips_boring_declarations_but_stays_in_sync() {
        let source = "\
; header

Variable
int warn_foo

Enum
Name(foo) Type(int)

Wfoo
C Warning
";
        let records = option_records(source, &boring());
        assert_eq!(records, vec![OptionRecord::new("Wfoo", "C Warning")]);
    }

    #[test]
    fn it_returns_to_the_comment_state_between_blocks() {
        let source = "\
Wfoo
C Warning

; a comment between blocks
; that spans lines

Wbar
C Warning EnabledBy(Wfoo)
";
        let records = option_records(source, &boring());
        assert_eq!(
            records,
            vec![
                OptionRecord::new("Wfoo", "C Warning"),
                OptionRecord::new("Wbar", "C Warning EnabledBy(Wfoo)"),
            ]
        );
    }

    #[test]
    fn it_drops_a_truncated_trailing_block() {
        let source = "; header\n\nWfoo\nC Warning\n\nWbar";
        let records = option_records(source, &boring());
        assert_eq!(records, vec![OptionRecord::new("Wfoo", "C Warning")]);
    }

    #[test]
    fn it_drops_a_name_followed_by_a_blank_line() {
        let source = "; header\n\nWorphan\n\nWfoo\nC Warning\n";
        let records = option_records(source, &boring());
        assert_eq!(records, vec![OptionRecord::new("Wfoo", "C Warning")]);
    }

    #[test]
    fn it_handles_empty_input() {
        assert!(option_records("", &boring()).is_empty());
        assert!(option_records("; only a comment\n", &boring()).is_empty());
    }
}
