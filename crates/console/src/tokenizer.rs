//! Splits a raw input line into a command token and its arguments.

/// A tokenized input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    /// First token of the line, or empty when the line has no tokens.
    pub command: String,
    /// Remaining tokens in their original order, uninterpreted.
    pub args: Vec<String>,
}

impl ParsedInput {
    /// Returns true when the line carried no command at all.
    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }
}

/// Tokenizes `line` on runs of whitespace.
///
/// There is no quoting, escaping or case folding: every token is passed
/// through verbatim and handlers parse their own arguments.
pub fn tokenize(line: &str) -> ParsedInput {
    let mut tokens = line.split_whitespace().map(str::to_string);
    let command = tokens.next().unwrap_or_default();
    ParsedInput {
        command,
        args: tokens.collect(),
    }
}
