//! Command line parsing

use crate::address::{self, Range};
use crate::{Buffer, ErrorKind};

/// Command letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Letter {
    /// Empty command: print the next line
    Advance,
    /// `n`: print with line numbers
    Number,
    /// `p`: print
    Print,
    /// `h`: explain the last error
    Help,
    /// `H`: toggle verbose errors
    ToggleHelp,
    /// `q`: quit
    Quit,
    /// Anything else
    Unknown(char),
}

impl From<char> for Letter {
    fn from(c: char) -> Self {
        match c {
            '\n' => Self::Advance,
            'n' => Self::Number,
            'p' => Self::Print,
            'h' => Self::Help,
            'H' => Self::ToggleHelp,
            'q' => Self::Quit,
            other => Self::Unknown(other),
        }
    }
}

impl Letter {
    /// Commands that print a range and move the cursor to its end.
    #[must_use]
    pub fn is_print(self) -> bool {
        matches!(self, Self::Advance | Self::Number | Self::Print)
    }
}

/// Parsed command, validated against nothing but its own syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub letter: Letter,
    /// `None` when no address text was given.
    pub range: Option<Range>,
    /// Something other than end of line follows the letter.
    pub bad_suffix: bool,
}

impl Command {
    /// What end of input means: `q` without an address.
    #[must_use]
    pub fn quit() -> Self {
        Self {
            letter: Letter::Quit,
            range: None,
            bad_suffix: false,
        }
    }

    #[must_use]
    pub fn address_given(&self) -> bool {
        self.range.is_some()
    }
}

/// Parse one input line, newline included if there was one.
///
/// Unknown letters and trailing garbage are recorded on the returned
/// [`Command`] rather than reported here, so the dispatcher can rank them
/// below address errors.
///
/// # Errors
/// [`ErrorKind::MalformedAddress`] if the line starts with a space or the
/// address prefix is broken.
pub fn parse_command(line: &str, buffer: &Buffer) -> Result<Command, ErrorKind> {
    if line.starts_with(' ') {
        return Err(ErrorKind::MalformedAddress);
    }

    let (range, rest) = address::parse_range(line, buffer)?;

    let mut chars = rest.chars();
    let letter = chars.next().map_or(Letter::Advance, Letter::from);
    let suffix = chars.as_str();

    Ok(Command {
        letter,
        range,
        bad_suffix: !(suffix.is_empty() || suffix == "\n"),
    })
}
