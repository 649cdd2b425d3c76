use std::io;

use thiserror::Error;

/// Recoverable errors reported to the user as `?`.
///
/// The `Display` text is the verbose message shown when help mode is on
/// or when the last error is requested with `h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("Invalid address")]
    MalformedAddress,
    #[error("Unknown command suffix")]
    BadCommandSuffix,
    #[error("Unexpected address")]
    UnexpectedAddress,
    #[error("Unknown command")]
    UnknownCommand,
    #[error("Cannot open input file")]
    InputUnavailable,
}

impl ErrorKind {
    /// Whether this error should make the session exit unsuccessfully.
    #[must_use]
    pub fn is_failure(self) -> bool {
        !matches!(self, Self::InputUnavailable)
    }
}

/// Errors raised while loading the initial buffer.
///
/// Only [`LoadError::Open`] is recoverable, every other variant ends the
/// session.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open file: {0}")]
    Open(#[source] io::Error),
    #[error("read failed: {0}")]
    Read(#[from] io::Error),
    #[error("input line {line_no} longer than {max} bytes")]
    LineTooLong { line_no: usize, max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let cases = [
            (ErrorKind::MalformedAddress, "Invalid address"),
            (ErrorKind::BadCommandSuffix, "Unknown command suffix"),
            (ErrorKind::UnexpectedAddress, "Unexpected address"),
            (ErrorKind::UnknownCommand, "Unknown command"),
            (ErrorKind::InputUnavailable, "Cannot open input file"),
        ];
        for (kind, message) in cases {
            assert_eq!(kind.to_string(), message);
        }
    }

    #[test]
    fn test_only_missing_input_is_benign() {
        assert!(!ErrorKind::InputUnavailable.is_failure());
        assert!(ErrorKind::MalformedAddress.is_failure());
        assert!(ErrorKind::UnknownCommand.is_failure());
    }
}
