use crate::address::{to_address, Range};
use crate::command::{self, Command, Letter};
use crate::{Buffer, ErrorKind, LoadError, Terminal};

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Quitting,
}

/// Verbose toggle plus the last reported error.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ErrorState {
    verbose: bool,
    last: Option<ErrorKind>,
}

impl ErrorState {
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    #[must_use]
    pub fn last(&self) -> Option<ErrorKind> {
        self.last
    }

    /// The session fails if the last recorded error is a real one.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.last.is_some_and(ErrorKind::is_failure)
    }

    fn record(&mut self, kind: ErrorKind) {
        self.last = Some(kind);
    }

    fn toggle_verbose(&mut self) -> bool {
        self.verbose = !self.verbose;
        self.verbose
    }
}

/// A fully validated command, ready to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Print {
        start: usize,
        end: usize,
        numbered: bool,
    },
    Help,
    ToggleHelp,
    Quit,
}

pub struct Editor<R, W> {
    state: State,
    terminal: Terminal<R, W>,
    buffer: Buffer,
    errors: ErrorState,
}

impl<R: BufRead, W: Write> Editor<R, W> {
    pub fn new(buffer: Buffer, terminal: Terminal<R, W>) -> Self {
        Self {
            state: State::Running,
            terminal,
            buffer,
            errors: ErrorState::default(),
        }
    }

    /// Load `path` into a new session.
    ///
    /// A file that can't be opened is reported on stderr and leaves the
    /// session running on an empty buffer.
    ///
    /// # Errors
    /// Any other load failure.
    pub fn from_file_path(path: &Path, terminal: Terminal<R, W>) -> Result<Self, LoadError> {
        match Buffer::open(path) {
            Ok(buffer) => Ok(Self::new(buffer, terminal)),
            Err(LoadError::Open(err)) => {
                eprintln!("{}: {err}", path.display());
                log::warn!("starting with an empty buffer: {err}");
                let mut editor = Self::new(Buffer::default(), terminal);
                editor.errors.record(ErrorKind::InputUnavailable);
                Ok(editor)
            }
            Err(err) => Err(err),
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[must_use]
    pub fn errors(&self) -> &ErrorState {
        &self.errors
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub fn output(&self) -> &W {
        self.terminal.output()
    }

    pub fn into_output(self) -> W {
        self.terminal.into_output()
    }

    /// Read and execute commands until `q` or end of input.
    ///
    /// # Errors
    /// If reading commands or writing output fails.
    pub fn run(&mut self) -> Result<()> {
        while self.state == State::Running {
            let executed = match self.terminal.read_line().context("failed to read command")? {
                Some(line) => self.execute_line(&line),
                None => self.execute(Ok(Command::quit())),
            };
            executed.context("failed to write output")?;
        }

        self.terminal.flush()?;
        Ok(())
    }

    /// Parse and execute one input line.
    ///
    /// # Errors
    /// Only if writing output fails, command errors are reported as `?`.
    pub fn execute_line(&mut self, line: &str) -> Result<(), io::Error> {
        let parsed = command::parse_command(line, &self.buffer);
        log::debug!("{line:?} -> {parsed:?}");
        self.execute(parsed)
    }

    fn execute(&mut self, parsed: Result<Command, ErrorKind>) -> Result<(), io::Error> {
        match parsed.and_then(|command| self.validate(command)) {
            Ok(action) => self.perform(action),
            Err(kind) => self.report(kind),
        }
    }

    /// Range used when the command has no address.
    fn default_range(&self, letter: Letter) -> Option<Range> {
        let current = to_address(self.buffer.current_line());
        match letter {
            Letter::Advance => Some(Range::single(current.saturating_add(1))),
            Letter::Number | Letter::Print => Some(Range::single(current)),
            _ => None,
        }
    }

    /// Checks run in order: range, suffix, letter, then per-command rules.
    /// Nothing is executed unless all of them pass.
    fn validate(&self, command: Command) -> Result<Action, ErrorKind> {
        let range = command
            .range
            .or_else(|| self.default_range(command.letter));
        let bounds = range
            .map(|range| range.validate(self.buffer.len()))
            .transpose()?;

        if command.bad_suffix {
            return Err(ErrorKind::BadCommandSuffix);
        }

        match (command.letter, bounds) {
            (Letter::Unknown(_), _) => Err(ErrorKind::UnknownCommand),
            (Letter::Advance | Letter::Print, Some((start, end))) => Ok(Action::Print {
                start,
                end,
                numbered: false,
            }),
            (Letter::Number, Some((start, end))) => Ok(Action::Print {
                start,
                end,
                numbered: true,
            }),
            // print commands always have a default range
            (Letter::Advance | Letter::Number | Letter::Print, None) => {
                Err(ErrorKind::MalformedAddress)
            }
            (Letter::Help | Letter::ToggleHelp | Letter::Quit, Some(_)) => {
                Err(ErrorKind::UnexpectedAddress)
            }
            (Letter::Help, None) => Ok(Action::Help),
            (Letter::ToggleHelp, None) => Ok(Action::ToggleHelp),
            (Letter::Quit, None) => Ok(Action::Quit),
        }
    }

    fn perform(&mut self, action: Action) -> Result<(), io::Error> {
        match action {
            Action::Print {
                start,
                end,
                numbered,
            } => {
                self.buffer
                    .print_range(start, end, numbered, self.terminal.output_mut())?;
                self.buffer.set_current_line(end);
            }
            Action::Help => {
                if let Some(last) = self.errors.last() {
                    self.terminal.print_line(&last.to_string())?;
                }
            }
            Action::ToggleHelp => {
                if self.errors.toggle_verbose() {
                    if let Some(last) = self.errors.last() {
                        self.terminal.print_line(&last.to_string())?;
                    }
                }
            }
            Action::Quit => self.state = State::Quitting,
        }

        Ok(())
    }

    fn report(&mut self, kind: ErrorKind) -> Result<(), io::Error> {
        log::debug!("command failed: {kind:?}");
        self.errors.record(kind);

        self.terminal.print_line("?")?;
        if self.errors.verbose() {
            self.terminal.print_line(&kind.to_string())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    type TestEditor = Editor<Cursor<Vec<u8>>, Vec<u8>>;

    fn editor(text: &str) -> TestEditor {
        let buffer = Buffer::from_reader(Cursor::new(text.as_bytes().to_vec())).unwrap();
        Editor::new(buffer, Terminal::new(Cursor::new(Vec::new()), Vec::new()))
    }

    /// Run `line` and return only what it printed.
    fn exec(editor: &mut TestEditor, line: &str) -> String {
        let before = editor.output().len();
        editor.execute_line(line).unwrap();
        String::from_utf8(editor.output()[before..].to_vec()).unwrap()
    }

    #[test]
    fn test_default_advance() {
        let mut ed = editor("a\nb\nc\n");
        assert_eq!(exec(&mut ed, "1p\n"), "a\n");
        assert_eq!(exec(&mut ed, "\n"), "b\n");
        assert_eq!(exec(&mut ed, "\n"), "c\n");
        assert_eq!(exec(&mut ed, "\n"), "?\n");
        assert_eq!(ed.buffer().current_line(), 3);
    }

    #[test]
    fn test_print_without_address_uses_current() {
        let mut ed = editor("a\nb\nc\n");
        assert_eq!(exec(&mut ed, "p\n"), "c\n");
        assert_eq!(exec(&mut ed, "n\n"), "3\tc\n");
    }

    #[test]
    fn test_print_twice_is_idempotent() {
        let mut ed = editor("a\nb\nc\n");
        exec(&mut ed, "2p\n");
        assert_eq!(exec(&mut ed, ".p\n"), "b\n");
        assert_eq!(exec(&mut ed, ".p\n"), "b\n");
        assert_eq!(ed.buffer().current_line(), 2);
    }

    #[test]
    fn test_dot_resolves_before_execution() {
        let mut ed = editor("a\nb\nc\nd\n");
        exec(&mut ed, "2p\n");
        assert_eq!(exec(&mut ed, ".,+1p\n"), "b\nc\n");
        assert_eq!(ed.buffer().current_line(), 3);
        assert_eq!(exec(&mut ed, "-2,.n\n"), "1\ta\n2\tb\n3\tc\n");
    }

    #[test]
    fn test_rejected_command_keeps_cursor() {
        let mut ed = editor("a\nb\nc\n");
        exec(&mut ed, "2p\n");
        for line in ["5p\n", "0p\n", "3,2p\n", "1,p\n", ",p\n", " 1p\n", "2px\n", "2x\n"] {
            assert_eq!(exec(&mut ed, line), "?\n", "input {line:?}");
            assert_eq!(ed.buffer().current_line(), 2, "input {line:?}");
        }
    }

    #[test]
    fn test_address_error_beats_suffix_error() {
        let mut ed = editor("a\nb\nc\n");
        exec(&mut ed, "5px\n");
        assert_eq!(ed.errors().last(), Some(ErrorKind::MalformedAddress));
    }

    #[test]
    fn test_suffix_error_beats_unknown_command() {
        let mut ed = editor("a\nb\nc\n");
        exec(&mut ed, "xy\n");
        assert_eq!(ed.errors().last(), Some(ErrorKind::BadCommandSuffix));
        exec(&mut ed, "x\n");
        assert_eq!(ed.errors().last(), Some(ErrorKind::UnknownCommand));
        exec(&mut ed, "9x\n");
        assert_eq!(ed.errors().last(), Some(ErrorKind::MalformedAddress));
    }

    #[test]
    fn test_bad_suffix_prints_nothing() {
        let mut ed = editor("a\nb\nc\n");
        assert_eq!(exec(&mut ed, "1pp\n"), "?\n");
        assert_eq!(ed.errors().last(), Some(ErrorKind::BadCommandSuffix));
        assert_eq!(ed.buffer().current_line(), 3);
    }

    #[test]
    fn test_unexpected_address() {
        let mut ed = editor("a\nb\nc\n");
        for line in ["1h\n", "1H\n", "1q\n", "1,2q\n"] {
            assert_eq!(exec(&mut ed, line), "?\n");
            assert_eq!(ed.errors().last(), Some(ErrorKind::UnexpectedAddress));
        }
        assert!(!ed.errors().verbose());
        assert_eq!(ed.state(), State::Running);

        // an out of range address is still reported as such
        exec(&mut ed, "7q\n");
        assert_eq!(ed.errors().last(), Some(ErrorKind::MalformedAddress));
    }

    #[test]
    fn test_help_replays_last_error() {
        let mut ed = editor("a\nb\nc\n");
        assert_eq!(exec(&mut ed, "h\n"), "");
        exec(&mut ed, "9p\n");
        assert_eq!(exec(&mut ed, "h\n"), "Invalid address\n");
        // success doesn't clear it
        exec(&mut ed, "1p\n");
        assert_eq!(exec(&mut ed, "h\n"), "Invalid address\n");
        assert_eq!(ed.buffer().current_line(), 1);
    }

    #[test]
    fn test_toggle_verbose() {
        let mut ed = editor("a\n");
        assert_eq!(exec(&mut ed, "H\n"), "");
        assert!(ed.errors().verbose());
        assert_eq!(exec(&mut ed, "2p\n"), "?\nInvalid address\n");
        assert_eq!(exec(&mut ed, "H\n"), "");
        assert!(!ed.errors().verbose());
        assert_eq!(exec(&mut ed, "2p\n"), "?\n");
        assert_eq!(exec(&mut ed, "H\n"), "Invalid address\n");
    }

    #[test]
    fn test_quit() {
        let mut ed = editor("a\n");
        exec(&mut ed, "q\n");
        assert_eq!(ed.state(), State::Quitting);
        assert!(!ed.errors().is_failure());
    }

    #[test]
    fn test_empty_buffer() {
        let mut ed = editor("");
        for line in ["\n", "p\n", "n\n", "1p\n", "$p\n", ".p\n"] {
            assert_eq!(exec(&mut ed, line), "?\n", "input {line:?}");
        }
        assert_eq!(exec(&mut ed, "h\n"), "Invalid address\n");
        exec(&mut ed, "q\n");
        assert_eq!(ed.state(), State::Quitting);
        assert!(ed.errors().is_failure());
    }

    #[test]
    fn test_error_state_exit_policy() {
        let mut errors = ErrorState::default();
        assert!(!errors.is_failure());
        errors.record(ErrorKind::InputUnavailable);
        assert!(!errors.is_failure());
        errors.record(ErrorKind::UnknownCommand);
        assert!(errors.is_failure());
    }
}
