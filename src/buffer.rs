use crate::{Line, LoadError};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::Path;

/// Longest line accepted when loading a file, in bytes, newline included.
/// A line of exactly this many bytes, newline and all, still loads.
pub const LINE_MAX_LEN: usize = 1024;

/// The line store: every loaded line plus the current-line cursor.
///
/// Line numbers are dense and start at 1. `current_line` is 0 only when the
/// buffer is empty.
#[derive(Debug, Default)]
pub struct Buffer {
    lines: Vec<Line>,
    current_line: usize,
}

impl Buffer {
    /// # Errors
    /// [`LoadError::Open`] if the file can't be opened, otherwise whatever
    /// [`Buffer::from_reader`] reports.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let file = fs::File::open(path).map_err(LoadError::Open)?;
        Self::from_reader(io::BufReader::new(file))
    }

    /// Load every line of `reader`. The cursor starts on the last line.
    ///
    /// # Errors
    /// If reading fails or a line is longer than [`LINE_MAX_LEN`].
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, LoadError> {
        let mut lines = Vec::new();

        loop {
            let mut raw = Vec::new();
            let read = reader
                .by_ref()
                .take(LINE_MAX_LEN as u64)
                .read_until(b'\n', &mut raw)?;
            if read == 0 {
                break;
            }

            let line_no = lines.len() + 1;
            // A full chunk without a newline is only fine if the file ends there
            if raw.last() != Some(&b'\n')
                && raw.len() == LINE_MAX_LEN
                && !reader.fill_buf()?.is_empty()
            {
                return Err(LoadError::LineTooLong {
                    line_no,
                    max: LINE_MAX_LEN,
                });
            }

            lines.push(Line::new(raw, line_no));
        }

        log::info!("loaded {} lines", lines.len());
        Ok(Self::from_lines(lines))
    }

    fn from_lines(lines: Vec<Line>) -> Self {
        let current_line = lines.len();
        Self {
            lines,
            current_line,
        }
    }

    #[must_use]
    pub fn get(&self, line_no: usize) -> Option<&Line> {
        line_no
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn current_line(&self) -> usize {
        self.current_line
    }

    /// Move the cursor. `line_no` must be within `0..=len()`.
    pub fn set_current_line(&mut self, line_no: usize) {
        debug_assert!(line_no <= self.len(), "cursor past end of buffer");
        self.current_line = line_no;
    }

    /// Write lines `a..=b` to `out`, optionally prefixed with their numbers.
    ///
    /// Only the lines inside the range are visited. Bounds outside the buffer
    /// are clipped, an empty range writes nothing.
    ///
    /// # Errors
    /// If writing to `out` fails.
    pub fn print_range<W: Write>(
        &self,
        a: usize,
        b: usize,
        numbered: bool,
        out: &mut W,
    ) -> Result<(), io::Error> {
        let start = a.saturating_sub(1);
        let tail = self.lines.get(start..).unwrap_or_default();

        for line in tail.iter().take_while(|line| line.line_no() <= b) {
            debug_assert!(line.line_no() >= a);
            line.write_to(out, numbered)?;
        }

        Ok(())
    }
}
