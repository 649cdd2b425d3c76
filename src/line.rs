use std::io::{self, Write};

/// A single stored line, as raw bytes, including its trailing newline if it
/// had one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: Vec<u8>,
    line_no: usize,
}

impl Line {
    #[must_use]
    pub fn new(text: Vec<u8>, line_no: usize) -> Self {
        debug_assert!(line_no >= 1, "line numbers are 1-based");
        Self { text, line_no }
    }

    #[must_use]
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    #[must_use]
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Write the line unchanged, after `<line_no>\t` if `numbered`.
    ///
    /// # Errors
    /// If writing to `out` fails.
    pub fn write_to<W: Write>(&self, out: &mut W, numbered: bool) -> Result<(), io::Error> {
        if numbered {
            write!(out, "{}\t", self.line_no)?;
        }
        out.write_all(&self.text)
    }
}
