use std::io::{self, BufRead, Write};

/// Command input and output streams.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl Terminal<io::StdinLock<'static>, io::Stdout> {
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Next command line, newline included. `None` at end of input.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn read_line(&mut self) -> Result<Option<String>, io::Error> {
        self.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
    }

    /// Write `text` followed by a newline.
    pub fn print_line(&mut self, text: &str) -> Result<(), io::Error> {
        writeln!(self.output, "{text}")
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn flush(&mut self) -> Result<(), io::Error> {
        self.output.flush()
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
