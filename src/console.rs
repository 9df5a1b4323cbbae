//! Line-oriented prompt/print channel used by the shell.
//!
//! Generic over the reader and writer so sessions can be scripted with an
//! in-memory `Cursor` and captured into a `Vec<u8>`.

use std::fmt;
use std::io::{self, BufRead, Write};

pub struct Console<R, W> {
    input: R,
    output: W,
    line: String,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: String::new(),
        }
    }

    /// Print `label` without a newline, then read one line of input.
    ///
    /// The returned text is trimmed. End of input is reported as
    /// `UnexpectedEof` so an exhausted stdin cannot spin the menu loop.
    pub fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "standard input closed",
            ));
        }
        Ok(self.line.trim().to_string())
    }

    /// Write one status line.
    pub fn say(&mut self, line: impl fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
