use std::io::{self, IsTerminal as _, Write};

use colored::Colorize as _;

/// Writes user-facing lines. Results go to the stdout writer, diagnostics to
/// the stderr writer.
#[derive(Debug)]
pub struct Printer<O = io::Stdout, E = io::Stderr> {
    out: O,
    err: E,
    colorize: bool,
}

impl Printer {
    pub fn new() -> Self {
        // Only stderr is ever coloured, so its terminal decides, not stdout's.
        let colorize = io::stderr().is_terminal();
        colored::control::set_override(colorize);
        Printer {
            out: io::stdout(),
            err: io::stderr(),
            colorize,
        }
    }
}

impl<O: Write, E: Write> Printer<O, E> {
    /// Never coloured.
    pub fn with_writers(out: O, err: E) -> Self {
        Printer {
            out,
            err,
            colorize: false,
        }
    }

    /// Printed as-is, since callers may parse it.
    pub fn result(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message)?;
        self.out.flush()
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        if self.colorize {
            writeln!(self.err, "{}", message.red())?;
        } else {
            writeln!(self.err, "{}", message)?;
        }
        self.err.flush()
    }

    pub fn hint(&mut self, message: &str) -> io::Result<()> {
        if self.colorize {
            writeln!(self.err, "{}", message.yellow())?;
        } else {
            writeln!(self.err, "{}", message)?;
        }
        self.err.flush()
    }

    pub fn into_writers(self) -> (O, E) {
        (self.out, self.err)
    }
}
