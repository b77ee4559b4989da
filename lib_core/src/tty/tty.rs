use std::fmt::Display;
use std::io::{self, Write};
use std::process::ExitCode;

use crate::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::{CliError, CliErrorTrait, IOError};

use super::Printer;

/// Output stage of a command. Nothing is printed until the final result is
/// handed to `close`.
pub struct Tty<O = io::Stdout, E = io::Stderr> {
    start_time: std::time::Instant,
    printer: Printer<O, E>,
}

impl Tty {
    pub fn new() -> Self {
        Self::with_printer(Printer::new())
    }
}

impl<O: Write, E: Write> Tty<O, E> {
    pub fn with_printer(printer: Printer<O, E>) -> Self {
        Self {
            start_time: std::time::Instant::now(),
            printer,
        }
    }

    pub fn close<T: Display>(mut self, final_result: Result<T, CliError>) -> ExitCode {
        ExitCode::from(self.report(final_result))
    }

    /// Writes the value to stdout, or the error to stderr, and returns the
    /// process exit code.
    pub fn report<T: Display>(&mut self, final_result: Result<T, CliError>) -> u8 {
        let printer = &mut self.printer;
        let written = final_result.and_then(|value| {
            printer
                .result(&value.to_string())
                .map_err(|e| IOError::with_debug("stdout", &e))
        });
        log::debug!("Finished in {}.", print_elapsed(self.start_time));
        match written {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                self.print_error(e.as_ref());
                EXIT_FAILURE
            }
        }
    }

    pub fn into_printer(self) -> Printer<O, E> {
        self.printer
    }

    fn print_error(&mut self, error: &dyn CliErrorTrait) {
        let details = error.details();
        if let Some(debug) = details.debug {
            log::debug!("Underlying error: {}", debug);
        }
        log::trace!("Error context:\n{}", details.context);

        // Nowhere left to report a failing stderr.
        let _ = self.printer.error(&format!("Error: {}", details.message));
        if let Some(hint) = details.hint {
            let _ = self.printer.hint(hint);
        }
    }
}

fn print_elapsed(start: std::time::Instant) -> String {
    let elapsed = start.elapsed();
    let secs = elapsed.as_secs();
    let millis = elapsed.subsec_millis();
    if secs < 60 {
        format!("{}.{:03}s", secs, millis)
    } else {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}.{:03}s", mins, secs, millis)
    }
}
