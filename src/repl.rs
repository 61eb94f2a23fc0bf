//! The interactive request loop.

use std::io::{BufRead, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::operations::{execute, render};
use crate::{Command, Error, Options, Result, TransactionManager};

/// Reads commands line by line and writes their rendered replies.
///
/// The manager sits behind a mutex shared with the shutdown listener. The
/// loop holds the lock for exactly one command at a time, so a shutdown
/// save always observes the state between two commands.
pub struct Repl {
    manager: Arc<Mutex<TransactionManager>>,
    options: Options,
}

impl Repl {
    /// Creates a loop over `manager`.
    pub fn new(manager: Arc<Mutex<TransactionManager>>, options: Options) -> Self {
        Self { manager, options }
    }

    /// Returns the shared manager.
    pub fn manager(&self) -> &Arc<Mutex<TransactionManager>> {
        &self.manager
    }

    /// Handles one input line, returning the text to show, if any.
    ///
    /// Blank lines produce no output.
    pub fn handle_line(&self, line: &str) -> Option<String> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(Error::EmptyInput) => return None,
            Err(e) => return render(&Err(e)),
        };

        log::trace!("Executing {}", command.name());
        let outcome = {
            let mut tm = self.manager.lock();
            execute(&mut tm, command)
        };
        render(&outcome)
    }

    /// Runs until `input` is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading `input` or writing `output` fails.
    /// Command failures are written to `output` and the loop continues.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<()> {
        let mut line = String::new();
        loop {
            output.write_all(self.options.prompt.as_bytes())?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                log::debug!("End of input");
                return Ok(());
            }

            if let Some(reply) = self.handle_line(&line) {
                writeln!(output, "{}", reply)?;
            }
        }
    }
}
