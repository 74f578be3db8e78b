use std::{error::Error, fmt::Debug, io::{self, BufRead, Write}};

use thiserror::Error;

use crate::utils::error_fmt_chain;

// Typed at a prompt to back out of a multi-step flow
pub const EXIT_KEYWORD: &str = "exit";

#[derive(Error)]
pub enum ConsoleError{
    #[error("Standard input was closed")]
    InputClosed,
    #[error("Failed to read or write the console")]
    Io(#[from] io::Error)
}

impl Debug for ConsoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Line-oriented prompt/response over any reader and pair of writers.
// Regular output goes to `output`, failures to `errors`.
pub struct Console<'a>{
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
    errors: &'a mut dyn Write
}

impl<'a> Console<'a>{
    pub fn new(
        input: &'a mut dyn BufRead,
        output: &'a mut dyn Write,
        errors: &'a mut dyn Write
    ) -> Self {
        Console{ input, output, errors }
    }

    pub fn say(&mut self, message: impl AsRef<str>) -> Result<(), ConsoleError> {
        writeln!(self.output, "{}", message.as_ref())?;
        Ok(())
    }

    pub fn error(&mut self, message: impl AsRef<str>) -> Result<(), ConsoleError> {
        writeln!(self.errors, "{}", message.as_ref())?;
        self.errors.flush()?;
        Ok(())
    }

    pub fn output(&mut self) -> &mut dyn Write {
        &mut *self.output
    }

    // Prints `prompt` and reads one line without its line terminator
    pub fn ask(&mut self, prompt: impl AsRef<str>) -> Result<String, ConsoleError> {
        writeln!(self.output, "{}", prompt.as_ref())?;
        self.read_line()
    }

    // Like `ask`, but returns None when the user typed the exit keyword
    pub fn ask_or_exit(&mut self, prompt: impl AsRef<str>) -> Result<Option<String>, ConsoleError> {
        let answer = self.ask(prompt)?;
        if answer.trim().eq_ignore_ascii_case(EXIT_KEYWORD) {
            Ok(None)
        } else {
            Ok(Some(answer))
        }
    }

    // Reads menu choices until one parses as a number
    pub fn read_choice(&mut self) -> Result<u32, ConsoleError> {
        loop {
            write!(self.output, "Please make your choice: ")?;
            self.output.flush()?;

            match self.read_line()?.trim().parse::<u32>() {
                Ok(choice) => return Ok(choice),
                Err(_) => self.say("Your input is invalid!")?
            }
        }
    }

    pub fn confirm(&mut self, prompt: impl AsRef<str>) -> Result<bool, ConsoleError> {
        let answer = self.ask(format!("{} (y/n): ", prompt.as_ref()))?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }

    fn read_line(&mut self) -> Result<String, ConsoleError> {
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::InputClosed)
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }
}
