//! User interaction.
//!
//! The processing loop only talks to the [`Prompter`] trait, so it can be
//! driven from a terminal or from canned answers in tests.

use crate::render::ParamMode;
use std::io::{self, BufRead, Write};

/// Question/answer capability used by the annotation loop.
pub trait Prompter {
    /// Show `prompt` and read one answer line. `None` at end of input.
    fn read_answer(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Print an informational line.
    fn say(&mut self, message: &str) -> io::Result<()>;

    /// Only `y` / `Y` count as yes. Anything else, and end of input, is no.
    fn ask_yes_no(&mut self, prompt: &str) -> io::Result<bool> {
        Ok(self
            .read_answer(prompt)?
            .is_some_and(|answer| is_affirmative(&answer)))
    }

    /// Free text; end of input reads as an empty answer.
    fn ask_text(&mut self, prompt: &str) -> io::Result<String> {
        Ok(self.read_answer(prompt)?.unwrap_or_default())
    }

    /// Ask until the answer is exactly `IN`, `OUT` or `IN/OUT`.
    fn ask_parameter_mode(&mut self, parameter: &str) -> io::Result<ParamMode> {
        let prompt = format!("Is '{}' [IN], [OUT], or [IN/OUT]? ", parameter);
        loop {
            let Some(answer) = self.read_answer(&prompt)? else {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("input ended before a mode was given for '{}'", parameter),
                ));
            };
            match ParamMode::parse(&answer) {
                Some(mode) => return Ok(mode),
                None => self.say("Please enter exactly: IN, OUT, or IN/OUT")?,
            }
        }
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    answer == "y" || answer == "Y"
}

/// Line-oriented prompter over any reader/writer pair (stdin/stdout in the
/// binary, in-memory buffers in tests).
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for Console<R, W> {
    fn read_answer(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);
        Ok(Some(trimmed.to_string()))
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }
}
