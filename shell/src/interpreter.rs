use crate::command::Command;
use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::external;
use crate::io_adapters::LineSource;
use crate::lexer::split_into_tokens;
use crate::line::CommandLine;
use crate::parser::extract_redirections;
use crate::prompt::PromptState;
use crate::supervisor::{self, Completion, Timestamp};
use std::io::Write;

pub const WELCOME_MESSAGE: &str = "Bienvenue dans le Shell ENSEA.\nPour quitter, tapez 'exit'.\n";
pub const BYE_MESSAGE: &str = "Bye bye...\n";
/// The only line the shell interprets itself.
pub const EXIT_COMMAND: &str = "exit";

/// What the REPL should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Exit,
}

/// The read-execute-report loop.
///
/// Owns the only state that survives an iteration, the [`PromptState`]. Lines,
/// tokens and commands are rebuilt for every line and dropped at its end.
///
/// Example
/// ```
/// use enseash::{Interpreter, MemWriter, ScriptSource, ShellConfig};
/// use std::io::Cursor;
///
/// let out = MemWriter::new();
/// let input = ScriptSource::new(Cursor::new(b"true\nexit\n".to_vec()), Box::new(out.clone()));
/// let config = ShellConfig { banner: false, ..ShellConfig::default() };
/// let err = Box::new(std::io::sink());
/// let mut sh = Interpreter::new(config, Box::new(input), Box::new(out.clone()), err);
/// sh.run();
/// assert!(out.contents().contains("enseash [exit:0|"));
/// assert!(out.contents().ends_with("Bye bye...\n"));
/// ```
pub struct Interpreter {
    config: ShellConfig,
    input: Box<dyn LineSource>,
    out: Box<dyn Write>,
    err: Box<dyn Write>,
    state: PromptState,
}

impl Interpreter {
    pub fn new(
        config: ShellConfig,
        input: Box<dyn LineSource>,
        out: Box<dyn Write>,
        err: Box<dyn Write>,
    ) -> Self {
        Self {
            config,
            input,
            out,
            err,
            state: PromptState::Fresh,
        }
    }

    pub fn state(&self) -> &PromptState {
        &self.state
    }

    /// Run until `exit` or end of input, then say goodbye once.
    pub fn run(&mut self) {
        if self.config.banner {
            self.say(WELCOME_MESSAGE);
        }
        loop {
            let prompt = self.state.render(self.config.prompt_capacity);
            let raw = match self.input.read_line(&prompt) {
                Ok(Some(raw)) => raw,
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(%err, "input collaborator failed, treating as end of input");
                    self.report(&err);
                    break;
                }
            };
            if self.step(&raw) == Step::Exit {
                break;
            }
        }
        self.say(BYE_MESSAGE);
    }

    /// Handle one raw input line.
    ///
    /// Blank lines are skipped, `exit` ends the loop, anything else is executed.
    /// The prompt state moves only when a child was waited for successfully.
    pub fn step(&mut self, raw: &[u8]) -> Step {
        let line = CommandLine::from_bytes(raw, self.config.line_capacity);
        if line.is_empty() {
            return Step::Continue;
        }
        if line.as_str() == EXIT_COMMAND {
            return Step::Exit;
        }
        tracing::debug!(line = line.as_str(), "accepted line");
        match self.execute(&line) {
            Ok(completion) => self.state.record(completion),
            Err(err) => self.report(&err),
        }
        Step::Continue
    }

    /// Tokenize `line`, extract its redirections, run it and wait for it.
    pub fn execute(&mut self, line: &CommandLine) -> Result<Completion, ShellError> {
        let mut tokens = split_into_tokens(line.as_str(), self.config.max_args);
        let plan = extract_redirections(&mut tokens)?;
        tracing::debug!(?tokens, ?plan, "parsed line");
        let command = Command::new(&tokens, &plan)?;

        // Pending parent output would otherwise be duplicated into the child.
        let _ = self.out.flush();
        let _ = std::io::stdout().flush();

        let started = Timestamp::now()?;
        let pid = external::spawn(&command)?;
        tracing::debug!(pid = pid.as_raw(), program = command.program(), "child launched");
        supervisor::wait_for(pid, started)
    }

    fn say(&mut self, message: &str) {
        let _ = self.out.write_all(message.as_bytes());
        let _ = self.out.flush();
    }

    fn report(&mut self, err: &ShellError) {
        tracing::debug!(%err, "command not completed");
        let _ = writeln!(self.err, "Error: {err}");
        let _ = self.err.flush();
    }
}
