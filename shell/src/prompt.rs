//! What the shell remembers between iterations, and the prompt rendered from it.

use crate::supervisor::{Completion, Outcome};
use std::fmt::{self, Write};

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Exited(code) => write!(f, "exit:{code}"),
            Outcome::Signaled(signal) => write!(f, "sign:{signal}"),
            Outcome::Unknown => f.write_str("unk"),
        }
    }
}

/// Outcome of the last completed command, if any.
///
/// Only a completed wait moves the state; launch and wait failures leave it as it was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptState {
    /// No command has completed yet.
    #[default]
    Fresh,
    Settled(Completion),
}

impl PromptState {
    pub fn record(&mut self, completion: Completion) {
        *self = PromptState::Settled(completion);
    }

    pub fn last(&self) -> Option<&Completion> {
        match self {
            PromptState::Fresh => None,
            PromptState::Settled(completion) => Some(completion),
        }
    }

    /// Render the prompt, keeping at most `capacity` bytes.
    pub fn render(&self, capacity: usize) -> String {
        let mut out = BoundedWriter::new(capacity);
        // BoundedWriter never reports an error; it drops what does not fit.
        let _ = match self {
            PromptState::Fresh => out.write_str("enseash % "),
            PromptState::Settled(Completion {
                outcome,
                elapsed_ms,
            }) => write!(out, "enseash [{outcome}|{elapsed_ms}ms] % "),
        };
        out.into_inner()
    }
}

/// A `fmt::Write` sink that silently drops whatever goes past its capacity.
struct BoundedWriter {
    buf: String,
    capacity: usize,
}

impl BoundedWriter {
    fn new(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            capacity,
        }
    }

    fn into_inner(self) -> String {
        self.buf
    }
}

impl Write for BoundedWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.buf.len() + ch.len_utf8() > self.capacity {
                break;
            }
            self.buf.push(ch);
        }
        Ok(())
    }
}
