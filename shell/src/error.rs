//! Error taxonomy of the command-execution engine.

use nix::errno::Errno;
use std::ffi::NulError;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Everything that can go wrong between reading a line and recording its outcome.
///
/// None of these is fatal to the REPL: the interpreter prints the message as a
/// single line on its error stream and prompts again.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The kernel refused to create a child process.
    #[error("fork failed: {0}")]
    ForkFailed(#[source] Errno),

    /// The program image could not be replaced. Only ever raised inside the child.
    #[error("cannot execute {program}: {source}")]
    ExecFailed {
        program: Arc<str>,
        #[source]
        source: Errno,
    },

    /// A `<` or `>` operator is the last token of the line.
    #[error("missing filename after {operator}")]
    MissingRedirectTarget { operator: &'static str },

    /// A redirection file could not be opened. Only ever raised inside the child.
    #[error("cannot open {}: {source}", path.display())]
    RedirectOpenFailed {
        path: Arc<Path>,
        #[source]
        source: Errno,
    },

    /// An opened redirection file could not be bound to a standard stream.
    #[error("cannot bind {} to {stream}: {source}", path.display())]
    RedirectBindFailed {
        path: Arc<Path>,
        stream: &'static str,
        #[source]
        source: Errno,
    },

    /// Nothing is left to run once redirections are removed (e.g. `> out.txt`).
    #[error("empty command")]
    EmptyCommand,

    /// Waiting for the child failed for a reason other than an interrupting signal.
    #[error("wait for pid {pid} failed: {source}")]
    WaitFailed {
        pid: i32,
        #[source]
        source: Errno,
    },

    #[error("monotonic clock unavailable: {0}")]
    Clock(#[source] Errno),

    #[error("argument contains a nul byte: {0}")]
    NulInArgument(#[from] NulError),

    /// The input collaborator failed in a way that is not a plain end of input.
    #[error("input error: {0}")]
    Input(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_single_line() {
        let errors = [
            ShellError::ForkFailed(Errno::EAGAIN),
            ShellError::ExecFailed {
                program: Arc::from("nope"),
                source: Errno::ENOENT,
            },
            ShellError::MissingRedirectTarget { operator: ">" },
            ShellError::RedirectOpenFailed {
                path: Arc::from(Path::new("missing.txt")),
                source: Errno::ENOENT,
            },
            ShellError::RedirectBindFailed {
                path: Arc::from(Path::new("out.txt")),
                stream: "standard output",
                source: Errno::EBADF,
            },
            ShellError::EmptyCommand,
            ShellError::WaitFailed {
                pid: 42,
                source: Errno::ECHILD,
            },
        ];
        for err in errors {
            assert!(!err.to_string().contains('\n'), "{err}");
        }
    }

    #[test]
    fn missing_target_names_the_operator() {
        let err = ShellError::MissingRedirectTarget { operator: "<" };
        assert_eq!(err.to_string(), "missing filename after <");
    }
}
