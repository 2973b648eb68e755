//! A minimal interactive command shell.
//!
//! Each input line is normalized, split into tokens, stripped of its `< file` and
//! `> file` redirections and run as a child process. The shell waits for the child
//! and shows how it ended, and how long it took, in the next prompt:
//!
//! ```text
//! enseash % sh -c false
//! enseash [exit:1|3ms] %
//! ```
//!
//! The main entry point is [`Interpreter`], which drives the loop over any
//! [`LineSource`]. The individual stages are public too, so a line can be taken
//! apart or run without a REPL.

pub mod command;
pub mod config;
pub mod error;
pub mod external;
mod interpreter;
mod io_adapters;
pub mod lexer;
pub mod line;
pub mod parser;
pub mod prompt;
pub mod supervisor;

pub use config::ShellConfig;
pub use error::ShellError;
pub use interpreter::{BYE_MESSAGE, Interpreter, Step, WELCOME_MESSAGE};
pub use io_adapters::{LineSource, MemWriter, ScriptSource, Terminal};
