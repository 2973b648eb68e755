use anyhow::Context;
use enseash::config::Args;
use enseash::{Interpreter, LineSource, ScriptSource, ShellConfig, Terminal};
use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("ENSEASH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args: Args = argh::from_env();
    let config = ShellConfig::try_from(args).context("invalid configuration")?;

    let input: Box<dyn LineSource> = if io::stdin().is_terminal() {
        Box::new(Terminal::new().context("cannot set up the line editor")?)
    } else {
        Box::new(
            ScriptSource::new(io::stdin().lock(), Box::new(io::stdout()))
                .with_line_capacity(config.line_capacity),
        )
    };

    Interpreter::new(config, input, Box::new(io::stdout()), Box::new(io::stderr())).run();
    Ok(())
}
