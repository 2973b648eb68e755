use argh::FromArgs;

/// Bytes taken from one input line; the rest of the line is dropped.
pub const DEFAULT_LINE_CAPACITY: usize = 255;
/// Bytes a rendered prompt may occupy.
pub const DEFAULT_PROMPT_CAPACITY: usize = 127;
/// Tokens kept per line; excess tokens are dropped silently.
pub const DEFAULT_MAX_ARGS: usize = 64;

/// Bounds and start-up behaviour of the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub line_capacity: usize,
    pub prompt_capacity: usize,
    pub max_args: usize,
    /// Print the welcome banner before the first prompt.
    pub banner: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            line_capacity: DEFAULT_LINE_CAPACITY,
            prompt_capacity: DEFAULT_PROMPT_CAPACITY,
            max_args: DEFAULT_MAX_ARGS,
            banner: true,
        }
    }
}

#[derive(FromArgs, Debug)]
/// A minimal interactive command shell.
/// Runs one program per line, with optional `< file` and `> file` redirections,
/// and reports the exit status and duration of the last command in the prompt.
pub struct Args {
    #[argh(switch, short = 'q')]
    /// do not print the welcome banner.
    pub quiet: bool,

    #[argh(option, default = "DEFAULT_LINE_CAPACITY")]
    /// maximum number of bytes read from one input line.
    pub line_capacity: usize,

    #[argh(option, default = "DEFAULT_PROMPT_CAPACITY")]
    /// maximum number of bytes of a rendered prompt.
    pub prompt_capacity: usize,

    #[argh(option, default = "DEFAULT_MAX_ARGS")]
    /// maximum number of tokens kept from one line.
    pub max_args: usize,
}

impl TryFrom<Args> for ShellConfig {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> anyhow::Result<Self> {
        for (name, value) in [
            ("--line-capacity", args.line_capacity),
            ("--prompt-capacity", args.prompt_capacity),
            ("--max-args", args.max_args),
        ] {
            if value == 0 {
                anyhow::bail!("{name} must be greater than zero");
            }
        }
        Ok(Self {
            line_capacity: args.line_capacity,
            prompt_capacity: args.prompt_capacity,
            max_args: args.max_args,
            banner: !args.quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["enseash"], args).expect("valid arguments")
    }

    #[test]
    fn defaults_match_buffer_sizes() {
        let config = ShellConfig::try_from(parse(&[])).unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.line_capacity, 255);
        assert_eq!(config.prompt_capacity, 127);
        assert_eq!(config.max_args, 64);
        assert!(config.banner);
    }

    #[test]
    fn quiet_disables_banner() {
        let config = ShellConfig::try_from(parse(&["-q", "--max-args", "8"])).unwrap();
        assert!(!config.banner);
        assert_eq!(config.max_args, 8);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = ShellConfig::try_from(parse(&["--prompt-capacity", "0"])).unwrap_err();
        assert!(err.to_string().contains("--prompt-capacity"));
    }
}
