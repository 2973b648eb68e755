use crate::error::ShellError;
use crate::parser::RedirectionPlan;
use std::ffi::{CStr, CString};
use std::path::Path;
use std::sync::Arc;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Status a child exits with when it cannot reach its program: a redirection file
/// failed to open or bind, or the program image could not be replaced.
///
/// From the shell's point of view this is indistinguishable from the program itself
/// returning 1.
pub const CHILD_FAILURE_STATUS: ExitCode = 1;

/// A command ready to be launched: everything the child needs, owned and converted
/// before the fork so the child never parses or allocates argument data.
///
/// Names are held behind `Arc` so that an error raised in the child can share them
/// instead of copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    program: Arc<str>,
    argv: Vec<CString>,
    input: Option<RedirectTarget>,
    output: Option<RedirectTarget>,
}

/// A redirection file, both as shown in messages and as handed to `open(2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RedirectTarget {
    pub(crate) path: Arc<Path>,
    pub(crate) c_path: CString,
}

impl RedirectTarget {
    fn new(path: &str) -> Result<Self, ShellError> {
        Ok(Self {
            path: Arc::from(Path::new(path)),
            c_path: CString::new(path)?,
        })
    }
}

impl Command {
    /// Build a command from an extracted token sequence and its redirection plan.
    ///
    /// Fails with [`ShellError::EmptyCommand`] when no token is left.
    pub fn new(tokens: &[&str], plan: &RedirectionPlan<'_>) -> Result<Self, ShellError> {
        let Some(&program) = tokens.first() else {
            return Err(ShellError::EmptyCommand);
        };
        let argv = tokens
            .iter()
            .map(|token| CString::new(*token))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            program: Arc::from(program),
            argv,
            input: plan.input.map(RedirectTarget::new).transpose()?,
            output: plan.output.map(RedirectTarget::new).transpose()?,
        })
    }

    /// Name looked up on the search path, as typed.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Program name as handed to `execvp`. `argv` is never empty.
    pub(crate) fn exec_name(&self) -> &CStr {
        &self.argv[0]
    }

    /// Full argument vector, program name included.
    pub fn argv(&self) -> &[CString] {
        &self.argv
    }

    /// Shared handle on the program name, for errors raised after the fork.
    pub(crate) fn program_handle(&self) -> &Arc<str> {
        &self.program
    }

    pub fn input(&self) -> Option<&Path> {
        self.input.as_ref().map(|target| &*target.path)
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_ref().map(|target| &*target.path)
    }

    pub(crate) fn input_target(&self) -> Option<&RedirectTarget> {
        self.input.as_ref()
    }

    pub(crate) fn output_target(&self) -> Option<&RedirectTarget> {
        self.output.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_program_and_arguments_in_order() {
        let plan = RedirectionPlan {
            input: Some("in.txt"),
            output: None,
        };
        let cmd = Command::new(&["wc", "-l"], &plan).unwrap();
        assert_eq!(cmd.program(), "wc");
        assert_eq!(
            cmd.argv(),
            &[CString::new("wc").unwrap(), CString::new("-l").unwrap()]
        );
        assert_eq!(cmd.input(), Some(Path::new("in.txt")));
        assert_eq!(cmd.output(), None);
    }

    #[test]
    fn no_tokens_is_empty_command() {
        let err = Command::new(&[], &RedirectionPlan::default()).unwrap_err();
        assert!(matches!(err, ShellError::EmptyCommand));
    }

    #[test]
    fn nul_byte_is_rejected() {
        let err = Command::new(&["echo", "a\0b"], &RedirectionPlan::default()).unwrap_err();
        assert!(matches!(err, ShellError::NulInArgument(_)));
    }

    #[test]
    fn redirect_targets_are_converted_up_front() {
        let plan = RedirectionPlan {
            input: None,
            output: Some("out.txt"),
        };
        let cmd = Command::new(&["ls"], &plan).unwrap();
        let target = cmd.output_target().unwrap();
        assert_eq!(target.c_path.as_bytes(), b"out.txt");
        assert_eq!(&*target.path, Path::new("out.txt"));
    }

    #[test]
    fn clones_share_names() {
        let cmd = Command::new(&["ls"], &RedirectionPlan::default()).unwrap();
        let copy = cmd.clone();
        assert!(Arc::ptr_eq(cmd.program_handle(), copy.program_handle()));
    }
}
