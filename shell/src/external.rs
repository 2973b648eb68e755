//! Launching a [`Command`] as a child process.
//!
//! The child goes through three stages: spawned, redirections bound, and finally
//! either replaced by the requested program or terminated with
//! [`CHILD_FAILURE_STATUS`]. No code path returns from the child into shell logic.

use crate::command::{CHILD_FAILURE_STATUS, Command, RedirectTarget};
use crate::error::ShellError;
use nix::errno::Errno;
use nix::fcntl::{OFlag, open};
use nix::libc::{STDIN_FILENO, STDOUT_FILENO, mode_t};
use nix::sys::stat::Mode;
use nix::unistd::{ForkResult, Pid, dup2, execvp, fork};
use std::convert::Infallible;
use std::io::Write;
use std::os::fd::{AsRawFd, FromRawFd, IntoRawFd, OwnedFd, RawFd};
use std::sync::Arc;

/// Permission bits of files created by `>`, before the umask.
const OUTPUT_FILE_MODE: mode_t = 0o644;

/// Fork a child that runs `command`, and return its pid without waiting for it.
///
/// The parent's own standard streams are never touched: redirections are applied
/// in the child only. Callers should flush buffered output before calling this,
/// otherwise the child inherits a copy of the pending bytes.
pub fn spawn(command: &Command) -> Result<Pid, ShellError> {
    // SAFETY: the child only opens files, duplicates descriptors, writes one error
    // line and then either execs or `_exit`s. It never returns to the caller and
    // never allocates: paths, argv and the names its errors carry were all built
    // before the fork.
    match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => Ok(child),
        Ok(ForkResult::Child) => run_child(command),
        Err(errno) => Err(ShellError::ForkFailed(errno)),
    }
}

fn run_child(command: &Command) -> ! {
    let failure = match replace_image(command) {
        Ok(never) => match never {},
        Err(err) => err,
    };
    let _ = writeln!(std::io::stderr(), "Error: {failure}");
    // SAFETY: `_exit` skips atexit handlers and stdio flushing, both of which
    // belong to the parent.
    unsafe { nix::libc::_exit(CHILD_FAILURE_STATUS) }
}

/// Only returns on failure.
fn replace_image(command: &Command) -> Result<Infallible, ShellError> {
    bind_redirections(command)?;
    execvp(command.exec_name(), command.argv()).map_err(|source| exec_failed(command, source))
}

fn exec_failed(command: &Command, source: Errno) -> ShellError {
    ShellError::ExecFailed {
        program: Arc::clone(command.program_handle()),
        source,
    }
}

fn bind_redirections(command: &Command) -> Result<(), ShellError> {
    if let Some(target) = command.output_target() {
        let flags = OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC;
        let fd = open_target(target, flags, Mode::from_bits_truncate(OUTPUT_FILE_MODE))?;
        bind(fd, STDOUT_FILENO, target, "standard output")?;
    }
    if let Some(target) = command.input_target() {
        let fd = open_target(target, OFlag::O_RDONLY, Mode::empty())?;
        bind(fd, STDIN_FILENO, target, "standard input")?;
    }
    Ok(())
}

fn open_target(target: &RedirectTarget, flags: OFlag, mode: Mode) -> Result<OwnedFd, ShellError> {
    let fd = open(target.c_path.as_c_str(), flags, mode).map_err(|source| {
        ShellError::RedirectOpenFailed {
            path: Arc::clone(&target.path),
            source,
        }
    })?;
    // SAFETY: `open` just returned this descriptor and nothing else owns it.
    Ok(unsafe { OwnedFd::from_raw_fd(fd) })
}

/// Point `stream_fd` at `fd`. The original descriptor closes when it drops.
fn bind(
    fd: OwnedFd,
    stream_fd: RawFd,
    target: &RedirectTarget,
    stream: &'static str,
) -> Result<(), ShellError> {
    if fd.as_raw_fd() == stream_fd {
        // The stream was closed and `open` reused its number: already in place.
        let _ = fd.into_raw_fd();
        return Ok(());
    }
    dup2(fd.as_raw_fd(), stream_fd)
        .map(drop)
        .map_err(|source| ShellError::RedirectBindFailed {
            path: Arc::clone(&target.path),
            stream,
            source,
        })
}
