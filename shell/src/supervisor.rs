//! Waiting for a child and classifying how it ended.

use crate::error::ShellError;
use nix::errno::Errno;
use nix::sys::wait::{WaitStatus, waitpid};
use nix::time::{ClockId, clock_gettime};
use nix::unistd::Pid;

const NANOS_PER_SEC: i64 = 1_000_000_000;
const NANOS_PER_MILLI: u64 = 1_000_000;

/// How a child terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Normal exit with the given status.
    Exited(u8),
    /// Killed by the given signal number.
    Signaled(i32),
    Unknown,
}

impl From<WaitStatus> for Outcome {
    fn from(status: WaitStatus) -> Self {
        match status {
            WaitStatus::Exited(_, code) => Outcome::Exited(u8::try_from(code).unwrap_or(u8::MAX)),
            WaitStatus::Signaled(_, signal, _) => Outcome::Signaled(signal as i32),
            _ => Outcome::Unknown,
        }
    }
}

/// Result of one completed child: how it ended and how long it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub outcome: Outcome,
    pub elapsed_ms: u64,
}

/// A sample of the monotonic clock, immune to wall-clock adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    secs: i64,
    nanos: i64,
}

impl Timestamp {
    pub fn now() -> Result<Self, ShellError> {
        let now = clock_gettime(ClockId::CLOCK_MONOTONIC).map_err(ShellError::Clock)?;
        Ok(Self::from_parts(
            i64::from(now.tv_sec()),
            i64::from(now.tv_nsec()),
        ))
    }

    pub const fn from_parts(secs: i64, nanos: i64) -> Self {
        Self { secs, nanos }
    }

    /// Whole milliseconds from `self` to `end`, borrowing a second when `end` has the
    /// smaller sub-second part. Never negative: an `end` before `self` yields 0.
    pub fn elapsed_ms(self, end: Timestamp) -> u64 {
        let mut secs = end.secs - self.secs;
        let mut nanos = end.nanos - self.nanos;
        if nanos < 0 {
            nanos += NANOS_PER_SEC;
            secs -= 1;
        }
        match (u64::try_from(secs), u64::try_from(nanos)) {
            (Ok(secs), Ok(nanos)) => secs
                .saturating_mul(1000)
                .saturating_add(nanos / NANOS_PER_MILLI),
            _ => 0,
        }
    }
}

/// Block until `pid` terminates and report how it ended.
///
/// A wait interrupted by a signal is retried, never taken for a completion.
/// `started` should be sampled right before the child was created.
pub fn wait_for(pid: Pid, started: Timestamp) -> Result<Completion, ShellError> {
    let status = loop {
        match waitpid(pid, None) {
            Ok(status) => break status,
            Err(Errno::EINTR) => continue,
            Err(source) => {
                return Err(ShellError::WaitFailed {
                    pid: pid.as_raw(),
                    source,
                });
            }
        }
    };
    let finished = Timestamp::now()?;
    let completion = Completion {
        outcome: Outcome::from(status),
        elapsed_ms: started.elapsed_ms(finished),
    };
    tracing::debug!(pid = pid.as_raw(), ?completion, "child completed");
    Ok(completion)
}
