//! Bounded invocation of external desktop-integration tools.

use std::ffi::OsString;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::helper as helper_config;

/// How a helper invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperOutcome {
    Exited { success: bool, code: Option<i32> },
    /// Still running when the wait bound elapsed; left to finish on its own.
    TimedOut,
}

/// Runs an external program and waits for it up to a timeout.
pub trait HelperRunner {
    fn run(
        &self,
        program: &str,
        args: &[OsString],
        timeout: Duration,
    ) -> std::io::Result<HelperOutcome>;
}

impl<H: HelperRunner + ?Sized> HelperRunner for &H {
    fn run(
        &self,
        program: &str,
        args: &[OsString],
        timeout: Duration,
    ) -> std::io::Result<HelperOutcome> {
        (**self).run(program, args, timeout)
    }
}

/// Spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHelperRunner;

impl HelperRunner for SystemHelperRunner {
    fn run(
        &self,
        program: &str,
        args: &[OsString],
        timeout: Duration,
    ) -> std::io::Result<HelperOutcome> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()?;

        let start = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(HelperOutcome::Exited {
                    success: status.success(),
                    code: status.code(),
                });
            }
            if start.elapsed() >= timeout {
                return Ok(HelperOutcome::TimedOut);
            }
            thread::sleep(helper_config::POLL_INTERVAL);
        }
    }
}

/// Run a helper with the configured timeout, downgrading every failure to a warning.
///
/// Returns `true` only if the helper exited successfully.
pub fn run_non_fatal(runner: &impl HelperRunner, program: &str, args: &[OsString]) -> bool {
    debug!("Running {} {:?}", program, args);
    match runner.run(program, args, helper_config::TIMEOUT) {
        Ok(HelperOutcome::Exited { success: true, .. }) => true,
        Ok(HelperOutcome::Exited { code, .. }) => {
            match code {
                Some(code) => warn!("{} exited with status {}", program, code),
                None => warn!("{} was terminated by a signal", program),
            }
            false
        }
        Ok(HelperOutcome::TimedOut) => {
            warn!(
                "{} did not finish within {}s, continuing",
                program,
                helper_config::TIMEOUT.as_secs()
            );
            false
        }
        Err(e) => {
            warn!("Failed to run {}: {}", program, e);
            false
        }
    }
}
