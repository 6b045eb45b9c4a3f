/*!
launcher.rs

Launchers hand a finished `things:///` URL to the operating environment.

  Launcher           - async capability: launch(target, cancel)
  OpenLauncher       - spawns `open [-g] <url>` (macOS)
  RecordingLauncher  - records targets and returns a fixed outcome (tests, --dry-run)

`open` returns as soon as the URL has been handed off; it does not wait for
Things to process the command. Cancellation still races the child so a
stuck `open` never blocks the caller.
*/

use std::process::Stdio;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use super::error::LaunchError;

/// Default program used to open URLs.
pub const OPEN_PROGRAM: &str = "open";

#[async_trait]
pub trait Launcher: Send + Sync {
    /// Launch `target` once. Must return promptly with `LaunchError::Canceled`
    /// when `cancel` fires before the launch completes.
    async fn launch(&self, target: &str, cancel: &CancellationToken) -> Result<(), LaunchError>;
}

/* -------------------------------------------------------------------------- */
/* Process launcher                                                           */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone)]
pub struct OpenLauncher {
    activate: bool,
    program: String,
}

impl OpenLauncher {
    /// `activate = false` passes `-g` so Things stays in the background.
    pub fn new(activate: bool) -> Self {
        Self {
            activate,
            program: OPEN_PROGRAM.to_string(),
        }
    }

    /// Override the opener program (same argument convention as `open`).
    #[cfg(test)]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn args(&self, target: &str) -> Vec<String> {
        let mut args = Vec::with_capacity(2);
        if !self.activate {
            args.push("-g".to_string());
        }
        args.push(target.to_string());
        args
    }
}

#[async_trait]
impl Launcher for OpenLauncher {
    async fn launch(&self, target: &str, cancel: &CancellationToken) -> Result<(), LaunchError> {
        if cancel.is_cancelled() {
            return Err(LaunchError::Canceled);
        }

        let mut child = Command::new(&self.program)
            .args(self.args(target))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        tracing::trace!(program = %self.program, pid = ?child.id(), "spawned opener");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                // kill_on_drop covers the case where start_kill races the exit.
                let _ = child.start_kill();
                tracing::debug!(%target, "launch canceled");
                Err(LaunchError::Canceled)
            }
            status = child.wait() => {
                let status = status.map_err(|source| LaunchError::Wait {
                    program: self.program.clone(),
                    source,
                })?;
                if status.success() {
                    Ok(())
                } else {
                    Err(LaunchError::Exit {
                        program: self.program.clone(),
                        status,
                    })
                }
            }
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Recording launcher                                                         */
/* -------------------------------------------------------------------------- */

/// Launcher without side effects: remembers every target it was given.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    calls: Mutex<Vec<String>>,
    failure: Option<String>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every launch is recorded and then fails with `message`.
    #[cfg(test)]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(message.into()),
        }
    }

    /// Targets launched so far, oldest first.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|c| c.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

#[async_trait]
impl Launcher for RecordingLauncher {
    async fn launch(&self, target: &str, cancel: &CancellationToken) -> Result<(), LaunchError> {
        if cancel.is_cancelled() {
            return Err(LaunchError::Canceled);
        }
        match self.calls.lock() {
            Ok(mut calls) => calls.push(target.to_string()),
            Err(poisoned) => poisoned.into_inner().push(target.to_string()),
        }
        match &self.failure {
            Some(msg) => Err(LaunchError::Rejected(msg.clone())),
            None => Ok(()),
        }
    }
}
