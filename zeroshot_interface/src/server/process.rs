//! Server Process
//! ==============
//!
//! Spawns and supervises the single `llama-server` child owned by a [`LlamaServer`](crate::LlamaServer).
//!
//! Shutdown escalates in two steps: a polite `SIGTERM` (a plain kill on non-unix targets),
//! then a forced kill once [`POLITE_WAIT`] has passed. The guard stops the child on `Drop`,
//! so an early return or a panic in the benchmark loop does not leave a model resident in memory.

use std::{
    path::{Path, PathBuf},
    process::{Child, Command, Stdio},
    sync::Mutex,
    time::Duration,
};

use wait_timeout::ChildExt;

/// Grace period between `SIGTERM` and a forced kill.
pub const POLITE_WAIT: Duration = Duration::from_secs(5);
/// How long to wait for the OS to reap a force-killed child.
pub const FORCE_KILL_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// OS rejected a spawn, kill, wait or similar operation.
    #[error("failed to {action} process: {source}")]
    CommandFailed {
        action: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// We tried an operation the current user is not allowed to perform.
    #[error("insufficient privilege to {action}: {source}")]
    PermissionDenied {
        action: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("server executable not found: {path:?}")]
    ExecutableNotFound { path: PathBuf },

    /// Force-kill window expired and the child is still running.
    #[error("{operation} exceeded {elapsed:?}; PID {pid} still running")]
    TerminationTimeout {
        operation: &'static str,
        elapsed: Duration,
        pid: u32,
    },
}

pub type Result<T> = std::result::Result<T, ProcessError>;

/// RAII handle owning a running server process.
#[derive(Debug)]
pub struct ServerProcessGuard {
    /// `None` once the child has been reaped.
    child: Mutex<Option<Child>>,
    pid: u32,
}

impl ServerProcessGuard {
    /// Spawns `bin` with `args`. Output is discarded; readiness is observed over HTTP.
    pub fn spawn(bin: &Path, args: &[String]) -> Result<Self> {
        let mut cmd = Command::new(bin);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        crate::info!("Starting server process: {:?}", cmd);

        let child = cmd.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ProcessError::ExecutableNotFound {
                path: bin.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => ProcessError::PermissionDenied {
                action: "spawn",
                source: e.into(),
            },
            _ => ProcessError::CommandFailed {
                action: "spawn",
                source: e.into(),
            },
        })?;
        let pid = child.id();
        debug_assert!(pid > 0, "OS returned an invalid PID (0)");

        Ok(Self {
            child: Mutex::new(Some(child)),
            pid,
        })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Returns true once the child has exited (or has already been stopped).
    pub fn has_exited(&self) -> Result<bool> {
        let mut slot = self.child.lock().unwrap_or_else(|p| p.into_inner());
        match slot.as_mut() {
            None => Ok(true),
            Some(child) => {
                let status = child.try_wait().map_err(|e| ProcessError::CommandFailed {
                    action: "get exit status",
                    source: e.into(),
                })?;
                if let Some(status) = status {
                    crate::debug!("Server process {} exited with {status}", self.pid);
                }
                Ok(status.is_some())
            }
        }
    }

    /// Best-effort, idempotent shutdown.
    pub fn stop(&self) -> Result<()> {
        let Some(mut child) = self
            .child
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .take()
        else {
            return Ok(());
        };

        if child
            .try_wait()
            .map_err(|e| ProcessError::CommandFailed {
                action: "get exit status",
                source: e.into(),
            })?
            .is_some()
        {
            return Ok(());
        }

        if let Err(e) = terminate(&mut child) {
            crate::error!("Failed to send TERM to PID {}: {}", self.pid, e);
        }

        if let Some(status) =
            child
                .wait_timeout(POLITE_WAIT)
                .map_err(|e| ProcessError::CommandFailed {
                    action: "polite wait for exit",
                    source: e.into(),
                })?
        {
            crate::info!("Server process exited gracefully with status: {}", status);
            return Ok(());
        }

        child.kill().map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => ProcessError::PermissionDenied {
                action: "force-kill",
                source: e.into(),
            },
            _ => ProcessError::CommandFailed {
                action: "force-kill",
                source: e.into(),
            },
        })?;

        match child
            .wait_timeout(FORCE_KILL_TIMEOUT)
            .map_err(|e| ProcessError::CommandFailed {
                action: "wait after force-kill",
                source: e.into(),
            })? {
            Some(status) => {
                crate::info!("Server force-killed; exit status {status}");
                Ok(())
            }
            None => Err(ProcessError::TerminationTimeout {
                operation: "force-kill",
                elapsed: FORCE_KILL_TIMEOUT,
                pid: self.pid,
            }),
        }
    }
}

impl Drop for ServerProcessGuard {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            crate::error!("Failed to stop server process: {}", e);
        }
    }
}

#[cfg(unix)]
fn terminate(child: &mut Child) -> Result<()> {
    use nix::{
        sys::signal::{kill, Signal},
        unistd::Pid,
    };

    kill(Pid::from_raw(child.id() as i32), Signal::SIGTERM).map_err(|e| {
        ProcessError::CommandFailed {
            action: "send SIGTERM",
            source: e.into(),
        }
    })
}

#[cfg(not(unix))]
fn terminate(child: &mut Child) -> Result<()> {
    child.kill().map_err(|e| ProcessError::CommandFailed {
        action: "terminate",
        source: e.into(),
    })
}
