//! Spawns `llama-server` and blocks until it answers `/health` with `ok`.

use std::{
    path::PathBuf,
    thread::sleep,
    time::{Duration, Instant},
};

use bon::Builder;

use crate::{
    client::health::{server_status, ServerStatus},
    error::{InterfaceError, InterfaceResult},
    server::{
        args::ServerArgs,
        handle::LlamaServer,
        ipc::http::{free_port, HttpClient, HOST},
        process::ServerProcessGuard,
    },
};

/// Executable looked up on `PATH` when no explicit binary is given.
pub const DEFAULT_SERVER_BIN: &str = "llama-server";

/// Time allowed for downloading and loading the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct LoadBudget(pub Duration);

impl Default for LoadBudget {
    fn default() -> Self {
        LoadBudget(Duration::from_secs(600))
    }
}

impl From<Duration> for LoadBudget {
    fn from(value: Duration) -> Self {
        LoadBudget(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct RetryDelay(pub Duration);

impl Default for RetryDelay {
    fn default() -> Self {
        RetryDelay(Duration::from_millis(250))
    }
}

impl From<Duration> for RetryDelay {
    fn from(value: Duration) -> Self {
        RetryDelay(value)
    }
}

#[derive(Debug, Clone, Builder)]
pub struct LlamaServerLauncher {
    #[builder(into)]
    pub server_bin: Option<PathBuf>,
    pub server_args: ServerArgs,
    #[builder(default, into)]
    pub load_budget: LoadBudget,
    #[builder(default, into)]
    pub retry_delay: RetryDelay,
}

impl LlamaServerLauncher {
    /// Starts the server and returns a handle that owns the process.
    ///
    /// Host and port default to `127.0.0.1` and a free ephemeral port.
    pub fn load(&self) -> InterfaceResult<LlamaServer> {
        let mut server_args = self.server_args.clone();
        let host = server_args.host.get_or_insert_with(|| HOST.to_string()).clone();
        let port = match server_args.port {
            Some(port) => port,
            None => {
                let port = free_port()?;
                server_args.port = Some(port);
                port
            }
        };
        let model_name = server_args
            .alias
            .get_or_insert_with(|| model_name_from_repo(&server_args.hf_repo))
            .clone();

        let bin = self
            .server_bin
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SERVER_BIN));
        let client = HttpClient::new(&host, port);

        if let ServerStatus::Ready | ServerStatus::Loading = server_status(&client) {
            return Err(InterfaceError::ServerLaunch(format!(
                "another server is already listening on {host}:{port}"
            )));
        }

        crate::info!("Launching {} with\n{server_args}", bin.display());
        let guard = ServerProcessGuard::spawn(&bin, &server_args.to_args())?;

        if let Err(e) = self.wait_until_ready(&client, &guard) {
            crate::error!("Failed to start llama-server: {e}");
            if let Err(stop_err) = guard.stop() {
                crate::error!("Failed to stop llama-server after launch failure: {stop_err}");
            }
            return Err(e);
        }

        let server = LlamaServer::new(Box::new(client), Some(guard), model_name);
        crate::info!("Started {server}");
        Ok(server)
    }

    fn wait_until_ready(&self, client: &HttpClient, guard: &ServerProcessGuard) -> InterfaceResult<()> {
        let budget = self.load_budget.0;
        let deadline = Instant::now() + budget;
        loop {
            match server_status(client) {
                ServerStatus::Ready => return Ok(()),
                ServerStatus::Loading => crate::trace!("llama-server is loading the model"),
                // Also reported while the model is still being downloaded.
                ServerStatus::ErrorOrOffline(msg) => crate::trace!("llama-server not up yet: {msg}"),
            }
            if guard.has_exited()? {
                return Err(InterfaceError::ServerLaunch(format!(
                    "server process {} exited before becoming ready",
                    guard.pid()
                )));
            }
            if Instant::now() >= deadline {
                return Err(InterfaceError::ServerLaunch(format!(
                    "timed out after {budget:?} waiting for model to load"
                )));
            }
            sleep(self.retry_delay.0);
        }
    }
}

/// `Qwen/Qwen2.5-7B-Instruct-GGUF:Q8_0` → `Qwen2.5-7B-Instruct-GGUF`.
fn model_name_from_repo(repo: &str) -> String {
    let repo = repo.split_once(':').map_or(repo, |(r, _)| r);
    repo.rsplit_once('/').map_or(repo, |(_, m)| m).to_string()
}
