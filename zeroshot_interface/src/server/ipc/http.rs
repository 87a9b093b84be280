//! Server IPC – HTTP Client
//! ====================================
//!
//! Thin wrapper around [`ureq`] that provides [`HttpClient`], the crate's [`ServerClient`].
//!
//! * **Global timeout** – A hard limit (see [`TIMEOUT`]) applies to the *entire* request:
//!   connect + read + write. Greedy decoding of a 512 token SQL answer on CPU fits well inside it.
//! * **Error bodies** – Non-2xx responses are read so the server's own message ends up in
//!   [`ClientError::Remote`].
//! * **Raw-byte interface** – JSON helpers live in `ServerClientExt`; this module stays
//!   transport-only.

use std::{
    io,
    io::Read,
    net::{IpAddr, Ipv4Addr, SocketAddr, TcpListener},
    time::Duration,
};

use ureq::Agent;

pub use super::ServerClient;
use super::error::*;

/// Default request timeout (connect + read + write).
pub const TIMEOUT: Duration = Duration::from_secs(600);

/// Default host for locally launched servers.
pub const HOST: &str = "127.0.0.1";

/// Lightweight HTTP/1.1 client backed by [`ureq`].
#[derive(Debug)]
pub struct HttpClient {
    /// Underlying *ureq* connection-pool and HTTP state-machine.
    agent: Agent,
    /// Prefix shared by every request, e.g. `http://127.0.0.1:8080`.
    base_url: String,
}

impl HttpClient {
    /// Creates a client for `http://<host>:<port>`.
    pub fn new(host: &str, port: u16) -> Self {
        Self::from_url(format!("http://{host}:{port}"))
    }

    /// Creates a client for an existing server. A trailing `/` is dropped.
    pub fn from_url<S: Into<String>>(base_url: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let agent = Agent::new_with_config(
            Agent::config_builder()
                .timeout_global(Some(TIMEOUT))
                .http_status_as_error(false)
                .build(),
        );
        let client = Self { agent, base_url };
        crate::trace!("Client created: {client}");
        client
    }

    /// Performs the request and maps *ureq* errors to [`ClientError`].
    ///
    /// * `verb` – `"GET"` or `"POST"`.
    /// * `path` – Must start with `/`.
    /// * `body` – `None` for GET, `Some` for POST (empty slice permitted).
    fn send(&self, verb: &'static str, path: &str, body: Option<&[u8]>) -> Result<Vec<u8>> {
        debug_assert!(path.starts_with('/'));
        let url = format!("{}{}", self.base_url, path);

        let response = match (verb, body) {
            ("GET", _) => self.agent.get(&url).call(),

            ("POST", Some(b)) if !b.is_empty() => self
                .agent
                .post(&url)
                .content_type("application/json")
                .send(b),

            ("POST", _) => self
                .agent
                .post(&url)
                .content_type("application/json")
                .send_empty(),

            _ => unreachable!("unsupported verb"),
        };

        match response {
            Ok(resp) => {
                let code = resp.status().as_u16();
                let reason = resp.status().canonical_reason().unwrap_or("unknown error");
                let reason = reason.to_string();
                let mut body = Vec::new();
                resp.into_body().into_reader().read_to_end(&mut body)?;
                if (200..300).contains(&code) {
                    Ok(body)
                } else {
                    let message = String::from_utf8_lossy(&body).trim().to_string();
                    Err(ClientError::Remote {
                        code,
                        message: if message.is_empty() { reason } else { message },
                    })
                }
            }

            Err(ureq::Error::Timeout(_)) => Err(ClientError::Timeout(TIMEOUT)),

            Err(ureq::Error::Io(e)) => Err(ClientError::Io(e)),

            Err(ureq::Error::Protocol(p)) => Err(ClientError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("protocol error: {p}"),
            ))),

            Err(ureq::Error::BadUri(u)) => Err(ClientError::Setup {
                reason: format!("bad URI: {u}"),
            }),

            Err(other) => Err(ClientError::Io(io::Error::new(
                io::ErrorKind::Other,
                format!("ureq error: {other}"),
            ))),
        }
    }
}

/// Asks the OS for a free TCP port on localhost, then releases it so a server can bind it.
pub fn free_port() -> Result<u16> {
    let listener = TcpListener::bind(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0))
        .map_err(|e| ClientError::Setup {
            reason: format!("failed to obtain an ephemeral port: {e}"),
        })?;
    let port = listener
        .local_addr()
        .map_err(|e| ClientError::Setup {
            reason: format!("could not read local address: {e}"),
        })?
        .port();
    drop(listener);
    Ok(port)
}

impl std::fmt::Display for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HttpClient({:#?})", self.base_url)
    }
}

impl ServerClient for HttpClient {
    fn get_raw(&self, path: &str) -> Result<Vec<u8>> {
        self.send("GET", path, None)
    }

    fn post_raw(&self, path: &str, body: &[u8]) -> Result<Vec<u8>> {
        self.send("POST", path, Some(body))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
