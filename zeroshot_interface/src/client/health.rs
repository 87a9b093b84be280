use serde::{Deserialize, Serialize};

use crate::server::ipc::{error::ClientError, ServerClient, ServerClientExt};

/// Body of a successful `GET /health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(PartialEq, Debug, Clone)]
pub enum ServerStatus {
    Ready,
    /// The server is up but still loading (or downloading) the model.
    Loading,
    ErrorOrOffline(String),
}

/// Probes `/health` once. Never fails: transport problems become [`ServerStatus::ErrorOrOffline`].
pub fn server_status(client: &dyn ServerClient) -> ServerStatus {
    match client.get::<HealthResponse>("/health") {
        Ok(HealthResponse { status }) if status == "ok" => ServerStatus::Ready,
        Ok(HealthResponse { status }) if status == "loading model" => ServerStatus::Loading,
        Ok(HealthResponse { status }) => {
            ServerStatus::ErrorOrOffline(format!("unexpected health status: {status}"))
        }
        Err(ClientError::Remote { code: 503, .. }) => ServerStatus::Loading,
        Err(e) => ServerStatus::ErrorOrOffline(e.to_string()),
    }
}
