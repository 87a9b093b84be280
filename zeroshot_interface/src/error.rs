// top-level error for the public API

#[derive(Debug, thiserror::Error)]
pub enum InterfaceError {
    #[error(transparent)]
    Process(#[from] crate::server::process::ProcessError),

    #[error(transparent)]
    Client(#[from] crate::server::ipc::error::ClientError),

    #[error("invalid {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("server launch failed: {0}")]
    ServerLaunch(String),

    #[error("completion response contained no choices")]
    EmptyCompletion,
}

pub type InterfaceResult<T> = std::result::Result<T, InterfaceError>;
