use std::ops::Not;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{error::InterfaceResult, server::ipc::ServerClientExt, LlamaServer};

impl LlamaServer {
    /// `POST /tokenize`.
    pub fn tokenize_request(&self, request: &TokenizeRequest) -> InterfaceResult<TokenizeResponse> {
        self.client.post("/tokenize", request).map_err(Into::into)
    }
}

#[derive(Default, Serialize, Deserialize, Debug, Clone, Builder)]
pub struct TokenizeRequest {
    #[builder(into)]
    pub content: String,

    /// Insert special tokens such as BOS.
    #[serde(skip_serializing_if = "<&bool>::not")]
    #[builder(default)]
    pub add_special: bool,

    #[serde(skip_serializing_if = "<&bool>::not")]
    #[builder(default)]
    pub with_pieces: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenizeResponse {
    pub tokens: Vec<TokenOutput>,
}

impl TokenizeResponse {
    pub fn ids(&self) -> Vec<usize> {
        self.tokens.iter().map(TokenOutput::id).collect()
    }
}

/// A bare id, or an id with its text when `with_pieces` was requested.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TokenOutput {
    Id(u32),
    IdWithPiece { id: u32, piece: TokenPiece },
}

impl TokenOutput {
    pub fn id(&self) -> usize {
        match self {
            TokenOutput::Id(id) | TokenOutput::IdWithPiece { id, .. } => *id as usize,
        }
    }
}

/// Text for valid UTF-8 pieces, raw bytes otherwise.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TokenPiece {
    Text(String),
    Bytes(Vec<u8>),
}
