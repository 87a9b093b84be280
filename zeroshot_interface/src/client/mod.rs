//! Typed requests and responses for the llama.cpp server endpoints used by the agents.

pub mod chat;
pub mod health;
pub mod tokenize;
