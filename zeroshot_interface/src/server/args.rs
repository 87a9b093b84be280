//! Server Args
//! ===========
//!
//! Typed `llama-server` start-up options. Only the flags a zero-shot benchmark needs are
//! modelled; [`ServerArgs::to_args`] renders them in the order the server documents them.

use std::{fmt, str::FromStr};

use bon::Builder;
use serde::Serialize;

use crate::error::{InterfaceError, InterfaceResult};

/// Hugging Face repository fetched when no model is named.
pub const DEFAULT_HF_REPO: &str = "Qwen/Qwen2.5-7B-Instruct-GGUF";

/// Offload every layer; llama.cpp clamps the count to the model's depth.
const ALL_GPU_LAYERS: u32 = 999;

/// Where the model weights live while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Device {
    Cpu,
    /// CUDA device ordinal.
    Cuda(u32),
    Metal,
}

impl FromStr for Device {
    type Err = InterfaceError;

    fn from_str(s: &str) -> InterfaceResult<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let invalid = || InterfaceError::InvalidConfig {
            field: "device",
            reason: format!("unrecognised device {s:?}; expected cpu, cuda, cuda:<n> or metal"),
        };
        match lower.as_str() {
            "cpu" => Ok(Device::Cpu),
            "cuda" => Ok(Device::Cuda(0)),
            "metal" | "mps" => Ok(Device::Metal),
            other => match other.strip_prefix("cuda:") {
                Some(ordinal) => ordinal.parse().map(Device::Cuda).map_err(|_| invalid()),
                None => Err(invalid()),
            },
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda(n) => write!(f, "cuda:{n}"),
            Device::Metal => write!(f, "metal"),
        }
    }
}

/// Weight precision of the loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Precision {
    #[default]
    Float16,
    Int8,
}

impl Precision {
    pub fn from_use_8bit(use_8bit: bool) -> Self {
        if use_8bit {
            Precision::Int8
        } else {
            Precision::Float16
        }
    }

    /// GGUF quantisation tag requested from the repository.
    pub fn quant_tag(&self) -> &'static str {
        match self {
            Precision::Float16 => "F16",
            Precision::Int8 => "Q8_0",
        }
    }
}

#[derive(Debug, Clone, Serialize, Builder)]
#[builder(on(String, into))]
pub struct ServerArgs {
    /// `<user>/<model>`; a `:quant` suffix already present is kept as given.
    #[builder(default = DEFAULT_HF_REPO.to_string())]
    pub hf_repo: String,
    #[builder(default)]
    pub precision: Precision,
    #[builder(default = Device::Cpu)]
    pub device: Device,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub ctx_size: Option<u32>,
    /// Model name reported back by the server.
    pub alias: Option<String>,
}

impl ServerArgs {
    /// Repository reference passed to `-hf`, including the quantisation tag.
    pub fn hf_reference(&self) -> String {
        if self.hf_repo.contains(':') {
            self.hf_repo.clone()
        } else {
            format!("{}:{}", self.hf_repo, self.precision.quant_tag())
        }
    }

    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["-hf".to_string(), self.hf_reference()];
        if let Some(alias) = &self.alias {
            args.extend(["--alias".to_string(), alias.clone()]);
        }
        if let Some(host) = &self.host {
            args.extend(["--host".to_string(), host.clone()]);
        }
        if let Some(port) = self.port {
            args.extend(["--port".to_string(), port.to_string()]);
        }
        if let Some(ctx_size) = self.ctx_size {
            args.extend(["--ctx-size".to_string(), ctx_size.to_string()]);
        }
        match self.device {
            Device::Cpu => args.extend(["--n-gpu-layers".to_string(), "0".to_string()]),
            Device::Cuda(n) => args.extend([
                "--n-gpu-layers".to_string(),
                ALL_GPU_LAYERS.to_string(),
                "--device".to_string(),
                format!("CUDA{n}"),
            ]),
            Device::Metal => {
                args.extend(["--n-gpu-layers".to_string(), ALL_GPU_LAYERS.to_string()])
            }
        }
        args.extend(["--seed".to_string(), "0".to_string()]);
        args
    }
}

impl fmt::Display for ServerArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ServerArgs:")?;
        writeln!(f, "  {:<10} {}", "model", self.hf_reference())?;
        writeln!(f, "  {:<10} {}", "device", self.device)?;
        if let Some(port) = self.port {
            writeln!(f, "  {:<10} {}", "port", port)?;
        }
        Ok(())
    }
}
