// src/types.rs
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compute backend a mining engine can spin up
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Backend {
    /// OpenCL devices
    OpenCl,
    /// CUDA devices
    Cuda,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::OpenCl => write!(f, "opencl"),
            Backend::Cuda => write!(f, "cuda"),
        }
    }
}

/// Engine configuration selecting which backend(s) run
///
/// A mixed configuration runs both backends concurrently against the
/// same work.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    /// OpenCL backend only
    #[default]
    #[clap(name = "opencl")]
    OpenCl,

    /// CUDA backend only
    #[clap(name = "cuda")]
    Cuda,

    /// CUDA and OpenCL side by side
    #[clap(name = "mixed")]
    Mixed,
}

impl EngineMode {
    /// Backends to start for this mode, in start order
    ///
    /// Every backend after the first is started in combined mode.
    pub fn backends(&self) -> &'static [Backend] {
        match self {
            EngineMode::OpenCl => &[Backend::OpenCl],
            EngineMode::Cuda => &[Backend::Cuda],
            EngineMode::Mixed => &[Backend::Cuda, Backend::OpenCl],
        }
    }
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineMode::OpenCl => write!(f, "opencl"),
            EngineMode::Cuda => write!(f, "cuda"),
            EngineMode::Mixed => write!(f, "mixed"),
        }
    }
}

impl FromStr for EngineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "opencl" | "cl" => Ok(EngineMode::OpenCl),
            "cuda" => Ok(EngineMode::Cuda),
            "mixed" | "cuda+opencl" => Ok(EngineMode::Mixed),
            _ => Err(format!("Unknown engine mode: {}", s)),
        }
    }
}
