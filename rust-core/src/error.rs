//! Error types for the gesture sensing engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the engine and its outer surfaces.
#[derive(Error, Debug)]
pub enum Error {
    /// A sample carried NaN or an infinite component. The sample was dropped.
    #[error("non-finite {kind} sample: {values:?}")]
    NonFiniteSample {
        kind: crate::types::SensorKind,
        values: [f32; 3],
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unknown sensor kind '{0}'")]
    UnknownSensorKind(String),
    /// The monitor received a sample while delivery was stopped.
    #[error("monitor is not started")]
    NotStarted,
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed sample record: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed configuration file: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
