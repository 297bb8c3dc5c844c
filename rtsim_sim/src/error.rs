// rtsim_sim/src/error.rs

use rtsim_core::error::RtsimError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning a scenario file into a finished run.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario file not found at {0:?}")]
    NotFound(PathBuf),

    #[error("scenario directory not found at {0:?}")]
    MissingDirectory(PathBuf),

    #[error("failed to load scenario from {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    #[error("failed to parse scenario text: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid [time] section: {0}")]
    Time(&'static str),

    #[error("invalid rotation profile for axis '{axis}': {reason}")]
    Profile { axis: String, reason: &'static str },

    #[error(transparent)]
    Engine(#[from] RtsimError),
}

pub type Result<T> = std::result::Result<T, ScenarioError>;
