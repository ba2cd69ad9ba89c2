use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading field definitions or driving the terminal.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to read config file {path:?}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },
    #[error("failed to parse yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown preset {name:?}, use any of {known:?}")]
    UnknownPreset { name: String, known: Vec<String> },
    #[error("field {id:?} needs either a mask or a preset")]
    MissingMask { id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
