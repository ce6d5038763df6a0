use thiserror::Error;

use crate::error::ModelError;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unknown roster file format: {path} (expected .json, .yaml or .yml)")]
    UnknownFormat { path: String },

    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },

    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("{owner} references missing {kind} {id}")]
    MissingReference { owner: String, kind: &'static str, id: u32 },

    #[error("{kind} id {id} is out of range (max {max})")]
    IdOutOfRange { kind: &'static str, id: u32, max: u32 },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u32 },

    #[error("Invalid player: {0}")]
    InvalidPlayer(#[from] ModelError),
}
