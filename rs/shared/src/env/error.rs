use std::env::VarError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("Failed to read environment variable {1}: {0}")]
    EnvVar(#[source] VarError, String),
    #[error("Invalid value '{value}' for environment variable {key}: {reason}")]
    Parse {
        key: String,
        value: String,
        reason: String,
    },
}
