use std::env::{var, VarError};
use std::fmt::Display;
use std::str::FromStr;

use super::EnvError;

pub fn get_env_var(key: &str) -> Result<String, EnvError> {
    var(key).map_err(|e| EnvError::EnvVar(e, key.to_owned()))
}

// unset and empty both count as missing, non-unicode values are an error
pub fn get_optional_env_var(key: &str) -> Result<Option<String>, EnvError> {
    match get_env_var(key) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(EnvError::EnvVar(VarError::NotPresent, _)) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn get_env_var_or(key: &str, default: &str) -> Result<String, EnvError> {
    Ok(get_optional_env_var(key)?.unwrap_or_else(|| default.to_owned()))
}

pub fn parse_env_var_or<T>(key: &str, default: T) -> Result<T, EnvError>
where
    T: FromStr,
    T::Err: Display,
{
    match get_optional_env_var(key)? {
        Some(value) => value.trim().parse().map_err(|e: T::Err| EnvError::Parse {
            key: key.to_owned(),
            reason: e.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
