mod env;
mod error;

pub use env::{get_env_var, get_env_var_or, get_optional_env_var, parse_env_var_or};
pub use error::EnvError;
