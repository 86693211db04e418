mod error;
mod tracing;

pub use error::TracingSetupError;
pub use self::tracing::setup_tracing;
