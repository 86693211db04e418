use std::sync::Once;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, EnvFilter, FmtSubscriber};

use super::error::TracingSetupError;
use crate::env::get_env_var_or;

static TRACING_INIT: Once = Once::new();

pub fn setup_tracing(default_directives: &str) -> Result<(), TracingSetupError> {
    let mut init_result: Result<(), TracingSetupError> = Ok(());

    // ensures that the subscriber is only initialized once for all threads
    TRACING_INIT.call_once(|| {
        init_result = install_subscriber(default_directives);
    });
    init_result
}

fn install_subscriber(default_directives: &str) -> Result<(), TracingSetupError> {
    let directives = get_env_var_or("RUST_LOG", default_directives)?;
    let filter = EnvFilter::try_new(directives)?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(false)
        .fmt_fields(fmt::format::DefaultFields::new())
        .event_format(
            fmt::format()
                .compact()
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
