use monitord::{
    config::DaemonConfig, constant::DEFAULT_LOG_DIRECTIVES, credentials::KubeCredentialSource,
    lifecycle::start,
};
use shared::tracing::setup_tracing;
use std::error::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    setup_tracing(DEFAULT_LOG_DIRECTIVES)?;

    let config = DaemonConfig::from_env()?;
    let scope = if config.namespace.is_empty() {
        "all namespaces"
    } else {
        config.namespace.as_str()
    };
    info!("Watching {} in {scope}", config.selector);

    let stop = CancellationToken::new();
    tokio::spawn(cancel_on_shutdown(stop.clone()));

    start(config, &KubeCredentialSource, stop).await?;
    info!("monitord stopped");
    Ok(())
}

// Takes the token by value: the stop signal is cancelled at most once.
async fn cancel_on_shutdown(stop: CancellationToken) {
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                error!("Failed to listen for Ctrl-C: {e}");
                return;
            }
        }
        _ = terminate => {}
    }
    info!("Shutdown signal received");
    stop.cancel();
}
