use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::client::{create_client, dynamic_api};
use crate::config::DaemonConfig;
use crate::credentials::{resolve_config, CredentialSource};
use crate::error::MonitorDaemonError;
use crate::handler::{EventLogger, ResourceEventHandler};
use crate::informer::{kube_watcher, Informer, WatchOrchestrator};

pub async fn start<C: CredentialSource>(
    config: DaemonConfig,
    credentials: &C,
    stop: CancellationToken,
) -> Result<(), MonitorDaemonError> {
    let kube_config = resolve_config(credentials, config.kubeconfig.as_deref()).await?;
    let client = create_client(kube_config)?;
    let api = dynamic_api(client, &config.selector, &config.namespace);

    if !config.resync_interval.is_zero() {
        info!("Resyncing {} every {:?}", config.selector, config.resync_interval);
    }
    let mut informer = Informer::new(
        config.selector.to_string(),
        config.selector.api_resource(),
        kube_watcher(api),
    )
    .with_resync(config.resync_interval);

    let logger: Arc<dyn ResourceEventHandler> = Arc::new(EventLogger::stdout());
    informer.add_event_handler(logger);

    run(informer, config.sync_timeout, stop).await
}

pub async fn run<O: WatchOrchestrator>(
    orchestrator: O,
    sync_timeout: Duration,
    stop: CancellationToken,
) -> Result<(), MonitorDaemonError> {
    let name = orchestrator.name().to_owned();
    let synced = orchestrator.wait_for_sync();
    let watch_stop = stop.child_token();
    let mut handle = tokio::spawn(orchestrator.run(watch_stop.clone()));

    // stop cancels watch_stop too, so both branches can be ready at once
    let wait = tokio::select! {
        biased;
        _ = stop.cancelled() => None,
        res = tokio::time::timeout(sync_timeout, synced) => Some(res),
    };
    match wait {
        None => {
            info!("Stop requested before {name} synced");
            handle.await?;
            return Ok(());
        }
        Some(Err(_)) => {
            watch_stop.cancel();
            handle.await?;
            return Err(MonitorDaemonError::SyncTimeout(name, sync_timeout));
        }
        Some(Ok(false)) => {
            handle.await?;
            if stop.is_cancelled() {
                return Ok(());
            }
            return Err(MonitorDaemonError::SyncFailed(name));
        }
        Some(Ok(true)) => info!("Cache for {name} synced"),
    }

    tokio::select! {
        biased;
        _ = stop.cancelled() => {
            info!("Stopping watcher for {name}");
            handle.await?;
            Ok(())
        }
        res = &mut handle => {
            res?;
            if stop.is_cancelled() {
                return Ok(());
            }
            warn!("Watcher for {name} exited before stop was requested");
            Err(MonitorDaemonError::WatcherStopped(name))
        }
    }
}
