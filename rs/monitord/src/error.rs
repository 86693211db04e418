use std::fmt::Display;

use shared::{env::EnvError, tracing::TracingSetupError};

#[derive(Debug, thiserror::Error)]
pub enum MonitorDaemonError {
    #[error(
        "Failed to resolve cluster credentials: kubeconfig: {}, in-cluster: {incluster}",
        .kubeconfig.as_deref().unwrap_or("no kubeconfig path")
    )]
    Credentials {
        kubeconfig: Option<String>,
        incluster: String,
    },
    #[error("Kubernetes client error: {0}")]
    KubeError(#[from] kube::Error),
    #[error("Environment variable error: {0}")]
    EnvError(#[from] EnvError),
    #[error("Tracing setup error: {0}")]
    TracingSetupError(#[from] TracingSetupError),
    #[error("Cache for {0} did not sync within {1:?}")]
    SyncTimeout(String, std::time::Duration),
    #[error("Watcher for {0} stopped before the initial sync completed")]
    SyncFailed(String),
    #[error("Watcher for {0} stopped unexpectedly")]
    WatcherStopped(String),
    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

impl MonitorDaemonError {
    pub fn credentials(kubeconfig: Option<impl Display>, incluster: impl Display) -> Self {
        Self::Credentials {
            kubeconfig: kubeconfig.map(|e| e.to_string()),
            incluster: incluster.to_string(),
        }
    }
}
