use std::fmt::Display;
use std::future::Future;
use std::path::{Path, PathBuf};

use kube::config::{InClusterError, KubeConfigOptions, Kubeconfig, KubeconfigError};
use kube::Config;
use tracing::{debug, info, warn};

use crate::error::MonitorDaemonError;

pub trait CredentialSource {
    type KubeconfigError: Display;
    type InClusterError: Display;

    fn from_kubeconfig(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<Config, Self::KubeconfigError>>;

    fn incluster(&self) -> Result<Config, Self::InClusterError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KubeCredentialSource;

impl CredentialSource for KubeCredentialSource {
    type KubeconfigError = KubeconfigError;
    type InClusterError = InClusterError;

    fn from_kubeconfig(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<Config, KubeconfigError>> {
        let path: PathBuf = path.to_owned();
        async move {
            let kubeconfig = Kubeconfig::read_from(&path)?;
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await
        }
    }

    fn incluster(&self) -> Result<Config, InClusterError> {
        Config::incluster()
    }
}

/// Tries the kubeconfig file first and falls back to in-cluster credentials
/// on any error. In-cluster resolution is attempted at most once.
pub async fn resolve_config<S: CredentialSource>(
    source: &S,
    kubeconfig: Option<&Path>,
) -> Result<Config, MonitorDaemonError> {
    let kubeconfig_error = match kubeconfig {
        Some(path) => match source.from_kubeconfig(path).await {
            Ok(config) => {
                info!("Using kubeconfig {}", path.display());
                return Ok(config);
            }
            Err(e) => {
                debug!("Failed to load kubeconfig {}: {e}", path.display());
                Some(e)
            }
        },
        None => {
            debug!("No home directory, skipping kubeconfig");
            None
        }
    };

    warn!("Falling back to in-cluster config");
    source
        .incluster()
        .map_err(|e| MonitorDaemonError::credentials(kubeconfig_error, e))
}
