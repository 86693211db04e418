use std::path::PathBuf;
use std::time::Duration;

use shared::env::{get_env_var_or, get_optional_env_var, parse_env_var_or};

use crate::constant::{
    DEFAULT_RESYNC_INTERVAL, DEFAULT_SYNC_TIMEOUT, KUBECONFIG_DIR, KUBECONFIG_FILE, MONITOR_GROUP,
    MONITOR_KIND, MONITOR_RESOURCE, MONITOR_VERSION,
};
use crate::error::MonitorDaemonError;
use crate::selector::ResourceSelector;

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub kubeconfig: Option<PathBuf>,
    pub selector: ResourceSelector,
    /// Empty means all namespaces.
    pub namespace: String,
    pub sync_timeout: Duration,
    pub resync_interval: Duration,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            selector: ResourceSelector::default(),
            namespace: String::new(),
            sync_timeout: DEFAULT_SYNC_TIMEOUT,
            resync_interval: DEFAULT_RESYNC_INTERVAL,
        }
    }
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self, MonitorDaemonError> {
        let kubeconfig = kubeconfig_path(
            get_optional_env_var("KUBECONFIG")?,
            get_optional_env_var("HOME")?,
        );
        let selector = ResourceSelector::new(
            &get_env_var_or("MONITOR_GROUP", MONITOR_GROUP)?,
            &get_env_var_or("MONITOR_VERSION", MONITOR_VERSION)?,
            &get_env_var_or("MONITOR_RESOURCE", MONITOR_RESOURCE)?,
            &get_env_var_or("MONITOR_KIND", MONITOR_KIND)?,
        );
        let namespace = get_env_var_or("MONITOR_NAMESPACE", "")?;
        let sync_timeout = Duration::from_secs(parse_env_var_or(
            "SYNC_TIMEOUT_SECS",
            DEFAULT_SYNC_TIMEOUT.as_secs(),
        )?);
        let resync_interval = Duration::from_secs(parse_env_var_or(
            "RESYNC_INTERVAL_SECS",
            DEFAULT_RESYNC_INTERVAL.as_secs(),
        )?);

        Ok(Self {
            kubeconfig,
            selector,
            namespace,
            sync_timeout,
            resync_interval,
        })
    }
}

/// An explicit `KUBECONFIG` wins (first entry of a path list), otherwise
/// `~/.kube/config` when a home directory is known.
pub fn kubeconfig_path(explicit: Option<String>, home: Option<String>) -> Option<PathBuf> {
    if let Some(first) = explicit
        .as_deref()
        .and_then(|paths| std::env::split_paths(paths).find(|p| !p.as_os_str().is_empty()))
    {
        return Some(first);
    }
    home.map(|home| PathBuf::from(home).join(KUBECONFIG_DIR).join(KUBECONFIG_FILE))
}
