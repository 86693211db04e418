use std::time::Duration;

pub const MONITOR_GROUP: &str = "k8mon.tpretz.com";
pub const MONITOR_VERSION: &str = "v1";
pub const MONITOR_RESOURCE: &str = "monitors";
pub const MONITOR_KIND: &str = "Monitor";

pub const KUBECONFIG_DIR: &str = ".kube";
pub const KUBECONFIG_FILE: &str = "config";

pub const DEFAULT_SYNC_TIMEOUT: Duration = Duration::from_secs(120);
// zero disables periodic resync
pub const DEFAULT_RESYNC_INTERVAL: Duration = Duration::ZERO;

pub const DEFAULT_LOG_DIRECTIVES: &str = "info";
