use kube::api::DynamicObject;
use kube::{Api, Client, Config};
use tracing::debug;

use crate::error::MonitorDaemonError;
use crate::selector::ResourceSelector;

pub fn create_client(config: Config) -> Result<Client, MonitorDaemonError> {
    debug!("Connecting to {}", config.cluster_url);
    Ok(Client::try_from(config)?)
}

// empty namespace means all namespaces
pub fn dynamic_api(
    client: Client,
    selector: &ResourceSelector,
    namespace: &str,
) -> Api<DynamicObject> {
    let api_resource = selector.api_resource();
    if namespace.is_empty() {
        Api::all_with(client, &api_resource)
    } else {
        Api::namespaced_with(client, namespace, &api_resource)
    }
}
