use std::future::Future;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use kube::api::DynamicObject;
use kube::config::KubeconfigError;
use kube::Config;
use serde_json::json;

use crate::credentials::{CredentialSource, KubeCredentialSource};
use crate::selector::ResourceSelector;

pub fn monitor(name: &str, namespace: &str, resource_version: &str) -> DynamicObject {
    let mut obj = DynamicObject::new(name, &ResourceSelector::default().api_resource())
        .within(namespace)
        .data(json!({
            "spec": {
                "url": format!("https://{name}.example.com/healthz"),
                "interval": "30s",
            }
        }));
    obj.metadata.uid = Some(format!("uid-{namespace}-{name}"));
    obj.metadata.resource_version = Some(resource_version.to_owned());
    obj
}

/// Cloneable in-memory sink for asserting on logged lines.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(String::from)
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reads kubeconfig files for real, fakes in-cluster credentials and counts
/// both attempts.
pub struct CountingSource {
    inner: KubeCredentialSource,
    incluster_works: bool,
    kubeconfig_calls: AtomicUsize,
    incluster_calls: AtomicUsize,
}

impl CountingSource {
    fn new(incluster_works: bool) -> Self {
        Self {
            inner: KubeCredentialSource,
            incluster_works,
            kubeconfig_calls: AtomicUsize::new(0),
            incluster_calls: AtomicUsize::new(0),
        }
    }

    pub fn working_incluster() -> Self {
        Self::new(true)
    }

    pub fn failing_incluster() -> Self {
        Self::new(false)
    }

    pub fn kubeconfig_calls(&self) -> usize {
        self.kubeconfig_calls.load(Ordering::SeqCst)
    }

    pub fn incluster_calls(&self) -> usize {
        self.incluster_calls.load(Ordering::SeqCst)
    }
}

impl CredentialSource for CountingSource {
    type KubeconfigError = KubeconfigError;
    type InClusterError = String;

    fn from_kubeconfig(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<Config, KubeconfigError>> {
        self.kubeconfig_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.from_kubeconfig(path)
    }

    fn incluster(&self) -> Result<Config, String> {
        self.incluster_calls.fetch_add(1, Ordering::SeqCst);
        if self.incluster_works {
            Ok(Config::new("https://10.96.0.1:443".parse().unwrap()))
        } else {
            Err("not running in a cluster".to_owned())
        }
    }
}

pub fn write_kubeconfig(dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join("config");
    std::fs::write(
        &path,
        r#"apiVersion: v1
kind: Config
clusters:
- name: local
  cluster:
    server: https://127.0.0.1:6443
    insecure-skip-tls-verify: true
contexts:
- name: local
  context:
    cluster: local
    user: tester
    namespace: monitoring
current-context: local
users:
- name: tester
  user:
    token: not-a-real-token
"#,
    )?;
    Ok(path)
}
