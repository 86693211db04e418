use std::fmt::Debug;
use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use kube::api::DynamicObject;
use kube::ResourceExt;
use serde::Serialize;
use tracing::{debug, error};

pub trait ResourceEventHandler: Send + Sync {
    fn on_add(&self, obj: &DynamicObject);
    fn on_update(&self, old: &DynamicObject, new: &DynamicObject);
    fn on_delete(&self, obj: &DynamicObject);
}

pub struct EventLogger<W> {
    sink: Mutex<W>,
}

impl EventLogger<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> EventLogger<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    fn emit(&self, line: String) {
        // a panic mid-write leaves nothing worth protecting
        let mut sink = self.sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = writeln!(sink, "{line}").and_then(|_| sink.flush()) {
            error!("Failed to write monitor event: {e}");
        }
    }
}

impl<W: Write + Send> ResourceEventHandler for EventLogger<W> {
    fn on_add(&self, obj: &DynamicObject) {
        debug!("add {}", describe(obj));
        self.emit(format!("New monitor added: {}", render(obj)));
    }

    fn on_update(&self, old: &DynamicObject, new: &DynamicObject) {
        debug!(
            "update {} ({:?} -> {:?})",
            describe(new),
            old.resource_version(),
            new.resource_version()
        );
        self.emit(format!("Monitor updated: {}", render(new)));
    }

    fn on_delete(&self, obj: &DynamicObject) {
        debug!("delete {}", describe(obj));
        self.emit(format!("Monitor deleted: {}", render(obj)));
    }
}

pub fn render<T: Serialize + Debug>(obj: &T) -> String {
    serde_json::to_string(obj).unwrap_or_else(|_| format!("{obj:?}"))
}

fn describe(obj: &DynamicObject) -> String {
    match obj.namespace() {
        Some(namespace) => format!("{namespace}/{}", obj.name_any()),
        None => obj.name_any(),
    }
}
