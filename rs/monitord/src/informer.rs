use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use kube::api::{ApiResource, DynamicObject};
use kube::runtime::reflector::store::Writer;
use kube::runtime::reflector::{ObjectRef, Store};
use kube::runtime::watcher::{self, watcher, Error as WatcherError, Event as WatcherEvent};
use kube::runtime::WatchStreamExt;
use kube::Api;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::handler::ResourceEventHandler;

pub type WatchResult = Result<WatcherEvent<DynamicObject>, WatcherError>;

pub trait WatchOrchestrator: Send + 'static {
    fn name(&self) -> &str;

    fn add_event_handler(&mut self, handler: Arc<dyn ResourceEventHandler>);

    // false if the orchestrator stops before the initial list lands
    fn wait_for_sync(&self) -> impl Future<Output = bool> + Send + 'static;

    fn run(self, stop: CancellationToken) -> impl Future<Output = ()> + Send + 'static;
}

pub fn kube_watcher(api: Api<DynamicObject>) -> BoxStream<'static, WatchResult> {
    watcher(api, watcher::Config::default())
        .default_backoff()
        .boxed()
}

enum Notification<'a> {
    Add(&'a DynamicObject),
    Update(Arc<DynamicObject>, &'a DynamicObject),
    Delete(&'a DynamicObject),
    Vanished(Arc<DynamicObject>),
}

/// Drives a watcher stream into a reflector store and turns the raw watch
/// events into add/update/delete notifications.
pub struct Informer<S> {
    name: String,
    stream: S,
    api_resource: ApiResource,
    writer: Writer<DynamicObject>,
    store: Store<DynamicObject>,
    handlers: Vec<Arc<dyn ResourceEventHandler>>,
    resync_interval: Duration,
    // keys delivered since the last Init, used to find objects gone after a relist
    relisted: HashSet<ObjectRef<DynamicObject>>,
}

impl<S> Informer<S>
where
    S: Stream<Item = WatchResult> + Send + Unpin + 'static,
{
    pub fn new(name: impl Into<String>, api_resource: ApiResource, stream: S) -> Self {
        let writer = Writer::new(api_resource.clone());
        let store = writer.as_reader();
        Self {
            name: name.into(),
            stream,
            api_resource,
            writer,
            store,
            handlers: Vec::new(),
            resync_interval: Duration::ZERO,
            relisted: HashSet::new(),
        }
    }

    pub fn with_resync(mut self, interval: Duration) -> Self {
        self.resync_interval = interval;
        self
    }

    pub fn store(&self) -> Store<DynamicObject> {
        self.store.clone()
    }

    async fn run_loop(mut self, stop: CancellationToken) {
        let mut resync = (!self.resync_interval.is_zero()).then(|| {
            let mut interval = interval_at(
                Instant::now() + self.resync_interval,
                self.resync_interval,
            );
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });

        info!("Starting watcher for {}", self.name);
        loop {
            tokio::select! {
                _ = stop.cancelled() => {
                    debug!("{}: stop requested", self.name);
                    break;
                }
                event = self.stream.next() => match event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(err)) => log_watch_error(&self.name, err),
                    None => {
                        warn!("{}: watch stream ended", self.name);
                        break;
                    }
                },
                _ = tick(&mut resync) => self.resync(),
            }
        }
    }

    fn key(&self, obj: &DynamicObject) -> ObjectRef<DynamicObject> {
        ObjectRef::from_obj_with(obj, self.api_resource.clone())
    }

    fn handle_event(&mut self, event: WatcherEvent<DynamicObject>) {
        let mut notifications = Vec::new();
        match &event {
            WatcherEvent::Init => {
                debug!("{}(init)", self.name);
                self.relisted.clear();
            }
            WatcherEvent::InitApply(obj) => {
                let key = self.key(obj);
                notifications.push(self.applied(&key, obj));
                self.relisted.insert(key);
            }
            WatcherEvent::InitDone => {
                debug!("{}(initdone)", self.name);
                notifications.extend(
                    self.store
                        .state()
                        .into_iter()
                        .filter(|cached| !self.relisted.contains(&self.key(cached)))
                        .map(Notification::Vanished),
                );
                self.relisted.clear();
            }
            WatcherEvent::Apply(obj) => {
                let key = self.key(obj);
                notifications.push(self.applied(&key, obj));
            }
            WatcherEvent::Delete(obj) => notifications.push(Notification::Delete(obj)),
        }

        self.writer.apply_watcher_event(&event);

        for notification in notifications {
            self.notify(notification);
        }
    }

    fn applied<'a>(
        &self,
        key: &ObjectRef<DynamicObject>,
        obj: &'a DynamicObject,
    ) -> Notification<'a> {
        match self.store.get(key) {
            Some(old) => Notification::Update(old, obj),
            None => Notification::Add(obj),
        }
    }

    fn resync(&self) {
        let cached = self.store.state();
        debug!("{}: resyncing {} objects", self.name, cached.len());
        for obj in cached {
            self.notify(Notification::Update(obj.clone(), &obj));
        }
    }

    fn notify(&self, notification: Notification<'_>) {
        for handler in &self.handlers {
            match &notification {
                Notification::Add(obj) => handler.on_add(obj),
                Notification::Update(old, new) => handler.on_update(old, new),
                Notification::Delete(obj) => handler.on_delete(obj),
                Notification::Vanished(obj) => handler.on_delete(obj),
            }
        }
    }
}

impl<S> WatchOrchestrator for Informer<S>
where
    S: Stream<Item = WatchResult> + Send + Unpin + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn add_event_handler(&mut self, handler: Arc<dyn ResourceEventHandler>) {
        self.handlers.push(handler);
    }

    fn wait_for_sync(&self) -> impl Future<Output = bool> + Send + 'static {
        let store = self.store.clone();
        async move { store.wait_until_ready().await.is_ok() }
    }

    fn run(self, stop: CancellationToken) -> impl Future<Output = ()> + Send + 'static {
        self.run_loop(stop)
    }
}

async fn tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

fn log_watch_error(name: &str, err: WatcherError) {
    match err {
        WatcherError::WatchError(res) if res.code == 403 => {
            warn!("{name}: watch forbidden, check RBAC for [\"list\", \"watch\"]: {}", res.message)
        }
        WatcherError::InitialListFailed(kube::Error::Api(res)) if res.code == 403 => {
            warn!("{name}: list forbidden, check RBAC for [\"list\", \"watch\"]: {}", res.message)
        }
        err => error!("Error: {name} watcher: {err:?}"),
    }
}
