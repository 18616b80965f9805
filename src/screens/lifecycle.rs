use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use tracing::{warn, Instrument};

/// Shared "still mounted" flag checked by async handlers before they commit
#[derive(Clone, Debug)]
pub struct ScreenLifetime {
    mounted: Arc<AtomicBool>,
}

impl Default for ScreenLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenLifetime {
    pub fn new() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }
}

/// Per-screen state shared with in-flight handlers
pub struct ScreenState<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for ScreenState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> ScreenState<S> {
    pub fn new(state: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Never hold the guard across an await
    pub fn lock(&self) -> MutexGuard<'_, S> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Background loads a screen started on mount, so the screen is usable before they finish
#[derive(Default)]
pub struct PendingLoads {
    tasks: Mutex<Vec<(&'static str, JoinHandle<()>)>>,
}

impl PendingLoads {
    pub fn spawn<F>(&self, name: &'static str, load: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(load.in_current_span());
        self.lock().push((name, handle));
    }

    /// Waits for the named loads; the rest keep running
    pub async fn wait(&self, names: &[&str]) {
        let picked: Vec<_> = {
            let mut tasks = self.lock();
            let (picked, rest): (Vec<_>, Vec<_>) =
                tasks.drain(..).partition(|(name, _)| names.contains(name));
            *tasks = rest;
            picked
        };
        join_all(picked).await;
    }

    pub async fn wait_all(&self) {
        let all = std::mem::take(&mut *self.lock());
        join_all(all).await;
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(&'static str, JoinHandle<()>)>> {
        self.tasks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn join_all(tasks: Vec<(&'static str, JoinHandle<()>)>) {
    for (name, handle) in tasks {
        if let Err(e) = handle.await {
            warn!(load = name, error = %e, "Screen load task failed");
        }
    }
}
