#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use tokio::sync::Notify;
use validation::UsernameSource;

pub fn usernames(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[derive(thiserror::Error, Debug)]
#[error("data source unavailable")]
pub struct Unavailable;

pub struct FailingSource;

impl UsernameSource for FailingSource {
    type Error = Unavailable;

    fn fetch_all_usernames(
        &self,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send {
        async { Err(Unavailable) }
    }
}

/// Counts fetches so tests can see how many reads a check issued.
pub struct CountingSource {
    usernames: Vec<String>,
    pub calls: AtomicUsize,
}

impl CountingSource {
    pub fn new(usernames: Vec<String>) -> Self {
        Self {
            usernames,
            calls: AtomicUsize::new(0),
        }
    }
}

impl UsernameSource for CountingSource {
    type Error = Unavailable;

    fn fetch_all_usernames(
        &self,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let usernames = self.usernames.clone();
        async move { Ok(usernames) }
    }
}

/// The first fetch hangs until `open` is called. Later fetches answer immediately.
pub struct GatedSource {
    usernames: Vec<String>,
    calls: AtomicUsize,
    gate: Arc<Notify>,
    first_released: Arc<AtomicBool>,
}

impl GatedSource {
    pub fn new(usernames: Vec<String>) -> Self {
        Self {
            usernames,
            calls: AtomicUsize::new(0),
            gate: Arc::new(Notify::new()),
            first_released: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Yields until the first fetch has been issued.
    pub async fn started(&self) {
        while self.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
    }

    pub fn open(&self) {
        self.gate.notify_one();
    }

    /// Whether the first fetch's future has been dropped, by completing or by being aborted.
    pub fn first_released(&self) -> bool {
        self.first_released.load(Ordering::SeqCst)
    }
}

struct ReleaseGuard(Arc<AtomicBool>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl UsernameSource for GatedSource {
    type Error = Unavailable;

    fn fetch_all_usernames(
        &self,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send {
        let first = self.calls.fetch_add(1, Ordering::SeqCst) == 0;
        let gate = first.then(|| {
            (
                Arc::clone(&self.gate),
                ReleaseGuard(Arc::clone(&self.first_released)),
            )
        });
        let usernames = self.usernames.clone();

        async move {
            if let Some((gate, _guard)) = gate {
                gate.notified().await;
            }
            Ok(usernames)
        }
    }
}

#[cfg(feature = "test-tracing")]
static TRACING_INIT: std::sync::Once = std::sync::Once::new();

#[cfg(feature = "test-tracing")]
pub fn tracing_init() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;

        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .init();
    });
}
