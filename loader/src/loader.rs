use std::sync::Arc;

use artifact::ArtifactCache;
use log::{error, info, warn};
use model::Predictor;
use parking_lot::Mutex;
use store::{ObjectRef, ObjectStore};
use tokio::{runtime::Handle, sync::Notify, task};

use crate::{
    error::{LoadErr, Result},
    state::{LoadState, StateKind},
};

/// Owns the model load lifecycle: checks the local cache, else fetches in
/// the background, and publishes the handle through its state cell.
///
/// The mutex guards only state transitions, never the load itself; a
/// poll is an in-memory state check and nothing more. At most one
/// background fetch task exists at any time, enforced by the
/// `NotStarted -> Loading` transition happening under the lock.
pub struct ModelLoader {
    state: Arc<Mutex<LoadState>>,
    settled: Arc<Notify>,
    store: Arc<dyn ObjectStore>,
    cache: Arc<ArtifactCache>,
    object: ObjectRef,
    runtime: Handle,
}

impl Clone for ModelLoader {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            settled: Arc::clone(&self.settled),
            store: Arc::clone(&self.store),
            cache: Arc::clone(&self.cache),
            object: self.object.clone(),
            runtime: self.runtime.clone(),
        }
    }
}

impl ModelLoader {
    /// Creates a new loader in the `NotStarted` state.
    ///
    /// # Arguments
    /// * `store` - The blob store the artifact lives in.
    /// * `cache` - The local on-disk cache.
    /// * `object` - Which object to load.
    ///
    /// # Panics
    /// If called outside a tokio runtime; the loader captures the current
    /// handle so later polls may come from any thread.
    pub fn new(store: Arc<dyn ObjectStore>, cache: ArtifactCache, object: ObjectRef) -> Self {
        Self {
            state: Arc::new(Mutex::new(LoadState::NotStarted)),
            settled: Arc::new(Notify::new()),
            store,
            cache: Arc::new(cache),
            object,
            runtime: Handle::current(),
        }
    }

    /// Polls for the model without ever blocking on the load.
    ///
    /// Returns `Some` once the artifact is ready; `None` while a load is
    /// in flight or after a failure. The first poll drives the state
    /// machine: a cache hit is loaded from disk in this very call (warm
    /// start, no network), a miss spawns the single background fetch.
    ///
    /// After `Failed`, the next poll retries the whole load. Each attempt
    /// is bounded by the store's own retry budget, so a dead store costs
    /// one bounded fetch cycle per poll, not an unbounded spin.
    ///
    /// # Returns
    /// The shared, immutable predictor handle, if ready.
    pub fn get_model(&self) -> Option<Arc<Predictor>> {
        {
            let mut state = self.state.lock();
            match &*state {
                LoadState::Ready(model) => return Some(Arc::clone(model)),
                LoadState::Loading => return None,
                LoadState::NotStarted => {}
                LoadState::Failed(err) => {
                    warn!("previous model load failed, retrying: {err}");
                }
            }
            *state = LoadState::Loading;
        }

        // Lock released; this caller alone drives the transition out of
        // `Loading`, so concurrent polls cannot spawn a second load.
        if self.cache.exists() {
            match self.cache.load() {
                Ok(model) => {
                    let model = Arc::new(model);
                    self.publish(LoadState::Ready(Arc::clone(&model)));
                    info!(
                        "model loaded from local cache at {}",
                        self.cache.path().display()
                    );
                    return Some(model);
                }
                Err(err) if err.is_corrupt() => {
                    // A poisoned cache file must not masquerade as a miss;
                    // report it loudly, then fall back to a fresh fetch.
                    error!(
                        "cached artifact at {} is corrupt, refetching: {err}",
                        self.cache.path().display()
                    );
                }
                Err(err) => {
                    self.publish(LoadState::Failed(Arc::new(err.into())));
                    return None;
                }
            }
        }

        self.spawn_fetch();
        None
    }

    /// Returns the current lifecycle state without touching the load.
    pub fn state(&self) -> StateKind {
        self.state.lock().kind()
    }

    /// Waits until the loader leaves `Loading`.
    ///
    /// For startup logging and tests; request handlers poll `get_model`
    /// and never wait.
    pub async fn wait_settled(&self) {
        loop {
            let settled = self.settled.notified();
            if self.state.lock().kind() != StateKind::Loading {
                return;
            }
            settled.await;
        }
    }

    fn publish(&self, next: LoadState) {
        *self.state.lock() = next;
        self.settled.notify_waiters();
    }

    fn spawn_fetch(&self) {
        info!(
            "fetching model artifact {}/{} in the background",
            self.object.bucket, self.object.key
        );

        let loader = self.clone();
        self.runtime.spawn(async move {
            match loader.fetch_and_cache().await {
                Ok(model) => {
                    info!("model artifact ready");
                    loader.publish(LoadState::Ready(model));
                }
                Err(err) => {
                    error!("model load failed: {err}");
                    loader.publish(LoadState::Failed(Arc::new(err)));
                }
            }
        });
    }

    async fn fetch_and_cache(&self) -> Result<Arc<Predictor>> {
        let bytes = self.store.fetch(&self.object).await?;
        let cache = Arc::clone(&self.cache);

        // Decoding gigabytes is CPU-bound; keep it off the async workers.
        let model = task::spawn_blocking(move || -> Result<Predictor> {
            let model = artifact::decode(&bytes)?;

            if let Err(err) = cache.save(&model) {
                // Serving can proceed without the cache; the next cold
                // start just pays the fetch again.
                warn!(
                    "failed to cache artifact at {}: {err}",
                    cache.path().display()
                );
            }

            Ok(model)
        })
        .await
        .map_err(|e| LoadErr::Background(e.to_string()))??;

        Ok(Arc::new(model))
    }
}
