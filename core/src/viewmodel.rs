//! Presentation state for the advertisement list screen.
//!
//! # Design
//! `AdvertisementsViewModel` owns an immutable `AdvertisementsState`
//! snapshot published through a `watch` channel. Fetches run on the tokio
//! runtime; their results come back as jobs on the `Dispatcher`, so every
//! transition after Loading is applied on the UI context.
//!
//! A new `load_advertisements()` aborts the load in flight and bumps a
//! generation counter. A completion that was already queued for an older
//! generation is discarded, so the most recent call always decides the
//! final state. Completion jobs hold a `Weak` reference and do nothing once
//! the view model is dropped; dropping it also aborts the in-flight task.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use crate::api::ApiService;
use crate::dispatch::Dispatcher;
use crate::error::ApiError;
use crate::types::Advertisement;

/// Snapshot of everything the list screen renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvertisementsState {
    pub advertisements: Vec<Advertisement>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

pub struct AdvertisementsViewModel {
    inner: Arc<Inner>,
}

struct Inner {
    api: ApiService,
    dispatcher: Arc<dyn Dispatcher>,
    runtime: Handle,
    state: watch::Sender<AdvertisementsState>,
    loads: Mutex<Loads>,
}

#[derive(Default)]
struct Loads {
    generation: u64,
    in_flight: Option<AbortHandle>,
}

impl AdvertisementsViewModel {
    pub fn new(api: ApiService, dispatcher: Arc<dyn Dispatcher>, runtime: Handle) -> Self {
        let (state, _) = watch::channel(AdvertisementsState::default());
        Self {
            inner: Arc::new(Inner {
                api,
                dispatcher,
                runtime,
                state,
                loads: Mutex::new(Loads::default()),
            }),
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> AdvertisementsState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<AdvertisementsState> {
        self.inner.state.subscribe()
    }

    /// Start fetching the advertisement list. Call from the UI context.
    pub fn load_advertisements(&self) {
        let mut loads = self.inner.lock_loads();
        loads.generation += 1;
        let generation = loads.generation;
        if let Some(previous) = loads.in_flight.take() {
            debug!(generation, "superseding in-flight load");
            previous.abort();
        }

        self.inner.state.send_modify(|state| {
            state.is_loading = true;
            state.error_message = None;
        });
        debug!(generation, "loading advertisements");

        let api = self.inner.api.clone();
        let dispatcher = Arc::clone(&self.inner.dispatcher);
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let task = self.inner.runtime.spawn(async move {
            let result = api.fetch_advertisements().await;
            dispatcher.dispatch(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.finish_load(generation, result);
                }
            }));
        });
        loads.in_flight = Some(task.abort_handle());
    }
}

impl Drop for AdvertisementsViewModel {
    fn drop(&mut self) {
        if let Some(task) = self.inner.lock_loads().in_flight.take() {
            task.abort();
        }
    }
}

impl Inner {
    fn lock_loads(&self) -> MutexGuard<'_, Loads> {
        self.loads.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn finish_load(&self, generation: u64, result: Result<Vec<Advertisement>, ApiError>) {
        {
            let mut loads = self.lock_loads();
            if loads.generation != generation {
                debug!(generation, current = loads.generation, "discarding stale load result");
                return;
            }
            loads.in_flight = None;
        }

        self.state.send_modify(|state| {
            state.is_loading = false;
            match result {
                Ok(advertisements) => {
                    debug!(count = advertisements.len(), "advertisements published");
                    state.advertisements = advertisements;
                }
                Err(err) => {
                    warn!(error = %err, "failed to load advertisements");
                    state.error_message = Some(err.to_string());
                }
            }
        });
    }
}
