//! Emitter — owner of one lazily-created listener registry.
//!
//! Every method takes `&self`. The registry sits behind a
//! `parking_lot::Mutex` that is released before any handler runs, so handlers
//! may call `on()`/`off()`/`emit()` on the same emitter during an emission.
//!
//! Embed an `Emitter` in a host type and implement [`Events`] for the host to
//! give it the full listener API.
//!
//! [`Events`]: crate::events::Events

use parking_lot::Mutex;

use crate::adapter::Firing;
use crate::callback::{Callback, Handler};
use crate::config::EmitterConfig;
use crate::error::{EmitterError, Result};
use crate::events::Events;
use crate::listeners::Listeners;
use crate::types::{Args, EventKey};

#[derive(Debug, Default)]
pub struct Emitter {
    /// `None` until the first write.
    listeners: Mutex<Option<Listeners>>,
    config: EmitterConfig,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EmitterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            listeners: Mutex::new(None),
            config,
        })
    }

    /// Whether the registry has been created yet.
    pub fn is_initialized(&self) -> bool {
        self.listeners.lock().is_some()
    }

    // ------------------------------------------------------------------
    // Registry access
    // ------------------------------------------------------------------

    fn write<R>(&self, f: impl FnOnce(&mut Listeners) -> R) -> R {
        let mut guard = self.listeners.lock();
        let listeners =
            guard.get_or_insert_with(|| Listeners::with_limit(self.config.max_listeners));
        f(listeners)
    }

    /// Read without creating the registry; `default` stands in for an
    /// uninitialized one.
    fn read<R>(&self, default: R, f: impl FnOnce(&Listeners) -> R) -> R {
        self.listeners.lock().as_ref().map_or(default, f)
    }

    pub(crate) fn add(&self, key: EventKey, callback: Callback) -> Result<()> {
        self.write(|listeners| {
            listeners.add(key.clone(), callback)?;
            tracing::trace!(event = %key, count = listeners.count(&key), "listener added");
            Ok(())
        })
    }

    pub(crate) fn remove_matching(&self, key: &EventKey, handler: &Handler) -> usize {
        let removed = self.write(|listeners| listeners.remove_matching(key, handler));
        if removed > 0 {
            tracing::trace!(event = %key, removed, "listeners removed");
        }
        removed
    }

    pub(crate) fn remove_all(&self, key: &EventKey) -> usize {
        let removed = self.write(|listeners| listeners.remove_all(key));
        if removed > 0 {
            tracing::trace!(event = %key, removed, "all listeners for event removed");
        }
        removed
    }

    pub(crate) fn clear(&self) {
        let removed = self.write(|listeners| {
            let removed = listeners.len();
            listeners.clear();
            removed
        });
        tracing::debug!(removed, "listener registry cleared");
    }

    pub(crate) fn snapshot(&self, key: &EventKey) -> Vec<Callback> {
        self.read(Vec::new(), |listeners| listeners.list(key))
    }

    pub(crate) fn count(&self, key: &EventKey) -> usize {
        self.read(0, |listeners| listeners.count(key))
    }

    pub(crate) fn total(&self) -> usize {
        self.read(0, Listeners::len)
    }

    pub(crate) fn keys(&self) -> Vec<EventKey> {
        self.read(Vec::new(), Listeners::event_names)
    }

    pub(crate) fn set_limit(&self, limit: usize) -> Result<()> {
        let result = self.write(|listeners| listeners.set_max_listeners(limit));
        if let Err(EmitterError::Configuration { current }) = &result {
            tracing::debug!(current, requested = limit, "max listeners already set");
        }
        result
    }

    pub(crate) fn limit(&self) -> Option<usize> {
        self.read(self.config.max_listeners, Listeners::max_listeners)
    }

    /// Fire each callback of a snapshot in order. A callback whose budget is
    /// spent is removed from `key` through its wrapper.
    pub(crate) fn dispatch(&self, key: &EventKey, callbacks: &[Callback], args: &Args) {
        for callback in callbacks {
            if callback.fire(args) == Firing::Fired {
                continue;
            }
            if let Some(wrapper) = callback.wrapper() {
                let removed = self.write(|listeners| listeners.remove_matching(key, wrapper));
                if removed > 0 {
                    tracing::trace!(event = %key, "limited listener removed itself");
                }
            }
        }
    }
}

impl Events for Emitter {
    fn emitter(&self) -> &Emitter {
        self
    }
}
