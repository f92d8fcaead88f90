//! Listeners — the registry mapping event keys to ordered callbacks.
//!
//! Insertion order within a key is invocation order. Lookups never fail: an
//! unknown key reads as an empty sequence, and keys whose sequence becomes
//! empty are dropped. All accessors return copies; the live vectors never
//! leave this module.
//!
//! `max_listeners` caps the total across every key and may be set once.

use std::collections::HashMap;

use crate::callback::{Callback, Handler};
use crate::config::EmitterConfig;
use crate::error::{EmitterError, InvalidArgument, Result};
use crate::types::EventKey;

#[derive(Debug, Default)]
pub struct Listeners {
    by_event: HashMap<EventKey, Vec<Callback>>,
    max_listeners: Option<usize>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configuration. A configured limit counts as set.
    pub fn from_config(config: &EmitterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_limit(config.max_listeners))
    }

    pub(crate) fn with_limit(max_listeners: Option<usize>) -> Self {
        Self {
            by_event: HashMap::new(),
            max_listeners,
        }
    }

    pub fn max_listeners(&self) -> Option<usize> {
        self.max_listeners
    }

    /// Record the listener cap. Fails if a cap was already recorded, or if
    /// more listeners than `limit` are already registered; the limit stays
    /// as it was on failure.
    pub fn set_max_listeners(&mut self, limit: usize) -> Result<()> {
        if let Some(current) = self.max_listeners {
            return Err(EmitterError::Configuration { current });
        }
        if limit == 0 {
            return Err(InvalidArgument::ZeroLimit.into());
        }
        let registered = self.len();
        if registered > limit {
            return Err(EmitterError::LimitBelowCount { limit, registered });
        }
        self.max_listeners = Some(limit);
        Ok(())
    }

    /// Append `callback` under `key`. Nothing changes on failure.
    pub fn add(&mut self, key: EventKey, callback: Callback) -> Result<()> {
        if let Some(limit) = self.max_listeners {
            if self.len() >= limit {
                tracing::debug!(event = %key, limit, "listener rejected: limit reached");
                return Err(EmitterError::CapacityExceeded { limit });
            }
        }
        self.by_event.entry(key).or_default().push(callback);
        Ok(())
    }

    /// Drop every callback under `key`. Returns how many were removed.
    pub fn remove_all(&mut self, key: &EventKey) -> usize {
        self.by_event.remove(key).map_or(0, |callbacks| callbacks.len())
    }

    /// Drop every callback under `key` that matches `handler`, either as the
    /// original handler or as its wrapper. Returns how many were removed.
    pub fn remove_matching(&mut self, key: &EventKey, handler: &Handler) -> usize {
        let Some(callbacks) = self.by_event.get_mut(key) else {
            return 0;
        };
        let before = callbacks.len();
        callbacks.retain(|cb| !cb.matches(handler));
        let removed = before - callbacks.len();
        if callbacks.is_empty() {
            self.by_event.remove(key);
        }
        removed
    }

    /// A copy of the callbacks under `key`, in insertion order.
    pub fn list(&self, key: &EventKey) -> Vec<Callback> {
        self.by_event.get(key).cloned().unwrap_or_default()
    }

    /// Remove every key. The listener cap is kept.
    pub fn clear(&mut self) {
        self.by_event.clear();
    }

    /// Callbacks registered under `key`.
    pub fn count(&self, key: &EventKey) -> usize {
        self.by_event.get(key).map_or(0, Vec::len)
    }

    /// Callbacks registered across all keys, wildcard included.
    pub fn len(&self) -> usize {
        self.by_event.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Named keys that currently have listeners, in no particular order.
    pub fn event_names(&self) -> Vec<EventKey> {
        self.by_event
            .iter()
            .filter(|(key, callbacks)| !key.is_any() && !callbacks.is_empty())
            .map(|(key, _)| key.clone())
            .collect()
    }
}
