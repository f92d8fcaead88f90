//! Events — the listener API any host type can mix in.
//!
//! A host implements the single required method, [`Events::emitter`], and
//! gets `on` / `off` / `once` / `on_many_times` / `emit` and their wildcard
//! variants for free:
//!
//! ```
//! use emittr::{Emitter, Events, Handler};
//! use serde_json::json;
//!
//! struct Door {
//!     events: Emitter,
//! }
//!
//! impl Events for Door {
//!     fn emitter(&self) -> &Emitter {
//!         &self.events
//!     }
//! }
//!
//! let door = Door { events: Emitter::new() };
//! let opened = Handler::new(|args| println!("opened by {}", args[0]));
//! door.on("open", opened.clone())?
//!     .emit("open", &[json!("alice")])
//!     .off("open", Some(&opened))?;
//! # Ok::<(), emittr::EmitterError>(())
//! ```
//!
//! # Emission
//!
//! `emit` runs two passes: wildcard listeners first, receiving the event name
//! as a leading argument, then the event's own listeners. Each pass works on a
//! snapshot taken when the pass starts, so a listener added during a pass is
//! first called on a later pass, and a listener removed during a pass is still
//! called in that pass.
//!
//! Handler panics unwind out of `emit` unchanged; later listeners in the same
//! pass are not called.

use serde_json::Value;

use crate::adapter::budget_for;
use crate::callback::{Callback, Handler};
use crate::emitter::Emitter;
use crate::error::{InvalidArgument, Result};
use crate::types::{Args, EventKey};

fn require(handler: impl Into<Option<Handler>>) -> Result<Handler> {
    let handler: Option<Handler> = handler.into();
    handler.ok_or_else(|| InvalidArgument::MissingHandler.into())
}

pub trait Events {
    /// The emitter holding this host's listeners.
    fn emitter(&self) -> &Emitter;

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register `handler` for `event`.
    fn on(
        &self,
        event: impl Into<EventKey>,
        handler: impl Into<Option<Handler>>,
    ) -> Result<&Self> {
        let handler = require(handler)?;
        self.emitter().add(event.into(), Callback::new(handler))?;
        Ok(self)
    }

    /// Register `handler` to fire on the next emission of `event` only.
    ///
    /// `off(event, Some(&handler))` still removes it before it fires.
    fn once(
        &self,
        event: impl Into<EventKey>,
        handler: impl Into<Option<Handler>>,
    ) -> Result<&Self> {
        let handler = require(handler)?;
        self.emitter().add(event.into(), Callback::limited(handler, 1))?;
        Ok(self)
    }

    /// Register `handler` to fire on the next `count` emissions of `event`.
    ///
    /// `count` must be a non-negative integer. A count of zero behaves like
    /// [`once`](Events::once).
    fn on_many_times(
        &self,
        event: impl Into<EventKey>,
        count: impl Into<Value>,
        handler: impl Into<Option<Handler>>,
    ) -> Result<&Self> {
        let count: Value = count.into();
        let budget = budget_for(&count)?;
        let handler = require(handler)?;
        self.emitter()
            .add(event.into(), Callback::limited(handler, budget))?;
        Ok(self)
    }

    fn on_any(&self, handler: impl Into<Option<Handler>>) -> Result<&Self> {
        self.on(EventKey::Any, handler)
    }

    fn once_any(&self, handler: impl Into<Option<Handler>>) -> Result<&Self> {
        self.once(EventKey::Any, handler)
    }

    fn on_many_times_any(
        &self,
        count: impl Into<Value>,
        handler: impl Into<Option<Handler>>,
    ) -> Result<&Self> {
        self.on_many_times(EventKey::Any, count, handler)
    }

    // ------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------

    /// Remove listeners for `event`: those matching `handler`, or all of them
    /// when `handler` is `None`. Does nothing if none are registered.
    fn off(&self, event: impl Into<EventKey>, handler: Option<&Handler>) -> Result<&Self> {
        let key = event.into();
        match handler {
            Some(handler) => self.emitter().remove_matching(&key, handler),
            None => self.emitter().remove_all(&key),
        };
        Ok(self)
    }

    /// Remove every listener for every event, wildcard included. The
    /// listener cap is kept.
    fn off_all(&self) -> Result<&Self> {
        self.emitter().clear();
        Ok(self)
    }

    fn off_any(&self, handler: Option<&Handler>) -> Result<&Self> {
        self.off(EventKey::Any, handler)
    }

    // ------------------------------------------------------------------
    // Emission
    // ------------------------------------------------------------------

    /// Notify wildcard listeners with `(event, args...)`, then the listeners
    /// of `event` with `args`.
    fn emit(&self, event: impl Into<EventKey>, args: &Args) -> &Self {
        let key = event.into();
        let emitter = self.emitter();

        let wildcard = emitter.snapshot(&EventKey::Any);
        if !wildcard.is_empty() {
            let mut with_key = Vec::with_capacity(args.len() + 1);
            with_key.push(key.to_value());
            with_key.extend_from_slice(args);
            emitter.dispatch(&EventKey::Any, &wildcard, &with_key);
        }

        if !key.is_any() {
            let callbacks = emitter.snapshot(&key);
            emitter.dispatch(&key, &callbacks, args);
        }
        self
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// A copy of the listeners registered for `event`, in order.
    fn listeners_for(&self, event: impl Into<EventKey>) -> Vec<Callback> {
        self.emitter().snapshot(&event.into())
    }

    fn listeners_for_any(&self) -> Vec<Callback> {
        self.emitter().snapshot(&EventKey::Any)
    }

    fn listener_count(&self, event: impl Into<EventKey>) -> usize {
        self.emitter().count(&event.into())
    }

    /// Listeners across all events, wildcard included.
    fn listener_count_total(&self) -> usize {
        self.emitter().total()
    }

    fn event_names(&self) -> Vec<EventKey> {
        self.emitter().keys()
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Cap the total number of listeners. May be set once.
    fn set_max_listeners(&self, limit: usize) -> Result<&Self> {
        self.emitter().set_limit(limit)?;
        Ok(self)
    }

    fn max_listeners(&self) -> Option<usize> {
        self.emitter().limit()
    }
}
