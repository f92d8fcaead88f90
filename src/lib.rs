//! Event-emitter mixin: named, one-shot, count-limited and wildcard
//! listeners over a synchronous, in-process registry.
//!
//! # Modules
//!
//! - [`events`] — the [`Events`] trait hosts implement to gain the API.
//! - [`emitter`] — [`Emitter`], the registry owner a host embeds.
//! - [`listeners`] — [`Listeners`], event key to ordered callbacks.
//! - [`callback`] — [`Handler`] and [`Callback`] with their equality rules.
//! - [`adapter`] — firing budgets for self-removing listeners.
//! - [`config`] — [`EmitterConfig`].

pub mod adapter;
pub mod callback;
pub mod config;
pub mod emitter;
pub mod error;
pub mod events;
pub mod listeners;
pub mod types;

pub use callback::{Callback, Handler, Invoke};
pub use config::EmitterConfig;
pub use emitter::Emitter;
pub use error::{EmitterError, InvalidArgument, Result};
pub use events::Events;
pub use listeners::Listeners;
pub use types::{Args, EventKey, WILDCARD};
