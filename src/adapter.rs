//! Adapter — the function registered in place of a self-removing listener.
//!
//! An [`Adapter`] holds the caller's handler and a firing budget. Each firing
//! claims one unit of budget *before* the handler runs, so a handler that
//! re-emits its own event cannot fire beyond its budget. Removing the spent
//! listener from the registry is the emitter's job; the adapter only reports
//! what happened through [`Firing`].

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

use crate::callback::{Handler, Invoke};
use crate::error::{InvalidArgument, Result};
use crate::types::Args;

/// Outcome of one attempt to fire a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Firing {
    /// The handler ran and the listener stays registered.
    Fired,
    /// The handler ran and used the last unit of budget.
    Exhausted,
    /// The budget was already spent; the handler did not run.
    Skipped,
}

impl Firing {
    /// Whether the listener should now be removed.
    pub fn is_spent(self) -> bool {
        matches!(self, Self::Exhausted | Self::Skipped)
    }
}

pub struct Adapter {
    handler: Handler,
    remaining: AtomicU64,
}

impl Adapter {
    pub fn new(handler: Handler, budget: u64) -> Self {
        Self {
            handler,
            remaining: AtomicU64::new(budget),
        }
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn remaining(&self) -> u64 {
        self.remaining.load(Ordering::Acquire)
    }

    pub fn is_spent(&self) -> bool {
        self.remaining() == 0
    }

    pub fn fire(&self, args: &Args) -> Firing {
        let claimed = self
            .remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
        match claimed {
            Err(_) => Firing::Skipped,
            Ok(previous) => {
                self.handler.call(args);
                if previous == 1 {
                    Firing::Exhausted
                } else {
                    Firing::Fired
                }
            }
        }
    }
}

impl Invoke for Adapter {
    fn invoke(&self, args: &Args) {
        let _ = self.fire(args);
    }
}

/// Turn a caller-supplied repeat count into a firing budget.
///
/// The count must be a non-negative integer. Zero behaves like a one-shot
/// listener: it fires on the next emission and is then removed.
pub fn budget_for(count: &Value) -> Result<u64> {
    if let Some(n) = count.as_u64() {
        return Ok(n.max(1));
    }
    match count.as_i64() {
        Some(n) => Err(InvalidArgument::NegativeCount(n).into()),
        None => Err(InvalidArgument::NotAnInteger(count.clone()).into()),
    }
}
