//! Handlers and the `Callback` record the registry stores for each listener.
//!
//! A [`Handler`] is a reference-counted invocable; its identity is the
//! allocation it points to, so clones of one handler compare equal while two
//! handlers built from identical closures do not.
//!
//! A [`Callback`] pairs the caller's handler with an optional *wrapper*: the
//! function actually registered in the handler's place when the listener
//! removes itself after a number of firings. Equality against a `Callback`
//! matches either function, so a caller can always deregister with the same
//! handler it registered.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::adapter::{Adapter, Firing};
use crate::types::Args;

// ============================================================================
// Invoke / Handler
// ============================================================================

/// Anything that can be called with the emitted argument list.
pub trait Invoke: Send + Sync {
    fn invoke(&self, args: &Args);
}

impl<F> Invoke for F
where
    F: Fn(&Args) + Send + Sync,
{
    fn invoke(&self, args: &Args) {
        self(args)
    }
}

/// Closure type for event listeners.
pub type ListenerFn = dyn Invoke;

/// Cloneable handle to an invocable. Equality is reference identity.
#[derive(Clone)]
pub struct Handler(Arc<ListenerFn>);

impl Handler {
    pub fn new(f: impl Fn(&Args) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Wrap an existing shared invocable without re-allocating, keeping its
    /// identity.
    pub fn from_invoke(invoke: Arc<ListenerFn>) -> Self {
        Self(invoke)
    }

    pub fn call(&self, args: &Args) {
        self.0.invoke(args)
    }

    pub fn ptr_eq(&self, other: &Handler) -> bool {
        self.addr() == other.addr()
    }

    // Compare data pointers only; the same allocation may be reached through
    // different vtables.
    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", self.addr())
    }
}

impl<F> From<F> for Handler
where
    F: Fn(&Args) + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

// ============================================================================
// Callback
// ============================================================================

struct Inner {
    handler: Handler,
    wrapper: OnceLock<Handler>,
    adapter: Option<Arc<Adapter>>,
}

/// A registered listener. Clones share the same underlying record.
#[derive(Clone)]
pub struct Callback {
    inner: Arc<Inner>,
}

impl Callback {
    /// A plain listener with no wrapper.
    pub fn new(handler: Handler) -> Self {
        Self {
            inner: Arc::new(Inner {
                handler,
                wrapper: OnceLock::new(),
                adapter: None,
            }),
        }
    }

    /// A listener that removes itself after `budget` firings. The adapter
    /// enforcing the budget becomes this callback's wrapper.
    pub fn limited(handler: Handler, budget: u64) -> Self {
        let adapter = Arc::new(Adapter::new(handler.clone(), budget));
        let wrapper = Handler::from_invoke(adapter.clone());
        Self {
            inner: Arc::new(Inner {
                handler,
                wrapper: OnceLock::from(wrapper),
                adapter: Some(adapter),
            }),
        }
    }

    /// The handler the caller supplied.
    pub fn handler(&self) -> &Handler {
        &self.inner.handler
    }

    /// The function registered in the handler's place, if any.
    pub fn wrapper(&self) -> Option<&Handler> {
        self.inner.wrapper.get()
    }

    /// Record the wrapper. Succeeds once; later calls hand the rejected
    /// wrapper back.
    pub fn set_wrapper(&self, wrapper: Handler) -> Result<(), Handler> {
        self.inner.wrapper.set(wrapper)
    }

    /// Firings left before self-removal, or `None` for an unlimited listener.
    pub fn remaining(&self) -> Option<u64> {
        self.inner.adapter.as_ref().map(|a| a.remaining())
    }

    /// Invoke the handler directly. A limited listener's budget is only
    /// spent by emission, so calling a copy from `listeners_for` does not
    /// use it up. Panics from the handler propagate unchanged.
    pub fn call(&self, args: &Args) {
        self.inner.handler.call(args)
    }

    pub(crate) fn fire(&self, args: &Args) -> Firing {
        match &self.inner.adapter {
            Some(adapter) => adapter.fire(args),
            None => {
                self.inner.handler.call(args);
                Firing::Fired
            }
        }
    }

    /// True when `handler` is this callback's handler or its wrapper.
    pub fn matches(&self, handler: &Handler) -> bool {
        self.inner.handler == *handler || self.wrapper() == Some(handler)
    }

    pub fn ptr_eq(&self, other: &Callback) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq<Handler> for Callback {
    fn eq(&self, other: &Handler) -> bool {
        self.matches(other)
    }
}

impl PartialEq<Callback> for Handler {
    fn eq(&self, other: &Callback) -> bool {
        other.matches(self)
    }
}

/// Two callbacks are equal when any function of one is a function of the
/// other.
impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || other.matches(self.handler())
            || self.wrapper().map_or(false, |w| other.matches(w))
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("handler", &self.inner.handler)
            .field("wrapper", &self.wrapper())
            .field("remaining", &self.remaining())
            .finish()
    }
}
