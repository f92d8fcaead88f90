//! Shared value types: event keys and emitted arguments.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// The string that normalizes to [`EventKey::Any`].
pub const WILDCARD: &str = "*";

/// Positional arguments delivered to a handler.
pub type Args = [Value];

// ============================================================================
// EventKey
// ============================================================================

/// Identifier listeners are grouped under.
///
/// Keys are canonicalized on construction: every string-like input becomes a
/// `Named` key except `"*"`, which is the reserved wildcard channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKey {
    Named(Arc<str>),
    /// Listeners under this key fire on every emission.
    Any,
}

impl EventKey {
    pub fn named(name: &str) -> Self {
        Self::from(name)
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Named(name) => &**name,
            Self::Any => WILDCARD,
        }
    }

    /// The leading argument handed to wildcard listeners.
    pub fn to_value(&self) -> Value {
        Value::String(self.as_str().to_owned())
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EventKey {
    fn from(name: &str) -> Self {
        if name == WILDCARD {
            Self::Any
        } else {
            Self::Named(Arc::from(name))
        }
    }
}

impl From<String> for EventKey {
    fn from(name: String) -> Self {
        if name == WILDCARD {
            Self::Any
        } else {
            Self::Named(Arc::from(name))
        }
    }
}

impl From<&String> for EventKey {
    fn from(name: &String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<Arc<str>> for EventKey {
    fn from(name: Arc<str>) -> Self {
        if &*name == WILDCARD {
            Self::Any
        } else {
            Self::Named(name)
        }
    }
}

impl From<&EventKey> for EventKey {
    fn from(key: &EventKey) -> Self {
        key.clone()
    }
}
