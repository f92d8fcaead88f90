//! Emitter configuration.
//!
//! The only recognized option is `max_listeners`, a cap on the total number
//! of listeners across every event key. Absent means unlimited.

use serde::{Deserialize, Serialize};

use crate::error::{InvalidArgument, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    pub max_listeners: Option<usize>,
}

impl EmitterConfig {
    /// Parse a JSON document such as `{"max_listeners": 10}`.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_max_listeners(mut self, limit: usize) -> Self {
        self.max_listeners = Some(limit);
        self
    }

    /// Reject a zero limit.
    pub fn validate(&self) -> Result<()> {
        if self.max_listeners == Some(0) {
            return Err(InvalidArgument::ZeroLimit.into());
        }
        Ok(())
    }
}
