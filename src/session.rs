//! Session identity shared by the form gate and the chat controller.

use std::sync::OnceLock;
use tracing::{info, warn};

/// Holds the session identifier, which is assigned at most once per page life.
#[derive(Debug, Default)]
pub struct SessionState {
    session_id: OnceLock<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the session identifier.
    ///
    /// Returns `false` and leaves the existing value untouched if one was already set.
    pub fn assign(&self, id: impl Into<String>) -> bool {
        let id = id.into();
        match self.session_id.set(id) {
            Ok(()) => {
                info!("Session established");
                true
            }
            Err(rejected) => {
                warn!("Session already established, ignoring {}", rejected);
                false
            }
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.get().map(String::as_str)
    }

    pub fn is_established(&self) -> bool {
        self.session_id.get().is_some()
    }
}
