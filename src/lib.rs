pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod gate;
pub mod session;
pub mod ui;
pub mod widget;

pub use error::{Result, WidgetError};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::api::{ApiConfig, ChatBackend, ChatRequest, ChatResponse, HttpChatBackend, UserInfo};
    pub use crate::config::{WidgetConfig, WidgetText};
    pub use crate::controller::{ChatController, ExchangeHandle, ExchangeOutcome, KeyAction};
    pub use crate::error::{Result, WidgetError};
    pub use crate::gate::FormGate;
    pub use crate::session::SessionState;
    pub use crate::ui::{ChatEntry, ChatView, EntryId, EntryRole, InMemoryView, KeyPress, Panel};
    pub use crate::widget::ChatWidget;
}
