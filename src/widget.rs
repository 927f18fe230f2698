//! Page-level wiring of the chat widget.
//!
//! [`ChatWidget`] owns the form gate and the chat controller, shares one
//! [`SessionState`] between them, and handles the toggler and close controls.
//!
//! # Examples
//!
//! ```ignore
//! use chat_widget::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let view = Arc::new(InMemoryView::new());
//!     let widget = ChatWidget::connect(ApiConfig::default(), WidgetConfig::default(), view.clone())?;
//!
//!     widget.toggle_panel();
//!     widget.submit_user_info(UserInfo::new("A", "1", "a@x.com", "Addr")).await?;
//!
//!     view.set_input_value("Hello");
//!     if let Some(exchange) = widget.controller().handle_user_submission() {
//!         exchange.await.ok();
//!     }
//!     Ok(())
//! }
//! ```

use crate::api::{ApiConfig, ChatBackend, HttpChatBackend, UserInfo};
use crate::config::WidgetConfig;
use crate::controller::ChatController;
use crate::error::Result;
use crate::gate::FormGate;
use crate::session::SessionState;
use crate::ui::{ChatView, Panel};
use std::sync::Arc;
use tracing::debug;

pub struct ChatWidget {
    backend: Arc<dyn ChatBackend>,
    view: Arc<dyn ChatView>,
    session: Arc<SessionState>,
    gate: FormGate,
    controller: ChatController,
}

impl ChatWidget {
    /// Wire a widget around an existing backend and view
    pub fn new(backend: Arc<dyn ChatBackend>, view: Arc<dyn ChatView>, config: WidgetConfig) -> Self {
        let session = Arc::new(SessionState::new());
        let gate = FormGate::new(
            backend.clone(),
            view.clone(),
            session.clone(),
            config.text.clone(),
        );
        let controller =
            ChatController::new(backend.clone(), view.clone(), session.clone(), config);

        Self {
            backend,
            view,
            session,
            gate,
            controller,
        }
    }

    /// Wire a widget talking HTTP to the configured chat service
    pub fn connect(api: ApiConfig, config: WidgetConfig, view: Arc<dyn ChatView>) -> Result<Self> {
        let backend = HttpChatBackend::with_config(api)?;
        Ok(Self::new(Arc::new(backend), view, config))
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn controller(&self) -> &ChatController {
        &self.controller
    }

    /// Submit the user-info form; see [`FormGate::submit_user_info`]
    pub async fn submit_user_info(&self, info: UserInfo) -> Result<()> {
        self.gate.submit_user_info(info).await
    }

    /// Session identifiers the chat service holds history for
    pub async fn list_sessions(&self) -> Result<Vec<String>> {
        self.backend.list_sessions().await
    }

    /// Open the chatbot popup if closed, close it if open
    pub fn toggle_panel(&self) {
        let shown = !self.view.is_visible(Panel::Chatbot);
        debug!("Chatbot panel {}", if shown { "opened" } else { "closed" });
        self.view.set_visible(Panel::Chatbot, shown);
    }

    pub fn close_panel(&self) {
        self.view.set_visible(Panel::Chatbot, false);
    }
}
