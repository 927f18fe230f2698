//! The one-time user-info form that unlocks the chat.

use crate::api::{ChatBackend, UserInfo};
use crate::config::WidgetText;
use crate::error::{Result, WidgetError};
use crate::session::SessionState;
use crate::ui::{ChatView, Panel};
use std::sync::Arc;
use tracing::{info, warn};

/// Sends the user-info record and switches the page from form to chat on success.
pub struct FormGate {
    backend: Arc<dyn ChatBackend>,
    view: Arc<dyn ChatView>,
    session: Arc<SessionState>,
    text: WidgetText,
}

impl FormGate {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        view: Arc<dyn ChatView>,
        session: Arc<SessionState>,
        text: WidgetText,
    ) -> Self {
        Self {
            backend,
            view,
            session,
            text,
        }
    }

    /// Submit the form.
    ///
    /// Exactly one request is made. On failure the user is notified, nothing
    /// else changes, and the form may be submitted again.
    pub async fn submit_user_info(&self, info: UserInfo) -> Result<()> {
        match self.backend.submit_user_info(&info).await {
            Ok(()) => {
                info!("User info accepted, unlocking chat");
                self.session.assign(info.email);
                self.view.set_visible(Panel::UserInfoForm, false);
                self.view.set_visible(Panel::Chatbox, true);
                self.view.set_visible(Panel::ChatInput, true);
                Ok(())
            }
            Err(e) => {
                warn!("User info submission failed: {}", e);
                let notice =
                    if e.is_rejection() { &self.text.form_rejected } else { &self.text.form_unreachable };
                self.view.notify(notice);
                Err(WidgetError::FormSubmissionError(e.to_string()))
            }
        }
    }
}
