//! Behaviour configuration and localized texts for the widget.

use std::time::Duration;

/// Localized strings shown by the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetText {
    /// Filler text of the incoming entry while the reply is pending
    pub placeholder: String,
    /// Replaces the placeholder when the chat exchange fails
    pub apology: String,
    /// Notification when `/user_info` answers with a non-success status
    pub form_rejected: String,
    /// Notification when `/user_info` cannot be reached
    pub form_unreachable: String,
}

impl Default for WidgetText {
    fn default() -> Self {
        Self {
            placeholder: "...".to_string(),
            apology: "Xin lỗi! Hệ thống đang gặp sự cố. Bạn vui lòng thử lại sau.".to_string(),
            form_rejected: "Gửi thông tin không thành công. Vui lòng thử lại.".to_string(),
            form_unreachable: "Đã xảy ra lỗi khi gửi thông tin của bạn. Vui lòng thử lại."
                .to_string(),
        }
    }
}

/// Configuration for the chat exchange and its keyboard handling
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Pause between the outgoing entry and the placeholder entry
    pub typing_delay: Duration,
    /// Enter submits only when the viewport is wider than this
    pub enter_submit_min_width: u32,
    pub text: WidgetText,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            typing_delay: Duration::from_millis(600),
            enter_submit_min_width: 800,
            text: WidgetText::default(),
        }
    }
}

impl WidgetConfig {
    /// Override the typing delay
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }

    /// Override the localized texts
    pub fn with_text(mut self, text: WidgetText) -> Self {
        self.text = text;
        self
    }
}
