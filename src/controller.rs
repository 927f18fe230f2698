//! The chat exchange controller.
//!
//! Each user submission renders an outgoing entry right away, then runs an
//! exchange task that adds an incoming placeholder after the typing delay,
//! calls the chat service, and rewrites the placeholder with the reply or with
//! the apology text. The message list is scrolled to the bottom once the
//! exchange ends, however it ends.
//!
//! Submissions are not serialized: several exchanges may be in flight at once.
//! Each one captures its own message and placeholder handle, so replies always
//! land in the entry that was created for them, in whatever order they arrive.

use crate::api::{ChatBackend, ChatRequest};
use crate::config::{WidgetConfig, WidgetText};
use crate::session::SessionState;
use crate::ui::{ChatEntry, ChatView, Key, KeyPress};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// How an exchange ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// The placeholder now holds this reply
    Responded(String),
    /// The placeholder now holds the apology and the error marker
    Failed,
}

/// Handle to a running exchange; awaiting it yields its outcome
pub type ExchangeHandle = JoinHandle<ExchangeOutcome>;

/// What the controller did with a keydown event
#[derive(Debug)]
pub enum KeyAction {
    /// The key was consumed as a send action
    Submitted(Option<ExchangeHandle>),
    /// The toolkit should apply its default behaviour (e.g. insert a newline)
    Passthrough,
}

/// Sequences user input, optimistic rendering and the chat request/response cycle.
pub struct ChatController {
    backend: Arc<dyn ChatBackend>,
    view: Arc<dyn ChatView>,
    session: Arc<SessionState>,
    config: WidgetConfig,
    pending: Mutex<Option<String>>,
    input_init_height: u32,
}

impl ChatController {
    /// Create a controller; the input's current height becomes its initial height.
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        view: Arc<dyn ChatView>,
        session: Arc<SessionState>,
        config: WidgetConfig,
    ) -> Self {
        let input_init_height = view.input_content_height();
        Self {
            backend,
            view,
            session,
            config,
            pending: Mutex::new(None),
            input_init_height,
        }
    }

    /// The most recently submitted, trimmed message
    pub fn pending_message(&self) -> Option<String> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    pub fn input_init_height(&self) -> u32 {
        self.input_init_height
    }

    /// Send whatever is in the input.
    ///
    /// Returns `None` without touching anything when the trimmed input is empty.
    /// Must be called from within a Tokio runtime.
    pub fn handle_user_submission(&self) -> Option<ExchangeHandle> {
        let message = self.view.input_value().trim().to_string();
        if message.is_empty() {
            debug!("Ignoring empty submission");
            return None;
        }

        *self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) =
            Some(message.clone());

        self.view.set_input_value("");
        self.view.set_input_height(self.input_init_height);

        self.view.append_entry(ChatEntry::outgoing(message.clone()));
        self.view.scroll_to_bottom();

        let exchange = Exchange {
            backend: self.backend.clone(),
            view: self.view.clone(),
            session: self.session.clone(),
            message,
            typing_delay: self.config.typing_delay,
            text: self.config.text.clone(),
        };

        Some(tokio::spawn(exchange.run()))
    }

    /// Route a keydown on the chat input.
    ///
    /// Plain Enter submits on viewports wider than the configured threshold;
    /// narrower layouts and Shift+Enter keep the newline.
    pub fn handle_keydown(&self, key: KeyPress, viewport_width: u32) -> KeyAction {
        let submits = key.key == Key::Enter
            && !key.shift
            && viewport_width > self.config.enter_submit_min_width;

        if submits {
            KeyAction::Submitted(self.handle_user_submission())
        } else {
            KeyAction::Passthrough
        }
    }

    /// Grow the input to fit its content after the user typed.
    pub fn on_input(&self) {
        self.view.set_input_height(self.input_init_height);
        let fitted = self.view.input_content_height().max(self.input_init_height);
        self.view.set_input_height(fitted);
    }
}

struct Exchange {
    backend: Arc<dyn ChatBackend>,
    view: Arc<dyn ChatView>,
    session: Arc<SessionState>,
    message: String,
    typing_delay: Duration,
    text: WidgetText,
}

impl Exchange {
    async fn run(self) -> ExchangeOutcome {
        tokio::time::sleep(self.typing_delay).await;

        let placeholder = self.view.append_entry(ChatEntry::incoming(self.text.placeholder.clone()));
        self.view.scroll_to_bottom();

        let finalize_view = self.view.clone();
        let _finalize = scopeguard::guard((), move |_| finalize_view.scroll_to_bottom());

        let request =
            ChatRequest::new(self.session.session_id().map(String::from), self.message);
        info!("Dispatching chat exchange for entry {}", placeholder.0);

        match self.backend.chat(&request).await {
            Ok(reply) => {
                self.view.set_entry_text(placeholder, &reply.chat_response);
                ExchangeOutcome::Responded(reply.chat_response)
            }
            Err(e) => {
                warn!("Chat exchange failed: {}", e);
                self.view.mark_entry_error(placeholder);
                self.view.set_entry_text(placeholder, &self.text.apology);
                ExchangeOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ChatResponse, UserInfo};
    use crate::error::{Result, WidgetError};
    use crate::ui::memory_view::{INPUT_INIT_HEIGHT, LINE_HEIGHT};
    use crate::ui::{EntryId, EntryRole, InMemoryView};
    use async_trait::async_trait;
    use tokio::sync::Notify;

    const TEST_DELAY: Duration = Duration::from_millis(20);

    /// Replies `reply: <message>`; `slow` waits, `fail` errors, `hold` waits for release,
    /// `multiline` answers with three lines
    struct StubBackend {
        requests: Mutex<Vec<ChatRequest>>,
        release: Notify,
    }

    impl StubBackend {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                release: Notify::new(),
            }
        }

        fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatBackend for StubBackend {
        async fn submit_user_info(&self, _info: &UserInfo) -> Result<()> {
            Ok(())
        }

        async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
            self.requests.lock().unwrap().push(request.clone());
            match request.chat_request.as_str() {
                "fail" => {
                    return Err(WidgetError::ChatExchangeError("service down".to_string()));
                }
                "slow" => tokio::time::sleep(Duration::from_millis(100)).await,
                "hold" => self.release.notified().await,
                "multiline" => {
                    return Ok(ChatResponse {
                        chat_response: "a\nb\nc".to_string(),
                    });
                }
                _ => {}
            }
            Ok(ChatResponse {
                chat_response: format!("reply: {}", request.chat_request),
            })
        }

        async fn list_sessions(&self) -> Result<Vec<String>> {
            Ok(vec![])
        }
    }

    fn setup() -> (ChatController, Arc<StubBackend>, Arc<InMemoryView>, Arc<SessionState>) {
        setup_with(WidgetConfig::default().with_typing_delay(TEST_DELAY))
    }

    fn setup_with(
        config: WidgetConfig,
    ) -> (ChatController, Arc<StubBackend>, Arc<InMemoryView>, Arc<SessionState>) {
        let backend = Arc::new(StubBackend::new());
        let view = Arc::new(InMemoryView::new());
        let session = Arc::new(SessionState::new());
        let controller = ChatController::new(backend.clone(), view.clone(), session.clone(), config);
        (controller, backend, view, session)
    }

    #[tokio::test]
    async fn test_empty_submission_is_noop() {
        let (controller, backend, view, _session) = setup();

        for input in ["", "   ", "\n\t "] {
            view.set_input_value(input);
            assert!(controller.handle_user_submission().is_none());
            assert_eq!(view.input_value(), input);
        }

        assert!(view.entries().is_empty());
        assert!(backend.requests().is_empty());
        assert_eq!(controller.pending_message(), None);
    }

    #[tokio::test]
    async fn test_outgoing_then_incoming() {
        let (controller, backend, view, _session) = setup();
        view.set_input_value("  Hello  ");

        let handle = controller.handle_user_submission().unwrap();

        assert_eq!(view.entries(), vec![ChatEntry::outgoing("Hello")]);
        assert_eq!(view.input_value(), "");
        assert_eq!(controller.pending_message(), Some("Hello".to_string()));
        assert!(view.is_scrolled_to_bottom());

        let outcome = handle.await.unwrap();

        assert_eq!(outcome, ExchangeOutcome::Responded("reply: Hello".to_string()));
        assert_eq!(
            view.entries(),
            vec![ChatEntry::outgoing("Hello"), ChatEntry::incoming("reply: Hello")]
        );
        assert_eq!(backend.requests()[0].chat_request, "Hello");
        assert!(view.is_scrolled_to_bottom());
    }

    #[tokio::test]
    async fn test_placeholder_visible_while_awaiting() {
        let (controller, backend, view, _session) = setup();
        view.set_input_value("hold");

        let handle = controller.handle_user_submission().unwrap();
        tokio::time::sleep(TEST_DELAY * 5).await;

        let entries = view.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], ChatEntry::incoming("..."));
        assert!(view.is_scrolled_to_bottom());

        backend.release.notify_one();
        handle.await.unwrap();

        assert_eq!(view.entry(EntryId(1)).unwrap().text, "reply: hold");
    }

    #[tokio::test]
    async fn test_failure_rewrites_placeholder() {
        let (controller, _backend, view, _session) = setup();
        view.set_input_value("fail");

        let outcome = controller.handle_user_submission().unwrap().await.unwrap();

        assert_eq!(outcome, ExchangeOutcome::Failed);
        let placeholder = view.entry(EntryId(1)).unwrap();
        assert_eq!(placeholder.role, EntryRole::Incoming);
        assert_eq!(placeholder.text, WidgetText::default().apology);
        assert!(placeholder.is_error);
        assert!(view.is_scrolled_to_bottom());
    }

    #[tokio::test]
    async fn test_request_carries_session_id() {
        let (controller, backend, view, session) = setup();

        view.set_input_value("before");
        controller.handle_user_submission().unwrap().await.unwrap();

        session.assign("a@x.com");
        view.set_input_value("after");
        controller.handle_user_submission().unwrap().await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests[0].session_id, None);
        assert_eq!(requests[1].session_id, Some("a@x.com".to_string()));
    }

    #[tokio::test]
    async fn test_overlapping_exchanges_keep_their_placeholders() {
        let (controller, _backend, view, _session) = setup();

        view.set_input_value("slow");
        let slow = controller.handle_user_submission().unwrap();
        view.set_input_value("fast");
        let fast = controller.handle_user_submission().unwrap();

        assert_eq!(controller.pending_message(), Some("fast".to_string()));

        let (slow, fast) = futures::join!(slow, fast);
        assert_eq!(slow.unwrap(), ExchangeOutcome::Responded("reply: slow".to_string()));
        assert_eq!(fast.unwrap(), ExchangeOutcome::Responded("reply: fast".to_string()));

        let entries = view.entries();
        assert_eq!(&entries[..2], &[ChatEntry::outgoing("slow"), ChatEntry::outgoing("fast")]);

        let mut replies: Vec<_> = entries[2..].iter().map(|e| e.text.clone()).collect();
        replies.sort();
        assert_eq!(replies, vec!["reply: fast".to_string(), "reply: slow".to_string()]);
        assert!(entries[2..].iter().all(|e| e.role == EntryRole::Incoming));
        assert!(view.is_scrolled_to_bottom());
    }

    #[tokio::test]
    async fn test_enter_submits_on_wide_viewport() {
        let (controller, _backend, view, _session) = setup();
        view.set_input_value("Hello");

        match controller.handle_keydown(KeyPress::enter(), 1024) {
            KeyAction::Submitted(Some(handle)) => {
                handle.await.unwrap();
            }
            other => panic!("Expected a submission, got {:?}", other),
        }
        assert_eq!(view.entries().len(), 2);
    }

    #[tokio::test]
    async fn test_enter_passthrough_cases() {
        let (controller, _backend, view, _session) = setup();
        view.set_input_value("Hello");

        assert!(matches!(
            controller.handle_keydown(KeyPress::shift_enter(), 1024),
            KeyAction::Passthrough
        ));
        assert!(matches!(controller.handle_keydown(KeyPress::enter(), 800), KeyAction::Passthrough));
        assert!(matches!(controller.handle_keydown(KeyPress::enter(), 375), KeyAction::Passthrough));
        assert!(matches!(
            controller.handle_keydown(KeyPress::character('a'), 1024),
            KeyAction::Passthrough
        ));

        assert!(view.entries().is_empty());
        assert_eq!(view.input_value(), "Hello");
    }

    #[tokio::test]
    async fn test_enter_with_blank_input_is_consumed_without_effect() {
        let (controller, _backend, view, _session) = setup();
        view.set_input_value("  ");

        assert!(matches!(
            controller.handle_keydown(KeyPress::enter(), 1024),
            KeyAction::Submitted(None)
        ));
        assert!(view.entries().is_empty());
    }

    #[tokio::test]
    async fn test_input_grows_and_resets() {
        let (controller, _backend, view, _session) = setup();
        assert_eq!(controller.input_init_height(), INPUT_INIT_HEIGHT);

        view.set_input_value("one\ntwo\nthree\nfour");
        controller.on_input();
        assert_eq!(view.input_height(), 4 * LINE_HEIGHT);

        view.set_input_value("one");
        controller.on_input();
        assert_eq!(view.input_height(), INPUT_INIT_HEIGHT);

        view.set_input_value("one\ntwo\nthree\nfour");
        controller.on_input();
        controller.handle_user_submission().unwrap().await.unwrap();
        assert_eq!(view.input_height(), INPUT_INIT_HEIGHT);
    }

    #[tokio::test]
    async fn test_placeholder_waits_for_typing_delay() {
        let delay = Duration::from_millis(300);
        let (controller, backend, view, _session) =
            setup_with(WidgetConfig::default().with_typing_delay(delay));
        view.set_input_value("hold");

        let handle = controller.handle_user_submission().unwrap();

        tokio::time::sleep(delay / 6).await;
        assert_eq!(view.entries(), vec![ChatEntry::outgoing("hold")]);
        assert!(backend.requests().is_empty());

        tokio::time::sleep(delay * 2).await;
        assert_eq!(
            view.entries(),
            vec![ChatEntry::outgoing("hold"), ChatEntry::incoming("...")]
        );

        backend.release.notify_one();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_multiline_reply_scrolls_to_new_bottom() {
        let (controller, _backend, view, _session) = setup();
        view.set_input_value("multiline");

        let outcome = controller.handle_user_submission().unwrap().await.unwrap();

        assert_eq!(outcome, ExchangeOutcome::Responded("a\nb\nc".to_string()));
        assert_eq!(view.content_height(), 4 * LINE_HEIGHT);
        assert!(view.is_scrolled_to_bottom());
    }

    #[tokio::test]
    async fn test_multiline_apology_scrolls_to_new_bottom() {
        let text = WidgetText {
            apology: "Sorry!\nThe service is down.\nPlease try again later.".to_string(),
            ..Default::default()
        };
        let (controller, _backend, view, _session) =
            setup_with(WidgetConfig::default().with_typing_delay(TEST_DELAY).with_text(text));
        view.set_input_value("fail");

        let outcome = controller.handle_user_submission().unwrap().await.unwrap();

        assert_eq!(outcome, ExchangeOutcome::Failed);
        assert!(view.entry(EntryId(1)).unwrap().is_error);
        assert_eq!(view.content_height(), 4 * LINE_HEIGHT);
        assert!(view.is_scrolled_to_bottom());
    }
}
