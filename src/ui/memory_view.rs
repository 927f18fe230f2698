//! Headless render model of the widget.
//!
//! [`InMemoryView`] keeps the message list, panel visibility, input state and
//! scroll position in memory. Tests drive the widget through it, and terminal
//! front-ends can render from its snapshots.

use crate::ui::models::{ChatEntry, EntryId, Panel};
use crate::ui::view::ChatView;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

/// Height of one text line, in layout units
pub const LINE_HEIGHT: u32 = 22;

/// Initial height of the chat input, in layout units
pub const INPUT_INIT_HEIGHT: u32 = 55;

#[derive(Debug)]
struct ViewState {
    entries: Vec<ChatEntry>,
    visibility: HashMap<Panel, bool>,
    input: String,
    input_height: u32,
    scroll_offset: u32,
    notifications: Vec<String>,
}

/// A [`ChatView`] that renders into memory
#[derive(Debug)]
pub struct InMemoryView {
    state: Mutex<ViewState>,
}

impl InMemoryView {
    /// Create a view in its page-load state: form shown, chat hidden, popup closed
    pub fn new() -> Self {
        let visibility = HashMap::from([
            (Panel::Chatbot, false),
            (Panel::UserInfoForm, true),
            (Panel::Chatbox, false),
            (Panel::ChatInput, false),
        ]);

        Self {
            state: Mutex::new(ViewState {
                entries: Vec::new(),
                visibility,
                input: String::new(),
                input_height: INPUT_INIT_HEIGHT,
                scroll_offset: 0,
                notifications: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the message list in submission order
    pub fn entries(&self) -> Vec<ChatEntry> {
        self.state().entries.clone()
    }

    pub fn entry(&self, id: EntryId) -> Option<ChatEntry> {
        self.state().entries.get(id.0).cloned()
    }

    /// Notifications shown so far, oldest first
    pub fn notifications(&self) -> Vec<String> {
        self.state().notifications.clone()
    }

    pub fn input_height(&self) -> u32 {
        self.state().input_height
    }

    pub fn scroll_offset(&self) -> u32 {
        self.state().scroll_offset
    }

    /// Total height of the rendered message list
    pub fn content_height(&self) -> u32 {
        Self::list_height(&self.state().entries)
    }

    /// True when the newest entry is fully in view
    pub fn is_scrolled_to_bottom(&self) -> bool {
        let state = self.state();
        state.scroll_offset == Self::list_height(&state.entries)
    }

    fn list_height(entries: &[ChatEntry]) -> u32 {
        entries.iter().map(|e| Self::text_height(&e.text)).sum()
    }

    fn text_height(text: &str) -> u32 {
        text.split('\n').count().max(1) as u32 * LINE_HEIGHT
    }
}

impl Default for InMemoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatView for InMemoryView {
    fn append_entry(&self, entry: ChatEntry) -> EntryId {
        let mut state = self.state();
        state.entries.push(entry);
        EntryId(state.entries.len() - 1)
    }

    fn set_entry_text(&self, id: EntryId, text: &str) {
        match self.state().entries.get_mut(id.0) {
            Some(entry) => entry.text = text.to_string(),
            None => warn!("No chat entry with id {}", id.0),
        }
    }

    fn mark_entry_error(&self, id: EntryId) {
        match self.state().entries.get_mut(id.0) {
            Some(entry) => entry.is_error = true,
            None => warn!("No chat entry with id {}", id.0),
        }
    }

    fn set_visible(&self, panel: Panel, visible: bool) {
        self.state().visibility.insert(panel, visible);
    }

    fn is_visible(&self, panel: Panel) -> bool {
        self.state().visibility.get(&panel).copied().unwrap_or(false)
    }

    fn input_value(&self) -> String {
        self.state().input.clone()
    }

    fn set_input_value(&self, value: &str) {
        self.state().input = value.to_string();
    }

    fn input_content_height(&self) -> u32 {
        let state = self.state();
        state.input_height.max(Self::text_height(&state.input))
    }

    fn set_input_height(&self, height: u32) {
        self.state().input_height = height;
    }

    fn scroll_to_bottom(&self) {
        let mut state = self.state();
        state.scroll_offset = Self::list_height(&state.entries);
    }

    fn notify(&self, message: &str) {
        self.state().notifications.push(message.to_string());
    }
}
