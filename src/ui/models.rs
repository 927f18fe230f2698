use serde::{Deserialize, Serialize};

/// Direction of a chat entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryRole {
    /// Typed by the user
    Outgoing,
    /// Produced by the chat service
    Incoming,
}

impl EntryRole {
    /// Avatar icon shown beside the entry, if any
    pub fn icon(&self) -> Option<&'static str> {
        match self {
            EntryRole::Outgoing => None,
            EntryRole::Incoming => Some("smart_toy"),
        }
    }
}

/// Position of an entry in the append-only message list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(pub usize);

/// One rendered message line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub role: EntryRole,
    pub text: String,
    /// Set when the entry carries the error visual marker
    #[serde(default)]
    pub is_error: bool,
}

impl ChatEntry {
    pub fn outgoing(text: impl Into<String>) -> Self {
        Self {
            role: EntryRole::Outgoing,
            text: text.into(),
            is_error: false,
        }
    }

    pub fn incoming(text: impl Into<String>) -> Self {
        Self {
            role: EntryRole::Incoming,
            text: text.into(),
            is_error: false,
        }
    }
}

/// Regions of the page whose visibility the widget controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    /// The whole chatbot popup, opened by the toggler
    Chatbot,
    UserInfoForm,
    /// The scrollable message list
    Chatbox,
    ChatInput,
}

/// Key identity as far as the widget cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Character(char),
}

/// A keydown event delivered to the chat input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn enter() -> Self {
        Self {
            key: Key::Enter,
            shift: false,
        }
    }

    pub fn shift_enter() -> Self {
        Self {
            key: Key::Enter,
            shift: true,
        }
    }

    pub fn character(c: char) -> Self {
        Self {
            key: Key::Character(c),
            shift: false,
        }
    }
}
