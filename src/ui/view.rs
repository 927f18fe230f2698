use crate::ui::models::{ChatEntry, EntryId, Panel};

/// Capabilities the widget needs from whatever toolkit renders it.
///
/// Methods take `&self` because a view is shared between the event handlers
/// and every in-flight exchange; implementations use interior mutability.
pub trait ChatView: Send + Sync {
    /// Append an entry to the message list and return its handle
    fn append_entry(&self, entry: ChatEntry) -> EntryId;

    /// Replace the text of an existing entry
    fn set_entry_text(&self, id: EntryId, text: &str);

    /// Give an existing entry the error visual marker
    fn mark_entry_error(&self, id: EntryId);

    fn set_visible(&self, panel: Panel, visible: bool);

    fn is_visible(&self, panel: Panel) -> bool;

    fn input_value(&self) -> String;

    fn set_input_value(&self, value: &str);

    /// Height the input needs to show its whole content at its current height
    fn input_content_height(&self) -> u32;

    fn set_input_height(&self, height: u32);

    /// Scroll the message list so the newest entry is visible
    fn scroll_to_bottom(&self);

    /// Show a blocking notification to the user
    fn notify(&self, message: &str);
}
