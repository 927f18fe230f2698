pub mod memory_view;
pub mod models;
pub mod view;

pub use memory_view::InMemoryView;
pub use models::{ChatEntry, EntryId, EntryRole, Key, KeyPress, Panel};
pub use view::ChatView;
