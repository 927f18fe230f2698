pub mod backend;
pub mod http;
pub mod models;

pub use backend::ChatBackend;
pub use http::{ApiConfig, HttpChatBackend};
pub use models::{ChatRequest, ChatResponse, UserInfo};
