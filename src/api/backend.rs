use crate::api::models::{ChatRequest, ChatResponse, UserInfo};
use crate::error::Result;
use async_trait::async_trait;

/// Abstract interface for the remote chat service
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send the user-info record; `Ok` means the service answered with a success status
    async fn submit_user_info(&self, info: &UserInfo) -> Result<()>;

    /// Exchange one user message for the service's reply
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Session identifiers the service currently holds history for
    async fn list_sessions(&self) -> Result<Vec<String>>;
}
