use serde::{Deserialize, Serialize};

/// One-time user details collected by the form gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl UserInfo {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
        }
    }
}

/// Body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Serialized as `null` before the gate has assigned a session
    pub session_id: Option<String>,
    pub chat_request: String,
}

impl ChatRequest {
    pub fn new(session_id: Option<String>, chat_request: impl Into<String>) -> Self {
        Self {
            session_id,
            chat_request: chat_request.into(),
        }
    }
}

/// Reply of `POST /chat`; unknown fields are ignored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub chat_response: String,
}
