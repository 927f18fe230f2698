use crate::api::backend::ChatBackend;
use crate::api::models::{ChatRequest, ChatResponse, UserInfo};
use crate::error::{Result, WidgetError};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response};
use std::collections::HashMap;
use tracing::{debug, info, warn};

const USER_INFO_PATH: &str = "/user_info";
const CHAT_PATH: &str = "/chat";
const SESSIONS_PATH: &str = "/sessions";

/// Configuration for connecting to the chat service
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    /// `None` leaves requests unbounded; a hung service keeps its placeholder
    pub timeout: Option<std::time::Duration>,
    pub headers: HashMap<String, String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("CHAT_WIDGET_HOST")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            timeout: None,
            headers: HashMap::new(),
        }
    }
}

/// Backend speaking JSON over HTTP to the chat service
///
/// Talks to three endpoints under `host`: `POST /user_info`, `POST /chat`
/// and `GET /sessions`.
pub struct HttpChatBackend {
    client: Client,
    config: ApiConfig,
}

impl HttpChatBackend {
    /// Create a backend with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ApiConfig::default())
    }

    /// Create a backend with custom configuration
    pub fn with_config(config: ApiConfig) -> Result<Self> {
        if config.host.trim().is_empty() {
            return Err(WidgetError::ConfigError("chat service host is empty".to_string()));
        }

        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build()?;

        Ok(Self { client, config })
    }

    /// Create backend with custom host
    pub fn with_host(host: impl Into<String>) -> Result<Self> {
        Self::with_config(ApiConfig {
            host: host.into(),
            ..Default::default()
        })
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.host.trim_end_matches('/'), path)
    }

    fn with_headers(&self, mut request: RequestBuilder) -> RequestBuilder {
        for (name, value) in &self.config.headers {
            request = request.header(name, value);
        }
        request
    }

    fn ensure_success(path: &str, response: Response) -> Result<Response> {
        let status = response.status();
        debug!("{} answered {}", path, status);

        if !status.is_success() {
            warn!("{} rejected the request: {}", path, status);
            return Err(WidgetError::ApiError {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn submit_user_info(&self, info: &UserInfo) -> Result<()> {
        info!("Submitting user info for {}", info.email);

        let response = self
            .with_headers(self.client.post(self.url(USER_INFO_PATH)))
            .json(info)
            .send()
            .await?;

        Self::ensure_success(USER_INFO_PATH, response)?;
        Ok(())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        debug!(
            "Sending chat request (session: {:?}, {} chars)",
            request.session_id,
            request.chat_request.chars().count()
        );

        let response = self
            .with_headers(self.client.post(self.url(CHAT_PATH)))
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let response = Self::ensure_success(CHAT_PATH, response)?;
        let body = response.text().await?;
        let reply: ChatResponse = serde_json::from_str(&body)?;

        Ok(reply)
    }

    async fn list_sessions(&self) -> Result<Vec<String>> {
        let response = self
            .with_headers(self.client.get(self.url(SESSIONS_PATH)))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let response = Self::ensure_success(SESSIONS_PATH, response)?;
        let sessions: Vec<String> = serde_json::from_str(&response.text().await?)?;

        info!("Service holds {} sessions", sessions.len());
        Ok(sessions)
    }
}
