use async_trait::async_trait;

use crate::types::Coordinates;

#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpGetResult, String>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// An absent header is given the benefit of the doubt
    pub fn is_json(&self) -> bool {
        self.content_type.is_empty() || self.content_type.to_ascii_lowercase().contains("json")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

// Device-side ports
#[async_trait]
pub trait LocationPort: Send + Sync {
    /// Suspends until the user answers the permission prompt
    async fn request_permission(&self) -> PermissionStatus;
    async fn current_position(&self) -> Result<Coordinates, String>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailDraft {
    pub subject: String,
    pub recipients: Vec<String>,
}

#[async_trait]
pub trait LinkOpener: Send + Sync {
    async fn open_url(&self, url: &str) -> Result<(), String>;
    async fn compose_mail(&self, draft: &MailDraft) -> Result<(), String>;
}
