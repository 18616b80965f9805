use std::sync::Arc;

use tracing::{info, instrument};

use crate::app::fetch::fetch_json;
use crate::app::ports::{HttpClientPort, MailDraft};
use crate::constants::{endpoint, MAIL_SUBJECT, POINTS_PATH, WHATSAPP_MESSAGE};
use crate::error::Result;
use crate::types::{PointDetail, PointId};

pub struct PointDetailLoader {
    http: Arc<dyn HttpClientPort>,
    base_url: String,
}

impl PointDetailLoader {
    pub fn new(http: Arc<dyn HttpClientPort>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn load(&self, point_id: PointId) -> Result<PointDetail> {
        let url = endpoint(&self.base_url, &format!("{}/{}", POINTS_PATH, point_id));
        let detail: PointDetail = fetch_json(self.http.as_ref(), "point detail", &url, &[]).await?;
        info!(name = %detail.point.name, "Loaded point detail");
        Ok(detail)
    }
}

/// Deep link that opens a WhatsApp conversation with the point
pub fn whatsapp_link(number: &str) -> String {
    format!("whatsapp://send?phone={}&text={}", number, WHATSAPP_MESSAGE)
}

pub fn mail_draft(recipient: &str) -> MailDraft {
    MailDraft {
        subject: MAIL_SUBJECT.to_string(),
        recipients: vec![recipient.to_string()],
    }
}
