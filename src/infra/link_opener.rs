use crate::app::ports::{LinkOpener, MailDraft};
use async_trait::async_trait;
use tracing::info;

/// Prints deep links and mail drafts instead of handing them to another app
pub struct StdoutLinkOpener;

#[async_trait]
impl LinkOpener for StdoutLinkOpener {
    async fn open_url(&self, url: &str) -> Result<(), String> {
        info!(%url, "Open URL");
        println!("🔗 {}", url);
        Ok(())
    }

    async fn compose_mail(&self, draft: &MailDraft) -> Result<(), String> {
        info!(subject = %draft.subject, recipients = draft.recipients.len(), "Compose mail");
        println!("✉️  To: {}", draft.recipients.join(", "));
        println!("   Subject: {}", draft.subject);
        Ok(())
    }
}
