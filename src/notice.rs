use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::constants::{PERMISSION_NOTICE_MESSAGE, PERMISSION_NOTICE_TITLE};
use crate::error::EcoletaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Shown as a modal alert the user must dismiss
    Blocking,
    Transient,
}

/// Message surfaced to the user on the error channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserNotice {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl UserNotice {
    pub fn from_error(error: &EcoletaError) -> Self {
        match error {
            EcoletaError::PermissionDenied => Self {
                severity: Severity::Blocking,
                title: PERMISSION_NOTICE_TITLE.to_string(),
                message: PERMISSION_NOTICE_MESSAGE.to_string(),
            },
            other => Self {
                severity: Severity::Transient,
                title: "Erro".to_string(),
                message: other.to_string(),
            },
        }
    }
}

pub type NoticeReceiver = mpsc::UnboundedReceiver<UserNotice>;

#[derive(Clone, Debug)]
pub struct Notices {
    tx: mpsc::UnboundedSender<UserNotice>,
}

impl Notices {
    pub fn channel() -> (Self, NoticeReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn report(&self, error: &EcoletaError) {
        warn!(%error, "Reporting failure to user");
        if self.tx.send(UserNotice::from_error(error)).is_err() {
            debug!("Notice receiver dropped; notice discarded");
        }
    }
}
