use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcoletaError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("failed to fetch {resource}: {reason}")]
    FetchFailed { resource: String, reason: String },

    #[error("screen mounted without its route payload: {0}")]
    InvalidRoutePayload(&'static str),

    #[error("cannot navigate from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },

    #[error("could not hand off to external app: {0}")]
    ExternalApp(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EcoletaError {
    pub fn fetch_failed(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FetchFailed {
            resource: resource.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EcoletaError>;
