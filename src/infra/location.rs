use crate::app::ports::{LocationPort, PermissionStatus};
use crate::config::LocationConfig;
use crate::types::Coordinates;
use async_trait::async_trait;

/// Location source for hosts without a sensor: a fixed position from config, or denied when none is set
pub struct ConfiguredLocation {
    position: Option<Coordinates>,
}

impl ConfiguredLocation {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }

    pub fn from_config(config: &LocationConfig) -> Self {
        let position = config
            .latitude
            .zip(config.longitude)
            .map(|(latitude, longitude)| Coordinates { latitude, longitude });
        Self::new(position)
    }
}

#[async_trait]
impl LocationPort for ConfiguredLocation {
    async fn request_permission(&self) -> PermissionStatus {
        if self.position.is_some() {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    async fn current_position(&self) -> Result<Coordinates, String> {
        self.position.ok_or_else(|| "no position configured".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_position_denies_permission() {
        let location = ConfiguredLocation::from_config(&LocationConfig::default());
        assert_eq!(location.request_permission().await, PermissionStatus::Denied);
        assert!(location.current_position().await.is_err());
    }

    #[tokio::test]
    async fn test_configured_position_is_granted() {
        let config = LocationConfig {
            latitude: Some(-22.9),
            longitude: Some(-43.2),
            ..LocationConfig::default()
        };
        let location = ConfiguredLocation::from_config(&config);
        assert_eq!(location.request_permission().await, PermissionStatus::Granted);
        assert_eq!(location.current_position().await.unwrap().longitude, -43.2);
    }
}
