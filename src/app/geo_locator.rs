use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::app::ports::{LocationPort, PermissionStatus};
use crate::error::{EcoletaError, Result};
use crate::types::Coordinates;

/// Device position used to center the map; resolves at most once per visit
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GeoFix {
    #[default]
    Unresolved,
    Resolved(Coordinates),
}

impl GeoFix {
    /// Stores the first fix. Returns `false` and keeps the existing fix when already resolved.
    pub fn resolve(&mut self, coordinates: Coordinates) -> bool {
        match self {
            GeoFix::Unresolved => {
                *self = GeoFix::Resolved(coordinates);
                true
            }
            GeoFix::Resolved(_) => false,
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            GeoFix::Resolved(c) => Some(*c),
            GeoFix::Unresolved => None,
        }
    }
}

pub struct GeoLocator {
    location: Arc<dyn LocationPort>,
    position_timeout: Duration,
}

impl GeoLocator {
    pub fn new(location: Arc<dyn LocationPort>, position_timeout: Duration) -> Self {
        Self {
            location,
            position_timeout,
        }
    }

    /// Asks for permission, then reads a single position fix
    #[instrument(skip(self))]
    pub async fn acquire(&self) -> Result<Coordinates> {
        if self.location.request_permission().await == PermissionStatus::Denied {
            warn!("Location permission denied");
            return Err(EcoletaError::PermissionDenied);
        }

        match tokio::time::timeout(self.position_timeout, self.location.current_position()).await {
            Ok(Ok(coordinates)) => {
                info!(
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    "Position acquired"
                );
                Ok(coordinates)
            }
            Ok(Err(reason)) => {
                warn!(%reason, "Position read failed");
                Err(EcoletaError::LocationUnavailable(reason))
            }
            Err(_) => {
                warn!(timeout_secs = self.position_timeout.as_secs(), "Position read timed out");
                Err(EcoletaError::LocationUnavailable(format!(
                    "no fix within {}s",
                    self.position_timeout.as_secs()
                )))
            }
        }
    }
}
