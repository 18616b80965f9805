use std::sync::Arc;

use tracing::{info, instrument};

use crate::app::fetch::fetch_json;
use crate::app::ports::HttpClientPort;
use crate::constants::{endpoint, CITIES_ORDER_BY, CITIES_SEGMENT, STATES_PATH};
use crate::error::Result;
use crate::types::{CityRecord, StateRecord};

/// Resolves the state → city hierarchy from the region lookup service
pub struct RegionCatalog {
    http: Arc<dyn HttpClientPort>,
    base_url: String,
}

impl RegionCatalog {
    pub fn new(http: Arc<dyn HttpClientPort>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// State codes, sorted ascending regardless of server order
    #[instrument(skip(self))]
    pub async fn load_states(&self) -> Result<Vec<String>> {
        let url = endpoint(&self.base_url, STATES_PATH);
        let records: Vec<StateRecord> = fetch_json(self.http.as_ref(), "states", &url, &[]).await?;

        let mut codes: Vec<String> = records.into_iter().map(|r| r.code).collect();
        codes.sort();
        info!("Loaded {} states", codes.len());
        Ok(codes)
    }

    /// City names of one state, in the order the server returns them
    #[instrument(skip(self))]
    pub async fn load_cities(&self, state_code: &str) -> Result<Vec<String>> {
        let url = endpoint(
            &self.base_url,
            &format!("{}/{}/{}", STATES_PATH, state_code, CITIES_SEGMENT),
        );
        let query = [("orderBy".to_string(), CITIES_ORDER_BY.to_string())];
        let records: Vec<CityRecord> = fetch_json(self.http.as_ref(), "cities", &url, &query).await?;

        let names: Vec<String> = records.into_iter().map(|r| r.name).collect();
        info!("Loaded {} cities", names.len());
        Ok(names)
    }
}
