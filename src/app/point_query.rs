use std::sync::Arc;

use tracing::{info, instrument};

use crate::app::category_filter::CategorySelection;
use crate::app::fetch::fetch_json;
use crate::app::navigation::Region;
use crate::app::ports::HttpClientPort;
use crate::constants::{endpoint, ITEMS_PATH, ITEMS_QUERY_KEY, POINTS_PATH};
use crate::error::Result;
use crate::types::{Category, CollectionPoint};

/// Reads the category catalog and the collection points matching a filter
pub struct PointQueryService {
    http: Arc<dyn HttpClientPort>,
    base_url: String,
}

impl PointQueryService {
    pub fn new(http: Arc<dyn HttpClientPort>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn load_categories(&self) -> Result<Vec<Category>> {
        let url = endpoint(&self.base_url, ITEMS_PATH);
        let categories: Vec<Category> = fetch_json(self.http.as_ref(), "items", &url, &[]).await?;
        info!("Loaded {} categories", categories.len());
        Ok(categories)
    }

    /// Points in `region` accepting the selected categories, in backend order
    #[instrument(skip(self, selection), fields(selected = selection.len()))]
    pub async fn query(
        &self,
        region: &Region,
        selection: &CategorySelection,
    ) -> Result<Vec<CollectionPoint>> {
        let url = endpoint(&self.base_url, POINTS_PATH);
        let query = points_query(region, selection);
        let points: Vec<CollectionPoint> = fetch_json(self.http.as_ref(), "points", &url, &query).await?;
        info!("Found {} collection points", points.len());
        Ok(points)
    }
}

/// Query pairs for `GET /points`. An empty selection sends no `items[]` at all.
pub fn points_query(region: &Region, selection: &CategorySelection) -> Vec<(String, String)> {
    let mut query = Vec::with_capacity(2 + selection.len());
    if let Some(city) = &region.city_name {
        query.push(("city".to_string(), city.clone()));
    }
    query.push(("uf".to_string(), region.state_code.clone()));
    query.extend(
        selection
            .ids()
            .map(|id| (ITEMS_QUERY_KEY.to_string(), id.to_string())),
    );
    query
}
