use tracing::{debug, info, instrument};

use crate::app::category_filter::CategorySelection;
use crate::app::geo_locator::GeoFix;
use crate::app::navigation::PointsParams;
use crate::constants::{MAP_LATITUDE_DELTA, MAP_LONGITUDE_DELTA};
use crate::context::AppContext;
use crate::error::{EcoletaError, Result};
use crate::screens::lifecycle::{PendingLoads, ScreenLifetime, ScreenState};
use crate::types::{Category, CategoryId, CollectionPoint, Coordinates, PointId};

#[derive(Debug, Default)]
struct PointsState {
    categories: Vec<Category>,
    selection: CategorySelection,
    points: Vec<CollectionPoint>,
    geo: GeoFix,
    acquire_started: bool,
    query_generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryChip {
    pub category: Category,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapPin {
    pub point_id: PointId,
    pub name: String,
    pub image_url: String,
    pub coordinates: Coordinates,
}

/// What the map renderer receives once the device position is known
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: Coordinates,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
    pub pins: Vec<MapPin>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointsView {
    pub region: PointsParams,
    pub categories: Vec<CategoryChip>,
    pub points: Vec<CollectionPoint>,
    /// `None` until the device position resolves
    pub map: Option<MapView>,
}

const CATEGORIES_LOAD: &str = "categories";
const POSITION_LOAD: &str = "position";
const POINTS_LOAD: &str = "points";

/// Handles the background loads run on; clones share the same state and lifetime
#[derive(Clone)]
struct PointsShared {
    ctx: AppContext,
    params: PointsParams,
    lifetime: ScreenLifetime,
    state: ScreenState<PointsState>,
}

impl PointsShared {
    async fn load_categories(&self) {
        let result = self.ctx.points.load_categories().await;
        if !self.lifetime.is_mounted() {
            debug!("Points unmounted; dropping categories");
            return;
        }
        match result {
            Ok(categories) => self.state.lock().categories = categories,
            Err(e) => self.ctx.notices.report(&e),
        }
    }

    async fn locate(&self) {
        {
            let mut state = self.state.lock();
            if state.acquire_started {
                debug!("Position already requested for this visit");
                return;
            }
            state.acquire_started = true;
        }

        let result = self.ctx.geo.acquire().await;
        if !self.lifetime.is_mounted() {
            debug!("Points unmounted; dropping position");
            return;
        }
        match result {
            Ok(coordinates) => {
                if !self.state.lock().geo.resolve(coordinates) {
                    debug!("Position already resolved for this visit");
                }
            }
            Err(e) => self.ctx.notices.report(&e),
        }
    }

    async fn toggle(&self, id: CategoryId) {
        {
            let mut state = self.state.lock();
            state.selection.toggle(id);
            state.query_generation += 1;
            info!(category = id, selected = state.selection.contains(id), "Category toggled");
        }
        self.refresh_points().await;
    }

    async fn refresh_points(&self) {
        let (selection, generation) = {
            let state = self.state.lock();
            (state.selection.clone(), state.query_generation)
        };

        let result = self.ctx.points.query(&self.params, &selection).await;
        if !self.lifetime.is_mounted() {
            debug!("Points unmounted; dropping point list");
            return;
        }

        let error = {
            let mut state = self.state.lock();
            if state.query_generation != generation {
                debug!(generation, "Point list superseded by a newer selection");
                return;
            }
            match result {
                Ok(points) => {
                    state.points = points;
                    None
                }
                Err(e) => Some(e),
            }
        };
        if let Some(e) = error {
            self.ctx.notices.report(&e);
        }
    }
}

/// Map of collection points with the category filter bar
pub struct PointsScreen {
    shared: PointsShared,
    pending: PendingLoads,
}

impl PointsScreen {
    pub fn new(ctx: AppContext, params: Option<PointsParams>) -> Result<Self> {
        let params = params.ok_or(EcoletaError::InvalidRoutePayload("Points requires a region"))?;
        Ok(Self {
            shared: PointsShared {
                ctx,
                params,
                lifetime: ScreenLifetime::new(),
                state: ScreenState::new(PointsState::default()),
            },
            pending: PendingLoads::default(),
        })
    }

    /// Starts the category, position and unfiltered point loads in the background
    #[instrument(skip(self), fields(state = %self.shared.params.state_code))]
    pub fn start(&self) {
        let shared = self.shared.clone();
        self.pending
            .spawn(CATEGORIES_LOAD, async move { shared.load_categories().await });
        let shared = self.shared.clone();
        self.pending.spawn(POSITION_LOAD, async move { shared.locate().await });
        let shared = self.shared.clone();
        self.pending
            .spawn(POINTS_LOAD, async move { shared.refresh_points().await });
    }

    /// Creates the screen and waits for every mount load, the position included
    pub async fn mount(ctx: AppContext, params: Option<PointsParams>) -> Result<Self> {
        let screen = Self::new(ctx, params)?;
        screen.start();
        screen.settled().await;
        Ok(screen)
    }

    /// Waits for the category catalog and the first point list, not the position
    pub async fn lists_loaded(&self) {
        self.pending.wait(&[CATEGORIES_LOAD, POINTS_LOAD]).await;
    }

    pub async fn settled(&self) {
        self.pending.wait_all().await;
    }

    pub async fn load_categories(&self) {
        self.shared.load_categories().await;
    }

    /// Requests permission and a fix; only the first call of a visit does anything
    pub async fn locate(&self) {
        self.shared.locate().await;
    }

    /// Flips one category in the filter and re-queries the points
    pub async fn toggle(&self, id: CategoryId) {
        self.shared.toggle(id).await;
    }

    /// Replaces the point list with the result for the current selection
    pub async fn refresh_points(&self) {
        self.shared.refresh_points().await;
    }

    pub fn params(&self) -> &PointsParams {
        &self.shared.params
    }

    pub fn selection(&self) -> CategorySelection {
        self.shared.state.lock().selection.clone()
    }

    pub fn geo_fix(&self) -> GeoFix {
        self.shared.state.lock().geo
    }

    pub fn map(&self) -> Option<MapView> {
        let state = self.shared.state.lock();
        map_view(&state)
    }

    pub fn view(&self) -> PointsView {
        let state = self.shared.state.lock();
        PointsView {
            region: self.shared.params.clone(),
            categories: state
                .categories
                .iter()
                .map(|category| CategoryChip {
                    category: category.clone(),
                    selected: state.selection.contains(category.id),
                })
                .collect(),
            points: state.points.clone(),
            map: map_view(&state),
        }
    }

    pub fn unmount(&self) {
        self.shared.lifetime.unmount();
    }
}

impl Drop for PointsScreen {
    fn drop(&mut self) {
        self.shared.lifetime.unmount();
    }
}

fn map_view(state: &PointsState) -> Option<MapView> {
    let center = state.geo.coordinates()?;
    Some(MapView {
        center,
        latitude_delta: MAP_LATITUDE_DELTA,
        longitude_delta: MAP_LONGITUDE_DELTA,
        pins: state
            .points
            .iter()
            .map(|point| MapPin {
                point_id: point.id,
                name: point.name.clone(),
                image_url: point.image_url.clone(),
                coordinates: point.coordinates(),
            })
            .collect(),
    })
}
