use std::sync::Arc;

use crate::app::geo_locator::GeoLocator;
use crate::app::point_detail::PointDetailLoader;
use crate::app::point_query::PointQueryService;
use crate::app::ports::{HttpClientPort, LinkOpener, LocationPort};
use crate::app::region_catalog::RegionCatalog;
use crate::config::Config;
use crate::notice::{NoticeReceiver, Notices};

/// Services and ports shared by every screen of a session
#[derive(Clone)]
pub struct AppContext {
    pub regions: Arc<RegionCatalog>,
    pub points: Arc<PointQueryService>,
    pub details: Arc<PointDetailLoader>,
    pub geo: Arc<GeoLocator>,
    pub links: Arc<dyn LinkOpener>,
    pub notices: Notices,
}

impl AppContext {
    pub fn new(
        config: &Config,
        http: Arc<dyn HttpClientPort>,
        location: Arc<dyn LocationPort>,
        links: Arc<dyn LinkOpener>,
    ) -> (Self, NoticeReceiver) {
        let (notices, receiver) = Notices::channel();
        let context = Self {
            regions: Arc::new(RegionCatalog::new(http.clone(), &config.regions.base_url)),
            points: Arc::new(PointQueryService::new(http.clone(), &config.api.base_url)),
            details: Arc::new(PointDetailLoader::new(http, &config.api.base_url)),
            geo: Arc::new(GeoLocator::new(location, config.position_timeout())),
            links,
            notices,
        };
        (context, receiver)
    }
}
