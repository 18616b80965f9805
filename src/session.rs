use tracing::info;

use crate::app::navigation::{NavigationCoordinator, Route};
use crate::context::AppContext;
use crate::error::{EcoletaError, Result};
use crate::screens::detail::DetailScreen;
use crate::screens::home::HomeScreen;
use crate::screens::points::PointsScreen;
use crate::types::PointId;

/// Navigation stack plus the live screen for each level of it.
///
/// Home lives for the whole session. Points and Detail are created fresh on
/// every forward transition and dropped when navigated away from, so a
/// revisit never sees the previous visit's selection, points or position.
pub struct Session {
    ctx: AppContext,
    nav: NavigationCoordinator,
    home: HomeScreen,
    points: Option<PointsScreen>,
    detail: Option<DetailScreen>,
}

impl Session {
    pub async fn start(ctx: AppContext) -> Self {
        let home = HomeScreen::mount(ctx.clone()).await;
        Self {
            ctx,
            nav: NavigationCoordinator::new(),
            home,
            points: None,
            detail: None,
        }
    }

    pub fn route(&self) -> &Route {
        self.nav.current()
    }

    pub fn home(&self) -> &HomeScreen {
        &self.home
    }

    pub fn points(&self) -> Option<&PointsScreen> {
        self.points.as_ref()
    }

    pub fn detail(&self) -> Option<&DetailScreen> {
        self.detail.as_ref()
    }

    /// Home → Points with the region currently picked on Home.
    ///
    /// The screen is returned as soon as its loads are started; the point list
    /// does not wait for the device position.
    pub fn enter_points(&mut self) -> Result<&PointsScreen> {
        let region = self.home.region()?;
        let params = self.nav.go_to_points(region)?;
        let screen = match PointsScreen::new(self.ctx.clone(), Some(params)) {
            Ok(screen) => screen,
            Err(e) => {
                self.nav.go_back()?;
                return Err(e);
            }
        };
        screen.start();
        Ok(&*self.points.insert(screen))
    }

    /// Points → Detail for one of the listed points
    pub fn open_point(&mut self, point_id: PointId) -> Result<&DetailScreen> {
        let params = self.nav.go_to_detail(point_id)?;
        let screen = match DetailScreen::new(self.ctx.clone(), Some(params)) {
            Ok(screen) => screen,
            Err(e) => {
                self.nav.go_back()?;
                return Err(e);
            }
        };
        screen.start();
        Ok(&*self.detail.insert(screen))
    }

    /// Leaves the current screen and discards everything it owned
    pub fn go_back(&mut self) -> Result<&Route> {
        let left = self.nav.go_back()?;
        let screen_name = left.name();
        match left {
            Route::Points(_) => {
                if let Some(screen) = self.points.take() {
                    screen.unmount();
                }
            }
            Route::Detail(_) => {
                if let Some(screen) = self.detail.take() {
                    screen.unmount();
                }
            }
            Route::Home => {
                return Err(EcoletaError::InvalidTransition { from: "Home", to: "back" });
            }
        }
        info!(left = screen_name, "Screen state discarded");
        Ok(self.nav.current())
    }
}
