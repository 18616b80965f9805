use tracing::info;

use crate::error::{EcoletaError, Result};
use crate::types::{PointId, Selection};

/// Where to search for collection points; the Home → Points payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub state_code: String,
    pub city_name: Option<String>,
}

impl Region {
    /// Builds a region from the Home pickers. A state is required, the city is not.
    pub fn from_selection(
        state: &Selection<String>,
        city: &Selection<String>,
    ) -> Result<Self> {
        let state_code = state
            .as_selected()
            .cloned()
            .ok_or(EcoletaError::InvalidRoutePayload("no state selected"))?;
        Ok(Self {
            state_code,
            city_name: city.as_selected().cloned(),
        })
    }
}

pub type PointsParams = Region;

/// Points → Detail payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailParams {
    pub point_id: PointId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Points(PointsParams),
    Detail(DetailParams),
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Points(_) => "Points",
            Route::Detail(_) => "Detail",
        }
    }
}

/// Stack of visited screens, rooted at Home
#[derive(Debug, Clone)]
pub struct NavigationCoordinator {
    stack: Vec<Route>,
}

impl Default for NavigationCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationCoordinator {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Home],
        }
    }

    pub fn current(&self) -> &Route {
        // the root is never popped
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the snapshot handed to the Points screen
    pub fn go_to_points(&mut self, region: Region) -> Result<PointsParams> {
        self.push_from("Home", Route::Points(region.clone()))?;
        Ok(region)
    }

    pub fn go_to_detail(&mut self, point_id: PointId) -> Result<DetailParams> {
        let params = DetailParams { point_id };
        self.push_from("Points", Route::Detail(params))?;
        Ok(params)
    }

    /// Pops the current screen and returns it; Home cannot be left
    pub fn go_back(&mut self) -> Result<Route> {
        let left = match self.stack.len() {
            0 | 1 => return Err(EcoletaError::InvalidTransition { from: "Home", to: "back" }),
            _ => self.stack.remove(self.stack.len() - 1),
        };
        info!(from = left.name(), to = self.current().name(), "Navigated back");
        Ok(left)
    }

    fn push_from(&mut self, expected: &'static str, route: Route) -> Result<()> {
        let from = self.current().name();
        if from != expected {
            return Err(EcoletaError::InvalidTransition { from, to: route.name() });
        }
        info!(from, to = route.name(), "Navigated forward");
        self.stack.push(route);
        Ok(())
    }
}
