use tracing::{debug, info};

use crate::app::navigation::Region;
use crate::context::AppContext;
use crate::error::Result;
use crate::screens::lifecycle::{ScreenLifetime, ScreenState};
use crate::types::Selection;

#[derive(Debug, Default)]
struct HomeState {
    states: Vec<String>,
    cities: Vec<String>,
    selected_state: Selection<String>,
    selected_city: Selection<String>,
    // bumped on every state change so a late city list for an older state is dropped
    city_request: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub states: Vec<String>,
    pub cities: Vec<String>,
    pub selected_state: Selection<String>,
    pub selected_city: Selection<String>,
    pub can_enter: bool,
}

/// State and city pickers
pub struct HomeScreen {
    ctx: AppContext,
    lifetime: ScreenLifetime,
    state: ScreenState<HomeState>,
}

impl HomeScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            lifetime: ScreenLifetime::new(),
            state: ScreenState::new(HomeState::default()),
        }
    }

    /// Creates the screen and loads the state list
    pub async fn mount(ctx: AppContext) -> Self {
        let screen = Self::new(ctx);
        screen.load_states().await;
        screen
    }

    pub async fn load_states(&self) {
        let result = self.ctx.regions.load_states().await;
        if !self.lifetime.is_mounted() {
            debug!("Home unmounted; dropping state list");
            return;
        }
        match result {
            Ok(states) => self.state.lock().states = states,
            Err(e) => self.ctx.notices.report(&e),
        }
    }

    /// Changes the state picker, resets the city and fetches the new city list
    pub async fn select_state(&self, selection: Selection<String>) {
        let request = {
            let mut state = self.state.lock();
            if state.selected_state == selection {
                return;
            }
            state.selected_state = selection.clone();
            state.selected_city = Selection::Unselected;
            state.cities.clear();
            state.city_request += 1;
            state.city_request
        };

        let Selection::Selected(code) = selection else {
            return;
        };
        info!(state = %code, "State selected");

        let result = self.ctx.regions.load_cities(&code).await;
        if !self.lifetime.is_mounted() {
            debug!(state = %code, "Home unmounted; dropping city list");
            return;
        }

        let error = {
            let mut state = self.state.lock();
            if state.city_request != request {
                debug!(state = %code, "City list superseded by a newer state selection");
                return;
            }
            match result {
                Ok(cities) => {
                    state.cities = cities;
                    None
                }
                Err(e) => Some(e),
            }
        };
        if let Some(e) = error {
            self.ctx.notices.report(&e);
        }
    }

    pub fn select_city(&self, selection: Selection<String>) {
        self.state.lock().selected_city = selection;
    }

    /// Payload for the Points screen; fails while no state is picked
    pub fn region(&self) -> Result<Region> {
        let state = self.state.lock();
        Region::from_selection(&state.selected_state, &state.selected_city)
    }

    pub fn view(&self) -> HomeView {
        let state = self.state.lock();
        HomeView {
            states: state.states.clone(),
            cities: state.cities.clone(),
            selected_state: state.selected_state.clone(),
            selected_city: state.selected_city.clone(),
            can_enter: state.selected_state.is_selected(),
        }
    }

    pub fn unmount(&self) {
        self.lifetime.unmount();
    }
}

impl Drop for HomeScreen {
    fn drop(&mut self) {
        self.lifetime.unmount();
    }
}
