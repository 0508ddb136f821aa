//! Application state for the web layer.

use std::sync::Arc;

use crate::cities::CityList;
use crate::planner::Planner;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Trip planner driving the external engine
    pub planner: Arc<Planner>,

    /// City suggestions for the trip form
    pub cities: CityList,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: Planner, cities: CityList) -> Self {
        Self {
            planner: Arc::new(planner),
            cities,
        }
    }
}
