//! City name suggestions for the trip form.
//!
//! Loaded from a plain text file of `country,city,...` lines and reloaded
//! periodically. Suggestions are not checked against the engine's own data.

mod error;
mod list;

pub use error::CityListError;
pub use list::{City, CityList, parse_cities};
