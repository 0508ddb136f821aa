//! Trip planning through the external engine.
//!
//! The planner owns no route-finding logic. It validates nothing beyond
//! what [`TripRequest`](crate::domain::TripRequest) already guarantees and
//! only moves text between the caller and the engine.

mod plan;

pub use plan::{PlannedTrip, Planner};
