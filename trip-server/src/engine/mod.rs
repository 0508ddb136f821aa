//! The text protocol spoken with the external trip-planning engine.
//!
//! The engine is an opaque executable that reads a trip request from stdin,
//! one value per line, and prints an itinerary table on stdout. This module
//! covers the three halves of that exchange:
//!
//! - [`encode_request`] builds the stdin payload
//! - [`EngineInvoker`] runs the process and collects its output
//! - [`parse_output`] decodes the printed table back into a [`TripPlan`]
//!
//! Encoding and decoding are pure functions so they can be tested against
//! literal fixtures without spawning anything.
//!
//! [`TripPlan`]: crate::domain::TripPlan

mod encode;
mod invoke;
#[cfg(test)]
pub(crate) mod mock;
mod parse;

pub use encode::encode_request;
pub use invoke::{EngineConfig, EngineError, EngineInvoker, TripEngine};
pub use parse::{Column, ROW_LAYOUT, RowLayout, parse_output};
