//! Trip planner server.
//!
//! A web front for an external trip-planning engine: trip requests are
//! encoded as line-oriented text, fed to the engine subprocess, and its
//! fixed-column reply is decoded for display.

pub mod cities;
pub mod config;
pub mod domain;
pub mod engine;
pub mod planner;
pub mod web;
