//! saferoute-planner
//!
//! Recommends the lowest-risk route between two addresses by blending travel
//! time, current weather, and accident risk sampled along each candidate route.

pub mod traits;
pub mod error;
mod config;
pub mod polyline;
pub mod haversine;
pub mod acquisition;
pub mod aggregation;
pub mod scoring;
pub mod planner;
pub mod session;
pub mod osrm;
pub mod backend;
pub mod nominatim;
