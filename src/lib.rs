//! storefence - Define and validate geofenced service boundaries for physical stores

pub mod api;
pub mod config;
pub mod domain;
pub mod export;
pub mod geometry;
pub mod session;
