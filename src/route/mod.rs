//! Route geometry: waypoint collection, curve construction and arc-length sampling.

pub(crate) mod orientation;
pub(crate) mod path;
pub(crate) mod sampler;
pub(crate) mod waypoints;
