//! The route animation engine: configuration, lifecycle state, and render snapshots.

pub(crate) mod config;
pub(crate) mod decoration;
pub(crate) mod runtime;
pub(crate) mod scenario;
pub(crate) mod snapshot;
pub(crate) mod state;
