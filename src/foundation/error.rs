/// Convenience result type used across routeglide.
pub type RouteResult<T> = Result<T, RouteError>;

/// Error taxonomy for the fallible boundaries of the crate (configuration and host IO).
///
/// Engine signals (`add_point`, `redo`, `reset`, `tick`) never return errors; they resolve
/// recoverable conditions locally.
#[derive(thiserror::Error, Debug)]
pub enum RouteError {
    /// Invalid user-provided configuration, scenario or waypoint data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RouteError {
    /// Build a [`RouteError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RouteError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
