use thiserror::Error;

/// Error returned when a display rotation cannot be parsed into an
/// [`Orientation`](crate::Orientation).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown display rotation: '{0}'")]
pub struct OrientationParseError(pub String);
