use thiserror::Error;

/// A fatal failure of one boundary mapping call.
///
/// Conditions that merely omit a single boundary (a degenerate polygon, a stop
/// line past the reachable horizon) are not errors; builders report them as
/// an absent boundary instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MappingError {
    #[error("precondition violated: {0}")]
    Precondition(String),

    #[error("point ({x}, {y}) cannot be projected onto the reference line")]
    Projection { x: f64, y: f64 },

    #[error("lane {0:?} not found in map")]
    LaneNotFound(String),

    #[error("failed to map obstacle {id:?}: {reason}")]
    ObstacleMapping { id: String, reason: String },

    #[error("decision {0} cannot be mapped by this builder")]
    UnsupportedDecision(String),
}

/// Errors raised while loading configuration or scene files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`MappingError`].
pub type Result<T> = std::result::Result<T, MappingError>;
