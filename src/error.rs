use thiserror::Error;

use crate::plan::Wall;

/// Errors produced while reading, validating or rendering a room analysis.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to parse room analysis: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("room dimensions must be positive and finite, got {width} x {height} ft")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("a {width} x {height} ft room does not fit a diagram at {scale} px/ft")]
    DiagramTooLarge { width: f64, height: f64, scale: f64 },

    #[error("{wall} wall feature #{index}: width must be positive, got {width} ft")]
    InvalidFeatureWidth { wall: Wall, index: usize, width: f64 },

    #[error("{wall} wall feature #{index}: position must not be negative, got {position} ft")]
    NegativePosition {
        wall: Wall,
        index: usize,
        position: f64,
    },

    #[error(
        "{wall} wall feature #{index}: span {position} + {width} ft exceeds wall length {wall_length} ft"
    )]
    FeatureOutOfRange {
        wall: Wall,
        index: usize,
        position: f64,
        width: f64,
        wall_length: f64,
    },

    #[error("{kind} feature has unknown {field} '{value}'")]
    UnknownFeatureValue {
        kind: String,
        field: &'static str,
        value: String,
    },

    #[error("{wall} wall closet #{index}: depth must be positive, got {depth} ft")]
    InvalidClosetDepth { wall: Wall, index: usize, depth: f64 },

    #[error("invalid style: {0}")]
    InvalidStyle(String),

    #[error("failed to parse style: {0}")]
    StyleParse(String),

    #[error("unknown built-in style '{name}'. Available: {available}")]
    UnknownStyle { name: String, available: String },

    #[error("malformed diagram: {0}")]
    Inspect(String),
}
