use thiserror::Error;

/// Errors raised while building or reading an iterated function system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttractorError {
    #[error("Vertex count must be an integer of at least 3, got {0}.")]
    InvalidVertexCount(f64),

    #[error("Contraction ratio must lie strictly between 0 and 1, got {0}.")]
    InvalidRatio(f64),

    #[error("Polygon radius must be positive and finite, got {0}.")]
    InvalidRadius(f64),

    #[error("Unknown transformation name: {0}.")]
    UnknownVariation(String),

    #[error("No trajectory has been computed yet; call iterate first.")]
    NotYetComputed,

    #[error("Malformed probability table: {0}")]
    MalformedProbabilityTable(String),

    #[error("Affine map requires 6 coefficients, got {0}.")]
    MalformedCoefficients(usize),

    #[error("Map set must contain at least one map.")]
    EmptyMapSet,

    #[error("Selector draws from {selector} choices but the system has {system} maps.")]
    SelectorMismatch { selector: usize, system: usize },

    #[error("Invalid palette: {0}")]
    InvalidPalette(String),

    #[error("Length mismatch: expected {expected}, got {actual}.")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Run not finished: {completed} of {total} points generated.")]
    RunIncomplete { completed: usize, total: usize },

    #[error("Invalid iteration settings: {0}")]
    InvalidSettings(String),

    #[error("Blend weight must lie in [0, 1], got {0}.")]
    InvalidBlendWeight(f64),
}

pub type Result<T> = std::result::Result<T, AttractorError>;
