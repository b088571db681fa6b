use thiserror::Error;

/// Failure of the rendering collaborator. Never retried.
#[derive(Error, Debug)]
pub enum StripError {
    #[error("strip transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("strip device error: {0}")]
    Device(String),
}

/// Settings rejected before any animation starts.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("side length must be between 1 and {max}, got {got}")]
    SideLength { got: usize, max: usize },

    #[error("{name}: min {min} is greater than max {max}")]
    InvertedRange {
        name: &'static str,
        min: u32,
        max: u32,
    },

    #[error("{name} must be at most {max}, got {got}")]
    OutOfRange {
        name: &'static str,
        got: u32,
        max: u32,
    },

    #[error("strip has {got} pixels but the cube needs {expected}")]
    StripLength { expected: usize, got: usize },
}
