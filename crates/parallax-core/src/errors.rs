//! Error types for the parallax widget.

use thiserror::Error;

/// Top-level error type for the parallax widget.
#[derive(Debug, Error)]
pub enum ParallaxError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors while building the slide layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Slide {index} has no image source: provide a data-{attribute} attribute or an image option")]
    MissingImageSource { index: usize, attribute: String },

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Errors reported by a DOM surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("DOM operation '{operation}' failed: {reason}")]
    Operation { operation: String, reason: String },

    #[error("Node is not attached to this surface")]
    UnknownNode,
}

impl SurfaceError {
    pub fn operation(operation: &str, reason: impl Into<String>) -> Self {
        SurfaceError::Operation {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors while dispatching a method call by name.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unknown method: {name}")]
    UnknownMethod { name: String },

    #[error("Method {name} is not public")]
    PrivateMethod { name: String },

    #[error("Invalid arguments for {method}: {reason}")]
    InvalidArguments { method: String, reason: String },

    #[error("No instance is registered for this element")]
    NotInitialized,
}

/// Errors while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[cfg(feature = "serde")]
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },
}
