//! Error types for rendering
//!
//! Two levels of failure:
//! - [`RenderFailure`]: one entity could not be rendered; the batch goes on
//! - [`DispatchError`]: the dispatcher itself could not be set up

use mockgen_model::EntityKey;
use serde::Serialize;

/// Failure to render a single entity
///
/// Raised when building the model or rendering it panics. Collected in the
/// [`RenderReport`](crate::RenderReport), never propagated mid-batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("failed to render {key}: {message}")]
pub struct RenderFailure {
    /// Entity that failed
    pub key: EntityKey,
    /// Panic message or other description
    pub message: String,
}

impl RenderFailure {
    /// Create failure for entity
    #[inline]
    pub fn new(key: EntityKey, message: impl Into<String>) -> Self {
        Self {
            key,
            message: message.into(),
        }
    }
}

/// Dispatcher setup errors
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Dedicated render pool could not be built
    #[error("failed to build render pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Configuration values are inconsistent
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed
    #[error("configuration parse error: {0}")]
    Config(#[from] toml::de::Error),
}

impl DispatchError {
    /// Create invalid configuration error
    #[inline]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
