//! Render options
//!
//! Independent generation-style switches forwarded unchanged to every
//! [`MockModel::render`](crate::MockModel::render) call.

use serde::{Deserialize, Serialize};

/// Generation-style switches
///
/// Each flag only selects a template variant; flags never interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct RenderOptions {
    /// Delegate generated method bodies to a shared helper function
    /// instead of interpolating the bookkeeping inline
    pub use_template_func: bool,

    /// Give stream-returning methods a broadcast subject tests can feed
    pub use_mock_observable: bool,

    /// Record the arguments of every call
    pub enable_func_args_history: bool,

    /// Expose call counters as public mutable fields
    pub allow_set_call_count: bool,
}

impl RenderOptions {
    /// Create options with every switch off
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With helper-function bodies
    #[inline]
    #[must_use]
    pub fn with_template_func(mut self, enabled: bool) -> Self {
        self.use_template_func = enabled;
        self
    }

    /// With observable subjects for stream-returning methods
    #[inline]
    #[must_use]
    pub fn with_mock_observable(mut self, enabled: bool) -> Self {
        self.use_mock_observable = enabled;
        self
    }

    /// With call-argument history
    #[inline]
    #[must_use]
    pub fn with_func_args_history(mut self, enabled: bool) -> Self {
        self.enable_func_args_history = enabled;
        self
    }

    /// With settable call counters
    #[inline]
    #[must_use]
    pub fn with_settable_call_count(mut self, enabled: bool) -> Self {
        self.allow_set_call_count = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_options_default_all_off() {
        let options = RenderOptions::new();
        assert!(!options.use_template_func);
        assert!(!options.use_mock_observable);
        assert!(!options.enable_func_args_history);
        assert!(!options.allow_set_call_count);
    }

    #[test]
    fn render_options_builder() {
        let options = RenderOptions::new()
            .with_template_func(true)
            .with_func_args_history(true);
        assert!(options.use_template_func);
        assert!(options.enable_func_args_history);
        assert!(!options.use_mock_observable);
        assert!(!options.allow_set_call_count);
    }

    #[test]
    fn render_options_partial_deserialize() {
        let options: RenderOptions =
            serde_json::from_str(r#"{ "use_mock_observable": true }"#).unwrap();
        assert_eq!(options, RenderOptions::new().with_mock_observable(true));
    }
}
