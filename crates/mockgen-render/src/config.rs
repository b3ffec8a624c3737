//! Configuration
//!
//! [`DispatchConfig`] selects how entities are scheduled and how results are
//! delivered; [`OutputLayout`] shapes the assembled artifact. Both load from
//! TOML through [`GeneratorConfig`].

use crate::error::DispatchError;
use mockgen_model::RenderOptions;
use serde::{Deserialize, Serialize};

/// Work distribution across entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Render one entity after another on the calling thread
    Sequential,
    /// Render on rayon workers
    #[default]
    Parallel,
}

/// How rendered text reaches the completion callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStrategy {
    /// Workers invoke the callback while holding a mutex
    ///
    /// The callback runs on a rayon worker under a non-reentrant lock. It
    /// must not use rayon itself: a worker waiting inside the callback can
    /// steal another render job whose delivery then blocks on the same
    /// lock. Use [`DeliveryStrategy::Channel`] for such callbacks.
    #[default]
    Locked,
    /// Workers send results over a channel; the calling thread invokes the callback
    ///
    /// The callback runs outside the render pool and may use rayon freely.
    Channel,
}

/// Dispatcher configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Work distribution
    pub mode: DispatchMode,
    /// Delivery path
    pub delivery: DeliveryStrategy,
    /// Size of a dedicated render pool; `None` uses the global rayon pool
    pub threads: Option<usize>,
    /// Switches forwarded to every render call
    pub options: RenderOptions,
}

impl DispatchConfig {
    /// Create default configuration (parallel, lock-delivered)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequential configuration with the given options
    #[inline]
    #[must_use]
    pub fn sequential(options: RenderOptions) -> Self {
        Self::default()
            .with_mode(DispatchMode::Sequential)
            .with_options(options)
    }

    /// With dispatch mode
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// With delivery strategy
    #[inline]
    #[must_use]
    pub fn with_delivery(mut self, delivery: DeliveryStrategy) -> Self {
        self.delivery = delivery;
        self
    }

    /// With dedicated pool size
    #[inline]
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// With render options
    #[inline]
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Check values are usable
    ///
    /// # Errors
    /// - `DispatchError::InvalidConfig` if `threads` is zero
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.threads == Some(0) {
            return Err(DispatchError::invalid_config("threads must be at least 1"));
        }
        Ok(())
    }
}

/// Layout of the assembled mock artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputLayout {
    /// Text placed verbatim at the top (license, generated-file banner)
    pub header: Option<String>,
    /// Paths emitted as `use` declarations before the mocks
    pub imports: Vec<String>,
    /// When set, mocks are wrapped in `#[cfg(<gate>)] mod <module_name>`
    pub cfg_gate: Option<String>,
    /// Name of the gated module
    pub module_name: String,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            header: None,
            imports: Vec::new(),
            cfg_gate: None,
            module_name: "mocks".to_string(),
        }
    }
}

impl OutputLayout {
    /// Create empty layout
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With header text
    #[inline]
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// With additional import path
    #[inline]
    #[must_use]
    pub fn with_import(mut self, path: impl Into<String>) -> Self {
        self.imports.push(path.into());
        self
    }

    /// With `cfg` gate around the mocks
    #[inline]
    #[must_use]
    pub fn with_cfg_gate(mut self, gate: impl Into<String>) -> Self {
        self.cfg_gate = Some(gate.into());
        self
    }

    /// With module name for the gated module
    #[inline]
    #[must_use]
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }

    /// Check values are usable
    ///
    /// # Errors
    /// - `DispatchError::InvalidConfig` if a gate is set with a blank module name
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.cfg_gate.is_some() && self.module_name.trim().is_empty() {
            return Err(DispatchError::invalid_config(
                "module_name is required when cfg_gate is set",
            ));
        }
        Ok(())
    }
}

/// Complete generator configuration
///
/// # Example
///
/// ```toml
/// [dispatch]
/// mode = "parallel"
/// delivery = "channel"
/// threads = 4
///
/// [dispatch.options]
/// enable_func_args_history = true
///
/// [layout]
/// header = "// @generated"
/// imports = ["std::sync::atomic::{AtomicUsize, Ordering}"]
/// cfg_gate = "test"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Dispatcher settings
    pub dispatch: DispatchConfig,
    /// Output settings
    pub layout: OutputLayout,
}

impl GeneratorConfig {
    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    /// - `DispatchError::Config` on malformed TOML
    /// - `DispatchError::InvalidConfig` on inconsistent values
    pub fn from_toml_str(text: &str) -> Result<Self, DispatchError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check both sections
    ///
    /// # Errors
    /// Returns the first section error found
    pub fn validate(&self) -> Result<(), DispatchError> {
        self.dispatch.validate()?;
        self.layout.validate()
    }
}
