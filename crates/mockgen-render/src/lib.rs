//! mockgen Render
//!
//! Renders resolved entities into mock source text, possibly in parallel,
//! and delivers every non-empty result through a completion callback that
//! is never invoked concurrently.
//!
//! # Core Concepts
//!
//! - [`RenderDispatcher`]: Parallel or sequential rendering with serialized delivery
//! - [`DeliveryStrategy`]: Lock-guarded callback or single-consumer channel
//! - [`RenderReport`]: Rendered count plus skipped and failed entities
//! - [`MockOutput`]: Collects delivered mocks and assembles them in source order
//! - [`MockGenerator`]: Dispatcher and output assembly in one call
//!
//! # Example
//!
//! ```rust
//! use mockgen_model::{MethodDecl, RenderOptions, TraitDecl};
//! use mockgen_render::render_templates;
//! use mockgen_template::TraitEntity;
//!
//! let entities = vec![
//!     TraitEntity::new("time.Clock", TraitDecl::new("Clock", 10).with_method(MethodDecl::new("now"))).unwrap(),
//!     TraitEntity::new("Marker", TraitDecl::new("Marker", 20)).unwrap(),
//! ];
//!
//! let mut offsets = Vec::new();
//! let report = render_templates(&entities, &RenderOptions::default(), |_text, offset| {
//!     offsets.push(offset);
//! });
//!
//! assert_eq!(offsets, vec![10]);
//! assert_eq!(report.rendered, 1);
//! assert_eq!(report.skipped.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod dispatcher;
mod error;
mod output;
mod report;
pub mod telemetry;

pub use telemetry::{init_tracing, LogFormat};

// Re-exports
pub use config::{DeliveryStrategy, DispatchConfig, DispatchMode, GeneratorConfig, OutputLayout};
pub use dispatcher::{render_entity, render_templates, RenderDispatcher};
pub use error::{DispatchError, RenderFailure};
pub use output::{GeneratedMocks, MockGenerator, MockOutput};
pub use report::RenderReport;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a render
    pub use crate::{
        DeliveryStrategy, DispatchConfig, DispatchMode, MockGenerator, MockOutput,
        RenderDispatcher, RenderReport,
    };
    pub use mockgen_model::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
