//! mockgen Model
//!
//! Render-ready descriptions of resolved declarations.
//!
//! # Core Concepts
//!
//! - [`EntityKey`]: Stable identifier attributing output to its source entity
//! - [`ResolvedEntity`]: A fully resolved declaration slated for mock generation
//! - [`MockModel`]: Pure renderer producing the mock text for one entity
//! - [`RenderOptions`]: Named generation-style switches
//! - [`RenderOutcome`]: Tagged result of rendering one entity
//!
//! # Example
//!
//! ```rust
//! use mockgen_model::{EntityKey, MockModel, RenderOptions};
//!
//! struct Greeting;
//!
//! impl MockModel for Greeting {
//!     fn name(&self) -> &str {
//!         "Greeter"
//!     }
//!
//!     fn offset(&self) -> i64 {
//!         42
//!     }
//!
//!     fn render(&self, key: &EntityKey, encloser: &str, _options: &RenderOptions) -> Option<String> {
//!         Some(format!("// {key}: {encloser}Mock"))
//!     }
//! }
//!
//! let model = Greeting;
//! let key = EntityKey::new("app.Greeter");
//! let text = model.render(&key, model.name(), &RenderOptions::default());
//! assert_eq!(text.as_deref(), Some("// app.Greeter: GreeterMock"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod decl;
mod entity;
mod key;
mod options;
mod outcome;

// Re-exports
pub use decl::{DeclError, MethodDecl, ParamDecl, Receiver, TraitDecl};
pub use entity::{MockModel, ResolvedEntity};
pub use key::{EntityKey, KeyError};
pub use options::RenderOptions;
pub use outcome::{RenderOutcome, RenderedMock};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for implementing entities and models
    pub use crate::{
        EntityKey, MockModel, RenderOptions, RenderOutcome, RenderedMock, ResolvedEntity,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
