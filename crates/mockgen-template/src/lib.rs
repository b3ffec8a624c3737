//! mockgen Templates
//!
//! Turns resolved trait declarations into mock source text.
//!
//! - [`TraitEntity`]: [`ResolvedEntity`](mockgen_model::ResolvedEntity) over a [`TraitDecl`](mockgen_model::TraitDecl)
//! - [`TraitMockModel`]: [`MockModel`](mockgen_model::MockModel) rendering the mock struct and trait impl
//!
//! # Example
//!
//! ```rust
//! use mockgen_model::{MethodDecl, MockModel, RenderOptions, ResolvedEntity, TraitDecl};
//! use mockgen_template::TraitEntity;
//!
//! let decl = TraitDecl::new("Clock", 120).with_method(MethodDecl::new("now").returning("u64"));
//! let entity = TraitEntity::new("time.Clock", decl).unwrap();
//!
//! let model = entity.model();
//! let text = model
//!     .render(entity.key(), model.name(), &RenderOptions::default())
//!     .unwrap();
//! assert!(text.contains("pub struct ClockMock"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod entity;
mod template;

pub use entity::{TemplateError, TraitEntity, TraitMockModel};
pub use template::render_trait_mock;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
