//! Trait entities
//!
//! [`TraitEntity`] is validated on construction so that nothing reaching
//! the dispatcher can fail to render.

use crate::template::render_trait_mock;
use mockgen_model::{DeclError, EntityKey, KeyError, MockModel, RenderOptions, ResolvedEntity, TraitDecl};
use std::str::FromStr;
use std::sync::Arc;

/// Resolved trait declaration keyed for generation
#[derive(Debug, Clone)]
pub struct TraitEntity {
    key: EntityKey,
    decl: Arc<TraitDecl>,
}

impl TraitEntity {
    /// Create entity from key and declaration
    ///
    /// # Errors
    /// - `TemplateError::Key` if the key is blank or malformed
    /// - `TemplateError::Decl` if the declaration fails validation
    pub fn new(key: &str, decl: TraitDecl) -> Result<Self, TemplateError> {
        let key = EntityKey::from_str(key)?;
        decl.validate()?;
        Ok(Self {
            key,
            decl: Arc::new(decl),
        })
    }
}

impl ResolvedEntity for TraitEntity {
    type Model = TraitMockModel;

    fn key(&self) -> &EntityKey {
        &self.key
    }

    fn model(&self) -> Self::Model {
        TraitMockModel {
            decl: Arc::clone(&self.decl),
        }
    }
}

/// Render model for a trait mock
#[derive(Debug, Clone)]
pub struct TraitMockModel {
    decl: Arc<TraitDecl>,
}

impl MockModel for TraitMockModel {
    fn name(&self) -> &str {
        &self.decl.name
    }

    fn offset(&self) -> i64 {
        self.decl.offset
    }

    fn render(&self, key: &EntityKey, encloser: &str, options: &RenderOptions) -> Option<String> {
        if self.decl.is_empty() {
            return None;
        }
        Some(render_trait_mock(key, encloser, &self.decl, options))
    }
}

/// Entity construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// Invalid entity key
    #[error("invalid entity key: {0}")]
    Key(#[from] KeyError),

    /// Invalid declaration
    #[error("invalid declaration: {0}")]
    Decl(#[from] DeclError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockgen_model::MethodDecl;

    #[test]
    fn trait_entity_new() {
        let decl = TraitDecl::new("Clock", 4).with_method(MethodDecl::new("now"));
        let entity = TraitEntity::new("time.Clock", decl).unwrap();
        assert_eq!(entity.key().as_str(), "time.Clock");

        let model = entity.model();
        assert_eq!(model.name(), "Clock");
        assert_eq!(model.offset(), 4);
    }

    #[test]
    fn trait_entity_rejects_bad_key() {
        let decl = TraitDecl::new("Clock", 0);
        assert!(matches!(
            TraitEntity::new("", decl),
            Err(TemplateError::Key(KeyError::Empty))
        ));
    }

    #[test]
    fn trait_entity_rejects_duplicate_methods() {
        let decl = TraitDecl::new("Clock", 0)
            .with_method(MethodDecl::new("now"))
            .with_method(MethodDecl::new("now"));
        assert!(matches!(
            TraitEntity::new("Clock", decl),
            Err(TemplateError::Decl(_))
        ));
    }

    #[test]
    fn empty_trait_renders_nothing() {
        let entity = TraitEntity::new("Marker", TraitDecl::new("Marker", 0)).unwrap();
        let model = entity.model();
        assert_eq!(
            model.render(entity.key(), model.name(), &RenderOptions::default()),
            None
        );
    }
}
