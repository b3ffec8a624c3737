//! Entity and model traits
//!
//! A [`ResolvedEntity`] is produced by an external resolution phase and is
//! immutable while rendering. It hands out a [`MockModel`], the pure function
//! that turns the entity into generated source text.

use crate::key::EntityKey;
use crate::options::RenderOptions;
use std::sync::Arc;

/// Render-ready description of one entity's generated mock
///
/// Implementations must be pure: rendering the same model twice with the
/// same arguments yields the same text.
pub trait MockModel {
    /// Enclosing type name, used as the rendering namespace
    fn name(&self) -> &str;

    /// Position of the declaration in its original source
    fn offset(&self) -> i64;

    /// Render the mock text
    ///
    /// Returns `None` (or an empty string) when there is nothing to emit,
    /// e.g. for a declaration without members.
    fn render(&self, key: &EntityKey, encloser: &str, options: &RenderOptions) -> Option<String>;
}

/// Fully resolved declaration slated for mock generation
///
/// Entities are shared across render workers, hence `Send + Sync`.
pub trait ResolvedEntity: Send + Sync {
    /// Model type produced by [`ResolvedEntity::model`]
    type Model: MockModel;

    /// Stable identifier of this entity
    fn key(&self) -> &EntityKey;

    /// Build the render model
    fn model(&self) -> Self::Model;
}

impl<M: MockModel + ?Sized> MockModel for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn offset(&self) -> i64 {
        (**self).offset()
    }

    fn render(&self, key: &EntityKey, encloser: &str, options: &RenderOptions) -> Option<String> {
        (**self).render(key, encloser, options)
    }
}

impl<E: ResolvedEntity + ?Sized> ResolvedEntity for Arc<E> {
    type Model = E::Model;

    fn key(&self) -> &EntityKey {
        (**self).key()
    }

    fn model(&self) -> Self::Model {
        (**self).model()
    }
}

impl<E: ResolvedEntity + ?Sized> ResolvedEntity for &E {
    type Model = E::Model;

    fn key(&self) -> &EntityKey {
        (**self).key()
    }

    fn model(&self) -> Self::Model {
        (**self).model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        key: EntityKey,
        text: &'static str,
    }

    struct FixedModel {
        text: &'static str,
    }

    impl MockModel for FixedModel {
        fn name(&self) -> &str {
            "Fixed"
        }

        fn offset(&self) -> i64 {
            7
        }

        fn render(&self, _key: &EntityKey, encloser: &str, _options: &RenderOptions) -> Option<String> {
            Some(format!("{encloser}:{}", self.text))
        }
    }

    impl ResolvedEntity for Fixed {
        type Model = FixedModel;

        fn key(&self) -> &EntityKey {
            &self.key
        }

        fn model(&self) -> Self::Model {
            FixedModel { text: self.text }
        }
    }

    #[test]
    fn arc_entity_delegates() {
        let entity = Arc::new(Fixed {
            key: EntityKey::new("a.Fixed"),
            text: "body",
        });
        assert_eq!(entity.key().as_str(), "a.Fixed");

        let model = entity.model();
        assert_eq!(model.offset(), 7);
        assert_eq!(
            model.render(entity.key(), model.name(), &RenderOptions::default()),
            Some("Fixed:body".to_string())
        );
    }

    #[test]
    fn boxed_model_delegates() {
        let model: Box<dyn MockModel> = Box::new(FixedModel { text: "x" });
        assert_eq!(model.name(), "Fixed");
        assert_eq!(
            model.render(&EntityKey::new("k"), "Other", &RenderOptions::default()),
            Some("Other:x".to_string())
        );
    }
}
