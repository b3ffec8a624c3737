//! Render outcomes
//!
//! Rendering has three results: text, nothing to emit, or a failure. The
//! first two are modelled here; failures are owned by the dispatcher.

use crate::key::EntityKey;
use serde::{Deserialize, Serialize};

/// Mock text produced for one entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderedMock {
    /// Source entity
    pub key: EntityKey,
    /// Generated text, never empty
    pub text: String,
    /// Source offset of the entity's declaration
    pub offset: i64,
}

/// Result of rendering one entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Non-empty text to deliver
    Rendered(RenderedMock),
    /// Nothing to emit; not an error
    Skipped,
}

impl RenderOutcome {
    /// Classify raw render output
    ///
    /// `None` and empty strings both become [`RenderOutcome::Skipped`].
    #[must_use]
    pub fn from_render(key: &EntityKey, text: Option<String>, offset: i64) -> Self {
        match text {
            Some(text) if !text.is_empty() => Self::Rendered(RenderedMock {
                key: key.clone(),
                text,
                offset,
            }),
            _ => Self::Skipped,
        }
    }

    /// Check if the outcome carries text
    #[inline]
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn outcome_from_text() {
        let key = EntityKey::new("A");
        let outcome = RenderOutcome::from_render(&key, Some("mockA".into()), 10);
        assert!(outcome.is_rendered());

        let RenderOutcome::Rendered(mock) = outcome else {
            panic!("expected rendered outcome");
        };
        assert_eq!(mock.text, "mockA");
        assert_eq!(mock.offset, 10);
        assert_eq!(mock.key, key);
    }

    #[test]
    fn outcome_empty_is_skipped() {
        let key = EntityKey::new("B");
        assert_eq!(
            RenderOutcome::from_render(&key, Some(String::new()), 3),
            RenderOutcome::Skipped
        );
        assert_eq!(RenderOutcome::from_render(&key, None, 3), RenderOutcome::Skipped);
    }

    proptest! {
        #[test]
        fn outcome_rendered_iff_non_empty(text in ".{0,16}", offset in any::<i64>()) {
            let key = EntityKey::new("P");
            let outcome = RenderOutcome::from_render(&key, Some(text.clone()), offset);
            prop_assert_eq!(outcome.is_rendered(), !text.is_empty());
        }
    }
}
