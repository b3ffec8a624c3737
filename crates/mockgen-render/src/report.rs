//! Render reports
//!
//! A [`RenderReport`] is produced once every entity of a batch has been
//! attempted. Keys are sorted so that the report does not depend on the
//! order in which workers finished.

use crate::error::RenderFailure;
use mockgen_model::EntityKey;
use serde::Serialize;

/// Per-entity result used while a batch is running
#[derive(Debug)]
pub(crate) enum Tally {
    Delivered,
    Skipped(EntityKey),
    Failed(RenderFailure),
}

/// Summary of one dispatch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    /// Entities whose text was delivered
    pub rendered: usize,
    /// Entities with nothing to emit
    pub skipped: Vec<EntityKey>,
    /// Entities whose rendering failed
    pub failed: Vec<RenderFailure>,
}

impl RenderReport {
    /// Fold per-entity tallies into a report
    pub(crate) fn from_tallies(tallies: impl IntoIterator<Item = Tally>) -> Self {
        let mut report = Self::default();
        for tally in tallies {
            match tally {
                Tally::Delivered => report.rendered += 1,
                Tally::Skipped(key) => report.skipped.push(key),
                Tally::Failed(failure) => report.failed.push(failure),
            }
        }
        report.skipped.sort();
        report.failed.sort_by(|a, b| a.key.cmp(&b.key));
        report
    }

    /// Number of entities attempted
    #[inline]
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.rendered + self.skipped.len() + self.failed.len()
    }

    /// Check if no entity failed
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Serialize as JSON
    ///
    /// # Errors
    /// Returns the serializer error; cannot happen for well-formed reports
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_from_tallies() {
        let report = RenderReport::from_tallies(vec![
            Tally::Delivered,
            Tally::Skipped(EntityKey::new("z.Empty")),
            Tally::Failed(RenderFailure::new(EntityKey::new("b.Broken"), "boom")),
            Tally::Skipped(EntityKey::new("a.Empty")),
            Tally::Delivered,
        ]);

        assert_eq!(report.rendered, 2);
        assert_eq!(
            report.skipped,
            vec![EntityKey::new("a.Empty"), EntityKey::new("z.Empty")]
        );
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.attempted(), 5);
        assert!(!report.is_clean());
    }

    #[test]
    fn empty_report_is_clean() {
        let report = RenderReport::from_tallies(Vec::new());
        assert_eq!(report.attempted(), 0);
        assert!(report.is_clean());
    }

    #[test]
    fn report_to_json() {
        let report = RenderReport::from_tallies(vec![Tally::Failed(RenderFailure::new(
            EntityKey::new("net.Resolver"),
            "bad template",
        ))]);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["rendered"], 0);
        assert_eq!(json["failed"][0]["key"], "net.Resolver");
        assert_eq!(json["failed"][0]["message"], "bad template");
    }
}
