//! Warning-level signals for malformed category snapshots.
//!
//! The pure functions in this crate never fail on data-shape problems; the
//! category list may be re-processed on every keystroke in a search box, so a
//! bad row must degrade, not abort. Each degradation is recorded as a
//! [`Diagnostic`] the caller can log or surface.

use crate::CategoryId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A recoverable defect found while indexing or building the tree.
///
/// Each variant corresponds to a documented fallback policy:
/// duplicate id → last write wins, orphaned parent → treated as root,
/// cycle → edge dropped and node re-rooted.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// The same id appeared more than once; the last occurrence won.
    #[error("duplicate category id '{id}': last occurrence wins")]
    DuplicateId { id: CategoryId },

    /// `parent_id` did not resolve to a present category; the category was
    /// registered under the root bucket.
    #[error("category '{id}' references missing parent '{parent_id}': treated as root")]
    OrphanParent {
        id: CategoryId,
        parent_id: CategoryId,
    },

    /// A parent cycle was found and broken at this category.
    #[error("parent cycle detected at category '{id}': cycle edge dropped, node re-rooted")]
    CycleDetected { id: CategoryId },
}

impl Diagnostic {
    /// The category id the diagnostic is about.
    pub fn category_id(&self) -> &str {
        match self {
            Diagnostic::DuplicateId { id } => id,
            Diagnostic::OrphanParent { id, .. } => id,
            Diagnostic::CycleDetected { id } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::DuplicateId { id: "a".into() };
        assert_eq!(d.to_string(), "duplicate category id 'a': last occurrence wins");

        let d = Diagnostic::OrphanParent {
            id: "b".into(),
            parent_id: "ghost".into(),
        };
        assert_eq!(
            d.to_string(),
            "category 'b' references missing parent 'ghost': treated as root"
        );

        let d = Diagnostic::CycleDetected { id: "c".into() };
        assert_eq!(
            d.to_string(),
            "parent cycle detected at category 'c': cycle edge dropped, node re-rooted"
        );
    }

    #[test]
    fn diagnostic_category_id() {
        let d = Diagnostic::OrphanParent {
            id: "b".into(),
            parent_id: "ghost".into(),
        };
        assert_eq!(d.category_id(), "b");
    }

    #[test]
    fn serialization_tagged() {
        let d = Diagnostic::CycleDetected { id: "x".into() };
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("\"kind\":\"cycleDetected\""));

        let parsed: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(d, parsed);
    }
}
