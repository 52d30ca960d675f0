//! The closed discriminant classifying every entity record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity kind. Closed set: per-kind behavior elsewhere in the workspace is
/// driven by data tables keyed on this enum, so a new kind is a table change,
/// not a new conditional branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Character,
    Location,
    Creature,
    Item,
    Quest,
    Faction,
    Event,
    JournalEntry,
}

impl EntityKind {
    /// Every kind, in a stable order.
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Character,
        EntityKind::Location,
        EntityKind::Creature,
        EntityKind::Item,
        EntityKind::Quest,
        EntityKind::Faction,
        EntityKind::Event,
        EntityKind::JournalEntry,
    ];

    /// The four kinds the pipeline recognizes directly in narrative prose.
    pub const NARRATIVE: [EntityKind; 4] = [
        EntityKind::Character,
        EntityKind::Location,
        EntityKind::Creature,
        EntityKind::Item,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Character => "character",
            EntityKind::Location => "location",
            EntityKind::Creature => "creature",
            EntityKind::Item => "item",
            EntityKind::Quest => "quest",
            EntityKind::Faction => "faction",
            EntityKind::Event => "event",
            EntityKind::JournalEntry => "journal_entry",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_kind_once() {
        let mut seen = std::collections::BTreeSet::new();
        for kind in EntityKind::ALL {
            assert!(seen.insert(kind), "{kind} listed twice");
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn narrative_kinds_are_a_subset_of_all() {
        for kind in EntityKind::NARRATIVE {
            assert!(EntityKind::ALL.contains(&kind));
        }
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&EntityKind::JournalEntry).expect("serialize");
        assert_eq!(json, "\"journal_entry\"");
    }
}
