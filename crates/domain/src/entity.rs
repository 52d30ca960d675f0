//! Entity records extracted from session logs.
//!
//! An entity is a flat value record: a shared header (id, name, tags,
//! timestamps) plus one kind-specific payload. Cross-entity linkage is always
//! an [`EntityId`] reference held in an `Option` or an ordered `Vec`; records
//! never embed other records, so the graph is acyclic by construction.
//!
//! Ids and timestamps belong to the persistence layer: a freshly extracted
//! entity carries `None` for all three until its first successful `create`.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::EntityId;
use crate::kind::EntityKind;
use crate::status::{
    CharacterStatus, CreatureStatus, ItemType, LocationStatus, LocationType, QuestStatus,
};

/// One extracted domain record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Assigned by the persistence layer on first create.
    pub id: Option<EntityId>,
    pub name: String,
    /// Deduplicated, values drawn from the kind's closed tag vocabulary.
    pub tags: BTreeSet<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub data: EntityData,
}

impl Entity {
    pub fn new(name: impl Into<String>, data: EntityData) -> Self {
        Self {
            id: None,
            name: name.into(),
            tags: BTreeSet::new(),
            created_at: None,
            updated_at: None,
            data,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn kind(&self) -> EntityKind {
        self.data.kind()
    }

    /// Fold `other` into this record: tags are unioned; when the kinds match,
    /// empty scalar fields are filled from `other` and history-like fields
    /// are concatenated. Mismatched kinds contribute tags only.
    pub fn merge_from(&mut self, other: &Entity) {
        self.tags.extend(other.tags.iter().cloned());
        self.data.merge_from(&other.data);
    }
}

/// Kind-specific payload. Closed enum: one variant per [`EntityKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityData {
    Character(CharacterData),
    Location(LocationData),
    Creature(CreatureData),
    Item(ItemData),
    Quest(QuestData),
    Faction(FactionData),
    Event(EventData),
    JournalEntry(JournalEntryData),
}

impl EntityData {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityData::Character(_) => EntityKind::Character,
            EntityData::Location(_) => EntityKind::Location,
            EntityData::Creature(_) => EntityKind::Creature,
            EntityData::Item(_) => EntityKind::Item,
            EntityData::Quest(_) => EntityKind::Quest,
            EntityData::Faction(_) => EntityKind::Faction,
            EntityData::Event(_) => EntityKind::Event,
            EntityData::JournalEntry(_) => EntityKind::JournalEntry,
        }
    }

    /// Empty payload of the given kind, fields at their vocabulary defaults.
    pub fn empty(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Character => EntityData::Character(CharacterData::default()),
            EntityKind::Location => EntityData::Location(LocationData::default()),
            EntityKind::Creature => EntityData::Creature(CreatureData::default()),
            EntityKind::Item => EntityData::Item(ItemData::default()),
            EntityKind::Quest => EntityData::Quest(QuestData::default()),
            EntityKind::Faction => EntityData::Faction(FactionData::default()),
            EntityKind::Event => EntityData::Event(EventData::default()),
            EntityKind::JournalEntry => EntityData::JournalEntry(JournalEntryData::default()),
        }
    }

    fn merge_from(&mut self, other: &EntityData) {
        match (self, other) {
            (EntityData::Character(base), EntityData::Character(more)) => base.merge_from(more),
            (EntityData::Location(base), EntityData::Location(more)) => base.merge_from(more),
            (EntityData::Creature(base), EntityData::Creature(more)) => base.merge_from(more),
            (EntityData::Item(base), EntityData::Item(more)) => base.merge_from(more),
            (EntityData::Quest(base), EntityData::Quest(more)) => base.merge_from(more),
            (EntityData::Faction(base), EntityData::Faction(more)) => base.merge_from(more),
            (EntityData::Event(base), EntityData::Event(more)) => base.merge_from(more),
            (EntityData::JournalEntry(base), EntityData::JournalEntry(more)) => {
                base.merge_from(more)
            }
            // Cross-kind merge carries no payload fields.
            _ => {}
        }
    }
}

/// Copy `src` into `dst` only when `dst` is still empty.
pub fn fill_scalar(dst: &mut String, src: &str) {
    if dst.is_empty() && !src.is_empty() {
        dst.push_str(src);
    }
}

/// Fill an id reference only when unset.
pub fn fill_id(dst: &mut Option<EntityId>, src: Option<EntityId>) {
    if dst.is_none() {
        *dst = src;
    }
}

/// Append to a free-text history field, blank-line separated. History fields
/// are append-only; an empty field is simply taken over.
pub fn append_history(dst: &mut String, entry: &str) {
    if entry.is_empty() {
        return;
    }
    if !dst.is_empty() {
        dst.push_str("\n\n");
    }
    dst.push_str(entry);
}

/// Append an id to an ordered relation list, skipping duplicates.
pub fn push_unique(ids: &mut Vec<EntityId>, id: EntityId) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterData {
    pub description: String,
    pub status: CharacterStatus,
    pub role: String,
    pub location_id: Option<EntityId>,
    pub related_character_ids: Vec<EntityId>,
    pub item_ids: Vec<EntityId>,
    pub history: String,
}

impl CharacterData {
    fn merge_from(&mut self, other: &Self) {
        fill_scalar(&mut self.description, &other.description);
        fill_scalar(&mut self.role, &other.role);
        fill_id(&mut self.location_id, other.location_id);
        for id in &other.related_character_ids {
            push_unique(&mut self.related_character_ids, *id);
        }
        for id in &other.item_ids {
            push_unique(&mut self.item_ids, *id);
        }
        append_history(&mut self.history, &other.history);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    pub location_type: LocationType,
    /// Free-text containment path, e.g. "v západním Gondoru".
    pub hierarchy: String,
    pub description: String,
    pub occupant_ids: Vec<EntityId>,
    pub item_ids: Vec<EntityId>,
    pub event_ids: Vec<EntityId>,
    pub status: LocationStatus,
}

impl LocationData {
    fn merge_from(&mut self, other: &Self) {
        fill_scalar(&mut self.hierarchy, &other.hierarchy);
        fill_scalar(&mut self.description, &other.description);
        for id in &other.occupant_ids {
            push_unique(&mut self.occupant_ids, *id);
        }
        for id in &other.item_ids {
            push_unique(&mut self.item_ids, *id);
        }
        for id in &other.event_ids {
            push_unique(&mut self.event_ids, *id);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatureData {
    pub description: String,
    pub location_ids: Vec<EntityId>,
    pub status: CreatureStatus,
    pub combat_history: String,
    pub weaknesses_strengths: String,
    pub loot_ids: Vec<EntityId>,
}

impl CreatureData {
    fn merge_from(&mut self, other: &Self) {
        fill_scalar(&mut self.description, &other.description);
        fill_scalar(&mut self.weaknesses_strengths, &other.weaknesses_strengths);
        for id in &other.location_ids {
            push_unique(&mut self.location_ids, *id);
        }
        for id in &other.loot_ids {
            push_unique(&mut self.loot_ids, *id);
        }
        append_history(&mut self.combat_history, &other.combat_history);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemData {
    pub item_type: ItemType,
    pub description: String,
    pub location_id: Option<EntityId>,
    pub owner_id: Option<EntityId>,
    pub ownership_history: String,
    pub special_abilities: String,
}

impl ItemData {
    fn merge_from(&mut self, other: &Self) {
        fill_scalar(&mut self.description, &other.description);
        fill_scalar(&mut self.special_abilities, &other.special_abilities);
        fill_id(&mut self.location_id, other.location_id);
        fill_id(&mut self.owner_id, other.owner_id);
        append_history(&mut self.ownership_history, &other.ownership_history);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestData {
    pub description: String,
    pub giver_id: Option<EntityId>,
    pub status: QuestStatus,
    pub rewards: String,
    pub location_ids: Vec<EntityId>,
    pub character_ids: Vec<EntityId>,
    pub timeline: String,
}

impl QuestData {
    fn merge_from(&mut self, other: &Self) {
        fill_scalar(&mut self.description, &other.description);
        fill_scalar(&mut self.rewards, &other.rewards);
        fill_id(&mut self.giver_id, other.giver_id);
        for id in &other.location_ids {
            push_unique(&mut self.location_ids, *id);
        }
        for id in &other.character_ids {
            push_unique(&mut self.character_ids, *id);
        }
        append_history(&mut self.timeline, &other.timeline);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactionData {
    pub description: String,
    pub member_ids: Vec<EntityId>,
    pub territory_ids: Vec<EntityId>,
    pub faction_relations: String,
    pub player_reputation: i32,
    pub event_ids: Vec<EntityId>,
}

impl FactionData {
    fn merge_from(&mut self, other: &Self) {
        fill_scalar(&mut self.description, &other.description);
        for id in &other.member_ids {
            push_unique(&mut self.member_ids, *id);
        }
        for id in &other.territory_ids {
            push_unique(&mut self.territory_ids, *id);
        }
        for id in &other.event_ids {
            push_unique(&mut self.event_ids, *id);
        }
        append_history(&mut self.faction_relations, &other.faction_relations);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub date: Option<DateTime<Utc>>,
    pub description: String,
    pub location_id: Option<EntityId>,
    pub character_ids: Vec<EntityId>,
    pub consequences: String,
}

impl EventData {
    fn merge_from(&mut self, other: &Self) {
        fill_scalar(&mut self.description, &other.description);
        fill_id(&mut self.location_id, other.location_id);
        if self.date.is_none() {
            self.date = other.date;
        }
        for id in &other.character_ids {
            push_unique(&mut self.character_ids, *id);
        }
        append_history(&mut self.consequences, &other.consequences);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalEntryData {
    pub date: Option<DateTime<Utc>>,
    pub summary: String,
    pub event_ids: Vec<EntityId>,
    pub character_ids: Vec<EntityId>,
    pub location_ids: Vec<EntityId>,
}

impl JournalEntryData {
    fn merge_from(&mut self, other: &Self) {
        fill_scalar(&mut self.summary, &other.summary);
        if self.date.is_none() {
            self.date = other.date;
        }
        for id in &other.event_ids {
            push_unique(&mut self.event_ids, *id);
        }
        for id in &other.character_ids {
            push_unique(&mut self.character_ids, *id);
        }
        for id in &other.location_ids {
            push_unique(&mut self.location_ids, *id);
        }
    }
}
