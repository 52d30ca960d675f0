//! Chronicler Domain - entity kinds, records, status vocabularies and the
//! invariants they carry.
//!
//! This crate is pure data: no I/O, no async, no extraction logic. The NLP
//! and engine crates build on these records.

pub mod entity;
pub mod error;
pub mod ids;
pub mod kind;
pub mod status;

pub use entity::{
    append_history, fill_id, fill_scalar, push_unique, CharacterData, CreatureData, Entity,
    EntityData, EventData, FactionData, ItemData, JournalEntryData, LocationData, QuestData,
};
pub use error::DomainError;
pub use ids::EntityId;
pub use kind::EntityKind;
pub use status::{
    CharacterStatus, CreatureStatus, ItemType, LocationStatus, LocationType, QuestStatus,
};
