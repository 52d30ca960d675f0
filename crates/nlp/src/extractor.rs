//! Kind-specific attribute extraction.
//!
//! Pure functions of (document, mention name): ordered pattern templates per
//! field, a sentence-based fallback for descriptions, priority-ordered status
//! tables. Absence of a match leaves the field at its default; extraction
//! never fails.

use chronicler_domain::{
    CharacterData, CharacterStatus, CreatureData, CreatureStatus, EntityData, EntityKind,
    ItemData, ItemType, LocationData, LocationStatus, LocationType,
};

use crate::annotate::Document;
use crate::patterns::{
    first_status, first_template_all_captures, first_template_capture, CHARACTER_DESCRIPTION,
    CHARACTER_HISTORY, CHARACTER_LOCATION, CHARACTER_ROLE, CHARACTER_STATUS, CREATURE_COMBAT,
    CREATURE_DESCRIPTION, CREATURE_STATUS, CREATURE_STRENGTH, CREATURE_WEAKNESS,
    DESCRIPTIVE_LEMMAS, ITEM_ABILITIES, ITEM_DESCRIPTION, ITEM_OWNERSHIP, ITEM_TYPE,
    LOCATION_DESCRIPTION, LOCATION_HIERARCHY, LOCATION_STATUS, LOCATION_TYPE,
};

/// Extracted fields for a character mention.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterAttributes {
    pub description: String,
    pub status: CharacterStatus,
    pub role: String,
    /// Free-text location phrase; resolution to an id happens elsewhere.
    pub location: String,
    pub history: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationAttributes {
    /// `None` when no type template matched; callers keep their default.
    pub location_type: Option<LocationType>,
    pub hierarchy: String,
    pub description: String,
    pub status: LocationStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatureAttributes {
    pub description: String,
    pub status: CreatureStatus,
    pub combat_history: String,
    pub weaknesses_strengths: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemAttributes {
    pub item_type: Option<ItemType>,
    pub description: String,
    pub ownership_history: String,
    pub special_abilities: String,
}

/// Attributes for any of the four narrative kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedAttributes {
    Character(CharacterAttributes),
    Location(LocationAttributes),
    Creature(CreatureAttributes),
    Item(ItemAttributes),
}

impl ExtractedAttributes {
    /// Build a fresh entity payload from the extracted fields.
    pub fn into_entity_data(self) -> EntityData {
        match self {
            ExtractedAttributes::Character(attrs) => EntityData::Character(CharacterData {
                description: attrs.description,
                status: attrs.status,
                role: attrs.role,
                history: attrs.history,
                ..CharacterData::default()
            }),
            ExtractedAttributes::Location(attrs) => EntityData::Location(LocationData {
                location_type: attrs.location_type.unwrap_or_default(),
                hierarchy: attrs.hierarchy,
                description: attrs.description,
                status: attrs.status,
                ..LocationData::default()
            }),
            ExtractedAttributes::Creature(attrs) => EntityData::Creature(CreatureData {
                description: attrs.description,
                status: attrs.status,
                combat_history: attrs.combat_history,
                weaknesses_strengths: attrs.weaknesses_strengths,
                ..CreatureData::default()
            }),
            ExtractedAttributes::Item(attrs) => EntityData::Item(ItemData {
                item_type: attrs.item_type.unwrap_or_default(),
                description: attrs.description,
                ownership_history: attrs.ownership_history,
                special_abilities: attrs.special_abilities,
                ..ItemData::default()
            }),
        }
    }
}

/// Pattern-table driven attribute extractor.
#[derive(Debug, Default)]
pub struct AttributeExtractor;

impl AttributeExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Dispatch on kind. Returns `None` for kinds without an extraction
    /// table (quests, factions, events, journal entries are not extracted
    /// from prose directly).
    pub fn extract(
        &self,
        kind: EntityKind,
        doc: &Document,
        name: &str,
    ) -> Option<ExtractedAttributes> {
        match kind {
            EntityKind::Character => {
                Some(ExtractedAttributes::Character(self.character(doc, name)))
            }
            EntityKind::Location => Some(ExtractedAttributes::Location(self.location(doc, name))),
            EntityKind::Creature => Some(ExtractedAttributes::Creature(self.creature(doc, name))),
            EntityKind::Item => Some(ExtractedAttributes::Item(self.item(doc, name))),
            _ => None,
        }
    }

    pub fn character(&self, doc: &Document, name: &str) -> CharacterAttributes {
        let text = doc.text();
        CharacterAttributes {
            description: first_template_all_captures(CHARACTER_DESCRIPTION, name, text)
                .or_else(|| fallback_description(doc, name))
                .unwrap_or_default(),
            status: first_status(CHARACTER_STATUS, name, text).unwrap_or_default(),
            role: first_template_capture(CHARACTER_ROLE, name, text).unwrap_or_default(),
            location: first_template_capture(CHARACTER_LOCATION, name, text).unwrap_or_default(),
            history: first_template_capture(CHARACTER_HISTORY, name, text).unwrap_or_default(),
        }
    }

    pub fn location(&self, doc: &Document, name: &str) -> LocationAttributes {
        let text = doc.text();
        LocationAttributes {
            location_type: first_status(LOCATION_TYPE, name, text),
            hierarchy: first_template_capture(LOCATION_HIERARCHY, name, text).unwrap_or_default(),
            description: first_template_all_captures(LOCATION_DESCRIPTION, name, text)
                .or_else(|| fallback_description(doc, name))
                .unwrap_or_default(),
            status: first_status(LOCATION_STATUS, name, text).unwrap_or_default(),
        }
    }

    pub fn creature(&self, doc: &Document, name: &str) -> CreatureAttributes {
        let text = doc.text();
        let weaknesses = first_template_all_captures(CREATURE_WEAKNESS, name, text);
        let strengths = first_template_all_captures(CREATURE_STRENGTH, name, text);
        CreatureAttributes {
            description: first_template_all_captures(CREATURE_DESCRIPTION, name, text)
                .or_else(|| fallback_description(doc, name))
                .unwrap_or_default(),
            status: first_status(CREATURE_STATUS, name, text).unwrap_or_default(),
            combat_history: first_template_all_captures(CREATURE_COMBAT, name, text)
                .unwrap_or_default(),
            weaknesses_strengths: join_weaknesses_strengths(weaknesses, strengths),
        }
    }

    pub fn item(&self, doc: &Document, name: &str) -> ItemAttributes {
        let text = doc.text();
        ItemAttributes {
            item_type: first_status(ITEM_TYPE, name, text),
            description: first_template_all_captures(ITEM_DESCRIPTION, name, text)
                .or_else(|| fallback_description(doc, name))
                .unwrap_or_default(),
            ownership_history: first_template_all_captures(ITEM_OWNERSHIP, name, text)
                .unwrap_or_default(),
            special_abilities: first_template_all_captures(ITEM_ABILITIES, name, text)
                .unwrap_or_default(),
        }
    }
}

/// Fallback description: the first sentence that mentions the name and
/// contains a copula or perception lemma.
fn fallback_description(doc: &Document, name: &str) -> Option<String> {
    let needle = name.to_lowercase();
    for sentence in doc.sentences() {
        let text = doc.sentence_text(sentence);
        if !text.to_lowercase().contains(&needle) {
            continue;
        }
        let descriptive = doc
            .sentence_tokens(sentence)
            .iter()
            .any(|token| DESCRIPTIVE_LEMMAS.contains(&token.lemma.as_str()));
        if descriptive {
            return Some(text.trim().to_string());
        }
    }
    None
}

fn join_weaknesses_strengths(weaknesses: Option<String>, strengths: Option<String>) -> String {
    let mut out = String::new();
    if let Some(weaknesses) = weaknesses {
        out.push_str("Slabiny: ");
        out.push_str(&weaknesses);
    }
    if let Some(strengths) = strengths {
        if !out.is_empty() {
            out.push_str("; ");
        }
        out.push_str("Silné stránky: ");
        out.push_str(&strengths);
    }
    out
}
