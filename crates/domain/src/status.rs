//! Controlled status and type vocabularies.
//!
//! Labels are the Czech display strings the extraction pattern tables produce
//! and the persistence backend stores; `from_label` is the inverse used when a
//! narrated state change has to be folded back into a tracked status.

use serde::{Deserialize, Serialize};

macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
        default = $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// Parse a display label back into the vocabulary. Returns `None`
            /// for free-form state strings outside the closed set.
            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labeled_enum! {
    /// Life state of a character.
    CharacterStatus {
        Alive => "Živý",
        Dead => "Mrtvý",
        Injured => "Zraněný",
        Unknown => "Neznámý",
    }
    default = Alive
}

labeled_enum! {
    /// Life state of a creature (feminine declension in the source prose).
    CreatureStatus {
        Alive => "Živá",
        Dead => "Mrtvá",
        Injured => "Zraněná",
        Unknown => "Neznámý",
    }
    default = Alive
}

labeled_enum! {
    /// Condition of a location.
    LocationStatus {
        Prosperous => "Prosperující",
        Declining => "V úpadku",
        Destroyed => "Zničené",
        Abandoned => "Opuštěné",
        Dangerous => "Nebezpečné",
        Safe => "Bezpečné",
    }
    default = Safe
}

labeled_enum! {
    /// Coarse location classification.
    LocationType {
        City => "Město",
        Village => "Vesnice",
        Dungeon => "Dungeon",
        Forest => "Les",
        Mountain => "Hora",
        Cave => "Jeskyně",
        Castle => "Hrad",
        Temple => "Chrám",
        Ruins => "Ruiny",
    }
    default = City
}

labeled_enum! {
    /// Coarse item classification.
    ItemType {
        Weapon => "Zbraň",
        Armor => "Brnění",
        Artifact => "Artefakt",
        Potion => "Lektvar",
        Scroll => "Svitek",
        Common => "Běžný předmět",
        Key => "Klíč",
    }
    default = Common
}

labeled_enum! {
    /// Quest progression state.
    QuestStatus {
        Active => "Aktivní",
        Completed => "Dokončený",
        Failed => "Selhaný",
        Paused => "Pozastavený",
    }
    default = Active
}
