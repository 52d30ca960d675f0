//! Attribute extraction pattern tables.
//!
//! Per kind: ordered regex template lists per field plus priority-ordered
//! status tables. Templates carry a `{name}` placeholder; the mention name is
//! interpolated escaped and matching is case-insensitive. Process-wide
//! read-only data, loaded once.

use regex::Regex;

use chronicler_domain::{CharacterStatus, CreatureStatus, ItemType, LocationStatus, LocationType};

/// Lemmas that mark a sentence as descriptive (copula / perception verbs);
/// used as the fallback when no description template matches.
pub const DESCRIPTIVE_LEMMAS: &[&str] = &["být", "vypadat", "mít"];

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

pub const CHARACTER_DESCRIPTION: &[&str] = &[
    r"{name}(?:\s+je|\s+byl|\s+byla|\s+vypadá|\s+má)\s+([^.!?]+)[.!?]",
    r"(?:popis|vzhled|charakteristika)\s+(?:postavy\s+)?{name}\s*:\s*([^.!?]+)[.!?]",
];

pub const CHARACTER_ROLE: &[&str] = &[
    r"{name}(?:\s+je|\s+byl|\s+byla|\s+pracuje\s+jako)\s+([^,.!?]+(?:čaroděj|kouzelník|válečník|zloděj|hraničář|bard|mnich|paladin|druid|alchymista|obchodník|kovář|hostinský|král|královna|princ|princezna|rytíř|šlechtic|šlechtična|lord|lady|baron|baronka|hrabě|hraběnka|vévoda|vévodkyně|kněz|kněžka|šaman|vůdce|náčelník)[^.!?]*)[.!?]",
    r"(?:povolání|role|zaměstnání|profese)\s+(?:postavy\s+)?{name}\s*:\s*([^.!?]+)[.!?]",
];

pub const CHARACTER_LOCATION: &[&str] = &[
    r"{name}(?:\s+se\s+nachází|\s+žije|\s+bydlí|\s+přebývá|\s+pobývá)\s+v\s+([^.!?]+)[.!?]",
    r"{name}(?:\s+je|\s+byl|\s+byla)\s+(?:spatřen|spatřena|viděn|viděna)\s+v\s+([^.!?]+)[.!?]",
];

pub const CHARACTER_HISTORY: &[&str] = &[
    r"(?:historie|minulost|příběh)\s+(?:postavy\s+)?{name}\s*:\s*([^.!?]+(?:[.!?][^.!?]+){0,5})[.!?]",
    r"{name}(?:\s+dříve|\s+předtím|\s+kdysi)\s+([^.!?]+(?:[.!?][^.!?]+){0,2})[.!?]",
];

/// Priority-ordered: the first status whose any pattern matches wins.
pub const CHARACTER_STATUS: &[(CharacterStatus, &[&str])] = &[
    (
        CharacterStatus::Alive,
        &[r"{name}(?:\s+je|\s+zůstává)\s+(?:naživu|živý|zdravý)"],
    ),
    (
        CharacterStatus::Dead,
        &[r"{name}(?:\s+je|\s+byl|\s+byla)\s+(?:mrtvý|mrtvá|zabit|zabita|zemřel|zemřela)"],
    ),
    (
        CharacterStatus::Injured,
        &[r"{name}(?:\s+je|\s+byl|\s+byla)\s+(?:zraněn|zraněna|zraněný|zraněná|poraněn|poraněna)"],
    ),
];

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

pub const LOCATION_TYPE: &[(LocationType, &[&str])] = &[
    (
        LocationType::City,
        &[
            r"(?:město|metropole|velkoměsto)\s+{name}",
            r"{name}(?:\s+je|\s+bylo)\s+(?:město|metropole|velkoměsto)",
        ],
    ),
    (
        LocationType::Village,
        &[
            r"(?:vesnice|vesnička|osada)\s+{name}",
            r"{name}(?:\s+je|\s+byla)\s+(?:vesnice|vesnička|osada)",
        ],
    ),
    (
        LocationType::Dungeon,
        &[
            r"(?:dungeon|kobka|žalář|vězení)\s+{name}",
            r"{name}(?:\s+je|\s+byl|\s+byla)\s+(?:dungeon|kobka|žalář|vězení)",
        ],
    ),
    (
        LocationType::Forest,
        &[
            r"(?:les|hvozd|prales)\s+{name}",
            r"{name}(?:\s+je|\s+byl)\s+(?:les|hvozd|prales)",
        ],
    ),
    (
        LocationType::Mountain,
        &[
            r"(?:hora|pohoří|vrchol)\s+{name}",
            r"{name}(?:\s+je|\s+byla)\s+(?:hora|pohoří|vrchol)",
        ],
    ),
    (
        LocationType::Cave,
        &[
            r"(?:jeskyně|sluj|doupě)\s+{name}",
            r"{name}(?:\s+je|\s+byla)\s+(?:jeskyně|sluj|doupě)",
        ],
    ),
    (
        LocationType::Castle,
        &[
            r"(?:hrad|pevnost|tvrz)\s+{name}",
            r"{name}(?:\s+je|\s+byl)\s+(?:hrad|pevnost|tvrz)",
        ],
    ),
    (
        LocationType::Temple,
        &[
            r"(?:chrám|svatyně|katedrála)\s+{name}",
            r"{name}(?:\s+je|\s+byl|\s+byla)\s+(?:chrám|svatyně|katedrála)",
        ],
    ),
    (
        LocationType::Ruins,
        &[
            r"(?:ruiny|zřícenina|trosky)\s+{name}",
            r"{name}(?:\s+jsou|\s+je|\s+byla)\s+(?:ruiny|zřícenina|trosky)",
        ],
    ),
];

pub const LOCATION_HIERARCHY: &[&str] = &[
    r"{name}(?:\s+se\s+nachází|\s+leží|\s+je)\s+v\s+([^.!?]+)[.!?]",
    r"(?:oblast|region|země|kontinent)\s+(?:kolem|obsahující)\s+{name}\s+(?:je|se\s+nazývá)\s+([^.!?]+)[.!?]",
];

pub const LOCATION_DESCRIPTION: &[&str] = &[
    r"{name}(?:\s+je|\s+bylo|\s+byla|\s+vypadá)\s+([^.!?]+)[.!?]",
    r"(?:popis|vzhled|charakteristika)\s+(?:lokace\s+)?{name}\s*:\s*([^.!?]+)[.!?]",
];

pub const LOCATION_STATUS: &[(LocationStatus, &[&str])] = &[
    (
        LocationStatus::Prosperous,
        &[r"{name}(?:\s+je|\s+bylo|\s+byla)\s+(?:prosperující|bohaté|bohatá|úspěšné|úspěšná|vzkvétající)"],
    ),
    (
        LocationStatus::Declining,
        &[r"{name}(?:\s+je|\s+bylo|\s+byla)\s+(?:v\s+úpadku|upadající|chudé|chudá|zchátralé|zchátralá)"],
    ),
    (
        LocationStatus::Destroyed,
        &[r"{name}(?:\s+je|\s+bylo|\s+byla)\s+(?:zničené|zničená|zničeno|zpustošené|zpustošená|zpustošeno)"],
    ),
    (
        LocationStatus::Abandoned,
        &[r"{name}(?:\s+je|\s+bylo|\s+byla)\s+(?:opuštěné|opuštěná|opuštěno|prázdné|prázdná|prázdno)"],
    ),
    (
        LocationStatus::Dangerous,
        &[r"{name}(?:\s+je|\s+bylo|\s+byla)\s+(?:nebezpečné|nebezpečná|nebezpečno|hrozivé|hrozivá|hrozivo)"],
    ),
    (
        LocationStatus::Safe,
        &[r"{name}(?:\s+je|\s+bylo|\s+byla)\s+(?:bezpečné|bezpečná|bezpečno|klidné|klidná|klidno)"],
    ),
];

// ---------------------------------------------------------------------------
// Creatures
// ---------------------------------------------------------------------------

pub const CREATURE_DESCRIPTION: &[&str] = &[
    r"{name}(?:\s+je|\s+byl|\s+byla|\s+vypadá|\s+má)\s+([^.!?]+)[.!?]",
    r"(?:popis|vzhled|charakteristika)\s+(?:příšery\s+)?{name}\s*:\s*([^.!?]+)[.!?]",
];

pub const CREATURE_STATUS: &[(CreatureStatus, &[&str])] = &[
    (
        CreatureStatus::Alive,
        &[r"{name}(?:\s+je|\s+zůstává)\s+(?:naživu|živá|živý|zdravá|zdravý)"],
    ),
    (
        CreatureStatus::Dead,
        &[r"{name}(?:\s+je|\s+byl|\s+byla)\s+(?:mrtvá|mrtvý|zabita|zabit|zemřela|zemřel)"],
    ),
    (
        CreatureStatus::Injured,
        &[r"{name}(?:\s+je|\s+byl|\s+byla)\s+(?:zraněná|zraněný|zraněna|zraněn|poraněná|poraněný|poraněna|poraněn)"],
    ),
];

pub const CREATURE_COMBAT: &[&str] = &[
    r"{name}(?:\s+bojovala|\s+bojoval|\s+zaútočila|\s+zaútočil|\s+napadla|\s+napadl)\s+([^.!?]+)[.!?]",
    r"(?:souboj|boj|střet|konfrontace)\s+s\s+{name}\s+([^.!?]+)[.!?]",
];

pub const CREATURE_WEAKNESS: &[&str] = &[
    r"(?:slabina|slabost|slabé\s+místo)\s+(?:příšery\s+)?{name}(?:\s+je|\s+byla)\s+([^.!?]+)[.!?]",
    r"{name}(?:\s+je|\s+byl|\s+byla)\s+(?:slabá|slabý|zranitelná|zranitelný)\s+(?:vůči|proti)\s+([^.!?]+)[.!?]",
];

pub const CREATURE_STRENGTH: &[&str] = &[
    r"(?:silná\s+stránka|síla|přednost)\s+(?:příšery\s+)?{name}(?:\s+je|\s+byla)\s+([^.!?]+)[.!?]",
    r"{name}(?:\s+je|\s+byl|\s+byla)\s+(?:silná|silný|odolná|odolný)\s+(?:vůči|proti)\s+([^.!?]+)[.!?]",
];

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

pub const ITEM_TYPE: &[(ItemType, &[&str])] = &[
    (
        ItemType::Weapon,
        &[
            r"(?:zbraň|meč|dýka|sekera|kladivo|palice|hůl|luk|kuše|šíp|kopí)\s+{name}",
            r"{name}(?:\s+je|\s+byl|\s+byla)\s+(?:zbraň|meč|dýka|sekera|kladivo|palice|hůl|luk|kuše|šíp|kopí)",
        ],
    ),
    (
        ItemType::Armor,
        &[
            r"(?:brnění|zbroj|přilba|helma|rukavice|boty|štít)\s+{name}",
            r"{name}(?:\s+je|\s+byl|\s+byla)\s+(?:brnění|zbroj|přilba|helma|rukavice|boty|štít)",
        ],
    ),
    (
        ItemType::Artifact,
        &[
            r"(?:artefakt|relikvie|posvátný\s+předmět)\s+{name}",
            r"{name}(?:\s+je|\s+byl|\s+byla)\s+(?:artefakt|relikvie|posvátný\s+předmět)",
        ],
    ),
    (
        ItemType::Potion,
        &[
            r"(?:lektvar|elixír|nápoj)\s+{name}",
            r"{name}(?:\s+je|\s+byl|\s+byla)\s+(?:lektvar|elixír|nápoj)",
        ],
    ),
    (
        ItemType::Scroll,
        &[
            r"(?:svitek|pergamen)\s+{name}",
            r"{name}(?:\s+je|\s+byl|\s+byla)\s+(?:svitek|pergamen)",
        ],
    ),
    (
        ItemType::Common,
        &[
            r"(?:předmět|věc|nástroj)\s+{name}",
            r"{name}(?:\s+je|\s+byl|\s+byla)\s+(?:předmět|věc|nástroj)",
        ],
    ),
    (
        ItemType::Key,
        &[
            r"(?:klíč|klíček)\s+{name}",
            r"{name}(?:\s+je|\s+byl|\s+byla)\s+(?:klíč|klíček)",
        ],
    ),
];

pub const ITEM_DESCRIPTION: &[&str] = &[
    r"{name}(?:\s+je|\s+byl|\s+byla|\s+vypadá|\s+má)\s+([^.!?]+)[.!?]",
    r"(?:popis|vzhled|charakteristika)\s+(?:předmětu\s+)?{name}\s*:\s*([^.!?]+)[.!?]",
];

pub const ITEM_OWNERSHIP: &[&str] = &[
    r"{name}(?:\s+patřil|\s+patřila|\s+patřilo|\s+náležel|\s+náležela|\s+náleželo)\s+([^.!?]+)[.!?]",
    r"(?:vlastník|majitel|držitel)\s+(?:předmětu\s+)?{name}(?:\s+je|\s+byl|\s+byla)\s+([^.!?]+)[.!?]",
    r"{name}(?:\s+byl|\s+byla|\s+bylo)\s+(?:získán|získána|získáno|nalezen|nalezena|nalezeno)\s+([^.!?]+)[.!?]",
];

pub const ITEM_ABILITIES: &[&str] = &[
    r"{name}(?:\s+má|\s+poskytuje|\s+dává|\s+umožňuje)\s+(?:schopnost|možnost|sílu)\s+([^.!?]+)[.!?]",
    r"(?:schopnost|moc|síla|vlastnost)\s+(?:předmětu\s+)?{name}(?:\s+je|\s+spočívá\s+v)\s+([^.!?]+)[.!?]",
    r"{name}(?:\s+může|\s+dokáže|\s+umí)\s+([^.!?]+)[.!?]",
];

// ---------------------------------------------------------------------------
// Template machinery
// ---------------------------------------------------------------------------

/// Compile a template against a concrete mention name. The name is escaped,
/// matching is case-insensitive with Unicode case folding.
pub fn compile(template: &str, name: &str) -> Option<Regex> {
    let pattern = template.replace("{name}", &regex::escape(name));
    Regex::new(&format!("(?i){pattern}")).ok()
}

/// First template with at least one match wins; all its first-group captures
/// are joined with a single space. Remaining templates are not tried.
pub fn first_template_all_captures(templates: &[&str], name: &str, text: &str) -> Option<String> {
    for template in templates {
        let Some(re) = compile(template, name) else {
            continue;
        };
        let captures: Vec<&str> = re
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim()))
            .collect();
        if !captures.is_empty() {
            return Some(captures.join(" "));
        }
    }
    None
}

/// First template that matches wins; only its first capture is taken.
pub fn first_template_capture(templates: &[&str], name: &str, text: &str) -> Option<String> {
    for template in templates {
        let Some(re) = compile(template, name) else {
            continue;
        };
        if let Some(caps) = re.captures(text) {
            if let Some(m) = caps.get(1) {
                return Some(m.as_str().trim().to_string());
            }
        }
    }
    None
}

/// Priority-ordered status resolution: the first entry whose any pattern
/// matches wins; `None` keeps the kind's default.
pub fn first_status<T: Copy>(table: &[(T, &[&str])], name: &str, text: &str) -> Option<T> {
    for (value, patterns) in table {
        for pattern in *patterns {
            if let Some(re) = compile(pattern, name) {
                if re.is_match(text) {
                    return Some(*value);
                }
            }
        }
    }
    None
}
