//! Fixed domain gazetteers.
//!
//! Four keyword vocabularies trigger mention recognition, one per narrative
//! kind. Matching is against the lowercased surface form or lemma of a token.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use chronicler_domain::EntityKind;

use crate::annotate::SpanLabel;

pub const LOCATION_WORDS: &[&str] = &[
    "hrad",
    "pevnost",
    "věž",
    "jeskyně",
    "dungeon",
    "les",
    "hora",
    "město",
    "vesnice",
    "chrám",
    "svatyně",
    "ruiny",
    "zřícenina",
    "hostinec",
    "taverna",
    "krčma",
    "palác",
    "tvrz",
    "ostrov",
    "údolí",
    "poušť",
    "bažina",
    "močál",
    "řeka",
    "jezero",
    "moře",
    "oceán",
    "propast",
    "rokle",
    "průsmyk",
    "podzemí",
    "kobka",
    "žalář",
    "vězení",
];

pub const CHARACTER_WORDS: &[&str] = &[
    "král",
    "královna",
    "princ",
    "princezna",
    "rytíř",
    "čaroděj",
    "čarodějka",
    "kouzelník",
    "kouzelnice",
    "mág",
    "čarodějnice",
    "alchymista",
    "obchodník",
    "hostinský",
    "kovář",
    "zbrojíř",
    "lovec",
    "hraničář",
    "druid",
    "bard",
    "zloděj",
    "vrah",
    "vůdce",
    "náčelník",
    "šaman",
    "kněz",
    "kněžka",
    "mnich",
    "válečník",
    "bojovník",
    "paladin",
    "šlechtic",
    "šlechtična",
    "lord",
    "lady",
    "baron",
    "baronka",
    "hrabě",
    "hraběnka",
    "vévoda",
    "vévodkyně",
];

pub const CREATURE_WORDS: &[&str] = &[
    "drak",
    "goblin",
    "skřet",
    "ork",
    "troll",
    "obr",
    "démon",
    "nemrtvý",
    "zombie",
    "kostlivec",
    "upír",
    "vlkodlak",
    "medvěd",
    "vlk",
    "krysa",
    "netopýr",
    "pavouk",
    "had",
    "bazilišek",
    "gryf",
    "hydra",
    "chiméra",
    "mantikora",
    "minotaur",
    "kyklop",
    "harpyje",
    "gorgona",
    "golem",
    "elementál",
    "duch",
    "přízrak",
    "stín",
    "lich",
    "bludička",
    "sukuba",
    "inkubus",
];

pub const ITEM_WORDS: &[&str] = &[
    "meč",
    "dýka",
    "sekera",
    "kladivo",
    "palice",
    "hůl",
    "luk",
    "kuše",
    "šíp",
    "kopí",
    "štít",
    "brnění",
    "přilba",
    "rukavice",
    "boty",
    "plášť",
    "amulet",
    "prsten",
    "náhrdelník",
    "náramek",
    "lektvar",
    "svitek",
    "kniha",
    "grimoár",
    "mapa",
    "klíč",
    "truhla",
    "poklad",
    "zlato",
    "stříbro",
    "drahokam",
    "rubín",
    "safír",
    "diamant",
    "smaragd",
    "artefakt",
];

/// The gazetteers in scan precedence order, with the span label each emits.
pub const GAZETTEERS: &[(EntityKind, SpanLabel, &[&str])] = &[
    (EntityKind::Location, SpanLabel::Location, LOCATION_WORDS),
    (EntityKind::Character, SpanLabel::Person, CHARACTER_WORDS),
    (EntityKind::Creature, SpanLabel::Monster, CREATURE_WORDS),
    (EntityKind::Item, SpanLabel::Item, ITEM_WORDS),
];

/// [`GAZETTEERS`] with each vocabulary indexed for membership tests, built
/// once per process.
pub static GAZETTEER_INDEX: Lazy<Vec<(EntityKind, SpanLabel, HashSet<&'static str>)>> =
    Lazy::new(|| {
        GAZETTEERS
            .iter()
            .map(|(kind, label, words)| (*kind, *label, words.iter().copied().collect()))
            .collect()
    });
