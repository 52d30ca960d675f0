//! Closed tag vocabularies with their trigger keywords, per entity kind.
//!
//! Process-wide read-only data. A tag outside these tables is never assigned.

use chronicler_domain::EntityKind;

pub type TagKeywords = (&'static str, &'static [&'static str]);

pub const CHARACTER_TAGS: &[TagKeywords] = &[
    (
        "Spojenec",
        &[
            "spojenec", "přítel", "pomocník", "ochránce", "zachránce", "mentor", "učitel", "rádce",
        ],
    ),
    (
        "Nepřítel",
        &[
            "nepřítel", "protivník", "záporák", "padouch", "zrádce", "vrah", "zločinec", "bandita",
            "lupič",
        ],
    ),
    (
        "Obchodník",
        &[
            "obchodník", "prodavač", "kupec", "kramář", "handlíř", "překupník", "hokynář",
            "trhovník",
        ],
    ),
    (
        "Zadavatel questů",
        &["zadavatel", "quest", "úkol", "mise", "zakázka", "žádost", "prosba"],
    ),
    (
        "Důležitý",
        &[
            "důležitý", "klíčový", "významný", "mocný", "vlivný", "vůdce", "vládce", "král",
            "královna", "náčelník",
        ],
    ),
];

pub const LOCATION_TAGS: &[TagKeywords] = &[
    (
        "Obydlené",
        &[
            "obydlené", "osídlené", "obývané", "lidé", "obyvatelé", "vesničané", "měšťané",
            "občané",
        ],
    ),
    (
        "Nebezpečné",
        &[
            "nebezpečné", "nebezpečí", "hrozba", "riziko", "smrtící", "zákeřné", "zrádné",
            "děsivé", "strašidelné",
        ],
    ),
    (
        "Prozkoumané",
        &["prozkoumané", "známé", "zmapované", "objevené", "navštívené"],
    ),
    (
        "Neprozkoumané",
        &[
            "neprozkoumané", "neznámé", "nezmapované", "neobjevené", "tajemné", "záhadné",
        ],
    ),
    (
        "Důležité",
        &[
            "důležité", "klíčové", "významné", "strategické", "mocné", "vlivné", "hlavní",
            "centrální",
        ],
    ),
];

pub const CREATURE_TAGS: &[TagKeywords] = &[
    (
        "Boss",
        &[
            "boss", "vůdce", "náčelník", "král", "královna", "pán", "paní", "vládce", "vládkyně",
            "mocný", "mocná", "silný", "silná",
        ],
    ),
    (
        "Běžná",
        &[
            "běžná", "obyčejná", "normální", "slabá", "malá", "mladá", "nedospělá",
        ],
    ),
    (
        "Unikátní",
        &[
            "unikátní", "jedinečná", "vzácná", "legendární", "mytická", "bájná", "pověstná",
        ],
    ),
    (
        "Inteligentní",
        &[
            "inteligentní", "chytrá", "moudrá", "lstivá", "vychytralá", "mazaná", "důvtipná",
            "mluvící",
        ],
    ),
    (
        "Nemrtvá",
        &[
            "nemrtvá", "neživá", "oživlá", "zombie", "kostlivec", "duch", "přízrak", "stín",
            "upír", "lich",
        ],
    ),
];

pub const ITEM_TAGS: &[TagKeywords] = &[
    (
        "Běžný",
        &[
            "běžný", "obyčejný", "normální", "všední", "každodenní", "prostý",
        ],
    ),
    (
        "Vzácný",
        &[
            "vzácný", "neobvyklý", "nezvyklý", "výjimečný", "cenný", "drahý",
        ],
    ),
    (
        "Epický",
        &[
            "epický", "mocný", "silný", "výkonný", "působivý", "úžasný",
        ],
    ),
    (
        "Legendární",
        &[
            "legendární", "bájný", "mytický", "pověstný", "slavný", "proslulý",
        ],
    ),
    (
        "Prokletý",
        &[
            "prokletý", "zlořečený", "zatracený", "temný", "zlý", "nebezpečný", "zákeřný",
        ],
    ),
    (
        "Questový",
        &[
            "questový", "úkolový", "misijní", "klíčový", "důležitý", "nezbytný",
        ],
    ),
];

pub const QUEST_TAGS: &[TagKeywords] = &[
    (
        "Hlavní",
        &[
            "hlavní", "primární", "klíčový", "důležitý", "zásadní", "nezbytný", "příběhový",
        ],
    ),
    (
        "Vedlejší",
        &[
            "vedlejší", "sekundární", "volitelný", "doplňkový", "postranní", "nepodstatný",
        ],
    ),
    (
        "Frakční",
        &[
            "frakční", "frakce", "organizace", "skupina", "cech", "gilda", "řád", "klan",
        ],
    ),
    (
        "Časově omezený",
        &[
            "časově omezený", "časový limit", "termín", "deadline", "spěch", "rychle", "brzy",
        ],
    ),
    (
        "Průzkumný",
        &[
            "průzkumný", "průzkum", "objevování", "hledání", "pátrání", "zkoumání", "mapování",
        ],
    ),
];

pub const FACTION_TAGS: &[TagKeywords] = &[
    (
        "Přátelská",
        &[
            "přátelská", "spojenecká", "spřátelená", "mírumilovná", "nápomocná", "podporující",
        ],
    ),
    (
        "Nepřátelská",
        &[
            "nepřátelská", "protivnická", "nepřátelství", "válčící", "agresivní", "útočná",
        ],
    ),
    (
        "Neutrální",
        &[
            "neutrální", "nestranná", "nezaujatá", "nezúčastněná", "nezapojená",
        ],
    ),
    (
        "Obchodní",
        &[
            "obchodní", "kupecká", "tržní", "ekonomická", "finanční", "výdělečná",
        ],
    ),
    (
        "Vojenská",
        &[
            "vojenská", "bojová", "válečná", "armádní", "bitevní", "útočná", "obranná",
        ],
    ),
    (
        "Náboženská",
        &[
            "náboženská", "církevní", "kultovní", "duchovní", "svatá", "posvátná", "božská",
        ],
    ),
];

pub const EVENT_TAGS: &[TagKeywords] = &[
    (
        "Souboj",
        &[
            "souboj", "boj", "bitva", "střet", "konflikt", "válka", "útok", "obrana",
        ],
    ),
    (
        "Dialog",
        &[
            "dialog", "rozhovor", "konverzace", "diskuze", "debata", "hovor", "povídání",
        ],
    ),
    (
        "Objev",
        &[
            "objev", "nález", "objevení", "nalezení", "odhalení", "zjištění", "poznání",
        ],
    ),
    (
        "Quest",
        &["quest", "úkol", "mise", "zakázka", "žádost", "prosba", "zadání"],
    ),
    (
        "Důležitá",
        &[
            "důležitá", "klíčová", "významná", "zásadní", "přelomová", "rozhodující",
        ],
    ),
    (
        "Vedlejší",
        &[
            "vedlejší", "nepodstatná", "okrajová", "doplňková", "méně důležitá",
        ],
    ),
];

/// Tag vocabulary for a kind; empty for kinds that are never tagged from
/// prose (journal entries).
pub fn vocabulary(kind: EntityKind) -> &'static [TagKeywords] {
    match kind {
        EntityKind::Character => CHARACTER_TAGS,
        EntityKind::Location => LOCATION_TAGS,
        EntityKind::Creature => CREATURE_TAGS,
        EntityKind::Item => ITEM_TAGS,
        EntityKind::Quest => QUEST_TAGS,
        EntityKind::Faction => FACTION_TAGS,
        EntityKind::Event => EVENT_TAGS,
        EntityKind::JournalEntry => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tagged_kind_has_a_nonempty_vocabulary() {
        for kind in EntityKind::ALL {
            let vocab = vocabulary(kind);
            if kind == EntityKind::JournalEntry {
                assert!(vocab.is_empty());
            } else {
                assert!(!vocab.is_empty(), "{kind} has no vocabulary");
                for (tag, keywords) in vocab {
                    assert!(!tag.is_empty());
                    assert!(!keywords.is_empty(), "tag {tag} has no keywords");
                }
            }
        }
    }

    #[test]
    fn tags_within_a_vocabulary_are_unique() {
        for kind in EntityKind::ALL {
            let mut seen = std::collections::BTreeSet::new();
            for (tag, _) in vocabulary(kind) {
                assert!(seen.insert(*tag), "duplicate tag {tag} for {kind}");
            }
        }
    }
}
