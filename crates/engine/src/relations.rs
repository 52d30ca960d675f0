//! Sentence-level relation and state-change detection.
//!
//! Works on the dependency parse: a relation needs a verb from a fixed lemma
//! set, a nominal subject and an object, and both arguments must fall inside
//! recognized mention spans of the same sentence.

use std::collections::BTreeMap;

use tracing::debug;

use chronicler_domain::EntityKind;
use chronicler_nlp::annotate::{DepRel, Document, Pos, Sentence};
use chronicler_nlp::recognizer::Mention;

/// Verb lemmas that can carry a relation between two mentions.
pub const RELATION_VERBS: &[&str] = &[
    "znát",
    "přátelit",
    "milovat",
    "nenávidět",
    "spolupracovat",
    "bojovat",
    "mluvit",
    "setkat",
    "pomáhat",
    "útočit",
    "bránit",
    "dát",
    "vzít",
    "žít",
    "bydlet",
];

/// What a state-change verb does to the tracked status field. Verbs without a
/// tracked effect still produce a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEffect {
    Dead,
    Injured,
    Healthy,
}

/// Verb lemma to status effect. `None` means the change is narrated into
/// history only.
pub const STATE_CHANGE_VERBS: &[(&str, Option<StatusEffect>)] = &[
    ("zemřít", Some(StatusEffect::Dead)),
    ("zabít", Some(StatusEffect::Dead)),
    ("zranit", Some(StatusEffect::Injured)),
    ("uzdravit", Some(StatusEffect::Healthy)),
    ("vyléčit", Some(StatusEffect::Healthy)),
    // Reflexive lemma as the annotation backend emits it.
    ("stát se", None),
    ("onemocnět", None),
    ("unavit", None),
    ("odpočinout", None),
    ("změnit", None),
    ("přesunout", None),
    ("odejít", None),
    ("přijít", None),
    ("získat", None),
    ("ztratit", None),
    ("najít", None),
    ("objevit", None),
];

/// A subject–predicate–object relation between two recognized mentions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub subject_kind: EntityKind,
    pub subject: String,
    /// Verb lemma.
    pub predicate: String,
    pub object_kind: EntityKind,
    pub object: String,
    pub sentence: String,
}

/// A narrated change of an entity's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// Verb lemma that triggered the detection.
    pub verb: String,
    pub effect: Option<StatusEffect>,
    pub sentence: String,
}

/// Relations between recognized mentions, sentence by sentence. A sentence
/// contributes only when it holds at least two mentions; arguments outside
/// any mention are skipped silently.
pub fn extract_relations(
    doc: &Document,
    mentions: &BTreeMap<EntityKind, Vec<Mention>>,
) -> Vec<Relation> {
    let flat: Vec<(EntityKind, &Mention)> = mentions
        .iter()
        .flat_map(|(kind, list)| list.iter().map(move |mention| (*kind, mention)))
        .collect();

    let mut relations = Vec::new();
    for sentence in doc.sentences() {
        let in_sentence: Vec<&(EntityKind, &Mention)> = flat
            .iter()
            .filter(|(_, m)| {
                m.start_token >= sentence.start_token && m.end_token <= sentence.end_token
            })
            .collect();
        if in_sentence.len() < 2 {
            continue;
        }

        for verb_index in sentence.start_token..sentence.end_token {
            let verb = &doc.tokens()[verb_index];
            if verb.pos != Pos::Verb || !RELATION_VERBS.contains(&verb.lemma.as_str()) {
                continue;
            }

            let mut subject: Option<(EntityKind, &Mention)> = None;
            let mut object: Option<(EntityKind, &Mention)> = None;
            for (child_index, dep, _) in children(doc, sentence, verb_index) {
                let Some(covering) = in_sentence
                    .iter()
                    .find(|(_, m)| m.start_token <= child_index && child_index < m.end_token)
                else {
                    continue;
                };
                match dep {
                    DepRel::NominalSubject if subject.is_none() => subject = Some(**covering),
                    rel if rel.is_object() && object.is_none() => object = Some(**covering),
                    _ => {}
                }
            }

            if let (Some((subject_kind, subject)), Some((object_kind, object))) = (subject, object)
            {
                if subject.text == object.text && subject_kind == object_kind {
                    continue;
                }
                debug!(
                    subject = %subject.text,
                    predicate = %verb.lemma,
                    object = %object.text,
                    "extracted relation"
                );
                relations.push(Relation {
                    subject_kind,
                    subject: subject.text.clone(),
                    predicate: verb.lemma.clone(),
                    object_kind,
                    object: object.text.clone(),
                    sentence: doc.sentence_text(sentence).to_string(),
                });
            }
        }
    }
    relations
}

/// Narrated state changes of the entity named `name`: sentences mentioning it
/// where it is the grammatical subject or direct object of a state-change
/// verb.
pub fn extract_state_changes(doc: &Document, name: &str) -> Vec<StateChange> {
    let needle = name.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut changes = Vec::new();
    for sentence in doc.sentences() {
        if !doc.sentence_text(sentence).to_lowercase().contains(&needle) {
            continue;
        }
        for verb_index in sentence.start_token..sentence.end_token {
            let verb = &doc.tokens()[verb_index];
            if verb.pos != Pos::Verb {
                continue;
            }
            let Some((_, effect)) = STATE_CHANGE_VERBS
                .iter()
                .find(|(lemma, _)| *lemma == verb.lemma)
            else {
                continue;
            };

            let involved = children(doc, sentence, verb_index).any(|(_, dep, text)| {
                matches!(dep, DepRel::NominalSubject | DepRel::DirectObject)
                    && text.to_lowercase().contains(&needle)
            });
            if involved {
                changes.push(StateChange {
                    verb: verb.lemma.clone(),
                    effect: *effect,
                    sentence: doc.sentence_text(sentence).to_string(),
                });
            }
        }
    }
    changes
}

/// Dependents of `head_index` within one sentence, as (index, relation, text).
fn children<'a>(
    doc: &'a Document,
    sentence: &Sentence,
    head_index: usize,
) -> impl Iterator<Item = (usize, DepRel, &'a str)> {
    let tokens = doc.tokens();
    (sentence.start_token..sentence.end_token).filter_map(move |index| {
        let token = &tokens[index];
        (index != head_index && token.head == head_index)
            .then_some((index, token.dep, token.text.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use chronicler_nlp::annotate::SpanLabel;

    fn mention(text: &str, start_token: usize, end_token: usize, label: SpanLabel) -> Mention {
        Mention {
            text: text.to_string(),
            start: 0,
            end: 0,
            label,
            start_token,
            end_token,
        }
    }

    fn knows_doc() -> Document {
        // "Gandalf zná Bilba."
        let mut b = Document::builder();
        b.token("Gandalf", "Gandalf", Pos::ProperNoun, DepRel::NominalSubject, 1)
            .token("zná", "znát", Pos::Verb, DepRel::Other, 1)
            .token("Bilba", "Bilbo", Pos::ProperNoun, DepRel::DirectObject, 1)
            .token(".", ".", Pos::Other, DepRel::Other, 1)
            .end_sentence();
        b.finish()
    }

    #[test]
    fn subject_verb_object_yields_a_relation() {
        let doc = knows_doc();
        let mut mentions: BTreeMap<EntityKind, Vec<Mention>> = BTreeMap::new();
        mentions.insert(
            EntityKind::Character,
            vec![
                mention("Gandalf", 0, 1, SpanLabel::Person),
                mention("Bilba", 2, 3, SpanLabel::Person),
            ],
        );

        let relations = extract_relations(&doc, &mentions);
        assert_eq!(relations.len(), 1);
        let relation = &relations[0];
        assert_eq!(relation.subject, "Gandalf");
        assert_eq!(relation.predicate, "znát");
        assert_eq!(relation.object, "Bilba");
        assert_eq!(relation.sentence, "Gandalf zná Bilba.");
    }

    #[test]
    fn a_sentence_with_one_mention_yields_nothing() {
        let doc = knows_doc();
        let mut mentions: BTreeMap<EntityKind, Vec<Mention>> = BTreeMap::new();
        mentions.insert(
            EntityKind::Character,
            vec![mention("Gandalf", 0, 1, SpanLabel::Person)],
        );
        assert!(extract_relations(&doc, &mentions).is_empty());
    }

    #[test]
    fn argument_outside_any_mention_is_skipped() {
        let doc = knows_doc();
        let mut mentions: BTreeMap<EntityKind, Vec<Mention>> = BTreeMap::new();
        // Two mentions in the sentence, but neither covers the subject token.
        mentions.insert(
            EntityKind::Character,
            vec![
                mention("Bilba", 2, 3, SpanLabel::Person),
                mention(".", 3, 4, SpanLabel::Person),
            ],
        );
        assert!(extract_relations(&doc, &mentions).is_empty());
    }

    #[test]
    fn killed_as_object_maps_to_dead() {
        // "Drak byl zabit."
        let mut b = Document::builder();
        b.token("Drak", "drak", Pos::Noun, DepRel::NominalSubject, 2)
            .token("byl", "být", Pos::Verb, DepRel::Other, 2)
            .token("zabit", "zabít", Pos::Verb, DepRel::Other, 2)
            .token(".", ".", Pos::Other, DepRel::Other, 2)
            .end_sentence();
        let doc = b.finish();

        let changes = extract_state_changes(&doc, "Drak");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].verb, "zabít");
        assert_eq!(changes[0].effect, Some(StatusEffect::Dead));
        assert_eq!(changes[0].sentence, "Drak byl zabit.");
    }

    #[test]
    fn inflected_mention_still_counts_as_the_argument() {
        // "Rytíř zranil draka."
        let mut b = Document::builder();
        b.token("Rytíř", "rytíř", Pos::Noun, DepRel::NominalSubject, 1)
            .token("zranil", "zranit", Pos::Verb, DepRel::Other, 1)
            .token("draka", "drak", Pos::Noun, DepRel::DirectObject, 1)
            .token(".", ".", Pos::Other, DepRel::Other, 1)
            .end_sentence();
        let doc = b.finish();

        let changes = extract_state_changes(&doc, "drak");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].effect, Some(StatusEffect::Injured));
    }

    #[test]
    fn becoming_something_is_narrated_into_history_only() {
        // "Gandalf se stal králem."
        let mut b = Document::builder();
        b.token("Gandalf", "Gandalf", Pos::ProperNoun, DepRel::NominalSubject, 2)
            .token("se", "se", Pos::Other, DepRel::Other, 2)
            .token("stal", "stát se", Pos::Verb, DepRel::Other, 2)
            .token("králem", "král", Pos::Noun, DepRel::Other, 2)
            .token(".", ".", Pos::Other, DepRel::Other, 2)
            .end_sentence();
        let doc = b.finish();

        let changes = extract_state_changes(&doc, "Gandalf");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].verb, "stát se");
        assert_eq!(changes[0].effect, None);
    }

    #[test]
    fn verbs_outside_the_table_change_nothing() {
        let mut b = Document::builder();
        b.token("Drak", "drak", Pos::Noun, DepRel::NominalSubject, 1)
            .token("spal", "spát", Pos::Verb, DepRel::Other, 1)
            .token(".", ".", Pos::Other, DepRel::Other, 1)
            .end_sentence();
        let doc = b.finish();
        assert!(extract_state_changes(&doc, "Drak").is_empty());
    }
}
