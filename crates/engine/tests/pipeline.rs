//! Full pipeline runs against the in-memory store with scripted annotation
//! fixtures.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{TimeZone, Utc};

use chronicler_domain::{CharacterData, CharacterStatus, CreatureStatus, Entity, EntityData, EntityKind};
use chronicler_engine::{EntityStore, FixedClock, InMemoryStore, Pipeline};
use chronicler_nlp::annotate::{AnnotateError, Annotator, DepRel, Document, Pos, SpanLabel};

/// Annotation backend fixture: hands out pre-built documents keyed by the
/// exact submitted text.
struct ScriptedAnnotator {
    docs: HashMap<String, Document>,
}

impl ScriptedAnnotator {
    fn new(docs: Vec<(&str, Document)>) -> Self {
        Self {
            docs: docs
                .into_iter()
                .map(|(text, doc)| (text.to_string(), doc))
                .collect(),
        }
    }
}

impl Annotator for ScriptedAnnotator {
    fn annotate(&self, text: &str) -> Result<Document, AnnotateError> {
        self.docs
            .get(text)
            .cloned()
            .ok_or_else(|| AnnotateError::Backend(format!("no analysis scripted for: {text}")))
    }
}

fn character(name: &str) -> Entity {
    Entity::new(name, EntityData::empty(EntityKind::Character))
}

#[tokio::test]
async fn gandalf_gains_role_and_moves_to_roklinka() {
    // "Gandalf je mocný čaroděj a žije v Roklinka."
    let mut b = Document::builder();
    b.token("Gandalf", "Gandalf", Pos::ProperNoun, DepRel::NominalSubject, 5)
        .token("je", "být", Pos::Verb, DepRel::Other, 1)
        .token("mocný", "mocný", Pos::Adjective, DepRel::Other, 3)
        .token("čaroděj", "čaroděj", Pos::Noun, DepRel::Other, 1)
        .token("a", "a", Pos::Other, DepRel::Other, 5)
        .token("žije", "žít", Pos::Verb, DepRel::Other, 5)
        .token("v", "v", Pos::Other, DepRel::Other, 5)
        .token(
            "Roklinka",
            "Roklinka",
            Pos::ProperNoun,
            DepRel::PrepositionalObject,
            5,
        )
        .token(".", ".", Pos::Other, DepRel::Other, 5)
        .end_sentence();
    b.span(SpanLabel::Person, 0, 1);
    b.span(SpanLabel::Location, 7, 8);
    let doc = b.finish();
    let text = doc.text().to_string();

    let store = Arc::new(InMemoryStore::new());
    let roklinka = store
        .create(Entity::new(
            "Roklinka",
            EntityData::empty(EntityKind::Location),
        ))
        .await
        .unwrap();

    let annotator = Arc::new(ScriptedAnnotator::new(vec![(text.as_str(), doc)]));
    let pipeline = Pipeline::new(store.clone(), annotator);
    let report = pipeline.process(&text).await.unwrap();

    let gandalf = report.entities[&EntityKind::Character]
        .iter()
        .find(|e| e.name == "Gandalf")
        .expect("Gandalf recognized and persisted");
    let EntityData::Character(data) = &gandalf.data else {
        panic!("wrong payload kind");
    };
    assert!(data.role.contains("mocný čaroděj"), "role: {:?}", data.role);
    assert_eq!(data.location_id, roklinka.id);
    assert!(gandalf.tags.contains("Důležitý"));

    assert_eq!(report.relations.len(), 1);
    assert_eq!(report.relations[0].subject, "Gandalf");
    assert_eq!(report.relations[0].predicate, "žít");
    assert_eq!(report.relations[0].object, "Roklinka");

    let roklinka_now = store
        .find_by_name(EntityKind::Location, "Roklinka")
        .await
        .unwrap()
        .unwrap();
    let EntityData::Location(loc) = &roklinka_now.data else {
        panic!("wrong payload kind");
    };
    assert_eq!(loc.occupant_ids, vec![gandalf.id.unwrap()]);
}

#[tokio::test]
async fn killing_the_dragon_updates_status_and_combat_history() {
    // "Drak byl zabit."
    let mut b = Document::builder();
    b.token("Drak", "drak", Pos::Noun, DepRel::NominalSubject, 2)
        .token("byl", "být", Pos::Verb, DepRel::Other, 2)
        .token("zabit", "zabít", Pos::Verb, DepRel::Other, 2)
        .token(".", ".", Pos::Other, DepRel::Other, 2)
        .end_sentence();
    let doc = b.finish();
    let text = doc.text().to_string();

    let store = Arc::new(InMemoryStore::new());
    store
        .create(Entity::new("Drak", EntityData::empty(EntityKind::Creature)))
        .await
        .unwrap();

    let annotator = Arc::new(ScriptedAnnotator::new(vec![(text.as_str(), doc)]));
    let pipeline = Pipeline::new(store.clone(), annotator);
    pipeline.process(&text).await.unwrap();

    let drak = store
        .find_by_name(EntityKind::Creature, "Drak")
        .await
        .unwrap()
        .unwrap();
    let EntityData::Creature(data) = &drak.data else {
        panic!("wrong payload kind");
    };
    assert_eq!(data.status, CreatureStatus::Dead);
    assert!(
        data.combat_history.contains("[Změna stavu] Drak byl zabit."),
        "combat history: {:?}",
        data.combat_history
    );
}

#[tokio::test]
async fn existing_description_is_never_overwritten() {
    // "Bilbo je unavený."
    let mut b = Document::builder();
    b.word("Bilbo", "Bilbo", Pos::ProperNoun)
        .word("je", "být", Pos::Verb)
        .word("unavený", "unavený", Pos::Adjective)
        .word(".", ".", Pos::Other)
        .end_sentence();
    b.span(SpanLabel::Person, 0, 1);
    let doc = b.finish();
    let text = doc.text().to_string();

    let store = Arc::new(InMemoryStore::new());
    let mut bilbo = character("Bilbo");
    bilbo.data = EntityData::Character(CharacterData {
        description: "hobit z Kraje".to_string(),
        ..CharacterData::default()
    });
    store.create(bilbo).await.unwrap();

    let annotator = Arc::new(ScriptedAnnotator::new(vec![(text.as_str(), doc)]));
    let pipeline = Pipeline::new(store.clone(), annotator);
    pipeline.process(&text).await.unwrap();

    let bilbo = store
        .find_by_name(EntityKind::Character, "Bilbo")
        .await
        .unwrap()
        .unwrap();
    let EntityData::Character(data) = &bilbo.data else {
        panic!("wrong payload kind");
    };
    assert_eq!(data.description, "hobit z Kraje");
    assert_eq!(data.status, CharacterStatus::Alive);
}

#[tokio::test]
async fn history_entries_are_timestamp_prefixed_and_append_only() {
    // "Gandalf kdysi porazil balroga."
    let mut b = Document::builder();
    b.word("Gandalf", "Gandalf", Pos::ProperNoun)
        .word("kdysi", "kdysi", Pos::Other)
        .word("porazil", "porazit", Pos::Verb)
        .word("balroga", "balrog", Pos::Noun)
        .word(".", ".", Pos::Other)
        .end_sentence();
    b.span(SpanLabel::Person, 0, 1);
    let doc = b.finish();
    let text = doc.text().to_string();

    let store = Arc::new(InMemoryStore::new());
    store.create(character("Gandalf")).await.unwrap();

    let instant = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let annotator = Arc::new(ScriptedAnnotator::new(vec![(text.as_str(), doc)]));
    let pipeline =
        Pipeline::new(store.clone(), annotator).with_clock(Arc::new(FixedClock(instant)));

    pipeline.process(&text).await.unwrap();
    let gandalf = store
        .find_by_name(EntityKind::Character, "Gandalf")
        .await
        .unwrap()
        .unwrap();
    let EntityData::Character(data) = &gandalf.data else {
        panic!("wrong payload kind");
    };
    assert_eq!(data.history, "[2024-05-01 12:00] porazil balroga");

    pipeline.process(&text).await.unwrap();
    let gandalf = store
        .find_by_name(EntityKind::Character, "Gandalf")
        .await
        .unwrap()
        .unwrap();
    let EntityData::Character(data) = &gandalf.data else {
        panic!("wrong payload kind");
    };
    assert_eq!(
        data.history,
        "[2024-05-01 12:00] porazil balroga\n\n[2024-05-01 12:00] porazil balroga"
    );
}

#[tokio::test]
async fn relation_with_an_unpersisted_side_is_skipped() {
    // "Gandalf zná Bratrstvo." - the faction is recognized but factions are
    // not persisted from prose, so the relation cannot resolve.
    let mut b = Document::builder();
    b.token("Gandalf", "Gandalf", Pos::ProperNoun, DepRel::NominalSubject, 1)
        .token("zná", "znát", Pos::Verb, DepRel::Other, 1)
        .token(
            "Bratrstvo",
            "bratrstvo",
            Pos::ProperNoun,
            DepRel::DirectObject,
            1,
        )
        .token(".", ".", Pos::Other, DepRel::Other, 1)
        .end_sentence();
    b.span(SpanLabel::Person, 0, 1);
    b.span(SpanLabel::Organization, 2, 3);
    let doc = b.finish();
    let text = doc.text().to_string();

    let store = Arc::new(InMemoryStore::new());
    let annotator = Arc::new(ScriptedAnnotator::new(vec![(text.as_str(), doc)]));
    let pipeline = Pipeline::new(store.clone(), annotator);

    let report = pipeline.process(&text).await.unwrap();
    assert!(report.relations.is_empty());
    assert!(store
        .find_by_name(EntityKind::Faction, "Bratrstvo")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn reprocessing_the_same_text_leaves_tags_stable() {
    // "Gandalf je mocný vůdce."
    let mut b = Document::builder();
    b.word("Gandalf", "Gandalf", Pos::ProperNoun)
        .word("je", "být", Pos::Verb)
        .word("mocný", "mocný", Pos::Adjective)
        .word("vůdce", "vůdce", Pos::Noun)
        .word(".", ".", Pos::Other)
        .end_sentence();
    b.span(SpanLabel::Person, 0, 1);
    let doc = b.finish();
    let text = doc.text().to_string();

    let store = Arc::new(InMemoryStore::new());
    let annotator = Arc::new(ScriptedAnnotator::new(vec![(text.as_str(), doc)]));
    let pipeline = Pipeline::new(store.clone(), annotator);

    pipeline.process(&text).await.unwrap();
    let first = store
        .find_by_name(EntityKind::Character, "Gandalf")
        .await
        .unwrap()
        .unwrap();
    assert!(first.tags.contains("Důležitý"));

    pipeline.process(&text).await.unwrap();
    let second = store
        .find_by_name(EntityKind::Character, "Gandalf")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.tags, second.tags);
}

#[tokio::test]
async fn find_similar_resolves_case_and_whitespace_variants() {
    let store = Arc::new(InMemoryStore::new());
    store.create(character("Bilbo")).await.unwrap();
    store.create(character("Gandalf")).await.unwrap();

    let annotator = Arc::new(ScriptedAnnotator::new(Vec::new()));
    let pipeline = Pipeline::new(store, annotator);

    let matches = pipeline
        .find_similar(EntityKind::Character, "bilbo ")
        .await
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].0.name, "Bilbo");
    assert_eq!(matches[0].1, 1.0);
}
