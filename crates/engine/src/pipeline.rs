//! The text-processing run, end to end.
//!
//! One `process` call drives: annotate → recognize mentions → per mention
//! exact-name lookup and create-or-update → relation extraction and the
//! relation effect table. Store calls are awaited sequentially; a collaborator
//! failure aborts the rest of the run and earlier mutations stand.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use chronicler_domain::{
    append_history, fill_scalar, push_unique, CharacterStatus, CreatureStatus, Entity, EntityData,
    EntityKind, ItemType, LocationStatus, LocationType,
};
use chronicler_nlp::annotate::{Annotator, Document};
use chronicler_nlp::{AttributeExtractor, Categorizer, EntityMatcher, MentionRecognizer};

use crate::error::PipelineError;
use crate::ports::{ClockPort, EntityStore, StoreError, SystemClock};
use crate::relations::{extract_relations, extract_state_changes, Relation, StatusEffect};
use crate::settings::PipelineSettings;

/// Everything one run produced: the final state of every touched entity,
/// grouped by kind, plus the relations whose effects were applied.
#[derive(Debug, Clone, Default)]
pub struct ProcessReport {
    pub entities: BTreeMap<EntityKind, Vec<Entity>>,
    pub relations: Vec<Relation>,
}

pub struct Pipeline {
    store: Arc<dyn EntityStore>,
    annotator: Arc<dyn Annotator>,
    clock: Arc<dyn ClockPort>,
    recognizer: MentionRecognizer,
    extractor: AttributeExtractor,
    categorizer: Categorizer,
    matcher: EntityMatcher,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(store: Arc<dyn EntityStore>, annotator: Arc<dyn Annotator>) -> Self {
        Self::with_settings(store, annotator, PipelineSettings::default())
    }

    pub fn with_settings(
        store: Arc<dyn EntityStore>,
        annotator: Arc<dyn Annotator>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            store,
            annotator,
            clock: Arc::new(SystemClock),
            recognizer: MentionRecognizer::new(),
            extractor: AttributeExtractor::new(),
            categorizer: Categorizer::new(),
            matcher: EntityMatcher::new(settings.match_threshold),
            settings,
        }
    }

    /// Replace the wall clock; history entries become deterministic in tests.
    pub fn with_clock(mut self, clock: Arc<dyn ClockPort>) -> Self {
        self.clock = clock;
        self
    }

    /// Process one text submission.
    pub async fn process(&self, text: &str) -> Result<ProcessReport, PipelineError> {
        let doc = self.annotator.annotate(text)?;
        let mentions = self.recognizer.recognize(&doc);

        let mut entities: BTreeMap<EntityKind, Vec<Entity>> = BTreeMap::new();
        for kind in EntityKind::NARRATIVE {
            let Some(list) = mentions.get(&kind) else {
                continue;
            };
            for mention in list {
                let name = mention.text.as_str();
                let persisted = match self.store.find_by_name(kind, name).await? {
                    Some(existing) => {
                        debug!(%name, %kind, "updating existing entity");
                        let Some(id) = existing.id else {
                            return Err(StoreError::constraint(format!(
                                "stored entity {name} has no id"
                            ))
                            .into());
                        };
                        let refreshed = self.refresh(existing, &doc, name);
                        self.store.update(id, refreshed).await?
                    }
                    None => {
                        debug!(%name, %kind, "creating new entity");
                        self.store.create(self.compose(kind, &doc, name)).await?
                    }
                };
                entities.entry(kind).or_default().push(persisted);
            }
        }

        let mut applied = Vec::new();
        for relation in extract_relations(&doc, &mentions) {
            let subject = self
                .store
                .find_by_name(relation.subject_kind, &relation.subject)
                .await?;
            let object = self
                .store
                .find_by_name(relation.object_kind, &relation.object)
                .await?;
            // Unresolved sides skip the relation silently.
            let (Some(subject), Some(object)) = (subject, object) else {
                continue;
            };
            if self.apply_relation(subject, object).await? {
                applied.push(relation);
            }
        }

        // Relation effects may have touched entities reported above; the
        // report carries their final state.
        if !applied.is_empty() {
            for (kind, list) in entities.iter_mut() {
                for entity in list.iter_mut() {
                    if let Some(current) = self.store.find_by_name(*kind, &entity.name).await? {
                        *entity = current;
                    }
                }
            }
        }

        info!(
            entities = entities.values().map(Vec::len).sum::<usize>(),
            relations = applied.len(),
            "processed session text"
        );
        Ok(ProcessReport {
            entities,
            relations: applied,
        })
    }

    /// Fuzzy lookup against everything persisted under one kind, ranked and
    /// capped by the configured limit.
    pub async fn find_similar(
        &self,
        kind: EntityKind,
        name: &str,
    ) -> Result<Vec<(Entity, f64)>, PipelineError> {
        let known = self.store.find_all(kind).await?;
        Ok(self
            .matcher
            .find_ranked_matches(name, &known, self.settings.max_ranked_matches)
            .into_iter()
            .map(|(entity, score)| (entity.clone(), score))
            .collect())
    }

    /// A fresh entity built from extracted attributes and tags.
    fn compose(&self, kind: EntityKind, doc: &Document, name: &str) -> Entity {
        let data = self
            .extractor
            .extract(kind, doc, name)
            .map(|attrs| attrs.into_entity_data())
            .unwrap_or_else(|| EntityData::empty(kind));
        let tags = self.categorizer.categorize(kind, doc, name);
        Entity::new(name, data).with_tags(tags)
    }

    /// Fold newly extracted information into an already-persisted entity.
    /// Fields fill only when empty; status and tags are the exception, and
    /// history-like fields append.
    fn refresh(&self, mut entity: Entity, doc: &Document, name: &str) -> Entity {
        let tags = self.categorizer.categorize(entity.kind(), doc, name);
        entity.tags.extend(tags);

        match &mut entity.data {
            EntityData::Character(data) => {
                let attrs = self.extractor.character(doc, name);
                fill_scalar(&mut data.description, &attrs.description);
                fill_scalar(&mut data.role, &attrs.role);
                if attrs.status != CharacterStatus::default() || data.status != attrs.status {
                    data.status = attrs.status;
                }
                if !attrs.history.is_empty() {
                    append_history(&mut data.history, &self.stamp(&attrs.history));
                }
                for change in extract_state_changes(doc, name) {
                    append_history(
                        &mut data.history,
                        &format!("[Změna stavu] {}", change.sentence),
                    );
                    match change.effect {
                        Some(StatusEffect::Dead) => data.status = CharacterStatus::Dead,
                        Some(StatusEffect::Injured) => data.status = CharacterStatus::Injured,
                        Some(StatusEffect::Healthy) => data.status = CharacterStatus::Alive,
                        None => {}
                    }
                }
            }
            EntityData::Location(data) => {
                let attrs = self.extractor.location(doc, name);
                if data.location_type == LocationType::default() {
                    if let Some(location_type) = attrs.location_type {
                        data.location_type = location_type;
                    }
                }
                fill_scalar(&mut data.hierarchy, &attrs.hierarchy);
                fill_scalar(&mut data.description, &attrs.description);
                if attrs.status != LocationStatus::default() || data.status != attrs.status {
                    data.status = attrs.status;
                }
            }
            EntityData::Creature(data) => {
                let attrs = self.extractor.creature(doc, name);
                fill_scalar(&mut data.description, &attrs.description);
                fill_scalar(&mut data.weaknesses_strengths, &attrs.weaknesses_strengths);
                if attrs.status != CreatureStatus::default() || data.status != attrs.status {
                    data.status = attrs.status;
                }
                if !attrs.combat_history.is_empty() {
                    append_history(&mut data.combat_history, &self.stamp(&attrs.combat_history));
                }
                for change in extract_state_changes(doc, name) {
                    append_history(
                        &mut data.combat_history,
                        &format!("[Změna stavu] {}", change.sentence),
                    );
                    match change.effect {
                        Some(StatusEffect::Dead) => data.status = CreatureStatus::Dead,
                        Some(StatusEffect::Injured) => data.status = CreatureStatus::Injured,
                        Some(StatusEffect::Healthy) => data.status = CreatureStatus::Alive,
                        None => {}
                    }
                }
            }
            EntityData::Item(data) => {
                let attrs = self.extractor.item(doc, name);
                if data.item_type == ItemType::default() {
                    if let Some(item_type) = attrs.item_type {
                        data.item_type = item_type;
                    }
                }
                fill_scalar(&mut data.description, &attrs.description);
                fill_scalar(&mut data.special_abilities, &attrs.special_abilities);
                if !attrs.ownership_history.is_empty() {
                    append_history(
                        &mut data.ownership_history,
                        &self.stamp(&attrs.ownership_history),
                    );
                }
            }
            // Non-narrative kinds carry no extraction tables; tags only.
            _ => {}
        }
        entity
    }

    /// Apply the relation effect table keyed by (subject kind, object kind)
    /// and persist both sides. Pairs outside the table change nothing.
    async fn apply_relation(
        &self,
        mut subject: Entity,
        mut object: Entity,
    ) -> Result<bool, PipelineError> {
        let (Some(subject_id), Some(object_id)) = (subject.id, object.id) else {
            return Ok(false);
        };

        let applied = match (&mut subject.data, &mut object.data) {
            (EntityData::Character(s), EntityData::Character(o)) => {
                push_unique(&mut s.related_character_ids, object_id);
                push_unique(&mut o.related_character_ids, subject_id);
                true
            }
            (EntityData::Character(s), EntityData::Location(o)) => {
                s.location_id = Some(object_id);
                push_unique(&mut o.occupant_ids, subject_id);
                true
            }
            (EntityData::Character(s), EntityData::Item(o)) => {
                push_unique(&mut s.item_ids, object_id);
                o.owner_id = Some(subject_id);
                true
            }
            (EntityData::Location(s), EntityData::Character(o)) => {
                push_unique(&mut s.occupant_ids, object_id);
                o.location_id = Some(subject_id);
                true
            }
            (EntityData::Location(s), EntityData::Item(o)) => {
                push_unique(&mut s.item_ids, object_id);
                o.location_id = Some(subject_id);
                true
            }
            _ => false,
        };
        if !applied {
            return Ok(false);
        }

        debug!(subject = %subject.name, object = %object.name, "applied relation effect");
        self.store.update(subject_id, subject).await?;
        self.store.update(object_id, object).await?;
        Ok(true)
    }

    fn stamp(&self, entry: &str) -> String {
        format!("[{}] {}", self.clock.now().format("%Y-%m-%d %H:%M"), entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chronicler_nlp::annotate::{AnnotateError, Pos};

    use crate::ports::MockEntityStore;

    struct FixtureAnnotator(Document);

    impl Annotator for FixtureAnnotator {
        fn annotate(&self, _text: &str) -> Result<Document, AnnotateError> {
            Ok(self.0.clone())
        }
    }

    struct FailingAnnotator;

    impl Annotator for FailingAnnotator {
        fn annotate(&self, _text: &str) -> Result<Document, AnnotateError> {
            Err(AnnotateError::Backend("model unavailable".to_string()))
        }
    }

    fn wizard_doc() -> Document {
        let mut b = Document::builder();
        b.word("čaroděj", "čaroděj", Pos::Noun)
            .word("přišel", "přijít", Pos::Verb)
            .word(".", ".", Pos::Other)
            .end_sentence();
        b.finish()
    }

    #[tokio::test]
    async fn annotation_failure_aborts_the_run() {
        let store = MockEntityStore::new();
        let pipeline = Pipeline::new(Arc::new(store), Arc::new(FailingAnnotator));

        let err = pipeline.process("cokoliv").await.unwrap_err();
        assert!(matches!(err, PipelineError::Annotate(_)));
    }

    #[tokio::test]
    async fn store_failure_propagates_and_halts() {
        let mut store = MockEntityStore::new();
        store
            .expect_find_by_name()
            .returning(|_, _| Err(StoreError::backend("find_by_name", "rate limited")));
        let pipeline = Pipeline::new(Arc::new(store), Arc::new(FixtureAnnotator(wizard_doc())));

        let err = pipeline.process("čaroděj přišel.").await.unwrap_err();
        assert!(matches!(err, PipelineError::Store(_)));
    }

    #[tokio::test]
    async fn unknown_mention_is_created_with_extracted_payload() {
        let mut store = MockEntityStore::new();
        store.expect_find_by_name().returning(|_, _| Ok(None));
        store.expect_create().returning(|mut entity| {
            entity.id = Some(chronicler_domain::EntityId::new());
            Ok(entity)
        });
        let pipeline = Pipeline::new(Arc::new(store), Arc::new(FixtureAnnotator(wizard_doc())));

        let report = pipeline.process("čaroděj přišel.").await.unwrap();
        let characters = &report.entities[&EntityKind::Character];
        assert_eq!(characters.len(), 1);
        assert_eq!(characters[0].name, "čaroděj");
        assert!(characters[0].id.is_some());
    }
}
