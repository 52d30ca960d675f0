//! In-memory store adapter.
//!
//! Reference [`EntityStore`] implementation backed by a concurrent map. Used
//! by the test suites and as the default backend when no external store is
//! wired in.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use chronicler_domain::{Entity, EntityId, EntityKind};

use crate::ports::{ClockPort, EntityStore, StoreError, SystemClock};

pub struct InMemoryStore {
    entities: DashMap<EntityId, Entity>,
    clock: Arc<dyn ClockPort>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            entities: DashMap::new(),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn create(&self, mut entity: Entity) -> Result<Entity, StoreError> {
        if entity.id.is_some() {
            return Err(StoreError::constraint("entity already has an id"));
        }
        if entity.name.trim().is_empty() {
            return Err(StoreError::constraint("entity name must not be empty"));
        }
        let id = EntityId::new();
        let now = self.clock.now();
        entity.id = Some(id);
        entity.created_at = Some(now);
        entity.updated_at = Some(now);
        self.entities.insert(id, entity.clone());
        Ok(entity)
    }

    async fn find_by_name(
        &self,
        kind: EntityKind,
        name: &str,
    ) -> Result<Option<Entity>, StoreError> {
        Ok(self
            .entities
            .iter()
            .find(|record| record.kind() == kind && record.name == name)
            .map(|record| record.value().clone()))
    }

    async fn find_all(&self, kind: EntityKind) -> Result<Vec<Entity>, StoreError> {
        let mut all: Vec<Entity> = self
            .entities
            .iter()
            .filter(|record| record.kind() == kind)
            .map(|record| record.value().clone())
            .collect();
        // DashMap iteration order is arbitrary; callers get a stable view.
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn update(&self, id: EntityId, mut entity: Entity) -> Result<Entity, StoreError> {
        let Some(existing) = self.entities.get(&id).map(|record| record.value().clone()) else {
            return Err(StoreError::not_found(entity.kind(), id));
        };
        entity.id = Some(id);
        entity.created_at = existing.created_at;
        entity.updated_at = Some(self.clock.now());
        self.entities.insert(id, entity.clone());
        Ok(entity)
    }
}
