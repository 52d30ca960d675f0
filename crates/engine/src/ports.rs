//! Outbound ports of the extraction pipeline.
//!
//! Persistence and wall-clock access live behind traits so the pipeline can
//! run against any backend and stay deterministic under test.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use chronicler_domain::{Entity, EntityId, EntityKind};

/// Store operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Entity not found - includes kind and ID for actionable messages.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// Backend operation failed - includes operation name for tracing.
    #[error("Store error in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    /// Record rejected by the store.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn backend(operation: &'static str, message: impl ToString) -> Self {
        Self::Backend {
            operation,
            message: message.to_string(),
        }
    }

    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Persistence port for entity records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Persist a new entity and return it with its id and timestamps set.
    async fn create(&self, entity: Entity) -> Result<Entity, StoreError>;

    /// Exact, case-sensitive name lookup within one kind.
    async fn find_by_name(
        &self,
        kind: EntityKind,
        name: &str,
    ) -> Result<Option<Entity>, StoreError>;

    /// Every stored entity of one kind.
    async fn find_all(&self, kind: EntityKind) -> Result<Vec<Entity>, StoreError>;

    /// Overwrite an existing entity identified by `id`.
    async fn update(&self, id: EntityId, entity: Entity) -> Result<Entity, StoreError>;
}

/// Wall-clock port; swapped for a fixed clock in tests.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
