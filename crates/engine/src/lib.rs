//! Chronicler Engine - the extraction pipeline, its outbound ports and the
//! in-memory store adapter.
//!
//! The engine owns orchestration only: linguistic analysis lives behind the
//! [`chronicler_nlp::Annotator`] seam, persistence behind [`EntityStore`].

pub mod error;
pub mod memory;
pub mod pipeline;
pub mod ports;
pub mod relations;
pub mod settings;

pub use error::PipelineError;
pub use memory::InMemoryStore;
pub use pipeline::{Pipeline, ProcessReport};
pub use ports::{ClockPort, EntityStore, FixedClock, StoreError, SystemClock};
pub use relations::{Relation, StateChange, StatusEffect, RELATION_VERBS, STATE_CHANGE_VERBS};
pub use settings::PipelineSettings;
