//! Language analysis for narrative session logs: mention recognition,
//! attribute extraction, keyword tagging and fuzzy identity resolution.
//!
//! Everything here is pure and synchronous. The only external seam is the
//! [`Annotator`] trait, which a linguistic backend implements to hand over
//! tokenized, tagged and parsed documents.

pub mod annotate;
pub mod categorizer;
pub mod extractor;
pub mod gazetteer;
pub mod matcher;
pub mod patterns;
pub mod recognizer;
pub mod tags;

pub use annotate::{
    AnnotateError, Annotator, DepRel, Document, DocumentBuilder, EntitySpan, Pos, Sentence,
    SpanLabel, Token,
};
pub use categorizer::Categorizer;
pub use extractor::{
    AttributeExtractor, CharacterAttributes, CreatureAttributes, ExtractedAttributes,
    ItemAttributes, LocationAttributes,
};
pub use matcher::{normalize, EntityMatcher, DEFAULT_MATCH_THRESHOLD};
pub use recognizer::{Mention, MentionRecognizer};
