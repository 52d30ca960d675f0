//! Linguistic annotation contract.
//!
//! Tokenizing, lemmatizing, tagging and parsing are an external collaborator's
//! job. This module defines the narrow capability surface the extraction code
//! consumes — sentences, per-token lemma/POS/dependency data and a baseline
//! set of generic entity spans — so a different annotation engine can be
//! substituted without touching extraction logic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use chronicler_domain::EntityKind;

/// Annotation backend failure. Propagates out of a pipeline run unchanged.
#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("Annotation backend error: {0}")]
    Backend(String),
}

/// The annotation backend: raw text in, analyzed document out.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Result<Document, AnnotateError>;
}

/// Coarse part-of-speech. Only the classes span expansion cares about are
/// distinguished; everything else collapses to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pos {
    Noun,
    ProperNoun,
    Adjective,
    Verb,
    Other,
}

/// Dependency relation of a token to its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepRel {
    /// Nominal subject.
    NominalSubject,
    /// Direct object.
    DirectObject,
    /// Prepositional object.
    PrepositionalObject,
    /// Indirect object.
    IndirectObject,
    Other,
}

impl DepRel {
    /// Relations that make a token the object side of a relation verb.
    pub fn is_object(&self) -> bool {
        matches!(
            self,
            DepRel::DirectObject | DepRel::PrepositionalObject | DepRel::IndirectObject
        )
    }
}

/// One analyzed token. Offsets are byte offsets into [`Document::text`],
/// aligned to char boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: Pos,
    pub dep: DepRel,
    /// Index of the head token within the document; a root points at itself.
    pub head: usize,
    pub start: usize,
    pub end: usize,
}

/// A sentence as a token range plus a char range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// First token index, inclusive.
    pub start_token: usize,
    /// Past-the-end token index.
    pub end_token: usize,
    pub start: usize,
    pub end: usize,
}

/// Label of a baseline (or recognizer-emitted) entity span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanLabel {
    Person,
    Location,
    GeopoliticalEntity,
    Facility,
    Organization,
    Event,
    Monster,
    Item,
}

impl SpanLabel {
    /// Map an annotation label onto the domain kind it seeds.
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            SpanLabel::Person => EntityKind::Character,
            SpanLabel::Location | SpanLabel::GeopoliticalEntity | SpanLabel::Facility => {
                EntityKind::Location
            }
            SpanLabel::Monster => EntityKind::Creature,
            SpanLabel::Item => EntityKind::Item,
            SpanLabel::Organization => EntityKind::Faction,
            SpanLabel::Event => EntityKind::Event,
        }
    }
}

/// A labeled entity span over a contiguous token run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub label: SpanLabel,
    /// First token index, inclusive.
    pub start_token: usize,
    /// Past-the-end token index.
    pub end_token: usize,
    pub start: usize,
    pub end: usize,
}

impl EntitySpan {
    /// Token-range overlap check.
    pub fn overlaps(&self, start_token: usize, end_token: usize) -> bool {
        start_token < self.end_token && end_token > self.start_token
    }

    pub fn contains_token(&self, index: usize) -> bool {
        index >= self.start_token && index < self.end_token
    }
}

/// An annotated document: the raw text plus everything the backend derived
/// from it. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    text: String,
    tokens: Vec<Token>,
    sentences: Vec<Sentence>,
    spans: Vec<EntitySpan>,
}

impl Document {
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Baseline entity spans supplied by the annotation backend.
    pub fn spans(&self) -> &[EntitySpan] {
        &self.spans
    }

    pub fn sentence_text(&self, sentence: &Sentence) -> &str {
        &self.text[sentence.start..sentence.end]
    }

    pub fn span_text(&self, span: &EntitySpan) -> &str {
        &self.text[span.start..span.end]
    }

    /// Tokens belonging to one sentence.
    pub fn sentence_tokens(&self, sentence: &Sentence) -> &[Token] {
        &self.tokens[sentence.start_token..sentence.end_token]
    }

    /// The sentence a token belongs to, if any.
    pub fn sentence_of_token(&self, index: usize) -> Option<&Sentence> {
        self.sentences
            .iter()
            .find(|s| index >= s.start_token && index < s.end_token)
    }
}

/// Incremental [`Document`] construction, used by annotation adapters and by
/// test fixtures. Reassembles the raw text from the tokens: tokens are
/// space-joined except that closing punctuation attaches to the previous
/// token.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    text: String,
    tokens: Vec<Token>,
    sentences: Vec<Sentence>,
    spans: Vec<EntitySpan>,
    sentence_start_token: usize,
    sentence_start_char: usize,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token with full dependency information. `head` is a document-wide
    /// token index; pass the token's own upcoming index for a root.
    pub fn token(
        &mut self,
        text: &str,
        lemma: &str,
        pos: Pos,
        dep: DepRel,
        head: usize,
    ) -> &mut Self {
        let first_in_sentence = self.tokens.len() == self.sentence_start_token;
        let is_punctuation = matches!(text, "." | "," | "!" | "?" | ";" | ":");
        if !self.text.is_empty() && (first_in_sentence || !is_punctuation) {
            self.text.push(' ');
        }
        let start = self.text.len();
        self.text.push_str(text);
        self.tokens.push(Token {
            text: text.to_string(),
            lemma: lemma.to_string(),
            pos,
            dep,
            head,
            start,
            end: self.text.len(),
        });
        self
    }

    /// Add a plain token: no dependency relation, head pointing at itself.
    pub fn word(&mut self, text: &str, lemma: &str, pos: Pos) -> &mut Self {
        let index = self.tokens.len();
        self.token(text, lemma, pos, DepRel::Other, index)
    }

    /// Close the current sentence at the tokens added so far.
    pub fn end_sentence(&mut self) -> &mut Self {
        if self.tokens.len() > self.sentence_start_token {
            self.sentences.push(Sentence {
                start_token: self.sentence_start_token,
                end_token: self.tokens.len(),
                start: self.sentence_start_char,
                end: self.text.len(),
            });
        }
        self.sentence_start_token = self.tokens.len();
        // Next sentence starts after the separating space (added lazily).
        self.sentence_start_char = self.text.len() + 1;
        self
    }

    /// Record a baseline entity span over `[start_token, end_token)`.
    pub fn span(&mut self, label: SpanLabel, start_token: usize, end_token: usize) -> &mut Self {
        if start_token < end_token && end_token <= self.tokens.len() {
            self.spans.push(EntitySpan {
                label,
                start_token,
                end_token,
                start: self.tokens[start_token].start,
                end: self.tokens[end_token - 1].end,
            });
        }
        self
    }

    pub fn finish(mut self) -> Document {
        if self.tokens.len() > self.sentence_start_token {
            self.end_sentence();
        }
        Document {
            text: self.text,
            tokens: self.tokens,
            sentences: self.sentences,
            spans: self.spans,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_doc() -> Document {
        let mut b = Document::builder();
        b.word("Gandalf", "Gandalf", Pos::ProperNoun)
            .word("je", "být", Pos::Verb)
            .word("čaroděj", "čaroděj", Pos::Noun)
            .word(".", ".", Pos::Other)
            .end_sentence();
        b.word("Bydlí", "bydlet", Pos::Verb)
            .word("v", "v", Pos::Other)
            .word("Roklince", "Roklinka", Pos::ProperNoun)
            .word(".", ".", Pos::Other)
            .end_sentence();
        b.span(SpanLabel::Person, 0, 1);
        b.finish()
    }

    #[test]
    fn builder_reassembles_text_with_attached_punctuation() {
        let doc = simple_doc();
        assert_eq!(doc.text(), "Gandalf je čaroděj. Bydlí v Roklince.");
    }

    #[test]
    fn sentences_cover_their_tokens_and_text() {
        let doc = simple_doc();
        assert_eq!(doc.sentences().len(), 2);
        let first = doc.sentences()[0];
        assert_eq!(doc.sentence_text(&first), "Gandalf je čaroděj.");
        assert_eq!(doc.sentence_tokens(&first).len(), 4);
        let second = doc.sentences()[1];
        assert_eq!(doc.sentence_text(&second), "Bydlí v Roklince.");
    }

    #[test]
    fn span_text_and_overlap() {
        let doc = simple_doc();
        let span = doc.spans()[0];
        assert_eq!(doc.span_text(&span), "Gandalf");
        assert!(span.overlaps(0, 2));
        assert!(!span.overlaps(1, 3));
    }

    #[test]
    fn sentence_of_token_finds_the_right_sentence() {
        let doc = simple_doc();
        assert_eq!(
            doc.sentence_of_token(6).map(|s| s.start_token),
            Some(4usize)
        );
        assert!(doc.sentence_of_token(99).is_none());
    }

    #[test]
    fn span_label_kind_mapping_is_total() {
        use chronicler_domain::EntityKind;
        assert_eq!(SpanLabel::Person.entity_kind(), EntityKind::Character);
        assert_eq!(SpanLabel::Facility.entity_kind(), EntityKind::Location);
        assert_eq!(SpanLabel::Monster.entity_kind(), EntityKind::Creature);
        assert_eq!(SpanLabel::Organization.entity_kind(), EntityKind::Faction);
    }
}
