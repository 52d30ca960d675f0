//! Domain-specific mention recognition.
//!
//! Enriches the annotation backend's baseline spans with gazetteer-triggered
//! domain spans. One strict left-to-right pass; scan order is the only source
//! of precedence.

use std::collections::BTreeMap;

use tracing::debug;

use chronicler_domain::EntityKind;

use crate::annotate::{Document, EntitySpan, Pos, SpanLabel};
use crate::gazetteer::GAZETTEER_INDEX;

/// One recognized mention of a domain entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    /// Surface text of the span.
    pub text: String,
    /// Byte offsets into the source text.
    pub start: usize,
    pub end: usize,
    pub label: SpanLabel,
    /// Token range of the span.
    pub start_token: usize,
    pub end_token: usize,
}

/// Recognizer over the fixed gazetteers.
#[derive(Debug, Default)]
pub struct MentionRecognizer;

impl MentionRecognizer {
    pub fn new() -> Self {
        Self
    }

    /// Scan the document and return every mention grouped by kind. Baseline
    /// spans from the backend are included in the result; gazetteer candidates
    /// overlapping an already-accepted span are discarded, never replace one.
    pub fn recognize(&self, doc: &Document) -> BTreeMap<EntityKind, Vec<Mention>> {
        let mut accepted: Vec<EntitySpan> = doc.spans().to_vec();
        let tokens = doc.tokens();

        let mut index = 0;
        while index < tokens.len() {
            let Some((_, label, _)) = GAZETTEER_INDEX.iter().find(|(_, _, words)| {
                let token = &tokens[index];
                words.contains(token.text.to_lowercase().as_str())
                    || words.contains(token.lemma.to_lowercase().as_str())
            }) else {
                index += 1;
                continue;
            };

            // Expand backward over adjectives and proper nouns, then forward
            // over nouns, adjectives and proper nouns.
            let mut start_token = index;
            while start_token > 0
                && matches!(tokens[start_token - 1].pos, Pos::Adjective | Pos::ProperNoun)
            {
                start_token -= 1;
            }
            let mut end_token = index + 1;
            while end_token < tokens.len()
                && matches!(
                    tokens[end_token].pos,
                    Pos::Noun | Pos::Adjective | Pos::ProperNoun
                )
            {
                end_token += 1;
            }

            let overlapping = accepted
                .iter()
                .any(|span| span.overlaps(start_token, end_token));
            if !overlapping {
                let span = EntitySpan {
                    label: *label,
                    start_token,
                    end_token,
                    start: tokens[start_token].start,
                    end: tokens[end_token - 1].end,
                };
                debug!(
                    label = ?label,
                    text = doc.span_text(&span),
                    "recognized domain mention"
                );
                accepted.push(span);
            }
            // First-found span wins; the scan resumes past the candidate
            // either way, so same-pass candidates can never tie.
            index = end_token;
        }

        let mut mentions: BTreeMap<EntityKind, Vec<Mention>> = BTreeMap::new();
        accepted.sort_by_key(|span| span.start_token);
        for span in accepted {
            mentions
                .entry(span.label.entity_kind())
                .or_default()
                .push(Mention {
                    text: doc.span_text(&span).to_string(),
                    start: span.start,
                    end: span.end,
                    label: span.label,
                    start_token: span.start_token,
                    end_token: span.end_token,
                });
        }
        mentions
    }
}
