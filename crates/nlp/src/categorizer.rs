//! Keyword co-occurrence tagging.
//!
//! A tag is granted when the mention name and one of the tag's trigger
//! keywords occur close enough together in the source text. Pure function of
//! the text; re-running it never removes or duplicates a tag.

use std::collections::BTreeSet;

use regex::Regex;
use tracing::debug;

use chronicler_domain::EntityKind;

use crate::annotate::Document;
use crate::tags::vocabulary;

#[derive(Debug, Default)]
pub struct Categorizer;

impl Categorizer {
    pub fn new() -> Self {
        Self
    }

    /// Tags for an entity of `kind` named `name`, judged against `doc`.
    ///
    /// A keyword grants its tag when it shares a sentence with the name, or
    /// failing that when name and keyword co-occur with no sentence boundary
    /// between them. The first granting keyword settles its tag; remaining
    /// keywords of that tag are skipped.
    pub fn categorize(&self, kind: EntityKind, doc: &Document, name: &str) -> BTreeSet<String> {
        let mut tags = BTreeSet::new();
        let name_lower = name.to_lowercase();
        if name_lower.is_empty() {
            return tags;
        }

        let sentences: Vec<String> = doc
            .sentences()
            .iter()
            .map(|sentence| doc.sentence_text(sentence).to_lowercase())
            .collect();
        let name_sentences: Vec<&String> = sentences
            .iter()
            .filter(|sentence| sentence.contains(&name_lower))
            .collect();

        for (tag, keywords) in vocabulary(kind) {
            let granted = keywords.iter().any(|keyword| {
                name_sentences
                    .iter()
                    .any(|sentence| sentence.contains(keyword))
                    || co_occur(doc.text(), name, keyword)
            });
            if granted {
                debug!(%name, tag, "granted tag");
                tags.insert((*tag).to_string());
            }
        }
        tags
    }
}

/// True when `name` and `keyword` appear in either order with no sentence
/// boundary between them.
fn co_occur(text: &str, name: &str, keyword: &str) -> bool {
    let name = regex::escape(name);
    let keyword = regex::escape(keyword);
    let pattern = format!("(?i){name}[^.!?]*{keyword}|{keyword}[^.!?]*{name}");
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    }
}
