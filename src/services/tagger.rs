//! Category tags derived from swatch identifiers.
//!
//! Palette files may omit tags. The classifier fills them in from the id
//! alone: an override rule if one matches, else every keyword rule whose
//! keyword occurs in the id, else the default tag.

use swatch_match::Tag;

use crate::models::{KeywordRule, OverrideRule, PatternMode, TaggingConfig};

#[derive(Debug, Clone)]
pub struct TagClassifier {
    default_tag: Tag,
    overrides: Vec<OverrideRule>,
    keywords: Vec<KeywordRule>,
}

impl TagClassifier {
    pub fn new(config: &TaggingConfig) -> Self {
        Self {
            default_tag: Tag::new(config.default_tag.as_str()),
            overrides: config.overrides.clone(),
            keywords: config.keywords.clone(),
        }
    }

    /// Tags for `id`, never empty, without duplicates.
    pub fn classify(&self, id: &str) -> Vec<Tag> {
        if let Some(rule) = self.overrides.iter().find(|r| r.matches(id)) {
            let tags = dedup(rule.tags.iter().map(Tag::new));
            if !tags.is_empty() {
                return tags;
            }
        }

        let tags = dedup(
            self.keywords
                .iter()
                .filter(|rule| rule.words.iter().any(|w| id.contains(w.as_str())))
                .map(|rule| Tag::new(rule.tag.as_str())),
        );

        if tags.is_empty() {
            vec![self.default_tag.clone()]
        } else {
            tags
        }
    }
}

impl Default for TagClassifier {
    fn default() -> Self {
        Self::new(&TaggingConfig::default())
    }
}

impl OverrideRule {
    fn matches(&self, id: &str) -> bool {
        match self.mode {
            PatternMode::Contains => id.contains(self.pattern.as_str()),
            PatternMode::Exact => id == self.pattern,
        }
    }
}

fn dedup(tags: impl Iterator<Item = Tag>) -> Vec<Tag> {
    let mut out: Vec<Tag> = Vec::new();
    for tag in tags {
        if !tag.as_str().is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
