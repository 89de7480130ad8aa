//! Category tags and tri-state tag filters

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A category label attached to palette entries (`block`, `vertical`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(String);

impl Tag {
    /// Create a tag. Surrounding whitespace is trimmed.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.trim().len() == name.len() {
            Tag(name)
        } else {
            Tag(name.trim().to_string())
        }
    }

    /// The tag name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Tag::new(s)
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Tag::new(s)
    }
}

impl From<&Tag> for Tag {
    fn from(t: &Tag) -> Self {
        t.clone()
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a tag constrains the candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Keep only entries carrying the tag.
    Include,
    /// Drop entries carrying the tag.
    Exclude,
    /// No constraint.
    #[default]
    Unset,
}

impl FilterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::Include => "include",
            FilterMode::Exclude => "exclude",
            FilterMode::Unset => "none",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "include" => Ok(FilterMode::Include),
            "exclude" => Ok(FilterMode::Exclude),
            "none" | "unset" | "" => Ok(FilterMode::Unset),
            other => Err(format!(
                "unknown filter mode {:?} (expected include, exclude or none)",
                other
            )),
        }
    }
}

/// A set of per-tag include/exclude rules.
///
/// An entry passes when it carries every `Include` tag and none of the
/// `Exclude` tags. Tags that are absent or `Unset` impose nothing, so an
/// empty filter set admits everything.
///
/// ```
/// use swatch_match::{FilterMode, Tag, TagFilters};
///
/// let filters = TagFilters::new().include("vertical").exclude("translucent");
///
/// assert!(filters.admits(&[Tag::from("vertical")]));
/// assert!(!filters.admits(&[Tag::from("vertical"), Tag::from("translucent")]));
/// assert!(!filters.admits(&[]));
/// assert_eq!(filters.mode("decoration"), FilterMode::Unset);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagFilters {
    rules: BTreeMap<Tag, FilterMode>,
}

impl TagFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `tag`.
    pub fn include(self, tag: impl Into<Tag>) -> Self {
        self.with(tag, FilterMode::Include)
    }

    /// Forbid `tag`.
    pub fn exclude(self, tag: impl Into<Tag>) -> Self {
        self.with(tag, FilterMode::Exclude)
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, tag: impl Into<Tag>, mode: FilterMode) -> Self {
        self.set(tag, mode);
        self
    }

    /// Set the rule for `tag`, replacing any previous rule. `Unset` removes it.
    pub fn set(&mut self, tag: impl Into<Tag>, mode: FilterMode) {
        let tag = tag.into();
        match mode {
            FilterMode::Unset => {
                self.rules.remove(&tag);
            }
            mode => {
                self.rules.insert(tag, mode);
            }
        }
    }

    /// The rule for `tag`.
    pub fn mode(&self, tag: &str) -> FilterMode {
        self.rules.get(tag).copied().unwrap_or_default()
    }

    /// True when no tag has a rule.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Active rules in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&Tag, FilterMode)> {
        self.rules.iter().map(|(t, m)| (t, *m))
    }

    /// Whether an entry with these tags passes every rule.
    pub fn admits(&self, tags: &[Tag]) -> bool {
        self.rules.iter().all(|(tag, mode)| {
            let present = tags.contains(tag);
            match mode {
                FilterMode::Include => present,
                FilterMode::Exclude => !present,
                FilterMode::Unset => true,
            }
        })
    }
}

impl<T: Into<Tag>> FromIterator<(T, FilterMode)> for TagFilters {
    fn from_iter<I: IntoIterator<Item = (T, FilterMode)>>(iter: I) -> Self {
        let mut filters = TagFilters::new();
        for (tag, mode) in iter {
            filters.set(tag, mode);
        }
        filters
    }
}
