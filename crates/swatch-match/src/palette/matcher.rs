//! Ranking palette entries against a target color

use crate::color::{Lab, Rgb};
use crate::distance::DistanceMetric;

use super::entry::PaletteEntry;
use super::palette::Palette;
use super::tag::{Tag, TagFilters};

/// Number of matches returned when a query does not say otherwise.
pub const DEFAULT_MATCH_COUNT: usize = 6;

/// Tag that marks full-block swatches in the split query.
const DEFAULT_PRIMARY_TAG: &str = "block";

/// Which entries to consider and how many to return.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    pub count: usize,
    /// When set, only entries with this tag are candidates and `filters`
    /// is ignored.
    pub required_tag: Option<Tag>,
    pub filters: TagFilters,
    pub metric: DistanceMetric,
}

impl Default for MatchQuery {
    fn default() -> Self {
        Self {
            count: DEFAULT_MATCH_COUNT,
            required_tag: None,
            filters: TagFilters::default(),
            metric: DistanceMetric::default(),
        }
    }
}

impl MatchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn required_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.required_tag = Some(tag.into());
        self
    }

    pub fn filters(mut self, filters: TagFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    fn admits(&self, entry: &PaletteEntry) -> bool {
        match &self.required_tag {
            Some(tag) => entry.tags().contains(tag),
            None => self.filters.admits(entry.tags()),
        }
    }
}

/// A palette entry ranked against a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    pub entry: &'a PaletteEntry,
    /// Distance under the query's metric, never negative
    pub distance: f64,
    /// Zero-based position in the result list
    pub rank: usize,
}

/// Rank `candidates` by distance to `target` and keep the best `count`.
///
/// The sort is stable, so entries at equal distance keep palette order.
fn rank<'a>(
    target: Lab,
    candidates: impl Iterator<Item = &'a PaletteEntry>,
    count: usize,
    metric: DistanceMetric,
) -> Vec<MatchResult<'a>> {
    let target_rgb = Rgb::from(target);

    let mut scored: Vec<(&PaletteEntry, f64)> = candidates
        .map(|entry| {
            let d = metric.between((target, target_rgb), (entry.lab(), entry.rgb()));
            (entry, d)
        })
        .collect();
    scored.sort_by(|a, b| a.1.total_cmp(&b.1));
    scored.truncate(count);

    scored
        .into_iter()
        .enumerate()
        .map(|(rank, (entry, distance))| MatchResult {
            entry,
            distance,
            rank,
        })
        .collect()
}

/// Find the palette entries closest to `target`.
///
/// Returns at most `query.count` results in ascending distance. Fewer
/// candidates than `count` (including none) is not an error.
///
/// ```
/// use swatch_match::{find_closest, Lab, MatchQuery, Palette, PaletteEntry, TagFilters};
///
/// let palette = Palette::from_entries(vec![
///     PaletteEntry::parse("glass", "#C0D8E0", ["block", "translucent"]).unwrap(),
///     PaletteEntry::parse("snow", "#F9FEFE", ["block"]).unwrap(),
/// ]);
///
/// let query = MatchQuery::new().filters(TagFilters::new().exclude("translucent"));
/// let matches = find_closest(Lab::new(90.0, -5.0, -5.0), &palette, &query);
///
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].entry.id(), "snow");
/// ```
pub fn find_closest<'a>(
    target: Lab,
    palette: &'a Palette,
    query: &MatchQuery,
) -> Vec<MatchResult<'a>> {
    rank(
        target,
        palette.iter().filter(|e| query.admits(e)),
        query.count,
        query.metric,
    )
}

/// Query for [`find_split`].
#[derive(Debug, Clone, PartialEq)]
pub struct SplitQuery {
    pub count: usize,
    /// Entries carrying this tag form the primary list
    pub primary_tag: Tag,
    /// Applied to the secondary list only
    pub filters: TagFilters,
    pub metric: DistanceMetric,
}

impl Default for SplitQuery {
    fn default() -> Self {
        Self {
            count: DEFAULT_MATCH_COUNT,
            primary_tag: Tag::from(DEFAULT_PRIMARY_TAG),
            filters: TagFilters::default(),
            metric: DistanceMetric::default(),
        }
    }
}

impl SplitQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn primary_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.primary_tag = tag.into();
        self
    }

    pub fn filters(mut self, filters: TagFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }
}

/// Result of [`find_split`].
#[derive(Debug, Clone, PartialEq)]
pub struct SplitMatches<'a> {
    /// Closest entries carrying the primary tag
    pub primary: Vec<MatchResult<'a>>,
    /// Closest entries without it that pass the filters
    pub secondary: Vec<MatchResult<'a>>,
}

/// Rank primary and secondary swatches as two separate lists.
///
/// The palette is partitioned on `query.primary_tag`. The tri-state filters
/// only narrow the secondary side; the primary list is always the full set
/// of primary entries.
pub fn find_split<'a>(target: Lab, palette: &'a Palette, query: &SplitQuery) -> SplitMatches<'a> {
    let primary_tag = &query.primary_tag;

    let primary = rank(
        target,
        palette.iter().filter(|e| e.tags().contains(primary_tag)),
        query.count,
        query.metric,
    );
    let secondary = rank(
        target,
        palette
            .iter()
            .filter(|e| !e.tags().contains(primary_tag) && query.filters.admits(e.tags())),
        query.count,
        query.metric,
    );

    SplitMatches { primary, secondary }
}
