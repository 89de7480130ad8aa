//! The reference palette and its loader

use std::collections::HashSet;

use crate::color::Lab;

use super::entry::PaletteEntry;
use super::error::PaletteError;
use super::tag::Tag;

/// Raw input for one palette entry, before validation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntryRecord {
    pub id: String,
    pub hex: String,
    pub tags: Vec<Tag>,
    /// Measured Lab; derived from `hex` when absent
    pub lab: Option<Lab>,
    pub image: Option<String>,
}

impl EntryRecord {
    pub fn new<I, T>(id: impl Into<String>, hex: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Tag>,
    {
        Self {
            id: id.into(),
            hex: hex.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            lab: None,
            image: None,
        }
    }
}

/// Outcome of [`Palette::load`]: the usable palette plus every rejected record.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub palette: Palette,
    pub rejected: Vec<PaletteError>,
}

/// An ordered, immutable set of reference swatches.
///
/// A palette is never edited in place. To change it, build a new one and
/// replace the old value wholesale.
///
/// # Example
///
/// ```
/// use swatch_match::{EntryRecord, Palette};
///
/// let report = Palette::load([
///     EntryRecord::new("stone", "#7D7D7D", ["block"]),
///     EntryRecord::new("broken", "#XYZ", ["block"]),
///     EntryRecord::new("stone", "#808080", ["block"]),
/// ]);
///
/// assert_eq!(report.palette.len(), 1);
/// assert_eq!(report.rejected.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Wrap already-built entries, keeping their order.
    ///
    /// No validation is done; if two entries share an id, [`get`](Self::get)
    /// returns the first.
    pub fn from_entries(entries: Vec<PaletteEntry>) -> Self {
        Self { entries }
    }

    /// Build a palette from raw records, skipping the ones that fail.
    ///
    /// A record is rejected when its hex is malformed
    /// ([`PaletteError::InvalidEntry`]) or its id repeats an earlier
    /// accepted record ([`PaletteError::DuplicateId`]). Rejections never
    /// abort the load.
    pub fn load<I>(records: I) -> LoadReport
    where
        I: IntoIterator<Item = EntryRecord>,
    {
        Self::load_results(records.into_iter().map(Ok))
    }

    /// Like [`load`](Self::load), for input where some records already
    /// failed upstream.
    ///
    /// An `Err` item is passed through to [`LoadReport::rejected`] as is.
    /// Positions still count every item, so the caller's error should
    /// carry the same index the item has here.
    pub fn load_results<I>(records: I) -> LoadReport
    where
        I: IntoIterator<Item = Result<EntryRecord, PaletteError>>,
    {
        let mut entries = Vec::new();
        let mut rejected = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (index, record) in records.into_iter().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    rejected.push(err);
                    continue;
                }
            };
            if seen.contains(&record.id) {
                rejected.push(PaletteError::DuplicateId {
                    index,
                    id: record.id,
                });
                continue;
            }

            let mut entry = match PaletteEntry::parse(record.id.clone(), &record.hex, record.tags)
            {
                Ok(entry) => entry,
                Err(source) => {
                    rejected.push(PaletteError::InvalidEntry {
                        index,
                        id: record.id,
                        source,
                    });
                    continue;
                }
            };
            if let Some(lab) = record.lab {
                entry = entry.with_lab(lab);
            }
            if let Some(image) = record.image {
                entry = entry.with_image(image);
            }

            seen.insert(record.id);
            entries.push(entry);
        }

        LoadReport {
            palette: Self { entries },
            rejected,
        }
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaletteEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct tags across all entries, in first-seen order.
    pub fn tags(&self) -> Vec<&Tag> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .flat_map(|e| e.tags())
            .filter(|&t| seen.insert(t.as_str()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteEntry;
    type IntoIter = std::slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ParseColorError;

    #[test]
    fn test_load_keeps_order() {
        let report = Palette::load([
            EntryRecord::new("c", "#0000FF", ["block"]),
            EntryRecord::new("a", "#FF0000", ["block"]),
            EntryRecord::new("b", "#00FF00", ["vertical"]),
        ]);
        assert!(report.rejected.is_empty());
        let ids: Vec<&str> = report.palette.iter().map(|e| e.id()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn test_load_skips_malformed_hex() {
        let report = Palette::load([
            EntryRecord::new("ok", "#FF0000", ["block"]),
            EntryRecord::new("bad", "#GG0000", ["block"]),
            EntryRecord::new("short", "#FF00", ["block"]),
            EntryRecord::new("also_ok", "#00FF00", ["block"]),
        ]);
        assert_eq!(report.palette.len(), 2);
        assert_eq!(
            report.rejected,
            vec![
                PaletteError::InvalidEntry {
                    index: 1,
                    id: "bad".into(),
                    source: ParseColorError::InvalidDigit {
                        position: 0,
                        found: 'G'
                    },
                },
                PaletteError::InvalidEntry {
                    index: 2,
                    id: "short".into(),
                    source: ParseColorError::InvalidLength(4),
                },
            ]
        );
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let report = Palette::load([
            EntryRecord::new("stone", "#7D7D7D", ["block"]),
            EntryRecord::new("stone", "#000000", ["block"]),
        ]);
        assert_eq!(report.palette.len(), 1);
        assert_eq!(report.palette.get("stone").unwrap().hex(), "#7D7D7D");
        assert_eq!(report.rejected[0].index(), 1);
        assert_eq!(report.rejected[0].id(), "stone");
    }

    #[test]
    fn test_malformed_first_does_not_claim_id() {
        let report = Palette::load([
            EntryRecord::new("stone", "nope", ["block"]),
            EntryRecord::new("stone", "#7D7D7D", ["block"]),
        ]);
        assert_eq!(report.palette.len(), 1);
        assert_eq!(report.rejected.len(), 1);
    }

    #[test]
    fn test_load_results_keeps_upstream_failures_in_place() {
        let report = Palette::load_results([
            Ok(EntryRecord::new("stone", "#7D7D7D", ["block"])),
            Err(PaletteError::MalformedRecord {
                index: 1,
                id: "dirt".into(),
                reason: "invalid type: null, expected a string".into(),
            }),
            Ok(EntryRecord::new("sand", "#nope", ["block"])),
        ]);
        assert_eq!(report.palette.len(), 1);
        let positions: Vec<(usize, &str)> =
            report.rejected.iter().map(|r| (r.index(), r.id())).collect();
        assert_eq!(positions, [(1, "dirt"), (2, "sand")]);
    }

    #[test]
    fn test_load_uses_record_lab_and_image() {
        let mut record = EntryRecord::new("oak_planks", "#A2834F", ["block"]);
        record.lab = Some(Lab::new(55.8, 5.1, 28.9));
        record.image = Some("oak_planks.png".into());

        let report = Palette::load([record]);
        let entry = report.palette.get("oak_planks").unwrap();
        assert_eq!(entry.lab(), Lab::new(55.8, 5.1, 28.9));
        assert_eq!(entry.image(), Some("oak_planks.png"));
    }

    #[test]
    fn test_distinct_tags_first_seen_order() {
        let palette = Palette::from_entries(vec![
            PaletteEntry::parse("a", "#000001", ["block"]).unwrap(),
            PaletteEntry::parse("b", "#000002", ["vertical", "decoration"]).unwrap(),
            PaletteEntry::parse("c", "#000003", ["block", "translucent"]).unwrap(),
        ]);
        let tags: Vec<&str> = palette.tags().iter().map(|t| t.as_str()).collect();
        assert_eq!(tags, ["block", "vertical", "decoration", "translucent"]);
    }

    #[test]
    fn test_empty_palette() {
        let palette = Palette::default();
        assert!(palette.is_empty());
        assert!(palette.get("anything").is_none());
        assert!(palette.tags().is_empty());
    }
}
