//! Reference palettes and nearest-swatch matching
//!
//! A [`Palette`] holds labeled [`PaletteEntry`] values with their Lab
//! coordinates precomputed. [`find_closest`] ranks a palette against a
//! target color under optional [`TagFilters`]; [`find_split`] produces the
//! two-list primary/secondary view.

mod entry;
mod error;
mod matcher;
#[allow(clippy::module_inception)]
mod palette;
mod tag;

pub use entry::PaletteEntry;
pub use error::PaletteError;
pub use matcher::{
    find_closest, find_split, MatchQuery, MatchResult, SplitMatches, SplitQuery,
    DEFAULT_MATCH_COUNT,
};
pub use palette::{EntryRecord, LoadReport, Palette};
pub use tag::{FilterMode, Tag, TagFilters};
