//! Error type for palette construction

use std::fmt;

use crate::color::ParseColorError;

/// A palette record that could not become an entry.
///
/// Loading reports these per record rather than failing the whole palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// The record's hex color is malformed
    InvalidEntry {
        /// Position of the record in the input
        index: usize,
        /// Identifier of the record
        id: String,
        /// Why the hex string was rejected
        source: ParseColorError,
    },
    /// An earlier record already used this identifier
    DuplicateId {
        /// Position of the repeated record in the input
        index: usize,
        /// The repeated identifier
        id: String,
    },
    /// The record could not be read at all (missing field, wrong type)
    MalformedRecord {
        /// Position of the record in the input
        index: usize,
        /// Identifier of the record, empty when it had none
        id: String,
        /// What was wrong with it
        reason: String,
    },
}

impl PaletteError {
    /// Position of the offending record.
    pub fn index(&self) -> usize {
        match self {
            PaletteError::InvalidEntry { index, .. }
            | PaletteError::DuplicateId { index, .. }
            | PaletteError::MalformedRecord { index, .. } => *index,
        }
    }

    /// Identifier of the offending record.
    pub fn id(&self) -> &str {
        match self {
            PaletteError::InvalidEntry { id, .. }
            | PaletteError::DuplicateId { id, .. }
            | PaletteError::MalformedRecord { id, .. } => id,
        }
    }
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::InvalidEntry { index, id, source } => {
                write!(f, "palette entry {} ({:?}): {}", index, id, source)
            }
            PaletteError::DuplicateId { index, id } => {
                write!(f, "palette entry {}: duplicate id {:?}", index, id)
            }
            PaletteError::MalformedRecord { index, id, reason } => {
                write!(f, "palette entry {} ({:?}): {}", index, id, reason)
            }
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::InvalidEntry { source, .. } => Some(source),
            _ => None,
        }
    }
}
