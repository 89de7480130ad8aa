use serde::{Deserialize, Serialize};
use swatch_match::{EntryRecord, Lab};

/// One swatch as stored in a palette JSON file.
///
/// ```json
/// { "id": "oak_planks", "hex": "#a2834f", "lab": [55.8, 5.1, 28.9], "tags": ["block"] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteRecord {
    pub id: String,
    pub hex: String,
    /// Texture-averaged Lab, more accurate than the Lab of `hex`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl PaletteRecord {
    /// Convert to the engine's input record with the given resolved tags and image.
    pub fn into_entry_record(self, tags: Vec<String>, image: Option<String>) -> EntryRecord {
        let mut record = EntryRecord::new(self.id, self.hex, tags);
        record.lab = self.lab.map(Lab::from);
        record.image = self.image.or(image);
        record
    }
}
