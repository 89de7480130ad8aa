//! A single reference swatch

use crate::color::{Lab, ParseColorError, Rgb};

use super::tag::Tag;

/// One labeled swatch of a reference palette.
///
/// The hex string is canonicalized and Lab is computed once at
/// construction; matching never converts palette colors again.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    id: String,
    hex: String,
    rgb: Rgb,
    lab: Lab,
    image: Option<String>,
    tags: Vec<Tag>,
}

impl PaletteEntry {
    /// Build an entry from an identifier, a hex color and its tags.
    ///
    /// Duplicate tags are dropped; the first occurrence keeps its position.
    ///
    /// # Errors
    ///
    /// Returns [`ParseColorError`] if `hex` is not a valid hex color.
    ///
    /// ```
    /// use swatch_match::PaletteEntry;
    ///
    /// let entry = PaletteEntry::parse("oak_planks", "#a2834f", ["block", "block"]).unwrap();
    /// assert_eq!(entry.hex(), "#A2834F");
    /// assert_eq!(entry.tags().len(), 1);
    /// ```
    pub fn parse<I, T>(id: impl Into<String>, hex: &str, tags: I) -> Result<Self, ParseColorError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Tag>,
    {
        let rgb = Rgb::from_hex(hex)?;
        Ok(Self::from_rgb(id, rgb, tags))
    }

    /// Build an entry from an already-parsed color.
    pub fn from_rgb<I, T>(id: impl Into<String>, rgb: Rgb, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Tag>,
    {
        let mut unique: Vec<Tag> = Vec::new();
        for tag in tags {
            let tag = tag.into();
            if !tag.as_str().is_empty() && !unique.contains(&tag) {
                unique.push(tag);
            }
        }

        Self {
            id: id.into(),
            hex: rgb.to_hex(),
            rgb,
            lab: Lab::from(rgb),
            image: None,
            tags: unique,
        }
    }

    /// Replace the derived Lab with a measured one.
    ///
    /// Palette files store the Lab of the averaged source texture, which is
    /// more faithful than the Lab of the rounded hex color.
    pub fn with_lab(mut self, lab: Lab) -> Self {
        self.lab = lab;
        self
    }

    /// Attach a display image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Canonical `#RRGGBB` form.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn lab(&self) -> Lab {
        self.lab
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.as_str() == tag)
    }
}
