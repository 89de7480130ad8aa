//! Palette JSON -> engine `Palette`.

use std::sync::Arc;

use swatch_match::{EntryRecord, LoadReport, Palette, PaletteError};

use crate::assets::AssetLoader;
use crate::error::PaletteLoadError;
use crate::models::{AppConfig, PaletteConfig, PaletteRecord};

use super::palette_store::{PaletteProvider, PaletteSnapshot};
use super::tagger::TagClassifier;

/// Reads palette files and turns them into palettes.
///
/// Missing tags are filled in by the [`TagClassifier`]; missing image
/// references come from the configured URL template. Records that are
/// malformed or that the engine rejects are logged and skipped.
pub struct PaletteLoader {
    assets: Arc<AssetLoader>,
    classifier: TagClassifier,
    palette_config: PaletteConfig,
}

impl PaletteLoader {
    pub fn new(assets: Arc<AssetLoader>, config: &AppConfig) -> Self {
        Self {
            assets,
            classifier: TagClassifier::new(&config.tagging),
            palette_config: config.palette.clone(),
        }
    }

    pub fn classifier(&self) -> &TagClassifier {
        &self.classifier
    }

    /// Build a palette from a JSON array of records.
    ///
    /// Only a document that is not a JSON array fails the whole load. A
    /// record with missing or mistyped fields is rejected on its own.
    pub fn parse(&self, json: &str) -> Result<LoadReport, PaletteLoadError> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let records = values.into_iter().enumerate().map(|(index, value)| {
            let id = value
                .get("id")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            serde_json::from_value::<PaletteRecord>(value)
                .map(|record| self.entry_record(record))
                .map_err(|e| PaletteError::MalformedRecord {
                    index,
                    id,
                    reason: e.to_string(),
                })
        });
        Ok(Self::finish(Palette::load_results(records)))
    }

    /// Resolve tags and image for one record.
    fn entry_record(&self, record: PaletteRecord) -> EntryRecord {
        let tags = match &record.tags {
            Some(tags) if !tags.is_empty() => tags.clone(),
            _ => self
                .classifier
                .classify(&record.id)
                .into_iter()
                .map(|t| t.to_string())
                .collect(),
        };
        let image = self.palette_config.image_for(&record.id);
        record.into_entry_record(tags, image)
    }

    fn finish(report: LoadReport) -> LoadReport {
        for rejected in &report.rejected {
            tracing::warn!(
                index = rejected.index(),
                id = rejected.id(),
                error = %rejected,
                "Skipping palette entry"
            );
        }
        report
    }

    /// Read the configured palette source (external file or embedded).
    pub fn load(&self) -> Result<LoadReport, PaletteLoadError> {
        let source = self.assets.palette_source();
        let json = self
            .assets
            .read_palette_string()
            .map_err(|source_err| PaletteLoadError::Io {
                source_name: source.to_string(),
                source: source_err,
            })?;
        let report = self.parse(&json)?;
        tracing::info!(
            source = %source,
            entries = report.palette.len(),
            rejected = report.rejected.len(),
            "Loaded palette"
        );
        Ok(report)
    }

    /// Load the palette source and swap it into `store`.
    ///
    /// On failure the store keeps its current palette.
    pub async fn reload_into(
        &self,
        store: &dyn PaletteProvider,
    ) -> Result<PaletteSnapshot, PaletteLoadError> {
        let report = self.load()?;
        Ok(store.replace(report).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryPaletteStore;
    use std::fs;
    use tempfile::TempDir;

    fn loader() -> PaletteLoader {
        let config: AppConfig = serde_yaml::from_str(
            "palette:\n  image_url_template: \"https://img.example/{id}.png\"\n",
        )
        .unwrap();
        PaletteLoader::new(Arc::new(AssetLoader::default()), &config)
    }

    #[test]
    fn test_parse_keeps_given_tags_and_lab() {
        let report = loader()
            .parse(r##"[{"id":"oak_fence","hex":"#a2834f","lab":[55.8,5.1,28.9],"tags":["block"]}]"##)
            .unwrap();
        let entry = report.palette.get("oak_fence").unwrap();
        assert_eq!(entry.hex(), "#A2834F");
        assert!(entry.has_tag("block"));
        assert!(!entry.has_tag("vertical"));
        assert_eq!(entry.lab().l, 55.8);
    }

    #[test]
    fn test_parse_classifies_missing_tags() {
        let report = loader()
            .parse(r##"[{"id":"oak_fence","hex":"#a2834f"},{"id":"stone","hex":"#7d7d7d","tags":[]}]"##)
            .unwrap();
        assert!(report.palette.get("oak_fence").unwrap().has_tag("vertical"));
        assert!(report.palette.get("stone").unwrap().has_tag("block"));
    }

    #[test]
    fn test_parse_formats_image_from_template() {
        let report = loader()
            .parse(r##"[{"id":"stone","hex":"#7d7d7d"},{"id":"dirt","hex":"#866043","image":"dirt.png"}]"##)
            .unwrap();
        assert_eq!(
            report.palette.get("stone").unwrap().image(),
            Some("https://img.example/stone.png")
        );
        assert_eq!(report.palette.get("dirt").unwrap().image(), Some("dirt.png"));
    }

    #[test]
    fn test_parse_skips_bad_records() {
        let report = loader()
            .parse(r##"[{"id":"a","hex":"#zzzzzz"},{"id":"b","hex":"#000000"},{"id":"b","hex":"#111111"}]"##)
            .unwrap();
        assert_eq!(report.palette.len(), 1);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.palette.get("b").unwrap().hex(), "#000000");
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(
            loader().parse("{not json"),
            Err(PaletteLoadError::Json(_))
        ));
        assert!(matches!(
            loader().parse(r##"{"not":"a list"}"##),
            Err(PaletteLoadError::Json(_))
        ));
    }

    #[test]
    fn test_parse_skips_malformed_records() {
        let report = loader()
            .parse(
                r##"[
                    {"id":"stone","hex":"#7d7d7d"},
                    {"id":"dirt","hex":null},
                    {"id":"sand","hex":"#dbcfa3"},
                    {"hex":"#000000"},
                    {"id":"gravel","hex":42},
                    "loose"
                ]"##,
            )
            .unwrap();
        assert_eq!(report.palette.len(), 2);
        assert!(report.palette.get("stone").is_some());
        assert!(report.palette.get("sand").is_some());

        let positions: Vec<(usize, &str)> =
            report.rejected.iter().map(|r| (r.index(), r.id())).collect();
        assert_eq!(positions, [(1, "dirt"), (3, ""), (4, "gravel"), (5, "")]);
        assert!(report
            .rejected
            .iter()
            .all(|r| matches!(r, PaletteError::MalformedRecord { .. })));
    }

    #[test]
    fn test_malformed_record_does_not_shift_later_indexes() {
        let report = loader()
            .parse(r##"[{"id":"dirt"},{"id":"stone","hex":"#7d7d7d"},{"id":"stone","hex":"#000000"}]"##)
            .unwrap();
        assert_eq!(report.palette.len(), 1);
        assert_eq!(report.rejected[0].index(), 0);
        assert_eq!(
            report.rejected[1],
            PaletteError::DuplicateId {
                index: 2,
                id: "stone".into()
            }
        );
    }

    #[test]
    fn test_embedded_palette_loads_cleanly() {
        let report = PaletteLoader::new(Arc::new(AssetLoader::default()), &AppConfig::default())
            .load()
            .unwrap();
        assert!(report.palette.len() > 20);
        assert!(report.rejected.is_empty());
        assert!(report.palette.iter().any(|e| e.has_tag("block")));
        assert!(report.palette.iter().any(|e| !e.has_tag("block")));
    }

    #[tokio::test]
    async fn test_reload_into_swaps_palette() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("palette.json");
        fs::write(&path, r##"[{"id":"stone","hex":"#7d7d7d"}]"##).unwrap();

        let assets = Arc::new(AssetLoader::new(None, Some(path.clone())));
        let loader = PaletteLoader::new(assets, &AppConfig::default());
        let store = InMemoryPaletteStore::new(loader.load().unwrap());
        assert_eq!(store.snapshot().await.palette.len(), 1);

        fs::write(
            &path,
            r##"[{"id":"stone","hex":"#7d7d7d"},{"id":"dirt","hex":"#866043"}]"##,
        )
        .unwrap();
        let snapshot = loader.reload_into(&store).await.unwrap();
        assert_eq!(snapshot.palette.len(), 2);
        assert_eq!(store.snapshot().await.palette.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_current_palette() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("palette.json");
        fs::write(&path, r##"[{"id":"stone","hex":"#7d7d7d"}]"##).unwrap();

        let assets = Arc::new(AssetLoader::new(None, Some(path.clone())));
        let loader = PaletteLoader::new(assets, &AppConfig::default());
        let store = InMemoryPaletteStore::new(loader.load().unwrap());

        fs::write(&path, "[oops").unwrap();
        assert!(loader.reload_into(&store).await.is_err());
        assert!(store.snapshot().await.palette.get("stone").is_some());
    }
}
