use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use swatch_match::{LoadReport, Palette};
use tokio::sync::RwLock;

/// The palette in use, shared with handlers.
///
/// Cloning is cheap: the palette itself sits behind an `Arc`, so a handler
/// can keep ranking against its snapshot while a reload swaps in a new one.
#[derive(Debug, Clone)]
pub struct PaletteSnapshot {
    pub palette: Arc<Palette>,
    pub loaded_at: DateTime<Utc>,
    /// Records skipped when this palette was loaded
    pub rejected: usize,
}

impl PaletteSnapshot {
    fn from_report(report: LoadReport) -> Self {
        Self {
            palette: Arc::new(report.palette),
            loaded_at: Utc::now(),
            rejected: report.rejected.len(),
        }
    }
}

/// Holder of the current palette
#[async_trait]
pub trait PaletteProvider: Send + Sync {
    /// The palette in use right now
    async fn snapshot(&self) -> PaletteSnapshot;

    /// Replace the palette wholesale and return the new snapshot
    async fn replace(&self, report: LoadReport) -> PaletteSnapshot;
}

/// In-memory palette holder
pub struct InMemoryPaletteStore {
    current: RwLock<PaletteSnapshot>,
}

impl InMemoryPaletteStore {
    pub fn new(report: LoadReport) -> Self {
        Self {
            current: RwLock::new(PaletteSnapshot::from_report(report)),
        }
    }
}

#[async_trait]
impl PaletteProvider for InMemoryPaletteStore {
    async fn snapshot(&self) -> PaletteSnapshot {
        self.current.read().await.clone()
    }

    async fn replace(&self, report: LoadReport) -> PaletteSnapshot {
        let snapshot = PaletteSnapshot::from_report(report);
        let previous = {
            let mut current = self.current.write().await;
            std::mem::replace(&mut *current, snapshot.clone())
        };
        tracing::info!(
            entries = snapshot.palette.len(),
            previous = previous.palette.len(),
            rejected = snapshot.rejected,
            "Palette replaced"
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatch_match::EntryRecord;

    fn report(ids: &[&str]) -> LoadReport {
        Palette::load(ids.iter().map(|id| EntryRecord::new(*id, "#808080", ["block"])))
    }

    #[tokio::test]
    async fn test_snapshot_returns_loaded_palette() {
        let store = InMemoryPaletteStore::new(report(&["stone", "dirt"]));
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.palette.len(), 2);
        assert_eq!(snapshot.rejected, 0);
    }

    #[tokio::test]
    async fn test_replace_swaps_wholesale() {
        let store = InMemoryPaletteStore::new(report(&["stone", "dirt"]));
        let before = store.snapshot().await;

        let after = store.replace(report(&["sand", "sand"])).await;

        assert_eq!(after.palette.len(), 1);
        assert_eq!(after.rejected, 1);
        assert!(after.loaded_at >= before.loaded_at);
        // Earlier snapshots stay valid and unchanged
        assert!(before.palette.get("stone").is_some());
        assert!(store.snapshot().await.palette.get("stone").is_none());
    }
}
