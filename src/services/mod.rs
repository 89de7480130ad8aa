pub mod file_watcher;
pub mod palette_loader;
pub mod palette_store;
pub mod tagger;

pub use file_watcher::{spawn_palette_reloader, FileChangeEvent, FileWatcher};
pub use palette_loader::PaletteLoader;
pub use palette_store::{InMemoryPaletteStore, PaletteProvider, PaletteSnapshot};
pub use tagger::TagClassifier;
