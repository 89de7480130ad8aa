//! Asset loading with embedded fallbacks
//!
//! Two assets exist: the application config and the palette file. Each
//! follows the same rules:
//!
//! - If its env var is NOT set: use the embedded copy only (no filesystem access)
//! - If its env var IS set and the file is missing: seed it from the embedded copy
//! - If its env var IS set and the file exists: read the file

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Embedded default palette
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "palette.json"]
struct EmbeddedPalette;

const CONFIG_NAME: &str = "config.yaml";
const PALETTE_NAME: &str = "palette.json";

/// Report of seeding operations
#[derive(Debug, Default)]
pub struct SeedReport {
    pub config_seeded: bool,
    pub palette_seeded: bool,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        !self.config_seeded && !self.palette_seeded
    }
}

/// Where an asset is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Embedded,
    File(PathBuf),
    /// Path configured but nothing there yet; the embedded copy is used
    Missing(PathBuf),
}

impl std::fmt::Display for AssetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetSource::Embedded => write!(f, "embedded"),
            AssetSource::File(path) => write!(f, "{}", path.display()),
            AssetSource::Missing(path) => {
                write!(f, "embedded ({} not found)", path.display())
            }
        }
    }
}

/// Asset loader with optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
    /// External palette file path (from PALETTE_FILE env var)
    palette_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the corresponding env var was set.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(config_file: Option<PathBuf>, palette_file: Option<PathBuf>) -> Self {
        Self {
            config_file,
            palette_file,
        }
    }

    /// Build from `CONFIG_FILE` and `PALETTE_FILE`
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("CONFIG_FILE").ok().map(PathBuf::from),
            std::env::var("PALETTE_FILE").ok().map(PathBuf::from),
        )
    }

    /// External palette path, if one is configured
    pub fn palette_path(&self) -> Option<&Path> {
        self.palette_file.as_deref()
    }

    pub fn config_source(&self) -> AssetSource {
        Self::source_of(self.config_file.as_deref())
    }

    pub fn palette_source(&self) -> AssetSource {
        Self::source_of(self.palette_file.as_deref())
    }

    fn source_of(path: Option<&Path>) -> AssetSource {
        match path {
            None => AssetSource::Embedded,
            Some(p) if p.exists() => AssetSource::File(p.to_path_buf()),
            Some(p) => AssetSource::Missing(p.to_path_buf()),
        }
    }

    fn read_with_fallback<E: RustEmbed>(
        path: Option<&Path>,
        name: &str,
    ) -> io::Result<Cow<'static, [u8]>> {
        if let Some(path) = path {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading {name} from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        E::get(name)
            .map(|f| {
                tracing::trace!("Loading {name} from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("Embedded {name} not found"))
            })
    }

    fn into_string(bytes: Cow<'static, [u8]>) -> io::Result<String> {
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        Self::read_with_fallback::<EmbeddedConfig>(self.config_file.as_deref(), CONFIG_NAME)
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        Self::into_string(self.read_config()?)
    }

    /// Read the palette file, external first, embedded otherwise
    pub fn read_palette(&self) -> io::Result<Cow<'static, [u8]>> {
        Self::read_with_fallback::<EmbeddedPalette>(self.palette_file.as_deref(), PALETTE_NAME)
    }

    pub fn read_palette_string(&self) -> io::Result<String> {
        Self::into_string(self.read_palette()?)
    }

    /// Write the embedded copy to `path` unless something is already there
    fn seed<E: RustEmbed>(path: &Path, name: &str) -> io::Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        match E::get(name) {
            Some(data) => {
                fs::write(path, &*data.data)?;
                tracing::info!(path = %path.display(), "Seeded {name} with embedded default");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Seed missing files with embedded assets
    ///
    /// Only operates on paths that were configured (env var was set).
    pub fn seed_if_configured(&self) -> io::Result<SeedReport> {
        let mut report = SeedReport::default();

        if let Some(ref path) = self.config_file {
            report.config_seeded = Self::seed::<EmbeddedConfig>(path, CONFIG_NAME)?;
        }
        if let Some(ref path) = self.palette_file {
            report.palette_seeded = Self::seed::<EmbeddedPalette>(path, PALETTE_NAME)?;
        }

        Ok(report)
    }
}
