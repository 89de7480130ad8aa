use crate::assets::AssetLoader;
use serde::{Deserialize, Deserializer};
use swatch_match::{DistanceMetric, DEFAULT_MATCH_COUNT, DEFAULT_POINTER_SIZE, MIN_SELECTION_AREA};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Palette source settings
    #[serde(default)]
    pub palette: PaletteConfig,

    /// Defaults for match queries
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Region sampling settings
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Rules for deriving tags from swatch ids
    #[serde(default)]
    pub tagging: TaggingConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PaletteConfig {
    /// Image reference for entries without one; `{id}` is replaced
    #[serde(default)]
    pub image_url_template: Option<String>,
}

impl PaletteConfig {
    pub fn image_for(&self, id: &str) -> Option<String> {
        self.image_url_template
            .as_ref()
            .map(|template| template.replace("{id}", id))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MatchingConfig {
    #[serde(default = "default_count")]
    pub default_count: usize,

    #[serde(default, deserialize_with = "deserialize_metric")]
    pub metric: DistanceMetric,

    /// Tag ranked separately by split queries
    #[serde(default = "default_primary_tag")]
    pub primary_tag: String,
}

fn default_count() -> usize {
    DEFAULT_MATCH_COUNT
}

fn default_primary_tag() -> String {
    "block".to_string()
}

fn deserialize_metric<'de, D>(deserializer: D) -> Result<DistanceMetric, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            metric: DistanceMetric::default(),
            primary_tag: default_primary_tag(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SamplingConfig {
    /// Side of the box sampled around a pointer
    #[serde(default = "default_pointer_size")]
    pub pointer_size: usize,

    /// Drag selections at or below this area count as clicks
    #[serde(default = "default_min_selection_area")]
    pub min_selection_area: usize,

    /// Upper bound for `/api/sample` request bodies
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_pointer_size() -> usize {
    DEFAULT_POINTER_SIZE
}

fn default_min_selection_area() -> usize {
    MIN_SELECTION_AREA
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            pointer_size: default_pointer_size(),
            min_selection_area: default_min_selection_area(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// How an override pattern is compared with an id
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PatternMode {
    #[default]
    Contains,
    Exact,
}

/// Fixed tags for ids matching `pattern`; the first matching override wins
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct OverrideRule {
    pub pattern: String,
    #[serde(default)]
    pub mode: PatternMode,
    pub tags: Vec<String>,
}

impl OverrideRule {
    fn new(pattern: &str, mode: PatternMode, tag: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            mode,
            tags: vec![tag.to_string()],
        }
    }
}

/// `tag` applies to every id containing one of `words`
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub tag: String,
    pub words: Vec<String>,
}

impl KeywordRule {
    fn new(tag: &str, words: &[&str]) -> Self {
        Self {
            tag: tag.to_string(),
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TaggingConfig {
    /// Tag for ids no rule matched
    pub default_tag: String,
    pub overrides: Vec<OverrideRule>,
    pub keywords: Vec<KeywordRule>,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            default_tag: "block".to_string(),
            overrides: vec![
                OverrideRule::new("mushroom_block", PatternMode::Contains, "block"),
                OverrideRule::new("bedrock", PatternMode::Contains, "block"),
                OverrideRule::new("bamboo", PatternMode::Exact, "vertical"),
                OverrideRule::new("chain_", PatternMode::Contains, "decoration"),
            ],
            keywords: vec![
                KeywordRule::new(
                    "vertical",
                    &[
                        "fence", "sign", "_shelf", "trapdoor", "pane", "wall", "banner",
                        "candle", "bars", "chain", "rod",
                    ],
                ),
                KeywordRule::new(
                    "horizontal",
                    &[
                        "trapdoor", "bed", "carpet", "fan", "cake", "campfire", "chain",
                        "detector", "frame", "rod",
                    ],
                ),
                KeywordRule::new(
                    "translucent",
                    &["leaves", "glass", "cobweb", "grate", "spawner", "vault"],
                ),
                KeywordRule::new(
                    "decoration",
                    &[
                        "sapling", "allium", "cluster", "anvil", "azalea", "azure", "shoot",
                        "beacon", "roots", "bell", "dripleaf", "glazed", "box", "orchid",
                        "bookshelf", "coral", "stand", "brown_mushroom", "red_mushroom", "bush",
                        "cactus", "sensor", "carrots", "cauldron", "vines", "command", "chest",
                        "flower", "plant", "eyeblossom", "_ore", "cocoa", "conduit", "golem",
                        "lantern", "torch", "craft", "fungus", "dandelion", "pot", "dispenser",
                        "egg", "ghast", "dropper", "table", "fern", "frogspawn", "lichen",
                        "grindstone", "core", "hopper", "ladder", "jigsaw", "_bud", "litter",
                        "lectern", "lilac", "lily", "propagule", "melon_stem", "pumpkin_stem",
                        "sprouts", "wart_stage", "observer", "tulip", "oxeye", "hanging_moss",
                        "peony", "petals", "pitcher", "pointed", "poppy", "comparator",
                        "repeater", "clump", "scaffolding", "catalyst", "shrieker", "vein",
                        "pickle", "grass", "blossom", "stonecutter", "structure", "cane",
                        "target", "test", "tnt", "tripwire", "wheat", "rose",
                    ],
                ),
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        metric = %config.matching.metric,
                        default_count = config.matching.default_count,
                        overrides = config.tagging.overrides.len(),
                        keyword_rules = config.tagging.keywords.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}
