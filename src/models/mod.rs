pub mod config;
pub mod palette_record;

pub use config::{
    AppConfig, KeywordRule, MatchingConfig, OverrideRule, PaletteConfig, PatternMode,
    SamplingConfig, TaggingConfig,
};
pub use palette_record::PaletteRecord;
