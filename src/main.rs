use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use swatch_match::{
    find_closest, find_split, DistanceMetric, Hsl, Hsv, Lab, Lch, MatchQuery, MatchResult, Rgb,
    SplitQuery, TagFilters,
};
use swatchpick::api;
use swatchpick::assets::AssetLoader;
use swatchpick::models::AppConfig;
use swatchpick::server;
use swatchpick::services::{spawn_palette_reloader, FileWatcher, PaletteLoader};

#[derive(Parser)]
#[command(name = "swatchpick")]
#[command(about = "Swatchpick - match sampled colors against a reference palette")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Rank palette entries by distance to a color
    Match {
        /// Target color as hex (e.g. "#A2834F" or "a2834f")
        hex: String,

        /// Number of matches (configured default if omitted)
        #[arg(short, long)]
        count: Option<usize>,

        /// Only rank entries carrying this tag; with --split, the primary tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Keep only entries with this tag (repeatable)
        #[arg(long)]
        include: Vec<String>,

        /// Drop entries with this tag (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Distance metric: "ciede2000" or "rgb"
        #[arg(short, long)]
        metric: Option<DistanceMetric>,

        /// Print primary-tag entries and everything else as two lists
        /// (primary tag from --tag, else the configured one)
        #[arg(long)]
        split: bool,
    },
    /// Show a color as hex, RGB, HSL, HSV, Lab and Lch
    Convert {
        /// Color as hex
        hex: String,
    },
    /// Summarize the loaded palette
    Palette {
        /// List every entry
        #[arg(long)]
        entries: bool,

        /// Only list entries carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Show the tags the classifier derives for swatch ids
    Classify {
        /// Swatch identifiers (e.g. "oak_fence")
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Swatchpick API",
        description = "Perceptual color sampling and palette matching",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_palette,
        api::handle_palette_entry,
        api::handle_reload,
        api::handle_match,
        api::handle_split,
        api::handle_sample,
        api::handle_convert,
    ),
    components(schemas(
        api::ColorDto,
        api::SwatchDto,
        api::PaletteResponse,
        api::ReloadResponse,
        api::MatchRequest,
        api::MatchResponse,
        api::MatchDto,
        api::SplitRequest,
        api::SplitResponse,
        api::SampleRequest,
        api::SampleResponse,
        api::PixelFormat,
        api::RegionDto,
        api::PointDto,
        api::DragDto,
    )),
    tags(
        (name = "Palette", description = "Reference palette inspection and reload"),
        (name = "Matching", description = "Closest palette entries for a color"),
        (name = "Sampling", description = "Average a pixel region and match it"),
        (name = "Colors", description = "Color space conversion")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Match {
            hex,
            count,
            tag,
            include,
            exclude,
            metric,
            split,
        }) => run_match_command(&hex, count, tag, &include, &exclude, metric, split),
        Some(Commands::Convert { hex }) => run_convert_command(&hex),
        Some(Commands::Palette { entries, tag }) => run_palette_command(entries, tag.as_deref()),
        Some(Commands::Classify { ids }) => run_classify_command(&ids),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swatchpick=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Config and palette loader for one-shot commands
fn load_cli_context() -> (Arc<AppConfig>, PaletteLoader) {
    let asset_loader = Arc::new(AssetLoader::from_env());
    let config = Arc::new(AppConfig::load_from_assets(&asset_loader));
    let loader = PaletteLoader::new(asset_loader, &config);
    (config, loader)
}

fn print_matches(matches: &[MatchResult<'_>], metric: DistanceMetric) {
    if matches.is_empty() {
        println!("  (no matching entries)");
        return;
    }
    let width = matches
        .iter()
        .map(|m| m.entry.id().len())
        .max()
        .unwrap_or(0);
    for m in matches {
        let tags: Vec<&str> = m.entry.tags().iter().map(|t| t.as_str()).collect();
        println!(
            "  {:>2}. {:<width$}  {}  {} {:>6.2}  [{}]",
            m.rank + 1,
            m.entry.id(),
            m.entry.hex(),
            metric,
            m.distance,
            tags.join(", "),
        );
    }
}

/// Rank the palette against one color (no server needed)
fn run_match_command(
    hex: &str,
    count: Option<usize>,
    tag: Option<String>,
    include: &[String],
    exclude: &[String],
    metric: Option<DistanceMetric>,
    split: bool,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let rgb: Rgb = hex.parse()?;
    let target = Lab::from(rgb);
    let (config, loader) = load_cli_context();
    let palette = loader.load()?.palette;

    let filters = include
        .iter()
        .fold(TagFilters::new(), |f, t| f.include(t.as_str()));
    let filters = exclude.iter().fold(filters, |f, t| f.exclude(t.as_str()));
    let count = count.unwrap_or(config.matching.default_count);
    let metric = metric.unwrap_or(config.matching.metric);

    println!("Target {} ({} entries in palette)\n", rgb, palette.len());

    if split {
        let query = SplitQuery::new()
            .count(count)
            .primary_tag(split_primary_tag(tag.as_deref(), &config))
            .filters(filters)
            .metric(metric);
        let result = find_split(target, &palette, &query);
        println!("Primary ({}):", query.primary_tag);
        print_matches(&result.primary, metric);
        println!("\nOther:");
        print_matches(&result.secondary, metric);
    } else {
        let mut query = MatchQuery::new().count(count).filters(filters).metric(metric);
        if let Some(tag) = tag {
            query = query.required_tag(tag);
        }
        print_matches(&find_closest(target, &palette, &query), metric);
    }

    Ok(())
}

fn split_primary_tag<'a>(tag: Option<&'a str>, config: &'a AppConfig) -> &'a str {
    tag.unwrap_or(config.matching.primary_tag.as_str())
}

/// Print a color in every representation
fn run_convert_command(hex: &str) -> anyhow::Result<()> {
    let rgb: Rgb = hex.parse()?;
    let lab = Lab::from(rgb);
    let lch = Lch::from(lab);
    let (h, s, l) = Hsl::from(rgb).rounded();
    let (hv, sv, v) = Hsv::from(rgb).rounded();

    println!("Hex: {rgb}");
    println!("RGB: {}, {}, {}", rgb.r, rgb.g, rgb.b);
    println!("HSL: {h}°, {s}%, {l}%");
    println!("HSV: {hv}°, {sv}%, {v}%");
    println!("Lab: {:.2}, {:.2}, {:.2}", lab.l, lab.a, lab.b);
    println!("Lch: {:.2}, {:.2}, {:.1}°", lch.l, lch.c, lch.h);

    Ok(())
}

/// Summarize the palette source and its tags
fn run_palette_command(entries: bool, tag: Option<&str>) -> anyhow::Result<()> {
    init_cli_tracing();

    let source = AssetLoader::from_env().palette_source();
    let (_, loader) = load_cli_context();
    let report = loader.load()?;
    let palette = &report.palette;

    println!("Palette: {source}");
    println!("  {} entries, {} rejected", palette.len(), report.rejected.len());
    for rejected in &report.rejected {
        println!("  ! {rejected}");
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in palette {
        for t in entry.tags() {
            *counts.entry(t.as_str()).or_default() += 1;
        }
    }
    println!("\nTags:");
    for t in palette.tags() {
        println!("  {:<14} {}", t.as_str(), counts.get(t.as_str()).copied().unwrap_or(0));
    }

    if entries || tag.is_some() {
        println!("\nEntries:");
        for entry in palette.iter().filter(|e| tag.map_or(true, |t| e.has_tag(t))) {
            let tags: Vec<&str> = entry.tags().iter().map(|t| t.as_str()).collect();
            println!("  {}  {}  [{}]", entry.hex(), entry.id(), tags.join(", "));
        }
    }

    Ok(())
}

/// Show derived tags for swatch ids
fn run_classify_command(ids: &[String]) -> anyhow::Result<()> {
    init_cli_tracing();

    let (_, loader) = load_cli_context();

    for id in ids {
        let tags: Vec<String> = loader
            .classifier()
            .classify(id)
            .into_iter()
            .map(|t| t.to_string())
            .collect();
        println!("{id}: {}", tags.join(", "));
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Read environment variables
    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let palette_file = std::env::var("PALETTE_FILE").ok();

    println!("Swatchpick v{VERSION}");
    println!("Perceptual color sampling and palette matching\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR    = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE  = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  PALETTE_FILE = {}",
        palette_file.as_deref().unwrap_or("(not set)")
    );

    let loader = AssetLoader::from_env();
    println!("\nAsset Sources:");
    println!("  Config:  {}", loader.config_source());
    println!("  Palette: {}", loader.palette_source());

    println!("\nCommands:");
    println!("  swatchpick serve       Start the HTTP server");
    println!("  swatchpick match       Rank palette entries for a color");
    println!("  swatchpick convert     Show a color in every color space");
    println!("  swatchpick palette     Summarize the palette");
    println!("  swatchpick classify    Show derived tags for swatch ids");
    println!("\nRun 'swatchpick --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swatchpick=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    tracing::info!(
        config = %asset_loader.config_source(),
        palette = %asset_loader.palette_source(),
        "Asset sources configured"
    );

    // Seed configured paths that do not exist yet
    match asset_loader.seed_if_configured() {
        Ok(report) if !report.is_empty() => {
            tracing::info!(
                config = report.config_seeded,
                palette = report.palette_seeded,
                "Seeded missing files with embedded assets"
            );
        }
        Err(e) => {
            tracing::warn!(%e, "Failed to seed assets");
        }
        _ => {}
    }

    let palette_path = asset_loader.palette_path().map(|p| p.to_path_buf());
    let state = server::create_app_state(asset_loader)?;

    // Reload the palette when its file changes
    let watcher = Arc::new(FileWatcher::new(palette_path));
    if watcher.is_active() {
        spawn_palette_reloader(
            watcher,
            state.palette_loader.clone(),
            state.palette_store.clone(),
        );
        tracing::info!("Palette file watcher active");
    } else {
        tracing::debug!("Palette file watcher not active - set PALETTE_FILE to enable reload on change");
    }

    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Swatchpick server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_uses_tag_as_primary() {
        let cli = Cli::try_parse_from([
            "swatchpick", "match", "#7d7d7d", "--split", "--tag", "vertical",
        ])
        .unwrap();
        let Some(Commands::Match { tag, split, .. }) = cli.command else {
            panic!("expected match command");
        };
        assert!(split);

        let config = AppConfig::default();
        assert_eq!(split_primary_tag(tag.as_deref(), &config), "vertical");
        assert_eq!(split_primary_tag(None, &config), config.matching.primary_tag);
    }
}
