use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trailhead::config::{self, WorldConfig};
use trailhead::errors::TrailheadResult;
use trailhead::routes::{Difficulty, RouteEstimate, recommend_day_hikes};
use trailhead::{NameTheme, WorldGenerator};

mod worldgen {
    pub mod cli_utils;
    pub mod summary;
}

use worldgen::cli_utils::*;
use worldgen::summary::{print_day_hikes, print_route, print_world_summary};

#[derive(Parser, Clone, Default)]
#[command(name = "worldgen")]
#[command(about = "Generate a mountain world with lakes, peaks, campsites and trails")]
struct Args {
    /// Terrain size in grid cells (format: WIDTHxHEIGHT)
    #[arg(long)]
    size: Option<String>,

    /// Random seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// Lake count range as min,max (e.g., "2,4")
    #[arg(long)]
    lakes: Option<String>,

    /// Maximum number of named peaks
    #[arg(long)]
    max_peaks: Option<u32>,

    /// Settlement count range as min,max (e.g., "6,8")
    #[arg(long)]
    settlements: Option<String>,

    /// Name theme (earth, futuristic)
    #[arg(long)]
    theme: Option<String>,

    /// TOML config file; defaults to the user config when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings back to the user config file
    #[arg(long)]
    save_config: bool,

    /// Output world file path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Trail query between two cells (format: X,Y:X,Y)
    #[arg(long)]
    path: Option<String>,

    /// Route grade used for trail mileage (easy, moderate, difficult, expert)
    #[arg(long, default_value = "moderate")]
    difficulty: String,
}

/// Layer command-line overrides on top of the loaded config
fn build_config(args: &Args) -> TrailheadResult<WorldConfig> {
    let mut world_config = match &args.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config(),
    };

    if let Some(size) = &args.size {
        let (width, height) = parse_size(size)?;
        world_config.terrain.width = width;
        world_config.terrain.height = height;
    }
    if let Some(lakes) = &args.lakes {
        let (min, max) = parse_count_range(lakes)?;
        world_config.hydrology.min_lakes = min;
        world_config.hydrology.max_lakes = max;
    }
    if let Some(max_peaks) = args.max_peaks {
        world_config.orography.max_peaks = max_peaks;
    }
    if let Some(settlements) = &args.settlements {
        let (min, max) = parse_count_range(settlements)?;
        world_config.settlements.min_count = min;
        world_config.settlements.max_count = max;
    }
    if let Some(theme) = &args.theme {
        world_config.theme = theme.parse::<NameTheme>()?;
    }

    Ok(world_config)
}

fn main() -> TrailheadResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Parse and validate all CLI arguments before generating anything
    let world_config = build_config(&args)?;
    let difficulty = args.difficulty.parse::<Difficulty>()?;
    let path_query = args.path.as_deref().map(parse_path_query).transpose()?;
    let seed = args.seed.unwrap_or_else(rand::random);

    if args.save_config {
        config::save_config(&world_config)?;
        info!("Saved settings to the user config");
    }

    let world = WorldGenerator::new(world_config).generate(seed)?;

    if let Some(output) = &args.output {
        world.save_to_file(output)?;
    }
    print_world_summary(&world, args.output.as_deref());
    print_day_hikes(&recommend_day_hikes(
        &world.settlements,
        &world.lakes,
        &world.peaks,
    ));

    if let Some((start, goal)) = path_query {
        let route = RouteEstimate::plan(&world, start, goal, difficulty)?;
        print_route(&route);
    }

    Ok(())
}
