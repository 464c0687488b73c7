//! Readiness dashboard for the terminal
//!
//! Run: ./target/release/readiness_map [--data PATH] [--variant latitude-scaled] [--show-bases]

use anyhow::{Context, Result};
use clap::Parser;
use readiness_map::config::{DEFAULT_DATA_PATH, DEFAULT_RANK_LIMIT};
use readiness_map::{load_dataset, report, AnalyzerConfig, MapVariant, RadiusPolicy, ReadinessAnalyzer};
use std::path::PathBuf;
use tracing::info;

/// Quartile summary and country rankings for the global base readiness map
#[derive(Parser, Debug)]
#[command(name = "readiness_map")]
#[command(about = "Global mission readiness quartile summary")]
struct Args {
    /// Bases CSV (Base, Country, Latitude, Longitude, Readiness)
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Map variant used for the per-base radius
    #[arg(long, value_enum, default_value_t = MapVariant::LatitudeScaled)]
    variant: MapVariant,

    /// How to handle the latitude radius singularity
    #[arg(long, value_enum, default_value_t = RadiusPolicy::Clamped)]
    radius_policy: RadiusPolicy,

    /// Countries listed per ranking
    #[arg(long, default_value_t = DEFAULT_RANK_LIMIT)]
    limit: usize,

    /// Print the per-base map table
    #[arg(long)]
    show_bases: bool,

    /// Emit the summary and map feed as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let dataset = load_dataset(&args.data)
        .with_context(|| format!("failed to load bases from {}", args.data.display()))?;
    let config = AnalyzerConfig {
        variant: args.variant,
        radius_policy: args.radius_policy,
        rank_limit: args.limit,
    };
    let analyzer = ReadinessAnalyzer::new(dataset, config)?;
    info!("Analyzing {} bases ({:?})", analyzer.dataset().len(), config.variant);

    if args.json {
        let output = serde_json::json!({
            "summary": analyzer.summary(),
            "view": analyzer.view_state(),
            "bases": analyzer.map_points(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let title = match config.variant {
        MapVariant::Standard => "GLOBAL MISSION READINESS MAP",
        MapVariant::LatitudeScaled => "GLOBAL MISSION READINESS MAP (SCALED RADIUS)",
    };
    println!("\n{}", "█".repeat(70));
    println!("  {}", title);
    println!("{}", "█".repeat(70));

    let view = analyzer.view_state();
    println!(
        "\n  Map centre: {:.2}°, {:.2}° (zoom {})",
        view.latitude, view.longitude, view.zoom
    );

    print!("{}", report::render_summary(&analyzer.summary()));

    if args.show_bases {
        print!("{}", report::section_header("BASES"));
        print!("{}", report::render_map_table(&analyzer.map_points()));
    }

    println!("\n{}", "█".repeat(70));
    Ok(())
}
