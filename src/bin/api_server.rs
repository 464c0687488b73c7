//! REST API Server for the readiness dashboard
//!
//! Usage:
//!   ./target/release/api_server [options]
//!
//! Options:
//!   --port PORT              Port to listen on (default: 8080)
//!   --data PATH              Bases CSV (default: data/USAF_Global_125_Bases.csv)
//!   --variant VARIANT        standard | latitude-scaled
//!   --radius-policy POLICY   clamped | raw
//!   --limit N                Countries per ranking (default: 3)
//!
//! REST endpoints:
//!   GET /api/v1/health       - Health check
//!   GET /api/v1/summary      - Thresholds, quartile counts, rankings
//!   GET /api/v1/thresholds   - q1/q2/q3
//!   GET /api/v1/view         - Initial map camera
//!   GET /api/v1/bases        - Map feed (?category=Q1&limit=N)
//!   GET /api/v1/rankings     - Country ranking (?direction=high|low&limit=N)

use anyhow::{Context, Result};
use clap::Parser;
use readiness_map::api::{create_router, DashboardService};
use readiness_map::config::{DEFAULT_DATA_PATH, DEFAULT_RANK_LIMIT};
use readiness_map::{load_dataset, AnalyzerConfig, MapVariant, RadiusPolicy, ReadinessAnalyzer};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "api_server")]
#[command(about = "Serve the readiness map feed as JSON")]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Bases CSV
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    #[arg(long, value_enum, default_value_t = MapVariant::LatitudeScaled)]
    variant: MapVariant,

    #[arg(long, value_enum, default_value_t = RadiusPolicy::Clamped)]
    radius_policy: RadiusPolicy,

    /// Countries per ranking
    #[arg(long, default_value_t = DEFAULT_RANK_LIMIT)]
    limit: usize,
}

fn print_banner(port: u16, bases: usize) {
    println!("============================================================");
    println!("         READINESS MAP API SERVER");
    println!("============================================================");
    println!();
    println!("  Port:     {}", port);
    println!("  REST:     http://localhost:{}/api/v1/", port);
    println!("  Bases:    {}", bases);
    println!();
    println!("REST Endpoints:");
    println!("  GET /api/v1/health              Health check");
    println!("  GET /api/v1/summary             Quartile summary");
    println!("  GET /api/v1/thresholds          q1/q2/q3");
    println!("  GET /api/v1/view                Map camera");
    println!("  GET /api/v1/bases               Map feed");
    println!("  GET /api/v1/rankings            Country rankings");
    println!("============================================================");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .init();

    let args = Args::parse();

    let dataset = load_dataset(&args.data)
        .with_context(|| format!("failed to load bases from {}", args.data.display()))?;
    let analyzer = ReadinessAnalyzer::new(
        dataset,
        AnalyzerConfig {
            variant: args.variant,
            radius_policy: args.radius_policy,
            rank_limit: args.limit,
        },
    )?;

    print_banner(args.port, analyzer.dataset().len());

    let service = DashboardService::new(analyzer);
    let app = create_router(service);

    let addr: SocketAddr = format!("0.0.0.0:{}", args.port).parse()?;
    tracing::info!("Starting REST server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
