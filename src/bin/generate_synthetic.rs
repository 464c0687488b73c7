//! Synthetic bases generator
//!
//! Writes a bases CSV in the dashboard input format so the analyzer can be run
//! without the reference dataset. Base sites are drawn from a fixed list of
//! installations; detachments beyond the list get jittered coordinates.
//!
//! Usage:
//!   cargo run --release --bin generate_synthetic -- [OPTIONS]
//!
//! Options:
//!   --count <N>          Number of bases (default: 125)
//!   --mean <F>           Mean readiness (default: 75)
//!   --spread <F>         Readiness spread around the mean (default: 15)
//!   --seed <N>           Random seed for reproducibility (optional)
//!   --output <PATH>      Output CSV path (default: data/USAF_Global_125_Bases.csv)

use anyhow::Result;
use clap::Parser;
use csv::WriterBuilder;
use rand::prelude::*;
use rand::rngs::StdRng;
use readiness_map::config::DEFAULT_DATA_PATH;
use readiness_map::models::CsvRecord;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate_synthetic")]
#[command(about = "Generate a synthetic bases CSV with random readiness")]
struct Args {
    /// Number of base rows to write
    #[arg(long, default_value = "125")]
    count: usize,

    /// Mean readiness score
    #[arg(long, default_value = "75.0")]
    mean: f64,

    /// Maximum deviation from the mean
    #[arg(long, default_value = "15.0")]
    spread: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Output CSV path
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    output: PathBuf,
}

/// (name, country, latitude, longitude)
const SITES: &[(&str, &str, f64, f64)] = &[
    ("Ramstein AB", "Germany", 49.4369, 7.6003),
    ("Spangdahlem AB", "Germany", 49.9727, 6.6925),
    ("RAF Lakenheath", "United Kingdom", 52.4093, 0.5610),
    ("RAF Mildenhall", "United Kingdom", 52.3619, 0.4864),
    ("Aviano AB", "Italy", 46.0319, 12.5965),
    ("Incirlik AB", "Turkey", 37.0021, 35.4259),
    ("Kadena AB", "Japan", 26.3516, 127.7692),
    ("Misawa AB", "Japan", 40.7032, 141.3686),
    ("Yokota AB", "Japan", 35.7485, 139.3485),
    ("Osan AB", "South Korea", 37.0906, 127.0297),
    ("Kunsan AB", "South Korea", 35.9038, 126.6158),
    ("Andersen AFB", "Guam", 13.5840, 144.9300),
    ("Al Udeid AB", "Qatar", 25.1173, 51.3150),
    ("Al Dhafra AB", "United Arab Emirates", 24.2483, 54.5477),
    ("Thule AB", "Greenland", 76.5312, -68.7031),
    ("Lajes Field", "Portugal", 38.7618, -27.0908),
    ("Morón AB", "Spain", 37.1749, -5.6159),
    ("Eielson AFB", "United States", 64.6657, -147.1015),
    ("Elmendorf AFB", "United States", 61.2509, -149.8064),
    ("Nellis AFB", "United States", 36.2360, -115.0343),
    ("Eglin AFB", "United States", 30.4832, -86.5254),
    ("Langley AFB", "United States", 37.0829, -76.3605),
    ("Hickam AFB", "United States", 21.3187, -157.9225),
    ("Diego Garcia", "British Indian Ocean Territory", -7.3133, 72.4111),
    ("RAAF Darwin", "Australia", -12.4147, 130.8770),
];

fn synthetic_site(index: usize, rng: &mut impl Rng) -> (String, String, f64, f64) {
    let (name, country, lat, lon) = SITES[index % SITES.len()];
    let round = index / SITES.len();
    if round == 0 {
        return (name.to_string(), country.to_string(), lat, lon);
    }

    let lat = (lat + rng.gen_range(-0.5..=0.5)).clamp(-90.0, 90.0);
    let lon = (lon + rng.gen_range(-0.5..=0.5)).clamp(-180.0, 180.0);
    (format!("{} Det {}", name, round), country.to_string(), lat, lon)
}

/// Triangular-ish readiness around the mean, bounded to [0, 100]
fn synthetic_readiness(mean: f64, spread: f64, rng: &mut impl Rng) -> f64 {
    let offset = (rng.gen::<f64>() + rng.gen::<f64>() - 1.0) * spread;
    ((mean + offset).clamp(0.0, 100.0) * 10.0).round() / 10.0
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let args = Args::parse();

    println!("🔧 Synthetic Bases Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Output:           {}", args.output.display());
    println!("Bases:            {}", args.count);
    println!("Readiness:        {:.1} ± {:.1}", args.mean, args.spread);
    if let Some(seed) = args.seed {
        println!("Random seed:      {}", seed);
    }
    println!();

    // Initialize RNG
    let mut rng: StdRng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    // Ensure output directory exists
    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(&args.output)?;

    for i in 0..args.count {
        let (base, country, latitude, longitude) = synthetic_site(i, &mut rng);
        writer.serialize(CsvRecord {
            base,
            country,
            latitude,
            longitude,
            readiness: synthetic_readiness(args.mean, args.spread, &mut rng),
        })?;
    }
    writer.flush()?;

    tracing::info!("Wrote {} bases to {}", args.count, args.output.display());

    println!("\n✅ Generation complete!");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Bases written:     {:>8}", args.count);
    println!("Output file:       {}", args.output.display());

    Ok(())
}
