//! Dashboard configuration shared by the binaries

use clap::ValueEnum;
use serde::Serialize;

/// Radius used for every base when the map is not latitude-scaled
pub const BASE_RADIUS_METERS: f64 = 60_000.0;

/// Lower bound for the denominator of the latitude-scaled radius formula
pub const RADIUS_DENOMINATOR_FLOOR: f64 = 0.05;

/// Number of countries listed in each ranking
pub const DEFAULT_RANK_LIMIT: usize = 3;

pub const DEFAULT_DATA_PATH: &str = "data/USAF_Global_125_Bases.csv";

/// Which dashboard flavour to compute the map feed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MapVariant {
    /// Fixed radius for every base
    Standard,
    /// Radius scaled by latitude to offset projection stretch
    #[default]
    LatitudeScaled,
}

/// How the latitude-scaled radius treats the formula's singularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RadiusPolicy {
    /// Floor the denominator at `RADIUS_DENOMINATOR_FLOOR` so radii stay positive
    #[default]
    Clamped,
    /// Apply the formula as-is; can yield infinite or negative radii
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalyzerConfig {
    pub variant: MapVariant,
    pub radius_policy: RadiusPolicy,
    pub rank_limit: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            variant: MapVariant::default(),
            radius_policy: RadiusPolicy::default(),
            rank_limit: DEFAULT_RANK_LIMIT,
        }
    }
}
