use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AnalysisError, Result};

/// Raw row from the bases CSV
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CsvRecord {
    #[serde(rename = "Base")]
    pub base: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Readiness")]
    pub readiness: f64,
}

/// One base in the loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseRecord {
    pub base_name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub readiness: f64,
}

impl BaseRecord {
    pub fn new(
        base_name: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
        readiness: f64,
    ) -> Self {
        Self {
            base_name: base_name.into(),
            country: country.into(),
            latitude,
            longitude,
            readiness,
        }
    }
}

impl CsvRecord {
    /// Validate the row and convert it. `line` is only used for error reporting.
    pub fn to_base_record(&self, line: u64) -> Result<BaseRecord> {
        let invalid = |reason: String| AnalysisError::InvalidRecord { line, reason };

        if !self.readiness.is_finite() {
            return Err(invalid(format!("readiness is not a number: {}", self.readiness)));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(invalid(format!("latitude out of range: {}", self.latitude)));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(invalid(format!("longitude out of range: {}", self.longitude)));
        }

        Ok(BaseRecord {
            base_name: self.base.trim().to_string(),
            country: self.country.trim().to_string(),
            latitude: self.latitude,
            longitude: self.longitude,
            readiness: self.readiness,
        })
    }
}

/// Display color as an RGB triple, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [u8; 3]);

pub const RED: Rgb = Rgb([255, 0, 0]);
pub const ORANGE: Rgb = Rgb([255, 165, 0]);
pub const YELLOW: Rgb = Rgb([255, 255, 0]);
pub const GREEN: Rgb = Rgb([0, 200, 0]);

/// Readiness quartile a base falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Q1, Category::Q2, Category::Q3, Category::Q4];

    pub fn color(self) -> Rgb {
        match self {
            Category::Q1 => RED,
            Category::Q2 => ORANGE,
            Category::Q3 => YELLOW,
            Category::Q4 => GREEN,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Q1 => "Critically low readiness",
            Category::Q2 => "Below average",
            Category::Q3 => "Above average",
            Category::Q4 => "Highest readiness",
        }
    }

    pub fn swatch(self) -> &'static str {
        match self {
            Category::Q1 => "🟥",
            Category::Q2 => "🟧",
            Category::Q3 => "🟨",
            Category::Q4 => "🟩",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Q1 => "Q1",
            Category::Q2 => "Q2",
            Category::Q3 => "Q3",
            Category::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q1" => Ok(Category::Q1),
            "Q2" => Ok(Category::Q2),
            "Q3" => Ok(Category::Q3),
            "Q4" => Ok(Category::Q4),
            other => Err(format!("Unknown category '{}'. Valid: Q1, Q2, Q3, Q4", other)),
        }
    }
}

/// Side of a threshold to keep when ranking countries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// `readiness >= threshold`
    High,
    /// `readiness <= threshold`
    Low,
}

impl Direction {
    pub fn keeps(self, readiness: f64, threshold: f64) -> bool {
        match self {
            Direction::High => readiness >= threshold,
            Direction::Low => readiness <= threshold,
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Direction::High),
            "low" => Ok(Direction::Low),
            other => Err(format!("Unknown direction '{}'. Valid: high, low", other)),
        }
    }
}

/// 25th, 50th and 75th percentile of readiness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl Thresholds {
    /// Ordered `(inclusive upper bound, category)` bands; anything above the
    /// last band is Q4.
    pub fn bands(&self) -> [(f64, Category); 3] {
        [
            (self.q1, Category::Q1),
            (self.q2, Category::Q2),
            (self.q3, Category::Q3),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

/// Per-base record handed to the map renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    /// `[longitude, latitude]`
    pub position: [f64; 2],
    pub color: Rgb,
    pub radius: f64,
    pub category: Category,
    pub base_name: String,
    pub country: String,
    pub readiness: f64,
    pub tooltip: String,
}

/// Initial camera for the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Page-level summary: thresholds, quartile sizes and the two rankings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_bases: usize,
    pub thresholds: Thresholds,
    pub category_counts: Vec<CategoryCount>,
    pub top_countries: Vec<CountryCount>,
    pub bottom_countries: Vec<CountryCount>,
}
