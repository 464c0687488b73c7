//! Readiness quartile analysis
//!
//! Everything here is a pure function over an immutable dataset snapshot:
//! thresholds are computed once, then every base is bucketed against them.

use std::collections::HashMap;
use tracing::debug;

use crate::config::{AnalyzerConfig, MapVariant, RadiusPolicy, BASE_RADIUS_METERS, RADIUS_DENOMINATOR_FLOOR};
use crate::error::{AnalysisError, Result};
use crate::loader::Dataset;
use crate::models::{
    BaseRecord, Category, CategoryCount, CountryCount, Direction, MapPoint, Summary, Thresholds,
    ViewState,
};

pub const MAP_ZOOM: f64 = 1.3;
pub const MAP_PITCH: f64 = 0.0;

/// Linear-interpolated quantile of an ascending-sorted, non-empty slice.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64)
}

/// 25th/50th/75th percentile of readiness across `records`.
pub fn compute_thresholds(records: &[BaseRecord]) -> Result<Thresholds> {
    if records.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }

    let mut values: Vec<f64> = records.iter().map(|r| r.readiness).collect();
    values.sort_by(|a, b| a.total_cmp(b));

    let thresholds = Thresholds {
        q1: quantile_sorted(&values, 0.25),
        q2: quantile_sorted(&values, 0.50),
        q3: quantile_sorted(&values, 0.75),
    };
    debug!(
        "Thresholds over {} records: q1={:.3} q2={:.3} q3={:.3}",
        values.len(),
        thresholds.q1,
        thresholds.q2,
        thresholds.q3
    );
    Ok(thresholds)
}

/// Bucket a readiness value. Values equal to a threshold land in the lower band.
pub fn categorize(readiness: f64, thresholds: &Thresholds) -> Category {
    thresholds
        .bands()
        .into_iter()
        .find(|(upper, _)| readiness <= *upper)
        .map(|(_, category)| category)
        .unwrap_or(Category::Q4)
}

/// Latitude-scaled display radius in meters: `60000 / (1 + (|lat| - 40) * 0.05)`.
///
/// The denominator reaches zero at |lat| = 20 and goes negative closer to the
/// equator. `RadiusPolicy::Clamped` floors it at `RADIUS_DENOMINATOR_FLOOR`.
pub fn adjusted_radius(latitude: f64, policy: RadiusPolicy) -> f64 {
    let denominator = 1.0 + (latitude.abs() - 40.0) * 0.05;
    match policy {
        RadiusPolicy::Raw => BASE_RADIUS_METERS / denominator,
        RadiusPolicy::Clamped => BASE_RADIUS_METERS / denominator.max(RADIUS_DENOMINATOR_FLOOR),
    }
}

/// Count bases per country on one side of `threshold`, most bases first.
/// Equal counts keep the order in which the country first appeared.
pub fn rank_countries(
    records: &[BaseRecord],
    threshold: f64,
    direction: Direction,
    limit: usize,
) -> Vec<CountryCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CountryCount> = Vec::new();

    for record in records.iter().filter(|r| direction.keeps(r.readiness, threshold)) {
        match index.get(record.country.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(record.country.as_str(), counts.len());
                counts.push(CountryCount {
                    country: record.country.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

fn tooltip(record: &BaseRecord) -> String {
    format!(
        "Base: {}\nCountry: {}\nReadiness: {}",
        record.base_name, record.country, record.readiness
    )
}

/// Thresholds and derived fields for one dataset snapshot
#[derive(Debug, Clone)]
pub struct ReadinessAnalyzer {
    dataset: Dataset,
    config: AnalyzerConfig,
    thresholds: Thresholds,
}

impl ReadinessAnalyzer {
    pub fn new(dataset: Dataset, config: AnalyzerConfig) -> Result<Self> {
        let thresholds = compute_thresholds(dataset.records())?;
        Ok(Self {
            dataset,
            config,
            thresholds,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn category_of(&self, record: &BaseRecord) -> Category {
        categorize(record.readiness, &self.thresholds)
    }

    pub fn radius_for(&self, record: &BaseRecord) -> f64 {
        match self.config.variant {
            MapVariant::Standard => BASE_RADIUS_METERS,
            MapVariant::LatitudeScaled => adjusted_radius(record.latitude, self.config.radius_policy),
        }
    }

    pub fn map_point(&self, record: &BaseRecord) -> MapPoint {
        let category = self.category_of(record);
        MapPoint {
            position: [record.longitude, record.latitude],
            color: category.color(),
            radius: self.radius_for(record),
            category,
            base_name: record.base_name.clone(),
            country: record.country.clone(),
            readiness: record.readiness,
            tooltip: tooltip(record),
        }
    }

    /// Map feed in dataset order
    pub fn map_points(&self) -> Vec<MapPoint> {
        self.dataset.records().iter().map(|r| self.map_point(r)).collect()
    }

    /// Camera centred on the mean base position
    pub fn view_state(&self) -> ViewState {
        let records = self.dataset.records();
        let n = records.len() as f64;
        ViewState {
            latitude: records.iter().map(|r| r.latitude).sum::<f64>() / n,
            longitude: records.iter().map(|r| r.longitude).sum::<f64>() / n,
            zoom: MAP_ZOOM,
            pitch: MAP_PITCH,
        }
    }

    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut counts = [0usize; 4];
        for record in self.dataset.records() {
            counts[self.category_of(record) as usize] += 1;
        }
        Category::ALL
            .iter()
            .zip(counts)
            .map(|(&category, count)| CategoryCount { category, count })
            .collect()
    }

    /// Rank countries on either side of a threshold with an explicit limit
    pub fn rank(&self, direction: Direction, limit: usize) -> Vec<CountryCount> {
        let threshold = match direction {
            Direction::High => self.thresholds.q3,
            Direction::Low => self.thresholds.q1,
        };
        rank_countries(self.dataset.records(), threshold, direction, limit)
    }

    /// Countries with the most bases at or above q3
    pub fn top_countries(&self) -> Vec<CountryCount> {
        self.rank(Direction::High, self.config.rank_limit)
    }

    /// Countries with the most bases at or below q1
    pub fn bottom_countries(&self) -> Vec<CountryCount> {
        self.rank(Direction::Low, self.config.rank_limit)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total_bases: self.dataset.len(),
            thresholds: self.thresholds,
            category_counts: self.category_counts(),
            top_countries: self.top_countries(),
            bottom_countries: self.bottom_countries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(country: &str, readiness: f64) -> BaseRecord {
        BaseRecord::new(format!("{} base", country), country, 45.0, 10.0, readiness)
    }

    fn readiness_only(values: &[f64]) -> Vec<BaseRecord> {
        values.iter().map(|&v| base("X", v)).collect()
    }

    fn analyzer(records: Vec<BaseRecord>, config: AnalyzerConfig) -> ReadinessAnalyzer {
        ReadinessAnalyzer::new(Dataset::new("test", records), config).unwrap()
    }

    #[test]
    fn test_thresholds_linear_interpolation() {
        let t = compute_thresholds(&readiness_only(&[10.0, 20.0, 30.0, 40.0])).unwrap();
        assert_eq!(t, Thresholds { q1: 17.5, q2: 25.0, q3: 32.5 });
    }

    #[test]
    fn test_thresholds_single_record() {
        let t = compute_thresholds(&readiness_only(&[73.0])).unwrap();
        assert_eq!(t, Thresholds { q1: 73.0, q2: 73.0, q3: 73.0 });
    }

    #[test]
    fn test_thresholds_empty_dataset() {
        assert!(matches!(compute_thresholds(&[]), Err(AnalysisError::EmptyDataset)));
    }

    #[test]
    fn test_thresholds_ordered_and_permutation_invariant() {
        let values = [55.0, 91.0, 12.5, 70.0, 70.0, 33.0, 88.0, 64.0, 47.0];
        let forward = compute_thresholds(&readiness_only(&values)).unwrap();
        assert!(forward.q1 <= forward.q2 && forward.q2 <= forward.q3);

        let mut reversed = values;
        reversed.reverse();
        let backward = compute_thresholds(&readiness_only(&reversed)).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward, compute_thresholds(&readiness_only(&values)).unwrap());
    }

    #[test]
    fn test_thresholds_ties() {
        let t = compute_thresholds(&readiness_only(&[50.0, 50.0, 50.0, 50.0, 90.0])).unwrap();
        assert_eq!(t.q1, 50.0);
        assert_eq!(t.q2, 50.0);
        assert_eq!(t.q3, 50.0);
        assert_eq!(categorize(50.0, &t), Category::Q1);
        assert_eq!(categorize(90.0, &t), Category::Q4);
    }

    #[test]
    fn test_categorize_example() {
        let t = Thresholds { q1: 17.5, q2: 25.0, q3: 32.5 };
        assert_eq!(categorize(10.0, &t), Category::Q1);
        assert_eq!(categorize(20.0, &t), Category::Q2);
        assert_eq!(categorize(30.0, &t), Category::Q3);
        assert_eq!(categorize(40.0, &t), Category::Q4);
    }

    #[test]
    fn test_categorize_boundaries_are_lower_inclusive() {
        let t = Thresholds { q1: 17.5, q2: 25.0, q3: 32.5 };
        assert_eq!(categorize(17.5, &t), Category::Q1);
        assert_eq!(categorize(25.0, &t), Category::Q2);
        assert_eq!(categorize(32.5, &t), Category::Q3);
        assert_eq!(categorize(32.500001, &t), Category::Q4);
        assert_eq!(categorize(f64::NEG_INFINITY, &t), Category::Q1);
    }

    #[test]
    fn test_categories_partition_dataset() {
        let values = [3.0, 99.0, 41.0, 41.0, 67.0, 12.0, 80.0, 55.0, 23.0, 71.0, 90.0];
        let analyzer = analyzer(readiness_only(&values), AnalyzerConfig::default());
        let counts = analyzer.category_counts();
        assert_eq!(counts.len(), 4);
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), values.len());
        assert!(counts.iter().all(|c| c.count > 0));
    }

    #[test]
    fn test_adjusted_radius() {
        assert_eq!(adjusted_radius(40.0, RadiusPolicy::Raw), 60_000.0);
        assert_eq!(adjusted_radius(-40.0, RadiusPolicy::Clamped), 60_000.0);
        assert_eq!(adjusted_radius(60.0, RadiusPolicy::Raw), 30_000.0);
        assert_eq!(adjusted_radius(0.0, RadiusPolicy::Raw), -60_000.0);
        assert!(adjusted_radius(20.0, RadiusPolicy::Raw).is_infinite());
    }

    #[test]
    fn test_clamped_radius_is_positive_and_finite() {
        for lat in [-90.0, -45.0, -20.0, -10.0, 0.0, 5.0, 20.0, 25.0, 60.0, 90.0] {
            let r = adjusted_radius(lat, RadiusPolicy::Clamped);
            assert!(r.is_finite() && r > 0.0, "lat {} gave {}", lat, r);
        }
        assert_eq!(adjusted_radius(0.0, RadiusPolicy::Clamped), 60_000.0 / RADIUS_DENOMINATOR_FLOOR);
    }

    #[test]
    fn test_rank_countries_high() {
        let records = vec![base("A", 90.0), base("A", 95.0), base("B", 92.0)];
        let ranked = rank_countries(&records, 90.0, Direction::High, 3);
        assert_eq!(
            ranked,
            vec![
                CountryCount { country: "A".into(), count: 2 },
                CountryCount { country: "B".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_rank_countries_low_ties_keep_first_appearance() {
        let records = vec![
            base("C", 10.0),
            base("B", 5.0),
            base("A", 1.0),
            base("B", 2.0),
            base("A", 3.0),
            base("D", 4.0),
            base("C", 50.0),
        ];
        let ranked = rank_countries(&records, 10.0, Direction::Low, 3);
        let names: Vec<_> = ranked.iter().map(|c| c.country.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(ranked[2].count, 1);
    }

    #[test]
    fn test_rank_countries_no_match() {
        let records = vec![base("A", 10.0)];
        assert!(rank_countries(&records, 50.0, Direction::High, 3).is_empty());
        assert!(rank_countries(&records, 50.0, Direction::Low, 0).is_empty());
    }

    #[test]
    fn test_analyzer_rejects_empty_dataset() {
        let err = ReadinessAnalyzer::new(Dataset::new("empty", vec![]), AnalyzerConfig::default())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyDataset));
    }

    #[test]
    fn test_map_points_follow_variant() {
        let records = vec![
            BaseRecord::new("Thule", "Greenland", 76.53, -68.70, 40.0),
            BaseRecord::new("Diego Garcia", "BIOT", -7.31, 72.41, 90.0),
        ];

        let standard = analyzer(
            records.clone(),
            AnalyzerConfig { variant: MapVariant::Standard, ..AnalyzerConfig::default() },
        );
        assert!(standard.map_points().iter().all(|p| p.radius == BASE_RADIUS_METERS));

        let scaled = analyzer(records, AnalyzerConfig::default());
        let points = scaled.map_points();
        assert_eq!(points[0].position, [-68.70, 76.53]);
        assert_eq!(points[0].category, Category::Q1);
        assert_eq!(points[0].color, Category::Q1.color());
        assert!(points[0].radius < BASE_RADIUS_METERS);
        assert!(points[1].radius > 0.0);
        assert_eq!(points[1].category, Category::Q4);
        assert_eq!(points[1].tooltip, "Base: Diego Garcia\nCountry: BIOT\nReadiness: 90");
    }

    #[test]
    fn test_view_state_is_mean_position() {
        let records = vec![
            BaseRecord::new("a", "A", 10.0, -20.0, 1.0),
            BaseRecord::new("b", "B", 30.0, 40.0, 2.0),
        ];
        let view = analyzer(records, AnalyzerConfig::default()).view_state();
        assert_eq!(view.latitude, 20.0);
        assert_eq!(view.longitude, 10.0);
        assert_eq!(view.zoom, MAP_ZOOM);
    }

    #[test]
    fn test_summary_rankings_use_q3_and_q1() {
        let records = vec![
            base("US", 10.0),
            base("US", 20.0),
            base("Japan", 30.0),
            base("Japan", 40.0),
            base("Germany", 40.0),
        ];
        // q1 = 20, q3 = 40
        let summary = analyzer(records, AnalyzerConfig::default()).summary();
        assert_eq!(summary.total_bases, 5);
        assert_eq!(summary.thresholds.q1, 20.0);
        assert_eq!(summary.thresholds.q3, 40.0);
        assert_eq!(
            summary.top_countries,
            vec![
                CountryCount { country: "Japan".into(), count: 1 },
                CountryCount { country: "Germany".into(), count: 1 },
            ]
        );
        assert_eq!(
            summary.bottom_countries,
            vec![CountryCount { country: "US".into(), count: 2 }]
        );
    }
}
