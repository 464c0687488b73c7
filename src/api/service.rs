//! Shared business logic for the dashboard API
//!
//! Wraps one analyzer built at startup; handlers only read from it.

use std::sync::Arc;

use crate::analyzer::ReadinessAnalyzer;
use crate::models::{Category, CountryCount, Direction, MapPoint, Summary, Thresholds, ViewState};

#[derive(Debug, Clone)]
pub struct DashboardService {
    analyzer: Arc<ReadinessAnalyzer>,
}

impl DashboardService {
    pub fn new(analyzer: ReadinessAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }

    pub fn analyzer(&self) -> &ReadinessAnalyzer {
        &self.analyzer
    }

    pub fn summary(&self) -> Summary {
        self.analyzer.summary()
    }

    pub fn thresholds(&self) -> Thresholds {
        self.analyzer.thresholds()
    }

    pub fn view_state(&self) -> ViewState {
        self.analyzer.view_state()
    }

    /// Map feed, optionally restricted to one quartile
    pub fn bases(&self, category: Option<Category>, limit: usize) -> Vec<MapPoint> {
        self.analyzer
            .map_points()
            .into_iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .take(limit)
            .collect()
    }

    pub fn rankings(&self, direction: Direction, limit: Option<usize>) -> Vec<CountryCount> {
        let limit = limit.unwrap_or(self.analyzer.config().rank_limit);
        self.analyzer.rank(direction, limit)
    }
}
