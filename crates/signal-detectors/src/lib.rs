pub mod aggregator;
pub mod clustering;
pub mod features;
pub mod heuristics;

pub use aggregator::{SignalAggregator, MIN_CONFIDENCE_FLOOR};
pub use clustering::LossClusterDetector;
pub use features::{FeatureBuilder, FeatureTable, TradeFeatures};
pub use heuristics::HeuristicDetector;

use alert_core::PatternCandidate;

/// Uniform contract for every detector: scan a feature table, return zero or
/// more candidates. Insufficient data is an empty result, never an error.
pub trait SignalDetector: Send + Sync {
    fn name(&self) -> &'static str;
    fn scan(&self, features: &FeatureTable) -> Vec<PatternCandidate>;
}
