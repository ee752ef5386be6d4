use alert_core::{PatternCandidate, Trade};
use tracing::debug;

use crate::clustering::LossClusterDetector;
use crate::features::FeatureBuilder;
use crate::heuristics::HeuristicDetector;
use crate::SignalDetector;

/// Candidates below this confidence are never surfaced.
pub const MIN_CONFIDENCE_FLOOR: f64 = 0.6;

/// Runs every detector against one feature table and produces the ranked
/// candidate list. Pure and stateless; persistence happens elsewhere.
pub struct SignalAggregator {
    detectors: Vec<Box<dyn SignalDetector>>,
}

impl SignalAggregator {
    pub fn new() -> Self {
        Self::with_detectors(vec![
            Box::new(HeuristicDetector),
            Box::new(LossClusterDetector),
        ])
    }

    pub fn with_detectors(detectors: Vec<Box<dyn SignalDetector>>) -> Self {
        Self { detectors }
    }

    /// Scan, apply the confidence floor, rank by severity (stable, so ties
    /// keep detector-emission order).
    pub fn run(&self, trades: &[Trade]) -> Vec<PatternCandidate> {
        let features = FeatureBuilder::build(trades);

        let mut candidates = Vec::new();
        for detector in &self.detectors {
            let found = detector.scan(&features);
            debug!(
                detector = detector.name(),
                candidates = found.len(),
                "detector scan complete"
            );
            candidates.extend(found);
        }

        candidates.retain(|c| c.confidence >= MIN_CONFIDENCE_FLOOR);
        candidates.sort_by_key(|c| std::cmp::Reverse(c.severity.score()));
        candidates
    }
}

impl Default for SignalAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureTable;
    use alert_core::{AlertCategory, AlertTimeframe, Severity};
    use serde_json::json;

    struct FixedDetector {
        name: &'static str,
        candidates: Vec<PatternCandidate>,
    }

    impl SignalDetector for FixedDetector {
        fn name(&self) -> &'static str {
            self.name
        }

        fn scan(&self, _features: &FeatureTable) -> Vec<PatternCandidate> {
            self.candidates.clone()
        }
    }

    fn candidate(title: &str, severity: Severity, confidence: f64) -> PatternCandidate {
        PatternCandidate {
            detector: "fixed".to_string(),
            category: AlertCategory::Pattern,
            severity,
            title: title.to_string(),
            description: String::new(),
            confidence,
            timeframe: AlertTimeframe::NextWeek,
            trigger_conditions: json!({}),
            suggested_actions: Vec::new(),
        }
    }

    #[test]
    fn floors_low_confidence_and_ranks_by_severity() {
        let aggregator = SignalAggregator::with_detectors(vec![Box::new(FixedDetector {
            name: "fixed",
            candidates: vec![
                candidate("medium-first", Severity::Medium, 0.8),
                candidate("dropped", Severity::Critical, 0.59),
                candidate("critical", Severity::Critical, 0.9),
                candidate("medium-second", Severity::Medium, 0.7),
            ],
        })]);

        let ranked = aggregator.run(&[]);
        let titles: Vec<&str> = ranked.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["critical", "medium-first", "medium-second"]);
    }

    #[test]
    fn detector_emission_order_breaks_ties() {
        let aggregator = SignalAggregator::with_detectors(vec![
            Box::new(FixedDetector {
                name: "first",
                candidates: vec![candidate("a", Severity::High, 0.7)],
            }),
            Box::new(FixedDetector {
                name: "second",
                candidates: vec![candidate("b", Severity::High, 0.95)],
            }),
        ]);

        let ranked = aggregator.run(&[]);
        let titles: Vec<&str> = ranked.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn empty_input_is_a_valid_empty_result() {
        assert!(SignalAggregator::new().run(&[]).is_empty());
    }
}
