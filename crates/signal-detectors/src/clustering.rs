use alert_core::{AlertCategory, AlertTimeframe, PatternCandidate, Severity};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

use crate::features::{FeatureTable, TradeFeatures};
use crate::SignalDetector;

const MIN_TRADES: usize = 20;
const MIN_LOSERS: usize = 10;
const MIN_CLUSTER_MEMBERS: usize = 5;
const KMEANS_SEED: u64 = 42;
const KMEANS_RESTARTS: usize = 10;
const KMEANS_MAX_ITERS: usize = 100;

/// Groups losing trades by (duration, size, hour) to surface a dominant loss
/// archetype that the fixed rules cannot see.
///
/// Clustering is k=2 k-means with a pinned seed and several restarts, so
/// repeated runs over the same input always produce the same candidates.
pub struct LossClusterDetector;

impl SignalDetector for LossClusterDetector {
    fn name(&self) -> &'static str {
        "loss_cluster"
    }

    fn scan(&self, features: &FeatureTable) -> Vec<PatternCandidate> {
        if features.len() < MIN_TRADES {
            return Vec::new();
        }
        let losers: Vec<&TradeFeatures> = features.losing_rows().collect();
        if losers.len() < MIN_LOSERS {
            return Vec::new();
        }

        let raw: Vec<[f64; 3]> = losers
            .iter()
            .map(|r| {
                [
                    r.duration_minutes,
                    r.trade.lot_size.unwrap_or(0.0),
                    r.hour as f64,
                ]
            })
            .collect();
        let points = standardize(&raw);
        let assignments = kmeans_two(&points);

        let overall_mean_size = features.mean_lot_size().unwrap_or(0.0);

        let mut candidates = Vec::new();
        for cluster in 0..2usize {
            let members: Vec<&TradeFeatures> = losers
                .iter()
                .zip(&assignments)
                .filter(|(_, &a)| a == cluster)
                .map(|(r, _)| *r)
                .collect();
            if members.len() < MIN_CLUSTER_MEMBERS {
                continue;
            }

            let avg_duration = members.iter().map(|r| r.duration_minutes).sum::<f64>()
                / members.len() as f64;
            let sizes: Vec<f64> = members.iter().filter_map(|r| r.trade.lot_size).collect();
            let avg_size = if sizes.is_empty() {
                0.0
            } else {
                sizes.iter().sum::<f64>() / sizes.len() as f64
            };

            let mut descriptors: Vec<&str> = Vec::new();
            if avg_duration < 10.0 {
                descriptors.push("Very short duration");
            } else if avg_duration > 1000.0 {
                descriptors.push("Long holding times");
            }
            if overall_mean_size > 0.0 && avg_size > overall_mean_size * 1.5 {
                descriptors.push("Large position sizes");
            }
            if descriptors.is_empty() {
                continue;
            }

            candidates.push(PatternCandidate {
                detector: self.name().to_string(),
                category: AlertCategory::Pattern,
                severity: Severity::High,
                title: "Recurring Loss Pattern".to_string(),
                description: format!(
                    "Identified a group of {} similar losses: {}",
                    members.len(),
                    descriptors.join(" + ")
                ),
                confidence: 0.75,
                timeframe: AlertTimeframe::NextWeek,
                trigger_conditions: json!({
                    "pattern": "loss_cluster",
                    "avg_duration_min": avg_duration,
                    "avg_size": avg_size,
                    "count": members.len(),
                    "descriptors": descriptors,
                }),
                suggested_actions: vec![
                    "This combination of size and duration consistently leads \
                     to losses; review these setups before re-entering"
                        .to_string(),
                ],
            });
        }
        candidates
    }
}

/// Zero-mean unit-variance per dimension. Constant dimensions map to zero.
fn standardize(raw: &[[f64; 3]]) -> Vec<[f64; 3]> {
    let n = raw.len() as f64;
    let mut means = [0.0f64; 3];
    let mut stds = [0.0f64; 3];

    for dim in 0..3 {
        means[dim] = raw.iter().map(|p| p[dim]).sum::<f64>() / n;
        let var = raw
            .iter()
            .map(|p| (p[dim] - means[dim]).powi(2))
            .sum::<f64>()
            / n;
        stds[dim] = var.sqrt();
    }

    raw.iter()
        .map(|p| {
            let mut out = [0.0f64; 3];
            for dim in 0..3 {
                out[dim] = if stds[dim] > f64::EPSILON {
                    (p[dim] - means[dim]) / stds[dim]
                } else {
                    0.0
                };
            }
            out
        })
        .collect()
}

/// Seeded k-means with k=2: several restarts, keep the lowest-inertia run.
fn kmeans_two(points: &[[f64; 3]]) -> Vec<usize> {
    let n = points.len();
    let mut rng = StdRng::seed_from_u64(KMEANS_SEED);

    let mut best_assignments = vec![0usize; n];
    let mut best_inertia = f64::INFINITY;

    for _ in 0..KMEANS_RESTARTS {
        let first = rng.gen_range(0..n);
        let mut second = rng.gen_range(0..n);
        while second == first && n > 1 {
            second = rng.gen_range(0..n);
        }
        let mut centroids = [points[first], points[second]];
        let mut assignments = vec![0usize; n];

        for _ in 0..KMEANS_MAX_ITERS {
            let mut changed = false;
            for (i, p) in points.iter().enumerate() {
                let nearest = if sq_dist(p, &centroids[0]) <= sq_dist(p, &centroids[1]) {
                    0
                } else {
                    1
                };
                if assignments[i] != nearest {
                    assignments[i] = nearest;
                    changed = true;
                }
            }

            for cluster in 0..2usize {
                let members: Vec<&[f64; 3]> = points
                    .iter()
                    .zip(&assignments)
                    .filter(|(_, &a)| a == cluster)
                    .map(|(p, _)| p)
                    .collect();
                // An emptied cluster keeps its previous centroid.
                if members.is_empty() {
                    continue;
                }
                let mut centroid = [0.0f64; 3];
                for p in &members {
                    for dim in 0..3 {
                        centroid[dim] += p[dim];
                    }
                }
                for val in centroid.iter_mut() {
                    *val /= members.len() as f64;
                }
                centroids[cluster] = centroid;
            }

            if !changed {
                break;
            }
        }

        let inertia: f64 = points
            .iter()
            .zip(&assignments)
            .map(|(p, &a)| sq_dist(p, &centroids[a]))
            .sum();
        if inertia < best_inertia {
            best_inertia = inertia;
            best_assignments = assignments;
        }
    }

    best_assignments
}

fn sq_dist(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}
