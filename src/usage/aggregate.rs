use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::debug;

use super::{Metric, PlayerStat, QualityMetrics, UsageError, OTHER_BUCKET_NAME};

/// Relative slack when deciding whether the cumulative usage reached the cutoff
const CUTOFF_TOLERANCE: f64 = 1e-9;

pub const DEFAULT_CUTOFF_FRACTION: f64 = 0.95;

/// How a tail player without a given metric contributes to the "Other" average
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum MissingMetricPolicy {
    /// Leave the player out of that metric's weighted average
    #[default]
    Skip,
    /// Count the missing value as this number, weighted by the player's usage
    Neutral(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregationOptions {
    pub cutoff_fraction: f64,
    pub missing_metric: MissingMetricPolicy,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            cutoff_fraction: DEFAULT_CUTOFF_FRACTION,
            missing_metric: MissingMetricPolicy::default(),
        }
    }
}

/// Folds the long tail of a usage-sorted group into one "Other" bucket
#[derive(Debug, Clone)]
pub struct ThresholdAggregator {
    options: AggregationOptions,
}

impl ThresholdAggregator {
    pub fn new(options: AggregationOptions) -> Result<Self, UsageError> {
        let cutoff = options.cutoff_fraction;
        // NaN fails both comparisons
        if !(cutoff > 0.0 && cutoff <= 1.0) {
            return Err(UsageError::InvalidCutoff(cutoff));
        }
        Ok(Self { options })
    }

    /// Returns the head of the group in descending usage order, followed by
    /// one synthetic "Other" entry when any players fell past the cutoff.
    ///
    /// Zero-usage players are dropped. Entries already flagged as a bucket are
    /// always folded into the tail. A zero `total_usage` returns the input
    /// untouched.
    pub fn aggregate(&self, players: &[PlayerStat], total_usage: f64) -> Vec<PlayerStat> {
        if total_usage == 0.0 {
            return players.to_vec();
        }

        let mut sorted: Vec<&PlayerStat> = players.iter().filter(|p| p.usage > 0.0).collect();
        // sort_by is stable, ties keep input order
        sorted.sort_by(|a, b| b.usage.total_cmp(&a.usage));

        let threshold = self.options.cutoff_fraction * total_usage;
        let slack = CUTOFF_TOLERANCE * total_usage.abs();

        let mut head = Vec::new();
        let mut tail = Vec::new();
        let mut cumulative = 0.0;
        for player in sorted {
            if player.is_other || cumulative >= threshold - slack {
                tail.push(player);
            } else {
                cumulative += player.usage;
                head.push(player.clone());
            }
        }

        debug!(
            head = head.len(),
            tail = tail.len(),
            cutoff = self.options.cutoff_fraction,
            "Aggregated usage group"
        );

        if !tail.is_empty() {
            head.push(self.combine(&tail));
        }
        head
    }

    fn combine(&self, tail: &[&PlayerStat]) -> PlayerStat {
        let usage = tail.iter().map(|p| p.usage).sum();

        let plate_appearances = tail
            .iter()
            .filter_map(|p| p.plate_appearances)
            .fold(None, |acc: Option<f64>, pa| Some(acc.unwrap_or(0.0) + pa));

        let mut metrics = QualityMetrics::default();
        for metric in Metric::iter() {
            metrics.set(metric, self.weighted_metric(tail, metric));
        }

        PlayerStat {
            name: OTHER_BUCKET_NAME.to_string(),
            usage,
            plate_appearances,
            metrics,
            is_other: true,
        }
    }

    /// Usage-weighted average of one metric across the tail.
    /// A metric nobody in the tail reports stays absent under either policy.
    fn weighted_metric(&self, tail: &[&PlayerStat], metric: Metric) -> Option<f64> {
        if tail.iter().all(|p| p.metrics.get(metric).is_none()) {
            return None;
        }

        let mut weighted_sum = 0.0;
        let mut weight = 0.0;
        for player in tail {
            let value = match (player.metrics.get(metric), self.options.missing_metric) {
                (Some(value), _) => value,
                (None, MissingMetricPolicy::Neutral(neutral)) => neutral,
                (None, MissingMetricPolicy::Skip) => continue,
            };
            weighted_sum += value * player.usage;
            weight += player.usage;
        }

        (weight > 0.0).then(|| weighted_sum / weight)
    }
}

impl Default for ThresholdAggregator {
    fn default() -> Self {
        Self {
            options: AggregationOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn aggregator(cutoff_fraction: f64) -> ThresholdAggregator {
        ThresholdAggregator::new(AggregationOptions {
            cutoff_fraction,
            ..AggregationOptions::default()
        })
        .unwrap()
    }

    fn batters() -> Vec<PlayerStat> {
        vec![
            PlayerStat::new("A", 300.0).with_metric(Metric::Woba, 0.350),
            PlayerStat::new("B", 150.0).with_metric(Metric::Woba, 0.300),
            PlayerStat::new("C", 50.0).with_metric(Metric::Woba, 0.250),
        ]
    }

    fn names(players: &[PlayerStat]) -> Vec<&str> {
        players.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn folds_tail_past_cutoff_into_other() {
        let result = aggregator(0.75).aggregate(&batters(), 500.0);

        assert_eq!(names(&result), vec!["A", "B", "Other"]);
        let other = &result[2];
        assert!(other.is_other);
        assert_eq!(other.usage, 50.0);
        assert!((other.metrics.woba.unwrap() - 0.250).abs() < 1e-12);
        assert_eq!(other.metrics.xwoba, None);
    }

    #[test]
    fn full_cutoff_keeps_everyone_without_other() {
        let mut players = batters();
        players.reverse();

        let result = aggregator(1.0).aggregate(&players, 500.0);
        assert_eq!(names(&result), vec!["A", "B", "C"]);
    }

    #[test]
    fn cutoff_reached_exactly_sends_rest_to_tail() {
        // 300 of 500 is exactly 60%, so B and C are tail
        let result = aggregator(0.6).aggregate(&batters(), 500.0);
        assert_eq!(names(&result), vec!["A", "Other"]);
        assert_eq!(result[1].usage, 200.0);
    }

    #[test]
    fn full_cutoff_tolerates_float_drift_in_total() {
        let players = vec![
            PlayerStat::new("A", 0.1),
            PlayerStat::new("B", 0.2),
            PlayerStat::new("C", 0.3),
        ];
        let result = aggregator(1.0).aggregate(&players, 0.6);
        assert_eq!(names(&result), vec!["C", "B", "A"]);
    }

    #[rstest]
    #[case(0.1)]
    #[case(0.5)]
    #[case(0.75)]
    #[case(0.9)]
    #[case(1.0)]
    fn aggregation_conserves_usage(#[case] cutoff: f64) {
        let players = vec![
            PlayerStat::new("A", 41.3),
            PlayerStat::new("B", 0.0),
            PlayerStat::new("C", 17.2),
            PlayerStat::new("D", 9.9),
            PlayerStat::new("E", 17.2),
            PlayerStat::new("F", 3.1),
        ];
        let total: f64 = players.iter().map(|p| p.usage).sum();

        let result = aggregator(cutoff).aggregate(&players, total);
        let aggregated: f64 = result.iter().map(|p| p.usage).sum();
        assert!((aggregated - total).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_input_order() {
        let players = vec![
            PlayerStat::new("First", 10.0),
            PlayerStat::new("Second", 10.0),
            PlayerStat::new("Third", 10.0),
        ];
        let result = aggregator(1.0).aggregate(&players, 30.0);
        assert_eq!(names(&result), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn zero_usage_players_are_dropped() {
        let players = vec![PlayerStat::new("A", 10.0), PlayerStat::new("Bench", 0.0)];
        let result = aggregator(1.0).aggregate(&players, 10.0);
        assert_eq!(names(&result), vec!["A"]);
    }

    #[test]
    fn zero_total_returns_input_unchanged() {
        let players = vec![PlayerStat::new("A", 0.0), PlayerStat::new("B", 0.0)];
        let result = aggregator(0.5).aggregate(&players, 0.0);
        assert_eq!(result, players);
    }

    #[test]
    fn existing_other_bucket_is_merged() {
        let players = vec![
            PlayerStat::new("A", 80.0),
            PlayerStat::new(OTHER_BUCKET_NAME, 15.0),
            PlayerStat::new("B", 5.0),
        ];
        let result = aggregator(1.0).aggregate(&players, 100.0);
        assert_eq!(names(&result), vec!["A", "B", "Other"]);
        assert_eq!(result[2].usage, 15.0);
    }

    #[test]
    fn skip_policy_ignores_missing_metric() {
        let players = vec![
            PlayerStat::new("A", 90.0),
            PlayerStat::new("B", 6.0).with_metric(Metric::Era, 3.00),
            PlayerStat::new("C", 4.0),
        ];
        let result = aggregator(0.9).aggregate(&players, 100.0);
        let other = result.last().unwrap();
        assert_eq!(other.usage, 10.0);
        assert!((other.metrics.era.unwrap() - 3.00).abs() < 1e-12);
        assert_eq!(other.metrics.fip, None);
    }

    #[test]
    fn neutral_policy_weights_missing_metric() {
        let aggregator = ThresholdAggregator::new(AggregationOptions {
            cutoff_fraction: 0.9,
            missing_metric: MissingMetricPolicy::Neutral(100.0),
        })
        .unwrap();
        let players = vec![
            PlayerStat::new("A", 90.0),
            PlayerStat::new("B", 6.0).with_metric(Metric::Woba, 50.0),
            PlayerStat::new("C", 4.0),
        ];
        let other = aggregator.aggregate(&players, 100.0).pop().unwrap();
        // (50 * 6 + 100 * 4) / 10
        assert!((other.metrics.woba.unwrap() - 70.0).abs() < 1e-12);
        assert_eq!(other.metrics.era, None);
    }

    #[test]
    fn other_sums_plate_appearances() {
        let players = vec![
            PlayerStat::new("A", 900.0).with_plate_appearances(400.0),
            PlayerStat::new("B", 60.0).with_plate_appearances(25.0),
            PlayerStat::new("C", 40.0).with_plate_appearances(12.0),
        ];
        let other = aggregator(0.9).aggregate(&players, 1000.0).pop().unwrap();
        assert_eq!(other.plate_appearances, Some(37.0));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.5)]
    #[case(1.01)]
    #[case(f64::NAN)]
    fn rejects_cutoff_outside_unit_interval(#[case] cutoff: f64) {
        let result = ThresholdAggregator::new(AggregationOptions {
            cutoff_fraction: cutoff,
            ..AggregationOptions::default()
        });
        assert!(matches!(result, Err(UsageError::InvalidCutoff(_))));
    }
}
