//! Aggregation model: per-operation statistics, totals and bottlenecks.

use crate::log::OperationLog;

/// Operations averaging above this are reported as bottlenecks.
pub const BOTTLENECK_THRESHOLD_MS: f64 = 100.0;

/// Operations averaging below this count as fast.
pub const FAST_THRESHOLD_MS: f64 = 10.0;

/// At most this many bottlenecks are listed.
pub const MAX_BOTTLENECKS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct OperationStats {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub total: f64,
    /// Sample standard deviation; `None` below two data points.
    pub stddev: Option<f64>,
}

impl OperationStats {
    /// Summarize one duration sequence. `None` if it is empty.
    pub fn from_durations(name: &str, durations: &[f64]) -> Option<Self> {
        if durations.is_empty() {
            return None;
        }

        let count = durations.len();
        let total: f64 = durations.iter().sum();
        let min = durations.iter().copied().fold(f64::INFINITY, f64::min);
        let max = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // Running mean stays finite even when the plain sum would not.
        let mut mean = 0.0;
        for (k, d) in durations.iter().enumerate() {
            mean += (d - mean) / (k + 1) as f64;
        }

        // Deviations are scaled by `max` so squaring cannot overflow.
        let stddev = (count > 1).then(|| {
            if max <= 0.0 {
                return 0.0;
            }
            let sq: f64 = durations
                .iter()
                .map(|d| ((d - mean) / max).powi(2))
                .sum();
            (sq / (count - 1) as f64).sqrt() * max
        });

        Some(Self {
            name: name.to_string(),
            count,
            mean,
            min,
            max,
            total,
            stddev,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub calls: usize,
    pub unique_operations: usize,
    pub total_ms: f64,
    /// `None` when there were no calls at all.
    pub average_per_call_ms: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bottleneck {
    pub name: String,
    pub mean: f64,
    pub total: f64,
    pub percent_of_total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    /// Sorted by mean, slowest first.
    pub ranked: Vec<OperationStats>,
    pub totals: Totals,
    pub bottlenecks: Vec<Bottleneck>,
    pub fast_operations: usize,
}

/// Compute stats for every operation, slowest mean first.
///
/// The sort is stable, so equal means keep first-seen log order.
pub fn rank_operations(log: &OperationLog) -> Vec<OperationStats> {
    let mut ranked: Vec<OperationStats> = log
        .iter()
        .filter_map(|(name, durations)| OperationStats::from_durations(name, durations))
        .collect();
    ranked.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    ranked
}

/// Build report data. Returns `None` when the log held no timed operations.
pub fn build_report_data(log: &OperationLog) -> Option<ReportData> {
    let ranked = rank_operations(log);
    if ranked.is_empty() {
        return None;
    }

    let calls: usize = ranked.iter().map(|s| s.count).sum();
    let total_ms: f64 = ranked.iter().map(|s| s.total).sum();
    let totals = Totals {
        calls,
        unique_operations: ranked.len(),
        total_ms,
        average_per_call_ms: (calls > 0).then(|| total_ms / calls as f64),
    };

    let bottlenecks: Vec<Bottleneck> = ranked
        .iter()
        .filter(|s| s.mean > BOTTLENECK_THRESHOLD_MS)
        .take(MAX_BOTTLENECKS)
        .map(|s| Bottleneck {
            name: s.name.clone(),
            mean: s.mean,
            total: s.total,
            percent_of_total: if total_ms > 0.0 && total_ms.is_finite() {
                s.total / total_ms * 100.0
            } else {
                0.0
            },
        })
        .collect();

    let fast_operations = ranked
        .iter()
        .filter(|s| s.mean < FAST_THRESHOLD_MS)
        .count();

    tracing::debug!(
        operations = ranked.len(),
        calls,
        bottlenecks = bottlenecks.len(),
        fast_operations,
        "aggregated operations"
    );

    Some(ReportData {
        ranked,
        totals,
        bottlenecks,
        fast_operations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn log_of(entries: &[(&str, Vec<f64>)]) -> OperationLog {
        entries
            .iter()
            .map(|(name, durations)| (name.to_string(), durations.clone()))
            .collect()
    }

    #[test]
    fn stats_for_three_samples() {
        let stats = OperationStats::from_durations("fetch", &[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean, 20.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 30.0);
        assert_eq!(stats.total, 60.0);
        assert!((stats.stddev.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn single_sample_has_no_stddev() {
        let stats = OperationStats::from_durations("once", &[42.0]).unwrap();
        assert_eq!(stats.stddev, None);
        assert_eq!(stats.mean, 42.0);
    }

    #[test]
    fn identical_samples_have_zero_stddev() {
        let stats = OperationStats::from_durations("flat", &[5.0, 5.0]).unwrap();
        assert_eq!(stats.stddev, Some(0.0));
    }

    #[test]
    fn empty_durations_have_no_stats() {
        assert_eq!(OperationStats::from_durations("none", &[]), None);
    }

    #[test]
    fn empty_log_reports_no_data() {
        assert_eq!(build_report_data(&OperationLog::new()), None);
    }

    #[test]
    fn ranks_by_descending_mean_with_stable_ties() {
        let log = log_of(&[
            ("a", vec![5.0]),
            ("b", vec![50.0, 150.0]),
            ("c", vec![5.0]),
            ("d", vec![300.0]),
        ]);
        let names: Vec<String> = rank_operations(&log).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn report_totals_bottlenecks_and_fast_count() {
        let log = log_of(&[
            ("quick", vec![1.0, 3.0]),
            ("slow", vec![200.0, 400.0]),
            ("medium", vec![40.0]),
            ("tiny", vec![0.5]),
        ]);
        let data = build_report_data(&log).unwrap();

        assert_eq!(
            data.totals,
            Totals {
                calls: 6,
                unique_operations: 4,
                total_ms: 644.5,
                average_per_call_ms: Some(644.5 / 6.0),
            }
        );
        assert_eq!(data.fast_operations, 2);
        assert_eq!(data.bottlenecks.len(), 1);
        let b = &data.bottlenecks[0];
        assert_eq!(b.name, "slow");
        assert_eq!(b.mean, 300.0);
        assert!((b.percent_of_total - 600.0 / 644.5 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn bottlenecks_are_capped_and_follow_ranking() {
        let entries: Vec<(String, Vec<f64>)> = (1..=7)
            .map(|i| (format!("op{i}"), vec![100.0 + i as f64]))
            .collect();
        let log: OperationLog = entries.into_iter().collect();
        let data = build_report_data(&log).unwrap();

        let names: Vec<&str> = data.bottlenecks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["op7", "op6", "op5", "op4", "op3"]);
    }

    #[test]
    fn exactly_threshold_is_neither_bottleneck_nor_fast() {
        let log = log_of(&[("edge_slow", vec![100.0]), ("edge_fast", vec![10.0])]);
        let data = build_report_data(&log).unwrap();
        assert!(data.bottlenecks.is_empty());
        assert_eq!(data.fast_operations, 0);
    }

    #[test]
    fn huge_samples_keep_mean_and_stddev_finite() {
        let stats = OperationStats::from_durations("a", &[1e308, 1e308]).unwrap();
        assert_eq!(stats.mean, 1e308);
        assert_eq!(stats.stddev, Some(0.0));

        let stats = OperationStats::from_durations("b", &[1e308, 5e307]).unwrap();
        assert!((stats.mean - 7.5e307).abs() <= 7.5e307 * 1e-12);
        assert!(stats.stddev.unwrap().is_finite());
    }

    #[test]
    fn infinite_total_never_yields_nan_share() {
        let log = log_of(&[("a", vec![1e308, 1e308]), ("b", vec![1.0])]);
        let data = build_report_data(&log).unwrap();

        assert_eq!(data.ranked[0].mean, 1e308);
        let share: f64 = data.bottlenecks.iter().map(|b| b.percent_of_total).sum();
        assert!(share <= 100.0, "share was {share}");
    }

    fn arb_log() -> impl Strategy<Value = OperationLog> {
        prop::collection::vec(
            ("[a-z]{1,6}", prop::collection::vec(0.0f64..2_000.0, 1..8)),
            1..20,
        )
        .prop_map(|entries| {
            let mut log = OperationLog::new();
            for (name, durations) in entries {
                log.entry(name).or_default().extend(durations);
            }
            log
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_ranking_is_non_increasing(log in arb_log()) {
            let ranked = rank_operations(&log);
            prop_assert_eq!(ranked.len(), log.len());
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].mean >= pair[1].mean);
            }
        }

        #[test]
        fn prop_bottleneck_share_never_exceeds_total(log in arb_log()) {
            let data = build_report_data(&log).unwrap();
            let share: f64 = data.bottlenecks.iter().map(|b| b.percent_of_total).sum();
            prop_assert!(share <= 100.0 + 1e-9);
            prop_assert!(data.bottlenecks.iter().all(|b| b.mean > BOTTLENECK_THRESHOLD_MS));
        }
    }
}
