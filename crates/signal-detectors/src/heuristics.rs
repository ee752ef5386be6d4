use std::collections::BTreeMap;

use alert_core::{AlertCategory, AlertTimeframe, PatternCandidate, Severity};
use chrono::{NaiveDate, Timelike, Weekday};
use serde_json::json;

use crate::features::{FeatureTable, TradeFeatures};
use crate::SignalDetector;

/// Rule-based scans over the feature table.
///
/// Every rule is independent and only fires when its evidentiary thresholds
/// are met; insufficient data yields nothing.
pub struct HeuristicDetector;

impl SignalDetector for HeuristicDetector {
    fn name(&self) -> &'static str {
        "heuristics"
    }

    fn scan(&self, features: &FeatureTable) -> Vec<PatternCandidate> {
        let mut candidates = Vec::new();
        candidates.extend(self.consecutive_losses(features));
        candidates.extend(self.consecutive_wins(features));
        candidates.extend(self.position_size_escalation(features));
        candidates.extend(self.frequency_shift(features));
        candidates.extend(self.stop_loss_discipline(features));
        candidates.extend(self.quick_trade_after_loss(features));
        candidates.extend(self.weak_trading_hour(features));
        candidates.extend(self.weak_trading_day(features));
        candidates.extend(self.duration_buckets(features));
        candidates.extend(self.event_time_proximity(features));
        candidates
    }
}

impl HeuristicDetector {
    /// Consecutive losses at the tail of the sequence, the classic
    /// revenge-trading precursor.
    fn consecutive_losses(&self, ft: &FeatureTable) -> Option<PatternCandidate> {
        if ft.len() < 5 {
            return None;
        }
        let streak = tail_streak(ft.rows(), |r| r.is_loss());
        if streak < 2 {
            return None;
        }

        let confidence = (0.6 + (streak as f64 - 2.0) * 0.15).min(0.9);
        let severity = if streak >= 3 {
            Severity::High
        } else {
            Severity::Medium
        };

        Some(self.candidate(
            AlertCategory::Pattern,
            severity,
            "Consecutive Losses Pattern".to_string(),
            format!(
                "You've had {streak} consecutive losses. Traders often make \
                 emotional decisions after multiple losses."
            ),
            confidence,
            AlertTimeframe::NextTrade,
            json!({
                "pattern": "consecutive_losses",
                "count": streak,
                "probability": 0.75,
            }),
            vec![
                "Take a break before your next trade".to_string(),
                "Review your trading plan".to_string(),
                "Stick to predefined position sizes".to_string(),
            ],
        ))
    }

    /// Win streaks breed overconfidence.
    fn consecutive_wins(&self, ft: &FeatureTable) -> Option<PatternCandidate> {
        if ft.len() < 5 {
            return None;
        }
        let streak = tail_streak(ft.rows(), |r| r.is_win());
        if streak < 3 {
            return None;
        }

        Some(self.candidate(
            AlertCategory::Pattern,
            Severity::Medium,
            "Win Streak Alert".to_string(),
            format!(
                "After {streak} consecutive wins, traders often increase risk \
                 beyond their plan due to overconfidence."
            ),
            0.7,
            AlertTimeframe::NextTrade,
            json!({
                "pattern": "consecutive_wins",
                "count": streak,
            }),
            vec![
                "Maintain consistent position sizing".to_string(),
                "Review if recent wins were due to skill or luck".to_string(),
                "Don't deviate from your trading plan".to_string(),
            ],
        ))
    }

    /// Mean size of the last 5 trades vs the 5 before them.
    fn position_size_escalation(&self, ft: &FeatureTable) -> Option<PatternCandidate> {
        if ft.len() < 10 {
            return None;
        }
        let rows = ft.rows();
        let n = rows.len();

        let recent: Vec<f64> = rows[n - 5..].iter().filter_map(|r| r.trade.lot_size).collect();
        let earlier: Vec<f64> = rows[n - 10..n - 5]
            .iter()
            .filter_map(|r| r.trade.lot_size)
            .collect();
        if recent.is_empty() || earlier.is_empty() {
            return None;
        }

        let recent_avg = mean(&recent);
        let earlier_avg = mean(&earlier);
        if earlier_avg <= 0.0 || recent_avg <= earlier_avg * 1.5 {
            return None;
        }

        let increase_percent = (recent_avg / earlier_avg - 1.0) * 100.0;
        Some(self.candidate(
            AlertCategory::Pattern,
            Severity::High,
            "Position Size Escalation".to_string(),
            format!(
                "Your average position size increased by {increase_percent:.0}%. \
                 This could indicate overtrading or emotional trading."
            ),
            0.75,
            AlertTimeframe::NextWeek,
            json!({
                "pattern": "position_size_increase",
                "increase_percent": increase_percent,
                "recent_avg": recent_avg,
                "previous_avg": earlier_avg,
            }),
            vec![
                "Return to your standard position sizing".to_string(),
                "Review why position sizes increased".to_string(),
                "Set hard limits on maximum position size".to_string(),
            ],
        ))
    }

    /// Trades-per-day over the 3 most recent trading dates vs the prior 3.
    fn frequency_shift(&self, ft: &FeatureTable) -> Option<PatternCandidate> {
        if ft.len() < 10 {
            return None;
        }

        let mut by_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for row in ft.rows() {
            *by_date.entry(row.entry_date()).or_insert(0) += 1;
        }
        if by_date.len() < 6 {
            return None;
        }

        let counts: Vec<f64> = by_date.values().map(|&c| c as f64).collect();
        let n = counts.len();
        let recent_avg = mean(&counts[n - 3..]);
        let earlier_avg = mean(&counts[n - 6..n - 3]);
        if recent_avg <= earlier_avg * 2.0 {
            return None;
        }

        let increase_percent = (recent_avg / earlier_avg - 1.0) * 100.0;
        Some(self.candidate(
            AlertCategory::Behavioral,
            Severity::High,
            "Increased Trading Frequency".to_string(),
            format!(
                "Your trading frequency increased from {earlier_avg:.1} to \
                 {recent_avg:.1} trades per day. This could indicate overtrading."
            ),
            0.8,
            AlertTimeframe::NextWeek,
            json!({
                "pattern": "increased_frequency",
                "increase_percent": increase_percent,
                "recent_avg": recent_avg,
                "previous_avg": earlier_avg,
            }),
            vec![
                "Set a daily trade limit".to_string(),
                "Take a trading break".to_string(),
                "Review your trading strategy".to_string(),
            ],
        ))
    }

    /// Fraction of trades with no stop-loss (null or zero both count).
    fn stop_loss_discipline(&self, ft: &FeatureTable) -> Option<PatternCandidate> {
        if ft.is_empty() {
            return None;
        }

        let missing = ft.rows().iter().filter(|r| !r.trade.has_stop_loss()).count();
        let missing_rate = missing as f64 / ft.len() as f64;
        if missing_rate <= 0.3 {
            return None;
        }

        let severity = if missing_rate > 0.5 {
            Severity::Critical
        } else {
            Severity::High
        };

        Some(self.candidate(
            AlertCategory::Behavioral,
            severity,
            "Stop-Loss Discipline Issue".to_string(),
            format!(
                "{:.0}% of your trades are missing stop-loss orders. This \
                 exposes you to unlimited risk.",
                missing_rate * 100.0
            ),
            0.9,
            AlertTimeframe::NextTrade,
            json!({
                "pattern": "missing_stop_loss",
                "missing_rate": missing_rate,
                "trades_without_sl": missing,
            }),
            vec![
                "Always set a stop-loss before entering a trade".to_string(),
                "Use automatic stop-loss orders".to_string(),
                "Review your risk management rules".to_string(),
            ],
        ))
    }

    /// Re-entering the market shortly after a loss. Reported once, for the
    /// first occurrence in the sequence.
    fn quick_trade_after_loss(&self, ft: &FeatureTable) -> Option<PatternCandidate> {
        if ft.len() < 10 || ft.loss_count() < 2 {
            return None;
        }

        let rows = ft.rows();
        for (i, row) in rows.iter().enumerate() {
            if !row.is_loss() || i + 1 >= rows.len() {
                continue;
            }
            let hours =
                (rows[i + 1].entry_time - row.entry_time).num_seconds() as f64 / 3600.0;
            if hours >= 2.0 {
                continue;
            }

            return Some(self.candidate(
                AlertCategory::Behavioral,
                Severity::High,
                "Quick Trade After Loss".to_string(),
                format!(
                    "You traded within {hours:.1} hours of a loss. This could \
                     be revenge trading."
                ),
                0.7,
                AlertTimeframe::NextTrade,
                json!({
                    "pattern": "quick_trade_after_loss",
                    "hours_after_loss": hours,
                    "loss_amount": row.profit_loss(),
                }),
                vec![
                    "Wait at least 4 hours after a loss".to_string(),
                    "Review your emotional state before trading".to_string(),
                    "Stick to your trading schedule".to_string(),
                ],
            ));
        }
        None
    }

    /// Worst hour-of-day bucket by win rate.
    fn weak_trading_hour(&self, ft: &FeatureTable) -> Option<PatternCandidate> {
        if ft.len() < 15 {
            return None;
        }

        let mut stats: Vec<(u32, usize, f64)> = Vec::new();
        for hour in 0..24 {
            let bucket: Vec<&TradeFeatures> =
                ft.rows().iter().filter(|r| r.hour == hour).collect();
            if bucket.len() < 3 {
                continue;
            }
            let rate = win_rate(&bucket);
            if rate < 0.40 {
                stats.push((hour, bucket.len(), rate));
            }
        }

        let &(hour, trades, rate) = stats.iter().min_by(|a, b| {
            a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if trades < 5 || rate >= 0.30 {
            return None;
        }

        Some(self.candidate(
            AlertCategory::TimeBased,
            Severity::Medium,
            format!("Weak Trading Hour ({hour}:00)"),
            format!(
                "Your win rate is only {:.0}% during the {hour}:00 hour. \
                 Consider avoiding trading during this time.",
                rate * 100.0
            ),
            0.65,
            AlertTimeframe::NextDay,
            json!({
                "pattern": "weak_trading_hour",
                "hour": hour,
                "win_rate": rate,
                "trade_count": trades,
            }),
            vec![
                format!("Avoid trading at {hour}:00"),
                "Analyze why this hour performs poorly".to_string(),
                "Focus on your best hours instead".to_string(),
            ],
        ))
    }

    /// Worst weekday bucket by win rate (Mon-Fri).
    fn weak_trading_day(&self, ft: &FeatureTable) -> Option<PatternCandidate> {
        if ft.len() < 15 {
            return None;
        }

        const WEEKDAYS: [Weekday; 5] = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ];

        let mut stats: Vec<(Weekday, usize, f64)> = Vec::new();
        for day in WEEKDAYS {
            let bucket: Vec<&TradeFeatures> =
                ft.rows().iter().filter(|r| r.weekday == day).collect();
            if bucket.len() < 3 {
                continue;
            }
            stats.push((day, bucket.len(), win_rate(&bucket)));
        }
        if stats.len() < 3 {
            return None;
        }

        let &(day, trades, rate) = stats.iter().min_by(|a, b| {
            a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if trades < 5 || rate >= 0.35 {
            return None;
        }

        let day_name = weekday_name(day);
        Some(self.candidate(
            AlertCategory::TimeBased,
            Severity::Medium,
            format!("Weak Trading Day ({day_name})"),
            format!(
                "Your win rate is only {:.0}% on {day_name}s. Consider \
                 adjusting your trading schedule.",
                rate * 100.0
            ),
            0.6,
            AlertTimeframe::NextWeek,
            json!({
                "pattern": "weak_trading_day",
                "day": day_name,
                "win_rate": rate,
                "trade_count": trades,
            }),
            vec![
                format!("Reduce trading on {day_name}s"),
                "Analyze market conditions on this day".to_string(),
                "Focus on preparation instead of trading".to_string(),
            ],
        ))
    }

    /// Scalp (<15 min) / Swing (>240 min) / Intraday win-rate buckets.
    /// Rows without a known exit are skipped.
    fn duration_buckets(&self, ft: &FeatureTable) -> Vec<PatternCandidate> {
        let rows: Vec<&TradeFeatures> =
            ft.rows().iter().filter(|r| r.has_duration).collect();

        let mut candidates = Vec::new();
        for bucket_name in ["Scalp", "Swing", "Intraday"] {
            let bucket: Vec<&TradeFeatures> = rows
                .iter()
                .filter(|r| duration_bucket(r.duration_minutes) == bucket_name)
                .copied()
                .collect();
            if bucket.len() < 5 {
                continue;
            }
            let rate = win_rate(&bucket);
            if rate >= 0.35 {
                continue;
            }

            candidates.push(self.candidate(
                AlertCategory::Pattern,
                Severity::Medium,
                format!("Weak {bucket_name} Performance"),
                format!(
                    "You have difficulty with {bucket_name} trades (win rate \
                     {:.0}%).",
                    rate * 100.0
                ),
                0.6,
                AlertTimeframe::NextWeek,
                json!({
                    "pattern": "duration_bucket_weakness",
                    "bucket": bucket_name,
                    "win_rate": rate,
                    "trade_count": bucket.len(),
                }),
                vec!["Review your strategy for this timeframe".to_string()],
            ));
        }
        candidates
    }

    /// Trades entered inside high-impact news windows: 13:25-13:35 UTC
    /// (US data releases) and 19:00-19:10 UTC (FOMC).
    fn event_time_proximity(&self, ft: &FeatureTable) -> Option<PatternCandidate> {
        let mut count = 0usize;
        let mut events: Vec<&str> = Vec::new();
        for row in ft.rows() {
            let minute = row.entry_time.minute();
            let event = if row.hour == 13 && (25..=35).contains(&minute) {
                Some("US High Impact Data (CPI/NFP/PPI)")
            } else if row.hour == 19 && minute <= 10 {
                Some("FOMC / Fed Interest Rate Decision")
            } else {
                None
            };
            if let Some(name) = event {
                count += 1;
                if !events.contains(&name) {
                    events.push(name);
                }
            }
        }
        if count < 2 {
            return None;
        }

        Some(self.candidate(
            AlertCategory::TimeBased,
            Severity::High,
            "Event Trading Risk".to_string(),
            format!(
                "{count} trades were entered within minutes of high-impact \
                 news releases. Market volatility around these events is \
                 unpredictable."
            ),
            0.7,
            AlertTimeframe::NextDay,
            json!({
                "pattern": "event_time_proximity",
                "event_trade_count": count,
                "events": events,
            }),
            vec![
                "Check the economic calendar before entering a trade".to_string(),
                "Stay flat during high-impact news releases".to_string(),
            ],
        ))
    }

    #[allow(clippy::too_many_arguments)]
    fn candidate(
        &self,
        category: AlertCategory,
        severity: Severity,
        title: String,
        description: String,
        confidence: f64,
        timeframe: AlertTimeframe,
        trigger_conditions: serde_json::Value,
        suggested_actions: Vec<String>,
    ) -> PatternCandidate {
        PatternCandidate {
            detector: self.name().to_string(),
            category,
            severity,
            title,
            description,
            confidence,
            timeframe,
            trigger_conditions,
            suggested_actions,
        }
    }
}

/// Length of the run at the end of the sequence matching `pred`.
fn tail_streak(rows: &[TradeFeatures], pred: impl Fn(&TradeFeatures) -> bool) -> usize {
    rows.iter().rev().take_while(|r| pred(r)).count()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn win_rate(rows: &[&TradeFeatures]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().filter(|r| r.is_win()).count() as f64 / rows.len() as f64
}

fn duration_bucket(minutes: f64) -> &'static str {
    if minutes < 15.0 {
        "Scalp"
    } else if minutes > 240.0 {
        "Swing"
    } else {
        "Intraday"
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureBuilder;
    use alert_core::Trade;
    use chrono::{Duration, NaiveDateTime, Utc};

    fn ts(s: &str) -> chrono::DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc()
    }

    fn trade(id: usize, entry: &str, duration_min: i64, pnl: f64) -> Trade {
        let entry_time = ts(entry);
        Trade {
            id: format!("t{id}"),
            symbol: Some("EURUSD".to_string()),
            entry_time: Some(entry_time),
            exit_time: Some(entry_time + Duration::minutes(duration_min)),
            profit_loss: pnl,
            lot_size: Some(1.0),
            stop_loss: Some(1.05),
        }
    }

    fn find<'a>(
        candidates: &'a [alert_core::PatternCandidate],
        pattern: &str,
    ) -> Option<&'a alert_core::PatternCandidate> {
        candidates
            .iter()
            .find(|c| c.trigger_conditions["pattern"] == pattern)
    }

    #[test]
    fn consecutive_losses_three_at_tail() {
        // Ends in losses [-10, -5, -3]: confidence 0.6 + 1*0.15 = 0.75, high.
        let trades = vec![
            trade(0, "2024-03-04 09:00:00", 30, 12.0),
            trade(1, "2024-03-05 09:00:00", 30, 8.0),
            trade(2, "2024-03-06 09:00:00", 30, 5.0),
            trade(3, "2024-03-07 09:00:00", 30, -10.0),
            trade(4, "2024-03-08 09:00:00", 30, -5.0),
            trade(5, "2024-03-11 09:00:00", 30, -3.0),
        ];
        let table = FeatureBuilder::build(&trades);
        let candidates = HeuristicDetector.scan(&table);

        let c = find(&candidates, "consecutive_losses").expect("rule should fire");
        assert_eq!(c.severity, alert_core::Severity::High);
        assert!((c.confidence - 0.75).abs() < 1e-9);
        assert_eq!(c.trigger_conditions["count"], 3);
        assert_eq!(c.timeframe, alert_core::AlertTimeframe::NextTrade);
        // Nothing else has enough evidence on six healthy trades.
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn two_tail_losses_is_medium() {
        let trades = vec![
            trade(0, "2024-03-04 09:00:00", 30, 12.0),
            trade(1, "2024-03-05 09:00:00", 30, 8.0),
            trade(2, "2024-03-06 09:00:00", 30, 5.0),
            trade(3, "2024-03-07 09:00:00", 30, -10.0),
            trade(4, "2024-03-08 09:00:00", 30, -5.0),
        ];
        let candidates = HeuristicDetector.scan(&FeatureBuilder::build(&trades));
        let c = find(&candidates, "consecutive_losses").unwrap();
        assert_eq!(c.severity, alert_core::Severity::Medium);
        assert!((c.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn stop_loss_missing_rate_point_six_is_critical() {
        let mut trades = vec![
            trade(0, "2024-03-04 09:00:00", 30, 5.0),
            trade(1, "2024-03-05 09:00:00", 30, -2.0),
            trade(2, "2024-03-06 09:00:00", 30, 7.0),
            trade(3, "2024-03-07 09:00:00", 30, -1.0),
            trade(4, "2024-03-08 09:00:00", 30, 3.0),
        ];
        trades[0].stop_loss = None;
        trades[1].stop_loss = Some(0.0);
        trades[2].stop_loss = None;

        let candidates = HeuristicDetector.scan(&FeatureBuilder::build(&trades));
        let c = find(&candidates, "missing_stop_loss").unwrap();
        assert_eq!(c.severity, alert_core::Severity::Critical);
        assert!((c.confidence - 0.9).abs() < 1e-9);
        assert_eq!(c.trigger_conditions["missing_rate"], 0.6);
        assert_eq!(c.trigger_conditions["trades_without_sl"], 3);
    }

    #[test]
    fn quick_trade_after_loss_fires_once() {
        let mut trades: Vec<Trade> = (0..10)
            .map(|i| {
                trade(
                    i,
                    &format!("2024-03-{:02} 09:00:00", 4 + i),
                    30,
                    if i == 2 || i == 5 { -4.0 } else { 6.0 },
                )
            })
            .collect();
        // The trade after the first loss comes only 1 hour later.
        trades[3].entry_time = Some(ts("2024-03-06 10:00:00"));
        trades[3].exit_time = Some(ts("2024-03-06 10:30:00"));

        let candidates = HeuristicDetector.scan(&FeatureBuilder::build(&trades));
        let c = find(&candidates, "quick_trade_after_loss").unwrap();
        assert_eq!(c.severity, alert_core::Severity::High);
        let hours = c.trigger_conditions["hours_after_loss"].as_f64().unwrap();
        assert!((hours - 1.0).abs() < 1e-6);
        assert_eq!(c.trigger_conditions["loss_amount"], -4.0);
        assert_eq!(
            candidates
                .iter()
                .filter(|c| c.trigger_conditions["pattern"] == "quick_trade_after_loss")
                .count(),
            1
        );
    }

    #[test]
    fn weak_trading_hour_reports_worst_bucket() {
        let mut trades = Vec::new();
        // Hour 14: six trades, one win.
        for i in 0..6 {
            trades.push(trade(
                i,
                &format!("2024-03-05 14:{:02}:00", i * 9),
                30,
                if i == 0 { 4.0 } else { -3.0 },
            ));
        }
        // Hours 9 and 10: profitable buckets.
        for i in 0..5 {
            trades.push(trade(100 + i, &format!("2024-03-05 09:{:02}:00", i * 10), 30, 5.0));
            trades.push(trade(200 + i, &format!("2024-03-05 10:{:02}:00", i * 10), 30, 5.0));
        }

        let candidates = HeuristicDetector.scan(&FeatureBuilder::build(&trades));
        let c = find(&candidates, "weak_trading_hour").unwrap();
        assert_eq!(c.trigger_conditions["hour"], 14);
        assert_eq!(c.trigger_conditions["trade_count"], 6);
        assert!(c.trigger_conditions["win_rate"].as_f64().unwrap() < 0.30);
        assert_eq!(c.severity, alert_core::Severity::Medium);
    }

    #[test]
    fn weak_trading_day_needs_three_qualifying_buckets() {
        // 16 trades all on one weekday: only one bucket, so no day alert.
        let trades: Vec<Trade> = (0..16)
            .map(|i| trade(i, &format!("2024-03-05 {:02}:00:00", 6 + (i % 8)), 30, 5.0))
            .collect();
        let candidates = HeuristicDetector.scan(&FeatureBuilder::build(&trades));
        assert!(find(&candidates, "weak_trading_day").is_none());
    }

    #[test]
    fn duration_bucket_weakness_on_losing_scalps() {
        let mut trades = Vec::new();
        for i in 0..6 {
            // Scalps, five of six losing.
            trades.push(trade(
                i,
                &format!("2024-03-{:02} 09:00:00", 4 + i),
                5,
                if i == 0 { 2.0 } else { -3.0 },
            ));
        }
        for i in 0..6 {
            trades.push(trade(10 + i, &format!("2024-03-{:02} 11:00:00", 4 + i), 60, 5.0));
        }

        let candidates = HeuristicDetector.scan(&FeatureBuilder::build(&trades));
        let c = candidates
            .iter()
            .find(|c| {
                c.trigger_conditions["pattern"] == "duration_bucket_weakness"
                    && c.trigger_conditions["bucket"] == "Scalp"
            })
            .expect("scalp bucket should fire");
        assert_eq!(c.trigger_conditions["trade_count"], 6);
        assert!((c.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn event_time_proximity_counts_news_window_trades() {
        let trades = vec![
            trade(0, "2024-03-05 13:30:00", 30, 5.0),
            trade(1, "2024-03-06 19:05:00", 30, -2.0),
            trade(2, "2024-03-07 10:00:00", 30, 3.0),
        ];
        let candidates = HeuristicDetector.scan(&FeatureBuilder::build(&trades));
        let c = find(&candidates, "event_time_proximity").unwrap();
        assert_eq!(c.trigger_conditions["event_trade_count"], 2);
        assert_eq!(c.severity, alert_core::Severity::High);
    }

    #[test]
    fn insufficient_data_yields_nothing() {
        let trades = vec![
            trade(0, "2024-03-04 09:00:00", 30, 5.0),
            trade(1, "2024-03-05 09:00:00", 30, -2.0),
            trade(2, "2024-03-06 09:00:00", 30, 7.0),
        ];
        let candidates = HeuristicDetector.scan(&FeatureBuilder::build(&trades));
        assert!(candidates.is_empty());
    }
}
