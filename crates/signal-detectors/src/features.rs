use alert_core::Trade;
use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use tracing::warn;

/// Per-trade derived features. Recomputed on every run, never persisted.
#[derive(Debug, Clone)]
pub struct TradeFeatures {
    pub trade: Trade,
    pub entry_time: DateTime<Utc>,
    /// `exit_time - entry_time` in minutes; 0.0 when the exit is unknown.
    pub duration_minutes: f64,
    /// False when `exit_time` was missing. Duration-based detectors skip
    /// rows without it rather than treating zero as a real duration.
    pub has_duration: bool,
    /// Hour of day, 0-23.
    pub hour: u32,
    pub weekday: Weekday,
    /// Position in the entry-time-sorted sequence.
    pub sequence: usize,
}

impl TradeFeatures {
    pub fn is_win(&self) -> bool {
        self.trade.is_win()
    }

    pub fn is_loss(&self) -> bool {
        self.trade.is_loss()
    }

    pub fn profit_loss(&self) -> f64 {
        self.trade.profit_loss
    }

    pub fn entry_date(&self) -> NaiveDate {
        self.entry_time.date_naive()
    }
}

/// Feature table over one batch of trades, sorted by entry time ascending.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    rows: Vec<TradeFeatures>,
}

impl FeatureTable {
    pub fn rows(&self) -> &[TradeFeatures] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn losing_rows(&self) -> impl Iterator<Item = &TradeFeatures> {
        self.rows.iter().filter(|r| r.is_loss())
    }

    pub fn loss_count(&self) -> usize {
        self.losing_rows().count()
    }

    /// Mean position size over rows that carry one.
    pub fn mean_lot_size(&self) -> Option<f64> {
        let sizes: Vec<f64> = self.rows.iter().filter_map(|r| r.trade.lot_size).collect();
        if sizes.is_empty() {
            return None;
        }
        Some(sizes.iter().sum::<f64>() / sizes.len() as f64)
    }
}

/// Normalizes a raw trade collection into a [`FeatureTable`].
///
/// Rows without an entry time are dropped (the batch never fails); rows
/// without an exit time get a zero duration and are flagged so duration
/// detectors can skip them. Pure function of its input.
pub struct FeatureBuilder;

impl FeatureBuilder {
    pub fn build(trades: &[Trade]) -> FeatureTable {
        let mut rows: Vec<TradeFeatures> = trades
            .iter()
            .filter_map(|trade| {
                let entry_time = match trade.entry_time {
                    Some(t) => t,
                    None => {
                        warn!(trade_id = %trade.id, "dropping trade with no entry time");
                        return None;
                    }
                };

                let (duration_minutes, has_duration) = match trade.exit_time {
                    Some(exit) => {
                        let minutes = (exit - entry_time).num_seconds() as f64 / 60.0;
                        (minutes.max(0.0), true)
                    }
                    None => (0.0, false),
                };

                Some(TradeFeatures {
                    trade: trade.clone(),
                    entry_time,
                    duration_minutes,
                    has_duration,
                    hour: entry_time.hour(),
                    weekday: entry_time.weekday(),
                    sequence: 0,
                })
            })
            .collect();

        rows.sort_by_key(|r| r.entry_time);
        for (i, row) in rows.iter_mut().enumerate() {
            row.sequence = i;
        }

        FeatureTable { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn trade(id: &str, entry: Option<&str>, exit: Option<&str>, pnl: f64) -> Trade {
        let parse = |s: &str| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .unwrap()
                .and_utc()
        };
        Trade {
            id: id.to_string(),
            symbol: None,
            entry_time: entry.map(parse),
            exit_time: exit.map(parse),
            profit_loss: pnl,
            lot_size: None,
            stop_loss: None,
        }
    }

    #[test]
    fn drops_rows_without_entry_time_and_sorts() {
        let trades = vec![
            trade("b", Some("2024-03-05 14:00:00"), Some("2024-03-05 14:30:00"), 10.0),
            trade("skip", None, None, -5.0),
            trade("a", Some("2024-03-05 09:00:00"), Some("2024-03-05 09:45:00"), -2.0),
        ];

        let table = FeatureBuilder::build(&trades);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].trade.id, "a");
        assert_eq!(table.rows()[1].trade.id, "b");
        assert_eq!(table.rows()[0].sequence, 0);
        assert_eq!(table.rows()[1].sequence, 1);
        assert_eq!(table.rows()[0].duration_minutes, 45.0);
    }

    #[test]
    fn missing_exit_means_zero_duration_unflagged() {
        let trades = vec![trade("open", Some("2024-03-05 10:15:00"), None, 3.0)];
        let table = FeatureBuilder::build(&trades);
        let row = &table.rows()[0];
        assert_eq!(row.duration_minutes, 0.0);
        assert!(!row.has_duration);
        assert_eq!(row.hour, 10);
        assert_eq!(row.weekday, Weekday::Tue);
    }
}
