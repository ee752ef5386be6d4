use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single closed (or still open) trade from the user's transaction log.
///
/// Entry/exit timestamps and stop-loss are optional because broker exports
/// routinely omit them; a missing stop-loss is a meaningful signal in its own
/// right, not bad data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub entry_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub exit_time: Option<DateTime<Utc>>,
    pub profit_loss: f64,
    /// Position size (lot size for forex/CFD, stake for binaries).
    #[serde(default)]
    pub lot_size: Option<f64>,
    #[serde(default)]
    pub stop_loss: Option<f64>,
}

impl Trade {
    pub fn is_win(&self) -> bool {
        self.profit_loss > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.profit_loss < 0.0
    }

    /// A stop-loss of zero is treated the same as an absent one.
    pub fn has_stop_loss(&self) -> bool {
        matches!(self.stop_loss, Some(sl) if sl != 0.0)
    }
}

/// Alert category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    Pattern,
    Behavioral,
    TimeBased,
    Market,
}

impl AlertCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCategory::Pattern => "pattern",
            AlertCategory::Behavioral => "behavioral",
            AlertCategory::TimeBased => "time_based",
            AlertCategory::Market => "market",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pattern" => Some(AlertCategory::Pattern),
            "behavioral" => Some(AlertCategory::Behavioral),
            "time_based" => Some(AlertCategory::TimeBased),
            "market" => Some(AlertCategory::Market),
            _ => None,
        }
    }
}

/// Alert severity. The numeric score is used only for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Ordinal score for sorting: low=1, medium=2, high=3, critical=4.
    pub fn score(&self) -> i32 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }

    pub fn is_high_priority(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

/// The alert's stated horizon of relevance, used to compute expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertTimeframe {
    NextTrade,
    NextDay,
    NextWeek,
    NextMonth,
}

impl AlertTimeframe {
    /// Days until a persisted alert with this horizon expires.
    pub fn expiry_days(&self) -> i64 {
        match self {
            AlertTimeframe::NextTrade => 1,
            _ => 7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertTimeframe::NextTrade => "next_trade",
            AlertTimeframe::NextDay => "next_day",
            AlertTimeframe::NextWeek => "next_week",
            AlertTimeframe::NextMonth => "next_month",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "next_trade" => Some(AlertTimeframe::NextTrade),
            "next_day" => Some(AlertTimeframe::NextDay),
            "next_week" => Some(AlertTimeframe::NextWeek),
            "next_month" => Some(AlertTimeframe::NextMonth),
            _ => None,
        }
    }
}

/// Stored lifecycle state of a persisted alert.
///
/// Transitions are monotonic except snoozed -> active, which is derived at
/// read time from `snoozed_until` rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Snoozed,
    Acknowledged,
    Expired,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Snoozed => "snoozed",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Expired => "expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(AlertStatus::Active),
            "snoozed" => Some(AlertStatus::Snoozed),
            "acknowledged" => Some(AlertStatus::Acknowledged),
            "expired" => Some(AlertStatus::Expired),
            _ => None,
        }
    }
}

/// An unpersisted detector finding, prior to settings filtering and storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternCandidate {
    /// Name of the detector that produced this candidate.
    pub detector: String,
    pub category: AlertCategory,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    /// 0.0 to 1.0
    pub confidence: f64,
    pub timeframe: AlertTimeframe,
    /// Exact numeric evidence that fired the rule (counts, rates, thresholds).
    pub trigger_conditions: serde_json::Value,
    pub suggested_actions: Vec<String>,
}
