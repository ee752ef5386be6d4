use std::collections::HashMap;

use alert_core::{AlertCategory, AlertStatus, PatternCandidate, Severity};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical timestamp format for text columns. Fixed width so lexicographic
/// comparison in SQL matches chronological order.
pub(crate) fn format_ts(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_ts(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// A persisted behavioral-risk alert.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Alert {
    pub id: String,
    pub user_id: String,
    pub analysis_id: Option<String>,
    pub alert_type: String,
    pub severity: String,
    pub title: String,
    pub description: String,
    pub confidence: f64,
    pub timeframe: String,
    /// JSON evidence map from the detector that fired.
    pub trigger_conditions: Option<String>,
    /// JSON array of suggested actions.
    pub suggested_actions: Option<String>,
    pub status: String,
    pub acknowledged_at: Option<String>,
    pub snoozed_until: Option<String>,
    pub created_at: Option<String>,
    pub expires_at: Option<String>,
}

impl Alert {
    /// Derived "currently active" predicate. A snoozed alert whose
    /// `snoozed_until` has lapsed counts as active again without a stored
    /// transition; acknowledged and expired are terminal.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match AlertStatus::parse(&self.status) {
            Some(AlertStatus::Active) | Some(AlertStatus::Snoozed) => {}
            _ => return false,
        }
        if let Some(expires) = self.expires_at.as_deref().and_then(parse_ts) {
            if expires <= now {
                return false;
            }
        }
        if let Some(snoozed_until) = self.snoozed_until.as_deref().and_then(parse_ts) {
            if snoozed_until > now {
                return false;
            }
        }
        true
    }

    pub fn is_high_priority(&self) -> bool {
        Severity::parse(&self.severity)
            .map(|s| s.is_high_priority())
            .unwrap_or(false)
    }

    pub fn trigger_conditions_json(&self) -> serde_json::Value {
        self.trigger_conditions
            .as_deref()
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or(serde_json::Value::Null)
    }

    pub fn suggested_actions_list(&self) -> Vec<String> {
        self.suggested_actions
            .as_deref()
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default()
    }
}

/// Per-user alert preferences. Created lazily on first access via
/// [`AlertSettings::defaults_for`]; mutated only through explicit updates.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AlertSettings {
    pub id: String,
    pub user_id: String,
    pub enabled: bool,
    /// Minimum confidence an alert must carry to be persisted for this user.
    pub min_confidence: f64,
    pub in_app_alerts: bool,
    pub email_alerts: bool,
    pub push_notifications: bool,
    pub show_pattern_alerts: bool,
    pub show_behavioral_alerts: bool,
    pub show_time_based_alerts: bool,
    pub show_market_alerts: bool,
    pub real_time_alerts: bool,
    pub daily_summary: bool,
    pub weekly_report: bool,
    pub default_snooze_hours: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl AlertSettings {
    /// Documented defaults for a user that has never touched their settings.
    pub fn defaults_for(user_id: &str) -> Self {
        let now = format_ts(Utc::now());
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            enabled: true,
            min_confidence: 0.7,
            in_app_alerts: true,
            email_alerts: false,
            push_notifications: false,
            show_pattern_alerts: true,
            show_behavioral_alerts: true,
            show_time_based_alerts: true,
            show_market_alerts: false,
            real_time_alerts: true,
            daily_summary: true,
            weekly_report: false,
            default_snooze_hours: 24,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        }
    }

    /// Settings filter applied to candidates before persistence.
    pub fn allows(&self, candidate: &PatternCandidate) -> bool {
        if candidate.confidence < self.min_confidence {
            return false;
        }
        match candidate.category {
            AlertCategory::Pattern => self.show_pattern_alerts,
            AlertCategory::Behavioral => self.show_behavioral_alerts,
            AlertCategory::TimeBased => self.show_time_based_alerts,
            AlertCategory::Market => self.show_market_alerts,
        }
    }
}

/// Partial settings update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertSettingsUpdate {
    pub enabled: Option<bool>,
    pub min_confidence: Option<f64>,
    pub in_app_alerts: Option<bool>,
    pub email_alerts: Option<bool>,
    pub push_notifications: Option<bool>,
    pub show_pattern_alerts: Option<bool>,
    pub show_behavioral_alerts: Option<bool>,
    pub show_time_based_alerts: Option<bool>,
    pub show_market_alerts: Option<bool>,
    pub real_time_alerts: Option<bool>,
    pub daily_summary: Option<bool>,
    pub weekly_report: Option<bool>,
    pub default_snooze_hours: Option<i64>,
}

/// Append-only audit record for every state-changing alert action.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AlertHistory {
    pub id: String,
    pub alert_id: String,
    pub user_id: String,
    /// created | acknowledged | snoozed | expired
    pub action: String,
    pub action_details: Option<String>,
    pub created_at: Option<String>,
}

/// Live alert counters, always derived from current state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertStats {
    pub active: i64,
    pub high_priority: i64,
    pub unacknowledged: i64,
    pub today_generated: i64,
    pub acknowledged_today: i64,
}

/// Summary of one generated (or cached) alert set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total_alerts: i64,
    pub active_alerts: i64,
    pub high_priority_alerts: i64,
    pub unacknowledged_alerts: i64,
    pub by_type: HashMap<String, i64>,
    pub by_severity: HashMap<String, i64>,
}

impl AlertSummary {
    pub fn from_alerts(alerts: &[Alert], now: DateTime<Utc>) -> Self {
        let mut by_type: HashMap<String, i64> = HashMap::new();
        let mut by_severity: HashMap<String, i64> = HashMap::new();
        for alert in alerts {
            *by_type.entry(alert.alert_type.clone()).or_insert(0) += 1;
            *by_severity.entry(alert.severity.clone()).or_insert(0) += 1;
        }

        Self {
            total_alerts: alerts.len() as i64,
            active_alerts: alerts.iter().filter(|a| a.is_active(now)).count() as i64,
            high_priority_alerts: alerts.iter().filter(|a| a.is_high_priority()).count() as i64,
            unacknowledged_alerts: alerts
                .iter()
                .filter(|a| a.status == AlertStatus::Active.as_str())
                .count() as i64,
            by_type,
            by_severity,
        }
    }
}

/// Result of one `generate` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedAlerts {
    pub alerts: Vec<Alert>,
    pub summary: AlertSummary,
    pub generated_at: String,
    /// True when a set generated within the last 24 hours was returned
    /// instead of running the detectors again.
    pub reused: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

/// One page of a user's alerts plus live stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertPage {
    pub alerts: Vec<Alert>,
    pub stats: AlertStats,
    pub pagination: Pagination,
}

/// Current counters plus a 30-day historical rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertStatsReport {
    pub current: AlertStats,
    pub alerts_last_30_days: i64,
    pub most_common_category: Option<String>,
    pub common_category_count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct CategoryCount {
    pub alert_type: String,
    pub cnt: i64,
}
