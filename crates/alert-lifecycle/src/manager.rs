use std::sync::Arc;

use alert_core::{AlertError, AlertStatus, AlertTimeframe, Severity, Trade};
use chrono::{Duration, NaiveTime, Utc};
use dashmap::DashMap;
use serde_json::json;
use signal_detectors::SignalAggregator;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{
    format_ts, Alert, AlertHistory, AlertPage, AlertSettings, AlertSettingsUpdate, AlertStats,
    AlertStatsReport, AlertSummary, CategoryCount, GeneratedAlerts, Pagination,
};

/// Drives the alert state machine: generation with 24-hour deduplication,
/// settings filtering, snooze/acknowledge/expire transitions and derived
/// statistics. One instance per process, cheap to share.
pub struct AlertLifecycleManager {
    pool: sqlx::AnyPool,
    aggregator: SignalAggregator,
    /// Serializes generation per (user, analysis) so two racing requests
    /// cannot both miss the dedup check and write duplicate sets.
    generation_locks: DashMap<(String, String), Arc<Mutex<()>>>,
}

impl AlertLifecycleManager {
    pub fn new(pool: sqlx::AnyPool) -> Self {
        Self::with_aggregator(pool, SignalAggregator::new())
    }

    pub fn with_aggregator(pool: sqlx::AnyPool, aggregator: SignalAggregator) -> Self {
        Self {
            pool,
            aggregator,
            generation_locks: DashMap::new(),
        }
    }

    /// Get a reference to the underlying database pool
    pub fn pool(&self) -> &sqlx::AnyPool {
        &self.pool
    }

    /// Create the alert tables if they do not exist yet.
    pub async fn init_tables(&self) -> Result<(), AlertError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS alerts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                analysis_id TEXT,
                alert_type TEXT NOT NULL,
                severity TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                confidence REAL NOT NULL,
                timeframe TEXT NOT NULL,
                trigger_conditions TEXT,
                suggested_actions TEXT,
                status TEXT NOT NULL DEFAULT 'active',
                acknowledged_at TEXT,
                snoozed_until TEXT,
                created_at TEXT NOT NULL,
                expires_at TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_alerts_user_created
             ON alerts (user_id, created_at)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS alert_settings (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL UNIQUE,
                enabled INTEGER NOT NULL DEFAULT 1,
                min_confidence REAL NOT NULL DEFAULT 0.7,
                in_app_alerts INTEGER NOT NULL DEFAULT 1,
                email_alerts INTEGER NOT NULL DEFAULT 0,
                push_notifications INTEGER NOT NULL DEFAULT 0,
                show_pattern_alerts INTEGER NOT NULL DEFAULT 1,
                show_behavioral_alerts INTEGER NOT NULL DEFAULT 1,
                show_time_based_alerts INTEGER NOT NULL DEFAULT 1,
                show_market_alerts INTEGER NOT NULL DEFAULT 0,
                real_time_alerts INTEGER NOT NULL DEFAULT 1,
                daily_summary INTEGER NOT NULL DEFAULT 1,
                weekly_report INTEGER NOT NULL DEFAULT 0,
                default_snooze_hours INTEGER NOT NULL DEFAULT 24,
                created_at TEXT,
                updated_at TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS alert_history (
                id TEXT PRIMARY KEY,
                alert_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                action TEXT NOT NULL,
                action_details TEXT,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetch the user's settings, creating them with documented defaults on
    /// first access.
    pub async fn get_settings(&self, user_id: &str) -> Result<AlertSettings, AlertError> {
        let existing: Option<AlertSettings> =
            sqlx::query_as("SELECT * FROM alert_settings WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        if let Some(settings) = existing {
            return Ok(settings);
        }

        let settings = AlertSettings::defaults_for(user_id);
        sqlx::query(
            "INSERT INTO alert_settings (
                id, user_id, enabled, min_confidence, in_app_alerts,
                email_alerts, push_notifications, show_pattern_alerts,
                show_behavioral_alerts, show_time_based_alerts,
                show_market_alerts, real_time_alerts, daily_summary,
                weekly_report, default_snooze_hours, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&settings.id)
        .bind(&settings.user_id)
        .bind(settings.enabled)
        .bind(settings.min_confidence)
        .bind(settings.in_app_alerts)
        .bind(settings.email_alerts)
        .bind(settings.push_notifications)
        .bind(settings.show_pattern_alerts)
        .bind(settings.show_behavioral_alerts)
        .bind(settings.show_time_based_alerts)
        .bind(settings.show_market_alerts)
        .bind(settings.real_time_alerts)
        .bind(settings.daily_summary)
        .bind(settings.weekly_report)
        .bind(settings.default_snooze_hours)
        .bind(&settings.created_at)
        .bind(&settings.updated_at)
        .execute(&self.pool)
        .await?;

        info!(user_id, "created default alert settings");
        Ok(settings)
    }

    /// Apply a partial settings update. Out-of-range values are rejected
    /// before any state change.
    pub async fn update_settings(
        &self,
        user_id: &str,
        update: &AlertSettingsUpdate,
    ) -> Result<AlertSettings, AlertError> {
        if let Some(mc) = update.min_confidence {
            if !(0.0..=1.0).contains(&mc) {
                return Err(AlertError::Validation(format!(
                    "min_confidence must be within [0, 1], got {mc}"
                )));
            }
        }
        if let Some(hours) = update.default_snooze_hours {
            if !(1..=168).contains(&hours) {
                return Err(AlertError::Validation(format!(
                    "default_snooze_hours must be within [1, 168], got {hours}"
                )));
            }
        }

        let mut settings = self.get_settings(user_id).await?;
        if let Some(v) = update.enabled {
            settings.enabled = v;
        }
        if let Some(v) = update.min_confidence {
            settings.min_confidence = v;
        }
        if let Some(v) = update.in_app_alerts {
            settings.in_app_alerts = v;
        }
        if let Some(v) = update.email_alerts {
            settings.email_alerts = v;
        }
        if let Some(v) = update.push_notifications {
            settings.push_notifications = v;
        }
        if let Some(v) = update.show_pattern_alerts {
            settings.show_pattern_alerts = v;
        }
        if let Some(v) = update.show_behavioral_alerts {
            settings.show_behavioral_alerts = v;
        }
        if let Some(v) = update.show_time_based_alerts {
            settings.show_time_based_alerts = v;
        }
        if let Some(v) = update.show_market_alerts {
            settings.show_market_alerts = v;
        }
        if let Some(v) = update.real_time_alerts {
            settings.real_time_alerts = v;
        }
        if let Some(v) = update.daily_summary {
            settings.daily_summary = v;
        }
        if let Some(v) = update.weekly_report {
            settings.weekly_report = v;
        }
        if let Some(v) = update.default_snooze_hours {
            settings.default_snooze_hours = v;
        }
        settings.updated_at = Some(format_ts(Utc::now()));

        sqlx::query(
            "UPDATE alert_settings SET
                enabled = ?, min_confidence = ?, in_app_alerts = ?,
                email_alerts = ?, push_notifications = ?,
                show_pattern_alerts = ?, show_behavioral_alerts = ?,
                show_time_based_alerts = ?, show_market_alerts = ?,
                real_time_alerts = ?, daily_summary = ?, weekly_report = ?,
                default_snooze_hours = ?, updated_at = ?
             WHERE user_id = ?",
        )
        .bind(settings.enabled)
        .bind(settings.min_confidence)
        .bind(settings.in_app_alerts)
        .bind(settings.email_alerts)
        .bind(settings.push_notifications)
        .bind(settings.show_pattern_alerts)
        .bind(settings.show_behavioral_alerts)
        .bind(settings.show_time_based_alerts)
        .bind(settings.show_market_alerts)
        .bind(settings.real_time_alerts)
        .bind(settings.daily_summary)
        .bind(settings.weekly_report)
        .bind(settings.default_snooze_hours)
        .bind(&settings.updated_at)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(settings)
    }

    /// Generate alerts for one analysis snapshot of trades.
    ///
    /// A set generated for the same (user, analysis) within the last 24 hours
    /// is returned unchanged unless `force_regenerate` is set. All writes for
    /// one generation pass are transactional: either the full alert set plus
    /// its history lands, or nothing does.
    pub async fn generate(
        &self,
        user_id: &str,
        analysis_id: &str,
        trades: &[Trade],
        timeframe: AlertTimeframe,
        force_regenerate: bool,
    ) -> Result<GeneratedAlerts, AlertError> {
        let settings = self.get_settings(user_id).await?;
        let now = Utc::now();
        if !settings.enabled {
            debug!(user_id, "alerts disabled in settings");
            return Ok(GeneratedAlerts {
                alerts: Vec::new(),
                summary: AlertSummary::from_alerts(&[], now),
                generated_at: format_ts(now),
                reused: false,
            });
        }

        let lock = self
            .generation_locks
            .entry((user_id.to_string(), analysis_id.to_string()))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        if !force_regenerate {
            let since = format_ts(now - Duration::hours(24));
            let recent: Vec<Alert> = sqlx::query_as(
                "SELECT * FROM alerts
                 WHERE user_id = ? AND analysis_id = ? AND created_at >= ?
                 ORDER BY created_at DESC",
            )
            .bind(user_id)
            .bind(analysis_id)
            .bind(&since)
            .fetch_all(&self.pool)
            .await?;

            if !recent.is_empty() {
                debug!(
                    user_id,
                    analysis_id,
                    count = recent.len(),
                    "returning alert set generated within the last 24 hours"
                );
                let summary = AlertSummary::from_alerts(&recent, now);
                return Ok(GeneratedAlerts {
                    alerts: recent,
                    summary,
                    generated_at: format_ts(now),
                    reused: true,
                });
            }
        }

        let candidates = self.aggregator.run(trades);
        let created_at = format_ts(now);
        let mut alerts = Vec::new();

        let mut tx = self.pool.begin().await?;
        for candidate in candidates.iter().filter(|c| settings.allows(c)) {
            let expires_at =
                format_ts(now + Duration::days(candidate.timeframe.expiry_days()));
            let alert = Alert {
                id: Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                analysis_id: Some(analysis_id.to_string()),
                alert_type: candidate.category.as_str().to_string(),
                severity: candidate.severity.as_str().to_string(),
                title: candidate.title.clone(),
                description: candidate.description.clone(),
                confidence: candidate.confidence,
                timeframe: candidate.timeframe.as_str().to_string(),
                trigger_conditions: Some(serde_json::to_string(&candidate.trigger_conditions)?),
                suggested_actions: Some(serde_json::to_string(&candidate.suggested_actions)?),
                status: AlertStatus::Active.as_str().to_string(),
                acknowledged_at: None,
                snoozed_until: None,
                created_at: Some(created_at.clone()),
                expires_at: Some(expires_at),
            };

            sqlx::query(
                "INSERT INTO alerts (
                    id, user_id, analysis_id, alert_type, severity, title,
                    description, confidence, timeframe, trigger_conditions,
                    suggested_actions, status, acknowledged_at, snoozed_until,
                    created_at, expires_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&alert.id)
            .bind(&alert.user_id)
            .bind(&alert.analysis_id)
            .bind(&alert.alert_type)
            .bind(&alert.severity)
            .bind(&alert.title)
            .bind(&alert.description)
            .bind(alert.confidence)
            .bind(&alert.timeframe)
            .bind(&alert.trigger_conditions)
            .bind(&alert.suggested_actions)
            .bind(&alert.status)
            .bind(&alert.acknowledged_at)
            .bind(&alert.snoozed_until)
            .bind(&alert.created_at)
            .bind(&alert.expires_at)
            .execute(&mut *tx)
            .await?;

            Self::insert_history(
                &mut tx,
                &alert.id,
                user_id,
                "created",
                &json!({
                    "source": candidate.detector,
                    "requested_timeframe": timeframe.as_str(),
                }),
                &created_at,
            )
            .await?;

            alerts.push(alert);
        }
        tx.commit().await?;

        info!(
            user_id,
            analysis_id,
            count = alerts.len(),
            "generated alert set"
        );
        Ok(GeneratedAlerts {
            summary: AlertSummary::from_alerts(&alerts, now),
            alerts,
            generated_at: created_at,
            reused: false,
        })
    }

    /// Page through a user's alerts, newest first, with live stats.
    ///
    /// A `status` filter of `Active` means the derived predicate: snoozed
    /// alerts whose snooze has lapsed are included, future-snoozed and
    /// expired-by-time ones are not.
    pub async fn list_for_user(
        &self,
        user_id: &str,
        status: Option<AlertStatus>,
        severity: Option<Severity>,
        limit: i64,
        offset: i64,
    ) -> Result<AlertPage, AlertError> {
        if !(1..=100).contains(&limit) {
            return Err(AlertError::Validation(format!(
                "limit must be within [1, 100], got {limit}"
            )));
        }
        if offset < 0 {
            return Err(AlertError::Validation(format!(
                "offset must be non-negative, got {offset}"
            )));
        }

        let now = Utc::now();
        let now_s = format_ts(now);

        let mut where_sql = String::from("user_id = ?");
        let mut bind_now = 0usize;
        match status {
            Some(AlertStatus::Active) => {
                where_sql.push_str(
                    " AND status IN ('active', 'snoozed')
                      AND (expires_at IS NULL OR expires_at > ?)
                      AND (snoozed_until IS NULL OR snoozed_until <= ?)",
                );
                bind_now = 2;
            }
            Some(other) => {
                where_sql.push_str(&format!(" AND status = '{}'", other.as_str()));
            }
            None => {}
        }
        if let Some(sev) = severity {
            where_sql.push_str(&format!(" AND severity = '{}'", sev.as_str()));
        }

        let count_sql = format!("SELECT COUNT(*) FROM alerts WHERE {where_sql}");
        let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql).bind(user_id);
        for _ in 0..bind_now {
            count_q = count_q.bind(now_s.clone());
        }
        let total = count_q.fetch_one(&self.pool).await?;

        let rows_sql = format!(
            "SELECT * FROM alerts WHERE {where_sql}
             ORDER BY created_at DESC LIMIT ? OFFSET ?"
        );
        let mut rows_q = sqlx::query_as::<_, Alert>(&rows_sql).bind(user_id);
        for _ in 0..bind_now {
            rows_q = rows_q.bind(now_s.clone());
        }
        let alerts = rows_q
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let stats = self.calculate_stats(user_id).await?;
        Ok(AlertPage {
            alerts,
            stats,
            pagination: Pagination {
                total,
                limit,
                offset,
                has_more: offset + limit < total,
            },
        })
    }

    /// Acknowledge an alert. Allowed from active or snoozed; terminal for
    /// user-facing purposes afterwards.
    pub async fn acknowledge(
        &self,
        user_id: &str,
        alert_id: &str,
        notes: Option<&str>,
    ) -> Result<Alert, AlertError> {
        let now_s = format_ts(Utc::now());

        let mut tx = self.pool.begin().await?;
        let updated = sqlx::query(
            "UPDATE alerts SET status = 'acknowledged', acknowledged_at = ?
             WHERE id = ? AND user_id = ? AND status IN ('active', 'snoozed')",
        )
        .bind(&now_s)
        .bind(alert_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            drop(tx);
            let existing = self.fetch_alert(user_id, alert_id).await?;
            return Err(AlertError::Validation(format!(
                "alert {alert_id} is {}; only active or snoozed alerts can be acknowledged",
                existing.status
            )));
        }

        Self::insert_history(
            &mut tx,
            alert_id,
            user_id,
            "acknowledged",
            &json!({ "notes": notes }),
            &now_s,
        )
        .await?;
        tx.commit().await?;

        self.fetch_alert(user_id, alert_id).await
    }

    /// Snooze an alert for `duration_hours` (bounded to one hour .. one week).
    pub async fn snooze(
        &self,
        user_id: &str,
        alert_id: &str,
        duration_hours: i64,
        reason: Option<&str>,
    ) -> Result<Alert, AlertError> {
        if !(1..=168).contains(&duration_hours) {
            return Err(AlertError::Validation(format!(
                "snooze duration must be within [1, 168] hours, got {duration_hours}"
            )));
        }

        let now = Utc::now();
        let now_s = format_ts(now);
        let snoozed_until = format_ts(now + Duration::hours(duration_hours));

        let mut tx = self.pool.begin().await?;
        let updated = sqlx::query(
            "UPDATE alerts SET status = 'snoozed', snoozed_until = ?
             WHERE id = ? AND user_id = ? AND status IN ('active', 'snoozed')",
        )
        .bind(&snoozed_until)
        .bind(alert_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            drop(tx);
            let existing = self.fetch_alert(user_id, alert_id).await?;
            return Err(AlertError::Validation(format!(
                "alert {alert_id} is {}; only active or snoozed alerts can be snoozed",
                existing.status
            )));
        }

        Self::insert_history(
            &mut tx,
            alert_id,
            user_id,
            "snoozed",
            &json!({
                "duration_hours": duration_hours,
                "reason": reason,
                "snoozed_until": snoozed_until,
            }),
            &now_s,
        )
        .await?;
        tx.commit().await?;

        self.fetch_alert(user_id, alert_id).await
    }

    /// Soft-delete: mark an alert expired from any non-terminal state.
    pub async fn expire(&self, user_id: &str, alert_id: &str) -> Result<Alert, AlertError> {
        let now_s = format_ts(Utc::now());

        let mut tx = self.pool.begin().await?;
        let updated = sqlx::query(
            "UPDATE alerts SET status = 'expired'
             WHERE id = ? AND user_id = ? AND status != 'expired'",
        )
        .bind(alert_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            drop(tx);
            let existing = self.fetch_alert(user_id, alert_id).await?;
            return Err(AlertError::Validation(format!(
                "alert {} is already expired",
                existing.id
            )));
        }

        Self::insert_history(
            &mut tx,
            alert_id,
            user_id,
            "expired",
            &json!({ "source": "user_deleted" }),
            &now_s,
        )
        .await?;
        tx.commit().await?;

        self.fetch_alert(user_id, alert_id).await
    }

    /// Audit trail for one alert, newest entries first.
    pub async fn history_for_alert(
        &self,
        user_id: &str,
        alert_id: &str,
    ) -> Result<Vec<AlertHistory>, AlertError> {
        self.fetch_alert(user_id, alert_id).await?;
        let history: Vec<AlertHistory> = sqlx::query_as(
            "SELECT * FROM alert_history WHERE alert_id = ? ORDER BY created_at DESC",
        )
        .bind(alert_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(history)
    }

    /// Live counters, always computed from current alert state.
    pub async fn calculate_stats(&self, user_id: &str) -> Result<AlertStats, AlertError> {
        let now = Utc::now();
        let now_s = format_ts(now);
        let today_start = format_ts(now.date_naive().and_time(NaiveTime::MIN).and_utc());

        let active: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM alerts
             WHERE user_id = ? AND status IN ('active', 'snoozed')
               AND (expires_at IS NULL OR expires_at > ?)
               AND (snoozed_until IS NULL OR snoozed_until <= ?)",
        )
        .bind(user_id)
        .bind(&now_s)
        .bind(&now_s)
        .fetch_one(&self.pool)
        .await?;

        let high_priority: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM alerts
             WHERE user_id = ? AND severity IN ('high', 'critical')
               AND status IN ('active', 'snoozed')
               AND (expires_at IS NULL OR expires_at > ?)
               AND (snoozed_until IS NULL OR snoozed_until <= ?)",
        )
        .bind(user_id)
        .bind(&now_s)
        .bind(&now_s)
        .fetch_one(&self.pool)
        .await?;

        let unacknowledged: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM alerts
             WHERE user_id = ? AND status = 'active'
               AND (expires_at IS NULL OR expires_at > ?)",
        )
        .bind(user_id)
        .bind(&now_s)
        .fetch_one(&self.pool)
        .await?;

        let today_generated: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM alerts WHERE user_id = ? AND created_at >= ?",
        )
        .bind(user_id)
        .bind(&today_start)
        .fetch_one(&self.pool)
        .await?;

        let acknowledged_today: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM alerts
             WHERE user_id = ? AND acknowledged_at IS NOT NULL AND acknowledged_at >= ?",
        )
        .bind(user_id)
        .bind(&today_start)
        .fetch_one(&self.pool)
        .await?;

        Ok(AlertStats {
            active,
            high_priority,
            unacknowledged,
            today_generated,
            acknowledged_today,
        })
    }

    /// Current counters plus the 30-day rollup (volume, most frequent
    /// category).
    pub async fn stats_report(&self, user_id: &str) -> Result<AlertStatsReport, AlertError> {
        let current = self.calculate_stats(user_id).await?;
        let since = format_ts(Utc::now() - Duration::days(30));

        let alerts_last_30_days: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM alerts WHERE user_id = ? AND created_at >= ?",
        )
        .bind(user_id)
        .bind(&since)
        .fetch_one(&self.pool)
        .await?;

        let most_common: Option<CategoryCount> = sqlx::query_as(
            "SELECT alert_type, COUNT(*) AS cnt FROM alerts
             WHERE user_id = ? AND created_at >= ?
             GROUP BY alert_type ORDER BY cnt DESC LIMIT 1",
        )
        .bind(user_id)
        .bind(&since)
        .fetch_optional(&self.pool)
        .await?;

        let (most_common_category, common_category_count) = match most_common {
            Some(row) => (Some(row.alert_type), row.cnt),
            None => (None, 0),
        };

        Ok(AlertStatsReport {
            current,
            alerts_last_30_days,
            most_common_category,
            common_category_count,
        })
    }

    async fn fetch_alert(&self, user_id: &str, alert_id: &str) -> Result<Alert, AlertError> {
        let alert: Option<Alert> =
            sqlx::query_as("SELECT * FROM alerts WHERE id = ? AND user_id = ?")
                .bind(alert_id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        alert.ok_or_else(|| AlertError::NotFound(format!("alert {alert_id}")))
    }

    async fn insert_history(
        tx: &mut sqlx::Transaction<'_, sqlx::Any>,
        alert_id: &str,
        user_id: &str,
        action: &str,
        details: &serde_json::Value,
        created_at: &str,
    ) -> Result<(), AlertError> {
        sqlx::query(
            "INSERT INTO alert_history (id, alert_id, user_id, action, action_details, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(alert_id)
        .bind(user_id)
        .bind(action)
        .bind(serde_json::to_string(details)?)
        .bind(created_at)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
