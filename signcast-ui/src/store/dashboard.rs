//! Dashboard summary assembly
//!
//! Aggregates fleet counts, the partnership funnel, the top performers, and
//! the seeded chart series into one payload for the dashboard view.

use serde::{Deserialize, Serialize};
use signcast_common::types::{PartnershipStage, Terminal, TerminalStatus};

use super::core::Store;

/// One day of the seeded weekly health series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayHealth {
    pub day: String,
    pub uptime_pct: u8,
    pub exhibitions: u32,
}

/// One week of the seeded month-over-month comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekComparison {
    pub week: String,
    pub current: u32,
    pub previous: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TerminalCounts {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub maintenance: usize,
    /// `round(online / total * 100)`, 0 for an empty fleet
    pub online_pct: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreenCounts {
    pub total: u32,
    pub available: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageCount {
    pub stage: PartnershipStage,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyComparison {
    pub weeks: Vec<WeekComparison>,
    pub current_total: u32,
    pub previous_total: u32,
    /// `round((current - previous) / previous * 100)`, 0 when previous is 0
    pub change_pct: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub terminals: TerminalCounts,
    pub screens: ScreenCounts,
    pub media_count: usize,
    pub partnership_count: usize,
    pub partnerships_by_stage: Vec<StageCount>,
    /// Top 5 terminals by exhibition count, descending
    pub top_terminals: Vec<Terminal>,
    pub favorite_terminals: Vec<Terminal>,
    pub weekly_health: Vec<DayHealth>,
    pub monthly_exhibitions: MonthlyComparison,
}

impl Store {
    pub async fn dashboard_summary(&self) -> DashboardSummary {
        let inner = self.inner.read().await;

        let total = inner.terminals.len();
        let online = inner
            .terminals
            .iter()
            .filter(|t| t.status == TerminalStatus::Online)
            .count();
        let offline = inner
            .terminals
            .iter()
            .filter(|t| t.status == TerminalStatus::Offline)
            .count();
        let maintenance = total - online - offline;
        let online_pct = if total == 0 {
            0
        } else {
            ((online as f64 / total as f64) * 100.0).round() as u32
        };

        let screens = ScreenCounts {
            total: inner.terminals.iter().map(|t| t.screens.total).sum(),
            available: inner.terminals.iter().map(|t| t.screens.available).sum(),
        };

        let partnerships_by_stage: Vec<StageCount> = PartnershipStage::ALL
            .iter()
            .map(|stage| StageCount {
                stage: *stage,
                label: stage.label(),
                count: inner
                    .partnerships
                    .iter()
                    .filter(|p| p.stage == *stage)
                    .count(),
            })
            .collect();

        let mut top_terminals: Vec<Terminal> = inner.terminals.clone();
        top_terminals.sort_by(|a, b| {
            let ea = a.metrics.map(|m| m.exhibitions).unwrap_or(0);
            let eb = b.metrics.map(|m| m.exhibitions).unwrap_or(0);
            eb.cmp(&ea)
        });
        top_terminals.truncate(5);

        let favorite_terminals: Vec<Terminal> = inner
            .terminals
            .iter()
            .filter(|t| t.is_favorite)
            .cloned()
            .collect();

        let current_total: u32 = inner.monthly_exhibitions.iter().map(|w| w.current).sum();
        let previous_total: u32 = inner.monthly_exhibitions.iter().map(|w| w.previous).sum();
        let change_pct = if previous_total == 0 {
            0
        } else {
            (((current_total as f64 - previous_total as f64) / previous_total as f64) * 100.0)
                .round() as i32
        };

        DashboardSummary {
            terminals: TerminalCounts {
                total,
                online,
                offline,
                maintenance,
                online_pct,
            },
            screens,
            media_count: inner.media.len(),
            partnership_count: inner.partnerships.len(),
            partnerships_by_stage,
            top_terminals,
            favorite_terminals,
            weekly_health: inner.weekly_health.clone(),
            monthly_exhibitions: MonthlyComparison {
                weeks: inner.monthly_exhibitions.clone(),
                current_total,
                previous_total,
                change_pct,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_store_summary_is_all_zeros() {
        let store = Store::new();
        let summary = store.dashboard_summary().await;

        assert_eq!(summary.terminals.total, 0);
        assert_eq!(summary.terminals.online_pct, 0);
        assert_eq!(summary.screens.total, 0);
        assert_eq!(summary.media_count, 0);
        assert_eq!(summary.monthly_exhibitions.change_pct, 0);
        assert!(summary.top_terminals.is_empty());
        let stage_sum: usize = summary.partnerships_by_stage.iter().map(|s| s.count).sum();
        assert_eq!(stage_sum, 0);
    }

    #[tokio::test]
    async fn test_seeded_summary_is_consistent() {
        let store = Store::with_fixtures();
        let summary = store.dashboard_summary().await;

        assert!(summary.terminals.total > 0);
        assert_eq!(
            summary.terminals.total,
            summary.terminals.online + summary.terminals.offline + summary.terminals.maintenance
        );
        assert!(summary.terminals.online_pct <= 100);

        // Stage counts partition the partnership set
        let stage_sum: usize = summary.partnerships_by_stage.iter().map(|s| s.count).sum();
        assert_eq!(stage_sum, summary.partnership_count);

        // Top list is capped and sorted descending by exhibitions
        assert!(summary.top_terminals.len() <= 5);
        let exhibitions: Vec<u64> = summary
            .top_terminals
            .iter()
            .map(|t| t.metrics.map(|m| m.exhibitions).unwrap_or(0))
            .collect();
        assert!(exhibitions.windows(2).all(|w| w[0] >= w[1]));

        // Seeded series: 7 days and 4 weeks, 20000 vs 16500 → +21%
        assert_eq!(summary.weekly_health.len(), 7);
        assert_eq!(summary.monthly_exhibitions.weeks.len(), 4);
        assert_eq!(summary.monthly_exhibitions.current_total, 20000);
        assert_eq!(summary.monthly_exhibitions.previous_total, 16500);
        assert_eq!(summary.monthly_exhibitions.change_pct, 21);
    }
}
