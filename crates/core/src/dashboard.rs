//! Static dashboard payload served to authenticated users.
//!
//! The numbers are placeholders; there is no analytics backend behind them.

use serde::Serialize;

/// Headline counters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u32,
    pub active_users: u32,
    pub revenue: &'static str,
    pub growth: &'static str,
}

/// One row of the recent activity feed.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub id: u32,
    pub action: &'static str,
    pub time: &'static str,
    pub user: &'static str,
}

/// Direction of a quick-stat change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickStat {
    pub name: &'static str,
    pub value: &'static str,
    pub change: &'static str,
    pub trend: Trend,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub recent_activity: Vec<ActivityEntry>,
    pub quick_stats: Vec<QuickStat>,
}

/// Build the mock dashboard payload.
pub fn mock_dashboard() -> DashboardData {
    DashboardData {
        stats: DashboardStats {
            total_users: 150,
            active_users: 120,
            revenue: "$15,000",
            growth: "+12%",
        },
        recent_activity: vec![
            ActivityEntry { id: 1, action: "User login", time: "10:30 AM", user: "demo_user" },
            ActivityEntry { id: 2, action: "New registration", time: "11:15 AM", user: "new_user" },
            ActivityEntry { id: 3, action: "Password reset", time: "02:45 PM", user: "john_doe" },
            ActivityEntry { id: 4, action: "Profile update", time: "03:20 PM", user: "jane_smith" },
        ],
        quick_stats: vec![
            QuickStat { name: "Page Views", value: "4,200", change: "+12%", trend: Trend::Up },
            QuickStat { name: "Signups", value: "156", change: "+8%", trend: Trend::Up },
            QuickStat { name: "Active Sessions", value: "892", change: "-3%", trend: Trend::Down },
        ],
    }
}
