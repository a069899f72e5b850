use serde::{Deserialize, Serialize};

/// How hard the sales team chases leads that went cold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowUpIntensity {
    None,
    Minimal,
    Medium,
    High,
}

impl FollowUpIntensity {
    pub const ALL: [FollowUpIntensity; 4] = [
        FollowUpIntensity::None,
        FollowUpIntensity::Minimal,
        FollowUpIntensity::Medium,
        FollowUpIntensity::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FollowUpIntensity::None => "none",
            FollowUpIntensity::Minimal => "minimal",
            FollowUpIntensity::Medium => "medium",
            FollowUpIntensity::High => "high",
        }
    }
}

/// One calculator submission. Rates are fractions in [0, 1], counts are per day
/// unless noted. Out-of-range values are clamped by the estimator.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FunnelInput {
    pub average_deal_size: f64,
    #[serde(default)]
    pub average_order_value: Option<f64>,
    pub daily_leads: f64,
    pub unqualified_fraction: f64,
    pub daily_booked_calls: f64,
    pub total_crm_leads: f64,
    pub show_up_rate: f64,
    pub conversion_rate: f64,
    pub follow_up_intensity: FollowUpIntensity,
    // Informational only.
    #[serde(default)]
    pub num_sales_reps: Option<u32>,
}

/// Leads, deals and money recovered by a single campaign.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CampaignBreakdown {
    pub recoverable_leads: f64,
    pub closed_deals: f64,
    /// Closed deals valued at the average deal size.
    pub revenue: f64,
    /// Closed deals valued at the average order value (or deal size).
    pub revenue_alt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRating {
    pub tier: &'static str,
    pub color: &'static str,
    pub definition: &'static str,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRatings {
    pub show_up_rate: PerformanceRating,
    pub conversion_rate: PerformanceRating,
    pub disqualification_rate: PerformanceRating,
    pub activity_rate: PerformanceRating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DealRange {
    pub lower: u64,
    pub upper: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelResult {
    pub total_recovered_revenue: f64,
    pub total_recovered_revenue_alt: f64,
    pub deal_count_range: DealRange,
    pub campaign_a: CampaignBreakdown,
    pub campaign_b: CampaignBreakdown,
    pub campaign_c: CampaignBreakdown,
    pub performance_ratings: PerformanceRatings,
    pub monthly_leads: f64,
    pub monthly_booked_calls: f64,
    pub qualified_monthly_leads: f64,
    pub no_shows_monthly: f64,
    pub crm_age_months: f64,
}

impl FunnelResult {
    /// Revenue of campaigns A, B and C, in that order.
    pub fn campaign_revenue(&self) -> [f64; 3] {
        [
            self.campaign_a.revenue,
            self.campaign_b.revenue,
            self.campaign_c.revenue,
        ]
    }

    pub fn total_closed_deals(&self) -> f64 {
        self.campaign_a.closed_deals + self.campaign_b.closed_deals + self.campaign_c.closed_deals
    }
}
