//! Lost-revenue estimate for a sales funnel.
//!
//! The estimate is the sum of three recovery campaigns:
//!
//! ```text
//! A  no-shows       no_shows × revive × (show_up × discount) × conversion
//! B  unbooked       qualified × booking_gap × revive × show_up × conversion
//! C  dormant CRM    viable_crm × revive × pick_up × (show_up × discount) × conversion
//! ```
//!
//! Revive rates are scaled by follow-up intensity. Closed-deal counts are
//! computed once; only the money per deal differs between the primary
//! (deal size) and alternate (order value) totals.

use crate::error::FunnelError;
use crate::estimator::benchmarks::{
    effective_revive_rate, BASE_NEW_OPTIN_REVIVE_RATE, BASE_NO_SHOW_REVIVE_RATE,
    BASE_PIPELINE_REVIVE_RATE, DAYS_PER_MONTH, DEAL_RANGE_SPREAD, DORMANT_LEAD_VIABILITY,
    FOLLOW_UP_PICK_UP_RATE, INDUSTRY_BOOKING_RATE, REVIVED_SHOW_UP_DISCOUNT,
};
use crate::estimator::ratings::{rate, RatingMetric};
use crate::models::funnel_models::{
    CampaignBreakdown, DealRange, FollowUpIntensity, FunnelInput, FunnelResult,
    PerformanceRatings,
};

/// Inputs after clamping. Everything downstream may assume these bounds.
#[derive(Debug, Clone, Copy)]
struct NormalizedFunnel {
    deal_size: f64,
    order_value: f64,
    daily_leads: f64,
    unqualified_fraction: f64,
    daily_booked_calls: f64,
    total_crm_leads: f64,
    show_up_rate: f64,
    conversion_rate: f64,
    intensity: FollowUpIntensity,
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn unit(value: f64) -> f64 {
    finite_or_zero(value).clamp(0.0, 1.0)
}

fn non_negative(value: f64) -> f64 {
    finite_or_zero(value).max(0.0)
}

/// Derived volumes and money: NaN becomes 0, overflow saturates at `f64::MAX`.
fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, f64::MAX)
    }
}

fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn normalize(input: &FunnelInput) -> Result<NormalizedFunnel, FunnelError> {
    let deal_size = input.average_deal_size;
    if !deal_size.is_finite() || deal_size <= 0.0 {
        return Err(FunnelError::InvalidInput {
            field: "average_deal_size",
            value: deal_size,
        });
    }

    let order_value = match input.average_order_value {
        Some(aov) if aov.is_finite() && aov > 0.0 => aov,
        _ => deal_size,
    };

    let daily_leads = non_negative(input.daily_leads);
    let unqualified_fraction = unit(input.unqualified_fraction);
    let qualified_capacity = daily_leads * (1.0 - unqualified_fraction);
    let daily_booked_calls = non_negative(input.daily_booked_calls).min(qualified_capacity);

    Ok(NormalizedFunnel {
        deal_size,
        order_value,
        daily_leads,
        unqualified_fraction,
        daily_booked_calls,
        total_crm_leads: non_negative(input.total_crm_leads),
        show_up_rate: unit(input.show_up_rate),
        conversion_rate: unit(input.conversion_rate),
        intensity: input.follow_up_intensity,
    })
}

fn campaign(recoverable_leads: f64, close_rate: f64, funnel: &NormalizedFunnel) -> CampaignBreakdown {
    let recoverable_leads = saturate(recoverable_leads);
    let closed_deals = saturate(recoverable_leads * close_rate);
    CampaignBreakdown {
        recoverable_leads,
        closed_deals,
        revenue: saturate(closed_deals * funnel.deal_size),
        revenue_alt: saturate(closed_deals * funnel.order_value),
    }
}

/// Estimate the monthly revenue a funnel is leaving on the table.
///
/// Fails only when `average_deal_size` is not a positive number; every other
/// field is clamped into range.
pub fn estimate(input: &FunnelInput) -> Result<FunnelResult, FunnelError> {
    let funnel = normalize(input)?;

    let monthly_leads = saturate(funnel.daily_leads * DAYS_PER_MONTH);
    let monthly_booked_calls = saturate(funnel.daily_booked_calls * DAYS_PER_MONTH);
    let qualified_monthly_leads = saturate(monthly_leads * (1.0 - funnel.unqualified_fraction));
    let no_shows_monthly = saturate(monthly_booked_calls * (1.0 - funnel.show_up_rate));
    let crm_age_months = saturate(ratio_or_zero(funnel.total_crm_leads, monthly_leads));

    let revived_show_up_rate = funnel.show_up_rate * REVIVED_SHOW_UP_DISCOUNT;

    // A: booked calls that never showed
    let campaign_a = campaign(
        no_shows_monthly * effective_revive_rate(BASE_NO_SHOW_REVIVE_RATE, funnel.intensity),
        revived_show_up_rate * funnel.conversion_rate,
        &funnel,
    );

    // B: qualified opt-ins that never booked
    let qualified_daily_leads = funnel.daily_leads * (1.0 - funnel.unqualified_fraction);
    let actual_booking_rate = ratio_or_zero(funnel.daily_booked_calls, qualified_daily_leads);
    let booking_gap = (INDUSTRY_BOOKING_RATE - actual_booking_rate).max(0.0);
    let campaign_b = campaign(
        qualified_monthly_leads
            * booking_gap
            * effective_revive_rate(BASE_NEW_OPTIN_REVIVE_RATE, funnel.intensity),
        funnel.show_up_rate * funnel.conversion_rate,
        &funnel,
    );

    // C: dormant CRM pipeline; a funnel with no inflow has no pipeline to revive
    let viable_dormant_leads = if funnel.daily_leads > 0.0 {
        funnel.total_crm_leads * DORMANT_LEAD_VIABILITY
    } else {
        0.0
    };
    let campaign_c = campaign(
        viable_dormant_leads * effective_revive_rate(BASE_PIPELINE_REVIVE_RATE, funnel.intensity),
        FOLLOW_UP_PICK_UP_RATE * revived_show_up_rate * funnel.conversion_rate,
        &funnel,
    );

    let total_recovered_revenue =
        saturate(campaign_a.revenue + campaign_b.revenue + campaign_c.revenue);
    let total_recovered_revenue_alt =
        saturate(campaign_a.revenue_alt + campaign_b.revenue_alt + campaign_c.revenue_alt);

    let average_deals = total_recovered_revenue / funnel.deal_size;
    let deal_count_range = DealRange {
        lower: (average_deals * (1.0 - DEAL_RANGE_SPREAD)).floor() as u64,
        upper: (average_deals * (1.0 + DEAL_RANGE_SPREAD)).ceil() as u64,
    };

    let activity_rate = ratio_or_zero(funnel.daily_booked_calls, funnel.daily_leads);
    let performance_ratings = PerformanceRatings {
        show_up_rate: rate(RatingMetric::ShowUp, funnel.show_up_rate * 100.0),
        conversion_rate: rate(RatingMetric::Conversion, funnel.conversion_rate * 100.0),
        disqualification_rate: rate(
            RatingMetric::Disqualification,
            funnel.unqualified_fraction * 100.0,
        ),
        activity_rate: rate(RatingMetric::Activity, activity_rate * 100.0),
    };

    tracing::debug!(
        intensity = funnel.intensity.as_str(),
        monthly_leads,
        crm_age_months,
        booking_gap,
        campaign_a = campaign_a.revenue,
        campaign_b = campaign_b.revenue,
        campaign_c = campaign_c.revenue,
        total = total_recovered_revenue,
        "Estimated lost revenue"
    );

    Ok(FunnelResult {
        total_recovered_revenue,
        total_recovered_revenue_alt,
        deal_count_range,
        campaign_a,
        campaign_b,
        campaign_c,
        performance_ratings,
        monthly_leads,
        monthly_booked_calls,
        qualified_monthly_leads,
        no_shows_monthly,
        crm_age_months,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> FunnelInput {
        FunnelInput {
            average_deal_size: 1000.0,
            average_order_value: None,
            daily_leads: 10.0,
            unqualified_fraction: 0.2,
            daily_booked_calls: 4.0,
            total_crm_leads: 600.0,
            show_up_rate: 0.5,
            conversion_rate: 0.5,
            follow_up_intensity: FollowUpIntensity::None,
            num_sales_reps: None,
        }
    }

    #[test]
    fn booked_calls_are_capped_at_qualified_capacity() {
        let mut raw = input();
        raw.daily_booked_calls = 50.0;
        let funnel = normalize(&raw).unwrap();
        assert!((funnel.daily_booked_calls - 8.0).abs() < 1e-9);
    }

    #[test]
    fn non_finite_values_become_zero() {
        let mut raw = input();
        raw.daily_leads = f64::NAN;
        raw.show_up_rate = f64::INFINITY;
        let funnel = normalize(&raw).unwrap();
        assert_eq!(funnel.daily_leads, 0.0);
        assert_eq!(funnel.show_up_rate, 0.0);
    }

    #[test]
    fn order_value_falls_back_to_deal_size() {
        let mut raw = input();
        raw.average_order_value = Some(0.0);
        assert_eq!(normalize(&raw).unwrap().order_value, 1000.0);
        raw.average_order_value = Some(250.0);
        assert_eq!(normalize(&raw).unwrap().order_value, 250.0);
    }

    #[test]
    fn nan_deal_size_is_rejected() {
        let mut raw = input();
        raw.average_deal_size = f64::NAN;
        assert!(matches!(
            estimate(&raw),
            Err(FunnelError::InvalidInput { field: "average_deal_size", .. })
        ));
    }

    #[test]
    fn crm_age_is_inventory_over_monthly_leads() {
        let result = estimate(&input()).unwrap();
        assert_eq!(result.monthly_leads, 300.0);
        assert_eq!(result.crm_age_months, 2.0);
    }

    #[test]
    fn huge_volumes_saturate_instead_of_going_nan() {
        let mut raw = input();
        raw.daily_leads = 1e307;
        raw.unqualified_fraction = 1.0;
        raw.total_crm_leads = 30000.0;
        let result = estimate(&raw).unwrap();

        assert_eq!(result.monthly_leads, f64::MAX);
        assert_eq!(result.qualified_monthly_leads, 0.0);
        assert!(result.crm_age_months.is_finite());
        for campaign in [result.campaign_a, result.campaign_b, result.campaign_c] {
            assert!(campaign.recoverable_leads.is_finite() && campaign.recoverable_leads >= 0.0);
        }
        assert!((result.campaign_c.recoverable_leads - 30000.0 * 0.85 * 0.10).abs() < 1e-6);
        assert!(result.campaign_c.revenue > 0.0);
    }

    #[test]
    fn saturate_maps_nan_and_overflow() {
        assert_eq!(saturate(f64::NAN), 0.0);
        assert_eq!(saturate(f64::INFINITY), f64::MAX);
        assert_eq!(saturate(-3.0), 0.0);
        assert_eq!(saturate(12.5), 12.5);
    }
}
