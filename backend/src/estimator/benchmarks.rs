//! Industry benchmarks behind the lost-revenue estimate.
//!
//! A single authoritative table. Changing a value here changes every figure the
//! calculator reports, so the pinned scenario tests in `tests/estimator_test.rs`
//! must be updated alongside it.

use crate::models::funnel_models::FollowUpIntensity;

pub const DAYS_PER_MONTH: f64 = 30.0;

/// Share of qualified new opt-ins an average team books onto a call.
pub const INDUSTRY_BOOKING_RATE: f64 = 0.30;

/// Share of re-contacted leads that pick up at all.
pub const FOLLOW_UP_PICK_UP_RATE: f64 = 0.35;

pub const BASE_NO_SHOW_REVIVE_RATE: f64 = 0.20;
pub const BASE_NEW_OPTIN_REVIVE_RATE: f64 = 0.15;
pub const BASE_PIPELINE_REVIVE_RATE: f64 = 0.10;

/// Revived leads show up less reliably than fresh bookings.
pub const REVIVED_SHOW_UP_DISCOUNT: f64 = 0.80;

/// Fraction of dormant CRM leads still worth contacting.
pub const DORMANT_LEAD_VIABILITY: f64 = 0.85;

/// Half-width of the reported deal-count band.
pub const DEAL_RANGE_SPREAD: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowUpBoost {
    pub intensity: FollowUpIntensity,
    pub multiplier: f64,
}

pub const FOLLOW_UP_MULTIPLIERS: [FollowUpBoost; 4] = [
    FollowUpBoost { intensity: FollowUpIntensity::None, multiplier: 1.0 },
    FollowUpBoost { intensity: FollowUpIntensity::Minimal, multiplier: 1.2 },
    FollowUpBoost { intensity: FollowUpIntensity::Medium, multiplier: 1.5 },
    FollowUpBoost { intensity: FollowUpIntensity::High, multiplier: 2.0 },
];

pub fn follow_up_multiplier(intensity: FollowUpIntensity) -> f64 {
    FOLLOW_UP_MULTIPLIERS
        .iter()
        .find(|boost| boost.intensity == intensity)
        .map(|boost| boost.multiplier)
        .unwrap_or(1.0)
}

/// Scale a base revive rate by follow-up effort, never past 100%.
pub fn effective_revive_rate(base: f64, intensity: FollowUpIntensity) -> f64 {
    (base * follow_up_multiplier(intensity)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_intensity_has_a_multiplier() {
        for intensity in FollowUpIntensity::ALL {
            assert!(
                FOLLOW_UP_MULTIPLIERS.iter().any(|b| b.intensity == intensity),
                "missing multiplier for {:?}",
                intensity
            );
        }
    }

    #[test]
    fn multipliers_grow_with_effort() {
        let values: Vec<f64> = FollowUpIntensity::ALL
            .iter()
            .map(|i| follow_up_multiplier(*i))
            .collect();
        assert_eq!(values, vec![1.0, 1.2, 1.5, 2.0]);
    }

    #[test]
    fn effective_rate_is_capped() {
        assert_eq!(effective_revive_rate(0.9, FollowUpIntensity::High), 1.0);
        assert!((effective_revive_rate(BASE_NO_SHOW_REVIVE_RATE, FollowUpIntensity::Medium) - 0.3).abs() < 1e-12);
    }
}
