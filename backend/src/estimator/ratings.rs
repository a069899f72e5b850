use crate::models::funnel_models::PerformanceRating;

/// A half-open percentage range `[min, max)` and the judgment attached to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingBucket {
    pub min: f64,
    pub max: f64,
    pub tier: &'static str,
    pub color: &'static str,
    pub definition: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingMetric {
    ShowUp,
    Conversion,
    Disqualification,
    Activity,
}

impl RatingMetric {
    pub const ALL: [RatingMetric; 4] = [
        RatingMetric::ShowUp,
        RatingMetric::Conversion,
        RatingMetric::Disqualification,
        RatingMetric::Activity,
    ];

    pub fn buckets(&self) -> &'static [RatingBucket] {
        match self {
            RatingMetric::ShowUp => &SHOW_UP_BUCKETS,
            RatingMetric::Conversion => &CONVERSION_BUCKETS,
            RatingMetric::Disqualification => &DISQUALIFICATION_BUCKETS,
            RatingMetric::Activity => &ACTIVITY_BUCKETS,
        }
    }
}

pub static SHOW_UP_BUCKETS: [RatingBucket; 5] = [
    RatingBucket { min: 0.0, max: 50.0, tier: "Critical", color: "red", definition: "Dangerously low; most prospects are not attending." },
    RatingBucket { min: 50.0, max: 60.0, tier: "Below Average", color: "orange", definition: "Below average; unreliable attendance." },
    RatingBucket { min: 60.0, max: 75.0, tier: "Steady", color: "yellow", definition: "Meets expectations; room for optimization." },
    RatingBucket { min: 75.0, max: 85.0, tier: "Reliable", color: "green", definition: "Strong; solid engagement practices." },
    RatingBucket { min: 85.0, max: 100.0, tier: "Outstanding", color: "blue", definition: "Exceptional; exceeds industry benchmarks." },
];

pub static CONVERSION_BUCKETS: [RatingBucket; 4] = [
    RatingBucket { min: 0.0, max: 20.0, tier: "Underperforming", color: "red", definition: "Conversion rate is far below benchmarks; major improvements needed." },
    RatingBucket { min: 20.0, max: 35.0, tier: "Developing", color: "orange", definition: "Below average; improvements are needed to close more deals." },
    RatingBucket { min: 35.0, max: 50.0, tier: "Steady", color: "yellow", definition: "Average performance; some optimization possible." },
    RatingBucket { min: 50.0, max: 100.0, tier: "High Performing", color: "green", definition: "Above average; good conversion practices." },
];

pub static DISQUALIFICATION_BUCKETS: [RatingBucket; 3] = [
    RatingBucket { min: 0.0, max: 10.0, tier: "Low", color: "green", definition: "Efficient lead qualification." },
    RatingBucket { min: 10.0, max: 30.0, tier: "Average", color: "yellow", definition: "Standard disqualification; monitor lead quality." },
    RatingBucket { min: 30.0, max: 100.0, tier: "High", color: "red", definition: "Many unqualified leads; improve lead generation." },
];

pub static ACTIVITY_BUCKETS: [RatingBucket; 3] = [
    RatingBucket { min: 0.0, max: 5.0, tier: "Low", color: "red", definition: "Low activity; increase outreach efforts." },
    RatingBucket { min: 5.0, max: 15.0, tier: "Average", color: "yellow", definition: "Standard activity; room for more calls." },
    RatingBucket { min: 15.0, max: 100.0, tier: "High", color: "green", definition: "Strong activity; good engagement." },
];

/// Find the bucket for a percentage in [0, 100].
///
/// The last bucket also covers exactly 100 and anything that falls through.
pub fn find_bucket(buckets: &'static [RatingBucket], percentage: f64) -> Option<&'static RatingBucket> {
    buckets
        .iter()
        .find(|bucket| percentage >= bucket.min && percentage < bucket.max)
        .or_else(|| buckets.last())
}

pub fn rate(metric: RatingMetric, percentage: f64) -> PerformanceRating {
    let percentage = if percentage.is_finite() {
        percentage.clamp(0.0, 100.0)
    } else {
        0.0
    };

    match find_bucket(metric.buckets(), percentage) {
        Some(bucket) => PerformanceRating {
            tier: bucket.tier,
            color: bucket.color,
            definition: bucket.definition,
            percentage,
        },
        // Tables are static and non-empty.
        None => PerformanceRating {
            tier: "Unknown",
            color: "gray",
            definition: "",
            percentage,
        },
    }
}
