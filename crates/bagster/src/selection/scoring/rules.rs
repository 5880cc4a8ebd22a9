use super::super::domain::Carrier;
use super::super::strategy::StrategyWeights;

const MAX_RATING: f64 = 5.0;
const NEUTRAL_DESTINATION_SCORE: f64 = 0.5;

/// Normalized [0,1] sub-scores for one carrier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SubScores {
    pub price: f64,
    pub rating: f64,
    pub destination: f64,
}

impl SubScores {
    pub(crate) fn weighted_total(&self, weights: &StrategyWeights) -> f64 {
        let total = weights.price * self.price
            + weights.rating * self.rating
            + weights.destination * self.destination;
        total.clamp(0.0, 1.0)
    }

    /// Component-wise maximum, used to find the leader on each factor.
    pub(crate) fn max(self, other: SubScores) -> SubScores {
        SubScores {
            price: self.price.max(other.price),
            rating: self.rating.max(other.rating),
            destination: self.destination.max(other.destination),
        }
    }
}

/// Cost spread across the eligible set. Price scores are relative to it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CostRange {
    min: f64,
    max: f64,
}

impl CostRange {
    pub(crate) fn from_costs<I: IntoIterator<Item = f64>>(costs: I) -> Option<Self> {
        costs.into_iter().fold(None, |range, cost| match range {
            None => Some(CostRange {
                min: cost,
                max: cost,
            }),
            Some(CostRange { min, max }) => Some(CostRange {
                min: min.min(cost),
                max: max.max(cost),
            }),
        })
    }

    pub(crate) fn price_score(&self, total_cost: f64) -> f64 {
        let spread = self.max - self.min;
        if !spread.is_finite() || !total_cost.is_finite() {
            return 0.0;
        }
        if spread <= 0.0 {
            return 1.0;
        }

        (1.0 - (total_cost - self.min) / spread).clamp(0.0, 1.0)
    }
}

pub(crate) fn rating_score(rating: f64) -> f64 {
    if rating.is_nan() {
        return 0.0;
    }

    (rating / MAX_RATING).clamp(0.0, 1.0)
}

pub(crate) fn destination_score(carrier: &Carrier, destination_country: Option<&str>) -> f64 {
    match destination_country {
        None => NEUTRAL_DESTINATION_SCORE,
        Some(country) if carrier.delivers_to_country(country) => 1.0,
        Some(_) => 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Factor {
    Price,
    Rating,
    Destination,
}

/// Explain a ranking by naming the factor contributing most to the carrier's
/// total. Carriers leading the candidate set on that factor get the
/// superlative phrasing.
pub(crate) fn selection_reason(
    scores: &SubScores,
    leaders: &SubScores,
    weights: &StrategyWeights,
    total_cost: f64,
    destination_country: Option<&str>,
) -> String {
    let factor = dominant_factor(scores, weights);

    match factor {
        Factor::Price if scores.price >= leaders.price => {
            format!("selected for lowest cost ({total_cost:.2})")
        }
        Factor::Price => format!("ranked for competitive cost ({total_cost:.2})"),
        Factor::Rating if scores.rating >= leaders.rating => format!(
            "selected for highest rating ({:.1}/5)",
            scores.rating * MAX_RATING
        ),
        Factor::Rating => format!(
            "ranked for strong rating ({:.1}/5)",
            scores.rating * MAX_RATING
        ),
        Factor::Destination => match destination_country {
            Some(country) if scores.destination >= 1.0 => {
                format!("selected for destination specialization in {country}")
            }
            Some(country) => format!("ranked despite no specialization in {country}"),
            None => "ranked on overall coverage".to_string(),
        },
    }
}

fn dominant_factor(scores: &SubScores, weights: &StrategyWeights) -> Factor {
    let by_contribution = [
        (Factor::Price, weights.price * scores.price),
        (Factor::Rating, weights.rating * scores.rating),
        (Factor::Destination, weights.destination * scores.destination),
    ];
    let by_weight = [
        (Factor::Price, weights.price),
        (Factor::Rating, weights.rating),
        (Factor::Destination, weights.destination),
    ];

    let strongest = |candidates: [(Factor, f64); 3]| {
        candidates
            .into_iter()
            .fold((Factor::Price, f64::MIN), |best, candidate| {
                if candidate.1 > best.1 {
                    candidate
                } else {
                    best
                }
            })
    };

    let (factor, contribution) = strongest(by_contribution);
    if contribution > 0.0 {
        factor
    } else {
        strongest(by_weight).0
    }
}
