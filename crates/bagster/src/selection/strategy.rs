use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::SelectionError;

/// Named weighting policy requested by a shipper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Cheapest,
    BestRated,
    #[default]
    Balanced,
    DestinationFocused,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Cheapest,
        StrategyKind::BestRated,
        StrategyKind::Balanced,
        StrategyKind::DestinationFocused,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::Cheapest => "cheapest",
            StrategyKind::BestRated => "best_rated",
            StrategyKind::Balanced => "balanced",
            StrategyKind::DestinationFocused => "destination_focused",
        }
    }

    pub fn weights(&self) -> StrategyWeights {
        match self {
            StrategyKind::Cheapest => CHEAPEST_WEIGHTS,
            StrategyKind::BestRated => BEST_RATED_WEIGHTS,
            StrategyKind::Balanced => BALANCED_WEIGHTS,
            StrategyKind::DestinationFocused => DESTINATION_FOCUSED_WEIGHTS,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StrategyKind {
    type Err = SelectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.label() == normalized)
            .ok_or_else(|| SelectionError::UnknownStrategy(value.trim().to_string()))
    }
}

/// Relative importance of the price, rating, and destination sub-scores.
/// Every resolved triple sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyWeights {
    pub price: f64,
    pub rating: f64,
    pub destination: f64,
}

impl StrategyWeights {
    pub fn sum(&self) -> f64 {
        self.price + self.rating + self.destination
    }
}

const CHEAPEST_WEIGHTS: StrategyWeights = StrategyWeights {
    price: 1.0,
    rating: 0.0,
    destination: 0.0,
};
const BEST_RATED_WEIGHTS: StrategyWeights = StrategyWeights {
    price: 0.0,
    rating: 1.0,
    destination: 0.0,
};
const BALANCED_WEIGHTS: StrategyWeights = StrategyWeights {
    price: 0.4,
    rating: 0.4,
    destination: 0.2,
};
const DESTINATION_FOCUSED_WEIGHTS: StrategyWeights = StrategyWeights {
    price: 0.2,
    rating: 0.2,
    destination: 0.6,
};

/// Resolve a strategy name to its weight triple. A missing name falls back to
/// the balanced strategy.
pub fn resolve_weights(strategy: Option<&str>) -> Result<StrategyWeights, SelectionError> {
    match strategy {
        None => Ok(StrategyKind::default().weights()),
        Some(name) if name.trim().is_empty() => Ok(StrategyKind::default().weights()),
        Some(name) => name.parse::<StrategyKind>().map(|kind| kind.weights()),
    }
}

/// Validated strategy. A destination-focused selection always carries the
/// country it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionStrategy {
    Cheapest,
    BestRated,
    Balanced,
    DestinationFocused { destination_country: String },
}

impl SelectionStrategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            SelectionStrategy::Cheapest => StrategyKind::Cheapest,
            SelectionStrategy::BestRated => StrategyKind::BestRated,
            SelectionStrategy::Balanced => StrategyKind::Balanced,
            SelectionStrategy::DestinationFocused { .. } => StrategyKind::DestinationFocused,
        }
    }

    pub fn weights(&self) -> StrategyWeights {
        self.kind().weights()
    }
}

/// Hard constraints applied before any carrier is scored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HardFilters {
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub required_services: BTreeSet<String>,
}

impl HardFilters {
    fn validate(&self) -> Result<(), SelectionError> {
        if let Some(max_price) = self.max_price {
            if !max_price.is_finite() || max_price < 0.0 {
                return Err(SelectionError::InvalidInput(format!(
                    "maxPrice must be a non-negative amount, got {max_price}"
                )));
            }
        }

        if let Some(min_rating) = self.min_rating {
            if !(0.0..=5.0).contains(&min_rating) {
                return Err(SelectionError::InvalidInput(format!(
                    "minRating must be between 0 and 5, got {min_rating}"
                )));
            }
        }

        Ok(())
    }
}

/// Validated selection criteria. Construct through [`SelectionCriteria::new`]
/// so strategy requirements and filter thresholds are checked up front.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionCriteria {
    strategy: SelectionStrategy,
    destination_country: Option<String>,
    filters: HardFilters,
}

impl SelectionCriteria {
    pub fn new(
        kind: StrategyKind,
        destination_country: Option<String>,
        filters: HardFilters,
    ) -> Result<Self, SelectionError> {
        filters.validate()?;

        let destination_country = destination_country
            .map(|country| country.trim().to_string())
            .filter(|country| !country.is_empty());

        let (strategy, destination_country) = match kind {
            StrategyKind::Cheapest => (SelectionStrategy::Cheapest, destination_country),
            StrategyKind::BestRated => (SelectionStrategy::BestRated, destination_country),
            StrategyKind::Balanced => (SelectionStrategy::Balanced, destination_country),
            StrategyKind::DestinationFocused => {
                let destination_country = destination_country.ok_or_else(|| {
                    SelectionError::InvalidInput(
                        "destination_focused strategy requires destinationCountry".to_string(),
                    )
                })?;
                (
                    SelectionStrategy::DestinationFocused {
                        destination_country,
                    },
                    None,
                )
            }
        };

        Ok(Self {
            strategy,
            destination_country,
            filters,
        })
    }

    /// Criteria with the given strategy and no destination or filters.
    pub fn with_strategy(kind: StrategyKind) -> Result<Self, SelectionError> {
        Self::new(kind, None, HardFilters::default())
    }

    pub fn strategy(&self) -> &SelectionStrategy {
        &self.strategy
    }

    pub fn weights(&self) -> StrategyWeights {
        self.strategy.weights()
    }

    pub fn destination_country(&self) -> Option<&str> {
        match &self.strategy {
            SelectionStrategy::DestinationFocused {
                destination_country,
            } => Some(destination_country.as_str()),
            _ => self.destination_country.as_deref(),
        }
    }

    pub fn filters(&self) -> &HardFilters {
        &self.filters
    }
}
