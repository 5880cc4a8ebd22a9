//! Carrier selection: rate calculation, strategy resolution, and scoring.
//!
//! The scoring engine is a pure function over an injected carrier list. The
//! service and router wrap it for hosts that fetch carriers from a
//! [`CarrierSource`] and expose the result over HTTP.

pub mod domain;
pub mod rates;
pub mod router;
pub mod scoring;
pub mod service;
pub mod source;
pub mod strategy;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Carrier, CarrierId, CarrierScore, CarrierStatus, ScoringBreakdown, SelectionResponse,
    ShipmentRequest, WeightsUsed,
};
pub use rates::{calculate_cost, quote_cost, RateQuote};
pub use router::{selection_router, QuoteRequest};
pub use scoring::{score, serves_destination};
pub use service::{CarrierSelectionService, SelectionServiceError, DEFAULT_RECOMMENDATION_LIMIT};
pub use source::{CarrierSource, CarrierSummary, SourceError};
pub use strategy::{
    resolve_weights, HardFilters, SelectionCriteria, SelectionStrategy, StrategyKind,
    StrategyWeights,
};
pub use validation::{validate_shipment, SelectionError, SelectionRequest};
