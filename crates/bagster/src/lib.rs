//! Bagster carrier selection: the scoring engine that ranks marketplace
//! carriers for a shipment, plus the configuration, telemetry, and catalog
//! plumbing used by the API host.

pub mod catalog;
pub mod config;
pub mod error;
pub mod selection;
pub mod telemetry;
