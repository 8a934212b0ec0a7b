//! City-wide rental car availability: resolves a city's branches, searches
//! them in parallel batches and merges the offers into one price-sorted list.

pub mod aggregator;
pub mod config;
pub mod dates;
pub mod error;
pub mod models;
pub mod providers;
pub mod server;

pub use aggregator::RentalService;
pub use config::Config;
pub use error::SearchError;
pub use models::{Branch, City, SearchOutcome, VehicleRecord};
pub use providers::{GarentaClient, RentalApi};
