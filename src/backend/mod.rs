//! Client for the PanSou aggregator's search API.

pub mod client;
pub mod types;

pub use client::{BackendError, PanSearch, PanSouClient};
