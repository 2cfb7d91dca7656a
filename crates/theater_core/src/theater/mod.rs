//! The theater: auditorium and customer registries plus the waiting lines.

pub mod coordinator;
pub mod metrics;

pub use coordinator::{EjectReason, ServeOutcome, Theater, TheaterError};
pub use metrics::AdmissionMetrics;
