//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`; the request id flows through
//!   handler logs and facade calls
//! - Metrics are cheap (atomic increments) and scraped over a separate
//!   listener

pub mod metrics;
