//! Lifecycle management subsystem.
//!
//! # Design Decisions
//! - Ordered startup: config first, then the access backend, then the
//!   listener (traffic only when ready)
//! - Shutdown drains in-flight requests before exit

pub mod shutdown;

pub use shutdown::Shutdown;
