//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → request.rs (query/body decode + context extraction)
//!     → [api handler invokes one access control operation]
//!     → response.rs (envelope encode, status from semantic code)
//!     → send to client
//! ```

pub mod context;
pub mod request;
pub mod response;
pub mod server;

pub use context::{Caller, RequestContext};
pub use request::{Batch, Params, ParseError, QueryParams, Single};
pub use server::{AppState, HttpServer};
