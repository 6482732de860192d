//! Client SDK for the auth API server.

pub mod client;

pub use client::{ApiEnvelope, AuthClient};
