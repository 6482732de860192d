//! HTTP API server for the identity and access-control subsystem of a
//! service-mesh control plane.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                  AUTH API SERVER                  │
//!                    │                                                   │
//!   Client Request   │  ┌─────────┐   ┌───────────┐   ┌──────────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│    api    │──▶│    access    │──┼──▶ Access Control
//!                    │  │ decode  │   │  handlers │   │    facade    │  │     Service
//!                    │  └─────────┘   └───────────┘   └──────────────┘  │
//!                    │       │                                          │
//!                    │       ▼                                          │
//!                    │  ┌─────────┐                                     │
//!   Client Response  │  │  http   │   request context (token, id)       │
//!   ◀────────────────┼──│ encode  │   flows alongside every call        │
//!                    │  └─────────┘                                     │
//!                    │                                                   │
//!                    │  ┌────────────────────────────────────────────┐  │
//!                    │  │           Cross-Cutting Concerns            │  │
//!                    │  │  ┌────────┐ ┌─────────────┐ ┌───────────┐  │  │
//!                    │  │  │ config │ │observability│ │ lifecycle │  │  │
//!                    │  │  └────────┘ └─────────────┘ └───────────┘  │  │
//!                    │  └────────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────────┘
//! ```
//!
//! The server is a thin adapter: it decodes requests into typed messages
//! plus a per-request context, invokes exactly one access control
//! operation per endpoint, and encodes the returned envelope. All
//! authentication, authorization, and persistence decisions live behind
//! the [`access::AccessControlService`] trait.

// Core subsystems
pub mod access;
pub mod api;
pub mod config;
pub mod http;
pub mod model;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
