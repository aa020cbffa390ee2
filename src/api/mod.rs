//! HTTP API Handlers and Routes
//!
//! The thin presentation surface over the research pipeline, built on Axum.
//!
//! # API Endpoints
//!
//! ## Research (`/api/research`)
//! - `POST /api/research` - Run a research query; responds with a
//!   Server-Sent Events stream carrying one JSON-encoded
//!   [`RunEvent`](crate::types::RunEvent) per event. Progress arrives
//!   incrementally; the final event of a successful run is the report.
//!   Fatal failures arrive as an `error` SSE event naming the stage.
//!
//! ## Health (`/api/health`)
//! - `GET /api/health` - Health check endpoint.

/// Request handlers for each endpoint.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
