//! HTTP layer for link resolution.
//!
//! - [`dto`] - Response serialization types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Router composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
