//! HTTP surface of the service.

pub mod error;
pub mod handlers;
mod routes;

pub use routes::router;
