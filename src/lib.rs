//! astrochart - natal chart HTTP service
//!
//! A stateless HTTP service that computes astrological charts (planetary
//! positions, houses, aspects, lunar phases) from birth data using the
//! Swiss Ephemeris library.

pub mod ephemeris;
pub mod models;
pub mod server;
