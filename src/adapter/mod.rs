//! Implementations of ports (hexagonal adapters).

pub mod http;
pub mod model;
