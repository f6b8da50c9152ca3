//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`ProbabilityModel`] - Trained classifier behind the risk scorer
//! - [`ModelHandle`] - Startup-resolved classifier state

mod model;

pub use model::{ModelHandle, ModelStatus, ProbabilityModel};
