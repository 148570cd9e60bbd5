//! Planet record type.
//!
//! A planet is an opaque, immutable passthrough of the upstream provider's
//! native response shape. It is created once by the upstream client on a
//! successful fetch and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// A planet record as served by the upstream provider.
///
/// Scalar attributes stay as strings because the provider serves them that
/// way (e.g. `"unknown"` for missing measurements).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub rotation_period: String,
    pub orbital_period: String,
    pub diameter: String,
    pub climate: String,
    pub gravity: String,
    pub terrain: String,
    pub surface_water: String,
    pub population: String,
    pub residents: Vec<String>,
    pub films: Vec<String>,
    pub created: String,
    pub edited: String,
    pub url: String,
}
