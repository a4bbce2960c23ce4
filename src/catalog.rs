//! Static catalog of supported cities.

use serde::Serialize;
use tracing::warn;

use crate::error::EngineError;

/// A supported city. Identity is `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct City {
    pub id: &'static str,
    pub name: &'static str,
    /// State or region abbreviation.
    pub region: &'static str,
}

impl City {
    /// Label used by city pickers, e.g. `"New York, NY"`.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.region)
    }
}

const CITIES: [City; 10] = [
    City {
        id: "nyc",
        name: "New York",
        region: "NY",
    },
    City {
        id: "chi",
        name: "Chicago",
        region: "IL",
    },
    City {
        id: "la",
        name: "Los Angeles",
        region: "CA",
    },
    City {
        id: "hou",
        name: "Houston",
        region: "TX",
    },
    City {
        id: "phx",
        name: "Phoenix",
        region: "AZ",
    },
    City {
        id: "phi",
        name: "Philadelphia",
        region: "PA",
    },
    City {
        id: "san",
        name: "San Antonio",
        region: "TX",
    },
    City {
        id: "sd",
        name: "San Diego",
        region: "CA",
    },
    City {
        id: "dal",
        name: "Dallas",
        region: "TX",
    },
    City {
        id: "sj",
        name: "San Jose",
        region: "CA",
    },
];

/// Read-only lookup over the fixed city list.
#[derive(Debug, Default, Clone, Copy)]
pub struct CityCatalog;

impl CityCatalog {
    /// All cities in display order.
    pub fn list(&self) -> &'static [City] {
        &CITIES
    }

    /// Looks up a city by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] for an id not in the catalog. Callers
    /// should treat that as "no data available".
    pub fn resolve(&self, city_id: &str) -> Result<&'static City, EngineError> {
        CITIES.iter().find(|c| c.id == city_id).ok_or_else(|| {
            warn!(city_id, "city not in catalog");
            EngineError::NotFound {
                city_id: city_id.to_string(),
            }
        })
    }
}
