//! Record loader for the CSAir JSON data file.
//!
//! The data file carries two required top-level collections, `metros` and
//! `routes`, plus an optional `data sources` list. This module only checks the
//! document shape; per-record validation happens when the
//! [`CityDirectory`](crate::directory::CityDirectory) and
//! [`RouteNetwork`](crate::network::RouteNetwork) are built.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Raw per-city metadata exactly as it appears in the data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetroRecord {
    pub code: String,
    pub name: String,
    pub country: String,
    pub continent: String,
    pub timezone: f64,
    /// Direction label (`N`, `S`, `E`, `W`) mapped to degrees.
    pub coordinates: BTreeMap<String, f64>,
    pub population: u64,
    pub region: i64,
}

/// Raw route entry: two ports and the flight distance in miles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub ports: [String; 2],
    pub distance: f64,
}

/// Parsed contents of a data file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub metros: Vec<MetroRecord>,
    pub routes: Vec<RouteRecord>,
    pub data_sources: Vec<String>,
}

#[derive(Deserialize)]
struct RawDocument {
    metros: Option<Vec<MetroRecord>>,
    routes: Option<Vec<RouteRecord>>,
    #[serde(rename = "data sources", default)]
    data_sources: Vec<String>,
}

impl Dataset {
    /// Parse a dataset from any reader producing JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: RawDocument = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    /// Parse a dataset from an in-memory JSON document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawDocument = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDocument) -> Result<Self> {
        let metros = raw.metros.ok_or(Error::MissingSection { key: "metros" })?;
        let routes = raw.routes.ok_or(Error::MissingSection { key: "routes" })?;
        Ok(Self {
            metros,
            routes,
            data_sources: raw.data_sources,
        })
    }
}

/// Load the metro and route records from a JSON data file.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    if !path.is_file() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = fs::File::open(path)?;
    let dataset = Dataset::from_reader(std::io::BufReader::new(file))?;
    debug!(
        path = %path.display(),
        metros = dataset.metros.len(),
        routes = dataset.routes.len(),
        "loaded dataset"
    );
    Ok(dataset)
}
