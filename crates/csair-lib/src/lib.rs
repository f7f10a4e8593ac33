//! CSAir library entry points.
//!
//! This crate loads the CSAir route network from its JSON data file, builds
//! the city directory and the route graph, and answers descriptive queries
//! about them. Higher-level consumers (the CLI, tests) should go through the
//! [`QueryService`] instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod dataset;
pub mod directory;
pub mod error;
pub mod network;
pub mod output;
pub mod query;

pub use dataset::{load_dataset, Dataset, MetroRecord, RouteRecord};
pub use directory::{CityCode, CityDirectory, Coordinate, Coordinates, Metro, Region};
pub use error::{Error, ErrorKind, Result};
pub use network::{canonical_connection, Connection, RouteEdge, RouteNetwork};
pub use output::{
    CityExtreme, CityInfoValue, CityRef, CitySummary, ContinentReport, FlightExtreme,
    FlightSummary, HubSummary, NeighbourSummary, NetworkStats,
};
pub use query::{estimated_flight_time, CityInfo, QueryService, MAP_BASE_URL};
