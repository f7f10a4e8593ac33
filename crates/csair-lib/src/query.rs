//! Read-only query façade over the city directory and the route network.

use std::path::Path;

use tracing::warn;

use crate::dataset::{load_dataset, Dataset};
use crate::directory::{CityDirectory, Metro};
use crate::error::{Error, Result};
use crate::network::{RouteEdge, RouteNetwork};
use crate::output::{
    CityExtreme, CityInfoValue, CityRef, CitySummary, ContinentReport, FlightExtreme,
    FlightSummary, HubSummary, NeighbourSummary, NetworkStats,
};

/// Base URL of the great-circle map service used for network visualisation.
pub const MAP_BASE_URL: &str = "http://www.gcmap.com/mapui?P=";

/// Distance, in miles, up to which a flight is modelled as still climbing.
const CLIMB_DISTANCE: f64 = 400.0;

/// Field of a city that [`QueryService::city_info`] can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CityInfo {
    Code,
    Country,
    Continent,
    Timezone,
    Coordinates,
    Population,
    Region,
    ClosestCities,
}

impl CityInfo {
    /// Map a menu selector (`"1"`..`"7"` or a field name) to a field.
    ///
    /// Anything unrecognised selects the closest-cities report.
    pub fn from_selector(selector: &str) -> Self {
        match selector.trim().to_ascii_lowercase().as_str() {
            "1" | "code" => CityInfo::Code,
            "2" | "country" => CityInfo::Country,
            "3" | "continent" => CityInfo::Continent,
            "4" | "timezone" => CityInfo::Timezone,
            "5" | "coordinates" => CityInfo::Coordinates,
            "6" | "population" => CityInfo::Population,
            "7" | "region" => CityInfo::Region,
            _ => CityInfo::ClosestCities,
        }
    }

    fn metro_field(self, metro: &Metro) -> Option<String> {
        let value = match self {
            CityInfo::Code => metro.code.clone(),
            CityInfo::Country => metro.country.clone(),
            CityInfo::Continent => metro.continent.clone(),
            CityInfo::Timezone => metro.timezone_label(),
            CityInfo::Coordinates => metro.coordinates_label(),
            CityInfo::Population => metro.population.to_string(),
            CityInfo::Region => metro.region.label().to_string(),
            CityInfo::ClosestCities => return None,
        };
        Some(value)
    }
}

/// Estimated flight time in hours for a route of `distance` miles.
///
/// Routes up to 400 miles never reach cruising speed and follow
/// `2 * sqrt(d / 1406.25)`; longer routes add the cruise leg at 750 mph on top
/// of the 16/15 hours spent on the first 400 miles.
pub fn estimated_flight_time(distance: f64) -> f64 {
    if (0.0..=CLIMB_DISTANCE).contains(&distance) {
        2.0 * (distance / 1406.25).sqrt()
    } else {
        (16.0 / 15.0) + (distance - CLIMB_DISTANCE) / 750.0
    }
}

/// Answers every descriptive query about a loaded CSAir network.
#[derive(Debug, Clone)]
pub struct QueryService {
    directory: CityDirectory,
    network: RouteNetwork,
}

impl QueryService {
    pub fn new(directory: CityDirectory, network: RouteNetwork) -> Self {
        let unnamed: Vec<&str> = network
            .cities()
            .filter(|code| !directory.contains_code(code))
            .collect();
        if !unnamed.is_empty() {
            warn!(
                count = unnamed.len(),
                codes = %unnamed.join(","),
                "route endpoints without metro records"
            );
        }
        Self { directory, network }
    }

    /// Build the directory and the network from the same parsed dataset.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        let directory = CityDirectory::from_records(&dataset.metros)?;
        let network = RouteNetwork::from_records(&dataset.routes)?;
        Ok(Self::new(directory, network))
    }

    /// Load a data file and build the service in one step.
    pub fn load(path: &Path) -> Result<Self> {
        let dataset = load_dataset(path)?;
        Self::from_dataset(&dataset)
    }

    pub fn directory(&self) -> &CityDirectory {
        &self.directory
    }

    pub fn network(&self) -> &RouteNetwork {
        &self.network
    }

    fn city_ref(&self, code: &str) -> CityRef {
        CityRef {
            code: code.to_string(),
            name: self.directory.decode(code).ok().map(str::to_string),
        }
    }

    /// All city names in alphabetical order.
    pub fn list_cities(&self) -> Vec<&str> {
        self.directory.all_names().into_iter().collect()
    }

    /// Look up one piece of information about a city by its display name.
    pub fn city_info(&self, name: &str, info: CityInfo) -> Result<CityInfoValue> {
        let code = self.directory.encode(name)?;
        let metro = self.directory.metro_for(code)?;
        match info.metro_field(metro) {
            Some(value) => Ok(CityInfoValue::Field(value)),
            None => self.closest_cities(code).map(CityInfoValue::ClosestCities),
        }
    }

    /// Cities one flight away from `code`, in the order their routes were loaded.
    pub fn closest_cities(&self, code: &str) -> Result<Vec<NeighbourSummary>> {
        if !self.network.contains(code) && self.directory.contains_code(code) {
            return Ok(Vec::new());
        }
        let neighbours = self.network.neighbours(code)?;
        Ok(neighbours
            .iter()
            .map(|edge| NeighbourSummary {
                city: self.city_ref(&edge.target),
                distance: edge.distance,
            })
            .collect())
    }

    fn flight_summary(&self, kind: FlightExtreme, edge: &RouteEdge) -> FlightSummary {
        FlightSummary {
            kind,
            from: self.city_ref(&edge.from),
            to: self.city_ref(&edge.to),
            distance: edge.distance,
        }
    }

    pub fn longest_flight(&self) -> Option<FlightSummary> {
        self.network
            .longest_edge()
            .map(|edge| self.flight_summary(FlightExtreme::Longest, edge))
    }

    pub fn shortest_flight(&self) -> Option<FlightSummary> {
        self.network
            .shortest_edge()
            .map(|edge| self.flight_summary(FlightExtreme::Shortest, edge))
    }

    /// Mean route distance in whole miles, truncated toward zero.
    pub fn average_distance(&self) -> Option<u64> {
        let count = self.network.edge_count();
        if count == 0 {
            return None;
        }
        Some((self.network.total_distance() / count as f64).trunc() as u64)
    }

    fn city_summary(&self, kind: CityExtreme, metro: &Metro) -> CitySummary {
        CitySummary {
            kind,
            city: CityRef {
                code: metro.code.clone(),
                name: Some(metro.name.clone()),
            },
            population: metro.population,
        }
    }

    /// Most populous city; the lowest code wins ties.
    pub fn biggest_city(&self) -> Option<CitySummary> {
        self.directory
            .metros()
            .fold(None::<&Metro>, |best, metro| match best {
                Some(current) if current.population >= metro.population => Some(current),
                _ => Some(metro),
            })
            .map(|metro| self.city_summary(CityExtreme::Biggest, metro))
    }

    /// Least populous city; the lowest code wins ties.
    pub fn smallest_city(&self) -> Option<CitySummary> {
        self.directory
            .metros()
            .fold(None::<&Metro>, |best, metro| match best {
                Some(current) if current.population <= metro.population => Some(current),
                _ => Some(metro),
            })
            .map(|metro| self.city_summary(CityExtreme::Smallest, metro))
    }

    /// Mean population, truncated toward zero.
    pub fn average_population(&self) -> Option<u64> {
        let count = self.directory.len() as u128;
        if count == 0 {
            return None;
        }
        let total: u128 = self
            .directory
            .metros()
            .map(|metro| u128::from(metro.population))
            .sum();
        Some((total / count) as u64)
    }

    /// City names grouped by continent.
    pub fn continents(&self) -> ContinentReport {
        let mut report = ContinentReport::default();
        for metro in self.directory.metros() {
            report
                .continents
                .entry(metro.continent.clone())
                .or_default()
                .insert(metro.name.clone());
        }
        report
    }

    /// Cities with the most direct connections, in code order.
    pub fn hub_cities(&self) -> HubSummary {
        HubSummary {
            degree: self.network.max_degree(),
            cities: self
                .network
                .hub_codes()
                .into_iter()
                .map(|code| self.city_ref(code))
                .collect(),
        }
    }

    /// Link to a great-circle map of every route in the network.
    pub fn map_url(&self) -> String {
        format!(
            "{MAP_BASE_URL}{}",
            self.network.canonical_connections().join(",+")
        )
    }

    /// Estimated flight time in hours for the direct route between two codes.
    pub fn flight_time_between(&self, from: &str, to: &str) -> Result<f64> {
        for code in [from, to] {
            if !self.network.contains(code) {
                return Err(Error::UnknownCode {
                    code: code.to_string(),
                });
            }
        }
        match self.network.distance_between(from, to) {
            Some(distance) if distance.is_finite() => Ok(estimated_flight_time(distance)),
            _ => Err(Error::NoDirectRoute {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }

    /// Every network-wide statistic at once.
    pub fn network_summary(&self) -> NetworkStats {
        NetworkStats {
            city_count: self.directory.len(),
            route_count: self.network.edge_count(),
            longest_flight: self.longest_flight(),
            shortest_flight: self.shortest_flight(),
            average_distance: self.average_distance(),
            biggest_city: self.biggest_city(),
            smallest_city: self.smallest_city(),
            average_population: self.average_population(),
            hubs: self.hub_cities(),
        }
    }
}
