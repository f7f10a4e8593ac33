//! Structured query results and their plain-text renderings.
//!
//! Every summary derives `Serialize` so front ends can emit JSON, and
//! implements `Display` with the one-line (or block) text form used by the
//! CLI.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::directory::CityCode;

/// A city referenced by code, with its name when the directory knows it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CityRef {
    pub code: CityCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CityRef {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

impl fmt::Display for CityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.code)
    }
}

/// One entry of a closest-cities report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NeighbourSummary {
    pub city: CityRef,
    pub distance: f64,
}

impl fmt::Display for NeighbourSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} miles", self.city, self.distance)
    }
}

/// Which extreme a [`FlightSummary`] describes.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlightExtreme {
    Longest,
    Shortest,
}

impl FlightExtreme {
    pub fn label(self) -> &'static str {
        match self {
            FlightExtreme::Longest => "Longest flight",
            FlightExtreme::Shortest => "Shortest flight",
        }
    }
}

/// Longest or shortest route of the network.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlightSummary {
    pub kind: FlightExtreme,
    pub from: CityRef,
    pub to: CityRef,
    pub distance: f64,
}

impl fmt::Display for FlightSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} - {}: {} miles",
            self.kind.label(),
            self.from,
            self.to,
            self.distance
        )
    }
}

/// Which extreme a [`CitySummary`] describes.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CityExtreme {
    Biggest,
    Smallest,
}

impl CityExtreme {
    pub fn label(self) -> &'static str {
        match self {
            CityExtreme::Biggest => "Biggest city",
            CityExtreme::Smallest => "Smallest city",
        }
    }
}

/// Most or least populous city of the network.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CitySummary {
    pub kind: CityExtreme,
    pub city: CityRef,
    pub population: u64,
}

impl fmt::Display for CitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {} inhabitants",
            self.kind.label(),
            self.city,
            self.population
        )
    }
}

/// Cities sharing the highest number of direct connections.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HubSummary {
    pub degree: usize,
    pub cities: Vec<CityRef>,
}

impl fmt::Display for HubSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cities with most CSAir connections ({}):", self.degree)?;
        for city in &self.cities {
            write!(f, "\n{city}")?;
        }
        Ok(())
    }
}

/// City names grouped by continent; both levels sorted alphabetically.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ContinentReport {
    pub continents: BTreeMap<String, BTreeSet<String>>,
}

impl fmt::Display for ContinentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CSAir cities in each continent")?;
        for (continent, names) in &self.continents {
            write!(f, "\n\n{continent}:")?;
            for name in names {
                write!(f, "\n{name}")?;
            }
        }
        Ok(())
    }
}

/// Result of a city-info query: either a single field or the neighbour list.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum CityInfoValue {
    Field(String),
    ClosestCities(Vec<NeighbourSummary>),
}

impl fmt::Display for CityInfoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CityInfoValue::Field(value) => f.write_str(value),
            CityInfoValue::ClosestCities(neighbours) => {
                let lines = neighbours
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n");
                f.write_str(&lines)
            }
        }
    }
}

/// Every network-wide statistic in one serialisable value.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NetworkStats {
    pub city_count: usize,
    pub route_count: usize,
    pub longest_flight: Option<FlightSummary>,
    pub shortest_flight: Option<FlightSummary>,
    pub average_distance: Option<u64>,
    pub biggest_city: Option<CitySummary>,
    pub smallest_city: Option<CitySummary>,
    pub average_population: Option<u64>,
    pub hubs: HubSummary,
}

impl fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "CSAir network: {} cities, {} routes",
            self.city_count, self.route_count
        )?;
        if let Some(flight) = &self.longest_flight {
            writeln!(f, "{flight}")?;
        }
        if let Some(flight) = &self.shortest_flight {
            writeln!(f, "{flight}")?;
        }
        if let Some(average) = self.average_distance {
            writeln!(f, "{}", average_distance_line(average))?;
        }
        if let Some(city) = &self.biggest_city {
            writeln!(f, "{city}")?;
        }
        if let Some(city) = &self.smallest_city {
            writeln!(f, "{city}")?;
        }
        if let Some(average) = self.average_population {
            writeln!(f, "{}", average_population_line(average))?;
        }
        write!(f, "{}", self.hubs)
    }
}

pub fn average_distance_line(miles: u64) -> String {
    format!("Average flight distance: {miles} miles")
}

pub fn average_population_line(inhabitants: u64) -> String {
    format!("Average population of CSAir cities: {inhabitants} inhabitants")
}
