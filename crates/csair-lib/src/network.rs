//! Undirected route graph keyed by city code.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::dataset::RouteRecord;
use crate::directory::CityCode;
use crate::error::{Error, Result};

/// Outgoing connection from a city within the route network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub target: CityCode,
    pub distance: f64,
}

/// Undirected route between two cities, oriented as first inserted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEdge {
    pub from: CityCode,
    pub to: CityCode,
    pub distance: f64,
}

/// Undirected weighted graph of CSAir routes keyed by city code.
#[derive(Debug, Clone, Default)]
pub struct RouteNetwork {
    adjacency: BTreeMap<CityCode, Vec<Connection>>,
    /// Unique edges in insertion order.
    edges: Vec<RouteEdge>,
    edge_index: HashMap<(CityCode, CityCode), usize>,
    connections: BTreeSet<String>,
}

impl RouteNetwork {
    /// Build the network from loader output. Fails on the first invalid route.
    pub fn from_records(records: &[RouteRecord]) -> Result<Self> {
        let mut network = Self::default();
        for record in records {
            let [first, second] = &record.ports;
            network.add_connection(first, second, record.distance)?;
        }
        debug!(
            cities = network.adjacency.len(),
            routes = network.edges.len(),
            "built route network"
        );
        Ok(network)
    }

    /// Add a city without any connections. Existing cities are left untouched.
    pub fn add_city(&mut self, code: &str) {
        self.adjacency.entry(code.to_ascii_uppercase()).or_default();
    }

    /// Record an undirected route, replacing the distance of an existing pair.
    ///
    /// Codes are upper-cased on insertion, so `scl` and `SCL` name the same city.
    pub fn add_connection(&mut self, first: &str, second: &str, distance: f64) -> Result<()> {
        let first = first.to_ascii_uppercase();
        let second = second.to_ascii_uppercase();
        let (first, second) = (first.as_str(), second.as_str());
        if first == second {
            return Err(Error::SelfLoop {
                code: first.to_string(),
            });
        }
        if !distance.is_finite() || distance <= 0.0 {
            return Err(Error::InvalidDistance {
                from: first.to_string(),
                to: second.to_string(),
                distance,
            });
        }

        self.upsert_neighbour(first, second, distance);
        self.upsert_neighbour(second, first, distance);

        let key = pair_key(first, second);
        match self.edge_index.get(&key) {
            Some(&index) => self.edges[index].distance = distance,
            None => {
                self.edge_index.insert(key, self.edges.len());
                self.edges.push(RouteEdge {
                    from: first.to_string(),
                    to: second.to_string(),
                    distance,
                });
            }
        }
        self.connections
            .insert(canonical_connection(first, second));
        Ok(())
    }

    fn upsert_neighbour(&mut self, code: &str, target: &str, distance: f64) {
        let neighbours = self.adjacency.entry(code.to_string()).or_default();
        match neighbours.iter_mut().find(|edge| edge.target == target) {
            Some(existing) => existing.distance = distance,
            None => neighbours.push(Connection {
                target: target.to_string(),
                distance,
            }),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.adjacency.contains_key(code)
    }

    /// Distance between two cities.
    ///
    /// * `None` when either city is not part of the network;
    /// * `Some(0.0)` when both codes are the same city;
    /// * `Some(f64::INFINITY)` when both exist but no direct route joins them.
    pub fn distance_between(&self, first: &str, second: &str) -> Option<f64> {
        if !self.contains(first) || !self.contains(second) {
            return None;
        }
        if first == second {
            return Some(0.0);
        }
        let distance = self
            .adjacency
            .get(first)
            .and_then(|edges| edges.iter().find(|edge| edge.target == second))
            .map(|edge| edge.distance)
            .unwrap_or(f64::INFINITY);
        Some(distance)
    }

    /// Direct neighbours of a city in the order their routes were first added.
    pub fn neighbours(&self, code: &str) -> Result<&[Connection]> {
        self.adjacency
            .get(code)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownCode {
                code: code.to_string(),
            })
    }

    /// Number of direct neighbours, zero for unknown cities.
    pub fn degree(&self, code: &str) -> usize {
        self.adjacency.get(code).map(Vec::len).unwrap_or(0)
    }

    /// City codes in lexicographic order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Unique routes in insertion order.
    pub fn edges(&self) -> &[RouteEdge] {
        &self.edges
    }

    /// Longest route; the earliest inserted route wins ties.
    pub fn longest_edge(&self) -> Option<&RouteEdge> {
        self.edges.iter().fold(None, |best, edge| match best {
            Some(current) if current.distance >= edge.distance => Some(current),
            _ => Some(edge),
        })
    }

    /// Shortest route; the earliest inserted route wins ties.
    pub fn shortest_edge(&self) -> Option<&RouteEdge> {
        self.edges.iter().fold(None, |best, edge| match best {
            Some(current) if current.distance <= edge.distance => Some(current),
            _ => Some(edge),
        })
    }

    /// Number of unique undirected routes.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Sum of distances over unique undirected routes.
    pub fn total_distance(&self) -> f64 {
        self.edges.iter().map(|edge| edge.distance).sum()
    }

    pub fn max_degree(&self) -> usize {
        self.adjacency.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Cities whose degree equals [`max_degree`](Self::max_degree), in code order.
    pub fn hub_codes(&self) -> Vec<&str> {
        let max = self.max_degree();
        self.adjacency
            .iter()
            .filter(|(_, edges)| edges.len() == max)
            .map(|(code, _)| code.as_str())
            .collect()
    }

    /// Sorted canonical `AAA-BBB` strings, one per connected pair.
    pub fn canonical_connections(&self) -> Vec<String> {
        self.connections.iter().cloned().collect()
    }
}

impl fmt::Display for RouteNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{Graph}")?;
        for (code, edges) in &self.adjacency {
            write!(f, "\n{{{code}")?;
            if !edges.is_empty() {
                let joined = edges
                    .iter()
                    .map(|edge| format!("{{{}: {}}}", edge.target, edge.distance))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, " => {joined}")?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}

/// Canonical form of a connection: codes ordered case-insensitively, upper-cased.
pub fn canonical_connection(first: &str, second: &str) -> String {
    let (a, b) = if first.to_lowercase() < second.to_lowercase() {
        (first, second)
    } else {
        (second, first)
    };
    format!("{}-{}", a.to_uppercase(), b.to_uppercase())
}

fn pair_key(first: &str, second: &str) -> (CityCode, CityCode) {
    if first <= second {
        (first.to_string(), second.to_string())
    } else {
        (second.to_string(), first.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_pair_overwrites_distance() {
        let mut network = RouteNetwork::default();
        network.add_connection("SCL", "LIM", 2453.0).unwrap();
        network.add_connection("LIM", "SCL", 2400.0).unwrap();

        assert_eq!(network.edge_count(), 1);
        assert_eq!(network.distance_between("SCL", "LIM"), Some(2400.0));
        assert_eq!(network.neighbours("SCL").unwrap().len(), 1);
        assert_eq!(network.edges()[0].from, "SCL");
    }

    #[test]
    fn rejects_non_positive_distance() {
        let mut network = RouteNetwork::default();
        let err = network.add_connection("SCL", "LIM", -5.0).unwrap_err();
        assert!(matches!(err, Error::InvalidDistance { .. }));
        assert!(!network.contains("SCL"), "failed insert leaves no trace");
    }

    #[test]
    fn display_lists_neighbours() {
        let mut network = RouteNetwork::default();
        network.add_connection("SCL", "LIM", 2453.0).unwrap();
        network.add_city("MEX");

        assert_eq!(
            network.to_string(),
            "{Graph}\n{LIM => {SCL: 2453}}\n{MEX}\n{SCL => {LIM: 2453}}"
        );
    }

    #[test]
    fn mixed_case_ports_are_one_route() {
        let mut network = RouteNetwork::default();
        network.add_connection("scl", "LIM", 2453.0).unwrap();
        network.add_connection("SCL", "lim", 2400.0).unwrap();

        assert_eq!(network.edge_count(), 1);
        assert_eq!(network.total_distance(), 2400.0);
        assert_eq!(network.canonical_connections(), vec!["LIM-SCL"]);
        assert_eq!(network.cities().collect::<Vec<_>>(), vec!["LIM", "SCL"]);
        assert!(network.add_connection("lim", "LIM", 10.0).is_err());
    }

    #[test]
    fn canonical_connection_orders_case_insensitively() {
        assert_eq!(canonical_connection("scl", "LIM"), "LIM-SCL");
        assert_eq!(canonical_connection("BOG", "lim"), "BOG-LIM");
    }
}
