//! Route-level command handlers: map link, graph dump and flight times.

use std::fmt;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use csair_lib::{estimated_flight_time, QueryService, RouteEdge};

use csair_cli::output::{emit, OutputFormat};

#[derive(Serialize)]
struct MapLink {
    url: String,
}

impl fmt::Display for MapLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[derive(Serialize)]
struct GraphDump<'a> {
    #[serde(skip)]
    rendered: String,
    routes: &'a [RouteEdge],
}

impl fmt::Display for GraphDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

#[derive(Serialize)]
struct FlightTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<f64>,
    hours: f64,
}

impl fmt::Display for FlightTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => write!(
                f,
                "Estimated flight time {from} - {to}: {:.2} hours",
                self.hours
            ),
            _ => write!(f, "Estimated flight time: {:.2} hours", self.hours),
        }
    }
}

/// Handle the `map-url` subcommand.
pub fn handle_map_url(service: &QueryService, format: OutputFormat) -> Result<()> {
    emit(
        format,
        &MapLink {
            url: service.map_url(),
        },
    )
}

/// Handle the `graph` subcommand.
pub fn handle_graph(service: &QueryService, format: OutputFormat) -> Result<()> {
    let network = service.network();
    let dump = GraphDump {
        rendered: network.to_string(),
        routes: network.edges(),
    };
    emit(format, &dump)
}

/// Handle the `flight-time` subcommand.
///
/// Either an explicit distance or a pair of directly connected city codes is
/// required.
pub fn handle_flight_time(
    service: &QueryService,
    distance: Option<f64>,
    from: Option<&str>,
    to: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let report = match (distance, from, to) {
        (Some(distance), None, None) => {
            if !distance.is_finite() || distance < 0.0 {
                bail!("distance must be a non-negative number of miles");
            }
            FlightTime {
                from: None,
                to: None,
                distance: Some(distance),
                hours: estimated_flight_time(distance),
            }
        }
        (None, Some(from), Some(to)) => {
            let hours = service
                .flight_time_between(from, to)
                .with_context(|| format!("failed to estimate flight time {from} - {to}"))?;
            FlightTime {
                from: Some(from.to_string()),
                to: Some(to.to_string()),
                distance: service.network().distance_between(from, to),
                hours,
            }
        }
        _ => bail!("provide either --distance or both --from and --to"),
    };
    emit(format, &report)
}
