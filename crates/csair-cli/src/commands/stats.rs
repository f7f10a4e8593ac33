//! Network-wide statistics command handlers.

use std::fmt;

use anyhow::Result;
use serde::Serialize;

use csair_lib::output::{average_distance_line, average_population_line};
use csair_lib::QueryService;

use csair_cli::output::{emit, emit_optional, OutputFormat};

const NO_ROUTES: &str = "No routes in network.";
const NO_CITIES: &str = "No cities in network.";

/// Which single statistic to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    LongestFlight,
    ShortestFlight,
    AverageDistance,
    BiggestCity,
    SmallestCity,
    AveragePopulation,
}

#[derive(Serialize)]
struct AverageDistance {
    average_distance: u64,
}

impl fmt::Display for AverageDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&average_distance_line(self.average_distance))
    }
}

#[derive(Serialize)]
struct AveragePopulation {
    average_population: u64,
}

impl fmt::Display for AveragePopulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&average_population_line(self.average_population))
    }
}

/// Handle the single-statistic subcommands.
pub fn handle_statistic(
    service: &QueryService,
    statistic: Statistic,
    format: OutputFormat,
) -> Result<()> {
    match statistic {
        Statistic::LongestFlight => {
            emit_optional(format, service.longest_flight().as_ref(), NO_ROUTES)
        }
        Statistic::ShortestFlight => {
            emit_optional(format, service.shortest_flight().as_ref(), NO_ROUTES)
        }
        Statistic::AverageDistance => {
            let average = service
                .average_distance()
                .map(|average_distance| AverageDistance { average_distance });
            emit_optional(format, average.as_ref(), NO_ROUTES)
        }
        Statistic::BiggestCity => emit_optional(format, service.biggest_city().as_ref(), NO_CITIES),
        Statistic::SmallestCity => {
            emit_optional(format, service.smallest_city().as_ref(), NO_CITIES)
        }
        Statistic::AveragePopulation => {
            let average = service
                .average_population()
                .map(|average_population| AveragePopulation { average_population });
            emit_optional(format, average.as_ref(), NO_CITIES)
        }
    }
}

/// Handle the `hubs` subcommand.
pub fn handle_hubs(service: &QueryService, format: OutputFormat) -> Result<()> {
    emit(format, &service.hub_cities())
}

/// Handle the `stats` subcommand.
pub fn handle_summary(service: &QueryService, format: OutputFormat) -> Result<()> {
    emit(format, &service.network_summary())
}
