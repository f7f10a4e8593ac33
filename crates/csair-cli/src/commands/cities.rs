//! City-level command handlers: listing, per-city info and neighbours.

use std::fmt;

use anyhow::{Context, Result};
use serde::Serialize;

use csair_lib::{CityInfo, QueryService};

use csair_cli::output::{emit, OutputFormat};

#[derive(Serialize)]
#[serde(transparent)]
struct CityList<'a> {
    names: Vec<&'a str>,
}

impl fmt::Display for CityList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join("\n"))
    }
}

/// Handle the `cities` subcommand.
pub fn handle_list_cities(service: &QueryService, format: OutputFormat) -> Result<()> {
    let list = CityList {
        names: service.list_cities(),
    };
    emit(format, &list)
}

/// Handle the `info` subcommand.
///
/// `field` accepts a field name or the numeric selectors `1`-`7`; anything
/// else prints the closest cities.
pub fn handle_info(
    service: &QueryService,
    city: &str,
    field: &str,
    format: OutputFormat,
) -> Result<()> {
    let info = CityInfo::from_selector(field);
    let value = service
        .city_info(city, info)
        .with_context(|| format!("failed to look up {city}"))?;
    emit(format, &value)
}

/// Handle the `closest` subcommand.
pub fn handle_closest(service: &QueryService, city: &str, format: OutputFormat) -> Result<()> {
    handle_info(service, city, "closest", format)
}

/// Handle the `continents` subcommand.
pub fn handle_continents(service: &QueryService, format: OutputFormat) -> Result<()> {
    emit(format, &service.continents())
}
