use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use csair_cli::config::resolve_data_file;
use csair_cli::output::OutputFormat;
use csair_lib::QueryService;

mod commands;

use commands::stats::Statistic;

#[derive(Parser, Debug)]
#[command(author, version, about = "CSAir route network queries")]
struct Cli {
    /// Path to the CSAir JSON data file (defaults to $CSAIR_DATA_FILE, then
    /// resources/map_data.json).
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every city served by CSAir, alphabetically.
    Cities,
    /// Show one piece of information about a city.
    Info {
        /// City display name, e.g. "Mexico City".
        #[arg(long)]
        city: String,
        /// code, country, continent, timezone, coordinates, population, region
        /// or closest (numeric selectors 1-7 are also accepted).
        #[arg(long, default_value = "closest")]
        field: String,
    },
    /// List the cities one flight away from a city.
    Closest {
        /// City display name.
        #[arg(long)]
        city: String,
    },
    /// Longest flight in the network.
    Longest,
    /// Shortest flight in the network.
    Shortest,
    /// Average flight distance in miles.
    AverageDistance,
    /// Most populous city.
    Biggest,
    /// Least populous city.
    Smallest,
    /// Average city population.
    AveragePopulation,
    /// Cities grouped by continent.
    Continents,
    /// Cities with the most direct connections.
    Hubs,
    /// Great-circle map link covering every route.
    MapUrl,
    /// Estimated flight time in hours.
    FlightTime {
        /// Flight distance in miles.
        #[arg(long, conflicts_with_all = ["from", "to"])]
        distance: Option<f64>,
        /// Departure city code.
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Arrival city code.
        #[arg(long, requires = "from")]
        to: Option<String>,
    },
    /// Every network statistic at once.
    Stats,
    /// Dump the adjacency of every city.
    Graph,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let data_file = resolve_data_file(cli.data_file.as_deref());
    debug!(path = %data_file.display(), "resolved data file");
    let service = QueryService::load(&data_file)
        .with_context(|| format!("failed to load CSAir data from {}", data_file.display()))?;

    run(&service, cli.command, cli.format)
}

fn run(service: &QueryService, command: Command, format: OutputFormat) -> Result<()> {
    use commands::{cities, network, stats};

    match command {
        Command::Cities => cities::handle_list_cities(service, format),
        Command::Info { city, field } => cities::handle_info(service, &city, &field, format),
        Command::Closest { city } => cities::handle_closest(service, &city, format),
        Command::Longest => stats::handle_statistic(service, Statistic::LongestFlight, format),
        Command::Shortest => stats::handle_statistic(service, Statistic::ShortestFlight, format),
        Command::AverageDistance => {
            stats::handle_statistic(service, Statistic::AverageDistance, format)
        }
        Command::Biggest => stats::handle_statistic(service, Statistic::BiggestCity, format),
        Command::Smallest => stats::handle_statistic(service, Statistic::SmallestCity, format),
        Command::AveragePopulation => {
            stats::handle_statistic(service, Statistic::AveragePopulation, format)
        }
        Command::Continents => cities::handle_continents(service, format),
        Command::Hubs => stats::handle_hubs(service, format),
        Command::MapUrl => network::handle_map_url(service, format),
        Command::FlightTime { distance, from, to } => network::handle_flight_time(
            service,
            distance,
            from.as_deref(),
            to.as_deref(),
            format,
        ),
        Command::Stats => stats::handle_summary(service, format),
        Command::Graph => network::handle_graph(service, format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
