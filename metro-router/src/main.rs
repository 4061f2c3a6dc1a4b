use std::convert::Infallible;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;
use metro_router::domain::StationId;
use metro_router::feed::FeedTables;
use metro_router::network::TransitNetwork;
use metro_router::planner::NameMatch;
use tracing_subscriber::EnvFilter;

/// A route endpoint: a numeric station id or a name fragment.
#[derive(Debug, Clone)]
enum Endpoint {
    Id(StationId),
    Name(String),
}

impl FromStr for Endpoint {
    type Err = Infallible;

    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        Ok(match arg.parse::<i32>() {
            Ok(id) => Endpoint::Id(StationId(id)),
            Err(_) => Endpoint::Name(arg.to_string()),
        })
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "metro-router",
    about = "Find a metro route between two stations of a GTFS feed.",
    version
)]
struct Args {
    /// Directory holding stops.txt, routes.txt, trips.txt and stop_times.txt.
    feed_dir: PathBuf,

    /// Departure station: an id, or part of its name.
    from: Endpoint,

    /// Arrival station: an id, or part of its name.
    to: Endpoint,

    /// Minimize travel time, interchange penalties included, instead of distance.
    #[arg(long)]
    fastest: bool,
}

/// Resolve an endpoint to a station id, taking the first match for names.
fn resolve(network: &TransitNetwork, endpoint: &Endpoint) -> Result<StationId, String> {
    let name = match endpoint {
        Endpoint::Id(id) => return Ok(*id),
        Endpoint::Name(name) => name,
    };
    let matches = network.resolve_name(name);
    if let NameMatch::Ambiguous(ids) = &matches {
        let names: Vec<String> = ids
            .iter()
            .filter_map(|id| network.graph()?.station(*id))
            .map(|s| s.name.clone())
            .collect();
        eprintln!("{name:?} is ambiguous, using {}", names.join(" / "));
    }
    matches
        .first()
        .ok_or_else(|| format!("no station matches {name:?}"))
}

fn run(args: Args) -> Result<(), String> {
    let tables = FeedTables::read_dir(&args.feed_dir).map_err(|e| e.to_string())?;

    let mut network = TransitNetwork::new();
    let report = network.try_initialize(&tables).map_err(|e| e.to_string())?;
    eprintln!(
        "Loaded {} stations, {} lines{}",
        report.stations,
        report.lines,
        if report.used_fallback {
            " (synthesized connections)"
        } else {
            ""
        }
    );

    let from = resolve(&network, &args.from)?;
    let to = resolve(&network, &args.to)?;
    let path = if args.fastest {
        network.find_fastest_path(from, to)
    } else {
        network.find_shortest_path(from, to)
    };
    if path.is_empty() {
        return Err("no route found".to_string());
    }

    let summary = network
        .describe(&path)
        .ok_or_else(|| "network not initialized".to_string())?;
    let json = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
