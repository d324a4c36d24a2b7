use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

mod api;
mod config;
mod domain;
mod export;
mod geometry;
mod session;

use api::geocode_address;
use config::FileConfig;
use domain::Coordinate;
use export::write_geojson;
use session::{AddOutcome, BoundarySession, MAX_VERTICES, Phase, SaveError};

/// Interactively define a geofenced service boundary for a store
///
/// Examples:
///   # Start a session at explicit coordinates with a 5km service radius
///   storefence --lat 51.5 --lon -0.10 -r 5000 -n "Borough Market"
///
///   # Geocode the store address to seed the center
///   storefence -a "221B Baker Street, London" -o boundary.geojson
///
///   # Use a config file
///   storefence --config my-store.toml
#[derive(Parser, Debug)]
#[command(name = "storefence")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches storefence.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Latitude of the store location (use with --lon)
    #[arg(long, requires = "lon")]
    lat: Option<f64>,

    /// Longitude of the store location (use with --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Store address to geocode (alternative to --lat/--lon)
    #[arg(short = 'a', long)]
    address: Option<String>,

    /// Service radius in meters; boundary points must fall within it
    #[arg(short = 'r', long, default_value = "5000.0")]
    radius: f64,

    /// Store name recorded in the saved boundary
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Output GeoJSON file path (defaults to {name}.geojson or boundary.geojson)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let lat = args
        .lat
        .or_else(|| file_config.as_ref().and_then(|c| c.lat));
    let lon = args
        .lon
        .or_else(|| file_config.as_ref().and_then(|c| c.lon));
    let address = args
        .address
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.address.clone()));
    let radius = if (args.radius - 5000.0).abs() > f64::EPSILON {
        args.radius
    } else {
        file_config.as_ref().map(|c| c.radius).unwrap_or(5000.0)
    };
    let store_name = args
        .name
        .clone()
        .or_else(|| file_config.as_ref().map(|c| c.store_name.clone()))
        .unwrap_or_else(|| "My Store".to_string());
    let output = args
        .output
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.output.clone()));
    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);

    if lat.is_none() && address.is_none() {
        bail!("Must provide either --lat and --lon, or --address/-a");
    }
    if !(radius.is_finite() && radius > 0.0) {
        bail!("Radius must be a positive number of meters, got {}", radius);
    }

    println!("storefence - Service Boundary Builder");
    println!("=====================================");
    println!();

    let output_path = output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "{}.geojson",
            store_name.to_lowercase().replace(' ', "_")
        ))
    });

    if verbose {
        println!("Configuration:");
        println!("  Store: {}", store_name);
        println!("  Radius: {}m", radius);
        println!("  Output: {}", output_path.display());
        println!();
    }

    let center = if let (Some(lt), Some(ln)) = (lat, lon) {
        let c = Coordinate::new(lt, ln)
            .with_context(|| format!("Coordinates out of range: ({}, {})", lt, ln))?;
        println!("Using provided coordinates: ({:.4}, {:.4})", c.lat, c.lon);
        c
    } else {
        let addr = address.as_ref().unwrap();
        let spinner = create_spinner("Geocoding store address...");
        let start = Instant::now();
        let c = geocode_address(addr).context("Failed to geocode store address")?;
        spinner.finish_with_message(format!(
            "Geocoded: {} -> ({:.4}, {:.4}) [{:.1}s]",
            addr,
            c.lat,
            c.lon,
            start.elapsed().as_secs_f32()
        ));
        c
    };

    let mut session = BoundarySession::new(center, radius, store_name);

    println!();
    println!(
        "Place {} boundary points within {:.0}m of the store, then save.",
        MAX_VERTICES, radius
    );
    println!("Type 'help' for commands.");
    println!();

    run_repl(&mut session, &output_path, verbose)
}

/// Read commands from stdin until quit/EOF, driving the session
fn run_repl(session: &mut BoundarySession, output_path: &Path, verbose: bool) -> Result<()> {
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            println!();
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, rest)) = parts.split_first() else {
            continue;
        };

        match command {
            "add" => cmd_add(session, rest),
            "undo" => {
                if session.remove_last_vertex() {
                    println!(
                        "Removed last point ({}/{} remain)",
                        session.vertices().len(),
                        MAX_VERTICES
                    );
                } else {
                    println!("Nothing to undo");
                }
            }
            "clear" => {
                session.clear_all();
                println!("Cleared all boundary points");
            }
            "center" => cmd_center(session, rest),
            "radius" => cmd_radius(session, rest),
            "name" => {
                if rest.is_empty() {
                    println!("Usage: name <store name>");
                } else {
                    session.set_store_name(rest.join(" "));
                    println!("Store name set to '{}'", session.store_name());
                }
            }
            "status" => cmd_status(session),
            "save" => cmd_save(session, output_path, verbose)?,
            "help" => print_help(),
            "quit" | "exit" => break,
            _ => println!("Unknown command '{}'; type 'help'", command),
        }
    }

    Ok(())
}

fn cmd_add(session: &mut BoundarySession, rest: &[&str]) {
    let Some(point) = parse_coordinate(rest) else {
        println!("Usage: add <lat> <lon>");
        return;
    };

    match session.attempt_add_vertex(point) {
        AddOutcome::Accepted => println!(
            "Added point {}/{} at ({:.4}, {:.4})",
            session.vertices().len(),
            MAX_VERTICES,
            point.lat,
            point.lon
        ),
        AddOutcome::RejectedTooMany => println!(
            "Boundary already has {} points; 'undo' one to make room",
            MAX_VERTICES
        ),
        AddOutcome::RejectedOutOfRadius => println!(
            "Point is outside the {:.0}m service radius",
            session.radius_m()
        ),
    }
}

fn cmd_center(session: &mut BoundarySession, rest: &[&str]) {
    let Some(center) = parse_coordinate(rest) else {
        println!("Usage: center <lat> <lon>");
        return;
    };
    session.set_center(center);
    println!("Center moved to ({:.4}, {:.4})", center.lat, center.lon);
}

fn cmd_radius(session: &mut BoundarySession, rest: &[&str]) {
    match rest.first().and_then(|s| s.parse::<f64>().ok()) {
        Some(r) => {
            if session.set_radius(r) {
                println!("Service radius set to {:.0}m", r);
            } else {
                println!("Radius must be a positive number of meters");
            }
        }
        None => println!("Usage: radius <meters>"),
    }
}

fn cmd_status(session: &BoundarySession) {
    let center = session.center();
    println!("Store:  {}", session.store_name());
    println!("Center: ({:.4}, {:.4})", center.lat, center.lon);
    println!("Radius: {:.0}m", session.radius_m());
    println!(
        "Points: {}/{} ({})",
        session.vertices().len(),
        MAX_VERTICES,
        match session.phase() {
            Phase::Empty => "empty",
            Phase::Building => "building",
            Phase::Ready => "ready to save",
        }
    );
    for (i, v) in session.vertices().iter().enumerate() {
        println!("  {}. ({:.4}, {:.4})", i + 1, v.lat, v.lon);
    }
}

fn cmd_save(session: &BoundarySession, output_path: &Path, verbose: bool) -> Result<()> {
    match session.validate_and_save() {
        Ok(snapshot) => {
            write_geojson(output_path, &snapshot).context("Failed to write boundary file")?;
            println!(
                "Saved boundary for '{}' to {}",
                snapshot.store_name,
                output_path.display()
            );
            if verbose {
                for (i, v) in snapshot.vertices.iter().enumerate() {
                    println!("  {}. ({:.4}, {:.4})", i + 1, v.lat, v.lon);
                }
            }
        }
        Err(SaveError::IncompleteBoundary { have }) => {
            println!(
                "Boundary needs {} points before saving, has {}",
                MAX_VERTICES, have
            );
        }
        Err(SaveError::CenterNotContained) => {
            println!("The boundary must enclose the store location; adjust the points");
        }
    }
    Ok(())
}

fn parse_coordinate(rest: &[&str]) -> Option<Coordinate> {
    let [lat, lon] = rest else {
        return None;
    };
    Coordinate::new(lat.parse().ok()?, lon.parse().ok()?)
}

fn print_help() {
    println!("Commands:");
    println!("  add <lat> <lon>     Add a boundary point (within the service radius)");
    println!("  undo                Remove the most recent point");
    println!("  clear               Remove all points");
    println!("  center <lat> <lon>  Move the store location");
    println!("  radius <meters>     Change the service radius (gates new points only)");
    println!("  name <text>         Rename the store");
    println!("  status              Show the current session state");
    println!("  save                Validate and write the boundary GeoJSON");
    println!("  quit                Exit");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
