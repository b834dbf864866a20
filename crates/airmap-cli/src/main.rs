// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use airmap_core::config::ConfigStore;
use airmap_core::ingest::ingest_file;
use airmap_core::render::{format_elevation, DetailPanel, Scene};
use airmap_core::{AirportRecord, Session};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Airport CSV (ident, name, elevation_ft, iso_country, municipality, longitude, latitude)
    #[arg(env = "AIRMAP_FILE")]
    file: PathBuf,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List countries in first-seen order with their airport counts
    Countries,
    /// List the airports of one country
    Airports { code: String },
    /// Show the detail panel for one airport
    Show { ident: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigStore::new().load().unwrap_or_default();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        config.log_level_filter().min(LevelFilter::Warn)
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let source = cli.file.display().to_string();
    let dataset = ingest_file(&cli.file).with_context(|| format!("Failed to ingest {}", source))?;
    let mut session = Session::new();
    session.load(&source, Ok(dataset));

    match &cli.command {
        Commands::Countries => {
            let scene = Scene::derive(&session);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&scene.countries)?);
            } else {
                for country in &scene.countries {
                    println!(
                        "{:<4} {:<20} ({} airports)",
                        country.code, country.label, country.airports
                    );
                }
            }
        }
        Commands::Airports { code } => {
            session.select_country(code);
            let airports: Vec<&AirportRecord> = session
                .dataset()
                .map(|d| d.group(code).map(|(_, a)| a).collect())
                .unwrap_or_default();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&airports)?);
            } else if airports.is_empty() {
                println!("No airports for country '{}'", code);
            } else {
                for airport in airports {
                    println!("{}", airport_line(airport));
                }
            }
        }
        Commands::Show { ident } => {
            let found = session.dataset().and_then(|d| d.find_ident(ident));
            let Some((id, _)) = found else {
                anyhow::bail!("No airport with ident '{}'", ident);
            };
            session.marker_clicked(id);
            let panel = session
                .selected_airport()
                .map(DetailPanel::from_record)
                .context("Selected airport vanished")?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&panel)?);
            } else {
                println!("{}", panel.title);
                println!("{}", panel.city_line());
                println!("{}", panel.elevation_line());
            }
        }
    }

    Ok(())
}

fn airport_line(airport: &AirportRecord) -> String {
    let position = match airport.coordinates() {
        Some((lon, lat)) => format!("{:>10.4} {:>9.4}", lon, lat),
        None => format!("{:>20}", "no coordinates"),
    };
    format!(
        "{:<8} {:<40} {:>10} {}  {}",
        airport.ident,
        airport.name,
        format_elevation(airport.elevation_m),
        position,
        airport.municipality
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airport(lon: Option<f64>, elevation_m: Option<f64>) -> AirportRecord {
        AirportRecord {
            ident: "EPWA".to_string(),
            name: "Warsaw Chopin".to_string(),
            elevation_m,
            country_code: "PL".to_string(),
            municipality: "Warsaw".to_string(),
            longitude: lon,
            latitude: Some(52.166),
        }
    }

    #[test]
    fn test_airport_line_with_position() {
        let line = airport_line(&airport(Some(20.967), Some(110.34)));
        assert!(line.starts_with("EPWA"));
        assert!(line.contains("110.34m"));
        assert!(line.contains("20.9670"));
        assert!(line.contains("52.1660"));
        assert!(line.ends_with("Warsaw"));
    }

    #[test]
    fn test_airport_line_without_position() {
        let line = airport_line(&airport(None, None));
        assert!(line.contains("no coordinates"));
        assert!(line.contains("n/a"));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["airmap", "airports.csv", "airports", "PL", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Airports { ref code } if code == "PL"));
    }
}
