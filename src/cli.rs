use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_LOG_FILE: &str = "/home/mat/.local/share/merkenn/workouts.json";

#[derive(Parser, Debug)]
#[command(
    name = "merkenn",
    about = "Log running and cycling workouts pinned to map coordinates"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Cmd>,

    /// Path to the workout log file.
    ///
    /// Default: /home/mat/.local/share/merkenn/workouts.json
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Log a run at the given map position
    Running {
        /// Distance in km
        distance: f64,
        /// Duration in minutes
        duration: f64,
        /// Latitude of the map pin, in degrees
        lat: f64,
        /// Longitude of the map pin, in degrees
        lon: f64,
        /// Cadence in steps/min
        cadence: f64,
    },
    /// Log a ride at the given map position
    Cycling {
        /// Distance in km
        distance: f64,
        /// Duration in minutes
        duration: f64,
        /// Latitude of the map pin, in degrees
        lat: f64,
        /// Longitude of the map pin, in degrees
        lon: f64,
        /// Elevation gain in meters (may be negative)
        elevation: f64,
    },
    /// Jump the viewport to a logged workout
    Show {
        /// Workout id, as printed by the list
        id: String,
    },
    /// Delete the whole workout log
    Reset,
}
