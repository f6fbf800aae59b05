#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;
use merkenn::app::App;
use merkenn::render::TextRenderer;
use merkenn::storage::FileStorage;
use merkenn::types::{Coordinates, NewWorkout};
use merkenn::{cli, utils};

#[macro_use]
extern crate merkenn;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    dlog!("log_file={}", cli.log_file.display());

    let mut app = App::new(FileStorage::new(&cli.log_file), TextRenderer);
    app.load()?;

    match cli.cmd {
        Some(cli::Cmd::Running {
            distance,
            duration,
            lat,
            lon,
            cadence,
        }) => {
            let id = app.new_workout(NewWorkout::Running {
                distance,
                duration,
                coords: Coordinates::new(lat, lon),
                cadence,
            })?;
            println!("{id}");
            Ok(())
        }
        Some(cli::Cmd::Cycling {
            distance,
            duration,
            lat,
            lon,
            elevation,
        }) => {
            let id = app.new_workout(NewWorkout::Cycling {
                distance,
                duration,
                coords: Coordinates::new(lat, lon),
                elevation_gain: elevation,
            })?;
            println!("{id}");
            Ok(())
        }
        Some(cli::Cmd::Show { id }) => {
            if !app.move_to_workout(&id) {
                tracing::warn!(id = %id, "no workout with that id");
            }
            Ok(())
        }
        Some(cli::Cmd::Reset) => {
            app.reset()?;
            tracing::info!("workout log deleted");
            Ok(())
        }
        None => {
            if app.store().is_empty() {
                anyhow::bail!(
                    "No workouts logged yet. Pin one with `merkenn running` or `merkenn cycling`."
                );
            }

            for (i, w) in app.store().all().iter().enumerate() {
                println!(
                    "{}\t{}\t{}\t{:.1} km\t{}\t{}",
                    i + 1,
                    w.id(),
                    w.label(),
                    w.distance(),
                    utils::format_duration_min(w.duration()),
                    utils::format_metrics(w.metrics())
                );
            }
            Ok(())
        }
    }
}
