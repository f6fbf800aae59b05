use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Map position of a workout, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Validated input record for one workout, as produced by the form/CLI
/// boundary. The constructor re-checks the numeric preconditions anyway:
/// the elevation positivity check is deliberately not applied upstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NewWorkout {
    Running {
        distance: f64,
        duration: f64,
        coords: Coordinates,
        cadence: f64,
    },
    Cycling {
        distance: f64,
        duration: f64,
        coords: Coordinates,
        elevation_gain: f64,
    },
}

/// Kind-specific fields plus the metric derived from them, fixed at
/// construction. Downstream code matches on this exhaustively instead of
/// comparing kind strings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metrics {
    Running {
        /// steps/min
        cadence: f64,
        /// min/km, always `duration / distance`
        pace: f64,
    },
    Cycling {
        /// meters; may be zero or negative (descent-only rides exist)
        elevation_gain: f64,
        /// km/h, always `distance / (duration / 60)`
        speed: f64,
    },
}

impl Metrics {
    fn running(distance: f64, duration: f64, cadence: f64) -> Self {
        Self::Running {
            cadence,
            pace: duration / distance,
        }
    }

    fn cycling(distance: f64, duration: f64, elevation_gain: f64) -> Self {
        Self::Cycling {
            elevation_gain,
            speed: distance / (duration / 60.0),
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Running { .. } => "running",
            Self::Cycling { .. } => "cycling",
        }
    }
}

/// A numeric field failed its precondition. No workout is created.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidInput {
    #[error("distance must be a positive number of km, got {0}")]
    Distance(f64),
    #[error("duration must be a positive number of minutes, got {0}")]
    Duration(f64),
    #[error("cadence must be a positive number of steps/min, got {0}")]
    Cadence(f64),
    #[error("elevation gain must be a finite number of meters, got {0}")]
    ElevationGain(f64),
    #[error("coordinates must be finite degrees, got ({0}, {1})")]
    Coordinates(f64, f64),
}

/// One logged activity. Immutable after construction; the id, label and
/// derived metric are fixed here and never recomputed downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: String,
    created_at: DateTime<Utc>,
    distance: f64,
    duration: f64,
    coords: Coordinates,
    label: String,
    metrics: Metrics,
}

impl Workout {
    /// Validate `input` and build a workout stamped with the current time
    /// and a fresh opaque id.
    pub fn new(input: NewWorkout) -> Result<Self, InvalidInput> {
        Self::build(Uuid::new_v4().to_string(), Utc::now(), input)
    }

    /// Rebuild a workout from persisted raw fields, keeping its original
    /// id and timestamp. Runs the same validation as `new` and recomputes
    /// the label and derived metric from scratch.
    pub fn rehydrate(
        id: String,
        created_at: DateTime<Utc>,
        input: NewWorkout,
    ) -> Result<Self, InvalidInput> {
        Self::build(id, created_at, input)
    }

    fn build(
        id: String,
        created_at: DateTime<Utc>,
        input: NewWorkout,
    ) -> Result<Self, InvalidInput> {
        let (distance, duration, coords) = match input {
            NewWorkout::Running {
                distance,
                duration,
                coords,
                ..
            }
            | NewWorkout::Cycling {
                distance,
                duration,
                coords,
                ..
            } => (distance, duration, coords),
        };

        if !distance.is_finite() || distance <= 0.0 {
            return Err(InvalidInput::Distance(distance));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(InvalidInput::Duration(duration));
        }
        if !coords.lat.is_finite() || !coords.lon.is_finite() {
            return Err(InvalidInput::Coordinates(coords.lat, coords.lon));
        }

        let metrics = match input {
            NewWorkout::Running { cadence, .. } => {
                if !cadence.is_finite() || cadence <= 0.0 {
                    return Err(InvalidInput::Cadence(cadence));
                }
                Metrics::running(distance, duration, cadence)
            }
            NewWorkout::Cycling { elevation_gain, .. } => {
                // Only finiteness is required here; negative gain is valid.
                if !elevation_gain.is_finite() {
                    return Err(InvalidInput::ElevationGain(elevation_gain));
                }
                Metrics::cycling(distance, duration, elevation_gain)
            }
        };

        let label = make_label(metrics.kind(), created_at);

        Ok(Self {
            id,
            created_at,
            distance,
            duration,
            coords,
            label,
            metrics,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Distance in km.
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Duration in minutes.
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    pub const fn coords(&self) -> Coordinates {
        self.coords
    }

    /// Human-readable title, e.g. "Running on July 3".
    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub const fn kind(&self) -> &'static str {
        self.metrics.kind()
    }
}

fn make_label(kind: &str, created_at: DateTime<Utc>) -> String {
    let mut chars = kind.chars();
    let capitalized = chars.next().map_or_else(String::new, |c| {
        c.to_uppercase().collect::<String>() + chars.as_str()
    });
    format!(
        "{capitalized} on {} {}",
        created_at.format("%B"),
        created_at.day()
    )
}
