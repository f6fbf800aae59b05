use crate::store::WorkoutStore;
use crate::types::{Coordinates, InvalidInput, Metrics, NewWorkout, Workout};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The persisted log could not be turned back into workouts.
///
/// Callers recover by treating the log as empty; this never aborts a
/// session.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("workout log blob is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("stored workout {id} is missing its {field} field")]
    MissingField { id: String, field: &'static str },
    #[error("stored workout {id} has invalid raw fields: {source}")]
    Invalid { id: String, source: InvalidInput },
}

/// On-disk shape of one workout. Field names match the legacy blob format
/// (the browser app's JSON.stringify output), so old logs keep loading.
///
/// Derived fields (`pace`, `speed`, `string`) are written on encode but
/// ignored on decode: rehydration recomputes them from the raw fields, so
/// a hand-edited or older-schema blob cannot smuggle in stale values.
#[derive(Debug, Serialize, Deserialize)]
struct StoredWorkout {
    id: String,
    #[serde(rename = "type")]
    kind: StoredKind,
    date: DateTime<Utc>,
    distance: f64,
    duration: f64,
    /// [lat, lng], as Leaflet ordered them.
    coords: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pace: Option<f64>,
    #[serde(
        default,
        rename = "elevationGain",
        skip_serializing_if = "Option::is_none"
    )]
    elevation_gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed: Option<f64>,
    #[serde(default, rename = "string", skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum StoredKind {
    Running,
    Cycling,
}

/// Serialize the whole store to a JSON blob, derived fields included.
pub fn encode(store: &WorkoutStore) -> Result<String, serde_json::Error> {
    let records: Vec<StoredWorkout> = store.all().iter().map(to_stored).collect();
    serde_json::to_string(&records)
}

/// Parse a blob back into workouts, in stored order.
pub fn decode(blob: &str) -> Result<Vec<Workout>, DecodeError> {
    let records: Vec<StoredWorkout> = serde_json::from_str(blob)?;
    records.into_iter().map(rehydrate).collect()
}

fn to_stored(w: &Workout) -> StoredWorkout {
    let coords = w.coords();
    let (kind, cadence, pace, elevation_gain, speed) = match w.metrics() {
        Metrics::Running { cadence, pace } => {
            (StoredKind::Running, Some(cadence), Some(pace), None, None)
        }
        Metrics::Cycling {
            elevation_gain,
            speed,
        } => (
            StoredKind::Cycling,
            None,
            None,
            Some(elevation_gain),
            Some(speed),
        ),
    };

    StoredWorkout {
        id: w.id().to_string(),
        kind,
        date: w.created_at(),
        distance: w.distance(),
        duration: w.duration(),
        coords: [coords.lat, coords.lon],
        cadence,
        pace,
        elevation_gain,
        speed,
        label: Some(w.label().to_string()),
    }
}

fn rehydrate(rec: StoredWorkout) -> Result<Workout, DecodeError> {
    let coords = Coordinates::new(rec.coords[0], rec.coords[1]);

    let input = match rec.kind {
        StoredKind::Running => {
            let Some(cadence) = rec.cadence else {
                return Err(DecodeError::MissingField {
                    id: rec.id,
                    field: "cadence",
                });
            };
            NewWorkout::Running {
                distance: rec.distance,
                duration: rec.duration,
                coords,
                cadence,
            }
        }
        StoredKind::Cycling => {
            let Some(elevation_gain) = rec.elevation_gain else {
                return Err(DecodeError::MissingField {
                    id: rec.id,
                    field: "elevationGain",
                });
            };
            NewWorkout::Cycling {
                distance: rec.distance,
                duration: rec.duration,
                coords,
                elevation_gain,
            }
        }
    };

    Workout::rehydrate(rec.id.clone(), rec.date, input)
        .map_err(|source| DecodeError::Invalid { id: rec.id, source })
}
