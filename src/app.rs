use crate::codec;
use crate::dlog;
use crate::render::{Renderer, VIEWPORT_ZOOM, style_class};
use crate::storage::BlobStorage;
use crate::store::WorkoutStore;
use crate::types::{NewWorkout, Workout};
use anyhow::{Context, Result};

/// Application context: the workout store plus its injected storage and
/// renderer. One instance per session; all operations run to completion
/// on the calling thread.
pub struct App<S: BlobStorage, R: Renderer> {
    store: WorkoutStore,
    storage: S,
    renderer: R,
}

impl<S: BlobStorage, R: Renderer> App<S, R> {
    pub fn new(storage: S, renderer: R) -> Self {
        Self {
            store: WorkoutStore::new(),
            storage,
            renderer,
        }
    }

    pub const fn store(&self) -> &WorkoutStore {
        &self.store
    }

    /// Load the persisted log, if any, and replay a marker per workout.
    ///
    /// An absent blob is a normal first run. An unreadable blob is logged
    /// and treated the same way; it never aborts the session.
    pub fn load(&mut self) -> Result<usize> {
        let Some(blob) = self.storage.get()? else {
            dlog!("no stored workout log, starting empty");
            return Ok(0);
        };

        let workouts = match codec::decode(&blob) {
            Ok(workouts) => workouts,
            Err(e) => {
                tracing::warn!(err = %e, "stored workout log is unreadable, starting empty");
                self.store.clear();
                return Ok(0);
            }
        };

        self.store.replace_all(workouts);
        for w in self.store.all() {
            self.renderer
                .render_marker(w.coords(), w.label(), &style_class(w));
        }

        dlog!("loaded workouts={}", self.store.len());
        Ok(self.store.len())
    }

    /// Construct a workout from validated input, append it, render its
    /// marker, focus the viewport on it and save the whole log.
    ///
    /// Invalid input fails before any mutation. A failed save surfaces as
    /// this operation's error, but the workout stays in the in-memory
    /// store.
    pub fn new_workout(&mut self, input: NewWorkout) -> Result<String> {
        let workout = Workout::new(input)?;
        let id = workout.id().to_string();
        let kind = workout.kind();
        let coords = workout.coords();
        let label = workout.label().to_string();
        let class = style_class(&workout);

        self.store.append(workout);
        self.renderer.render_marker(coords, &label, &class);
        self.renderer.focus_viewport(coords, VIEWPORT_ZOOM);

        dlog!("new workout id={id} kind={kind}");
        self.save()?;
        Ok(id)
    }

    /// Focus the viewport on the workout with `id`. A miss is a no-op.
    pub fn move_to_workout(&mut self, id: &str) -> bool {
        let Some(workout) = self.store.find_by_id(id) else {
            dlog!("move_to_workout miss id={id}");
            return false;
        };

        let coords = workout.coords();
        self.renderer.focus_viewport(coords, VIEWPORT_ZOOM);
        true
    }

    /// Encode the store and replace the stored blob with it.
    pub fn save(&mut self) -> Result<()> {
        let blob = codec::encode(&self.store).context("encoding workout log")?;
        self.storage.set(&blob)
    }

    /// Forget the persisted log and empty the store.
    pub fn reset(&mut self) -> Result<()> {
        self.storage.clear().context("clearing stored workout log")?;
        self.store.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::types::Coordinates;
    use anyhow::bail;

    const COORDS: Coordinates = Coordinates::new(51.5, -0.1);

    fn run_input() -> NewWorkout {
        NewWorkout::Running {
            distance: 5.0,
            duration: 25.0,
            coords: COORDS,
            cadence: 180.0,
        }
    }

    fn ride_input() -> NewWorkout {
        NewWorkout::Cycling {
            distance: 20.0,
            duration: 60.0,
            coords: Coordinates::new(48.85, 2.35),
            elevation_gain: 200.0,
        }
    }

    #[derive(Debug, Default)]
    struct RecordingRenderer {
        markers: Vec<(Coordinates, String, String)>,
        views: Vec<(Coordinates, u8)>,
    }

    impl Renderer for RecordingRenderer {
        fn render_marker(&mut self, coords: Coordinates, label: &str, style_class: &str) {
            self.markers
                .push((coords, label.to_string(), style_class.to_string()));
        }

        fn focus_viewport(&mut self, coords: Coordinates, zoom: u8) {
            self.views.push((coords, zoom));
        }
    }

    /// Storage whose writes always fail, reads as empty.
    struct BrokenStorage;

    impl BlobStorage for BrokenStorage {
        fn get(&self) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _blob: &str) -> Result<()> {
            bail!("storage write refused")
        }

        fn clear(&mut self) -> Result<()> {
            Ok(())
        }
    }

    fn fresh_app() -> App<MemoryStorage, RecordingRenderer> {
        App::new(MemoryStorage::new(), RecordingRenderer::default())
    }

    #[test]
    fn new_workout_appends_renders_and_persists() {
        let mut app = fresh_app();
        let id = app.new_workout(run_input()).unwrap();

        assert_eq!(app.store().len(), 1);
        assert_eq!(app.store().find_by_id(&id).unwrap().id(), id);

        assert_eq!(app.renderer.markers.len(), 1);
        let (coords, label, class) = &app.renderer.markers[0];
        assert_eq!(*coords, COORDS);
        assert!(label.starts_with("Running on "));
        assert_eq!(class, "running-popup");

        assert_eq!(app.renderer.views, vec![(COORDS, VIEWPORT_ZOOM)]);

        let blob = app.storage.get().unwrap().unwrap();
        assert!(blob.contains(&id));
    }

    #[test]
    fn invalid_input_mutates_nothing() {
        let mut app = fresh_app();
        let err = app
            .new_workout(NewWorkout::Running {
                distance: 0.0,
                duration: 25.0,
                coords: COORDS,
                cadence: 180.0,
            })
            .unwrap_err();
        assert!(err.to_string().contains("distance"));

        assert!(app.store().is_empty());
        assert!(app.renderer.markers.is_empty());
        assert!(app.storage.get().unwrap().is_none());
    }

    #[test]
    fn load_replays_markers_in_insertion_order() {
        let mut first = fresh_app();
        first.new_workout(run_input()).unwrap();
        first.new_workout(ride_input()).unwrap();
        let blob = first.storage.get().unwrap().unwrap();

        let mut second = App::new(
            MemoryStorage::with_blob(blob),
            RecordingRenderer::default(),
        );
        assert_eq!(second.load().unwrap(), 2);

        assert_eq!(second.store().all(), first.store().all());
        let classes: Vec<&str> = second
            .renderer
            .markers
            .iter()
            .map(|(_, _, c)| c.as_str())
            .collect();
        assert_eq!(classes, vec!["running-popup", "cycling-popup"]);
        // Load replays markers but does not move the viewport.
        assert!(second.renderer.views.is_empty());
    }

    #[test]
    fn first_run_without_a_blob_loads_empty() {
        let mut app = fresh_app();
        assert_eq!(app.load().unwrap(), 0);
        assert!(app.store().is_empty());
    }

    #[test]
    fn corrupt_blob_loads_as_empty_without_error() {
        let mut app = App::new(
            MemoryStorage::with_blob("{definitely not json"),
            RecordingRenderer::default(),
        );
        assert_eq!(app.load().unwrap(), 0);
        assert!(app.store().is_empty());
        assert!(app.renderer.markers.is_empty());
    }

    #[test]
    fn move_to_workout_focuses_on_hit_and_ignores_miss() {
        let mut app = fresh_app();
        let id = app.new_workout(ride_input()).unwrap();
        app.renderer.views.clear();

        assert!(app.move_to_workout(&id));
        assert_eq!(app.renderer.views.len(), 1);
        assert_eq!(app.renderer.views[0].1, VIEWPORT_ZOOM);

        assert!(!app.move_to_workout("no-such-id"));
        assert_eq!(app.renderer.views.len(), 1);
        assert_eq!(app.store().len(), 1);
    }

    #[test]
    fn failed_save_keeps_the_workout_in_memory() {
        let mut app = App::new(BrokenStorage, RecordingRenderer::default());
        let err = app.new_workout(run_input()).unwrap_err();
        assert!(err.to_string().contains("storage write refused"));

        assert_eq!(app.store().len(), 1);
        assert_eq!(app.renderer.markers.len(), 1);
    }

    #[test]
    fn reset_clears_storage_and_store() {
        let mut app = fresh_app();
        app.new_workout(run_input()).unwrap();
        app.reset().unwrap();

        assert!(app.store().is_empty());
        assert!(app.storage.get().unwrap().is_none());
    }
}
