use crate::types::Workout;

/// Ordered, append-only collection of the session's workouts.
///
/// Iteration order is insertion order, oldest first. The only wholesale
/// mutation is `replace_all`, used when reloading a persisted log.
#[derive(Debug, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub const fn new() -> Self {
        Self {
            workouts: Vec::new(),
        }
    }

    pub fn append(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    /// Linear scan; `None` means the id is not in the log and callers
    /// should treat the lookup as a no-op.
    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    /// Discard the current contents and install `workouts` in the given
    /// order. Only the load path calls this.
    pub fn replace_all(&mut self, workouts: Vec<Workout>) {
        self.workouts = workouts;
    }

    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn clear(&mut self) {
        self.workouts.clear();
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}
