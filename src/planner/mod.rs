pub mod backup;
mod conflict;
mod error;
mod mutations;
mod queries;
mod validate;

pub use backup::Backup;
pub use error::{PlannerError, PlannerResult};
pub use validate::{validate_assignment, validate_note, validate_schedule};

use std::io;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config;
use crate::model::{Assignment, Note, Schedule, ScheduleSet};
use crate::store::Storage;

/// The planner core: four independent record collections loaded from an
/// injected store at startup, every mutation written through as one
/// whole-collection write before the in-memory state changes.
///
/// Mutations take `&mut self`; the exclusive borrow keeps the
/// read-modify-write cycles from interleaving.
pub struct Planner<S: Storage> {
    store: S,
    schedules: Vec<Schedule>,
    assignments: Vec<Assignment>,
    notes: Vec<Note>,
    schedule_sets: Vec<ScheduleSet>,
}

impl<S: Storage> Planner<S> {
    /// Load all four collections from `store`.
    pub fn open(store: S) -> PlannerResult<Self> {
        let schedules = load_collection(&store, config::SCHEDULES_KEY)?;
        let assignments = load_collection(&store, config::ASSIGNMENTS_KEY)?;
        let notes = load_collection(&store, config::NOTES_KEY)?;
        let schedule_sets = load_collection(&store, config::SCHEDULE_SETS_KEY)?;
        info!(
            schedules = schedules.len(),
            assignments = assignments.len(),
            notes = notes.len(),
            schedule_sets = schedule_sets.len(),
            "planner opened"
        );
        Ok(Self {
            store,
            schedules,
            assignments,
            notes,
            schedule_sets,
        })
    }

    /// Consume the planner, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist<T: Serialize>(&self, key: &str, records: &[T]) -> PlannerResult<()> {
        let mut frames = Vec::with_capacity(records.len());
        for record in records {
            let frame = bincode::serialize(record)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            frames.push(frame);
        }
        self.store.write(key, &frames)?;
        Ok(())
    }

    // Write-through commits: persist first, only then replace the live
    // collection, so a failed write leaves memory at the pre-mutation state.

    pub(super) fn commit_schedules(&mut self, next: Vec<Schedule>) -> PlannerResult<()> {
        self.persist(config::SCHEDULES_KEY, &next)?;
        self.schedules = next;
        Ok(())
    }

    pub(super) fn commit_assignments(&mut self, next: Vec<Assignment>) -> PlannerResult<()> {
        self.persist(config::ASSIGNMENTS_KEY, &next)?;
        self.assignments = next;
        Ok(())
    }

    pub(super) fn commit_notes(&mut self, next: Vec<Note>) -> PlannerResult<()> {
        self.persist(config::NOTES_KEY, &next)?;
        self.notes = next;
        Ok(())
    }

    pub(super) fn commit_schedule_sets(&mut self, next: Vec<ScheduleSet>) -> PlannerResult<()> {
        self.persist(config::SCHEDULE_SETS_KEY, &next)?;
        self.schedule_sets = next;
        Ok(())
    }
}

fn load_collection<S: Storage, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> PlannerResult<Vec<T>> {
    let frames = store.read(key)?;
    let mut records = Vec::with_capacity(frames.len());
    for frame in &frames {
        match bincode::deserialize(frame) {
            Ok(record) => records.push(record),
            Err(_) => {
                // Same stance as the frame-level CRC check: keep the valid
                // prefix, drop the rest.
                warn!(key, "undecodable record, dropping rest of collection");
                break;
            }
        }
    }
    Ok(records)
}
