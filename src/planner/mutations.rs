use tracing::debug;
use ulid::Ulid;

use crate::config;
use crate::model::{
    Assignment, AssignmentDraft, Note, NoteDraft, Schedule, ScheduleDraft, ScheduleSet, TimeSpan,
};
use crate::store::Storage;

use super::conflict::{find_conflicts, now_ms};
use super::validate;
use super::{Planner, PlannerError, PlannerResult};

impl<S: Storage> Planner<S> {
    // ── Schedules ────────────────────────────────────────

    /// Validate, conflict-check, and upsert one schedule entry.
    ///
    /// A draft with an id matching an existing record replaces it in place
    /// (id and `created` preserved) and is excluded from its own conflict
    /// check; otherwise the record is appended with a fresh id. Only the
    /// first conflict is reported, even when several exist.
    pub fn save_schedule(&mut self, draft: &ScheduleDraft) -> PlannerResult<Schedule> {
        let norm = validate::normalize_schedule(draft).map_err(PlannerError::Validation)?;
        let span = TimeSpan::new(norm.start, norm.end);

        let conflicts = find_conflicts(&self.schedules, norm.day, span, draft.id);
        if let Some(&existing) = conflicts.first() {
            return Err(PlannerError::Conflict(Box::new(existing.clone())));
        }

        let color = if draft.color.trim().is_empty() {
            config::DEFAULT_SCHEDULE_COLOR.to_string()
        } else {
            draft.color.clone()
        };

        let mut next = self.schedules.clone();
        let existing_pos = draft.id.and_then(|id| next.iter().position(|s| s.id == id));
        let record = match existing_pos {
            Some(pos) => {
                let record = Schedule {
                    id: next[pos].id,
                    name: draft.name.clone(),
                    day: norm.day,
                    start: norm.start,
                    end: norm.end,
                    location: draft.location.clone(),
                    color,
                    created: next[pos].created,
                };
                next[pos] = record.clone();
                record
            }
            None => {
                let record = Schedule {
                    id: draft.id.unwrap_or_else(Ulid::new),
                    name: draft.name.clone(),
                    day: norm.day,
                    start: norm.start,
                    end: norm.end,
                    location: draft.location.clone(),
                    color,
                    created: now_ms(),
                };
                next.push(record.clone());
                record
            }
        };

        self.commit_schedules(next)?;
        debug!(id = %record.id, day = %record.day, "schedule saved");
        Ok(record)
    }

    /// Remove one schedule entry. `Ok(false)` when no record matched.
    pub fn delete_schedule(&mut self, id: Ulid) -> PlannerResult<bool> {
        if !self.schedules.iter().any(|s| s.id == id) {
            return Ok(false);
        }
        let next = self
            .schedules
            .iter()
            .filter(|s| s.id != id)
            .cloned()
            .collect();
        self.commit_schedules(next)?;
        debug!(%id, "schedule deleted");
        Ok(true)
    }

    /// Remove the whole schedule collection.
    pub fn clear_schedules(&mut self) -> PlannerResult<()> {
        self.store.remove(config::SCHEDULES_KEY)?;
        self.schedules.clear();
        Ok(())
    }

    // ── Assignments ──────────────────────────────────────

    pub fn save_assignment(&mut self, draft: &AssignmentDraft) -> PlannerResult<Assignment> {
        let norm = validate::normalize_assignment(draft).map_err(PlannerError::Validation)?;

        let color = if draft.color.trim().is_empty() {
            config::DEFAULT_ASSIGNMENT_COLOR.to_string()
        } else {
            draft.color.clone()
        };

        let mut next = self.assignments.clone();
        let existing_pos = draft.id.and_then(|id| next.iter().position(|a| a.id == id));
        let record = match existing_pos {
            Some(pos) => {
                let record = Assignment {
                    id: next[pos].id,
                    title: draft.title.clone(),
                    class_id: norm.class_id,
                    start: norm.start,
                    end: norm.end,
                    completed: draft.completed,
                    color,
                    notes: draft.notes.clone(),
                    created: next[pos].created,
                };
                next[pos] = record.clone();
                record
            }
            None => {
                let record = Assignment {
                    id: draft.id.unwrap_or_else(Ulid::new),
                    title: draft.title.clone(),
                    class_id: norm.class_id,
                    start: norm.start,
                    end: norm.end,
                    completed: draft.completed,
                    color,
                    notes: draft.notes.clone(),
                    created: now_ms(),
                };
                next.push(record.clone());
                record
            }
        };

        self.commit_assignments(next)?;
        debug!(id = %record.id, "assignment saved");
        Ok(record)
    }

    pub fn delete_assignment(&mut self, id: Ulid) -> PlannerResult<bool> {
        if !self.assignments.iter().any(|a| a.id == id) {
            return Ok(false);
        }
        let next = self
            .assignments
            .iter()
            .filter(|a| a.id != id)
            .cloned()
            .collect();
        self.commit_assignments(next)?;
        debug!(%id, "assignment deleted");
        Ok(true)
    }

    // ── Notes ────────────────────────────────────────────

    pub fn save_note(&mut self, draft: &NoteDraft) -> PlannerResult<Note> {
        let class_id = validate::normalize_note(draft).map_err(PlannerError::Validation)?;

        let mut next = self.notes.clone();
        let existing_pos = draft.id.and_then(|id| next.iter().position(|n| n.id == id));
        let record = match existing_pos {
            Some(pos) => {
                let record = Note {
                    id: next[pos].id,
                    class_id,
                    title: draft.title.clone(),
                    content: draft.content.clone(),
                    created: next[pos].created,
                };
                next[pos] = record.clone();
                record
            }
            None => {
                let record = Note {
                    id: draft.id.unwrap_or_else(Ulid::new),
                    class_id,
                    title: draft.title.clone(),
                    content: draft.content.clone(),
                    created: now_ms(),
                };
                next.push(record.clone());
                record
            }
        };

        self.commit_notes(next)?;
        debug!(id = %record.id, "note saved");
        Ok(record)
    }

    pub fn delete_note(&mut self, id: Ulid) -> PlannerResult<bool> {
        if !self.notes.iter().any(|n| n.id == id) {
            return Ok(false);
        }
        let next = self.notes.iter().filter(|n| n.id != id).cloned().collect();
        self.commit_notes(next)?;
        debug!(%id, "note deleted");
        Ok(true)
    }

    // ── Schedule sets ────────────────────────────────────

    /// Snapshot the current live schedule list under `name` (trimmed).
    ///
    /// The snapshot is by value; later changes to the live collection do
    /// not touch it. A set already carrying the same trimmed name is
    /// overwritten in place, keeping its original id.
    pub fn save_schedule_set(&mut self, name: &str) -> PlannerResult<ScheduleSet> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::Validation(vec![
                "set name is required".into(),
            ]));
        }

        let mut next = self.schedule_sets.clone();
        let existing_pos = next.iter().position(|set| set.name == name);
        let set = match existing_pos {
            Some(pos) => {
                let set = ScheduleSet {
                    id: next[pos].id,
                    name: name.to_string(),
                    schedules: self.schedules.clone(),
                    created: now_ms(),
                };
                next[pos] = set.clone();
                set
            }
            None => {
                let set = ScheduleSet {
                    id: Ulid::new(),
                    name: name.to_string(),
                    schedules: self.schedules.clone(),
                    created: now_ms(),
                };
                next.push(set.clone());
                set
            }
        };

        self.commit_schedule_sets(next)?;
        debug!(id = %set.id, name = %set.name, "schedule set saved");
        Ok(set)
    }

    /// Replace the live schedule collection with a saved set's records.
    ///
    /// Record `created` timestamps inside the snapshot are preserved. A
    /// missing id returns an empty list — indistinguishable from loading
    /// a snapshot that was saved empty.
    pub fn load_schedule_set(&mut self, id: Ulid) -> PlannerResult<Vec<Schedule>> {
        let snapshot = match self.schedule_sets.iter().find(|set| set.id == id) {
            Some(set) => set.schedules.clone(),
            None => return Ok(Vec::new()),
        };
        self.commit_schedules(snapshot.clone())?;
        debug!(%id, count = snapshot.len(), "schedule set loaded");
        Ok(snapshot)
    }

    pub fn delete_schedule_set(&mut self, id: Ulid) -> PlannerResult<bool> {
        if !self.schedule_sets.iter().any(|set| set.id == id) {
            return Ok(false);
        }
        let next = self
            .schedule_sets
            .iter()
            .filter(|set| set.id != id)
            .cloned()
            .collect();
        self.commit_schedule_sets(next)?;
        debug!(%id, "schedule set deleted");
        Ok(true)
    }
}
