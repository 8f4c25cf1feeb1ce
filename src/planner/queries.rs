use chrono::NaiveDate;
use ulid::Ulid;

use crate::model::{Assignment, Day, Note, Schedule, ScheduleSet, TimeSpan};
use crate::store::Storage;

use super::Planner;
use super::conflict::find_conflicts;

impl<S: Storage> Planner<S> {
    // ── Schedules ────────────────────────────────────────

    /// All schedule entries in storage order.
    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn schedule(&self, id: Ulid) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.id == id)
    }

    /// All records on `day` whose interval overlaps `span`, half-open
    /// semantics, in storage order. Pass `exclude` when checking an edit
    /// of an existing record. Callers surfacing an error to the user
    /// report only the first match.
    pub fn check_conflicts(
        &self,
        day: Day,
        span: TimeSpan,
        exclude: Option<Ulid>,
    ) -> Vec<&Schedule> {
        find_conflicts(&self.schedules, day, span, exclude)
    }

    // ── Assignments ──────────────────────────────────────

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn assignment(&self, id: Ulid) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.id == id)
    }

    /// Assignments whose inclusive date range covers `date`. Called once
    /// per calendar cell during a month render; a linear scan is fine at
    /// personal-planner scale.
    pub fn assignments_on(&self, date: NaiveDate) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.covers(date)).collect()
    }

    /// Assignments sorted ascending by due date.
    pub fn assignments_by_due(&self) -> Vec<&Assignment> {
        let mut sorted: Vec<&Assignment> = self.assignments.iter().collect();
        sorted.sort_by_key(|a| a.end);
        sorted
    }

    // ── Notes ────────────────────────────────────────────

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: Ulid) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    // ── Schedule sets ────────────────────────────────────

    pub fn schedule_sets(&self) -> &[ScheduleSet] {
        &self.schedule_sets
    }

    pub fn schedule_set(&self, id: Ulid) -> Option<&ScheduleSet> {
        self.schedule_sets.iter().find(|set| set.id == id)
    }
}
