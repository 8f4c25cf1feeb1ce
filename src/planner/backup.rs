use std::io;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config;
use crate::model::{Assignment, Ms, Note, Schedule, ScheduleSet};
use crate::store::Storage;

use super::conflict::now_ms;
use super::{Planner, PlannerError, PlannerResult};

/// A full export of all four collections, importable into any store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backup {
    pub schedules: Vec<Schedule>,
    pub assignments: Vec<Assignment>,
    pub notes: Vec<Note>,
    pub schedule_sets: Vec<ScheduleSet>,
    pub timestamp: Ms,
    pub version: String,
}

impl<S: Storage> Planner<S> {
    pub fn export_backup(&self) -> Backup {
        Backup {
            schedules: self.schedules.clone(),
            assignments: self.assignments.clone(),
            notes: self.notes.clone(),
            schedule_sets: self.schedule_sets.clone(),
            timestamp: now_ms(),
            version: config::BACKUP_VERSION.to_string(),
        }
    }

    pub fn export_backup_json(&self) -> PlannerResult<String> {
        serde_json::to_string_pretty(&self.export_backup())
            .map_err(|e| PlannerError::Storage(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Replace all four collections with the backup's contents.
    ///
    /// Collections are committed one key at a time; there is no
    /// cross-collection atomicity, so a failed write mid-import leaves
    /// each key either fully imported or untouched.
    pub fn import_backup(&mut self, backup: Backup) -> PlannerResult<()> {
        self.commit_schedules(backup.schedules)?;
        self.commit_assignments(backup.assignments)?;
        self.commit_notes(backup.notes)?;
        self.commit_schedule_sets(backup.schedule_sets)?;
        info!(version = %backup.version, "backup imported");
        Ok(())
    }

    /// Parse and import an exported JSON document. A document that does
    /// not parse as a backup is a validation error.
    pub fn import_backup_json(&mut self, json: &str) -> PlannerResult<()> {
        let backup: Backup = serde_json::from_str(json)
            .map_err(|_| PlannerError::Validation(vec!["invalid backup file".into()]))?;
        self.import_backup(backup)
    }

    /// Remove every collection from the store and from memory.
    pub fn reset_all(&mut self) -> PlannerResult<()> {
        self.store.remove(config::SCHEDULES_KEY)?;
        self.schedules.clear();
        self.store.remove(config::ASSIGNMENTS_KEY)?;
        self.assignments.clear();
        self.store.remove(config::NOTES_KEY)?;
        self.notes.clear();
        self.store.remove(config::SCHEDULE_SETS_KEY)?;
        self.schedule_sets.clear();
        info!("all collections reset");
        Ok(())
    }
}
