use std::io;

use crate::model::Schedule;

#[derive(Debug)]
pub enum PlannerError {
    /// Missing or unparseable form fields; one message per problem.
    Validation(Vec<String>),
    /// The first same-day record whose time interval overlaps the save.
    Conflict(Box<Schedule>),
    /// The underlying collection write failed; in-memory state is unchanged.
    Storage(io::Error),
}

impl std::fmt::Display for PlannerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlannerError::Validation(messages) => write!(f, "{}", messages.join("\n")),
            PlannerError::Conflict(existing) => write!(
                f,
                "time overlap with existing class: {} ({} {}-{})",
                existing.name, existing.day, existing.start, existing.end
            ),
            PlannerError::Storage(e) => write!(f, "storage error: {e}"),
        }
    }
}

impl std::error::Error for PlannerError {}

impl From<io::Error> for PlannerError {
    fn from(value: io::Error) -> Self {
        Self::Storage(value)
    }
}

pub type PlannerResult<T> = Result<T, PlannerError>;
