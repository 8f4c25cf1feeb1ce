use chrono::NaiveDate;
use ulid::Ulid;

use crate::model::{AssignmentDraft, ClockTime, Day, NoteDraft, ScheduleDraft};

/// Structural checks on a schedule draft. Empty result = valid.
pub fn validate_schedule(draft: &ScheduleDraft) -> Vec<String> {
    let mut errors = Vec::new();
    if draft.name.trim().is_empty() {
        errors.push("class name is required".into());
    }
    if draft.day.trim().is_empty() {
        errors.push("day is required".into());
    }
    if draft.start.trim().is_empty() {
        errors.push("start time is required".into());
    }
    if draft.end.trim().is_empty() {
        errors.push("end time is required".into());
    }
    errors
}

pub fn validate_assignment(draft: &AssignmentDraft) -> Vec<String> {
    let mut errors = Vec::new();
    if draft.title.trim().is_empty() {
        errors.push("assignment title is required".into());
    }
    if draft.start.trim().is_empty() {
        errors.push("start date is required".into());
    }
    if draft.end.trim().is_empty() {
        errors.push("due date is required".into());
    }
    errors
}

/// The linked class is optional for notes.
pub fn validate_note(draft: &NoteDraft) -> Vec<String> {
    let mut errors = Vec::new();
    if draft.title.trim().is_empty() {
        errors.push("note title is required".into());
    }
    if draft.content.trim().is_empty() {
        errors.push("note content is required".into());
    }
    errors
}

// ── Normalization ────────────────────────────────────────
//
// Typed parses of the raw draft fields, run after the emptiness checks.
// Parse failures join the same aggregated message list so a caller sees
// every problem in one validation error.

#[derive(Debug)]
pub(super) struct NormalizedSchedule {
    pub day: Day,
    pub start: ClockTime,
    pub end: ClockTime,
}

pub(super) fn normalize_schedule(draft: &ScheduleDraft) -> Result<NormalizedSchedule, Vec<String>> {
    let mut errors = validate_schedule(draft);

    let day = Day::parse(&draft.day);
    if day.is_none() && !draft.day.trim().is_empty() {
        errors.push(format!("day is not valid: {}", draft.day.trim()));
    }
    let start = parse_time(&draft.start, "start time", &mut errors);
    let end = parse_time(&draft.end, "end time", &mut errors);

    if let (Some(start), Some(end)) = (start, end)
        && start >= end
    {
        errors.push("end time must be after start time".into());
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(NormalizedSchedule {
        day: day.unwrap(),
        start: start.unwrap(),
        end: end.unwrap(),
    })
}

pub(super) struct NormalizedAssignment {
    pub class_id: Option<Ulid>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// The reversed-range case (`start > end`) is deliberately not rejected;
/// such an assignment is storable and matches no date.
pub(super) fn normalize_assignment(
    draft: &AssignmentDraft,
) -> Result<NormalizedAssignment, Vec<String>> {
    let mut errors = validate_assignment(draft);

    let class_id = parse_class_id(&draft.class_id, &mut errors);
    let start = parse_date(&draft.start, "start date", &mut errors);
    let end = parse_date(&draft.end, "due date", &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(NormalizedAssignment {
        class_id,
        start: start.unwrap(),
        end: end.unwrap(),
    })
}

pub(super) fn normalize_note(draft: &NoteDraft) -> Result<Option<Ulid>, Vec<String>> {
    let mut errors = validate_note(draft);
    let class_id = parse_class_id(&draft.class_id, &mut errors);
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(class_id)
}

fn parse_time(raw: &str, field: &str, errors: &mut Vec<String>) -> Option<ClockTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None; // already reported by the emptiness check
    }
    let parsed = ClockTime::parse(raw);
    if parsed.is_none() {
        errors.push(format!("{field} is not a valid HH:MM time: {raw}"));
    }
    parsed
}

fn parse_date(raw: &str, field: &str, errors: &mut Vec<String>) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
    if parsed.is_none() {
        errors.push(format!("{field} is not a valid YYYY-MM-DD date: {raw}"));
    }
    parsed
}

fn parse_class_id(raw: &str, errors: &mut Vec<String>) -> Option<Ulid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match Ulid::from_string(raw) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(format!("linked class id is not valid: {raw}"));
            None
        }
    }
}
