use ulid::Ulid;

use crate::model::{Day, Ms, Schedule, TimeSpan};

pub(crate) fn now_ms() -> Ms {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as Ms
}

/// All records on `day` whose `[start, end)` interval overlaps `span`,
/// in storage order. `exclude` skips the record being edited so a save
/// does not conflict with itself.
pub(super) fn find_conflicts<'a>(
    schedules: &'a [Schedule],
    day: Day,
    span: TimeSpan,
    exclude: Option<Ulid>,
) -> Vec<&'a Schedule> {
    schedules
        .iter()
        .filter(|s| Some(s.id) != exclude)
        .filter(|s| s.day == day)
        .filter(|s| s.span().overlaps(&span))
        .collect()
}
