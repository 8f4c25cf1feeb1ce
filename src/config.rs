//! Global configuration constants.

/// Storage keys for the four independent collections.
pub const SCHEDULES_KEY: &str = "schedules";
pub const ASSIGNMENTS_KEY: &str = "assignments";
pub const NOTES_KEY: &str = "notes";
pub const SCHEDULE_SETS_KEY: &str = "schedule_sets";

/// Colors assigned to records created without an explicit color.
pub const DEFAULT_SCHEDULE_COLOR: &str = "#3498db";
pub const DEFAULT_ASSIGNMENT_COLOR: &str = "#ff8a65";

/// Visible day window of the timetable, minutes from midnight.
/// Slots run 07:00..=20:00 at 30-minute granularity.
pub const DAY_WINDOW_START: u16 = 7 * 60;
pub const DAY_WINDOW_END: u16 = 20 * 60;
pub const SLOT_MINUTES: u16 = 30;

/// Format tag written into exported backups.
pub const BACKUP_VERSION: &str = "1.0";
