use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ulid::Ulid;

use crate::config;

/// Unix milliseconds — the only wall-clock type.
pub type Ms = i64;

/// Day of the week a schedule entry occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    /// Parse a form-field day value. Accepts the short or full English
    /// name, case-insensitive.
    pub fn parse(s: &str) -> Option<Day> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mon" | "monday" => Some(Day::Mon),
            "tue" | "tuesday" => Some(Day::Tue),
            "wed" | "wednesday" => Some(Day::Wed),
            "thu" | "thursday" => Some(Day::Thu),
            "fri" | "friday" => Some(Day::Fri),
            "sat" | "saturday" => Some(Day::Sat),
            "sun" | "sunday" => Some(Day::Sun),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Mon => "mon",
            Day::Tue => "tue",
            Day::Wed => "wed",
            Day::Thu => "thu",
            Day::Fri => "fri",
            Day::Sat => "sat",
            Day::Sun => "sun",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A clock time as minutes from midnight, in `[0, 1439]`.
///
/// Serialized as the zero-padded `"HH:MM"` string the rest of the data
/// model uses, so lexicographic order on the serialized form matches
/// numeric order here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const fn from_minutes(minutes: u16) -> Option<ClockTime> {
        if minutes < 24 * 60 {
            Some(ClockTime(minutes))
        } else {
            None
        }
    }

    /// Parse an `"HH:MM"` (or `"H:MM"`) form-field value.
    pub fn parse(s: &str) -> Option<ClockTime> {
        let (hours, minutes) = s.trim().split_once(':')?;
        let hours: u16 = hours.parse().ok()?;
        let minutes: u16 = minutes.parse().ok()?;
        if hours >= 24 || minutes >= 60 {
            return None;
        }
        Some(ClockTime(hours * 60 + minutes))
    }

    pub fn to_minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ClockTime::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid clock time: {s}")))
    }
}

/// Half-open interval `[start, end)` within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeSpan {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        debug_assert!(start < end, "TimeSpan start must be before end");
        Self { start, end }
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.to_minutes() - self.start.to_minutes()
    }

    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, t: ClockTime) -> bool {
        self.start <= t && t < self.end
    }
}

/// Ordered slot boundaries of the visible day window: 07:00..=20:00 at
/// 30-minute granularity.
pub fn day_slots() -> Vec<ClockTime> {
    let mut slots = Vec::new();
    let mut minutes = config::DAY_WINDOW_START;
    while minutes <= config::DAY_WINDOW_END {
        slots.push(ClockTime(minutes));
        minutes += config::SLOT_MINUTES;
    }
    slots
}

// ── Records ──────────────────────────────────────────────

/// One class entry in the weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Ulid,
    pub name: String,
    pub day: Day,
    pub start: ClockTime,
    pub end: ClockTime,
    pub location: String,
    pub color: String,
    pub created: Ms,
}

impl Schedule {
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start, self.end)
    }
}

/// An assignment spanning an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Ulid,
    pub title: String,
    pub class_id: Option<Ulid>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub completed: bool,
    pub color: String,
    pub notes: String,
    pub created: Ms,
}

impl Assignment {
    /// Inclusive date-range membership: `start <= date <= end`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A free-form note, optionally linked to a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Ulid,
    pub class_id: Option<Ulid>,
    pub title: String,
    pub content: String,
    pub created: Ms,
}

/// A named snapshot of the schedule collection, independent of the live
/// records once saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSet {
    pub id: Ulid,
    pub name: String,
    pub schedules: Vec<Schedule>,
    pub created: Ms,
}

// ── Drafts ───────────────────────────────────────────────
//
// Raw form-field values as the UI collaborator extracted them. Validation
// and normalization into typed records happen inside the planner.

#[derive(Debug, Clone, Default)]
pub struct ScheduleDraft {
    /// Present when editing an existing record.
    pub id: Option<Ulid>,
    pub name: String,
    pub day: String,
    pub start: String,
    pub end: String,
    pub location: String,
    /// Empty selects the default schedule color.
    pub color: String,
}

#[derive(Debug, Clone, Default)]
pub struct AssignmentDraft {
    pub id: Option<Ulid>,
    pub title: String,
    /// Empty means not linked to a class.
    pub class_id: String,
    pub start: String,
    pub end: String,
    pub completed: bool,
    pub color: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub id: Option<Ulid>,
    pub class_id: String,
    pub title: String,
    pub content: String,
}
