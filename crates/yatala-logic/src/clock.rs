//! The in-game clock.
//!
//! Time is a day counter plus hour and minute. It only moves forward and
//! only when an action advances it; nothing here reads the wall clock.
//! Cooldowns and timestamps are expressed as absolute game minutes
//! ([`GameTime::total_minutes`]).
//!
//! ```
//! use yatala_logic::clock::{GameTime, Period};
//!
//! let mut t = GameTime::default(); // Day 1, 06:00
//! t.advance(135);
//! assert_eq!(t.to_string(), "Day 1, 08:15");
//! assert_eq!(t.period(), Period::Morning);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MINUTES_PER_HOUR: u64 = 60;
pub const HOURS_PER_DAY: u64 = 24;
pub const MINUTES_PER_DAY: u64 = MINUTES_PER_HOUR * HOURS_PER_DAY;
/// The prison calendar ignores leap years.
pub const DAYS_PER_YEAR: u32 = 365;

const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Hour the first day starts at.
pub const DEFAULT_START_HOUR: u8 = 6;

/// Day, hour (0–23) and minute (0–59). Field order makes the derived
/// ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameTime {
    day: u32,
    hour: u8,
    minute: u8,
}

impl Default for GameTime {
    fn default() -> Self {
        Self {
            day: 1,
            hour: DEFAULT_START_HOUR,
            minute: 0,
        }
    }
}

impl GameTime {
    /// Build a time, rejecting out-of-range fields. Days start at 1.
    pub fn new(day: u32, hour: u8, minute: u8) -> Option<Self> {
        if day == 0 || u64::from(hour) >= HOURS_PER_DAY || u64::from(minute) >= MINUTES_PER_HOUR {
            return None;
        }
        Some(Self { day, hour, minute })
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since Day 1, 00:00.
    pub fn total_minutes(&self) -> u64 {
        u64::from(self.day.saturating_sub(1)) * MINUTES_PER_DAY
            + u64::from(self.hour) * MINUTES_PER_HOUR
            + u64::from(self.minute)
    }

    /// Whole hours elapsed since Day 1, 00:00.
    pub fn total_hours(&self) -> u64 {
        self.total_minutes() / MINUTES_PER_HOUR
    }

    pub fn from_total_minutes(total: u64) -> Self {
        let days = total / MINUTES_PER_DAY;
        let rem = total % MINUTES_PER_DAY;
        Self {
            day: u32::try_from(days + 1).unwrap_or(u32::MAX),
            hour: (rem / MINUTES_PER_HOUR) as u8,
            minute: (rem % MINUTES_PER_HOUR) as u8,
        }
    }

    /// Move forward by `minutes`, carrying into hours and days.
    pub fn advance(&mut self, minutes: u32) {
        let total_min = u64::from(self.minute) + u64::from(minutes);
        self.minute = (total_min % MINUTES_PER_HOUR) as u8;
        let total_hours = u64::from(self.hour) + total_min / MINUTES_PER_HOUR;
        self.hour = (total_hours % HOURS_PER_DAY) as u8;
        let days = u64::from(self.day) + total_hours / HOURS_PER_DAY;
        self.day = u32::try_from(days).unwrap_or(u32::MAX);
    }

    pub fn period(&self) -> Period {
        Period::for_hour(self.hour)
    }

    /// Day within the 365-day calendar year, 1-based. Day 1 is 1 January.
    pub fn day_of_year(&self) -> u32 {
        self.day.saturating_sub(1) % DAYS_PER_YEAR + 1
    }

    /// Calendar (month, day-of-month), both 1-based.
    pub fn calendar_date(&self) -> (u8, u8) {
        let mut remaining = self.day_of_year();
        for (idx, &len) in MONTH_LENGTHS.iter().enumerate() {
            if remaining <= len {
                return (idx as u8 + 1, remaining as u8);
            }
            remaining -= len;
        }
        (12, 31)
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {}, {:02}:{:02}", self.day, self.hour, self.minute)
    }
}

/// Named parts of the prison day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// 0600–0800
    Breakfast,
    /// 0800–1200
    Morning,
    /// 1200–1300
    Lunch,
    /// 1300–1700
    Afternoon,
    /// 1700–1800
    Dinner,
    /// 1800–2200
    Evening,
    /// 2200–0600
    Lockdown,
}

impl Period {
    pub fn for_hour(hour: u8) -> Self {
        match hour % 24 {
            6..=7 => Period::Breakfast,
            8..=11 => Period::Morning,
            12 => Period::Lunch,
            13..=16 => Period::Afternoon,
            17 => Period::Dinner,
            18..=21 => Period::Evening,
            _ => Period::Lockdown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Breakfast => "Brekky Time",
            Period::Morning => "Morning",
            Period::Lunch => "Lunch",
            Period::Afternoon => "Arvo",
            Period::Dinner => "Tea Time",
            Period::Evening => "Evening",
            Period::Lockdown => "Lock-in",
        }
    }
}

/// Half-open window of hours `[start, end)`. Wraps past midnight when
/// `start > end`; `start == end` is an empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    pub start: u8,
    pub end: u8,
}

impl HourWindow {
    pub const fn new(start: u8, end: u8) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, hour: u8) -> bool {
        if self.start <= self.end {
            self.start <= hour && hour < self.end
        } else {
            hour >= self.start || hour < self.end
        }
    }
}

/// Day of the calendar year (1–365) for a month/day pair.
pub fn ordinal_day(month: u8, day: u8) -> u32 {
    let month = usize::from(month.clamp(1, 12));
    let before: u32 = MONTH_LENGTHS[..month - 1].iter().sum();
    before + u32::from(day.max(1)).min(MONTH_LENGTHS[month - 1])
}

/// Inclusive calendar window `(month, day)..=(month, day)`, wrapping over
/// the year end when the start is later than the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarWindow {
    pub start: (u8, u8),
    pub end: (u8, u8),
}

impl CalendarWindow {
    pub fn contains(&self, time: &GameTime) -> bool {
        let today = time.day_of_year();
        let start = ordinal_day(self.start.0, self.start.1);
        let end = ordinal_day(self.end.0, self.end.1);
        if start <= end {
            (start..=end).contains(&today)
        } else {
            today >= start || today <= end
        }
    }
}
