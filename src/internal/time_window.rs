//! Recency windows for dated content lists.
//!
//! Every list view offers the same filter selector: "Today", "This Week",
//! "Last 30 Days" and so on. [`classify`] is the single implementation of
//! those buckets. It is a pure function of the records, the window and the
//! caller's `now`; the only clock read happens where the caller takes `now`.

use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use jiff::{ToSpan, Zoned};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::utils::datetime::{day_difference, parse_timestamp};

/// Anything that may carry a publication timestamp.
pub trait Dated {
    /// The raw timestamp string, if the record has one.
    fn raw_timestamp(&self) -> Option<&str>;
}

/// Named recency windows, in selector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "camelCase")]
pub enum WindowId {
    Today,
    Yesterday,
    ThisWeek,
    Last7Days,
    Last30Days,
    Last90Days,
    Last180Days,
    LastYear,
}

impl WindowId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::ThisWeek => "thisWeek",
            Self::Last7Days => "last7Days",
            Self::Last30Days => "last30Days",
            Self::Last90Days => "last90Days",
            Self::Last180Days => "last180Days",
            Self::LastYear => "lastYear",
        }
    }

    /// Upper bound on the rolling day-difference, for the windows that use one.
    fn max_days(&self) -> Option<i64> {
        match self {
            Self::Last7Days => Some(7),
            Self::Last30Days => Some(30),
            Self::Last90Days => Some(90),
            Self::Last180Days => Some(180),
            Self::LastYear => Some(365),
            Self::Today | Self::Yesterday | Self::ThisWeek => None,
        }
    }

    /// Whether a record published at `published` falls in this window.
    pub fn contains(&self, published: &Zoned, now: &Zoned) -> bool {
        if let Some(max) = self.max_days() {
            let days = day_difference(published, now);
            return (0..=max).contains(&days);
        }

        // Calendar windows compare dates in now's zone, not instants.
        let date = published.with_time_zone(now.time_zone().clone()).date();
        let today = now.date();
        match self {
            Self::Today => date == today,
            Self::Yesterday => today.yesterday().is_ok_and(|y| date == y),
            Self::ThisWeek => {
                week_bounds(today).is_some_and(|(start, end)| start <= date && date <= end)
            }
            _ => false,
        }
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("unknown time window '{}'", s))
    }
}

/// Monday through Sunday of the week containing `day`. Sunday closes the week.
fn week_bounds(day: Date) -> Option<(Date, Date)> {
    let since_monday = i64::from(day.weekday().to_monday_zero_offset());
    let start = day.checked_sub(since_monday.days()).ok()?;
    let end = start.checked_add(6.days()).ok()?;
    Some((start, end))
}

/// Resolve a record's timestamp in `now`'s time zone.
pub fn record_timestamp<T: Dated + ?Sized>(record: &T, now: &Zoned) -> Option<Zoned> {
    record
        .raw_timestamp()
        .and_then(|raw| parse_timestamp(raw, now.time_zone()))
}

/// Whether `record` belongs to `window` relative to `now`. Records without a
/// usable timestamp belong to no window.
pub fn matches<T: Dated + ?Sized>(record: &T, window: WindowId, now: &Zoned) -> bool {
    record_timestamp(record, now).is_some_and(|published| window.contains(&published, now))
}

/// The records in `window`, in their original order.
pub fn classify<'a, T: Dated>(records: &'a [T], window: WindowId, now: &Zoned) -> Vec<&'a T> {
    records.iter().filter(|r| matches(*r, window, now)).collect()
}

/// The window selected for one list view. `None` shows every record,
/// including undated ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowFilter {
    selected: Option<WindowId>,
}

impl WindowFilter {
    pub fn new(selected: Option<WindowId>) -> Self {
        Self { selected }
    }

    pub fn selected(&self) -> Option<WindowId> {
        self.selected
    }

    pub fn select(&mut self, window: Option<WindowId>) {
        self.selected = window;
    }

    /// Step to the next selector entry: all, today, ..., last year, all.
    pub fn cycle(&mut self) {
        self.selected = match self.selected {
            None => WindowId::iter().next(),
            Some(current) => WindowId::iter().skip_while(|w| *w != current).nth(1),
        };
    }

    /// Indices of the visible records, in order.
    pub fn apply<T: Dated>(&self, records: &[T], now: &Zoned) -> Vec<usize> {
        match self.selected {
            None => (0..records.len()).collect(),
            Some(window) => records
                .iter()
                .enumerate()
                .filter(|(_, r)| matches(*r, window, now))
                .map(|(i, _)| i)
                .collect(),
        }
    }
}
