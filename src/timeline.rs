use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::api::DailyCount;

/// One user's date-ordered activity counts across all requested years.
pub type Timeline = BTreeMap<NaiveDate, u32>;

#[derive(Debug, Clone)]
pub struct UserActivity {
    pub username: String,
    pub timeline: Timeline,
}

/// Per-user timelines in user-input order; the sole input to rendering.
#[derive(Debug, Default)]
pub struct Dataset {
    pub users: Vec<UserActivity>,
}

impl Dataset {
    pub fn has_data(&self) -> bool {
        self.users.iter().any(|user| !user.timeline.is_empty())
    }

    pub fn total_points(&self) -> usize {
        self.users.iter().map(|user| user.timeline.len()).sum()
    }

    pub fn max_count(&self) -> u32 {
        self.users
            .iter()
            .flat_map(|user| user.timeline.values())
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// Earliest and latest date across every user's timeline.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut span: Option<(NaiveDate, NaiveDate)> = None;
        for user in &self.users {
            let bounds = match (
                user.timeline.first_key_value(),
                user.timeline.last_key_value(),
            ) {
                (Some((&first, _)), Some((&last, _))) => (first, last),
                _ => continue,
            };
            span = Some(match span {
                Some((start, end)) => (start.min(bounds.0), end.max(bounds.1)),
                None => bounds,
            });
        }
        span
    }
}

/// Merge per-year daily counts into one date-sorted timeline. Duplicate
/// dates collapse to the last entry seen; years absent from the map
/// contribute nothing.
pub fn build_timeline(
    activity_by_year: &BTreeMap<i32, Vec<DailyCount>>,
    today: NaiveDate,
) -> Timeline {
    let mut timeline = Timeline::new();
    for (&year, entries) in activity_by_year {
        for entry in entries {
            timeline.insert(entry.date, entry.count);
        }
        fill_quiet_days(&mut timeline, year, today);
    }
    timeline
}

/// Assemble per-user timelines into a dataset, preserving input order.
pub fn build_dataset(
    per_user: Vec<(String, BTreeMap<i32, Vec<DailyCount>>)>,
    today: NaiveDate,
) -> Dataset {
    let mut dataset = Dataset::default();
    for (username, activity_by_year) in per_user {
        let timeline = build_timeline(&activity_by_year, today);
        dataset.users.push(UserActivity { username, timeline });
    }
    dataset
}

// The API omits days without activity; fill them with zero so quiet
// stretches plot as zero instead of connecting across gaps. The fill stops
// at today for the current year and is skipped entirely for future years.
fn fill_quiet_days(timeline: &mut Timeline, year: i32, today: NaiveDate) {
    let start = match NaiveDate::from_ymd_opt(year, 1, 1) {
        Some(date) => date,
        None => return,
    };
    let end_of_year = match NaiveDate::from_ymd_opt(year, 12, 31) {
        Some(date) => date,
        None => return,
    };

    let end = end_of_year.min(today);
    if start > end {
        return;
    }
    for day in start.iter_days().take_while(|day| *day <= end) {
        timeline.entry(day).or_insert(0);
    }
}
