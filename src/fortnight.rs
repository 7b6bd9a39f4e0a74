//! Fortnight bucketing.
//!
//! Groups dates into rolling two-week windows relative to the earliest
//! date of a dataset:
//!
//! ```text
//! bucket(d) = ⌊(week(d) − week(min_date)) / 2⌋
//! ```
//!
//! Weeks are ISO weeks (Monday through Sunday). Week distance is measured
//! between the Mondays of the two weeks, so a dataset crossing a year
//! boundary keeps counting upwards instead of wrapping at week 52/53.

use chrono::{Datelike, Days, NaiveDate};

/// Maps dates to fortnight indices for one dataset.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_roster::fortnight::FortnightBucketizer;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
/// let b = FortnightBucketizer::new(d(1, 3)); // Wednesday, ISO week 1
/// assert_eq!(b.bucket(d(1, 1)), 0);          // Monday of the same week
/// assert_eq!(b.bucket(d(1, 14)), 0);         // Sunday, week 2
/// assert_eq!(b.bucket(d(1, 15)), 1);         // Monday, week 3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FortnightBucketizer {
    min_date: NaiveDate,
    anchor_monday: NaiveDate,
}

impl FortnightBucketizer {
    /// Creates a bucketizer anchored at the dataset's minimum date.
    pub fn new(min_date: NaiveDate) -> Self {
        Self {
            min_date,
            anchor_monday: week_monday(min_date),
        }
    }

    /// Computes the minimum once over `dates`. `None` if there are none.
    pub fn from_dates<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates.into_iter().min().map(Self::new)
    }

    /// The anchoring minimum date.
    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    /// Fortnight index of `date`.
    ///
    /// Dates before the anchor's week yield negative indices.
    pub fn bucket(&self, date: NaiveDate) -> i64 {
        let weeks = (week_monday(date) - self.anchor_monday).num_days() / 7;
        weeks.div_euclid(2)
    }
}

fn week_monday(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}
