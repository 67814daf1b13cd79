use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

use crate::model::{Booking, BookingStatus};

/// One cell of the month view.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the leading/trailing days borrowed from adjacent months.
    pub in_month: bool,
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Monday-first weeks covering the whole month.
    pub weeks: Vec<Vec<CalendarDay>>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarOptions {
    pub include_cancelled: bool,
}

/// Builds the month view; `None` when the year/month pair is not a real month.
pub fn month_grid(
    year: i32,
    month: u32,
    bookings: &[Booking],
    options: CalendarOptions,
) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_month_first.pred_opt()?;

    let grid_start = first.checked_sub_signed(Duration::days(i64::from(
        first.weekday().num_days_from_monday(),
    )))?;
    let grid_end = last.checked_add_signed(Duration::days(i64::from(
        6 - last.weekday().num_days_from_monday(),
    )))?;

    let visible: Vec<&Booking> = bookings
        .iter()
        .filter(|booking| options.include_cancelled || booking.status != BookingStatus::Cancelled)
        .collect();

    let mut weeks = Vec::new();
    let mut week = Vec::with_capacity(7);
    let mut day = grid_start;
    while day <= grid_end {
        week.push(CalendarDay {
            date: day,
            in_month: day.month() == month,
            bookings: bookings_on(day, &visible),
        });
        if day.weekday() == Weekday::Sun {
            weeks.push(std::mem::take(&mut week));
        }
        day = day.succ_opt()?;
    }

    Some(MonthGrid { year, month, weeks })
}

/// Bookings overlapping `date`, ordered by start time.
pub fn day_agenda(
    date: NaiveDate,
    bookings: &[Booking],
    options: CalendarOptions,
) -> Vec<Booking> {
    let visible: Vec<&Booking> = bookings
        .iter()
        .filter(|booking| options.include_cancelled || booking.status != BookingStatus::Cancelled)
        .collect();
    bookings_on(date, &visible)
}

fn bookings_on(date: NaiveDate, bookings: &[&Booking]) -> Vec<Booking> {
    let mut matches: Vec<Booking> = bookings
        .iter()
        .filter(|booking| booking.touches(date))
        .map(|booking| (*booking).clone())
        .collect();
    matches.sort_by_key(|booking| booking.starts_at);
    matches
}
