//! Countdown to a performer's next birthday.
//!
//! The birthday itself counts as already celebrated, so on the day the
//! countdown targets next year's occurrence (365 or 366 days away).

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dday {
    /// Age reached on the next birthday.
    pub next_age: i32,
    pub days_remaining: i64,
}

impl fmt::Display for Dday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}살까지 D-{}", self.next_age, self.days_remaining)
    }
}

impl Dday {
    pub fn at(birthdate: NaiveDate, now: NaiveDateTime) -> Self {
        let today = now.date();
        let mut age = today.year() - birthdate.year();
        let had_birthday = today.month() > birthdate.month()
            || (today.month() == birthdate.month() && today.day() >= birthdate.day());
        if !had_birthday {
            age -= 1;
        }

        let next_year = if had_birthday {
            today.year() + 1
        } else {
            today.year()
        };
        let next_birthday = birthday_in(next_year, birthdate);
        let millis = (next_birthday.and_time(NaiveTime::MIN) - now).num_milliseconds();
        let days_remaining = ceil_div(millis, MILLIS_PER_DAY);

        Dday {
            next_age: age + 1,
            days_remaining,
        }
    }
}

/// Compute the countdown for a raw backend birthdate at the given instant.
pub fn calculate_at(birthdate: Option<&str>, now: NaiveDateTime) -> Option<Dday> {
    let birthdate = parse_birthdate(birthdate?)?;
    Some(Dday::at(birthdate, now))
}

/// Render the countdown string for today, or `None` without a usable birthdate.
pub fn calculate_dday_and_next_age(birthdate: Option<&str>) -> Option<String> {
    let now = Local::now().naive_local();
    calculate_at(birthdate, now).map(|dday| dday.to_string())
}

pub fn parse_birthdate(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.trim().get(0..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

// Feb 29 in a common year rolls over to Mar 1.
fn birthday_in(year: i32, birthdate: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birthdate.month(), birthdate.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(birthdate)
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    let quotient = value.div_euclid(divisor);
    if value.rem_euclid(divisor) == 0 {
        quotient
    } else {
        quotient + 1
    }
}
