use chrono::{Days, FixedOffset, NaiveDate};

/// Human-facing due date, e.g. `31.12.2024`.
pub fn format_due_date(date: &NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// The calendar day after `today`.
pub fn next_day(today: NaiveDate) -> Option<NaiveDate> {
    today.checked_add_days(Days::new(1))
}

/// Builds a six-field cron expression (sec min hour dom mon dow, evaluated in UTC)
/// that fires every day at `local_hour:00` for a host at `offset` from UTC.
pub fn daily_cron_at_local_hour(local_hour: u32, offset: FixedOffset) -> String {
    const MINUTES_PER_DAY: i64 = 24 * 60;
    let local_minutes = i64::from(local_hour % 24) * 60;
    let offset_minutes = i64::from(offset.local_minus_utc()) / 60;
    let utc_minutes = (local_minutes - offset_minutes).rem_euclid(MINUTES_PER_DAY);
    format!("0 {} {} * * *", utc_minutes % 60, utc_minutes / 60)
}
