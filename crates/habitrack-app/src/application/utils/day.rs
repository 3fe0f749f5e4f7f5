use chrono::{DateTime, Duration, Local, TimeZone, Utc};

/// Start of the calendar day containing `now` in `tz`, as a UTC instant.
///
/// When midnight does not exist in `tz` (DST jump at 00:00) the first valid
/// instant of that day is used.
pub fn day_start_in<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let midnight = now.with_timezone(tz).date_naive().and_time(chrono::NaiveTime::MIN);

    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or(now)
}

/// Start of today on the local clock
pub fn today_start() -> DateTime<Utc> {
    day_start_in(Utc::now(), &Local)
}
