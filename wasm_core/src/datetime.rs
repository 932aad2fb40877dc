//! Epoch ↔ date conversion and the age calculator.
//!
//! Offsets are expressed in minutes east of UTC (`330` for UTC+05:30). Browsers
//! report the opposite sign from `Date#getTimezoneOffset`, so the JS glue negates it.
use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone,
};
use serde::Serialize;

/// Timestamps above this are treated as milliseconds.
const SECONDS_CUTOFF: i64 = 9_999_999_999;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EpochDate {
    pub unit: String,
    pub utc: String,
    pub iso8601: String,
    pub local: String,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentEpoch {
    pub seconds: i64,
    pub milliseconds: i64,
}

fn offset_from_minutes(offset_minutes: i32) -> Result<FixedOffset, String> {
    offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| format!("invalid UTC offset: {offset_minutes} minutes"))
}

/// Converts an epoch value (seconds or milliseconds) into readable dates.
///
/// # Example
/// ```
/// use devtoolkit_core::datetime::epoch_to_date;
/// let date = epoch_to_date("1735787045", 0)?;
/// assert_eq!(date.utc, "Thu, 02 Jan 2025 03:04:05 GMT");
/// assert_eq!(date.unit, "seconds");
/// # Ok::<(), String>(())
/// ```
pub fn epoch_to_date(input: &str, offset_minutes: i32) -> Result<EpochDate, String> {
    let ts: i64 = input
        .trim()
        .parse()
        .map_err(|_| "Invalid timestamp".to_string())?;
    let (millis, unit) = if ts > SECONDS_CUTOFF {
        (ts, "milliseconds")
    } else {
        let millis = ts
            .checked_mul(1000)
            .ok_or_else(|| "Invalid timestamp".to_string())?;
        (millis, "seconds")
    };
    let utc = DateTime::from_timestamp_millis(millis).ok_or_else(|| "Invalid timestamp".to_string())?;
    let local = utc.with_timezone(&offset_from_minutes(offset_minutes)?);
    Ok(EpochDate {
        unit: unit.to_string(),
        utc: utc.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
        iso8601: utc.to_rfc3339_opts(SecondsFormat::Millis, true),
        local: local.format("%Y-%m-%d %H:%M:%S %:z").to_string(),
    })
}

/// Converts `YYYY-MM-DD` plus an optional `HH:MM[:SS]` at the given offset into epoch seconds.
///
/// # Example
/// ```
/// use devtoolkit_core::datetime::date_to_epoch;
/// assert_eq!(date_to_epoch("2025-01-02", "03:04", 0)?, 1735787040);
/// assert_eq!(date_to_epoch("1970-01-01", "", 60)?, -3600);
/// # Ok::<(), String>(())
/// ```
pub fn date_to_epoch(date: &str, time: &str, offset_minutes: i32) -> Result<i64, String> {
    let date = date.trim();
    if date.is_empty() {
        return Err("Please select a date".into());
    }
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| "Invalid date or time format".to_string())?;
    let clock = parse_clock(time)?;
    let offset = offset_from_minutes(offset_minutes)?;
    offset
        .from_local_datetime(&NaiveDateTime::new(day, clock))
        .single()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| "Invalid date or time format".to_string())
}

fn parse_clock(time: &str) -> Result<NaiveTime, String> {
    let time = time.trim();
    if time.is_empty() {
        return Ok(NaiveTime::MIN);
    }
    NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map_err(|_| "Invalid date or time format".to_string())
}

fn now_millis() -> i64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as i64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        chrono::Utc::now().timestamp_millis()
    }
}

pub fn current_epoch() -> CurrentEpoch {
    let milliseconds = now_millis();
    CurrentEpoch {
        seconds: milliseconds.div_euclid(1000),
        milliseconds,
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgeBreakdown {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub total_months: i64,
    pub weeks: i64,
    pub total_days: i64,
    pub total_hours: i64,
    pub total_minutes: i64,
    pub total_seconds: i64,
    pub summary: String,
}

fn parse_moment(input: &str) -> Result<NaiveDateTime, String> {
    let input = input.trim();
    if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(day.and_time(NaiveTime::MIN));
    }
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M"))
        .map_err(|_| "Invalid date range".to_string())
}

fn days_in_previous_month(date: NaiveDate) -> i64 {
    date.with_day(1)
        .and_then(|first| first.pred_opt())
        .map(|last| i64::from(last.day()))
        .unwrap_or(30)
}

/// Difference between two dates as calendar years/months/days plus totals.
///
/// # Example
/// ```
/// use devtoolkit_core::datetime::age_between;
/// let age = age_between("2000-03-15", "2024-03-10")?;
/// assert_eq!((age.years, age.months, age.days), (23, 11, 24));
/// # Ok::<(), String>(())
/// ```
pub fn age_between(from: &str, to: &str) -> Result<AgeBreakdown, String> {
    let start = parse_moment(from)?;
    let end = parse_moment(to)?;
    if end < start {
        return Err("Invalid date range".into());
    }
    let mut years = i64::from(end.year() - start.year());
    let mut months = i64::from(end.month()) - i64::from(start.month());
    let mut days = i64::from(end.day()) - i64::from(start.day());
    if days < 0 {
        months -= 1;
        days += days_in_previous_month(end.date());
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    let total_seconds = (end - start).num_seconds();
    let total_minutes = total_seconds / 60;
    let total_hours = total_minutes / 60;
    let total_days = total_hours / 24;
    let weeks = total_days / 7;
    let total_months = years * 12 + months;
    let summary = [
        format!("{years} years {months} months {days} days"),
        format!("or {total_months} months {days} days"),
        format!("or {weeks} weeks {} days", total_days % 7),
        format!("or {} days", group_thousands(total_days)),
        format!("or {} hours", group_thousands(total_hours)),
        format!("or {} minutes", group_thousands(total_minutes)),
        format!("or {} seconds", group_thousands(total_seconds)),
    ]
    .join("\n");
    Ok(AgeBreakdown {
        years,
        months,
        days,
        total_months,
        weeks,
        total_days,
        total_hours,
        total_minutes,
        total_seconds,
        summary,
    })
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millisecond_inputs_are_detected() {
        let date = epoch_to_date("1735787045123", 0).unwrap();
        assert_eq!(date.unit, "milliseconds");
        assert_eq!(date.iso8601, "2025-01-02T03:04:05.123Z");
    }

    #[test]
    fn local_rendering_uses_offset() {
        let date = epoch_to_date("0", 330).unwrap();
        assert_eq!(date.local, "1970-01-01 05:30:00 +05:30");
        assert_eq!(date.utc, "Thu, 01 Jan 1970 00:00:00 GMT");
    }

    #[test]
    fn invalid_timestamps_are_rejected() {
        assert!(epoch_to_date("abc", 0).is_err());
        assert!(epoch_to_date("", 0).is_err());
        assert!(epoch_to_date("0", 100_000).is_err());
    }

    #[test]
    fn date_to_epoch_accepts_seconds_and_rejects_bad_dates() {
        assert_eq!(date_to_epoch("2025-01-02", "03:04:05", 0).unwrap(), 1735787045);
        assert!(date_to_epoch("", "", 0).is_err());
        assert!(date_to_epoch("2025-02-30", "", 0).is_err());
        assert!(date_to_epoch("2025-01-02", "25:00", 0).is_err());
    }

    #[test]
    fn current_epoch_is_consistent() {
        let now = current_epoch();
        assert_eq!(now.seconds, now.milliseconds / 1000);
        assert!(now.seconds > 1_700_000_000);
    }

    #[test]
    fn age_totals_and_summary() {
        let age = age_between("2024-01-01", "2024-03-01").unwrap();
        assert_eq!((age.years, age.months, age.days), (0, 2, 0));
        assert_eq!(age.total_days, 60);
        assert_eq!(age.weeks, 8);
        assert_eq!(age.total_seconds, 5_184_000);
        assert!(age.summary.contains("or 8 weeks 4 days"));
        assert!(age.summary.ends_with("or 5,184,000 seconds"));
    }

    #[test]
    fn age_rejects_reversed_range() {
        assert_eq!(
            age_between("2024-01-02", "2024-01-01").unwrap_err(),
            "Invalid date range"
        );
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(-1234567), "-1,234,567");
    }
}
