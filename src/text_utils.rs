use std::ops::Index;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// `YYYY-MM-DD` with an optional time part. A date alone means midnight.
pub fn parse_date_time(buf: &str) -> Result<NaiveDateTime, String> {
    lazy_static! {
        static ref DATE_TIME_RE: Regex = Regex::new(
            r"^\s*(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T](\d{1,2}):(\d{1,2}):(\d{1,2})(\.\d{1,3})?)?\s*$"
        )
        .unwrap();
    }

    let Some(caps) = DATE_TIME_RE.captures(buf) else {
        return Err(format!("Unable to parse date time {}", buf));
    };

    let to_i32 = |num_str: &str| to_int::<i32>(num_str, buf);
    let to_u32 = |num_str: &str| to_int::<u32>(num_str, buf);

    let y: i32 = to_i32(caps.index(1))?;
    let m: u32 = to_u32(caps.index(2))?;
    let d: u32 = to_u32(caps.index(3))?;

    let (h, mn, s) = match caps.get(4) {
        Some(hour) => (
            to_u32(hour.as_str())?,
            to_u32(caps.index(5))?,
            to_u32(caps.index(6))?,
        ),
        None => (0, 0, 0),
    };

    let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
        return Err(format!("Date out of range: {}", buf));
    };
    let Some(time) = NaiveTime::from_hms_opt(h, mn, s) else {
        return Err(format!("Time out of range: {}", buf));
    };

    Ok(NaiveDateTime::new(date, time))
}

pub fn format_date_time(date_time: &NaiveDateTime) -> (String, String) {
    let date = date_time.format("%Y-%m-%d").to_string();
    let time = date_time.format("%H:%M:%S").to_string();
    (date, time)
}

/// 1-based week of life, counted from the day of birth.
pub fn week_of_life(birth_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - birth_date).num_days() / 7 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_time() {
        let date_time = parse_date_time("2017-09-10 10:42:32.123").unwrap();
        let (date, time) = format_date_time(&date_time);
        assert_eq!(date, "2017-09-10");
        assert_eq!(time, "10:42:32");

        let date_time = parse_date_time("2017-09-10T10:42:32").unwrap();
        let (date, time) = format_date_time(&date_time);
        assert_eq!(date, "2017-09-10");
        assert_eq!(time, "10:42:32");
    }

    #[test]
    fn test_parse_date_without_time() {
        let date_time = parse_date_time("2024-06-01").unwrap();
        let (date, time) = format_date_time(&date_time);
        assert_eq!(date, "2024-06-01");
        assert_eq!(time, "00:00:00");

        let date_time = parse_date_time(" 2024-6-1 ").unwrap();
        let (date, _) = format_date_time(&date_time);
        assert_eq!(date, "2024-06-01");
    }

    #[test]
    fn test_parse_date_time_rejects_garbage() {
        assert!(parse_date_time("yesterday").is_err());
        assert!(parse_date_time("2024-13-01").is_err());
        assert!(parse_date_time("2024-02-30").is_err());
        assert!(parse_date_time("2024-06-01 25:00:00").is_err());
        assert!(parse_date_time("").is_err());
    }

    #[test]
    fn test_week_of_life() {
        let birth = NaiveDate::from_ymd_opt(1990, 3, 14).unwrap();
        assert_eq!(week_of_life(birth, birth), 1);
        let later = NaiveDate::from_ymd_opt(1990, 3, 21).unwrap();
        assert_eq!(week_of_life(birth, later), 2);
        let much_later = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        assert_eq!(week_of_life(birth, much_later), 1775);
    }
}
