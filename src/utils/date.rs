//! UTC datetime utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTimeUtc` struct. Bookmarks only accept the
//! strict `YYYY-MM-DD` form; post front-matter accepts what blog templates
//! commonly write:
//!
//! - `YYYY-MM-DD`
//! - RFC 3339 datetimes (`T` or space separator, fractional seconds, `Z` or
//!   `±HH:MM` offset), converted to UTC
//! - local datetimes without an offset, taken as UTC
//! - `Jul 08 2022` and `July 8, 2022`
//!
//! # Examples
//!
//! ```ignore
//! let dt = DateTimeUtc::parse("2024-06-15T16:30:45+02:00").unwrap();
//! assert_eq!(dt.to_rfc2822(), "Sat, 15 Jun 2024 14:30:45 GMT");
//!
//! // Bookmarks only accept the date form
//! assert!(DateTimeUtc::parse_date("2024-06-15T14:30:45Z").is_none());
//! ```

use anyhow::{Result, bail};

/// UTC datetime without timezone complexity
///
/// Field order matters: the derived `Ord` compares chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Parse a post publish date in any of the accepted forms.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::parse_iso(s).or_else(|| Self::parse_month_name(s))
    }

    /// `YYYY-MM-DD`, optionally followed by a time and a UTC offset.
    fn parse_iso(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() < 10 {
            return None;
        }
        let (year, month, day) = parse_ymd(&bytes[..10])?;

        let rest = match &bytes[10..] {
            [] => {
                let dt = Self::from_ymd(year, month, day);
                dt.validate().ok()?;
                return Some(dt);
            }
            [b'T' | b't' | b' ', rest @ ..] => rest,
            _ => return None,
        };

        let [h1, h2, b':', m1, m2, tail @ ..] = rest else {
            return None;
        };
        let mut rest = tail;
        let hour = parse_u8(&[*h1, *h2])?;
        let minute = parse_u8(&[*m1, *m2])?;

        let mut second = 0;
        if let [b':', s1, s2, tail @ ..] = rest {
            second = parse_u8(&[*s1, *s2])?;
            rest = tail;
            if let [b'.', tail @ ..] = rest {
                // sub-second precision is dropped
                let digits = tail.iter().take_while(|b| b.is_ascii_digit()).count();
                if digits == 0 {
                    return None;
                }
                rest = &tail[digits..];
            }
        }

        let offset_minutes = match rest {
            [] | [b'Z' | b'z'] => 0,
            [sign @ (b'+' | b'-'), h1, h2, b':', m1, m2]
            | [sign @ (b'+' | b'-'), h1, h2, m1, m2] => {
                let (h, m) = (parse_u8(&[*h1, *h2])?, parse_u8(&[*m1, *m2])?);
                if h > 23 || m > 59 {
                    return None;
                }
                let minutes = i64::from(h) * 60 + i64::from(m);
                if *sign == b'+' { minutes } else { -minutes }
            }
            _ => return None,
        };

        let local = Self::new(year, month, day, hour, minute, second);
        local.validate().ok()?;
        local.shift_minutes(-offset_minutes)
    }

    /// `Jul 08 2022` or `July 8, 2022`.
    fn parse_month_name(s: &str) -> Option<Self> {
        let mut parts = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty());
        let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }

        let month = month_from_name(month)?;
        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if !(1..=2).contains(&day.len()) || year.len() != 4 || !all_digits(day) || !all_digits(year)
        {
            return None;
        }

        let dt = Self::from_ymd(year.parse().ok()?, month, day.parse().ok()?);
        dt.validate().ok()?;
        Some(dt)
    }

    /// Parse a calendar date ("YYYY-MM-DD" only).
    pub fn parse_date(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 10 {
            return None;
        }
        let (year, month, day) = parse_ymd(bytes)?;
        let dt = Self::from_ymd(year, month, day);
        dt.validate().ok()?;
        Some(dt)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Move by a signed number of minutes. `None` outside years 0-9999.
    fn shift_minutes(self, minutes: i64) -> Option<Self> {
        if minutes == 0 {
            return Some(self);
        }
        let total = days_from_civil(self.year, self.month, self.day) * 1440
            + i64::from(self.hour) * 60
            + i64::from(self.minute)
            + minutes;
        let (year, month, day) = civil_from_days(total.div_euclid(1440));
        let of_day = total.rem_euclid(1440);

        Some(Self::new(
            u16::try_from(year).ok().filter(|y| *y <= 9999)?,
            month,
            day,
            u8::try_from(of_day / 60).ok()?,
            u8::try_from(of_day % 60).ok()?,
            self.second,
        ))
    }

    /// Format as RFC 3339 (ISO 8601) for Atom feeds.
    ///
    /// Returns: `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_rfc3339(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    /// Format as `YYYY-MM-DD`, dropping the time of day.
    pub fn to_iso_date(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Format as RFC 2822 for RSS `pubDate`.
    pub fn to_rfc2822(self) -> String {
        const WEEKDAYS: [&str; 7] = ["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"];
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];

        let weekday = self.weekday_index();

        format!(
            "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
            WEEKDAYS[weekday],
            self.day,
            MONTHS[(self.month - 1) as usize],
            self.year,
            self.hour,
            self.minute,
            self.second
        )
    }

    /// Zeller's congruence, 0 = Saturday.
    #[inline]
    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    #[allow(clippy::cast_sign_loss)] // Result of % 7 is always 0-6
    fn weekday_index(&self) -> usize {
        let (y, m) = if self.month < 3 {
            (i32::from(self.year) - 1, i32::from(self.month) + 12)
        } else {
            (i32::from(self.year), i32::from(self.month))
        };
        let d = i32::from(self.day);
        ((d + (13 * (m + 1)) / 5 + y + y / 4 - y / 100 + y / 400) % 7) as usize
    }
}

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Month number from an English name or its three-letter abbreviation.
fn month_from_name(name: &str) -> Option<u8> {
    let name = name.to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .position(|full| *full == name || (name.len() == 3 && full.starts_with(&name)))
        .and_then(|i| u8::try_from(i + 1).ok())
}

/// Days since 1970-01-01 (proleptic Gregorian).
fn days_from_civil(year: u16, month: u8, day: u8) -> i64 {
    let (month, day) = (i64::from(month), i64::from(day));
    let year = i64::from(year) - i64::from(month <= 2);
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let day_of_year = (153 * ((month + 9) % 12) + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

/// Inverse of [`days_from_civil`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // month 1-12, day 1-31
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let days = days + 719_468;
    let era = days.div_euclid(146_097);
    let day_of_era = days - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let mp = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = year_of_era + era * 400 + i64::from(month <= 2);
    (year, month as u8, day as u8)
}

/// Parse the `YYYY-MM-DD` prefix (exactly 10 bytes).
fn parse_ymd(bytes: &[u8]) -> Option<(u16, u8, u8)> {
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    Some((
        parse_u16(&bytes[0..4])?,
        parse_u8(&bytes[5..7])?,
        parse_u8(&bytes[8..10])?,
    ))
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = DateTimeUtc::parse("2024-06-15").unwrap();
        assert_eq!(dt, DateTimeUtc::from_ymd(2024, 6, 15));
    }

    #[test]
    fn test_parse_with_time() {
        let dt = DateTimeUtc::parse("2024-06-15T14:30:45Z").unwrap();
        assert_eq!(dt, DateTimeUtc::new(2024, 6, 15, 14, 30, 45));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(DateTimeUtc::parse("invalid-date").is_none());
        assert!(DateTimeUtc::parse("2024/06/15").is_none());
        assert!(DateTimeUtc::parse("2024-06-15 trailing").is_none());
        assert!(DateTimeUtc::parse("2023-02-29").is_none());
    }

    #[test]
    fn test_parse_offsets_convert_to_utc() {
        assert_eq!(
            DateTimeUtc::parse("2022-07-08T10:00:00+02:00"),
            Some(DateTimeUtc::new(2022, 7, 8, 8, 0, 0))
        );
        assert_eq!(
            DateTimeUtc::parse("2022-07-08T01:30:00+0200"),
            Some(DateTimeUtc::new(2022, 7, 7, 23, 30, 0))
        );
        // crosses a year and a leap day
        assert_eq!(
            DateTimeUtc::parse("2023-12-31T22:00:00-05:00"),
            Some(DateTimeUtc::new(2024, 1, 1, 3, 0, 0))
        );
        assert_eq!(
            DateTimeUtc::parse("2024-03-01T00:15:00+01:00"),
            Some(DateTimeUtc::new(2024, 2, 29, 23, 15, 0))
        );
    }

    #[test]
    fn test_parse_fractional_and_local() {
        assert_eq!(
            DateTimeUtc::parse("2022-07-08T10:00:00.000Z"),
            Some(DateTimeUtc::new(2022, 7, 8, 10, 0, 0))
        );
        assert_eq!(
            DateTimeUtc::parse("2022-07-08T10:00:00"),
            Some(DateTimeUtc::new(2022, 7, 8, 10, 0, 0))
        );
        assert_eq!(
            DateTimeUtc::parse("2022-07-08 10:00"),
            Some(DateTimeUtc::new(2022, 7, 8, 10, 0, 0))
        );
        assert!(DateTimeUtc::parse("2022-07-08T10:00:00.Z").is_none());
        assert!(DateTimeUtc::parse("2022-07-08T10:00:00+25:00").is_none());
    }

    #[test]
    fn test_parse_month_names() {
        let expected = Some(DateTimeUtc::from_ymd(2022, 7, 8));
        assert_eq!(DateTimeUtc::parse("Jul 08 2022"), expected);
        assert_eq!(DateTimeUtc::parse("July 8, 2022"), expected);
        assert_eq!(DateTimeUtc::parse("jul 8 2022"), expected);
        assert!(DateTimeUtc::parse("Jly 08 2022").is_none());
        assert!(DateTimeUtc::parse("Feb 30 2022").is_none());
        assert!(DateTimeUtc::parse("Jul 08 2022 extra").is_none());
    }

    #[test]
    fn test_days_from_civil_round_trip() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
        for days in [-1, 0, 59, 10_957, 11_016, 19_181] {
            let (y, m, d) = civil_from_days(days);
            assert_eq!(days_from_civil(u16::try_from(y).unwrap(), m, d), days);
        }
    }

    #[test]
    fn test_parse_date_strict() {
        assert!(DateTimeUtc::parse_date("2022-12-29").is_some());
        assert!(DateTimeUtc::parse_date("2022-12-29T00:00:00Z").is_none());
        assert!(DateTimeUtc::parse_date(" 2022-12-29").is_none());
        assert!(DateTimeUtc::parse_date("2022-13-01").is_none());
        assert!(DateTimeUtc::parse_date("22-12-29").is_none());
        assert!(DateTimeUtc::parse_date("Dec 29 2022").is_none());
    }

    #[test]
    fn test_datetime_utc_validate_invalid_day() {
        // Day 0
        assert!(DateTimeUtc::new(2024, 6, 0, 12, 0, 0).validate().is_err());

        // Day 31 in a 30-day month
        assert!(DateTimeUtc::new(2024, 4, 31, 12, 0, 0).validate().is_err());

        // Day 30 in February (leap year)
        assert!(DateTimeUtc::new(2024, 2, 30, 12, 0, 0).validate().is_err());
    }

    #[test]
    fn test_datetime_utc_validate_leap_year() {
        assert!(DateTimeUtc::new(2024, 2, 29, 12, 0, 0).validate().is_ok());
        assert!(DateTimeUtc::new(2000, 2, 29, 12, 0, 0).validate().is_ok()); // divisible by 400
        assert!(DateTimeUtc::new(2023, 2, 29, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(1900, 2, 29, 12, 0, 0).validate().is_err()); // divisible by 100 but not 400
    }

    #[test]
    fn test_datetime_utc_validate_invalid_time() {
        assert!(DateTimeUtc::new(2024, 6, 15, 24, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 6, 15, 12, 60, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 6, 15, 12, 0, 60).validate().is_err());
    }

    #[test]
    fn test_to_rfc2822() {
        assert_eq!(
            DateTimeUtc::from_ymd(2020, 1, 1).to_rfc2822(),
            "Wed, 01 Jan 2020 00:00:00 GMT"
        );
        assert_eq!(
            DateTimeUtc::new(2024, 6, 15, 14, 30, 45).to_rfc2822(),
            "Sat, 15 Jun 2024 14:30:45 GMT"
        );
        assert_eq!(
            DateTimeUtc::from_ymd(2022, 12, 29).to_rfc2822(),
            "Thu, 29 Dec 2022 00:00:00 GMT"
        );
    }

    #[test]
    fn test_to_rfc3339_and_iso_date() {
        let dt = DateTimeUtc::new(2021, 3, 22, 8, 5, 0);
        assert_eq!(dt.to_rfc3339(), "2021-03-22T08:05:00Z");
        assert_eq!(dt.to_iso_date(), "2021-03-22");
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = DateTimeUtc::from_ymd(2020, 12, 31);
        let b = DateTimeUtc::from_ymd(2021, 1, 1);
        let c = DateTimeUtc::new(2021, 1, 1, 0, 0, 1);
        assert!(a < b);
        assert!(b < c);
    }
}
