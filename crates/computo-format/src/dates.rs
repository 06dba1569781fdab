//! `DD/MM/YYYY` date adapter.
//!
//! The only textual date convention at the boundary. The core never sees
//! strings; everything is parsed here into [`NaiveDate`] first.

use chrono::{Datelike, NaiveDate};
use computo_core::DateError;

/// Parses a strict `DD/MM/YYYY` date (two-digit day and month, four-digit
/// year). Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`DateError::Malformed`] if the shape is wrong and
/// [`DateError::OutOfRange`] if the numbers are not a calendar date
/// (e.g. `31/02/2021`).
pub fn parse_dmy(input: &str) -> Result<NaiveDate, DateError> {
    let trimmed = input.trim();
    let malformed = || DateError::Malformed(input.to_string());

    // chrono's `%d/%m/%Y` also accepts one-digit fields, so the shape is checked here.
    let mut parts = trimmed.split('/');
    let (Some(dd), Some(mm), Some(yyyy), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };
    let all_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(dd, 2) || !all_digits(mm, 2) || !all_digits(yyyy, 4) {
        return Err(malformed());
    }

    let day: u32 = dd.parse().map_err(|_| malformed())?;
    let month: u32 = mm.parse().map_err(|_| malformed())?;
    let year: i32 = yyyy.parse().map_err(|_| malformed())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::OutOfRange {
        input: input.to_string(),
        day,
        month,
        year,
    })
}

/// Formats a date as `DD/MM/YYYY`.
#[must_use]
pub fn format_dmy(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

/// Formats an optional date, using `—` when there is none.
#[must_use]
pub fn format_dmy_opt(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "—".to_string(), format_dmy)
}

/// Serde helpers for `DD/MM/YYYY` fields in case files.
pub mod serde_dmy {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_dmy(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_dmy(&raw).map_err(serde::de::Error::custom)
    }

    /// Same as the parent module, for `Option<NaiveDate>` fields.
    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => serializer.serialize_str(&super::super::format_dmy(*d)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| super::super::parse_dmy(&raw).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_dmy() {
        let date = parse_dmy("01/01/2020").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(format_dmy(date), "01/01/2020");
        assert_eq!(parse_dmy(" 29/02/2020 ").unwrap().day(), 29);
    }

    #[test]
    fn rejects_wrong_shapes() {
        for bad in [
            "2020-01-01",
            "1/1/2020",
            "1/01/2020",
            "01/1/2020",
            "01/01/20",
            "01/01/2020/1",
            "aa/bb/cccc",
            "",
        ] {
            assert!(
                matches!(parse_dmy(bad), Err(DateError::Malformed(_))),
                "should reject {bad:?}"
            );
        }
    }

    #[test]
    fn rejects_impossible_dates() {
        let err = parse_dmy("31/02/2021").unwrap_err();
        assert!(matches!(err, DateError::OutOfRange { day: 31, month: 2, .. }));
        assert!(parse_dmy("29/02/2021").is_err());
        assert!(parse_dmy("00/01/2021").is_err());
    }

    #[test]
    fn missing_dates_render_as_dash() {
        assert_eq!(format_dmy_opt(None), "—");
    }
}
