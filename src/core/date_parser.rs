use crate::domain::model::Dialect;
use crate::domain::ports::DateParser;
use crate::utils::error::{MoonError, Result};
use chrono::{Months, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
];

/// Absolute formats first, then English phrases such as "next tuesday" or
/// "3 days ago" through `chrono-english`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalDateParser {
    dialect: Dialect,
}

impl NaturalDateParser {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    fn parse_absolute(input: &str) -> Option<NaiveDateTime> {
        DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
            .or_else(|| {
                DATE_FORMATS
                    .iter()
                    .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
    }

    /// `in <n> <unit>`, e.g. "in 3 days" or "in 2 months".
    fn parse_offset(input: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let lowered = input.to_ascii_lowercase();
        let mut words = lowered.split_whitespace();
        let (Some("in"), Some(count), Some(unit), None) =
            (words.next(), words.next(), words.next(), words.next())
        else {
            return None;
        };

        let count: u32 = count.parse().ok()?;
        let unit = unit.strip_suffix('s').unwrap_or(unit);
        let seconds = |per_unit: i64| TimeDelta::try_seconds(i64::from(count) * per_unit);
        match unit {
            "second" | "sec" => now.checked_add_signed(seconds(1)?),
            "minute" | "min" => now.checked_add_signed(seconds(60)?),
            "hour" => now.checked_add_signed(seconds(3_600)?),
            "day" => now.checked_add_signed(seconds(86_400)?),
            "week" => now.checked_add_signed(seconds(604_800)?),
            "fortnight" => now.checked_add_signed(seconds(1_209_600)?),
            "month" => now.checked_add_months(Months::new(count)),
            "year" => now.checked_add_months(Months::new(count.checked_mul(12)?)),
            _ => None,
        }
    }

    fn parse_natural(&self, input: &str, now: NaiveDateTime) -> Result<NaiveDateTime> {
        let dialect = match self.dialect {
            Dialect::Uk => chrono_english::Dialect::Uk,
            Dialect::Us => chrono_english::Dialect::Us,
        };

        // 用 UTC 當作無時區的載體，結果再取回 naive 值
        let anchor = Utc.from_utc_datetime(&now);
        chrono_english::parse_date_string(input, anchor, dialect)
            .map(|parsed| parsed.naive_utc())
            .map_err(|e| MoonError::ParseError {
                input: input.to_string(),
                reason: e.to_string(),
            })
    }
}

impl DateParser for NaturalDateParser {
    fn parse(&self, input: &str, now: NaiveDateTime) -> Result<NaiveDateTime> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(MoonError::ParseError {
                input: input.to_string(),
                reason: "empty date string".to_string(),
            });
        }

        if let Some(parsed) = Self::parse_absolute(trimmed) {
            tracing::trace!("Parsed '{}' as absolute date {}", trimmed, parsed);
            return Ok(parsed);
        }

        if let Some(parsed) = Self::parse_offset(trimmed, now) {
            tracing::trace!("Parsed '{}' as an offset from {}: {}", trimmed, now, parsed);
            return Ok(parsed);
        }

        let parsed = self.parse_natural(trimmed, now)?;
        tracing::trace!("Parsed '{}' relative to {} as {}", trimmed, now, parsed);
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn now() -> NaiveDateTime {
        at(2021, 1, 15, 10, 30, 0)
    }

    #[test]
    fn test_bare_date_is_midnight() {
        let parser = NaturalDateParser::default();
        assert_eq!(
            parser.parse("2021-01-15", now()).unwrap(),
            at(2021, 1, 15, 0, 0, 0)
        );
        assert_eq!(
            parser.parse("2008/12/12", now()).unwrap(),
            at(2008, 12, 12, 0, 0, 0)
        );
    }

    #[test]
    fn test_date_time_formats() {
        let parser = NaturalDateParser::default();
        assert_eq!(
            parser.parse("2008-12-12 16:37", now()).unwrap(),
            at(2008, 12, 12, 16, 37, 0)
        );
        assert_eq!(
            parser.parse(" 2008-12-12T16:37:05 ", now()).unwrap(),
            at(2008, 12, 12, 16, 37, 5)
        );
    }

    #[test]
    fn test_month_name_formats() {
        let parser = NaturalDateParser::default();
        assert_eq!(
            parser.parse("15 January 2021", now()).unwrap(),
            at(2021, 1, 15, 0, 0, 0)
        );
        assert_eq!(
            parser.parse("January 15, 2021", now()).unwrap(),
            at(2021, 1, 15, 0, 0, 0)
        );
    }

    #[test]
    fn test_month_first_without_comma_and_abbreviated() {
        let parser = NaturalDateParser::default();
        for input in ["January 15 2021", "Jan 15 2021", "Jan 15, 2021", "15 Jan 2021"] {
            assert_eq!(
                parser.parse(input, now()).unwrap(),
                at(2021, 1, 15, 0, 0, 0),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_in_n_units_counts_forward_from_now() {
        let parser = NaturalDateParser::default();
        assert_eq!(parser.parse("in 3 days", now()).unwrap(), at(2021, 1, 18, 10, 30, 0));
        assert_eq!(parser.parse("In 1 day", now()).unwrap(), at(2021, 1, 16, 10, 30, 0));
        assert_eq!(parser.parse("in 2 weeks", now()).unwrap(), at(2021, 1, 29, 10, 30, 0));
        assert_eq!(parser.parse("in 5 hours", now()).unwrap(), at(2021, 1, 15, 15, 30, 0));
        assert_eq!(parser.parse("in 1 month", now()).unwrap(), at(2021, 2, 15, 10, 30, 0));
        assert_eq!(parser.parse("in 2 years", now()).unwrap(), at(2023, 1, 15, 10, 30, 0));
    }

    #[test]
    fn test_in_with_unknown_unit_is_rejected() {
        let parser = NaturalDateParser::default();
        assert!(NaturalDateParser::parse_offset("in 3 moons", now()).is_none());
        assert!(NaturalDateParser::parse_offset("in three days", now()).is_none());
        assert!(parser.parse("in 3 moons", now()).is_err());
    }

    #[test]
    fn test_relative_phrase_moves_forward() {
        let parser = NaturalDateParser::new(Dialect::Us);
        let parsed = parser.parse("tomorrow", now()).unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2021, 1, 16).unwrap());
    }

    #[test]
    fn test_unparseable_input() {
        let parser = NaturalDateParser::default();
        for input in ["not a date", "", "   "] {
            match parser.parse(input, now()) {
                Err(MoonError::ParseError { input: echoed, .. }) => assert_eq!(echoed, input),
                other => panic!("expected ParseError for {:?}, got {:?}", input, other),
            }
        }
    }
}
