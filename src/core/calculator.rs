use crate::core::clock::{SystemClock, TimeZonePolicy};
use crate::core::date_parser::NaturalDateParser;
use crate::core::phase;
use crate::domain::model::{DaysUntil, Phase, PhaseReport};
use crate::domain::ports::{ConfigProvider, DateParser, TimeSource};
use crate::utils::error::Result;
use chrono::{NaiveDate, NaiveDateTime};

/// Moon phase for one instant. Everything is worked out in the constructor;
/// the getters only read.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonCalculator {
    phase_date: NaiveDateTime,
    timestamp: i64,
    position: f64,
    phase: Phase,
}

/// A full moon seen on 2008-12-12 at 16:37 local time.
pub const REFERENCE_FULL_MOON: NaiveDateTime = match NaiveDate::from_ymd_opt(2008, 12, 12) {
    Some(date) => match date.and_hms_opt(16, 37, 0) {
        Some(date_time) => date_time,
        None => panic!("16:37:00 is a valid time of day"),
    },
    None => panic!("2008-12-12 is a valid date"),
};

impl MoonCalculator {
    /// Phase for `date`, or for right now when `date` is `None`, using the
    /// system clock and the local time zone.
    pub fn new(date: Option<&str>) -> Result<Self> {
        Self::with_sources(
            date,
            &SystemClock,
            &NaturalDateParser::default(),
            TimeZonePolicy::Local,
        )
    }

    pub fn with_sources<T, P>(
        date: Option<&str>,
        clock: &T,
        parser: &P,
        zone: TimeZonePolicy,
    ) -> Result<Self>
    where
        T: TimeSource + ?Sized,
        P: DateParser + ?Sized,
    {
        let now = zone.naive_now(clock.now());
        let phase_date = match date {
            None => now,
            Some(input) => parser.parse(input, now)?,
        };

        let timestamp = zone.timestamp(phase_date)?;
        let epoch = zone.timestamp(REFERENCE_FULL_MOON)?;
        let position = phase::position_in_cycle(timestamp, epoch);
        let phase = phase::classify(position);

        tracing::debug!(
            "🌙 {} ({}, zone {}) -> position {:.6}, {}",
            phase_date,
            timestamp,
            zone,
            position,
            phase
        );

        Ok(Self {
            phase_date,
            timestamp,
            position,
            phase,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(date: Option<&str>, config: &C) -> Result<Self> {
        let zone: TimeZonePolicy = config.timezone().parse()?;
        let parser = NaturalDateParser::new(config.dialect());
        Self::with_sources(date, &SystemClock, &parser, zone)
    }

    pub fn phase_date(&self) -> NaiveDateTime {
        self.phase_date
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Fraction of the synodic cycle since the reference full moon, in `[0, 1)`.
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phase_name(&self) -> &'static str {
        self.phase.name()
    }

    pub fn percentage_of_illumination(&self) -> f64 {
        phase::illumination(self.position)
    }

    /// e.g. `"14.8 days until the next New Moon"`. Unknown moon types are
    /// counted as full moons but keep their own label.
    pub fn days_until_next_moon(&self, moon_type: &str) -> String {
        phase::describe_days_until(self.position, moon_type)
    }

    pub fn report(&self, moon_types: &[String]) -> PhaseReport {
        let upcoming = moon_types
            .iter()
            .map(|moon_type| DaysUntil {
                moon_type: moon_type.clone(),
                days: phase::days_until(self.position, moon_type),
                message: self.days_until_next_moon(moon_type),
            })
            .collect();

        PhaseReport {
            phase_date: self.phase_date,
            timestamp: self.timestamp,
            position: self.position,
            phase_id: self.phase.id(),
            phase_name: self.phase_name(),
            illumination: self.percentage_of_illumination(),
            upcoming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::domain::model::SYNODIC_PERIOD_SECONDS;
    use crate::utils::error::MoonError;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    const REFERENCE_UTC: i64 = 1_229_099_820;

    fn instant(timestamp: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(timestamp, 0).unwrap()
    }

    fn at_utc(timestamp: i64) -> MoonCalculator {
        MoonCalculator::with_sources(
            None,
            &FixedClock::new(instant(timestamp)),
            &NaturalDateParser::default(),
            TimeZonePolicy::utc(),
        )
        .unwrap()
    }

    /// 固定回傳同一個日期的假解析器
    struct StubParser(NaiveDateTime);

    impl DateParser for StubParser {
        fn parse(&self, _input: &str, _now: NaiveDateTime) -> Result<NaiveDateTime> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_reference_date_falls_in_waning_crescent() {
        let calculator = MoonCalculator::new(Some("2008-12-12 16:37")).unwrap();
        assert_eq!(calculator.position(), 0.0);
        assert_eq!(calculator.phase(), Phase::WaningCrescent);
        assert_eq!(calculator.phase_name(), "Waning Crescent");
        assert!((calculator.percentage_of_illumination() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reference_full_moon_constant() {
        let parsed = NaturalDateParser::default()
            .parse("2008-12-12 16:37", REFERENCE_FULL_MOON)
            .unwrap();
        assert_eq!(REFERENCE_FULL_MOON, parsed);
        assert_eq!(
            TimeZonePolicy::utc().timestamp(REFERENCE_FULL_MOON).unwrap(),
            REFERENCE_UTC
        );
    }

    #[test]
    fn test_now_comes_from_the_clock() {
        let calculator = at_utc(REFERENCE_UTC);
        assert_eq!(calculator.timestamp(), REFERENCE_UTC);
        assert_eq!(calculator.phase_date(), REFERENCE_FULL_MOON);
        assert_eq!(calculator.position(), 0.0);
    }

    #[test]
    fn test_half_cycle_is_new_moon() {
        let half = (SYNODIC_PERIOD_SECONDS / 2.0).round() as i64;
        let calculator = at_utc(REFERENCE_UTC + half);
        assert!((calculator.position() - 0.5).abs() < 1e-6);
        assert_eq!(calculator.phase(), Phase::NewMoon);
        assert!(calculator.percentage_of_illumination() < 1e-6);
    }

    #[test]
    fn test_position_repeats_every_period() {
        let period = SYNODIC_PERIOD_SECONDS.round() as i64;
        for start in [REFERENCE_UTC - 400_000_000, REFERENCE_UTC + 123_456, 1_610_668_800] {
            let first = at_utc(start).position();
            let later = at_utc(start + period).position();
            let gap = (first - later).abs();
            assert!(gap.min(1.0 - gap) < 1e-6, "gap {} at {}", gap, start);
        }
    }

    #[test]
    fn test_dates_before_reference_stay_in_range() {
        let calculator = MoonCalculator::with_sources(
            Some("1969-07-20 20:17"),
            &FixedClock::new(instant(REFERENCE_UTC)),
            &NaturalDateParser::default(),
            TimeZonePolicy::utc(),
        )
        .unwrap();
        assert!(calculator.timestamp() < 0);
        assert!((0.0..1.0).contains(&calculator.position()));
    }

    #[test]
    fn test_parser_is_injectable() {
        let target = REFERENCE_FULL_MOON + TimeDelta::days(7);
        let calculator = MoonCalculator::with_sources(
            Some("whatever"),
            &FixedClock::new(instant(0)),
            &StubParser(target),
            TimeZonePolicy::utc(),
        )
        .unwrap();
        assert_eq!(calculator.phase_date(), target);
        assert_eq!(calculator.timestamp(), REFERENCE_UTC + 7 * 86400);
    }

    #[test]
    fn test_invalid_date_is_parse_error() {
        let result = MoonCalculator::with_sources(
            Some("not a date"),
            &FixedClock::new(instant(REFERENCE_UTC)),
            &NaturalDateParser::default(),
            TimeZonePolicy::utc(),
        );
        assert!(matches!(result, Err(MoonError::ParseError { .. })));
    }

    #[test]
    fn test_days_until_next_moon_echoes_label() {
        let calculator = at_utc(REFERENCE_UTC);
        assert_eq!(
            calculator.days_until_next_moon("Bogus Type"),
            "29.53 days until the next Bogus Type"
        );
        assert_eq!(
            calculator.days_until_next_moon("Full Moon"),
            "29.53 days until the next Full Moon"
        );
        assert_eq!(
            calculator.days_until_next_moon("New Moon"),
            "14.8 days until the next New Moon"
        );
    }

    #[test]
    fn test_report_collects_requested_moon_types() {
        let calculator = at_utc(REFERENCE_UTC);
        let moon_types = vec!["Third Quarter".to_string(), "Blue Moon".to_string()];
        let report = calculator.report(&moon_types);

        assert_eq!(report.phase_id, 7);
        assert_eq!(report.phase_name, "Waning Crescent");
        assert_eq!(report.upcoming.len(), 2);
        assert_eq!(report.upcoming[0].days, 7.4);
        assert_eq!(report.upcoming[1].days, 29.53);
        assert_eq!(report.upcoming[1].message, "29.53 days until the next Blue Moon");
    }
}
