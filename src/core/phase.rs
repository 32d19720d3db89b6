//! Pure computations over a position in the synodic cycle.
//!
//! A position is a fraction in `[0, 1)` measured from a known full moon, so
//! `0.0` is full and `0.5` is new.

use crate::domain::model::{NextPhaseTarget, Phase, SYNODIC_PERIOD_DAYS, SYNODIC_PERIOD_SECONDS};
use std::f64::consts::PI;

/// Fraction of the cycle elapsed between `epoch` and `timestamp` (both in
/// seconds). Dates before the epoch wrap around into `[0, 1)` as well.
pub fn position_in_cycle(timestamp: i64, epoch: i64) -> f64 {
    let delta = (timestamp - epoch) as f64;
    // `%` keeps the sign of the dividend
    let mut position = (delta % SYNODIC_PERIOD_SECONDS) / SYNODIC_PERIOD_SECONDS;
    if position < 0.0 {
        position += 1.0;
    }
    if position >= 1.0 {
        position = 0.0;
    }
    position
}

/// Bucket a position into one of the eight named phases.
///
/// The full moon bucket asks for a value that is both `>= 0.975` and
/// `<= 0.026`, which nothing satisfies. Positions near the cycle boundary
/// therefore land in the waning crescent fallback.
#[allow(clippy::impossible_comparisons)]
pub fn classify(position: f64) -> Phase {
    if (0.474..=0.53).contains(&position) {
        Phase::NewMoon
    } else if (0.54..=0.724).contains(&position) {
        Phase::WaxingCrescent
    } else if (0.725..=0.776).contains(&position) {
        Phase::FirstQuarter
    } else if (0.777..=0.974).contains(&position) {
        Phase::WaxingGibbous
    } else if position >= 0.975 && position <= 0.026 {
        Phase::FullMoon
    } else if (0.027..=0.234).contains(&position) {
        Phase::WaningGibbous
    } else if (0.235..=0.295).contains(&position) {
        Phase::ThirdQuarter
    } else {
        Phase::WaningCrescent
    }
}

/// Lit fraction of the disc, `1.0` at position 0 and `0.0` at position 0.5.
pub fn illumination(position: f64) -> f64 {
    (1.0 + (2.0 * PI * position).cos()) / 2.0
}

/// Days until the next `moon_type`. Quarter and new moon targets are rounded to
/// one decimal, everything else is treated as a full moon and rounded to two.
pub fn days_until(position: f64, moon_type: &str) -> f64 {
    match NextPhaseTarget::from_moon_type(moon_type).position() {
        Some(target) => {
            let days = if position < target {
                (target - position) * SYNODIC_PERIOD_DAYS
            } else {
                ((1.0 + target) - position) * SYNODIC_PERIOD_DAYS
            };
            round_to(days, 1)
        }
        None => round_to((1.0 - position) * SYNODIC_PERIOD_DAYS, 2),
    }
}

/// `"<days> days until the next <moon_type>"`, echoing `moon_type` as given.
pub fn describe_days_until(position: f64, moon_type: &str) -> String {
    format!(
        "{} days until the next {}",
        format_days(days_until(position, moon_type)),
        moon_type
    )
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Shortest decimal form with at least one fractional digit: `0.0`, `14.8`, `29.53`.
fn format_days(days: f64) -> String {
    if days.fract() == 0.0 {
        format!("{:.1}", days)
    } else {
        days.to_string()
    }
}
