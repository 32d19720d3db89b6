use crate::utils::error::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 朔望月長度 (天)
pub const SYNODIC_PERIOD_DAYS: f64 = 29.53058867;

pub const SYNODIC_PERIOD_SECONDS: f64 = SYNODIC_PERIOD_DAYS * 86400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    ThirdQuarter,
    WaningCrescent,
}

impl Phase {
    /// Phases in id order.
    pub const ALL: [Phase; 8] = [
        Phase::NewMoon,
        Phase::WaxingCrescent,
        Phase::FirstQuarter,
        Phase::WaxingGibbous,
        Phase::FullMoon,
        Phase::WaningGibbous,
        Phase::ThirdQuarter,
        Phase::WaningCrescent,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Phase> {
        Phase::ALL.get(id as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::NewMoon => "New Moon",
            Phase::WaxingCrescent => "Waxing Crescent",
            Phase::FirstQuarter => "First Quarter",
            Phase::WaxingGibbous => "Waxing Gibbous",
            Phase::FullMoon => "Full Moon",
            Phase::WaningGibbous => "Waning Gibbous",
            Phase::ThirdQuarter => "Third Quarter",
            Phase::WaningCrescent => "Waning Crescent",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where in the cycle a requested moon type falls. Anything that is not one of
/// the three quarter/new names counts as a full moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NextPhaseTarget {
    ThirdQuarter,
    NewMoon,
    FirstQuarter,
    FullMoon,
}

impl NextPhaseTarget {
    pub fn from_moon_type(moon_type: &str) -> Self {
        match moon_type {
            "Third Quarter" => NextPhaseTarget::ThirdQuarter,
            "New Moon" => NextPhaseTarget::NewMoon,
            "First Quarter" => NextPhaseTarget::FirstQuarter,
            _ => NextPhaseTarget::FullMoon,
        }
    }

    /// Target position, `None` for the full moon which sits on the cycle boundary.
    pub fn position(self) -> Option<f64> {
        match self {
            NextPhaseTarget::ThirdQuarter => Some(0.25),
            NextPhaseTarget::NewMoon => Some(0.5),
            NextPhaseTarget::FirstQuarter => Some(0.75),
            NextPhaseTarget::FullMoon => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Uk,
    Us,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
pub struct DaysUntil {
    pub moon_type: String,
    pub days: f64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhaseReport {
    pub phase_date: NaiveDateTime,
    pub timestamp: i64,
    pub position: f64,
    pub phase_id: u8,
    pub phase_name: &'static str,
    pub illumination: f64,
    pub upcoming: Vec<DaysUntil>,
}

impl PhaseReport {
    /// Pretty-printed JSON; failures surface as `MoonError::SerializationError`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Date:         {}", self.phase_date)?;
        writeln!(f, "Phase:        {}", self.phase_name)?;
        writeln!(f, "Illumination: {:.1}%", self.illumination * 100.0)?;
        writeln!(f, "Position:     {:.4}", self.position)?;
        for entry in &self.upcoming {
            writeln!(f, "{}", entry.message)?;
        }
        Ok(())
    }
}
