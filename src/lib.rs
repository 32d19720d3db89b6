pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::core::{
    calculator::MoonCalculator,
    clock::{FixedClock, SystemClock, TimeZonePolicy},
    date_parser::NaturalDateParser,
};
pub use crate::domain::model::{Dialect, OutputFormat, Phase, PhaseReport};
pub use crate::utils::error::{MoonError, Result};
