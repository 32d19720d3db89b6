pub mod calculator;
pub mod clock;
pub mod date_parser;
pub mod phase;

pub use crate::domain::model::{Phase, PhaseReport};
pub use crate::domain::ports::{ConfigProvider, DateParser, TimeSource};
pub use crate::utils::error::Result;
