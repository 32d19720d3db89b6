use crate::domain::model::{Dialect, OutputFormat};
use crate::utils::error::Result;
use chrono::{DateTime, NaiveDateTime, Utc};

/// Source of the current instant. Swapped for a fixed clock in tests.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Turns free-form text into a naive date/time. Relative phrases are resolved
/// against `now`.
pub trait DateParser: Send + Sync {
    fn parse(&self, input: &str, now: NaiveDateTime) -> Result<NaiveDateTime>;
}

pub trait ConfigProvider: Send + Sync {
    fn timezone(&self) -> &str;
    fn dialect(&self) -> Dialect;
    fn moon_types(&self) -> &[String];
    fn output_format(&self) -> OutputFormat;
}
