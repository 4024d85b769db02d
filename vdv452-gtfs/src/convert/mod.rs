mod calendar;
mod config;
mod engine;
mod error;

pub use calendar::{CalendarMinimizer, MajorityPatternMinimizer};
pub use config::{ConvertConfig, DEFAULT_SWAP_THRESHOLD};
pub use engine::{convert, ConvertSummary, Vdv452ToGtfs};
pub use error::TransformError;
