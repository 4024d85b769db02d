use chrono_tz::Tz;

/// coordinate axis difference, in degrees, beyond which a stop is assumed to
/// have its longitude and latitude transposed. a single feed covers one
/// operating area, so any stop this far from the reference point is a data
/// defect rather than geography.
pub const DEFAULT_SWAP_THRESHOLD: f64 = 10.0;

#[derive(Clone, Debug)]
pub struct ConvertConfig {
    /// agency time zone, also governing the interpretation of service days.
    pub timezone: Tz,
    pub swap_threshold: f64,
}

impl ConvertConfig {
    pub fn new(timezone: Tz) -> ConvertConfig {
        ConvertConfig {
            timezone,
            swap_threshold: DEFAULT_SWAP_THRESHOLD,
        }
    }
}
