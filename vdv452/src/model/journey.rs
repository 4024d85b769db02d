use super::{LineId, VersionedId};

/// trip type for a regular passenger ride (FAHRTART_NR == 1). journeys with
/// any other trip type are built but never published.
pub const TRIP_TYPE_NORMAL_RIDE: u32 = 1;

/// one scheduled vehicle run along a line (REC_FRT): a departure time on a
/// service day, resolved against the line's stop sequence and the timing
/// group's durations.
#[derive(Clone, Debug)]
pub struct Journey {
    pub id: VersionedId,
    pub line: LineId,
    pub timing_group: VersionedId,
    pub day_type: VersionedId,
    /// departure from the first sequence position, in seconds after the
    /// start of the service day.
    pub departure_seconds: u32,
    pub trip_type: u32,
    pub service_type: u32,
}

impl Journey {
    pub fn is_normal_ride(&self) -> bool {
        self.trip_type == TRIP_TYPE_NORMAL_RIDE
    }
}
