use super::{StopId, VersionedId};

/// additional dwell time at a stop for one specific journey (REC_FRT_HZT),
/// layered on top of the timing-group wait time.
#[derive(Clone, Debug)]
pub struct JourneyWaitTime {
    pub journey: VersionedId,
    pub stop: StopId,
    pub duration_seconds: u32,
}
