use super::{StopId, VersionedId};

/// typical dwell time at a stop for all journeys of a timing group
/// (ORT_HZTF).
#[derive(Clone, Debug)]
pub struct WaitTime {
    pub timing_group: VersionedId,
    pub stop: StopId,
    pub duration_seconds: u32,
}
