use super::{StopId, VersionedId};

/// directional travel duration between two adjacent stops for one timing
/// group (SEL_FZT_FELD). the feed is expected to carry exactly one entry per
/// (timing group, from, to); duplicates are tolerated at indexing time.
#[derive(Clone, Debug)]
pub struct TravelTime {
    pub timing_group: VersionedId,
    pub from_stop: StopId,
    pub to_stop: StopId,
    pub duration_seconds: u32,
}
