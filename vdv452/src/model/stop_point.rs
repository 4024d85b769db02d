use super::StopId;

/// a stop point record (REC_HP): a reference into the location table used by
/// route sequences.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StopPoint {
    pub id: StopId,
}
