use super::{LineId, StopId, VersionedId};

/// one entry of a line's ordered stop sequence (LID_VERLAUF).
///
/// some feeds leave the stop reference unset for a position that is
/// nonetheless sequenced ("holes"); the destination is typically set only on
/// the first entry, which is then authoritative for the whole line.
#[derive(Clone, Debug)]
pub struct RouteSequenceEntry {
    pub line: LineId,
    pub position: u32,
    pub stop: Option<StopId>,
    pub destination: Option<VersionedId>,
}
