use vdv452::model::{LineId, StopId, VersionedId};

/// conditions that abort a whole conversion run. journey- and stop-level
/// data problems are handled inline as diagnostics instead.
#[derive(thiserror::Error, Debug)]
pub enum TransformError {
    #[error("expected exactly one transport company in the feed, found {0}; multi-operator feeds are unsupported")]
    NotExactlyOneTransportCompany(usize),
    #[error("unknown stop: {0}")]
    UnknownStop(StopId),
    #[error("unknown line: {0}")]
    UnknownLine(LineId),
    #[error("no travel time in timing group {timing_group} for adjacent stops {from} -> {to}")]
    MissingTravelTime {
        timing_group: VersionedId,
        from: StopId,
        to: StopId,
    },
}
