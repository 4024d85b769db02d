use std::fmt::{Display, Formatter};

/// classification of a VDV452 location record (the ONR_TYP_NR column).
/// only passenger stops ("Haltestelle") are eligible to become GTFS stops;
/// depots and other waypoints are filtered during transformation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointType {
    Stop,
    Depot,
    Other(u32),
}

impl From<u32> for PointType {
    fn from(value: u32) -> PointType {
        match value {
            1 => PointType::Stop,
            2 => PointType::Depot,
            other => PointType::Other(other),
        }
    }
}

impl Display for PointType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PointType::Stop => write!(f, "STOP"),
            PointType::Depot => write!(f, "DEPOT"),
            PointType::Other(code) => write!(f, "OTHER({code})"),
        }
    }
}

/// identifier of a location record, tagged with its point type. the type is
/// part of the key: the same numeric id may name both a stop and a depot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId {
    pub point_type: PointType,
    pub id: u64,
}

impl StopId {
    pub fn new(point_type: PointType, id: u64) -> StopId {
        StopId { point_type, id }
    }
}

impl Display for StopId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.point_type, self.id)
    }
}
