use std::fmt::{Display, Formatter};

/// composite identifier carried by versioned VDV452 entities (day types,
/// journeys, timing groups, destinations, transport companies). the version
/// half comes from the feed's BASIS_VERSION column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionedId {
    pub id: u64,
    pub version: u64,
}

impl VersionedId {
    pub fn new(id: u64, version: u64) -> VersionedId {
        VersionedId { id, version }
    }
}

impl Display for VersionedId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.id, self.version)
    }
}
