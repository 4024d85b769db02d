use std::fmt::{Display, Formatter};

/// identifier of a line (LI_NR plus basis version).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId {
    pub id: u64,
    pub version: u64,
}

impl LineId {
    pub fn new(id: u64, version: u64) -> LineId {
        LineId { id, version }
    }
}

impl Display for LineId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.id, self.version)
    }
}

/// a transit line (REC_LID). the short name is the rider-facing line code
/// (LI_KUERZEL), the long name the full line description (LIDNAME).
#[derive(Clone, Debug)]
pub struct Line {
    pub id: LineId,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
}
