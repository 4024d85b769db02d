use chrono::NaiveDate;

use super::VersionedId;

/// a service-day pattern (MENGE_TAGESART): resolved through the operating
/// calendar into the concrete dates the pattern runs on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DayType {
    pub id: VersionedId,
}

/// one operating day of a day type (FIRMENKALENDER).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Period {
    pub day_type: VersionedId,
    pub date: NaiveDate,
}
