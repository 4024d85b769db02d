use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use super::codec;

/// all routes produced from a VDV452 feed are bus routes.
pub const ROUTE_TYPE_BUS: u32 = 3;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Agency {
    pub agency_id: String,
    pub agency_name: String,
    pub agency_url: String,
    pub agency_timezone: String,
    pub agency_lang: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Route {
    pub route_id: String,
    pub agency_id: String,
    pub route_short_name: Option<String>,
    pub route_long_name: Option<String>,
    pub route_type: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stop {
    pub stop_id: String,
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
    pub zone_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trip {
    pub route_id: String,
    pub service_id: String,
    pub trip_id: String,
    pub trip_headsign: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StopTime {
    pub trip_id: String,
    #[serde(serialize_with = "codec::gtfs_time::serialize")]
    pub arrival_time: u32,
    #[serde(serialize_with = "codec::gtfs_time::serialize")]
    pub departure_time: u32,
    pub stop_id: String,
    /// zero-based position in the line's original route sequence. filtered
    /// positions leave gaps rather than being renumbered.
    pub stop_sequence: u32,
}

/// one weekly service pattern row (calendar.txt).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ServiceCalendar {
    pub service_id: String,
    pub monday: u8,
    pub tuesday: u8,
    pub wednesday: u8,
    pub thursday: u8,
    pub friday: u8,
    pub saturday: u8,
    pub sunday: u8,
    #[serde(serialize_with = "codec::gtfs_date::serialize")]
    pub start_date: NaiveDate,
    #[serde(serialize_with = "codec::gtfs_date::serialize")]
    pub end_date: NaiveDate,
}

/// GTFS calendar_dates.txt exception type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExceptionType {
    Added,
    Removed,
}

impl Serialize for ExceptionType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ExceptionType::Added => serializer.serialize_u8(1),
            ExceptionType::Removed => serializer.serialize_u8(2),
        }
    }
}

/// one service exception row (calendar_dates.txt).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ServiceCalendarDate {
    pub service_id: String,
    #[serde(serialize_with = "codec::gtfs_date::serialize")]
    pub date: NaiveDate,
    pub exception_type: ExceptionType,
}

/// the calendar rows a minimized service expands to. the transformation
/// engine upserts these verbatim without inspecting them.
#[derive(Clone, Debug, PartialEq)]
pub enum CalendarEntity {
    Calendar(ServiceCalendar),
    CalendarDate(ServiceCalendarDate),
}
