pub mod gtfs_time {
    //! serializer for GTFS clock times, which are seconds since the start of
    //! the service day and may exceed 24:00:00 for runs past midnight.
    use serde::Serializer;

    pub fn format(seconds: u32) -> String {
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds / 60) % 60,
            seconds % 60
        )
    }

    pub fn serialize<S>(seconds: &u32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(*seconds))
    }
}

pub mod gtfs_date {
    //! serializer for GTFS dates, which use yyyymmdd format.
    use chrono::NaiveDate;
    use serde::Serializer;

    pub const GTFS_DATE_FORMAT: &str = "%Y%m%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(GTFS_DATE_FORMAT).to_string())
    }
}
