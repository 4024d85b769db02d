pub mod codec;
mod dao;
mod error;
mod model;
mod write;

pub use dao::{EntityStore, GtfsDao, GtfsEntity};
pub use error::GtfsWriteError;
pub use model::{
    Agency, CalendarEntity, ExceptionType, Route, ServiceCalendar, ServiceCalendarDate, Stop,
    StopTime, Trip, ROUTE_TYPE_BUS,
};
pub use write::write_gtfs;
