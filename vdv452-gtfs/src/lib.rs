//! Converts VDV452 transit schedule feeds into GTFS.
//!
//! the [`vdv452`] crate supplies the typed source records and the in-memory
//! index over a feed; this crate walks the indexed journeys and produces the
//! GTFS entity set (agency, routes, trips, stop times, stops, and service
//! calendars), applying the data-quality rules the source format needs in
//! practice: non-passenger waypoint filtering, swapped-coordinate repair,
//! and rejection of degenerate journeys.
pub mod app;
pub mod convert;
pub mod gtfs;
