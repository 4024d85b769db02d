mod operation;
mod vdv452_gtfs_app;

pub use operation::Vdv452GtfsOperation;
pub use vdv452_gtfs_app::Vdv452GtfsApp;
