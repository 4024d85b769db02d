use std::fs;
use std::path::Path;

use serde::Serialize;

use super::dao::GtfsDao;
use super::error::GtfsWriteError;

/// writes the GTFS text files for a populated store. files whose collection
/// is empty are skipped entirely rather than written with only a header.
pub fn write_gtfs(dao: &GtfsDao, dir: &Path) -> Result<(), GtfsWriteError> {
    fs::create_dir_all(dir).map_err(|source| GtfsWriteError::CreateDirectoryError {
        path: dir.to_path_buf(),
        source,
    })?;
    write_rows(dir, "agency.txt", dao.agencies.entities())?;
    write_rows(dir, "stops.txt", dao.stops.entities())?;
    write_rows(dir, "routes.txt", dao.routes.entities())?;
    write_rows(dir, "trips.txt", dao.trips.entities())?;
    write_rows(dir, "stop_times.txt", &dao.stop_times)?;
    write_rows(dir, "calendar.txt", dao.calendars.entities())?;
    write_rows(dir, "calendar_dates.txt", dao.calendar_dates.entities())?;
    Ok(())
}

fn write_rows<T: Serialize>(dir: &Path, name: &str, rows: &[T]) -> Result<(), GtfsWriteError> {
    if rows.is_empty() {
        log::info!("skipping {name}: no rows");
        return Ok(());
    }
    let path = dir.join(name);
    let mut wtr = csv::Writer::from_path(&path).map_err(|source| GtfsWriteError::CsvError {
        path: path.clone(),
        source,
    })?;
    for row in rows {
        wtr.serialize(row).map_err(|source| GtfsWriteError::CsvError {
            path: path.clone(),
            source,
        })?;
    }
    wtr.flush().map_err(|source| GtfsWriteError::FlushError {
        path: path.clone(),
        source,
    })?;
    log::info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
