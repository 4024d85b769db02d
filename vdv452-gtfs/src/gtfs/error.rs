use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum GtfsWriteError {
    #[error("failed creating output directory {}: {source}", path.display())]
    CreateDirectoryError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed writing {}: {source}", path.display())]
    CsvError { path: PathBuf, source: csv::Error },
    #[error("failed flushing {}: {source}", path.display())]
    FlushError {
        path: PathBuf,
        source: std::io::Error,
    },
}
