use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Vdv452Error {
    #[error("failed reading {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}:{line}: table {table} is missing column {column}", path.display())]
    MissingColumnError {
        path: PathBuf,
        line: usize,
        table: String,
        column: String,
    },
    #[error("{}:{line}: invalid value '{value}' for {table}.{column}: {message}", path.display())]
    InvalidValueError {
        path: PathBuf,
        line: usize,
        table: String,
        column: String,
        value: String,
        message: String,
    },
    #[error("{}:{line}: data row before any tbl/atr declaration", path.display())]
    RowOutsideTableError { path: PathBuf, line: usize },
}
