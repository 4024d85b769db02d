use clap::Parser;

use super::Vdv452GtfsOperation;

/// command line tool for converting VDV452 schedule feeds into GTFS
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Vdv452GtfsApp {
    #[command(subcommand)]
    pub op: Vdv452GtfsOperation,
}
