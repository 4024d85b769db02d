//! converts a VDV452 interchange feed into a GTFS directory.
use clap::Parser;
use vdv452_gtfs::app::Vdv452GtfsApp;

fn main() {
    env_logger::init();
    let args = Vdv452GtfsApp::parse();
    args.op.run()
}
