use std::path::Path;

use chrono_tz::Tz;
use clap::Subcommand;

use crate::convert::{convert, ConvertConfig, DEFAULT_SWAP_THRESHOLD};
use crate::gtfs::{write_gtfs, GtfsDao};

#[derive(Debug, Clone, Subcommand)]
pub enum Vdv452GtfsOperation {
    /// convert a directory of VDV452 .x10 files into a GTFS directory
    Convert {
        /// directory containing the VDV452 .x10 files
        #[arg(long)]
        input: String,
        /// directory the GTFS text files are written to
        #[arg(long)]
        output: String,
        /// agency time zone (IANA name)
        #[arg(long, default_value_t = String::from("Europe/Berlin"))]
        timezone: String,
        /// coordinate difference in degrees beyond which a stop's axes are
        /// assumed transposed and re-swapped
        #[arg(long, default_value_t = DEFAULT_SWAP_THRESHOLD)]
        swap_threshold: f64,
    },
}

impl Vdv452GtfsOperation {
    pub fn run(&self) {
        match self {
            Vdv452GtfsOperation::Convert {
                input,
                output,
                timezone,
                swap_threshold,
            } => {
                let timezone = timezone
                    .parse::<Tz>()
                    .unwrap_or_else(|e| panic!("invalid time zone '{timezone}': {e}"));
                let index = vdv452::read::read_directory(Path::new(input))
                    .expect("failed reading VDV452 input directory");
                let config = ConvertConfig {
                    timezone,
                    swap_threshold: *swap_threshold,
                };
                let mut dao = GtfsDao::new();
                let summary =
                    convert(&index, &mut dao, &config).expect("failed converting VDV452 feed");
                write_gtfs(&dao, Path::new(output)).expect("failed writing GTFS output");
                log::info!("{summary}");
            }
        }
    }
}
