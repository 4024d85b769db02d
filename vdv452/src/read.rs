//! reader for VDV interchange (`.x10`) files.
//!
//! the VDV451 container format is line oriented: a `tbl` line selects the
//! current table, `atr` names its columns, and each `rec` line carries one
//! row of `;`-separated values (strings double-quoted). administrative lines
//! (`mod`, `src`, `chs`, `ver`, `frm`, `end`, `eof`) and tables without a
//! counterpart in the record model are skipped.
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::Vdv452Error;
use crate::index::Vdv452Index;
use crate::model::{
    DayType, Destination, Journey, JourneyWaitTime, Line, LineId, Period, PointType,
    RouteSequenceEntry, Stop, StopId, StopPoint, TimingGroup, TransportCompany, TravelTime,
    Vdv452Record, VersionedId, WaitTime,
};

/// reads every `.x10` file in a directory (case-insensitive extension) into a
/// fresh index. files are visited in name order.
pub fn read_directory(path: &Path) -> Result<Vdv452Index, Vdv452Error> {
    let entries = fs::read_dir(path).map_err(|source| Vdv452Error::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Vdv452Error::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let file_path = entry.path();
        let is_x10 = file_path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("x10"));
        if is_x10 {
            files.push(file_path);
        }
    }
    files.sort();

    let mut index = Vdv452Index::new();
    for file in &files {
        read_file(file, &mut index)?;
    }
    Ok(index)
}

/// reads one `.x10` file into an existing index.
pub fn read_file(path: &Path, index: &mut Vdv452Index) -> Result<(), Vdv452Error> {
    let bytes = fs::read(path).map_err(|source| Vdv452Error::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_text(&bytes);
    log::info!("reading {}", path.display());
    parse_text(&text, path, index)
}

/// decodes file bytes, falling back to Latin-1 when the content is not valid
/// UTF-8. VDV feeds are commonly distributed in ISO-8859-1.
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn parse_text(text: &str, path: &Path, index: &mut Vdv452Index) -> Result<(), Vdv452Error> {
    let mut table: Option<String> = None;
    let mut columns: Vec<String> = Vec::new();
    let mut file_version: u64 = 1;

    for (line_idx, raw_line) in text.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split(';').map(str::trim);
        let Some(kind) = tokens.next() else {
            continue;
        };
        match kind.to_ascii_lowercase().as_str() {
            "tbl" => {
                table = tokens.next().map(|t| t.to_ascii_uppercase());
                columns.clear();
            }
            "atr" => {
                columns = tokens
                    .filter(|t| !t.is_empty())
                    .map(|t| t.to_ascii_uppercase())
                    .collect();
            }
            "rec" => {
                let Some(table) = table.as_deref() else {
                    return Err(Vdv452Error::RowOutsideTableError {
                        path: path.to_path_buf(),
                        line: line_no,
                    });
                };
                let values: Vec<String> = tokens.map(unquote).collect();
                let row = Row {
                    path,
                    line: line_no,
                    table,
                    columns: &columns,
                    values,
                    file_version,
                };
                if let Some(record) = record_for_row(&row)? {
                    index.add_record(record);
                }
            }
            "ver" => {
                if let Some(version) = tokens.next().and_then(|t| t.parse::<u64>().ok()) {
                    file_version = version;
                }
            }
            // administrative records carry no schedule data
            "mod" | "src" | "chs" | "dat" | "frm" | "com" | "end" | "eof" => {}
            _ => {}
        }
    }
    Ok(())
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}

/// one `rec` row paired with the column declaration of its table.
struct Row<'a> {
    path: &'a Path,
    line: usize,
    table: &'a str,
    columns: &'a [String],
    values: Vec<String>,
    file_version: u64,
}

impl Row<'_> {
    fn raw(&self, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        let value = self.values.get(idx)?.as_str();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    fn missing(&self, column: &str) -> Vdv452Error {
        Vdv452Error::MissingColumnError {
            path: self.path.to_path_buf(),
            line: self.line,
            table: self.table.to_string(),
            column: column.to_string(),
        }
    }

    fn invalid(&self, column: &str, value: &str, message: &str) -> Vdv452Error {
        Vdv452Error::InvalidValueError {
            path: self.path.to_path_buf(),
            line: self.line,
            table: self.table.to_string(),
            column: column.to_string(),
            value: value.to_string(),
            message: message.to_string(),
        }
    }

    fn opt_string(&self, column: &str) -> Option<String> {
        self.raw(column).map(str::to_string)
    }

    fn u64(&self, column: &str) -> Result<u64, Vdv452Error> {
        let value = self.raw(column).ok_or_else(|| self.missing(column))?;
        value
            .parse::<u64>()
            .map_err(|e| self.invalid(column, value, &e.to_string()))
    }

    fn opt_u64(&self, column: &str) -> Result<Option<u64>, Vdv452Error> {
        match self.raw(column) {
            None => Ok(None),
            Some(value) => value
                .parse::<u64>()
                .map(Some)
                .map_err(|e| self.invalid(column, value, &e.to_string())),
        }
    }

    fn u32(&self, column: &str) -> Result<u32, Vdv452Error> {
        let value = self.raw(column).ok_or_else(|| self.missing(column))?;
        value
            .parse::<u32>()
            .map_err(|e| self.invalid(column, value, &e.to_string()))
    }

    /// operating dates are packed as yyyymmdd.
    fn date(&self, column: &str) -> Result<NaiveDate, Vdv452Error> {
        let value = self.raw(column).ok_or_else(|| self.missing(column))?;
        NaiveDate::parse_from_str(value, "%Y%m%d")
            .map_err(|e| self.invalid(column, value, &e.to_string()))
    }

    /// coordinates are packed degrees-minutes-seconds integers; an absent
    /// value means "unset" and decodes to 0.0.
    fn coordinate(&self, column: &str) -> Result<f64, Vdv452Error> {
        match self.raw(column) {
            None => Ok(0.0),
            Some(value) => {
                let packed = value
                    .parse::<i64>()
                    .map_err(|e| self.invalid(column, value, &e.to_string()))?;
                Ok(decode_dms(packed))
            }
        }
    }

    /// the version half of every id in this row: BASIS_VERSION when the table
    /// carries it, otherwise the file-level `ver` value.
    fn version(&self) -> Result<u64, Vdv452Error> {
        match self.opt_u64("BASIS_VERSION")? {
            Some(version) => Ok(version),
            None => Ok(self.file_version),
        }
    }

    fn stop_id(&self, type_column: &str, id_column: &str) -> Result<StopId, Vdv452Error> {
        let point_type = PointType::from(self.u32(type_column)?);
        Ok(StopId::new(point_type, self.u64(id_column)?))
    }
}

/// decodes a packed `±GGGMMSSsss` coordinate (degrees, minutes, seconds with
/// thousandths of an arc second) into decimal WGS84 degrees.
fn decode_dms(value: i64) -> f64 {
    let sign = if value < 0 { -1.0 } else { 1.0 };
    let value = value.abs();
    let degrees = value / 10_000_000;
    let minutes = (value / 100_000) % 100;
    let second_thousandths = value % 100_000;
    sign * (degrees as f64
        + minutes as f64 / 60.0
        + second_thousandths as f64 / 1000.0 / 3600.0)
}

fn record_for_row(row: &Row) -> Result<Option<Vdv452Record>, Vdv452Error> {
    let record = match row.table {
        "ZUL_VERKEHRSBETRIEB" => {
            let id = VersionedId::new(row.u64("UNTERNEHMEN")?, row.version()?);
            let name = row
                .opt_string("ABK_UNTERNEHMEN")
                .unwrap_or_else(|| id.id.to_string());
            Vdv452Record::TransportCompany(TransportCompany { id, name })
        }
        "MENGE_TAGESART" => Vdv452Record::DayType(DayType {
            id: VersionedId::new(row.u64("TAGESART_NR")?, row.version()?),
        }),
        "FIRMENKALENDER" => Vdv452Record::Period(Period {
            day_type: VersionedId::new(row.u64("TAGESART_NR")?, row.version()?),
            date: row.date("BETRIEBSTAG")?,
        }),
        "MENGE_FGR" => Vdv452Record::TimingGroup(TimingGroup {
            id: VersionedId::new(row.u64("FGR_NR")?, row.version()?),
        }),
        "REC_ORT" => Vdv452Record::Stop(Stop {
            id: row.stop_id("ONR_TYP_NR", "ORT_NR")?,
            name: row.opt_string("ORT_NAME").unwrap_or_default(),
            ref_name: row.opt_string("ORT_REF_ORT_NAME"),
            zone: row.opt_string("ZONE_WABE_NR"),
            lat: row.coordinate("ORT_POS_BREITE")?,
            lng: row.coordinate("ORT_POS_LAENGE")?,
        }),
        "REC_HP" => Vdv452Record::StopPoint(StopPoint {
            id: row.stop_id("ONR_TYP_NR", "ORT_NR")?,
        }),
        "REC_LID" => Vdv452Record::Line(Line {
            id: LineId::new(row.u64("LI_NR")?, row.version()?),
            short_name: row
                .opt_string("LI_KUERZEL")
                .or_else(|| row.opt_string("ROUTEN_NR")),
            long_name: row.opt_string("LIDNAME"),
        }),
        "LID_VERLAUF" => {
            let stop = match row.opt_u64("ORT_NR")? {
                Some(_) => Some(row.stop_id("ONR_TYP_NR", "ORT_NR")?),
                None => None,
            };
            let destination = match row.opt_u64("ZNR_NR")? {
                Some(znr) => Some(VersionedId::new(znr, row.version()?)),
                None => None,
            };
            Vdv452Record::RouteSequence(RouteSequenceEntry {
                line: LineId::new(row.u64("LI_NR")?, row.version()?),
                position: row.u32("LI_LFD_NR")?,
                stop,
                destination,
            })
        }
        "REC_ZNR" => Vdv452Record::Destination(Destination::new(
            VersionedId::new(row.u64("ZNR_NR")?, row.version()?),
            &row.opt_string("HECKANZEIGETEXT").unwrap_or_default(),
        )),
        "SEL_FZT_FELD" => Vdv452Record::TravelTime(TravelTime {
            timing_group: VersionedId::new(row.u64("FGR_NR")?, row.version()?),
            from_stop: row.stop_id("ONR_TYP_NR", "ORT_NR")?,
            to_stop: row.stop_id("SEL_ZIEL_TYP", "SEL_ZIEL")?,
            duration_seconds: row.u32("SEL_FZT")?,
        }),
        "ORT_HZTF" => Vdv452Record::WaitTime(WaitTime {
            timing_group: VersionedId::new(row.u64("FGR_NR")?, row.version()?),
            stop: row.stop_id("ONR_TYP_NR", "ORT_NR")?,
            duration_seconds: row.u32("HP_HZT")?,
        }),
        "REC_FRT_HZT" => Vdv452Record::JourneyWaitTime(JourneyWaitTime {
            journey: VersionedId::new(row.u64("FRT_FID")?, row.version()?),
            stop: row.stop_id("ONR_TYP_NR", "ORT_NR")?,
            duration_seconds: row.u32("FRT_HZT_ZEIT")?,
        }),
        "REC_FRT" => Vdv452Record::Journey(Journey {
            id: VersionedId::new(row.u64("FRT_FID")?, row.version()?),
            line: LineId::new(row.u64("LI_NR")?, row.version()?),
            timing_group: VersionedId::new(row.u64("FGR_NR")?, row.version()?),
            day_type: VersionedId::new(row.u64("TAGESART_NR")?, row.version()?),
            departure_seconds: row.u32("FRT_START")?,
            trip_type: row.u32("FAHRTART_NR")?,
            service_type: row.u32("LEISTUNGSART_NR")?,
        }),
        _ => return Ok(None),
    };
    Ok(Some(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(text: &str) -> Vdv452Index {
        let mut index = Vdv452Index::new();
        parse_text(text, Path::new("test.x10"), &mut index).expect("parse should succeed");
        index
    }

    #[test]
    fn test_decode_dms() {
        // 52°30'00" north
        assert!((decode_dms(523_000_000) - 52.5).abs() < 1e-9);
        // 13°24'36" east
        assert!((decode_dms(132_436_000) - 13.41).abs() < 1e-9);
        assert!((decode_dms(-132_436_000) + 13.41).abs() < 1e-9);
        assert_eq!(decode_dms(0), 0.0);
    }

    #[test]
    fn test_parse_transport_company() {
        let index = parse(concat!(
            "tbl; ZUL_VERKEHRSBETRIEB\n",
            "atr; BASIS_VERSION; UNTERNEHMEN; ABK_UNTERNEHMEN\n",
            "rec; 1; 7; \"Stadtwerke\"\n",
        ));
        let companies = index.transport_companies();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].id, VersionedId::new(7, 1));
        assert_eq!(companies[0].name, "Stadtwerke");
    }

    #[test]
    fn test_parse_stop_with_dms_coordinates() {
        let index = parse(concat!(
            "ver; 2\n",
            "tbl; REC_ORT\n",
            "atr; ONR_TYP_NR; ORT_NR; ORT_NAME; ORT_POS_BREITE; ORT_POS_LAENGE\n",
            "rec; 1; 501121; \"Rathaus\"; 523000000; 132436000\n",
        ));
        let stop = index
            .stop_by_id(StopId::new(PointType::Stop, 501121))
            .expect("stop should be indexed");
        assert_eq!(stop.name, "Rathaus");
        assert!((stop.lat - 52.5).abs() < 1e-9);
        assert!((stop.lng - 13.41).abs() < 1e-9);
    }

    #[test]
    fn test_parse_route_sequence_with_hole_and_destination() {
        let index = parse(concat!(
            "tbl; LID_VERLAUF\n",
            "atr; BASIS_VERSION; LI_NR; LI_LFD_NR; ONR_TYP_NR; ORT_NR; ZNR_NR\n",
            "rec; 1; 4; 1; 1; 501121; 9\n",
            "rec; 1; 4; 2; 1; ; \n",
        ));
        let sequence = index.route_sequence_for_line(LineId::new(4, 1));
        assert_eq!(sequence.len(), 2);
        assert_eq!(
            sequence[0].stop,
            Some(StopId::new(PointType::Stop, 501121))
        );
        assert_eq!(sequence[0].destination, Some(VersionedId::new(9, 1)));
        assert_eq!(sequence[1].stop, None);
    }

    #[test]
    fn test_parse_journey_and_timing() {
        let index = parse(concat!(
            "tbl; REC_FRT\n",
            "atr; BASIS_VERSION; FRT_FID; FRT_START; LI_NR; TAGESART_NR; FGR_NR; FAHRTART_NR; LEISTUNGSART_NR\n",
            "rec; 1; 1975; 49080; 4; 1; 2; 1; 1\n",
            "tbl; SEL_FZT_FELD\n",
            "atr; BASIS_VERSION; FGR_NR; ONR_TYP_NR; ORT_NR; SEL_ZIEL_TYP; SEL_ZIEL; SEL_FZT\n",
            "rec; 1; 2; 1; 501121; 1; 501122; 120\n",
        ));
        let journey = index
            .journey_by_id(VersionedId::new(1975, 1))
            .expect("journey should be indexed");
        assert_eq!(journey.departure_seconds, 49080);
        assert!(journey.is_normal_ride());
        let pair = (
            StopId::new(PointType::Stop, 501121),
            StopId::new(PointType::Stop, 501122),
        );
        let times = index.travel_times_for_timing_group(VersionedId::new(2, 1));
        assert_eq!(times.get(&pair).map(|t| t.duration_seconds), Some(120));
    }

    #[test]
    fn test_unknown_table_is_ignored() {
        let index = parse(concat!(
            "tbl; MENGE_FAHRZEUGTYP\n",
            "atr; BASIS_VERSION; FZG_TYP_NR\n",
            "rec; 1; 3\n",
        ));
        assert_eq!(index.journey_count(), 0);
    }

    #[test]
    fn test_missing_required_column_is_an_error() {
        let mut index = Vdv452Index::new();
        let text = concat!(
            "tbl; FIRMENKALENDER\n",
            "atr; BASIS_VERSION; TAGESART_NR\n",
            "rec; 1; 1\n",
        );
        let result = parse_text(text, Path::new("test.x10"), &mut index);
        assert!(matches!(
            result,
            Err(Vdv452Error::MissingColumnError { column, .. }) if column == "BETRIEBSTAG"
        ));
    }

    #[test]
    fn test_read_directory_visits_x10_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let company = concat!(
            "tbl; ZUL_VERKEHRSBETRIEB\n",
            "atr; BASIS_VERSION; UNTERNEHMEN; ABK_UNTERNEHMEN\n",
            "rec; 1; 7; \"Stadtwerke\"\n",
        );
        let calendar = concat!(
            "tbl; FIRMENKALENDER\n",
            "atr; BASIS_VERSION; BETRIEBSTAG; TAGESART_NR\n",
            "rec; 1; 20250602; 1\n",
        );
        std::fs::File::create(dir.path().join("zul_verkehrsbetrieb.X10"))
            .and_then(|mut f| f.write_all(company.as_bytes()))
            .expect("write fixture");
        std::fs::File::create(dir.path().join("firmenkalender.x10"))
            .and_then(|mut f| f.write_all(calendar.as_bytes()))
            .expect("write fixture");
        std::fs::File::create(dir.path().join("notes.txt"))
            .and_then(|mut f| f.write_all(b"not a vdv file"))
            .expect("write fixture");

        let index = read_directory(dir.path()).expect("read should succeed");
        assert_eq!(index.transport_companies().len(), 1);
        let periods = index.periods_for_day_type(VersionedId::new(1, 1));
        assert_eq!(periods.len(), 1);
        assert_eq!(
            periods[0].date,
            NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date")
        );
    }
}
