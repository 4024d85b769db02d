use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use itertools::Itertools;
use kdam::tqdm;
use vdv452::index::Vdv452Index;
use vdv452::model::{
    Journey, LineId, PointType, RouteSequenceEntry, StopId, StopPoint, VersionedId,
};

use super::calendar::{CalendarMinimizer, MajorityPatternMinimizer};
use super::config::ConvertConfig;
use super::error::TransformError;
use crate::gtfs::{Agency, GtfsDao, Route, Stop, StopTime, Trip, ROUTE_TYPE_BUS};

const AGENCY_URL: &str = "https://crates.io/crates/vdv452-gtfs";
const AGENCY_LANG: &str = "de";

/// translates indexed VDV452 entities into GTFS entities.
///
/// every resolution is memoized through the output store: the entity is
/// looked up by its derived id first and only created (and persisted, when it
/// qualifies) on a miss, so repeated references resolve to the same output.
/// execution is single threaded, which makes lookup-then-create atomic.
pub struct Vdv452ToGtfs<'a> {
    index: &'a Vdv452Index,
    dao: &'a mut GtfsDao,
    timezone: chrono_tz::Tz,
    swap_threshold: f64,
    minimizer: Box<dyn CalendarMinimizer>,
    /// service ids whose calendar rows have already been expanded.
    processed_calendars: HashSet<String>,
    /// (longitude, latitude) of the first located stop of the run, used to
    /// detect stops whose axes the feed transposed.
    reference_coord: Option<(f64, f64)>,
    rejected_journeys: usize,
}

impl<'a> Vdv452ToGtfs<'a> {
    pub fn new(
        index: &'a Vdv452Index,
        dao: &'a mut GtfsDao,
        config: &ConvertConfig,
    ) -> Vdv452ToGtfs<'a> {
        Vdv452ToGtfs {
            index,
            dao,
            timezone: config.timezone,
            swap_threshold: config.swap_threshold,
            minimizer: Box::new(MajorityPatternMinimizer),
            processed_calendars: HashSet::new(),
            reference_coord: None,
            rejected_journeys: 0,
        }
    }

    /// replaces the default calendar minimizer.
    pub fn with_minimizer(mut self, minimizer: Box<dyn CalendarMinimizer>) -> Vdv452ToGtfs<'a> {
        self.minimizer = minimizer;
        self
    }

    pub fn rejected_journeys(&self) -> usize {
        self.rejected_journeys
    }

    /// resolves the single agency of the feed. a VDV452 feed links lines to
    /// an operator only implicitly, so anything other than exactly one
    /// transport company cannot be translated.
    pub fn agency(&mut self) -> Result<Agency, TransformError> {
        let companies = self.index.transport_companies();
        if companies.len() != 1 {
            return Err(TransformError::NotExactlyOneTransportCompany(
                companies.len(),
            ));
        }
        let company = &companies[0];
        let agency_id = company.id.id.to_string();
        if let Some(existing) = self.dao.agencies.get(&agency_id) {
            return Ok(existing.clone());
        }
        let agency = Agency {
            agency_id,
            agency_name: company.name.clone(),
            agency_url: AGENCY_URL.to_string(),
            agency_timezone: self.timezone.name().to_string(),
            agency_lang: AGENCY_LANG.to_string(),
        };
        self.dao.agencies.save(agency.clone());
        Ok(agency)
    }

    pub fn route_for_line(&mut self, line_id: LineId) -> Result<Route, TransformError> {
        let agency = self.agency()?;
        let route_id = line_id.id.to_string();
        if let Some(existing) = self.dao.routes.get(&route_id) {
            return Ok(existing.clone());
        }
        let line = self
            .index
            .line_by_id(line_id)
            .ok_or(TransformError::UnknownLine(line_id))?;
        let route = Route {
            route_id,
            agency_id: agency.agency_id,
            route_short_name: line.short_name.clone().filter(|n| !n.is_empty()),
            route_long_name: line.long_name.clone().filter(|n| !n.is_empty()),
            route_type: ROUTE_TYPE_BUS,
        };
        self.dao.routes.save(route.clone());
        Ok(route)
    }

    /// resolves a stop point to a GTFS stop, repairing known data defects.
    /// the returned stop is persisted only when it is a passenger stop with
    /// usable coordinates; depot and other waypoints come back with zeroed
    /// coordinates so later references cannot resurrect them.
    pub fn stop_for_stop_point(&mut self, stop_point: StopPoint) -> Result<Stop, TransformError> {
        let stop_id = stop_point.id;
        let gtfs_id = stop_id.id.to_string();
        if let Some(existing) = self.dao.stops.get(&gtfs_id) {
            return Ok(existing.clone());
        }
        let vdv_stop = self
            .index
            .stop_by_id(stop_id)
            .ok_or(TransformError::UnknownStop(stop_id))?;

        let mut lng = vdv_stop.lng;
        let mut lat = vdv_stop.lat;

        // the first located record of the run anchors the swap heuristic,
        // whatever its point type
        if self.reference_coord.is_none() && (lng != 0.0 || lat != 0.0) {
            self.reference_coord = Some((lng, lat));
        }

        let is_passenger_stop = stop_id.point_type == PointType::Stop;
        if is_passenger_stop {
            if lng == 0.0 || lat == 0.0 {
                log::warn!(
                    "skipping stop {stop_id} ({}): coordinate is unset",
                    vdv_stop.name
                );
            } else if let Some((ref_lng, ref_lat)) = self.reference_coord {
                if (ref_lng - lng).abs() > self.swap_threshold
                    || (ref_lat - lat).abs() > self.swap_threshold
                {
                    log::warn!(
                        "re-swapping transposed coordinates of stop {stop_id} ({})",
                        vdv_stop.name
                    );
                    std::mem::swap(&mut lng, &mut lat);
                }
            }
        } else {
            log::warn!(
                "skipping stop {stop_id} ({}): not a passenger stop",
                vdv_stop.name
            );
            lng = 0.0;
            lat = 0.0;
        }

        let stop = Stop {
            stop_id: gtfs_id,
            stop_name: vdv_stop.preferred_name().to_string(),
            stop_lat: lat,
            stop_lon: lng,
            zone_id: vdv_stop.zone.clone(),
        };
        if is_passenger_stop && lng != 0.0 && lat != 0.0 {
            self.dao.stops.save(stop.clone());
        }
        Ok(stop)
    }

    /// expands the day type's operating dates into calendar rows, once per
    /// service id. repeat calls return the id without touching the minimizer.
    pub fn service_id_for_day_type(
        &mut self,
        day_type: VersionedId,
    ) -> Result<String, TransformError> {
        let service_id = day_type.id.to_string();
        if !self.processed_calendars.insert(service_id.clone()) {
            return Ok(service_id);
        }
        let dates: BTreeSet<NaiveDate> = self
            .index
            .periods_for_day_type(day_type)
            .iter()
            .map(|period| period.date)
            .collect();
        let entities = self.minimizer.entities_for_service_dates(&service_id, &dates);
        for entity in entities {
            self.dao.save_or_update_calendar_entity(entity);
        }
        Ok(service_id)
    }

    /// builds the GTFS trip for a journey, along with its stop times.
    ///
    /// the trip object is always constructed and returned so callers can
    /// follow references, but it is persisted only when the journey survives
    /// validation (a positive travel-time total and at least two passenger
    /// stops) and is a normal passenger ride.
    pub fn trip_for_journey(&mut self, journey: &Journey) -> Result<Trip, TransformError> {
        let trip_id = journey.id.id.to_string();
        if let Some(existing) = self.dao.trips.get(&trip_id) {
            return Ok(existing.clone());
        }
        let route = self.route_for_line(journey.line)?;
        let service_id = self.service_id_for_day_type(journey.day_type)?;
        let sequence = self.index.route_sequence_for_line(journey.line);
        // the feed sometimes sets the destination only on the first entry,
        // which then stands for the whole line
        let trip_headsign = sequence
            .first()
            .and_then(|entry| entry.destination)
            .and_then(|id| self.index.destination_by_id(id))
            .map(|destination| destination.headsign.clone())
            .filter(|headsign| !headsign.is_empty());
        let trip = Trip {
            route_id: route.route_id,
            service_id,
            trip_id,
            trip_headsign,
        };

        let trip_has_stops = self.stop_times_for_journey(journey, &trip)?;
        if !trip_has_stops {
            self.rejected_journeys += 1;
        }
        if !journey.is_normal_ride() {
            log::warn!(
                "not publishing trip for journey {} on line {}: trip type {} is not a passenger ride",
                journey.id,
                journey.line,
                journey.trip_type
            );
        }
        if trip_has_stops && journey.is_normal_ride() {
            self.dao.trips.save(trip.clone());
        }
        Ok(trip)
    }

    /// walks the route sequence accumulating the journey clock and persisting
    /// qualifying stop times. returns false when the journey is rejected as
    /// degenerate, in which case nothing was persisted.
    fn stop_times_for_journey(
        &mut self,
        journey: &Journey,
        trip: &Trip,
    ) -> Result<bool, TransformError> {
        let index = self.index;
        let sequence = index.route_sequence_for_line(journey.line);
        let travel_times = order_travel_times_for_sequence(index, journey, sequence)?;
        let wait_times = order_wait_times_for_sequence(index, journey, sequence);
        let journey_wait_times = index.wait_times_for_journey(journey.id);

        // validation pass: count effective passenger stops and total up the
        // travel time they contribute. depot and other waypoints count
        // toward neither.
        let mut travel_time_sum: u64 = 0;
        let mut passenger_stops = 0usize;
        let mut has_other_point_types = false;
        for (i, entry) in sequence.iter().enumerate() {
            let Some(stop_id) = entry.stop else {
                continue;
            };
            let vdv_stop = index
                .stop_by_id(stop_id)
                .ok_or(TransformError::UnknownStop(stop_id))?;
            if vdv_stop.id.point_type != PointType::Stop {
                has_other_point_types = true;
                continue;
            }
            passenger_stops += 1;
            if i + 1 < sequence.len() {
                travel_time_sum += u64::from(travel_times[i].unwrap_or(0));
            }
        }
        if travel_time_sum == 0 {
            log::warn!(
                "skipping journey {} on line {}: total travel time is zero",
                journey.id,
                journey.line
            );
            return Ok(false);
        }
        if passenger_stops == 1 {
            log::warn!(
                "skipping journey {} on line {}: sequence reduces to a single passenger stop",
                journey.id,
                journey.line
            );
            return Ok(false);
        }
        if has_other_point_types {
            log::warn!(
                "journey {} on line {} keeps non-passenger entries in its sequence",
                journey.id,
                journey.line
            );
        }

        // accumulation pass: arrival is the running clock, dwell times move
        // it to the departure, and the leg travel time carries it to the
        // next position.
        let mut clock = journey.departure_seconds;
        for (i, entry) in sequence.iter().enumerate() {
            let Some(stop_id) = entry.stop else {
                log::warn!(
                    "journey {} has no stop reference at sequence position {}",
                    journey.id,
                    entry.position
                );
                continue;
            };
            let gtfs_stop = self.stop_for_stop_point(StopPoint { id: stop_id })?;
            let arrival_time = clock;
            if let Some(wait) = wait_times[i] {
                clock += wait;
            }
            if let Some(jwt) = journey_wait_times.iter().find(|jwt| jwt.stop == stop_id) {
                log::info!(
                    "adding journey-specific wait of {}s for journey {} at stop {stop_id}",
                    jwt.duration_seconds,
                    journey.id
                );
                clock += jwt.duration_seconds;
            }
            let departure_time = clock;
            if i + 1 < sequence.len() {
                clock += travel_times[i].unwrap_or(0);
            }

            let vdv_stop = index
                .stop_by_id(stop_id)
                .ok_or(TransformError::UnknownStop(stop_id))?;
            let qualifies = vdv_stop.id.point_type == PointType::Stop
                && journey.is_normal_ride()
                && vdv_stop.lng != 0.0
                && vdv_stop.lat != 0.0;
            if qualifies {
                self.dao.stop_times.push(StopTime {
                    trip_id: trip.trip_id.clone(),
                    arrival_time,
                    departure_time,
                    stop_id: gtfs_stop.stop_id,
                    stop_sequence: i as u32,
                });
            }
        }
        Ok(true)
    }
}

/// travel times aligned to the sequence: index i holds the duration from
/// position i to position i+1. a defined adjacent pair with no travel time
/// is a contract violation in the feed; a pair broken by a missing stop
/// reference contributes nothing.
fn order_travel_times_for_sequence(
    index: &Vdv452Index,
    journey: &Journey,
    sequence: &[RouteSequenceEntry],
) -> Result<Vec<Option<u32>>, TransformError> {
    let by_pair = index.travel_times_for_timing_group(journey.timing_group);
    let mut ordered = Vec::with_capacity(sequence.len().saturating_sub(1));
    for (from_entry, to_entry) in sequence.iter().tuple_windows() {
        let duration = match (from_entry.stop, to_entry.stop) {
            (Some(from), Some(to)) => {
                let travel_time =
                    by_pair
                        .get(&(from, to))
                        .ok_or(TransformError::MissingTravelTime {
                            timing_group: journey.timing_group,
                            from,
                            to,
                        })?;
                Some(travel_time.duration_seconds)
            }
            _ => None,
        };
        ordered.push(duration);
    }
    Ok(ordered)
}

/// wait times aligned to the sequence by stop identity. a position whose
/// stop has no wait time contributes nothing.
fn order_wait_times_for_sequence(
    index: &Vdv452Index,
    journey: &Journey,
    sequence: &[RouteSequenceEntry],
) -> Vec<Option<u32>> {
    let by_stop: HashMap<StopId, u32> = index
        .wait_times_for_timing_group(journey.timing_group)
        .iter()
        .map(|wait_time| (wait_time.stop, wait_time.duration_seconds))
        .collect();
    sequence
        .iter()
        .map(|entry| entry.stop.and_then(|stop| by_stop.get(&stop).copied()))
        .collect()
}

#[derive(Clone, Debug, Default)]
pub struct ConvertSummary {
    pub journeys: usize,
    pub agencies: usize,
    pub routes: usize,
    pub trips: usize,
    pub stops: usize,
    pub stop_times: usize,
    pub calendars: usize,
    pub calendar_dates: usize,
    pub rejected_journeys: usize,
}

impl Display for ConvertSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "converted {} journeys into {} trips with {} stop times ({} routes, {} stops, {} calendars, {} calendar dates, {} journeys rejected)",
            self.journeys,
            self.trips,
            self.stop_times,
            self.routes,
            self.stops,
            self.calendars,
            self.calendar_dates,
            self.rejected_journeys
        )
    }
}

/// runs the full conversion: every journey in the index, visited in id order
/// so the swap heuristic's reference stop is deterministic for a given feed.
/// journey-level rejections are diagnostics; any returned error is fatal for
/// the whole run.
pub fn convert(
    index: &Vdv452Index,
    dao: &mut GtfsDao,
    config: &ConvertConfig,
) -> Result<ConvertSummary, TransformError> {
    let journeys = index.journeys().sorted_by_key(|j| j.id).collect_vec();
    let total = journeys.len();
    let mut engine = Vdv452ToGtfs::new(index, dao, config);
    for journey in tqdm!(journeys.into_iter(), desc = "converting journeys", total = total) {
        engine.trip_for_journey(journey)?;
    }
    let rejected_journeys = engine.rejected_journeys();
    Ok(ConvertSummary {
        journeys: total,
        agencies: dao.agencies.len(),
        routes: dao.routes.len(),
        trips: dao.trips.len(),
        stops: dao.stops.len(),
        stop_times: dao.stop_times.len(),
        calendars: dao.calendars.len(),
        calendar_dates: dao.calendar_dates.len(),
        rejected_journeys,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use chrono::NaiveDate;
    use vdv452::model::{
        Destination, JourneyWaitTime, Line, Period, RouteSequenceEntry, Stop as VdvStop,
        StopPoint, TransportCompany, TravelTime, Vdv452Record, WaitTime,
    };

    use super::*;
    use crate::gtfs::CalendarEntity;

    fn vid(id: u64) -> VersionedId {
        VersionedId::new(id, 1)
    }

    fn lid(id: u64) -> LineId {
        LineId::new(id, 1)
    }

    fn sid(id: u64) -> StopId {
        StopId::new(PointType::Stop, id)
    }

    fn did(id: u64) -> StopId {
        StopId::new(PointType::Depot, id)
    }

    fn config() -> ConvertConfig {
        ConvertConfig::new("Europe/Berlin".parse().expect("valid time zone"))
    }

    struct Feed {
        index: Vdv452Index,
    }

    impl Feed {
        fn new() -> Feed {
            let mut feed = Feed {
                index: Vdv452Index::new(),
            };
            feed.add(Vdv452Record::TransportCompany(TransportCompany {
                id: vid(7),
                name: "Stadtwerke".to_string(),
            }));
            feed
        }

        fn add(&mut self, record: Vdv452Record) {
            self.index.add_record(record);
        }

        fn stop(&mut self, id: StopId, name: &str, lng: f64, lat: f64) {
            self.add(Vdv452Record::Stop(VdvStop {
                id,
                name: name.to_string(),
                ref_name: None,
                zone: None,
                lat,
                lng,
            }));
            self.add(Vdv452Record::StopPoint(StopPoint { id }));
        }

        fn sequence(&mut self, line: LineId, position: u32, stop: Option<StopId>) {
            self.add(Vdv452Record::RouteSequence(RouteSequenceEntry {
                line,
                position,
                stop,
                destination: None,
            }));
        }

        fn travel(&mut self, group: VersionedId, from: StopId, to: StopId, seconds: u32) {
            self.add(Vdv452Record::TravelTime(TravelTime {
                timing_group: group,
                from_stop: from,
                to_stop: to,
                duration_seconds: seconds,
            }));
        }

        fn journey(&mut self, id: u64, trip_type: u32) -> Journey {
            let journey = Journey {
                id: vid(id),
                line: lid(4),
                timing_group: vid(2),
                day_type: vid(1),
                departure_seconds: 49080,
                trip_type,
                service_type: 1,
            };
            self.add(Vdv452Record::Journey(journey.clone()));
            journey
        }
    }

    /// line 4: three passenger stops around Berlin, a headsign on the first
    /// sequence entry only, a 60s dwell at the middle stop, and one monday
    /// journey departing at 13:38.
    fn base_feed() -> Feed {
        let mut feed = Feed::new();
        feed.stop(sid(100), "Rathaus", 13.40, 52.50);
        feed.stop(sid(200), "Markt", 13.42, 52.52);
        feed.stop(sid(300), "Hauptbahnhof", 13.44, 52.54);
        feed.add(Vdv452Record::Line(Line {
            id: lid(4),
            short_name: Some("3".to_string()),
            long_name: Some("Linie 3".to_string()),
        }));
        feed.add(Vdv452Record::Destination(Destination::new(
            vid(9),
            "Hauptbahnhof",
        )));
        feed.add(Vdv452Record::RouteSequence(RouteSequenceEntry {
            line: lid(4),
            position: 1,
            stop: Some(sid(100)),
            destination: Some(vid(9)),
        }));
        feed.sequence(lid(4), 2, Some(sid(200)));
        feed.sequence(lid(4), 3, Some(sid(300)));
        feed.travel(vid(2), sid(100), sid(200), 120);
        feed.travel(vid(2), sid(200), sid(300), 180);
        feed.add(Vdv452Record::WaitTime(WaitTime {
            timing_group: vid(2),
            stop: sid(200),
            duration_seconds: 60,
        }));
        feed.add(Vdv452Record::Period(Period {
            day_type: vid(1),
            date: NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date"),
        }));
        feed.add(Vdv452Record::Period(Period {
            day_type: vid(1),
            date: NaiveDate::from_ymd_opt(2025, 6, 9).expect("valid date"),
        }));
        feed
    }

    #[test]
    fn test_trip_resolution_is_idempotent() {
        let mut feed = base_feed();
        let journey = feed.journey(1975, 1);
        let mut dao = GtfsDao::new();
        let mut engine = Vdv452ToGtfs::new(&feed.index, &mut dao, &config());
        let first = engine.trip_for_journey(&journey).expect("conversion");
        let second = engine.trip_for_journey(&journey).expect("conversion");
        assert_eq!(first, second);
        assert_eq!(dao.trips.len(), 1);
        assert_eq!(dao.routes.len(), 1);
        assert_eq!(dao.agencies.len(), 1);
        assert_eq!(dao.stop_times.len(), 3);
    }

    #[test]
    fn test_zero_or_two_transport_companies_fail_fast() {
        let mut empty = Vdv452Index::new();
        empty.add_record(Vdv452Record::Line(Line {
            id: lid(4),
            short_name: None,
            long_name: None,
        }));
        let mut dao = GtfsDao::new();
        let mut engine = Vdv452ToGtfs::new(&empty, &mut dao, &config());
        assert!(matches!(
            engine.agency(),
            Err(TransformError::NotExactlyOneTransportCompany(0))
        ));

        let mut feed = Feed::new();
        feed.add(Vdv452Record::TransportCompany(TransportCompany {
            id: vid(8),
            name: "Regionalverkehr".to_string(),
        }));
        let mut dao = GtfsDao::new();
        let mut engine = Vdv452ToGtfs::new(&feed.index, &mut dao, &config());
        assert!(matches!(
            engine.agency(),
            Err(TransformError::NotExactlyOneTransportCompany(2))
        ));
    }

    #[test]
    fn test_agency_resolution_with_single_company() {
        let feed = Feed::new();
        let mut dao = GtfsDao::new();
        let mut engine = Vdv452ToGtfs::new(&feed.index, &mut dao, &config());
        let agency = engine.agency().expect("agency should resolve");
        assert_eq!(agency.agency_id, "7");
        assert_eq!(agency.agency_name, "Stadtwerke");
        assert_eq!(agency.agency_timezone, "Europe/Berlin");
        assert_eq!(agency.agency_lang, "de");
        engine.agency().expect("agency should resolve again");
        assert_eq!(dao.agencies.len(), 1);
    }

    #[test]
    fn test_zero_travel_time_journey_is_rejected() {
        let mut feed = base_feed();
        // overwrite both legs with zero durations (last insert wins)
        feed.travel(vid(2), sid(100), sid(200), 0);
        feed.travel(vid(2), sid(200), sid(300), 0);
        let journey = feed.journey(1975, 1);
        let mut dao = GtfsDao::new();
        let mut engine = Vdv452ToGtfs::new(&feed.index, &mut dao, &config());
        engine.trip_for_journey(&journey).expect("conversion");
        assert_eq!(engine.rejected_journeys(), 1);
        assert_eq!(dao.trips.len(), 0);
        assert!(dao.stop_times.is_empty());
    }

    #[test]
    fn test_single_passenger_stop_journey_is_rejected() {
        let mut feed = Feed::new();
        feed.stop(sid(100), "Rathaus", 13.40, 52.50);
        feed.stop(did(150), "Betriebshof", 13.41, 52.51);
        feed.add(Vdv452Record::Line(Line {
            id: lid(4),
            short_name: None,
            long_name: None,
        }));
        feed.sequence(lid(4), 1, Some(sid(100)));
        feed.sequence(lid(4), 2, Some(did(150)));
        feed.travel(vid(2), sid(100), did(150), 120);
        let journey = feed.journey(2455, 1);
        let mut dao = GtfsDao::new();
        let mut engine = Vdv452ToGtfs::new(&feed.index, &mut dao, &config());
        engine.trip_for_journey(&journey).expect("conversion");
        assert_eq!(dao.trips.len(), 0);
        assert!(dao.stop_times.is_empty());
    }

    #[test]
    fn test_swapped_coordinates_are_corrected() {
        let mut feed = base_feed();
        // transposed axes: more than 10 degrees off the reference on both
        feed.stop(sid(200), "Markt", 52.52, 13.41);
        let journey = feed.journey(1975, 1);
        let mut dao = GtfsDao::new();
        let mut engine = Vdv452ToGtfs::new(&feed.index, &mut dao, &config());
        engine.trip_for_journey(&journey).expect("conversion");
        let stop = dao.stops.get("200").expect("stop should be persisted");
        assert!((stop.stop_lon - 13.41).abs() < 1e-9);
        assert!((stop.stop_lat - 52.52).abs() < 1e-9);
    }

    #[test]
    fn test_zero_coordinate_stop_is_not_persisted() {
        let mut feed = base_feed();
        feed.stop(sid(300), "Hauptbahnhof", 13.44, 0.0);
        let journey = feed.journey(1975, 1);
        let mut dao = GtfsDao::new();
        let mut engine = Vdv452ToGtfs::new(&feed.index, &mut dao, &config());
        engine.trip_for_journey(&journey).expect("conversion");
        assert!(dao.stops.get("300").is_none());
        assert_eq!(dao.trips.len(), 1);
        // the zero-coordinate stop contributes no stop time
        assert_eq!(dao.stop_times.len(), 2);
        assert!(dao.stop_times.iter().all(|st| st.stop_id != "300"));
    }

    struct CountingMinimizer {
        calls: Rc<Cell<usize>>,
    }

    impl CalendarMinimizer for CountingMinimizer {
        fn entities_for_service_dates(
            &self,
            service_id: &str,
            dates: &BTreeSet<NaiveDate>,
        ) -> Vec<CalendarEntity> {
            self.calls.set(self.calls.get() + 1);
            MajorityPatternMinimizer.entities_for_service_dates(service_id, dates)
        }
    }

    #[test]
    fn test_calendar_entities_created_once_per_day_type() {
        let mut feed = base_feed();
        let first = feed.journey(1975, 1);
        let second = feed.journey(1976, 1);
        let calls = Rc::new(Cell::new(0));
        let mut dao = GtfsDao::new();
        let mut engine = Vdv452ToGtfs::new(&feed.index, &mut dao, &config()).with_minimizer(
            Box::new(CountingMinimizer {
                calls: calls.clone(),
            }),
        );
        let first_trip = engine.trip_for_journey(&first).expect("conversion");
        let second_trip = engine.trip_for_journey(&second).expect("conversion");
        assert_eq!(calls.get(), 1);
        assert_eq!(first_trip.service_id, second_trip.service_id);
        assert_eq!(dao.calendars.len(), 1);
    }

    #[test]
    fn test_headsign_taken_from_first_sequence_entry() {
        let mut feed = base_feed();
        let journey = feed.journey(1975, 1);
        let mut dao = GtfsDao::new();
        let mut engine = Vdv452ToGtfs::new(&feed.index, &mut dao, &config());
        let trip = engine.trip_for_journey(&journey).expect("conversion");
        assert_eq!(trip.trip_headsign.as_deref(), Some("Hauptbahnhof"));
    }

    #[test]
    fn test_stop_time_clock_arithmetic() {
        let mut feed = base_feed();
        let journey = feed.journey(1975, 1);
        let mut dao = GtfsDao::new();
        let mut engine = Vdv452ToGtfs::new(&feed.index, &mut dao, &config());
        engine.trip_for_journey(&journey).expect("conversion");
        // departs T=49080; waits [0, 60, 0]; travels [120, 180]
        let times: Vec<(u32, u32, u32)> = dao
            .stop_times
            .iter()
            .map(|st| (st.stop_sequence, st.arrival_time, st.departure_time))
            .collect();
        assert_eq!(
            times,
            vec![
                (0, 49080, 49080),
                (1, 49200, 49260),
                (2, 49440, 49440),
            ]
        );
    }

    #[test]
    fn test_journey_wait_time_extends_dwell() {
        let mut feed = base_feed();
        let journey = feed.journey(1975, 1);
        feed.add(Vdv452Record::JourneyWaitTime(JourneyWaitTime {
            journey: vid(1975),
            stop: sid(200),
            duration_seconds: 30,
        }));
        let mut dao = GtfsDao::new();
        let mut engine = Vdv452ToGtfs::new(&feed.index, &mut dao, &config());
        engine.trip_for_journey(&journey).expect("conversion");
        let middle = &dao.stop_times[1];
        assert_eq!(middle.arrival_time, 49200);
        assert_eq!(middle.departure_time, 49290);
        // the extra dwell shifts the rest of the journey
        assert_eq!(dao.stop_times[2].arrival_time, 49470);
    }

    #[test]
    fn test_depot_entry_keeps_sequence_numbering() {
        let mut feed = Feed::new();
        feed.stop(sid(100), "Rathaus", 13.40, 52.50);
        feed.stop(did(150), "Betriebshof", 13.41, 52.51);
        feed.stop(sid(300), "Hauptbahnhof", 13.44, 52.54);
        feed.add(Vdv452Record::Line(Line {
            id: lid(4),
            short_name: None,
            long_name: None,
        }));
        feed.sequence(lid(4), 1, Some(sid(100)));
        feed.sequence(lid(4), 2, Some(did(150)));
        feed.sequence(lid(4), 3, Some(sid(300)));
        feed.travel(vid(2), sid(100), did(150), 120);
        feed.travel(vid(2), did(150), sid(300), 180);
        let journey = feed.journey(2455, 1);
        let mut dao = GtfsDao::new();
        let mut engine = Vdv452ToGtfs::new(&feed.index, &mut dao, &config());
        engine.trip_for_journey(&journey).expect("conversion");
        assert_eq!(dao.trips.len(), 1);
        let sequences: Vec<u32> = dao.stop_times.iter().map(|st| st.stop_sequence).collect();
        // the depot position is filtered, not renumbered
        assert_eq!(sequences, vec![0, 2]);
        assert!(dao.stops.get("150").is_none());
    }

    #[test]
    fn test_non_normal_trip_type_is_built_but_not_saved() {
        let mut feed = base_feed();
        let journey = feed.journey(1975, 7);
        let mut dao = GtfsDao::new();
        let mut engine = Vdv452ToGtfs::new(&feed.index, &mut dao, &config());
        let trip = engine.trip_for_journey(&journey).expect("conversion");
        assert_eq!(trip.trip_id, "1975");
        assert_eq!(dao.trips.len(), 0);
        assert!(dao.stop_times.is_empty());
    }

    #[test]
    fn test_missing_travel_time_pair_is_fatal() {
        let mut feed = base_feed();
        let journey = Journey {
            timing_group: vid(99),
            ..feed.journey(1975, 1)
        };
        feed.add(Vdv452Record::Journey(journey.clone()));
        let mut dao = GtfsDao::new();
        let mut engine = Vdv452ToGtfs::new(&feed.index, &mut dao, &config());
        assert!(matches!(
            engine.trip_for_journey(&journey),
            Err(TransformError::MissingTravelTime { .. })
        ));
    }

    #[test]
    fn test_unknown_stop_is_fatal() {
        let mut feed = base_feed();
        feed.sequence(lid(4), 4, Some(sid(999)));
        feed.travel(vid(2), sid(300), sid(999), 60);
        let journey = feed.journey(1975, 1);
        let mut dao = GtfsDao::new();
        let mut engine = Vdv452ToGtfs::new(&feed.index, &mut dao, &config());
        assert!(matches!(
            engine.trip_for_journey(&journey),
            Err(TransformError::UnknownStop(_))
        ));
    }

    #[test]
    fn test_convert_processes_whole_feed() {
        let mut feed = base_feed();
        feed.journey(1975, 1);
        feed.journey(1976, 1);
        let mut dao = GtfsDao::new();
        let summary = convert(&feed.index, &mut dao, &config()).expect("conversion");
        assert_eq!(summary.journeys, 2);
        assert_eq!(summary.trips, 2);
        assert_eq!(summary.stop_times, 6);
        assert_eq!(summary.rejected_journeys, 0);
        assert_eq!(summary.calendars, 1);
    }
}
