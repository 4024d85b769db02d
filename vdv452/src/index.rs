use std::cell::OnceCell;
use std::collections::HashMap;

use crate::model::{
    DayType, Destination, Journey, JourneyWaitTime, Line, LineId, Period, RouteSequenceEntry,
    Stop, StopId, StopPoint, TimingGroup, TransportCompany, TravelTime, Vdv452Record, VersionedId,
    WaitTime,
};

/// read-only, indexed access over a complete VDV452 record set.
///
/// records are inserted once via [`Vdv452Index::add_record`] and never mutated
/// or removed afterwards. grouped views (periods by day type, travel times by
/// timing group, ...) are built on first access and cached for the lifetime of
/// the index; since the record set is complete before the first lookup, the
/// caches never go stale.
#[derive(Default)]
pub struct Vdv452Index {
    transport_companies: Vec<TransportCompany>,
    day_types: HashMap<VersionedId, DayType>,
    periods: Vec<Period>,
    timing_groups: HashMap<VersionedId, TimingGroup>,
    stops: HashMap<StopId, Stop>,
    stop_points: HashMap<StopId, StopPoint>,
    lines: HashMap<LineId, Line>,
    destinations: HashMap<VersionedId, Destination>,
    journeys: HashMap<VersionedId, Journey>,
    route_sequences: Vec<RouteSequenceEntry>,
    travel_times: Vec<TravelTime>,
    wait_times: Vec<WaitTime>,
    journey_wait_times: Vec<JourneyWaitTime>,

    periods_by_day_type: OnceCell<HashMap<VersionedId, Vec<Period>>>,
    travel_times_by_timing_group: OnceCell<HashMap<VersionedId, HashMap<(StopId, StopId), TravelTime>>>,
    wait_times_by_timing_group: OnceCell<HashMap<VersionedId, Vec<WaitTime>>>,
    route_sequences_by_line: OnceCell<HashMap<LineId, Vec<RouteSequenceEntry>>>,
    journey_wait_times_by_journey: OnceCell<HashMap<VersionedId, Vec<JourneyWaitTime>>>,
    empty_travel_times: OnceCell<HashMap<(StopId, StopId), TravelTime>>,
}

impl Vdv452Index {
    pub fn new() -> Vdv452Index {
        Vdv452Index::default()
    }

    /// files this record under its kind. id-keyed kinds overwrite a previous
    /// record with the same id; list-shaped kinds append.
    pub fn add_record(&mut self, record: Vdv452Record) {
        match record {
            Vdv452Record::TransportCompany(company) => {
                match self
                    .transport_companies
                    .iter_mut()
                    .find(|c| c.id == company.id)
                {
                    Some(existing) => *existing = company,
                    None => self.transport_companies.push(company),
                }
            }
            Vdv452Record::DayType(day_type) => {
                self.day_types.insert(day_type.id, day_type);
            }
            Vdv452Record::Period(period) => self.periods.push(period),
            Vdv452Record::TimingGroup(group) => {
                self.timing_groups.insert(group.id, group);
            }
            Vdv452Record::Stop(stop) => {
                self.stops.insert(stop.id, stop);
            }
            Vdv452Record::StopPoint(stop_point) => {
                self.stop_points.insert(stop_point.id, stop_point);
            }
            Vdv452Record::Line(line) => {
                self.lines.insert(line.id, line);
            }
            Vdv452Record::Destination(destination) => {
                self.destinations.insert(destination.id, destination);
            }
            Vdv452Record::RouteSequence(entry) => self.route_sequences.push(entry),
            Vdv452Record::TravelTime(travel_time) => self.travel_times.push(travel_time),
            Vdv452Record::WaitTime(wait_time) => self.wait_times.push(wait_time),
            Vdv452Record::JourneyWaitTime(jwt) => self.journey_wait_times.push(jwt),
            Vdv452Record::Journey(journey) => {
                self.journeys.insert(journey.id, journey);
            }
        }
    }

    pub fn transport_companies(&self) -> &[TransportCompany] {
        &self.transport_companies
    }

    pub fn stop_by_id(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(&id)
    }

    pub fn stop_point_by_id(&self, id: StopId) -> Option<&StopPoint> {
        self.stop_points.get(&id)
    }

    pub fn line_by_id(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    pub fn day_type_by_id(&self, id: VersionedId) -> Option<&DayType> {
        self.day_types.get(&id)
    }

    pub fn timing_group_by_id(&self, id: VersionedId) -> Option<&TimingGroup> {
        self.timing_groups.get(&id)
    }

    pub fn destination_by_id(&self, id: VersionedId) -> Option<&Destination> {
        self.destinations.get(&id)
    }

    pub fn journey_by_id(&self, id: VersionedId) -> Option<&Journey> {
        self.journeys.get(&id)
    }

    pub fn journeys(&self) -> impl Iterator<Item = &Journey> {
        self.journeys.values()
    }

    pub fn journey_count(&self) -> usize {
        self.journeys.len()
    }

    /// the operating days recorded for a day type. empty when the day type
    /// has no calendar entries.
    pub fn periods_for_day_type(&self, day_type: VersionedId) -> &[Period] {
        let by_day_type = self.periods_by_day_type.get_or_init(|| {
            let mut grouped: HashMap<VersionedId, Vec<Period>> = HashMap::new();
            for period in &self.periods {
                grouped.entry(period.day_type).or_default().push(*period);
            }
            grouped
        });
        by_day_type
            .get(&day_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// travel times of a timing group, keyed by the directional
    /// (from, to) stop pair. a duplicate pair in the source overwrites the
    /// earlier entry (last one wins), with a warning.
    pub fn travel_times_for_timing_group(
        &self,
        timing_group: VersionedId,
    ) -> &HashMap<(StopId, StopId), TravelTime> {
        let by_group = self.travel_times_by_timing_group.get_or_init(|| {
            let mut grouped: HashMap<VersionedId, HashMap<(StopId, StopId), TravelTime>> =
                HashMap::new();
            for travel_time in &self.travel_times {
                let pair = (travel_time.from_stop, travel_time.to_stop);
                let by_pair = grouped.entry(travel_time.timing_group).or_default();
                if let Some(existing) = by_pair.insert(pair, travel_time.clone()) {
                    log::warn!(
                        "duplicate travel time for timing group {} pair {} -> {}: replacing {}s with {}s",
                        travel_time.timing_group,
                        travel_time.from_stop,
                        travel_time.to_stop,
                        existing.duration_seconds,
                        travel_time.duration_seconds
                    );
                }
            }
            grouped
        });
        by_group
            .get(&timing_group)
            .unwrap_or_else(|| self.empty_travel_times.get_or_init(HashMap::new))
    }

    pub fn wait_times_for_timing_group(&self, timing_group: VersionedId) -> &[WaitTime] {
        let by_group = self.wait_times_by_timing_group.get_or_init(|| {
            let mut grouped: HashMap<VersionedId, Vec<WaitTime>> = HashMap::new();
            for wait_time in &self.wait_times {
                grouped
                    .entry(wait_time.timing_group)
                    .or_default()
                    .push(wait_time.clone());
            }
            grouped
        });
        by_group
            .get(&timing_group)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// the stop sequence of a line, sorted by ordinal position.
    pub fn route_sequence_for_line(&self, line: LineId) -> &[RouteSequenceEntry] {
        let by_line = self.route_sequences_by_line.get_or_init(|| {
            let mut grouped: HashMap<LineId, Vec<RouteSequenceEntry>> = HashMap::new();
            for entry in &self.route_sequences {
                grouped.entry(entry.line).or_default().push(entry.clone());
            }
            for entries in grouped.values_mut() {
                entries.sort_by_key(|e| e.position);
            }
            grouped
        });
        by_line.get(&line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// journey-specific dwell overrides, empty for most journeys.
    pub fn wait_times_for_journey(&self, journey: VersionedId) -> &[JourneyWaitTime] {
        let by_journey = self.journey_wait_times_by_journey.get_or_init(|| {
            let mut grouped: HashMap<VersionedId, Vec<JourneyWaitTime>> = HashMap::new();
            for jwt in &self.journey_wait_times {
                grouped.entry(jwt.journey).or_default().push(jwt.clone());
            }
            grouped
        });
        by_journey
            .get(&journey)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
