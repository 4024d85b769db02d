use super::{
    DayType, Destination, Journey, JourneyWaitTime, Line, Period, RouteSequenceEntry, Stop,
    StopPoint, TimingGroup, TransportCompany, TravelTime, WaitTime,
};

/// the closed set of VDV452 record kinds recognized by the source index.
/// readers dispatch every parsed row into one of these variants; tables with
/// no counterpart here are skipped at read time.
#[derive(Clone, Debug)]
pub enum Vdv452Record {
    TransportCompany(TransportCompany),
    DayType(DayType),
    Period(Period),
    TimingGroup(TimingGroup),
    Stop(Stop),
    StopPoint(StopPoint),
    Line(Line),
    Destination(Destination),
    RouteSequence(RouteSequenceEntry),
    TravelTime(TravelTime),
    WaitTime(WaitTime),
    JourneyWaitTime(JourneyWaitTime),
    Journey(Journey),
}
