use super::VersionedId;

/// a timing group (MENGE_FGR, "Fahrzeitgruppe"): a named bundle of travel and
/// wait durations shared by journeys with the same running pattern.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimingGroup {
    pub id: VersionedId,
}
