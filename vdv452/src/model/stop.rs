use super::StopId;

/// a location record (REC_ORT): a passenger stop, depot, or other waypoint,
/// with decimal WGS84 coordinates. zero-valued coordinates mean "unset".
#[derive(Clone, Debug)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    /// alternate rider-facing name (ORT_REF_ORT_NAME), when the feed sets one.
    pub ref_name: Option<String>,
    /// fare zone ("Wabe"), carried through to GTFS zone_id.
    pub zone: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

impl Stop {
    /// the name to publish: ORT_NAME, falling back to the reference name for
    /// records where only ORT_REF_ORT_NAME is filled in.
    pub fn preferred_name(&self) -> &str {
        if self.name.is_empty() {
            if let Some(ref_name) = &self.ref_name {
                return ref_name;
            }
        }
        &self.name
    }
}
