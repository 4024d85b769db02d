use super::VersionedId;

/// a destination display record (REC_ZNR) carrying the headsign text shown on
/// the vehicle (HECKANZEIGETEXT).
#[derive(Clone, Debug)]
pub struct Destination {
    pub id: VersionedId,
    pub headsign: String,
}

impl Destination {
    /// builds a destination, normalizing display text: literal `\n` escapes
    /// become spaces and whitespace runs collapse to a single space.
    pub fn new(id: VersionedId, headsign: &str) -> Destination {
        let unescaped = headsign.replace("\\n", " ");
        let headsign = unescaped.split_whitespace().collect::<Vec<_>>().join(" ");
        Destination { id, headsign }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headsign_normalization() {
        let destination = Destination::new(VersionedId::new(7, 1), "Hauptbahnhof  \\n   Nord ");
        assert_eq!(destination.headsign, "Hauptbahnhof Nord");
    }
}
