use super::VersionedId;

/// the operating company of a feed (ZUL_VERKEHRSBETRIEB). a feed is expected
/// to carry exactly one; multi-operator feeds are unsupported downstream.
#[derive(Clone, Debug)]
pub struct TransportCompany {
    pub id: VersionedId,
    pub name: String,
}
