mod destination;
mod journey;
mod journey_wait_time;
mod line;
mod period;
mod record;
mod route_sequence;
mod stop;
mod stop_id;
mod stop_point;
mod timing_group;
mod transport_company;
mod travel_time;
mod versioned_id;
mod wait_time;

pub use destination::Destination;
pub use journey::Journey;
pub use journey_wait_time::JourneyWaitTime;
pub use line::{Line, LineId};
pub use period::{DayType, Period};
pub use record::Vdv452Record;
pub use route_sequence::RouteSequenceEntry;
pub use stop::Stop;
pub use stop_id::{PointType, StopId};
pub use stop_point::StopPoint;
pub use timing_group::TimingGroup;
pub use transport_company::TransportCompany;
pub use travel_time::TravelTime;
pub use versioned_id::VersionedId;
pub use wait_time::WaitTime;
