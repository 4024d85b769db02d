use std::collections::HashMap;

use super::model::{
    Agency, CalendarEntity, Route, ServiceCalendar, ServiceCalendarDate, Stop, StopTime, Trip,
};

/// a GTFS entity addressable by id. calendar rows use composite keys, so the
/// key is computed rather than borrowed.
pub trait GtfsEntity {
    fn entity_id(&self) -> String;
}

impl GtfsEntity for Agency {
    fn entity_id(&self) -> String {
        self.agency_id.clone()
    }
}

impl GtfsEntity for Route {
    fn entity_id(&self) -> String {
        self.route_id.clone()
    }
}

impl GtfsEntity for Stop {
    fn entity_id(&self) -> String {
        self.stop_id.clone()
    }
}

impl GtfsEntity for Trip {
    fn entity_id(&self) -> String {
        self.trip_id.clone()
    }
}

impl GtfsEntity for ServiceCalendar {
    fn entity_id(&self) -> String {
        self.service_id.clone()
    }
}

impl GtfsEntity for ServiceCalendarDate {
    fn entity_id(&self) -> String {
        format!("{}:{}", self.service_id, self.date)
    }
}

/// id-keyed store preserving insertion order for stable file output.
pub struct EntityStore<T> {
    entities: Vec<T>,
    positions: HashMap<String, usize>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        EntityStore {
            entities: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<T: GtfsEntity> EntityStore<T> {
    pub fn get(&self, id: &str) -> Option<&T> {
        self.positions.get(id).map(|&i| &self.entities[i])
    }

    /// inserts a new entity. an entity with the same id must not already
    /// exist; callers guarantee this via lookup-before-create.
    pub fn save(&mut self, entity: T) {
        let id = entity.entity_id();
        debug_assert!(!self.positions.contains_key(&id), "duplicate save for {id}");
        self.positions.insert(id, self.entities.len());
        self.entities.push(entity);
    }

    /// inserts or replaces the entity with the same id.
    pub fn save_or_update(&mut self, entity: T) {
        match self.positions.get(&entity.entity_id()) {
            Some(&i) => self.entities[i] = entity,
            None => self.save(entity),
        }
    }

    pub fn entities(&self) -> &[T] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// in-memory GTFS output store. entities are looked up by id before creation
/// and written once; only calendar rows support upsert, since a minimized
/// service expands to several related rows.
#[derive(Default)]
pub struct GtfsDao {
    pub agencies: EntityStore<Agency>,
    pub stops: EntityStore<Stop>,
    pub routes: EntityStore<Route>,
    pub trips: EntityStore<Trip>,
    pub stop_times: Vec<StopTime>,
    pub calendars: EntityStore<ServiceCalendar>,
    pub calendar_dates: EntityStore<ServiceCalendarDate>,
}

impl GtfsDao {
    pub fn new() -> GtfsDao {
        GtfsDao::default()
    }

    pub fn save_or_update_calendar_entity(&mut self, entity: CalendarEntity) {
        match entity {
            CalendarEntity::Calendar(calendar) => self.calendars.save_or_update(calendar),
            CalendarEntity::CalendarDate(date) => self.calendar_dates.save_or_update(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agency(id: &str, name: &str) -> Agency {
        Agency {
            agency_id: id.to_string(),
            agency_name: name.to_string(),
            agency_url: "https://example.com".to_string(),
            agency_timezone: "Europe/Berlin".to_string(),
            agency_lang: "de".to_string(),
        }
    }

    #[test]
    fn test_store_preserves_insertion_order() {
        let mut store = EntityStore::default();
        store.save(agency("2", "b"));
        store.save(agency("1", "a"));
        let ids: Vec<&str> = store
            .entities()
            .iter()
            .map(|a| a.agency_id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_save_or_update_replaces_in_place() {
        let mut store = EntityStore::default();
        store.save(agency("1", "before"));
        store.save_or_update(agency("1", "after"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("1").map(|a| a.agency_name.as_str()), Some("after"));
    }
}
