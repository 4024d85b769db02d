use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::gtfs::{CalendarEntity, ExceptionType, ServiceCalendar, ServiceCalendarDate};

/// compacts a set of concrete service dates into calendar rows. the output
/// is upserted verbatim by the transformation engine.
pub trait CalendarMinimizer {
    fn entities_for_service_dates(
        &self,
        service_id: &str,
        dates: &BTreeSet<NaiveDate>,
    ) -> Vec<CalendarEntity>;
}

/// derives a weekly pattern by majority: a weekday joins the pattern when it
/// is served on more than half of its occurrences between the first and last
/// service date. dates disagreeing with the pattern become exception rows.
#[derive(Default)]
pub struct MajorityPatternMinimizer;

impl CalendarMinimizer for MajorityPatternMinimizer {
    fn entities_for_service_dates(
        &self,
        service_id: &str,
        dates: &BTreeSet<NaiveDate>,
    ) -> Vec<CalendarEntity> {
        let (Some(&start), Some(&end)) = (dates.first(), dates.last()) else {
            return Vec::new();
        };

        // weekday slots indexed monday..sunday
        let mut occurrences = [0u32; 7];
        let mut served = [0u32; 7];
        for day in start.iter_days().take_while(|d| *d <= end) {
            let slot = day.weekday().num_days_from_monday() as usize;
            occurrences[slot] += 1;
            if dates.contains(&day) {
                served[slot] += 1;
            }
        }
        let mut pattern = [false; 7];
        for slot in 0..7 {
            pattern[slot] = served[slot] * 2 > occurrences[slot];
        }

        let mut entities = Vec::new();
        if pattern.iter().any(|&p| p) {
            entities.push(CalendarEntity::Calendar(ServiceCalendar {
                service_id: service_id.to_string(),
                monday: pattern[0] as u8,
                tuesday: pattern[1] as u8,
                wednesday: pattern[2] as u8,
                thursday: pattern[3] as u8,
                friday: pattern[4] as u8,
                saturday: pattern[5] as u8,
                sunday: pattern[6] as u8,
                start_date: start,
                end_date: end,
            }));
        }
        for day in start.iter_days().take_while(|d| *d <= end) {
            let in_pattern = pattern[day.weekday().num_days_from_monday() as usize];
            let is_served = dates.contains(&day);
            let exception_type = match (in_pattern, is_served) {
                (true, false) => ExceptionType::Removed,
                (false, true) => ExceptionType::Added,
                _ => continue,
            };
            entities.push(CalendarEntity::CalendarDate(ServiceCalendarDate {
                service_id: service_id.to_string(),
                date: day,
                exception_type,
            }));
        }
        entities
    }
}
