//! VDV452 transit schedule data.
//!
//! VDV452 is a German-origin interchange format for public transit planning
//! data: lines, journeys, stop sequences, timing groups, and service-day
//! calendars. This crate provides the typed record model, an in-memory
//! read-only index over a complete feed, and a reader for the `.x10`
//! interchange files the format is distributed in.
pub mod error;
pub mod index;
pub mod model;
pub mod read;
