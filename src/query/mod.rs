//! Profile queries: route towards a destination, then unpack journeys.

pub mod csa;
pub mod extract;
pub mod profile;

use chrono::NaiveDate;

pub use profile::{Profile, ProfileBuilder};

use crate::journey::Journey;
use crate::timetable::Timetable;

/// Computes the profile of Pareto-optimal journeys from every station to
/// `dest_station_id` on the given day.
pub fn route<T: Timetable + ?Sized>(
    timetable: &T,
    date: NaiveDate,
    dest_station_id: usize,
) -> Profile<'_, T> {
    csa::Router::new(timetable).profile(date, dest_station_id)
}

/// Unpacks every Pareto-optimal journey departing from the given station.
pub fn extract_journeys<T: Timetable + ?Sized>(
    profile: &Profile<'_, T>,
    dep_station_id: usize,
) -> Vec<Journey> {
    extract::journeys(profile, dep_station_id)
}
