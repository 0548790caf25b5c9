//! Per-station frontiers for one destination and one service day.

use chrono::NaiveDate;

use crate::pareto::{FrontBuilder, ParetoFront};
use crate::timetable::{check_index, Connections, Timetable, Trips};

/// The finished result of a profile query: for every station, the Pareto
/// frontier of journeys to the destination. Immutable once built.
#[derive(Debug)]
pub struct Profile<'a, T: Timetable + ?Sized> {
    timetable: &'a T,
    date: NaiveDate,
    dest_station_id: usize,
    station_fronts: Vec<ParetoFront>,
}

impl<'a, T: Timetable + ?Sized> Profile<'a, T> {
    pub fn timetable(&self) -> &'a T {
        self.timetable
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn dest_station_id(&self) -> usize {
        self.dest_station_id
    }

    pub fn connections(&self) -> &'a dyn Connections {
        self.timetable.connections_for(self.date)
    }

    pub fn trips(&self) -> &'a dyn Trips {
        self.timetable.trips_for(self.date)
    }

    /// Frontier of the given station; the empty frontier if the destination
    /// cannot be reached from it. Panics on an out-of-range id.
    pub fn for_station(&self, station_id: usize) -> &ParetoFront {
        check_index(self.station_fronts.len(), station_id);
        &self.station_fronts[station_id]
    }
}

/// Mutable frontier slots used while the router scans the day.
///
/// Station and trip slots start out unset; the router creates each frontier
/// the first time it writes to it. Each query owns its builder, nothing here
/// is shared.
#[derive(Debug)]
pub struct ProfileBuilder<'a, T: Timetable + ?Sized> {
    timetable: &'a T,
    date: NaiveDate,
    dest_station_id: usize,
    station_fronts: Vec<Option<FrontBuilder>>,
    trip_fronts: Vec<Option<FrontBuilder>>,
}

impl<'a, T: Timetable + ?Sized> ProfileBuilder<'a, T> {
    pub fn new(timetable: &'a T, date: NaiveDate, dest_station_id: usize) -> Self {
        let station_count = timetable.stations().size();
        let trip_count = timetable.trips_for(date).size();
        check_index(station_count, dest_station_id);
        ProfileBuilder {
            timetable,
            date,
            dest_station_id,
            station_fronts: vec![None; station_count],
            trip_fronts: vec![None; trip_count],
        }
    }

    pub fn for_station(&self, station_id: usize) -> Option<&FrontBuilder> {
        check_index(self.station_fronts.len(), station_id);
        self.station_fronts[station_id].as_ref()
    }

    pub fn for_station_mut(&mut self, station_id: usize) -> Option<&mut FrontBuilder> {
        check_index(self.station_fronts.len(), station_id);
        self.station_fronts[station_id].as_mut()
    }

    pub fn set_for_station(&mut self, station_id: usize, front: FrontBuilder) {
        check_index(self.station_fronts.len(), station_id);
        self.station_fronts[station_id] = Some(front);
    }

    pub fn for_trip(&self, trip_id: usize) -> Option<&FrontBuilder> {
        check_index(self.trip_fronts.len(), trip_id);
        self.trip_fronts[trip_id].as_ref()
    }

    pub fn for_trip_mut(&mut self, trip_id: usize) -> Option<&mut FrontBuilder> {
        check_index(self.trip_fronts.len(), trip_id);
        self.trip_fronts[trip_id].as_mut()
    }

    pub fn set_for_trip(&mut self, trip_id: usize, front: FrontBuilder) {
        check_index(self.trip_fronts.len(), trip_id);
        self.trip_fronts[trip_id] = Some(front);
    }

    /// Freezes the builder, substituting the empty frontier for every
    /// station the scan never reached. Trip frontiers are scan-internal and
    /// are discarded.
    pub fn build(self) -> Profile<'a, T> {
        Profile {
            timetable: self.timetable,
            date: self.date,
            dest_station_id: self.dest_station_id,
            station_fronts: self
                .station_fronts
                .into_iter()
                .map(|slot| slot.map_or(ParetoFront::EMPTY, |front| front.build()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::Vehicle;
    use crate::timetable::memory::InMemoryTimetable;

    fn timetable() -> InMemoryTimetable {
        let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let mut builder = InMemoryTimetable::builder(day);
        let a = builder.station("station1", 6.57, 46.52);
        let b = builder.station("station2", 6.64, 46.53);
        let route = builder.route("route1", Vehicle::Train);
        let trip = builder.trip(route, "station2");
        builder.connection(trip, a, 480, b, 490);
        builder.build().unwrap()
    }

    #[test]
    fn slots_start_unset() {
        let tt = timetable();
        let builder = ProfileBuilder::new(&tt, tt.date(), 1);
        assert!(builder.for_station(0).is_none());
        assert!(builder.for_trip(0).is_none());
    }

    #[test]
    fn slots_can_be_installed_and_replaced() {
        let tt = timetable();
        let mut builder = ProfileBuilder::new(&tt, tt.date(), 1);
        let mut front = FrontBuilder::new();
        front.add_packed(500, 0, 7);
        builder.set_for_station(0, front);
        assert_eq!(builder.for_station(0).unwrap().size(), 1);
        builder.for_station_mut(0).unwrap().add_packed(490, 0, 8);
        assert_eq!(builder.for_station(0).unwrap().size(), 1);
        builder.set_for_station(0, FrontBuilder::new());
        assert!(builder.for_station(0).unwrap().is_empty());
    }

    #[test]
    fn build_fills_untouched_stations_with_empty() {
        let tt = timetable();
        let mut builder = ProfileBuilder::new(&tt, tt.date(), 1);
        let mut front = FrontBuilder::new();
        front.add_packed(500, 0, 7);
        builder.set_for_station(0, front);
        let profile = builder.build();
        assert_eq!(profile.for_station(0).size(), 1);
        assert!(profile.for_station(1).is_empty());
        assert_eq!(profile.dest_station_id(), 1);
    }

    #[test]
    fn accessors_delegate_to_the_timetable() {
        let tt = timetable();
        let profile = ProfileBuilder::new(&tt, tt.date(), 1).build();
        assert_eq!(profile.connections().size(), 1);
        assert_eq!(profile.trips().size(), 1);
        assert_eq!(profile.date(), tt.date());
    }

    #[test]
    #[should_panic]
    fn station_lookup_is_checked() {
        let tt = timetable();
        ProfileBuilder::new(&tt, tt.date(), 1).build().for_station(5);
    }

    #[test]
    #[should_panic]
    fn trip_slot_lookup_is_checked() {
        let tt = timetable();
        ProfileBuilder::new(&tt, tt.date(), 1).for_trip(3);
    }
}
