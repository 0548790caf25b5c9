//! Profile connection scan.
//!
//! One pass over the day's connections in decreasing departure time order
//! computes, for every station, the Pareto frontier of journeys to a fixed
//! destination. Scanning backwards in time means that whenever a connection
//! is processed, the frontiers of everything reachable after it are already
//! final, so each connection is settled exactly once.

use chrono::NaiveDate;
use tracing::debug;

use crate::bits;
use crate::criteria;
use crate::pareto::FrontBuilder;
use crate::query::profile::{Profile, ProfileBuilder};
use crate::timetable::{Connections, Timetable, Transfers};
use crate::types::Mtime;

pub struct Router<'a, T: Timetable + ?Sized> {
    timetable: &'a T,
}

impl<'a, T: Timetable + ?Sized> Router<'a, T> {
    pub fn new(timetable: &'a T) -> Router<'a, T> {
        Router { timetable }
    }

    /// Profile of all Pareto-optimal journeys to `dest_station_id` on the
    /// given day.
    pub fn profile(&self, date: NaiveDate, dest_station_id: usize) -> Profile<'a, T> {
        let connections = self.timetable.connections_for(date);
        let transfers = self.timetable.transfers();
        let mut profile = ProfileBuilder::new(self.timetable, date, dest_station_id);

        let walkable =
            walk_minutes_to(transfers, dest_station_id, self.timetable.stations().size());
        debug!(
            connections = connections.size(),
            destination = dest_station_id,
            "scanning day"
        );

        let mut settled = 0usize;
        for c in 0..connections.size() {
            let trip = connections.trip_id(c);
            let dep_station = self.timetable.station_id(connections.dep_stop_id(c));
            let arr_station = self.timetable.station_id(connections.arr_stop_id(c));
            let arr_mins = connections.arr_mins(c);

            let mut candidate = FrontBuilder::new();

            // Option 1: get off and walk to the destination.
            if let Some(walk) = walkable[arr_station] {
                candidate.add(criteria::pack(arr_mins + walk, 0, bits::pack_24_8(c as u32, 0)));
            }

            // Option 2: stay seated and use anything the rest of this trip
            // already reaches.
            if let Some(trip_front) = profile.for_trip(trip) {
                candidate.add_all(trip_front);
            }

            // Option 3: change vehicles at the arrival station, onto any
            // journey that departs no earlier than we arrive.
            if let Some(station_front) = profile.for_station(arr_station) {
                for label in station_front.iter() {
                    if criteria::dep_mins(label) >= arr_mins {
                        candidate.add(criteria::pack(
                            criteria::arr_mins(label),
                            criteria::changes(label) + 1,
                            bits::pack_24_8(c as u32, 0),
                        ));
                    }
                }
            }

            if candidate.is_empty() {
                continue;
            }

            match profile.for_trip_mut(trip) {
                Some(trip_front) => {
                    trip_front.add_all(&candidate);
                }
                None => profile.set_for_trip(trip, candidate.clone()),
            }

            let dep_mins = connections.dep_mins(c);
            if profile
                .for_station(dep_station)
                .is_some_and(|front| front.fully_dominates(&candidate, dep_mins))
            {
                continue;
            }
            settled += 1;

            // The payload a journey keeps is "board here, ride this many
            // hops", so labels inherited from later connections of the trip
            // are rewrapped onto this one before they spread to the
            // stations a footpath away.
            let rewrapped: Vec<u64> = candidate
                .iter()
                .filter(|&label| {
                    let first = bits::unpack_24(criteria::payload(label)) as usize;
                    connections.trip_id(first) == trip
                })
                .map(|label| {
                    let first = bits::unpack_24(criteria::payload(label)) as usize;
                    let hops = hops_between(connections, c, first);
                    criteria::with_payload(label, bits::pack_24_8(c as u32, hops))
                })
                .collect();

            let arriving = transfers.arriving_at(dep_station);
            for transfer in bits::range_start(arriving)..bits::range_end(arriving) {
                let deadline = dep_mins - transfers.minutes(transfer as usize);
                let from_station = transfers.dep_station_id(transfer as usize);
                for &label in &rewrapped {
                    let stamped = criteria::with_dep_mins(label, deadline);
                    match profile.for_station_mut(from_station) {
                        Some(front) => {
                            front.add(stamped);
                        }
                        None => {
                            let mut front = FrontBuilder::new();
                            front.add(stamped);
                            profile.set_for_station(from_station, front);
                        }
                    }
                }
            }
        }

        debug!(settled, "scan finished");
        profile.build()
    }
}

/// Walking minutes from every station to the destination, `None` where no
/// footpath exists. Station-to-itself entries of the transfer table count
/// like any other footpath.
fn walk_minutes_to(
    transfers: &dyn Transfers,
    dest_station_id: usize,
    station_count: usize,
) -> Vec<Option<Mtime>> {
    let mut walkable = vec![None; station_count];
    let arriving = transfers.arriving_at(dest_station_id);
    for transfer in bits::range_start(arriving)..bits::range_end(arriving) {
        walkable[transfers.dep_station_id(transfer as usize)] =
            Some(transfers.minutes(transfer as usize));
    }
    walkable
}

/// Number of steps from `from` to `to` along the trip's cyclic next
/// pointers. Both connections must belong to the same trip, which bounds
/// the walk by the trip length.
fn hops_between(connections: &dyn Connections, from: usize, to: usize) -> u32 {
    let mut hops = 0;
    let mut current = from;
    while current != to {
        current = connections.next_connection_id(current);
        hops += 1;
    }
    hops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::Vehicle;
    use crate::timetable::memory::InMemoryTimetable;

    #[test]
    fn empty_day_yields_empty_frontiers() {
        let day = chrono::NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let mut builder = InMemoryTimetable::builder(day);
        let a = builder.station("station1", 6.57, 46.52);
        let b = builder.station("station2", 6.64, 46.53);
        builder.route("route1", Vehicle::Train);
        builder.transfer(a, b, 5);
        let tt = builder.build().unwrap();
        let profile = Router::new(&tt).profile(day, b);
        assert!(profile.for_station(a).is_empty());
        assert!(profile.for_station(b).is_empty());
    }
}
