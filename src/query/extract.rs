//! Turns profile labels back into concrete journeys.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use itertools::Itertools;
use tracing::debug;

use crate::bits;
use crate::criteria;
use crate::journey::{FootLeg, IntermediateStop, Journey, Leg, Stop, TransportLeg};
use crate::query::profile::Profile;
use crate::timetable::Timetable;
use crate::types::Mtime;

/// All Pareto-optimal journeys from the given station to the profile's
/// destination, ordered by departure then arrival time.
///
/// Every label of a well-formed profile decodes into a journey; a payload
/// chain that leads to a missing label panics.
pub fn journeys<T: Timetable + ?Sized>(
    profile: &Profile<'_, T>,
    dep_station_id: usize,
) -> Vec<Journey> {
    let front = profile.for_station(dep_station_id);
    debug!(station = dep_station_id, labels = front.size(), "unpacking journeys");
    front
        .iter()
        .map(|label| build_journey(profile, label, dep_station_id))
        .sorted_by_key(|journey| (journey.dep_time(), journey.arr_time()))
        .collect()
}

fn build_journey<T: Timetable + ?Sized>(
    profile: &Profile<'_, T>,
    label: u64,
    dep_station_id: usize,
) -> Journey {
    let timetable = profile.timetable();
    let connections = profile.connections();
    let date = profile.date();

    let dest_arr_mins = criteria::arr_mins(label);
    let mut changes = criteria::changes(label);
    let (mut connection, mut hops) = decode_payload(label);

    let mut legs: Vec<Leg> = vec![];

    // A journey starts at a plain station; walk (or change platforms) to the
    // first departure unless we stand exactly there at exactly that time.
    let dep_mins = criteria::dep_mins(label);
    let boarding_station = timetable.station_id(connections.dep_stop_id(connection));
    if dep_mins != connections.dep_mins(connection) || dep_station_id != boarding_station {
        let walk = timetable.transfers().minutes_between(dep_station_id, boarding_station);
        legs.push(Leg::Foot(FootLeg::new(
            stop_at(timetable, dep_station_id),
            date_time(date, dep_mins),
            stop_at(timetable, connections.dep_stop_id(connection)),
            date_time(date, dep_mins + walk),
        )));
    }

    loop {
        // Ride the connection plus `hops` further ones of the same trip.
        let mut intermediate_stops = Vec::with_capacity(hops);
        let mut last = connection;
        for _ in 0..hops {
            let next = connections.next_connection_id(last);
            intermediate_stops.push(IntermediateStop::new(
                stop_at(timetable, connections.arr_stop_id(last)),
                date_time(date, connections.arr_mins(last)),
                date_time(date, connections.dep_mins(next)),
            ));
            last = next;
        }
        let trip = connections.trip_id(connection);
        let route = profile.trips().route_id(trip);
        legs.push(Leg::Transport(TransportLeg::new(
            stop_at(timetable, connections.dep_stop_id(connection)),
            date_time(date, connections.dep_mins(connection)),
            stop_at(timetable, connections.arr_stop_id(last)),
            date_time(date, connections.arr_mins(last)),
            intermediate_stops,
            timetable.routes().vehicle(route),
            timetable.routes().name(route).to_string(),
            profile.trips().destination(trip).to_string(),
        )));

        let alighting_stop = connections.arr_stop_id(last);
        let alighting_station = timetable.station_id(alighting_stop);
        let alighting_mins = connections.arr_mins(last);

        if changes == 0 {
            if alighting_station != profile.dest_station_id() {
                let walk = timetable
                    .transfers()
                    .minutes_between(alighting_station, profile.dest_station_id());
                legs.push(Leg::Foot(FootLeg::new(
                    stop_at(timetable, alighting_stop),
                    date_time(date, alighting_mins),
                    stop_at(timetable, profile.dest_station_id()),
                    date_time(date, alighting_mins + walk),
                )));
            }
            break;
        }

        // The rest of the journey is the matching label one change below,
        // reached by a footpath or platform change.
        changes -= 1;
        let next_label = profile.for_station(alighting_station).get(dest_arr_mins, changes);
        let (next_connection, next_hops) = decode_payload(next_label);
        let next_boarding_station =
            timetable.station_id(connections.dep_stop_id(next_connection));
        let walk =
            timetable.transfers().minutes_between(alighting_station, next_boarding_station);
        legs.push(Leg::Foot(FootLeg::new(
            stop_at(timetable, alighting_stop),
            date_time(date, alighting_mins),
            stop_at(timetable, connections.dep_stop_id(next_connection)),
            date_time(date, alighting_mins + walk),
        )));
        connection = next_connection;
        hops = next_hops;
    }

    Journey::new(legs)
}

fn decode_payload(label: u64) -> (usize, usize) {
    let payload = criteria::payload(label);
    (bits::unpack_24(payload) as usize, bits::unpack_8(payload) as usize)
}

fn stop_at<T: Timetable + ?Sized>(timetable: &T, stop_id: usize) -> Stop {
    let station = timetable.station_id(stop_id);
    Stop::new(
        timetable.stations().name(station).to_string(),
        timetable.platform_name(stop_id).map(str::to_string),
        timetable.stations().longitude(station),
        timetable.stations().latitude(station),
    )
}

/// Minutes relative to the service day's midnight as a point in time; spills
/// into the neighbouring days for negative values and values past 1440.
fn date_time(date: NaiveDate, mins: Mtime) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::minutes(mins as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_time_handles_day_spill() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(
            date_time(day, 480),
            day.and_hms_opt(8, 0, 0).unwrap()
        );
        assert_eq!(
            date_time(day, -30),
            day.pred_opt().unwrap().and_hms_opt(23, 30, 0).unwrap()
        );
        assert_eq!(
            date_time(day, 1500),
            day.succ_opt().unwrap().and_hms_opt(1, 0, 0).unwrap()
        );
    }
}
