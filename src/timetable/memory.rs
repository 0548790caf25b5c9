//! In-memory timetable built from plain records.
//!
//! The builder accepts stations, platforms, routes, trips, connections and
//! footpaths in any order (stations before platforms, since platforms extend
//! the stop id space), validates everything against the packed encodings the
//! router relies on, and freezes the result into an [`InMemoryTimetable`].

use chrono::NaiveDate;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bits;
use crate::journey::Vehicle;
use crate::timetable::{
    check_index, Connections, Platforms, Routes, Stations, Timetable, Transfers, Trips,
};
use crate::types::Mtime;

const MIN_MINS: Mtime = -240;
const MAX_MINS: Mtime = 2880;
const MAX_TABLE: usize = 1 << 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRecord {
    pub name: String,
    pub station: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub name: String,
    pub vehicle: Vehicle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub route: usize,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub trip: usize,
    pub dep_stop: usize,
    pub dep_mins: Mtime,
    pub arr_stop: usize,
    pub arr_mins: Mtime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub dep_station: usize,
    pub arr_station: usize,
    pub minutes: Mtime,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimetableError {
    #[error("stop id {0} is out of range")]
    UnknownStop(usize),
    #[error("station id {0} is out of range")]
    UnknownStation(usize),
    #[error("route id {0} is out of range")]
    UnknownRoute(usize),
    #[error("trip id {0} is out of range")]
    UnknownTrip(usize),
    #[error("connection arrives at minute {arr} before departing at minute {dep}")]
    NegativeRide { dep: Mtime, arr: Mtime },
    #[error("minute value {0} is outside the supported window")]
    TimeOutOfRange(Mtime),
    #[error("a footpath of {0} minutes does not fit the transfer table")]
    TransferTooLong(Mtime),
    #[error("{count} footpaths arrive at station {station}, at most 255 are indexable")]
    TooManyArrivals { station: usize, count: usize },
    #[error("trip {trip} has {count} connections, at most 256 are rideable")]
    TripTooLong { trip: usize, count: usize },
    #[error("{0} connections exceed the 24-bit connection id space")]
    TooManyConnections(usize),
    #[error("{0} footpaths exceed the 24-bit transfer id space")]
    TooManyTransfers(usize),
}

/// Accumulates timetable records for one service day.
#[derive(Debug)]
pub struct TimetableBuilder {
    date: NaiveDate,
    stations: Vec<StationRecord>,
    station_ids: FxHashMap<String, usize>,
    platforms: Vec<PlatformRecord>,
    routes: Vec<RouteRecord>,
    trips: Vec<TripRecord>,
    connections: Vec<ConnectionRecord>,
    transfers: Vec<TransferRecord>,
}

impl TimetableBuilder {
    pub fn new(date: NaiveDate) -> TimetableBuilder {
        TimetableBuilder {
            date,
            stations: vec![],
            station_ids: FxHashMap::default(),
            platforms: vec![],
            routes: vec![],
            trips: vec![],
            connections: vec![],
            transfers: vec![],
        }
    }

    /// Registers a station and returns its id. A station already known by
    /// the same name is reused.
    pub fn station(&mut self, name: &str, longitude: f64, latitude: f64) -> usize {
        assert!(
            self.platforms.is_empty(),
            "stations must be registered before the first platform"
        );
        if let Some(&id) = self.station_ids.get(name) {
            return id;
        }
        let id = self.stations.len();
        self.stations.push(StationRecord { name: name.to_string(), longitude, latitude });
        self.station_ids.insert(name.to_string(), id);
        id
    }

    /// Registers a platform of an existing station and returns its stop id,
    /// which lives past the station ids.
    pub fn platform(&mut self, station: usize, name: &str) -> usize {
        let id = self.stations.len() + self.platforms.len();
        self.platforms.push(PlatformRecord { name: name.to_string(), station });
        id
    }

    pub fn route(&mut self, name: &str, vehicle: Vehicle) -> usize {
        self.routes.push(RouteRecord { name: name.to_string(), vehicle });
        self.routes.len() - 1
    }

    pub fn trip(&mut self, route: usize, destination: &str) -> usize {
        self.trips.push(TripRecord { route, destination: destination.to_string() });
        self.trips.len() - 1
    }

    pub fn connection(
        &mut self,
        trip: usize,
        dep_stop: usize,
        dep_mins: Mtime,
        arr_stop: usize,
        arr_mins: Mtime,
    ) -> &mut Self {
        self.connections.push(ConnectionRecord { trip, dep_stop, dep_mins, arr_stop, arr_mins });
        self
    }

    pub fn transfer(
        &mut self,
        dep_station: usize,
        arr_station: usize,
        minutes: Mtime,
    ) -> &mut Self {
        self.transfers.push(TransferRecord { dep_station, arr_station, minutes });
        self
    }

    pub fn build(self) -> Result<InMemoryTimetable, TimetableError> {
        let station_count = self.stations.len();
        let stop_count = station_count + self.platforms.len();

        for platform in &self.platforms {
            if platform.station >= station_count {
                return Err(TimetableError::UnknownStation(platform.station));
            }
        }
        for trip in &self.trips {
            if trip.route >= self.routes.len() {
                return Err(TimetableError::UnknownRoute(trip.route));
            }
        }
        if self.connections.len() >= MAX_TABLE {
            return Err(TimetableError::TooManyConnections(self.connections.len()));
        }
        for record in &self.connections {
            if record.trip >= self.trips.len() {
                return Err(TimetableError::UnknownTrip(record.trip));
            }
            for stop in [record.dep_stop, record.arr_stop] {
                if stop >= stop_count {
                    return Err(TimetableError::UnknownStop(stop));
                }
            }
            for mins in [record.dep_mins, record.arr_mins] {
                if !(MIN_MINS..MAX_MINS).contains(&mins) {
                    return Err(TimetableError::TimeOutOfRange(mins));
                }
            }
            if record.arr_mins < record.dep_mins {
                return Err(TimetableError::NegativeRide {
                    dep: record.dep_mins,
                    arr: record.arr_mins,
                });
            }
        }
        if self.transfers.len() >= MAX_TABLE {
            return Err(TimetableError::TooManyTransfers(self.transfers.len()));
        }
        for record in &self.transfers {
            for station in [record.dep_station, record.arr_station] {
                if station >= station_count {
                    return Err(TimetableError::UnknownStation(station));
                }
            }
            if !(0..=255).contains(&record.minutes) {
                return Err(TimetableError::TransferTooLong(record.minutes));
            }
        }

        // Sequence each trip by departure time; the cyclic next pointer and
        // the 8-bit hop counts both need the trip to stay rideable.
        let mut by_trip: Vec<Vec<usize>> = vec![vec![]; self.trips.len()];
        for (i, record) in self.connections.iter().enumerate() {
            by_trip[record.trip].push(i);
        }
        for (trip, sequence) in by_trip.iter_mut().enumerate() {
            if sequence.len() > 256 {
                return Err(TimetableError::TripTooLong { trip, count: sequence.len() });
            }
            sequence.sort_by_key(|&i| self.connections[i].dep_mins);
        }

        // The scan order of the whole day: departure time descending.
        let order: Vec<usize> = (0..self.connections.len())
            .sorted_by(|&a, &b| {
                self.connections[b]
                    .dep_mins
                    .cmp(&self.connections[a].dep_mins)
                    .then(b.cmp(&a))
            })
            .collect();
        let mut id_of = vec![0usize; self.connections.len()];
        for (id, &original) in order.iter().enumerate() {
            id_of[original] = id;
        }

        let mut rows: Vec<ConnectionRow> = order
            .iter()
            .map(|&original| {
                let record = &self.connections[original];
                ConnectionRow {
                    dep_stop: record.dep_stop,
                    dep_mins: record.dep_mins,
                    arr_stop: record.arr_stop,
                    arr_mins: record.arr_mins,
                    trip: record.trip,
                    pos: 0,
                    next: 0,
                }
            })
            .collect();
        for sequence in &by_trip {
            for (pos, &original) in sequence.iter().enumerate() {
                let row = &mut rows[id_of[original]];
                row.pos = pos;
                row.next = id_of[sequence[(pos + 1) % sequence.len()]];
            }
        }

        let transfers = self
            .transfers
            .into_iter()
            .sorted_by_key(|t| t.arr_station)
            .collect::<Vec<_>>();
        let mut arriving_at = vec![bits::pack_range(0, 0); station_count];
        let grouped = transfers.iter().enumerate().group_by(|(_, t)| t.arr_station);
        for (station, group) in &grouped {
            let ids: Vec<usize> = group.map(|(i, _)| i).collect();
            let start = ids[0];
            let end = start + ids.len();
            if ids.len() > 255 {
                return Err(TimetableError::TooManyArrivals { station, count: ids.len() });
            }
            arriving_at[station] = bits::pack_range(start as u32, end as u32);
        }

        Ok(InMemoryTimetable {
            date: self.date,
            stations: StationsTable { list: self.stations },
            platforms: PlatformsTable { list: self.platforms },
            routes: RoutesTable { list: self.routes },
            trips: TripsTable { list: self.trips },
            connections: ConnectionsTable { list: rows },
            transfers: TransfersTable { list: transfers, arriving_at },
        })
    }
}

#[derive(Debug, Clone)]
struct ConnectionRow {
    dep_stop: usize,
    dep_mins: Mtime,
    arr_stop: usize,
    arr_mins: Mtime,
    trip: usize,
    pos: usize,
    next: usize,
}

#[derive(Debug)]
struct StationsTable {
    list: Vec<StationRecord>,
}

impl Stations for StationsTable {
    fn size(&self) -> usize {
        self.list.len()
    }

    fn name(&self, id: usize) -> &str {
        check_index(self.list.len(), id);
        &self.list[id].name
    }

    fn longitude(&self, id: usize) -> f64 {
        check_index(self.list.len(), id);
        self.list[id].longitude
    }

    fn latitude(&self, id: usize) -> f64 {
        check_index(self.list.len(), id);
        self.list[id].latitude
    }
}

#[derive(Debug)]
struct PlatformsTable {
    list: Vec<PlatformRecord>,
}

impl Platforms for PlatformsTable {
    fn size(&self) -> usize {
        self.list.len()
    }

    fn name(&self, id: usize) -> &str {
        check_index(self.list.len(), id);
        &self.list[id].name
    }

    fn station_id(&self, id: usize) -> usize {
        check_index(self.list.len(), id);
        self.list[id].station
    }
}

#[derive(Debug)]
struct RoutesTable {
    list: Vec<RouteRecord>,
}

impl Routes for RoutesTable {
    fn size(&self) -> usize {
        self.list.len()
    }

    fn vehicle(&self, id: usize) -> Vehicle {
        check_index(self.list.len(), id);
        self.list[id].vehicle
    }

    fn name(&self, id: usize) -> &str {
        check_index(self.list.len(), id);
        &self.list[id].name
    }
}

#[derive(Debug)]
struct TripsTable {
    list: Vec<TripRecord>,
}

impl Trips for TripsTable {
    fn size(&self) -> usize {
        self.list.len()
    }

    fn route_id(&self, id: usize) -> usize {
        check_index(self.list.len(), id);
        self.list[id].route
    }

    fn destination(&self, id: usize) -> &str {
        check_index(self.list.len(), id);
        &self.list[id].destination
    }
}

#[derive(Debug)]
struct ConnectionsTable {
    list: Vec<ConnectionRow>,
}

impl Connections for ConnectionsTable {
    fn size(&self) -> usize {
        self.list.len()
    }

    fn dep_stop_id(&self, id: usize) -> usize {
        check_index(self.list.len(), id);
        self.list[id].dep_stop
    }

    fn dep_mins(&self, id: usize) -> Mtime {
        check_index(self.list.len(), id);
        self.list[id].dep_mins
    }

    fn arr_stop_id(&self, id: usize) -> usize {
        check_index(self.list.len(), id);
        self.list[id].arr_stop
    }

    fn arr_mins(&self, id: usize) -> Mtime {
        check_index(self.list.len(), id);
        self.list[id].arr_mins
    }

    fn trip_id(&self, id: usize) -> usize {
        check_index(self.list.len(), id);
        self.list[id].trip
    }

    fn trip_pos(&self, id: usize) -> usize {
        check_index(self.list.len(), id);
        self.list[id].pos
    }

    fn next_connection_id(&self, id: usize) -> usize {
        check_index(self.list.len(), id);
        self.list[id].next
    }
}

#[derive(Debug)]
struct TransfersTable {
    list: Vec<TransferRecord>,
    arriving_at: Vec<u32>,
}

impl Transfers for TransfersTable {
    fn size(&self) -> usize {
        self.list.len()
    }

    fn dep_station_id(&self, id: usize) -> usize {
        check_index(self.list.len(), id);
        self.list[id].dep_station
    }

    fn minutes(&self, id: usize) -> Mtime {
        check_index(self.list.len(), id);
        self.list[id].minutes
    }

    fn arriving_at(&self, station_id: usize) -> u32 {
        check_index(self.arriving_at.len(), station_id);
        self.arriving_at[station_id]
    }

    fn minutes_between(&self, dep_station_id: usize, arr_station_id: usize) -> Mtime {
        let range = self.arriving_at(arr_station_id);
        for id in bits::range_start(range)..bits::range_end(range) {
            if self.list[id as usize].dep_station == dep_station_id {
                return self.list[id as usize].minutes;
            }
        }
        panic!("no footpath from station {} to station {}", dep_station_id, arr_station_id);
    }
}

/// A full day's timetable held in memory.
#[derive(Debug)]
pub struct InMemoryTimetable {
    date: NaiveDate,
    stations: StationsTable,
    platforms: PlatformsTable,
    routes: RoutesTable,
    trips: TripsTable,
    connections: ConnectionsTable,
    transfers: TransfersTable,
}

impl InMemoryTimetable {
    pub fn builder(date: NaiveDate) -> TimetableBuilder {
        TimetableBuilder::new(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Timetable for InMemoryTimetable {
    fn stations(&self) -> &dyn Stations {
        &self.stations
    }

    fn platforms(&self) -> &dyn Platforms {
        &self.platforms
    }

    fn routes(&self) -> &dyn Routes {
        &self.routes
    }

    fn transfers(&self) -> &dyn Transfers {
        &self.transfers
    }

    fn trips_for(&self, date: NaiveDate) -> &dyn Trips {
        assert_eq!(date, self.date, "timetable only covers {}", self.date);
        &self.trips
    }

    fn connections_for(&self, date: NaiveDate) -> &dyn Connections {
        assert_eq!(date, self.date, "timetable only covers {}", self.date);
        &self.connections
    }
}
