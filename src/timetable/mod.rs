//! Read-only access to a day's flattened timetable.
//!
//! The routing core only ever reads these tables through indexed accessors.
//! Implementations must treat them as append-never for the lifetime of any
//! routing pass; [`memory`] provides the in-memory implementation used by
//! tests, benches and embedding callers.
//!
//! A stop id denotes either a station (`0..stations().size()`) or a platform
//! of a station (ids past that point). Routing always works on station ids;
//! platforms only matter for display.

pub mod memory;

use chrono::NaiveDate;

use crate::journey::Vehicle;
use crate::types::Mtime;

pub(crate) fn check_index(size: usize, id: usize) {
    assert!(id < size, "index {} out of range for table of size {}", id, size);
}

pub trait Stations {
    fn size(&self) -> usize;
    fn name(&self, id: usize) -> &str;
    fn longitude(&self, id: usize) -> f64;
    fn latitude(&self, id: usize) -> f64;
}

pub trait Platforms {
    fn size(&self) -> usize;
    fn name(&self, id: usize) -> &str;
    /// Station this platform belongs to.
    fn station_id(&self, id: usize) -> usize;
}

pub trait Routes {
    fn size(&self) -> usize;
    fn vehicle(&self, id: usize) -> Vehicle;
    fn name(&self, id: usize) -> &str;
}

pub trait Trips {
    fn size(&self) -> usize;
    fn route_id(&self, id: usize) -> usize;
    /// Headsign shown on the vehicle.
    fn destination(&self, id: usize) -> &str;
}

/// One scheduled vehicle hop between two stops.
///
/// The table is ordered by decreasing departure time; the router scans it
/// front to back and relies on that order.
pub trait Connections {
    fn size(&self) -> usize;
    fn dep_stop_id(&self, id: usize) -> usize;
    fn dep_mins(&self, id: usize) -> Mtime;
    fn arr_stop_id(&self, id: usize) -> usize;
    fn arr_mins(&self, id: usize) -> Mtime;
    fn trip_id(&self, id: usize) -> usize;
    /// Position of the connection within its trip, starting at 0.
    fn trip_pos(&self, id: usize) -> usize;
    /// Next connection of the same trip, wrapping to the trip's first
    /// connection after the last one.
    fn next_connection_id(&self, id: usize) -> usize;
}

/// Footpaths between stations, sorted by arrival station.
pub trait Transfers {
    fn size(&self) -> usize;
    fn dep_station_id(&self, id: usize) -> usize;
    fn minutes(&self, id: usize) -> Mtime;
    /// All transfers walking into the given station, as a packed range of
    /// indices into this table (see [`crate::bits::pack_range`]).
    fn arriving_at(&self, station_id: usize) -> u32;
    /// Duration of the footpath between the two stations. Panics if the
    /// table holds no such footpath.
    fn minutes_between(&self, dep_station_id: usize, arr_station_id: usize) -> Mtime;
}

pub trait Timetable {
    fn stations(&self) -> &dyn Stations;
    fn platforms(&self) -> &dyn Platforms;
    fn routes(&self) -> &dyn Routes;
    fn transfers(&self) -> &dyn Transfers;
    fn trips_for(&self, date: NaiveDate) -> &dyn Trips;
    fn connections_for(&self, date: NaiveDate) -> &dyn Connections;

    fn is_station_id(&self, stop_id: usize) -> bool {
        stop_id < self.stations().size()
    }

    fn is_platform_id(&self, stop_id: usize) -> bool {
        stop_id >= self.stations().size()
    }

    /// Station a stop belongs to: itself for a station id, the parent
    /// station for a platform id.
    fn station_id(&self, stop_id: usize) -> usize {
        if self.is_station_id(stop_id) {
            stop_id
        } else {
            self.platforms().station_id(stop_id - self.stations().size())
        }
    }

    /// Platform name of the stop, or `None` for a plain station.
    fn platform_name(&self, stop_id: usize) -> Option<&str> {
        if self.is_platform_id(stop_id) {
            Some(self.platforms().name(stop_id - self.stations().size()))
        } else {
            None
        }
    }
}
