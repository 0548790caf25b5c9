//! Journey value types handed to consumers of the routing core.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Kind of vehicle serving a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vehicle {
    Tram,
    Metro,
    Train,
    Bus,
    Ferry,
    AerialLift,
    Funicular,
}

impl Vehicle {
    pub const ALL: [Vehicle; 7] = [
        Vehicle::Tram,
        Vehicle::Metro,
        Vehicle::Train,
        Vehicle::Bus,
        Vehicle::Ferry,
        Vehicle::AerialLift,
        Vehicle::Funicular,
    ];
}

/// A stop as displayed to the user. `platform_name` is set when the stop
/// names a specific platform of its station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub name: String,
    pub platform_name: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
}

impl Stop {
    pub fn new(
        name: String,
        platform_name: Option<String>,
        longitude: f64,
        latitude: f64,
    ) -> Stop {
        assert!((-180.0..=180.0).contains(&longitude), "longitude {} out of range", longitude);
        assert!((-90.0..=90.0).contains(&latitude), "latitude {} out of range", latitude);
        Stop { name, platform_name, longitude, latitude }
    }
}

/// A stop passed through without leaving the vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntermediateStop {
    pub stop: Stop,
    pub arr_time: NaiveDateTime,
    pub dep_time: NaiveDateTime,
}

impl IntermediateStop {
    pub fn new(stop: Stop, arr_time: NaiveDateTime, dep_time: NaiveDateTime) -> IntermediateStop {
        assert!(dep_time >= arr_time, "intermediate stop departs before it arrives");
        IntermediateStop { stop, arr_time, dep_time }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportLeg {
    pub dep_stop: Stop,
    pub dep_time: NaiveDateTime,
    pub arr_stop: Stop,
    pub arr_time: NaiveDateTime,
    pub intermediate_stops: Vec<IntermediateStop>,
    pub vehicle: Vehicle,
    pub route: String,
    pub destination: String,
}

impl TransportLeg {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dep_stop: Stop,
        dep_time: NaiveDateTime,
        arr_stop: Stop,
        arr_time: NaiveDateTime,
        intermediate_stops: Vec<IntermediateStop>,
        vehicle: Vehicle,
        route: String,
        destination: String,
    ) -> TransportLeg {
        assert!(arr_time >= dep_time, "transport leg arrives before it departs");
        TransportLeg {
            dep_stop,
            dep_time,
            arr_stop,
            arr_time,
            intermediate_stops,
            vehicle,
            route,
            destination,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootLeg {
    pub dep_stop: Stop,
    pub dep_time: NaiveDateTime,
    pub arr_stop: Stop,
    pub arr_time: NaiveDateTime,
}

impl FootLeg {
    pub fn new(
        dep_stop: Stop,
        dep_time: NaiveDateTime,
        arr_stop: Stop,
        arr_time: NaiveDateTime,
    ) -> FootLeg {
        assert!(arr_time >= dep_time, "foot leg arrives before it departs");
        FootLeg { dep_stop, dep_time, arr_stop, arr_time }
    }

    /// True when this leg is a change inside one station rather than a walk
    /// between two of them.
    pub fn is_transfer(&self) -> bool {
        self.dep_stop.name == self.arr_stop.name
    }
}

/// One step of a journey, either riding a vehicle or on foot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Leg {
    Transport(TransportLeg),
    Foot(FootLeg),
}

impl Leg {
    pub fn dep_stop(&self) -> &Stop {
        match self {
            Leg::Transport(t) => &t.dep_stop,
            Leg::Foot(f) => &f.dep_stop,
        }
    }

    pub fn dep_time(&self) -> NaiveDateTime {
        match self {
            Leg::Transport(t) => t.dep_time,
            Leg::Foot(f) => f.dep_time,
        }
    }

    pub fn arr_stop(&self) -> &Stop {
        match self {
            Leg::Transport(t) => &t.arr_stop,
            Leg::Foot(f) => &f.arr_stop,
        }
    }

    pub fn arr_time(&self) -> NaiveDateTime {
        match self {
            Leg::Transport(t) => t.arr_time,
            Leg::Foot(f) => f.arr_time,
        }
    }

    pub fn duration(&self) -> Duration {
        self.arr_time() - self.dep_time()
    }

    pub fn is_foot(&self) -> bool {
        matches!(self, Leg::Foot(_))
    }
}

/// An ordered sequence of legs from one stop to another.
///
/// Construction checks that the sequence is non-empty, that consecutive legs
/// share their connecting stop, that no leg departs before the previous one
/// arrived, and that foot and transport legs alternate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Journey {
    legs: Vec<Leg>,
}

impl Journey {
    pub fn new(legs: Vec<Leg>) -> Journey {
        assert!(!legs.is_empty(), "journey without legs");
        for pair in legs.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            assert!(
                prev.arr_stop() == next.dep_stop(),
                "leg departs from {:?} but the previous one arrived at {:?}",
                next.dep_stop().name,
                prev.arr_stop().name
            );
            assert!(
                next.dep_time() >= prev.arr_time(),
                "leg departs at {} before the previous one arrived at {}",
                next.dep_time(),
                prev.arr_time()
            );
            assert!(
                prev.is_foot() != next.is_foot(),
                "foot and transport legs must alternate"
            );
        }
        Journey { legs }
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn dep_stop(&self) -> &Stop {
        self.legs.first().unwrap().dep_stop()
    }

    pub fn arr_stop(&self) -> &Stop {
        self.legs.last().unwrap().arr_stop()
    }

    pub fn dep_time(&self) -> NaiveDateTime {
        self.legs.first().unwrap().dep_time()
    }

    pub fn arr_time(&self) -> NaiveDateTime {
        self.legs.last().unwrap().arr_time()
    }

    pub fn duration(&self) -> Duration {
        self.arr_time() - self.dep_time()
    }
}
