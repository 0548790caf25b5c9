use chrono::NaiveDate;

use procsa::journey::Vehicle;
use procsa::timetable::memory::InMemoryTimetable;

pub const STATION1: usize = 0;
pub const STATION2: usize = 1;
pub const STATION3: usize = 2;
pub const STATION4: usize = 3;

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

/// Four stations on two lines. The train runs station1 -> station2 ->
/// station4 but crawls on its second leg; the bus leaves station2 from the
/// other platform and reaches station3, a short walk from station4. Reaching
/// station4 early therefore takes one change, reaching it without changing
/// takes longer.
///
/// ```text
/// station1 --480 train 490--> station2 [platform 1]
/// station2 [platform 1] --492 train 540--> station4
/// station2 [platform 2] --500 bus 520--> station3 ~~5min walk~~> station4
/// ```
pub fn timetable() -> InMemoryTimetable {
    let mut builder = InMemoryTimetable::builder(day());
    let s1 = builder.station("station1", 6.57, 46.52);
    let s2 = builder.station("station2", 6.64, 46.53);
    let s3 = builder.station("station3", 6.69, 46.55);
    let s4 = builder.station("station4", 6.70, 46.56);
    let platform1 = builder.platform(s2, "1");
    let platform2 = builder.platform(s2, "2");
    let train = builder.route("route1", Vehicle::Train);
    let bus = builder.route("route2", Vehicle::Bus);
    let train_trip = builder.trip(train, "station4");
    let bus_trip = builder.trip(bus, "station3");
    builder.connection(train_trip, s1, 480, platform1, 490);
    builder.connection(train_trip, platform1, 492, s4, 540);
    builder.connection(bus_trip, platform2, 500, s3, 520);
    builder
        .transfer(s1, s1, 2)
        .transfer(s2, s2, 2)
        .transfer(s3, s3, 2)
        .transfer(s4, s4, 2)
        .transfer(s3, s4, 5);
    builder.build().unwrap()
}
