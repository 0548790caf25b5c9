use std::time::Duration;

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, Criterion};

use procsa::journey::Vehicle;
use procsa::query;
use procsa::timetable::memory::InMemoryTimetable;

const STATIONS: usize = 50;
const TRIPS: usize = 76;

/// A line of stations served end to end every quarter hour.
fn line_timetable() -> InMemoryTimetable {
    let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    let mut builder = InMemoryTimetable::builder(day);
    let stations: Vec<usize> = (0..STATIONS)
        .map(|i| builder.station(&format!("station{}", i), 6.0 + i as f64 * 0.01, 46.5))
        .collect();
    for &station in &stations {
        builder.transfer(station, station, 2);
    }
    // a few parallel walking options near the end of the line
    builder.transfer(stations[STATIONS - 2], stations[STATIONS - 1], 7);
    builder.transfer(stations[STATIONS - 3], stations[STATIONS - 1], 12);
    let route = builder.route("route1", Vehicle::Train);
    for t in 0..TRIPS {
        let trip = builder.trip(route, "station49");
        let start = 300 + 15 * t as i32;
        for leg in 0..STATIONS - 1 {
            let dep = start + 5 * leg as i32;
            builder.connection(trip, stations[leg], dep, stations[leg + 1], dep + 4);
        }
    }
    builder.build().unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let tt = line_timetable();
    let day = tt.date();

    let mut group = c.benchmark_group("routing");
    group.measurement_time(Duration::from_secs(10)).sample_size(10);
    group.bench_function("profile", |b| {
        b.iter(|| query::route(&tt, day, black_box(STATIONS - 1)))
    });
    let profile = query::route(&tt, day, STATIONS - 1);
    group.bench_function("extract", |b| {
        b.iter(|| query::extract_journeys(&profile, black_box(0)))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
