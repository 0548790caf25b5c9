mod fixtures;

use procsa::query;

use fixtures::{day, timetable, STATION1, STATION2, STATION3, STATION4};

const ALL_STATIONS: [usize; 4] = [STATION1, STATION2, STATION3, STATION4];

/// Structural checks that must hold for every journey the extractor can
/// produce, whatever the label it came from.
#[test]
fn extracted_journeys_are_well_formed() {
    let tt = timetable();
    let profile = query::route(&tt, day(), STATION4);
    let mut seen = 0;
    for station in ALL_STATIONS {
        let journeys = query::extract_journeys(&profile, station);
        for journey in &journeys {
            seen += 1;
            let legs = journey.legs();
            assert!(!legs.is_empty());
            for leg in legs {
                assert!(leg.dep_time() <= leg.arr_time());
            }
            for pair in legs.windows(2) {
                assert_eq!(pair[0].arr_stop(), pair[1].dep_stop());
                assert!(pair[0].arr_time() <= pair[1].dep_time());
                assert_ne!(pair[0].is_foot(), pair[1].is_foot());
            }
            assert_eq!(journey.dep_stop(), legs[0].dep_stop());
            assert_eq!(journey.arr_stop(), legs[legs.len() - 1].arr_stop());
        }
        // later departures never arrive earlier in the returned order
        for pair in journeys.windows(2) {
            assert!(pair[0].dep_time() <= pair[1].dep_time());
        }
    }
    assert!(seen > 0);
}

#[test]
fn every_journey_ends_at_the_destination_station() {
    let tt = timetable();
    let profile = query::route(&tt, day(), STATION4);
    for station in ALL_STATIONS {
        for journey in query::extract_journeys(&profile, station) {
            assert_eq!(journey.arr_stop().name, "station4");
        }
    }
}

#[test]
fn journeys_serialize_with_their_legs() {
    let tt = timetable();
    let profile = query::route(&tt, day(), STATION4);
    let journeys = query::extract_journeys(&profile, STATION1);
    let json = serde_json::to_value(&journeys).unwrap();
    let legs = json[0]["legs"].as_array().unwrap();
    assert_eq!(legs.len(), 5);
    assert!(legs[0]["Foot"].is_object());
    assert!(legs[1]["Transport"].is_object());
    assert_eq!(legs[1]["Transport"]["vehicle"], "Train");
}
