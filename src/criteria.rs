//! Packed optimization criteria.
//!
//! One `u64` holds everything the routing pass needs to know about a way of
//! reaching the destination: arrival time, number of remaining vehicle
//! changes, an optional departure time and a 32-bit payload naming the next
//! connection to board. Field layout, low to high:
//!
//! ```text
//! bits  0..=31  payload ({24-bit connection id, 8-bit hop count})
//! bits 32..=38  changes
//! bits 39..=50  arrival minutes, biased by 240
//! bits 51..=62  departure minutes, biased and complement encoded
//! ```
//!
//! The departure field stores `4095 - (minutes + 240)`, so a zero field
//! means "no departure time" and can never collide with a real value, and so
//! plain unsigned comparison of two criteria with a departure field sorts by
//! departure descending, then arrival ascending, then changes ascending.
//! The frontier code relies on that ordering.

use crate::types::Mtime;

const TIME_BIAS: Mtime = 240;
const MAX_MINS: Mtime = 2880;

const CHANGES_SHIFT: u32 = 32;
const ARRIVAL_SHIFT: u32 = 39;
const DEPARTURE_SHIFT: u32 = 51;

const CHANGES_BITS: u32 = 7;
const MINS_MASK: u64 = 0xFFF;

fn check_mins(mins: Mtime) {
    assert!(
        (-TIME_BIAS..MAX_MINS).contains(&mins),
        "minute value {} outside [{}, {})",
        mins,
        -TIME_BIAS,
        MAX_MINS
    );
}

/// Packs arrival minutes, change count and payload into criteria without a
/// departure time. Panics if the arrival lies outside the supported window
/// or the change count needs more than 7 bits.
pub fn pack(arr_mins: Mtime, changes: u32, payload: u32) -> u64 {
    check_mins(arr_mins);
    assert!(changes >> CHANGES_BITS == 0, "change count {} exceeds 7 bits", changes);
    ((arr_mins + TIME_BIAS) as u64) << ARRIVAL_SHIFT
        | (changes as u64) << CHANGES_SHIFT
        | payload as u64
}

pub fn has_dep_mins(criteria: u64) -> bool {
    (criteria >> DEPARTURE_SHIFT) & MINS_MASK != 0
}

/// Departure minutes of the criteria. Panics if no departure time is set.
pub fn dep_mins(criteria: u64) -> Mtime {
    assert!(has_dep_mins(criteria), "criteria has no departure time");
    let stored = ((criteria >> DEPARTURE_SHIFT) & MINS_MASK) as Mtime;
    (MINS_MASK as Mtime - stored) - TIME_BIAS
}

pub fn arr_mins(criteria: u64) -> Mtime {
    ((criteria >> ARRIVAL_SHIFT) & MINS_MASK) as Mtime - TIME_BIAS
}

pub fn changes(criteria: u64) -> u32 {
    ((criteria >> CHANGES_SHIFT) & ((1 << CHANGES_BITS) - 1) as u64) as u32
}

pub fn payload(criteria: u64) -> u32 {
    criteria as u32
}

/// True iff the first criteria is at least as good as the second on every
/// dimension. Panics when exactly one of the two carries a departure time,
/// which would make the comparison meaningless.
pub fn dominates_or_is_equal(criteria1: u64, criteria2: u64) -> bool {
    assert!(
        has_dep_mins(criteria1) == has_dep_mins(criteria2),
        "cannot compare criteria with mismatched departure fields"
    );
    (!has_dep_mins(criteria1) || dep_mins(criteria1) >= dep_mins(criteria2))
        && arr_mins(criteria1) <= arr_mins(criteria2)
        && changes(criteria1) <= changes(criteria2)
}

pub fn without_dep_mins(criteria: u64) -> u64 {
    criteria & !(MINS_MASK << DEPARTURE_SHIFT)
}

/// Returns the criteria with its departure time set to `dep`, replacing any
/// previous value. Panics if `dep` lies outside the supported window.
pub fn with_dep_mins(criteria: u64, dep: Mtime) -> u64 {
    check_mins(dep);
    let stored = MINS_MASK as Mtime - (dep + TIME_BIAS);
    without_dep_mins(criteria) | (stored as u64) << DEPARTURE_SHIFT
}

pub fn with_additional_change(criteria: u64) -> u64 {
    criteria + (1 << CHANGES_SHIFT)
}

pub fn with_payload(criteria: u64, payload: u32) -> u64 {
    (criteria & !0xFFFF_FFFF) | payload as u64
}
