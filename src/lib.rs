//! Pareto-optimal public transport routing over a day's timetable.
//!
//! A profile query computes, for every station of the network, the set of
//! non-dominated (arrival time, transfer count, departure time) journeys to a
//! fixed destination, using a connection scan over the day's schedule. The
//! resulting profile is then unpacked into concrete [`journey::Journey`]
//! values.

pub mod bits;
pub mod criteria;
pub mod journey;
pub mod pareto;
pub mod query;
pub mod timetable;
pub mod types;
