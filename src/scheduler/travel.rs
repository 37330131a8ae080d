//! Teacher travel-time feasibility and location inheritance.
//!
//! A teacher's day is a row of optional bookings. Switching between school
//! and home needs at least `travel_time` free slots between two bookings,
//! with one exception: a teacher already at school may deliver a later
//! remote lesson from school without travelling.
//!
//! # Asymmetry
//!
//! The exception applies only looking backward (earlier SCHOOL booking,
//! candidate HOME). Looking forward, a candidate whose location differs
//! from the next booking always needs the full travel gap.

use crate::models::{Booking, Location, SlotType};

/// Location a slot type asks for: OFFLINE slots need the teacher at school.
#[inline]
pub fn target_location(slot_type: SlotType) -> Location {
    if slot_type == SlotType::Offline {
        Location::School
    } else {
        Location::Home
    }
}

/// Nearest booking strictly before `slot`.
pub fn previous_booking(row: &[Option<Booking>], slot: usize) -> Option<(usize, Booking)> {
    row[..slot]
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, cell)| cell.map(|b| (i, b)))
}

/// Nearest booking strictly after `slot`.
pub fn next_booking(row: &[Option<Booking>], slot: usize) -> Option<(usize, Booking)> {
    row.iter()
        .enumerate()
        .skip(slot + 1)
        .find_map(|(i, cell)| cell.map(|b| (i, b)))
}

/// Checks whether a booking at `slot` with location `target` leaves
/// enough travel time to the neighbouring bookings of the same day.
pub fn is_travel_feasible(
    row: &[Option<Booking>],
    slot: usize,
    target: Location,
    travel_time: usize,
) -> bool {
    if let Some((prev, booking)) = previous_booking(row, slot) {
        let stays_at_school = booking.location == Location::School && target == Location::Home;
        if booking.location != target && !stays_at_school && slot - prev - 1 < travel_time {
            return false;
        }
    }
    if let Some((next, booking)) = next_booking(row, slot) {
        if booking.location != target && next - slot - 1 < travel_time {
            return false;
        }
    }
    true
}

/// Physical location for a non-OFFLINE booking at `slot`.
///
/// The teacher stays at school if their nearest earlier booking that day
/// was at school; otherwise they work from home.
pub fn inherited_location(row: &[Option<Booking>], slot: usize) -> Location {
    match previous_booking(row, slot) {
        Some((_, b)) if b.location == Location::School => Location::School,
        _ => Location::Home,
    }
}
