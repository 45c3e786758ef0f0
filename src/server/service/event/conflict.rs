//! Booking-conflict predicate.
//!
//! A candidate booking conflicts with an existing event when their half-open windows
//! overlap and they share at least one participant. Participants are compared after
//! trimming and ignoring case.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::server::model::{
    event::{BookingConflict, Event},
    label::normalize_label,
};

/// Whether `[a_start, a_end)` and `[b_start, b_end)` share any instant.
///
/// Windows that only touch (one ends exactly when the other starts) do not overlap.
pub fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Finds every existing event that blocks the candidate booking.
///
/// # Arguments
/// - `start` / `end` - Candidate window
/// - `participants` - Candidate participant labels
/// - `existing` - Stored events to check against
/// - `exclude_id` - The event being edited, which never conflicts with itself
///
/// # Returns
/// - `Vec<BookingConflict>` - One entry per blocking event, listing the shared participants
///   as spelled on the existing event. Empty when the booking is allowed.
pub fn find_conflicts(
    start: NaiveDateTime,
    end: NaiveDateTime,
    participants: &[String],
    existing: &[Event],
    exclude_id: Option<i32>,
) -> Vec<BookingConflict> {
    let wanted: HashSet<String> = participants.iter().map(|p| normalize_label(p)).collect();

    existing
        .iter()
        .filter(|event| Some(event.id) != exclude_id)
        .filter(|event| overlaps(start, end, event.start_at, event.end_at))
        .filter_map(|event| {
            let shared: Vec<String> = event
                .participants
                .iter()
                .filter(|p| wanted.contains(&normalize_label(p)))
                .cloned()
                .collect();

            if shared.is_empty() {
                return None;
            }

            Some(BookingConflict {
                event_id: event.id,
                program: event.program.clone(),
                start_at: event.start_at,
                end_at: event.end_at,
                participants: shared,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::event::EventStatus;
    use chrono::{NaiveDate, Utc};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn event(id: i32, start: NaiveDateTime, end: NaiveDateTime, participants: &[&str]) -> Event {
        Event {
            id,
            program: format!("Program {}", id),
            start_at: start,
            end_at: end,
            purpose: "Meeting".to_string(),
            participants: participants.iter().map(|p| p.to_string()).collect(),
            departments: vec!["SGOD".to_string()],
            status: EventStatus::Upcoming,
            notified: false,
            created_by: "1234567".to_string(),
            created_at: Utc::now(),
        }
    }

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    /// Tests the half-open overlap rule.
    ///
    /// Expected: shared instants overlap, touching boundaries do not
    #[test]
    fn test_overlaps() {
        assert!(overlaps(at(9, 0), at(10, 0), at(9, 30), at(11, 0)));
        assert!(overlaps(at(9, 0), at(12, 0), at(10, 0), at(11, 0)));
        assert!(!overlaps(at(9, 0), at(10, 0), at(10, 0), at(11, 0)));
        assert!(!overlaps(at(10, 0), at(11, 0), at(9, 0), at(10, 0)));
    }

    /// Tests that participants are compared ignoring case and surrounding whitespace.
    ///
    /// Expected: "registrar " conflicts with stored "Registrar"
    #[test]
    fn test_case_insensitive_participant_conflict() {
        let existing = vec![event(1, at(9, 0), at(10, 0), &["Registrar", "Nurse"])];

        let conflicts = find_conflicts(at(9, 30), at(10, 30), &labels(&["registrar "]), &existing, None);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].event_id, 1);
        assert_eq!(conflicts[0].participants, vec!["Registrar".to_string()]);
    }

    /// Tests back-to-back bookings for the same participant.
    ///
    /// Expected: no conflict when the new event starts as the old one ends
    #[test]
    fn test_back_to_back_is_allowed() {
        let existing = vec![event(1, at(9, 0), at(10, 0), &["Nurse"])];

        let conflicts = find_conflicts(at(10, 0), at(11, 0), &labels(&["Nurse"]), &existing, None);

        assert!(conflicts.is_empty());
    }

    /// Tests overlapping windows without shared participants.
    ///
    /// Expected: no conflict
    #[test]
    fn test_disjoint_participants_are_allowed() {
        let existing = vec![event(1, at(9, 0), at(10, 0), &["Registrar"])];

        let conflicts = find_conflicts(at(9, 0), at(10, 0), &labels(&["Cashier"]), &existing, None);

        assert!(conflicts.is_empty());
    }

    /// Tests that an edited event does not conflict with its own stored row.
    ///
    /// Expected: no conflict for the excluded ID, conflict for the other event
    #[test]
    fn test_edit_exemption() {
        let existing = vec![
            event(1, at(9, 0), at(10, 0), &["Registrar"]),
            event(2, at(9, 30), at(11, 0), &["Registrar"]),
        ];

        let conflicts = find_conflicts(at(9, 0), at(10, 30), &labels(&["Registrar"]), &existing, Some(1));

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].event_id, 2);
    }

    /// Tests a booking that collides with several events at once.
    ///
    /// Expected: one conflict per blocking event, each with its own shared participants
    #[test]
    fn test_reports_every_blocking_event() {
        let existing = vec![
            event(1, at(8, 0), at(9, 30), &["Registrar"]),
            event(2, at(9, 15), at(9, 45), &["Nurse", "Guard"]),
            event(3, at(12, 0), at(13, 0), &["Registrar"]),
        ];

        let conflicts = find_conflicts(
            at(9, 0),
            at(10, 0),
            &labels(&["REGISTRAR", "guard"]),
            &existing,
            None,
        );

        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].participants, vec!["Registrar".to_string()]);
        assert_eq!(conflicts[1].participants, vec!["Guard".to_string()]);
    }
}
