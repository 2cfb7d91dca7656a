//! Seat allocation tests: lowest-position packing, capacity, partial removal,
//! ticket accounting and the row-major occupancy report.

use proptest::prelude::*;
use theater_core::auditorium::{Auditorium, AuditoriumError, Seat};

fn positions(auditorium: &Auditorium) -> Vec<u32> {
    auditorium.seats().map(Seat::position).collect()
}

#[test]
fn test_lowest_position_packing_fills_gap_first() {
    let mut auditorium = Auditorium::new("Five", 1, 5).unwrap();
    auditorium.add_party("A", 2).unwrap();
    assert_eq!(positions(&auditorium), vec![1, 2]);

    auditorium.remove_party("A", 1).unwrap();
    assert_eq!(positions(&auditorium), vec![2]);

    auditorium.add_party("B", 2).unwrap();
    assert_eq!(positions(&auditorium), vec![1, 2, 3]);
    let b: Vec<u32> = auditorium
        .seats()
        .filter(|s| s.occupant() == "B")
        .map(Seat::position)
        .collect();
    assert_eq!(b, vec![1, 3]);
}

#[test]
fn test_add_party_beyond_remaining_fails_without_mutation() {
    let mut auditorium = Auditorium::new("Small", 2, 2).unwrap();
    auditorium.add_party("A", 3).unwrap();

    let err = auditorium.add_party("B", 2).unwrap_err();
    assert_eq!(
        err,
        AuditoriumError::CapacityExceeded {
            requested: 2,
            remaining: 1
        }
    );
    assert_eq!(auditorium.occupancy(), 3);
    assert_eq!(auditorium.tickets_sold(), 3);
    assert_eq!(positions(&auditorium), vec![1, 2, 3]);

    auditorium.add_party("B", 1).unwrap();
    assert_eq!(auditorium.remaining_seats(), 0);
}

#[test]
fn test_remove_more_than_occupied_is_rejected() {
    let mut auditorium = Auditorium::new("Room", 1, 4).unwrap();
    auditorium.add_party("A", 2).unwrap();
    let err = auditorium.remove_party("A", 3).unwrap_err();
    assert_eq!(
        err,
        AuditoriumError::InsufficientOccupancy {
            requested: 3,
            occupied: 2
        }
    );
    assert_eq!(auditorium.occupancy(), 2);
}

#[test]
fn test_incomplete_removal_still_releases_matches() {
    let mut auditorium = Auditorium::new("Room", 2, 3).unwrap();
    auditorium.add_party("A", 2).unwrap();
    auditorium.add_party("B", 3).unwrap();

    // Only two "A" seats exist but three are requested.
    let err = auditorium.remove_party("A", 3).unwrap_err();
    assert_eq!(
        err,
        AuditoriumError::IncompleteRemoval {
            requested: 3,
            removed: 2
        }
    );
    assert_eq!(positions(&auditorium), vec![3, 4, 5]);
    assert!(auditorium.seats().all(|s| s.occupant() == "B"));
}

#[test]
fn test_remove_party_stops_after_requested_count() {
    let mut auditorium = Auditorium::new("Room", 1, 6).unwrap();
    auditorium.add_party("A", 4).unwrap();
    auditorium.remove_party("A", 2).unwrap();
    assert_eq!(positions(&auditorium), vec![3, 4]);
}

#[test]
fn test_ticket_accounting_and_reset() {
    let mut auditorium = Auditorium::new("Room", 3, 3).unwrap();
    auditorium.add_party("A", 2).unwrap();
    auditorium.add_party("B", 4).unwrap();
    auditorium.remove_party("A", 2).unwrap();
    auditorium.add_party("C", 1).unwrap();
    assert_eq!(auditorium.tickets_sold(), 7);

    auditorium.reset_ticket_counter();
    assert_eq!(auditorium.tickets_sold(), 0);
    assert_eq!(auditorium.occupancy(), 5);
}

#[test]
fn test_clear_all_keeps_ticket_counter() {
    let mut auditorium = Auditorium::new("Room", 2, 2).unwrap();
    auditorium.add_party("A", 3).unwrap();
    auditorium.clear_all();
    assert!(auditorium.is_empty());
    assert_eq!(auditorium.remaining_seats(), 4);
    assert_eq!(auditorium.tickets_sold(), 3);
}

#[test]
fn test_logan_end_to_end_report() {
    let mut logan = Auditorium::new("Logan", 2, 3).unwrap();
    assert_eq!(logan.capacity(), 6);
    assert_eq!(logan.rows(), 2);

    logan.add_party("Alice", 2).unwrap();
    assert_eq!(positions(&logan), vec![1, 2]);
    assert_eq!(logan.tickets_sold(), 2);

    logan.add_party("Bob", 3).unwrap();
    assert_eq!(positions(&logan), vec![1, 2, 3, 4, 5]);
    assert_eq!(logan.tickets_sold(), 5);

    logan.remove_party("Alice", 2).unwrap();
    assert_eq!(positions(&logan), vec![3, 4, 5]);

    logan.add_party("Carl", 1).unwrap();
    assert_eq!(positions(&logan), vec![1, 3, 4, 5]);

    let report = logan.occupancy_report();
    let occupants: Vec<Option<&str>> = report
        .slots
        .iter()
        .map(|slot| slot.occupant.as_deref())
        .collect();
    assert_eq!(
        occupants,
        vec![
            Some("Carl"),
            None,
            Some("Bob"),
            Some("Bob"),
            Some("Bob"),
            None
        ]
    );
    assert_eq!(report.slot(2, 1).and_then(|s| s.occupant.as_deref()), Some("Bob"));
    assert!(report.slot(1, 2).is_some_and(|s| s.is_free()));
    assert!(report.slot(3, 1).is_none());
    assert_eq!(report.occupied_positions(), vec![1, 3, 4, 5]);
    assert_eq!(report.free_count(), 2);

    let text = report.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "Row 1 seat 1 used by Carl's party.");
    assert_eq!(lines[1], "Row 1 seat 2 is free.");
    assert_eq!(lines[3], "Row 2 seat 1 used by Bob's party.");
    assert_eq!(lines[5], "Row 2 seat 3 is free.");
}

#[derive(Debug, Clone)]
enum Op {
    Add(u8, u32),
    Remove(u8, u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..4, 0u32..6).prop_map(|(p, n)| Op::Add(p, n)),
        (0u8..4, 0u32..6).prop_map(|(p, n)| Op::Remove(p, n)),
    ]
}

proptest! {
    #[test]
    fn prop_occupancy_never_exceeds_capacity(
        rows in 1u32..4,
        per_row in 1u32..5,
        ops in proptest::collection::vec(op_strategy(), 0..40),
    ) {
        let mut auditorium = Auditorium::new("Prop", rows, per_row).unwrap();
        for op in ops {
            match op {
                Op::Add(party, size) => {
                    let name = format!("P{party}");
                    let before: Vec<u32> = positions(&auditorium);
                    let sold = auditorium.tickets_sold();
                    let fits = size <= auditorium.remaining_seats();
                    let result = auditorium.add_party(&name, size);
                    prop_assert_eq!(result.is_ok(), fits);
                    if !fits {
                        prop_assert_eq!(positions(&auditorium), before);
                        prop_assert_eq!(auditorium.tickets_sold(), sold);
                    }
                }
                Op::Remove(party, size) => {
                    let _ = auditorium.remove_party(&format!("P{party}"), size);
                }
            }
            prop_assert!(auditorium.occupancy() <= auditorium.capacity());
            let seen = positions(&auditorium);
            prop_assert!(seen.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(seen.iter().all(|&p| p >= 1 && p <= auditorium.capacity()));
        }
    }

    #[test]
    fn prop_new_party_takes_lowest_free_positions(
        prefill in proptest::collection::btree_set(1u32..=12, 0..12),
        size in 0u32..6,
    ) {
        // Arbitrary occupancy pattern: seat everyone one by one, then release the gaps.
        let mut keep = Auditorium::new("Lowest", 3, 4).unwrap();
        for p in 1..=12u32 {
            let label = if prefill.contains(&p) { "kept" } else { "gap" };
            keep.add_party(label, 1).unwrap();
        }
        let gaps = 12 - prefill.len() as u32;
        keep.remove_party("gap", gaps).unwrap();
        prop_assert_eq!(positions(&keep), prefill.iter().copied().collect::<Vec<_>>());

        let free: Vec<u32> = (1..=12u32).filter(|p| !prefill.contains(p)).collect();
        let result = keep.add_party("new", size);
        if (size as usize) <= free.len() {
            prop_assert!(result.is_ok());
            let claimed: Vec<u32> = keep
                .seats()
                .filter(|s| s.occupant() == "new")
                .map(Seat::position)
                .collect();
            prop_assert_eq!(claimed, free[..size as usize].to_vec());
        } else {
            prop_assert!(result.is_err());
        }
    }
}
