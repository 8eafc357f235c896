// Свойства конвейера на случайных входах.

use proptest::prelude::*;
use serde_json::{json, Value};

use seatmap_core::{SeatMapConfig, SeatMapError, SeatMapSession};

fn payload_from(positions: &[(u32, u32)]) -> Value {
    let seats: Vec<Value> = positions
        .iter()
        .map(|&(row, col)| {
            json!({
                "row": row,
                "col": col,
                "x": col,
                "y": row,
                "status": 0,
                "type": 0,
            })
        })
        .collect();
    json!({
        "data": {
            "room_seat": [{
                "area_no": "1",
                "area_name": "zone",
                "area_price": 45,
                "seats": seats,
            }]
        }
    })
}

// Зал с шестью обычными местами и одной парой для прогонов toggle.
fn session_with_pair(max_seats: u32) -> SeatMapSession {
    let payload = json!({
        "data": {
            "room_seat": [{
                "area_no": "1",
                "area_name": "zone",
                "area_price": 45,
                "seats": [
                    { "seat_no": "n1", "row": 1, "col": 1, "x": 1, "y": 1, "status": 0 },
                    { "seat_no": "n2", "row": 1, "col": 2, "x": 2, "y": 1, "status": 0 },
                    { "seat_no": "n3", "row": 1, "col": 3, "x": 3, "y": 1, "status": 0 },
                    { "seat_no": "n4", "row": 1, "col": 4, "x": 4, "y": 1, "status": 0 },
                    { "seat_no": "n5", "row": 1, "col": 5, "x": 5, "y": 1, "status": 0 },
                    { "seat_no": "n6", "row": 1, "col": 6, "x": 6, "y": 1, "status": 0 },
                    { "seat_no": "L", "row": 2, "col": 1, "x": 1, "y": 2, "status": 0, "type": 1 },
                    { "seat_no": "R", "row": 2, "col": 2, "x": 2, "y": 2, "status": 0, "type": 2 },
                ]
            }]
        }
    });
    let config = SeatMapConfig {
        max_seats,
        ..SeatMapConfig::default()
    };
    SeatMapSession::from_payload(&payload, &config).unwrap()
}

const KEYS: [&str; 8] = ["n1", "n2", "n3", "n4", "n5", "n6", "L", "R"];

proptest! {
    #[test]
    fn normalize_and_build_are_deterministic(
        positions in prop::collection::hash_set((1u32..=40, 1u32..=40), 1..60)
    ) {
        let positions: Vec<(u32, u32)> = positions.into_iter().collect();
        let payload = payload_from(&positions);
        let config = SeatMapConfig::default();

        let first = SeatMapSession::from_payload(&payload, &config).unwrap();
        let second = SeatMapSession::from_payload(&payload, &config).unwrap();

        prop_assert_eq!(first.matrix.rows(), second.matrix.rows());
        prop_assert_eq!(first.matrix.cols(), second.matrix.cols());
        prop_assert_eq!(first.matrix.seats(), second.matrix.seats());
    }

    #[test]
    fn canonical_positions_are_unique(
        positions in prop::collection::hash_set((1u32..=40, 1u32..=40), 1..60)
    ) {
        let positions: Vec<(u32, u32)> = positions.into_iter().collect();
        let payload = payload_from(&positions);
        let session = SeatMapSession::from_payload(&payload, &SeatMapConfig::default()).unwrap();

        let mut seen = std::collections::HashSet::new();
        for seat in session.matrix.seats() {
            prop_assert!(seen.insert((seat.canonical_row, seat.canonical_col)));
        }
        prop_assert_eq!(seen.len(), session.matrix.seat_count());
    }

    #[test]
    fn toggle_sequences_keep_invariants(
        ops in prop::collection::vec(0usize..KEYS.len(), 1..60),
        max_seats in 1u32..=6,
    ) {
        let mut session = session_with_pair(max_seats);

        for &op in &ops {
            match session.toggle(KEYS[op]) {
                Ok(_) => {}
                // Штатные отказы не меняют состояние, остальное - баг.
                Err(SeatMapError::SeatUnavailable { .. })
                | Err(SeatMapError::SelectionLimitExceeded { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected toggle error: {other}"),
            }

            let selection = session.selection.selected();
            prop_assert!(selection.len() as u32 <= max_seats);
            // Пара всегда целиком в выборе либо целиком вне его.
            prop_assert_eq!(
                selection.contains(&"L".to_string()),
                selection.contains(&"R".to_string())
            );
            // Выбор ссылается только на живые места, без дубликатов.
            let unique: std::collections::HashSet<_> = selection.iter().collect();
            prop_assert_eq!(unique.len(), selection.len());
            for key in selection {
                prop_assert!(session.matrix.contains_key(key));
            }
        }
    }

    #[test]
    fn limit_boundary_is_exact(max_seats in 1u32..=6) {
        let mut session = session_with_pair(max_seats);

        // Ровно до лимита добор проходит...
        for idx in 0..max_seats as usize {
            session.toggle(KEYS[idx]).unwrap();
        }
        prop_assert_eq!(session.selection.len() as u32, max_seats);

        // ...а следующий toggle отклоняется, не трогая выбор.
        let before: Vec<String> = session.selection.selected().to_vec();
        let err = session.toggle("R").unwrap_err();
        let limit_hit = matches!(err, SeatMapError::SelectionLimitExceeded { .. });
        prop_assert!(limit_hit);
        prop_assert_eq!(session.selection.selected(), &before[..]);
    }
}
