#[cfg(test)]
mod tests {
    use crate::events::TracingSlotEvents;
    use crate::logic::{
        book_slot, list_available_slots, BookSlotRequest, SheetSettings, BOOKING_LOG_HEADER,
    };
    use crate::memory::InMemorySheetStore;
    use agenda_common::Row;
    use agenda_config::SheetsConfig;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use serde_json::json;

    // Helper to run the async logic inside a proptest case
    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("Failed to build runtime")
            .block_on(future)
    }

    fn status_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("LIVRE".to_string()),
            Just(" livre ".to_string()),
            Just("OCUPADO".to_string()),
            Just("".to_string()),
            "[a-z]{1,6}",
        ]
    }

    // (day offset, hour, minute, status)
    fn rows_strategy() -> impl Strategy<Value = Vec<(u32, u32, u32, String)>> {
        prop::collection::vec((0..28u32, 0..24u32, 0..60u32, status_strategy()), 0..40)
    }

    fn build_store(rows: &[(u32, u32, u32, String)]) -> InMemorySheetStore {
        let mut slots: Vec<Row> = vec![vec![json!("Data"), json!("Hora"), json!("Status")]];
        slots.extend(rows.iter().map(|(day, hour, minute, status)| {
            vec![
                json!(format!("{:02}/06/2024", day + 1)),
                json!(format!("{:02}:{:02}", hour, minute)),
                json!(status),
            ]
        }));
        InMemorySheetStore::new()
            .with_table("Horarios", slots)
            .with_table(
                "Agendamentos",
                vec![BOOKING_LOG_HEADER.iter().map(|c| json!(c)).collect()],
            )
    }

    fn settings() -> SheetSettings {
        SheetSettings::from_config(&SheetsConfig::default()).expect("default settings")
    }

    proptest! {
        // Every listed slot is a free row, and every free row is listed, in row order
        #[test]
        fn test_listing_matches_free_rows(rows in rows_strategy()) {
            let store = build_store(&rows);
            let slots = block_on(list_available_slots(&store, &settings(), &TracingSlotEvents))
                .expect("listing failed");

            let expected: Vec<usize> = rows
                .iter()
                .enumerate()
                .filter(|(_, (_, _, _, status))| status.trim().eq_ignore_ascii_case("LIVRE"))
                .map(|(index, _)| index + 2)
                .collect();
            let listed: Vec<usize> = slots.iter().map(|slot| slot.row_index).collect();
            prop_assert_eq!(listed, expected);

            for slot in &slots {
                let (day, hour, minute, _) = &rows[slot.row_index - 2];
                prop_assert_eq!(&slot.data, &format!("{:02}/06/2024", day + 1));
                prop_assert_eq!(&slot.hora, &format!("{:02}:{:02}", hour, minute));
            }
        }

        // Booking a listed slot removes exactly that slot and logs exactly one record
        #[test]
        fn test_booking_removes_only_the_booked_slot(rows in rows_strategy(), pick in any::<prop::sample::Index>()) {
            let store = build_store(&rows);
            let settings = settings();
            let before = block_on(list_available_slots(&store, &settings, &TracingSlotEvents))
                .expect("listing failed");
            prop_assume!(!before.is_empty());

            let chosen = before[pick.index(before.len())].row_index;
            let request = BookSlotRequest {
                row_index: Some(json!(chosen)),
                nome: Some("Ana".to_string()),
                ..BookSlotRequest::default()
            };
            let now = Utc.with_ymd_and_hms(2024, 5, 30, 12, 0, 0).unwrap();
            block_on(book_slot(&store, &settings, &TracingSlotEvents, request.clone(), now))
                .expect("booking failed");

            let after = block_on(list_available_slots(&store, &settings, &TracingSlotEvents))
                .expect("listing failed");
            let expected: Vec<usize> = before
                .iter()
                .map(|slot| slot.row_index)
                .filter(|row| *row != chosen)
                .collect();
            let remaining: Vec<usize> = after.iter().map(|slot| slot.row_index).collect();
            prop_assert_eq!(remaining, expected);
            prop_assert_eq!(store.table("Agendamentos").map(|t| t.len()), Some(2));

            // The same slot can never be booked twice.
            let second = block_on(book_slot(&store, &settings, &TracingSlotEvents, request, now));
            prop_assert!(second.is_err());
            prop_assert_eq!(store.table("Agendamentos").map(|t| t.len()), Some(2));
        }
    }
}
