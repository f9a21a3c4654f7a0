#[cfg(test)]
mod tests {
    use crate::cells::*;
    use chrono::{NaiveDate, NaiveTime};
    use chrono_tz::Tz;
    use serde_json::{json, Value};

    const TZ: Tz = Tz::America__Sao_Paulo;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_serial_number_date_and_time() {
        assert_eq!(cell_date(&json!(45453), TZ), Some(date(2024, 6, 10)));
        assert_eq!(cell_time(&json!(0.375), TZ), Some(time(9, 0)));
        // Date and time in one serial.
        let combined = json!(45453.604166666664);
        assert_eq!(cell_date(&combined, TZ), Some(date(2024, 6, 10)));
        assert_eq!(cell_time(&combined, TZ), Some(time(14, 30)));
    }

    #[test]
    fn test_text_dates_in_common_layouts() {
        for text in ["2024-06-10", "10/06/2024", "2024/06/10", " 10/06/2024 "] {
            assert_eq!(
                cell_date(&json!(text), TZ),
                Some(date(2024, 6, 10)),
                "failed for {:?}",
                text
            );
        }
    }

    #[test]
    fn test_text_times() {
        assert_eq!(cell_time(&json!("09:00"), TZ), Some(time(9, 0)));
        assert_eq!(cell_time(&json!("14:30:00"), TZ), Some(time(14, 30)));
        assert_eq!(cell_time(&json!("10/06/2024 08:15:00"), TZ), Some(time(8, 15)));
    }

    #[test]
    fn test_rfc3339_instants_are_moved_into_sheet_zone() {
        let value = json!("2024-06-10T12:00:00Z");
        assert_eq!(cell_date(&value, TZ), Some(date(2024, 6, 10)));
        assert_eq!(cell_time(&value, TZ), Some(time(9, 0)));

        // Late UTC instant falls on the previous local day.
        let late = json!("2024-06-11T01:30:00Z");
        assert_eq!(cell_date(&late, TZ), Some(date(2024, 6, 10)));
        assert_eq!(cell_time(&late, TZ), Some(time(22, 30)));
    }

    #[test]
    fn test_unreadable_cells() {
        for value in [json!(null), json!(""), json!("amanhã"), json!(true), json!(-1), json!([1])] {
            assert_eq!(cell_date(&value, TZ), None, "failed for {}", value);
            assert_eq!(cell_time(&value, TZ), None, "failed for {}", value);
        }
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_date(date(2024, 6, 1)), "01/06/2024");
        assert_eq!(format_time(time(9, 5)), "09:05");
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(date(2024, 6, 10)), "Segunda-feira");
        assert_eq!(weekday_name(date(2024, 6, 11)), "Terça-feira");
        assert_eq!(weekday_name(date(2024, 6, 15)), "Sábado");
        assert_eq!(weekday_name(date(2024, 6, 16)), "Domingo");
    }

    #[test]
    fn test_normalize_status() {
        assert_eq!(normalize_status(&json!(" livre ")), "LIVRE");
        assert_eq!(normalize_status(&json!("Ocupado")), "OCUPADO");
        assert_eq!(normalize_status(&Value::Null), "");
        assert_eq!(normalize_status(&json!(1)), "1");
    }

    #[test]
    fn test_cell_lookup_is_one_based_and_tolerates_short_rows() {
        let row = vec![json!("a"), json!("b")];
        assert_eq!(cell(&row, 1), &json!("a"));
        assert_eq!(cell(&row, 2), &json!("b"));
        assert_eq!(cell(&row, 3), &Value::Null);
        assert_eq!(cell(&row, 0), &Value::Null);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&json!("   ")));
        assert!(!is_blank(&json!(0)));
        assert!(!is_blank(&json!("x")));
    }
}
