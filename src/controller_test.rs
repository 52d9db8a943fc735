/// Tests for the report fetch controller
#[cfg(test)]
mod tests {
    use crate::controller::{FetchPhase, Outcome, ReportController};
    use crate::error::FetchError;
    use crate::types::{ComponentInfo, DateRange, ReportPayload, UsageRecord};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(days: i64) -> DateRange {
        DateRange::trailing(date(2026, 8, 25), days)
    }

    fn payload(name: &str, visits: usize) -> ReportPayload {
        let record = UsageRecord {
            service_date: date(2026, 8, 2),
            vehicle_plate_no: "34 KL 907".to_string(),
            quantity: 1,
            unit_price: Decimal::from(250),
            cost: Decimal::from(250),
        };
        ReportPayload {
            component: ComponentInfo {
                id: 12,
                name: name.to_string(),
                part_number: None,
                price: Decimal::from(250),
                stock_count: 9,
                reorder_level: 3,
                company: None,
                service_components: None,
            },
            usage_history: Some(vec![record; visits]),
            price_history: Vec::new(),
        }
    }

    fn failure() -> FetchError {
        FetchError::Status { status: 500, url: "http://localhost:5000/api/components/12/usage-report".to_string() }
    }

    #[test]
    fn test_start_without_component_is_a_no_op() {
        let mut controller = ReportController::new();

        assert!(controller.start(None, range(30)).is_none());

        let snap = controller.snapshot();
        assert_eq!(snap.phase, FetchPhase::Idle);
        assert!(snap.component_id.is_none());
        assert!(snap.payload.is_none());
    }

    #[test]
    fn test_start_moves_to_loading_and_issues_a_ticket() {
        let mut controller = ReportController::new();

        let ticket = controller.start(Some(12), range(30)).unwrap();

        assert_eq!(ticket.component_id, 12);
        let snap = controller.snapshot();
        assert_eq!(snap.phase, FetchPhase::Loading);
        assert_eq!(snap.component_id, Some(12));
        assert!(snap.error.is_none());
    }

    #[test]
    fn test_successful_resolve_loads_payload_and_statistics() {
        let mut controller = ReportController::new();
        let ticket = controller.start(Some(12), range(30)).unwrap();

        let outcome = controller.resolve(ticket, Ok(payload("Debriyaj Seti", 2)));

        assert_eq!(outcome, Outcome::Applied);
        let snap = controller.snapshot();
        assert_eq!(snap.phase, FetchPhase::Loaded);
        assert_eq!(snap.payload.as_ref().unwrap().component.name, "Debriyaj Seti");
        assert_eq!(snap.statistics.as_ref().unwrap().total_usage, 2);
        assert!(snap.error.is_none());
    }

    #[test]
    fn test_first_fetch_failure_has_nothing_to_fall_back_to() {
        let mut controller = ReportController::new();
        let ticket = controller.start(Some(12), range(30)).unwrap();

        controller.resolve(ticket, Err(failure()));

        let snap = controller.snapshot();
        assert_eq!(snap.phase, FetchPhase::Failed);
        assert!(snap.payload.is_none());
        assert!(snap.statistics.is_none());
        assert!(snap.error.as_ref().unwrap().contains("500"));
    }

    #[test]
    fn test_failed_refresh_keeps_last_known_good_data() {
        let mut controller = ReportController::new();
        let first = controller.start(Some(12), range(30)).unwrap();
        controller.resolve(first, Ok(payload("Debriyaj Seti", 2)));

        // Refresh keeps the loaded data visible while loading
        let second = controller.start(Some(12), range(60)).unwrap();
        assert_eq!(controller.snapshot().phase, FetchPhase::Loading);
        assert!(controller.snapshot().payload.is_some());

        controller.resolve(second, Err(failure()));

        let snap = controller.snapshot();
        assert_eq!(snap.phase, FetchPhase::Failed);
        assert_eq!(snap.payload.as_ref().unwrap().component.name, "Debriyaj Seti");
        assert_eq!(snap.statistics.as_ref().unwrap().total_usage, 2);
        assert!(snap.error.is_some());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut controller = ReportController::new();
        let first = controller.start(Some(12), range(90)).unwrap();
        let second = controller.start(Some(12), range(30)).unwrap();

        // The older request completes after the newer one was issued
        let outcome = controller.resolve(first, Ok(payload("Eski Cevap", 9)));

        assert_eq!(outcome, Outcome::Discarded);
        assert_eq!(controller.snapshot().phase, FetchPhase::Loading);
        assert!(controller.snapshot().payload.is_none());

        let outcome = controller.resolve(second, Ok(payload("Yeni Cevap", 1)));

        assert_eq!(outcome, Outcome::Applied);
        let snap = controller.snapshot();
        assert_eq!(snap.phase, FetchPhase::Loaded);
        assert_eq!(snap.payload.as_ref().unwrap().component.name, "Yeni Cevap");
        assert_eq!(snap.statistics.as_ref().unwrap().total_usage, 1);
    }

    #[test]
    fn test_stale_response_after_newer_one_applied_changes_nothing() {
        let mut controller = ReportController::new();
        let first = controller.start(Some(12), range(90)).unwrap();
        let second = controller.start(Some(12), range(30)).unwrap();
        controller.resolve(second, Ok(payload("Yeni Cevap", 1)));

        let outcome = controller.resolve(first, Err(failure()));

        assert_eq!(outcome, Outcome::Discarded);
        let snap = controller.snapshot();
        assert_eq!(snap.phase, FetchPhase::Loaded);
        assert_eq!(snap.payload.as_ref().unwrap().component.name, "Yeni Cevap");
        assert!(snap.error.is_none());
    }

    #[test]
    fn test_reload_recomputes_statistics_for_the_new_range() {
        let mut controller = ReportController::new();
        let first = controller.start(Some(12), range(30)).unwrap();
        controller.resolve(first, Ok(payload("Debriyaj Seti", 2)));
        let monthly = controller.snapshot().statistics.as_ref().unwrap().average_per_month;

        // Same data over twice the range halves the monthly average
        let second = controller.start(Some(12), range(60)).unwrap();
        controller.resolve(second, Ok(payload("Debriyaj Seti", 2)));
        let halved = controller.snapshot().statistics.as_ref().unwrap().average_per_month;

        assert_eq!(halved * Decimal::from(2), monthly);
    }

    #[test]
    fn test_export_flag_is_independent_of_the_fetch_phase() {
        let mut controller = ReportController::new();
        let ticket = controller.start(Some(12), range(30)).unwrap();

        assert!(controller.begin_export());
        // A second export cannot start while one is running
        assert!(!controller.begin_export());

        // Fetch transitions leave the export flag alone
        controller.resolve(ticket, Ok(payload("Debriyaj Seti", 2)));
        assert!(controller.snapshot().exporting);
        assert_eq!(controller.snapshot().phase, FetchPhase::Loaded);

        // Finishing the export leaves the fetch phase alone
        controller.finish_export();
        assert!(!controller.snapshot().exporting);
        assert_eq!(controller.snapshot().phase, FetchPhase::Loaded);
    }

    #[test]
    fn test_export_can_run_again_after_finishing() {
        let mut controller = ReportController::new();

        assert!(controller.begin_export());
        controller.finish_export();
        assert!(controller.begin_export());
    }
}
