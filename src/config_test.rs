/// Tests for the run-plan resolution module
#[cfg(test)]
mod tests {
    use crate::cli::CliArgs;
    use crate::config::{build_run_plan, ExportSelection, RunMode, DEFAULT_RANGE_DAYS};
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn args() -> CliArgs {
        CliArgs {
            component: Some(12),
            from: None,
            to: None,
            api_url: None,
            payload: None,
            list_components: false,
            dashboard: false,
            recent: 5,
            upcoming: 5,
            out_dir: PathBuf::from("."),
            no_pdf: false,
            json: false,
            png: false,
            locale: "tr".to_string(),
            fonts_dir: None,
            scale: 2.0,
            no_color: false,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn report_plan(args: &CliArgs) -> crate::config::ReportPlan {
        match build_run_plan(args).unwrap().mode {
            RunMode::Report(plan) => plan,
            other => panic!("expected report mode, got {:?}", other),
        }
    }

    #[test]
    fn test_default_range_trails_thirty_days() {
        let plan = report_plan(&args());

        assert_eq!(plan.range.total_days(), DEFAULT_RANGE_DAYS);
        assert_eq!(plan.component_id, Some(12));
    }

    #[test]
    fn test_explicit_range_is_kept() {
        let cli = CliArgs { from: Some(date(2026, 7, 1)), to: Some(date(2026, 7, 31)), ..args() };

        let plan = report_plan(&cli);

        assert_eq!(plan.range.start_date, date(2026, 7, 1));
        assert_eq!(plan.range.end_date, date(2026, 7, 31));
    }

    #[test]
    fn test_inverted_range_is_normalized() {
        let cli = CliArgs { from: Some(date(2026, 7, 31)), to: Some(date(2026, 7, 1)), ..args() };

        let plan = report_plan(&cli);

        assert_eq!(plan.range.start_date, date(2026, 7, 1));
        assert_eq!(plan.range.end_date, date(2026, 7, 31));
    }

    #[test]
    fn test_from_only_keeps_today_as_the_end() {
        let cli = CliArgs { from: Some(date(2026, 1, 1)), ..args() };

        let plan = report_plan(&cli);

        assert_eq!(plan.range.start_date, date(2026, 1, 1));
        assert_eq!(plan.range.end_date, chrono::Local::now().date_naive());
    }

    #[test]
    fn test_api_url_flag_beats_environment_and_default() {
        let cli = CliArgs { api_url: Some("http://servis.example.com/api".to_string()), ..args() };

        let plan = build_run_plan(&cli).unwrap();

        assert_eq!(plan.api_url, "http://servis.example.com/api");
    }

    #[test]
    fn test_export_selection_tracks_the_flags() {
        let cli = CliArgs { no_pdf: true, json: true, png: false, ..args() };

        let plan = report_plan(&cli);

        assert_eq!(plan.exports, ExportSelection { pdf: false, json: true, png: false });
        assert!(plan.exports.any());

        let cli = CliArgs { no_pdf: true, ..args() };
        assert!(!report_plan(&cli).exports.any());
    }

    #[test]
    fn test_missing_payload_file_is_rejected() {
        let cli = CliArgs { payload: Some(PathBuf::from("/nonexistent/payload.json")), ..args() };

        assert!(build_run_plan(&cli).is_err());
    }

    #[test]
    fn test_list_and_dashboard_modes() {
        let cli = CliArgs { list_components: true, ..args() };
        assert_eq!(build_run_plan(&cli).unwrap().mode, RunMode::ListComponents);

        let cli = CliArgs { dashboard: true, recent: 3, upcoming: 7, ..args() };
        assert_eq!(build_run_plan(&cli).unwrap().mode, RunMode::Dashboard { recent: 3, upcoming: 7 });
    }

    #[test]
    fn test_color_follows_the_no_color_flag() {
        let cli = CliArgs { no_color: true, ..args() };
        assert!(!build_run_plan(&cli).unwrap().color);
        assert!(build_run_plan(&args()).unwrap().color);
    }
}
