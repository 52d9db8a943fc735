use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "envanter-rapor")]
#[command(about = "Generate spare-part usage reports and export them as paginated A4 PDFs")]
#[command(version)]
pub struct CliArgs {
    /// Inventory component (spare part) to report on
    #[arg(long, short = 'c', value_name = "ID")]
    pub component: Option<i64>,

    /// Start of the report range, inclusive (YYYY-MM-DD)
    /// Default: 30 days before the end of the range
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// End of the report range, inclusive (YYYY-MM-DD). Default: today
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Base URL of the service-management API
    /// Default: $ENVANTER_API_URL, then http://localhost:5000/api
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Read the report payload from a JSON file instead of the API
    #[arg(long, value_name = "PATH")]
    pub payload: Option<PathBuf>,

    /// List inventory components with stock status instead of reporting
    #[arg(long)]
    pub list_components: bool,

    /// Show the dashboard summary instead of reporting
    #[arg(long)]
    pub dashboard: bool,

    /// How many recent service records the dashboard shows
    #[arg(long, default_value = "5", value_name = "N")]
    pub recent: usize,

    /// How many upcoming services the dashboard shows
    #[arg(long, default_value = "5", value_name = "N")]
    pub upcoming: usize,

    /// Directory exported artifacts are written to
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Skip the PDF export (console report only)
    #[arg(long)]
    pub no_pdf: bool,

    /// Also export the payload and statistics as a JSON artifact
    #[arg(long)]
    pub json: bool,

    /// Also export the captured report image as a PNG artifact
    #[arg(long)]
    pub png: bool,

    /// Display locale for currency and dates (tr or en)
    #[arg(long, default_value = "tr", value_name = "LOCALE")]
    pub locale: String,

    /// Extra directory to load fonts from for the report capture
    #[arg(long, value_name = "DIR")]
    pub fonts_dir: Option<PathBuf>,

    /// Oversampling factor for the report capture
    #[arg(long, default_value = "2.0", value_name = "FACTOR")]
    pub scale: f32,

    /// Disable colored console output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        // Can't ask for two different views at once
        if self.list_components && self.dashboard {
            return Err("Cannot specify both --list-components and --dashboard".to_string());
        }

        // The report mode needs something to report on
        if !self.list_components
            && !self.dashboard
            && self.component.is_none()
            && self.payload.is_none()
        {
            return Err(
                "Must specify a component with --component <ID>, a saved payload with --payload <PATH>, \
                 or one of --list-components / --dashboard"
                    .to_string(),
            );
        }

        if !self.scale.is_finite() || self.scale <= 0.0 || self.scale > 8.0 {
            return Err(format!("--scale must be between 0 and 8, got {}", self.scale));
        }

        if crate::locale::ReportLocale::from_tag(&self.locale).is_none() {
            return Err(format!("Unknown locale '{}'. Supported: tr, en", self.locale));
        }

        Ok(())
    }
}

/// Parse a `YYYY-MM-DD` date flag value
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}': {} (expected YYYY-MM-DD)", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
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

    #[test]
    fn test_validate_report_mode_needs_a_component_or_payload() {
        let args = CliArgs { component: None, ..base_args() };
        assert!(args.validate().is_err());

        let args = CliArgs { component: None, payload: Some(PathBuf::from("report.json")), ..base_args() };
        assert!(args.validate().is_ok());

        let args = CliArgs { component: None, list_components: true, ..base_args() };
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_two_views_at_once() {
        let args = CliArgs { list_components: true, dashboard: true, ..base_args() };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_scale_and_locale() {
        let args = CliArgs { scale: 0.0, ..base_args() };
        assert!(args.validate().is_err());

        let args = CliArgs { scale: 64.0, ..base_args() };
        assert!(args.validate().is_err());

        let args = CliArgs { locale: "de".to_string(), ..base_args() };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_parse_date_accepts_iso_and_rejects_everything_else() {
        assert_eq!(parse_date("2026-08-25").unwrap(), NaiveDate::from_ymd_opt(2026, 8, 25).unwrap());
        assert!(parse_date("25.08.2026").is_err());
        assert!(parse_date("2026-13-01").is_err());
    }
}
