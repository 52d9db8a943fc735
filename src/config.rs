/// Run-plan resolution module
///
/// This module handles:
/// - Building an immutable RunPlan from CLI arguments
/// - Picking the run mode (report, component list, dashboard)
/// - Date-range defaulting and normalization
/// - API base URL resolution (flag, then environment, then default)
use crate::api;
use crate::cli::CliArgs;
use crate::locale::ReportLocale;
use crate::report::RasterOptions;
use crate::types::DateRange;
use crate::ui;
use log::debug;
use std::env;
use std::path::PathBuf;

/// Environment variable consulted when --api-url is not given.
pub const API_URL_ENV: &str = "ENVANTER_API_URL";

/// Days in the default report range when --from is omitted.
pub const DEFAULT_RANGE_DAYS: i64 = 30;

/// Which view the invocation asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum RunMode {
    Report(ReportPlan),
    ListComponents,
    Dashboard { recent: usize, upcoming: usize },
}

/// Everything the report mode needs to run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPlan {
    /// Component to fetch. `None` only when a payload file supplies it.
    pub component_id: Option<i64>,
    /// Local payload file used instead of the API when present.
    pub payload_file: Option<PathBuf>,
    pub range: DateRange,
    pub exports: ExportSelection,
}

/// Which artifacts the export stage should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSelection {
    pub pdf: bool,
    pub json: bool,
    pub png: bool,
}

impl ExportSelection {
    pub fn any(&self) -> bool {
        self.pdf || self.json || self.png
    }
}

/// Fully resolved, immutable description of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub mode: RunMode,
    pub api_url: String,
    pub locale: ReportLocale,
    pub out_dir: PathBuf,
    pub raster: RasterOptions,
    pub color: bool,
}

/// Build a complete RunPlan from CLI arguments
///
/// This resolves all configuration upfront, so the pipeline receives a
/// fully validated, immutable description of what to do.
pub fn build_run_plan(args: &CliArgs) -> Result<RunPlan, String> {
    debug!("Building run plan from CLI args");

    // Step 1: Pick the run mode
    let mode = if args.list_components {
        RunMode::ListComponents
    } else if args.dashboard {
        RunMode::Dashboard { recent: args.recent, upcoming: args.upcoming }
    } else {
        RunMode::Report(resolve_report_plan(args)?)
    };

    // Step 2: Resolve the API base URL (flag, then environment, then default)
    let api_url = resolve_api_url(args.api_url.as_deref());

    debug!("API base URL: {}", api_url);

    // Step 3: Resolve the display locale
    let locale = ReportLocale::from_tag(&args.locale)
        .ok_or_else(|| format!("Unknown locale '{}'. Supported: tr, en", args.locale))?;

    debug!("Locale: {}", locale.tag);

    Ok(RunPlan {
        mode,
        api_url,
        locale,
        out_dir: args.out_dir.clone(),
        raster: RasterOptions { scale: args.scale, fonts_dir: args.fonts_dir.clone(), ..RasterOptions::default() },
        color: !args.no_color,
    })
}

/// Resolve the report-mode specifics: range, exports, payload source
fn resolve_report_plan(args: &CliArgs) -> Result<ReportPlan, String> {
    let end = args.to.unwrap_or_else(|| chrono::Local::now().date_naive());
    let range = match args.from {
        Some(start) => {
            if start > end {
                // DateRange::new swaps the endpoints; tell the user we did so
                ui::status(&format!("Warning: --from {} is after --to {}, swapping the range endpoints", start, end));
            }
            DateRange::new(start, end)
        }
        None => DateRange::trailing(end, DEFAULT_RANGE_DAYS),
    };

    debug!("Report range: {} to {} ({} days)", range.start_date, range.end_date, range.total_days());

    if let Some(file) = &args.payload
        && !file.exists()
    {
        return Err(format!("Payload file {} does not exist", file.display()));
    }

    Ok(ReportPlan {
        component_id: args.component,
        payload_file: args.payload.clone(),
        range,
        exports: ExportSelection { pdf: !args.no_pdf, json: args.json, png: args.png },
    })
}

/// Resolve the API base URL: flag beats environment beats default
fn resolve_api_url(flag: Option<&str>) -> String {
    if let Some(url) = flag {
        return url.to_string();
    }
    env::var(API_URL_ENV).unwrap_or_else(|_| api::DEFAULT_BASE_URL.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
