//! Report export functions for PDF, PNG and JSON artifacts.
//!
//! This module drives the whole export chain: build the region, capture
//! it, plan the page tiling and write the requested artifact files. Every
//! artifact is fully rendered in memory before a single filesystem write,
//! so a failed export never leaves a partial file behind.

use crate::config::ExportSelection;
use crate::error::ExportError;
use crate::locale::ReportLocale;
use crate::report::paginate::{layout_pages, A4_PORTRAIT};
use crate::report::pdf::render_pdf;
use crate::report::raster::{rasterize_region, RasterOptions};
use crate::report::view::build_report_region;
use crate::types::{DateRange, ReportPayload, UsageStatistics};
use chrono::NaiveDate;
use log::debug;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

/// Deterministic artifact file name: `{prefix}-{componentId}-{date}.{ext}`.
/// The date is always ISO `YYYY-MM-DD` regardless of display locale, so
/// re-running an export on the same day overwrites the same file.
pub fn artifact_file_name(prefix: &str, component_id: i64, date: NaiveDate, extension: &str) -> String {
    format!("{}-{}-{}.{}", prefix, component_id, date.format("%Y-%m-%d"), extension)
}

/// Produce the selected artifacts for one loaded report.
///
/// Returns the paths written, in the order they were produced. The PNG
/// and PDF share a single capture; the JSON artifact does not rasterize
/// anything.
///
/// # Arguments
/// * `payload` - The loaded report payload
/// * `statistics` - Derived statistics, absent when no history came back
/// * `range` - The report range, rendered on the header
/// * `locale` - Display locale, also supplies the file-name prefix
/// * `raster` - Capture options (scale, fonts)
/// * `out_dir` - Directory artifacts are written into
/// * `selection` - Which artifacts to produce
pub fn write_artifacts(
    payload: &ReportPayload,
    statistics: Option<&UsageStatistics>,
    range: &DateRange,
    locale: &ReportLocale,
    raster: &RasterOptions,
    out_dir: &Path,
    selection: &ExportSelection,
) -> Result<Vec<PathBuf>, ExportError> {
    let today = chrono::Local::now().date_naive();
    let component_id = payload.component.id;
    let mut written = Vec::new();

    if selection.json {
        let path = out_dir.join(artifact_file_name(locale.file_prefix, component_id, today, "json"));
        let bytes = encode_json_report(payload, statistics, range)?;
        fs::write(&path, bytes).map_err(|source| ExportError::write(&path, source))?;
        written.push(path);
    }

    if selection.pdf || selection.png {
        let region = build_report_region(payload, statistics, range, locale, today);
        debug!("report region is {:.0}x{:.0} units", region.width, region.height);
        let bitmap = rasterize_region(&region, raster)?;

        if selection.png {
            let path = out_dir.join(artifact_file_name(locale.file_prefix, component_id, today, "png"));
            let bytes = bitmap.encode_png()?;
            fs::write(&path, bytes).map_err(|source| ExportError::write(&path, source))?;
            written.push(path);
        }

        if selection.pdf {
            let path = out_dir.join(artifact_file_name(locale.file_prefix, component_id, today, "pdf"));
            let layout = layout_pages(bitmap.width(), bitmap.height(), A4_PORTRAIT)?;
            let title = format!("{}: {}", locale.strings.report_title, payload.component.name);
            let bytes = render_pdf(&title, &bitmap, &layout)?;
            fs::write(&path, bytes).map_err(|source| ExportError::write(&path, source))?;
            written.push(path);
        }
    }

    Ok(written)
}

/// Encode the combined payload, statistics and range as pretty JSON.
///
/// The wire casing is preserved, so a saved artifact can be fed back in
/// through the payload-file input.
fn encode_json_report(
    payload: &ReportPayload,
    statistics: Option<&UsageStatistics>,
    range: &DateRange,
) -> Result<Vec<u8>, ExportError> {
    let report = json!({
        "component": payload.component,
        "dateRange": range,
        "usageHistory": payload.usage_history,
        "priceHistory": payload.price_history,
        "statistics": statistics,
        "generatedAt": chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    });

    Ok(serde_json::to_vec_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ComponentInfo, UsageRecord};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payload() -> ReportPayload {
        ReportPayload {
            component: ComponentInfo {
                id: 12,
                name: "Fren Balatası".to_string(),
                part_number: Some("FB-2210".to_string()),
                price: Decimal::new(45050, 2),
                stock_count: 8,
                reorder_level: 5,
                company: None,
                service_components: None,
            },
            usage_history: Some(vec![UsageRecord {
                service_date: date(2026, 7, 3),
                vehicle_plate_no: "34 ABC 123".to_string(),
                quantity: 2,
                unit_price: Decimal::new(45050, 2),
                cost: Decimal::new(90100, 2),
            }]),
            price_history: Vec::new(),
        }
    }

    #[test]
    fn test_artifact_names_are_deterministic() {
        assert_eq!(
            artifact_file_name("envanter-raporu", 12, date(2026, 8, 25), "pdf"),
            "envanter-raporu-12-2026-08-25.pdf"
        );
        assert_eq!(
            artifact_file_name("inventory-report", 3, date(2026, 1, 5), "json"),
            "inventory-report-3-2026-01-05.json"
        );
    }

    #[test]
    fn test_json_report_keeps_wire_casing_and_statistics() {
        let data = payload();
        let range = DateRange::new(date(2026, 7, 1), date(2026, 7, 31));
        let stats = crate::stats::compute_statistics(Some(&data), &range).unwrap();

        let bytes = encode_json_report(&data, Some(&stats), &range).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["component"]["partNumber"], "FB-2210");
        assert_eq!(value["dateRange"]["startDate"], "2026-07-01");
        assert_eq!(value["statistics"]["totalUsage"], 1);
        assert!(value["usageHistory"].is_array());
        assert!(value.get("generatedAt").is_some());
    }

    #[test]
    fn test_json_report_for_a_payload_without_history() {
        let mut data = payload();
        data.usage_history = None;
        let range = DateRange::new(date(2026, 7, 1), date(2026, 7, 31));

        let bytes = encode_json_report(&data, None, &range).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert!(value["usageHistory"].is_null());
        assert!(value["statistics"].is_null());
    }

    #[test]
    fn test_write_artifacts_produces_the_selected_files() {
        let dir = tempfile::tempdir().unwrap();
        let data = payload();
        let range = DateRange::new(date(2026, 7, 1), date(2026, 7, 31));
        let stats = crate::stats::compute_statistics(Some(&data), &range);
        let selection = ExportSelection { pdf: true, json: true, png: true };

        let written = write_artifacts(
            &data,
            stats.as_ref(),
            &range,
            &ReportLocale::turkish(),
            &RasterOptions::default(),
            dir.path(),
            &selection,
        )
        .unwrap();

        assert_eq!(written.len(), 3);
        for path in &written {
            assert!(path.exists(), "missing artifact {:?}", path);
        }

        let pdf = written.iter().find(|p| p.extension().is_some_and(|e| e == "pdf")).unwrap();
        let bytes = std::fs::read(pdf).unwrap();
        assert_eq!(&bytes[..5], b"%PDF-");

        let name = pdf.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("envanter-raporu-12-"), "unexpected name {}", name);
    }

    #[test]
    fn test_empty_selection_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let data = payload();
        let range = DateRange::new(date(2026, 7, 1), date(2026, 7, 31));
        let selection = ExportSelection { pdf: false, json: false, png: false };

        let written = write_artifacts(
            &data,
            None,
            &range,
            &ReportLocale::turkish(),
            &RasterOptions::default(),
            dir.path(),
            &selection,
        )
        .unwrap();

        assert!(written.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
