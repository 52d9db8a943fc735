//! Report region builder.
//!
//! Assembles the printable report view as an SVG document: header, summary
//! cards, usage table and price table, laid out top-down with a running
//! y-cursor. The markup is later rasterized by `raster` and paginated by
//! `paginate`; nothing here touches pixels or pages.

use crate::locale::ReportLocale;
use crate::types::{DateRange, ReportPayload, UsageStatistics};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Fixed width of the report region in SVG user units. Height grows with
/// content.
pub const REGION_WIDTH: f32 = 820.0;

const MARGIN: f32 = 24.0;
const TITLE_HEIGHT: f32 = 40.0;
const SUBTITLE_HEIGHT: f32 = 22.0;
const RANGE_HEIGHT: f32 = 30.0;
const SECTION_TITLE_HEIGHT: f32 = 34.0;
const HEADER_HEIGHT: f32 = 30.0;
const ROW_HEIGHT: f32 = 30.0;
const EMPTY_NOTE_HEIGHT: f32 = 40.0;
const SECTION_SPACING: f32 = 18.0;
const CARD_WIDTH: f32 = 181.0;
const CARD_HEIGHT: f32 = 58.0;
const CARD_SPACING: f32 = 16.0;
const CARDS_PER_ROW: usize = 4;
const FOOTER_HEIGHT: f32 = 34.0;

// Usage table column anchors; numeric columns are right-aligned
const X_DATE: f32 = MARGIN + 10.0;
const X_PLATE: f32 = 160.0;
const X_QTY_END: f32 = 420.0;
const X_UNIT_END: f32 = 610.0;
const X_COST_END: f32 = 796.0;

// Price table column anchors
const X_OLD_END: f32 = 360.0;
const X_NEW_END: f32 = 540.0;
const X_REASON: f32 = 580.0;

const SVG_TEMPLATE: &str = r##"<svg width="{{WIDTH}}" height="{{HEIGHT}}" viewBox="0 0 {{WIDTH}} {{HEIGHT}}" xmlns="http://www.w3.org/2000/svg">
<style>
    .title { font-size: 26px; font-weight: bold; fill: #1a202c; }
    .subtitle { font-size: 14px; fill: #4a5568; }
    .section-title { font-size: 17px; font-weight: bold; fill: #2d3748; }
    .card-value { font-size: 19px; font-weight: bold; fill: #1a202c; }
    .card-label { font-size: 11px; fill: #718096; }
    .table-text { font-size: 13px; fill: #2d3748; }
    .header-text { font-size: 12px; font-weight: bold; fill: #4a5568; }
    .muted { font-size: 13px; fill: #a0aec0; }
    .footer-text { font-size: 11px; fill: #a0aec0; }
</style>
<rect x="0" y="0" width="100%" height="100%" fill="#ffffff"/>
{{CONTENT}}
</svg>"##;

/// A fully laid-out report view, ready for rasterization.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRegion {
    pub markup: String,
    pub width: f32,
    pub height: f32,
}

/// Build the printable report region for one payload.
///
/// The statistics block is rendered only when `statistics` is present; a
/// payload without usage history simply has no summary cards. Table rows
/// always render, with localized placeholder lines when a section is
/// empty.
pub fn build_report_region(
    payload: &ReportPayload,
    statistics: Option<&UsageStatistics>,
    range: &DateRange,
    locale: &ReportLocale,
    generated_on: NaiveDate,
) -> ReportRegion {
    let mut y = MARGIN;
    let mut content = String::new();

    y = header_block(&mut content, payload, range, locale, y);

    if let Some(stats) = statistics {
        y = cards_block(&mut content, stats, locale, y);
    }

    y = usage_table(&mut content, payload, locale, y);
    y = price_table(&mut content, payload, locale, y);
    y = footer_block(&mut content, locale, generated_on, y);

    let height = y + MARGIN;
    let markup = SVG_TEMPLATE
        .replace("{{WIDTH}}", &format!("{:.0}", REGION_WIDTH))
        .replace("{{HEIGHT}}", &format!("{:.0}", height))
        .replace("{{CONTENT}}", &content);

    ReportRegion { markup, width: REGION_WIDTH, height }
}

/// Title, part identity line and the report range.
fn header_block(
    content: &mut String,
    payload: &ReportPayload,
    range: &DateRange,
    locale: &ReportLocale,
    mut y: f32,
) -> f32 {
    let strings = &locale.strings;
    let component = &payload.component;

    y += TITLE_HEIGHT / 2.0;
    content.push_str(&format!(
        r#"<text x="{x}" y="{y:.1}" class="title">{title}: {name}</text>"#,
        x = MARGIN,
        y = y + 8.0,
        title = escape_xml(strings.report_title),
        name = escape_xml(&component.name),
    ));
    content.push('\n');
    y += TITLE_HEIGHT / 2.0;

    let mut identity = Vec::new();
    if let Some(part_number) = &component.part_number {
        identity.push(format!("{}: {}", strings.part_number, part_number));
    }
    if let Some(company) = component.company_name() {
        identity.push(format!("{}: {}", strings.supplier, company));
    }
    identity.push(format!("{}: {}", strings.current_stock, component.stock_count));

    content.push_str(&format!(
        r#"<text x="{x}" y="{y:.1}" class="subtitle">{line}</text>"#,
        x = MARGIN,
        y = y + SUBTITLE_HEIGHT / 2.0,
        line = escape_xml(&identity.join("  |  ")),
    ));
    content.push('\n');
    y += SUBTITLE_HEIGHT;

    content.push_str(&format!(
        r#"<text x="{x}" y="{y:.1}" class="subtitle">{label}: {value}</text>"#,
        x = MARGIN,
        y = y + RANGE_HEIGHT / 2.0,
        label = escape_xml(strings.date_range),
        value = locale.format_range(range),
    ));
    content.push('\n');
    y += RANGE_HEIGHT + SECTION_SPACING;

    y
}

/// Summary statistic cards, four per row.
fn cards_block(content: &mut String, stats: &UsageStatistics, locale: &ReportLocale, mut y: f32) -> f32 {
    let strings = &locale.strings;
    let cards: [(&str, String); 7] = [
        (strings.total_usage, locale.format_number(Decimal::from(stats.total_usage), 0)),
        (strings.total_quantity, locale.format_number(Decimal::from(stats.total_quantity), 0)),
        (strings.total_cost, locale.format_currency(stats.total_cost)),
        (strings.average_per_month, locale.format_number(stats.average_per_month, 2)),
        (strings.average_per_week, locale.format_number(stats.average_per_week, 2)),
        (strings.average_quantity_per_month, locale.format_number(stats.average_quantity_per_month, 2)),
        (strings.average_cost_per_month, locale.format_currency(stats.average_cost_per_month)),
    ];

    for (index, (label, value)) in cards.iter().enumerate() {
        let column = index % CARDS_PER_ROW;
        let row = index / CARDS_PER_ROW;
        let x = MARGIN + column as f32 * (CARD_WIDTH + CARD_SPACING);
        let card_y = y + row as f32 * (CARD_HEIGHT + CARD_SPACING);

        content.push_str(&format!(
            r##"<rect x="{x:.1}" y="{y:.1}" width="{w:.0}" height="{h:.0}" rx="4" fill="#f7fafc" stroke="#e2e8f0"/>
<text x="{tx:.1}" y="{vy:.1}" class="card-value">{value}</text>
<text x="{tx:.1}" y="{ly:.1}" class="card-label">{label}</text>
"##,
            x = x,
            y = card_y,
            w = CARD_WIDTH,
            h = CARD_HEIGHT,
            tx = x + 14.0,
            vy = card_y + 26.0,
            ly = card_y + 45.0,
            value = escape_xml(value),
            label = escape_xml(label),
        ));
    }

    let rows = cards.len().div_ceil(CARDS_PER_ROW);
    y += rows as f32 * (CARD_HEIGHT + CARD_SPACING) + SECTION_SPACING;
    y
}

/// Usage history table with zebra rows.
fn usage_table(content: &mut String, payload: &ReportPayload, locale: &ReportLocale, mut y: f32) -> f32 {
    let strings = &locale.strings;

    y = section_title(content, strings.usage_history, y);

    let records = payload.usage_records();
    if records.is_empty() {
        return empty_note(content, strings.no_usage_records, y);
    }

    content.push_str(&format!(
        r##"<g class="header">
<rect x="{x:.0}" y="{y:.1}" width="{w:.0}" height="{h:.0}" fill="#edf2f7"/>
<text x="{date_x:.0}" y="{ty:.1}" class="header-text">{date}</text>
<text x="{plate_x:.0}" y="{ty:.1}" class="header-text">{plate}</text>
<text x="{qty_x:.0}" y="{ty:.1}" class="header-text" text-anchor="end">{qty}</text>
<text x="{unit_x:.0}" y="{ty:.1}" class="header-text" text-anchor="end">{unit}</text>
<text x="{cost_x:.0}" y="{ty:.1}" class="header-text" text-anchor="end">{cost}</text>
</g>
"##,
        x = MARGIN,
        y = y,
        w = REGION_WIDTH - 2.0 * MARGIN,
        h = HEADER_HEIGHT,
        ty = y + HEADER_HEIGHT / 2.0 + 4.0,
        date_x = X_DATE,
        plate_x = X_PLATE,
        qty_x = X_QTY_END,
        unit_x = X_UNIT_END,
        cost_x = X_COST_END,
        date = escape_xml(strings.service_date),
        plate = escape_xml(strings.vehicle_plate),
        qty = escape_xml(strings.quantity),
        unit = escape_xml(strings.unit_price),
        cost = escape_xml(strings.cost),
    ));
    y += HEADER_HEIGHT;

    for (i, record) in records.iter().enumerate() {
        let mid_y = y + ROW_HEIGHT / 2.0 + 4.0;
        let bg = if i % 2 == 0 { "#ffffff" } else { "#f8f9fa" };

        content.push_str(&format!(
            r##"<rect x="{x:.0}" y="{y:.1}" width="{w:.0}" height="{h:.0}" fill="{bg}"/>
<line x1="{x:.0}" y1="{ly:.1}" x2="{x2:.0}" y2="{ly:.1}" stroke="#eeeeee" stroke-width="1"/>
<text x="{date_x:.0}" y="{my:.1}" class="table-text">{date}</text>
<text x="{plate_x:.0}" y="{my:.1}" class="table-text">{plate}</text>
<text x="{qty_x:.0}" y="{my:.1}" class="table-text" text-anchor="end">{qty}</text>
<text x="{unit_x:.0}" y="{my:.1}" class="table-text" text-anchor="end">{unit}</text>
<text x="{cost_x:.0}" y="{my:.1}" class="table-text" text-anchor="end">{cost}</text>
"##,
            x = MARGIN,
            y = y,
            w = REGION_WIDTH - 2.0 * MARGIN,
            h = ROW_HEIGHT,
            x2 = REGION_WIDTH - MARGIN,
            ly = y + ROW_HEIGHT,
            my = mid_y,
            bg = bg,
            date_x = X_DATE,
            plate_x = X_PLATE,
            qty_x = X_QTY_END,
            unit_x = X_UNIT_END,
            cost_x = X_COST_END,
            date = locale.format_date(record.service_date),
            plate = escape_xml(&record.vehicle_plate_no),
            qty = record.quantity,
            unit = locale.format_currency(record.unit_price),
            cost = locale.format_currency(record.cost),
        ));
        y += ROW_HEIGHT;
    }

    y + SECTION_SPACING
}

/// Price change table, or a placeholder when the component never changed
/// price.
fn price_table(content: &mut String, payload: &ReportPayload, locale: &ReportLocale, mut y: f32) -> f32 {
    let strings = &locale.strings;

    y = section_title(content, strings.price_history, y);

    if payload.price_history.is_empty() {
        return empty_note(content, strings.no_price_records, y);
    }

    content.push_str(&format!(
        r##"<g class="header">
<rect x="{x:.0}" y="{y:.1}" width="{w:.0}" height="{h:.0}" fill="#edf2f7"/>
<text x="{date_x:.0}" y="{ty:.1}" class="header-text">{date}</text>
<text x="{old_x:.0}" y="{ty:.1}" class="header-text" text-anchor="end">{old}</text>
<text x="{new_x:.0}" y="{ty:.1}" class="header-text" text-anchor="end">{new}</text>
<text x="{reason_x:.0}" y="{ty:.1}" class="header-text">{reason}</text>
</g>
"##,
        x = MARGIN,
        y = y,
        w = REGION_WIDTH - 2.0 * MARGIN,
        h = HEADER_HEIGHT,
        ty = y + HEADER_HEIGHT / 2.0 + 4.0,
        date_x = X_DATE,
        old_x = X_OLD_END,
        new_x = X_NEW_END,
        reason_x = X_REASON,
        date = escape_xml(strings.service_date),
        old = escape_xml(strings.old_price),
        new = escape_xml(strings.new_price),
        reason = escape_xml(strings.reason),
    ));
    y += HEADER_HEIGHT;

    for (i, change) in payload.price_history.iter().enumerate() {
        let mid_y = y + ROW_HEIGHT / 2.0 + 4.0;
        let bg = if i % 2 == 0 { "#ffffff" } else { "#f8f9fa" };

        content.push_str(&format!(
            r##"<rect x="{x:.0}" y="{y:.1}" width="{w:.0}" height="{h:.0}" fill="{bg}"/>
<line x1="{x:.0}" y1="{ly:.1}" x2="{x2:.0}" y2="{ly:.1}" stroke="#eeeeee" stroke-width="1"/>
<text x="{date_x:.0}" y="{my:.1}" class="table-text">{date}</text>
<text x="{old_x:.0}" y="{my:.1}" class="table-text" text-anchor="end">{old}</text>
<text x="{new_x:.0}" y="{my:.1}" class="table-text" text-anchor="end">{new}</text>
<text x="{reason_x:.0}" y="{my:.1}" class="table-text">{reason}</text>
"##,
            x = MARGIN,
            y = y,
            w = REGION_WIDTH - 2.0 * MARGIN,
            h = ROW_HEIGHT,
            x2 = REGION_WIDTH - MARGIN,
            ly = y + ROW_HEIGHT,
            my = mid_y,
            bg = bg,
            date_x = X_DATE,
            old_x = X_OLD_END,
            new_x = X_NEW_END,
            reason_x = X_REASON,
            date = locale.format_date(change.change_date),
            old = locale.format_currency(change.old_price),
            new = locale.format_currency(change.new_price),
            reason = escape_xml(change.reason.as_deref().unwrap_or("-")),
        ));
        y += ROW_HEIGHT;
    }

    y + SECTION_SPACING
}

fn footer_block(content: &mut String, locale: &ReportLocale, generated_on: NaiveDate, mut y: f32) -> f32 {
    content.push_str(&format!(
        r#"<text x="{x}" y="{y:.1}" class="footer-text">{label}: {date}</text>"#,
        x = MARGIN,
        y = y + FOOTER_HEIGHT / 2.0,
        label = escape_xml(locale.strings.generated_on),
        date = locale.format_date(generated_on),
    ));
    content.push('\n');
    y += FOOTER_HEIGHT;
    y
}

fn section_title(content: &mut String, title: &str, mut y: f32) -> f32 {
    content.push_str(&format!(
        r#"<text x="{x}" y="{y:.1}" class="section-title">{title}</text>"#,
        x = MARGIN,
        y = y + SECTION_TITLE_HEIGHT / 2.0 + 4.0,
        title = escape_xml(title),
    ));
    content.push('\n');
    y + SECTION_TITLE_HEIGHT
}

fn empty_note(content: &mut String, note: &str, mut y: f32) -> f32 {
    content.push_str(&format!(
        r#"<text x="{x}" y="{y:.1}" class="muted">{note}</text>"#,
        x = MARGIN + 10.0,
        y = y + EMPTY_NOTE_HEIGHT / 2.0,
        note = escape_xml(note),
    ));
    content.push('\n');
    y += EMPTY_NOTE_HEIGHT;
    y + SECTION_SPACING
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ComponentInfo, CompanyRef, PriceChangeRecord, UsageRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payload(history: Option<Vec<UsageRecord>>) -> ReportPayload {
        ReportPayload {
            component: ComponentInfo {
                id: 12,
                name: "Fren & Balata Seti".to_string(),
                part_number: Some("FB-2210".to_string()),
                price: Decimal::new(45050, 2),
                stock_count: 8,
                reorder_level: 5,
                company: Some(CompanyRef { id: 3, name: "Bosch".to_string() }),
                service_components: None,
            },
            usage_history: history,
            price_history: vec![PriceChangeRecord {
                change_date: date(2026, 6, 1),
                old_price: Decimal::from(400),
                new_price: Decimal::new(45050, 2),
                reason: Some("Kur farkı".to_string()),
            }],
        }
    }

    fn record() -> UsageRecord {
        UsageRecord {
            service_date: date(2026, 7, 3),
            vehicle_plate_no: "34 ABC 123".to_string(),
            quantity: 2,
            unit_price: Decimal::new(45050, 2),
            cost: Decimal::new(90100, 2),
        }
    }

    fn region(history: Option<Vec<UsageRecord>>, stats: Option<&UsageStatistics>) -> ReportRegion {
        let data = payload(history);
        let range = DateRange::new(date(2026, 7, 1), date(2026, 7, 31));
        build_report_region(&data, stats, &range, &ReportLocale::turkish(), date(2026, 8, 25))
    }

    fn stats() -> UsageStatistics {
        UsageStatistics {
            total_usage: 1,
            total_quantity: 2,
            total_cost: Decimal::new(90100, 2),
            average_per_month: Decimal::from(1),
            average_per_week: Decimal::new(25, 2),
            average_quantity_per_month: Decimal::from(2),
            average_cost_per_month: Decimal::new(90100, 2),
        }
    }

    #[test]
    fn test_region_escapes_markup_hostile_names() {
        let region = region(Some(vec![record()]), None);

        assert!(region.markup.contains("Fren &amp; Balata Seti"));
        assert!(!region.markup.contains("Fren & Balata Seti"));
    }

    #[test]
    fn test_region_contains_localized_rows_and_range() {
        let region = region(Some(vec![record()]), Some(&stats()));

        // Turkish currency and dates flow through the markup
        assert!(region.markup.contains("₺901,00"));
        assert!(region.markup.contains("03.07.2026"));
        assert!(region.markup.contains("01.07.2026 - 31.07.2026"));
        assert!(region.markup.contains("34 ABC 123"));
        assert!(region.markup.contains("Kullanım Geçmişi"));
    }

    #[test]
    fn test_statistics_cards_render_only_when_present() {
        let with = region(Some(vec![record()]), Some(&stats()));
        let without = region(None, None);

        assert!(with.markup.contains("Toplam Kullanım"));
        assert!(!without.markup.contains("Toplam Kullanım"));
    }

    #[test]
    fn test_empty_history_renders_a_placeholder_line() {
        let region = region(Some(Vec::new()), Some(&stats()));

        assert!(region.markup.contains("Bu aralıkta kullanım kaydı bulunmuyor"));
    }

    #[test]
    fn test_height_grows_with_rows() {
        let one = region(Some(vec![record()]), Some(&stats()));
        let many = region(Some(vec![record(); 40]), Some(&stats()));

        assert!(many.height > one.height);
        assert_eq!(one.width, REGION_WIDTH);
        // The declared viewport matches the computed height
        assert!(one.markup.contains(&format!(r#"height="{:.0}""#, one.height)));
    }

    #[test]
    fn test_footer_carries_the_generation_date() {
        let region = region(None, None);
        assert!(region.markup.contains("Oluşturulma: 25.08.2026"));
    }
}
