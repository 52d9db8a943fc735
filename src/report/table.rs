//! Console rendering for reports, component lists, and the dashboard.
//!
//! Formatting primitives (column layout, truncation, colors) live in
//! [`crate::console`]; this module decides what goes into each row and
//! which colors status values get. Every print function takes a writer so
//! tests can capture plain-text output.

use std::io::{self, Write};

use rust_decimal::Decimal;
use term::color;

use crate::console::{self, Align, TableWriter};
use crate::locale::{ReportLocale, ReportStrings};
use crate::types::{
    ComponentInfo, DashboardStats, DateRange, ReportPayload, ServiceRecordSummary, StockStatus,
    UpcomingService, UsageStatistics,
};

/// Cap for free-text columns so one long description cannot eat the table.
const MAX_TEXT_COLUMN: usize = 36;

/// Full usage report: header block, statistics, usage and price tables.
pub fn print_report<W: Write>(
    writer: W,
    payload: &ReportPayload,
    statistics: Option<&UsageStatistics>,
    range: &DateRange,
    locale: &ReportLocale,
    use_colors: bool,
) -> io::Result<()> {
    let strings = &locale.strings;
    let component = &payload.component;
    let mut table = TableWriter::new(writer, use_colors);

    table.write_title(&format!("{}: {}", strings.report_title, component.name))?;

    let labels = [strings.part_number, strings.supplier, strings.current_stock, strings.date_range];
    let label_width = labels.iter().copied().map(console::display_width).max().unwrap_or(0);

    if let Some(part_number) = &component.part_number {
        table.write_label_value(strings.part_number, part_number, label_width)?;
    }
    if let Some(company) = component.company_name() {
        table.write_label_value(strings.supplier, company, label_width)?;
    }
    let stock = format!(
        "{} ({})",
        component.stock_count,
        stock_label(component.stock_status(), strings)
    );
    table.write_label_value(strings.current_stock, &stock, label_width)?;
    table.write_label_value(strings.date_range, &locale.format_range(range), label_width)?;
    table.writeln()?;

    write_statistics(&mut table, statistics, locale)?;
    table.writeln()?;

    write_usage_table(&mut table, payload, locale)?;
    table.writeln()?;

    write_price_table(&mut table, payload, locale)
}

/// Component list with prices, stock status, and usage counts.
pub fn print_components<W: Write>(
    writer: W,
    components: &[ComponentInfo],
    locale: &ReportLocale,
    use_colors: bool,
) -> io::Result<()> {
    let strings = &locale.strings;
    let mut table = TableWriter::new(writer, use_colors);

    table.write_title(strings.component_list)?;
    if components.is_empty() {
        return table.write_line(&format!("  {}", strings.no_records));
    }

    let rows: Vec<([String; 8], StockStatus)> = components
        .iter()
        .map(|component| {
            let cells = [
                component.id.to_string(),
                component.name.clone(),
                component.part_number.clone().unwrap_or_else(|| "-".to_string()),
                component.company_name().unwrap_or("-").to_string(),
                locale.format_currency(component.price),
                component.stock_count.to_string(),
                component.usage_count().to_string(),
                stock_label(component.stock_status(), strings).to_string(),
            ];
            (cells, component.stock_status())
        })
        .collect();

    let headers = [
        "ID",
        strings.component_name,
        strings.part_number,
        strings.supplier,
        strings.unit_price,
        strings.current_stock,
        strings.usage,
        strings.status,
    ];
    let aligns = [
        Align::Right,
        Align::Left,
        Align::Left,
        Align::Left,
        Align::Right,
        Align::Right,
        Align::Right,
        Align::Left,
    ];
    // The four free-text columns split what the numeric columns leave over
    let text_cap = (console::console_width().saturating_sub(44) / 4).clamp(12, MAX_TEXT_COLUMN);
    let caps = [
        MAX_TEXT_COLUMN,
        text_cap,
        text_cap,
        text_cap,
        MAX_TEXT_COLUMN,
        MAX_TEXT_COLUMN,
        MAX_TEXT_COLUMN,
        text_cap,
    ];
    let mut widths = [0usize; 8];
    for (i, header) in headers.iter().enumerate() {
        widths[i] = console::column_width(
            header,
            rows.iter().map(|(cells, _)| cells[i].as_str()),
            caps[i],
        );
    }

    table.write_header_row(&headers, &widths, &aligns)?;
    for (cells, status) in &rows {
        let cell_refs: Vec<&str> = cells.iter().map(String::as_str).collect();
        table.write_row(&cell_refs, &widths, &aligns, stock_color(*status))?;
    }
    Ok(())
}

/// Dashboard overview: aggregate counts plus recent and upcoming services.
pub fn print_dashboard<W: Write>(
    writer: W,
    stats: &DashboardStats,
    recent: &[ServiceRecordSummary],
    upcoming: &[UpcomingService],
    locale: &ReportLocale,
    use_colors: bool,
) -> io::Result<()> {
    let strings = &locale.strings;
    let mut table = TableWriter::new(writer, use_colors);

    table.write_title(strings.dashboard_title)?;
    let counts: [(&str, String); 7] = [
        (strings.companies, stats.company_count.to_string()),
        (strings.customers, stats.customer_count.to_string()),
        (strings.vehicles, stats.vehicle_count.to_string()),
        (strings.technicians, stats.technician_count.to_string()),
        (strings.components, stats.component_count.to_string()),
        (strings.open_services, stats.open_service_count.to_string()),
        (strings.monthly_revenue, locale.format_currency(stats.monthly_revenue)),
    ];
    let label_width = counts.iter().map(|(label, _)| console::display_width(label)).max().unwrap_or(0);
    for (label, value) in &counts {
        table.write_label_value(label, value, label_width)?;
    }
    table.writeln()?;

    table.write_title(strings.recent_services)?;
    if recent.is_empty() {
        table.write_line(&format!("  {}", strings.no_records))?;
    } else {
        let rows: Vec<[String; 5]> = recent
            .iter()
            .map(|record| {
                [
                    locale.format_date(record.service_date),
                    record.vehicle_plate_no.clone(),
                    record.description.clone().unwrap_or_else(|| "-".to_string()),
                    record.status.clone(),
                    locale.format_currency(record.total_cost),
                ]
            })
            .collect();
        let headers = [
            strings.service_date,
            strings.vehicle_plate,
            strings.description,
            strings.status,
            strings.cost,
        ];
        let aligns = [Align::Left, Align::Left, Align::Left, Align::Left, Align::Right];
        write_table(&mut table, &headers, &aligns, &rows)?;
    }
    table.writeln()?;

    table.write_title(strings.upcoming_services)?;
    if upcoming.is_empty() {
        return table.write_line(&format!("  {}", strings.no_records));
    }
    let rows: Vec<[String; 3]> = upcoming
        .iter()
        .map(|service| {
            [
                locale.format_date(service.scheduled_date),
                service.vehicle_plate_no.clone(),
                service.note.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    let headers = [strings.scheduled_date, strings.vehicle_plate, strings.note];
    let aligns = [Align::Left, Align::Left, Align::Left];
    write_table(&mut table, &headers, &aligns, &rows)
}

/// Same seven figures the rendered report shows as stat cards.
fn write_statistics<W: Write>(
    table: &mut TableWriter<W>,
    statistics: Option<&UsageStatistics>,
    locale: &ReportLocale,
) -> io::Result<()> {
    let strings = &locale.strings;
    let Some(stats) = statistics else {
        return table.write_line(&format!("  {}", strings.no_statistics));
    };

    let rows: [(&str, String); 7] = [
        (strings.total_usage, locale.format_number(Decimal::from(stats.total_usage), 0)),
        (strings.total_quantity, locale.format_number(Decimal::from(stats.total_quantity), 0)),
        (strings.total_cost, locale.format_currency(stats.total_cost)),
        (strings.average_per_month, locale.format_number(stats.average_per_month, 2)),
        (strings.average_per_week, locale.format_number(stats.average_per_week, 2)),
        (strings.average_quantity_per_month, locale.format_number(stats.average_quantity_per_month, 2)),
        (strings.average_cost_per_month, locale.format_currency(stats.average_cost_per_month)),
    ];

    let label_width = rows.iter().map(|(label, _)| console::display_width(label)).max().unwrap_or(0);
    for (label, value) in &rows {
        table.write_label_value(label, value, label_width)?;
    }
    Ok(())
}

fn write_usage_table<W: Write>(
    table: &mut TableWriter<W>,
    payload: &ReportPayload,
    locale: &ReportLocale,
) -> io::Result<()> {
    let strings = &locale.strings;
    table.write_title(strings.usage_history)?;

    let records = payload.usage_records();
    if records.is_empty() {
        return table.write_line(&format!("  {}", strings.no_usage_records));
    }

    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|record| {
            [
                locale.format_date(record.service_date),
                record.vehicle_plate_no.clone(),
                locale.format_number(Decimal::from(record.quantity), 0),
                locale.format_currency(record.unit_price),
                locale.format_currency(record.cost),
            ]
        })
        .collect();
    let headers = [
        strings.service_date,
        strings.vehicle_plate,
        strings.quantity,
        strings.unit_price,
        strings.cost,
    ];
    let aligns = [Align::Left, Align::Left, Align::Right, Align::Right, Align::Right];
    write_table(table, &headers, &aligns, &rows)
}

fn write_price_table<W: Write>(
    table: &mut TableWriter<W>,
    payload: &ReportPayload,
    locale: &ReportLocale,
) -> io::Result<()> {
    let strings = &locale.strings;
    table.write_title(strings.price_history)?;

    if payload.price_history.is_empty() {
        return table.write_line(&format!("  {}", strings.no_price_records));
    }

    let rows: Vec<[String; 4]> = payload
        .price_history
        .iter()
        .map(|change| {
            [
                locale.format_date(change.change_date),
                locale.format_currency(change.old_price),
                locale.format_currency(change.new_price),
                change.reason.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    let headers = [strings.service_date, strings.old_price, strings.new_price, strings.reason];
    let aligns = [Align::Left, Align::Right, Align::Right, Align::Left];
    write_table(table, &headers, &aligns, &rows)
}

/// Header row plus data rows, with column widths sized to the content.
fn write_table<W: Write, const N: usize>(
    table: &mut TableWriter<W>,
    headers: &[&str; N],
    aligns: &[Align; N],
    rows: &[[String; N]],
) -> io::Result<()> {
    let mut widths = [0usize; N];
    for (i, header) in headers.iter().enumerate() {
        widths[i] = console::column_width(header, rows.iter().map(|row| row[i].as_str()), MAX_TEXT_COLUMN);
    }

    table.write_header_row(headers, &widths, aligns)?;
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        table.write_row(&cells, &widths, aligns, None)?;
    }
    Ok(())
}

fn stock_label(status: StockStatus, strings: &ReportStrings) -> &'static str {
    match status {
        StockStatus::InStock => strings.stock_in_stock,
        StockStatus::Low => strings.stock_low,
        StockStatus::Out => strings.stock_out,
    }
}

fn stock_color(status: StockStatus) -> Option<color::Color> {
    match status {
        StockStatus::InStock => None,
        StockStatus::Low => Some(color::BRIGHT_YELLOW),
        StockStatus::Out => Some(color::BRIGHT_RED),
    }
}
