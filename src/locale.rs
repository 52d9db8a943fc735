/// Locale-aware display formatting
///
/// The report surface was built for Turkish workshops, so `tr` is the
/// default: lira amounts like `₺1.234,56` and short dates like
/// `25.08.2026`. The locale also carries the artifact file-name prefix and
/// the label strings used on the rendered report, so switching locales
/// switches the whole display contract in one place.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Label strings used on the rendered report and the console tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportStrings {
    pub report_title: &'static str,
    pub date_range: &'static str,
    pub part_number: &'static str,
    pub supplier: &'static str,
    pub current_stock: &'static str,
    pub total_usage: &'static str,
    pub total_quantity: &'static str,
    pub total_cost: &'static str,
    pub average_per_month: &'static str,
    pub average_per_week: &'static str,
    pub average_quantity_per_month: &'static str,
    pub average_cost_per_month: &'static str,
    pub usage_history: &'static str,
    pub price_history: &'static str,
    pub service_date: &'static str,
    pub vehicle_plate: &'static str,
    pub quantity: &'static str,
    pub unit_price: &'static str,
    pub cost: &'static str,
    pub old_price: &'static str,
    pub new_price: &'static str,
    pub reason: &'static str,
    pub no_usage_records: &'static str,
    pub no_price_records: &'static str,
    pub no_statistics: &'static str,
    pub generated_on: &'static str,
    // Console-only labels: component list and dashboard views.
    pub component_name: &'static str,
    pub usage: &'static str,
    pub status: &'static str,
    pub stock_in_stock: &'static str,
    pub stock_low: &'static str,
    pub stock_out: &'static str,
    pub component_list: &'static str,
    pub dashboard_title: &'static str,
    pub companies: &'static str,
    pub customers: &'static str,
    pub vehicles: &'static str,
    pub technicians: &'static str,
    pub components: &'static str,
    pub open_services: &'static str,
    pub monthly_revenue: &'static str,
    pub recent_services: &'static str,
    pub upcoming_services: &'static str,
    pub description: &'static str,
    pub note: &'static str,
    pub scheduled_date: &'static str,
    pub no_records: &'static str,
}

/// One display locale: number and date formats plus report strings.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLocale {
    pub tag: &'static str,
    pub currency_symbol: &'static str,
    pub decimal_separator: char,
    pub group_separator: char,
    /// `strftime`-style pattern for short dates.
    pub date_format: &'static str,
    /// First segment of exported artifact file names.
    pub file_prefix: &'static str,
    pub strings: ReportStrings,
}

impl ReportLocale {
    /// Turkish formatting, the default for every report surface.
    pub fn turkish() -> Self {
        ReportLocale {
            tag: "tr-TR",
            currency_symbol: "₺",
            decimal_separator: ',',
            group_separator: '.',
            date_format: "%d.%m.%Y",
            file_prefix: "envanter-raporu",
            strings: ReportStrings {
                report_title: "Envanter Kullanım Raporu",
                date_range: "Tarih Aralığı",
                part_number: "Parça No",
                supplier: "Tedarikçi",
                current_stock: "Mevcut Stok",
                total_usage: "Toplam Kullanım",
                total_quantity: "Toplam Adet",
                total_cost: "Toplam Tutar",
                average_per_month: "Aylık Ortalama",
                average_per_week: "Haftalık Ortalama",
                average_quantity_per_month: "Aylık Ortalama Adet",
                average_cost_per_month: "Aylık Ortalama Tutar",
                usage_history: "Kullanım Geçmişi",
                price_history: "Fiyat Geçmişi",
                service_date: "Tarih",
                vehicle_plate: "Plaka",
                quantity: "Adet",
                unit_price: "Birim Fiyat",
                cost: "Tutar",
                old_price: "Eski Fiyat",
                new_price: "Yeni Fiyat",
                reason: "Açıklama",
                no_usage_records: "Bu aralıkta kullanım kaydı bulunmuyor",
                no_price_records: "Fiyat değişikliği kaydı bulunmuyor",
                no_statistics: "İstatistik hesaplanamadı",
                generated_on: "Oluşturulma",
                component_name: "Ad",
                usage: "Kullanım",
                status: "Durum",
                stock_in_stock: "Stokta",
                stock_low: "Azalıyor",
                stock_out: "Tükendi",
                component_list: "Parça Listesi",
                dashboard_title: "Gösterge Paneli",
                companies: "Firmalar",
                customers: "Müşteriler",
                vehicles: "Araçlar",
                technicians: "Teknisyenler",
                components: "Parçalar",
                open_services: "Açık Servisler",
                monthly_revenue: "Aylık Ciro",
                recent_services: "Son Servis Kayıtları",
                upcoming_services: "Yaklaşan Servisler",
                description: "Açıklama",
                note: "Not",
                scheduled_date: "Planlanan Tarih",
                no_records: "Kayıt bulunmuyor",
            },
        }
    }

    /// English formatting. Amounts stay in lira; only the notation changes.
    pub fn english() -> Self {
        ReportLocale {
            tag: "en-US",
            currency_symbol: "TRY ",
            decimal_separator: '.',
            group_separator: ',',
            date_format: "%m/%d/%Y",
            file_prefix: "inventory-report",
            strings: ReportStrings {
                report_title: "Inventory Usage Report",
                date_range: "Date Range",
                part_number: "Part No",
                supplier: "Supplier",
                current_stock: "Current Stock",
                total_usage: "Total Usage",
                total_quantity: "Total Quantity",
                total_cost: "Total Cost",
                average_per_month: "Monthly Average",
                average_per_week: "Weekly Average",
                average_quantity_per_month: "Avg Quantity / Month",
                average_cost_per_month: "Avg Cost / Month",
                usage_history: "Usage History",
                price_history: "Price History",
                service_date: "Date",
                vehicle_plate: "Plate",
                quantity: "Qty",
                unit_price: "Unit Price",
                cost: "Cost",
                old_price: "Old Price",
                new_price: "New Price",
                reason: "Reason",
                no_usage_records: "No usage records in this range",
                no_price_records: "No recorded price changes",
                no_statistics: "Statistics unavailable",
                generated_on: "Generated",
                component_name: "Name",
                usage: "Usage",
                status: "Status",
                stock_in_stock: "In Stock",
                stock_low: "Low",
                stock_out: "Out of Stock",
                component_list: "Component List",
                dashboard_title: "Dashboard",
                companies: "Companies",
                customers: "Customers",
                vehicles: "Vehicles",
                technicians: "Technicians",
                components: "Components",
                open_services: "Open Services",
                monthly_revenue: "Monthly Revenue",
                recent_services: "Recent Service Records",
                upcoming_services: "Upcoming Services",
                description: "Description",
                note: "Note",
                scheduled_date: "Scheduled Date",
                no_records: "No records",
            },
        }
    }

    /// Resolve a locale flag value. Accepts short and full BCP 47 tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "tr" | "tr-TR" => Some(ReportLocale::turkish()),
            "en" | "en-US" => Some(ReportLocale::english()),
            _ => None,
        }
    }

    /// Format a monetary amount with the currency symbol, e.g. `₺1.234,56`.
    /// Negative amounts carry the sign before the symbol.
    pub fn format_currency(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp(2);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
        format!("{}{}{}", sign, self.currency_symbol, self.decimal_digits(rounded.abs(), 2))
    }

    /// Format a plain number with `dp` fraction digits and group separators.
    pub fn format_number(&self, value: Decimal, dp: u32) -> String {
        let rounded = value.round_dp(dp);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
        format!("{}{}", sign, self.decimal_digits(rounded.abs(), dp))
    }

    /// Format a date with the locale's short pattern.
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(self.date_format).to_string()
    }

    /// Both range endpoints, joined the way the report header shows them.
    pub fn format_range(&self, range: &crate::types::DateRange) -> String {
        format!("{} - {}", self.format_date(range.start_date), self.format_date(range.end_date))
    }

    /// Render a non-negative decimal (already rounded to at most `dp`
    /// fraction digits) with grouping and a fixed-width fraction part.
    fn decimal_digits(&self, value: Decimal, dp: u32) -> String {
        let text = value.to_string();
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, f),
            None => (text.as_str(), ""),
        };

        let mut out = group_digits(int_part, self.group_separator);
        if dp > 0 {
            out.push(self.decimal_separator);
            let dp = dp as usize;
            out.push_str(&frac_part[..frac_part.len().min(dp)]);
            for _ in frac_part.len()..dp {
                out.push('0');
            }
        }
        out
    }
}

/// Insert a separator every three digits, counting from the right.
fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DateRange;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_turkish_currency_uses_dotted_groups_and_comma_decimals() {
        let tr = ReportLocale::turkish();

        assert_eq!(tr.format_currency(Decimal::new(123456, 2)), "₺1.234,56");
        assert_eq!(tr.format_currency(Decimal::ZERO), "₺0,00");
        assert_eq!(tr.format_currency(Decimal::new(5, 0)), "₺5,00");
        assert_eq!(tr.format_currency(Decimal::new(123456789, 2)), "₺1.234.567,89");
    }

    #[test]
    fn test_english_currency_uses_comma_groups_and_dot_decimals() {
        let en = ReportLocale::english();

        assert_eq!(en.format_currency(Decimal::new(123456, 2)), "TRY 1,234.56");
        assert_eq!(en.format_currency(Decimal::new(99, 1)), "TRY 9.90");
    }

    #[test]
    fn test_currency_rounds_to_minor_units() {
        let tr = ReportLocale::turkish();

        // Banker's rounding on the half-cent, plain rounding elsewhere
        assert_eq!(tr.format_currency(Decimal::new(99999, 3)), "₺100,00");
        assert_eq!(tr.format_currency(Decimal::new(12344, 3)), "₺12,34");
    }

    #[test]
    fn test_negative_amounts_carry_the_sign_before_the_symbol() {
        let tr = ReportLocale::turkish();
        assert_eq!(tr.format_currency(Decimal::new(-123456, 2)), "-₺1.234,56");
    }

    #[test]
    fn test_number_formatting_with_and_without_fraction_digits() {
        let tr = ReportLocale::turkish();

        assert_eq!(tr.format_number(Decimal::new(225, 2), 2), "2,25");
        assert_eq!(tr.format_number(Decimal::new(1500, 0), 0), "1.500");
        assert_eq!(tr.format_number(Decimal::new(5, 0), 2), "5,00");
    }

    #[test]
    fn test_date_formats_per_locale() {
        let day = date(2026, 8, 25);

        assert_eq!(ReportLocale::turkish().format_date(day), "25.08.2026");
        assert_eq!(ReportLocale::english().format_date(day), "08/25/2026");
    }

    #[test]
    fn test_range_formatting() {
        let range = DateRange::new(date(2026, 7, 26), date(2026, 8, 25));
        assert_eq!(ReportLocale::turkish().format_range(&range), "26.07.2026 - 25.08.2026");
    }

    #[test]
    fn test_from_tag_accepts_short_and_full_tags() {
        assert_eq!(ReportLocale::from_tag("tr").map(|l| l.tag), Some("tr-TR"));
        assert_eq!(ReportLocale::from_tag("en-US").map(|l| l.tag), Some("en-US"));
        assert!(ReportLocale::from_tag("de").is_none());
    }
}
