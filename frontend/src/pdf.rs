//! Expense report export.
//!
//! The report is laid out with printpdf's built-in Helvetica faces, which
//! only cover Latin-1, so amounts are written with "Rs." instead of the
//! rupee sign.

use chrono::{NaiveDateTime, TimeZone};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};
use wasm_bindgen::JsCast;

use crate::analytics::{FilterMode, FilterState, SortState};
use crate::error::ExportError;
use crate::format::{format_date, format_local_date, format_plain_amount, format_quantity, month_name};
use crate::models::{Expense, User};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LEFT: f32 = 15.0;
const RIGHT: f32 = 195.0;
const TOP: f32 = 282.0;
const BOTTOM: f32 = 20.0;
const ROW_HEIGHT: f32 = 6.0;

const X_INDEX: f32 = 15.0;
const X_NAME: f32 = 24.0;
const X_PURPOSE: f32 = 70.0;
const X_QTY: f32 = 110.0;
const X_PRICE: f32 = 125.0;
const X_TOTAL: f32 = 150.0;
const X_DATE: f32 = 175.0;

pub fn report_filename(millis: i64) -> String {
    format!("expense-report-{}.pdf", millis)
}

/// Lines of the "applied filters & sorting" block. Sorting is always listed.
pub fn describe_filters(filter: &FilterState, sort: &SortState) -> Vec<String> {
    let mut lines = Vec::new();
    match filter.mode {
        FilterMode::None => {}
        FilterMode::DateRange => {
            lines.push("Filter Type: Date Range Filter".to_string());
            let range = match (filter.range_from, filter.range_to) {
                (Some(from), Some(to)) => Some(format!("{} to {}", format_date(from), format_date(to))),
                (Some(from), None) => Some(format!("From {}", format_date(from))),
                (None, Some(to)) => Some(format!("Until {}", format_date(to))),
                (None, None) => None,
            };
            if let Some(range) = range {
                lines.push(format!("Date Range: {}", range));
            }
        }
        FilterMode::YearMonthDay => {
            lines.push("Filter Type: Year/Month/Day Filter".to_string());
            if let Some(year) = filter.year {
                let mut chart = format!("Year: {}", year);
                if let Some(month) = filter.month {
                    chart.push_str(&format!(", Month: {}", month_name(month)));
                }
                if let Some(day) = filter.day {
                    chart.push_str(&format!(", Day: {}", day));
                }
                lines.push(format!("Chart Filter: {}", chart));
            }
        }
    }
    if let Some(key) = &filter.selected_key {
        lines.push(format!("Date Filter: {}", key));
    }
    if !filter.selected_ids.is_empty() {
        lines.push(format!("Selected Expenses: {}", filter.selected_ids.len()));
    }
    lines.push(format!("Sorted By: {}", sort.describe()));
    lines
}

/// Builtin fonts cannot encode anything outside Latin-1.
fn pdf_text(text: &str) -> String {
    text.chars()
        .map(|ch| if (ch as u32) < 0x100 { ch } else { '?' })
        .collect()
}

fn clip(text: &str, max_chars: usize) -> String {
    let text = pdf_text(text);
    if text.chars().count() <= max_chars {
        return text;
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

fn rupees(amount: f64) -> String {
    format!("Rs. {}", format_plain_amount(amount))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn push_line(layer: &PdfLayerReference, font: &IndirectFontRef, text: &str, size: f32, x: f32, y: f32) {
    layer.use_text(pdf_text(text), size, Mm(x), Mm(y), font);
}

fn rule(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(LEFT), Mm(y)), false),
            (Point::new(Mm(RIGHT), Mm(y)), false),
        ],
        is_closed: false,
    });
}

fn table_header(layer: &PdfLayerReference, fonts: &Fonts, y: f32) -> f32 {
    let columns = [
        ("#", X_INDEX),
        ("Name", X_NAME),
        ("Purpose", X_PURPOSE),
        ("Qty", X_QTY),
        ("Price", X_PRICE),
        ("Total", X_TOTAL),
        ("Date", X_DATE),
    ];
    for (title, x) in columns {
        push_line(layer, &fonts.bold, title, 10.0, x, y);
    }
    rule(layer, y - 2.5);
    y - ROW_HEIGHT - 1.5
}

fn new_page(doc: &PdfDocumentReference, page_no: usize) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Page {}", page_no));
    doc.get_page(page).get_layer(layer)
}

pub fn build_report<Tz: TimeZone>(
    rows: &[Expense],
    user: Option<&User>,
    filter: &FilterState,
    sort: &SortState,
    generated_at: NaiveDateTime,
    tz: &Tz,
) -> Result<Vec<u8>, ExportError> {
    let pdf_err = |e: printpdf::Error| ExportError::Pdf(e.to_string());

    let (doc, page1, layer1) =
        PdfDocument::new("Expense Report", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?,
    };
    let mut layer = doc.get_page(page1).get_layer(layer1);
    let mut pages = 1;

    let mut y = TOP;
    push_line(&layer, &fonts.bold, "Expense Report", 20.0, LEFT, y);
    y -= 10.0;

    let (name, email) = user
        .map(|u| (u.username.as_str(), u.email.as_str()))
        .unwrap_or(("N/A", "N/A"));
    for line in [
        format!("User: {}", name),
        format!("Email: {}", email),
        format!("Generated: {}", generated_at.format("%-m/%-d/%Y %H:%M")),
    ] {
        push_line(&layer, &fonts.regular, &line, 10.0, LEFT, y);
        y -= 5.0;
    }

    let filters = describe_filters(filter, sort);
    y -= 3.0;
    push_line(&layer, &fonts.bold, "APPLIED FILTERS & SORTING:", 10.0, LEFT, y);
    y -= 5.0;
    for line in &filters {
        push_line(&layer, &fonts.regular, line, 9.0, LEFT + 3.0, y);
        y -= 4.5;
    }

    y -= 6.0;
    y = table_header(&layer, &fonts, y);

    for (index, expense) in rows.iter().enumerate() {
        if y < BOTTOM {
            pages += 1;
            layer = new_page(&doc, pages);
            y = table_header(&layer, &fonts, TOP);
        }
        push_line(&layer, &fonts.regular, &(index + 1).to_string(), 9.0, X_INDEX, y);
        push_line(&layer, &fonts.regular, &clip(&expense.name, 26), 9.0, X_NAME, y);
        push_line(&layer, &fonts.regular, &clip(&expense.purpose, 22), 9.0, X_PURPOSE, y);
        push_line(&layer, &fonts.regular, &format_quantity(expense.quantity), 9.0, X_QTY, y);
        push_line(&layer, &fonts.regular, &rupees(expense.price), 9.0, X_PRICE, y);
        push_line(&layer, &fonts.bold, &rupees(expense.total_amount), 9.0, X_TOTAL, y);
        push_line(
            &layer,
            &fonts.regular,
            &format_local_date(&expense.expense_date, tz),
            9.0,
            X_DATE,
            y,
        );
        y -= ROW_HEIGHT;
    }

    if y < BOTTOM + 10.0 {
        pages += 1;
        layer = new_page(&doc, pages);
        y = TOP;
    }
    rule(&layer, y + 2.0);
    y -= 5.0;
    let total: f64 = rows.iter().map(|e| e.total_amount).sum();
    push_line(&layer, &fonts.bold, &format!("Total ({} expenses):", rows.len()), 11.0, X_PRICE - 30.0, y);
    push_line(&layer, &fonts.bold, &rupees(total), 11.0, X_TOTAL, y);

    tracing::debug!(rows = rows.len(), pages, "expense report laid out");

    let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer).map_err(pdf_err)?;
    writer
        .into_inner()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

pub fn download(bytes: &[u8], filename: &str) -> Result<(), ExportError> {
    let fail = |what: &str| ExportError::Download(what.to_string());

    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/pdf");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|_| fail("could not create blob"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| fail("could not create object url"))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| fail("no document"))?;
    let anchor = document
        .create_element("a")
        .map_err(|_| fail("could not create link"))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| fail("could not create link"))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::SortColumn;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn generated() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap().and_hms_opt(10, 0, 0).unwrap()
    }

    fn expense(n: u32) -> Expense {
        Expense {
            id: format!("e{}", n),
            name: format!("Item {}", n),
            purpose: "Office".into(),
            description: String::new(),
            quantity: 1.0,
            price: 10.0,
            total_amount: 10.0,
            expense_date: Utc.with_ymd_and_hms(2024, 1, 1 + n % 28, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn filter_block_for_date_range() {
        let mut filter = FilterState::with_mode(FilterMode::DateRange);
        filter.set_range_from(NaiveDate::from_ymd_opt(2024, 1, 6));
        let sort = SortState::default().clicked(SortColumn::TotalAmount);
        assert_eq!(
            describe_filters(&filter, &sort),
            vec![
                "Filter Type: Date Range Filter",
                "Date Range: From 1/6/2024",
                "Sorted By: Total Amount (Ascending)",
            ]
        );
    }

    #[test]
    fn filter_block_for_calendar_selection() {
        let mut filter = FilterState::with_mode(FilterMode::YearMonthDay);
        filter.set_year(Some(2024));
        filter.set_month(Some(1));
        filter.select_key("5 Jan".into());
        let lines = describe_filters(&filter, &SortState::default());
        assert_eq!(lines[1], "Chart Filter: Year: 2024, Month: January");
        assert_eq!(lines[2], "Date Filter: 5 Jan");
    }

    #[test]
    fn unfiltered_report_only_mentions_sorting() {
        let lines = describe_filters(&FilterState::default(), &SortState::default());
        assert_eq!(lines, vec!["Sorted By: Date (Ascending)"]);
    }

    #[test]
    fn long_text_is_clipped_and_sanitized() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("a very long expense name", 10), "a very ...");
        assert_eq!(pdf_text("₹100"), "?100");
    }

    #[test]
    fn report_spans_several_pages() {
        let rows: Vec<Expense> = (0..120).map(expense).collect();
        let bytes = build_report(
            &rows,
            None,
            &FilterState::default(),
            &SortState::default(),
            generated(),
            &Utc,
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(report_filename(1706781600000), "expense-report-1706781600000.pdf");
    }

    #[test]
    fn empty_report_still_renders() {
        let bytes = build_report(
            &[],
            None,
            &FilterState::default(),
            &SortState::default(),
            generated(),
            &Utc,
        );
        assert!(bytes.is_ok());
    }
}
