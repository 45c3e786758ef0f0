//! Workbook rendering with one sheet each for the roster, the users and the events.

use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Workbook};

use crate::server::{error::report::ReportError, model::report::ReportData};

use super::{category_row, event_row, user_row, CATEGORY_HEADERS, EVENT_HEADERS, USER_HEADERS};

/// Columns never grow wider than this many characters.
const MAX_COLUMN_CHARS: usize = 60;

/// Renders the report as an in-memory XLSX workbook.
pub fn render(data: &ReportData) -> Result<Vec<u8>, ReportError> {
    let mut workbook = Workbook::new();

    let categories: Vec<Vec<String>> = data.categories.iter().map(category_row).collect();
    let users: Vec<Vec<String>> = data.users.iter().map(user_row).collect();
    let events: Vec<Vec<String>> = data.events.iter().map(event_row).collect();

    write_sheet(&mut workbook, "Categories", &CATEGORY_HEADERS, &categories)?;
    write_sheet(&mut workbook, "Users", &USER_HEADERS, &users)?;
    write_sheet(&mut workbook, "Events", &EVENT_HEADERS, &events)?;

    Ok(workbook.save_to_buffer()?)
}

fn write_sheet(
    workbook: &mut Workbook,
    name: &str,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<(), ReportError> {
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);
    let bands = [
        cell_format(Color::RGB(0xEAF3FB)),
        cell_format(Color::RGB(0xFFFFFF)),
    ];

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(name)?;

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

    for (index, row) in rows.iter().enumerate() {
        let format = &bands[index % 2];
        for (col, value) in row.iter().enumerate() {
            worksheet.write_with_format(index as u32 + 1, col as u16, value.as_str(), format)?;
            widths[col] = widths[col].max(value.chars().count());
        }
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, (*width).min(MAX_COLUMN_CHARS) as f64 + 2.0)?;
    }

    Ok(())
}

fn cell_format(background: Color) -> Format {
    Format::new()
        .set_background_color(background)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}
