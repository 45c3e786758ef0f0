//! PDF rendering of the events table.
//!
//! Pages are A4 landscape using the built-in Helvetica font, so text is limited to
//! printable ASCII; other characters are replaced with `?`.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::server::model::{event::Event, report::ReportData};

use super::join_labels;

const HEADERS: [&str; 7] = [
    "Program",
    "Start",
    "End",
    "Purpose",
    "Participants",
    "Department",
    "Status",
];

/// Renders the events of a report as a paginated table.
pub fn render(data: &ReportData) -> Vec<u8> {
    let title = format!(
        "Events Report ({}) - Department: {}",
        data.kind.as_str().to_uppercase(),
        data.department
    );

    let mut document = PdfDocument::new();

    if data.events.is_empty() {
        document.write_message(&title, "No events found for this period.");
    } else {
        let rows: Vec<Vec<String>> = data.events.iter().map(row).collect();
        document.write_table(&title, &HEADERS, &rows);
    }

    document.finish()
}

fn row(event: &Event) -> Vec<String> {
    vec![
        event.program.clone(),
        event.start_at.format("%Y-%m-%d %H:%M").to_string(),
        event.end_at.format("%Y-%m-%d %H:%M").to_string(),
        event.purpose.clone(),
        join_labels(&event.participants),
        join_labels(&event.departments),
        event.status.as_str().to_string(),
    ]
}

/// Builds a multi-page PDF, allocating object references as pages are added.
struct PdfDocument {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    page_refs: Vec<Ref>,
    next_id: i32,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl PdfDocument {
    fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            page_refs: Vec::new(),
            next_id: 4,

            page_w: 842.0,
            page_h: 595.0,
            margin: 40.0,
            row_h: 18.0,

            font_size: 8.0,
            header_font_size: 9.0,
            title_font_size: 14.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Writes a page object and its content stream.
    fn add_page(&mut self, content: Content) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
                .contents(content_id);
            page.resources().fonts().pair(Name(b"F1"), self.font_id);
        }

        self.pdf.stream(content_id, &content.finish());
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        let text = to_ascii(text);
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(text.as_bytes()));
        content.end_text();
    }

    fn draw_page_frame(&self, content: &mut Content, title: &str, page: usize) {
        self.draw_text(
            content,
            self.margin,
            self.page_h - self.margin,
            self.title_font_size,
            title,
        );
        self.draw_text(
            content,
            self.page_w - self.margin - 40.0,
            self.margin / 2.0,
            self.font_size,
            &format!("Page {}", page),
        );
    }

    fn fill_row(&self, content: &mut Content, y: f32, width: f32, gray: f32) {
        content.save_state();
        content.set_fill_rgb(gray, gray, gray);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(&self, content: &mut Content, y: f32, widths: &[f32], row: &[String], size: f32) {
        let mut x = self.margin;

        for (text, width) in row.iter().zip(widths) {
            let max_chars = ((width - 6.0) / (size * 0.5)).max(1.0) as usize;
            self.draw_text(content, x + 3.0, y + 5.0, size, &truncate(text, max_chars));

            content.save_state();
            content.set_stroke_rgb(0.65, 0.65, 0.65);
            content.rect(x, y, *width, self.row_h);
            content.stroke();
            content.restore_state();

            x += width;
        }
    }

    /// Sizes columns to their content, scaled down to fit between the margins.
    fn column_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.0).collect();

        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = width.max(cell.chars().count() as f32 * 4.5);
            }
        }

        let total: f32 = widths.iter().sum();
        let available = self.page_w - 2.0 * self.margin;
        if total > available {
            let scale = available / total;
            for width in &mut widths {
                *width *= scale;
            }
        }

        widths
    }

    fn write_message(&mut self, title: &str, message: &str) {
        let mut content = Content::new();
        self.draw_page_frame(&mut content, title, 1);
        self.draw_text(
            &mut content,
            self.margin,
            self.page_h - self.margin - 40.0,
            self.header_font_size,
            message,
        );
        self.add_page(content);
    }

    fn write_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        let widths = self.column_widths(headers, rows);
        let table_w: f32 = widths.iter().sum();
        let header_row: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

        let mut remaining = rows;
        let mut page = 1;

        while !remaining.is_empty() {
            let mut content = Content::new();
            self.draw_page_frame(&mut content, title, page);

            let mut y = self.page_h - self.margin - 35.0;
            self.fill_row(&mut content, y, table_w, 0.85);
            self.draw_row(&mut content, y, &widths, &header_row, self.header_font_size);
            y -= self.row_h;

            let mut consumed = 0;
            for (index, row) in remaining.iter().enumerate() {
                if y < self.margin {
                    break;
                }
                if index % 2 == 0 {
                    self.fill_row(&mut content, y, table_w, 0.96);
                }
                self.draw_row(&mut content, y, &widths, row, self.font_size);
                y -= self.row_h;
                consumed += 1;
            }

            self.add_page(content);
            remaining = &remaining[consumed..];
            page += 1;
        }
    }

    fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        let count = self.page_refs.len() as i32;
        self.pdf
            .pages(self.pages_id)
            .kids(self.page_refs.iter().copied())
            .count(count);

        self.pdf.finish()
    }
}

fn to_ascii(text: &str) -> String {
    text.chars()
        .map(|c| if c == ' ' || c.is_ascii_graphic() { c } else { '?' })
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_cells() {
        assert_eq!(truncate("Registrar", 20), "Registrar");
        assert_eq!(truncate("Registrar Office", 8), "Regis...");
    }

    #[test]
    fn replaces_non_ascii() {
        assert_eq!(to_ascii("Niño 1"), "Ni?o 1");
    }
}
