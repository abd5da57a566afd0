//! PDF serialisation of laid-out pages via `pdf-writer`.
//!
//! Object layout:
//!
//! ```text
//! 1  catalog ──▶ 2 page tree ──▶ page objects (one per page)
//! 3..7  Type1 Standard-14 fonts (shared by every page)
//! 8  document info (title, producer)
//! then per page: page object + content stream
//! ```

use super::fonts::{encode_win_ansi, Font};
use super::layout::{Page, PageGeometry};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

/// Producer string written to the document info dictionary.
pub const PRODUCER: &str = concat!("mdprint ", env!("CARGO_PKG_VERSION"));

/// Serialise pages into a complete PDF file.
pub fn write_pdf(pages: &[Page], geometry: &PageGeometry, title: &str) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let font_ids: Vec<(Font, Ref)> = Font::ALL.iter().map(|&f| (f, alloc.bump())).collect();
    let info_id = alloc.bump();
    let page_ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (alloc.bump(), alloc.bump())).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|&(page_id, _)| page_id))
        .count(page_ids.len() as i32);

    for &(font, id) in &font_ids {
        pdf.type1_font(id)
            .base_font(Name(font.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr(PRODUCER));

    let media_box = Rect::new(0.0, 0.0, geometry.width, geometry.height);
    for (page, &(page_id, content_id)) in pages.iter().zip(&page_ids) {
        let mut page_writer = pdf.page(page_id);
        page_writer.media_box(media_box);
        page_writer.parent(page_tree_id);
        page_writer.contents(content_id);
        {
            let mut resources = page_writer.resources();
            let mut fonts = resources.fonts();
            for &(font, id) in &font_ids {
                fonts.pair(font.resource_name(), id);
            }
            fonts.finish();
            resources.finish();
        }
        page_writer.finish();

        pdf.stream(content_id, &page_content(page));
    }

    pdf.finish()
}

fn page_content(page: &Page) -> Vec<u8> {
    let mut content = Content::new();
    for line in &page.lines {
        if line.runs.iter().all(|r| r.text.is_empty()) {
            continue;
        }
        let color = line.color;
        content.set_fill_rgb(color.0, color.1, color.2);
        content.begin_text();
        content.next_line(line.x, line.baseline);
        for run in &line.runs {
            content.set_font(run.font.resource_name(), run.size);
            content.show(Str(&encode_win_ansi(&run.text)));
        }
        content.end_text();
    }
    content.finish()
}
