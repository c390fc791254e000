//! Shared fixtures for integration tests.
//!
//! PDFs are built in memory with lopdf. Page `n` has a MediaBox width of
//! `600 + n`, which lets a test read back page order from any output.

#![allow(dead_code)]

use lopdf::{Document, Object, Stream, dictionary};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

/// MediaBox width used to tag page `n`.
pub fn width_of(page: u32) -> i64 {
    600 + i64::from(page)
}

/// Widths for pages `first..=last`.
pub fn widths(first: u32, last: u32) -> Vec<i64> {
    (first..=last).map(width_of).collect()
}

/// Bytes of a PDF with `pages` pages.
pub fn pdf_with_pages(pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let mut kids = Vec::new();
    for page in 1..=pages {
        let body = format!("BT /F1 18 Tf 50 700 Td (Fixture page {page}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, body.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width_of(page).into(), 842.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => i64::from(pages),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// MediaBox widths of the PDF in `bytes`, in page order.
pub fn page_widths(bytes: &[u8]) -> Vec<i64> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|&id| {
            let page = doc.get_dictionary(id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            media_box[2].as_i64().unwrap()
        })
        .collect()
}

/// Entries of a ZIP archive as `(name, page widths)`, in archive order.
pub fn zip_entries(bytes: &[u8]) -> Vec<(String, Vec<i64>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|idx| {
            let mut file = archive.by_index(idx).unwrap();
            let mut body = Vec::new();
            file.read_to_end(&mut body).unwrap();
            (file.name().to_string(), page_widths(&body))
        })
        .collect()
}

/// Write a fixture PDF into `dir` and return its path.
pub fn write_pdf(dir: &Path, name: &str, pages: u32) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pdf_with_pages(pages)).unwrap();
    path
}
