//! In-memory PDF fixtures for unit tests.
//!
//! Page `n` of every fixture has a MediaBox width of `600 + n`, so page
//! order survives any round trip and can be read back with [`page_widths`].

use lopdf::{Document, Object, ObjectId, Stream, dictionary};

/// MediaBox width used to tag page `n`.
pub fn width_of(page: u32) -> i64 {
    600 + i64::from(page)
}

fn page_dict(parent: ObjectId, page: u32, content: ObjectId) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Page",
        "Parent" => parent,
        "MediaBox" => vec![0.into(), 0.into(), width_of(page).into(), 792.into()],
        "Contents" => content,
    }
}

fn content_stream(doc: &mut Document, page: u32) -> ObjectId {
    let text = format!("BT /F1 24 Tf 72 720 Td (Page {page}) Tj ET");
    doc.add_object(Stream::new(dictionary! {}, text.into_bytes()))
}

fn font(doc: &mut Document) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    })
}

/// A document with `pages` pages under a single Pages node.
///
/// Resources live on the Pages node and are inherited by every page.
pub fn sample_document(pages: u32) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = font(&mut doc);

    let mut kids = Vec::new();
    for page in 1..=pages {
        let content = content_stream(&mut doc, page);
        let page_id = doc.add_object(page_dict(pages_id, page, content));
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => i64::from(pages),
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// A [`sample_document`] whose every page carries a Link annotation.
///
/// The annotation's `/P` points back at its page and its `/Dest` at the
/// following page (the last page links to the first).
pub fn annotated_document(pages: u32) -> Document {
    let mut doc = sample_document(pages);
    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

    for (idx, &page_id) in page_ids.iter().enumerate() {
        let target = page_ids[(idx + 1) % page_ids.len()];
        let annot = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => vec![72.into(), 700.into(), 200.into(), 730.into()],
            "P" => page_id,
            "Dest" => vec![target.into(), "Fit".into()],
        });
        if let Ok(page) = doc.get_dictionary_mut(page_id) {
            page.set("Annots", vec![Object::Reference(annot)]);
        }
    }

    doc
}

/// Number of `Page` objects in a document, reachable or not.
pub fn page_object_count(doc: &Document) -> usize {
    doc.objects
        .values()
        .filter_map(|object| object.as_dict().ok())
        .filter(|dict| matches!(dict.get(b"Type").and_then(Object::as_name), Ok(b"Page")))
        .count()
}

/// A document whose pages sit two levels deep, two pages per branch.
///
/// Each branch carries `Rotate 90` and the Resources, so a page only has
/// them through inheritance.
pub fn nested_document(pages: u32) -> Document {
    let mut doc = Document::with_version("1.5");
    let root_id = doc.new_object_id();
    let font_id = font(&mut doc);

    let mut branches = Vec::new();
    let mut page = 1;
    while page <= pages {
        let branch_id = doc.new_object_id();
        let mut kids = Vec::new();
        for n in page..=(page + 1).min(pages) {
            let content = content_stream(&mut doc, n);
            let page_id = doc.add_object(page_dict(branch_id, n, content));
            kids.push(Object::Reference(page_id));
        }
        let count = kids.len() as i64;
        doc.objects.insert(
            branch_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Parent" => root_id,
                "Kids" => kids,
                "Count" => count,
                "Rotate" => 90,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            }),
        );
        branches.push(Object::Reference(branch_id));
        page += 2;
    }

    doc.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => branches,
            "Count" => i64::from(pages),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => root_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Serialize a fixture to bytes.
pub fn to_bytes(mut doc: Document) -> Vec<u8> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Bytes of a [`sample_document`].
pub fn sample_pdf(pages: u32) -> Vec<u8> {
    to_bytes(sample_document(pages))
}

/// MediaBox widths of a document's pages, in page order.
pub fn page_widths(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .values()
        .map(|&id| {
            let page = doc.get_dictionary(id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            media_box[2].as_i64().unwrap()
        })
        .collect()
}

/// MediaBox widths of the PDF in `bytes`.
pub fn page_widths_of(bytes: &[u8]) -> Vec<i64> {
    page_widths(&Document::load_mem(bytes).unwrap())
}
