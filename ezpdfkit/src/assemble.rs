//! Document assembly.
//!
//! Builds new PDFs out of pages of already loaded documents. A page keeps
//! its content, resources and annotations; attributes it only had through
//! its ancestors in the page tree are copied onto the page itself so that it
//! renders the same under its new parent.
//!
//! # Examples
//!
//! ```no_run
//! use ezpdfkit::assemble::{Assembler, SourceDocument};
//! use ezpdfkit::config::CompressionLevel;
//!
//! # fn example(bytes: &[u8]) -> ezpdfkit::Result<()> {
//! let source = SourceDocument::load("report.pdf", bytes)?;
//! let assembler = Assembler::new(CompressionLevel::Standard);
//! let output = assembler.render(&source, &[3, 1, 3], "picked.pdf")?;
//! assert_eq!(output.page_count, 3);
//! # Ok(())
//! # }
//! ```

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, trace};

use crate::config::CompressionLevel;
use crate::error::{EzPdfError, Result};
use crate::utils::copy_references;

/// Page attributes a page may inherit from its ancestors.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Page tree depth beyond which ancestors are ignored.
const MAX_TREE_DEPTH: usize = 64;

/// A parsed document ready to have pages taken from it.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Display name, usually the uploaded file name.
    pub name: String,

    /// The parsed document.
    pub document: Document,

    /// Number of pages.
    pub page_count: u32,
}

impl SourceDocument {
    /// Parse `bytes` as a PDF named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EzPdfError::Encrypted`] for encrypted documents and
    /// [`EzPdfError::Parse`] when the bytes are not a readable PDF.
    pub fn load(name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let name = name.into();
        let document =
            Document::load_mem(bytes).map_err(|e| EzPdfError::from_load_failure(&name, &e))?;

        if document.trailer.has(b"Encrypt") {
            return Err(EzPdfError::Encrypted { file: name });
        }

        Ok(Self::from_document(name, document))
    }

    /// Wrap an already parsed document.
    pub fn from_document(name: impl Into<String>, document: Document) -> Self {
        let page_count = document.get_pages().len() as u32;
        Self {
            name: name.into(),
            document,
            page_count,
        }
    }

    /// Object id of 1-based page `page`.
    fn page_id(&self, pages: &BTreeMap<u32, ObjectId>, page: u32) -> Result<ObjectId> {
        pages.get(&page).copied().ok_or_else(|| {
            EzPdfError::assembly(format!(
                "page {page} is out of range for {} ({} pages)",
                self.name, self.page_count
            ))
        })
    }
}

/// A generated file, held in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFile {
    /// File name, without directory.
    pub name: String,

    /// File contents.
    #[serde(skip)]
    pub bytes: Vec<u8>,

    /// Pages in the document.
    pub page_count: usize,
}

impl OutputFile {
    /// Size of the file in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Accumulates pages into a fresh single-level page tree.
///
/// Object ids of copied objects are kept, so every document that pages are
/// taken from must use ids that do not clash with the others'.
pub(crate) struct PageTreeBuilder {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    placed: HashSet<ObjectId>,
}

impl PageTreeBuilder {
    /// Start a tree whose Pages node takes id `reserved_id`.
    pub(crate) fn new(version: &str, reserved_id: u32) -> Self {
        let mut document = Document::with_version(version);
        document.max_id = reserved_id;
        Self {
            document,
            pages_id: (reserved_id, 0),
            kids: Vec::new(),
            placed: HashSet::new(),
        }
    }

    /// Append page `page_id` of `source` to the tree.
    ///
    /// A page that was already appended is cloned into a new object.
    pub(crate) fn push_page(&mut self, source: &Document, page_id: ObjectId) -> Result<()> {
        self.document.max_id = self.document.max_id.max(source.max_id);

        let mut page = flatten_page(source, page_id)?;
        page.remove(b"Parent");
        for (_, value) in page.iter() {
            copy_references(&mut self.document, source, value);
        }
        page.set("Parent", self.pages_id);

        let id = if self.placed.insert(page_id) {
            self.document.objects.insert(page_id, Object::Dictionary(page));
            page_id
        } else {
            trace!(?page_id, "page repeated, cloning");
            self.document.add_object(page)
        };
        self.kids.push(Object::Reference(id));

        Ok(())
    }

    /// Number of pages appended so far.
    pub(crate) fn len(&self) -> usize {
        self.kids.len()
    }

    /// Close the tree and attach a catalog.
    ///
    /// References to objects that never made it into the tree, such as a
    /// link to a page that was not selected, become `null`.
    pub(crate) fn finish(mut self) -> Document {
        let count = self.kids.len() as i64;
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        let known: HashSet<ObjectId> = self.document.objects.keys().copied().collect();
        for object in self.document.objects.values_mut() {
            clear_dangling(object, &known);
        }
        self.document
    }
}

fn clear_dangling(object: &mut Object, known: &HashSet<ObjectId>) {
    if matches!(object, Object::Reference(id) if !known.contains(id)) {
        *object = Object::Null;
        return;
    }

    match object {
        Object::Array(items) => items.iter_mut().for_each(|item| clear_dangling(item, known)),
        Object::Dictionary(dict) => dict
            .iter_mut()
            .for_each(|(_, value)| clear_dangling(value, known)),
        Object::Stream(stream) => stream
            .dict
            .iter_mut()
            .for_each(|(_, value)| clear_dangling(value, known)),
        _ => {}
    }
}

/// Copy of a page dictionary with inherited attributes made explicit.
fn flatten_page(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut page = doc
        .get_dictionary(page_id)
        .map_err(|e| EzPdfError::assembly(format!("failed to read page {page_id:?}: {e}")))?
        .clone();

    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;
    while let Some(parent_id) = parent
        && depth < MAX_TREE_DEPTH
    {
        let Ok(node) = doc.get_dictionary(parent_id) else {
            break;
        };
        for key in INHERITABLE {
            if !page.has(key)
                && let Ok(value) = node.get(key)
            {
                page.set(key, value.clone());
            }
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }

    Ok(page)
}

/// Builds output documents from pages of a [`SourceDocument`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Assembler {
    compression: CompressionLevel,
}

impl Assembler {
    /// Create an assembler that writes with `compression`.
    pub fn new(compression: CompressionLevel) -> Self {
        Self { compression }
    }

    /// Build a document holding `pages` of `source`, in the given order.
    ///
    /// Pages are 1-based. Repeated pages appear repeatedly.
    ///
    /// # Errors
    ///
    /// Returns [`EzPdfError::Assembly`] if `pages` is empty or names a page
    /// the source does not have.
    pub fn assemble(&self, source: &SourceDocument, pages: &[u32]) -> Result<Document> {
        if pages.is_empty() {
            return Err(EzPdfError::assembly("no pages selected"));
        }

        let page_ids = source.document.get_pages();
        let mut builder =
            PageTreeBuilder::new(&source.document.version, source.document.max_id + 1);

        for &page in pages {
            let page_id = source.page_id(&page_ids, page)?;
            builder.push_page(&source.document, page_id)?;
        }

        debug!(source = %source.name, pages = builder.len(), "assembled document");
        Ok(builder.finish())
    }

    /// Serialize `doc` with this assembler's compression.
    ///
    /// # Errors
    ///
    /// Returns [`EzPdfError::Assembly`] if the document cannot be written.
    pub fn encode(&self, doc: &mut Document) -> Result<Vec<u8>> {
        match self.compression {
            CompressionLevel::None => {}
            CompressionLevel::Standard => doc.compress(),
            CompressionLevel::Maximum => {
                doc.prune_objects();
                doc.compress();
            }
        }
        doc.renumber_objects();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| EzPdfError::assembly(format!("failed to write document: {e}")))?;
        Ok(bytes)
    }

    /// Assemble `pages` of `source` and serialize the result as `name`.
    ///
    /// # Errors
    ///
    /// See [`Assembler::assemble`] and [`Assembler::encode`].
    pub fn render(
        &self,
        source: &SourceDocument,
        pages: &[u32],
        name: impl Into<String>,
    ) -> Result<OutputFile> {
        let mut doc = self.assemble(source, pages)?;
        let bytes = self.encode(&mut doc)?;
        Ok(OutputFile {
            name: name.into(),
            bytes,
            page_count: pages.len(),
        })
    }
}
