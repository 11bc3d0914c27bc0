//! Shared fixtures for integration tests: in-memory PDF builders.

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};

/// Incremental builder for a minimal but well-formed PDF document
/// (catalog, page tree, pages with optional /Annots values).
pub struct TestPdf {
    pub doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
}

impl TestPdf {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
        }
    }

    pub fn add_object<T: Into<Object>>(&mut self, object: T) -> ObjectId {
        self.doc.add_object(object)
    }

    /// Adds a page; `annots` becomes the page's /Annots value verbatim,
    /// so tests can exercise direct arrays, references, and malformed
    /// shapes alike.
    pub fn add_page(&mut self, annots: Option<Object>) -> ObjectId {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        if let Some(annots) = annots {
            page.set("Annots", annots);
        }
        let page_id = self.doc.add_object(page);
        self.kids.push(page_id.into());
        page_id
    }

    pub fn with_info(&mut self, title: &str, author: &str) {
        let info_id = self.doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
            "Author" => Object::string_literal(author),
            "Producer" => Object::string_literal("test fixture"),
        });
        self.doc.trailer.set("Info", info_id);
    }

    pub fn finish(mut self) -> Document {
        let count = self.kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids.clone(),
                "Count" => count,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc
    }
}

pub fn link_annotation(uri: &str) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![72.into(), 700.into(), 200.into(), 720.into()],
        "Border" => vec![0.into(), 0.into(), 0.into()],
        "A" => dictionary! {
            "S" => "URI",
            "URI" => Object::string_literal(uri),
        },
    }
}

pub fn highlight_annotation() -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Highlight",
        "Rect" => vec![72.into(), 600.into(), 200.into(), 620.into()],
        "Contents" => Object::string_literal("important"),
    }
}

pub fn popup_annotation(parent: ObjectId) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Popup",
        "Rect" => vec![220.into(), 600.into(), 320.into(), 660.into()],
        "Parent" => parent,
    }
}

/// Counts indirect dictionary objects whose /Subtype is /Link.
pub fn count_link_objects(doc: &Document) -> usize {
    doc.objects
        .values()
        .filter(|obj| match obj {
            Object::Dictionary(dict) => {
                matches!(dict.get(b"Subtype"), Ok(Object::Name(name)) if name == b"Link")
            }
            _ => false,
        })
        .count()
}

/// The /Annots value of the `index`-th page (0-based), if any.
pub fn page_annots(doc: &Document, index: usize) -> Option<Object> {
    let page_id = *doc.get_pages().values().nth(index)?;
    let page = doc.get_dictionary(page_id).ok()?;
    page.get(b"Annots").ok().cloned()
}
