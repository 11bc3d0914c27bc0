//! PDF Document abstraction
//! Created: 2025-06-07
//! Author: kartik4905

use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result, ScannerError};
use crate::scanner::PdfScanner;

/// PDF metadata from the Document Information dictionary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub mod_date: Option<String>,
}

impl PdfMetadata {
    fn from_info_dict(dict: &Dictionary) -> Self {
        Self {
            title: text_entry(dict, b"Title"),
            author: text_entry(dict, b"Author"),
            subject: text_entry(dict, b"Subject"),
            keywords: text_entry(dict, b"Keywords"),
            creator: text_entry(dict, b"Creator"),
            producer: text_entry(dict, b"Producer"),
            creation_date: text_entry(dict, b"CreationDate"),
            mod_date: text_entry(dict, b"ModDate"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
            && self.creator.is_none()
            && self.producer.is_none()
            && self.creation_date.is_none()
            && self.mod_date.is_none()
    }
}

fn text_entry(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key) {
        Ok(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

/// PDF Document wrapper for loading and processing
#[derive(Debug)]
pub struct PdfDocument {
    pub document: Document,
    pub path: PathBuf,
}

impl PdfDocument {
    /// Load a PDF document from a file path.
    ///
    /// The file must start with a `%PDF-` header; anything else is
    /// rejected before it reaches the parser.
    pub async fn load(path: &Path) -> Result<Self> {
        let data = tokio::fs::read(path).await?;

        let scanner = PdfScanner::new();
        let signature = scanner.validate_pdf_signature(&data);
        if !signature.is_valid_pdf {
            return Err(Error::ScannerError(ScannerError::InvalidSignature(
                path.to_path_buf(),
            )));
        }

        let document = Document::load_mem(&data)?;
        Ok(Self {
            document,
            path: path.to_path_buf(),
        })
    }

    /// Serialize the document to the given path
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.document.save(path)?;
        Ok(())
    }

    /// Page object ids in page-number order
    pub fn page_ids(&self) -> Vec<ObjectId> {
        self.document.get_pages().into_values().collect()
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Header version string (e.g. "1.4")
    pub fn version(&self) -> &str {
        &self.document.version
    }

    /// Document Information dictionary entries.
    ///
    /// The trailer `/Info` entry may be an indirect reference or a
    /// direct dictionary; both forms resolve here. The dictionary is
    /// carried through the rewrite untouched.
    pub fn info_metadata(&self) -> PdfMetadata {
        let info = match self.document.trailer.get(b"Info") {
            Ok(Object::Reference(id)) => self.document.get_dictionary(*id).ok(),
            Ok(Object::Dictionary(dict)) => Some(dict),
            _ => None,
        };
        info.map(PdfMetadata::from_info_dict).unwrap_or_default()
    }
}
