//! Document information dictionary (`/Info`) handling.

use chrono::{DateTime, Utc};
use lopdf::{Dictionary, Document, Object, StringFormat};

use crate::config::BookMetadata;
use crate::error::{BookshelfError, Result};

/// Reads and writes book metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataManager;

impl MetadataManager {
    /// Create a new metadata manager.
    pub fn new() -> Self {
        Self
    }

    /// Write `metadata` into the document's Info dictionary.
    ///
    /// `Creator`, `Producer` and `ModDate` are always set. `CreationDate`
    /// is taken from `metadata` when present, otherwise the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the Info dictionary cannot be created.
    pub fn set_metadata(&self, doc: &mut Document, metadata: &BookMetadata) -> Result<()> {
        let now = format_pdf_date(Utc::now());
        let info = Self::info_dict_mut(doc)?;

        if let Some(title) = &metadata.title {
            info.set("Title", text(title));
        }
        if let Some(author) = &metadata.author {
            info.set("Author", text(author));
        }

        info.set("Creator", text(crate::NAME));
        info.set("Producer", text(&format!("{} {}", crate::NAME, crate::VERSION)));
        info.set(
            "CreationDate",
            text(metadata.creation_date.as_deref().unwrap_or(&now)),
        );
        info.set("ModDate", text(&now));

        Ok(())
    }

    /// Read title, author and creation date. Missing fields are `None`.
    pub fn get_metadata(&self, doc: &Document) -> BookMetadata {
        let Some(info) = Self::info_dict(doc) else {
            return BookMetadata::default();
        };

        BookMetadata::new(
            Self::get_string_field(info, b"Title"),
            Self::get_string_field(info, b"Author"),
            Self::get_string_field(info, b"CreationDate"),
        )
    }

    /// Check if a document has an Info dictionary.
    pub fn has_metadata(&self, doc: &Document) -> bool {
        doc.trailer.has(b"Info")
    }

    fn info_dict(doc: &Document) -> Option<&Dictionary> {
        match doc.trailer.get(b"Info").ok()? {
            Object::Reference(id) => doc.get_dictionary(*id).ok(),
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    fn info_dict_mut(doc: &mut Document) -> Result<&mut Dictionary> {
        let info_id = match doc.trailer.get(b"Info").and_then(Object::as_reference) {
            Ok(id) if doc.get_dictionary(id).is_ok() => id,
            _ => {
                let id = doc.add_object(Dictionary::new());
                doc.trailer.set("Info", id);
                id
            }
        };

        doc.get_dictionary_mut(info_id)
            .map_err(|e| BookshelfError::MetadataFailed {
                reason: format!("Failed to access Info dictionary: {e}"),
            })
    }

    /// Decode a PDF text string: UTF-16BE with byte order mark, UTF-8, or
    /// Latin-1 as a last resort.
    fn get_string_field(dict: &Dictionary, key: &[u8]) -> Option<String> {
        let Ok(Object::String(bytes, _)) = dict.get(key) else {
            return None;
        };

        if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
            let units: Vec<u16> = utf16
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            return String::from_utf16(&units).ok();
        }

        match std::str::from_utf8(bytes) {
            Ok(s) => Some(s.to_string()),
            Err(_) => Some(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

fn text(value: &str) -> Object {
    Object::String(value.as_bytes().to_vec(), StringFormat::Literal)
}

/// Format a timestamp as a PDF date string, `D:YYYYMMDDHHmmSSZ`.
pub fn format_pdf_date(time: DateTime<Utc>) -> String {
    time.format("D:%Y%m%d%H%M%SZ").to_string()
}
