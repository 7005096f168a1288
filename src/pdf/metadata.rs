//! PDF document inspection
//!
//! Read-only queries over a document: page count and page dimensions. These
//! are what the integration tests measure transformer output with.

use std::path::Path;
use lopdf::{Document, Object};
use crate::error::{Error, Result};
use super::margins::effective_media_box;

/// Count pages by reading the Count field from the Pages dictionary
/// This is more reliable than get_pages() which doesn't handle nested page trees
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let root = doc
        .trailer
        .get(b"Root")
        .map_err(|_| Error::General("No Root in trailer".to_string()))?;

    let catalog_id = match root {
        Object::Reference(id) => *id,
        _ => return Err(Error::General("Root is not a reference".to_string())),
    };
    let catalog = doc.get_object(catalog_id)?.as_dict()?;

    let pages_id = match catalog.get(b"Pages") {
        Ok(Object::Reference(id)) => *id,
        _ => return Err(Error::General("No Pages in catalog".to_string())),
    };
    let pages = doc.get_object(pages_id)?.as_dict()?;

    match pages.get(b"Count") {
        Ok(Object::Integer(n)) => Ok(*n as usize),
        _ => Err(Error::General("No Count in Pages".to_string())),
    }
}

/// Count the number of pages in a PDF file
///
/// A zero-page document is structurally valid and yields `Ok(0)`.
pub fn count_pages(path: &Path) -> Result<usize> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    count_pages_from_catalog(&doc)
}

/// Width and height of every page's effective media box, in page order
pub fn page_dimensions(path: &Path) -> Result<Vec<(f64, f64)>> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;

    doc.get_pages()
        .values()
        .map(|&page_id| {
            let media_box = effective_media_box(&doc, page_id)?;
            Ok((media_box.width(), media_box.height()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_pages_nonexistent_file() {
        let result = count_pages(Path::new("nonexistent.pdf"));
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_page_dimensions_nonexistent_file() {
        let result = page_dimensions(Path::new("nonexistent.pdf"));
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    // Tests against actual PDFs live in tests/integration.rs
}
