//! Margin transformer using lopdf
//!
//! Loads a PDF, grows every page's MediaBox by the requested top and bottom
//! margins, and translates the page content up by the bottom margin so the
//! original content ends up framed by the added space.

use std::path::{Path, PathBuf};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use crate::error::{Error, Result};
use crate::geometry::{Margins, MediaBox};

/// Add top and bottom margins to every page of a PDF
///
/// The output is written next to the input, named `<stem>_elongated.<ext>`
/// (see [`elongated_output_path`]). An existing file at that path is
/// overwritten. The input file is never modified.
///
/// # Example
///
/// ```no_run
/// use pdf_elongate::geometry::Margins;
/// use pdf_elongate::pdf::add_margins;
/// use std::path::Path;
///
/// let output = add_margins(Path::new("report.pdf"), &Margins::new(144, 36))
///     .expect("Failed to add margins");
/// assert!(output.ends_with("report_elongated.pdf"));
/// ```
pub fn add_margins(input_path: &Path, margins: &Margins) -> Result<PathBuf> {
    margins.validate()?;

    if !input_path.is_file() {
        return Err(Error::FileNotFound(input_path.to_path_buf()));
    }

    let output_path = elongated_output_path(input_path);

    let mut doc = Document::load(input_path)?;

    // get_pages() is keyed by page number, so iteration preserves document
    // order; a zero-page document falls straight through to save
    let page_ids: Vec<ObjectId> = doc.get_pages().values().cloned().collect();

    for page_id in page_ids {
        let media_box = effective_media_box(&doc, page_id)?;
        let enlarged = media_box.elongated(margins);

        set_media_box(&mut doc, page_id, &enlarged)?;
        translate_page_content(&mut doc, page_id, margins.bottom)?;
    }

    // The output path is not touched until the full document is built
    doc.compress();
    doc.save(&output_path)?;

    Ok(output_path)
}

/// Derive the output path: `doc.pdf` becomes `doc_elongated.pdf`
///
/// Only the final extension is stripped and reappended, so `archive.v2.pdf`
/// becomes `archive.v2_elongated.pdf`. The directory component is kept.
pub fn elongated_output_path(input_path: &Path) -> PathBuf {
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match input_path.extension() {
        Some(ext) => format!("{}_elongated.{}", stem, ext.to_string_lossy()),
        None => format!("{}_elongated", stem),
    };

    input_path.with_file_name(file_name)
}

/// Resolve the media box that applies to a page
///
/// `/MediaBox` is inheritable: a page without its own entry takes the value
/// from the nearest ancestor in the page tree, so walk the `/Parent` chain
/// until a box turns up.
pub(crate) fn effective_media_box(doc: &Document, page_id: ObjectId) -> Result<MediaBox> {
    let mut dict = doc.get_object(page_id)?.as_dict()?;

    loop {
        if let Ok(obj) = dict.get(b"MediaBox") {
            return parse_media_box(doc, obj);
        }

        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => {
                dict = doc.get_object(*parent_id)?.as_dict()?;
            }
            _ => {
                return Err(Error::General(format!(
                    "Page object {} {} has no MediaBox",
                    page_id.0, page_id.1
                )));
            }
        }
    }
}

/// Parse a `/MediaBox` value, following an indirect reference if needed
fn parse_media_box(doc: &Document, obj: &Object) -> Result<MediaBox> {
    let array = match obj {
        Object::Reference(id) => doc.get_object(*id)?.as_array()?,
        _ => obj.as_array()?,
    };

    if array.len() != 4 {
        return Err(Error::General(format!(
            "MediaBox has {} entries, expected 4",
            array.len()
        )));
    }

    Ok(MediaBox::new(
        as_f64(&array[0])?,
        as_f64(&array[1])?,
        as_f64(&array[2])?,
        as_f64(&array[3])?,
    ))
}

fn as_f64(obj: &Object) -> Result<f64> {
    match obj {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(r) => Ok(*r as f64),
        _ => Err(Error::General("MediaBox entry is not a number".to_string())),
    }
}

/// Write the page's own `/MediaBox`, overriding any inherited value
fn set_media_box(doc: &mut Document, page_id: ObjectId, media_box: &MediaBox) -> Result<()> {
    let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;

    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            media_box.left.into(),
            media_box.bottom.into(),
            media_box.right.into(),
            media_box.top.into(),
        ]),
    );

    Ok(())
}

/// Shift a page's content up by `dy` points
///
/// The existing content streams are bracketed by a prelude stream that saves
/// the graphics state and applies a pure vertical translation, and a postlude
/// stream that restores it. Content streams of a page are concatenated before
/// interpretation, so the q/Q pair split across stream boundaries is
/// well-formed. A page with no content is left untouched.
fn translate_page_content(doc: &mut Document, page_id: ObjectId, dy: i64) -> Result<()> {
    let existing = {
        let page_dict = doc.get_object(page_id)?.as_dict()?;
        page_dict.get(b"Contents").ok().cloned()
    };

    let content_refs: Vec<Object> = match existing {
        Some(Object::Reference(content_id)) => vec![Object::Reference(content_id)],
        Some(Object::Array(content_array)) => content_array,
        _ => return Ok(()),
    };

    let prelude = format!("q\n1 0 0 1 0 {} cm\n", dy);
    let prelude_id = doc.add_object(Stream::new(Dictionary::new(), prelude.into_bytes()));
    let postlude_id = doc.add_object(Stream::new(Dictionary::new(), b"Q\n".to_vec()));

    let mut contents = Vec::with_capacity(content_refs.len() + 2);
    contents.push(Object::Reference(prelude_id));
    contents.extend(content_refs);
    contents.push(Object::Reference(postlude_id));

    let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
    page_dict.set("Contents", Object::Array(contents));

    Ok(())
}
