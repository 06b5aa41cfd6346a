//! # Stamping Engine
//!
//! Parses the document with `lopdf`, appends one overlay content stream
//! per page, and serializes a fresh buffer. Page geometry and inherited
//! resources are resolved through the page tree, so the overlay lands in
//! each page's own coordinate space.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use sha2::{Digest as _, Sha256};

use crate::error::WatermarkError;

/// Overlay font size in points.
pub const FONT_SIZE: f32 = 12.0;
/// Fixed horizontal allowance for the overlay text.
pub const TEXT_WIDTH: f32 = 12.0;
/// Fixed left margin of the overlay anchor.
pub const LEFT_MARGIN: f32 = 20.0;
/// Overlay fill opacity.
pub const OPACITY: f32 = 0.5;

/// Prefix of the engine's graphics-state resource names. The full name
/// carries a digest of the overlay text (see [`gs_name`]), so the
/// presence check that guards re-stamping is per-text, not global.
const GS_PREFIX: &str = "WmkGS";
/// Resource name of the engine's overlay font.
const FONT_NAME: &[u8] = b"WmkF0";

/// Page height when no MediaBox is found anywhere in the page tree
/// (US Letter, matching common viewer fallback).
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// Overlay `text` on every page of `input`, returning a new buffer.
///
/// All-or-nothing: any parse or page failure aborts the whole call and
/// no output is produced. The input slice is never modified. Pages that
/// already carry this engine's graphics state for the same `text` are
/// left alone, so stamping is idempotent per page and per text while a
/// different text still takes effect.
pub fn stamp(input: &[u8], text: &str) -> Result<Vec<u8>, WatermarkError> {
    let mut doc =
        Document::load_mem(input).map_err(|e| WatermarkError::Parse(e.to_string()))?;

    let gs_name = gs_name(text);
    let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let gs_id = doc.add_object(dictionary! {
        "Type" => "ExtGState",
        "ca" => OPACITY,
        "CA" => OPACITY,
    });

    let mut stamped = 0usize;
    for page_id in &pages {
        if stamp_page(&mut doc, *page_id, text, &gs_name, font_id, gs_id)? {
            stamped += 1;
        }
    }

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| WatermarkError::Serialize(e.to_string()))?;

    tracing::debug!(
        pages = pages.len(),
        stamped,
        size = output.len(),
        "document watermarked"
    );
    Ok(output)
}

/// Graphics-state resource name for an overlay text. The text is folded
/// into the name so the re-stamp guard keys on what was actually
/// overlaid: the same text is skipped, a different text stamps again.
fn gs_name(text: &str) -> Vec<u8> {
    let digest = Sha256::digest(text.as_bytes());
    let mut name = String::with_capacity(GS_PREFIX.len() + 8);
    name.push_str(GS_PREFIX);
    for byte in &digest[..4] {
        name.push_str(&format!("{byte:02x}"));
    }
    name.into_bytes()
}

/// Stamp a single page. Returns `false` when the page was skipped
/// because it already carries this text's graphics state.
fn stamp_page(
    doc: &mut Document,
    page_id: ObjectId,
    text: &str,
    gs_name: &[u8],
    font_id: ObjectId,
    gs_id: ObjectId,
) -> Result<bool, WatermarkError> {
    let height = page_height(doc, page_id)?;
    let resources = effective_resources(doc, page_id)?;

    let gstates = resolved_sub_dict(doc, &resources, b"ExtGState")?;
    if gstates.has(gs_name) {
        return Ok(false);
    }
    let mut gstates = gstates;
    gstates.set(gs_name, gs_id);
    let mut fonts = resolved_sub_dict(doc, &resources, b"Font")?;
    fonts.set(FONT_NAME, font_id);

    let mut new_resources = resources;
    new_resources.set("Font", Object::Dictionary(fonts));
    new_resources.set("ExtGState", Object::Dictionary(gstates));

    let overlay = overlay_content(text, height, gs_name)?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, overlay));
    let new_contents = appended_contents(doc, page_id, content_id)?;

    let page_dict = doc
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| WatermarkError::Page(e.to_string()))?;
    page_dict.set("Contents", new_contents);
    page_dict.set("Resources", Object::Dictionary(new_resources));
    Ok(true)
}

/// Encode the overlay operations for one page.
fn overlay_content(text: &str, height: f32, gs_name: &[u8]) -> Result<Vec<u8>, WatermarkError> {
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new("gs", vec![Object::Name(gs_name.to_vec())]),
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(FONT_NAME.to_vec()), Object::Real(FONT_SIZE)],
            ),
            Operation::new(
                "rg",
                vec![Object::Real(1.0), Object::Real(0.0), Object::Real(0.0)],
            ),
            Operation::new(
                "Td",
                vec![
                    Object::Real(TEXT_WIDTH + LEFT_MARGIN),
                    Object::Real(height / 2.0),
                ],
            ),
            Operation::new(
                "Tj",
                vec![Object::String(
                    text.as_bytes().to_vec(),
                    StringFormat::Literal,
                )],
            ),
            Operation::new("ET", vec![]),
            Operation::new("Q", vec![]),
        ],
    };
    content
        .encode()
        .map_err(|e| WatermarkError::Page(e.to_string()))
}

/// Build the page's new `Contents` value with the overlay appended,
/// preserving whatever shape (single stream, array, indirect array) the
/// page already used.
fn appended_contents(
    doc: &Document,
    page_id: ObjectId,
    content_id: ObjectId,
) -> Result<Object, WatermarkError> {
    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| WatermarkError::Page(e.to_string()))?;

    let existing = page_dict.get(b"Contents").ok().cloned();
    let appended = match existing {
        Some(Object::Reference(id)) => match doc.get_object(id) {
            Ok(Object::Array(arr)) => {
                let mut arr = arr.clone();
                arr.push(Object::Reference(content_id));
                Object::Array(arr)
            }
            _ => Object::Array(vec![
                Object::Reference(id),
                Object::Reference(content_id),
            ]),
        },
        Some(Object::Array(mut arr)) => {
            arr.push(Object::Reference(content_id));
            Object::Array(arr)
        }
        _ => Object::Reference(content_id),
    };
    Ok(appended)
}

/// Find `key` on the page or the nearest ancestor that defines it,
/// following the page-tree `Parent` chain. A chain that revisits an
/// object is malformed and fails the page rather than looping.
fn inherited_entry<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>, WatermarkError> {
    let mut current = page_id;
    let mut visited: Vec<ObjectId> = Vec::new();
    loop {
        if visited.contains(&current) {
            return Err(WatermarkError::Page(format!(
                "cyclic Parent chain at object {} {}",
                current.0, current.1
            )));
        }
        visited.push(current);
        let dict = doc
            .get_dictionary(current)
            .map_err(|e| WatermarkError::Page(e.to_string()))?;
        if let Ok(entry) = dict.get(key) {
            return Ok(Some(entry));
        }
        match dict.get(b"Parent") {
            Ok(parent) => {
                current = parent
                    .as_reference()
                    .map_err(|e| WatermarkError::Page(e.to_string()))?;
            }
            Err(_) => return Ok(None),
        }
    }
}

/// Resolve the page height from the effective MediaBox, walking the
/// page-tree inheritance chain.
fn page_height(doc: &Document, page_id: ObjectId) -> Result<f32, WatermarkError> {
    let Some(media_box) = inherited_entry(doc, page_id, b"MediaBox")? else {
        return Ok(DEFAULT_PAGE_HEIGHT);
    };
    let media_box = resolve(doc, media_box)?;
    let rect = media_box
        .as_array()
        .map_err(|e| WatermarkError::Page(format!("MediaBox: {e}")))?;
    if rect.len() != 4 {
        return Err(WatermarkError::Page(format!(
            "MediaBox has {} elements, expected 4",
            rect.len()
        )));
    }
    let lly = as_f32(&rect[1]).ok_or_else(|| {
        WatermarkError::Page("MediaBox lower-left y is not numeric".to_string())
    })?;
    let ury = as_f32(&rect[3]).ok_or_else(|| {
        WatermarkError::Page("MediaBox upper-right y is not numeric".to_string())
    })?;
    Ok(ury - lly)
}

/// The resources dictionary in effect for a page, resolved through the
/// inheritance chain and cloned so the page can carry its own amended
/// copy inline.
fn effective_resources(doc: &Document, page_id: ObjectId) -> Result<Dictionary, WatermarkError> {
    let Some(resources) = inherited_entry(doc, page_id, b"Resources")? else {
        return Ok(Dictionary::new());
    };
    let resources = resolve(doc, resources)?;
    resources
        .as_dict()
        .map(Dictionary::clone)
        .map_err(|e| WatermarkError::Page(format!("Resources: {e}")))
}

/// A named sub-dictionary of a resources dictionary, following one level
/// of indirection, cloned. Missing keys yield an empty dictionary.
fn resolved_sub_dict(
    doc: &Document,
    resources: &Dictionary,
    key: &[u8],
) -> Result<Dictionary, WatermarkError> {
    match resources.get(key) {
        Ok(entry) => {
            let entry = resolve(doc, entry)?;
            entry
                .as_dict()
                .map(Dictionary::clone)
                .map_err(|e| WatermarkError::Page(format!("resource sub-dictionary: {e}")))
        }
        Err(_) => Ok(Dictionary::new()),
    }
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Result<&'a Object, WatermarkError> {
    match object {
        Object::Reference(id) => doc
            .get_object(*id)
            .map_err(|e| WatermarkError::Page(e.to_string())),
        other => Ok(other),
    }
}

fn as_f32(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gs_names_are_per_text() {
        assert_eq!(gs_name("abc123"), gs_name("abc123"));
        assert_ne!(gs_name("abc123"), gs_name("feedf00d"));
        assert!(gs_name("abc123").starts_with(GS_PREFIX.as_bytes()));
    }

    #[test]
    fn overlay_content_encodes_text_and_anchor() {
        let encoded = overlay_content("abc123", 792.0, &gs_name("abc123")).unwrap();
        let content = Content::decode(&encoded).unwrap();
        let operators: Vec<&str> = content
            .operations
            .iter()
            .map(|op| op.operator.as_str())
            .collect();
        assert_eq!(
            operators,
            vec!["q", "gs", "BT", "Tf", "rg", "Td", "Tj", "ET", "Q"]
        );

        let td = content
            .operations
            .iter()
            .find(|op| op.operator == "Td")
            .unwrap();
        assert_eq!(as_f32(&td.operands[0]), Some(TEXT_WIDTH + LEFT_MARGIN));
        assert_eq!(as_f32(&td.operands[1]), Some(396.0));

        let tj = content
            .operations
            .iter()
            .find(|op| op.operator == "Tj")
            .unwrap();
        assert_eq!(
            tj.operands[0],
            Object::String(b"abc123".to_vec(), StringFormat::Literal)
        );
    }

    #[test]
    fn garbage_input_is_a_parse_error() {
        let err = stamp(b"definitely not a pdf", "abc123").unwrap_err();
        assert!(matches!(err, WatermarkError::Parse(_)));
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        let err = stamp(&[], "abc123").unwrap_err();
        assert!(matches!(err, WatermarkError::Parse(_)));
    }
}
