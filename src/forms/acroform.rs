//! AcroForm field lookup and mutation

use lopdf::{dictionary, Document, Object, ObjectId};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::fill::field_text;

/// A terminal form field discovered in the template
struct FormField {
    id: ObjectId,
    /// Fully-qualified dotted name
    name: String,
    /// Field type, inherited through the field tree (`Tx`, `Btn`, `Ch`)
    field_type: Option<Vec<u8>>,
    /// Widget annotation kids carrying appearance state
    widgets: Vec<ObjectId>,
}

/// Fill the template's AcroForm fields with the supplied values
///
/// Field names with no matching field in the template are silently
/// skipped. Returns the serialized document.
pub fn fill_form(template: &[u8], values: &Map<String, Value>) -> Result<Vec<u8>> {
    let mut doc =
        Document::load_mem(template).map_err(|e| AppError::Template(e.to_string()))?;

    let form_id = ensure_acroform(&mut doc)?;
    let fields = collect_fields(&doc, form_id)?;

    let mut filled = 0usize;
    for field in &fields {
        if let Some(value) = values.get(&field.name) {
            set_field_value(&mut doc, field, &field_text(value))?;
            filled += 1;
        }
    }

    if filled > 0 {
        // Values are written without appearance streams; viewers must
        // regenerate them on open.
        set_need_appearances(&mut doc, form_id)?;
    }

    tracing::debug!(
        "Filled {} of {} template fields ({} values supplied)",
        filled,
        fields.len(),
        values.len()
    );

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(buffer)
}

/// Locate the catalog's AcroForm dictionary, creating an empty one when
/// the template has none
///
/// Inline AcroForm dictionaries are moved into their own object so the
/// later passes can address the form by id.
fn ensure_acroform(doc: &mut Document) -> Result<ObjectId> {
    let root_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|e| AppError::Template(format!("missing document catalog: {}", e)))?;

    enum Existing {
        Reference(ObjectId),
        Inline(lopdf::Dictionary),
        Absent,
    }

    let existing = {
        let catalog = doc
            .get_object(root_id)
            .and_then(Object::as_dict)
            .map_err(|e| AppError::Template(format!("invalid document catalog: {}", e)))?;
        match catalog.get(b"AcroForm") {
            Ok(Object::Reference(id)) => Existing::Reference(*id),
            Ok(Object::Dictionary(dict)) => Existing::Inline(dict.clone()),
            _ => Existing::Absent,
        }
    };

    let form_id = match existing {
        Existing::Reference(id) => return Ok(id),
        Existing::Inline(dict) => doc.add_object(Object::Dictionary(dict)),
        Existing::Absent => doc.add_object(dictionary! {
            "Fields" => Object::Array(vec![]),
        }),
    };

    doc.get_object_mut(root_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| AppError::Template(format!("invalid document catalog: {}", e)))?
        .set("AcroForm", Object::Reference(form_id));

    Ok(form_id)
}

/// Collect every terminal field reachable from the AcroForm's field tree
fn collect_fields(doc: &Document, form_id: ObjectId) -> Result<Vec<FormField>> {
    let form = doc
        .get_object(form_id)
        .and_then(Object::as_dict)
        .map_err(|e| AppError::Template(format!("invalid AcroForm: {}", e)))?;

    let roots = match form.get(b"Fields") {
        Ok(object) => reference_array(doc, object),
        Err(_) => Vec::new(),
    };

    let mut fields = Vec::new();
    for id in roots {
        walk_field(doc, id, None, None, &mut fields);
    }
    Ok(fields)
}

/// Walk one node of the field tree
///
/// Kids carrying their own `/T` are child fields and extend the dotted
/// name; kids without one are widget annotations of this field.
fn walk_field(
    doc: &Document,
    id: ObjectId,
    prefix: Option<&str>,
    inherited_ft: Option<Vec<u8>>,
    out: &mut Vec<FormField>,
) {
    let dict = match doc.get_object(id).and_then(Object::as_dict) {
        Ok(dict) => dict,
        // Dangling reference: treat like a field that does not exist
        Err(_) => return,
    };

    let partial = dict.get(b"T").ok().and_then(text_string);
    let name = match (prefix, &partial) {
        (Some(prefix), Some(partial)) => Some(format!("{}.{}", prefix, partial)),
        (None, Some(partial)) => Some(partial.clone()),
        _ => None,
    };

    let field_type = match dict.get(b"FT") {
        Ok(Object::Name(ft)) => Some(ft.clone()),
        _ => inherited_ft,
    };

    let kid_ids = dict
        .get(b"Kids")
        .ok()
        .map(|object| reference_array(doc, object))
        .unwrap_or_default();

    let mut child_fields = Vec::new();
    let mut widgets = Vec::new();
    for kid in kid_ids {
        match doc.get_object(kid).and_then(Object::as_dict) {
            Ok(kid_dict) if kid_dict.has(b"T") => child_fields.push(kid),
            Ok(_) => widgets.push(kid),
            Err(_) => {}
        }
    }

    if child_fields.is_empty() {
        if let Some(name) = name {
            out.push(FormField {
                id,
                name,
                field_type,
                widgets,
            });
        }
        return;
    }

    let child_prefix = name.as_deref().or(prefix);
    for kid in child_fields {
        walk_field(doc, kid, child_prefix, field_type.clone(), out);
    }
}

/// Write a value into a single field
///
/// Text and choice fields take a string value; button fields take a
/// name object mirrored into the appearance state of the field and its
/// widgets.
fn set_field_value(doc: &mut Document, field: &FormField, text: &str) -> Result<()> {
    let button = matches!(field.field_type.as_deref(), Some(b"Btn"));

    let dict = doc
        .get_object_mut(field.id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| AppError::Template(e.to_string()))?;

    if button {
        dict.set("V", Object::Name(text.as_bytes().to_vec()));
        dict.set("AS", Object::Name(text.as_bytes().to_vec()));
    } else {
        dict.set("V", Object::string_literal(text));
        // A stale appearance stream would keep showing the old value
        dict.remove(b"AP");
    }

    if button {
        for widget in &field.widgets {
            if let Ok(widget_dict) = doc.get_object_mut(*widget).and_then(Object::as_dict_mut) {
                widget_dict.set("AS", Object::Name(text.as_bytes().to_vec()));
            }
        }
    }

    Ok(())
}

fn set_need_appearances(doc: &mut Document, form_id: ObjectId) -> Result<()> {
    doc.get_object_mut(form_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| AppError::Template(format!("invalid AcroForm: {}", e)))?
        .set("NeedAppearances", true);
    Ok(())
}

/// Collect the object ids of an array, following one level of indirection
fn reference_array(doc: &Document, object: &Object) -> Vec<ObjectId> {
    let object = match object {
        Object::Reference(id) => match doc.get_object(*id) {
            Ok(target) => target,
            Err(_) => return Vec::new(),
        },
        other => other,
    };

    match object.as_array() {
        Ok(array) => array
            .iter()
            .filter_map(|entry| entry.as_reference().ok())
            .collect(),
        Err(_) => Vec::new(),
    }
}

fn text_string(object: &Object) -> Option<String> {
    match object {
        Object::String(bytes, _) => Some(decode_pdf_text(bytes)),
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE with BOM, otherwise byte text
fn decode_pdf_text(bytes: &[u8]) -> String {
    if bytes.starts_with(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&utf16)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}
