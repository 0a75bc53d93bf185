//! Shared helpers for integration tests
//!
//! Builds small AcroForm templates in memory and reads filled values
//! back out, so the tests never depend on fixture files.

use std::collections::HashMap;

use lopdf::{dictionary, Document, Object};

/// Build a one-page PDF with a text form field per name
pub fn form_template(field_names: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let field_ids: Vec<_> = field_names
        .iter()
        .map(|name| {
            doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Widget",
                "FT" => "Tx",
                "T" => Object::string_literal(*name),
                "Rect" => vec![50.into(), 700.into(), 250.into(), 720.into()],
            })
        })
        .collect();
    let refs: Vec<Object> = field_ids.iter().map(|id| Object::Reference(*id)).collect();

    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Annots" => Object::Array(refs.clone()),
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let form_id = doc.add_object(dictionary! {
        "Fields" => Object::Array(refs),
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => form_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Read the string value of every filled field, keyed by field name
pub fn field_values(pdf: &[u8]) -> HashMap<String, String> {
    let doc = Document::load_mem(pdf).unwrap();

    let root_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .unwrap();
    let catalog = doc.get_object(root_id).and_then(Object::as_dict).unwrap();
    let form_id = catalog
        .get(b"AcroForm")
        .and_then(Object::as_reference)
        .unwrap();
    let form = doc.get_object(form_id).and_then(Object::as_dict).unwrap();
    let fields = form.get(b"Fields").and_then(Object::as_array).unwrap();

    let mut values = HashMap::new();
    for entry in fields {
        let id = entry.as_reference().unwrap();
        let dict = doc.get_object(id).and_then(Object::as_dict).unwrap();

        let name = match dict.get(b"T") {
            Ok(Object::String(bytes, _)) => String::from_utf8_lossy(bytes).into_owned(),
            _ => continue,
        };
        if let Ok(Object::String(bytes, _)) = dict.get(b"V") {
            values.insert(name, String::from_utf8_lossy(bytes).into_owned());
        }
    }
    values
}
