//! AcroForm field population
//!
//! PDF parsing and serialization are delegated to `lopdf`; this module
//! only locates named form fields in the template and writes the
//! caller-supplied values into them.

mod acroform;

pub use acroform::fill_form;
