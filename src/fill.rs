//! Fill request schema and validation
//!
//! The inbound body is validated into a typed request up front instead
//! of probing the parsed JSON at each use site. Field checks run in a
//! fixed order so diagnostics are deterministic: `templateUrl` first,
//! then `pdfFormData`.

use serde_json::{Map, Value};

use crate::error::{AppError, Result};

/// A validated form-fill request
#[derive(Debug, Clone)]
pub struct FillRequest {
    /// Location of the blank PDF template
    pub template_url: String,
    /// Field-name to value mapping applied to the template's AcroForm
    pub form_data: Map<String, Value>,
}

impl FillRequest {
    /// Parse and validate a raw request body
    pub fn parse(body: &str) -> Result<Self> {
        if body.trim().is_empty() {
            return Err(AppError::EmptyBody);
        }

        let json: Value =
            serde_json::from_str(body).map_err(|e| AppError::InvalidJson(e.to_string()))?;

        let object = json
            .as_object()
            .ok_or_else(|| AppError::InvalidJson("expected a JSON object".to_string()))?;

        let template_url = object
            .get("templateUrl")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .ok_or(AppError::MissingTemplateUrl)?
            .to_string();

        let form_data = object
            .get("pdfFormData")
            .and_then(Value::as_object)
            .ok_or(AppError::MissingFormData)?
            .clone();

        Ok(Self {
            template_url,
            form_data,
        })
    }
}

/// Coerce a JSON value to the text written into a form field
///
/// Strings contribute their contents without quotes; `null` becomes the
/// empty string; everything else uses its compact JSON text.
pub fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
