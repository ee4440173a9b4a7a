//! Custom request extractors.

mod multipart_form;
mod validated_json;

pub use multipart_form::{FileParts, MultipartForm};
pub use validated_json::ValidatedJson;

/// Format validation errors into a user-friendly string
pub(crate) fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    // field_errors() is a HashMap; keep the message order stable
    messages.sort();
    messages.join(", ")
}
