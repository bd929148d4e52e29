//! Form validation

use validator::Validate;

use crate::{
    error::FieldErrors,
    models::{QrCodeDraft, QrCodeInput},
};

/// Fields in the order the form shows them
const FIELDS: [&str; 3] = ["title", "product_id", "destination"];

/// Every missing required field of the draft, or `None` when all are present
pub fn validate_draft(draft: &QrCodeDraft) -> Option<FieldErrors> {
    let errors = match draft.validate() {
        Ok(()) => return None,
        Err(errors) => errors,
    };
    let fields = errors.field_errors();

    let mut out = FieldErrors::new();
    for name in FIELDS {
        let message = fields
            .iter()
            .find(|(field, _)| **field == name)
            .and_then(|(_, errs)| errs.first())
            .map(|err| {
                err.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", name))
            });
        if let Some(message) = message {
            out.insert(name.to_string(), message);
        }
    }
    Some(out)
}

/// Turn a draft into storable input, reporting field errors
pub fn draft_to_input(draft: QrCodeDraft) -> Result<QrCodeInput, FieldErrors> {
    if let Some(errors) = validate_draft(&draft) {
        return Err(errors);
    }
    let destination = draft.destination.parse().map_err(|_: String| {
        let mut errors = FieldErrors::new();
        errors.insert(
            "destination".to_string(),
            "Destination must be product or cart".to_string(),
        );
        errors
    })?;

    Ok(QrCodeInput {
        title: draft.title,
        product_id: draft.product_id,
        product_handle: draft.product_handle,
        product_variant_id: draft.product_variant_id,
        destination,
    })
}
