//! Spec validation shared by the built-in steps.

use super::dimension::Dimension;
use super::error::{ValidationError, Warning};
use super::normalize::NormalizedSizeObject;
use crate::diagnostics::Diagnostics;

/// Validate `spec`, returning a copy fit for arithmetic.
///
/// - Invalid width is fatal.
/// - Invalid height warns and is treated as unspecified from then on.
/// - Both axes unspecified (after the above) is fatal.
pub fn check(
    spec: &NormalizedSizeObject,
    diagnostics: &dyn Diagnostics,
) -> Result<NormalizedSizeObject, ValidationError> {
    let original = spec.original();
    if spec.width.is_invalid() {
        return Err(ValidationError::InvalidWidth {
            token: original
                .width
                .as_ref()
                .map(|w| w.display_text())
                .unwrap_or_default(),
        });
    }
    let mut checked = spec.clone();
    if checked.height.is_invalid() {
        diagnostics.warn(&Warning::InvalidHeight {
            token: original
                .height
                .as_ref()
                .map(|h| h.display_text())
                .unwrap_or_default(),
        });
        checked.height = Dimension::UNSPECIFIED;
    }
    if checked.width.is_unspecified() && checked.height.is_unspecified() {
        return Err(ValidationError::NoDimension {
            spec: original.original_json(),
        });
    }
    Ok(checked)
}
