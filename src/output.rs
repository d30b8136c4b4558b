//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Pixel
//!
//! ```text
//! 50x25
//! ```
//!
//! With `--json`: `{"width":50,"height":25}`.
//!
//! ## Elaborate
//!
//! Pretty JSON of the canonical object, `original` included.
//!
//! ## Batch
//!
//! ```text
//! Source 1600x1200
//!     320       → 320x240
//!     "50%"     → 800x600
//!     "1X2X3"   ✗ Malformed size '1X2X3': the separator 'X' may appear at most once
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure.

use crate::sizing::{EffectiveDimension, RawSizeSpec, RealDimension, SizeError, SizeObject};

/// One `sizes` entry and what it resolved to.
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub spec: RawSizeSpec,
    pub outcome: Result<EffectiveDimension, SizeError>,
}

/// Compact single-line rendering of a spec as written.
pub fn spec_label(spec: &RawSizeSpec) -> String {
    serde_json::to_string(spec).unwrap_or_else(|_| format!("{spec:?}"))
}

// ============================================================================
// Pixel
// ============================================================================

pub fn format_pixel(eff: EffectiveDimension, json: bool) -> Result<Vec<String>, serde_json::Error> {
    if json {
        Ok(vec![serde_json::to_string(&eff)?])
    } else {
        Ok(vec![eff.to_string()])
    }
}

pub fn print_pixel(eff: EffectiveDimension, json: bool) -> Result<(), serde_json::Error> {
    for line in format_pixel(eff, json)? {
        println!("{}", line);
    }
    Ok(())
}

// ============================================================================
// Elaborate
// ============================================================================

pub fn format_elaborated(object: &SizeObject) -> Result<Vec<String>, serde_json::Error> {
    let pretty = serde_json::to_string_pretty(object)?;
    Ok(pretty.lines().map(str::to_string).collect())
}

pub fn print_elaborated(object: &SizeObject) -> Result<(), serde_json::Error> {
    for line in format_elaborated(object)? {
        println!("{}", line);
    }
    Ok(())
}

// ============================================================================
// Batch
// ============================================================================

/// Header line followed by one line per entry, labels padded to one column.
pub fn format_batch(real: RealDimension, entries: &[BatchEntry]) -> Vec<String> {
    let labels: Vec<String> = entries.iter().map(|e| spec_label(&e.spec)).collect();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut lines = vec![format!("Source {}x{}", real.width, real.height)];
    for (label, entry) in labels.iter().zip(entries) {
        lines.push(match &entry.outcome {
            Ok(eff) => format!("    {label:<width$} → {eff}"),
            Err(e) => format!("    {label:<width$} ✗ {e}"),
        });
    }
    lines
}

pub fn print_batch(real: RealDimension, entries: &[BatchEntry]) {
    for line in format_batch(real, entries) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::ValidationError;

    fn eff(width: u32, height: u32) -> EffectiveDimension {
        EffectiveDimension { width, height }
    }

    // =========================================================================
    // format_pixel
    // =========================================================================

    #[test]
    fn pixel_plain() {
        assert_eq!(format_pixel(eff(50, 25), false).unwrap(), vec!["50x25"]);
    }

    #[test]
    fn pixel_json() {
        assert_eq!(
            format_pixel(eff(50, 25), true).unwrap(),
            vec![r#"{"width":50,"height":25}"#]
        );
    }

    // =========================================================================
    // format_elaborated
    // =========================================================================

    #[test]
    fn elaborated_is_pretty_json() {
        let mut object = SizeObject::new().width("50").height("25");
        object.original = Some(Box::new(object.clone()));
        let lines = format_elaborated(&object).unwrap();
        assert_eq!(lines.first().map(String::as_str), Some("{"));
        assert!(lines.iter().any(|l| l.contains(r#""width": "50""#)));
        assert!(lines.iter().any(|l| l.contains(r#""original": {"#)));
    }

    #[test]
    fn elaborated_skips_absent_fields() {
        let lines = format_elaborated(&SizeObject::new().width(10u32)).unwrap();
        assert!(!lines.iter().any(|l| l.contains("height")));
        assert!(!lines.iter().any(|l| l.contains("function")));
    }

    // =========================================================================
    // format_batch
    // =========================================================================

    #[test]
    fn batch_aligns_labels() {
        let entries = vec![
            BatchEntry {
                spec: RawSizeSpec::from(320u32),
                outcome: Ok(eff(320, 240)),
            },
            BatchEntry {
                spec: RawSizeSpec::from("50%"),
                outcome: Ok(eff(800, 600)),
            },
        ];
        let lines = format_batch(RealDimension::new(1600.0, 1200.0), &entries);
        assert_eq!(
            lines,
            vec!["Source 1600x1200", "    320   → 320x240", "    \"50%\" → 800x600"]
        );
    }

    #[test]
    fn batch_shows_failures_inline() {
        let entries = vec![BatchEntry {
            spec: RawSizeSpec::from("1X2X3"),
            outcome: Err(ValidationError::MalformedSize {
                input: "1X2X3".into(),
                separator: 'X',
            }
            .into()),
        }];
        let lines = format_batch(RealDimension::new(10.0, 10.0), &entries);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("    \"1X2X3\" ✗ "));
    }

    #[test]
    fn batch_empty() {
        let lines = format_batch(RealDimension::new(10.0, 10.0), &[]);
        assert_eq!(lines, vec!["Source 10x10"]);
    }
}
