//! Shared test utilities for the sizing test suite.
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let (engine, rec) = recording_engine();
//! engine.to_pixel(&"50X25".into(), (200u32, 100u32)).unwrap();
//! assert!(rec.entries().is_empty());
//!
//! let spec = normalized(Some("100"), None);
//! let (ctx, _) = context((200, 100));
//! ```

use std::sync::Arc;

use crate::diagnostics::RecordingDiagnostics;
use crate::sizing::normalize::Normalizer;
use crate::sizing::{
    FunctionSpec, NormalizedSizeObject, RawSizeSpec, RealDimension, Registry, SizeEngine,
    SizeObject, StepContext,
};

// =========================================================================
// Engines and contexts
// =========================================================================

/// Stock engine whose diagnostics are recorded for inspection.
pub fn recording_engine() -> (SizeEngine, Arc<RecordingDiagnostics>) {
    let rec = Arc::new(RecordingDiagnostics::new());
    (SizeEngine::new(rec.clone()), rec)
}

/// Step context over the built-in registry for a `(width, height)` source.
pub fn context(real: (u32, u32)) -> (StepContext, Arc<RecordingDiagnostics>) {
    let rec = Arc::new(RecordingDiagnostics::new());
    let ctx = StepContext {
        real: RealDimension::from(real),
        registry: Arc::new(Registry::builtin()),
        diagnostics: rec.clone(),
    };
    (ctx, rec)
}

// =========================================================================
// Specs
// =========================================================================

/// Normalize a width/height token pair with an empty function queue.
///
/// Goes through the real normalizer so `original()` carries the tokens as
/// written, which is what validation messages quote.
pub fn normalized(width: Option<&str>, height: Option<&str>) -> NormalizedSizeObject {
    let mut object = SizeObject::new();
    object.width = width.map(Into::into);
    object.height = height.map(Into::into);
    object.function = Some(FunctionSpec::Many(Vec::new()));

    let registry = Registry::builtin();
    let rec = RecordingDiagnostics::new();
    let normalizer = Normalizer {
        registry: &registry,
        default_function: "contain",
        separator: 'X',
        diagnostics: &rec,
    };
    normalizer.normalize(&RawSizeSpec::Object(object)).unwrap()
}
