//! Normalization: canonical shape, resolved function queue, parsed axes.

use super::dimension::{self, Dimension};
use super::error::{SizeError, Warning};
use super::functions::{Registry, ScalingStep};
use super::spec::{FunctionRef, FunctionSpec, RawSizeSpec, SizeObject};
use crate::diagnostics::Diagnostics;
use std::collections::VecDeque;

/// A size spec ready for the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSizeObject {
    pub width: Dimension,
    pub height: Dimension,
    /// Steps still to run, front first.
    pub function: VecDeque<ScalingStep>,
    original: SizeObject,
}

impl NormalizedSizeObject {
    /// A spec with the given axes and an empty queue.
    ///
    /// `original` is derived from the axes; inside a calculation the pipeline
    /// replaces it with the calculation's own snapshot.
    pub fn new(width: Dimension, height: Dimension) -> Self {
        let original = SizeObject {
            width: (!width.is_unspecified()).then(|| width.into()),
            height: (!height.is_unspecified()).then(|| height.into()),
            ..SizeObject::default()
        };
        Self {
            width,
            height,
            function: VecDeque::new(),
            original,
        }
    }

    /// The canonical input this calculation started from.
    pub fn original(&self) -> &SizeObject {
        &self.original
    }

    /// Queue `step` after every step already queued.
    pub fn push_step(&mut self, step: ScalingStep) {
        self.function.push_back(step);
    }

    pub(crate) fn set_original(&mut self, original: SizeObject) {
        self.original = original;
    }
}

/// Inputs that stay fixed while normalizing within one engine.
pub struct Normalizer<'a> {
    pub registry: &'a Registry,
    pub default_function: &'a str,
    pub separator: char,
    pub diagnostics: &'a dyn Diagnostics,
}

impl Normalizer<'_> {
    /// Canonicalize, resolve the function queue, and parse both axes.
    pub fn normalize(&self, raw: &RawSizeSpec) -> Result<NormalizedSizeObject, SizeError> {
        let mut object = raw.canonicalize(self.separator)?;
        let function = self.resolve_queue(object.function.as_ref())?;
        let width = dimension::parse(object.width.as_ref());
        let height = dimension::parse(object.height.as_ref());
        tracing::trace!(%width, %height, steps = function.len(), "normalized size");
        Ok(NormalizedSizeObject {
            width,
            height,
            function,
            original: object.original.take().map(|o| *o).unwrap_or_default(),
        })
    }

    fn resolve_queue(
        &self,
        function: Option<&FunctionSpec>,
    ) -> Result<VecDeque<ScalingStep>, SizeError> {
        match function {
            None => Ok(VecDeque::from([self.default_step()?])),
            Some(FunctionSpec::One(FunctionRef::Name(name))) if name.is_empty() => {
                Ok(VecDeque::from([self.default_step()?]))
            }
            Some(FunctionSpec::One(reference)) => Ok(VecDeque::from([self.resolve(reference)?])),
            Some(FunctionSpec::Many(references)) => {
                references.iter().map(|r| self.resolve(r)).collect()
            }
        }
    }

    fn resolve(&self, reference: &FunctionRef) -> Result<ScalingStep, SizeError> {
        match reference {
            FunctionRef::Step(step) => Ok(step.clone()),
            FunctionRef::Name(name) => match self.registry.get(name) {
                Some(step) => Ok(step.clone()),
                None => {
                    self.diagnostics.warn(&Warning::UnknownFunction {
                        name: name.clone(),
                        default: self.default_function.to_string(),
                        expected: self.registry.names(),
                    });
                    self.default_step()
                }
            },
            FunctionRef::Invalid(value) => {
                self.diagnostics.warn(&Warning::InvalidFunction {
                    kind: FunctionRef::kind(value),
                    default: self.default_function.to_string(),
                    expected: self.registry.names(),
                });
                self.default_step()
            }
        }
    }

    fn default_step(&self) -> Result<ScalingStep, SizeError> {
        self.registry
            .get(self.default_function)
            .cloned()
            .ok_or_else(|| SizeError::UnknownDefault(self.default_function.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingDiagnostics;
    use crate::sizing::functions::Builtin;

    fn normalizer<'a>(registry: &'a Registry, rec: &'a RecordingDiagnostics) -> Normalizer<'a> {
        Normalizer {
            registry,
            default_function: "contain",
            separator: 'X',
            diagnostics: rec,
        }
    }

    fn names(spec: &NormalizedSizeObject) -> Vec<&str> {
        spec.function.iter().map(|s| s.name()).collect()
    }

    // =========================================================================
    // Function resolution
    // =========================================================================

    #[test]
    fn absent_function_uses_default() {
        let (registry, rec) = (Registry::builtin(), RecordingDiagnostics::new());
        let spec = normalizer(&registry, &rec)
            .normalize(&RawSizeSpec::from("100"))
            .unwrap();
        assert_eq!(names(&spec), vec!["contain"]);
        assert!(rec.entries().is_empty());
    }

    #[test]
    fn empty_name_uses_default_silently() {
        let (registry, rec) = (Registry::builtin(), RecordingDiagnostics::new());
        let raw = SizeObject::new().width(100u32).function("");
        let spec = normalizer(&registry, &rec).normalize(&raw.into()).unwrap();
        assert_eq!(names(&spec), vec!["contain"]);
        assert!(rec.entries().is_empty());
    }

    #[test]
    fn scalar_function_becomes_one_element_queue() {
        let (registry, rec) = (Registry::builtin(), RecordingDiagnostics::new());
        let raw = SizeObject::new().width(100u32).function("cover");
        let spec = normalizer(&registry, &rec).normalize(&raw.into()).unwrap();
        assert_eq!(names(&spec), vec!["cover"]);
    }

    #[test]
    fn chain_keeps_order() {
        let (registry, rec) = (Registry::builtin(), RecordingDiagnostics::new());
        let raw = SizeObject::new().width(100u32).chain(["check", "exact"]);
        let spec = normalizer(&registry, &rec).normalize(&raw.into()).unwrap();
        assert_eq!(names(&spec), vec!["check", "exact"]);
    }

    #[test]
    fn empty_chain_stays_empty() {
        let (registry, rec) = (Registry::builtin(), RecordingDiagnostics::new());
        let raw = SizeObject::new().width(100u32).chain(Vec::<FunctionRef>::new());
        let spec = normalizer(&registry, &rec).normalize(&raw.into()).unwrap();
        assert!(spec.function.is_empty());
    }

    #[test]
    fn unknown_name_warns_once_and_uses_default() {
        let (registry, rec) = (Registry::builtin(), RecordingDiagnostics::new());
        let raw = SizeObject::new().width(100u32).chain(["factor", "cover"]);
        let spec = normalizer(&registry, &rec).normalize(&raw.into()).unwrap();
        assert_eq!(names(&spec), vec!["contain", "cover"]);
        assert_eq!(
            rec.warnings(),
            vec![Warning::UnknownFunction {
                name: "factor".into(),
                default: "contain".into(),
                expected: registry.names(),
            }]
        );
    }

    #[test]
    fn non_string_reference_warns_and_uses_default() {
        let (registry, rec) = (Registry::builtin(), RecordingDiagnostics::new());
        let raw = SizeObject {
            width: Some(100u32.into()),
            function: Some(FunctionSpec::One(FunctionRef::Invalid(true.into()))),
            ..SizeObject::default()
        };
        let spec = normalizer(&registry, &rec).normalize(&raw.into()).unwrap();
        assert_eq!(names(&spec), vec!["contain"]);
        assert!(matches!(
            rec.warnings()[0],
            Warning::InvalidFunction { kind: "boolean", .. }
        ));
    }

    #[test]
    fn step_reference_is_used_directly() {
        let (registry, rec) = (Registry::builtin(), RecordingDiagnostics::new());
        let raw = SizeObject::new()
            .width(100u32)
            .function(ScalingStep::Builtin(Builtin::Exact));
        let spec = normalizer(&registry, &rec).normalize(&raw.into()).unwrap();
        assert_eq!(names(&spec), vec!["exact"]);
    }

    #[test]
    fn unregistered_default_is_fatal() {
        let (registry, rec) = (Registry::builtin(), RecordingDiagnostics::new());
        let n = Normalizer {
            default_function: "fit",
            ..normalizer(&registry, &rec)
        };
        let err = n.normalize(&RawSizeSpec::from("100")).unwrap_err();
        assert_eq!(err, SizeError::UnknownDefault("fit".into()));
    }

    // =========================================================================
    // Axes and original
    // =========================================================================

    #[test]
    fn parses_both_axes() {
        let (registry, rec) = (Registry::builtin(), RecordingDiagnostics::new());
        let spec = normalizer(&registry, &rec)
            .normalize(&RawSizeSpec::from("50%X25px"))
            .unwrap();
        assert_eq!(spec.width, Dimension::factor(0.5));
        assert_eq!(spec.height, Dimension::pixel(25.0));
    }

    #[test]
    fn original_keeps_unparsed_tokens() {
        let (registry, rec) = (Registry::builtin(), RecordingDiagnostics::new());
        let spec = normalizer(&registry, &rec)
            .normalize(&RawSizeSpec::from("50%X25px"))
            .unwrap();
        assert_eq!(spec.original().width, Some("50%".into()));
        assert_eq!(spec.original().height, Some("25px".into()));
    }

    #[test]
    fn new_derives_original_from_axes() {
        let spec = NormalizedSizeObject::new(Dimension::pixel(10.0), Dimension::UNSPECIFIED);
        assert_eq!(spec.original().width, Some(Dimension::pixel(10.0).into()));
        assert_eq!(spec.original().height, None);
        assert!(spec.function.is_empty());
    }
}
