//! Scaling steps: the four built-ins, custom steps, and the registry.
//!
//! Every step is a pure function from an immutable spec (plus context) to a
//! [`StepOutput`]. Built-ins never mutate their input; they hand back a new
//! [`NormalizedSizeObject`].
//!
//! | Built-in | Effect |
//! |---|---|
//! | `contain` | uniform scale that fits inside the box (`min` of both ratios) |
//! | `cover` | uniform scale that covers the box (`max` of both ratios) |
//! | `exact` | keep both axes as written; stretches the image |
//! | `check` | validate; an unreadable height is dropped |

use super::dimension::Dimension;
use super::error::{Axis, SizeError, ValidationError};
use super::normalize::NormalizedSizeObject;
use super::resolve::RealDimension;
use super::spec::RawSizeSpec;
use super::validate;
use crate::diagnostics::Diagnostics;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// What a step hands back to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutput {
    /// Continue with the spec as received.
    Keep,
    /// Continue with this already-parsed spec.
    Next(NormalizedSizeObject),
    /// Continue with this raw spec; it is normalized again first.
    Replace(RawSizeSpec),
}

/// Everything a step may consult besides the spec itself.
#[derive(Clone)]
pub struct StepContext {
    pub(crate) real: RealDimension,
    pub(crate) registry: Arc<Registry>,
    pub(crate) diagnostics: Arc<dyn Diagnostics>,
}

impl StepContext {
    pub fn real(&self) -> RealDimension {
        self.real
    }

    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }

    /// Look up a registered step by name, for pushing continuations.
    pub fn step(&self, name: &str) -> Option<ScalingStep> {
        self.registry.get(name).cloned()
    }
}

/// A caller-supplied scaling step.
///
/// The step's own queue entry has already been removed from `spec` when it
/// runs. Push onto the returned object's queue to chain further steps.
pub trait CustomStep: Send + Sync {
    fn apply(&self, spec: &NormalizedSizeObject, ctx: &StepContext)
    -> Result<StepOutput, SizeError>;
}

impl<F> CustomStep for F
where
    F: Fn(&NormalizedSizeObject, &StepContext) -> Result<StepOutput, SizeError> + Send + Sync,
{
    fn apply(
        &self,
        spec: &NormalizedSizeObject,
        ctx: &StepContext,
    ) -> Result<StepOutput, SizeError> {
        self(spec, ctx)
    }
}

/// The built-in scaling policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Contain,
    Cover,
    Exact,
    Check,
}

impl Builtin {
    pub const ALL: [Builtin; 4] = [
        Builtin::Contain,
        Builtin::Cover,
        Builtin::Exact,
        Builtin::Check,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Contain => "contain",
            Builtin::Cover => "cover",
            Builtin::Exact => "exact",
            Builtin::Check => "check",
        }
    }

    pub fn apply(
        self,
        spec: &NormalizedSizeObject,
        ctx: &StepContext,
    ) -> Result<StepOutput, SizeError> {
        match self {
            Builtin::Contain => uniform(spec, ctx, f64::min),
            Builtin::Cover => uniform(spec, ctx, f64::max),
            Builtin::Exact => exact(spec, ctx),
            Builtin::Check => Ok(StepOutput::Next(validate::check(spec, ctx.diagnostics())?)),
        }
    }
}

/// Contain and cover: one factor for both axes, picked by `pick`.
fn uniform(
    spec: &NormalizedSizeObject,
    ctx: &StepContext,
    pick: fn(f64, f64) -> f64,
) -> Result<StepOutput, SizeError> {
    let checked = validate::check(spec, ctx.diagnostics())?;
    let mut next = infer_unspecified(&checked, ctx.real);
    let height = next
        .height
        .relative(ctx.real.height)
        .ok_or(SizeError::Unresolved { axis: Axis::Height })?;
    let width = next
        .width
        .relative(ctx.real.width)
        .ok_or(SizeError::Unresolved { axis: Axis::Width })?;
    let factor = pick(height, width);
    next.width = Dimension::factor(factor);
    next.height = Dimension::factor(factor);
    Ok(StepOutput::Next(next))
}

fn exact(spec: &NormalizedSizeObject, ctx: &StepContext) -> Result<StepOutput, SizeError> {
    let checked = validate::check(spec, ctx.diagnostics())?;
    if checked.width.is_unspecified() || checked.height.is_unspecified() {
        return Err(ValidationError::ExactNeedsBoth {
            spec: checked.original().original_json(),
        }
        .into());
    }
    Ok(StepOutput::Keep)
}

/// Fill an unspecified axis from the other axis's ratio to its real size.
///
/// The inferred axis is a pixel dimension and is not rounded. When both
/// axes are unspecified nothing changes; the validator rejects that first.
pub fn infer_unspecified(spec: &NormalizedSizeObject, real: RealDimension) -> NormalizedSizeObject {
    let mut next = spec.clone();
    if next.width.is_unspecified() {
        if let Some(rel) = next.height.relative(real.height) {
            next.width = Dimension::pixel(rel * real.width);
        }
    }
    if next.height.is_unspecified() {
        if let Some(rel) = next.width.relative(real.width) {
            next.height = Dimension::pixel(rel * real.height);
        }
    }
    next
}

/// A queued scaling step: a built-in tag or an opaque custom step.
#[derive(Clone)]
pub enum ScalingStep {
    Builtin(Builtin),
    Custom {
        name: Arc<str>,
        step: Arc<dyn CustomStep>,
    },
}

impl ScalingStep {
    pub fn custom(name: &str, step: impl CustomStep + 'static) -> Self {
        ScalingStep::Custom {
            name: Arc::from(name),
            step: Arc::new(step),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ScalingStep::Builtin(b) => b.name(),
            ScalingStep::Custom { name, .. } => name,
        }
    }

    pub fn run(
        &self,
        spec: &NormalizedSizeObject,
        ctx: &StepContext,
    ) -> Result<StepOutput, SizeError> {
        match self {
            ScalingStep::Builtin(b) => b.apply(spec, ctx),
            ScalingStep::Custom { step, .. } => step.apply(spec, ctx),
        }
    }
}

impl fmt::Debug for ScalingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalingStep::Builtin(b) => f.debug_tuple("Builtin").field(b).finish(),
            ScalingStep::Custom { name, .. } => f.debug_tuple("Custom").field(name).finish(),
        }
    }
}

impl PartialEq for ScalingStep {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ScalingStep::Builtin(a), ScalingStep::Builtin(b)) => a == b,
            (
                ScalingStep::Custom { name: n1, step: s1 },
                ScalingStep::Custom { name: n2, step: s2 },
            ) => n1 == n2 && Arc::ptr_eq(s1, s2),
            _ => false,
        }
    }
}

impl From<Builtin> for ScalingStep {
    fn from(builtin: Builtin) -> Self {
        ScalingStep::Builtin(builtin)
    }
}

/// Named steps available to function references.
#[derive(Debug, Clone)]
pub struct Registry {
    steps: BTreeMap<String, ScalingStep>,
}

impl Registry {
    /// A registry holding exactly the four built-ins.
    pub fn builtin() -> Self {
        let steps = Builtin::ALL
            .iter()
            .map(|b| (b.name().to_string(), ScalingStep::Builtin(*b)))
            .collect();
        Self { steps }
    }

    /// Add or replace a named step.
    pub fn insert(&mut self, name: &str, step: ScalingStep) {
        self.steps.insert(name.to_string(), step);
    }

    pub fn get(&self, name: &str) -> Option<&ScalingStep> {
        self.steps.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.steps.keys().cloned().collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
