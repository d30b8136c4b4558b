//! The engine: construction-time configuration plus the public operations.

use super::error::SizeError;
use super::functions::{CustomStep, Registry, ScalingStep, StepContext};
use super::normalize::{NormalizedSizeObject, Normalizer};
use super::pipeline;
use super::resolve::{self, EffectiveDimension, RealDimension};
use super::spec::{RawSizeSpec, SizeObject};
use crate::config::EngineConfig;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use std::sync::Arc;

/// Resolves size specifications into pixel dimensions.
///
/// Holds no per-call state. One engine can serve any number of threads.
///
/// ```
/// use respsize::sizing::{EffectiveDimension, SizeEngine};
///
/// let engine = SizeEngine::default();
/// let px = engine.to_pixel(&"50X25".into(), (200u32, 100u32)).unwrap();
/// assert_eq!(px, EffectiveDimension { width: 50, height: 25 });
/// ```
#[derive(Clone)]
pub struct SizeEngine {
    config: EngineConfig,
    registry: Arc<Registry>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl SizeEngine {
    /// Engine with the stock configuration and the built-in registry.
    pub fn new(diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self::with_config(EngineConfig::default(), diagnostics)
    }

    pub fn with_config(config: EngineConfig, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            config,
            registry: Arc::new(Registry::builtin()),
            diagnostics,
        }
    }

    /// Register a named custom step. A built-in name is replaced for this
    /// engine only.
    pub fn register(&mut self, name: &str, step: impl CustomStep + 'static) -> &mut Self {
        Arc::make_mut(&mut self.registry).insert(name, ScalingStep::custom(name, step));
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run the full pipeline and return the terminal spec.
    pub fn calculate(
        &self,
        spec: &RawSizeSpec,
        real: impl Into<RealDimension>,
    ) -> Result<NormalizedSizeObject, SizeError> {
        self.reported(self.calculate_inner(spec, real.into()))
    }

    /// Resolve `spec` against the real size into whole pixels.
    pub fn to_pixel(
        &self,
        spec: &RawSizeSpec,
        real: impl Into<RealDimension>,
    ) -> Result<EffectiveDimension, SizeError> {
        let real = real.into();
        self.reported(
            self.calculate_inner(spec, real)
                .and_then(|terminal| resolve::to_effective(&terminal, real)),
        )
    }

    /// [`to_pixel`](Self::to_pixel) with positional width and height.
    pub fn to_pixel_wh(
        &self,
        spec: &RawSizeSpec,
        width: f64,
        height: f64,
    ) -> Result<EffectiveDimension, SizeError> {
        self.to_pixel(spec, RealDimension::new(width, height))
    }

    /// Canonical shape of `spec` with `original` populated. Runs no steps.
    pub fn elaborate(&self, spec: &RawSizeSpec) -> Result<SizeObject, SizeError> {
        self.reported(spec.canonicalize(self.config.separator).map_err(Into::into))
    }

    fn calculate_inner(
        &self,
        spec: &RawSizeSpec,
        real: RealDimension,
    ) -> Result<NormalizedSizeObject, SizeError> {
        let real = real.validated()?;
        let normalizer = Normalizer {
            registry: &self.registry,
            default_function: &self.config.default_function,
            separator: self.config.separator,
            diagnostics: self.diagnostics.as_ref(),
        };
        let ctx = StepContext {
            real,
            registry: self.registry.clone(),
            diagnostics: self.diagnostics.clone(),
        };
        pipeline::calculate(spec, &normalizer, &ctx, self.config.max_steps)
    }

    fn reported<T>(&self, result: Result<T, SizeError>) -> Result<T, SizeError> {
        if let Err(e) = &result {
            self.diagnostics.error(e);
        }
        result
    }
}

impl Default for SizeEngine {
    fn default() -> Self {
        Self::new(Arc::new(TracingDiagnostics))
    }
}
