//! Size resolution: from a user-written size to whole target pixels.
//!
//! | Stage | Module |
//! |---|---|
//! | **Parse** one width/height token | [`dimension`] |
//! | **Canonicalize** the input shape | [`spec`] |
//! | **Normalize**: resolve functions, parse axes | [`normalize`] |
//! | **Validate** | [`validate`] |
//! | **Scale**: built-ins, custom steps | [`functions`] |
//! | **Drain** the step queue | [`pipeline`] |
//! | **Round** to pixels | [`resolve`] |
//!
//! [`SizeEngine`] wires these together behind `to_pixel` and `elaborate`.
//! Everything is a pure function of (spec, real dimension); the only side
//! effect is diagnostics through the injected
//! [`Diagnostics`](crate::diagnostics::Diagnostics).

pub mod dimension;
mod engine;
mod error;
pub mod functions;
pub mod normalize;
pub mod pipeline;
pub mod resolve;
pub mod spec;
pub mod validate;

pub use dimension::{Dimension, RawDimension, StructuredDimension, Unit};
pub use engine::SizeEngine;
pub use error::{Axis, SizeError, ValidationError, Warning};
pub use functions::{
    Builtin, CustomStep, Registry, ScalingStep, StepContext, StepOutput, infer_unspecified,
};
pub use normalize::NormalizedSizeObject;
pub use resolve::{EffectiveDimension, RealDimension};
pub use spec::{FunctionRef, FunctionSpec, RawSizeSpec, SizeObject};
