//! The scaling pipeline: drain the step queue against the real dimension.
//!
//! Each iteration pops the front step and runs it on the current spec. The
//! step's result becomes the next spec, and it may have queued more steps, so
//! the queue is not fixed up front. Evaluation ends when the queue is empty
//! or fails with [`SizeError::NonTermination`] once `max_steps` steps ran.

use super::error::SizeError;
use super::functions::{StepContext, StepOutput};
use super::normalize::{NormalizedSizeObject, Normalizer};
use super::spec::RawSizeSpec;

/// Normalize `raw` and run its function queue to completion.
pub fn calculate(
    raw: &RawSizeSpec,
    normalizer: &Normalizer<'_>,
    ctx: &StepContext,
    max_steps: usize,
) -> Result<NormalizedSizeObject, SizeError> {
    let mut spec = normalizer.normalize(raw)?;
    let original = spec.original().clone();
    let mut executed = 0;

    while let Some(step) = spec.function.pop_front() {
        if executed >= max_steps {
            return Err(SizeError::NonTermination { limit: max_steps });
        }
        executed += 1;
        tracing::debug!(
            step = step.name(),
            width = %spec.width,
            height = %spec.height,
            queued = spec.function.len(),
            "applying size function"
        );

        spec = match step.run(&spec, ctx)? {
            StepOutput::Keep => spec,
            StepOutput::Next(next) => next,
            StepOutput::Replace(raw) => normalizer.normalize(&raw)?,
        };
        spec.set_original(original.clone());
    }

    Ok(spec)
}
