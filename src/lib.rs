//! # respsize
//!
//! Resolves responsive image size specifications into concrete pixel
//! dimensions. A build step asks for "half the source width", "fit inside
//! 640X480", or "fill 0.5x by 0.25x", and needs to know exactly how many pixels
//! wide and tall the output image will be, before any image is decoded.
//!
//! # Architecture: Normalize, Scale, Round
//!
//! ```text
//! 1. Normalize   "50X25" / 320 / {..}  →  parsed axes + step queue
//! 2. Scale       step queue            →  terminal spec (factors or pixels)
//! 3. Round       terminal spec × real  →  EffectiveDimension { width, height }
//! ```
//!
//! Every stage is a pure function of the spec and the real dimension of the
//! source. Nothing is cached between calls, so one [`sizing::SizeEngine`] can
//! serve many threads and a failed size never affects the next one.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`sizing`] | The engine: dimension grammar, normalizer, scaling functions, pipeline, pixel resolver |
//! | [`diagnostics`] | Where warnings and reported errors go (`tracing`, or recorded for tests) |
//! | [`config`] | `respsize.toml` loading, merging over stock defaults, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Functions Are a Queue
//!
//! A size names one scaling function or a chain of them. Steps run front to
//! back and each one may queue more steps, so functions compose: `cover` is
//! `check`, then aspect-ratio inference, then a uniform factor. The pipeline
//! caps the number of steps per calculation so a chain that keeps extending
//! itself fails instead of hanging.
//!
//! ## Warnings Never Abort
//!
//! An unknown function name or an unreadable height is reported through
//! [`diagnostics::Diagnostics`] and replaced with something sensible. Only a
//! size that cannot produce a result at all (no usable width or height,
//! `exact` without both) is an error.

pub mod config;
pub mod diagnostics;
pub mod output;
pub mod sizing;

#[cfg(test)]
pub(crate) mod test_helpers;
