//! Real and effective dimensions, and the final conversion to pixels.

use super::dimension::{Dimension, Unit};
use super::error::{Axis, SizeError};
use super::normalize::NormalizedSizeObject;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel size of the source asset, as reported by whatever probed it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealDimension {
    pub width: f64,
    pub height: f64,
}

impl RealDimension {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Reject sizes that are not finite and strictly positive.
    pub fn validated(self) -> Result<Self, SizeError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(self)
        } else {
            Err(SizeError::InvalidRealDimension {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl From<(f64, f64)> for RealDimension {
    fn from((width, height): (f64, f64)) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for RealDimension {
    fn from((width, height): (u32, u32)) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
        }
    }
}

/// Resolved target size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectiveDimension {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for EffectiveDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Convert a terminal spec to whole pixels against `real`.
///
/// Factors multiply the real axis, pixels pass through, and each axis is
/// rounded half-up on its own. An unspecified axis keeps its real size.
pub fn to_effective(
    spec: &NormalizedSizeObject,
    real: RealDimension,
) -> Result<EffectiveDimension, SizeError> {
    Ok(EffectiveDimension {
        width: axis_pixels(&spec.width, real.width, Axis::Width)?,
        height: axis_pixels(&spec.height, real.height, Axis::Height)?,
    })
}

fn axis_pixels(dim: &Dimension, real: f64, axis: Axis) -> Result<u32, SizeError> {
    let absolute = match dim.unit {
        Unit::Unspecified => real,
        _ => dim.absolute(real).ok_or(SizeError::Unresolved { axis })?,
    };
    if !absolute.is_finite() {
        return Err(SizeError::NonFinite { axis });
    }
    // `as` saturates: negatives land on 0, overflow on u32::MAX.
    Ok(absolute.round() as u32)
}
