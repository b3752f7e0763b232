use super::error::SchemaError;

/// Inclusive bounds applied to every value proposed for an attribute.
/// An absent bound leaves that side unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ClampRange {
    min: Option<f32>,
    max: Option<f32>,
}

impl ClampRange {
    /// A range with no bounds on either side
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Create a new ClampRange
    ///
    /// Returns an error if both bounds are present and `min > max`, or if
    /// either bound is NaN.
    pub fn new(min: Option<f32>, max: Option<f32>) -> Result<Self, SchemaError> {
        let is_nan = min.map_or(false, f32::is_nan) || max.map_or(false, f32::is_nan);
        let is_inverted = matches!((min, max), (Some(lo), Some(hi)) if lo > hi);
        if is_nan || is_inverted {
            return Err(SchemaError::InvalidClampRange {
                min: min.unwrap_or(f32::NEG_INFINITY),
                max: max.unwrap_or(f32::INFINITY),
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Option<f32> {
        self.min
    }

    pub fn max(&self) -> Option<f32> {
        self.max
    }

    pub fn is_bounded(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// `max(min, min(max, value))`, with absent bounds treated as infinite
    pub fn apply(&self, value: f32) -> f32 {
        let lo = self.min.unwrap_or(f32::NEG_INFINITY);
        let hi = self.max.unwrap_or(f32::INFINITY);
        lo.max(hi.min(value))
    }

    pub fn contains(&self, value: f32) -> bool {
        self.min.map_or(true, |lo| value >= lo) && self.max.map_or(true, |hi| value <= hi)
    }
}
