use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Axis<T> {
    pub min: T,
    pub max: T,
}

impl<T> Axis<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl Axis<f64> {
    /// `n` evenly spaced samples from `min` to `max`, both ends included.
    ///
    /// The last sample is pinned to `max` so the far edge of the grid lands
    /// exactly on the requested bound. A single sample sits on `min`.
    pub fn linspace(&self, n: usize) -> Array1<f64> {
        let mut samples = Array1::linspace(self.min, self.max, n);
        if n > 1 {
            samples[n - 1] = self.max;
        } else if n == 1 {
            samples[0] = self.min;
        }
        samples
    }

    pub fn validate(&self, name: &'static str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(Error::InvalidAxis {
                axis: name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Rectangle of the complex plane: real part along `x`, imaginary along `y`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport<T> {
    pub x: Axis<T>,
    pub y: Axis<T>,
}

impl<T> Viewport<T> {
    pub fn new(x: Axis<T>, y: Axis<T>) -> Self {
        Self { x, y }
    }

    pub fn from_nums(x1: T, x2: T, y1: T, y2: T) -> Self {
        Self::new(Axis::new(x1, x2), Axis::new(y1, y2))
    }
}

impl Viewport<f64> {
    pub fn validate(&self) -> Result<()> {
        self.x.validate("x")?;
        self.y.validate("y")
    }
}

impl Default for Viewport<f64> {
    fn default() -> Self {
        Self::new(Axis::new(-1.5, 0.5), Axis::new(-1.0, 1.0))
    }
}
