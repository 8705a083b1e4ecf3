use std::sync::Arc;

use ndarray::{Array2, Axis as NdAxis};

use crate::complex::*;
use crate::coord::Viewport;
use crate::error::{Error, Result};

/// The sample lattice: entry `[[row, col]]` is `x(col) + i·y(row)`.
///
/// Built once per run and shared read-only by every frame.
#[derive(Clone, Debug)]
pub struct ComplexGrid {
    points: Arc<Array2<C<f64>>>,
}

impl ComplexGrid {
    pub fn initialize(width: usize, height: usize, viewport: &Viewport<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let x_coords = viewport
            .x
            .linspace(width)
            .mapv(cr)
            .insert_axis(NdAxis(0));
        let y_coords = viewport
            .y
            .linspace(height)
            .mapv(ci)
            .insert_axis(NdAxis(1));

        Ok(Self {
            points: Arc::new(&x_coords + &y_coords),
        })
    }

    pub fn from_array(points: Array2<C<f64>>) -> Self {
        Self {
            points: Arc::new(points),
        }
    }

    pub fn width(&self) -> usize {
        self.points.ncols()
    }

    pub fn height(&self) -> usize {
        self.points.nrows()
    }

    pub fn points(&self) -> &Array2<C<f64>> {
        &self.points
    }

    pub fn point(&self, x: usize, y: usize) -> C<f64> {
        self.points[[y, x]]
    }
}
