use image::{Rgb, RgbImage};

use crate::complex::*;
use crate::config::{Config, Rgb as UnitRgb};
use crate::solver::IterationState;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

pub trait Painter {
    fn point_color(&self, z: C<f64>) -> Rgb<u8>;

    /// Paints every point of `state`, diverged points always black.
    fn paint(&self, state: &IterationState) -> RgbImage {
        let width: u32 = state.width().try_into().expect("grid width fits in u32");
        let height: u32 = state.height().try_into().expect("grid height fits in u32");

        let mut img = RgbImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let (xi, yi) = (x as usize, y as usize);
                let color = if state.is_invalid(xi, yi) {
                    BLACK
                } else {
                    self.point_color(state.value(xi, yi))
                };
                img.put_pixel(x, y, color);
            }
        }
        img
    }
}

/// Blends the base colours of all reference points, each weighted by the
/// reciprocal of its distance to the point being painted.
///
/// Near a reference point its colour dominates; along basin boundaries the
/// colours mix. With no reference points everything is black.
#[derive(Clone, Debug)]
pub struct DistancePainter {
    references: Vec<C<f64>>,
    colors: Vec<UnitRgb>,
    epsilon: f64,
}

impl DistancePainter {
    /// Pairs each reference point with the palette entry at the same index.
    ///
    /// Panics if the palette is shorter than `references`; callers check
    /// with [`Config::check_palette`] first.
    pub fn new(references: Vec<C<f64>>, palette: &[UnitRgb], epsilon: f64) -> Self {
        assert!(
            references.len() <= palette.len(),
            "{} reference points but only {} colors",
            references.len(),
            palette.len()
        );
        let colors = palette[..references.len()].to_vec();
        Self {
            references,
            colors,
            epsilon,
        }
    }

    pub fn from_config(config: &Config, references: Vec<C<f64>>) -> Self {
        Self::new(references, &config.colors, config.distance_epsilon)
    }

    pub fn references(&self) -> &[C<f64>] {
        &self.references
    }

    /// Normalised inverse-distance weights, one per reference point.
    pub fn weights(&self, z: C<f64>) -> Vec<f64> {
        let mut weights: Vec<f64> = self
            .references
            .iter()
            .map(|r| 1.0 / (z - r).norm().max(self.epsilon))
            .collect();
        let total: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= total;
        }
        weights
    }
}

impl Painter for DistancePainter {
    fn point_color(&self, z: C<f64>) -> Rgb<u8> {
        if self.references.is_empty() {
            return BLACK;
        }
        let mut rgb = [0.0f64; 3];
        for (w, color) in self.weights(z).into_iter().zip(&self.colors) {
            for (channel, base) in rgb.iter_mut().zip(color) {
                *channel += w * base;
            }
        }
        Rgb(rgb.map(|v| (255.0 * v) as u8))
    }
}
