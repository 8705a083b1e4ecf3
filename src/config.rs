use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::complex::*;
use crate::coord::Viewport;
use crate::error::{Error, Result};

pub type Rgb = [f64; 3];

pub const RED: Rgb = [1.0, 0.0, 0.0];
pub const GREEN: Rgb = [0.0, 1.0, 0.0];
pub const BLUE: Rgb = [0.0, 0.0, 1.0];
pub const YELLOW: Rgb = [1.0, 1.0, 0.0];
pub const MAGENTA: Rgb = [1.0, 0.0, 1.0];
pub const CYAN: Rgb = [0.0, 1.0, 1.0];

/// Largest image side `image` can address.
pub const MAX_DIMENSION: usize = u32::MAX as usize;

pub const DEFAULT_PALETTE: [Rgb; 6] = [RED, GREEN, BLUE, YELLOW, MAGENTA, CYAN];

/// Everything a render needs, fixed before the first frame is computed.
///
/// Deserializes from JSON with every field optional; missing fields take
/// their [`Default`] value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub viewport: Viewport<f64>,
    /// One frame per entry, each iterated from the untouched grid.
    pub iterations: Vec<usize>,
    /// Root search stops when |f′(z)| drops below this.
    pub derivative_epsilon: f64,
    /// Points farther than this from the origin count as diverged.
    pub divergence_radius: f64,
    /// A search result is a root when |f(z)| is below this.
    pub root_tolerance: f64,
    /// Roots closer than this are the same root.
    pub root_separation: f64,
    pub seed_count: usize,
    pub seed_radius: f64,
    pub root_search_steps: usize,
    /// Floor applied to distances before taking their reciprocal.
    pub distance_epsilon: f64,
    /// Whether the discovered roots lead the reference points.
    pub use_roots: bool,
    /// Fixed reference points appended after the roots.
    pub attractors: Vec<C<f64>>,
    /// Base colour of each reference point, in reference order.
    pub colors: Vec<Rgb>,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    /// Worker threads for the solver; zero solves on the calling thread.
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 432,
            height: 432,
            viewport: Viewport::default(),
            iterations: vec![1, 3, 100],
            derivative_epsilon: 1e-6,
            divergence_radius: 1e6,
            root_tolerance: 1e-5,
            root_separation: 1e-3,
            seed_count: 16,
            seed_radius: 0.5,
            root_search_steps: 100,
            distance_epsilon: 1e-6,
            use_roots: true,
            attractors: vec![],
            colors: DEFAULT_PALETTE.to_vec(),
            output_dir: PathBuf::from("images"),
            file_prefix: "newton_div".to_string(),
            threads: 0,
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Adds the Newton map's 2-cycle at 0 and 1 as extra reference points,
    /// so the points caught in it get their own colours.
    pub fn with_attractors(mut self) -> Self {
        self.attractors = vec![cr(0.0), cr(1.0)];
        self
    }

    /// Reference points for colouring: the roots (when enabled) followed by
    /// the attractors.
    pub fn reference_points(&self, roots: &[C<f64>]) -> Vec<C<f64>> {
        let roots = if self.use_roots { roots } else { &[][..] };
        roots.iter().chain(&self.attractors).copied().collect()
    }

    pub fn frame_path(&self, iterations: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}{}.png", self.file_prefix, iterations))
    }

    pub fn validate(&self) -> Result<()> {
        let fits = |n: usize| n > 0 && n <= MAX_DIMENSION;
        if !fits(self.width) || !fits(self.height) {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.iterations.is_empty() {
            return Err(Error::EmptyIterations);
        }
        self.viewport.validate()?;

        let positive = [
            ("derivative_epsilon", self.derivative_epsilon),
            ("divergence_radius", self.divergence_radius),
            ("root_tolerance", self.root_tolerance),
            ("root_separation", self.root_separation),
            ("seed_radius", self.seed_radius),
            ("distance_epsilon", self.distance_epsilon),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidParameter { name, value });
            }
        }
        if self.seed_count == 0 {
            return Err(Error::InvalidParameter {
                name: "seed_count",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Checks that every reference point has a colour.
    pub fn check_palette(&self, references: usize) -> Result<()> {
        if references > self.colors.len() {
            return Err(Error::PaletteTooSmall {
                points: references,
                colors: self.colors.len(),
            });
        }
        Ok(())
    }
}
